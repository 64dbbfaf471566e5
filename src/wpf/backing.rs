//! Static members that hold a dependency property or routed event.

use smol_str::SmolStr;

use super::known;
use crate::hir::{SemanticModel, SymbolId, SymbolKind, SymbolTable, TypeRef};
use crate::parser::{AstNode, Expr, PropertyDecl, SyntaxNode, SyntaxToken, VariableDeclarator};
use crate::syntax::try_single_statement;

/// A `static` field or property whose type is `DependencyProperty`,
/// `DependencyPropertyKey` or `RoutedEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackingFieldOrProperty {
    Field(SymbolId),
    Property(SymbolId),
}

impl BackingFieldOrProperty {
    pub fn try_create_for_dependency_property(
        symbols: &SymbolTable,
        symbol: SymbolId,
    ) -> Option<Self> {
        Self::try_create(
            symbols,
            symbol,
            &[known::DEPENDENCY_PROPERTY, known::DEPENDENCY_PROPERTY_KEY],
        )
    }

    pub fn try_create_for_routed_event(symbols: &SymbolTable, symbol: SymbolId) -> Option<Self> {
        Self::try_create(symbols, symbol, &[known::ROUTED_EVENT])
    }

    fn try_create(symbols: &SymbolTable, symbol: SymbolId, types: &[&str]) -> Option<Self> {
        let member = symbols.get(symbol);
        if !member.is_static {
            return None;
        }
        let ty = member.ty.as_ref()?.def()?;
        if !types.iter().any(|name| symbols.type_by_name(name) == Some(ty)) {
            return None;
        }
        match member.kind {
            SymbolKind::Field => Some(Self::Field(symbol)),
            SymbolKind::Property => Some(Self::Property(symbol)),
            _ => None,
        }
    }

    pub fn symbol(self) -> SymbolId {
        match self {
            Self::Field(id) | Self::Property(id) => id,
        }
    }

    pub fn name(self, symbols: &SymbolTable) -> &SmolStr {
        &symbols.get(self.symbol()).name
    }

    pub fn ty(self, symbols: &SymbolTable) -> Option<&TypeRef> {
        symbols.get(self.symbol()).ty.as_ref()
    }

    pub fn containing_type(self, symbols: &SymbolTable) -> Option<SymbolId> {
        symbols.containing_type(self.symbol())
    }

    /// Holds a `DependencyPropertyKey`
    pub fn is_key(self, symbols: &SymbolTable) -> bool {
        let key = symbols.type_by_name(known::DEPENDENCY_PROPERTY_KEY);
        key.is_some() && self.ty(symbols).and_then(TypeRef::def) == key
    }

    /// The declaring node (variable declarator or property declaration) with
    /// a model for the document it lives in.
    pub fn declaration<'a>(
        self,
        model: &SemanticModel<'a>,
    ) -> Option<(SemanticModel<'a>, SyntaxNode)> {
        let decl = model.symbols().get(self.symbol()).declarations.first()?;
        model.model_for(decl)
    }

    /// The value a declaration is initialized with: `= value` for fields and
    /// auto-properties, or the expression returned by a get-only property.
    pub fn value_of(declaration: &SyntaxNode) -> Option<Expr> {
        if let Some(declarator) = VariableDeclarator::cast(declaration.clone()) {
            return declarator.initializer();
        }
        let property = PropertyDecl::cast(declaration.clone())?;
        if let Some(value) = property.initializer().or_else(|| property.expression_body()) {
            return Some(value);
        }
        let getter = property.getter()?;
        if let Some(value) = getter.expression_body() {
            return Some(value);
        }
        try_single_statement(&getter.body()?)?.expr()
    }

    /// Name token of a declaring node
    pub fn identifier(declaration: &SyntaxNode) -> Option<SyntaxToken> {
        if let Some(declarator) = VariableDeclarator::cast(declaration.clone()) {
            return declarator.name_token();
        }
        PropertyDecl::cast(declaration.clone())?.name_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::hir::Compilation;

    const SOURCE: &str = r#"
namespace N
{
    using System.Windows;

    public class FooControl : FrameworkElement
    {
        private static readonly DependencyPropertyKey BarPropertyKey = DependencyProperty.RegisterReadOnly(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        public static readonly DependencyProperty BarProperty = BarPropertyKey.DependencyProperty;

        public static DependencyProperty BazProperty { get; } = BarPropertyKey.DependencyProperty;

        public static readonly RoutedEvent ValueChangedEvent = EventManager.RegisterRoutedEvent(
            "ValueChanged", RoutingStrategy.Bubble, typeof(RoutedEventHandler), typeof(FooControl));

        public readonly DependencyProperty InstanceProperty;

        public static readonly int Number = 1;

        public int Bar => (int)this.GetValue(BarProperty);
    }
}"#;

    fn find(compilation: &Compilation, name: &str) -> SymbolId {
        compilation
            .symbols()
            .iter()
            .find(|(_, s)| s.name == name && !s.is_metadata)
            .map(|(id, _)| id)
            .unwrap()
    }

    #[test]
    fn test_field_and_property_forms() {
        let compilation = Compilation::from_text(SOURCE);
        let symbols = compilation.symbols();

        let key = BackingFieldOrProperty::try_create_for_dependency_property(
            symbols,
            find(&compilation, "BarPropertyKey"),
        )
        .unwrap();
        assert!(matches!(key, BackingFieldOrProperty::Field(_)));
        assert!(key.is_key(symbols));

        let field = BackingFieldOrProperty::try_create_for_dependency_property(
            symbols,
            find(&compilation, "BarProperty"),
        )
        .unwrap();
        let property = BackingFieldOrProperty::try_create_for_dependency_property(
            symbols,
            find(&compilation, "BazProperty"),
        )
        .unwrap();
        assert!(matches!(property, BackingFieldOrProperty::Property(_)));
        assert_eq!(field.ty(symbols), property.ty(symbols));
        assert_eq!(field.containing_type(symbols), property.containing_type(symbols));
        assert!(!field.is_key(symbols));
    }

    #[test]
    fn test_rejects_instance_and_unrelated_members() {
        let compilation = Compilation::from_text(SOURCE);
        let symbols = compilation.symbols();
        for name in ["InstanceProperty", "Number", "Bar"] {
            assert_eq!(
                BackingFieldOrProperty::try_create_for_dependency_property(
                    symbols,
                    find(&compilation, name)
                ),
                None,
                "{name}"
            );
        }
        let event = find(&compilation, "ValueChangedEvent");
        assert!(BackingFieldOrProperty::try_create_for_dependency_property(symbols, event).is_none());
        assert!(BackingFieldOrProperty::try_create_for_routed_event(symbols, event).is_some());
    }

    #[test]
    fn test_declaration_value_and_identifier() {
        let compilation = Compilation::from_text(SOURCE);
        let model = compilation.semantic_model(FileId::new(0)).unwrap();
        let property = BackingFieldOrProperty::try_create_for_dependency_property(
            model.symbols(),
            find(&compilation, "BazProperty"),
        )
        .unwrap();
        let (_, node) = property.declaration(&model).unwrap();
        assert_eq!(
            BackingFieldOrProperty::identifier(&node).unwrap().text(),
            "BazProperty"
        );
        let value = BackingFieldOrProperty::value_of(&node).unwrap();
        assert_eq!(value.syntax().text().to_string(), "BarPropertyKey.DependencyProperty");
    }
}
