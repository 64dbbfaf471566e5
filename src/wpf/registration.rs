//! Registration invocations and the initializer chains leading to them.

use super::backing::BackingFieldOrProperty;
use super::known;
use crate::hir::{ParamInfo, SemanticModel, SymbolId, TypeRef};
use crate::parser::{
    Argument, AstNode, Expr, InvocationExpr, MemberAccessExpr, SyntaxKind, TypeofExpr,
};
use crate::syntax::try_get_string_value;

/// `AddOwner` and key indirections are followed at most this deep.
const MAX_CHAIN_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationKind {
    Register,
    RegisterReadOnly,
    RegisterAttached,
    RegisterAttachedReadOnly,
    AddOwner,
    OverrideMetadata,
    RegisterRoutedEvent,
}

impl RegistrationKind {
    fn from_method_name(name: &str) -> Option<Self> {
        Some(match name {
            "Register" => Self::Register,
            "RegisterReadOnly" => Self::RegisterReadOnly,
            "RegisterAttached" => Self::RegisterAttached,
            "RegisterAttachedReadOnly" => Self::RegisterAttachedReadOnly,
            "AddOwner" => Self::AddOwner,
            "OverrideMetadata" => Self::OverrideMetadata,
            "RegisterRoutedEvent" => Self::RegisterRoutedEvent,
            _ => return None,
        })
    }

    pub fn method_name(self) -> &'static str {
        match self {
            Self::Register => "Register",
            Self::RegisterReadOnly => "RegisterReadOnly",
            Self::RegisterAttached => "RegisterAttached",
            Self::RegisterAttachedReadOnly => "RegisterAttachedReadOnly",
            Self::AddOwner => "AddOwner",
            Self::OverrideMetadata => "OverrideMetadata",
            Self::RegisterRoutedEvent => "RegisterRoutedEvent",
        }
    }

    /// Creates a new property or event, as opposed to reusing one
    pub fn is_registration(self) -> bool {
        !matches!(self, Self::AddOwner | Self::OverrideMetadata)
    }

    pub fn is_read_only(self) -> bool {
        matches!(self, Self::RegisterReadOnly | Self::RegisterAttachedReadOnly)
    }

    pub fn is_attached(self) -> bool {
        matches!(self, Self::RegisterAttached | Self::RegisterAttachedReadOnly)
    }
}

/// A view over one registration invocation, bound to its method symbol.
#[derive(Debug, Clone)]
pub struct RegistrationCall {
    kind: RegistrationKind,
    invocation: InvocationExpr,
    method: SymbolId,
}

impl RegistrationCall {
    pub fn try_create(invocation: &InvocationExpr, model: &SemanticModel<'_>) -> Option<Self> {
        let kind = RegistrationKind::from_method_name(&invocation.method_name()?)?;
        let method = model.symbol(invocation.syntax())?;
        let symbols = model.symbols();
        let owner = symbols.containing_type(method)?;
        let expected: &[&str] = match kind {
            RegistrationKind::RegisterRoutedEvent => &[known::EVENT_MANAGER],
            RegistrationKind::OverrideMetadata => {
                &[known::DEPENDENCY_PROPERTY, known::DEPENDENCY_PROPERTY_KEY]
            }
            _ => &[known::DEPENDENCY_PROPERTY],
        };
        if !expected
            .iter()
            .any(|name| symbols.type_by_name(name) == Some(owner))
        {
            return None;
        }
        Some(Self {
            kind,
            invocation: invocation.clone(),
            method,
        })
    }

    pub fn kind(&self) -> RegistrationKind {
        self.kind
    }

    pub fn invocation(&self) -> &InvocationExpr {
        &self.invocation
    }

    pub fn method(&self) -> SymbolId {
        self.method
    }

    /// Argument bound to the parameter `parameter` of the resolved overload
    pub fn argument(&self, model: &SemanticModel<'_>, parameter: &str) -> Option<Argument> {
        argument_for_parameter(
            &self.invocation.arguments(),
            &model.symbols().get(self.method).parameters,
            parameter,
        )
    }

    fn first_argument(&self, model: &SemanticModel<'_>, parameters: &[&str]) -> Option<Argument> {
        parameters.iter().find_map(|p| self.argument(model, p))
    }

    pub fn name_argument(&self, model: &SemanticModel<'_>) -> Option<Argument> {
        self.argument(model, "name")
    }

    /// `propertyType` or `handlerType`
    pub fn type_argument(&self, model: &SemanticModel<'_>) -> Option<Argument> {
        self.first_argument(model, &["propertyType", "handlerType"])
    }

    /// `ownerType` or `forType`
    pub fn owner_argument(&self, model: &SemanticModel<'_>) -> Option<Argument> {
        self.first_argument(model, &["ownerType", "forType"])
    }

    /// `typeMetadata` or `defaultMetadata`
    pub fn metadata_argument(&self, model: &SemanticModel<'_>) -> Option<Argument> {
        self.first_argument(model, &["typeMetadata", "defaultMetadata"])
    }

    pub fn validate_value_callback(&self, model: &SemanticModel<'_>) -> Option<Argument> {
        self.argument(model, "validateValueCallback")
    }

    /// `X` in `X.AddOwner(..)` and `X.OverrideMetadata(..)`
    pub fn receiver(&self) -> Option<Expr> {
        self.invocation.receiver()
    }

    /// Name passed to a `Register*` call, literal or `nameof`
    pub fn registered_name(&self, model: &SemanticModel<'_>) -> Option<String> {
        if !self.kind.is_registration() {
            return None;
        }
        try_get_string_value(&self.name_argument(model)?.expr()?, model)
    }

    /// The registered name of the property this call registers or reuses.
    pub fn property_name(&self, model: &SemanticModel<'_>) -> Option<String> {
        if self.kind.is_registration() {
            return self.registered_name(model);
        }
        let backing = self.receiver_backing(model)?;
        try_get_registered_name(backing, model)
    }

    /// Value type of the property this call registers or reuses
    pub fn registered_type(&self, model: &SemanticModel<'_>) -> Option<TypeRef> {
        if self.kind.is_registration() {
            return typeof_argument(&self.type_argument(model)?, model);
        }
        let backing = self.receiver_backing(model)?;
        try_get_registered_type(backing, model)
    }

    /// Type in the `typeof` of the owner argument
    pub fn owner_type(&self, model: &SemanticModel<'_>) -> Option<TypeRef> {
        typeof_argument(&self.owner_argument(model)?, model)
    }

    fn receiver_backing(&self, model: &SemanticModel<'_>) -> Option<BackingFieldOrProperty> {
        let symbol = model.symbol(self.receiver()?.syntax())?;
        BackingFieldOrProperty::try_create_for_dependency_property(model.symbols(), symbol)
    }
}

/// The argument passed for `name`: a `name:` argument, else the positional
/// argument at the parameter's index.
pub fn argument_for_parameter(
    arguments: &[Argument],
    parameters: &[ParamInfo],
    name: &str,
) -> Option<Argument> {
    if let Some(named) = arguments
        .iter()
        .find(|a| a.name_colon().as_deref() == Some(name))
    {
        return Some(named.clone());
    }
    let index = parameters.iter().position(|p| p.name == name)?;
    let argument = arguments.get(index)?;
    argument.name_colon().is_none().then(|| argument.clone())
}

fn typeof_argument(argument: &Argument, model: &SemanticModel<'_>) -> Option<TypeRef> {
    let expr = argument.expr()?.unparenthesized();
    let typeof_expr = TypeofExpr::cast(expr.syntax().clone())?;
    model.resolve_type_syntax(&typeof_expr.ty()?)
}

/// The `Register*` call that created the value of `backing`, following
/// `AddOwner` receivers and `Key.DependencyProperty` to the original.
///
/// The returned model belongs to the document containing the call.
pub fn try_get_registration<'a>(
    backing: BackingFieldOrProperty,
    model: &SemanticModel<'a>,
) -> Option<(SemanticModel<'a>, RegistrationCall)> {
    registration(backing, model, 0)
}

fn registration<'a>(
    backing: BackingFieldOrProperty,
    model: &SemanticModel<'a>,
    depth: usize,
) -> Option<(SemanticModel<'a>, RegistrationCall)> {
    if depth > MAX_CHAIN_DEPTH {
        return None;
    }
    let (model, node) = backing.declaration(model)?;
    let value = BackingFieldOrProperty::value_of(&node)?.unparenthesized();
    let next = match value.kind() {
        SyntaxKind::INVOCATION_EXPR => {
            let invocation = InvocationExpr::cast(value.syntax().clone())?;
            let call = RegistrationCall::try_create(&invocation, &model)?;
            match call.kind() {
                RegistrationKind::AddOwner => model.symbol(call.receiver()?.syntax())?,
                RegistrationKind::OverrideMetadata => return None,
                _ => return Some((model, call)),
            }
        }
        SyntaxKind::MEMBER_ACCESS_EXPR => {
            let access = MemberAccessExpr::cast(value.syntax().clone())?;
            if access.name_text()? != "DependencyProperty" {
                return None;
            }
            model.symbol(access.expr()?.syntax())?
        }
        _ => return None,
    };
    let next = BackingFieldOrProperty::try_create_for_dependency_property(model.symbols(), next)?;
    registration(next, &model, depth + 1)
}

/// Registered name of the property or event stored in `backing`
pub fn try_get_registered_name(
    backing: BackingFieldOrProperty,
    model: &SemanticModel<'_>,
) -> Option<String> {
    let (model, call) = try_get_registration(backing, model)?;
    call.registered_name(&model)
}

/// Registered value type of the property stored in `backing`
pub fn try_get_registered_type(
    backing: BackingFieldOrProperty,
    model: &SemanticModel<'_>,
) -> Option<TypeRef> {
    let (model, call) = try_get_registration(backing, model)?;
    call.registered_type(&model)
}

/// A key, or a property obtained from a read-only registration
pub fn is_read_only(backing: BackingFieldOrProperty, model: &SemanticModel<'_>) -> bool {
    backing.is_key(model.symbols())
        || try_get_registration(backing, model).is_some_and(|(_, call)| call.kind().is_read_only())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::base::FileId;
    use crate::hir::{Compilation, SymbolTable};

    const SOURCE: &str = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;
    using System.Windows.Documents;

    public class Literal : FrameworkElement
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(Literal), new PropertyMetadata(default(int)));
    }

    public class NameOf : FrameworkElement
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(NameOf));

        public int Bar
        {
            get => (int)this.GetValue(BarProperty);
            set => this.SetValue(BarProperty, value);
        }
    }

    public class QualifiedNameOf : FrameworkElement
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(QualifiedNameOf.Bar), typeof(int), typeof(QualifiedNameOf));

        public int Bar { get; set; }
    }

    public class Named : FrameworkElement
    {
        public static readonly DependencyProperty BarProperty = System.Windows.DependencyProperty.Register(
            ownerType: typeof(Named), propertyType: typeof(int), name: "Bar");
    }

    public class ReadOnly : FrameworkElement
    {
        private static readonly DependencyPropertyKey BarPropertyKey = DependencyProperty.RegisterReadOnly(
            "Bar", typeof(int), typeof(ReadOnly), new PropertyMetadata(1));

        public static readonly DependencyProperty BarProperty = BarPropertyKey.DependencyProperty;

        public static DependencyProperty BazProperty { get; } = BarPropertyKey.DependencyProperty;
    }

    public class Generic<T> : FrameworkElement
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof(T), typeof(Generic<T>));

        public T Bar { get; set; }
    }

    public class Owner : FrameworkElement
    {
        public static readonly DependencyProperty FontSizeProperty = TextElement.FontSizeProperty.AddOwner(typeof(Owner));

        public static readonly DependencyProperty BarProperty = Literal.BarProperty.AddOwner(typeof(Owner));

        public static readonly RoutedEvent ValueChangedEvent = EventManager.RegisterRoutedEvent(
            nameof(ValueChanged), RoutingStrategy.Bubble, typeof(RoutedEventHandler), typeof(Owner));

        public event RoutedEventHandler ValueChanged;
    }
}"#;

    fn member(symbols: &SymbolTable, type_name: &str, name: &str) -> SymbolId {
        let ty = symbols.type_by_name(type_name).unwrap();
        symbols.children_named(ty, name)[0]
    }

    fn backing(symbols: &SymbolTable, type_name: &str, name: &str) -> BackingFieldOrProperty {
        let id = member(symbols, type_name, name);
        BackingFieldOrProperty::try_create_for_dependency_property(symbols, id)
            .or_else(|| BackingFieldOrProperty::try_create_for_routed_event(symbols, id))
            .unwrap()
    }

    #[rstest]
    #[case("N.Literal", "BarProperty", "Bar")]
    #[case("N.NameOf", "BarProperty", "Bar")]
    #[case("N.QualifiedNameOf", "BarProperty", "Bar")]
    #[case("N.Named", "BarProperty", "Bar")]
    #[case("N.ReadOnly", "BarPropertyKey", "Bar")]
    #[case("N.ReadOnly", "BarProperty", "Bar")]
    #[case("N.ReadOnly", "BazProperty", "Bar")]
    #[case("N.Generic`1", "BarProperty", "Bar")]
    #[case("N.Owner", "FontSizeProperty", "FontSize")]
    #[case("N.Owner", "BarProperty", "Bar")]
    #[case("N.Owner", "ValueChangedEvent", "ValueChanged")]
    #[case("System.Windows.Controls.Control", "FontSizeProperty", "FontSize")]
    fn test_registered_name(#[case] type_name: &str, #[case] member: &str, #[case] expected: &str) {
        let compilation = Compilation::from_text(SOURCE);
        let model = compilation.semantic_model(FileId::new(0)).unwrap();
        let backing = backing(model.symbols(), type_name, member);
        assert_eq!(
            try_get_registered_name(backing, &model).as_deref(),
            Some(expected)
        );
    }

    #[rstest]
    #[case("N.Literal", "BarProperty", "int")]
    #[case("N.ReadOnly", "BarProperty", "int")]
    #[case("N.ReadOnly", "BazProperty", "int")]
    #[case("N.Generic`1", "BarProperty", "T")]
    #[case("N.Owner", "FontSizeProperty", "double")]
    fn test_registered_type(#[case] type_name: &str, #[case] member: &str, #[case] expected: &str) {
        let compilation = Compilation::from_text(SOURCE);
        let model = compilation.semantic_model(FileId::new(0)).unwrap();
        let backing = backing(model.symbols(), type_name, member);
        let ty = try_get_registered_type(backing, &model).unwrap();
        assert_eq!(model.display(&ty), expected);
    }

    #[test]
    fn test_read_only_through_key() {
        let compilation = Compilation::from_text(SOURCE);
        let model = compilation.semantic_model(FileId::new(0)).unwrap();
        let symbols = model.symbols();
        assert!(is_read_only(backing(symbols, "N.ReadOnly", "BarProperty"), &model));
        assert!(is_read_only(backing(symbols, "N.ReadOnly", "BarPropertyKey"), &model));
        assert!(!is_read_only(backing(symbols, "N.Literal", "BarProperty"), &model));
    }

    #[test]
    fn test_arguments_by_parameter_name() {
        let compilation = Compilation::from_text(SOURCE);
        let model = compilation.semantic_model(FileId::new(0)).unwrap();
        let backing = backing(model.symbols(), "N.Named", "BarProperty");
        let (model, call) = try_get_registration(backing, &model).unwrap();
        assert_eq!(call.kind(), RegistrationKind::Register);
        assert_eq!(
            call.owner_argument(&model).unwrap().syntax().text().to_string(),
            "ownerType: typeof(Named)"
        );
        assert!(call.metadata_argument(&model).is_none());
        assert_eq!(model.display(&call.owner_type(&model).unwrap()), "Named");
    }

    #[test]
    fn test_unrelated_invocations_are_not_registrations() {
        let source = r#"
namespace N
{
    public static class DependencyProperty
    {
        public static object Register(string name) { return null; }
    }

    public class C
    {
        public static readonly object BarProperty = DependencyProperty.Register("Bar");
    }
}"#;
        let compilation = Compilation::from_text(source);
        let model = compilation.semantic_model(FileId::new(0)).unwrap();
        let invocation = model
            .root()
            .descendants()
            .find_map(InvocationExpr::cast)
            .unwrap();
        assert!(RegistrationCall::try_create(&invocation, &model).is_none());
    }
}
