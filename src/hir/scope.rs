//! Name scopes for resolving type syntax.
//!
//! A [`Scope`] captures everything visible at a syntax position: type
//! parameters, enclosing types (and their nested types), enclosing namespaces
//! and the using directives attached to each of them.

use smol_str::SmolStr;

use super::symbols::{SymbolDecl, SymbolId, SymbolTable, TypeRef, predefined_type};
use crate::base::FileId;
use crate::parser::{
    AstNode, CompilationUnit, NamespaceDecl, SyntaxKind, SyntaxNode, SyntaxNodePtr, TypeSyntax,
    UsingDirective,
};

/// Result of resolving a name that may denote a namespace or a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceOrType {
    Namespace(SymbolId),
    Type(TypeRef),
}

#[derive(Debug, Clone, Default)]
struct Level {
    namespace: Option<SymbolId>,
    imports: Vec<SymbolId>,
    static_imports: Vec<SymbolId>,
    aliases: Vec<(SmolStr, NamespaceOrType)>,
}

#[derive(Debug, Clone)]
pub struct Scope<'a> {
    table: &'a SymbolTable,
    /// Innermost first
    type_params: Vec<(SmolStr, TypeRef)>,
    /// Enclosing type definitions, innermost first
    types: Vec<SymbolId>,
    /// Namespace levels, innermost first; the last one is the global namespace
    levels: Vec<Level>,
}

impl<'a> Scope<'a> {
    /// Scope visible at `node` in `file`.
    pub fn at(table: &'a SymbolTable, file: FileId, node: &SyntaxNode) -> Self {
        let mut scope = Scope {
            table,
            type_params: Vec::new(),
            types: Vec::new(),
            levels: Vec::new(),
        };
        let mut namespace_decls = Vec::new();
        let mut unit = None;
        for ancestor in node.ancestors() {
            let kind = ancestor.kind();
            if kind == SyntaxKind::METHOD_DECL || kind.is_type_decl() {
                let decl = SymbolDecl {
                    file,
                    ptr: SyntaxNodePtr::new(&ancestor),
                };
                if let Some(id) = table.by_decl(&decl) {
                    let symbol = table.get(id);
                    for (index, name) in symbol.type_params.iter().enumerate() {
                        scope.type_params.push((
                            name.clone(),
                            TypeRef::TypeParam {
                                owner: id,
                                index: index as u32,
                                name: name.clone(),
                            },
                        ));
                    }
                    if symbol.is_type() {
                        scope.types.push(id);
                    }
                }
            } else if let Some(ns) = NamespaceDecl::cast(ancestor.clone()) {
                namespace_decls.push(ns);
            } else if let Some(root) = CompilationUnit::cast(ancestor) {
                unit = Some(root);
            }
        }

        // Levels are built outermost first, then reversed.
        let mut levels = Vec::new();
        let global = table.global();
        let mut global_level = Level {
            namespace: Some(global),
            ..Level::default()
        };
        if let Some(unit) = &unit {
            scope.add_usings(&mut global_level, unit.usings());
        }
        levels.push(global_level);
        let mut current = Some(global);
        for ns in namespace_decls.iter().rev() {
            let segments: Vec<SmolStr> = ns
                .name()
                .map(|n| n.text().split('.').map(SmolStr::new).collect())
                .unwrap_or_default();
            let count = segments.len();
            for (i, segment) in segments.into_iter().enumerate() {
                current = current.and_then(|c| table.namespace(c, &segment));
                let mut level = Level {
                    namespace: current,
                    ..Level::default()
                };
                if i + 1 == count {
                    scope.add_usings(&mut level, ns.usings());
                }
                levels.push(level);
            }
        }
        levels.reverse();
        scope.levels = levels;
        scope
    }

    fn add_usings(&self, level: &mut Level, usings: impl Iterator<Item = UsingDirective>) {
        for using in usings {
            let Some(name) = using.name() else { continue };
            let target = self.resolve_qualified_from_global(&name);
            match (using.alias(), using.is_static(), target) {
                (Some(alias), _, Some(target)) => level.aliases.push((alias, target)),
                (None, true, Some(NamespaceOrType::Type(ty))) => {
                    level.static_imports.extend(ty.def())
                }
                (None, false, Some(NamespaceOrType::Namespace(ns))) => level.imports.push(ns),
                _ => tracing::trace!(using = %name.text(), "unresolved using directive"),
            }
        }
    }

    /// Resolve a using target from the global namespace, without usings.
    fn resolve_qualified_from_global(&self, name: &TypeSyntax) -> Option<NamespaceOrType> {
        let table = self.table;
        match name.syntax().kind() {
            SyntaxKind::IDENTIFIER_NAME | SyntaxKind::GENERIC_NAME => {
                let simple = name.simple_name()?;
                let arity = name.type_arguments().len();
                if arity == 0 {
                    if let Some(ns) = table.namespace(table.global(), &simple) {
                        return Some(NamespaceOrType::Namespace(ns));
                    }
                }
                let def = table.type_in(table.global(), &simple, arity)?;
                Some(NamespaceOrType::Type(TypeRef::named(def)))
            }
            SyntaxKind::QUALIFIED_NAME => {
                let left = self.resolve_qualified_from_global(&name.qualifier()?)?;
                let right = name.syntax().children().filter_map(TypeSyntax::cast).nth(1)?;
                self.member_of(&left, &right)
            }
            SyntaxKind::ALIAS_QUALIFIED_NAME => {
                let right = name.syntax().children().filter_map(TypeSyntax::cast).last()?;
                self.resolve_qualified_from_global(&right)
            }
            _ => None,
        }
    }

    /// `right` looked up inside the namespace or type `left`
    fn member_of(&self, left: &NamespaceOrType, right: &TypeSyntax) -> Option<NamespaceOrType> {
        let simple = right.simple_name()?;
        let arity = right.type_arguments().len();
        let container = match left {
            NamespaceOrType::Namespace(ns) => {
                if arity == 0 {
                    if let Some(inner) = self.table.namespace(*ns, &simple) {
                        return Some(NamespaceOrType::Namespace(inner));
                    }
                }
                *ns
            }
            NamespaceOrType::Type(ty) => ty.def()?,
        };
        let def = self.table.type_in(container, &simple, arity)?;
        let args = self.resolve_args(right)?;
        Some(NamespaceOrType::Type(TypeRef::Named { def, args }))
    }

    fn resolve_args(&self, name: &TypeSyntax) -> Option<Vec<TypeRef>> {
        name.type_arguments()
            .iter()
            .map(|a| self.resolve_type(a))
            .collect()
    }

    /// Resolve type syntax to a type.
    pub fn resolve_type(&self, syntax: &TypeSyntax) -> Option<TypeRef> {
        match syntax.syntax().kind() {
            SyntaxKind::NULLABLE_TYPE => {
                let inner = self.resolve_type(&syntax.element()?)?;
                let is_value = inner.def().is_some_and(|d| self.table.get(d).is_value_type());
                if !is_value {
                    return Some(inner);
                }
                let nullable = self.table.type_by_name("System.Nullable`1")?;
                Some(TypeRef::Named {
                    def: nullable,
                    args: vec![inner],
                })
            }
            SyntaxKind::ARRAY_TYPE => {
                let element = self.resolve_type(&syntax.element()?)?;
                Some(TypeRef::Array(Box::new(element)))
            }
            _ => match self.resolve_namespace_or_type(syntax)? {
                NamespaceOrType::Type(ty) => Some(ty),
                NamespaceOrType::Namespace(_) => None,
            },
        }
    }

    /// Resolve a (possibly qualified) name to a namespace or type.
    pub fn resolve_namespace_or_type(&self, syntax: &TypeSyntax) -> Option<NamespaceOrType> {
        match syntax.syntax().kind() {
            SyntaxKind::IDENTIFIER_NAME | SyntaxKind::GENERIC_NAME => {
                let name = syntax.simple_name()?;
                let arity = syntax.type_arguments().len();
                if arity == 0 {
                    if let Some(keyword) = predefined_type(&name) {
                        if syntax
                            .syntax()
                            .first_token()
                            .is_some_and(|t| !t.text().starts_with('@'))
                        {
                            let def = self.table.type_by_name(keyword)?;
                            return Some(NamespaceOrType::Type(TypeRef::named(def)));
                        }
                    }
                }
                if let Some(found) = self.lookup_type(&name, arity) {
                    if arity == 0 {
                        return Some(NamespaceOrType::Type(found));
                    }
                    let def = found.def()?;
                    let args = self.resolve_args(syntax)?;
                    return Some(NamespaceOrType::Type(TypeRef::Named { def, args }));
                }
                if arity == 0 {
                    return self.lookup_namespace(&name).map(NamespaceOrType::Namespace);
                }
                None
            }
            SyntaxKind::QUALIFIED_NAME => {
                let left = self.resolve_namespace_or_type(&syntax.qualifier()?)?;
                let right = syntax.syntax().children().filter_map(TypeSyntax::cast).nth(1)?;
                self.member_of(&left, &right)
            }
            SyntaxKind::ALIAS_QUALIFIED_NAME => {
                // `global::Foo.Bar` resolves from the global namespace
                let right = syntax.syntax().children().filter_map(TypeSyntax::cast).last()?;
                self.resolve_qualified_from_global(&right)
            }
            _ => self.resolve_type(syntax).map(NamespaceOrType::Type),
        }
    }

    /// A simple type name: type parameters, nested types of enclosing types
    /// and their bases, then each namespace level with its usings.
    pub fn lookup_type(&self, name: &str, arity: usize) -> Option<TypeRef> {
        if arity == 0 {
            if let Some((_, param)) = self.type_params.iter().find(|(n, _)| n == name) {
                return Some(param.clone());
            }
        }
        for &ty in &self.types {
            for base in self.table.base_chain(&self.table.self_type(ty)) {
                let Some(def) = base.def() else { continue };
                if let Some(nested) = self.table.type_in(def, name, arity) {
                    return Some(TypeRef::named(nested));
                }
            }
        }
        for level in &self.levels {
            if let Some(found) = level
                .namespace
                .and_then(|ns| self.table.type_in(ns, name, arity))
            {
                return Some(TypeRef::named(found));
            }
            if arity == 0 {
                if let Some((_, NamespaceOrType::Type(ty))) =
                    level.aliases.iter().find(|(alias, _)| alias == name)
                {
                    return Some(ty.clone());
                }
            }
            if let Some(found) = level
                .imports
                .iter()
                .find_map(|ns| self.table.type_in(*ns, name, arity))
            {
                return Some(TypeRef::named(found));
            }
            if let Some(found) = level
                .static_imports
                .iter()
                .find_map(|ty| self.table.type_in(*ty, name, arity))
            {
                return Some(TypeRef::named(found));
            }
        }
        None
    }

    pub fn lookup_namespace(&self, name: &str) -> Option<SymbolId> {
        for level in &self.levels {
            if let Some(found) = level
                .namespace
                .and_then(|ns| self.table.namespace(ns, name))
            {
                return Some(found);
            }
            if let Some((_, NamespaceOrType::Namespace(ns))) =
                level.aliases.iter().find(|(alias, _)| alias == name)
            {
                return Some(*ns);
            }
        }
        None
    }

    /// Enclosing type definitions, innermost first
    pub fn enclosing_types(&self) -> &[SymbolId] {
        &self.types
    }

    /// Types imported with `using static`
    pub fn static_imports(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.levels.iter().flat_map(|l| l.static_imports.iter().copied())
    }
}
