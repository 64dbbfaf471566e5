//! Builds the [`SymbolTable`] of a compilation.
//!
//! Declaration happens in two passes. The first pass walks every document and
//! allocates namespaces, types and members; partial types merge into one
//! symbol. The second pass resolves signatures (base types, member types and
//! parameters) once every type name is known.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::compilation::Document;
use super::scope::Scope;
use super::symbols::{
    Accessibility, ParamInfo, Symbol, SymbolDecl, SymbolId, SymbolKind, SymbolTable, TypeKind,
    TypeRef,
};
use crate::base::FileId;
use crate::parser::ast::{has_token, name_token};
use crate::parser::{
    AstNode, FieldDecl, NamespaceDecl, Parameter, SyntaxKind, SyntaxNode, SyntaxNodePtr, TypeDecl,
    TypeSyntax, ident_text,
};

pub(crate) fn build_symbol_table(documents: &IndexMap<FileId, Document>) -> SymbolTable {
    let mut table = SymbolTable::new();
    let roots: Vec<(FileId, SyntaxNode, bool)> = documents
        .values()
        .map(|d| (d.id, d.syntax(), d.is_metadata))
        .collect();

    for (file, root, is_metadata) in &roots {
        let mut collector = Declarer {
            table: &mut table,
            file: *file,
            is_metadata: *is_metadata,
        };
        let global = collector.table.global();
        collector.declare_container(root, global);
    }

    let mut pending = Vec::new();
    for (file, root, _) in &roots {
        collect_signatures(&table, *file, root, &mut pending);
    }
    for (id, signature) in pending {
        signature.apply(table.get_mut(id));
    }
    add_implicit_bases(&mut table);
    table
}

// ============================================================================
// PASS 1: DECLARATIONS
// ============================================================================

struct Declarer<'t> {
    table: &'t mut SymbolTable,
    file: FileId,
    is_metadata: bool,
}

impl Declarer<'_> {
    fn decl(&self, node: &SyntaxNode) -> SymbolDecl {
        SymbolDecl {
            file: self.file,
            ptr: SyntaxNodePtr::new(node),
        }
    }

    fn declare_container(&mut self, node: &SyntaxNode, container: SymbolId) {
        for child in node.children() {
            if let Some(ns) = NamespaceDecl::cast(child.clone()) {
                let mut current = container;
                let path = ns.name().map(|n| n.text()).unwrap_or_default();
                for segment in path.split('.').filter(|s| !s.is_empty()) {
                    current = self.namespace(current, segment);
                }
                self.declare_container(&child, current);
            } else if let Some(ty) = TypeDecl::cast(child) {
                self.declare_type(&ty, container, false);
            }
        }
    }

    fn namespace(&mut self, container: SymbolId, name: &str) -> SymbolId {
        if let Some(existing) = self.table.namespace(container, name) {
            return existing;
        }
        let mut symbol = Symbol::new(SmolStr::new(name), SymbolKind::Namespace, Some(container));
        symbol.accessibility = Accessibility::Public;
        symbol.is_metadata = self.is_metadata;
        self.table.alloc(symbol)
    }

    fn declare_type(&mut self, ty: &TypeDecl, container: SymbolId, nested: bool) {
        let Some(name) = ty.name() else { return };
        let type_params = ty.type_parameters();
        let kind = match ty.kind() {
            SyntaxKind::STRUCT_DECL => TypeKind::Struct,
            SyntaxKind::INTERFACE_DECL => TypeKind::Interface,
            SyntaxKind::ENUM_DECL => TypeKind::Enum,
            SyntaxKind::DELEGATE_DECL => TypeKind::Delegate,
            _ => TypeKind::Class,
        };
        let existing = self
            .table
            .type_in(container, &name, type_params.len())
            .filter(|id| self.table.get(*id).kind == SymbolKind::Type(kind));
        let id = match existing {
            Some(id) => id,
            None => {
                let mut symbol = Symbol::new(name, SymbolKind::Type(kind), Some(container));
                symbol.type_params = type_params;
                symbol.accessibility = accessibility(
                    ty.syntax(),
                    if nested {
                        Accessibility::Private
                    } else {
                        Accessibility::Internal
                    },
                );
                symbol.is_metadata = self.is_metadata;
                self.table.alloc(symbol)
            }
        };
        {
            let symbol = self.table.get_mut(id);
            symbol.is_static |= ty.is_static();
            symbol.is_abstract |= ty.is_abstract() || kind == TypeKind::Interface;
        }
        let decl = self.decl(ty.syntax());
        self.table.record_decl(id, decl);

        let member_default = if kind == TypeKind::Interface {
            Accessibility::Public
        } else {
            Accessibility::Private
        };
        for member in ty.members() {
            self.declare_member(&member, id, kind, member_default);
        }
        for enum_member in ty.enum_members() {
            let Some(name) = enum_member.name() else { continue };
            let mut symbol = Symbol::new(name, SymbolKind::Field, Some(id));
            symbol.accessibility = Accessibility::Public;
            symbol.is_static = true;
            symbol.is_readonly = true;
            symbol.ty = Some(TypeRef::named(id));
            symbol.is_metadata = self.is_metadata;
            let member_id = self.table.alloc(symbol);
            let decl = self.decl(enum_member.syntax());
            self.table.record_decl(member_id, decl);
        }
    }

    fn declare_member(
        &mut self,
        node: &SyntaxNode,
        owner: SymbolId,
        owner_kind: TypeKind,
        default: Accessibility,
    ) {
        if let Some(nested) = TypeDecl::cast(node.clone()) {
            self.declare_type(&nested, owner, true);
            return;
        }
        let is_static = has_token(node, SyntaxKind::STATIC_KW) || has_token(node, SyntaxKind::CONST_KW);
        let is_readonly =
            has_token(node, SyntaxKind::READONLY_KW) || has_token(node, SyntaxKind::CONST_KW);
        let is_abstract = has_token(node, SyntaxKind::ABSTRACT_KW)
            || (owner_kind == TypeKind::Interface && !is_static);
        let access = accessibility(node, default);

        let declare = |this: &mut Self, name: SmolStr, kind: SymbolKind, decl_node: &SyntaxNode| {
            let mut symbol = Symbol::new(name, kind, Some(owner));
            symbol.accessibility = access;
            symbol.is_static = is_static;
            symbol.is_readonly = is_readonly;
            symbol.is_abstract = is_abstract;
            symbol.is_metadata = this.is_metadata;
            if kind == SymbolKind::Method {
                symbol.type_params = node
                    .children()
                    .find(|n| n.kind() == SyntaxKind::TYPE_PARAMETER_LIST)
                    .map(|l| {
                        l.children()
                            .filter_map(|p| name_token(&p))
                            .map(|t| ident_text(&t))
                            .collect()
                    })
                    .unwrap_or_default();
            }
            let id = this.table.alloc(symbol);
            let decl = this.decl(decl_node);
            this.table.record_decl(id, decl);
        };

        match node.kind() {
            SyntaxKind::FIELD_DECL | SyntaxKind::EVENT_FIELD_DECL => {
                let Some(field) = FieldDecl::cast(node.clone()) else { return };
                let kind = if field.is_event() {
                    SymbolKind::Event
                } else {
                    SymbolKind::Field
                };
                for declarator in field.declarators() {
                    if let Some(name) = declarator.name() {
                        declare(self, name, kind, declarator.syntax());
                    }
                }
            }
            SyntaxKind::PROPERTY_DECL | SyntaxKind::METHOD_DECL | SyntaxKind::EVENT_DECL
            | SyntaxKind::CONSTRUCTOR_DECL => {
                let kind = match node.kind() {
                    SyntaxKind::PROPERTY_DECL => SymbolKind::Property,
                    SyntaxKind::METHOD_DECL => SymbolKind::Method,
                    SyntaxKind::EVENT_DECL => SymbolKind::Event,
                    _ => SymbolKind::Constructor,
                };
                if let Some(token) = name_token(node) {
                    declare(self, ident_text(&token), kind, node);
                }
            }
            _ => {}
        }
    }
}

fn accessibility(node: &SyntaxNode, default: Accessibility) -> Accessibility {
    if has_token(node, SyntaxKind::PUBLIC_KW) {
        Accessibility::Public
    } else if has_token(node, SyntaxKind::PROTECTED_KW) {
        Accessibility::Protected
    } else if has_token(node, SyntaxKind::INTERNAL_KW) {
        Accessibility::Internal
    } else if has_token(node, SyntaxKind::PRIVATE_KW) {
        Accessibility::Private
    } else {
        default
    }
}

// ============================================================================
// PASS 2: SIGNATURES
// ============================================================================

#[derive(Debug, Default)]
struct Signature {
    ty: Option<TypeRef>,
    parameters: Option<Vec<ParamInfo>>,
    base_types: Vec<TypeRef>,
}

impl Signature {
    fn apply(self, symbol: &mut Symbol) {
        if self.ty.is_some() {
            symbol.ty = self.ty;
        }
        if let Some(parameters) = self.parameters {
            symbol.parameters = parameters;
        }
        for base in self.base_types {
            if !symbol.base_types.contains(&base) {
                symbol.base_types.push(base);
            }
        }
    }
}

fn collect_signatures(
    table: &SymbolTable,
    file: FileId,
    root: &SyntaxNode,
    out: &mut Vec<(SymbolId, Signature)>,
) {
    for node in root.descendants() {
        let decl = SymbolDecl {
            file,
            ptr: SyntaxNodePtr::new(&node),
        };
        let Some(id) = table.by_decl(&decl) else { continue };
        let scope = Scope::at(table, file, &node);
        let resolve = |ty: Option<TypeSyntax>| ty.and_then(|t| scope.resolve_type(&t));
        let first_type = |n: &SyntaxNode| n.children().find_map(TypeSyntax::cast);

        let signature = match node.kind() {
            kind if kind.is_type_decl() => {
                let ty = TypeDecl::cast(node.clone());
                let base_types = ty
                    .as_ref()
                    .map(|t| t.base_types())
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|b| scope.resolve_type(b))
                    .collect();
                Signature {
                    ty: (kind == SyntaxKind::DELEGATE_DECL)
                        .then(|| resolve(first_type(&node)))
                        .flatten(),
                    parameters: (kind == SyntaxKind::DELEGATE_DECL)
                        .then(|| parameters(&scope, &node)),
                    base_types,
                }
            }
            SyntaxKind::VARIABLE_DECLARATOR => {
                // Field or event field: the type lives on the parent declaration
                let ty = node.parent().and_then(|d| first_type(&d));
                Signature {
                    ty: resolve(ty),
                    ..Signature::default()
                }
            }
            SyntaxKind::PROPERTY_DECL | SyntaxKind::EVENT_DECL => Signature {
                ty: resolve(first_type(&node)),
                ..Signature::default()
            },
            SyntaxKind::METHOD_DECL => Signature {
                ty: resolve(first_type(&node)),
                parameters: Some(parameters(&scope, &node)),
                ..Signature::default()
            },
            SyntaxKind::CONSTRUCTOR_DECL => Signature {
                parameters: Some(parameters(&scope, &node)),
                ..Signature::default()
            },
            _ => continue,
        };
        out.push((id, signature));
    }
}

fn parameters(scope: &Scope<'_>, node: &SyntaxNode) -> Vec<ParamInfo> {
    let Some(list) = node.children().find(|n| n.kind() == SyntaxKind::PARAMETER_LIST) else {
        return Vec::new();
    };
    list.children()
        .filter_map(Parameter::cast)
        .map(|p| ParamInfo {
            name: p.name().unwrap_or_default(),
            ty: p.ty().and_then(|t| scope.resolve_type(&t)),
            has_default: p
                .syntax()
                .children()
                .any(|n| n.kind() == SyntaxKind::EQUALS_VALUE_CLAUSE),
        })
        .collect()
}

/// Classes without a base class derive from `object`, structs from
/// `ValueType` and enums from `Enum`.
fn add_implicit_bases(table: &mut SymbolTable) {
    let object = table.type_by_name("System.Object");
    let value_type = table.type_by_name("System.ValueType");
    let enum_type = table.type_by_name("System.Enum");
    let delegate = table.type_by_name("System.MulticastDelegate");
    let ids: Vec<SymbolId> = table
        .iter()
        .filter(|(_, s)| s.is_type())
        .map(|(id, _)| id)
        .collect();
    for id in ids {
        let implicit = match table.get(id).kind {
            SymbolKind::Type(TypeKind::Class) => object,
            SymbolKind::Type(TypeKind::Struct) => value_type,
            SymbolKind::Type(TypeKind::Enum) => enum_type,
            SymbolKind::Type(TypeKind::Delegate) => delegate,
            _ => None,
        };
        let Some(implicit) = implicit.filter(|b| *b != id) else { continue };
        let has_class_base = table.get(id).base_types.iter().any(|b| {
            b.def()
                .is_some_and(|d| table.get(d).kind == SymbolKind::Type(TypeKind::Class))
        });
        let symbol = table.get_mut(id);
        if symbol.kind == SymbolKind::Type(TypeKind::Enum) {
            // `enum E : byte` names the underlying type, not a base
            symbol.base_types.clear();
        }
        if !has_class_base || symbol.kind == SymbolKind::Type(TypeKind::Enum) {
            symbol.base_types.insert(0, TypeRef::named(implicit));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::hir::{Compilation, SymbolKind, TypeRef};

    #[test]
    fn test_partial_types_merge() {
        let compilation = Compilation::from_sources([
            ("A.cs", "namespace N { public partial class Foo { public int A; } }"),
            ("B.cs", "namespace N { partial class Foo { public int B; } }"),
        ]);
        let symbols = compilation.symbols();
        let foo = symbols.type_by_name("N.Foo").unwrap();
        assert_eq!(symbols.get(foo).declarations.len(), 2);
        assert_eq!(symbols.children_named(foo, "A").len(), 1);
        assert_eq!(symbols.children_named(foo, "B").len(), 1);
    }

    #[test]
    fn test_base_types_resolve_through_usings() {
        let compilation = Compilation::from_text(
            r#"
using System.Windows.Controls;

namespace N
{
    public class FooControl : Control { }
    public struct S { }
}"#,
        );
        let symbols = compilation.symbols();
        let foo = symbols.type_by_name("N.FooControl").unwrap();
        let control = symbols.type_by_name("System.Windows.Controls.Control").unwrap();
        assert_eq!(symbols.get(foo).base_types, vec![TypeRef::named(control)]);
        let s = symbols.type_by_name("N.S").unwrap();
        let value_type = symbols.type_by_name("System.ValueType").unwrap();
        assert_eq!(symbols.get(s).base_types, vec![TypeRef::named(value_type)]);
    }

    #[test]
    fn test_generic_base_and_member_types() {
        let compilation = Compilation::from_text(
            r#"
namespace N
{
    public class Base<T> { public T Value; }
    public class Derived : Base<int>
    {
        public static readonly System.Windows.DependencyProperty BarProperty;
        public void M(string s, int i = 1) { }
    }
}"#,
        );
        let symbols = compilation.symbols();
        let derived = symbols.type_by_name("N.Derived").unwrap();
        let base = symbols.base_class(&symbols.self_type(derived)).unwrap();
        assert_eq!(symbols.display(&base), "Base<int>");

        let field = symbols.children_named(derived, "BarProperty")[0];
        assert_eq!(symbols.get(field).kind, SymbolKind::Field);
        assert!(symbols.get(field).is_static);
        assert_eq!(
            symbols.display(symbols.get(field).ty.as_ref().unwrap()),
            "DependencyProperty"
        );

        let method = symbols.children_named(derived, "M")[0];
        let params = &symbols.get(method).parameters;
        assert_eq!(params.len(), 2);
        assert!(!params[0].has_default);
        assert!(params[1].has_default);
    }
}
