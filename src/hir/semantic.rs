//! Semantic queries: what a name binds to and what type an expression has.
//!
//! A [`SemanticModel`] is created per document and per thread. Syntax trees
//! of other documents are materialized lazily when a declaration in them is
//! requested.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::compilation::{Compilation, Document};
use super::scope::{NamespaceOrType, Scope};
use super::symbols::{SymbolDecl, SymbolId, SymbolKind, SymbolTable, TypeKind, TypeRef};
use crate::base::FileId;
use crate::parser::{
    Argument, AsExpr, AstNode, Attribute, CastExpr, ConditionalAccessExpr, ConditionalExpr,
    DefaultExpr, Expr, InvocationExpr, LiteralExpr, MemberAccessExpr,
    MemberBindingExpr, ObjectCreationExpr, Parameter, SyntaxKind, SyntaxNode, SyntaxNodePtr,
    TypeSyntax, VariableDeclaration, conditional_receiver, ident_text,
};
use crate::parser::ast::name_token;

/// What a name or member access refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Namespace(SymbolId),
    Type(TypeRef),
    /// A field, property, event or method, found on the constructed type `via`
    Member { symbol: SymbolId, via: TypeRef },
    Local(Local),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalKind {
    Variable,
    Parameter,
    /// The implicit `value` of a setter or event accessor
    Value,
}

/// A local variable, parameter or accessor `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Local {
    pub name: SmolStr,
    pub kind: LocalKind,
    pub ty: Option<TypeRef>,
    /// Declarator, parameter or accessor node
    pub decl: SyntaxNode,
}

pub struct SemanticModel<'a> {
    compilation: &'a Compilation,
    document: &'a Document,
    root: SyntaxNode,
    roots: RefCell<FxHashMap<FileId, SyntaxNode>>,
}

impl<'a> SemanticModel<'a> {
    pub(crate) fn new(compilation: &'a Compilation, document: &'a Document) -> Self {
        Self {
            compilation,
            document,
            root: document.syntax(),
            roots: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn compilation(&self) -> &'a Compilation {
        self.compilation
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn file(&self) -> FileId {
        self.document.id
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn symbols(&self) -> &'a SymbolTable {
        self.compilation.symbols()
    }

    // ========================================================================
    // DECLARATIONS
    // ========================================================================

    /// Syntax node of a declaration, in any document of the compilation.
    pub fn syntax_of(&self, decl: &SymbolDecl) -> Option<SyntaxNode> {
        if decl.file == self.file() {
            return decl.ptr.try_to_node(&self.root);
        }
        let mut roots = self.roots.borrow_mut();
        let root = match roots.get(&decl.file) {
            Some(root) => root.clone(),
            None => {
                let root = self.compilation.document(decl.file)?.syntax();
                roots.insert(decl.file, root.clone());
                root
            }
        };
        decl.ptr.try_to_node(&root)
    }

    /// A model for the document declaring `decl`, with the declaration node.
    ///
    /// Bindings of nodes inside a declaration must use the model of the
    /// declaring document, since usings differ per document.
    pub fn model_for(&self, decl: &SymbolDecl) -> Option<(SemanticModel<'a>, SyntaxNode)> {
        let model = self.compilation.semantic_model(decl.file)?;
        let node = decl.ptr.try_to_node(model.root())?;
        Some((model, node))
    }

    /// All declaration nodes of a symbol
    pub fn declarations(&self, id: SymbolId) -> Vec<SyntaxNode> {
        self.symbols()
            .get(id)
            .declarations
            .iter()
            .filter_map(|d| self.syntax_of(d))
            .collect()
    }

    /// Symbol declared by `node` (a type, member or variable declarator)
    pub fn declared_symbol(&self, node: &SyntaxNode) -> Option<SymbolId> {
        self.symbols().by_decl(&SymbolDecl {
            file: self.file(),
            ptr: SyntaxNodePtr::new(node),
        })
    }

    /// The type whose declaration contains `node`
    pub fn containing_type(&self, node: &SyntaxNode) -> Option<SymbolId> {
        node.ancestors()
            .filter(|n| n.kind().is_type_decl())
            .find_map(|n| self.declared_symbol(&n))
    }

    pub fn scope(&self, node: &SyntaxNode) -> Scope<'a> {
        Scope::at(self.symbols(), self.file(), node)
    }

    pub fn resolve_type_syntax(&self, syntax: &TypeSyntax) -> Option<TypeRef> {
        self.scope(syntax.syntax()).resolve_type(syntax)
    }

    /// Well-known type by metadata name
    pub fn type_named(&self, qualified: &str) -> Option<TypeRef> {
        self.symbols().type_by_name(qualified).map(TypeRef::named)
    }

    /// `ty` is the type with the given metadata name (ignoring type arguments)
    pub fn is_type(&self, ty: &TypeRef, qualified: &str) -> bool {
        ty.def().is_some() && ty.def() == self.symbols().type_by_name(qualified)
    }

    /// `ty` is or derives from the type with the given metadata name
    pub fn inherits_from(&self, ty: &TypeRef, qualified: &str) -> bool {
        self.symbols()
            .type_by_name(qualified)
            .is_some_and(|base| self.symbols().inherits_from(ty, base))
    }

    pub fn display(&self, ty: &TypeRef) -> String {
        self.symbols().display(ty)
    }

    // ========================================================================
    // BINDING
    // ========================================================================

    /// The symbol of a name, member access or invocation.
    pub fn symbol(&self, node: &SyntaxNode) -> Option<SymbolId> {
        match self.bind(node)? {
            Binding::Member { symbol, .. } => Some(symbol),
            Binding::Namespace(id) => Some(id),
            Binding::Type(ty) => ty.def(),
            Binding::Local(_) => None,
        }
    }

    pub fn bind(&self, node: &SyntaxNode) -> Option<Binding> {
        match node.kind() {
            SyntaxKind::PAREN_EXPR => {
                let inner = Expr::cast(node.clone())?.unparenthesized();
                self.bind(inner.syntax())
            }
            SyntaxKind::INVOCATION_EXPR => {
                let callee = InvocationExpr::cast(node.clone())?.expr()?;
                self.bind(callee.syntax())
            }
            SyntaxKind::OBJECT_CREATION_EXPR => {
                self.bind_object_creation(&ObjectCreationExpr::cast(node.clone())?)
            }
            SyntaxKind::MEMBER_ACCESS_EXPR => {
                self.bind_member_access(&MemberAccessExpr::cast(node.clone())?)
            }
            SyntaxKind::MEMBER_BINDING_EXPR => {
                self.bind_member_binding(&MemberBindingExpr::cast(node.clone())?)
            }
            SyntaxKind::IDENTIFIER_NAME | SyntaxKind::GENERIC_NAME => self.bind_name(node),
            SyntaxKind::QUALIFIED_NAME | SyntaxKind::ALIAS_QUALIFIED_NAME => {
                if let Some(attribute) = node.parent().and_then(Attribute::cast) {
                    return self.attribute_type(&attribute).map(Binding::Type);
                }
                self.bind_type_syntax(&TypeSyntax::cast(node.clone())?)
            }
            SyntaxKind::NULLABLE_TYPE | SyntaxKind::ARRAY_TYPE => self
                .resolve_type_syntax(&TypeSyntax::cast(node.clone())?)
                .map(Binding::Type),
            _ => None,
        }
    }

    fn bind_type_syntax(&self, syntax: &TypeSyntax) -> Option<Binding> {
        match self.scope(syntax.syntax()).resolve_namespace_or_type(syntax)? {
            NamespaceOrType::Namespace(ns) => Some(Binding::Namespace(ns)),
            NamespaceOrType::Type(ty) => Some(Binding::Type(ty)),
        }
    }

    fn bind_name(&self, node: &SyntaxNode) -> Option<Binding> {
        let parent = node.parent()?;
        let is_second = parent.children().nth(1).as_ref() == Some(node);
        match parent.kind() {
            SyntaxKind::MEMBER_ACCESS_EXPR if is_second => return self.bind(&parent),
            SyntaxKind::MEMBER_BINDING_EXPR => return self.bind(&parent),
            SyntaxKind::QUALIFIED_NAME | SyntaxKind::ALIAS_QUALIFIED_NAME if is_second => {
                return self.bind(&parent);
            }
            SyntaxKind::ATTRIBUTE => {
                let attribute = Attribute::cast(parent)?;
                return self.attribute_type(&attribute).map(Binding::Type);
            }
            SyntaxKind::NAME_EQUALS => return self.bind_name_equals(&parent),
            SyntaxKind::NAME_COLON => return None,
            _ => {}
        }
        if is_type_position(node) {
            return self.bind_type_syntax(&TypeSyntax::cast(node.clone())?);
        }
        self.bind_simple_name(node)
    }

    /// `Name = value` in an attribute binds to a member of the attribute type
    fn bind_name_equals(&self, name_equals: &SyntaxNode) -> Option<Binding> {
        let argument = name_equals.parent()?;
        let attribute = argument.ancestors().find_map(Attribute::cast)?;
        let ty = self.attribute_type(&attribute)?;
        let name = name_token(&name_equals.children().next()?)?;
        let (symbol, via) = self
            .lookup_members(&ty, &ident_text(&name))
            .into_iter()
            .next()?;
        Some(Binding::Member { symbol, via })
    }

    fn bind_simple_name(&self, node: &SyntaxNode) -> Option<Binding> {
        let token = name_token(node)?;
        let name = ident_text(&token);
        let is_generic = node.kind() == SyntaxKind::GENERIC_NAME;
        if !is_generic {
            if let Some(local) = self.find_local(node, &name) {
                return Some(Binding::Local(local));
            }
        }
        let invocation = invocation_of(node);
        let scope = self.scope(node);
        let symbols = self.symbols();
        let containers: Vec<SymbolId> = scope
            .enclosing_types()
            .iter()
            .copied()
            .chain(scope.static_imports())
            .collect();
        for ty in containers {
            let members = self.lookup_members(&symbols.self_type(ty), &name);
            if !members.is_empty() {
                return self.choose(members, invocation.as_ref());
            }
        }
        self.bind_type_syntax(&TypeSyntax::cast(node.clone())?)
    }

    fn bind_member_access(&self, access: &MemberAccessExpr) -> Option<Binding> {
        let receiver = access.expr()?;
        let name_node = access.name()?;
        let name = access.name_text()?;
        let arity = generic_arity(name_node.syntax());
        let invocation = invocation_of(access.syntax());
        let symbols = self.symbols();

        let receiver_binding = match receiver.kind() {
            SyntaxKind::IDENTIFIER_NAME
            | SyntaxKind::GENERIC_NAME
            | SyntaxKind::MEMBER_ACCESS_EXPR
            | SyntaxKind::QUALIFIED_NAME
            | SyntaxKind::ALIAS_QUALIFIED_NAME => self.bind(receiver.syntax()),
            _ => None,
        };
        let receiver_type = match receiver_binding {
            Some(Binding::Namespace(ns)) => {
                if arity == 0 {
                    if let Some(inner) = symbols.namespace(ns, &name) {
                        return Some(Binding::Namespace(inner));
                    }
                }
                let def = symbols.type_in(ns, &name, arity)?;
                return Some(Binding::Type(TypeRef::named(def)));
            }
            Some(Binding::Type(ty)) => ty,
            _ => self.type_of(receiver.syntax())?,
        };
        let members = self.lookup_members(&receiver_type, &name);
        self.choose(members, invocation.as_ref())
    }

    fn bind_member_binding(&self, binding: &MemberBindingExpr) -> Option<Binding> {
        let receiver = conditional_receiver(binding)?;
        let ty = self.type_of(receiver.syntax())?;
        let ty = self.nullable_underlying(&ty).unwrap_or(ty);
        let name = binding.name_text()?;
        let invocation = invocation_of(binding.syntax());
        self.choose(self.lookup_members(&ty, &name), invocation.as_ref())
    }

    fn bind_object_creation(&self, creation: &ObjectCreationExpr) -> Option<Binding> {
        let ty = self.resolve_type_syntax(&creation.ty()?)?;
        let def = ty.def()?;
        let constructors: Vec<(SymbolId, TypeRef)> = self
            .symbols()
            .get(def)
            .members
            .iter()
            .copied()
            .filter(|m| self.symbols().get(*m).kind == SymbolKind::Constructor)
            .map(|m| (m, ty.clone()))
            .collect();
        if constructors.is_empty() {
            return Some(Binding::Type(ty));
        }
        let (symbol, via) = self.select_overload(constructors, &creation.arguments())?;
        Some(Binding::Member { symbol, via })
    }

    /// The attribute class an attribute refers to, trying the `Attribute`
    /// suffix first.
    pub fn attribute_type(&self, attribute: &Attribute) -> Option<TypeRef> {
        let name = attribute.name()?;
        let simple = name.simple_name()?;
        let suffixed = format!("{simple}Attribute");
        let scope = self.scope(attribute.syntax());
        let symbols = self.symbols();
        match name.qualifier() {
            Some(qualifier) => {
                let container = match scope.resolve_namespace_or_type(&qualifier)? {
                    NamespaceOrType::Namespace(ns) => ns,
                    NamespaceOrType::Type(ty) => ty.def()?,
                };
                symbols
                    .type_in(container, &suffixed, 0)
                    .or_else(|| symbols.type_in(container, &simple, 0))
                    .map(TypeRef::named)
            }
            None => scope
                .lookup_type(&suffixed, 0)
                .or_else(|| scope.lookup_type(&simple, 0)),
        }
    }

    fn choose(
        &self,
        members: Vec<(SymbolId, TypeRef)>,
        invocation: Option<&InvocationExpr>,
    ) -> Option<Binding> {
        let symbols = self.symbols();
        let methods: Vec<_> = members
            .iter()
            .filter(|(id, _)| symbols.get(*id).kind == SymbolKind::Method)
            .cloned()
            .collect();
        let (symbol, via) = match invocation {
            Some(invocation) if !methods.is_empty() => {
                self.select_overload(methods, &invocation.arguments())?
            }
            _ => members.into_iter().next()?,
        };
        if symbols.get(symbol).is_type() {
            return Some(Binding::Type(TypeRef::named(symbol)));
        }
        Some(Binding::Member { symbol, via })
    }

    /// Pick the candidate whose parameters fit the arguments best.
    fn select_overload(
        &self,
        candidates: Vec<(SymbolId, TypeRef)>,
        args: &[Argument],
    ) -> Option<(SymbolId, TypeRef)> {
        let arg_types: Vec<Option<TypeRef>> = args
            .iter()
            .map(|a| a.expr().and_then(|e| self.type_of(e.syntax())))
            .collect();
        let symbols = self.symbols();
        let mut best: Option<(usize, &(SymbolId, TypeRef))> = None;
        for candidate in &candidates {
            let params = &symbols.get(candidate.0).parameters;
            let required = params.iter().filter(|p| !p.has_default).count();
            if args.len() < required || args.len() > params.len() {
                continue;
            }
            let score = arg_types
                .iter()
                .zip(params)
                .map(|(arg, param)| {
                    let param_ty = param.ty.as_ref().map(|t| t.substitute_from(&candidate.1));
                    match (arg, param_ty) {
                        (Some(_), Some(TypeRef::TypeParam { .. })) => 1,
                        (Some(arg), Some(param)) => {
                            if self.is_assignable(arg, &param) {
                                2
                            } else {
                                0
                            }
                        }
                        _ => 1,
                    }
                })
                .sum::<usize>();
            if best.is_none_or(|(s, _)| score > s) {
                best = Some((score, candidate));
            }
        }
        best.map(|(_, c)| c.clone())
            .or_else(|| candidates.into_iter().next())
    }

    /// Members named `name` visible on `ty`, each with the constructed type
    /// that declares it. Methods are collected through the whole base chain
    /// so overloads declared on bases are candidates too.
    pub fn lookup_members(&self, ty: &TypeRef, name: &str) -> Vec<(SymbolId, TypeRef)> {
        let symbols = self.symbols();
        let ty = match ty {
            TypeRef::Named { .. } => ty.clone(),
            TypeRef::Array(_) | TypeRef::TypeParam { .. } => match self.type_named("System.Object")
            {
                Some(object) => object,
                None => return Vec::new(),
            },
            TypeRef::Null => return Vec::new(),
        };
        let is_interface = ty
            .def()
            .is_some_and(|d| symbols.get(d).kind == SymbolKind::Type(TypeKind::Interface));
        let mut chain = if is_interface {
            let mut chain = vec![ty.clone()];
            chain.extend(symbols.all_supertypes(&ty));
            chain.extend(self.type_named("System.Object"));
            chain
        } else {
            symbols.base_chain(&ty)
        };
        chain.dedup();

        let mut out: Vec<(SymbolId, TypeRef)> = Vec::new();
        for level in chain {
            let Some(def) = level.def() else { continue };
            for &id in symbols.children_named(def, name) {
                let kind = symbols.get(id).kind;
                if kind != SymbolKind::Constructor && kind != SymbolKind::Namespace {
                    out.push((id, level.clone()));
                }
            }
            let only_methods = out
                .iter()
                .all(|(id, _)| symbols.get(*id).kind == SymbolKind::Method);
            if !out.is_empty() && !only_methods {
                break;
            }
        }
        out
    }

    /// Type of a member as seen through the constructed type `via`.
    pub fn member_type(&self, symbol: SymbolId, via: &TypeRef) -> Option<TypeRef> {
        let ty = self.symbols().get(symbol).ty.as_ref()?;
        Some(ty.substitute_from(via))
    }

    // ========================================================================
    // LOCALS
    // ========================================================================

    /// Local variable, parameter or `value` named `name` visible at `node`.
    pub fn find_local(&self, node: &SyntaxNode, name: &str) -> Option<Local> {
        let mut child = node.clone();
        for ancestor in node.ancestors().skip(1) {
            let found = match ancestor.kind() {
                SyntaxKind::BLOCK | SyntaxKind::SWITCH_SECTION => ancestor
                    .children()
                    .take_while(|s| s.text_range().start() < child.text_range().start())
                    .filter(|s| s.kind() == SyntaxKind::LOCAL_DECL_STMT)
                    .filter_map(|s| s.children().find_map(VariableDeclaration::cast))
                    .find_map(|d| self.declared_local(&d, name)),
                SyntaxKind::FOR_STMT | SyntaxKind::USING_STMT => ancestor
                    .children()
                    .find_map(VariableDeclaration::cast)
                    .and_then(|d| self.declared_local(&d, name)),
                SyntaxKind::FOREACH_STMT => name_token(&ancestor)
                    .filter(|t| ident_text(t) == name)
                    .map(|_| Local {
                        name: SmolStr::new(name),
                        kind: LocalKind::Variable,
                        ty: ancestor
                            .children()
                            .find_map(TypeSyntax::cast)
                            .and_then(|t| self.resolve_type_syntax(&t)),
                        decl: ancestor.clone(),
                    }),
                SyntaxKind::CATCH_CLAUSE => ancestor
                    .children()
                    .find(|n| n.kind() == SyntaxKind::CATCH_DECL)
                    .filter(|d| name_token(d).is_some_and(|t| ident_text(&t) == name))
                    .map(|d| Local {
                        name: SmolStr::new(name),
                        kind: LocalKind::Variable,
                        ty: d
                            .children()
                            .find_map(TypeSyntax::cast)
                            .and_then(|t| self.resolve_type_syntax(&t)),
                        decl: d,
                    }),
                SyntaxKind::SIMPLE_LAMBDA_EXPR
                | SyntaxKind::PAREN_LAMBDA_EXPR
                | SyntaxKind::METHOD_DECL
                | SyntaxKind::CONSTRUCTOR_DECL
                | SyntaxKind::INDEXER_DECL => own_parameters(&ancestor)
                    .into_iter()
                    .find(|p| p.name().as_deref() == Some(name))
                    .map(|p| Local {
                        name: SmolStr::new(name),
                        kind: LocalKind::Parameter,
                        ty: p.ty().and_then(|t| self.resolve_type_syntax(&t)),
                        decl: p.syntax().clone(),
                    }),
                SyntaxKind::ACCESSOR_DECL if name == "value" => self.accessor_value(&ancestor),
                kind if kind.is_type_decl() => return None,
                _ => None,
            };
            if found.is_some() {
                return found;
            }
            child = ancestor;
        }
        None
    }

    fn declared_local(&self, declaration: &VariableDeclaration, name: &str) -> Option<Local> {
        let declarator = declaration
            .declarators()
            .find(|d| d.name().as_deref() == Some(name))?;
        let ty = declaration
            .ty()
            .filter(|t| t.text() != "var")
            .and_then(|t| self.resolve_type_syntax(&t))
            .or_else(|| {
                declarator
                    .initializer()
                    .and_then(|e| self.type_of(e.syntax()))
            });
        Some(Local {
            name: SmolStr::new(name),
            kind: LocalKind::Variable,
            ty,
            decl: declarator.syntax().clone(),
        })
    }

    fn accessor_value(&self, accessor: &SyntaxNode) -> Option<Local> {
        let keyword = name_token(accessor)?;
        if !matches!(keyword.text(), "set" | "init" | "add" | "remove") {
            return None;
        }
        let owner = accessor.parent()?.parent()?;
        let ty = match self.declared_symbol(&owner) {
            Some(id) => self.symbols().get(id).ty.clone(),
            None => owner
                .children()
                .find_map(TypeSyntax::cast)
                .and_then(|t| self.resolve_type_syntax(&t)),
        };
        Some(Local {
            name: SmolStr::new("value"),
            kind: LocalKind::Value,
            ty,
            decl: accessor.clone(),
        })
    }

    // ========================================================================
    // TYPES
    // ========================================================================

    /// Static type of an expression, `None` when unknown.
    pub fn type_of(&self, node: &SyntaxNode) -> Option<TypeRef> {
        let symbols = self.symbols();
        match node.kind() {
            SyntaxKind::LITERAL_EXPR => self.literal_type(&LiteralExpr::cast(node.clone())?),
            SyntaxKind::PAREN_EXPR => {
                let inner = Expr::cast(node.clone())?.unparenthesized();
                self.type_of(inner.syntax())
            }
            SyntaxKind::IDENTIFIER_NAME
            | SyntaxKind::GENERIC_NAME
            | SyntaxKind::MEMBER_ACCESS_EXPR
            | SyntaxKind::MEMBER_BINDING_EXPR => match self.bind(node)? {
                Binding::Local(local) => local.ty,
                Binding::Member { symbol, via } => match symbols.get(symbol).kind {
                    SymbolKind::Field | SymbolKind::Property | SymbolKind::Event => {
                        self.member_type(symbol, &via)
                    }
                    _ => None,
                },
                _ => None,
            },
            SyntaxKind::INVOCATION_EXPR => {
                let invocation = InvocationExpr::cast(node.clone())?;
                if invocation.nameof_value().is_some() {
                    return self.type_named("System.String");
                }
                match self.bind(invocation.expr()?.syntax())? {
                    Binding::Member { symbol, via }
                        if symbols.get(symbol).kind == SymbolKind::Method =>
                    {
                        self.member_type(symbol, &via)
                    }
                    _ => {
                        // Invoking a delegate-typed value
                        let callee = self.type_of(invocation.expr()?.syntax())?;
                        let def = callee.def()?;
                        let delegate = symbols.get(def);
                        (delegate.kind == SymbolKind::Type(TypeKind::Delegate))
                            .then(|| delegate.ty.as_ref().map(|t| t.substitute_from(&callee)))
                            .flatten()
                    }
                }
            }
            SyntaxKind::OBJECT_CREATION_EXPR => {
                self.resolve_type_syntax(&ObjectCreationExpr::cast(node.clone())?.ty()?)
            }
            SyntaxKind::ARRAY_CREATION_EXPR => {
                let element = node.children().find_map(TypeSyntax::cast)?;
                Some(TypeRef::Array(Box::new(self.resolve_type_syntax(&element)?)))
            }
            SyntaxKind::CAST_EXPR => self.resolve_type_syntax(&CastExpr::cast(node.clone())?.ty()?),
            SyntaxKind::AS_EXPR => self.resolve_type_syntax(&AsExpr::cast(node.clone())?.ty()?),
            SyntaxKind::DEFAULT_EXPR => {
                self.resolve_type_syntax(&DefaultExpr::cast(node.clone())?.ty()?)
            }
            SyntaxKind::TYPEOF_EXPR => self.type_named("System.Type"),
            SyntaxKind::THIS_EXPR => Some(symbols.self_type(self.containing_type(node)?)),
            SyntaxKind::BASE_EXPR => {
                symbols.base_class(&symbols.self_type(self.containing_type(node)?))
            }
            SyntaxKind::CONDITIONAL_EXPR => {
                let (when_true, when_false) = ConditionalExpr::cast(node.clone())?.branches();
                let a = when_true.and_then(|e| self.type_of(e.syntax()));
                match a {
                    Some(TypeRef::Null) | None => when_false.and_then(|e| self.type_of(e.syntax())),
                    a => a,
                }
            }
            SyntaxKind::IS_EXPR => self.type_named("System.Boolean"),
            SyntaxKind::BINARY_EXPR => self.binary_type(node),
            SyntaxKind::PREFIX_UNARY_EXPR => {
                let op = node.first_token()?.kind();
                if op == SyntaxKind::BANG {
                    return self.type_named("System.Boolean");
                }
                self.type_of(node.children().find_map(Expr::cast)?.syntax())
            }
            SyntaxKind::POSTFIX_UNARY_EXPR | SyntaxKind::ASSIGNMENT_EXPR => {
                self.type_of(node.children().find_map(Expr::cast)?.syntax())
            }
            SyntaxKind::CONDITIONAL_ACCESS_EXPR => {
                let access = ConditionalAccessExpr::cast(node.clone())?;
                let ty = self.type_of(access.when_not_null()?.syntax())?;
                let is_value = ty.def().is_some_and(|d| symbols.get(d).is_value_type());
                if is_value && self.nullable_underlying(&ty).is_none() {
                    let nullable = symbols.type_by_name("System.Nullable`1")?;
                    return Some(TypeRef::Named {
                        def: nullable,
                        args: vec![ty],
                    });
                }
                Some(ty)
            }
            SyntaxKind::ELEMENT_ACCESS_EXPR => {
                match self.type_of(node.children().find_map(Expr::cast)?.syntax())? {
                    TypeRef::Array(element) => Some(*element),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn literal_type(&self, literal: &LiteralExpr) -> Option<TypeRef> {
        let token = literal.token()?;
        let text = token.text().to_ascii_lowercase();
        let name = match token.kind() {
            SyntaxKind::INT_NUMBER => {
                if text.ends_with("ul") || text.ends_with("lu") {
                    "System.UInt64"
                } else if text.ends_with('u') {
                    "System.UInt32"
                } else if text.ends_with('l') {
                    "System.Int64"
                } else {
                    "System.Int32"
                }
            }
            SyntaxKind::REAL_NUMBER => {
                if text.ends_with('f') {
                    "System.Single"
                } else if text.ends_with('m') {
                    "System.Decimal"
                } else {
                    "System.Double"
                }
            }
            SyntaxKind::STRING => "System.String",
            SyntaxKind::CHAR => "System.Char",
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => "System.Boolean",
            SyntaxKind::NULL_KW => return Some(TypeRef::Null),
            _ => return None,
        };
        self.type_named(name)
    }

    fn binary_type(&self, node: &SyntaxNode) -> Option<TypeRef> {
        let mut operands = node.children().filter_map(Expr::cast);
        let lhs = operands.next();
        let rhs = operands.next();
        let op = node
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia())?
            .kind();
        let lhs_ty = lhs.and_then(|e| self.type_of(e.syntax()));
        let rhs_ty = rhs.and_then(|e| self.type_of(e.syntax()));
        match op {
            SyntaxKind::EQ_EQ
            | SyntaxKind::BANG_EQ
            | SyntaxKind::LT
            | SyntaxKind::GT
            | SyntaxKind::LT_EQ
            | SyntaxKind::GT_EQ
            | SyntaxKind::AMP_AMP
            | SyntaxKind::PIPE_PIPE => self.type_named("System.Boolean"),
            SyntaxKind::QUESTION_QUESTION => lhs_ty
                .map(|t| self.nullable_underlying(&t).unwrap_or(t))
                .or(rhs_ty),
            _ => {
                let string = self.type_named("System.String");
                if op == SyntaxKind::PLUS && (lhs_ty == string || rhs_ty == string) {
                    return string;
                }
                match (lhs_ty, rhs_ty) {
                    (Some(a), Some(b)) => self.promote(&a, &b),
                    (a, b) => a.or(b),
                }
            }
        }
    }

    /// Binary numeric promotion
    fn promote(&self, a: &TypeRef, b: &TypeRef) -> Option<TypeRef> {
        const RANKS: [&str; 6] = [
            "System.Int32",
            "System.UInt32",
            "System.Int64",
            "System.UInt64",
            "System.Single",
            "System.Double",
        ];
        let rank = |t: &TypeRef| RANKS.iter().position(|name| self.is_type(t, name));
        let is_small = |t: &TypeRef| {
            ["System.Byte", "System.SByte", "System.Int16", "System.UInt16", "System.Char"]
                .iter()
                .any(|name| self.is_type(t, name))
        };
        if a == b && !is_small(a) {
            return Some(a.clone());
        }
        let ra = rank(a).or_else(|| is_small(a).then_some(0));
        let rb = rank(b).or_else(|| is_small(b).then_some(0));
        match (ra, rb) {
            (Some(x), Some(y)) => self.type_named(RANKS[x.max(y)]),
            _ => Some(a.clone()),
        }
    }

    /// `T` of `Nullable<T>`
    pub fn nullable_underlying(&self, ty: &TypeRef) -> Option<TypeRef> {
        if !self.is_type(ty, "System.Nullable`1") {
            return None;
        }
        ty.args().first().cloned()
    }

    /// Reference types: classes, interfaces, delegates, arrays and type
    /// parameters (treated leniently).
    pub fn is_reference_type(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Named { def, .. } => matches!(
                self.symbols().get(*def).kind,
                SymbolKind::Type(TypeKind::Class | TypeKind::Interface | TypeKind::Delegate)
            ),
            TypeRef::Array(_) | TypeRef::TypeParam { .. } | TypeRef::Null => true,
        }
    }

    /// Implicit reference, boxing, identity and nullable-wrapping conversions.
    /// Numeric conversions are deliberately absent: a value stored as `object`
    /// must have exactly the registered type.
    pub fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        if from == to || self.is_type(to, "System.Object") {
            return true;
        }
        if let TypeRef::TypeParam { .. } = to {
            return true;
        }
        if let Some(underlying) = self.nullable_underlying(to) {
            return *from == TypeRef::Null || *from == underlying;
        }
        match from {
            TypeRef::Null => self.is_reference_type(to),
            TypeRef::Named { .. } => self.symbols().all_supertypes(from).contains(to),
            TypeRef::Array(_) => {
                self.is_type(to, "System.Array")
                    || self.is_type(to, "System.Collections.IEnumerable")
            }
            TypeRef::TypeParam { .. } => false,
        }
    }
}

/// The invocation whose callee is `callee`
fn invocation_of(callee: &SyntaxNode) -> Option<InvocationExpr> {
    let invocation = InvocationExpr::cast(callee.parent()?)?;
    (invocation.expr()?.syntax() == callee).then_some(invocation)
}

/// Parameters declared directly by a method, constructor, indexer or lambda
fn own_parameters(owner: &SyntaxNode) -> Vec<Parameter> {
    if owner.kind() == SyntaxKind::SIMPLE_LAMBDA_EXPR {
        return owner.children().filter_map(Parameter::cast).collect();
    }
    owner
        .children()
        .find(|n| n.kind() == SyntaxKind::PARAMETER_LIST)
        .map(|list| list.children().filter_map(Parameter::cast).collect())
        .unwrap_or_default()
}

fn generic_arity(node: &SyntaxNode) -> usize {
    node.children()
        .find(|n| n.kind() == SyntaxKind::TYPE_ARGUMENT_LIST)
        .map(|l| l.children().filter_map(TypeSyntax::cast).count())
        .unwrap_or(0)
}

/// Simple names that can only denote a type or namespace.
fn is_type_position(node: &SyntaxNode) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    let index = parent.children().position(|c| &c == node);
    match parent.kind() {
        SyntaxKind::QUALIFIED_NAME
        | SyntaxKind::ALIAS_QUALIFIED_NAME
        | SyntaxKind::NULLABLE_TYPE
        | SyntaxKind::ARRAY_TYPE
        | SyntaxKind::TYPE_ARGUMENT_LIST
        | SyntaxKind::BASE_LIST
        | SyntaxKind::TYPEOF_EXPR
        | SyntaxKind::DEFAULT_EXPR
        | SyntaxKind::OBJECT_CREATION_EXPR
        | SyntaxKind::ARRAY_CREATION_EXPR
        | SyntaxKind::VARIABLE_DECLARATION
        | SyntaxKind::PARAMETER
        | SyntaxKind::PROPERTY_DECL
        | SyntaxKind::INDEXER_DECL
        | SyntaxKind::METHOD_DECL
        | SyntaxKind::EVENT_DECL
        | SyntaxKind::DELEGATE_DECL
        | SyntaxKind::USING_DIRECTIVE
        | SyntaxKind::NAMESPACE_DECL
        | SyntaxKind::FILE_SCOPED_NAMESPACE_DECL
        | SyntaxKind::CATCH_DECL
        | SyntaxKind::FOREACH_STMT
        | SyntaxKind::EXPLICIT_INTERFACE_SPECIFIER
        | SyntaxKind::TYPE_CONSTRAINT_CLAUSE => true,
        SyntaxKind::CAST_EXPR => index == Some(0),
        SyntaxKind::AS_EXPR | SyntaxKind::IS_EXPR => index == Some(1),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::Compilation;
    use crate::parser::{IdentifierName, VariableDeclarator};

    fn model_and_find<T: AstNode>(
        compilation: &Compilation,
        pred: impl Fn(&T) -> bool,
    ) -> (SemanticModel<'_>, T) {
        let model = compilation.semantic_model(FileId::new(0)).unwrap();
        let node = model
            .root()
            .descendants()
            .filter_map(T::cast)
            .find(|n| pred(n))
            .unwrap();
        (model, node)
    }

    const CONTROL: &str = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        public int Bar
        {
            get { return (int)this.GetValue(BarProperty); }
            set { this.SetValue(BarProperty, value); }
        }

        public void Meh(FooControl other, double d)
        {
            var local = 1.5f;
            other?.SetValue(BarProperty, 1);
            this.SetCurrentValue(FontSizeProperty, d);
        }
    }
}"#;

    #[test]
    fn test_bind_static_member_access_to_framework_method() {
        let compilation = Compilation::from_text(CONTROL);
        let (model, invocation) = model_and_find::<InvocationExpr>(&compilation, |i| {
            i.method_name().as_deref() == Some("Register")
        });
        let symbol = model.symbol(invocation.syntax()).unwrap();
        let symbols = model.symbols();
        assert_eq!(symbols.get(symbol).name, "Register");
        assert_eq!(
            symbols.qualified_name(symbols.containing_type(symbol).unwrap()),
            "System.Windows.DependencyProperty"
        );
        assert_eq!(symbols.get(symbol).parameters.len(), 4);
    }

    #[test]
    fn test_bind_inherited_instance_method_and_field() {
        let compilation = Compilation::from_text(CONTROL);
        let (model, invocation) = model_and_find::<InvocationExpr>(&compilation, |i| {
            i.method_name().as_deref() == Some("SetCurrentValue")
        });
        let method = model.symbol(invocation.syntax()).unwrap();
        let owner = model.symbols().containing_type(method).unwrap();
        assert_eq!(model.symbols().qualified_name(owner), "System.Windows.DependencyObject");

        let field = invocation.arguments()[0].expr().unwrap();
        let field = model.symbol(field.syntax()).unwrap();
        assert_eq!(
            model.symbols().qualified_name(field),
            "System.Windows.Controls.Control.FontSizeProperty"
        );
    }

    #[test]
    fn test_bind_through_conditional_access() {
        let compilation = Compilation::from_text(CONTROL);
        let (model, invocation) = model_and_find::<InvocationExpr>(&compilation, |i| {
            i.method_name().as_deref() == Some("SetValue")
                && i.receiver().is_some_and(|r| r.as_identifier().as_deref() == Some("other"))
        });
        let method = model.symbol(invocation.syntax()).unwrap();
        assert_eq!(model.symbols().get(method).name, "SetValue");
        let receiver = invocation.receiver().unwrap();
        let ty = model.type_of(receiver.syntax()).unwrap();
        assert_eq!(model.display(&ty), "FooControl");
    }

    #[test]
    fn test_type_of_literals_locals_and_value() {
        let compilation = Compilation::from_text(CONTROL);
        let (model, declarator) = model_and_find::<VariableDeclarator>(
            &compilation,
            |d| d.name().as_deref() == Some("local"),
        );
        let init = declarator.initializer().unwrap();
        assert_eq!(model.display(&model.type_of(init.syntax()).unwrap()), "float");

        let (model, value) = model_and_find::<IdentifierName>(&compilation, |n| n.text() == "value");
        let Some(Binding::Local(local)) = model.bind(value.syntax()) else {
            panic!("value should bind to the accessor parameter");
        };
        assert_eq!(local.kind, LocalKind::Value);
        assert_eq!(model.display(&local.ty.unwrap()), "int");
    }

    #[test]
    fn test_is_assignable_requires_exact_value_types() {
        let compilation = Compilation::from_text("class C { }");
        let model = compilation.semantic_model(FileId::new(0)).unwrap();
        let int = model.type_named("System.Int32").unwrap();
        let double = model.type_named("System.Double").unwrap();
        let object = model.type_named("System.Object").unwrap();
        let string = model.type_named("System.String").unwrap();
        assert!(model.is_assignable(&int, &int));
        assert!(model.is_assignable(&int, &object));
        assert!(!model.is_assignable(&int, &double));
        assert!(model.is_assignable(&TypeRef::Null, &string));
        assert!(!model.is_assignable(&TypeRef::Null, &int));
    }
}
