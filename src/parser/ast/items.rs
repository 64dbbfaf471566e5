use super::*;

// ============================================================================
// Root and namespaces
// ============================================================================

ast_node!(CompilationUnit, COMPILATION_UNIT);

impl CompilationUnit {
    children_method!(usings, UsingDirective);
    children_method!(attribute_lists, AttributeList);

    /// Type declarations at any nesting depth of namespaces (not nested types).
    pub fn type_decls(&self) -> Vec<TypeDecl> {
        let mut out = Vec::new();
        collect_type_decls(&self.0, &mut out);
        out
    }
}

fn collect_type_decls(node: &SyntaxNode, out: &mut Vec<TypeDecl>) {
    for child in node.children() {
        match child.kind() {
            SyntaxKind::NAMESPACE_DECL | SyntaxKind::FILE_SCOPED_NAMESPACE_DECL => {
                collect_type_decls(&child, out)
            }
            _ => out.extend(TypeDecl::cast(child)),
        }
    }
}

ast_node!(UsingDirective, USING_DIRECTIVE);

impl UsingDirective {
    pub fn is_static(&self) -> bool {
        has_token(&self.0, SyntaxKind::STATIC_KW)
    }

    /// `using Alias = Target;`
    pub fn alias(&self) -> Option<SmolStr> {
        let name_equals = self.0.children().find(|n| n.kind() == SyntaxKind::NAME_EQUALS)?;
        name_equals
            .children()
            .find_map(IdentifierName::cast)
            .map(|n| n.text())
    }

    first_child_method!(name, TypeSyntax);
}

ast_node!(NamespaceDecl, [NAMESPACE_DECL, FILE_SCOPED_NAMESPACE_DECL]);

impl NamespaceDecl {
    first_child_method!(name, TypeSyntax);
    children_method!(usings, UsingDirective);

    pub fn is_file_scoped(&self) -> bool {
        self.0.kind() == SyntaxKind::FILE_SCOPED_NAMESPACE_DECL
    }
}

// ============================================================================
// Types
// ============================================================================

ast_node!(
    TypeDecl,
    [CLASS_DECL, STRUCT_DECL, INTERFACE_DECL, ENUM_DECL, DELEGATE_DECL]
);

impl TypeDecl {
    name_methods!();
    modifier_methods!();

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    pub fn is_abstract(&self) -> bool {
        self.has_modifier(SyntaxKind::ABSTRACT_KW)
    }

    /// Names declared in `<T, U>`
    pub fn type_parameters(&self) -> Vec<SmolStr> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::TYPE_PARAMETER_LIST)
            .map(|list| {
                list.children()
                    .filter_map(|p| name_token(&p))
                    .map(|t| ident_text(&t))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Types listed after `:`
    pub fn base_types(&self) -> Vec<TypeSyntax> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::BASE_LIST)
            .map(|list| list.children().filter_map(TypeSyntax::cast).collect())
            .unwrap_or_default()
    }

    /// Member declaration nodes in source order
    pub fn members(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind().is_member_decl())
    }

    children_method!(fields, FieldDecl);
    children_method!(properties, PropertyDecl);
    children_method!(methods, MethodDecl);
    children_method!(constructors, ConstructorDecl);
    children_method!(events, EventDecl);
    children_method!(nested_types, TypeDecl);
    children_method!(enum_members, EnumMember);
}

ast_node!(EnumMember, ENUM_MEMBER);

impl EnumMember {
    name_methods!();
}

// ============================================================================
// Members
// ============================================================================

ast_node!(FieldDecl, [FIELD_DECL, EVENT_FIELD_DECL]);

impl FieldDecl {
    modifier_methods!();
    first_child_method!(declaration, VariableDeclaration);

    pub fn is_readonly(&self) -> bool {
        self.has_modifier(SyntaxKind::READONLY_KW)
    }

    pub fn is_event(&self) -> bool {
        self.0.kind() == SyntaxKind::EVENT_FIELD_DECL
    }

    pub fn declarators(&self) -> Vec<VariableDeclarator> {
        self.declaration()
            .map(|d| d.declarators().collect())
            .unwrap_or_default()
    }
}

ast_node!(VariableDeclaration, VARIABLE_DECLARATION);

impl VariableDeclaration {
    first_child_method!(ty, TypeSyntax);
    children_method!(declarators, VariableDeclarator);
}

ast_node!(VariableDeclarator, VARIABLE_DECLARATOR);

impl VariableDeclarator {
    name_methods!();

    /// The expression after `=`
    pub fn initializer(&self) -> Option<Expr> {
        equals_value(&self.0)
    }
}

fn equals_value(node: &SyntaxNode) -> Option<Expr> {
    node.children()
        .find(|n| n.kind() == SyntaxKind::EQUALS_VALUE_CLAUSE)?
        .children()
        .find_map(Expr::cast)
}

fn arrow_body(node: &SyntaxNode) -> Option<Expr> {
    node.children()
        .find(|n| n.kind() == SyntaxKind::ARROW_EXPR_CLAUSE)?
        .children()
        .find_map(Expr::cast)
}

ast_node!(PropertyDecl, PROPERTY_DECL);

impl PropertyDecl {
    name_methods!();
    modifier_methods!();
    first_child_method!(ty, TypeSyntax);
    first_child_method!(accessor_list, AccessorList);

    pub fn accessors(&self) -> Vec<AccessorDecl> {
        self.accessor_list()
            .map(|l| l.accessors().collect())
            .unwrap_or_default()
    }

    pub fn getter(&self) -> Option<AccessorDecl> {
        self.accessors().into_iter().find(|a| a.keyword().as_deref() == Some("get"))
    }

    pub fn setter(&self) -> Option<AccessorDecl> {
        self.accessors().into_iter().find(|a| a.keyword().as_deref() == Some("set"))
    }

    /// `int Foo => expr;`
    pub fn expression_body(&self) -> Option<Expr> {
        arrow_body(&self.0)
    }

    /// `int Foo { get; } = expr;`
    pub fn initializer(&self) -> Option<Expr> {
        equals_value(&self.0)
    }

    pub fn is_explicit_interface(&self) -> bool {
        self.0
            .children()
            .any(|n| n.kind() == SyntaxKind::EXPLICIT_INTERFACE_SPECIFIER)
    }
}

ast_node!(AccessorList, ACCESSOR_LIST);

impl AccessorList {
    children_method!(accessors, AccessorDecl);
}

ast_node!(AccessorDecl, ACCESSOR_DECL);

impl AccessorDecl {
    modifier_methods!();
    first_child_method!(body, Block);

    /// `get`, `set`, `init`, `add` or `remove`
    pub fn keyword(&self) -> Option<SmolStr> {
        name_token(&self.0).map(|t| SmolStr::new(t.text()))
    }

    pub fn expression_body(&self) -> Option<Expr> {
        arrow_body(&self.0)
    }

    /// The statements of a block body, or the expression body wrapped as one
    /// pseudo-statement node.
    pub fn body_nodes(&self) -> Vec<SyntaxNode> {
        if let Some(body) = self.body() {
            return body.statements().map(|s| s.syntax().clone()).collect();
        }
        self.expression_body()
            .map(|e| vec![e.syntax().clone()])
            .unwrap_or_default()
    }
}

ast_node!(MethodDecl, METHOD_DECL);

impl MethodDecl {
    name_methods!();
    modifier_methods!();
    first_child_method!(return_type, TypeSyntax);
    first_child_method!(parameter_list, ParameterList);
    first_child_method!(body, Block);

    pub fn parameters(&self) -> Vec<Parameter> {
        self.parameter_list()
            .map(|l| l.parameters().collect())
            .unwrap_or_default()
    }

    pub fn expression_body(&self) -> Option<Expr> {
        arrow_body(&self.0)
    }

    pub fn type_parameters(&self) -> Vec<SmolStr> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::TYPE_PARAMETER_LIST)
            .map(|list| {
                list.children()
                    .filter_map(|p| name_token(&p))
                    .map(|t| ident_text(&t))
                    .collect()
            })
            .unwrap_or_default()
    }
}

ast_node!(ConstructorDecl, CONSTRUCTOR_DECL);

impl ConstructorDecl {
    name_methods!();
    modifier_methods!();
    first_child_method!(parameter_list, ParameterList);
    first_child_method!(body, Block);
}

ast_node!(EventDecl, EVENT_DECL);

impl EventDecl {
    name_methods!();
    modifier_methods!();
    first_child_method!(ty, TypeSyntax);
    first_child_method!(accessor_list, AccessorList);

    pub fn accessor(&self, keyword: &str) -> Option<AccessorDecl> {
        self.accessor_list()?
            .accessors()
            .find(|a| a.keyword().as_deref() == Some(keyword))
    }
}

ast_node!(ParameterList, PARAMETER_LIST);

impl ParameterList {
    children_method!(parameters, Parameter);
}

ast_node!(Parameter, PARAMETER);

impl Parameter {
    name_methods!();
    first_child_method!(ty, TypeSyntax);
}

// ============================================================================
// Attributes
// ============================================================================

ast_node!(AttributeList, ATTRIBUTE_LIST);

impl AttributeList {
    children_method!(attributes, Attribute);

    /// `assembly` in `[assembly: Foo]`
    pub fn target(&self) -> Option<SmolStr> {
        let target = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::ATTRIBUTE_TARGET)?;
        target
            .first_token()
            .map(|t| SmolStr::new(t.text()))
    }
}

ast_node!(Attribute, ATTRIBUTE);

impl Attribute {
    first_child_method!(name, TypeSyntax);

    pub fn argument_list(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::ATTRIBUTE_ARGUMENT_LIST)
    }

    pub fn arguments(&self) -> Vec<AttributeArgument> {
        self.argument_list()
            .map(|l| l.children().filter_map(AttributeArgument::cast).collect())
            .unwrap_or_default()
    }

    /// The declaration the attribute is applied to, `None` for global attributes.
    pub fn owner(&self) -> Option<SyntaxNode> {
        let list = self.0.parent()?;
        let owner = list.parent()?;
        (owner.kind() != SyntaxKind::COMPILATION_UNIT).then_some(owner)
    }
}

ast_node!(AttributeArgument, ATTRIBUTE_ARGUMENT);

impl AttributeArgument {
    /// `Name = value`
    pub fn name_equals(&self) -> Option<SmolStr> {
        label(&self.0, SyntaxKind::NAME_EQUALS)
    }

    /// `name: value`
    pub fn name_colon(&self) -> Option<SmolStr> {
        label(&self.0, SyntaxKind::NAME_COLON)
    }

    first_child_method!(expr, Expr);
}

pub(crate) fn label(node: &SyntaxNode, kind: SyntaxKind) -> Option<SmolStr> {
    node.children()
        .find(|n| n.kind() == kind)?
        .children()
        .find_map(IdentifierName::cast)
        .map(|n| n.text())
}
