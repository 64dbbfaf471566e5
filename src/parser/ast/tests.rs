use super::*;
use crate::parser::parse;

fn unit(source: &str) -> CompilationUnit {
    let parsed = parse(source);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    CompilationUnit::cast(parsed.syntax()).unwrap()
}

fn first<T: AstNode>(root: &CompilationUnit) -> T {
    root.syntax().descendants().find_map(T::cast).unwrap()
}

#[test]
fn test_ast_type_decl() {
    let root = unit("namespace N { public partial class Foo<T> : Control, IFoo { } }");
    let types = root.type_decls();
    assert_eq!(types.len(), 1);
    let foo = &types[0];
    assert_eq!(foo.name().as_deref(), Some("Foo"));
    assert_eq!(foo.type_parameters(), vec![SmolStr::new("T")]);
    let bases: Vec<_> = foo.base_types().iter().map(|t| t.text()).collect();
    assert_eq!(bases, vec!["Control", "IFoo"]);
    assert!(!foo.is_static());
}

#[test]
fn test_ast_field_and_property() {
    let root = unit(
        r#"class C
{
    public static readonly DependencyProperty BarProperty = Register("Bar");
    public int Bar { get { return 1; } set { } }
}"#,
    );
    let field: FieldDecl = first(&root);
    assert!(field.is_static());
    assert!(field.is_readonly());
    let declarators = field.declarators();
    assert_eq!(declarators[0].name().as_deref(), Some("BarProperty"));
    assert_eq!(
        declarators[0].initializer().unwrap().kind(),
        SyntaxKind::INVOCATION_EXPR
    );

    let property: PropertyDecl = first(&root);
    assert_eq!(property.name().as_deref(), Some("Bar"));
    assert_eq!(property.ty().unwrap().text(), "int");
    assert!(property.getter().is_some());
    assert_eq!(property.setter().unwrap().body_nodes().len(), 0);
}

#[test]
fn test_ast_method_and_parameters() {
    let root = unit("class C { private static void OnBarChanged(DependencyObject d, DependencyPropertyChangedEventArgs e) { } }");
    let method: MethodDecl = first(&root);
    assert_eq!(method.name().as_deref(), Some("OnBarChanged"));
    let names: Vec<_> = method.parameters().iter().filter_map(|p| p.name()).collect();
    assert_eq!(names, vec!["d", "e"]);
    assert_eq!(method.return_type().unwrap().text(), "void");
}

#[test]
fn test_ast_attribute_arguments() {
    let root = unit(r#"[TemplatePart(Name = "PART_Bar", Type = typeof(Border))] class C { }"#);
    let attribute: Attribute = first(&root);
    assert_eq!(attribute.name().unwrap().simple_name().as_deref(), Some("TemplatePart"));
    let args = attribute.arguments();
    assert_eq!(args.len(), 2);
    assert_eq!(args[0].name_equals().as_deref(), Some("Name"));
    assert_eq!(args[1].name_equals().as_deref(), Some("Type"));
    assert!(attribute.owner().is_some());
}

#[test]
fn test_ast_invocation_names() {
    let root = unit("class C { object x = a?.SetValue(BarProperty, nameof(Foo.Bar)); }");
    let invocation: InvocationExpr = first(&root);
    assert_eq!(invocation.method_name().as_deref(), Some("SetValue"));
    assert_eq!(invocation.receiver().unwrap().as_identifier().as_deref(), Some("a"));
    let nameof = invocation.arguments()[1]
        .expr()
        .and_then(|e| InvocationExpr::cast(e.syntax().clone()))
        .unwrap();
    assert_eq!(nameof.nameof_value().as_deref(), Some("Bar"));
}

#[test]
fn test_unquote_string() {
    assert_eq!(unquote_string(r#""a\"b""#).as_deref(), Some("a\"b"));
    assert_eq!(unquote_string(r#"@"c:\x""#).as_deref(), Some(r"c:\x"));
    assert_eq!(unquote_string(r#"$"{x}""#), None);
}
