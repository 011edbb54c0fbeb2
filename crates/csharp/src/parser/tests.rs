use super::*;
use nunit_analyzers_core::syntax::{render, render_type, LiteralKind};
use pretty_assertions::assert_eq;

fn in_method(body: &str) -> String {
    format!("class Fixture\n{{\n    void Test()\n    {{\n        {body}\n    }}\n}}\n")
}

fn first_call<'t>(parsed: &'t ParsedSource, name: &str) -> (&'t Expr, &'t RootExpression) {
    parsed
        .tree
        .invocations()
        .into_iter()
        .find(|(call, _)| {
            call.trailing_name()
                .is_some_and(|trailing| trailing.identifier == name)
        })
        .unwrap()
}

#[test]
fn test_invocation_arguments_keep_trivia() {
    let source = in_method("Assert.AreEqual(1,  actual );");
    let parsed = parse_source(&source).unwrap();
    let (call, root) = first_call(&parsed, "AreEqual");
    assert!(root.in_method_body);
    assert!(!root.has_errors);

    let (target, arguments) = call.as_invocation().unwrap();
    assert_eq!(render(target, &source), "Assert.AreEqual");
    let arguments = &arguments.arguments;
    assert_eq!(arguments.len(), 2);
    assert!(arguments[0].expression.is_literal(LiteralKind::Integer));
    assert_eq!(arguments[0].leading_trivia, "");
    assert_eq!(arguments[0].trailing_trivia, "");
    assert_eq!(arguments[1].leading_trivia, "  ");
    assert_eq!(arguments[1].trailing_trivia, " ");
    assert_eq!(render(call, &source), "Assert.AreEqual(1,  actual )");
}

#[test]
fn test_multiline_arguments_keep_newlines() {
    let source = in_method("Assert.AreEqual(\n            1,\n            actual);");
    let parsed = parse_source(&source).unwrap();
    let (call, _) = first_call(&parsed, "AreEqual");
    let (_, arguments) = call.as_invocation().unwrap();
    assert_eq!(arguments.arguments[0].leading_trivia, "\n            ");
    assert_eq!(arguments.arguments[1].leading_trivia, "\n            ");
}

#[test]
fn test_named_arguments() {
    let source = in_method("Assert.AreEqual(actual: result, expected: 2);");
    let parsed = parse_source(&source).unwrap();
    let (call, _) = first_call(&parsed, "AreEqual");
    let (_, arguments) = call.as_invocation().unwrap();
    let names: Vec<Option<&str>> = arguments
        .arguments
        .iter()
        .map(|argument| argument.name.as_deref())
        .collect();
    assert_eq!(names, vec![Some("actual"), Some("expected")]);
    assert_eq!(render(&arguments.arguments[0].expression, &source), "result");
}

#[test]
fn test_generic_member_names() {
    let source = in_method("Assert.That(value, Is.InstanceOf<List<int>>());");
    let parsed = parse_source(&source).unwrap();
    let (call, _) = first_call(&parsed, "InstanceOf");
    let (target, _) = call.as_invocation().unwrap();
    let (receiver, name) = target.as_member_access().unwrap();
    assert_eq!(render(receiver, &source), "Is");
    assert_eq!(name.identifier, "InstanceOf");
    let type_arguments = name.type_arguments.as_ref().unwrap();
    assert_eq!(type_arguments.len(), 1);
    match &type_arguments[0].kind {
        TypeSyntaxKind::Named {
            name,
            type_arguments,
            ..
        } => {
            assert_eq!(name, "List");
            assert_eq!(type_arguments.len(), 1);
        }
        other => panic!("unexpected type syntax {other:?}"),
    }
}

#[test]
fn test_binary_and_unary_operands() {
    let source = in_method("Assert.IsTrue(!(count >= 9));");
    let parsed = parse_source(&source).unwrap();
    let (call, _) = first_call(&parsed, "IsTrue");
    let (_, arguments) = call.as_invocation().unwrap();
    let ExprKind::Unary { operand, .. } = &arguments.arguments[0].expression.kind else {
        panic!("expected a unary expression");
    };
    let ExprKind::Binary { operator, left, .. } = &operand.unparenthesized().kind else {
        panic!("expected a binary expression");
    };
    assert_eq!(operator.as_str(), ">=");
    assert_eq!(render(left, &source), "count");
}

#[test]
fn test_initializer_roots_are_outside_method_bodies() {
    let source = "class Fixture\n{\n    bool flag = Check(1);\n    bool Check(int x) => x > 0;\n}\n";
    let parsed = parse_source(source).unwrap();
    let (_, root) = first_call(&parsed, "Check");
    assert!(!root.in_method_body);
}

#[test]
fn test_calls_inside_lambdas_are_roots() {
    let source = in_method("Assert.Multiple(() => { Assert.IsTrue(flag); });");
    let parsed = parse_source(&source).unwrap();
    let (_, root) = first_call(&parsed, "IsTrue");
    assert!(root.in_method_body);
    assert!(first_call(&parsed, "Multiple").1.in_method_body);
}

#[test]
fn test_statements_with_errors_are_flagged() {
    let source = in_method("Assert.IsTrue(flag flag);");
    let parsed = parse_source(&source).unwrap();
    let (_, root) = first_call(&parsed, "IsTrue");
    assert!(root.has_errors);
}

#[test]
fn test_declaration_arguments_need_out() {
    let source = in_method("Assert.AreEqual(2, value value);
        Parse(text, out int parsed);");
    let parsed = parse_source(&source).unwrap();
    assert!(first_call(&parsed, "AreEqual").1.has_errors);
    assert!(!first_call(&parsed, "Parse").1.has_errors);
}

#[test]
fn test_roots_are_ordered_by_position() {
    let source = in_method("First(); Second(); Third();");
    let parsed = parse_source(&source).unwrap();
    let names: Vec<&str> = parsed
        .tree
        .invocations()
        .iter()
        .filter_map(|(call, _)| call.trailing_name().map(|n| n.identifier.as_str()))
        .collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[test]
fn test_type_declarations() {
    let source = r#"
using System;

namespace Tests.Values
{
    public ref struct Buffer { }

    public struct MyFloat
    {
        public static implicit operator float(MyFloat value) => 0f;
    }

    public static class Extensions
    {
        public static bool Has(this string text, int count) => true;
    }

    public class Outer<T> : Base, IDisposable
    {
        public class Inner { }
        public T Value { get; set; }
        private const int Limit = 3;
        public void Dispose() { }
    }
}
"#;
    let parsed = parse_source(source).unwrap();
    let declarations = &parsed.declarations;
    assert_eq!(declarations.usings, vec!["System".to_string()]);
    assert!(declarations.namespaces.contains("Tests"));
    assert!(declarations.namespaces.contains("Tests.Values"));

    let find = |name: &str| declarations.types.iter().position(|t| t.name == name).unwrap();

    let buffer = &declarations.types[find("Buffer")];
    assert_eq!(buffer.kind, TypeKind::Struct);
    assert!(buffer.is_ref_like);
    assert_eq!(buffer.namespace, "Tests.Values");

    let my_float = &declarations.types[find("MyFloat")];
    assert!(!my_float.is_ref_like);
    assert_eq!(my_float.conversions.len(), 1);
    assert!(my_float.conversions[0].is_implicit);
    assert_eq!(
        my_float.conversions[0].target.kind,
        TypeSyntaxKind::Predefined("float".to_string())
    );

    let extensions = &declarations.types[find("Extensions")];
    assert!(extensions.is_static);
    assert!(extensions.methods[0].is_extension());

    let outer_index = find("Outer");
    let outer = &declarations.types[outer_index];
    assert_eq!(outer.type_parameters, vec!["T".to_string()]);
    assert_eq!(outer.bases.len(), 2);
    assert_eq!(outer.properties[0].name, "Value");
    assert!(outer.fields[0].is_const);
    assert!(outer.fields[0].is_static);

    let inner = &declarations.types[find("Inner")];
    assert_eq!(inner.outer, Some(outer_index));
    assert_eq!(declarations.container_of(find("Inner")), "Tests.Values.Outer");
}

#[test]
fn test_enum_members_are_constants() {
    let source = "namespace N { enum Color { Red, Green } }";
    let parsed = parse_source(source).unwrap();
    let color = &parsed.declarations.types[0];
    assert_eq!(color.kind, TypeKind::Enum);
    let names: Vec<&str> = color.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Red", "Green"]);
    assert!(color.fields.iter().all(|f| f.is_const));
}

#[test]
fn test_locals_and_parameters() {
    let source = "class Fixture\n{\n    void Test(int limit, params object[] args)\n    {\n        var items = new[] { 1, 2 };\n        foreach (var item in items) { Use(item); }\n        string text = null;\n    }\n}\n";
    let parsed = parse_source(source).unwrap();
    let declarations = &parsed.declarations;

    let body = declarations
        .bodies
        .iter()
        .find(|b| b.parameters.len() == 2)
        .unwrap();
    assert_eq!(body.parameters[0].name, "limit");
    assert!(body.parameters[1].is_params);

    let names: Vec<&str> = declarations.locals.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["items", "item", "text"]);
    assert!(declarations.locals[0].ty.is_none());
    assert!(matches!(declarations.locals[0].value, LocalValue::Initializer(_)));
    assert!(matches!(declarations.locals[1].value, LocalValue::ElementOf(_)));
    assert!(declarations.locals[2].ty.is_some());

    let use_start = source.find("Use(item)").unwrap();
    assert!(declarations.locals[1].scope.start <= use_start);
    assert!(declarations.locals[1].visible_from <= use_start);
}

#[test]
fn test_params_parameter_follows_the_others() {
    let source = "static class Checks\n{\n    public static void That(this bool condition, string message, params object[] args) { }\n}\n";
    let parsed = parse_source(source).unwrap();
    let method = &parsed.declarations.types[0].methods[0];
    let names: Vec<&str> = method.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["condition", "message", "args"]);
    assert!(method.parameters[0].is_this);
    assert!(!method.parameters[1].is_params);

    let args = &method.parameters[2];
    assert!(args.is_params);
    assert_eq!(
        args.ty.as_ref().map(|ty| render_type(ty, source)),
        Some("object[]".to_string())
    );
}
