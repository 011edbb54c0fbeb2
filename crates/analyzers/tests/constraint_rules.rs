//! Rules that inspect constraint-model calls: invalid `Is.Null`, `SameAs` on
//! value types and format-string messages

mod common;

use common::{actions, analyze, assert_fix, assert_no_diagnostic, document, ids, single};
use nunit_analyzers::{CONVERT_TO_INTERPOLATABLE_STRING, USE_IS_EQUAL_TO};
use nunit_analyzers_core::Severity;

const NULL_CONSTRAINT: &str = "NUnit2023";
const SAME_AS: &str = "NUnit2040";
const FORMAT_STRING: &str = "NUnit2050";

#[test]
fn test_null_constraint_on_value_type() {
    let document = document("", "Assert.That(value, Is.Null);");
    let diagnostics = analyze(&document);
    let diagnostic = single(&diagnostics, NULL_CONSTRAINT);

    assert_eq!(diagnostic.span.text(document.source()), "Is.Null");
    assert_eq!(diagnostic.severity, Severity::Error);
    assert!(actions(&document, diagnostic).is_empty());
}

#[test]
fn test_negated_null_constraint_on_value_type() {
    let document = document("", "Assert.That(value, Is.Not.Null);");
    assert_eq!(ids(&analyze(&document)), vec![NULL_CONSTRAINT]);
}

#[test]
fn test_null_constraint_on_nullable_types_is_valid() {
    assert_no_diagnostic("", "Assert.That(text, Is.Null);", NULL_CONSTRAINT);
    assert_no_diagnostic(
        "",
        "int? maybe = null;\n            Assert.That(maybe, Is.Null);",
        NULL_CONSTRAINT,
    );
}

#[test]
fn test_null_constraint_behind_a_prefix_is_not_reported() {
    assert_no_diagnostic("", "Assert.That(numbers, Has.Some.Null);", NULL_CONSTRAINT);
}

#[test]
fn test_unknown_constraint_expressions_abstain() {
    assert_no_diagnostic(
        "",
        "var constraint = Is.Null;\n            Assert.That(value, constraint);",
        NULL_CONSTRAINT,
    );
}

#[test]
fn test_same_as_on_value_type() {
    let document = document("", "Assert.That(value, Is.SameAs(2));");
    let diagnostics = analyze(&document);
    let diagnostic = single(&diagnostics, SAME_AS);
    assert_eq!(diagnostic.span.text(document.source()), "Is.SameAs(2)");

    let actions = actions(&document, diagnostic);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].title, "Use Is.EqualTo");

    assert_fix(
        "",
        "Assert.That(value, Is.SameAs(2));",
        SAME_AS,
        USE_IS_EQUAL_TO,
        "Assert.That(value, Is.EqualTo(2));",
    );
    assert_fix(
        "",
        "Assert.That(value, Is.Not.SameAs(2));",
        SAME_AS,
        USE_IS_EQUAL_TO,
        "Assert.That(value, Is.Not.EqualTo(2));",
    );
}

#[test]
fn test_same_as_on_references_is_valid() {
    assert_no_diagnostic("", "Assert.That(instance, Is.SameAs(text));", SAME_AS);
}

#[test]
fn test_classic_are_same_on_value_types() {
    assert_fix(
        "",
        "ClassicAssert.AreSame(2, value);",
        SAME_AS,
        USE_IS_EQUAL_TO,
        "ClassicAssert.AreEqual(2, value);",
    );
    assert_fix(
        "",
        "ClassicAssert.AreNotSame(2, value);",
        SAME_AS,
        USE_IS_EQUAL_TO,
        "ClassicAssert.AreNotEqual(2, value);",
    );
}

#[test]
fn test_format_string_message_is_interpolated() {
    let document = document("", r#"Assert.That(value, Is.EqualTo(2), "{0} != {1}", value, 2);"#);
    let diagnostics = analyze(&document);
    assert_eq!(single(&diagnostics, FORMAT_STRING).severity, Severity::Info);

    assert_fix(
        "",
        r#"Assert.That(value, Is.EqualTo(2), "{0} != {1}", value, 2);"#,
        FORMAT_STRING,
        CONVERT_TO_INTERPOLATABLE_STRING,
        r#"Assert.That(value, Is.EqualTo(2), $"{value} != {2}");"#,
    );
}

#[test]
fn test_plain_messages_and_classic_calls_are_not_reported() {
    assert_no_diagnostic("", r#"Assert.That(value, Is.EqualTo(2), "plain");"#, FORMAT_STRING);
    assert_no_diagnostic(
        "",
        r#"ClassicAssert.AreEqual(2, value, "got {0}", value);"#,
        FORMAT_STRING,
    );
}
