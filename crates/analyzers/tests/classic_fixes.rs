//! Classic-model assertions and their constraint-model rewrites

mod common;

use common::{analyze, assert_fix, assert_no_diagnostic, document, single};
use nunit_analyzers::{
    ClassicRule, DiagnosticData, TRANSFORM_TO_CONSTRAINT_MODEL,
    TRANSFORM_TO_CONSTRAINT_MODEL_CONDENSED,
};
use nunit_analyzers_core::Severity;

const TRANSFORM: &str = TRANSFORM_TO_CONSTRAINT_MODEL;

#[test]
fn test_are_equal_is_reported_with_classic_message() {
    let document = document("", "ClassicAssert.AreEqual(2, value);");
    let diagnostics = analyze(&document);
    let diagnostic = single(&diagnostics, "NUnit2005");

    assert_eq!(
        diagnostic.span.text(document.source()),
        "ClassicAssert.AreEqual(2, value)"
    );
    assert_eq!(diagnostic.severity, Severity::Info);
    assert_eq!(
        diagnostic.message,
        "Consider using the constraint model, Assert.That(actual, Is.EqualTo(expected)), \
         instead of the classic model, ClassicAssert.AreEqual(expected, actual)"
    );
    assert_eq!(
        diagnostic.data,
        DiagnosticData::Classic {
            rule: ClassicRule::AreEqual,
            has_tolerance: false,
        }
    );
}

#[test]
fn test_are_equal_swaps_expected_and_actual() {
    assert_fix(
        "",
        "ClassicAssert.AreEqual(2, value);",
        "NUnit2005",
        TRANSFORM,
        "Assert.That(value, Is.EqualTo(2));",
    );
}

#[test]
fn test_assert_receiver_is_kept() {
    assert_fix(
        "",
        "Assert.AreNotEqual(2, value);",
        "NUnit2006",
        TRANSFORM,
        "Assert.That(value, Is.Not.EqualTo(2));",
    );
}

#[test]
fn test_tolerance_becomes_within() {
    let document = document("", "ClassicAssert.AreEqual(2d, measured, 0.1);");
    let diagnostics = analyze(&document);
    assert_eq!(
        single(&diagnostics, "NUnit2005").data,
        DiagnosticData::Classic {
            rule: ClassicRule::AreEqual,
            has_tolerance: true,
        }
    );

    assert_fix(
        "",
        "ClassicAssert.AreEqual(2d, measured, 0.1);",
        "NUnit2005",
        TRANSFORM,
        "Assert.That(measured, Is.EqualTo(2d).Within(0.1));",
    );
}

#[test]
fn test_property_constraints() {
    let cases = [
        ("ClassicAssert.IsNull(instance);", "NUnit2017", "Assert.That(instance, Is.Null);"),
        ("ClassicAssert.NotNull(instance);", "NUnit2018", "Assert.That(instance, Is.Not.Null);"),
        ("ClassicAssert.IsEmpty(text);", "NUnit2035", "Assert.That(text, Is.Empty);"),
        ("ClassicAssert.IsNotEmpty(numbers);", "NUnit2036", "Assert.That(numbers, Is.Not.Empty);"),
        ("ClassicAssert.IsNaN(measured);", "NUnit2034", "Assert.That(measured, Is.NaN);"),
        ("ClassicAssert.Zero(value);", "NUnit2032", "Assert.That(value, Is.Zero);"),
        ("ClassicAssert.Negative(value);", "NUnit2052", "Assert.That(value, Is.Negative);"),
        ("ClassicAssert.IsFalse(true);", "NUnit2002", "Assert.That(true, Is.False);"),
    ];
    for (before, id, after) in cases {
        assert_fix("", before, id, TRANSFORM, after);
    }
}

#[test]
fn test_comparison_methods_keep_argument_order() {
    assert_fix(
        "",
        "ClassicAssert.GreaterOrEqual(value, 3);",
        "NUnit2028",
        TRANSFORM,
        "Assert.That(value, Is.GreaterThanOrEqualTo(3));",
    );
}

#[test]
fn test_contains_becomes_has_member() {
    assert_fix(
        "",
        "ClassicAssert.Contains(2, numbers);",
        "NUnit2037",
        TRANSFORM,
        "Assert.That(numbers, Has.Member(2));",
    );
}

#[test]
fn test_type_checks() {
    assert_fix(
        "",
        "ClassicAssert.IsNotAssignableFrom(typeof(string), instance);",
        "NUnit2054",
        TRANSFORM,
        "Assert.That(instance, Is.Not.AssignableFrom(typeof(string)));",
    );
}

#[test]
fn test_generic_type_arguments_are_copied_verbatim() {
    let members = "    public class Wrapped<T> { }\n";
    assert_fix(
        members,
        "ClassicAssert.IsInstanceOf<Wrapped<Wrapped<int>>>(instance);",
        "NUnit2038",
        TRANSFORM,
        "Assert.That(instance, Is.InstanceOf<Wrapped<Wrapped<int>>>());",
    );
}

#[test]
fn test_format_arguments_become_interpolation() {
    assert_fix(
        "",
        r#"ClassicAssert.AreEqual(2, value, "Expected {0} but was {1}", 2, value);"#,
        "NUnit2005",
        TRANSFORM,
        r#"Assert.That(value, Is.EqualTo(2), $"Expected {2} but was {value}");"#,
    );
}

#[test]
fn test_named_arguments_in_any_order() {
    assert_fix(
        "",
        r#"ClassicAssert.Positive(args: new[] { "a", "b" }, message: "{0},{1}", actual: value);"#,
        "NUnit2051",
        TRANSFORM,
        r#"Assert.That(value, Is.Positive, $"{"a"},{"b"}");"#,
    );
}

#[test]
fn test_non_literal_message_uses_string_format() {
    assert_fix(
        "",
        "string template = \"{0}\";\n            ClassicAssert.IsNull(instance, template, value);",
        "NUnit2017",
        TRANSFORM,
        "string template = \"{0}\";\n            Assert.That(instance, Is.Null, string.Format(template, value));",
    );
}

#[test]
fn test_empty_format_clause_uses_string_format() {
    assert_fix(
        "",
        r#"ClassicAssert.IsNull(instance, "{0:}", value);"#,
        "NUnit2017",
        TRANSFORM,
        r#"Assert.That(instance, Is.Null, string.Format("{0:}", value));"#,
    );
}

#[test]
fn test_null_message_is_dropped() {
    assert_fix(
        "",
        "ClassicAssert.IsNotNull(instance, null);",
        "NUnit2019",
        TRANSFORM,
        "Assert.That(instance, Is.Not.Null);",
    );
}

#[test]
fn test_line_break_before_message_survives() {
    assert_fix(
        "",
        "ClassicAssert.AreEqual(2, value,\n                \"values differ\");",
        "NUnit2005",
        TRANSFORM,
        "Assert.That(value, Is.EqualTo(2),\n                \"values differ\");",
    );
}

#[test]
fn test_user_defined_conversions_become_casts() {
    let members =
        "    public struct MyFloat\n    {\n        public static implicit operator float(MyFloat value) => 0f;\n    }\n";
    let setup = "MyFloat left = default;\n            MyFloat right = default;\n            ";
    assert_fix(
        members,
        &format!("{setup}ClassicAssert.Greater(left, right);"),
        "NUnit2027",
        TRANSFORM,
        &format!("{setup}Assert.That((float)left, Is.GreaterThan((float)right));"),
    );
}

#[test]
fn test_only_converted_arguments_get_casts() {
    let members =
        "    public struct MyFloat\n    {\n        public static implicit operator float(MyFloat value) => 0f;\n    }\n";
    let setup = "MyFloat left = default;\n            float limit = 1f;\n            ";
    assert_fix(
        members,
        &format!("{setup}ClassicAssert.Greater(left, limit);"),
        "NUnit2027",
        TRANSFORM,
        &format!("{setup}Assert.That((float)left, Is.GreaterThan(limit));"),
    );
}

#[test]
fn test_user_defined_string_conversion_becomes_cast() {
    let members =
        "    public struct MyString\n    {\n        public static implicit operator string(MyString value) => \"\";\n    }\n";
    let setup = "MyString s = default;\n            ";
    assert_fix(
        members,
        &format!("{setup}ClassicAssert.IsEmpty(s);"),
        "NUnit2035",
        TRANSFORM,
        &format!("{setup}Assert.That((string)s, Is.Empty);"),
    );
}

#[test]
fn test_is_true_offers_condensed_fix() {
    assert_fix(
        "",
        "ClassicAssert.IsTrue(value > 0);",
        "NUnit2003",
        TRANSFORM,
        "Assert.That(value > 0, Is.True);",
    );
    assert_fix(
        "",
        "ClassicAssert.IsTrue(value > 0);",
        "NUnit2003",
        TRANSFORM_TO_CONSTRAINT_MODEL_CONDENSED,
        "Assert.That(value > 0);",
    );
}

#[test]
fn test_user_assert_type_is_not_reported() {
    let members = "    public static class Assert\n    {\n        public static void AreEqual(object expected, object actual) { }\n    }\n";
    assert_no_diagnostic(members, "Assert.AreEqual(1, 2);", "NUnit2005");
}
