//! Boolean conditions rewritten into equality, comparison, string and
//! collection constraints

mod common;

use common::{analyze, assert_fix, assert_no_diagnostic, document, single};
use nunit_analyzers::{ConditionRule, DiagnosticData};

const EQUALITY: &str = "NUnit2010";
const COMPARISON: &str = "NUnit2043";

/// Asserts the reported constraint and the rewrite of a single condition call
fn check(id: &str, rule: ConditionRule, before: &str, constraint: &str, after: &str) {
    let document = document("", before);
    let diagnostics = analyze(&document);
    let diagnostic = single(&diagnostics, id);
    assert_eq!(
        diagnostic.message,
        diagnostic.descriptor.message_format.replace("{0}", constraint),
        "{before}"
    );
    match &diagnostic.data {
        DiagnosticData::Condition {
            rule: reported,
            constraint: reported_constraint,
            ..
        } => {
            assert_eq!(*reported, rule, "{before}");
            assert_eq!(*reported_constraint, constraint, "{before}");
        }
        other => panic!("unexpected data {other:?} for {before}"),
    }
    assert_fix("", before, id, rule.equivalence_key(), after);
}

#[test]
fn test_equality_negation_parity() {
    let cases = [
        ("Assert.That(value == 2);", "Is.EqualTo"),
        ("Assert.That(value != 2);", "Is.Not.EqualTo"),
        ("Assert.That(!(value == 2));", "Is.Not.EqualTo"),
        ("Assert.That(value == 2, Is.True);", "Is.EqualTo"),
        ("Assert.That(value == 2, Is.False);", "Is.Not.EqualTo"),
        ("Assert.That(!(value != 2), Is.False);", "Is.Not.EqualTo"),
        ("ClassicAssert.IsTrue(value != 2);", "Is.Not.EqualTo"),
        ("ClassicAssert.IsFalse(value != 2);", "Is.EqualTo"),
        ("ClassicAssert.False(!(value == 2));", "Is.EqualTo"),
    ];
    for (before, constraint) in cases {
        let after = format!("Assert.That(value, {constraint}(2));");
        check(EQUALITY, ConditionRule::EqualConstraint, before, constraint, &after);
    }
}

#[test]
fn test_equals_calls() {
    check(
        EQUALITY,
        ConditionRule::EqualConstraint,
        "Assert.That(value.Equals(2));",
        "Is.EqualTo",
        "Assert.That(value, Is.EqualTo(2));",
    );
    check(
        EQUALITY,
        ConditionRule::EqualConstraint,
        "ClassicAssert.IsFalse(object.Equals(instance, text));",
        "Is.Not.EqualTo",
        "Assert.That(instance, Is.Not.EqualTo(text));",
    );
}

#[test]
fn test_other_constraints_as_second_argument_are_ignored() {
    assert_no_diagnostic("", "Assert.That(value == 2, Is.Not.Null);", EQUALITY);
}

#[test]
fn test_ref_like_operands_are_ignored() {
    let body = "Span<int> span = default;\n            Assert.That(span == span);";
    assert_no_diagnostic("", body, EQUALITY);
}

#[test]
fn test_ref_like_operands_are_ignored_with_is_true() {
    let body = "Span<int> first = default;\n            Span<int> second = default;\n            Assert.That(first == second, Is.True);";
    assert_no_diagnostic("", body, EQUALITY);
}

const METER: &str = "    public struct Meter\n    {\n        public static bool operator >(Meter a, Meter b) => true;\n        public static bool operator <(Meter a, Meter b) => false;\n    }\n";

#[test]
fn test_ref_like_comparisons_are_ignored() {
    let body = "Meter a = default;\n            Meter b = default;\n            Assert.That(a > b);";
    let ref_meter = METER.replace("public struct", "public ref struct");
    assert_no_diagnostic(&ref_meter, body, COMPARISON);

    let document = document(METER, body);
    single(&analyze(&document), COMPARISON);
}

#[test]
fn test_comparison_negated_through_is_false() {
    let cases = [
        ("Assert.That(value > 9, Is.False);", "Is.LessThanOrEqualTo"),
        ("Assert.That(9 > value, Is.False);", "Is.GreaterThanOrEqualTo"),
        ("Assert.That(!(9 > value), Is.False);", "Is.LessThan"),
        ("ClassicAssert.IsFalse(!!(9 > value));", "Is.GreaterThanOrEqualTo"),
    ];
    for (before, constraint) in cases {
        let after = format!("Assert.That(value, {constraint}(9));");
        check(COMPARISON, ConditionRule::Comparison, before, constraint, &after);
    }
}

#[test]
fn test_comparisons_with_swapped_and_negated_operands() {
    let cases = [
        ("value > 9", false, "Is.GreaterThan"),
        ("value >= 9", false, "Is.GreaterThanOrEqualTo"),
        ("value < 9", false, "Is.LessThan"),
        ("value <= 9", false, "Is.LessThanOrEqualTo"),
        ("9 > value", false, "Is.LessThan"),
        ("9 >= value", false, "Is.LessThanOrEqualTo"),
        ("9 < value", false, "Is.GreaterThan"),
        ("9 <= value", false, "Is.GreaterThanOrEqualTo"),
        ("value > 9", true, "Is.LessThanOrEqualTo"),
        ("value >= 9", true, "Is.LessThan"),
        ("value < 9", true, "Is.GreaterThanOrEqualTo"),
        ("value <= 9", true, "Is.GreaterThan"),
        ("9 > value", true, "Is.GreaterThanOrEqualTo"),
        ("9 >= value", true, "Is.GreaterThan"),
        ("9 < value", true, "Is.LessThanOrEqualTo"),
        ("9 <= value", true, "Is.LessThan"),
    ];
    for (condition, negated, constraint) in cases {
        let before = if negated {
            format!("ClassicAssert.IsFalse({condition});")
        } else {
            format!("Assert.That({condition});")
        };
        let after = format!("Assert.That(value, {constraint}(9));");
        check(COMPARISON, ConditionRule::Comparison, &before, constraint, &after);
    }
}

#[test]
fn test_swap_is_recorded() {
    let document = document("", "Assert.That(9 > value);");
    let diagnostics = analyze(&document);
    assert!(matches!(
        single(&diagnostics, COMPARISON).data,
        DiagnosticData::Condition {
            swap_operands: true,
            ..
        }
    ));
}

#[test]
fn test_string_methods() {
    check(
        "NUnit2011",
        ConditionRule::StringContains,
        r#"Assert.That(text.Contains("a"));"#,
        "Does.Contain",
        r#"Assert.That(text, Does.Contain("a"));"#,
    );
    check(
        "NUnit2012",
        ConditionRule::StringStartsWith,
        r#"Assert.That(!text.StartsWith("a"));"#,
        "Does.Not.StartWith",
        r#"Assert.That(text, Does.Not.StartWith("a"));"#,
    );
    check(
        "NUnit2013",
        ConditionRule::StringEndsWith,
        r#"ClassicAssert.IsFalse(text.EndsWith("a"));"#,
        "Does.Not.EndWith",
        r#"Assert.That(text, Does.Not.EndWith("a"));"#,
    );
}

#[test]
fn test_string_comparison_overloads_are_ignored() {
    assert_no_diagnostic(
        "",
        r#"Assert.That(text.Contains("a", StringComparison.Ordinal));"#,
        "NUnit2011",
    );
}

#[test]
fn test_collection_contains() {
    check(
        "NUnit2014",
        ConditionRule::CollectionContains,
        "Assert.That(numbers.Contains(2));",
        "Does.Contain",
        "Assert.That(numbers, Does.Contain(2));",
    );
    check(
        "NUnit2014",
        ConditionRule::CollectionContains,
        "ClassicAssert.IsFalse(Enumerable.Contains(numbers, 2));",
        "Does.Not.Contain",
        "Assert.That(numbers, Does.Not.Contain(2));",
    );
}

#[test]
fn test_reduced_linq_contains() {
    let setup = "int[] values = new[] { 1, 2 };\n            ";
    assert_fix(
        "",
        &format!("{setup}Assert.That(values.Contains(1));"),
        "NUnit2014",
        ConditionRule::CollectionContains.equivalence_key(),
        &format!("{setup}Assert.That(values, Does.Contain(1));"),
    );
}

#[test]
fn test_message_follows_the_rewrite() {
    assert_fix(
        "",
        r#"Assert.That(value == 2, "value was {0}", value);"#,
        EQUALITY,
        ConditionRule::EqualConstraint.equivalence_key(),
        r#"Assert.That(value, Is.EqualTo(2), $"value was {value}");"#,
    );
}
