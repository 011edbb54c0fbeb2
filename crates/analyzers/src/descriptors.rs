//! Descriptors for every diagnostic the analyzers report

use nunit_analyzers_core::{Category, DiagnosticDescriptor, Severity};

macro_rules! classic_usage {
    ($name:ident, $id:literal, $constraint:literal, $classic:literal) => {
        pub const $name: DiagnosticDescriptor = DiagnosticDescriptor {
            id: $id,
            title: concat!("Consider using ", $constraint, " instead of ", $classic),
            message_format: concat!(
                "Consider using the constraint model, ",
                $constraint,
                ", instead of the classic model, ",
                $classic
            ),
            description: concat!(
                "Consider using the constraint model, ",
                $constraint,
                ", instead of the classic model, ",
                $classic,
                "."
            ),
            category: Category::Assertion,
            default_severity: Severity::Info,
            enabled_by_default: true,
        };
    };
}

macro_rules! rule {
    ($name:ident, $id:literal, $severity:ident, $title:literal, $message:literal, $description:literal) => {
        pub const $name: DiagnosticDescriptor = DiagnosticDescriptor {
            id: $id,
            title: $title,
            message_format: $message,
            description: $description,
            category: Category::Assertion,
            default_severity: Severity::$severity,
            enabled_by_default: true,
        };
    };
}

classic_usage!(FALSE_USAGE, "NUnit2001", "Assert.That(expr, Is.False)", "ClassicAssert.False(expr)");
classic_usage!(IS_FALSE_USAGE, "NUnit2002", "Assert.That(expr, Is.False)", "ClassicAssert.IsFalse(expr)");
classic_usage!(IS_TRUE_USAGE, "NUnit2003", "Assert.That(expr, Is.True)", "ClassicAssert.IsTrue(expr)");
classic_usage!(TRUE_USAGE, "NUnit2004", "Assert.That(expr, Is.True)", "ClassicAssert.True(expr)");
classic_usage!(
    ARE_EQUAL_USAGE,
    "NUnit2005",
    "Assert.That(actual, Is.EqualTo(expected))",
    "ClassicAssert.AreEqual(expected, actual)"
);
classic_usage!(
    ARE_NOT_EQUAL_USAGE,
    "NUnit2006",
    "Assert.That(actual, Is.Not.EqualTo(expected))",
    "ClassicAssert.AreNotEqual(expected, actual)"
);
classic_usage!(
    ARE_SAME_USAGE,
    "NUnit2015",
    "Assert.That(actual, Is.SameAs(expected))",
    "ClassicAssert.AreSame(expected, actual)"
);
classic_usage!(NULL_USAGE, "NUnit2016", "Assert.That(expr, Is.Null)", "ClassicAssert.Null(expr)");
classic_usage!(IS_NULL_USAGE, "NUnit2017", "Assert.That(expr, Is.Null)", "ClassicAssert.IsNull(expr)");
classic_usage!(NOT_NULL_USAGE, "NUnit2018", "Assert.That(expr, Is.Not.Null)", "ClassicAssert.NotNull(expr)");
classic_usage!(
    IS_NOT_NULL_USAGE,
    "NUnit2019",
    "Assert.That(expr, Is.Not.Null)",
    "ClassicAssert.IsNotNull(expr)"
);
classic_usage!(
    GREATER_USAGE,
    "NUnit2027",
    "Assert.That(actual, Is.GreaterThan(expected))",
    "ClassicAssert.Greater(actual, expected)"
);
classic_usage!(
    GREATER_OR_EQUAL_USAGE,
    "NUnit2028",
    "Assert.That(actual, Is.GreaterThanOrEqualTo(expected))",
    "ClassicAssert.GreaterOrEqual(actual, expected)"
);
classic_usage!(
    LESS_USAGE,
    "NUnit2029",
    "Assert.That(actual, Is.LessThan(expected))",
    "ClassicAssert.Less(actual, expected)"
);
classic_usage!(
    LESS_OR_EQUAL_USAGE,
    "NUnit2030",
    "Assert.That(actual, Is.LessThanOrEqualTo(expected))",
    "ClassicAssert.LessOrEqual(actual, expected)"
);
classic_usage!(
    ARE_NOT_SAME_USAGE,
    "NUnit2031",
    "Assert.That(actual, Is.Not.SameAs(expected))",
    "ClassicAssert.AreNotSame(expected, actual)"
);
classic_usage!(ZERO_USAGE, "NUnit2032", "Assert.That(expr, Is.Zero)", "ClassicAssert.Zero(expr)");
classic_usage!(NOT_ZERO_USAGE, "NUnit2033", "Assert.That(expr, Is.Not.Zero)", "ClassicAssert.NotZero(expr)");
classic_usage!(IS_NAN_USAGE, "NUnit2034", "Assert.That(expr, Is.NaN)", "ClassicAssert.IsNaN(expr)");
classic_usage!(IS_EMPTY_USAGE, "NUnit2035", "Assert.That(collection, Is.Empty)", "ClassicAssert.IsEmpty(collection)");
classic_usage!(
    IS_NOT_EMPTY_USAGE,
    "NUnit2036",
    "Assert.That(collection, Is.Not.Empty)",
    "ClassicAssert.IsNotEmpty(collection)"
);
classic_usage!(
    CONTAINS_USAGE,
    "NUnit2037",
    "Assert.That(collection, Has.Member(instance))",
    "ClassicAssert.Contains(instance, collection)"
);
classic_usage!(
    IS_INSTANCE_OF_USAGE,
    "NUnit2038",
    "Assert.That(actual, Is.InstanceOf(expected))",
    "ClassicAssert.IsInstanceOf(expected, actual)"
);
classic_usage!(
    IS_NOT_INSTANCE_OF_USAGE,
    "NUnit2039",
    "Assert.That(actual, Is.Not.InstanceOf(expected))",
    "ClassicAssert.IsNotInstanceOf(expected, actual)"
);
classic_usage!(POSITIVE_USAGE, "NUnit2051", "Assert.That(expr, Is.Positive)", "ClassicAssert.Positive(expr)");
classic_usage!(NEGATIVE_USAGE, "NUnit2052", "Assert.That(expr, Is.Negative)", "ClassicAssert.Negative(expr)");
classic_usage!(
    IS_ASSIGNABLE_FROM_USAGE,
    "NUnit2053",
    "Assert.That(actual, Is.AssignableFrom(expected))",
    "ClassicAssert.IsAssignableFrom(expected, actual)"
);
classic_usage!(
    IS_NOT_ASSIGNABLE_FROM_USAGE,
    "NUnit2054",
    "Assert.That(actual, Is.Not.AssignableFrom(expected))",
    "ClassicAssert.IsNotAssignableFrom(expected, actual)"
);

rule!(
    EQUAL_CONSTRAINT_USAGE,
    "NUnit2010",
    Info,
    "Use EqualConstraint for better assertion messages in case of failure",
    "Use {0} constraint instead of direct comparison",
    "Using constraints instead of boolean methods will lead to better assertion messages in case of failure."
);
rule!(
    STRING_CONTAINS_CONSTRAINT_USAGE,
    "NUnit2011",
    Info,
    "Use ContainsConstraint for better assertion messages in case of failure",
    "Use {0} constraint instead of direct method",
    "Using constraints instead of boolean methods will lead to better assertion messages in case of failure."
);
rule!(
    STRING_STARTS_WITH_CONSTRAINT_USAGE,
    "NUnit2012",
    Info,
    "Use StartsWithConstraint for better assertion messages in case of failure",
    "Use {0} constraint instead of direct method",
    "Using constraints instead of boolean methods will lead to better assertion messages in case of failure."
);
rule!(
    STRING_ENDS_WITH_CONSTRAINT_USAGE,
    "NUnit2013",
    Info,
    "Use EndsWithConstraint for better assertion messages in case of failure",
    "Use {0} constraint instead of direct method",
    "Using constraints instead of boolean methods will lead to better assertion messages in case of failure."
);
rule!(
    COLLECTION_CONTAINS_CONSTRAINT_USAGE,
    "NUnit2014",
    Info,
    "Use SomeItemsConstraint for better assertion messages in case of failure",
    "Use {0} constraint instead of direct method",
    "Using constraints instead of boolean methods will lead to better assertion messages in case of failure."
);
rule!(
    NULL_CONSTRAINT_USAGE,
    "NUnit2023",
    Error,
    "Invalid NullConstraint usage",
    "NullConstraint is allowed only for reference types or nullable value types",
    "The actual value of a NullConstraint must be a reference type or a nullable value type."
);
rule!(
    SAME_AS_ON_VALUE_TYPES,
    "NUnit2040",
    Error,
    "Non-reference types for SameAs constraint",
    "The SameAs constraint always fails on value types as the actual and the expected value cannot be the same reference",
    "Value types are boxed separately, so the actual and the expected value are never the same reference."
);
rule!(
    COMPARISON_CONSTRAINT_USAGE,
    "NUnit2043",
    Info,
    "Use ComparisonConstraint for better assertion messages in case of failure",
    "Use {0} constraint instead of direct comparison",
    "Using constraints instead of boolean methods will lead to better assertion messages in case of failure."
);
rule!(
    UPDATE_STRING_FORMAT_TO_INTERPOLATABLE_STRING,
    "NUnit2050",
    Info,
    "NUnit 4 no longer supports string.Format specification",
    "Replace format specification and params with interpolatable string",
    "The message and params arguments are replaced by a single interpolated string message."
);

/// Every descriptor, in id order
pub static ALL: &[&DiagnosticDescriptor] = &[
    &FALSE_USAGE,
    &IS_FALSE_USAGE,
    &IS_TRUE_USAGE,
    &TRUE_USAGE,
    &ARE_EQUAL_USAGE,
    &ARE_NOT_EQUAL_USAGE,
    &EQUAL_CONSTRAINT_USAGE,
    &STRING_CONTAINS_CONSTRAINT_USAGE,
    &STRING_STARTS_WITH_CONSTRAINT_USAGE,
    &STRING_ENDS_WITH_CONSTRAINT_USAGE,
    &COLLECTION_CONTAINS_CONSTRAINT_USAGE,
    &ARE_SAME_USAGE,
    &NULL_USAGE,
    &IS_NULL_USAGE,
    &NOT_NULL_USAGE,
    &IS_NOT_NULL_USAGE,
    &NULL_CONSTRAINT_USAGE,
    &GREATER_USAGE,
    &GREATER_OR_EQUAL_USAGE,
    &LESS_USAGE,
    &LESS_OR_EQUAL_USAGE,
    &ARE_NOT_SAME_USAGE,
    &ZERO_USAGE,
    &NOT_ZERO_USAGE,
    &IS_NAN_USAGE,
    &IS_EMPTY_USAGE,
    &IS_NOT_EMPTY_USAGE,
    &CONTAINS_USAGE,
    &IS_INSTANCE_OF_USAGE,
    &IS_NOT_INSTANCE_OF_USAGE,
    &SAME_AS_ON_VALUE_TYPES,
    &COMPARISON_CONSTRAINT_USAGE,
    &UPDATE_STRING_FORMAT_TO_INTERPOLATABLE_STRING,
    &POSITIVE_USAGE,
    &NEGATIVE_USAGE,
    &IS_ASSIGNABLE_FROM_USAGE,
    &IS_NOT_ASSIGNABLE_FROM_USAGE,
];

pub fn by_id(id: &str) -> Option<&'static DiagnosticDescriptor> {
    ALL.iter()
        .copied()
        .find(|descriptor| descriptor.id.eq_ignore_ascii_case(id))
}

/// Ids of every descriptor, for validating configuration keys
pub fn ids() -> Vec<&'static str> {
    ALL.iter().map(|descriptor| descriptor.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let ids = ids();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, ids);
    }

    #[test]
    fn test_classic_message_names_both_models() {
        assert_eq!(
            ARE_EQUAL_USAGE.format_message(&[]),
            "Consider using the constraint model, Assert.That(actual, Is.EqualTo(expected)), \
             instead of the classic model, ClassicAssert.AreEqual(expected, actual)"
        );
        assert_eq!(
            ARE_EQUAL_USAGE.title,
            "Consider using Assert.That(actual, Is.EqualTo(expected)) instead of ClassicAssert.AreEqual(expected, actual)"
        );
    }

    #[test]
    fn test_lookup_by_id_ignores_case() {
        assert_eq!(by_id("nunit2043").map(|d| d.id), Some("NUnit2043"));
        assert!(by_id("NUnit9999").is_none());
    }

    #[test]
    fn test_supplemented_rules_are_errors() {
        assert_eq!(NULL_CONSTRAINT_USAGE.default_severity, Severity::Error);
        assert_eq!(SAME_AS_ON_VALUE_TYPES.default_severity, Severity::Error);
        assert_eq!(
            UPDATE_STRING_FORMAT_TO_INTERPOLATABLE_STRING.default_severity,
            Severity::Info
        );
    }
}
