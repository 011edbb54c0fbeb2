//! Classic-model assertions that have a direct constraint-model equivalent

use super::{DiagnosticData, Finding};
use crate::catalog::parameters::{
    ACTUAL, AN_OBJECT, ARG1, ARG2, A_DOUBLE, A_STRING, COLLECTION, CONDITION, DELTA, EXPECTED,
};
use crate::classifier::InvocationShape;
use crate::descriptors;
use nunit_analyzers_core::DiagnosticDescriptor;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::trace;

/// One rule per classic method; the variant name is the method name
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum ClassicRule {
    False,
    IsFalse,
    IsTrue,
    True,
    AreEqual,
    AreNotEqual,
    AreSame,
    Null,
    IsNull,
    NotNull,
    IsNotNull,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    AreNotSame,
    Zero,
    NotZero,
    IsNaN,
    IsEmpty,
    IsNotEmpty,
    Contains,
    IsInstanceOf,
    IsNotInstanceOf,
    Positive,
    Negative,
    IsAssignableFrom,
    IsNotAssignableFrom,
}

/// How a classic call maps onto `Assert.That(actual, constraint)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// A constraint property such as `Is.Not.Null`
    Property {
        /// Candidate parameter names for the actual value; overloads differ
        actual: &'static [&'static str],
        chain: &'static [&'static str],
    },
    /// A constraint method taking the expected value, such as `Is.EqualTo(expected)`
    Call {
        actual: &'static str,
        expected: &'static str,
        chain: &'static [&'static str],
    },
    /// `chain(expected)`, or `chain<T>()` for the generic overload
    TypeCheck { chain: &'static [&'static str] },
}

impl Replacement {
    pub fn actual_parameters(&self) -> &[&'static str] {
        match self {
            Self::Property { actual, .. } => actual,
            Self::Call { actual, .. } => std::slice::from_ref(actual),
            Self::TypeCheck { .. } => &[ACTUAL],
        }
    }

    pub fn chain(&self) -> &'static [&'static str] {
        match self {
            Self::Property { chain, .. } | Self::Call { chain, .. } | Self::TypeCheck { chain } => {
                *chain
            }
        }
    }
}

impl ClassicRule {
    pub fn from_method(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    pub fn method_name(self) -> &'static str {
        self.into()
    }

    pub fn descriptor(self) -> &'static DiagnosticDescriptor {
        match self {
            Self::False => &descriptors::FALSE_USAGE,
            Self::IsFalse => &descriptors::IS_FALSE_USAGE,
            Self::IsTrue => &descriptors::IS_TRUE_USAGE,
            Self::True => &descriptors::TRUE_USAGE,
            Self::AreEqual => &descriptors::ARE_EQUAL_USAGE,
            Self::AreNotEqual => &descriptors::ARE_NOT_EQUAL_USAGE,
            Self::AreSame => &descriptors::ARE_SAME_USAGE,
            Self::Null => &descriptors::NULL_USAGE,
            Self::IsNull => &descriptors::IS_NULL_USAGE,
            Self::NotNull => &descriptors::NOT_NULL_USAGE,
            Self::IsNotNull => &descriptors::IS_NOT_NULL_USAGE,
            Self::Greater => &descriptors::GREATER_USAGE,
            Self::GreaterOrEqual => &descriptors::GREATER_OR_EQUAL_USAGE,
            Self::Less => &descriptors::LESS_USAGE,
            Self::LessOrEqual => &descriptors::LESS_OR_EQUAL_USAGE,
            Self::AreNotSame => &descriptors::ARE_NOT_SAME_USAGE,
            Self::Zero => &descriptors::ZERO_USAGE,
            Self::NotZero => &descriptors::NOT_ZERO_USAGE,
            Self::IsNaN => &descriptors::IS_NAN_USAGE,
            Self::IsEmpty => &descriptors::IS_EMPTY_USAGE,
            Self::IsNotEmpty => &descriptors::IS_NOT_EMPTY_USAGE,
            Self::Contains => &descriptors::CONTAINS_USAGE,
            Self::IsInstanceOf => &descriptors::IS_INSTANCE_OF_USAGE,
            Self::IsNotInstanceOf => &descriptors::IS_NOT_INSTANCE_OF_USAGE,
            Self::Positive => &descriptors::POSITIVE_USAGE,
            Self::Negative => &descriptors::NEGATIVE_USAGE,
            Self::IsAssignableFrom => &descriptors::IS_ASSIGNABLE_FROM_USAGE,
            Self::IsNotAssignableFrom => &descriptors::IS_NOT_ASSIGNABLE_FROM_USAGE,
        }
    }

    /// `IsTrue`/`True` also offer the bare `Assert.That(condition)` form
    pub fn has_condensed_fix(self) -> bool {
        matches!(self, Self::IsTrue | Self::True)
    }

    pub fn replacement(self) -> Replacement {
        use Replacement::{Call, Property, TypeCheck};
        match self {
            Self::False | Self::IsFalse => Property {
                actual: &[CONDITION],
                chain: &["Is", "False"],
            },
            Self::IsTrue | Self::True => Property {
                actual: &[CONDITION],
                chain: &["Is", "True"],
            },
            Self::AreEqual => Call {
                actual: ACTUAL,
                expected: EXPECTED,
                chain: &["Is", "EqualTo"],
            },
            Self::AreNotEqual => Call {
                actual: ACTUAL,
                expected: EXPECTED,
                chain: &["Is", "Not", "EqualTo"],
            },
            Self::AreSame => Call {
                actual: ACTUAL,
                expected: EXPECTED,
                chain: &["Is", "SameAs"],
            },
            Self::AreNotSame => Call {
                actual: ACTUAL,
                expected: EXPECTED,
                chain: &["Is", "Not", "SameAs"],
            },
            Self::Null | Self::IsNull => Property {
                actual: &[AN_OBJECT],
                chain: &["Is", "Null"],
            },
            Self::NotNull | Self::IsNotNull => Property {
                actual: &[AN_OBJECT],
                chain: &["Is", "Not", "Null"],
            },
            Self::Greater => Call {
                actual: ARG1,
                expected: ARG2,
                chain: &["Is", "GreaterThan"],
            },
            Self::GreaterOrEqual => Call {
                actual: ARG1,
                expected: ARG2,
                chain: &["Is", "GreaterThanOrEqualTo"],
            },
            Self::Less => Call {
                actual: ARG1,
                expected: ARG2,
                chain: &["Is", "LessThan"],
            },
            Self::LessOrEqual => Call {
                actual: ARG1,
                expected: ARG2,
                chain: &["Is", "LessThanOrEqualTo"],
            },
            Self::Zero => Property {
                actual: &[ACTUAL],
                chain: &["Is", "Zero"],
            },
            Self::NotZero => Property {
                actual: &[ACTUAL],
                chain: &["Is", "Not", "Zero"],
            },
            Self::IsNaN => Property {
                actual: &[A_DOUBLE],
                chain: &["Is", "NaN"],
            },
            Self::Positive => Property {
                actual: &[ACTUAL],
                chain: &["Is", "Positive"],
            },
            Self::Negative => Property {
                actual: &[ACTUAL],
                chain: &["Is", "Negative"],
            },
            Self::IsEmpty => Property {
                actual: &[A_STRING, COLLECTION],
                chain: &["Is", "Empty"],
            },
            Self::IsNotEmpty => Property {
                actual: &[A_STRING, COLLECTION],
                chain: &["Is", "Not", "Empty"],
            },
            Self::Contains => Call {
                actual: ACTUAL,
                expected: EXPECTED,
                chain: &["Has", "Member"],
            },
            Self::IsInstanceOf => TypeCheck {
                chain: &["Is", "InstanceOf"],
            },
            Self::IsNotInstanceOf => TypeCheck {
                chain: &["Is", "Not", "InstanceOf"],
            },
            Self::IsAssignableFrom => TypeCheck {
                chain: &["Is", "AssignableFrom"],
            },
            Self::IsNotAssignableFrom => TypeCheck {
                chain: &["Is", "Not", "AssignableFrom"],
            },
        }
    }
}

pub(super) fn analyze(shape: &InvocationShape) -> Option<Finding> {
    let rule = ClassicRule::from_method(shape.method_name())?;
    let replacement = rule.replacement();
    if shape.first_argument(replacement.actual_parameters()).is_none() {
        trace!(method = %shape.method_name(), "Classic call without an actual argument");
        return None;
    }
    let has_tolerance = rule == ClassicRule::AreEqual && shape.argument(DELTA).is_some();
    Some(Finding::at_call(
        shape,
        rule.descriptor(),
        DiagnosticData::Classic {
            rule,
            has_tolerance,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::helpers;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_method_maps_to_one_rule() {
        for rule in ClassicRule::iter() {
            assert_eq!(ClassicRule::from_method(rule.method_name()), Some(rule));
        }
        assert_eq!(ClassicRule::from_method("That"), None);
        assert_eq!(ClassicRule::from_method("areEqual"), None);
    }

    #[test]
    fn test_descriptors_are_distinct() {
        let ids: HashSet<&str> = ClassicRule::iter().map(|r| r.descriptor().id).collect();
        assert_eq!(ids.len(), ClassicRule::iter().count());
    }

    #[test]
    fn test_replacements_start_from_a_helper_class() {
        for rule in ClassicRule::iter() {
            let chain = rule.replacement().chain();
            assert!(helpers::ALL.contains(&chain[0]), "{rule}");
            assert!(chain.len() >= 2);
        }
    }

    #[test]
    fn test_only_true_rules_are_condensed() {
        let condensed: Vec<ClassicRule> =
            ClassicRule::iter().filter(|r| r.has_condensed_fix()).collect();
        assert_eq!(condensed, vec![ClassicRule::IsTrue, ClassicRule::True]);
    }
}
