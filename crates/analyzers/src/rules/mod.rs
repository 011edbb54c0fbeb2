//! The rule catalog and per-rule analyzers
//!
//! Rules form two closed sets. A [`ClassicRule`] is selected by the name of
//! the resolved classic assertion method. A [`ConditionRule`] is selected by
//! the shape of the boolean condition handed to `Assert.That`, `IsTrue` or
//! their negative counterparts. Three further analyzers inspect
//! constraint-model calls directly.

mod classic;
mod collection;
mod comparison;
mod condition;
mod equality;
mod format_string;
mod null_constraint;
mod same_as;
mod strings;

pub use classic::{ClassicRule, Replacement};
pub use comparison::Relation;
pub(crate) use condition::{extract_condition, recognize};

use crate::classifier::InvocationShape;
use crate::descriptors;
use nunit_analyzers_core::{DiagnosticDescriptor, SemanticModel, Span};
use strum::{Display, EnumIter};

/// Rules driven by the shape of an asserted boolean condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ConditionRule {
    EqualConstraint,
    StringContains,
    StringStartsWith,
    StringEndsWith,
    CollectionContains,
    Comparison,
}

impl ConditionRule {
    pub fn descriptor(self) -> &'static DiagnosticDescriptor {
        match self {
            Self::EqualConstraint => &descriptors::EQUAL_CONSTRAINT_USAGE,
            Self::StringContains => &descriptors::STRING_CONTAINS_CONSTRAINT_USAGE,
            Self::StringStartsWith => &descriptors::STRING_STARTS_WITH_CONSTRAINT_USAGE,
            Self::StringEndsWith => &descriptors::STRING_ENDS_WITH_CONSTRAINT_USAGE,
            Self::CollectionContains => &descriptors::COLLECTION_CONTAINS_CONSTRAINT_USAGE,
            Self::Comparison => &descriptors::COMPARISON_CONSTRAINT_USAGE,
        }
    }

    pub fn equivalence_key(self) -> &'static str {
        match self {
            Self::EqualConstraint => "UseEqualConstraint",
            Self::StringContains => "UseStringContainsConstraint",
            Self::StringStartsWith => "UseStringStartsWithConstraint",
            Self::StringEndsWith => "UseStringEndsWithConstraint",
            Self::CollectionContains => "UseCollectionContainsConstraint",
            Self::Comparison => "UseComparisonConstraint",
        }
    }
}

/// The typed record a rule hands to its code fix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticData {
    Classic {
        rule: ClassicRule,
        /// `AreEqual` called with a `delta`
        has_tolerance: bool,
    },
    Condition {
        rule: ConditionRule,
        /// Dotted constraint such as `Is.Not.EqualTo`
        constraint: &'static str,
        /// The constant operand was on the left of the comparison
        swap_operands: bool,
    },
    NullConstraint,
    SameAsOnValueType {
        /// The name token to replace
        rename: Span,
        replacement: &'static str,
    },
    FormatString,
}

/// A rule match before configuration is applied
#[derive(Debug, Clone)]
pub(crate) struct Finding {
    pub descriptor: &'static DiagnosticDescriptor,
    pub span: Span,
    pub arguments: Vec<String>,
    pub data: DiagnosticData,
}

impl Finding {
    fn at_call(
        shape: &InvocationShape,
        descriptor: &'static DiagnosticDescriptor,
        data: DiagnosticData,
    ) -> Self {
        Self {
            descriptor,
            span: shape.span,
            arguments: Vec::new(),
            data,
        }
    }
}

/// Runs every analyzer over one classified call
pub(crate) fn analyze(shape: &InvocationShape, model: &dyn SemanticModel) -> Vec<Finding> {
    let mut findings = Vec::new();
    findings.extend(classic::analyze(shape));
    findings.extend(condition::analyze(shape, model));
    findings.extend(null_constraint::analyze(shape, model));
    findings.extend(same_as::analyze(shape, model));
    findings.extend(format_string::analyze(shape));
    findings
}
