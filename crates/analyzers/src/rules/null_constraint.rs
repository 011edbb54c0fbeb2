//! `Is.Null` applied to a value that can never be null

use super::{DiagnosticData, Finding};
use crate::catalog::{constraints, methods, parameters};
use crate::classifier::InvocationShape;
use crate::constraints::ConstraintExpression;
use crate::descriptors;
use nunit_analyzers_core::SemanticModel;
use tracing::trace;

pub(super) fn analyze(shape: &InvocationShape, model: &dyn SemanticModel) -> Vec<Finding> {
    if shape.method_name() != methods::THAT {
        return Vec::new();
    }
    let (Some(actual), Some(expression)) = (
        shape.argument(parameters::ACTUAL),
        shape.argument(parameters::EXPRESSION),
    ) else {
        return Vec::new();
    };
    let constraint = ConstraintExpression::new(&expression.expression, model);
    if constraint.has_unknown_expressions() {
        trace!("Constraint could not be decomposed");
        return Vec::new();
    }
    if !model
        .type_of(&actual.expression)
        .is_some_and(|ty| ty.is_non_nullable_value_type())
    {
        return Vec::new();
    }

    constraint
        .parts()
        .iter()
        .filter(|part| part.root_name() == Some(constraints::NULL) && part.applies_to_actual())
        .filter_map(|part| part.root()?.span)
        .map(|span| Finding {
            descriptor: &descriptors::NULL_CONSTRAINT_USAGE,
            span,
            arguments: Vec::new(),
            data: DiagnosticData::NullConstraint,
        })
        .collect()
}
