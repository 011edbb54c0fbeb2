//! Reference-identity assertions over value types, which always fail

use super::{DiagnosticData, Finding};
use crate::catalog::{constraints, methods, parameters};
use crate::classifier::InvocationShape;
use crate::constraints::ConstraintExpression;
use crate::descriptors;
use nunit_analyzers_core::{Expr, SemanticModel};

pub(super) fn analyze(shape: &InvocationShape, model: &dyn SemanticModel) -> Vec<Finding> {
    match shape.method_name() {
        methods::THAT => constraint_form(shape, model),
        methods::ARE_SAME => classic_form(shape, model, methods::ARE_EQUAL)
            .into_iter()
            .collect(),
        methods::ARE_NOT_SAME => classic_form(shape, model, methods::ARE_NOT_EQUAL)
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

fn is_value_type(expr: &Expr, model: &dyn SemanticModel) -> bool {
    model.type_of(expr).is_some_and(|ty| ty.is_value_type())
}

/// `Assert.That(actual, Is.SameAs(expected))`, reported on each `SameAs`
fn constraint_form(shape: &InvocationShape, model: &dyn SemanticModel) -> Vec<Finding> {
    let (Some(actual), Some(expression)) = (
        shape.argument(parameters::ACTUAL),
        shape.argument(parameters::EXPRESSION),
    ) else {
        return Vec::new();
    };
    let actual_is_value = is_value_type(&actual.expression, model);
    let constraint = ConstraintExpression::new(&expression.expression, model);

    constraint
        .parts()
        .iter()
        .filter(|part| part.root_name() == Some(constraints::SAME_AS))
        .filter(|part| {
            (actual_is_value && part.applies_to_actual())
                || part
                    .expected_argument()
                    .is_some_and(|expected| is_value_type(expected, model))
        })
        .filter_map(|part| {
            let root = part.root()?;
            let rename = root.trailing_name()?.span?;
            Some(Finding {
                descriptor: &descriptors::SAME_AS_ON_VALUE_TYPES,
                span: root.span?,
                arguments: Vec::new(),
                data: DiagnosticData::SameAsOnValueType {
                    rename,
                    replacement: constraints::EQUAL_TO,
                },
            })
        })
        .collect()
}

/// `ClassicAssert.AreSame(expected, actual)` and its negation
fn classic_form(
    shape: &InvocationShape,
    model: &dyn SemanticModel,
    replacement: &'static str,
) -> Option<Finding> {
    let expected = shape.argument(parameters::EXPECTED)?;
    let actual = shape.argument(parameters::ACTUAL)?;
    if !is_value_type(&expected.expression, model) && !is_value_type(&actual.expression, model) {
        return None;
    }
    let rename = shape.member_name()?.span?;
    Some(Finding::at_call(
        shape,
        &descriptors::SAME_AS_ON_VALUE_TYPES,
        DiagnosticData::SameAsOnValueType {
            rename,
            replacement,
        },
    ))
}
