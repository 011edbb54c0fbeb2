//! Rewrites a recognized boolean condition into a constraint

use super::arguments::{assemble, constraint_call};
use crate::classifier::InvocationShape;
use crate::rules::{extract_condition, recognize};
use nunit_analyzers_core::{Expr, SemanticModel};

/// `Assert.That(actual, Constraint(expected))` with the operands read off
/// the condition again, so the rewrite always matches the current tree
pub(super) fn transform(shape: &InvocationShape, model: &dyn SemanticModel) -> Option<Expr> {
    let condition = extract_condition(shape, model)?;
    let recognized = recognize(&condition, model)?;
    let chain: Vec<&str> = recognized.constraint.split('.').collect();
    let constraint = constraint_call(&chain, vec![recognized.expected.clone()]);
    Some(assemble(
        shape,
        recognized.actual.clone(),
        Some(constraint),
        model,
    ))
}
