//! Rewrites classic assertions into `Assert.That(actual, constraint)`

use super::arguments::{assemble, constraint_call, converted};
use crate::catalog::{constraints, parameters};
use crate::classifier::InvocationShape;
use crate::rules::{ClassicRule, Replacement};
use nunit_analyzers_core::syntax::build;
use nunit_analyzers_core::{Expr, SemanticModel};
use tracing::debug;

/// The full constraint-model rewrite
pub(super) fn transform(
    shape: &InvocationShape,
    rule: ClassicRule,
    has_tolerance: bool,
    model: &dyn SemanticModel,
) -> Option<Expr> {
    let replacement = rule.replacement();
    let actual_parameter = replacement
        .actual_parameters()
        .iter()
        .copied()
        .find(|name| shape.binding(name).is_some())?;
    let actual = converted(shape, actual_parameter, model)?;

    let constraint = match replacement {
        Replacement::Property { chain, .. } => build::member_chain(chain),
        Replacement::Call {
            expected, chain, ..
        } => {
            let expected = converted(shape, expected, model)?;
            let constraint = constraint_call(chain, vec![expected]);
            if has_tolerance {
                let Some(delta) = converted(shape, parameters::DELTA, model) else {
                    debug!(rule = %rule, "Tolerance recorded but no delta argument bound");
                    return None;
                };
                build::invocation(
                    build::member_access(constraint, constraints::WITHIN),
                    vec![build::argument(delta)],
                )
            } else {
                constraint
            }
        }
        Replacement::TypeCheck { chain } => type_check(shape, chain, model)?,
    };
    Some(assemble(shape, actual, Some(constraint), model))
}

/// `Assert.That(condition)` for `IsTrue`/`True`
pub(super) fn condensed(shape: &InvocationShape, model: &dyn SemanticModel) -> Option<Expr> {
    let actual = converted(shape, parameters::CONDITION, model)?;
    Some(assemble(shape, actual, None, model))
}

/// `Is.InstanceOf<T>()` for the generic overload, `Is.InstanceOf(expected)` otherwise
///
/// Type arguments are copied from the call site so aliases and nested
/// generics such as `Wrapped<Wrapped<int>>` render exactly as written.
fn type_check(
    shape: &InvocationShape,
    chain: &[&str],
    model: &dyn SemanticModel,
) -> Option<Expr> {
    let explicit = shape
        .member_name()
        .and_then(|name| name.type_arguments.clone());
    match explicit {
        Some(type_arguments) => {
            let (last, qualifier) = chain.split_last()?;
            Some(build::invocation(
                build::generic_member_access(build::member_chain(qualifier), *last, type_arguments),
                Vec::new(),
            ))
        }
        None => {
            let expected = converted(shape, parameters::EXPECTED, model)?;
            Some(constraint_call(chain, vec![expected]))
        }
    }
}
