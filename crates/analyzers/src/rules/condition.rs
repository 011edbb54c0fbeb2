//! Boolean conditions that are better written as a constraint
//!
//! `Assert.That(condition)`, `Assert.That(condition, Is.True)`, `IsTrue`,
//! `True` and their negative counterparts all assert a single boolean. The
//! condition is peeled of prefix `!` operators, the negations are folded into
//! one parity bit, and the remaining expression is matched against the
//! equality, comparison, string and collection shapes.

use super::{collection, comparison, equality, strings, ConditionRule, DiagnosticData, Finding};
use crate::catalog::{constraints, helpers, methods, parameters};
use crate::classifier::InvocationShape;
use nunit_analyzers_core::syntax::UnaryOperator;
use nunit_analyzers_core::{Expr, ExprKind, SemanticModel, Symbol};
use tracing::trace;

/// The asserted condition with its negations folded away
#[derive(Debug, Clone, Copy)]
pub(crate) struct Condition<'e> {
    pub expr: &'e Expr,
    /// An odd number of negations apply
    pub negated: bool,
}

/// A recognized condition and the constraint that replaces it
#[derive(Debug, Clone, Copy)]
pub(crate) struct Recognized<'e> {
    pub rule: ConditionRule,
    pub actual: &'e Expr,
    pub expected: &'e Expr,
    /// Dotted constraint such as `Is.Not.EqualTo`
    pub constraint: &'static str,
    pub swap_operands: bool,
}

/// Extracts the condition of a boolean assertion
///
/// Returns `None` for other methods and for `Assert.That(condition, c)` where
/// `c` is anything but `Is.True` or `Is.False`.
pub(crate) fn extract_condition<'e>(
    shape: &InvocationShape<'e>,
    model: &dyn SemanticModel,
) -> Option<Condition<'e>> {
    let name = shape.method_name();
    if !methods::CONDITION_METHODS.contains(&name) {
        return None;
    }
    let mut negated = methods::NEGATIVE_CONDITION_METHODS.contains(&name);
    let subject = shape.first_argument(&[parameters::CONDITION, parameters::ACTUAL])?;
    if let Some(expression) = shape.argument(parameters::EXPRESSION) {
        if !boolean_constraint(&expression.expression, model)? {
            negated = !negated;
        }
    }

    let mut expr = subject.argument.expression.unparenthesized();
    while let ExprKind::Unary {
        operator: UnaryOperator::LogicalNot,
        operand,
    } = &expr.kind
    {
        negated = !negated;
        expr = operand.unparenthesized();
    }
    Some(Condition { expr, negated })
}

/// `Some(true)` for `Is.True`, `Some(false)` for `Is.False`
fn boolean_constraint(expr: &Expr, model: &dyn SemanticModel) -> Option<bool> {
    let expr = expr.unparenthesized();
    let (_, name) = expr.as_member_access()?;
    match model.symbol_info(expr)? {
        Symbol::Property(property)
            if property.containing_type.full_name()
                == format!("{}.{}", helpers::NAMESPACE, helpers::IS) =>
        {
            match name.identifier.as_str() {
                constraints::TRUE => Some(true),
                constraints::FALSE => Some(false),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Matches a condition against every condition rule, first match wins
pub(crate) fn recognize<'e>(
    condition: &Condition<'e>,
    model: &dyn SemanticModel,
) -> Option<Recognized<'e>> {
    equality::recognize(condition, model)
        .or_else(|| comparison::recognize(condition, model))
        .or_else(|| strings::recognize(condition, model))
        .or_else(|| collection::recognize(condition, model))
}

/// Picks the positive or negated constraint form
pub(super) fn pick(negated: bool, positive: &'static str, negative: &'static str) -> &'static str {
    if negated {
        negative
    } else {
        positive
    }
}

/// True when `expr` has a `ref struct` type, which cannot be boxed into a
/// constraint argument
pub(super) fn is_ref_like(expr: &Expr, model: &dyn SemanticModel) -> bool {
    model.type_of(expr).is_some_and(|ty| ty.is_ref_like)
}

pub(super) fn analyze(shape: &InvocationShape, model: &dyn SemanticModel) -> Option<Finding> {
    let condition = extract_condition(shape, model)?;
    let Some(recognized) = recognize(&condition, model) else {
        trace!(method = %shape.method_name(), "Condition has no constraint equivalent");
        return None;
    };
    let mut finding = Finding::at_call(
        shape,
        recognized.rule.descriptor(),
        DiagnosticData::Condition {
            rule: recognized.rule,
            constraint: recognized.constraint,
            swap_operands: recognized.swap_operands,
        },
    );
    finding.arguments.push(recognized.constraint.to_string());
    Some(finding)
}
