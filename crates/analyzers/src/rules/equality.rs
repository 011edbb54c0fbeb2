//! `a == b`, `a != b`, `a.Equals(b)` and `Equals(a, b)` conditions

use super::condition::{is_ref_like, pick, Condition, Recognized};
use super::ConditionRule;
use crate::catalog::system;
use nunit_analyzers_core::syntax::BinaryOperator;
use nunit_analyzers_core::{Expr, ExprKind, SemanticModel};
use tracing::trace;

pub(super) fn recognize<'e>(
    condition: &Condition<'e>,
    model: &dyn SemanticModel,
) -> Option<Recognized<'e>> {
    let (actual, expected, inverted) = operands(condition.expr, model)?;
    if is_ref_like(actual, model) || is_ref_like(expected, model) {
        trace!("Equality over a ref-like operand");
        return None;
    }
    Some(Recognized {
        rule: ConditionRule::EqualConstraint,
        actual,
        expected,
        constraint: pick(condition.negated ^ inverted, "Is.EqualTo", "Is.Not.EqualTo"),
        swap_operands: false,
    })
}

/// The compared operands, and whether the comparison itself is `!=`
fn operands<'e>(expr: &'e Expr, model: &dyn SemanticModel) -> Option<(&'e Expr, &'e Expr, bool)> {
    match &expr.kind {
        ExprKind::Binary {
            operator: BinaryOperator::Equals,
            left,
            right,
        } => Some((left.as_ref(), right.as_ref(), false)),
        ExprKind::Binary {
            operator: BinaryOperator::NotEquals,
            left,
            right,
        } => Some((left.as_ref(), right.as_ref(), true)),
        ExprKind::Invocation { target, arguments } => {
            let method = model.resolve_method(expr)?;
            if method.name != system::EQUALS {
                return None;
            }
            match (method.is_static, arguments.arguments.as_slice()) {
                (false, [argument]) if method.parameters.len() == 1 => {
                    let (receiver, _) = target.as_member_access()?;
                    Some((receiver, &argument.expression, false))
                }
                (true, [first, second]) if method.parameters.len() == 2 => {
                    let holder = method.containing_type.full_name();
                    (holder == system::OBJECT || holder == system::STRING)
                        .then_some((&first.expression, &second.expression, false))
                }
                _ => None,
            }
        }
        _ => None,
    }
}
