//! `s.Contains(x)`, `s.StartsWith(x)` and `s.EndsWith(x)` conditions

use super::condition::{pick, Condition, Recognized};
use super::ConditionRule;
use crate::catalog::system;
use nunit_analyzers_core::{SemanticModel, SpecialType};

const PREDICATES: &[(&str, ConditionRule, &str, &str)] = &[
    (
        system::CONTAINS,
        ConditionRule::StringContains,
        "Does.Contain",
        "Does.Not.Contain",
    ),
    (
        system::STARTS_WITH,
        ConditionRule::StringStartsWith,
        "Does.StartWith",
        "Does.Not.StartWith",
    ),
    (
        system::ENDS_WITH,
        ConditionRule::StringEndsWith,
        "Does.EndWith",
        "Does.Not.EndWith",
    ),
];

/// Only the single-argument instance overloads on `string` qualify; the
/// `StringComparison` overloads have no constraint spelling
pub(super) fn recognize<'e>(
    condition: &Condition<'e>,
    model: &dyn SemanticModel,
) -> Option<Recognized<'e>> {
    let (target, list) = condition.expr.as_invocation()?;
    let (receiver, _) = target.as_member_access()?;
    let method = model.resolve_method(condition.expr)?;
    if method.is_static
        || method.containing_type.special != SpecialType::String
        || method.parameters.len() != 1
    {
        return None;
    }
    let &(_, rule, positive, negative) =
        PREDICATES.iter().find(|(name, ..)| *name == method.name)?;
    let [argument] = list.arguments.as_slice() else {
        return None;
    };
    Some(Recognized {
        rule,
        actual: receiver,
        expected: &argument.expression,
        constraint: pick(condition.negated, positive, negative),
        swap_operands: false,
    })
}
