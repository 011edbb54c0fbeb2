//! `collection.Contains(x)` conditions
//!
//! Matches instance `Contains` on generic collections and `IList`, and the
//! LINQ `Enumerable.Contains` extension in both its reduced
//! (`items.Contains(x)`) and static (`Enumerable.Contains(items, x)`) forms.

use super::condition::{pick, Condition, Recognized};
use super::ConditionRule;
use crate::catalog::system;
use nunit_analyzers_core::{Expr, MethodSymbol, SemanticModel, SpecialType};

pub(super) fn recognize<'e>(
    condition: &Condition<'e>,
    model: &dyn SemanticModel,
) -> Option<Recognized<'e>> {
    let (target, list) = condition.expr.as_invocation()?;
    let method = model.resolve_method(condition.expr)?;
    if method.name != system::CONTAINS || list.arguments.iter().any(|a| a.name.is_some()) {
        return None;
    }

    let (actual, expected): (&Expr, &Expr) = match list.arguments.as_slice() {
        [item] if is_linq(&method) && method.is_reduced_extension => {
            (target.as_member_access()?.0, &item.expression)
        }
        [item] if is_collection_member(&method, model) => {
            (target.as_member_access()?.0, &item.expression)
        }
        [collection, item] if is_linq(&method) && !method.is_reduced_extension => {
            (&collection.expression, &item.expression)
        }
        _ => return None,
    };
    Some(Recognized {
        rule: ConditionRule::CollectionContains,
        actual,
        expected,
        constraint: pick(condition.negated, "Does.Contain", "Does.Not.Contain"),
        swap_operands: false,
    })
}

fn is_linq(method: &MethodSymbol) -> bool {
    method.is_extension && method.containing_type.full_name() == system::ENUMERABLE
}

fn is_collection_member(method: &MethodSymbol, model: &dyn SemanticModel) -> bool {
    let holder = &method.containing_type;
    !method.is_static
        && method.parameters.len() == 1
        && holder.special != SpecialType::String
        && (model.is_derived_from(holder, system::GENERIC_COLLECTION)
            || model.is_derived_from(holder, system::LIST))
}
