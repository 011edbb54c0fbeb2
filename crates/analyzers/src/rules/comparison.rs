//! `<`, `<=`, `>` and `>=` conditions

use super::condition::{is_ref_like, Condition, Recognized};
use super::ConditionRule;
use nunit_analyzers_core::syntax::BinaryOperator;
use nunit_analyzers_core::{ExprKind, SemanticModel};
use strum::{Display, EnumIter};
use tracing::trace;

/// An ordering relation between actual and expected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Relation {
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
}

impl Relation {
    pub fn from_operator(operator: BinaryOperator) -> Option<Self> {
        match operator {
            BinaryOperator::GreaterThan => Some(Self::GreaterThan),
            BinaryOperator::GreaterThanOrEqual => Some(Self::GreaterThanOrEqualTo),
            BinaryOperator::LessThan => Some(Self::LessThan),
            BinaryOperator::LessThanOrEqual => Some(Self::LessThanOrEqualTo),
            _ => None,
        }
    }

    /// The relation that holds exactly when this one does not
    pub fn negated(self) -> Self {
        match self {
            Self::GreaterThan => Self::LessThanOrEqualTo,
            Self::GreaterThanOrEqualTo => Self::LessThan,
            Self::LessThan => Self::GreaterThanOrEqualTo,
            Self::LessThanOrEqualTo => Self::GreaterThan,
        }
    }

    /// The same relation read with the operands exchanged
    pub fn swapped(self) -> Self {
        match self {
            Self::GreaterThan => Self::LessThan,
            Self::GreaterThanOrEqualTo => Self::LessThanOrEqualTo,
            Self::LessThan => Self::GreaterThan,
            Self::LessThanOrEqualTo => Self::GreaterThanOrEqualTo,
        }
    }

    pub fn constraint(self) -> &'static str {
        match self {
            Self::GreaterThan => "Is.GreaterThan",
            Self::GreaterThanOrEqualTo => "Is.GreaterThanOrEqualTo",
            Self::LessThan => "Is.LessThan",
            Self::LessThanOrEqualTo => "Is.LessThanOrEqualTo",
        }
    }
}

/// A constant on the left and a non-constant on the right swaps the operands
/// so the constant becomes the expected value
pub(super) fn recognize<'e>(
    condition: &Condition<'e>,
    model: &dyn SemanticModel,
) -> Option<Recognized<'e>> {
    let ExprKind::Binary {
        operator,
        left,
        right,
    } = &condition.expr.kind
    else {
        return None;
    };
    let mut relation = Relation::from_operator(*operator)?;
    if is_ref_like(left, model) || is_ref_like(right, model) {
        trace!("Comparison over a ref-like operand");
        return None;
    }

    let swap_operands = model.is_constant(left) && !model.is_constant(right);
    if swap_operands {
        relation = relation.swapped();
    }
    if condition.negated {
        relation = relation.negated();
    }
    let (actual, expected) = if swap_operands {
        (right.as_ref(), left.as_ref())
    } else {
        (left.as_ref(), right.as_ref())
    };
    Some(Recognized {
        rule: ConditionRule::Comparison,
        actual,
        expected,
        constraint: relation.constraint(),
        swap_operands,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_negation_and_swap_are_involutions() {
        for relation in Relation::iter() {
            assert_eq!(relation.negated().negated(), relation);
            assert_eq!(relation.swapped().swapped(), relation);
            assert_ne!(relation.negated(), relation);
        }
    }

    #[test]
    fn test_negation_commutes_with_swap() {
        for relation in Relation::iter() {
            assert_eq!(relation.negated().swapped(), relation.swapped().negated());
        }
    }

    #[test]
    fn test_operators_map_to_relations() {
        assert_eq!(
            Relation::from_operator(BinaryOperator::GreaterThanOrEqual),
            Some(Relation::GreaterThanOrEqualTo)
        );
        assert_eq!(Relation::from_operator(BinaryOperator::Equals), None);
        assert_eq!(
            Relation::GreaterThan.negated().constraint(),
            "Is.LessThanOrEqualTo"
        );
        assert_eq!(
            Relation::GreaterThanOrEqualTo.swapped().constraint(),
            "Is.LessThanOrEqualTo"
        );
    }
}
