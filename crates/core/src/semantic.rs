//! The semantic capability surface a host provides to the analyzers

use crate::symbols::{MethodSymbol, Symbol, TypeSymbol};
use crate::syntax::{Expr, ExprKind, UnaryOperator};

/// How an expression converts to a destination type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    Identity,
    ImplicitNumeric,
    /// An integral constant that fits the destination type
    ImplicitConstant,
    ImplicitReference,
    Boxing,
    ImplicitNullable,
    NullLiteral,
    /// A user-declared `implicit operator`
    UserDefined,
    /// No implicit conversion exists
    None,
}

impl Conversion {
    pub fn exists(self) -> bool {
        self != Conversion::None
    }

    pub fn is_user_defined(self) -> bool {
        self == Conversion::UserDefined
    }

    pub fn is_identity(self) -> bool {
        self == Conversion::Identity
    }
}

/// Symbol resolution over one document
///
/// Expressions are identified by their spans, so only parsed nodes resolve.
/// Synthesized nodes always yield `None`.
pub trait SemanticModel {
    /// The method an invocation binds to after overload resolution
    fn resolve_method(&self, invocation: &Expr) -> Option<MethodSymbol>;

    /// The symbol a name, member access or invocation refers to
    fn symbol_info(&self, expr: &Expr) -> Option<Symbol>;

    /// The static type of an expression
    fn type_of(&self, expr: &Expr) -> Option<TypeSymbol>;

    /// Classifies the implicit conversion from `expr` to `destination`
    fn classify_conversion(&self, expr: &Expr, destination: &TypeSymbol) -> Conversion;

    /// True when `ty` is, derives from or implements the type named
    /// `base_full_name` (e.g. `NUnit.Framework.Constraints.Constraint`)
    fn is_derived_from(&self, ty: &TypeSymbol, base_full_name: &str) -> bool;

    /// True when the expression is a compile-time constant
    fn is_constant(&self, expr: &Expr) -> bool {
        let expr = expr.unparenthesized();
        match &expr.kind {
            ExprKind::Literal(literal) => literal.kind.is_constant(),
            ExprKind::Unary {
                operator: UnaryOperator::Negate | UnaryOperator::Plus | UnaryOperator::BitwiseNot,
                operand,
            } => self.is_constant(operand),
            ExprKind::Name(_) | ExprKind::MemberAccess { .. } => matches!(
                self.symbol_info(expr),
                Some(Symbol::Field(field)) if field.is_const
            ),
            _ => false,
        }
    }
}
