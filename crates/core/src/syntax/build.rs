//! Factory helpers for synthesized syntax

use super::{
    Argument, ArgumentList, Expr, ExprKind, InterpolationPart, Literal, LiteralKind, SimpleName,
    TypeSyntax,
};

pub fn identifier(name: impl Into<String>) -> Expr {
    Expr::new(ExprKind::Name(SimpleName::new(name)))
}

pub fn member_access(target: Expr, name: impl Into<String>) -> Expr {
    Expr::new(ExprKind::MemberAccess {
        target: Box::new(target),
        name: SimpleName::new(name),
    })
}

pub fn generic_member_access(
    target: Expr,
    name: impl Into<String>,
    type_arguments: Vec<TypeSyntax>,
) -> Expr {
    Expr::new(ExprKind::MemberAccess {
        target: Box::new(target),
        name: SimpleName::generic(name, type_arguments),
    })
}

/// Builds `A.B.C` from `["A", "B", "C"]`
///
/// An empty slice yields an empty identifier, which callers never pass.
pub fn member_chain(names: &[&str]) -> Expr {
    let mut iter = names.iter();
    let mut expr = identifier(iter.next().copied().unwrap_or_default());
    for name in iter {
        expr = member_access(expr, *name);
    }
    expr
}

pub fn invocation(target: Expr, arguments: Vec<Argument>) -> Expr {
    Expr::new(ExprKind::Invocation {
        target: Box::new(target),
        arguments: argument_list(arguments),
    })
}

/// Builds an argument list whose arguments are separated by `, `
pub fn argument_list(arguments: Vec<Argument>) -> ArgumentList {
    let arguments = arguments
        .into_iter()
        .enumerate()
        .map(|(index, mut argument)| {
            if index > 0 && argument.leading_trivia.is_empty() {
                argument.leading_trivia = " ".to_string();
            }
            argument
        })
        .collect();
    ArgumentList::new(arguments)
}

pub fn argument(expression: Expr) -> Argument {
    Argument::new(expression)
}

pub fn parenthesized(inner: Expr) -> Expr {
    Expr::new(ExprKind::Parenthesized(Box::new(inner)))
}

/// Builds `(T)operand`, parenthesizing operands that are not primary
pub fn cast(ty: TypeSyntax, operand: Expr) -> Expr {
    let operand = if operand.is_primary() {
        operand
    } else {
        parenthesized(operand)
    };
    Expr::new(ExprKind::Cast {
        ty,
        operand: Box::new(operand),
    })
}

pub fn string_literal(text: impl Into<String>) -> Expr {
    Expr::new(ExprKind::Literal(Literal {
        kind: LiteralKind::String,
        text: text.into(),
    }))
}

pub fn interpolated_string(verbatim: bool, parts: Vec<InterpolationPart>) -> Expr {
    Expr::new(ExprKind::InterpolatedString { verbatim, parts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::render;

    #[test]
    fn test_member_chain_renders_dotted() {
        let expr = member_chain(&["Is", "Not", "Null"]);
        assert_eq!(render(&expr, ""), "Is.Not.Null");
    }

    #[test]
    fn test_argument_list_separates_with_space() {
        let call = invocation(
            member_chain(&["Assert", "That"]),
            vec![argument(identifier("a")), argument(identifier("b"))],
        );
        assert_eq!(render(&call, ""), "Assert.That(a, b)");
    }

    #[test]
    fn test_cast_parenthesizes_binary_operand() {
        let sum = Expr::new(ExprKind::Binary {
            operator: crate::syntax::BinaryOperator::Add,
            left: Box::new(identifier("a")),
            right: Box::new(identifier("b")),
        });
        let expr = cast(TypeSyntax::predefined("float"), sum);
        assert_eq!(render(&expr, ""), "(float)(a + b)");
        let simple = cast(TypeSyntax::predefined("float"), identifier("x"));
        assert_eq!(render(&simple, ""), "(float)x");
    }
}
