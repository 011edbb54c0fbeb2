//! Assembly of the rewritten `Assert.That(...)` call

use super::message::message_argument;
use crate::catalog::{holders, methods};
use crate::classifier::InvocationShape;
use nunit_analyzers_core::syntax::build;
use nunit_analyzers_core::{Argument, ArgumentList, Expr, ExprKind, SemanticModel, TypeSyntax};
use tracing::trace;

/// `Assert.That` reusing the receiver when it already names `Assert`, so an
/// alias or a qualified `NUnit.Framework.Assert` survives the rewrite
pub(super) fn that_target(target: &Expr) -> Expr {
    match target.as_member_access() {
        Some((receiver, _))
            if receiver
                .trailing_name()
                .is_some_and(|name| name.identifier == holders::ASSERT_NAME) =>
        {
            build::member_access(receiver.clone(), methods::THAT)
        }
        _ => build::member_chain(&[holders::ASSERT_NAME, methods::THAT]),
    }
}

/// The argument bound to `parameter`, wrapped in a cast when the original call
/// compiled only through a user-defined conversion
pub(super) fn converted(
    shape: &InvocationShape,
    parameter: &str,
    model: &dyn SemanticModel,
) -> Option<Expr> {
    let bound = shape.binding(parameter)?;
    let expression = &bound.argument.expression;
    if model
        .classify_conversion(expression, &bound.parameter.ty)
        .is_user_defined()
    {
        trace!(parameter, ty = %bound.parameter.ty.display(), "Preserving user-defined conversion");
        return Some(build::cast(
            TypeSyntax::from_display(bound.parameter.ty.display()),
            expression.clone(),
        ));
    }
    Some(expression.clone())
}

/// `chain(arguments...)`, as in `Is.EqualTo(expected)`
pub(super) fn constraint_call(chain: &[&str], arguments: Vec<Expr>) -> Expr {
    build::invocation(
        build::member_chain(chain),
        arguments.into_iter().map(build::argument).collect(),
    )
}

/// Builds `Assert.That(actual, constraint, message)` around the trivia of the
/// original call
///
/// The actual value takes the leading trivia of the original first argument
/// and the last argument takes the trailing trivia of the original last one,
/// so line breaks before the first argument and before `)` survive. The
/// message keeps its own leading trivia.
pub(super) fn assemble(
    shape: &InvocationShape,
    actual: Expr,
    constraint: Option<Expr>,
    model: &dyn SemanticModel,
) -> Expr {
    let mut arguments = vec![Argument::new(actual).with_leading_trivia(shape.opening_trivia())];
    if let Some(constraint) = constraint {
        arguments.push(Argument::new(constraint).with_leading_trivia(" "));
    }
    if let Some(message) = message_argument(shape, model) {
        let mut message = message.without_name();
        if message.leading_trivia.is_empty() {
            message.leading_trivia = " ".to_string();
        }
        arguments.push(message);
    }
    close(&mut arguments, shape.closing_trivia());

    Expr::new(ExprKind::Invocation {
        target: Box::new(that_target(shape.target)),
        arguments: ArgumentList::new(arguments),
    })
}

/// Clears trailing trivia and hands `closing` to the last argument
pub(super) fn close(arguments: &mut [Argument], closing: &str) {
    for argument in arguments.iter_mut() {
        argument.trailing_trivia.clear();
    }
    if let Some(last) = arguments.last_mut() {
        last.trailing_trivia = closing.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nunit_analyzers_core::syntax::render;

    #[test]
    fn test_that_target_keeps_qualified_assert() {
        let qualified = build::member_access(
            build::member_chain(&["NUnit", "Framework", "Assert"]),
            "AreEqual",
        );
        assert_eq!(
            render(&that_target(&qualified), ""),
            "NUnit.Framework.Assert.That"
        );
        let classic = build::member_chain(&["ClassicAssert", "AreEqual"]);
        assert_eq!(render(&that_target(&classic), ""), "Assert.That");
    }

    #[test]
    fn test_close_moves_trivia_to_last_argument() {
        let mut arguments = vec![
            Argument::new(build::identifier("a")).with_trailing_trivia(" /* a */"),
            Argument::new(build::identifier("b")).with_leading_trivia(" "),
        ];
        close(&mut arguments, "\n");
        let call = Expr::new(ExprKind::Invocation {
            target: Box::new(build::identifier("f")),
            arguments: ArgumentList::new(arguments),
        });
        assert_eq!(render(&call, ""), "f(a, b\n)");
    }
}
