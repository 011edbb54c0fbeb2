//! Folds `message, params args` into one interpolated message argument

use super::message::message_argument;
use crate::classifier::InvocationShape;
use nunit_analyzers_core::{ArgumentList, Expr, ExprKind, SemanticModel};
use std::ptr;

/// Keeps the target and every other argument verbatim
pub(super) fn transform(shape: &InvocationShape, model: &dyn SemanticModel) -> Option<Expr> {
    let message = shape.message()?;
    if shape.overflow().is_empty() {
        return None;
    }
    let replacement = message_argument(shape, model)?;

    let mut arguments = Vec::new();
    for argument in shape.arguments() {
        if ptr::eq(argument, message) {
            arguments.push(replacement.clone());
        } else if !shape.overflow().iter().any(|o| ptr::eq(*o, argument)) {
            arguments.push(argument.clone());
        }
    }
    if let Some(last) = arguments.last_mut() {
        last.trailing_trivia = shape.closing_trivia().to_string();
    }

    Some(Expr::new(ExprKind::Invocation {
        target: Box::new(shape.target.clone()),
        arguments: ArgumentList::new(arguments),
    }))
}
