//! Converts a `message, params args` pair into a single message argument
//!
//! A literal format string is rewritten into an interpolated string with the
//! arguments placed in its holes: `"{0} of {1,5:N}", a, b` becomes
//! `$"{a} of {b,5:N}"`. Anything that cannot be interpolated safely falls
//! back to `string.Format(message, args...)`.

use crate::catalog::system;
use crate::classifier::InvocationShape;
use nunit_analyzers_core::syntax::{build, InterpolationPart, LiteralKind};
use nunit_analyzers_core::{Argument, Expr, ExprKind, SemanticModel, SimpleName};
use tracing::trace;

/// The replacement message argument, or `None` when the message is dropped
///
/// A `null` literal message carries no information and is dropped. The
/// returned argument keeps the original label and trivia.
pub(super) fn message_argument(
    shape: &InvocationShape,
    model: &dyn SemanticModel,
) -> Option<Argument> {
    let message = shape.message()?;
    if message
        .expression
        .unparenthesized()
        .is_literal(LiteralKind::Null)
    {
        return None;
    }
    let overflow = shape.overflow();
    if overflow.is_empty() {
        return Some(message.clone());
    }

    let values: Vec<&Expr> = match overflow {
        [single] if passes_array(shape, &single.expression, model) => {
            match &single.expression.kind {
                ExprKind::ArrayCreation { elements, .. } => elements.iter().collect(),
                _ => {
                    trace!("Format arguments passed as an array value");
                    return Some(message.with_expression(string_format(
                        &message.expression,
                        &[&single.expression],
                    )));
                }
            }
        }
        _ => overflow.iter().map(|argument| &argument.expression).collect(),
    };

    let converted = interpolate(&message.expression, &values)
        .unwrap_or_else(|| string_format(&message.expression, &values));
    Some(message.with_expression(converted))
}

/// True when a lone overflow argument is itself the `params` array rather than
/// its single element
fn passes_array(shape: &InvocationShape, expr: &Expr, model: &dyn SemanticModel) -> bool {
    let Some(parameter) = shape.catch_all() else {
        return false;
    };
    match model.type_of(expr) {
        Some(ty) if ty.is_array() => model.classify_conversion(expr, &parameter.ty).exists(),
        Some(_) => false,
        None => matches!(expr.kind, ExprKind::ArrayCreation { .. }),
    }
}

/// `$"..."` from a literal format string, `None` when `format` is not a plain
/// or verbatim literal or references a missing argument
fn interpolate(format: &Expr, values: &[&Expr]) -> Option<Expr> {
    let ExprKind::Literal(literal) = &format.unparenthesized().kind else {
        return None;
    };
    let (verbatim, body) = match literal.kind {
        LiteralKind::String => (
            false,
            literal.text.strip_prefix('"')?.strip_suffix('"')?,
        ),
        LiteralKind::VerbatimString => (
            true,
            literal.text.strip_prefix("@\"")?.strip_suffix('"')?,
        ),
        _ => return None,
    };
    let parts = parse_format(body, values)?;
    Some(build::interpolated_string(verbatim, parts))
}

fn parse_format(body: &str, values: &[&Expr]) -> Option<Vec<InterpolationPart>> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                text.push_str("{{");
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                text.push_str("}}");
            }
            '{' => {
                let mut item = String::new();
                loop {
                    match chars.next()? {
                        '}' => break,
                        c => item.push(c),
                    }
                }
                if !text.is_empty() {
                    parts.push(InterpolationPart::Text(std::mem::take(&mut text)));
                }
                parts.push(hole(&item, values)?);
            }
            '}' => return None,
            c => text.push(c),
        }
    }
    if !text.is_empty() {
        parts.push(InterpolationPart::Text(text));
    }
    Some(parts)
}

/// One `index[,alignment][:format]` format item
fn hole(item: &str, values: &[&Expr]) -> Option<InterpolationPart> {
    let (head, format) = match item.split_once(':') {
        Some((_, "")) => return None,
        Some((head, format)) => (head, Some(format.to_string())),
        None => (item, None),
    };
    let (index, alignment) = match head.split_once(',') {
        Some((index, alignment)) => {
            let alignment = alignment.trim();
            alignment.parse::<i32>().ok()?;
            (index, Some(alignment.to_string()))
        }
        None => (head, None),
    };
    let index: usize = index.trim().parse().ok()?;
    let value = *values.get(index)?;
    let expression = match value.unparenthesized().kind {
        // A `:` inside a hole would start its format clause
        ExprKind::Conditional { .. } => build::parenthesized(value.unparenthesized().clone()),
        _ => value.clone(),
    };
    Some(InterpolationPart::Hole {
        expression,
        alignment,
        format,
    })
}

/// `string.Format(format, values...)`
fn string_format(format: &Expr, values: &[&Expr]) -> Expr {
    let target = Expr::new(ExprKind::MemberAccess {
        target: Box::new(Expr::new(ExprKind::PredefinedType(
            system::STRING_KEYWORD.to_string(),
        ))),
        name: SimpleName::new(system::FORMAT),
    });
    let mut arguments = vec![build::argument(format.clone())];
    arguments.extend(values.iter().map(|value| build::argument((*value).clone())));
    build::invocation(target, arguments)
}
