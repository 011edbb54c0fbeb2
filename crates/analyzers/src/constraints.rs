//! Structural view of a fluent constraint expression
//!
//! `Is.Not.Null & Has.Count.EqualTo(2)` or `Is.Empty.Or.Some.EqualTo("A")`
//! is split into parts at the `&` and `|` operators and at the `And`, `Or`
//! and `With` combinators. Each part is then read as
//!
//! ```text
//! helper . prefix* . root . suffix*
//! ```
//!
//! where the root is the first segment whose type is a constraint. Prefixes
//! (`Not`, `Some`, `Property("X")`) come before it and modifiers
//! (`IgnoreCase`, `Within(0.1)`) after it.

use crate::catalog::{constraints, helpers};
use nunit_analyzers_core::syntax::{BinaryOperator, TypeSyntaxKind};
use nunit_analyzers_core::{Expr, ExprKind, SemanticModel, Symbol, TypeSyntax};

/// A whole constraint argument
#[derive(Debug, Clone)]
pub struct ConstraintExpression<'e> {
    parts: Vec<ConstraintPartExpression<'e>>,
}

/// One `helper.prefix*.root.suffix*` part of a constraint expression
#[derive(Debug, Clone)]
pub struct ConstraintPartExpression<'e> {
    helper_class: Option<&'e str>,
    prefixes: Vec<&'e Expr>,
    root: Option<&'e Expr>,
    suffixes: Vec<&'e Expr>,
    has_unknown_expressions: bool,
}

impl<'e> ConstraintExpression<'e> {
    pub fn new(expression: &'e Expr, model: &dyn SemanticModel) -> Self {
        let mut operands = Vec::new();
        split_operators(expression, &mut operands);

        let parts = operands
            .into_iter()
            .flat_map(|operand| split_combinators(segments(operand)))
            .map(|segments| ConstraintPartExpression::from_segments(&segments, model))
            .collect();
        Self { parts }
    }

    pub fn parts(&self) -> &[ConstraintPartExpression<'e>] {
        &self.parts
    }

    /// True when any part could not be decomposed
    pub fn has_unknown_expressions(&self) -> bool {
        self.parts.iter().any(|part| part.has_unknown_expressions)
    }
}

impl<'e> ConstraintPartExpression<'e> {
    fn from_segments(segments: &[&'e Expr], model: &dyn SemanticModel) -> Self {
        let helper_class = segments.first().and_then(|first| helper_name(first, model));
        let rest = if helper_class.is_some() {
            &segments[1..]
        } else {
            segments
        };

        let root_index = rest.iter().position(|segment| is_constraint(segment, model));
        let (prefixes, root, suffixes) = match root_index {
            Some(index) => (
                rest[..index].to_vec(),
                Some(rest[index]),
                rest[index + 1..].to_vec(),
            ),
            None => (rest.to_vec(), None, Vec::new()),
        };

        let known_base = helper_class.is_some()
            || segments.first().is_some_and(|first| is_known_base(first));
        Self {
            helper_class,
            prefixes,
            root,
            suffixes,
            has_unknown_expressions: root.is_none() || !known_base,
        }
    }

    /// `Is`, `Has`, `Does`, `Contains` or `Throws` when the part starts with one
    pub fn helper_class(&self) -> Option<&'e str> {
        self.helper_class
    }

    pub fn prefixes(&self) -> &[&'e Expr] {
        &self.prefixes
    }

    pub fn root(&self) -> Option<&'e Expr> {
        self.root
    }

    pub fn suffixes(&self) -> &[&'e Expr] {
        &self.suffixes
    }

    pub fn has_unknown_expressions(&self) -> bool {
        self.has_unknown_expressions
    }

    pub fn prefix_names(&self) -> Vec<&'e str> {
        self.prefixes.iter().copied().filter_map(segment_name).collect()
    }

    pub fn suffix_names(&self) -> Vec<&'e str> {
        self.suffixes.iter().copied().filter_map(segment_name).collect()
    }

    pub fn root_name(&self) -> Option<&'e str> {
        self.root.and_then(segment_name)
    }

    pub fn prefix(&self, name: &str) -> Option<&'e Expr> {
        find_named(&self.prefixes, name)
    }

    pub fn suffix(&self, name: &str) -> Option<&'e Expr> {
        find_named(&self.suffixes, name)
    }

    /// True when every prefix is `Not`, so the root applies to the actual value itself
    pub fn applies_to_actual(&self) -> bool {
        self.prefixes
            .iter()
            .all(|prefix| segment_name(prefix) == Some(constraints::NOT))
    }

    /// The first argument of an invoked root, `5` in `Is.EqualTo(5)`
    pub fn expected_argument(&self) -> Option<&'e Expr> {
        let root = self.root?;
        match &root.kind {
            ExprKind::Invocation { arguments, .. } => {
                arguments.arguments.first().map(|a| &a.expression)
            }
            ExprKind::ObjectCreation {
                arguments: Some(arguments),
                ..
            } => arguments.arguments.first().map(|a| &a.expression),
            _ => None,
        }
    }
}

fn split_operators<'e>(expr: &'e Expr, operands: &mut Vec<&'e Expr>) {
    let expr = expr.unparenthesized();
    match &expr.kind {
        ExprKind::Binary {
            operator: BinaryOperator::BitwiseAnd | BinaryOperator::BitwiseOr,
            left,
            right,
        } => {
            split_operators(left, operands);
            split_operators(right, operands);
        }
        _ => operands.push(expr),
    }
}

/// Flattens `Is.Not.EqualTo(5).Within(1)` into `[Is, Not, EqualTo(5), Within(1)]`
///
/// An invocation and the member access it invokes form one segment.
fn segments(expr: &Expr) -> Vec<&Expr> {
    let mut segments = Vec::new();
    let mut current = expr;
    loop {
        segments.push(current);
        let next = match &current.kind {
            ExprKind::Invocation { target, .. } => match &target.kind {
                ExprKind::MemberAccess { target, .. } => target.as_ref(),
                _ => break,
            },
            ExprKind::MemberAccess { target, .. } => target.as_ref(),
            _ => break,
        };
        current = next;
    }
    segments.reverse();
    segments
}

fn split_combinators(segments: Vec<&Expr>) -> Vec<Vec<&Expr>> {
    let mut parts = Vec::new();
    let mut current = Vec::new();
    let last = segments.len().saturating_sub(1);
    for (index, segment) in segments.into_iter().enumerate() {
        if index < last && is_combinator(segment) {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(segment);
        }
    }
    parts.push(current);
    parts
}

fn is_combinator(segment: &Expr) -> bool {
    segment
        .as_member_access()
        .is_some_and(|(_, name)| constraints::COMBINATORS.contains(&name.identifier.as_str()))
}

/// The helper class a leading segment names, if it names one
///
/// A name that resolves to something other than an NUnit type (a local
/// called `Is`, say) is not a helper.
fn helper_name<'e>(segment: &'e Expr, model: &dyn SemanticModel) -> Option<&'e str> {
    let name = segment.as_name()?;
    let identifier = helpers::ALL
        .iter()
        .copied()
        .find(|helper| *helper == name.identifier)?;
    match model.symbol_info(segment) {
        Some(Symbol::Type(ty)) if ty.container == helpers::NAMESPACE => Some(identifier),
        Some(_) => None,
        None => Some(identifier),
    }
}

/// Chain bases other than a helper that can still start a constraint
fn is_known_base(segment: &Expr) -> bool {
    matches!(
        segment.kind,
        ExprKind::MemberAccess { .. } | ExprKind::Invocation { .. } | ExprKind::ObjectCreation { .. }
    )
}

fn is_constraint(segment: &Expr, model: &dyn SemanticModel) -> bool {
    model
        .type_of(segment)
        .is_some_and(|ty| model.is_derived_from(&ty, constraints::CONSTRAINT_BASE))
}

fn segment_name(segment: &Expr) -> Option<&str> {
    match &segment.kind {
        ExprKind::ObjectCreation { ty, .. } => type_name(ty),
        _ => segment
            .trailing_name()
            .map(|name| name.identifier.as_str()),
    }
}

fn type_name(ty: &TypeSyntax) -> Option<&str> {
    match &ty.kind {
        TypeSyntaxKind::Named { name, .. } => Some(name),
        _ => None,
    }
}

fn find_named<'e>(segments: &[&'e Expr], name: &str) -> Option<&'e Expr> {
    segments
        .iter()
        .copied()
        .find(|segment| segment_name(segment) == Some(name))
}
