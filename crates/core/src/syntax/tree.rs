use super::{Expr, ExprKind, Span};
use std::sync::Arc;

/// A top-level expression of a statement, declarator or initializer
#[derive(Debug, Clone, PartialEq)]
pub struct RootExpression {
    pub expression: Expr,
    /// True when the expression sits inside a method-like body
    pub in_method_body: bool,
    /// True when the enclosing statement contains parse errors
    pub has_errors: bool,
}

/// A parsed document: its source and every expression root the host found
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: Arc<str>,
    roots: Vec<RootExpression>,
}

impl SyntaxTree {
    pub fn new(source: impl Into<Arc<str>>, roots: Vec<RootExpression>) -> Self {
        Self {
            source: source.into(),
            roots,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn roots(&self) -> &[RootExpression] {
        &self.roots
    }

    /// Every invocation in the document, outer calls before inner ones
    pub fn invocations(&self) -> Vec<(&Expr, &RootExpression)> {
        let mut found = Vec::new();
        for root in &self.roots {
            root.expression.walk(&mut |expr| {
                if matches!(expr.kind, ExprKind::Invocation { .. }) {
                    found.push((expr, root));
                }
            });
        }
        found
    }

    /// Locates the parsed invocation with exactly this span
    pub fn find_invocation(&self, span: Span) -> Option<(&Expr, &RootExpression)> {
        self.roots.iter().find_map(|root| {
            root.expression
                .find_by_span(span)
                .filter(|expr| matches!(expr.kind, ExprKind::Invocation { .. }))
                .map(|expr| (expr, root))
        })
    }
}
