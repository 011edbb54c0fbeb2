//! Immutable C# expression model shared by hosts and analyzers
//!
//! Nodes produced by a host parser carry a [`Span`] into the document source
//! and render verbatim from it, which keeps comments and formatting inside
//! untouched sub-expressions. Nodes synthesized by a code fix have no span and
//! render structurally. Trees are never mutated: a rewrite builds a new tree
//! that reuses the original sub-expressions.

pub mod build;
mod render;
mod tree;

pub use render::{render, render_argument_list, render_type};
pub use tree::{RootExpression, SyntaxTree};

/// A byte range into a document source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `other` lies entirely within this span
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns true if the two spans share at least one byte
    pub fn overlaps(&self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The text covered by this span, or an empty string when out of range
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// An identifier with optional type arguments (`EqualTo`, `InstanceOf<T>`)
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleName {
    pub identifier: String,
    pub type_arguments: Option<Vec<TypeSyntax>>,
    pub span: Option<Span>,
}

impl SimpleName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            type_arguments: None,
            span: None,
        }
    }

    pub fn generic(identifier: impl Into<String>, type_arguments: Vec<TypeSyntax>) -> Self {
        Self {
            identifier: identifier.into(),
            type_arguments: Some(type_arguments),
            span: None,
        }
    }

    /// Number of explicit type arguments
    pub fn arity(&self) -> usize {
        self.type_arguments.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LogicalAnd,
    LogicalOr,
    BitwiseAnd,
    BitwiseOr,
    ExclusiveOr,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    LeftShift,
    RightShift,
    Coalesce,
}

impl BinaryOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "==" => Self::Equals,
            "!=" => Self::NotEquals,
            "<" => Self::LessThan,
            "<=" => Self::LessThanOrEqual,
            ">" => Self::GreaterThan,
            ">=" => Self::GreaterThanOrEqual,
            "&&" => Self::LogicalAnd,
            "||" => Self::LogicalOr,
            "&" => Self::BitwiseAnd,
            "|" => Self::BitwiseOr,
            "^" => Self::ExclusiveOr,
            "+" => Self::Add,
            "-" => Self::Subtract,
            "*" => Self::Multiply,
            "/" => Self::Divide,
            "%" => Self::Modulo,
            "<<" => Self::LeftShift,
            ">>" => Self::RightShift,
            "??" => Self::Coalesce,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::ExclusiveOr => "^",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Coalesce => "??",
        }
    }

    /// Relational and equality operators, which always produce `bool`
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::NotEquals
                | Self::LessThan
                | Self::LessThanOrEqual
                | Self::GreaterThan
                | Self::GreaterThanOrEqual
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    LogicalNot,
    Negate,
    Plus,
    BitwiseNot,
    PreIncrement,
    PreDecrement,
}

impl UnaryOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "!" => Self::LogicalNot,
            "-" => Self::Negate,
            "+" => Self::Plus,
            "~" => Self::BitwiseNot,
            "++" => Self::PreIncrement,
            "--" => Self::PreDecrement,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LogicalNot => "!",
            Self::Negate => "-",
            Self::Plus => "+",
            Self::BitwiseNot => "~",
            Self::PreIncrement => "++",
            Self::PreDecrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Integer,
    Real,
    String,
    VerbatimString,
    RawString,
    InterpolatedString,
    Character,
    Boolean,
    Null,
    Default,
}

impl LiteralKind {
    /// Literal kinds whose value is a compile-time constant
    pub fn is_constant(self) -> bool {
        !matches!(self, Self::InterpolatedString)
    }
}

/// A literal token kept exactly as written (`2d`, `"abc"`, `@"x\y"`)
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub text: String,
}

/// One piece of a synthesized interpolated string
#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationPart {
    /// Literal text, already escaped for the target string form
    Text(String),
    /// An interpolation hole `{expression,alignment:format}`
    Hole {
        expression: Expr,
        alignment: Option<String>,
        format: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeSyntaxKind {
    /// A keyword type such as `int` or `string`
    Predefined(String),
    /// A (possibly qualified, possibly generic) type name
    Named {
        qualifier: Option<Box<TypeSyntax>>,
        name: String,
        type_arguments: Vec<TypeSyntax>,
    },
    Array {
        element: Box<TypeSyntax>,
        rank: usize,
    },
    Nullable(Box<TypeSyntax>),
    /// The implicit `var` type
    Var,
    /// Tuple, pointer and other type forms the analyzers never inspect
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSyntax {
    pub kind: TypeSyntaxKind,
    pub span: Option<Span>,
}

impl TypeSyntax {
    pub fn new(kind: TypeSyntaxKind) -> Self {
        Self { kind, span: None }
    }

    pub fn predefined(keyword: impl Into<String>) -> Self {
        Self::new(TypeSyntaxKind::Predefined(keyword.into()))
    }

    pub fn named(name: impl Into<String>, type_arguments: Vec<TypeSyntax>) -> Self {
        Self::new(TypeSyntaxKind::Named {
            qualifier: None,
            name: name.into(),
            type_arguments,
        })
    }

    /// A type written as display text, used for synthesized casts
    pub fn from_display(text: impl Into<String>) -> Self {
        Self::new(TypeSyntaxKind::Other(text.into()))
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `x`, `Is`, `InstanceOf<T>`
    Name(SimpleName),
    /// `string`, `object` used as an expression qualifier
    PredefinedType(String),
    MemberAccess {
        target: Box<Expr>,
        name: SimpleName,
    },
    Invocation {
        target: Box<Expr>,
        arguments: ArgumentList,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Parenthesized(Box<Expr>),
    Literal(Literal),
    /// A synthesized `$"..."` string
    InterpolatedString {
        verbatim: bool,
        parts: Vec<InterpolationPart>,
    },
    Cast {
        ty: TypeSyntax,
        operand: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        when_true: Box<Expr>,
        when_false: Box<Expr>,
    },
    ObjectCreation {
        ty: TypeSyntax,
        arguments: Option<ArgumentList>,
    },
    /// `new[] { a, b }` or `new T[] { a, b }`
    ArrayCreation {
        element_type: Option<TypeSyntax>,
        elements: Vec<Expr>,
    },
    TypeOf(TypeSyntax),
    This,
    /// A lambda; only expression bodies are modelled
    Lambda {
        body: Option<Box<Expr>>,
    },
    /// Any other expression, rendered from its span
    Other {
        kind: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Option<Span>,
}

impl Expr {
    /// Creates a synthesized expression
    pub fn new(kind: ExprKind) -> Self {
        Self { kind, span: None }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn is_synthesized(&self) -> bool {
        self.span.is_none()
    }

    /// Strips any number of enclosing parentheses
    pub fn unparenthesized(&self) -> &Expr {
        let mut current = self;
        while let ExprKind::Parenthesized(inner) = &current.kind {
            current = inner.as_ref();
        }
        current
    }

    pub fn as_invocation(&self) -> Option<(&Expr, &ArgumentList)> {
        match &self.kind {
            ExprKind::Invocation { target, arguments } => Some((target, arguments)),
            _ => None,
        }
    }

    pub fn as_member_access(&self) -> Option<(&Expr, &SimpleName)> {
        match &self.kind {
            ExprKind::MemberAccess { target, name } => Some((target, name)),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&SimpleName> {
        match &self.kind {
            ExprKind::Name(name) => Some(name),
            _ => None,
        }
    }

    /// The simple name this expression ends with: the identifier itself, the
    /// accessed member, or the invoked member
    pub fn trailing_name(&self) -> Option<&SimpleName> {
        match &self.kind {
            ExprKind::Name(name) => Some(name),
            ExprKind::MemberAccess { name, .. } => Some(name),
            ExprKind::Invocation { target, .. } => target.trailing_name(),
            _ => None,
        }
    }

    pub fn is_literal(&self, kind: LiteralKind) -> bool {
        matches!(&self.kind, ExprKind::Literal(lit) if lit.kind == kind)
    }

    /// Primary expressions never need parentheses when used as an operand
    pub fn is_primary(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Name(_)
                | ExprKind::PredefinedType(_)
                | ExprKind::MemberAccess { .. }
                | ExprKind::Invocation { .. }
                | ExprKind::Parenthesized(_)
                | ExprKind::Literal(_)
                | ExprKind::InterpolatedString { .. }
                | ExprKind::ObjectCreation { .. }
                | ExprKind::ArrayCreation { .. }
                | ExprKind::TypeOf(_)
                | ExprKind::This
        )
    }

    /// Direct child expressions in source order
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Name(_)
            | ExprKind::PredefinedType(_)
            | ExprKind::Literal(_)
            | ExprKind::TypeOf(_)
            | ExprKind::This
            | ExprKind::Other { .. } => Vec::new(),
            ExprKind::MemberAccess { target, .. } => vec![target.as_ref()],
            ExprKind::Invocation { target, arguments } => {
                let mut children: Vec<&Expr> = vec![target.as_ref()];
                children.extend(arguments.arguments.iter().map(|a| &a.expression));
                children
            }
            ExprKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            ExprKind::Unary { operand, .. } => vec![operand.as_ref()],
            ExprKind::Parenthesized(inner) => vec![inner.as_ref()],
            ExprKind::InterpolatedString { parts, .. } => parts
                .iter()
                .filter_map(|part| match part {
                    InterpolationPart::Hole { expression, .. } => Some(expression),
                    InterpolationPart::Text(_) => None,
                })
                .collect(),
            ExprKind::Cast { operand, .. } => vec![operand.as_ref()],
            ExprKind::Conditional {
                condition,
                when_true,
                when_false,
            } => vec![condition.as_ref(), when_true.as_ref(), when_false.as_ref()],
            ExprKind::ObjectCreation { arguments, .. } => arguments
                .iter()
                .flat_map(|list| list.arguments.iter().map(|a| &a.expression))
                .collect(),
            ExprKind::ArrayCreation { elements, .. } => elements.iter().collect(),
            ExprKind::Lambda { body } => body.iter().map(|b| b.as_ref()).collect(),
        }
    }

    /// Visits this expression and all descendants in pre-order
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Expr)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Finds the parsed descendant (or self) with exactly this span
    pub fn find_by_span(&self, span: Span) -> Option<&Expr> {
        if self.span == Some(span) {
            return Some(self);
        }
        if let Some(own) = self.span {
            if !own.contains(span) {
                return None;
            }
        }
        self.children()
            .into_iter()
            .find_map(|child| child.find_by_span(span))
    }
}

/// One syntactic argument of a call
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// Explicit `name:` label
    pub name: Option<String>,
    /// `ref`, `out` or `in`
    pub modifier: Option<String>,
    pub expression: Expr,
    /// Source text between the preceding `(` or `,` and the argument
    pub leading_trivia: String,
    /// Source text between the argument and the following `,` or `)`
    pub trailing_trivia: String,
    /// Span of the argument itself (label included, trivia excluded)
    pub span: Option<Span>,
}

impl Argument {
    pub fn new(expression: Expr) -> Self {
        Self {
            name: None,
            modifier: None,
            expression,
            leading_trivia: String::new(),
            trailing_trivia: String::new(),
            span: None,
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Drops the `name:` label, keeping the expression and trivia
    pub fn without_name(&self) -> Self {
        if self.name.is_none() {
            return self.clone();
        }
        Self {
            name: None,
            span: None,
            ..self.clone()
        }
    }

    /// Replaces the expression, keeping label and trivia
    pub fn with_expression(&self, expression: Expr) -> Self {
        Self {
            expression,
            span: None,
            ..self.clone()
        }
    }

    pub fn with_leading_trivia(mut self, trivia: impl Into<String>) -> Self {
        self.leading_trivia = trivia.into();
        self
    }

    pub fn with_trailing_trivia(mut self, trivia: impl Into<String>) -> Self {
        self.trailing_trivia = trivia.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgumentList {
    pub arguments: Vec<Argument>,
    /// Span from `(` to `)` inclusive
    pub span: Option<Span>,
}

impl ArgumentList {
    pub fn new(arguments: Vec<Argument>) -> Self {
        Self {
            arguments,
            span: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_and_overlaps() {
        let outer = Span::new(2, 10);
        assert!(outer.contains(Span::new(2, 10)));
        assert!(outer.contains(Span::new(4, 6)));
        assert!(!outer.contains(Span::new(1, 6)));
        assert!(outer.overlaps(Span::new(9, 12)));
        assert!(!outer.overlaps(Span::new(10, 12)));
    }

    #[test]
    fn test_operator_tokens_round_trip() {
        for token in ["==", "!=", "<", "<=", ">", ">=", "&", "|", "??"] {
            let op = BinaryOperator::from_token(token).unwrap();
            assert_eq!(op.as_str(), token);
        }
        assert!(BinaryOperator::from_token("=>").is_none());
        assert_eq!(UnaryOperator::from_token("!"), Some(UnaryOperator::LogicalNot));
    }

    #[test]
    fn test_unparenthesized_strips_all_levels() {
        let inner = build::identifier("x");
        let wrapped = build::parenthesized(build::parenthesized(inner.clone()));
        assert_eq!(wrapped.unparenthesized(), &inner);
    }

    #[test]
    fn test_trailing_name_of_invocation() {
        let call = build::invocation(
            build::member_chain(&["Is", "EqualTo"]),
            vec![Argument::new(build::identifier("x"))],
        );
        assert_eq!(call.trailing_name().unwrap().identifier, "EqualTo");
    }
}
