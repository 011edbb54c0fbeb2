//! Rendering of (partially synthesized) trees back into C# text

use super::{
    Argument, ArgumentList, Expr, ExprKind, InterpolationPart, SimpleName, TypeSyntax,
    TypeSyntaxKind,
};

/// Renders an expression, copying every node that carries a span verbatim
pub fn render(expr: &Expr, source: &str) -> String {
    let mut renderer = Renderer::new(source);
    renderer.expr(expr);
    renderer.out
}

pub fn render_argument_list(list: &ArgumentList, source: &str) -> String {
    let mut renderer = Renderer::new(source);
    renderer.argument_list(list);
    renderer.out
}

pub fn render_type(ty: &TypeSyntax, source: &str) -> String {
    let mut renderer = Renderer::new(source);
    renderer.ty(ty);
    renderer.out
}

struct Renderer<'s> {
    source: &'s str,
    out: String,
}

impl<'s> Renderer<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            out: String::new(),
        }
    }

    fn verbatim(&mut self, span: Option<super::Span>) -> bool {
        match span {
            Some(span) if span.end <= self.source.len() => {
                self.out.push_str(span.text(self.source));
                true
            }
            _ => false,
        }
    }

    fn expr(&mut self, expr: &Expr) {
        if self.verbatim(expr.span) {
            return;
        }
        match &expr.kind {
            ExprKind::Name(name) => self.simple_name(name),
            ExprKind::PredefinedType(keyword) => self.out.push_str(keyword),
            ExprKind::MemberAccess { target, name } => {
                self.expr(target);
                self.out.push('.');
                self.simple_name(name);
            }
            ExprKind::Invocation { target, arguments } => {
                self.expr(target);
                self.argument_list(arguments);
            }
            ExprKind::Binary {
                operator,
                left,
                right,
            } => {
                self.expr(left);
                self.out.push(' ');
                self.out.push_str(operator.as_str());
                self.out.push(' ');
                self.expr(right);
            }
            ExprKind::Unary { operator, operand } => {
                self.out.push_str(operator.as_str());
                self.expr(operand);
            }
            ExprKind::Parenthesized(inner) => {
                self.out.push('(');
                self.expr(inner);
                self.out.push(')');
            }
            ExprKind::Literal(literal) => self.out.push_str(&literal.text),
            ExprKind::InterpolatedString { verbatim, parts } => {
                self.out.push('$');
                if *verbatim {
                    self.out.push('@');
                }
                self.out.push('"');
                for part in parts {
                    match part {
                        InterpolationPart::Text(text) => self.out.push_str(text),
                        InterpolationPart::Hole {
                            expression,
                            alignment,
                            format,
                        } => {
                            self.out.push('{');
                            self.expr(expression);
                            if let Some(alignment) = alignment {
                                self.out.push(',');
                                self.out.push_str(alignment);
                            }
                            if let Some(format) = format {
                                self.out.push(':');
                                self.out.push_str(format);
                            }
                            self.out.push('}');
                        }
                    }
                }
                self.out.push('"');
            }
            ExprKind::Cast { ty, operand } => {
                self.out.push('(');
                self.ty(ty);
                self.out.push(')');
                self.expr(operand);
            }
            ExprKind::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                self.expr(condition);
                self.out.push_str(" ? ");
                self.expr(when_true);
                self.out.push_str(" : ");
                self.expr(when_false);
            }
            ExprKind::ObjectCreation { ty, arguments } => {
                self.out.push_str("new ");
                self.ty(ty);
                match arguments {
                    Some(arguments) => self.argument_list(arguments),
                    None => self.out.push_str("()"),
                }
            }
            ExprKind::ArrayCreation {
                element_type,
                elements,
            } => {
                self.out.push_str("new");
                if let Some(element_type) = element_type {
                    self.out.push(' ');
                    self.ty(element_type);
                }
                self.out.push_str("[] { ");
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(element);
                }
                self.out.push_str(" }");
            }
            ExprKind::TypeOf(ty) => {
                self.out.push_str("typeof(");
                self.ty(ty);
                self.out.push(')');
            }
            ExprKind::This => self.out.push_str("this"),
            // Lambdas and opaque nodes only ever come from the parser.
            ExprKind::Lambda { .. } | ExprKind::Other { .. } => {}
        }
    }

    fn simple_name(&mut self, name: &SimpleName) {
        if self.verbatim(name.span) {
            return;
        }
        self.out.push_str(&name.identifier);
        if let Some(type_arguments) = &name.type_arguments {
            self.type_arguments(type_arguments);
        }
    }

    fn type_arguments(&mut self, type_arguments: &[TypeSyntax]) {
        self.out.push('<');
        for (index, ty) in type_arguments.iter().enumerate() {
            if index > 0 {
                self.out.push_str(", ");
            }
            self.ty(ty);
        }
        self.out.push('>');
    }

    fn argument_list(&mut self, list: &ArgumentList) {
        if self.verbatim(list.span) {
            return;
        }
        self.out.push('(');
        for (index, argument) in list.arguments.iter().enumerate() {
            if index > 0 {
                self.out.push(',');
            }
            self.argument(argument);
        }
        self.out.push(')');
    }

    fn argument(&mut self, argument: &Argument) {
        self.out.push_str(&argument.leading_trivia);
        if !self.verbatim(argument.span) {
            if let Some(name) = &argument.name {
                self.out.push_str(name);
                self.out.push_str(": ");
            }
            if let Some(modifier) = &argument.modifier {
                self.out.push_str(modifier);
                self.out.push(' ');
            }
            self.expr(&argument.expression);
        }
        self.out.push_str(&argument.trailing_trivia);
    }

    fn ty(&mut self, ty: &TypeSyntax) {
        if self.verbatim(ty.span) {
            return;
        }
        match &ty.kind {
            TypeSyntaxKind::Predefined(keyword) => self.out.push_str(keyword),
            TypeSyntaxKind::Named {
                qualifier,
                name,
                type_arguments,
            } => {
                if let Some(qualifier) = qualifier {
                    self.ty(qualifier);
                    self.out.push('.');
                }
                self.out.push_str(name);
                if !type_arguments.is_empty() {
                    self.type_arguments(type_arguments);
                }
            }
            TypeSyntaxKind::Array { element, rank } => {
                self.ty(element);
                self.out.push('[');
                for _ in 1..*rank {
                    self.out.push(',');
                }
                self.out.push(']');
            }
            TypeSyntaxKind::Nullable(inner) => {
                self.ty(inner);
                self.out.push('?');
            }
            TypeSyntaxKind::Var => self.out.push_str("var"),
            TypeSyntaxKind::Other(text) => self.out.push_str(text),
        }
    }
}
