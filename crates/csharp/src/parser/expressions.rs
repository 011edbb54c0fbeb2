use super::{
    children, is_expression_kind, named_children, span, types, BodyScope, Collector, Context,
    ParameterDecl,
};
use nunit_analyzers_core::syntax::{
    Argument, ArgumentList, BinaryOperator, Expr, ExprKind, Literal, LiteralKind, SimpleName,
    UnaryOperator,
};
use tree_sitter::Node;

fn literal_kind(kind: &str, text: &str) -> Option<LiteralKind> {
    let kind = match kind {
        "integer_literal" => LiteralKind::Integer,
        "real_literal" => LiteralKind::Real,
        "string_literal" if text.starts_with('@') => LiteralKind::VerbatimString,
        "string_literal" => LiteralKind::String,
        "verbatim_string_literal" => LiteralKind::VerbatimString,
        "raw_string_literal" => LiteralKind::RawString,
        "character_literal" => LiteralKind::Character,
        "boolean_literal" => LiteralKind::Boolean,
        "null_literal" => LiteralKind::Null,
        "interpolated_string_expression" => LiteralKind::InterpolatedString,
        "default_expression" | "literal_default" if text == "default" => LiteralKind::Default,
        _ => return None,
    };
    Some(kind)
}

impl Collector<'_> {
    pub(super) fn expression(&mut self, node: Node, ctx: Context) -> Expr {
        let kind = self.expression_kind(node, ctx);
        Expr {
            kind,
            span: Some(span(node)),
        }
    }

    fn boxed(&mut self, node: Node, ctx: Context) -> Box<Expr> {
        Box::new(self.expression(node, ctx))
    }

    fn expression_kind(&mut self, node: Node, ctx: Context) -> ExprKind {
        let text = self.text(node);
        let parts = named_children(node);
        if let Some(kind) = literal_kind(node.kind(), text) {
            if kind == LiteralKind::InterpolatedString {
                self.nested_roots(node, ctx);
            }
            return ExprKind::Literal(Literal {
                kind,
                text: text.to_string(),
            });
        }
        match node.kind() {
            "identifier" | "generic_name" => ExprKind::Name(self.simple_name(node)),
            "predefined_type" => ExprKind::PredefinedType(text.to_string()),
            "this_expression" | "this" => ExprKind::This,
            "parenthesized_expression" => match parts.first() {
                Some(inner) => ExprKind::Parenthesized(self.boxed(*inner, ctx)),
                None => self.other(node, ctx),
            },
            "member_access_expression" => {
                let target = node
                    .child_by_field_name("expression")
                    .or_else(|| parts.first().copied());
                let name = node
                    .child_by_field_name("name")
                    .or_else(|| parts.last().copied());
                let is_dot = children(node).iter().any(|c| c.kind() == ".");
                match (target, name) {
                    (Some(target), Some(name)) if target.id() != name.id() && is_dot => {
                        ExprKind::MemberAccess {
                            target: self.boxed(target, ctx),
                            name: self.simple_name(name),
                        }
                    }
                    _ => self.other(node, ctx),
                }
            }
            "invocation_expression" => {
                let function = node
                    .child_by_field_name("function")
                    .or_else(|| parts.first().copied());
                let arguments = node
                    .child_by_field_name("arguments")
                    .or_else(|| parts.iter().find(|c| c.kind() == "argument_list").copied());
                match (function, arguments) {
                    (Some(function), Some(arguments)) if function.id() != arguments.id() => {
                        ExprKind::Invocation {
                            target: self.boxed(function, ctx),
                            arguments: self.argument_list(arguments, ctx),
                        }
                    }
                    _ => self.other(node, ctx),
                }
            }
            "binary_expression" => {
                let operator = node
                    .child_by_field_name("operator")
                    .or_else(|| children(node).into_iter().find(|c| !c.is_named()))
                    .and_then(|op| BinaryOperator::from_token(self.text(op)));
                match (operator, parts.first(), parts.get(1)) {
                    (Some(operator), Some(left), Some(right)) => ExprKind::Binary {
                        operator,
                        left: self.boxed(*left, ctx),
                        right: self.boxed(*right, ctx),
                    },
                    _ => self.other(node, ctx),
                }
            }
            "prefix_unary_expression" | "unary_expression" => {
                let operator = children(node)
                    .into_iter()
                    .find(|c| !c.is_named())
                    .filter(|op| op.start_byte() == node.start_byte())
                    .and_then(|op| UnaryOperator::from_token(self.text(op)));
                match (operator, parts.first()) {
                    (Some(operator), Some(operand)) => ExprKind::Unary {
                        operator,
                        operand: self.boxed(*operand, ctx),
                    },
                    _ => self.other(node, ctx),
                }
            }
            "cast_expression" => {
                let ty = node
                    .child_by_field_name("type")
                    .or_else(|| parts.first().copied());
                let value = node
                    .child_by_field_name("value")
                    .or_else(|| parts.last().copied());
                match (ty, value) {
                    (Some(ty), Some(value)) if ty.id() != value.id() => ExprKind::Cast {
                        ty: self.type_syntax(ty),
                        operand: self.boxed(value, ctx),
                    },
                    _ => self.other(node, ctx),
                }
            }
            "conditional_expression" => {
                let condition = node.child_by_field_name("condition").or(parts.first().copied());
                let when_true = node.child_by_field_name("consequence").or(parts.get(1).copied());
                let when_false = node.child_by_field_name("alternative").or(parts.get(2).copied());
                match (condition, when_true, when_false) {
                    (Some(condition), Some(when_true), Some(when_false)) => ExprKind::Conditional {
                        condition: self.boxed(condition, ctx),
                        when_true: self.boxed(when_true, ctx),
                        when_false: self.boxed(when_false, ctx),
                    },
                    _ => self.other(node, ctx),
                }
            }
            "object_creation_expression" => {
                let ty = node
                    .child_by_field_name("type")
                    .or_else(|| parts.iter().find(|c| types::is_type_kind(c.kind())).copied());
                let Some(ty) = ty else {
                    return self.other(node, ctx);
                };
                let arguments = node
                    .child_by_field_name("arguments")
                    .or_else(|| parts.iter().find(|c| c.kind() == "argument_list").copied())
                    .map(|list| self.argument_list(list, ctx));
                if let Some(initializer) = parts.iter().find(|c| c.kind() == "initializer_expression") {
                    self.nested_roots(*initializer, ctx);
                }
                ExprKind::ObjectCreation {
                    ty: self.type_syntax(ty),
                    arguments,
                }
            }
            "array_creation_expression" => {
                let element_type = parts
                    .iter()
                    .find(|c| c.kind() == "array_type")
                    .and_then(|array| {
                        array
                            .child_by_field_name("type")
                            .or_else(|| named_children(*array).into_iter().next())
                    })
                    .map(|ty| self.type_syntax(ty));
                let elements = self.initializer_elements(&parts, ctx);
                ExprKind::ArrayCreation {
                    element_type,
                    elements,
                }
            }
            "implicit_array_creation_expression" => ExprKind::ArrayCreation {
                element_type: None,
                elements: self.initializer_elements(&parts, ctx),
            },
            "typeof_expression" => match parts.iter().find(|c| types::is_type_kind(c.kind())) {
                Some(ty) => ExprKind::TypeOf(self.type_syntax(*ty)),
                None => self.other(node, ctx),
            },
            "lambda_expression" | "anonymous_method_expression" => self.lambda(node, ctx),
            _ => self.other(node, ctx),
        }
    }

    /// An expression the model keeps opaque; calls nested in it still become roots
    fn other(&mut self, node: Node, ctx: Context) -> ExprKind {
        self.nested_roots(node, ctx);
        ExprKind::Other {
            kind: node.kind().to_string(),
        }
    }

    fn nested_roots(&mut self, node: Node, ctx: Context) {
        for child in named_children(node) {
            if child.kind() == "block" {
                self.statement(child, ctx);
            } else if is_expression_kind(child.kind()) {
                self.root(child, ctx);
            } else {
                self.nested_roots(child, ctx);
            }
        }
    }

    fn initializer_elements(&mut self, parts: &[Node], ctx: Context) -> Vec<Expr> {
        parts
            .iter()
            .find(|c| c.kind() == "initializer_expression")
            .map(|initializer| {
                named_children(*initializer)
                    .into_iter()
                    .map(|element| self.expression(element, ctx))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn lambda(&mut self, node: Node, ctx: Context) -> ExprKind {
        let parts = named_children(node);
        let parameters = match node
            .child_by_field_name("parameters")
            .or_else(|| parts.first().copied().filter(|p| p.kind() != "block"))
        {
            Some(list) if list.kind() == "parameter_list" => self.parameters(list),
            Some(single) if matches!(single.kind(), "implicit_parameter" | "identifier") => {
                vec![ParameterDecl {
                    name: self.text(single).to_string(),
                    ty: None,
                    is_params: false,
                    is_this: false,
                    is_optional: false,
                }]
            }
            _ => Vec::new(),
        };
        let Some(body) = node.child_by_field_name("body").or_else(|| parts.last().copied()) else {
            return ExprKind::Lambda { body: None };
        };
        self.declarations.bodies.push(BodyScope {
            span: span(node),
            parameters,
            type_parameters: Vec::new(),
            is_static: false,
        });
        let inner = Context {
            in_method_body: true,
            has_errors: ctx.has_errors,
            scope: span(body),
        };
        if body.kind() == "block" {
            self.statement(body, inner);
            ExprKind::Lambda { body: None }
        } else {
            ExprKind::Lambda {
                body: Some(self.boxed(body, inner)),
            }
        }
    }

    fn simple_name(&self, node: Node) -> SimpleName {
        let (identifier, type_arguments) = if node.kind() == "generic_name" {
            let identifier = named_children(node)
                .into_iter()
                .find(|c| c.kind() == "identifier")
                .map(|id| self.text(id).to_string())
                .unwrap_or_default();
            (identifier, Some(self.type_arguments(node)))
        } else {
            (self.text(node).to_string(), None)
        };
        SimpleName {
            identifier,
            type_arguments,
            span: Some(span(node)),
        }
    }

    /// Arguments with the source text around them as trivia
    fn argument_list(&mut self, node: Node, ctx: Context) -> ArgumentList {
        let mut arguments = Vec::new();
        let mut delimiter_end = node.start_byte();
        let mut pending: Option<(Node, String)> = None;

        for child in children(node) {
            match child.kind() {
                "(" => delimiter_end = child.end_byte(),
                "," | ")" => {
                    if let Some((argument, leading)) = pending.take() {
                        let trailing = self.source
                            .get(argument.end_byte()..child.start_byte())
                            .unwrap_or("");
                        if let Some(argument) = self.argument(argument, ctx, leading, trailing) {
                            arguments.push(argument);
                        }
                    }
                    delimiter_end = child.end_byte();
                }
                "argument" => {
                    let leading = self
                        .source
                        .get(delimiter_end..child.start_byte())
                        .unwrap_or("")
                        .to_string();
                    pending = Some((child, leading));
                }
                _ => {}
            }
        }
        if let Some((argument, leading)) = pending {
            if let Some(argument) = self.argument(argument, ctx, leading, "") {
                arguments.push(argument);
            }
        }

        ArgumentList {
            arguments,
            span: Some(span(node)),
        }
    }

    fn argument(
        &mut self,
        node: Node,
        ctx: Context,
        leading: String,
        trailing: &str,
    ) -> Option<Argument> {
        let name = node.child_by_field_name("name").or_else(|| {
            let parts = children(node);
            let colon = parts.iter().position(|c| c.kind() == ":")?;
            colon.checked_sub(1).and_then(|i| parts.get(i).copied())
        });
        let modifier = children(node)
            .into_iter()
            .find(|c| !c.is_named() && matches!(c.kind(), "ref" | "out" | "in"))
            .map(|c| c.kind().to_string());
        let expression = named_children(node)
            .into_iter()
            .rfind(|c| name.map_or(true, |n| n.id() != c.id()))?;
        Some(Argument {
            name: name.map(|n| self.text(n).to_string()),
            modifier,
            expression: self.expression(expression, ctx),
            leading_trivia: leading,
            trailing_trivia: trailing.to_string(),
            span: Some(span(node)),
        })
    }
}
