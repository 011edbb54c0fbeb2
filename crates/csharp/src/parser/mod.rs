//! tree-sitter based conversion of C# source into the core syntax model
//!
//! The walk relies on node kinds, anonymous token text and field names, and
//! falls back to positional children where grammar versions disagree.

mod expressions;
mod types;

use crate::declarations::{
    BodyScope, ConversionDecl, Declarations, FieldDecl, LocalDecl, LocalValue, MethodDecl,
    MethodKind, ParameterDecl, PropertyDecl, TypeDecl,
};
use nunit_analyzers_core::syntax::{Expr, ExprKind, RootExpression, Span, SyntaxTree, TypeSyntax};
use nunit_analyzers_core::syntax::TypeSyntaxKind;
use nunit_analyzers_core::{Error, Result, TypeKind};
use tracing::debug;
use tree_sitter::{Node, Parser};

/// The syntax tree and declarations of one document
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub tree: SyntaxTree,
    pub declarations: Declarations,
}

pub fn parse_source(source: &str) -> Result<ParsedSource> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .map_err(|e| Error::parse("<document>", format!("Failed to load C# grammar: {e}")))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::parse("<document>", "Parser produced no tree"))?;
    let root = tree.root_node();
    if root.has_error() {
        debug!("Document contains syntax errors");
    }

    let mut collector = Collector::new(source);
    collector.declaration_members(root, &DeclContext::default());

    let Collector {
        mut roots,
        declarations,
        ..
    } = collector;
    roots.sort_by_key(|root| {
        let span = root.expression.span.unwrap_or_default();
        (span.start, std::cmp::Reverse(span.end))
    });
    Ok(ParsedSource {
        tree: SyntaxTree::new(source, roots),
        declarations,
    })
}

/// Where an expression sits
#[derive(Debug, Clone, Copy)]
struct Context {
    in_method_body: bool,
    has_errors: bool,
    /// Innermost block, used as the scope of locals declared in it
    scope: Span,
}

#[derive(Debug, Clone, Default)]
struct DeclContext {
    namespace: String,
    outer: Option<usize>,
}

struct Collector<'s> {
    source: &'s str,
    roots: Vec<RootExpression>,
    declarations: Declarations,
}

fn span(node: Node) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

/// All children except comments and other extras
fn children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

/// An argument the grammar accepts but the language does not
///
/// `F(a b)` parses as a declaration expression (`T x`), which is only valid
/// as an `out` argument.
fn has_malformed_argument(node: Node) -> bool {
    if node.kind() == "argument"
        && !children(node).iter().any(|c| c.kind() == "out")
        && named_children(node)
            .iter()
            .any(|c| c.kind() == "declaration_expression")
    {
        return true;
    }
    named_children(node).into_iter().any(has_malformed_argument)
}

fn child_of_kind<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    named_children(node)
        .into_iter()
        .find(|child| kinds.contains(&child.kind()))
}

fn is_type_declaration(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration"
            | "struct_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "record_struct_declaration"
    )
}

const LITERAL_KINDS: &[&str] = &[
    "integer_literal",
    "real_literal",
    "string_literal",
    "verbatim_string_literal",
    "raw_string_literal",
    "character_literal",
    "boolean_literal",
    "null_literal",
];

fn is_expression_kind(kind: &str) -> bool {
    kind.ends_with("_expression")
        || LITERAL_KINDS.contains(&kind)
        || matches!(kind, "identifier" | "generic_name" | "this")
}

impl<'s> Collector<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            roots: Vec::new(),
            declarations: Declarations::default(),
        }
    }

    fn text(&self, node: Node) -> &'s str {
        span(node).text(self.source)
    }

    /// Modifier words written before `stop` (`static`, `ref`, `const`, ...)
    fn modifiers(&self, node: Node, stop: Node) -> Vec<&'s str> {
        children(node)
            .into_iter()
            .take_while(|child| child.start_byte() < stop.start_byte())
            .filter(|child| child.kind() == "modifier" || !child.is_named())
            .map(|child| self.text(child))
            .collect()
    }

    fn type_parameter_names(&self, node: Option<Node>) -> Vec<String> {
        let Some(list) = node else {
            return Vec::new();
        };
        named_children(list)
            .into_iter()
            .filter(|child| child.kind() == "type_parameter")
            .filter_map(|parameter| {
                parameter
                    .child_by_field_name("name")
                    .or_else(|| {
                        named_children(parameter)
                            .into_iter()
                            .rfind(|c| c.kind() == "identifier")
                    })
                    .map(|name| self.text(name).to_string())
            })
            .collect()
    }

    fn qualified_text(&self, node: Node) -> String {
        self.text(node).split_whitespace().collect()
    }

    fn register_namespace(&mut self, namespace: &str) {
        let mut prefix = String::new();
        for part in namespace.split('.') {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(part);
            self.declarations.namespaces.insert(prefix.clone());
        }
    }

    fn push_root(&mut self, expression: &Expr, ctx: Context, has_errors: bool) {
        if matches!(
            expression.kind,
            ExprKind::Name(_) | ExprKind::Literal(_) | ExprKind::PredefinedType(_) | ExprKind::This
        ) {
            return;
        }
        self.roots.push(RootExpression {
            expression: expression.clone(),
            in_method_body: ctx.in_method_body,
            has_errors: ctx.has_errors || has_errors,
        });
    }

    /// Converts a top-level expression and records it as a root
    fn root(&mut self, node: Node, ctx: Context) -> Expr {
        let expression = self.expression(node, ctx);
        let has_errors = node.has_error() || has_malformed_argument(node);
        if has_errors && !node.has_error() {
            debug!(start = node.start_byte(), "Malformed argument in expression");
        }
        self.push_root(&expression, ctx, has_errors);
        expression
    }

    // Declarations

    fn declaration_members(&mut self, node: Node, ctx: &DeclContext) {
        let mut ctx = ctx.clone();
        for child in named_children(node) {
            match child.kind() {
                "using_directive" => self.using_directive(child),
                "namespace_declaration" => self.namespace(child, &ctx),
                "file_scoped_namespace_declaration" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        ctx.namespace = join_namespace(&ctx.namespace, &self.qualified_text(name));
                        let namespace = ctx.namespace.clone();
                        self.register_namespace(&namespace);
                    }
                    self.declaration_members(child, &ctx);
                }
                "delegate_declaration" => self.delegate(child, &ctx),
                "global_statement" => {
                    let body = Context {
                        in_method_body: true,
                        has_errors: child.has_error(),
                        scope: span(node),
                    };
                    self.statements(child, body);
                }
                "ERROR" => self.declaration_members(child, &ctx),
                kind if is_type_declaration(kind) => self.type_declaration(child, &ctx),
                _ => {
                    if let Some(owner) = ctx.outer {
                        self.member(child, owner, &ctx);
                    }
                }
            }
        }
    }

    fn using_directive(&mut self, node: Node) {
        let words: Vec<&str> = children(node)
            .into_iter()
            .filter(|child| !child.is_named())
            .map(|child| self.text(child))
            .collect();
        // Aliases and static imports do not bring namespaces into scope
        if words.iter().any(|w| *w == "=" || *w == "static") {
            return;
        }
        if let Some(name) = named_children(node)
            .into_iter()
            .find(|c| matches!(c.kind(), "qualified_name" | "identifier"))
        {
            let namespace = self.qualified_text(name);
            if !self.declarations.usings.contains(&namespace) {
                self.declarations.usings.push(namespace);
            }
        }
    }

    fn namespace(&mut self, node: Node, ctx: &DeclContext) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let namespace = join_namespace(&ctx.namespace, &self.qualified_text(name));
        self.register_namespace(&namespace);
        let inner = DeclContext {
            namespace,
            outer: None,
        };
        if let Some(body) = node
            .child_by_field_name("body")
            .or_else(|| child_of_kind(node, &["declaration_list"]))
        {
            self.declaration_members(body, &inner);
        }
    }

    fn delegate(&mut self, node: Node, ctx: &DeclContext) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let mut decl = TypeDecl::new(self.text(name), ctx.namespace.clone(), TypeKind::Delegate);
        decl.outer = ctx.outer;
        decl.type_parameters = self.type_parameter_names(node.child_by_field_name("type_parameters"));
        decl.span = span(node);
        self.declarations.types.push(decl);
    }

    fn type_declaration(&mut self, node: Node, ctx: &DeclContext) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let kind = match node.kind() {
            "struct_declaration" | "record_struct_declaration" => TypeKind::Struct,
            "interface_declaration" => TypeKind::Interface,
            "enum_declaration" => TypeKind::Enum,
            _ => TypeKind::Class,
        };
        let modifiers = self.modifiers(node, name);
        let name_text = self.text(name).to_string();

        let mut decl = TypeDecl::new(name_text.clone(), ctx.namespace.clone(), kind);
        decl.outer = ctx.outer;
        decl.is_static = modifiers.contains(&"static");
        decl.is_ref_like = kind == TypeKind::Struct && modifiers.contains(&"ref");
        decl.type_parameters = self.type_parameter_names(
            node.child_by_field_name("type_parameters")
                .or_else(|| child_of_kind(node, &["type_parameter_list"])),
        );
        if let Some(bases) = child_of_kind(node, &["base_list"]) {
            decl.bases = named_children(bases)
                .into_iter()
                .filter_map(|base| {
                    let ty = if types::is_type_kind(base.kind()) {
                        base
                    } else {
                        // `Base(args)` in a record or primary-constructor base list
                        named_children(base)
                            .into_iter()
                            .find(|c| types::is_type_kind(c.kind()))?
                    };
                    Some(self.type_syntax(ty))
                })
                .collect();
        }
        decl.span = span(node);

        let index = self.declarations.types.len();
        self.declarations.types.push(decl);

        let Some(body) = node.child_by_field_name("body").or_else(|| {
            child_of_kind(node, &["declaration_list", "enum_member_declaration_list"])
        }) else {
            return;
        };

        if kind == TypeKind::Enum {
            let members: Vec<FieldDecl> = named_children(body)
                .into_iter()
                .filter(|m| m.kind() == "enum_member_declaration")
                .filter_map(|m| {
                    m.child_by_field_name("name")
                        .or_else(|| child_of_kind(m, &["identifier"]))
                })
                .map(|m| FieldDecl {
                    name: self.text(m).to_string(),
                    ty: TypeSyntax::named(name_text.clone(), Vec::new()),
                    is_static: true,
                    is_const: true,
                })
                .collect();
            if let Some(decl) = self.declarations.types.get_mut(index) {
                decl.fields = members;
            }
            return;
        }

        let inner = DeclContext {
            namespace: ctx.namespace.clone(),
            outer: Some(index),
        };
        self.declaration_members(body, &inner);
    }

    fn owner_is_static(&self, owner: usize) -> bool {
        self.declarations
            .types
            .get(owner)
            .is_some_and(|decl| decl.is_static)
    }

    fn member(&mut self, node: Node, owner: usize, ctx: &DeclContext) {
        match node.kind() {
            "method_declaration" => self.method(node, owner),
            "constructor_declaration" | "destructor_declaration" => self.constructor(node, owner),
            "operator_declaration" => self.operator(node, owner),
            "conversion_operator_declaration" => self.conversion(node, owner),
            "property_declaration" => self.property(node, owner),
            "indexer_declaration" => {
                let parameters = node
                    .child_by_field_name("parameters")
                    .or_else(|| child_of_kind(node, &["bracketed_parameter_list"]))
                    .map(|p| self.parameters(p))
                    .unwrap_or_default();
                self.accessors(node, parameters, self.owner_is_static(owner));
            }
            "event_declaration" => self.accessors(node, Vec::new(), false),
            "field_declaration" | "event_field_declaration" => self.field(node, owner),
            _ => {
                debug!(kind = node.kind(), namespace = %ctx.namespace, "Skipping member");
            }
        }
    }

    fn add_member_method(&mut self, owner: usize, method: MethodDecl) {
        if let Some(decl) = self.declarations.types.get_mut(owner) {
            decl.methods.push(method);
        }
    }

    fn method(&mut self, node: Node, owner: usize) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let modifiers = self.modifiers(node, name);
        let return_type = node
            .child_by_field_name("returns")
            .or_else(|| node.child_by_field_name("type"))
            .map(|ty| self.type_syntax(ty))
            .unwrap_or_else(|| TypeSyntax::predefined("void"));
        let type_parameters = self.type_parameter_names(
            node.child_by_field_name("type_parameters")
                .or_else(|| child_of_kind(node, &["type_parameter_list"])),
        );
        let parameters = self.declared_parameters(node);
        let is_static = modifiers.contains(&"static") || self.owner_is_static(owner);
        self.add_member_method(
            owner,
            MethodDecl {
                name: self.text(name).to_string(),
                kind: MethodKind::Ordinary,
                type_parameters: type_parameters.clone(),
                parameters: parameters.clone(),
                return_type,
                is_static,
            },
        );
        self.method_body(node, parameters, type_parameters, is_static);
    }

    fn constructor(&mut self, node: Node, owner: usize) {
        let parameters = self.declared_parameters(node);
        let is_static = node
            .child_by_field_name("name")
            .is_some_and(|name| self.modifiers(node, name).contains(&"static"));
        let owner_name = self
            .declarations
            .types
            .get(owner)
            .map(|decl| decl.name.clone())
            .unwrap_or_default();
        self.add_member_method(
            owner,
            MethodDecl {
                name: ".ctor".to_string(),
                kind: MethodKind::Constructor,
                type_parameters: Vec::new(),
                parameters: parameters.clone(),
                return_type: TypeSyntax::named(owner_name, Vec::new()),
                is_static,
            },
        );
        self.method_body(node, parameters, Vec::new(), is_static);
    }

    fn operator(&mut self, node: Node, owner: usize) {
        let token = node
            .child_by_field_name("operator")
            .map(|op| self.text(op).to_string())
            .or_else(|| {
                let parts = children(node);
                let keyword = parts.iter().position(|c| c.kind() == "operator")?;
                parts.get(keyword + 1).map(|op| self.text(*op).to_string())
            });
        let Some(token) = token else {
            return;
        };
        let return_type = node
            .child_by_field_name("type")
            .or_else(|| node.child_by_field_name("returns"))
            .map(|ty| self.type_syntax(ty))
            .unwrap_or_else(|| TypeSyntax::predefined("object"));
        let parameters = self.declared_parameters(node);
        self.add_member_method(
            owner,
            MethodDecl {
                name: token,
                kind: MethodKind::Operator,
                type_parameters: Vec::new(),
                parameters: parameters.clone(),
                return_type,
                is_static: true,
            },
        );
        self.method_body(node, parameters, Vec::new(), true);
    }

    fn conversion(&mut self, node: Node, owner: usize) {
        let is_implicit = children(node)
            .into_iter()
            .any(|child| !child.is_named() && self.text(child) == "implicit");
        let target = node.child_by_field_name("type").map(|ty| self.type_syntax(ty));
        let parameters = self.declared_parameters(node);
        let source = parameters.first().and_then(|p| p.ty.clone());
        if let (Some(target), Some(source)) = (target, source) {
            if let Some(decl) = self.declarations.types.get_mut(owner) {
                decl.conversions.push(ConversionDecl {
                    is_implicit,
                    source,
                    target,
                });
            }
        }
        self.method_body(node, parameters, Vec::new(), true);
    }

    fn property(&mut self, node: Node, owner: usize) {
        let (Some(name), Some(ty)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("type"),
        ) else {
            return;
        };
        let modifiers = self.modifiers(node, name);
        let is_static = modifiers.contains(&"static") || self.owner_is_static(owner);
        let ty_syntax = self.type_syntax(ty);
        let name = self.text(name).to_string();
        if let Some(decl) = self.declarations.types.get_mut(owner) {
            decl.properties.push(PropertyDecl {
                name,
                ty: ty_syntax.clone(),
                is_static,
            });
        }
        let value_parameter = ParameterDecl {
            name: "value".to_string(),
            ty: Some(ty_syntax),
            is_params: false,
            is_this: false,
            is_optional: false,
        };
        self.accessors(node, vec![value_parameter], is_static);

        if let Some(value) = node.child_by_field_name("value") {
            if value.kind() != "arrow_expression_clause" {
                let ctx = Context {
                    in_method_body: false,
                    has_errors: node.has_error(),
                    scope: span(node),
                };
                self.root(value, ctx);
            }
        }
    }

    /// Accessor bodies and expression bodies of properties, indexers and events
    fn accessors(&mut self, node: Node, parameters: Vec<ParameterDecl>, is_static: bool) {
        for child in named_children(node) {
            match child.kind() {
                "accessor_list" => {
                    for accessor in named_children(child) {
                        if accessor.kind() == "accessor_declaration" {
                            self.method_body(accessor, parameters.clone(), Vec::new(), is_static);
                        }
                    }
                }
                "arrow_expression_clause" => {
                    self.body(child, parameters.clone(), Vec::new(), is_static)
                }
                _ => {}
            }
        }
    }

    fn field(&mut self, node: Node, owner: usize) {
        let Some(declaration) = child_of_kind(node, &["variable_declaration"]) else {
            return;
        };
        let modifiers = self.modifiers(node, declaration);
        let is_const = modifiers.contains(&"const");
        let is_static = is_const || modifiers.contains(&"static") || self.owner_is_static(owner);
        let Some(ty) = declaration.child_by_field_name("type") else {
            return;
        };
        let ty = self.type_syntax(ty);
        let ctx = Context {
            in_method_body: false,
            has_errors: node.has_error(),
            scope: span(node),
        };
        for declarator in named_children(declaration) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let Some(name) = self.declarator_name(declarator) else {
                continue;
            };
            if let Some(decl) = self.declarations.types.get_mut(owner) {
                decl.fields.push(FieldDecl {
                    name,
                    ty: ty.clone(),
                    is_static,
                    is_const,
                });
            }
            if let Some(value) = declarator_value(declarator) {
                self.root(value, ctx);
            }
        }
    }

    fn declared_parameters(&self, node: Node) -> Vec<ParameterDecl> {
        node.child_by_field_name("parameters")
            .or_else(|| child_of_kind(node, &["parameter_list"]))
            .map(|list| self.parameters(list))
            .unwrap_or_default()
    }

    fn parameters(&self, list: Node) -> Vec<ParameterDecl> {
        let mut parameters: Vec<ParameterDecl> = named_children(list)
            .into_iter()
            .filter(|p| matches!(p.kind(), "parameter" | "parameter_array"))
            .filter_map(|p| self.parameter(p))
            .collect();
        // `params T[] name` is not wrapped in a node; its parts are fields of the list
        if let Some(name) = list.child_by_field_name("name") {
            parameters.push(ParameterDecl {
                name: self.text(name).to_string(),
                ty: list
                    .child_by_field_name("type")
                    .map(|t| self.type_syntax(t)),
                is_params: true,
                is_this: false,
                is_optional: false,
            });
        }
        parameters
    }

    fn parameter(&self, node: Node) -> Option<ParameterDecl> {
        let parts = named_children(node);
        let name = node
            .child_by_field_name("name")
            .or_else(|| parts.iter().rev().find(|c| c.kind() == "identifier").copied())?;
        let ty = node.child_by_field_name("type").or_else(|| {
            parts
                .iter()
                .find(|c| c.id() != name.id() && types::is_type_kind(c.kind()))
                .copied()
        });
        let words: Vec<&str> = children(node)
            .into_iter()
            .filter(|c| c.id() != name.id() && ty.map_or(true, |t| t.id() != c.id()))
            .filter(|c| !c.is_named() || c.kind() == "modifier")
            .map(|c| self.text(c))
            .collect();
        Some(ParameterDecl {
            name: self.text(name).to_string(),
            ty: ty.map(|t| self.type_syntax(t)),
            is_params: node.kind() == "parameter_array" || words.contains(&"params"),
            is_this: words.contains(&"this"),
            is_optional: words.contains(&"="),
        })
    }

    // Bodies and statements

    fn method_body(
        &mut self,
        node: Node,
        parameters: Vec<ParameterDecl>,
        type_parameters: Vec<String>,
        is_static: bool,
    ) {
        let body = node
            .child_by_field_name("body")
            .filter(|b| b.is_named())
            .or_else(|| child_of_kind(node, &["block", "arrow_expression_clause"]));
        if let Some(body) = body {
            self.body(body, parameters, type_parameters, is_static);
        }
    }

    fn body(
        &mut self,
        body: Node,
        parameters: Vec<ParameterDecl>,
        type_parameters: Vec<String>,
        is_static: bool,
    ) {
        self.declarations.bodies.push(BodyScope {
            span: span(body),
            parameters,
            type_parameters,
            is_static,
        });
        let ctx = Context {
            in_method_body: true,
            has_errors: false,
            scope: span(body),
        };
        self.statements(body, ctx);
    }

    fn statements(&mut self, node: Node, ctx: Context) {
        for child in named_children(node) {
            self.statement(child, ctx);
        }
    }

    fn statement(&mut self, node: Node, ctx: Context) {
        let kind = node.kind();
        if is_expression_kind(kind) {
            self.root(node, ctx);
            return;
        }
        let mut ctx = ctx;
        if kind == "ERROR" {
            ctx.has_errors = true;
        } else if kind.ends_with("_statement") {
            ctx.has_errors |= node.has_error();
        }
        if matches!(
            kind,
            "block" | "switch_section" | "for_statement" | "using_statement" | "fixed_statement"
        ) {
            ctx.scope = span(node);
        }
        match kind {
            "variable_declaration" => self.variable_declaration(node, ctx),
            "foreach_statement" => self.foreach(node, ctx),
            "local_function_statement" => self.local_function(node),
            "attribute_list" => {}
            _ if types::is_type_kind(kind) => {}
            _ => self.statements(node, ctx),
        }
    }

    fn declarator_name(&self, declarator: Node) -> Option<String> {
        declarator
            .child_by_field_name("name")
            .or_else(|| child_of_kind(declarator, &["identifier"]))
            .map(|name| self.text(name).to_string())
    }

    fn variable_declaration(&mut self, node: Node, ctx: Context) {
        let ty = node
            .child_by_field_name("type")
            .map(|ty| self.type_syntax(ty))
            .filter(|ty| ty.kind != TypeSyntaxKind::Var);
        for declarator in named_children(node) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let value = declarator_value(declarator).map(|value| self.root(value, ctx));
            let Some(name) = self.declarator_name(declarator) else {
                continue;
            };
            self.declarations.locals.push(LocalDecl {
                name,
                ty: ty.clone(),
                value: value.map_or(LocalValue::None, LocalValue::Initializer),
                scope: ctx.scope,
                visible_from: declarator.end_byte(),
            });
        }
    }

    fn foreach(&mut self, node: Node, ctx: Context) {
        let collection = node
            .child_by_field_name("right")
            .map(|right| self.root(right, ctx));
        let scope = span(node);
        if let Some(left) = node.child_by_field_name("left") {
            if left.kind() == "identifier" {
                let ty = node
                    .child_by_field_name("type")
                    .map(|ty| self.type_syntax(ty))
                    .filter(|ty| ty.kind != TypeSyntaxKind::Var);
                self.declarations.locals.push(LocalDecl {
                    name: self.text(left).to_string(),
                    ty,
                    value: collection.map_or(LocalValue::None, LocalValue::ElementOf),
                    scope,
                    visible_from: left.end_byte(),
                });
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.statement(body, Context { scope, ..ctx });
        }
    }

    fn local_function(&mut self, node: Node) {
        let type_parameters = self.type_parameter_names(
            node.child_by_field_name("type_parameters")
                .or_else(|| child_of_kind(node, &["type_parameter_list"])),
        );
        let parameters = self.declared_parameters(node);
        self.method_body(node, parameters, type_parameters, false);
    }
}

fn join_namespace(outer: &str, inner: &str) -> String {
    if outer.is_empty() {
        inner.to_string()
    } else {
        format!("{outer}.{inner}")
    }
}

/// The initializer of `name = value`, with or without an `equals_value_clause`
fn declarator_value(declarator: Node) -> Option<Node> {
    let parts = children(declarator);
    if let Some(clause) = parts.iter().find(|c| c.kind() == "equals_value_clause") {
        return named_children(*clause).into_iter().next();
    }
    let equals = parts.iter().position(|c| !c.is_named() && c.kind() == "=")?;
    parts[equals + 1..].iter().find(|c| c.is_named()).copied()
}

#[cfg(test)]
mod tests;
