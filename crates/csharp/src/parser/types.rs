use super::{children, named_children, span, Collector};
use nunit_analyzers_core::syntax::{TypeSyntax, TypeSyntaxKind};
use tree_sitter::Node;

pub(super) fn is_type_kind(kind: &str) -> bool {
    matches!(
        kind,
        "predefined_type"
            | "identifier"
            | "generic_name"
            | "qualified_name"
            | "alias_qualified_name"
            | "array_type"
            | "nullable_type"
            | "implicit_type"
            | "pointer_type"
            | "function_pointer_type"
            | "tuple_type"
            | "ref_type"
            | "scoped_type"
    )
}

impl Collector<'_> {
    pub(super) fn type_syntax(&self, node: Node) -> TypeSyntax {
        let parts = named_children(node);
        let kind = match node.kind() {
            "predefined_type" => TypeSyntaxKind::Predefined(self.text(node).to_string()),
            "implicit_type" => TypeSyntaxKind::Var,
            "identifier" if self.text(node) == "var" => TypeSyntaxKind::Var,
            "identifier" => TypeSyntaxKind::Named {
                qualifier: None,
                name: self.text(node).to_string(),
                type_arguments: Vec::new(),
            },
            "generic_name" => self.generic_type(node, None),
            "qualified_name" => {
                let qualifier = node
                    .child_by_field_name("qualifier")
                    .or_else(|| parts.first().copied());
                let name = node
                    .child_by_field_name("name")
                    .or_else(|| parts.last().copied());
                match (qualifier, name) {
                    (Some(qualifier), Some(name)) if qualifier.id() != name.id() => {
                        let qualifier = Box::new(self.type_syntax(qualifier));
                        if name.kind() == "generic_name" {
                            self.generic_type(name, Some(qualifier))
                        } else {
                            TypeSyntaxKind::Named {
                                qualifier: Some(qualifier),
                                name: self.text(name).to_string(),
                                type_arguments: Vec::new(),
                            }
                        }
                    }
                    _ => TypeSyntaxKind::Other(self.text(node).to_string()),
                }
            }
            "array_type" => {
                let element = node
                    .child_by_field_name("type")
                    .or_else(|| parts.first().copied());
                match element {
                    Some(element) => {
                        let rank = node
                            .child_by_field_name("rank")
                            .or_else(|| {
                                parts
                                    .iter()
                                    .find(|c| c.kind() == "array_rank_specifier")
                                    .copied()
                            })
                            .map_or(1, |rank| {
                                1 + children(rank)
                                    .iter()
                                    .filter(|c| c.kind() == ",")
                                    .count()
                            });
                        TypeSyntaxKind::Array {
                            element: Box::new(self.type_syntax(element)),
                            rank,
                        }
                    }
                    None => TypeSyntaxKind::Other(self.text(node).to_string()),
                }
            }
            "nullable_type" => match node
                .child_by_field_name("type")
                .or_else(|| parts.first().copied())
            {
                Some(inner) => TypeSyntaxKind::Nullable(Box::new(self.type_syntax(inner))),
                None => TypeSyntaxKind::Other(self.text(node).to_string()),
            },
            _ => TypeSyntaxKind::Other(self.text(node).to_string()),
        };
        TypeSyntax {
            kind,
            span: Some(span(node)),
        }
    }

    fn generic_type(&self, node: Node, qualifier: Option<Box<TypeSyntax>>) -> TypeSyntaxKind {
        let parts = named_children(node);
        let name = node
            .child_by_field_name("name")
            .or_else(|| parts.iter().find(|c| c.kind() == "identifier").copied());
        let type_arguments = self.type_arguments(node);
        TypeSyntaxKind::Named {
            qualifier,
            name: name.map(|n| self.text(n).to_string()).unwrap_or_default(),
            type_arguments,
        }
    }

    /// Type arguments of a `generic_name`
    pub(super) fn type_arguments(&self, node: Node) -> Vec<TypeSyntax> {
        named_children(node)
            .into_iter()
            .find(|c| c.kind() == "type_argument_list")
            .map(|list| {
                named_children(list)
                    .into_iter()
                    .filter(|c| is_type_kind(c.kind()))
                    .map(|c| self.type_syntax(c))
                    .collect()
            })
            .unwrap_or_default()
    }
}
