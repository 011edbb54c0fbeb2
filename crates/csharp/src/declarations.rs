//! Declarations extracted from a C# document

use nunit_analyzers_core::syntax::{Expr, Span, TypeSyntax};
use nunit_analyzers_core::TypeKind;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub name: String,
    /// `None` for implicitly typed lambda parameters
    pub ty: Option<TypeSyntax>,
    pub is_params: bool,
    /// Declared with the `this` modifier (extension receiver)
    pub is_this: bool,
    /// Has a default value
    pub is_optional: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Ordinary,
    Constructor,
    /// A user-defined operator; the name holds its token (`==`, `&`)
    Operator,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub kind: MethodKind,
    pub type_parameters: Vec<String>,
    pub parameters: Vec<ParameterDecl>,
    pub return_type: TypeSyntax,
    pub is_static: bool,
}

impl MethodDecl {
    pub fn is_extension(&self) -> bool {
        self.is_static && self.parameters.first().is_some_and(|p| p.is_this)
    }

    pub fn params_index(&self) -> Option<usize> {
        self.parameters.iter().position(|p| p.is_params)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: TypeSyntax,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeSyntax,
    pub is_static: bool,
    pub is_const: bool,
}

/// `implicit operator Target(Source value)` or its explicit counterpart
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionDecl {
    pub is_implicit: bool,
    pub source: TypeSyntax,
    pub target: TypeSyntax,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub namespace: String,
    /// Index of the enclosing type within the same document
    pub outer: Option<usize>,
    pub kind: TypeKind,
    pub is_static: bool,
    pub is_ref_like: bool,
    pub type_parameters: Vec<String>,
    pub bases: Vec<TypeSyntax>,
    pub methods: Vec<MethodDecl>,
    pub properties: Vec<PropertyDecl>,
    pub fields: Vec<FieldDecl>,
    pub conversions: Vec<ConversionDecl>,
    pub span: Span,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            outer: None,
            kind,
            is_static: false,
            is_ref_like: false,
            type_parameters: Vec::new(),
            bases: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            fields: Vec::new(),
            conversions: Vec::new(),
            span: Span::default(),
        }
    }

    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }
}

/// A method-like body: its parameters are in scope inside `span`
#[derive(Debug, Clone, PartialEq)]
pub struct BodyScope {
    pub span: Span,
    pub parameters: Vec<ParameterDecl>,
    pub type_parameters: Vec<String>,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocalValue {
    None,
    /// `= expression`
    Initializer(Expr),
    /// The iterated collection of a `foreach`
    ElementOf(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalDecl {
    pub name: String,
    /// `None` for `var`
    pub ty: Option<TypeSyntax>,
    pub value: LocalValue,
    /// The block (or statement) the local is visible in
    pub scope: Span,
    /// Offset after which the local may be referenced
    pub visible_from: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    pub types: Vec<TypeDecl>,
    pub bodies: Vec<BodyScope>,
    pub locals: Vec<LocalDecl>,
    /// Namespaces imported with `using`
    pub usings: Vec<String>,
    /// Every namespace declared in the document, including parents
    pub namespaces: BTreeSet<String>,
}

impl Declarations {
    /// `Namespace.Outer` for nested types, the namespace otherwise
    pub fn container_of(&self, index: usize) -> String {
        let Some(decl) = self.types.get(index) else {
            return String::new();
        };
        match decl.outer {
            Some(outer) => {
                let parent = self.container_of(outer);
                let outer_name = self.types.get(outer).map_or("", |d| d.name.as_str());
                if parent.is_empty() {
                    outer_name.to_string()
                } else {
                    format!("{parent}.{outer_name}")
                }
            }
            None => decl.namespace.clone(),
        }
    }

    /// Types enclosing `offset`, innermost first
    pub fn enclosing_types(&self, offset: usize) -> Vec<usize> {
        let mut found: Vec<usize> = self
            .types
            .iter()
            .enumerate()
            .filter(|(_, decl)| decl.span.start <= offset && offset < decl.span.end)
            .map(|(index, _)| index)
            .collect();
        found.sort_by_key(|index| std::cmp::Reverse(self.types[*index].span.start));
        found
    }
}
