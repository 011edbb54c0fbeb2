//! Type declarations of the prelude and the document, addressable by name

use crate::declarations::{Declarations, TypeDecl};
use crate::prelude::prelude;
use nunit_analyzers_core::syntax::{TypeSyntax, TypeSyntaxKind};
use nunit_analyzers_core::{SpecialType, TypeKind, TypeSymbol};
use std::collections::{HashMap, HashSet, VecDeque};

/// Namespaces every document sees without a `using`
pub(crate) const IMPLICIT_USINGS: &[&str] = &["System", "System.Collections.Generic", "System.Linq"];

const MAX_SUPERTYPES: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) enum Origin {
    Prelude,
    #[default]
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TypeId {
    pub origin: Origin,
    pub index: usize,
}

/// Type parameter name to type argument
pub(crate) type Substitution = HashMap<String, TypeSymbol>;

/// Where a type name is written: the names it can see
#[derive(Debug, Clone, Default)]
pub(crate) struct TypeScope {
    pub origin: Origin,
    /// Enclosing type indices within `origin`, innermost first
    pub enclosing: Vec<usize>,
    pub namespace: String,
    pub type_parameters: Vec<String>,
}

pub(crate) struct TypeTable {
    prelude: &'static Declarations,
    document: Declarations,
    by_name: HashMap<(String, usize), TypeId>,
}

pub(crate) fn substitute(ty: &TypeSymbol, map: &Substitution) -> TypeSymbol {
    if map.is_empty() {
        return ty.clone();
    }
    if ty.kind == TypeKind::TypeParameter {
        if let Some(argument) = map.get(&ty.name) {
            return argument.clone();
        }
        return ty.clone();
    }
    let mut result = ty.clone();
    result.type_arguments = ty.type_arguments.iter().map(|t| substitute(t, map)).collect();
    result.element_type = ty
        .element_type
        .as_ref()
        .map(|element| Box::new(substitute(element, map)));
    result
}

fn unresolved(name: &str) -> TypeSymbol {
    let mut error = TypeSymbol::error();
    error.name = name.to_string();
    error
}

impl TypeTable {
    pub fn new(document: Declarations) -> Self {
        Self::with_prelude(prelude(), document)
    }

    pub fn with_prelude(prelude: &'static Declarations, document: Declarations) -> Self {
        let mut by_name = HashMap::new();
        for (origin, declarations) in [(Origin::Prelude, prelude), (Origin::Document, &document)] {
            for (index, decl) in declarations.types.iter().enumerate() {
                let full_name = qualified(&declarations.container_of(index), &decl.name);
                by_name.insert((full_name, decl.arity()), TypeId { origin, index });
            }
        }
        Self {
            prelude,
            document,
            by_name,
        }
    }

    pub fn declarations(&self, origin: Origin) -> &Declarations {
        match origin {
            Origin::Prelude => self.prelude,
            Origin::Document => &self.document,
        }
    }

    pub fn document(&self) -> &Declarations {
        &self.document
    }

    pub fn decl(&self, id: TypeId) -> Option<&TypeDecl> {
        self.declarations(id.origin).types.get(id.index)
    }

    pub fn full_name(&self, id: TypeId) -> String {
        let declarations = self.declarations(id.origin);
        let name = declarations
            .types
            .get(id.index)
            .map_or("", |decl| decl.name.as_str());
        qualified(&declarations.container_of(id.index), name)
    }

    pub fn find(&self, full_name: &str, arity: usize) -> Option<TypeId> {
        self.by_name.get(&(full_name.to_string(), arity)).copied()
    }

    pub fn id_of(&self, ty: &TypeSymbol) -> Option<TypeId> {
        match ty.kind {
            TypeKind::Array => self.find("System.Array", 0),
            TypeKind::TypeParameter | TypeKind::Null | TypeKind::Error | TypeKind::Void => None,
            _ => self.find(&ty.full_name(), ty.arity()),
        }
    }

    pub fn symbol_of(&self, id: TypeId, type_arguments: Vec<TypeSymbol>) -> TypeSymbol {
        let Some(decl) = self.decl(id) else {
            return TypeSymbol::error();
        };
        let container = self.declarations(id.origin).container_of(id.index);
        let mut symbol =
            TypeSymbol::named(container, decl.name.clone(), decl.kind).with_type_arguments(type_arguments);
        symbol.is_ref_like = decl.is_ref_like;
        symbol
    }

    /// A type by full name, or an error type when it is not declared
    pub fn constructed(&self, full_name: &str, type_arguments: Vec<TypeSymbol>) -> TypeSymbol {
        match self.find(full_name, type_arguments.len()) {
            Some(id) => self.symbol_of(id, type_arguments),
            None => unresolved(full_name),
        }
    }

    pub fn well_known(&self, full_name: &str) -> TypeSymbol {
        self.constructed(full_name, Vec::new())
    }

    pub fn special(&self, special: SpecialType) -> TypeSymbol {
        match special {
            SpecialType::Void => TypeSymbol::named("System", "Void", TypeKind::Void),
            _ => special
                .full_name()
                .map_or_else(TypeSymbol::error, |name| self.well_known(name)),
        }
    }

    pub fn object(&self) -> TypeSymbol {
        self.special(SpecialType::Object)
    }

    pub fn nullable_of(&self, inner: TypeSymbol) -> TypeSymbol {
        self.constructed("System.Nullable", vec![inner])
    }

    /// The scope member signatures of a declared type are written in
    pub fn decl_scope(&self, id: TypeId) -> TypeScope {
        let declarations = self.declarations(id.origin);
        let mut enclosing = Vec::new();
        let mut type_parameters = Vec::new();
        let mut current = Some(id.index);
        while let Some(index) = current {
            let Some(decl) = declarations.types.get(index) else {
                break;
            };
            enclosing.push(index);
            type_parameters.extend(decl.type_parameters.iter().cloned());
            current = decl.outer;
        }
        TypeScope {
            origin: id.origin,
            enclosing,
            namespace: self
                .decl(id)
                .map(|decl| decl.namespace.clone())
                .unwrap_or_default(),
            type_parameters,
        }
    }

    pub fn resolve(&self, syntax: &TypeSyntax, scope: &TypeScope) -> TypeSymbol {
        match &syntax.kind {
            TypeSyntaxKind::Predefined(keyword) => match SpecialType::from_keyword(keyword) {
                Some(special) => self.special(special),
                None => unresolved(keyword),
            },
            TypeSyntaxKind::Named {
                qualifier,
                name,
                type_arguments,
            } => {
                let arguments: Vec<TypeSymbol> = type_arguments
                    .iter()
                    .map(|argument| self.resolve(argument, scope))
                    .collect();
                let id = match qualifier {
                    None => {
                        if arguments.is_empty() && scope.type_parameters.contains(name) {
                            return TypeSymbol::type_parameter(name.clone());
                        }
                        self.lookup(name, arguments.len(), scope)
                    }
                    Some(qualifier) => self.lookup_qualified(qualifier, name, arguments.len(), scope),
                };
                match id {
                    Some(id) => self.symbol_of(id, arguments),
                    None => unresolved(name),
                }
            }
            TypeSyntaxKind::Array { element, .. } => TypeSymbol::array(self.resolve(element, scope)),
            TypeSyntaxKind::Nullable(inner) => {
                let inner = self.resolve(inner, scope);
                if inner.is_value_type() {
                    self.nullable_of(inner)
                } else {
                    // Nullable reference annotations do not change the type
                    inner
                }
            }
            TypeSyntaxKind::Var => unresolved("var"),
            TypeSyntaxKind::Other(text) => unresolved(text),
        }
    }

    fn lookup(&self, name: &str, arity: usize, scope: &TypeScope) -> Option<TypeId> {
        for &index in &scope.enclosing {
            let outer = self.full_name(TypeId {
                origin: scope.origin,
                index,
            });
            if let Some(id) = self.find(&qualified(&outer, name), arity) {
                return Some(id);
            }
        }
        self.namespace_candidates(scope)
            .iter()
            .find_map(|namespace| self.find(&qualified(namespace, name), arity))
    }

    fn lookup_qualified(
        &self,
        qualifier: &TypeSyntax,
        name: &str,
        arity: usize,
        scope: &TypeScope,
    ) -> Option<TypeId> {
        let outer = self.resolve(qualifier, scope);
        if !outer.is_error() {
            return self.find(&qualified(&outer.full_name(), name), arity);
        }
        let prefix = dotted(qualifier)?;
        let prefix = prefix.strip_prefix("global::").unwrap_or(&prefix).to_string();
        let full = qualified(&prefix, name);
        self.find(&full, arity).or_else(|| {
            self.namespace_candidates(scope)
                .iter()
                .find_map(|namespace| self.find(&qualified(namespace, &full), arity))
        })
    }

    /// Enclosing namespaces innermost first, then imported ones
    fn namespace_candidates(&self, scope: &TypeScope) -> Vec<String> {
        let mut candidates = Vec::new();
        let mut namespace = scope.namespace.as_str();
        loop {
            candidates.push(namespace.to_string());
            match namespace.rfind('.') {
                Some(dot) => namespace = &namespace[..dot],
                None if !namespace.is_empty() => namespace = "",
                None => break,
            }
        }
        candidates.extend(self.declarations(scope.origin).usings.iter().cloned());
        candidates.extend(IMPLICIT_USINGS.iter().map(|u| u.to_string()));
        candidates
    }

    pub fn is_namespace(&self, name: &str) -> bool {
        self.prelude.namespaces.contains(name) || self.document.namespaces.contains(name)
    }

    /// Type parameters of the declaration of `ty` mapped to its type arguments
    pub fn substitution(&self, id: TypeId, ty: &TypeSymbol) -> Substitution {
        let scope = self.decl_scope(id);
        scope
            .type_parameters
            .iter()
            .zip(ty.type_arguments.iter())
            .map(|(parameter, argument)| (parameter.clone(), argument.clone()))
            .collect()
    }

    pub fn direct_supertypes(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        match ty.kind {
            TypeKind::Array => {
                let element = ty.element_type.as_deref().cloned().unwrap_or_else(TypeSymbol::error);
                let mut supertypes = vec![self.well_known("System.Array")];
                for interface in [
                    "System.Collections.Generic.IList",
                    "System.Collections.Generic.ICollection",
                    "System.Collections.Generic.IEnumerable",
                    "System.Collections.Generic.IReadOnlyCollection",
                ] {
                    supertypes.push(self.constructed(interface, vec![element.clone()]));
                }
                supertypes
            }
            TypeKind::TypeParameter => vec![self.object()],
            TypeKind::Null | TypeKind::Error | TypeKind::Void => Vec::new(),
            _ => {
                let Some(id) = self.id_of(ty) else {
                    return Vec::new();
                };
                let Some(decl) = self.decl(id) else {
                    return Vec::new();
                };
                let scope = self.decl_scope(id);
                let map = self.substitution(id, ty);
                let mut bases: Vec<TypeSymbol> = decl
                    .bases
                    .iter()
                    .map(|base| substitute(&self.resolve(base, &scope), &map))
                    .filter(|base| !base.is_error())
                    .collect();
                match decl.kind {
                    TypeKind::Class => {
                        let has_class_base = bases.iter().any(|b| b.kind == TypeKind::Class);
                        if !has_class_base && ty.special != SpecialType::Object {
                            bases.insert(0, self.object());
                        }
                    }
                    TypeKind::Struct => bases.insert(0, self.special(SpecialType::ValueType)),
                    TypeKind::Enum => bases = vec![self.well_known("System.Enum")],
                    TypeKind::Delegate => bases = vec![self.well_known("System.Delegate")],
                    _ => {}
                }
                bases
            }
        }
    }

    /// `ty` followed by every base class and interface, nearest first
    pub fn supertypes(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        let mut seen: HashSet<TypeSymbol> = HashSet::new();
        let mut ordered = Vec::new();
        let mut queue = VecDeque::from([ty.clone()]);
        while let Some(current) = queue.pop_front() {
            if ordered.len() >= MAX_SUPERTYPES || !seen.insert(current.clone()) {
                continue;
            }
            queue.extend(self.direct_supertypes(&current));
            ordered.push(current);
        }
        if ty.kind == TypeKind::Interface {
            let object = self.object();
            if !seen.contains(&object) {
                ordered.push(object);
            }
        }
        ordered
    }

    pub fn is_derived_from(&self, ty: &TypeSymbol, base_full_name: &str) -> bool {
        self.supertypes(ty)
            .iter()
            .any(|t| t.full_name() == base_full_name)
    }

    /// The iteration type of a `foreach` over `collection`
    pub fn element_type(&self, collection: &TypeSymbol) -> TypeSymbol {
        if let Some(element) = &collection.element_type {
            return element.as_ref().clone();
        }
        if collection.special == SpecialType::String {
            return self.special(SpecialType::Char);
        }
        if collection.is_error() {
            return collection.clone();
        }
        self.supertypes(collection)
            .into_iter()
            .find(|t| t.full_name() == "System.Collections.Generic.IEnumerable" && t.arity() == 1)
            .and_then(|t| t.type_arguments.into_iter().next())
            .unwrap_or_else(|| self.object())
    }

    /// Static classes whose extension methods are visible from `scope`
    pub fn extension_holders(&self, scope: &TypeScope) -> Vec<TypeId> {
        let visible = self.namespace_candidates(scope);
        let mut holders = Vec::new();
        for origin in [Origin::Document, Origin::Prelude] {
            for (index, decl) in self.declarations(origin).types.iter().enumerate() {
                if decl.is_static
                    && decl.outer.is_none()
                    && visible.contains(&decl.namespace)
                    && decl.methods.iter().any(|m| m.is_extension())
                {
                    holders.push(TypeId { origin, index });
                }
            }
        }
        holders
    }
}

fn qualified(container: &str, name: &str) -> String {
    if container.is_empty() {
        name.to_string()
    } else {
        format!("{container}.{name}")
    }
}

/// `A.B.C` for a qualifier made only of plain names
fn dotted(syntax: &TypeSyntax) -> Option<String> {
    match &syntax.kind {
        TypeSyntaxKind::Named {
            qualifier,
            name,
            type_arguments,
        } if type_arguments.is_empty() => match qualifier {
            Some(qualifier) => Some(qualified(&dotted(qualifier)?, name)),
            None => Some(name.clone()),
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn table(source: &str) -> TypeTable {
        TypeTable::new(parse_source(source).unwrap().declarations)
    }

    fn document_scope(namespace: &str) -> TypeScope {
        TypeScope {
            origin: Origin::Document,
            namespace: namespace.to_string(),
            ..TypeScope::default()
        }
    }

    #[test]
    fn test_resolves_predefined_and_generic_types() {
        let table = table("");
        let scope = document_scope("");
        let int = table.resolve(&TypeSyntax::predefined("int"), &scope);
        assert_eq!(int.special, SpecialType::Int32);
        assert_eq!(int.kind, TypeKind::Struct);

        let list = table.resolve(
            &TypeSyntax::named("List", vec![TypeSyntax::predefined("string")]),
            &scope,
        );
        assert_eq!(list.full_name(), "System.Collections.Generic.List");
        assert_eq!(list.display(), "List<string>");
    }

    #[test]
    fn test_document_types_shadow_namespaces_in_scope() {
        let table = table("namespace Tests { class Assert { } class Fixture { } }");
        let assert = table.resolve(&TypeSyntax::named("Assert", Vec::new()), &document_scope("Tests"));
        assert_eq!(assert.full_name(), "Tests.Assert");

        let outside = table.resolve(&TypeSyntax::named("Assert", Vec::new()), &document_scope(""));
        assert!(outside.is_error());
    }

    #[test]
    fn test_supertypes_follow_generic_bases() {
        let table = table("");
        let list = table.constructed(
            "System.Collections.Generic.List",
            vec![table.special(SpecialType::Int32)],
        );
        let supertypes = table.supertypes(&list);
        assert!(supertypes
            .iter()
            .any(|t| t.display() == "IEnumerable<int>"));
        assert!(table.is_derived_from(&list, "System.Collections.IEnumerable"));
        assert_eq!(table.element_type(&list).special, SpecialType::Int32);
    }

    #[test]
    fn test_constraint_hierarchy() {
        let table = table("");
        let equal = table.well_known("NUnit.Framework.Constraints.EqualConstraint");
        assert!(table.is_derived_from(&equal, "NUnit.Framework.Constraints.Constraint"));
        assert!(table.is_derived_from(&equal, "NUnit.Framework.Constraints.IResolveConstraint"));
        let expression = table.well_known("NUnit.Framework.Constraints.ConstraintExpression");
        assert!(!table.is_derived_from(&expression, "NUnit.Framework.Constraints.Constraint"));
    }

    #[test]
    fn test_nullable_annotation_on_reference_type_is_ignored() {
        let table = table("");
        let scope = document_scope("");
        let nullable_int = table.resolve(
            &TypeSyntax::new(TypeSyntaxKind::Nullable(Box::new(TypeSyntax::predefined("int")))),
            &scope,
        );
        assert_eq!(nullable_int.display(), "int?");
        let nullable_string = table.resolve(
            &TypeSyntax::new(TypeSyntaxKind::Nullable(Box::new(TypeSyntax::predefined(
                "string",
            )))),
            &scope,
        );
        assert_eq!(nullable_string.display(), "string");
    }

    #[test]
    fn test_linq_is_an_extension_holder() {
        let table = table("");
        let holders = table.extension_holders(&document_scope(""));
        assert!(holders
            .iter()
            .any(|id| table.full_name(*id) == "System.Linq.Enumerable"));
    }
}
