//! Binding of names, member accesses, calls and operators

use super::conversions::{integer_literal_value, is_signed_integral};
use super::table::{substitute, Origin, TypeId, TypeScope};
use super::{SourceSemanticModel, MAX_BIND_DEPTH};
use crate::declarations::{BodyScope, LocalValue, MethodKind};
use nunit_analyzers_core::syntax::{
    Argument, BinaryOperator, Expr, ExprKind, Literal, LiteralKind, SimpleName, Span, TypeSyntax,
    UnaryOperator,
};
use nunit_analyzers_core::{
    FieldSymbol, MethodSymbol, PropertySymbol, SpecialType, Symbol, TypeKind, TypeSymbol,
};

/// One method of a group: `method` indexes the methods of `id`
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    /// The constructed type declaring the method
    pub owner: TypeSymbol,
    pub id: TypeId,
    pub method: usize,
    /// An extension method called on a receiver
    pub reduced: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MethodGroup {
    pub receiver: Option<TypeSymbol>,
    pub type_arguments: Vec<TypeSymbol>,
    pub candidates: Vec<Candidate>,
    /// Extension methods tried when no instance candidate applies
    pub extensions: Vec<Candidate>,
}

#[derive(Debug, Clone)]
pub(crate) enum Bound {
    Value {
        ty: TypeSymbol,
        symbol: Option<Symbol>,
    },
    Type(TypeSymbol),
    Namespace(String),
    Methods(MethodGroup),
    Unknown,
}

impl Bound {
    fn value(ty: TypeSymbol) -> Self {
        Bound::Value { ty, symbol: None }
    }

    fn method(method: MethodSymbol) -> Self {
        Bound::Value {
            ty: method.return_type.clone(),
            symbol: Some(Symbol::Method(method)),
        }
    }

    pub fn ty(&self) -> Option<&TypeSymbol> {
        match self {
            Bound::Value { ty, .. } => Some(ty),
            _ => None,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Bound::Value { symbol, .. } => symbol.clone(),
            Bound::Type(ty) => Some(Symbol::Type(ty.clone())),
            Bound::Namespace(namespace) => Some(Symbol::Namespace(namespace.clone())),
            Bound::Methods(_) | Bound::Unknown => None,
        }
    }
}

/// What a position in the document can see
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub offset: usize,
    pub types: TypeScope,
}

fn encloses(span: Span, offset: usize) -> bool {
    span.start <= offset && offset < span.end
}

fn nullable_parts(ty: &TypeSymbol) -> (&TypeSymbol, bool) {
    match ty.type_arguments.first() {
        Some(inner) if ty.is_nullable_value_type() => (inner, true),
        _ => (ty, false),
    }
}

fn is_boolean(ty: &TypeSymbol) -> bool {
    nullable_parts(ty).0.special == SpecialType::Boolean
}

impl SourceSemanticModel {
    pub(crate) fn bind(&self, expr: &Expr) -> Bound {
        let Some(span) = expr.span else {
            return Bound::Unknown;
        };
        if let Some(bound) = self.cache.borrow().get(&span) {
            return bound.clone();
        }
        let depth = self.depth.get();
        if depth >= MAX_BIND_DEPTH {
            return Bound::Unknown;
        }
        self.depth.set(depth + 1);
        let bound = self.bind_expression(expr, span.start);
        self.depth.set(depth);
        self.cache.borrow_mut().insert(span, bound.clone());
        bound
    }

    pub(crate) fn scope_at(&self, offset: usize) -> Scope {
        let document = self.table.document();
        let enclosing = document.enclosing_types(offset);
        let namespace = enclosing
            .first()
            .and_then(|index| document.types.get(*index))
            .map(|decl| decl.namespace.clone())
            .unwrap_or_default();
        let mut type_parameters: Vec<String> = document
            .bodies
            .iter()
            .filter(|body| encloses(body.span, offset))
            .flat_map(|body| body.type_parameters.iter().cloned())
            .collect();
        for index in &enclosing {
            if let Some(decl) = document.types.get(*index) {
                type_parameters.extend(decl.type_parameters.iter().cloned());
            }
        }
        Scope {
            offset,
            types: TypeScope {
                origin: Origin::Document,
                enclosing,
                namespace,
                type_parameters,
            },
        }
    }

    fn resolve_type(&self, syntax: &TypeSyntax, offset: usize) -> TypeSymbol {
        self.table.resolve(syntax, &self.scope_at(offset).types)
    }

    fn bind_expression(&self, expr: &Expr, offset: usize) -> Bound {
        match &expr.kind {
            ExprKind::Name(name) => self.bind_name(name, &self.scope_at(offset)),
            ExprKind::PredefinedType(keyword) => {
                Bound::Type(self.resolve_type(&TypeSyntax::predefined(keyword.clone()), offset))
            }
            ExprKind::MemberAccess { target, name } => {
                let target = self.bind(target);
                self.bind_member(target, name, &self.scope_at(offset))
            }
            ExprKind::Invocation { target, arguments } => {
                self.bind_invocation(target, &arguments.arguments)
            }
            ExprKind::Literal(literal) => self.literal_type(literal).map_or(Bound::Unknown, Bound::value),
            ExprKind::InterpolatedString { .. } => {
                Bound::value(self.table.special(SpecialType::String))
            }
            ExprKind::Binary {
                operator,
                left,
                right,
            } => self.bind_binary(*operator, left, right),
            ExprKind::Unary { operator, operand } => self.bind_unary(*operator, operand),
            ExprKind::Parenthesized(inner) => match self.bind(inner) {
                value @ Bound::Value { .. } => value,
                _ => Bound::Unknown,
            },
            ExprKind::Cast { ty, .. } | ExprKind::ObjectCreation { ty, .. } => {
                Bound::value(self.resolve_type(ty, offset))
            }
            ExprKind::Conditional {
                when_true,
                when_false,
                ..
            } => self.bind_conditional(when_true, when_false),
            ExprKind::ArrayCreation {
                element_type,
                elements,
            } => {
                let element = match element_type {
                    Some(element) => Some(self.resolve_type(element, offset)),
                    None => self.best_common_type(elements),
                };
                element.map_or(Bound::Unknown, |element| Bound::value(TypeSymbol::array(element)))
            }
            ExprKind::TypeOf(_) => Bound::value(self.table.well_known("System.Type")),
            ExprKind::This => self
                .table
                .document()
                .enclosing_types(offset)
                .first()
                .map_or(Bound::Unknown, |index| {
                    Bound::value(self.declared_type(TypeId {
                        origin: Origin::Document,
                        index: *index,
                    }))
                }),
            ExprKind::Lambda { .. } | ExprKind::Other { .. } => Bound::Unknown,
        }
    }

    /// A declared type constructed over its own type parameters
    fn declared_type(&self, id: TypeId) -> TypeSymbol {
        let arguments = self
            .table
            .decl(id)
            .map(|decl| {
                decl.type_parameters
                    .iter()
                    .map(|name| TypeSymbol::type_parameter(name.clone()))
                    .collect()
            })
            .unwrap_or_default();
        self.table.symbol_of(id, arguments)
    }

    fn explicit_type_arguments(&self, name: &SimpleName, scope: &Scope) -> Vec<TypeSymbol> {
        name.type_arguments
            .iter()
            .flatten()
            .map(|argument| self.table.resolve(argument, &scope.types))
            .collect()
    }

    fn bind_name(&self, name: &SimpleName, scope: &Scope) -> Bound {
        if name.type_arguments.is_none() {
            if let Some(bound) = self.local(&name.identifier, scope) {
                return bound;
            }
            if let Some(bound) = self.parameter(&name.identifier, scope) {
                return bound;
            }
        }
        for &index in &scope.types.enclosing {
            let owner = self.declared_type(TypeId {
                origin: Origin::Document,
                index,
            });
            let bound = self.member(&owner, name, scope, None);
            if !matches!(bound, Bound::Unknown) {
                return bound;
            }
        }
        let syntax = TypeSyntax::named(
            name.identifier.clone(),
            name.type_arguments.clone().unwrap_or_default(),
        );
        let ty = self.table.resolve(&syntax, &scope.types);
        if !ty.is_error() {
            return Bound::Type(ty);
        }
        if name.type_arguments.is_none() && self.table.is_namespace(&name.identifier) {
            return Bound::Namespace(name.identifier.clone());
        }
        Bound::Unknown
    }

    fn local(&self, identifier: &str, scope: &Scope) -> Option<Bound> {
        let local = self
            .table
            .document()
            .locals
            .iter()
            .filter(|local| {
                local.name == identifier
                    && encloses(local.scope, scope.offset)
                    && local.visible_from <= scope.offset
            })
            .max_by_key(|local| local.visible_from)?;
        let ty = match &local.ty {
            Some(ty) => self.table.resolve(ty, &scope.types),
            None => match &local.value {
                LocalValue::Initializer(value) => {
                    self.bind(value).ty().cloned().unwrap_or_else(TypeSymbol::error)
                }
                LocalValue::ElementOf(collection) => self
                    .bind(collection)
                    .ty()
                    .map_or_else(TypeSymbol::error, |collection| {
                        self.table.element_type(collection)
                    }),
                LocalValue::None => TypeSymbol::error(),
            },
        };
        Some(Bound::Value {
            ty: ty.clone(),
            symbol: Some(Symbol::Local {
                name: local.name.clone(),
                ty,
            }),
        })
    }

    fn parameter(&self, identifier: &str, scope: &Scope) -> Option<Bound> {
        let mut bodies: Vec<&BodyScope> = self
            .table
            .document()
            .bodies
            .iter()
            .filter(|body| encloses(body.span, scope.offset))
            .collect();
        bodies.sort_by_key(|body| std::cmp::Reverse(body.span.start));
        let parameter = bodies
            .iter()
            .find_map(|body| body.parameters.iter().find(|p| p.name == identifier))?;
        let ty = parameter
            .ty
            .as_ref()
            .map_or_else(TypeSymbol::error, |ty| self.table.resolve(ty, &scope.types));
        Some(Bound::Value {
            ty: ty.clone(),
            symbol: Some(Symbol::Parameter {
                name: parameter.name.clone(),
                ty,
            }),
        })
    }

    /// Member type as seen through the constructed `owner`
    fn member_type(&self, id: TypeId, owner: &TypeSymbol, syntax: &TypeSyntax) -> TypeSymbol {
        let declared = self.table.resolve(syntax, &self.table.decl_scope(id));
        substitute(&declared, &self.table.substitution(id, owner))
    }

    /// Looks `name` up on `ty` and its supertypes
    fn member(
        &self,
        ty: &TypeSymbol,
        name: &SimpleName,
        scope: &Scope,
        receiver: Option<&TypeSymbol>,
    ) -> Bound {
        let mut candidates = Vec::new();
        for owner in self.table.supertypes(ty) {
            // Arrays implement the collection interfaces explicitly
            if ty.kind == TypeKind::Array && owner.kind == TypeKind::Interface {
                continue;
            }
            let Some(id) = self.table.id_of(&owner) else {
                continue;
            };
            let Some(decl) = self.table.decl(id) else {
                continue;
            };
            if name.type_arguments.is_none() && candidates.is_empty() {
                if let Some(property) = decl.properties.iter().find(|p| p.name == name.identifier) {
                    let property_type = self.member_type(id, &owner, &property.ty);
                    return Bound::Value {
                        ty: property_type.clone(),
                        symbol: Some(Symbol::Property(PropertySymbol {
                            name: property.name.clone(),
                            containing_type: owner,
                            ty: property_type,
                            is_static: property.is_static,
                        })),
                    };
                }
                if let Some(field) = decl.fields.iter().find(|f| f.name == name.identifier) {
                    let field_type = self.member_type(id, &owner, &field.ty);
                    return Bound::Value {
                        ty: field_type.clone(),
                        symbol: Some(Symbol::Field(FieldSymbol {
                            name: field.name.clone(),
                            containing_type: owner,
                            ty: field_type,
                            is_static: field.is_static,
                            is_const: field.is_const,
                        })),
                    };
                }
            }
            for (index, method) in decl.methods.iter().enumerate() {
                if method.kind == MethodKind::Ordinary && method.name == name.identifier {
                    candidates.push(Candidate {
                        owner: owner.clone(),
                        id,
                        method: index,
                        reduced: false,
                    });
                }
            }
        }
        let extensions = match receiver {
            Some(receiver) if !receiver.is_error() => self.extensions(&name.identifier, scope),
            _ => Vec::new(),
        };
        if candidates.is_empty() && extensions.is_empty() {
            return Bound::Unknown;
        }
        Bound::Methods(MethodGroup {
            receiver: receiver.cloned(),
            type_arguments: self.explicit_type_arguments(name, scope),
            candidates,
            extensions,
        })
    }

    fn extensions(&self, identifier: &str, scope: &Scope) -> Vec<Candidate> {
        let mut extensions = Vec::new();
        for id in self.table.extension_holders(&scope.types) {
            let Some(decl) = self.table.decl(id) else {
                continue;
            };
            for (index, method) in decl.methods.iter().enumerate() {
                if method.is_extension() && method.name == identifier {
                    extensions.push(Candidate {
                        owner: self.table.symbol_of(id, Vec::new()),
                        id,
                        method: index,
                        reduced: true,
                    });
                }
            }
        }
        extensions
    }

    fn bind_member(&self, target: Bound, name: &SimpleName, scope: &Scope) -> Bound {
        match target {
            Bound::Namespace(namespace) => {
                let full_name = format!("{namespace}.{}", name.identifier);
                let arguments = self.explicit_type_arguments(name, scope);
                if let Some(id) = self.table.find(&full_name, arguments.len()) {
                    return Bound::Type(self.table.symbol_of(id, arguments));
                }
                if name.type_arguments.is_none() && self.table.is_namespace(&full_name) {
                    Bound::Namespace(full_name)
                } else {
                    Bound::Unknown
                }
            }
            Bound::Type(ty) => {
                let arguments = self.explicit_type_arguments(name, scope);
                let nested = format!("{}.{}", ty.full_name(), name.identifier);
                if let Some(id) = self.table.find(&nested, arguments.len()) {
                    return Bound::Type(self.table.symbol_of(id, arguments));
                }
                self.member(&ty, name, scope, None)
            }
            Bound::Value { ty, .. } => self.member(&ty, name, scope, Some(&ty)),
            Bound::Methods(_) | Bound::Unknown => Bound::Unknown,
        }
    }

    fn bind_invocation(&self, target: &Expr, arguments: &[Argument]) -> Bound {
        let bound = self.bind(target);
        if matches!(bound, Bound::Unknown)
            && target.as_name().is_some_and(|name| name.identifier == "nameof")
        {
            return Bound::value(self.table.special(SpecialType::String));
        }
        let Bound::Methods(group) = bound else {
            return Bound::Unknown;
        };
        self.resolve_overload(&group, arguments)
            .map_or(Bound::Unknown, Bound::method)
    }

    fn literal_type(&self, literal: &Literal) -> Option<TypeSymbol> {
        let lower = literal.text.to_ascii_lowercase();
        let special = match literal.kind {
            LiteralKind::Integer => {
                if lower.ends_with("ul") || lower.ends_with("lu") {
                    SpecialType::UInt64
                } else if lower.ends_with('u') {
                    SpecialType::UInt32
                } else if lower.ends_with('l') {
                    SpecialType::Int64
                } else {
                    match integer_literal_value(&literal.text) {
                        Some(v) if v <= i128::from(i32::MAX) => SpecialType::Int32,
                        Some(v) if v <= i128::from(u32::MAX) => SpecialType::UInt32,
                        Some(v) if v <= i128::from(i64::MAX) => SpecialType::Int64,
                        _ => SpecialType::UInt64,
                    }
                }
            }
            LiteralKind::Real => {
                if lower.ends_with('f') {
                    SpecialType::Single
                } else if lower.ends_with('m') {
                    SpecialType::Decimal
                } else {
                    SpecialType::Double
                }
            }
            LiteralKind::String
            | LiteralKind::VerbatimString
            | LiteralKind::RawString
            | LiteralKind::InterpolatedString => SpecialType::String,
            LiteralKind::Character => SpecialType::Char,
            LiteralKind::Boolean => SpecialType::Boolean,
            LiteralKind::Null => return Some(TypeSymbol::null_literal()),
            LiteralKind::Default => return None,
        };
        Some(self.table.special(special))
    }

    /// User-declared operators named `token` on the operand types
    fn operator_candidates(&self, token: &str, operand_types: &[&TypeSymbol]) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = Vec::new();
        for ty in operand_types {
            if ty.is_error() || ty.special != SpecialType::None {
                continue;
            }
            for owner in self.table.supertypes(ty) {
                let Some(id) = self.table.id_of(&owner) else {
                    continue;
                };
                let Some(decl) = self.table.decl(id) else {
                    continue;
                };
                for (index, method) in decl.methods.iter().enumerate() {
                    let matches = method.kind == MethodKind::Operator
                        && method.name == token
                        && method.parameters.len() == operand_types.len();
                    if matches && !candidates.iter().any(|c| c.id == id && c.method == index) {
                        candidates.push(Candidate {
                            owner: owner.clone(),
                            id,
                            method: index,
                            reduced: false,
                        });
                    }
                }
            }
        }
        candidates
    }

    fn bind_binary(&self, operator: BinaryOperator, left: &Expr, right: &Expr) -> Bound {
        let left_type = self.bind(left).ty().cloned();
        let right_type = self.bind(right).ty().cloned();
        if let (Some(l), Some(r)) = (&left_type, &right_type) {
            let candidates = self.operator_candidates(operator.as_str(), &[l, r]);
            if !candidates.is_empty() {
                if let Some(method) = self.resolve_operator(&candidates, &[left, right]) {
                    return Bound::method(method);
                }
            }
        }
        let boolean = || Bound::value(self.table.special(SpecialType::Boolean));
        match operator {
            BinaryOperator::Equals
            | BinaryOperator::NotEquals
            | BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual
            | BinaryOperator::LogicalAnd
            | BinaryOperator::LogicalOr => boolean(),
            BinaryOperator::Coalesce => match (left_type, right_type) {
                (Some(l), _) if l.kind != TypeKind::Null && !l.is_error() => {
                    Bound::value(nullable_parts(&l).0.clone())
                }
                (_, Some(r)) => Bound::value(r),
                _ => Bound::Unknown,
            },
            _ => {
                let (Some(l), Some(r)) = (left_type, right_type) else {
                    return Bound::Unknown;
                };
                let logical = matches!(
                    operator,
                    BinaryOperator::BitwiseAnd | BinaryOperator::BitwiseOr | BinaryOperator::ExclusiveOr
                );
                if logical && is_boolean(&l) && is_boolean(&r) {
                    return boolean();
                }
                let string = SpecialType::String;
                if operator == BinaryOperator::Add && (l.special == string || r.special == string) {
                    return Bound::value(self.table.special(string));
                }
                if matches!(operator, BinaryOperator::LeftShift | BinaryOperator::RightShift) {
                    return self.promote(&l, &l).map_or(Bound::Unknown, Bound::value);
                }
                self.promote(&l, &r).map_or(Bound::Unknown, Bound::value)
            }
        }
    }

    fn bind_unary(&self, operator: UnaryOperator, operand: &Expr) -> Bound {
        let Some(ty) = self.bind(operand).ty().cloned() else {
            return Bound::Unknown;
        };
        let candidates = self.operator_candidates(operator.as_str(), &[&ty]);
        if !candidates.is_empty() {
            if let Some(method) = self.resolve_operator(&candidates, &[operand]) {
                return Bound::method(method);
            }
        }
        match operator {
            UnaryOperator::LogicalNot if is_boolean(&ty) => Bound::value(ty),
            UnaryOperator::LogicalNot => Bound::Unknown,
            UnaryOperator::PreIncrement | UnaryOperator::PreDecrement => Bound::value(ty),
            UnaryOperator::Negate if nullable_parts(&ty).0.special == SpecialType::UInt32 => {
                Bound::value(self.table.special(SpecialType::Int64))
            }
            UnaryOperator::Negate | UnaryOperator::Plus | UnaryOperator::BitwiseNot => {
                self.promote(&ty, &ty).map_or(Bound::Unknown, Bound::value)
            }
        }
    }

    /// Binary numeric promotion, lifted over nullable operands
    fn promote(&self, left: &TypeSymbol, right: &TypeSymbol) -> Option<TypeSymbol> {
        use SpecialType::{Char, Decimal, Double, Int32, Int64, Single, UInt32, UInt64};
        let (l, l_nullable) = nullable_parts(left);
        let (r, r_nullable) = nullable_parts(right);
        let numeric = |s: SpecialType| s.is_numeric() || s == Char;
        if !numeric(l.special) || !numeric(r.special) {
            return None;
        }
        let either = |s: SpecialType| l.special == s || r.special == s;
        let signed = is_signed_integral(l.special) || is_signed_integral(r.special);
        let result = if either(Decimal) {
            if either(Single) || either(Double) {
                return None;
            }
            Decimal
        } else if either(Double) {
            Double
        } else if either(Single) {
            Single
        } else if either(UInt64) {
            if signed {
                return None;
            }
            UInt64
        } else if either(Int64) {
            Int64
        } else if either(UInt32) {
            if signed {
                Int64
            } else {
                UInt32
            }
        } else {
            Int32
        };
        let ty = self.table.special(result);
        Some(if l_nullable || r_nullable {
            self.table.nullable_of(ty)
        } else {
            ty
        })
    }

    fn bind_conditional(&self, when_true: &Expr, when_false: &Expr) -> Bound {
        let when_true = self.bind(when_true).ty().cloned();
        let when_false = self.bind(when_false).ty().cloned();
        let unknown = |ty: &TypeSymbol| ty.kind == TypeKind::Null || ty.is_error();
        match (when_true, when_false) {
            (Some(t), Some(f)) => {
                if unknown(&t) {
                    Bound::value(f)
                } else if unknown(&f) || self.table.conversion(&f, &t).exists() {
                    Bound::value(t)
                } else if self.table.conversion(&t, &f).exists() {
                    Bound::value(f)
                } else {
                    Bound::value(t)
                }
            }
            (Some(only), None) | (None, Some(only)) => Bound::value(only),
            (None, None) => Bound::Unknown,
        }
    }

    /// The element type of `new[] { ... }`: the element type every element converts to
    fn best_common_type(&self, elements: &[Expr]) -> Option<TypeSymbol> {
        let types: Vec<TypeSymbol> = elements
            .iter()
            .filter_map(|element| self.bound_type(element))
            .filter(|ty| ty.kind != TypeKind::Null)
            .collect();
        types
            .iter()
            .find(|candidate| {
                elements.iter().all(|element| {
                    self.bound_type(element).is_none()
                        || self.classify(element, candidate).exists()
                })
            })
            .cloned()
    }
}
