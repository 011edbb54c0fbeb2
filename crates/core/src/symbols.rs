//! Resolved symbol values handed from a semantic model to the analyzers

use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr)]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Array,
    TypeParameter,
    /// The type of the `null` literal
    Null,
    Void,
    /// A type the model could not resolve
    Error,
}

/// Types the analyzers and conversions treat specially
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpecialType {
    #[default]
    None,
    Object,
    Void,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Decimal,
    Single,
    Double,
    String,
    ValueType,
    Array,
    Nullable,
}

const SPECIAL_TYPES: &[(SpecialType, &str, Option<&str>)] = &[
    (SpecialType::Object, "System.Object", Some("object")),
    (SpecialType::Void, "System.Void", Some("void")),
    (SpecialType::Boolean, "System.Boolean", Some("bool")),
    (SpecialType::Char, "System.Char", Some("char")),
    (SpecialType::SByte, "System.SByte", Some("sbyte")),
    (SpecialType::Byte, "System.Byte", Some("byte")),
    (SpecialType::Int16, "System.Int16", Some("short")),
    (SpecialType::UInt16, "System.UInt16", Some("ushort")),
    (SpecialType::Int32, "System.Int32", Some("int")),
    (SpecialType::UInt32, "System.UInt32", Some("uint")),
    (SpecialType::Int64, "System.Int64", Some("long")),
    (SpecialType::UInt64, "System.UInt64", Some("ulong")),
    (SpecialType::Decimal, "System.Decimal", Some("decimal")),
    (SpecialType::Single, "System.Single", Some("float")),
    (SpecialType::Double, "System.Double", Some("double")),
    (SpecialType::String, "System.String", Some("string")),
    (SpecialType::ValueType, "System.ValueType", None),
    (SpecialType::Array, "System.Array", None),
    (SpecialType::Nullable, "System.Nullable", None),
];

impl SpecialType {
    pub fn from_full_name(full_name: &str) -> Self {
        SPECIAL_TYPES
            .iter()
            .find(|(_, name, _)| *name == full_name)
            .map_or(Self::None, |(special, _, _)| *special)
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        SPECIAL_TYPES
            .iter()
            .find(|(_, _, kw)| *kw == Some(keyword))
            .map(|(special, _, _)| *special)
    }

    pub fn full_name(self) -> Option<&'static str> {
        SPECIAL_TYPES
            .iter()
            .find(|(special, _, _)| *special == self)
            .map(|(_, name, _)| *name)
    }

    pub fn keyword(self) -> Option<&'static str> {
        SPECIAL_TYPES
            .iter()
            .find(|(special, _, _)| *special == self)
            .and_then(|(_, _, kw)| *kw)
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::SByte
                | Self::Byte
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
                | Self::Decimal
                | Self::Single
                | Self::Double
        )
    }
}

/// A resolved type, possibly constructed (`List<int>`, `int[]`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypeSymbol {
    pub name: String,
    /// Namespace, or `Namespace.Outer` for nested types
    pub container: String,
    pub kind: TypeKind,
    pub special: SpecialType,
    pub type_arguments: Vec<TypeSymbol>,
    /// Element type of arrays
    pub element_type: Option<Box<TypeSymbol>>,
    /// Stack-only (`ref struct`) types
    pub is_ref_like: bool,
}

impl TypeSymbol {
    pub fn named(container: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        let mut symbol = Self {
            name: name.into(),
            container: container.into(),
            kind,
            ..Self::default()
        };
        symbol.special = SpecialType::from_full_name(&symbol.full_name());
        symbol
    }

    pub fn with_type_arguments(mut self, type_arguments: Vec<TypeSymbol>) -> Self {
        self.type_arguments = type_arguments;
        self
    }

    pub fn array(element: TypeSymbol) -> Self {
        Self {
            name: "Array".to_string(),
            container: "System".to_string(),
            kind: TypeKind::Array,
            element_type: Some(Box::new(element)),
            ..Self::default()
        }
    }

    pub fn type_parameter(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::TypeParameter,
            ..Self::default()
        }
    }

    pub fn null_literal() -> Self {
        Self {
            name: "<null>".to_string(),
            kind: TypeKind::Null,
            ..Self::default()
        }
    }

    pub fn error() -> Self {
        Self {
            name: "?".to_string(),
            kind: TypeKind::Error,
            ..Self::default()
        }
    }

    /// `Namespace.Name` without type arguments
    pub fn full_name(&self) -> String {
        if self.container.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.container, self.name)
        }
    }

    pub fn arity(&self) -> usize {
        self.type_arguments.len()
    }

    pub fn is_array(&self) -> bool {
        self.kind == TypeKind::Array
    }

    pub fn is_nullable_value_type(&self) -> bool {
        self.special == SpecialType::Nullable
    }

    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
    }

    /// A value type that cannot hold `null`
    pub fn is_non_nullable_value_type(&self) -> bool {
        self.is_value_type() && !self.is_nullable_value_type()
    }

    pub fn is_reference_type(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Class | TypeKind::Interface | TypeKind::Array | TypeKind::Delegate
        )
    }

    pub fn is_error(&self) -> bool {
        self.kind == TypeKind::Error
    }

    /// Same generic definition, ignoring type arguments
    pub fn same_definition(&self, other: &TypeSymbol) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.container == other.container
            && self.arity() == other.arity()
    }

    /// C# display form: keywords for special types, `T[]`, `T?`, `List<int>`
    pub fn display(&self) -> String {
        if let Some(element) = &self.element_type {
            return format!("{}[]", element.display());
        }
        if self.is_nullable_value_type() {
            if let Some(inner) = self.type_arguments.first() {
                return format!("{}?", inner.display());
            }
        }
        if let Some(keyword) = self.special.keyword() {
            return keyword.to_string();
        }
        if self.type_arguments.is_empty() {
            return self.name.clone();
        }
        let arguments: Vec<String> = self.type_arguments.iter().map(Self::display).collect();
        format!("{}<{}>", self.name, arguments.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSymbol {
    pub name: String,
    pub ty: TypeSymbol,
    /// The trailing `params` array parameter
    pub is_params: bool,
    pub is_optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSymbol {
    pub name: String,
    pub containing_type: TypeSymbol,
    /// Formal parameters; for a reduced extension call the receiver is omitted
    pub parameters: Vec<ParameterSymbol>,
    pub return_type: TypeSymbol,
    pub type_arguments: Vec<TypeSymbol>,
    pub is_static: bool,
    /// Declared with a `this` first parameter
    pub is_extension: bool,
    /// Invoked as `receiver.Method(...)` on an extension method
    pub is_reduced_extension: bool,
}

impl MethodSymbol {
    pub fn parameter(&self, name: &str) -> Option<&ParameterSymbol> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_generic(&self) -> bool {
        !self.type_arguments.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertySymbol {
    pub name: String,
    pub containing_type: TypeSymbol,
    pub ty: TypeSymbol,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSymbol {
    pub name: String,
    pub containing_type: TypeSymbol,
    pub ty: TypeSymbol,
    pub is_static: bool,
    pub is_const: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Method(MethodSymbol),
    Property(PropertySymbol),
    Field(FieldSymbol),
    Local { name: String, ty: TypeSymbol },
    Parameter { name: String, ty: TypeSymbol },
    Type(TypeSymbol),
    Namespace(String),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Method(m) => &m.name,
            Symbol::Property(p) => &p.name,
            Symbol::Field(f) => &f.name,
            Symbol::Local { name, .. } | Symbol::Parameter { name, .. } => name,
            Symbol::Type(t) => &t.name,
            Symbol::Namespace(ns) => ns.rsplit('.').next().unwrap_or(ns),
        }
    }

    /// The type of the value this symbol denotes: member or variable type,
    /// or the return type of a method
    pub fn value_type(&self) -> Option<&TypeSymbol> {
        match self {
            Symbol::Method(m) => Some(&m.return_type),
            Symbol::Property(p) => Some(&p.ty),
            Symbol::Field(f) => Some(&f.ty),
            Symbol::Local { ty, .. } | Symbol::Parameter { ty, .. } => Some(ty),
            Symbol::Type(_) | Symbol::Namespace(_) => None,
        }
    }

    /// The declaring type of members
    pub fn containing_type(&self) -> Option<&TypeSymbol> {
        match self {
            Symbol::Method(m) => Some(&m.containing_type),
            Symbol::Property(p) => Some(&p.containing_type),
            Symbol::Field(f) => Some(&f.containing_type),
            _ => None,
        }
    }

    /// Locals, parameters and fields: values that are not members with a
    /// fixed meaning
    pub fn is_variable(&self) -> bool {
        matches!(
            self,
            Symbol::Local { .. } | Symbol::Parameter { .. } | Symbol::Field(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int32() -> TypeSymbol {
        TypeSymbol::named("System", "Int32", TypeKind::Struct)
    }

    #[test]
    fn test_special_types_from_names() {
        assert_eq!(int32().special, SpecialType::Int32);
        assert_eq!(SpecialType::from_keyword("float"), Some(SpecialType::Single));
        assert_eq!(SpecialType::String.keyword(), Some("string"));
        assert_eq!(SpecialType::ValueType.keyword(), None);
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(int32().display(), "int");
        assert_eq!(TypeSymbol::array(int32()).display(), "int[]");
        let nullable = TypeSymbol::named("System", "Nullable", TypeKind::Struct)
            .with_type_arguments(vec![int32()]);
        assert_eq!(nullable.display(), "int?");
        assert!(!nullable.is_non_nullable_value_type());
        let list = TypeSymbol::named("System.Collections.Generic", "List", TypeKind::Class)
            .with_type_arguments(vec![int32()]);
        assert_eq!(list.display(), "List<int>");
        assert_eq!(list.full_name(), "System.Collections.Generic.List");
    }

    #[test]
    fn test_symbol_value_types() {
        let local = Symbol::Local {
            name: "x".to_string(),
            ty: int32(),
        };
        assert!(local.is_variable());
        assert_eq!(local.value_type(), Some(&int32()));
        assert_eq!(Symbol::Namespace("NUnit.Framework".into()).name(), "Framework");
    }
}
