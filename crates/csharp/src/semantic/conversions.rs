//! Implicit conversion classification

use super::table::{substitute, TypeTable};
use super::SourceSemanticModel;
use nunit_analyzers_core::syntax::{Expr, ExprKind, LiteralKind, UnaryOperator};
use nunit_analyzers_core::{Conversion, SpecialType, TypeKind, TypeSymbol};

/// Generic interfaces whose type parameter is covariant
const COVARIANT_INTERFACES: &[&str] = &[
    "System.Collections.Generic.IEnumerable",
    "System.Collections.Generic.IReadOnlyCollection",
];

pub(crate) fn numeric_implicit(from: SpecialType, to: SpecialType) -> bool {
    use SpecialType::{
        Byte, Char, Decimal, Double, Int16, Int32, Int64, SByte, Single, UInt16, UInt32, UInt64,
    };
    let targets: &[SpecialType] = match from {
        SByte => &[Int16, Int32, Int64, Single, Double, Decimal],
        Byte => &[Int16, UInt16, Int32, UInt32, Int64, UInt64, Single, Double, Decimal],
        Int16 => &[Int32, Int64, Single, Double, Decimal],
        UInt16 => &[Int32, UInt32, Int64, UInt64, Single, Double, Decimal],
        Int32 => &[Int64, Single, Double, Decimal],
        UInt32 => &[Int64, UInt64, Single, Double, Decimal],
        Int64 | UInt64 => &[Single, Double, Decimal],
        Char => &[UInt16, Int32, UInt32, Int64, UInt64, Single, Double, Decimal],
        Single => &[Double],
        _ => &[],
    };
    targets.contains(&to)
}

pub(crate) fn is_signed_integral(special: SpecialType) -> bool {
    matches!(
        special,
        SpecialType::SByte | SpecialType::Int16 | SpecialType::Int32 | SpecialType::Int64
    )
}

pub(crate) fn is_unsigned_integral(special: SpecialType) -> bool {
    matches!(
        special,
        SpecialType::Byte | SpecialType::UInt16 | SpecialType::UInt32 | SpecialType::UInt64
    )
}

/// Value of an integer literal token such as `42`, `0x2A` or `1_000UL`
pub(crate) fn integer_literal_value(text: &str) -> Option<i128> {
    let digits: String = text
        .trim_end_matches(['u', 'U', 'l', 'L'])
        .chars()
        .filter(|c| *c != '_')
        .collect();
    if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        i128::from_str_radix(hex, 16).ok()
    } else if let Some(binary) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        i128::from_str_radix(binary, 2).ok()
    } else {
        digits.parse().ok()
    }
}

fn constant_fits(value: i128, from: SpecialType, to: SpecialType) -> bool {
    let range = match to {
        SpecialType::SByte => (i8::MIN as i128, i8::MAX as i128),
        SpecialType::Byte => (0, u8::MAX as i128),
        SpecialType::Int16 => (i16::MIN as i128, i16::MAX as i128),
        SpecialType::UInt16 => (0, u16::MAX as i128),
        SpecialType::UInt32 => (0, u32::MAX as i128),
        SpecialType::UInt64 => (0, u64::MAX as i128),
        _ => return false,
    };
    match from {
        SpecialType::Int32 => value >= range.0 && value <= range.1,
        SpecialType::Int64 => to == SpecialType::UInt64 && value >= 0,
        _ => false,
    }
}

fn nullable_underlying(ty: &TypeSymbol) -> Option<&TypeSymbol> {
    if ty.is_nullable_value_type() {
        ty.type_arguments.first()
    } else {
        None
    }
}

impl TypeTable {
    /// Identity, numeric, nullable, null, reference and boxing conversions
    pub fn standard_conversion(&self, from: &TypeSymbol, to: &TypeSymbol) -> Conversion {
        if from.is_error() || to.is_error() {
            return Conversion::None;
        }
        if from == to {
            return Conversion::Identity;
        }
        if from.kind == TypeKind::Null {
            return if to.is_reference_type() || to.is_nullable_value_type() {
                Conversion::NullLiteral
            } else {
                Conversion::None
            };
        }
        if numeric_implicit(from.special, to.special) {
            return Conversion::ImplicitNumeric;
        }
        if let Some(target) = nullable_underlying(to) {
            let source = nullable_underlying(from).unwrap_or(from);
            if source == target || numeric_implicit(source.special, target.special) {
                return Conversion::ImplicitNullable;
            }
        }
        if from.is_value_type() || from.kind == TypeKind::TypeParameter {
            return if self.supertypes(from).contains(to) {
                Conversion::Boxing
            } else {
                Conversion::None
            };
        }
        if from.is_reference_type() && self.is_reference_convertible(from, to) {
            return Conversion::ImplicitReference;
        }
        Conversion::None
    }

    fn is_reference_convertible(&self, from: &TypeSymbol, to: &TypeSymbol) -> bool {
        if let (Some(source), Some(target)) = (&from.element_type, &to.element_type) {
            return source == target
                || (source.is_reference_type()
                    && self.standard_conversion(source, target) == Conversion::ImplicitReference);
        }
        self.supertypes(from).iter().any(|supertype| {
            supertype == to
                || (COVARIANT_INTERFACES.contains(&supertype.full_name().as_str())
                    && supertype.same_definition(to)
                    && supertype
                        .type_arguments
                        .iter()
                        .zip(to.type_arguments.iter())
                        .all(|(s, t)| {
                            s == t
                                || (s.is_reference_type()
                                    && self.standard_conversion(s, t)
                                        == Conversion::ImplicitReference)
                        }))
        })
    }

    /// `(source, target)` of implicit operators declared on `ty` or its bases
    fn implicit_operators(&self, ty: &TypeSymbol) -> Vec<(TypeSymbol, TypeSymbol)> {
        let mut operators = Vec::new();
        let ty = nullable_underlying(ty).unwrap_or(ty);
        for owner in self.supertypes(ty) {
            let Some(id) = self.id_of(&owner) else {
                continue;
            };
            let Some(decl) = self.decl(id) else {
                continue;
            };
            if decl.conversions.is_empty() {
                continue;
            }
            let scope = self.decl_scope(id);
            let map = self.substitution(id, &owner);
            for conversion in decl.conversions.iter().filter(|c| c.is_implicit) {
                operators.push((
                    substitute(&self.resolve(&conversion.source, &scope), &map),
                    substitute(&self.resolve(&conversion.target, &scope), &map),
                ));
            }
        }
        operators
    }

    /// A standard conversion into an implicit operator's source, then from
    /// its target into `to`
    pub fn user_defined_conversion(&self, from: &TypeSymbol, to: &TypeSymbol) -> bool {
        if from.is_error() || to.is_error() || from.kind == TypeKind::Null {
            return false;
        }
        let mut operators = self.implicit_operators(from);
        operators.extend(self.implicit_operators(to));
        operators.iter().any(|(source, target)| {
            self.standard_conversion(from, source).exists()
                && self.standard_conversion(target, to).exists()
        })
    }

    pub fn conversion(&self, from: &TypeSymbol, to: &TypeSymbol) -> Conversion {
        let standard = self.standard_conversion(from, to);
        if standard.exists() {
            standard
        } else if self.user_defined_conversion(from, to) {
            Conversion::UserDefined
        } else {
            Conversion::None
        }
    }
}

impl SourceSemanticModel {
    /// Integral value of a constant literal, possibly negated
    fn constant_integer(&self, expr: &Expr) -> Option<i128> {
        match &expr.unparenthesized().kind {
            ExprKind::Literal(literal) if literal.kind == LiteralKind::Integer => {
                integer_literal_value(&literal.text)
            }
            ExprKind::Unary {
                operator: UnaryOperator::Negate,
                operand,
            } => self.constant_integer(operand).map(|value| -value),
            ExprKind::Unary {
                operator: UnaryOperator::Plus,
                operand,
            } => self.constant_integer(operand),
            _ => None,
        }
    }

    pub(crate) fn classify(&self, expr: &Expr, destination: &TypeSymbol) -> Conversion {
        let Some(source) = self.bound_type(expr) else {
            return Conversion::None;
        };
        let standard = self.table.standard_conversion(&source, destination);
        if standard.exists() {
            return standard;
        }
        if let Some(value) = self.constant_integer(expr) {
            if constant_fits(value, source.special, destination.special) {
                return Conversion::ImplicitConstant;
            }
            if let Some(target) = nullable_underlying(destination) {
                if constant_fits(value, source.special, target.special) {
                    return Conversion::ImplicitNullable;
                }
            }
        }
        if self.table.user_defined_conversion(&source, destination) {
            return Conversion::UserDefined;
        }
        Conversion::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::Declarations;

    fn table() -> TypeTable {
        TypeTable::new(Declarations::default())
    }

    #[test]
    fn test_numeric_table() {
        assert!(numeric_implicit(SpecialType::Int32, SpecialType::Double));
        assert!(numeric_implicit(SpecialType::Single, SpecialType::Double));
        assert!(!numeric_implicit(SpecialType::Double, SpecialType::Single));
        assert!(!numeric_implicit(SpecialType::Single, SpecialType::Decimal));
        assert!(!numeric_implicit(SpecialType::Int32, SpecialType::UInt32));
    }

    #[test]
    fn test_integer_literal_values() {
        assert_eq!(integer_literal_value("42"), Some(42));
        assert_eq!(integer_literal_value("0x2A"), Some(42));
        assert_eq!(integer_literal_value("1_000UL"), Some(1000));
        assert_eq!(integer_literal_value("0b101"), Some(5));
    }

    #[test]
    fn test_standard_conversions() {
        let table = table();
        let int = table.special(SpecialType::Int32);
        let long = table.special(SpecialType::Int64);
        let object = table.object();
        let string = table.special(SpecialType::String);
        let nullable_int = table.nullable_of(int.clone());

        assert_eq!(table.standard_conversion(&int, &int), Conversion::Identity);
        assert_eq!(table.standard_conversion(&int, &long), Conversion::ImplicitNumeric);
        assert_eq!(table.standard_conversion(&int, &object), Conversion::Boxing);
        assert_eq!(
            table.standard_conversion(&string, &object),
            Conversion::ImplicitReference
        );
        assert_eq!(
            table.standard_conversion(&int, &nullable_int),
            Conversion::ImplicitNullable
        );
        assert_eq!(
            table.standard_conversion(&TypeSymbol::null_literal(), &string),
            Conversion::NullLiteral
        );
        assert_eq!(table.standard_conversion(&long, &int), Conversion::None);
    }

    #[test]
    fn test_array_and_covariant_conversions() {
        let table = table();
        let string = table.special(SpecialType::String);
        let object = table.object();
        let strings = TypeSymbol::array(string.clone());
        let enumerable_of_object =
            table.constructed("System.Collections.Generic.IEnumerable", vec![object.clone()]);

        assert_eq!(
            table.standard_conversion(&strings, &TypeSymbol::array(object)),
            Conversion::ImplicitReference
        );
        assert_eq!(
            table.standard_conversion(&strings, &enumerable_of_object),
            Conversion::ImplicitReference
        );
        let list = table.constructed("System.Collections.Generic.List", vec![string]);
        assert_eq!(
            table.standard_conversion(&list, &enumerable_of_object),
            Conversion::ImplicitReference
        );
    }
}
