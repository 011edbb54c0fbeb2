//! A source-only semantic model: binds names, members and calls of one
//! document against its own declarations and the reference prelude

mod binder;
mod conversions;
mod overloads;
mod table;

use crate::declarations::Declarations;
use binder::Bound;
use nunit_analyzers_core::syntax::{Expr, Span};
use nunit_analyzers_core::{Conversion, MethodSymbol, SemanticModel, Symbol, TypeSymbol};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use table::TypeTable;

/// Nesting limit for binding, reached only by ill-formed documents
const MAX_BIND_DEPTH: usize = 256;

pub struct SourceSemanticModel {
    table: TypeTable,
    cache: RefCell<HashMap<Span, Bound>>,
    depth: Cell<usize>,
}

impl std::fmt::Debug for SourceSemanticModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceSemanticModel")
            .field("types", &self.table.document().types.len())
            .field("bound", &self.cache.borrow().len())
            .finish()
    }
}

impl SourceSemanticModel {
    pub fn new(declarations: Declarations) -> Self {
        Self {
            table: TypeTable::new(declarations),
            cache: RefCell::new(HashMap::new()),
            depth: Cell::new(0),
        }
    }

    pub fn declarations(&self) -> &Declarations {
        self.table.document()
    }

    /// The known type of a value expression; error types count as unknown
    pub(crate) fn bound_type(&self, expr: &Expr) -> Option<TypeSymbol> {
        self.bind(expr).ty().filter(|ty| !ty.is_error()).cloned()
    }
}

impl SemanticModel for SourceSemanticModel {
    fn resolve_method(&self, invocation: &Expr) -> Option<MethodSymbol> {
        match self.bind(invocation).symbol() {
            Some(Symbol::Method(method)) => Some(method),
            _ => None,
        }
    }

    fn symbol_info(&self, expr: &Expr) -> Option<Symbol> {
        self.bind(expr).symbol()
    }

    fn type_of(&self, expr: &Expr) -> Option<TypeSymbol> {
        self.bound_type(expr)
    }

    fn classify_conversion(&self, expr: &Expr, destination: &TypeSymbol) -> Conversion {
        self.classify(expr, destination)
    }

    fn is_derived_from(&self, ty: &TypeSymbol, base_full_name: &str) -> bool {
        self.table.is_derived_from(ty, base_full_name)
    }
}
