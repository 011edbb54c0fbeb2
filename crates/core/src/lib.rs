//! Host contract for the NUnit assertion analyzers
//!
//! This crate provides the foundational abstractions shared by hosts and
//! analyzers, including:
//!
//! - **Syntax**: an immutable C# expression model with spans and trivia
//! - **Symbols**: resolved types, methods, properties and fields
//! - **Semantic model**: the symbol-resolution trait a host implements
//! - **Diagnostics**: descriptor metadata and severities
//! - **Edits**: minimal text edits handed back to the host
//! - **Configuration**: per-rule severity and fix settings
//! - **Error handling**: unified error types
//!

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod cancellation;
pub mod config;
pub mod diagnostics;
pub mod edits;
pub mod error;
pub mod semantic;
pub mod symbols;
pub mod syntax;

// Re-export main types for convenience
pub use cancellation::CancellationToken;
pub use config::{AnalyzerConfig, FixesConfig, RuleConfig, SeverityOverride};
pub use diagnostics::{Category, DiagnosticDescriptor, Severity};
pub use edits::{apply_edits, TextEdit};
pub use error::{Error, Result, ResultExt};
pub use semantic::{Conversion, SemanticModel};
pub use symbols::{
    FieldSymbol, MethodSymbol, ParameterSymbol, PropertySymbol, SpecialType, Symbol, TypeKind,
    TypeSymbol,
};
pub use syntax::{
    Argument, ArgumentList, Expr, ExprKind, RootExpression, SimpleName, Span, SyntaxTree,
    TypeSyntax,
};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Result, ResultExt};
    pub use crate::semantic::SemanticModel;
    pub use crate::syntax::{Expr, ExprKind, Span};
}
