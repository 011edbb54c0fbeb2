#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! C# source host for the NUnit assertion analyzers
//!
//! Parses a document with tree-sitter into the core syntax model and binds
//! it against its own declarations plus a built-in NUnit/BCL reference
//! surface.

use nunit_analyzers_core::{Result, ResultExt, SemanticModel, SyntaxTree};
use std::path::Path;

mod declarations;
mod parser;
mod prelude;
mod semantic;

pub use declarations::Declarations;
pub use prelude::prelude_source;
pub use semantic::SourceSemanticModel;

/// A parsed and bound C# document
#[derive(Debug)]
pub struct Document {
    tree: SyntaxTree,
    model: SourceSemanticModel,
}

impl Document {
    pub fn parse(source: &str) -> Result<Self> {
        let parsed = parser::parse_source(source)?;
        Ok(Self {
            tree: parsed.tree,
            model: SourceSemanticModel::new(parsed.declarations),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .context(format!("Failed to read {}", path.display()))?;
        Self::parse(&source)
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn model(&self) -> &SourceSemanticModel {
        &self.model
    }

    pub fn semantic_model(&self) -> &dyn SemanticModel {
        &self.model
    }

    pub fn source(&self) -> &str {
        self.tree.source()
    }
}
