#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! NUnit assertion analyzers
//!
//! Finds classic-model assertions (`ClassicAssert.AreEqual(expected, actual)`)
//! and hand-rolled conditions (`Assert.That(a == b)`) and offers fixes that
//! rewrite them into the constraint model
//! (`Assert.That(actual, Is.EqualTo(expected))`).
//!
//! The engine works against the host contract in `nunit_analyzers_core`: a
//! [`SyntaxTree`](nunit_analyzers_core::SyntaxTree) plus a
//! [`SemanticModel`](nunit_analyzers_core::SemanticModel) for one document.
//!
//! # Example
//!
//! ```ignore
//! use nunit_analyzers::AnalysisEngine;
//! use nunit_analyzers_core::CancellationToken;
//!
//! let engine = AnalysisEngine::default();
//! let diagnostics = engine.analyze(document.tree(), document.semantic_model(), &CancellationToken::new())?;
//! ```

pub mod catalog;
pub mod classifier;
pub mod constraints;
pub mod descriptors;
mod engine;
mod fixes;
pub mod rules;

pub use classifier::{classify, InvocationShape};
pub use constraints::{ConstraintExpression, ConstraintPartExpression};
pub use engine::{AnalysisEngine, Diagnostic};
pub use fixes::{
    CodeAction, CONVERT_TO_INTERPOLATABLE_STRING, TRANSFORM_TO_CONSTRAINT_MODEL,
    TRANSFORM_TO_CONSTRAINT_MODEL_CONDENSED, USE_IS_EQUAL_TO,
};
pub use rules::{ClassicRule, ConditionRule, DiagnosticData, Relation};

#[cfg(test)]
pub(crate) mod test_support {
    use nunit_analyzers_core::Expr;
    use nunit_analyzers_csharp::Document;

    /// Wraps `body` in a test method with a few typed fields in scope
    pub(crate) fn document(body: &str) -> Document {
        let source = format!(
            "using System;\nusing System.Collections.Generic;\nusing NUnit.Framework;\nusing NUnit.Framework.Legacy;\n\nnamespace Tests\n{{\n    public class Fixture\n    {{\n        private int value = 1;\n        private string text = \"\";\n        private object instance = null;\n\n        public void Test()\n        {{\n            {body}\n        }}\n    }}\n}}\n"
        );
        Document::parse(&source).unwrap()
    }

    /// The first expression in pre-order whose source text is `text`
    pub(crate) fn find<'d>(document: &'d Document, text: &str) -> &'d Expr {
        let source = document.source();
        let mut found: Option<&Expr> = None;
        for root in document.tree().roots() {
            root.expression.walk(&mut |expr| {
                if found.is_none() && expr.span.is_some_and(|span| span.text(source) == text) {
                    found = Some(expr);
                }
            });
        }
        found.unwrap_or_else(|| panic!("no expression `{text}`"))
    }
}
