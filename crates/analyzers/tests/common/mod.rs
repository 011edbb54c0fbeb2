//! Shared fixtures for the analyzer integration tests

#![allow(dead_code)]

use nunit_analyzers::{AnalysisEngine, CodeAction, Diagnostic};
use nunit_analyzers_core::{apply_edits, CancellationToken};
use nunit_analyzers_csharp::Document;

/// A test document with `members` declared next to the fixture class and
/// `body` inside its test method
pub fn source(members: &str, body: &str) -> String {
    format!(
        "using System;
using System.Collections.Generic;
using System.Linq;
using NUnit.Framework;
using NUnit.Framework.Legacy;

namespace Tests
{{
{members}
    public class Fixture
    {{
        private int value = 1;
        private string text = \"\";
        private object instance = null;
        private double measured = 1.5;
        private List<int> numbers = new List<int>();

        public void Test()
        {{
            {body}
        }}
    }}
}}
"
    )
}

pub fn document(members: &str, body: &str) -> Document {
    Document::parse(&source(members, body)).unwrap()
}

pub fn analyze_with(engine: &AnalysisEngine, document: &Document) -> Vec<Diagnostic> {
    engine
        .analyze(
            document.tree(),
            document.semantic_model(),
            &CancellationToken::new(),
        )
        .unwrap()
}

pub fn analyze(document: &Document) -> Vec<Diagnostic> {
    analyze_with(&AnalysisEngine::default(), document)
}

pub fn ids(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
    diagnostics.iter().map(Diagnostic::id).collect()
}

/// The only diagnostic with `id`
pub fn single<'d>(diagnostics: &'d [Diagnostic], id: &str) -> &'d Diagnostic {
    let matching: Vec<&Diagnostic> = diagnostics.iter().filter(|d| d.id() == id).collect();
    assert_eq!(matching.len(), 1, "expected one {id} in {:?}", ids(diagnostics));
    matching[0]
}

pub fn actions(document: &Document, diagnostic: &Diagnostic) -> Vec<CodeAction> {
    AnalysisEngine::default()
        .code_actions(
            document.tree(),
            document.semantic_model(),
            diagnostic,
            &CancellationToken::new(),
        )
        .unwrap()
}

/// Applies the `key` fix of the only `id` diagnostic and returns the new source
pub fn fix(members: &str, body: &str, id: &str, key: &str) -> String {
    let document = document(members, body);
    let diagnostics = analyze(&document);
    let diagnostic = single(&diagnostics, id);
    let action = actions(&document, diagnostic)
        .into_iter()
        .find(|action| action.equivalence_key == key)
        .unwrap_or_else(|| panic!("no {key} fix for {id}"));
    apply_edits(document.source(), &[action.edit]).unwrap()
}

/// Asserts that fixing `before` yields a document whose body is `after`
pub fn assert_fix(members: &str, before: &str, id: &str, key: &str, after: &str) {
    pretty_assertions::assert_eq!(fix(members, before, id, key), source(members, after));
}

pub fn assert_no_diagnostic(members: &str, body: &str, id: &str) {
    let diagnostics = analyze(&document(members, body));
    assert!(
        diagnostics.iter().all(|d| d.id() != id),
        "unexpected {id} in {:?}",
        ids(&diagnostics)
    );
}
