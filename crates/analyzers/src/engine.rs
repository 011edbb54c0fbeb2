//! Host-facing entry points: analysis, code actions and fix-all

use crate::classifier::{classify, InvocationShape};
use crate::descriptors;
use crate::fixes::{self, CodeAction};
use crate::rules::{self, DiagnosticData};
use nunit_analyzers_core::{
    apply_edits, AnalyzerConfig, CancellationToken, DiagnosticDescriptor, Result, SemanticModel,
    Severity, Span, SyntaxTree, TextEdit,
};
use tracing::{debug, trace, warn};

/// A reported diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub descriptor: &'static DiagnosticDescriptor,
    pub span: Span,
    /// The descriptor's message with its placeholders filled in
    pub message: String,
    pub severity: Severity,
    pub data: DiagnosticData,
}

impl Diagnostic {
    pub fn id(&self) -> &'static str {
        self.descriptor.id
    }
}

/// Runs the assertion rules over documents
///
/// The engine holds only configuration; every call is independent and the
/// engine can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: AnalyzerConfig,
}

impl AnalysisEngine {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Every descriptor the engine can report, in id order
    pub fn supported_diagnostics() -> &'static [&'static DiagnosticDescriptor] {
        descriptors::ALL
    }

    /// Analyzes one document
    ///
    /// Diagnostics come back ordered by span, then id. Rules configured off are
    /// not reported at all.
    pub fn analyze(
        &self,
        tree: &SyntaxTree,
        model: &dyn SemanticModel,
        cancellation: &CancellationToken,
    ) -> Result<Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();
        for (invocation, root) in tree.invocations() {
            cancellation.check()?;
            let Some(shape) = classify(invocation, root, model) else {
                continue;
            };
            for finding in rules::analyze(&shape, model) {
                let Some(severity) = self.config.effective_severity(finding.descriptor) else {
                    trace!(id = finding.descriptor.id, "Rule disabled by configuration");
                    continue;
                };
                let arguments: Vec<&str> = finding.arguments.iter().map(String::as_str).collect();
                diagnostics.push(Diagnostic {
                    descriptor: finding.descriptor,
                    span: finding.span,
                    message: finding.descriptor.format_message(&arguments),
                    severity,
                    data: finding.data,
                });
            }
        }
        diagnostics.sort_by(|a, b| {
            (a.span.start, a.span.end, a.descriptor.id).cmp(&(b.span.start, b.span.end, b.descriptor.id))
        });
        debug!(count = diagnostics.len(), "Analysis complete");
        Ok(diagnostics)
    }

    /// The fixes offered for one diagnostic
    pub fn code_actions(
        &self,
        tree: &SyntaxTree,
        model: &dyn SemanticModel,
        diagnostic: &Diagnostic,
        cancellation: &CancellationToken,
    ) -> Result<Vec<CodeAction>> {
        cancellation.check()?;
        Ok(self.actions(tree, model, diagnostic))
    }

    /// Applies the fix with `equivalence_key` for every diagnostic offering it
    ///
    /// Edits are applied in source order. An edit overlapping one already
    /// accepted is skipped, so nested assertions are fixed one level per pass.
    pub fn fix_all(
        &self,
        tree: &SyntaxTree,
        model: &dyn SemanticModel,
        diagnostics: &[Diagnostic],
        equivalence_key: &str,
        cancellation: &CancellationToken,
    ) -> Result<String> {
        let mut edits = Vec::new();
        for diagnostic in diagnostics {
            cancellation.check()?;
            edits.extend(
                self.actions(tree, model, diagnostic)
                    .into_iter()
                    .filter(|action| action.equivalence_key == equivalence_key)
                    .map(|action| action.edit),
            );
        }
        edits.sort_by_key(|edit| (edit.span.start, edit.span.end));

        let source = tree.source();
        let mut accepted: Vec<TextEdit> = Vec::new();
        for edit in edits {
            if edit.is_noop(source) {
                continue;
            }
            if let Some(previous) = accepted.last() {
                if *previous == edit {
                    continue;
                }
                if edit.span.start < previous.span.end {
                    warn!(
                        start = edit.span.start,
                        end = edit.span.end,
                        "Skipping edit overlapping an earlier fix"
                    );
                    continue;
                }
            }
            accepted.push(edit);
        }
        debug!(key = equivalence_key, edits = accepted.len(), "Applying fix-all");
        apply_edits(source, &accepted)
    }

    fn actions(
        &self,
        tree: &SyntaxTree,
        model: &dyn SemanticModel,
        diagnostic: &Diagnostic,
    ) -> Vec<CodeAction> {
        match &diagnostic.data {
            DiagnosticData::NullConstraint => Vec::new(),
            DiagnosticData::SameAsOnValueType {
                rename,
                replacement,
            } => vec![fixes::use_equality(*rename, replacement)],
            data => match self.reclassify(tree, model, diagnostic.span) {
                Some(shape) => fixes::for_invocation(
                    &shape,
                    data,
                    model,
                    tree.source(),
                    &self.config.fixes,
                ),
                None => {
                    debug!(
                        id = diagnostic.id(),
                        start = diagnostic.span.start,
                        "Diagnostic no longer matches an assertion call"
                    );
                    Vec::new()
                }
            },
        }
    }

    fn reclassify<'t>(
        &self,
        tree: &'t SyntaxTree,
        model: &dyn SemanticModel,
        span: Span,
    ) -> Option<InvocationShape<'t>> {
        let (invocation, root) = tree.find_invocation(span)?;
        classify(invocation, root, model)
    }
}
