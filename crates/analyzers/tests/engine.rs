//! Engine behavior across rules: ordering, configuration, fix-all and
//! cancellation

mod common;

use common::{actions, analyze, analyze_with, document, ids, single, source};
use nunit_analyzers::{AnalysisEngine, TRANSFORM_TO_CONSTRAINT_MODEL};
use nunit_analyzers_core::{AnalyzerConfig, CancellationToken, Severity};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("nunit_analyzers=trace")
        .with_test_writer()
        .try_init();
}

fn engine(toml: &str) -> AnalysisEngine {
    AnalysisEngine::new(AnalyzerConfig::from_toml_str(toml).unwrap())
}

#[test]
fn test_supported_diagnostics() {
    let supported = AnalysisEngine::supported_diagnostics();
    assert_eq!(supported.len(), 37);
    assert_eq!(supported.first().map(|d| d.id), Some("NUnit2001"));
    assert_eq!(supported.last().map(|d| d.id), Some("NUnit2054"));
}

#[test]
fn test_diagnostics_are_ordered_by_span_then_id() {
    init_tracing();
    let document = document(
        "",
        "ClassicAssert.IsNull(instance);\n            ClassicAssert.IsTrue(value == 2);",
    );
    assert_eq!(
        ids(&analyze(&document)),
        vec!["NUnit2017", "NUnit2003", "NUnit2010"]
    );
}

#[test]
fn test_severity_override() {
    let document = document("", "ClassicAssert.AreEqual(2, value);");
    let diagnostics = analyze_with(&engine("[rules.NUnit2005]\nseverity = \"error\""), &document);
    assert_eq!(single(&diagnostics, "NUnit2005").severity, Severity::Error);
}

#[test]
fn test_disabled_rules_are_not_reported() {
    let document = document("", "ClassicAssert.AreEqual(2, value);");
    for toml in [
        "[rules.NUnit2005]\nenabled = false",
        "[rules.nunit2005]\nseverity = \"none\"",
    ] {
        assert!(analyze_with(&engine(toml), &document).is_empty(), "{toml}");
    }
}

#[test]
fn test_condensed_fixes_can_be_turned_off() {
    let document = document("", "ClassicAssert.IsTrue(value > 0);");
    let diagnostics = analyze(&document);
    let diagnostic = single(&diagnostics, "NUnit2003");
    assert_eq!(actions(&document, diagnostic).len(), 2);

    let engine = engine("[fixes]\noffer_condensed_fixes = false");
    let offered = engine
        .code_actions(
            document.tree(),
            document.semantic_model(),
            diagnostic,
            &CancellationToken::new(),
        )
        .unwrap();
    let keys: Vec<&str> = offered.iter().map(|action| action.equivalence_key).collect();
    assert_eq!(keys, vec![TRANSFORM_TO_CONSTRAINT_MODEL]);
}

#[test]
fn test_fix_all_rewrites_every_matching_diagnostic() {
    init_tracing();
    let body = "ClassicAssert.AreEqual(2, value);\n            ClassicAssert.IsNull(instance);\n            Assert.That(value, Is.EqualTo(2));";
    let document = document("", body);
    let engine = AnalysisEngine::default();
    let diagnostics = analyze(&document);

    let fixed = engine
        .fix_all(
            document.tree(),
            document.semantic_model(),
            &diagnostics,
            TRANSFORM_TO_CONSTRAINT_MODEL,
            &CancellationToken::new(),
        )
        .unwrap();
    pretty_assertions::assert_eq!(
        fixed,
        source(
            "",
            "Assert.That(value, Is.EqualTo(2));\n            Assert.That(instance, Is.Null);\n            Assert.That(value, Is.EqualTo(2));"
        )
    );
}

#[test]
fn test_fix_all_with_unknown_key_leaves_source_unchanged() {
    let document = document("", "ClassicAssert.AreEqual(2, value);");
    let diagnostics = analyze(&document);
    let fixed = AnalysisEngine::default()
        .fix_all(
            document.tree(),
            document.semantic_model(),
            &diagnostics,
            "NoSuchFix",
            &CancellationToken::new(),
        )
        .unwrap();
    assert_eq!(fixed, document.source());
}

#[test]
fn test_cancellation_stops_analysis() {
    let document = document("", "ClassicAssert.AreEqual(2, value);");
    let token = CancellationToken::new();
    token.cancel();

    let error = AnalysisEngine::default()
        .analyze(document.tree(), document.semantic_model(), &token)
        .unwrap_err();
    assert!(error.is_cancelled());
}

#[test]
fn test_statements_with_syntax_errors_are_skipped() {
    for body in [
        "ClassicAssert.AreEqual(2 value);",
        "ClassicAssert.AreEqual(2, value value);",
    ] {
        assert!(analyze(&document("", body)).is_empty(), "{body}");
    }
}

#[test]
fn test_configuration_file_drives_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nunit-analyzers.toml");
    std::fs::write(&path, "[rules.NUnit2017]\nseverity = \"warning\"\n").unwrap();
    let engine = AnalysisEngine::new(AnalyzerConfig::load(Some(&path)).unwrap());

    let document = document("", "ClassicAssert.IsNull(instance);");
    let diagnostics = analyze_with(&engine, &document);
    assert_eq!(single(&diagnostics, "NUnit2017").severity, Severity::Warning);
}
