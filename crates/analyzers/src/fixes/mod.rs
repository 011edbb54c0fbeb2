//! Code fixes for the assertion diagnostics
//!
//! Every fix rebuilds the full invocation and hands back the smallest text
//! edit that turns the old call into the new one. Sub-expressions copied
//! from the original call render verbatim, comments inside them included.

mod arguments;
mod classic;
mod condition;
mod format_string;
mod message;

use crate::catalog::{constraints, helpers};
use crate::classifier::InvocationShape;
use crate::rules::DiagnosticData;
use nunit_analyzers_core::syntax::render;
use nunit_analyzers_core::{FixesConfig, SemanticModel, Span, TextEdit};
use tracing::debug;

pub const TRANSFORM_TO_CONSTRAINT_MODEL: &str = "TransformToConstraintModel";
pub const TRANSFORM_TO_CONSTRAINT_MODEL_CONDENSED: &str = "TransformToConstraintModelCondensed";
pub const USE_IS_EQUAL_TO: &str = "UseIsEqualTo";
pub const CONVERT_TO_INTERPOLATABLE_STRING: &str = "ConvertToInterpolatableString";

const TRANSFORM_TITLE: &str = "Transform to constraint model";
const CONDENSED_TITLE: &str = "Transform to constraint model (condensed)";
const INTERPOLATE_TITLE: &str = "Convert to interpolatable string";

/// One offered fix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAction {
    pub title: String,
    /// Groups equivalent fixes across diagnostics for fix-all
    pub equivalence_key: &'static str,
    pub edit: TextEdit,
}

/// Fixes for a diagnostic reported on the call `shape`
pub(crate) fn for_invocation(
    shape: &InvocationShape,
    data: &DiagnosticData,
    model: &dyn SemanticModel,
    source: &str,
    config: &FixesConfig,
) -> Vec<CodeAction> {
    let mut actions = Vec::new();
    let mut offer = |title: String, equivalence_key: &'static str, rewritten: Option<_>| {
        match rewritten {
            Some(rewritten) => actions.push(CodeAction {
                title,
                equivalence_key,
                edit: TextEdit::minimized(source, shape.span, &render(&rewritten, source)),
            }),
            None => debug!(key = equivalence_key, "Fix not applicable to this call"),
        }
    };

    match data {
        DiagnosticData::Classic {
            rule,
            has_tolerance,
        } => {
            offer(
                TRANSFORM_TITLE.to_string(),
                TRANSFORM_TO_CONSTRAINT_MODEL,
                classic::transform(shape, *rule, *has_tolerance, model),
            );
            if rule.has_condensed_fix() && config.offer_condensed_fixes {
                offer(
                    CONDENSED_TITLE.to_string(),
                    TRANSFORM_TO_CONSTRAINT_MODEL_CONDENSED,
                    classic::condensed(shape, model),
                );
            }
        }
        DiagnosticData::Condition {
            rule, constraint, ..
        } => offer(
            format!("Use {constraint} constraint"),
            rule.equivalence_key(),
            condition::transform(shape, model),
        ),
        DiagnosticData::FormatString => offer(
            INTERPOLATE_TITLE.to_string(),
            CONVERT_TO_INTERPOLATABLE_STRING,
            format_string::transform(shape, model),
        ),
        DiagnosticData::NullConstraint | DiagnosticData::SameAsOnValueType { .. } => {}
    }
    actions
}

/// Renames `SameAs` to `EqualTo` or `AreSame` to `AreEqual` in place
pub(crate) fn use_equality(rename: Span, replacement: &'static str) -> CodeAction {
    let title = if replacement == constraints::EQUAL_TO {
        format!("Use {}.{replacement}", helpers::IS)
    } else {
        format!("Use {replacement}")
    };
    CodeAction {
        title,
        equivalence_key: USE_IS_EQUAL_TO,
        edit: TextEdit::new(rename, replacement),
    }
}
