//! Constraint-model calls that still pass a format string and `params` arguments

use super::{ClassicRule, DiagnosticData, Finding};
use crate::catalog::holders;
use crate::classifier::InvocationShape;
use crate::descriptors;

/// Classic methods are left to their own rule, whose fix converts the message too
pub(super) fn analyze(shape: &InvocationShape) -> Option<Finding> {
    if shape.method.containing_type.full_name() != holders::ASSERT
        || ClassicRule::from_method(shape.method_name()).is_some()
    {
        return None;
    }
    shape.message()?;
    if shape.overflow().is_empty() {
        return None;
    }
    Some(Finding::at_call(
        shape,
        &descriptors::UPDATE_STRING_FORMAT_TO_INTERPOLATABLE_STRING,
        DiagnosticData::FormatString,
    ))
}
