//! Text edits handed back to the host

use crate::error::{Error, Result};
use crate::syntax::Span;

/// Replaces the text covered by `span` with `new_text`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

impl TextEdit {
    pub fn new(span: Span, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }

    /// Builds the smallest edit turning `source[span]` into `new_text` by
    /// trimming the common prefix and suffix of the old and new text
    pub fn minimized(source: &str, span: Span, new_text: &str) -> Self {
        let old_text = span.text(source);
        let prefix = common_prefix_len(old_text, new_text);
        let suffix = common_suffix_len(&old_text[prefix..], &new_text[prefix..]);
        let start = span.start + prefix;
        let end = span.start + old_text.len() - suffix;
        Self {
            span: Span::new(start, end),
            new_text: new_text[prefix..new_text.len() - suffix].to_string(),
        }
    }

    /// An edit that changes nothing
    pub fn is_noop(&self, source: &str) -> bool {
        self.span.text(source) == self.new_text
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    len
}

fn common_suffix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ca, cb) in a.chars().rev().zip(b.chars().rev()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    len
}

/// Applies non-overlapping edits to `source`
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| (edit.span.start, edit.span.end));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in sorted {
        if edit.span.start < cursor {
            return Err(Error::invalid_input(format!(
                "overlapping edit at {}..{}",
                edit.span.start, edit.span.end
            )));
        }
        let unchanged = source.get(cursor..edit.span.start).ok_or_else(|| {
            Error::invalid_input(format!(
                "edit span {}..{} out of range",
                edit.span.start, edit.span.end
            ))
        })?;
        output.push_str(unchanged);
        output.push_str(&edit.new_text);
        cursor = edit.span.end;
    }
    let rest = source
        .get(cursor..)
        .ok_or_else(|| Error::invalid_input(format!("edit end {cursor} out of range")))?;
    output.push_str(rest);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimized_trims_common_text() {
        let source = "x; Assert.IsTrue(a); y";
        let span = Span::new(3, 19);
        let edit = TextEdit::minimized(source, span, "Assert.That(a, Is.True)");
        assert_eq!(edit.new_text, "That(a, Is.True");
        assert_eq!(edit.span.text(source), "IsTrue(a");
        let fixed = apply_edits(source, &[edit]).unwrap();
        assert_eq!(fixed, "x; Assert.That(a, Is.True); y");
    }

    #[test]
    fn test_minimized_identical_text_is_noop() {
        let source = "F(x)";
        let edit = TextEdit::minimized(source, Span::new(0, 4), "F(x)");
        assert!(edit.span.is_empty());
        assert!(edit.is_noop(source));
    }

    #[test]
    fn test_minimized_respects_char_boundaries() {
        let source = "\"é\"";
        let edit = TextEdit::minimized(source, Span::new(0, source.len()), "\"è\"");
        assert_eq!(apply_edits(source, &[edit]).unwrap(), "\"è\"");
    }

    #[test]
    fn test_apply_edits_rejects_overlap() {
        let edits = [
            TextEdit::new(Span::new(0, 3), "a"),
            TextEdit::new(Span::new(2, 4), "b"),
        ];
        assert!(apply_edits("abcdef", &edits).is_err());
    }

    #[test]
    fn test_apply_edits_in_any_order() {
        let edits = [
            TextEdit::new(Span::new(4, 5), "E"),
            TextEdit::new(Span::new(0, 1), "A"),
        ];
        assert_eq!(apply_edits("abcdef", &edits).unwrap(), "AbcdEf");
    }
}
