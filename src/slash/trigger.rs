use crate::domain::document::DocumentEngine;

/// Characters of text before the caret that are scanned for a trigger.
pub const TRIGGER_WINDOW: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch {
    /// Absolute offset of the `/`. The span ends at the caret.
    pub start: usize,
    pub query: String,
}

impl TriggerMatch {
    /// Length of the `/query` span in characters.
    #[must_use]
    pub fn span_len(&self) -> usize {
        self.query.chars().count() + 1
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.span_len()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scans `window` backwards from its end for a `/word*` run. `caret` is the
/// absolute offset at which the window ends.
#[must_use]
pub fn detect_trigger(window: &str, caret: usize) -> Option<TriggerMatch> {
    let chars: Vec<char> = window.chars().collect();
    let mut word_start = chars.len();
    while word_start > 0 && is_word_char(chars[word_start - 1]) {
        word_start -= 1;
    }
    if word_start == 0 || chars[word_start - 1] != '/' {
        return None;
    }

    let span = chars.len() - word_start + 1;
    let query: String = chars[word_start..].iter().collect();
    Some(TriggerMatch {
        start: caret.checked_sub(span)?,
        query: query.to_lowercase(),
    })
}

#[must_use]
pub fn detect_in(doc: &dyn DocumentEngine) -> Option<TriggerMatch> {
    detect_trigger(&doc.text_before_caret(TRIGGER_WINDOW), doc.caret())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::textarea_doc::TextAreaDocument;

    fn doc_at_end(text: &str) -> TextAreaDocument<'static> {
        let mut doc = TextAreaDocument::from_text(text);
        doc.set_caret(text.chars().count());
        doc
    }

    #[test]
    fn test_trailing_word_is_query() {
        let m = detect_trigger("hello /He1_x", 112).unwrap();
        assert_eq!(m.query, "he1_x");
        assert_eq!(m.start, 106);
        assert_eq!(m.span_len(), 6);
        assert_eq!(m.end(), 112);
    }

    #[test]
    fn test_bare_slash_matches_empty_query() {
        assert_eq!(
            detect_trigger("/", 1),
            Some(TriggerMatch {
                start: 0,
                query: String::new()
            })
        );
        let m = detect_trigger("line one\n/", 10).unwrap();
        assert_eq!(m.start, 9);
        assert!(m.query.is_empty());
    }

    #[test]
    fn test_whitespace_before_caret_is_no_match() {
        assert_eq!(detect_trigger("/h1 ", 4), None);
        assert_eq!(detect_trigger("/h1\n", 4), None);
        assert_eq!(detect_trigger("/h1\t", 4), None);
        assert_eq!(detect_trigger("", 0), None);
    }

    #[test]
    fn test_space_between_slash_and_word_is_no_match() {
        assert_eq!(detect_trigger("/ h", 3), None);
    }

    #[test]
    fn test_only_the_trailing_run_counts() {
        let m = detect_trigger("a/b/c/img", 9).unwrap();
        assert_eq!(m.query, "img");
        assert_eq!(m.start, 5);

        let m = detect_trigger("path/to//", 9).unwrap();
        assert_eq!(m.query, "");
        assert_eq!(m.start, 8);
    }

    #[test]
    fn test_non_word_chars_break_the_run() {
        assert_eq!(detect_trigger("/h-1", 4), None);
        assert_eq!(detect_trigger("/héllo", 6), None);
        assert_eq!(detect_trigger("no slash here", 13), None);
    }

    #[test]
    fn test_inconsistent_caret_is_no_match() {
        assert_eq!(detect_trigger("/bold", 2), None);
    }

    #[test]
    fn test_slash_beyond_window_is_no_match() {
        let doc = doc_at_end(&format!("/{}", "a".repeat(60)));
        assert_eq!(detect_in(&doc), None);

        let doc = doc_at_end(&format!("/{}", "a".repeat(TRIGGER_WINDOW)));
        assert_eq!(detect_in(&doc), None);
    }

    #[test]
    fn test_slash_at_window_edge_matches() {
        let doc = doc_at_end(&format!("intro /{}", "b".repeat(48)));
        let m = detect_in(&doc).unwrap();
        assert_eq!(m.start, 6);
        assert_eq!(m.query.len(), 48);
        assert_eq!(m.end(), doc.caret());

        let doc = doc_at_end(&format!("/{}", "b".repeat(TRIGGER_WINDOW - 1)));
        assert_eq!(detect_in(&doc).map(|m| m.start), Some(0));
    }

    #[test]
    fn test_window_across_lines_gives_absolute_start() {
        let text = format!("{}\nsecond\nab /Co", "x".repeat(80));
        let doc = doc_at_end(&text);
        let m = detect_in(&doc).unwrap();
        assert_eq!(m.start, 80 + 1 + 6 + 1 + 3);
        assert_eq!(m.query, "co");
        assert_eq!(m.end(), text.chars().count());
    }
}
