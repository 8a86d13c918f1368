//! Line classification for the markdown subset the exporters understand
//!
//! Reports come back as markdown-ish text. Both exporters consume the same
//! classification: `#`/`##`/`###` headings, `-`/`*` bullets, bold spans in
//! paragraphs, and blank-line breaks. Anything fancier renders as plain
//! text rather than failing.

use std::sync::OnceLock;

use regex::Regex;

/// One classified line of report text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `#`, `##` or `###` heading; text is trimmed
    Heading { level: u8, text: &'a str },
    /// `- ` or `* ` list item; text is trimmed
    Bullet(&'a str),
    /// Anything else, kept verbatim
    Paragraph(&'a str),
    Blank,
}

/// Classify a single line
///
/// Markers are only recognized at the very start of the line; an indented
/// `# heading` stays a paragraph.
pub fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return Line::Heading { level: 1, text: rest.trim() };
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Line::Heading { level: 2, text: rest.trim() };
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return Line::Heading { level: 3, text: rest.trim() };
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Line::Bullet(rest.trim());
    }
    Line::Paragraph(line)
}

/// Contiguous run of paragraph text with one formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub bold: bool,
}

static BOLD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn bold_pattern() -> &'static Regex {
    BOLD_PATTERN.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").unwrap())
}

/// Split a paragraph into plain and `**bold**` spans
///
/// Unterminated markers stay literal text; empty spans are dropped, so
/// `**bold** and plain` yields exactly two spans.
pub fn bold_spans(line: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in bold_pattern().captures_iter(line) {
        let whole = caps.get(0).unwrap();
        let inner = caps.get(1).unwrap();

        if whole.start() > last {
            spans.push(Span { text: &line[last..whole.start()], bold: false });
        }
        if !inner.as_str().is_empty() {
            spans.push(Span { text: inner.as_str(), bold: true });
        }
        last = whole.end();
    }

    if last < line.len() {
        spans.push(Span { text: &line[last..], bold: false });
    }
    spans
}

/// Drop `**` and `__` emphasis markers, keeping the text between them
pub fn plain_text(line: &str) -> String {
    line.replace("**", "").replace("__", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_headings_by_level() {
        assert_eq!(classify("# Title"), Line::Heading { level: 1, text: "Title" });
        assert_eq!(classify("## Section"), Line::Heading { level: 2, text: "Section" });
        assert_eq!(classify("### Detail"), Line::Heading { level: 3, text: "Detail" });
    }

    #[test]
    fn test_classify_requires_marker_at_line_start() {
        assert_eq!(classify(" # indented"), Line::Paragraph(" # indented"));
        assert_eq!(classify("#no-space"), Line::Paragraph("#no-space"));
        assert_eq!(classify("#### too deep"), Line::Paragraph("#### too deep"));
    }

    #[test]
    fn test_classify_bullets_with_either_marker() {
        assert_eq!(classify("- first"), Line::Bullet("first"));
        assert_eq!(classify("* second"), Line::Bullet("second"));
        assert_eq!(classify("-no space"), Line::Paragraph("-no space"));
    }

    #[test]
    fn test_classify_trims_heading_and_bullet_text() {
        assert_eq!(classify("##   padded   "), Line::Heading { level: 2, text: "padded" });
        assert_eq!(classify("-   roomy item  "), Line::Bullet("roomy item"));
    }

    #[test]
    fn test_classify_blank_lines() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t "), Line::Blank);
    }

    #[test]
    fn test_bold_spans_splits_mixed_line() {
        let spans = bold_spans("**bold** and plain");
        assert_eq!(
            spans,
            vec![
                Span { text: "bold", bold: true },
                Span { text: " and plain", bold: false },
            ]
        );
    }

    #[test]
    fn test_bold_spans_multiple_runs() {
        let spans = bold_spans("a **b** c **d**");
        assert_eq!(
            spans,
            vec![
                Span { text: "a ", bold: false },
                Span { text: "b", bold: true },
                Span { text: " c ", bold: false },
                Span { text: "d", bold: true },
            ]
        );
    }

    #[test]
    fn test_bold_spans_without_markers() {
        assert_eq!(bold_spans("just text"), vec![Span { text: "just text", bold: false }]);
    }

    #[test]
    fn test_bold_spans_unterminated_marker_stays_literal() {
        assert_eq!(
            bold_spans("**still open"),
            vec![Span { text: "**still open", bold: false }]
        );
    }

    #[test]
    fn test_bold_spans_drops_empty_bold() {
        assert!(bold_spans("****").is_empty());
    }

    #[test]
    fn test_plain_text_strips_emphasis_markers() {
        assert_eq!(plain_text("**a** and __b__"), "a and b");
        assert_eq!(plain_text("untouched"), "untouched");
    }
}
