//! Numbered-plan parsing
//!
//! Planner output is free-form text containing a numbered list. This module
//! extracts the list items as [`Task`]s without renumbering or reordering
//! them.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One numbered task extracted from plan text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Ordinal as written in the plan; duplicates and gaps pass through
    pub number: u32,
    pub text: String,
}

impl Task {
    /// Render back to a single `N. text` line
    pub fn as_line(&self) -> String {
        format!("{}. {}", self.number, self.text)
    }
}

// Matches a list marker at the start of a line: digits, then `.`, `)` or
// `-`, with optional spaces/tabs on either side of the separator. Tabs and
// spaces only; consuming newlines here would swallow the next marker.
static MARKER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn marker_pattern() -> &'static Regex {
    MARKER_PATTERN.get_or_init(|| Regex::new(r"(?m)^(\d+)[ \t]*[.)-][ \t]*").unwrap())
}

/// Extract numbered tasks from free-form plan text
///
/// A task body runs from its marker to the next marker, a blank line, or
/// the end of the text, whichever comes first. Interior newlines become
/// single spaces. Text with no markers yields an empty Vec.
pub fn parse(text: &str) -> Vec<Task> {
    // (ordinal, body start, marker start); markers with ordinals too large
    // for u32 still terminate the previous body but produce no task.
    let markers: Vec<(Option<u32>, usize, usize)> = marker_pattern()
        .captures_iter(text)
        .map(|caps| {
            let m = caps.get(0).unwrap();
            let number = caps[1].parse::<u32>().ok();
            (number, m.end(), m.start())
        })
        .collect();

    let mut tasks = Vec::new();
    for (i, &(number, body_start, _)) in markers.iter().enumerate() {
        let Some(number) = number else { continue };

        let body_end = markers
            .get(i + 1)
            .map(|&(_, _, next_start)| next_start)
            .unwrap_or(text.len());

        let mut region = &text[body_start..body_end];
        if let Some(pos) = region.find("\n\n") {
            region = &region[..pos];
        }

        tasks.push(Task {
            number,
            text: region.trim().replace('\n', " "),
        });
    }

    debug!(markers = markers.len(), tasks = tasks.len(), "parse: extracted numbered tasks");
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_all_separator_shapes() {
        let text = "1. First item\n2) Second item\n3 - Summarize findings";
        let tasks = parse(text);

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0], Task { number: 1, text: "First item".to_string() });
        assert_eq!(tasks[1], Task { number: 2, text: "Second item".to_string() });
        assert_eq!(tasks[2], Task { number: 3, text: "Summarize findings".to_string() });
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_no_markers() {
        let text = "Here is my plan.\nIt has prose but no numbered list at line starts.";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn test_parse_joins_wrapped_bodies_with_spaces() {
        let text = "1. Investigate prior art\nacross both fields\n2. Compare results";
        let tasks = parse(text);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "Investigate prior art across both fields");
        assert_eq!(tasks[1].text, "Compare results");
    }

    #[test]
    fn test_parse_body_stops_at_blank_line() {
        let text = "1. First task\n\nClosing prose that is not a task.\n2. Second task";
        let tasks = parse(text);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "First task");
        assert_eq!(tasks[1].text, "Second task");
    }

    #[test]
    fn test_parse_preserves_duplicates_and_order() {
        let text = "2. beta\n1. alpha\n2. gamma";
        let tasks = parse(text);

        let numbers: Vec<u32> = tasks.iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![2, 1, 2]);
        assert_eq!(tasks[2].text, "gamma");
    }

    #[test]
    fn test_parse_normalizes_leading_zeros() {
        let tasks = parse("01. padded ordinal");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].number, 1);
    }

    #[test]
    fn test_parse_ignores_mid_line_and_indented_numbers() {
        let text = "The plan has 2. phases\n  1. indented line";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn test_parse_keeps_empty_bodies() {
        let tasks = parse("1.\n2. real work");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0], Task { number: 1, text: String::new() });
        assert_eq!(tasks[1].text, "real work");
    }

    #[test]
    fn test_parse_skips_ordinals_too_large_to_represent() {
        let tasks = parse("99999999999999999999. impossible\n1. fine");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].number, 1);
        assert_eq!(tasks[0].text, "fine");
    }

    #[test]
    fn test_as_line_round_trips_through_parse() {
        let original = Task { number: 4, text: "Survey recent benchmarks".to_string() };
        let reparsed = parse(&original.as_line());
        assert_eq!(reparsed, vec![original]);
    }

    #[test]
    fn test_parse_ignores_text_before_first_marker() {
        let text = "Here is the plan I propose:\n1. Only task";
        let tasks = parse(text);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "Only task");
    }
}
