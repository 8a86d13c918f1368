//! Prompt construction for each research phase
//!
//! Kept in one place so the phase orchestration reads as control flow.
//! Later phases embed the prior phase's text even though interactions are
//! also chained server-side; the redundancy keeps results stable when the
//! service truncates chain context.

use crate::plan::Task;

/// Planning prompt: ask for a numbered 5-8 item plan the parser can read
pub fn plan(goal: &str) -> String {
    format!(
        "Create a numbered research plan for: {}\n\nFormat: 1. [Task] - [Details]\n\nInclude 5-8 specific tasks.",
        goal
    )
}

/// Research prompt over the selected tasks, one blank line between items
pub fn research(tasks: &[&Task]) -> String {
    let tasks_str = tasks
        .iter()
        .map(|t| t.as_line())
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("Research these tasks thoroughly with sources:\n\n{}", tasks_str)
}

/// Synthesis prompt turning raw findings into an executive report
pub fn synthesis(research_text: &str) -> String {
    format!(
        "Create executive report with Summary, Findings, Recommendations, Risks:\n\n{}",
        research_text
    )
}

/// Image prompt for the TL;DR infographic
pub fn infographic(report_text: &str) -> String {
    format!(
        "Create a whiteboard summary infographic for the following: {}",
        report_text
    )
}
