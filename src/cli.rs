//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DeepResearch - research planning and report pipeline
#[derive(Parser)]
#[command(
    name = "dr",
    about = "Plan, research and synthesize reports with the Gemini interactions API",
    version,
    after_help = "Logs are written to: ~/.local/share/deepresearch/logs/deepresearch.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate a research plan without executing it
    Plan {
        /// Research goal to plan for
        goal: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Run the full pipeline: plan, research, report
    Run {
        /// Research goal to investigate
        goal: String,

        /// Tasks to research: 1-based numbers like "1,3,5", or "all"
        #[arg(short, long)]
        tasks: Option<String>,

        /// Research every planned task without prompting
        #[arg(long, conflicts_with = "tasks")]
        all: bool,

        /// Write the report markdown to this path
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also export the report as PDF
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Also export the report as DOCX
        #[arg(long)]
        docx: Option<PathBuf>,

        /// Where to write the infographic if one is generated
        #[arg(long)]
        infographic: Option<PathBuf>,

        /// Override the research timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Export an existing markdown report to PDF or DOCX
    Export {
        /// Markdown report to convert
        input: PathBuf,

        /// Write a PDF to this path
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Write a DOCX to this path
        #[arg(long)]
        docx: Option<PathBuf>,
    },
}

/// Output format for the plan command
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Parse a task selection like "1,3,5" or "all" into zero-based indices
pub fn parse_selection(input: &str, task_count: usize) -> Result<Vec<usize>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok((0..task_count).collect());
    }

    let mut indices = Vec::new();
    for part in trimmed.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let number: usize = part
            .parse()
            .map_err(|_| format!("Invalid task number: {}", part))?;
        if number == 0 || number > task_count {
            return Err(format!(
                "Task number {} is out of range (plan has {} tasks)",
                number, task_count
            ));
        }
        indices.push(number - 1);
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["dr"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_plan() {
        let cli = Cli::parse_from(["dr", "plan", "quantum computing markets"]);
        if let Some(Command::Plan { goal, format }) = cli.command {
            assert_eq!(goal, "quantum computing markets");
            assert!(matches!(format, OutputFormat::Text));
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["dr", "run", "EV adoption in Europe", "--tasks", "1,3"]);
        if let Some(Command::Run {
            goal,
            tasks,
            all,
            timeout_secs,
            ..
        }) = cli.command
        {
            assert_eq!(goal, "EV adoption in Europe");
            assert_eq!(tasks.as_deref(), Some("1,3"));
            assert!(!all);
            assert!(timeout_secs.is_none());
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_run_all() {
        let cli = Cli::parse_from(["dr", "run", "goal", "--all"]);
        assert!(matches!(cli.command, Some(Command::Run { all: true, .. })));
    }

    #[test]
    fn test_cli_run_all_conflicts_with_tasks() {
        let result = Cli::try_parse_from(["dr", "run", "goal", "--all", "--tasks", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["dr", "export", "report.md", "--pdf", "report.pdf"]);
        if let Some(Command::Export { input, pdf, docx }) = cli.command {
            assert_eq!(input, PathBuf::from("report.md"));
            assert_eq!(pdf, Some(PathBuf::from("report.pdf")));
            assert!(docx.is_none());
        } else {
            panic!("Expected Export command");
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("invalid".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["dr", "-c", "/path/to/config.yml", "plan", "goal"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }

    #[test]
    fn test_parse_selection_all() {
        assert_eq!(parse_selection("all", 3), Ok(vec![0, 1, 2]));
        assert_eq!(parse_selection("ALL", 3), Ok(vec![0, 1, 2]));
        assert_eq!(parse_selection("", 2), Ok(vec![0, 1]));
        assert_eq!(parse_selection("  ", 2), Ok(vec![0, 1]));
    }

    #[test]
    fn test_parse_selection_numbers() {
        assert_eq!(parse_selection("1,3", 5), Ok(vec![0, 2]));
        assert_eq!(parse_selection(" 2 , 4 ", 4), Ok(vec![1, 3]));
        assert_eq!(parse_selection("5", 5), Ok(vec![4]));
    }

    #[test]
    fn test_parse_selection_out_of_range() {
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("4", 3).is_err());
    }

    #[test]
    fn test_parse_selection_garbage() {
        assert!(parse_selection("one,two", 3).is_err());
        assert!(parse_selection("1;2", 3).is_err());
    }
}
