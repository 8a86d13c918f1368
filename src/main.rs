//! DeepResearch - research planning and report pipeline
//!
//! CLI entry point for the `dr` binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use deepresearch::cli::{Cli, Command, OutputFormat, parse_selection};
use deepresearch::config::Config;
use deepresearch::export::{render_docx, render_pdf};
use deepresearch::interactions::create_client;
use deepresearch::progress::ConsoleProgress;
use deepresearch::session::{ResearchSession, SessionConfig};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deepresearch")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file =
        fs::File::create(log_dir.join("deepresearch.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "DeepResearch loaded config: planner={}, researcher={}",
        config.models.planner, config.models.researcher
    );

    match cli.command {
        Some(Command::Plan { goal, format }) => cmd_plan(&config, &goal, format).await,
        Some(Command::Run {
            goal,
            tasks,
            all,
            out,
            pdf,
            docx,
            infographic,
            timeout_secs,
        }) => {
            if let Some(secs) = timeout_secs {
                config.research.timeout_secs = secs;
            }
            let opts = RunOpts {
                tasks,
                all,
                out,
                pdf,
                docx,
                infographic,
            };
            cmd_run(&config, &goal, opts).await
        }
        Some(Command::Export { input, pdf, docx }) => {
            cmd_export(&input, pdf.as_deref(), docx.as_deref())
        }
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Generate and print a research plan without executing it
async fn cmd_plan(config: &Config, goal: &str, format: OutputFormat) -> Result<()> {
    config.validate()?;

    let client = create_client(&config.client).context("Failed to create interaction client")?;
    let mut session = ResearchSession::new(client, SessionConfig::from_config(config));

    println!("Planning research for: {}", goal.cyan());
    let tasks = session.generate_plan(goal).await?.to_vec();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        OutputFormat::Text => {
            if tasks.is_empty() {
                println!("{}", "No numbered tasks found in the plan response.".yellow());
                if let Some(text) = &session.state().plan_text {
                    println!();
                    println!("{}", text);
                }
            } else {
                println!();
                println!("Research plan:");
                for task in &tasks {
                    println!("  {}", task.as_line());
                }
            }
        }
    }

    Ok(())
}

/// File outputs for the `run` command
struct RunOpts {
    tasks: Option<String>,
    all: bool,
    out: Option<PathBuf>,
    pdf: Option<PathBuf>,
    docx: Option<PathBuf>,
    infographic: Option<PathBuf>,
}

/// Run the full pipeline: plan, research, report, export
async fn cmd_run(config: &Config, goal: &str, opts: RunOpts) -> Result<()> {
    config.validate()?;

    let client = create_client(&config.client).context("Failed to create interaction client")?;
    let mut session = ResearchSession::new(client, SessionConfig::from_config(config));

    println!("Planning research for: {}", goal.cyan());
    let tasks = session.generate_plan(goal).await?.to_vec();

    if tasks.is_empty() {
        return Err(eyre::eyre!(
            "The planner returned no numbered tasks; try rephrasing the goal"
        ));
    }

    println!();
    println!("Research plan:");
    for task in &tasks {
        println!("  {}", task.as_line());
    }
    println!();

    let selection: Vec<usize> = if opts.all {
        (0..tasks.len()).collect()
    } else if let Some(expr) = &opts.tasks {
        parse_selection(expr, tasks.len()).map_err(|message| eyre::eyre!(message))?
    } else {
        prompt_for_selection(tasks.len())?
    };

    println!("Researching {} of {} tasks...", selection.len(), tasks.len());
    let mut progress = ConsoleProgress;
    session.start_research(&selection, &mut progress).await?;
    println!("{} Research complete", "✓".green());

    println!("Generating report...");
    let report = session.generate_report().await?;
    println!("{} Report generated", "✓".green());
    println!();
    println!("{}", report.text);
    println!();

    let out_path = opts.out.unwrap_or_else(default_report_path);
    write_output(&out_path, report.text.as_bytes())?;

    if let Some(path) = &opts.pdf {
        let bytes = render_pdf(&report.text).context("Failed to render PDF")?;
        write_output(path, &bytes)?;
    }

    if let Some(path) = &opts.docx {
        let bytes = render_docx(&report.text).context("Failed to render DOCX")?;
        write_output(path, &bytes)?;
    }

    if let Some(image) = &report.infographic {
        let path = opts
            .infographic
            .unwrap_or_else(|| PathBuf::from("research-infographic.png"));
        write_output(&path, image)?;
    } else if opts.infographic.is_some() {
        println!("{}", "No infographic was generated; skipping image output.".yellow());
    }

    Ok(())
}

/// Convert an existing markdown report to PDF and/or DOCX
fn cmd_export(input: &Path, pdf: Option<&Path>, docx: Option<&Path>) -> Result<()> {
    if pdf.is_none() && docx.is_none() {
        return Err(eyre::eyre!("Nothing to do: pass --pdf and/or --docx"));
    }

    let text =
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?;

    if let Some(path) = pdf {
        let bytes = render_pdf(&text).context("Failed to render PDF")?;
        write_output(path, &bytes)?;
    }

    if let Some(path) = docx {
        let bytes = render_docx(&text).context("Failed to render DOCX")?;
        write_output(path, &bytes)?;
    }

    Ok(())
}

/// Ask which tasks to research, defaulting to all of them
fn prompt_for_selection(task_count: usize) -> Result<Vec<usize>> {
    print!("Select tasks to research (e.g. 1,3,5 or 'all') [all]: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read selection")?;

    parse_selection(&line, task_count).map_err(|message| eyre::eyre!(message))
}

/// Write a file and confirm on the console
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} Wrote {}", "✓".green(), path.display().to_string().cyan());
    Ok(())
}

fn default_report_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    PathBuf::from(format!("research-report-{}.md", stamp))
}
