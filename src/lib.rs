//! DeepResearch - research planning and report pipeline
//!
//! Drives the Gemini interactions API through a staged workflow: plan a
//! numbered task list for a research goal, run the selected tasks through
//! the deep-research agent in the background, synthesize an executive
//! report, and optionally illustrate it with a generated infographic.
//! Reports export to Markdown, PDF and DOCX.
//!
//! # Modules
//!
//! - [`interactions`] - client trait, Gemini implementation and wire types
//! - [`session`] - workflow state machine driving plan/research/report
//! - [`plan`] - numbered task-list parsing
//! - [`poll`] - completion polling with progress reporting
//! - [`export`] - PDF and DOCX report rendering
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod export;
pub mod interactions;
pub mod plan;
pub mod poll;
pub mod progress;
pub mod prompts;
pub mod session;

// Re-export commonly used types
pub use config::{ClientConfig, Config, ModelsConfig, ResearchConfig};
pub use export::{ExportError, render_docx, render_pdf};
pub use interactions::{
    ClientError, GeminiClient, Interaction, InteractionClient, InteractionRequest,
    InteractionStatus, create_client,
};
pub use plan::Task;
pub use poll::{PollSettings, await_completion};
pub use progress::{ConsoleProgress, NullProgress, ProgressSink};
pub use session::{Phase, Report, ResearchSession, SessionConfig, SessionState};
