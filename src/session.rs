//! Research session orchestration
//!
//! Drives the pipeline from goal to executive report: plan with a fast
//! model, deep-research the selected tasks in the background, synthesize
//! the findings, and optionally illustrate them. Each phase chains to the
//! previous interaction so the service carries conversational context
//! forward.

use std::sync::Arc;

use eyre::{Result, bail};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::interactions::{InteractionClient, InteractionRequest};
use crate::plan::{self, Task};
use crate::poll::{self, PollSettings};
use crate::progress::ProgressSink;
use crate::prompts;

/// Pipeline phase, advanced strictly in order
///
/// The only transitions are the three forward phase operations plus reset
/// back to `Empty` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No plan yet
    Empty,
    /// Plan generated, awaiting task selection
    Planned,
    /// Deep research finished
    Researched,
    /// Executive report produced
    Synthesized,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Empty => "empty",
            Self::Planned => "planned",
            Self::Researched => "researched",
            Self::Synthesized => "synthesized",
        };
        write!(f, "{}", s)
    }
}

/// Everything accumulated across the phases of one session
///
/// The phase is derived from which fields are populated rather than stored
/// separately, so state and phase cannot drift apart.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub plan_interaction_id: Option<String>,
    pub plan_text: Option<String>,
    pub tasks: Vec<Task>,
    pub research_interaction_id: Option<String>,
    pub research_text: Option<String>,
    pub synthesis_text: Option<String>,
    pub infographic: Option<Vec<u8>>,
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        if self.synthesis_text.is_some() {
            Phase::Synthesized
        } else if self.research_interaction_id.is_some() {
            Phase::Researched
        } else if self.plan_interaction_id.is_some() {
            Phase::Planned
        } else {
            Phase::Empty
        }
    }
}

/// Models and polling behavior for one session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Fast model that drafts the numbered plan
    pub planner_model: String,
    /// Managed deep-research agent
    pub research_agent: String,
    /// Strong model that writes the executive report
    pub synthesis_model: String,
    /// Image model for the TL;DR infographic
    pub image_model: String,
    pub poll: PollSettings,
}

impl SessionConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            planner_model: config.models.planner.clone(),
            research_agent: config.models.researcher.clone(),
            synthesis_model: config.models.synthesizer.clone(),
            image_model: config.models.illustrator.clone(),
            poll: PollSettings::from_secs(
                config.research.poll_interval_secs,
                config.research.timeout_secs,
            ),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Final deliverable of a session
#[derive(Debug, Clone)]
pub struct Report {
    /// Markdown-ish executive report text
    pub text: String,
    /// PNG bytes when illustration succeeded
    pub infographic: Option<Vec<u8>>,
}

/// One research pipeline run against the interaction service
pub struct ResearchSession {
    client: Arc<dyn InteractionClient>,
    config: SessionConfig,
    state: SessionState,
}

impl ResearchSession {
    pub fn new(client: Arc<dyn InteractionClient>, config: SessionConfig) -> Self {
        Self {
            client,
            config,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    /// Generate a numbered research plan for the goal
    ///
    /// Grounded with web search so the plan reflects current sources. The
    /// parsed tasks are kept in session state for selection; a plan the
    /// parser finds no tasks in still advances the phase, leaving the raw
    /// plan text available for inspection.
    pub async fn generate_plan(&mut self, goal: &str) -> Result<&[Task]> {
        let goal = goal.trim();
        if goal.is_empty() {
            bail!("Research goal must not be empty");
        }
        if self.phase() != Phase::Empty {
            bail!(
                "A plan already exists (phase: {}); reset the session before planning again",
                self.phase()
            );
        }

        info!("Generating research plan for: {}", goal);
        let request =
            InteractionRequest::with_model(&self.config.planner_model, prompts::plan(goal))
                .with_google_search();
        let interaction = self.client.create(request).await?;

        let plan_text = interaction.text();
        let tasks = plan::parse(&plan_text);
        info!("Plan ready: {} tasks", tasks.len());

        self.state.plan_interaction_id = Some(interaction.id);
        self.state.plan_text = Some(plan_text);
        self.state.tasks = tasks;
        Ok(&self.state.tasks)
    }

    /// Run deep research over the selected tasks
    ///
    /// `selection` holds zero-based indexes into [`Self::tasks`]. The
    /// research interaction chains to the plan and executes in the
    /// background; this call polls until it completes or the configured
    /// timeout lapses, reporting progress through the sink. Returns the
    /// research findings text, or `Status: <status>` when the service
    /// produced no text (e.g. still in progress at timeout).
    pub async fn start_research(
        &mut self,
        selection: &[usize],
        sink: &mut dyn ProgressSink,
    ) -> Result<&str> {
        let Some(plan_id) = self.state.plan_interaction_id.clone() else {
            bail!("No plan to research; generate a plan first");
        };
        if self.state.research_interaction_id.is_some() {
            bail!(
                "Research already ran (phase: {}); reset the session to start over",
                self.phase()
            );
        }
        if selection.is_empty() {
            bail!("No tasks selected");
        }

        let mut selected = Vec::with_capacity(selection.len());
        for &index in selection {
            let task = self.state.tasks.get(index).ok_or_else(|| {
                eyre::eyre!(
                    "Task index {} out of range (plan has {} tasks)",
                    index,
                    self.state.tasks.len()
                )
            })?;
            selected.push(task);
        }

        info!(
            "Starting deep research on {}/{} tasks",
            selected.len(),
            self.state.tasks.len()
        );
        let request = InteractionRequest::with_agent(
            &self.config.research_agent,
            prompts::research(&selected),
        )
        .chained_to(plan_id)
        .in_background();

        let interaction = self.client.create(request).await?;
        debug!(id = %interaction.id, "start_research: research interaction created");

        let interaction =
            poll::await_completion(self.client.as_ref(), &interaction.id, self.config.poll, sink)
                .await?;
        info!("Research finished with status: {}", interaction.status);

        let text = interaction.text();
        let text = if text.is_empty() {
            format!("Status: {}", interaction.status)
        } else {
            text
        };

        self.state.research_interaction_id = Some(interaction.id);
        Ok(self.state.research_text.insert(text))
    }

    /// Synthesize the findings into an executive report
    ///
    /// Chains to the research interaction and embeds the findings text.
    /// After synthesis succeeds an infographic is attempted; that step is
    /// best-effort and never fails the report.
    pub async fn generate_report(&mut self) -> Result<Report> {
        let (Some(research_id), Some(research_text)) = (
            self.state.research_interaction_id.clone(),
            self.state.research_text.clone(),
        ) else {
            bail!("No research findings to report on; run research first");
        };
        if self.state.synthesis_text.is_some() {
            bail!("Report already generated; reset the session to start over");
        }

        info!("Synthesizing executive report");
        let request = InteractionRequest::with_model(
            &self.config.synthesis_model,
            prompts::synthesis(&research_text),
        )
        .chained_to(research_id);
        let interaction = self.client.create(request).await?;

        let report_text = interaction.text();
        let infographic = self.request_infographic(&report_text).await;

        self.state.synthesis_text = Some(report_text.clone());
        self.state.infographic = infographic.clone();
        Ok(Report {
            text: report_text,
            infographic,
        })
    }

    /// Best-effort TL;DR image; failure is logged, never fatal
    async fn request_infographic(&self, report_text: &str) -> Option<Vec<u8>> {
        debug!("request_infographic: called");
        let result = self
            .client
            .generate_content(&self.config.image_model, &prompts::infographic(report_text))
            .await;

        let content = match result {
            Ok(content) => content,
            Err(e) => {
                warn!("Infographic generation failed (optional step): {}", e);
                return None;
            }
        };

        let inline = content.first_inline()?;
        match inline.bytes() {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Infographic generation failed (optional step): {}", e);
                None
            }
        }
    }

    /// Discard all phase results and return to `Empty`
    pub fn reset(&mut self) {
        debug!("reset: clearing session state");
        self.state = SessionState::default();
    }
}
