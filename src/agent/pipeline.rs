//! Agent Execution Pipeline
//!
//! An [`Agent`] binds a name to a data provider, a prompt renderer, a logger
//! and a set of [`AgentStages`], and drives one [`RunContext`] through the
//! fixed stage sequence per call to [`Agent::run`].

use crate::agent::context::{RunContext, RunReport, RunState, Stage};
use crate::agent::renderer::{PlaceholderRenderer, PromptRenderer};
use crate::agent::repository::AgentDataProvider;
use crate::agent::stages::{AgentScope, AgentStages, BaseStages, StageResult};
use crate::config::LoggingSettings;
use crate::error::{AgentError, LogError};
use crate::logging::{Level, Logger, SinkRegistry};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

pub struct Agent {
    name: String,
    logger: Arc<Logger>,
    provider: Arc<dyn AgentDataProvider>,
    renderer: Arc<dyn PromptRenderer>,
    stages: Arc<dyn AgentStages>,
}

impl Agent {
    /// Agent with the base stages and the placeholder renderer.
    pub fn new(
        name: impl Into<String>,
        provider: Arc<dyn AgentDataProvider>,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            name: name.into(),
            logger,
            provider,
            renderer: Arc::new(PlaceholderRenderer),
            stages: Arc::new(BaseStages),
        }
    }

    /// Agent whose logger is named after the agent and draws sinks from `registry`.
    pub fn with_logging(
        name: impl Into<String>,
        provider: Arc<dyn AgentDataProvider>,
        settings: &LoggingSettings,
        registry: Arc<SinkRegistry>,
    ) -> Result<Self, LogError> {
        let name = name.into();
        let logger = Arc::new(Logger::new(name.clone(), settings, registry)?);
        Ok(Self::new(name, provider, logger))
    }

    pub fn with_stages(mut self, stages: Arc<dyn AgentStages>) -> Self {
        self.stages = stages;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn PromptRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Run the pipeline and return its output; `None` when the run aborted or
    /// produced nothing.
    pub fn run(&self, extra: Map<String, Value>) -> Option<Value> {
        self.execute(extra).output
    }

    /// Run the pipeline and return the output together with the final context.
    pub fn execute(&self, extra: Map<String, Value>) -> RunReport {
        let scope = AgentScope {
            name: &self.name,
            logger: &self.logger,
            provider: self.provider.as_ref(),
            renderer: self.renderer.as_ref(),
        };
        let mut ctx = RunContext::new();
        scope.note(&format!("\n{} - Running...", self.name), Level::Info);

        match self.run_stages(&scope, &mut ctx, &extra) {
            Ok(()) => {
                ctx.set_state(RunState::Done);
                tracing::debug!(agent = %self.name, "Run complete");
                RunReport {
                    output: ctx.output.clone(),
                    context: ctx,
                }
            }
            Err((stage, e)) => {
                scope.report_fault("Error running agent", &e);
                ctx.set_state(RunState::Aborted(stage));
                tracing::debug!(agent = %self.name, %stage, "Run aborted");
                RunReport {
                    output: None,
                    context: ctx,
                }
            }
        }
    }

    fn run_stages(
        &self,
        scope: &AgentScope<'_>,
        ctx: &mut RunContext,
        extra: &Map<String, Value>,
    ) -> Result<(), (Stage, AgentError)> {
        let stages = self.stages.as_ref();
        step(ctx, Stage::Loading, |ctx| stages.load_data(scope, ctx, extra))?;
        step(ctx, Stage::Processing, |ctx| stages.process_data(scope, ctx))?;
        step(ctx, Stage::Rendering, |ctx| stages.generate_prompt(scope, ctx))?;
        step(ctx, Stage::Inferring, |ctx| stages.run_model(scope, ctx))?;
        step(ctx, Stage::Parsing, |ctx| stages.parse_result(scope, ctx))?;
        step(ctx, Stage::Persisting, |ctx| stages.save_result(scope, ctx))?;
        step(ctx, Stage::Building, |ctx| stages.build_output(scope, ctx))
    }
}

fn step<F>(ctx: &mut RunContext, stage: Stage, f: F) -> Result<(), (Stage, AgentError)>
where
    F: FnOnce(&mut RunContext) -> StageResult,
{
    ctx.set_state(RunState::Running(stage));
    tracing::trace!(%stage, "Entering stage");
    f(ctx).map_err(|e| (stage, e))
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}
