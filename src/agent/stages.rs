//! Pipeline stages
//!
//! [`AgentStages`] is the capability set an agent is composed from. Every method
//! has a default: the load, render, infer and persist stages delegate to the
//! free functions in this module, the rest are no-ops. A specialized agent
//! implements the trait, overrides the stages it cares about, and can still call
//! the free functions to reuse the base behavior.
//!
//! Two failure domains apply. The default load, render, infer and persist
//! stages catch their own faults, log them and clear their output field before
//! returning `Ok`. Any `Err` returned from a stage method aborts the run.

use crate::agent::context::{RunContext, AGENT_NAME_PARAM, PARAMETERS_KEY, PROMPT_TEMPLATES_KEY};
use crate::agent::renderer::PromptRenderer;
use crate::agent::repository::AgentDataProvider;
use crate::config::RESULTS_CHANNEL;
use crate::error::AgentError;
use crate::logging::{Level, Logger, Target};
use serde_json::{Map, Value};

pub type StageResult = Result<(), AgentError>;

/// Collaborators visible to every stage of one agent.
pub struct AgentScope<'a> {
    pub name: &'a str,
    pub logger: &'a Logger,
    pub provider: &'a dyn AgentDataProvider,
    pub renderer: &'a dyn PromptRenderer,
}

impl AgentScope<'_> {
    /// Log `fault` at error severity on the default channel.
    ///
    /// A logging failure here is reported as a diagnostic and otherwise ignored;
    /// stage isolation must not depend on the log being writable.
    pub fn report_fault(&self, context: &str, fault: &AgentError) {
        let msg = format!("{}: {}", context, fault);
        if let Err(e) = self
            .logger
            .log_fault(&msg, Level::Error, Target::Default, fault)
        {
            tracing::warn!(agent = self.name, error = %e, "Failed to log stage fault: {}", msg);
        }
    }

    /// Log `msg` on the default channel, reporting logging failures as diagnostics.
    pub fn note(&self, msg: &str, level: Level) {
        if let Err(e) = self.logger.log_at(msg, level, Target::Default) {
            tracing::warn!(agent = self.name, error = %e, "Failed to log: {}", msg);
        }
    }
}

pub trait AgentStages: Send + Sync {
    fn load_data(
        &self,
        scope: &AgentScope<'_>,
        ctx: &mut RunContext,
        extra: &Map<String, Value>,
    ) -> StageResult {
        load_data(self, scope, ctx, extra)
    }

    /// Inject fields shared by a family of agents.
    fn load_agent_type_data(&self, _scope: &AgentScope<'_>, _ctx: &mut RunContext) -> StageResult {
        Ok(())
    }

    /// Inject fields specific to one agent.
    fn load_additional_data(&self, _scope: &AgentScope<'_>, _ctx: &mut RunContext) -> StageResult {
        Ok(())
    }

    /// Transform or validate the working data in place.
    fn process_data(&self, _scope: &AgentScope<'_>, _ctx: &mut RunContext) -> StageResult {
        Ok(())
    }

    fn generate_prompt(&self, scope: &AgentScope<'_>, ctx: &mut RunContext) -> StageResult {
        generate_prompt(scope, ctx)
    }

    fn run_model(&self, scope: &AgentScope<'_>, ctx: &mut RunContext) -> StageResult {
        run_model(scope, ctx)
    }

    /// Turn `raw_result` into a structured candidate.
    fn parse_result(&self, _scope: &AgentScope<'_>, _ctx: &mut RunContext) -> StageResult {
        Ok(())
    }

    fn save_result(&self, scope: &AgentScope<'_>, ctx: &mut RunContext) -> StageResult {
        save_result(scope, ctx)
    }

    fn build_output(&self, _scope: &AgentScope<'_>, ctx: &mut RunContext) -> StageResult {
        build_output(ctx)
    }
}

/// The base variant: every stage at its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseStages;

impl AgentStages for BaseStages {}

/// Reload config and merge `extra`, flatten the persona, then run the two
/// loading extension points of `stages`.
pub fn load_data<S: AgentStages + ?Sized>(
    stages: &S,
    scope: &AgentScope<'_>,
    ctx: &mut RunContext,
    extra: &Map<String, Value>,
) -> StageResult {
    load_agent_data(scope, ctx, extra);
    load_persona_data(ctx)?;
    stages.load_agent_type_data(scope, ctx)?;
    stages.load_additional_data(scope, ctx)
}

/// Fetch a fresh config and build the working data from it and `extra`.
///
/// On failure both `config` and `data` are cleared.
pub fn load_agent_data(scope: &AgentScope<'_>, ctx: &mut RunContext, extra: &Map<String, Value>) {
    match scope.provider.load_agent_data(scope.name) {
        Ok(config) => {
            let mut data = Map::new();
            data.insert(
                PARAMETERS_KEY.to_string(),
                Value::Object(config.parameters.clone()),
            );
            data.insert(
                PROMPT_TEMPLATES_KEY.to_string(),
                Value::Object(config.prompt_templates.clone()),
            );
            for (key, value) in extra {
                data.insert(key.clone(), value.clone());
            }
            ctx.config = Some(config);
            ctx.data = Some(data);
        }
        Err(e) => {
            scope.report_fault("Error loading agent data", &e);
            ctx.config = None;
            ctx.data = None;
        }
    }
}

/// Copy persona entries into the working data under lower-cased keys.
///
/// Fails when no config was loaded; that fault is not isolated.
pub fn load_persona_data(ctx: &mut RunContext) -> StageResult {
    let config = ctx
        .config
        .as_ref()
        .ok_or(AgentError::MissingState("agent configuration"))?;
    let Some(persona) = config.persona.as_ref().filter(|p| !p.is_empty()) else {
        return Ok(());
    };
    let data = ctx
        .data
        .as_mut()
        .ok_or(AgentError::MissingState("working data"))?;
    for (key, value) in persona {
        data.insert(key.to_lowercase(), value.clone());
    }
    Ok(())
}

/// Render every template in declaration order, dropping those that resolve to
/// nothing. Any fault discards the whole list.
pub fn generate_prompt(scope: &AgentScope<'_>, ctx: &mut RunContext) -> StageResult {
    ctx.rendered_prompts = match render_prompts(scope, ctx.data.as_ref()) {
        Ok(prompts) => Some(prompts),
        Err(e) => {
            scope.report_fault("Error generating prompt", &e);
            None
        }
    };
    Ok(())
}

fn render_prompts(
    scope: &AgentScope<'_>,
    data: Option<&Map<String, Value>>,
) -> Result<Vec<String>, AgentError> {
    let data = data.ok_or(AgentError::MissingState("working data"))?;
    let templates = data
        .get(PROMPT_TEMPLATES_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            AgentError::Render(format!("'{}' is missing or not a mapping", PROMPT_TEMPLATES_KEY))
        })?;

    let mut rendered = Vec::with_capacity(templates.len());
    for template in templates.values() {
        if let Some(prompt) = scope.renderer.render(template, data)? {
            if !prompt.is_empty() {
                rendered.push(prompt);
            }
        }
    }
    Ok(rendered)
}

/// Call the bound model and keep its trimmed text as `raw_result`.
///
/// Any fault clears `raw_result`.
pub fn run_model(scope: &AgentScope<'_>, ctx: &mut RunContext) -> StageResult {
    ctx.raw_result = match infer(scope, ctx) {
        Ok(text) => Some(text),
        Err(e) => {
            scope.report_fault("Error running language model", &e);
            None
        }
    };
    Ok(())
}

fn infer(scope: &AgentScope<'_>, ctx: &RunContext) -> Result<String, AgentError> {
    let config = ctx
        .config
        .as_ref()
        .ok_or(AgentError::MissingState("agent configuration"))?;
    let model = config
        .model
        .as_ref()
        .ok_or_else(|| AgentError::MissingModel(scope.name.to_string()))?;
    let prompts = ctx
        .rendered_prompts
        .as_deref()
        .ok_or(AgentError::MissingState("rendered prompts"))?;

    let mut parameters = config.parameters.clone();
    parameters.insert(
        AGENT_NAME_PARAM.to_string(),
        Value::String(scope.name.to_string()),
    );

    for prompt in prompts {
        if let Err(e) = scope.logger.log_prompt(prompt) {
            tracing::warn!(agent = scope.name, error = %e, "Failed to log prompt");
        }
    }
    let text = model.generate_text(prompts, &parameters)?;
    if let Err(e) = scope.logger.log_response(&text) {
        tracing::warn!(agent = scope.name, error = %e, "Failed to log model response");
    }
    Ok(text.trim().to_string())
}

/// Append the current `raw_result` (null when absent) to the `Results` channel
/// of the bound storage. Faults are logged and swallowed.
pub fn save_result(scope: &AgentScope<'_>, ctx: &mut RunContext) -> StageResult {
    if let Err(e) = persist(scope, ctx) {
        scope.report_fault("Error saving result", &e);
    }
    Ok(())
}

fn persist(scope: &AgentScope<'_>, ctx: &RunContext) -> Result<(), AgentError> {
    let storage = ctx
        .config
        .as_ref()
        .and_then(|config| config.storage.as_ref())
        .ok_or_else(|| AgentError::MissingStorage(scope.name.to_string()))?;
    let record = ctx.raw_result.clone().map_or(Value::Null, Value::String);
    storage.save_record(RESULTS_CHANNEL, &[record])
}

/// `output := raw_result`.
pub fn build_output(ctx: &mut RunContext) -> StageResult {
    ctx.output = ctx.raw_result.clone().map(Value::String);
    Ok(())
}
