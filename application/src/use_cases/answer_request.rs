//! Answer Request use case
//!
//! Orchestrates the full request flow:
//!
//! ```text
//! Planning ──▶ Dispatching ──┬──▶ Aborted (any plan command failed)
//!                            └──▶ Drafting ──▶ Enriching ──▶ Finalizing
//! ```
//!
//! Plan dispatch is all-or-nothing: one failed command aborts the request
//! and the successful results are discarded. Enrichment searches are
//! fail-soft: failures are dropped and the answer is finalized with
//! whatever succeeded.

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::structured_output::{StructuredOutputParser, StructuredRequestError};
use concierge_domain::{
    AgentReply, ChatRequest, Command, DomainError, DraftAnalysis, EnrichmentItem, PARAM_QUERY,
    Phase, Plan, PromptTemplate, StructuredOutputError, ToolCommand, ToolOutput, ToolResult,
    draft_schema, parse_draft, parse_plan, plan_schema,
};
use futures::future::join_all;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request-level errors. Tool failures are not errors here; they surface
/// as [`AgentReply::Aborted`].
#[derive(Error, Debug)]
pub enum AnswerRequestError {
    #[error("Model request failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    StructuredOutput(#[from] StructuredOutputError),

    #[error(transparent)]
    InvalidPlan(DomainError),

    #[error(transparent)]
    InvalidDraft(DomainError),
}

impl From<StructuredRequestError> for AnswerRequestError {
    fn from(err: StructuredRequestError) -> Self {
        match err {
            StructuredRequestError::Gateway(e) => AnswerRequestError::Gateway(e),
            StructuredRequestError::Parse(e) => AnswerRequestError::StructuredOutput(e),
        }
    }
}

/// Input for the AnswerRequest use case
#[derive(Debug, Clone)]
pub struct AnswerRequestInput {
    /// The user's free-text request
    pub request: String,
}

impl AnswerRequestInput {
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
        }
    }
}

/// Use case for answering one user request
pub struct AnswerRequestUseCase<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> {
    gateway: Arc<G>,
    tools: Arc<T>,
    parser: StructuredOutputParser<G>,
    params: ExecutionParams,
}

impl<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> AnswerRequestUseCase<G, T> {
    pub fn new(gateway: Arc<G>, tools: Arc<T>) -> Self {
        Self::with_params(gateway, tools, ExecutionParams::default())
    }

    pub fn with_params(gateway: Arc<G>, tools: Arc<T>, params: ExecutionParams) -> Self {
        let parser = StructuredOutputParser::new(Arc::clone(&gateway))
            .with_temperature(params.structured_temperature);
        Self {
            gateway,
            tools,
            parser,
            params,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: AnswerRequestInput) -> Result<AgentReply, AnswerRequestError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: AnswerRequestInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<AgentReply, AnswerRequestError> {
        info!("Handling request: {}", input.request);

        let plan = self.phase_plan(&input.request, progress).await?;

        let results = self.phase_dispatch(&plan, progress).await;
        let errors: Vec<String> = results
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| r.error().unwrap_or("unknown tool error").to_string())
            .collect();
        if !errors.is_empty() {
            warn!("Aborting request, {} plan command(s) failed", errors.len());
            return Ok(AgentReply::Aborted { errors });
        }

        let outputs: Vec<ToolOutput> = results
            .into_iter()
            .map(|r| ToolOutput {
                command: r.command,
                data: r.data,
            })
            .collect();

        let draft = self.phase_draft(&input.request, &outputs, progress).await?;
        let enrichment = self.phase_enrich(&draft, progress).await;
        let text = self.phase_finalize(&draft, &enrichment, progress).await?;

        Ok(AgentReply::Answer {
            text,
            plan,
            enrichment_count: enrichment.len(),
        })
    }

    /// Phase 1: Ask the model which tools to run
    async fn phase_plan(
        &self,
        request: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<Plan, AnswerRequestError> {
        info!("Phase 1: Planning");
        progress.on_phase_start(&Phase::Planning, 1);

        let values = self
            .parser
            .request(&PromptTemplate::planning_prompt(request), &plan_schema())
            .await?;
        let plan = parse_plan(&values).map_err(AnswerRequestError::InvalidPlan)?;

        for command in &plan {
            debug!("Planned: {}", command);
        }
        progress.on_plan_ready(&plan);
        progress.on_phase_complete(&Phase::Planning);
        Ok(plan)
    }

    /// Phase 2: Run every plan command concurrently and wait for all of them
    async fn phase_dispatch(&self, plan: &Plan, progress: &dyn ProgressNotifier) -> Vec<ToolResult> {
        info!("Phase 2: Dispatching {} command(s)", plan.len());
        progress.on_phase_start(&Phase::Dispatching, plan.len());

        let results = join_all(plan.iter().map(|command| async move {
            let result = self.tools.execute(command).await;
            progress.on_tool_complete(&Phase::Dispatching, command, result.is_success());
            result
        }))
        .await;

        progress.on_phase_complete(&Phase::Dispatching);
        results
    }

    /// Phase 3: Draft an answer from the tool outputs
    async fn phase_draft(
        &self,
        request: &str,
        outputs: &[ToolOutput],
        progress: &dyn ProgressNotifier,
    ) -> Result<DraftAnalysis, AnswerRequestError> {
        info!("Phase 3: Drafting");
        progress.on_phase_start(&Phase::Drafting, 1);

        let values = self
            .parser
            .request(&PromptTemplate::draft_prompt(request, outputs), &draft_schema())
            .await?;
        let draft = parse_draft(&values).map_err(AnswerRequestError::InvalidDraft)?;

        debug!(
            "Draft has {} suggestion(s), {} follow-up search(es)",
            draft.suggestions.len(),
            draft.needs_search.len()
        );
        progress.on_phase_complete(&Phase::Drafting);
        Ok(draft)
    }

    /// Phase 4: Run follow-up searches; failures are dropped
    async fn phase_enrich(
        &self,
        draft: &DraftAnalysis,
        progress: &dyn ProgressNotifier,
    ) -> Vec<EnrichmentItem> {
        if draft.needs_search.is_empty() {
            debug!("Skipping enrichment phase");
            return Vec::new();
        }

        info!("Phase 4: Enriching with {} search(es)", draft.needs_search.len());
        progress.on_phase_start(&Phase::Enriching, draft.needs_search.len());

        let items = join_all(draft.needs_search.iter().map(|query| async move {
            let command = ToolCommand::from(Command::Search).with_param(PARAM_QUERY, query);
            let result = self.tools.execute(&command).await;
            progress.on_tool_complete(&Phase::Enriching, &command, result.is_success());

            match result.into_data() {
                Some(data) => Some(EnrichmentItem {
                    query: query.clone(),
                    data,
                }),
                None => {
                    debug!("Dropping failed follow-up search: {}", query);
                    None
                }
            }
        }))
        .await;

        progress.on_phase_complete(&Phase::Enriching);
        items.into_iter().flatten().collect()
    }

    /// Phase 5: Synthesize the final answer
    async fn phase_finalize(
        &self,
        draft: &DraftAnalysis,
        enrichment: &[EnrichmentItem],
        progress: &dyn ProgressNotifier,
    ) -> Result<String, AnswerRequestError> {
        info!("Phase 5: Finalizing");
        progress.on_phase_start(&Phase::Finalizing, 1);

        let request = ChatRequest::new(PromptTemplate::final_prompt(draft, enrichment))
            .with_system(PromptTemplate::final_system())
            .with_temperature(self.params.answer_temperature)
            .with_max_tokens(self.params.answer_max_tokens);
        let text = self.gateway.chat(&request).await?;

        progress.on_phase_complete(&Phase::Finalizing);
        Ok(text)
    }
}
