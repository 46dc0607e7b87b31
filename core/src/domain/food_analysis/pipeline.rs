use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{AnalysisStage, AnalysisState, FoodReport, Improvement},
        prompt::{DISABLED_IMPROVEMENTS, DISABLED_REPORT, PARSE_FAILURE_SUGGESTION, combined_prompt},
    },
    llm::{ChatPrompt, LLMClient},
};

/// Runs an analysis state to completion.
pub trait AnalysisExecutor: Send + Sync {
    fn invoke(
        &self,
        state: AnalysisState,
    ) -> impl Future<Output = Result<AnalysisState, CoreError>> + Send;
}

/// `Init -> Analyze -> Combined -> Done`, with the model call on the
/// `Analyze -> Combined` edge.
#[derive(Debug, Clone)]
pub struct StagedExecutor<LLM> {
    llm_client: Arc<LLM>,
    report_model: String,
}

impl<LLM: LLMClient> StagedExecutor<LLM> {
    pub fn new(llm_client: Arc<LLM>, report_model: String) -> Self {
        Self {
            llm_client,
            report_model,
        }
    }

    async fn step(&self, state: AnalysisState) -> Result<AnalysisState, CoreError> {
        match state.stage {
            AnalysisStage::Init => Ok(AnalysisState {
                stage: AnalysisStage::Analyze,
                ..state
            }),
            AnalysisStage::Analyze => {
                let prompt = ChatPrompt::new(combined_prompt(&state.analysis))
                    .with_model(self.report_model.clone())
                    .with_temperature(0.0)
                    .json();

                let raw = self.llm_client.generate(prompt).await?;
                let report = parse_combined_output(&raw);

                Ok(AnalysisState {
                    stage: AnalysisStage::Combined,
                    ..state
                }
                .with_report(report))
            }
            AnalysisStage::Combined | AnalysisStage::Done => Ok(AnalysisState {
                stage: AnalysisStage::Done,
                ..state
            }),
        }
    }
}

impl<LLM: LLMClient> AnalysisExecutor for StagedExecutor<LLM> {
    async fn invoke(&self, mut state: AnalysisState) -> Result<AnalysisState, CoreError> {
        while !state.is_done() {
            let from = state.stage;
            state = self.step(state).await?;
            debug!(from = ?from, to = ?state.stage, "Analysis stage transition");
        }
        Ok(state)
    }
}

/// Stand-in used when the model is disabled: skips straight to a canned
/// combined step.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughExecutor;

impl AnalysisExecutor for PassthroughExecutor {
    async fn invoke(&self, state: AnalysisState) -> Result<AnalysisState, CoreError> {
        let report = FoodReport {
            report: DISABLED_REPORT.to_string(),
            improvements: DISABLED_IMPROVEMENTS
                .iter()
                .map(|s| Improvement::new(*s))
                .collect(),
        };

        Ok(AnalysisState {
            stage: AnalysisStage::Done,
            ..state
        }
        .with_report(report))
    }
}

/// Executor chosen once at startup from whether a model client exists.
#[derive(Debug, Clone)]
pub enum AnalysisGraph<LLM> {
    Staged(StagedExecutor<LLM>),
    Passthrough(PassthroughExecutor),
}

impl<LLM: LLMClient> AnalysisGraph<LLM> {
    pub fn build(llm_client: Option<Arc<LLM>>, report_model: String) -> Self {
        match llm_client {
            Some(llm_client) => Self::Staged(StagedExecutor::new(llm_client, report_model)),
            None => Self::Passthrough(PassthroughExecutor),
        }
    }
}

impl<LLM: LLMClient> AnalysisExecutor for AnalysisGraph<LLM> {
    async fn invoke(&self, state: AnalysisState) -> Result<AnalysisState, CoreError> {
        match self {
            Self::Staged(executor) => executor.invoke(state).await,
            Self::Passthrough(executor) => executor.invoke(state).await,
        }
    }
}

/// Non-JSON or mis-shaped output becomes a report holding the raw text.
pub fn parse_combined_output(raw: &str) -> FoodReport {
    serde_json::from_str::<FoodReport>(raw).unwrap_or_else(|e| {
        warn!("Failed to parse combined report output: {}", e);
        FoodReport {
            report: raw.to_string(),
            improvements: vec![Improvement::new(PARSE_FAILURE_SUGGESTION)],
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::test_support::llm_replying,
        llm::{LLMError, MockLLMClient, ResponseFormat},
    };

    #[tokio::test]
    async fn test_staged_executor_runs_every_stage() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate()
            .withf(|prompt| {
                prompt.model.as_deref() == Some("gpt-4o")
                    && prompt.temperature == Some(0.0)
                    && prompt.response_format == ResponseFormat::JsonObject
                    && prompt.image_data_url.is_none()
                    && prompt.instruction.contains(r#"{"food":"rice"}"#)
            })
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(r#"{"report":"밥이 절반 남았습니다.","improvements":[{"suggestion":"밥 양 줄이기"}]}"#.to_string())
                })
            });
        let graph = AnalysisGraph::build(Some(Arc::new(llm)), "gpt-4o".to_string());

        let state = graph
            .invoke(AnalysisState::new(r#"{"food":"rice"}"#))
            .await
            .unwrap();

        assert_eq!(state.stage, AnalysisStage::Done);
        assert_eq!(state.analysis, r#"{"food":"rice"}"#);
        assert_eq!(
            state.into_report(),
            FoodReport {
                report: "밥이 절반 남았습니다.".to_string(),
                improvements: vec![Improvement::new("밥 양 줄이기")],
            }
        );
    }

    #[tokio::test]
    async fn test_staged_executor_recovers_from_non_json() {
        let raw = "잔반이 많습니다. 개선이 필요합니다.";
        let llm = llm_replying(Ok(raw.to_string()));
        let graph = AnalysisGraph::build(Some(Arc::new(llm)), "gpt-4o".to_string());

        let report = graph
            .invoke(AnalysisState::new("{}"))
            .await
            .unwrap()
            .into_report();

        assert_eq!(report.report, raw);
        assert_eq!(
            report.improvements,
            vec![Improvement::new(PARSE_FAILURE_SUGGESTION)]
        );
    }

    #[tokio::test]
    async fn test_staged_executor_propagates_remote_errors() {
        let llm = llm_replying(Err(LLMError::RateLimited));
        let graph = AnalysisGraph::build(Some(Arc::new(llm)), "gpt-4o".to_string());

        let err = graph.invoke(AnalysisState::new("{}")).await.unwrap_err();
        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_passthrough_executor_skips_model() {
        let graph: AnalysisGraph<MockLLMClient> = AnalysisGraph::build(None, "gpt-4o".to_string());
        assert!(matches!(graph, AnalysisGraph::Passthrough(_)));

        let state = graph
            .invoke(AnalysisState::new("not even json"))
            .await
            .unwrap();

        assert!(state.is_done());
        let report = state.into_report();
        assert_eq!(report.report, DISABLED_REPORT);
        assert_eq!(report.improvements.len(), 2);
    }

    #[test]
    fn test_parse_combined_output_requires_both_fields() {
        let report = parse_combined_output(r#"{"report":"only a report"}"#);
        assert_eq!(report.report, r#"{"report":"only a report"}"#);
        assert_eq!(
            report.improvements,
            vec![Improvement::new(PARSE_FAILURE_SUGGESTION)]
        );
    }
}
