use std::sync::Arc;

use crate::domain::{
    common::ImageConfig, firebase::ports::DocumentStore, food_analysis::pipeline::AnalysisGraph,
    llm::ports::LLMClient,
};

/// Shared service container, built once at startup and cloned into every
/// request handler. Nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct Service<LLM, DS>
where
    LLM: LLMClient,
    DS: DocumentStore,
{
    /// `None` when no model credential was resolved at startup.
    pub(crate) llm_client: Option<Arc<LLM>>,
    pub(crate) analysis_graph: AnalysisGraph<LLM>,
    pub(crate) document_store: Option<DS>,
    pub(crate) image_config: ImageConfig,
}

impl<LLM, DS> Service<LLM, DS>
where
    LLM: LLMClient,
    DS: DocumentStore,
{
    pub fn new(
        llm_client: Option<LLM>,
        document_store: Option<DS>,
        report_model: String,
        image_config: ImageConfig,
    ) -> Self {
        let llm_client = llm_client.map(Arc::new);
        let analysis_graph = AnalysisGraph::build(llm_client.clone(), report_model);

        Self {
            llm_client,
            analysis_graph,
            document_store,
            image_config,
        }
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm_client.is_some()
    }
}
