//! Shared application state handed to the HTTP handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    summarizer::MAX_RETRIES, OpenAiChatModel, PdfProcessor, RetryingModel, SummarizationClient,
    SummaryObserver, SummaryPipeline, TracingObserver,
};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pipeline: SummaryPipeline,
    max_file_size_mb: usize,
}

impl AppState {
    pub fn new(pipeline: SummaryPipeline, max_file_size_mb: usize) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pipeline,
                max_file_size_mb,
            }),
        }
    }

    /// Wires the production pipeline: OpenAI behind the retry wrapper, with
    /// diagnostics going to tracing.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let model = OpenAiChatModel::new(&config.openai_api_key, &config.openai_base_url)?;
        let model = Arc::new(RetryingModel::new(model, MAX_RETRIES));
        let observer: Arc<dyn SummaryObserver> = Arc::new(TracingObserver);

        let client = SummarizationClient::new(model, Arc::clone(&observer));
        let pipeline = SummaryPipeline::new(PdfProcessor::new(), client, observer);

        tracing::info!(
            "Summary pipeline initialized (provider: {}, retries: {})",
            config.openai_base_url,
            MAX_RETRIES
        );

        Ok(Self::new(pipeline, config.max_file_size_mb))
    }

    pub fn pipeline(&self) -> &SummaryPipeline {
        &self.inner.pipeline
    }

    pub fn max_file_size_mb(&self) -> usize {
        self.inner.max_file_size_mb
    }
}
