use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{ExtractedText, SummaryResult};
use crate::services::chat_model::{ChatModel, ChatRequest};
use crate::services::observer::SummaryObserver;
use crate::services::prompt::SummaryPrompt;

pub const MODEL_NAME: &str = "gpt-4o-mini";
pub const TEMPERATURE: f32 = 0.3;
pub const MAX_OUTPUT_TOKENS: u32 = 1024;
pub const MAX_RETRIES: u32 = 2;

/// Builds the summary prompt for a document and asks the model for a summary.
pub struct SummarizationClient {
    model: Arc<dyn ChatModel>,
    observer: Arc<dyn SummaryObserver>,
}

impl SummarizationClient {
    pub fn new(model: Arc<dyn ChatModel>, observer: Arc<dyn SummaryObserver>) -> Self {
        Self { model, observer }
    }

    pub fn build_request(prompt: &SummaryPrompt) -> ChatRequest {
        ChatRequest {
            model: MODEL_NAME.to_string(),
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
            messages: prompt.messages(),
        }
    }

    pub async fn summarize(&self, text: &ExtractedText) -> AppResult<SummaryResult> {
        let prompt = SummaryPrompt::render(text);
        let request = Self::build_request(&prompt);

        self.observer.on_prompt(&prompt);

        tracing::debug!(
            model = MODEL_NAME,
            input_chars = text.as_str().len(),
            "Requesting summary from model"
        );

        let raw = self.model.complete(&request).await.map_err(|e| {
            tracing::error!(error = %e, "Model call failed");
            AppError::upstream(e.message())
        })?;

        self.observer.on_response(&raw);

        Ok(SummaryResult::from_model_output(&raw))
    }
}
