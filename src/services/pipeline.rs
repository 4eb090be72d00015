use std::sync::Arc;
use std::time::Instant;

use crate::error::AppResult;
use crate::models::{SummaryResult, UploadedDocument};
use crate::services::observer::SummaryObserver;
use crate::services::pdf_processor::PdfProcessor;
use crate::services::summarizer::SummarizationClient;

/// Upload to summary: extract the page text, then summarize it.
///
/// Holds no per-request state, so one instance serves every request.
pub struct SummaryPipeline {
    extractor: PdfProcessor,
    client: SummarizationClient,
    observer: Arc<dyn SummaryObserver>,
}

impl SummaryPipeline {
    pub fn new(
        extractor: PdfProcessor,
        client: SummarizationClient,
        observer: Arc<dyn SummaryObserver>,
    ) -> Self {
        Self {
            extractor,
            client,
            observer,
        }
    }

    pub async fn handle(&self, document: UploadedDocument) -> AppResult<SummaryResult> {
        let start = Instant::now();
        let result = self.run(document).await;
        self.observer.on_complete(start.elapsed());
        result
    }

    async fn run(&self, document: UploadedDocument) -> AppResult<SummaryResult> {
        let extractor = self.extractor;
        let content = document.content;

        // Parsing is CPU bound and the parser may panic on hostile input.
        let text = tokio::task::spawn_blocking(move || extractor.extract(&content)).await??;

        self.client.summarize(&text).await
    }
}
