use std::time::Duration;

use tracing::info;

use crate::services::prompt::SummaryPrompt;

/// Diagnostic hooks around a summarization request.
///
/// Implementations must not panic or block; they never influence the
/// result handed back to the caller.
pub trait SummaryObserver: Send + Sync {
    /// Called with the fully rendered prompt, right before the model call.
    fn on_prompt(&self, _prompt: &SummaryPrompt) {}

    /// Called with the raw model output, before trimming.
    fn on_response(&self, _raw: &str) {}

    /// Called once the whole pipeline has finished, successfully or not.
    fn on_complete(&self, _elapsed: Duration) {}
}

/// Writes prompts, responses and timings to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SummaryObserver for TracingObserver {
    fn on_prompt(&self, prompt: &SummaryPrompt) {
        info!(
            "\n=== Full Prompt ===\n--- System ---\n{}\n--- Human ---\n{}\n===================",
            prompt.system, prompt.human
        );
    }

    fn on_response(&self, raw: &str) {
        info!("\n=== AI Response ===\n{}\n===================", raw);
    }

    fn on_complete(&self, elapsed: Duration) {
        info!("Execution time: {:.2}s", elapsed.as_secs_f64());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SummaryObserver for NoopObserver {}
