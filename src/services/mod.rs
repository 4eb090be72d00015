pub mod chat_model;
pub mod observer;
pub mod pdf_processor;
pub mod pipeline;
pub mod prompt;
pub mod summarizer;

pub use chat_model::{
    ChatMessage, ChatModel, ChatRequest, ModelError, OpenAiChatModel, RetryingModel, Role,
};
pub use observer::{NoopObserver, SummaryObserver, TracingObserver};
pub use pdf_processor::PdfProcessor;
pub use pipeline::SummaryPipeline;
pub use prompt::{SummaryPrompt, HUMAN_MESSAGE};
pub use summarizer::SummarizationClient;
