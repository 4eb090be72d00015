use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SummaryResult {
    #[schema(example = "The report shows revenue grew 15% over the quarter.")]
    pub summary: String,
}

impl SummaryResult {
    /// Wraps raw model output, trimming surrounding whitespace.
    pub fn from_model_output(output: &str) -> Self {
        Self {
            summary: output.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Only PDF files are supported")]
    pub error: String,
}
