pub mod health;
pub mod summarize;

pub use health::*;
pub use summarize::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::logging_middleware;
use crate::models::{ErrorBody, HealthResponse, SummarizeUpload, SummaryResult};
use crate::state::AppState;

pub const SWAGGER_PATH: &str = "/swagger";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PDF Summarizer API",
        description = "API for summarizing PDF documents using OpenAI",
        version = "1.0.0"
    ),
    paths(summarize::summarize_handler, health::health_handler),
    components(schemas(SummaryResult, HealthResponse, ErrorBody, SummarizeUpload))
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_file_size_mb() * 1024 * 1024;

    Router::new()
        .route("/health", get(health_handler))
        .route("/summarize", post(summarize_handler))
        .merge(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(logging_middleware))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
