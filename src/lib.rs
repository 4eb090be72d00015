//! PDF Summarizer Service
//!
//! Accepts a single-page PDF upload, extracts its text and returns a
//! summary generated by a hosted language model.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::create_router;
pub use state::AppState;
