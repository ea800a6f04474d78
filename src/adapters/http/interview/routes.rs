//! HTTP routes for interview endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    change_language, get_interview, start_interview, submit_message, InterviewHandlers,
};

/// Creates the interview router, to be nested under `/api/interviews`.
pub fn interview_routes(handlers: InterviewHandlers) -> Router {
    Router::new()
        .route("/", post(start_interview))
        .route("/:id", get(get_interview))
        .route("/:id/messages", post(submit_message))
        .route("/:id/language", put(change_language))
        .with_state(handlers)
}
