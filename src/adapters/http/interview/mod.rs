//! HTTP adapter for interview endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChangeLanguageRequest, ErrorResponse, LanguageResponse, StartInterviewRequest,
    StartInterviewResponse, SubmitMessageRequest, TranscriptEntryResponse, TranscriptResponse,
    TurnResponse,
};
pub use handlers::InterviewHandlers;
pub use routes::interview_routes;
