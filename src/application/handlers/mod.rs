//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod interview;

pub use interview::{
    ChangeLanguageCommand, ChangeLanguageHandler, ChangeLanguageResult, GetTranscriptHandler,
    GetTranscriptQuery, InterviewError, StartInterviewCommand, StartInterviewHandler,
    StartInterviewResult, SubmitUtteranceCommand, SubmitUtteranceHandler, SubmitUtteranceResult,
    TranscriptView,
};
