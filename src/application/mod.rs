//! Application layer - Flow control, Commands, Queries, and Handlers.
//!
//! The flow controller runs single turns of the screening conversation; the
//! handlers load sessions, serialize turns per session and persist results.

mod flow_controller;
pub mod handlers;

pub use flow_controller::{
    FlowController, FlowControllerConfig, StepOutcome, DEFAULT_CAPABILITY_TIMEOUT,
    DEFAULT_TERMINATION_COMMAND,
};
pub use handlers::{
    ChangeLanguageCommand, ChangeLanguageHandler, ChangeLanguageResult, GetTranscriptHandler,
    GetTranscriptQuery, InterviewError, StartInterviewCommand, StartInterviewHandler,
    StartInterviewResult, SubmitUtteranceCommand, SubmitUtteranceHandler, SubmitUtteranceResult,
    TranscriptView,
};
