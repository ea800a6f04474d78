//! Interview command and query handlers.

mod change_language;
mod errors;
mod get_transcript;
mod start_interview;
mod submit_utterance;

pub use change_language::{ChangeLanguageCommand, ChangeLanguageHandler, ChangeLanguageResult};
pub use errors::InterviewError;
pub use get_transcript::{GetTranscriptHandler, GetTranscriptQuery, TranscriptView};
pub use start_interview::{StartInterviewCommand, StartInterviewHandler, StartInterviewResult};
pub use submit_utterance::{
    SubmitUtteranceCommand, SubmitUtteranceHandler, SubmitUtteranceResult,
};
