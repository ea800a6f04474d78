//! HTTP DTOs for interview endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{
    ChangeLanguageResult, StartInterviewResult, SubmitUtteranceResult, TranscriptView,
};
use crate::domain::screening::{InterviewPhase, Speaker};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start an interview. Language is a name or ISO code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartInterviewRequest {
    #[serde(default)]
    pub language: Option<String>,
}

/// One candidate utterance.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitMessageRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeLanguageRequest {
    pub language: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartInterviewResponse {
    pub session_id: String,
    pub messages: Vec<String>,
    pub input_enabled: bool,
}

impl From<StartInterviewResult> for StartInterviewResponse {
    fn from(result: StartInterviewResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            messages: result.messages,
            input_enabled: result.input_enabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub messages: Vec<String>,
    pub input_enabled: bool,
    pub phase: InterviewPhase,
}

impl From<SubmitUtteranceResult> for TurnResponse {
    fn from(result: SubmitUtteranceResult) -> Self {
        Self {
            messages: result.messages,
            input_enabled: result.input_enabled,
            phase: result.phase,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageResponse {
    pub messages: Vec<String>,
    pub input_enabled: bool,
}

impl From<ChangeLanguageResult> for LanguageResponse {
    fn from(result: ChangeLanguageResult) -> Self {
        Self {
            messages: result.messages,
            input_enabled: result.input_enabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntryResponse {
    pub speaker: Speaker,
    pub text: String,
    pub at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub phase: InterviewPhase,
    /// ISO 639-1 code.
    pub language: String,
    pub transcript: Vec<TranscriptEntryResponse>,
    pub input_enabled: bool,
}

impl From<TranscriptView> for TranscriptResponse {
    fn from(view: TranscriptView) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            phase: view.phase,
            language: view.language.code().to_string(),
            transcript: view
                .transcript
                .into_iter()
                .map(|entry| TranscriptEntryResponse {
                    speaker: entry.speaker,
                    text: entry.text,
                    at: entry.at.as_datetime().to_rfc3339(),
                })
                .collect(),
            input_enabled: view.input_enabled,
        }
    }
}

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}
