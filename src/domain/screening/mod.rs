//! Screening domain - the candidate interview conversation.
//!
//! # Module Organization
//!
//! - `phase` - Interview phases and their legal transitions
//! - `profile` - Structured candidate profile and field validation
//! - `evaluation` - Answer verdicts and follow-up eligibility
//! - `language` - Display languages and localized greetings
//! - `context` - Working-language transcript handed to the model
//! - `state` - Conversation state threaded through every turn
//! - `report` - Final candidate report
//! - `session` - Interview session with the candidate-facing transcript
//! - `templates` - Fixed interviewer messages, fallbacks and prompts
//! - `extractor` - Typed parsing of model output

pub mod context;
pub mod evaluation;
pub mod extractor;
pub mod language;
pub mod phase;
pub mod profile;
pub mod report;
pub mod session;
pub mod state;
pub mod templates;

pub use context::{render_context, ContextMessage, ContextRole};
pub use evaluation::{AnswerEvaluation, FollowUp, Verdict, EVALUATION_UNAVAILABLE};
pub use extractor::{ExtractionError, ResponseSanitizer, SanitizationError, StructuredOutputParser};
pub use language::{DisplayLanguage, WORKING_LANGUAGE};
pub use phase::InterviewPhase;
pub use profile::{CandidateProfile, ProfileField};
pub use report::CandidateReport;
pub use session::{InterviewSession, Speaker, TranscriptEntry};
pub use state::{ConversationState, InvariantViolation};
