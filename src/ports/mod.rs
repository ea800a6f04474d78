//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Model Ports
//!
//! - `AIProvider` - Black-box language model
//! - `ProfileExtractor`, `QuestionGenerator`, `FollowupGenerator`,
//!   `AnswerEvaluator` - Screening capabilities built on the model
//! - `Translator` - Display-language translation
//!
//! ## Session Ports
//!
//! - `SessionStore` - Interview sessions between turns
//! - `ReportSink` - Destination for finished candidate reports

mod ai_provider;
mod capabilities;
mod report_sink;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, RequestMetadata, TokenUsage,
};
pub use capabilities::{
    AnswerEvaluator, CapabilityError, FollowupGenerator, IdentityTranslator, ProfileExtractor,
    QuestionGenerator, Translator,
};
pub use report_sink::{ReportSink, ReportSinkError};
pub use session_store::{SessionHandle, SessionStore, SessionStoreError};
