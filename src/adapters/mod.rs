//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the screening flow to external systems:
//! - `ai` - Language model clients (OpenAI-compatible, mock)
//! - `capabilities` - Screening capabilities over a model, and a scripted stand-in
//! - `translation` - Display-language translation
//! - `storage` - Session stores
//! - `reporting` - Candidate report sinks
//! - `http` - REST API

pub mod ai;
pub mod capabilities;
pub mod http;
pub mod reporting;
pub mod storage;
pub mod translation;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use capabilities::{LlmScreeningCapabilities, ScriptedCapabilities};
pub use reporting::{CollectingReportSink, TracingReportSink};
pub use storage::InMemorySessionStore;
pub use translation::GoogleTranslator;
