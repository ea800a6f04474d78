//! Screening Capability Adapters.
//!
//! - `LlmScreeningCapabilities` - Profile extraction, question generation,
//!   follow-ups and evaluation over an `AIProvider`
//! - `ScriptedCapabilities` - Queued, deterministic results for tests

mod llm_capabilities;
mod scripted_capabilities;

pub use llm_capabilities::LlmScreeningCapabilities;
pub use scripted_capabilities::{CapabilityCall, ScriptedCapabilities, TranslationMode};
