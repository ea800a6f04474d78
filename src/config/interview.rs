//! Interview flow configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::storage::DEFAULT_ARCHIVE_CAPACITY;
use crate::adapters::translation::DEFAULT_TRANSLATE_BASE_URL;
use crate::application::{FlowControllerConfig, DEFAULT_TERMINATION_COMMAND};

use super::error::ValidationError;

/// Interview flow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InterviewConfig {
    /// Upper bound for a single model or translation call, in seconds
    #[serde(default = "default_capability_timeout")]
    pub capability_timeout_secs: u64,

    /// Utterance that ends the interview from any phase
    #[serde(default = "default_termination_command")]
    pub termination_command: String,

    /// When false, every display language is served untranslated
    #[serde(default = "default_translation_enabled")]
    pub translation_enabled: bool,

    #[serde(default = "default_translate_base_url")]
    pub translate_base_url: String,

    /// Finished interviews kept readable before the oldest is evicted
    #[serde(default = "default_archive_capacity")]
    pub archive_capacity: usize,
}

impl InterviewConfig {
    pub fn capability_timeout(&self) -> Duration {
        Duration::from_secs(self.capability_timeout_secs)
    }

    /// Settings for the flow controller.
    pub fn flow_config(&self) -> FlowControllerConfig {
        FlowControllerConfig {
            capability_timeout: self.capability_timeout(),
            termination_command: self.termination_command.trim().to_string(),
        }
    }

    /// Validate interview configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.capability_timeout_secs == 0 || self.capability_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.termination_command.trim().is_empty() {
            return Err(ValidationError::BlankTerminationCommand);
        }
        if self.translation_enabled
            && !self.translate_base_url.starts_with("http://")
            && !self.translate_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidUrl("interview.translate_base_url"));
        }
        Ok(())
    }
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            capability_timeout_secs: default_capability_timeout(),
            termination_command: default_termination_command(),
            translation_enabled: default_translation_enabled(),
            translate_base_url: default_translate_base_url(),
            archive_capacity: default_archive_capacity(),
        }
    }
}

fn default_capability_timeout() -> u64 {
    30
}

fn default_termination_command() -> String {
    DEFAULT_TERMINATION_COMMAND.to_string()
}

fn default_translation_enabled() -> bool {
    true
}

fn default_translate_base_url() -> String {
    DEFAULT_TRANSLATE_BASE_URL.to_string()
}

fn default_archive_capacity() -> usize {
    DEFAULT_ARCHIVE_CAPACITY
}
