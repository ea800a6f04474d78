//! Interview phases.
//!
//! A phase determines what kind of input the flow expects next. Phases only
//! move forward; `TechStackCollection` repeats while profile fields are
//! missing and `QuestionLoop` repeats while questions remain.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The current stage of a screening conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    /// Greeting shown; waiting for name, phone and email.
    #[default]
    GreetingAck,

    /// Waiting for experience, desired roles and location.
    ExperiencePrompt,

    /// Waiting for the tech stack; profile extraction happens here.
    TechStackCollection,

    /// Asking generated questions and evaluating answers.
    QuestionLoop,

    /// Interview finished, input disabled.
    Terminated,
}

impl StateMachine for InterviewPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use InterviewPhase::*;
        match self {
            GreetingAck => vec![ExperiencePrompt, Terminated],
            ExperiencePrompt => vec![TechStackCollection, Terminated],
            // Re-prompt keeps the phase until every profile field is present
            TechStackCollection => vec![TechStackCollection, QuestionLoop, Terminated],
            QuestionLoop => vec![QuestionLoop, Terminated],
            Terminated => vec![],
        }
    }
}
