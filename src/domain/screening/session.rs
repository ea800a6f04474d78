//! Interview session - conversation state plus the candidate-facing transcript.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

use super::language::{DisplayLanguage, WORKING_LANGUAGE};
use super::phase::InterviewPhase;
use super::state::ConversationState;

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Candidate,
    Interviewer,
}

/// One line of the UI transcript, in the candidate's display language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: Timestamp,
}

impl TranscriptEntry {
    pub fn candidate(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Candidate,
            text: text.into(),
            at: Timestamp::now(),
        }
    }

    pub fn interviewer(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Interviewer,
            text: text.into(),
            at: Timestamp::now(),
        }
    }
}

/// A single candidate's interview.
///
/// The transcript is what the candidate sees; the model only ever sees the
/// working-language context inside `state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    id: SessionId,
    state: ConversationState,
    language: DisplayLanguage,
    transcript: Vec<TranscriptEntry>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl InterviewSession {
    /// Starts a session: localized greeting in the transcript, working-language
    /// greeting in the model context.
    pub fn start(language: DisplayLanguage) -> Self {
        let now = Timestamp::now();
        Self {
            id: SessionId::new(),
            state: ConversationState::new(WORKING_LANGUAGE.greeting()),
            language,
            transcript: vec![TranscriptEntry::interviewer(language.greeting())],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn language(&self) -> DisplayLanguage {
        self.language
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn phase(&self) -> InterviewPhase {
        self.state.phase()
    }

    pub fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    /// Stores the state produced by a turn along with its transcript lines.
    pub fn record_turn(
        &mut self,
        state: ConversationState,
        utterance: impl Into<String>,
        replies: &[String],
    ) {
        self.state = state;
        self.transcript.push(TranscriptEntry::candidate(utterance));
        self.transcript
            .extend(replies.iter().map(TranscriptEntry::interviewer));
        self.updated_at = Timestamp::now();
    }

    /// Switches display language. The transcript restarts from the localized
    /// greeting; the conversation state is untouched.
    pub fn change_language(&mut self, language: DisplayLanguage) {
        self.language = language;
        self.transcript = vec![TranscriptEntry::interviewer(language.greeting())];
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::screening::context::ContextMessage;

    #[test]
    fn start_seeds_both_transcripts() {
        let session = InterviewSession::start(DisplayLanguage::French);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(
            session.transcript()[0].text,
            DisplayLanguage::French.greeting()
        );
        assert_eq!(
            session.state().model_context(),
            &[ContextMessage::assistant(DisplayLanguage::English.greeting())]
        );
        assert_eq!(session.phase(), InterviewPhase::GreetingAck);
    }

    #[test]
    fn record_turn_appends_candidate_then_replies() {
        let mut session = InterviewSession::start(DisplayLanguage::English);
        let state = session.state().clone();
        session.record_turn(state, "Jane", &["Next?".to_string()]);

        let speakers: Vec<_> = session.transcript().iter().map(|e| e.speaker).collect();
        assert_eq!(
            speakers,
            vec![Speaker::Interviewer, Speaker::Candidate, Speaker::Interviewer]
        );
        assert!(session.updated_at() >= session.created_at());
    }

    #[test]
    fn change_language_keeps_conversation_state() {
        let mut session = InterviewSession::start(DisplayLanguage::English);
        let mut state = session.state().clone();
        state.advance_to(InterviewPhase::ExperiencePrompt);
        session.record_turn(state, "Jane", &["Next?".to_string()]);

        session.change_language(DisplayLanguage::Hindi);

        assert_eq!(session.language(), DisplayLanguage::Hindi);
        assert_eq!(session.phase(), InterviewPhase::ExperiencePrompt);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].text, DisplayLanguage::Hindi.greeting());
    }
}
