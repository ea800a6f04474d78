//! FlowController - runs one interview turn.
//!
//! `step` takes the current [`ConversationState`] and one candidate utterance,
//! executes exactly one phase's logic and returns the new state with the
//! messages to show. Capability failures never escape: every call is bounded
//! by a timeout and replaced by a fixed fallback when it fails.
//!
//! Translation happens only at the edges. The utterance is translated into
//! the working language on the way in, outbound messages into the display
//! language on the way out; everything in between is working-language text.

use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::screening::{
    render_context, templates, AnswerEvaluation, CandidateProfile, CandidateReport,
    ConversationState, DisplayLanguage, InterviewPhase, WORKING_LANGUAGE,
};
use crate::ports::{
    AnswerEvaluator, CapabilityError, FollowupGenerator, IdentityTranslator, ProfileExtractor,
    QuestionGenerator, Translator,
};

pub const DEFAULT_TERMINATION_COMMAND: &str = "/bye";
pub const DEFAULT_CAPABILITY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowControllerConfig {
    /// Upper bound for any single capability call.
    pub capability_timeout: Duration,
    /// Ends the interview from any phase; matched case-insensitively.
    pub termination_command: String,
}

impl Default for FlowControllerConfig {
    fn default() -> Self {
        Self {
            capability_timeout: DEFAULT_CAPABILITY_TIMEOUT,
            termination_command: DEFAULT_TERMINATION_COMMAND.to_string(),
        }
    }
}

/// What a turn produced for the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Messages to append to the transcript, in display language.
    pub messages: Vec<String>,
    pub terminated: bool,
    /// False exactly when `terminated` is true.
    pub input_enabled: bool,
    /// Present on the turn that ends an interview with a profile on record.
    pub report: Option<CandidateReport>,
}

impl StepOutcome {
    fn continuing(messages: Vec<String>) -> Self {
        Self {
            messages,
            terminated: false,
            input_enabled: true,
            report: None,
        }
    }

    fn finished(messages: Vec<String>, report: Option<CandidateReport>) -> Self {
        Self {
            messages,
            terminated: true,
            input_enabled: false,
            report,
        }
    }
}

/// Drives the screening conversation over the capability ports.
pub struct FlowController {
    extractor: Arc<dyn ProfileExtractor>,
    question_generator: Arc<dyn QuestionGenerator>,
    followup_generator: Arc<dyn FollowupGenerator>,
    evaluator: Arc<dyn AnswerEvaluator>,
    translator: Arc<dyn Translator>,
    config: FlowControllerConfig,
}

impl FlowController {
    pub fn new(
        extractor: Arc<dyn ProfileExtractor>,
        question_generator: Arc<dyn QuestionGenerator>,
        followup_generator: Arc<dyn FollowupGenerator>,
        evaluator: Arc<dyn AnswerEvaluator>,
        config: FlowControllerConfig,
    ) -> Self {
        Self {
            extractor,
            question_generator,
            followup_generator,
            evaluator,
            translator: Arc::new(IdentityTranslator),
            config,
        }
    }

    /// Builds a controller from one value implementing every model capability.
    pub fn from_capabilities<C>(capabilities: Arc<C>, config: FlowControllerConfig) -> Self
    where
        C: ProfileExtractor + QuestionGenerator + FollowupGenerator + AnswerEvaluator + 'static,
    {
        Self::new(
            capabilities.clone(),
            capabilities.clone(),
            capabilities.clone(),
            capabilities,
            config,
        )
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn config(&self) -> &FlowControllerConfig {
        &self.config
    }

    /// True when `utterance` is the termination command.
    pub fn is_termination(&self, utterance: &str) -> bool {
        utterance.trim().to_lowercase() == self.config.termination_command.trim().to_lowercase()
    }

    /// Runs one turn.
    pub async fn step(
        &self,
        mut state: ConversationState,
        utterance: &str,
        language: DisplayLanguage,
    ) -> (ConversationState, StepOutcome) {
        if state.is_terminated() {
            return (state, StepOutcome::finished(Vec::new(), None));
        }

        if self.is_termination(utterance) {
            state.push_user(utterance.trim());
            state.push_assistant(templates::TERMINATION_MESSAGE);
            let report = state.report(true);
            tracing::info!(phase = ?state.phase(), "interview terminated by candidate");
            state.terminate();

            let messages = self
                .localize(vec![templates::TERMINATION_MESSAGE.to_string()], language)
                .await;
            return (state, StepOutcome::finished(messages, report));
        }

        let utterance = utterance.trim();
        if utterance.is_empty() {
            return (state, StepOutcome::continuing(Vec::new()));
        }

        let input = self.to_working_language(utterance, language).await;
        state.push_user(input.clone());

        let phase = state.phase();
        tracing::debug!(phase = ?phase, "processing utterance");

        let mut outbound = Vec::new();
        let mut report = None;
        match phase {
            InterviewPhase::GreetingAck => {
                state.append_profile_text(&input);
                say(&mut state, &mut outbound, templates::EXPERIENCE_PROMPT);
                state.advance_to(InterviewPhase::ExperiencePrompt);
            }
            InterviewPhase::ExperiencePrompt => {
                state.append_profile_text(&input);
                say(&mut state, &mut outbound, templates::TECH_STACK_PROMPT);
                state.advance_to(InterviewPhase::TechStackCollection);
            }
            InterviewPhase::TechStackCollection => {
                self.collect_tech_stack(&mut state, &input, &mut outbound)
                    .await;
            }
            InterviewPhase::QuestionLoop => {
                report = self.answer_question(&mut state, &input, &mut outbound).await;
            }
            InterviewPhase::Terminated => {}
        }

        let messages = self.localize(outbound, language).await;
        let outcome = if state.is_terminated() {
            StepOutcome::finished(messages, report)
        } else {
            StepOutcome::continuing(messages)
        };
        (state, outcome)
    }

    /// Phase 3: extract and validate the profile, then seed the question queue.
    ///
    /// The whole accumulated text is re-parsed on every attempt, so fields
    /// given earlier can drop out if a retry omits them.
    async fn collect_tech_stack(
        &self,
        state: &mut ConversationState,
        input: &str,
        outbound: &mut Vec<String>,
    ) {
        state.append_profile_text(input);

        let draft = self
            .bounded(
                "profile_extraction",
                self.extractor.extract_profile(state.raw_profile_text()),
            )
            .await
            .unwrap_or_else(CandidateProfile::unparsed)
            .without_blank_items();

        let missing = draft.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(missing = missing.len(), "profile incomplete, re-prompting");
            say(state, outbound, templates::missing_fields_message(&missing));
            return;
        }

        let tech_stack = draft.tech_stack_csv();
        state.commit_profile(draft);

        let questions = self
            .bounded(
                "question_generation",
                self.question_generator.generate_questions(&tech_stack),
            )
            .await
            .map(|qs| {
                qs.into_iter()
                    .filter(|q| !q.trim().is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|qs| !qs.is_empty())
            .unwrap_or_else(templates::fallback_questions);

        state.enqueue_questions(questions);
        state.advance_to(InterviewPhase::QuestionLoop);

        if let Some(question) = state.ask_next_question() {
            outbound.push(question);
        }
    }

    /// Phase 4: record and evaluate the answer, then ask the next question or close.
    async fn answer_question(
        &self,
        state: &mut ConversationState,
        answer: &str,
        outbound: &mut Vec<String>,
    ) -> Option<CandidateReport> {
        if let Some(question) = state.unanswered_question().map(str::to_owned) {
            state.record_answer(answer);
            let context = render_context(state.model_context());

            let evaluation = self
                .bounded(
                    "answer_evaluation",
                    self.evaluator.evaluate_answer(&context, &question, answer),
                )
                .await
                .unwrap_or_else(AnswerEvaluation::unavailable);
            state.record_evaluation(&evaluation);

            if evaluation.follow_up.is_requested() {
                let followup = self
                    .bounded(
                        "followup_generation",
                        self.followup_generator
                            .generate_followup(&question, answer, &context),
                    )
                    .await
                    .filter(|q| !q.trim().is_empty())
                    .unwrap_or_else(|| templates::FALLBACK_FOLLOWUP.to_string());
                state.prioritize_question(followup);
            }
        }

        if let Some(next) = state.ask_next_question() {
            outbound.push(next);
            return None;
        }

        say(state, outbound, templates::CLOSING_MESSAGE);
        state.terminate();
        tracing::info!(
            answered = state.answers().len(),
            "interview completed"
        );
        state.report(false)
    }

    /// Awaits a capability call within the configured timeout.
    ///
    /// Failures and timeouts are logged and collapse to `None`.
    async fn bounded<T, F>(&self, capability: &'static str, call: F) -> Option<T>
    where
        F: Future<Output = Result<T, CapabilityError>>,
    {
        let error = match tokio::time::timeout(self.config.capability_timeout, call).await {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(err)) => err,
            Err(_) => CapabilityError::Timeout(self.config.capability_timeout.as_secs()),
        };

        tracing::warn!(capability, error = %error, "capability failed, using fallback");
        None
    }

    async fn translate_or_keep(&self, text: &str, target: DisplayLanguage) -> String {
        self.bounded("translation", self.translator.translate(text, target))
            .await
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| text.to_string())
    }

    async fn to_working_language(&self, text: &str, from: DisplayLanguage) -> String {
        if from.is_working_language() {
            return text.to_string();
        }
        self.translate_or_keep(text, WORKING_LANGUAGE).await
    }

    async fn localize(&self, messages: Vec<String>, language: DisplayLanguage) -> Vec<String> {
        if language.is_working_language() || messages.is_empty() {
            return messages;
        }
        join_all(
            messages
                .iter()
                .map(|message| self.translate_or_keep(message, language)),
        )
        .await
    }
}

/// Adds an interviewer message to both the model context and the outbound list.
fn say(state: &mut ConversationState, outbound: &mut Vec<String>, message: impl Into<String>) {
    let message = message.into();
    state.push_assistant(message.clone());
    outbound.push(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::capabilities::{CapabilityCall, ScriptedCapabilities, TranslationMode};
    use crate::domain::screening::{ContextMessage, FollowUp, ProfileField, Verdict};
    use proptest::prelude::*;

    fn complete_profile() -> CandidateProfile {
        CandidateProfile {
            name: "Jane Doe".to_string(),
            phone: "555-1111".to_string(),
            email: "jane@x.com".to_string(),
            years_of_experience: "3".to_string(),
            desired_positions: vec!["Backend Engineer".to_string()],
            current_location: "Austin".to_string(),
            tech_stack: vec!["Python".to_string(), "SQL".to_string()],
        }
    }

    fn correct(follow_up: FollowUp) -> AnswerEvaluation {
        AnswerEvaluation::new(Verdict::Correct, "Accurate.", follow_up)
    }

    fn controller(caps: &ScriptedCapabilities) -> FlowController {
        FlowController::from_capabilities(Arc::new(caps.clone()), FlowControllerConfig::default())
            .with_translator(Arc::new(caps.clone()))
    }

    fn greeting_state() -> ConversationState {
        ConversationState::new(DisplayLanguage::English.greeting())
    }

    /// Runs the three intake turns; the scripted profile must already be queued.
    async fn into_question_loop(
        flow: &FlowController,
    ) -> (ConversationState, StepOutcome) {
        let en = DisplayLanguage::English;
        let (state, _) = flow.step(greeting_state(), "Jane Doe, 555-1111, jane@x.com", en).await;
        let (state, _) = flow.step(state, "3 years, Backend Engineer, Austin", en).await;
        flow.step(state, "Python, SQL", en).await
    }

    mod intake {
        use super::*;

        #[tokio::test]
        async fn greeting_ack_prompts_for_experience() {
            let caps = ScriptedCapabilities::new();
            let (state, outcome) = controller(&caps)
                .step(greeting_state(), "Jane Doe, 555-1111", DisplayLanguage::English)
                .await;

            assert_eq!(state.phase(), InterviewPhase::ExperiencePrompt);
            assert_eq!(outcome.messages, vec![templates::EXPERIENCE_PROMPT]);
            assert!(outcome.input_enabled);
            assert_eq!(state.raw_profile_text(), "Jane Doe, 555-1111\n");
            assert_eq!(
                state.model_context().last(),
                Some(&ContextMessage::assistant(templates::EXPERIENCE_PROMPT))
            );
        }

        #[tokio::test]
        async fn experience_prompts_for_tech_stack() {
            let caps = ScriptedCapabilities::new();
            let flow = controller(&caps);
            let (state, _) = flow.step(greeting_state(), "Jane", DisplayLanguage::English).await;
            let (state, outcome) = flow.step(state, "3 years", DisplayLanguage::English).await;

            assert_eq!(state.phase(), InterviewPhase::TechStackCollection);
            assert_eq!(outcome.messages, vec![templates::TECH_STACK_PROMPT]);
            assert_eq!(state.raw_profile_text(), "Jane\n3 years\n");
        }

        #[tokio::test]
        async fn blank_utterance_is_ignored() {
            let caps = ScriptedCapabilities::new();
            let before = greeting_state();
            let (state, outcome) = controller(&caps)
                .step(before.clone(), "   ", DisplayLanguage::English)
                .await;

            assert_eq!(state, before);
            assert!(outcome.messages.is_empty());
            assert!(outcome.input_enabled);
        }
    }

    mod profile_validation {
        use super::*;

        #[tokio::test]
        async fn missing_fields_keep_phase_three() {
            let caps = ScriptedCapabilities::new().with_profile(CandidateProfile {
                email: String::new(),
                tech_stack: vec![],
                ..complete_profile()
            });
            let (state, outcome) = into_question_loop(&controller(&caps)).await;

            assert_eq!(state.phase(), InterviewPhase::TechStackCollection);
            assert!(state.profile().is_none());
            assert_eq!(
                outcome.messages,
                vec![templates::missing_fields_message(&[
                    ProfileField::Email,
                    ProfileField::TechStack
                ])]
            );
        }

        #[tokio::test]
        async fn retry_reparses_accumulated_text() {
            let caps = ScriptedCapabilities::new()
                .with_profile(CandidateProfile {
                    phone: String::new(),
                    ..complete_profile()
                })
                .with_profile(complete_profile())
                .with_questions(["Q1"]);
            let flow = controller(&caps);

            let (state, _) = into_question_loop(&flow).await;
            let (state, outcome) = flow
                .step(state, "phone 555-1111", DisplayLanguage::English)
                .await;

            assert_eq!(state.phase(), InterviewPhase::QuestionLoop);
            assert_eq!(outcome.messages, vec!["Q1"]);

            let extractions: Vec<_> = caps
                .model_calls()
                .into_iter()
                .filter_map(|c| match c {
                    CapabilityCall::ExtractProfile { text } => Some(text),
                    _ => None,
                })
                .collect();
            assert_eq!(extractions.len(), 2);
            assert!(extractions[1].starts_with(&extractions[0]));
            assert!(extractions[1].ends_with("phone 555-1111\n"));
        }

        #[tokio::test]
        async fn complete_profile_is_idempotent_across_submissions() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_profile(complete_profile());
            let flow = controller(&caps);

            let mut state = greeting_state();
            state.advance_to(InterviewPhase::ExperiencePrompt);
            state.advance_to(InterviewPhase::TechStackCollection);

            let (first, _) = flow
                .step(state.clone(), "Python, SQL", DisplayLanguage::English)
                .await;
            let (second, _) = flow
                .step(state, "Python, SQL", DisplayLanguage::English)
                .await;

            assert_eq!(first.phase(), InterviewPhase::QuestionLoop);
            assert_eq!(second.phase(), InterviewPhase::QuestionLoop);
            assert_eq!(first.profile(), second.profile());
        }

        #[tokio::test]
        async fn success_asks_first_question_and_queues_rest() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_questions(["Q1", "Q2"]);
            let (state, outcome) = into_question_loop(&controller(&caps)).await;

            assert_eq!(state.phase(), InterviewPhase::QuestionLoop);
            assert_eq!(outcome.messages, vec!["Q1"]);
            assert_eq!(state.asked_questions(), &["Q1".to_string()]);
            assert_eq!(state.pending_questions().len(), 1);
            assert!(caps.model_calls().contains(&CapabilityCall::GenerateQuestions {
                tech_stack_csv: "Python,SQL".to_string()
            }));
        }
    }

    mod blank_items {
        use super::*;

        #[tokio::test]
        async fn blank_list_items_are_not_committed() {
            let caps = ScriptedCapabilities::new()
                .with_profile(CandidateProfile {
                    desired_positions: vec!["Backend Engineer".to_string(), " ".to_string()],
                    tech_stack: vec!["".to_string(), "Python".to_string()],
                    ..complete_profile()
                })
                .with_questions(["Q1"]);
            let (state, _) = into_question_loop(&controller(&caps)).await;

            let profile = state.profile().unwrap();
            assert_eq!(profile.desired_positions, vec!["Backend Engineer".to_string()]);
            assert_eq!(profile.tech_stack, vec!["Python".to_string()]);
            assert!(caps.model_calls().contains(&CapabilityCall::GenerateQuestions {
                tech_stack_csv: "Python".to_string()
            }));
        }

        #[tokio::test]
        async fn list_of_only_blanks_is_reprompted() {
            let caps = ScriptedCapabilities::new().with_profile(CandidateProfile {
                tech_stack: vec!["".to_string(), "  ".to_string()],
                ..complete_profile()
            });
            let (state, outcome) = into_question_loop(&controller(&caps)).await;

            assert_eq!(state.phase(), InterviewPhase::TechStackCollection);
            assert_eq!(
                outcome.messages,
                vec![templates::missing_fields_message(&[ProfileField::TechStack])]
            );
        }
    }

    mod question_loop {
        use super::*;

        #[tokio::test]
        async fn followup_jumps_ahead_of_queued_questions() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_questions(["Q0", "Qa", "Qb"])
                .with_evaluation(correct(FollowUp::Yes))
                .with_followup("Qf")
                .with_evaluation(correct(FollowUp::No))
                .with_evaluation(correct(FollowUp::No));
            let flow = controller(&caps);
            let en = DisplayLanguage::English;

            let (state, _) = into_question_loop(&flow).await;
            let (state, first) = flow.step(state, "answer 0", en).await;
            let (state, second) = flow.step(state, "answer f", en).await;
            let (state, third) = flow.step(state, "answer a", en).await;

            assert_eq!(first.messages, vec!["Qf"]);
            assert_eq!(second.messages, vec!["Qa"]);
            assert_eq!(third.messages, vec!["Qb"]);
            assert_eq!(state.asked_questions(), &["Q0", "Qf", "Qa", "Qb"]);
        }

        #[tokio::test]
        async fn answered_turns_keep_lists_aligned() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_questions(["Q1", "Q2"])
                .with_evaluation(AnswerEvaluation::new(
                    Verdict::False,
                    "Wrong.",
                    FollowUp::No,
                ));
            let flow = controller(&caps);

            let (state, _) = into_question_loop(&flow).await;
            let (state, outcome) = flow.step(state, "no idea", DisplayLanguage::English).await;

            assert!(!outcome.terminated);
            assert_eq!(state.answers(), &["no idea".to_string()]);
            assert_eq!(state.verdicts(), &[Verdict::False]);
            assert_eq!(state.reasonings(), &["Wrong.".to_string()]);
            assert_eq!(state.asked_questions().len(), 2);
            assert!(state.check_invariants().is_ok());
        }

        #[tokio::test]
        async fn last_answer_closes_with_report() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_questions(["Q1"])
                .with_evaluation(correct(FollowUp::No));
            let flow = controller(&caps);

            let (state, _) = into_question_loop(&flow).await;
            let (state, outcome) = flow
                .step(state, "indexes", DisplayLanguage::English)
                .await;

            assert_eq!(state.phase(), InterviewPhase::Terminated);
            assert_eq!(outcome.messages, vec![templates::CLOSING_MESSAGE]);
            assert!(outcome.terminated);
            assert!(!outcome.input_enabled);

            let report = outcome.report.unwrap();
            assert!(!report.ended_by_candidate);
            assert_eq!(report.questions, vec!["Q1"]);
            assert_eq!(report.answers, vec!["indexes"]);
            assert_eq!(report.verdicts, vec![Verdict::Correct]);
            assert_eq!(report.tech_stack, vec!["Python", "SQL"]);
        }

        #[tokio::test]
        async fn evaluation_sees_answer_in_context() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_questions(["Q1", "Q2"])
                .with_evaluation(correct(FollowUp::No));
            let flow = controller(&caps);

            let (state, _) = into_question_loop(&flow).await;
            let (state, _) = flow.step(state, "my answer", DisplayLanguage::English).await;

            let context = state.model_context();
            let answer_at = context
                .iter()
                .position(|m| *m == ContextMessage::user("my answer"))
                .unwrap();
            assert_eq!(context[answer_at - 1], ContextMessage::assistant("Q1"));
            assert_eq!(context[answer_at + 1], ContextMessage::assistant("Q2"));
        }
    }

    mod termination {
        use super::*;

        async fn terminate_in(phase_turns: usize) -> (ConversationState, StepOutcome) {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_questions(["Q1", "Q2"]);
            let flow = controller(&caps);
            let turns = ["Jane", "3 years", "Python"];

            let mut state = greeting_state();
            for turn in turns.iter().take(phase_turns) {
                state = flow.step(state, turn, DisplayLanguage::English).await.0;
            }
            flow.step(state, "  /BYE ", DisplayLanguage::English).await
        }

        #[tokio::test]
        async fn command_ends_interview_from_every_phase() {
            for turns in 0..=3 {
                let (state, outcome) = terminate_in(turns).await;

                assert!(state.is_terminated(), "not terminated after {} turns", turns);
                assert!(outcome.terminated);
                assert!(!outcome.input_enabled);
                assert_eq!(outcome.messages, vec![templates::TERMINATION_MESSAGE]);
                assert!(state.pending_questions().is_empty());
                assert!(state.check_invariants().is_ok());
            }
        }

        #[tokio::test]
        async fn report_only_when_profile_exists() {
            let (_, before_profile) = terminate_in(2).await;
            assert!(before_profile.report.is_none());

            let (_, in_loop) = terminate_in(3).await;
            let report = in_loop.report.unwrap();
            assert!(report.ended_by_candidate);
            assert_eq!(report.questions, vec!["Q1"]);
            assert!(report.answers.is_empty());
        }

        #[tokio::test]
        async fn command_is_never_translated() {
            let caps = ScriptedCapabilities::new().with_translation(TranslationMode::Tagged);
            let (state, outcome) = controller(&caps)
                .step(greeting_state(), "/bye", DisplayLanguage::Hindi)
                .await;

            assert_eq!(outcome.messages, vec!["[hi] Interview is terminated"]);
            assert_eq!(
                state.model_context()[1],
                ContextMessage::user("/bye")
            );
            assert_eq!(
                caps.calls(),
                vec![CapabilityCall::Translate {
                    text: templates::TERMINATION_MESSAGE.to_string(),
                    target: DisplayLanguage::Hindi,
                }]
            );
        }

        #[tokio::test]
        async fn custom_command_is_honoured() {
            let caps = ScriptedCapabilities::new();
            let flow = FlowController::from_capabilities(
                Arc::new(caps.clone()),
                FlowControllerConfig {
                    termination_command: "/quit".to_string(),
                    ..Default::default()
                },
            );

            assert!(flow.is_termination("/QUIT"));
            assert!(!flow.is_termination("/bye"));
        }

        #[tokio::test]
        async fn step_after_termination_is_a_no_op() {
            let (state, _) = terminate_in(1).await;
            let caps = ScriptedCapabilities::new();

            let (after, outcome) = controller(&caps)
                .step(state.clone(), "hello?", DisplayLanguage::English)
                .await;

            assert_eq!(after, state);
            assert!(outcome.messages.is_empty());
            assert!(outcome.terminated);
            assert!(caps.calls().is_empty());
        }
    }

    mod fallbacks {
        use super::*;

        #[tokio::test]
        async fn extraction_failure_reports_all_fields_missing() {
            let caps =
                ScriptedCapabilities::new().with_profile_error(CapabilityError::malformed("junk"));
            let (state, outcome) = into_question_loop(&controller(&caps)).await;

            assert_eq!(state.phase(), InterviewPhase::TechStackCollection);
            assert_eq!(
                outcome.messages,
                vec![templates::missing_fields_message(&ProfileField::ALL)]
            );
        }

        #[tokio::test]
        async fn generation_failure_uses_filler_questions() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_questions_error(CapabilityError::unavailable("down"));
            let (state, outcome) = into_question_loop(&controller(&caps)).await;

            assert_eq!(state.phase(), InterviewPhase::QuestionLoop);
            assert_eq!(outcome.messages, vec![templates::FALLBACK_QUESTIONS[0]]);
            assert_eq!(
                state.pending_questions().front().map(String::as_str),
                Some(templates::FALLBACK_QUESTIONS[1])
            );
        }

        #[tokio::test]
        async fn empty_generation_uses_filler_questions() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_questions(Vec::<String>::new());
            let (_, outcome) = into_question_loop(&controller(&caps)).await;

            assert_eq!(outcome.messages, vec![templates::FALLBACK_QUESTIONS[0]]);
        }

        #[tokio::test]
        async fn evaluation_failure_records_unavailable_verdict() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_questions(["Q1", "Q2"])
                .with_evaluation_error(CapabilityError::malformed("bad"));
            let flow = controller(&caps);

            let (state, _) = into_question_loop(&flow).await;
            let (state, outcome) = flow.step(state, "answer", DisplayLanguage::English).await;

            assert_eq!(outcome.messages, vec!["Q2"]);
            assert_eq!(state.verdicts(), &[Verdict::Correct]);
            assert_eq!(
                state.reasonings(),
                &[crate::domain::screening::EVALUATION_UNAVAILABLE.to_string()]
            );
        }

        #[tokio::test]
        async fn followup_failure_uses_fallback_followup() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_questions(["Q1"])
                .with_evaluation(correct(FollowUp::Yes))
                .with_followup_error(CapabilityError::unavailable("down"));
            let flow = controller(&caps);

            let (state, _) = into_question_loop(&flow).await;
            let (_, outcome) = flow.step(state, "answer", DisplayLanguage::English).await;

            assert_eq!(outcome.messages, vec![templates::FALLBACK_FOLLOWUP]);
            assert!(!outcome.terminated);
        }

        #[tokio::test(start_paused = true)]
        async fn slow_capability_times_out_into_fallback() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_delay(Duration::from_secs(60));
            let flow = FlowController::from_capabilities(
                Arc::new(caps.clone()),
                FlowControllerConfig {
                    capability_timeout: Duration::from_secs(1),
                    ..Default::default()
                },
            );

            let (state, outcome) = into_question_loop(&flow).await;

            assert_eq!(state.phase(), InterviewPhase::TechStackCollection);
            assert_eq!(
                outcome.messages,
                vec![templates::missing_fields_message(&ProfileField::ALL)]
            );
        }
    }

    mod translation {
        use super::*;

        #[tokio::test]
        async fn utterance_and_replies_cross_the_boundary() {
            let caps = ScriptedCapabilities::new().with_translation(TranslationMode::Tagged);
            let (state, outcome) = controller(&caps)
                .step(greeting_state(), "राहुल", DisplayLanguage::Hindi)
                .await;

            assert_eq!(state.model_context()[1], ContextMessage::user("[en] राहुल"));
            assert_eq!(state.raw_profile_text(), "[en] राहुल\n");
            assert_eq!(
                outcome.messages,
                vec![format!("[hi] {}", templates::EXPERIENCE_PROMPT)]
            );
            assert_eq!(
                state.model_context()[2],
                ContextMessage::assistant(templates::EXPERIENCE_PROMPT)
            );
        }

        #[tokio::test]
        async fn working_language_skips_translation() {
            let caps = ScriptedCapabilities::new().with_translation(TranslationMode::Tagged);
            controller(&caps)
                .step(greeting_state(), "Jane", DisplayLanguage::English)
                .await;

            assert!(caps.calls().is_empty());
        }

        #[tokio::test]
        async fn translation_failure_keeps_original_text() {
            let caps = ScriptedCapabilities::new().with_translation(TranslationMode::Failing);
            let (state, outcome) = controller(&caps)
                .step(greeting_state(), "Jean", DisplayLanguage::French)
                .await;

            assert_eq!(state.model_context()[1], ContextMessage::user("Jean"));
            assert_eq!(outcome.messages, vec![templates::EXPERIENCE_PROMPT]);
        }
    }

    mod end_to_end {
        use super::*;

        #[tokio::test]
        async fn scripted_interview_reaches_termination() {
            let caps = ScriptedCapabilities::new()
                .with_profile(complete_profile())
                .with_questions([
                    "How do indexes speed up SQL queries?",
                    "What is a Python generator?",
                ])
                .with_evaluation(correct(FollowUp::No));
            let flow = controller(&caps);
            let utterances = [
                "Jane Doe, 555-1111, jane@x.com",
                "3 years, Backend Engineer, Austin",
                "Python, SQL",
                "I use indexes to speed up queries",
                "/bye",
            ];
            let expected_phases = [
                InterviewPhase::ExperiencePrompt,
                InterviewPhase::TechStackCollection,
                InterviewPhase::QuestionLoop,
                InterviewPhase::QuestionLoop,
                InterviewPhase::Terminated,
            ];

            let mut state = greeting_state();
            let mut last = None;
            for (utterance, expected) in utterances.iter().zip(expected_phases) {
                let (next, outcome) = flow.step(state, utterance, DisplayLanguage::English).await;
                assert_eq!(next.phase(), expected);
                assert!(next.check_invariants().is_ok());
                state = next;
                last = Some(outcome);
            }

            let last = last.unwrap();
            assert!(!last.input_enabled);
            assert_eq!(
                state.profile().unwrap().tech_stack,
                vec!["Python".to_string(), "SQL".to_string()]
            );
            assert_eq!(state.answers().len(), 1);
            assert_eq!(state.verdicts().len(), 1);
            assert_eq!(
                state.answers()[0],
                "I use indexes to speed up queries"
            );
        }
    }

    mod properties {
        use super::*;

        #[derive(Debug, Clone)]
        enum Turn {
            Text(String),
            Blank,
            Terminate,
        }

        fn turn() -> impl Strategy<Value = Turn> {
            prop_oneof![
                6 => "[a-z]{1,12}".prop_map(Turn::Text),
                1 => Just(Turn::Blank),
                1 => Just(Turn::Terminate),
            ]
        }

        fn outcome_strategy() -> impl Strategy<Value = (bool, bool, bool)> {
            (any::<bool>(), any::<bool>(), any::<bool>())
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn phase_never_decreases_and_invariants_hold(
                turns in prop::collection::vec(turn(), 1..14),
                (complete, generation_ok, follow_up) in outcome_strategy(),
            ) {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
                    .unwrap();

                runtime.block_on(async {
                    let mut caps = ScriptedCapabilities::new();
                    for _ in 0..turns.len() {
                        caps = if complete {
                            caps.with_profile(complete_profile())
                        } else {
                            caps.with_profile(CandidateProfile::unparsed())
                        };
                        caps = if generation_ok {
                            caps.with_questions(["Q1", "Q2"])
                        } else {
                            caps.with_questions_error(CapabilityError::Timeout(1))
                        };
                        let follow = if follow_up { FollowUp::Yes } else { FollowUp::No };
                        caps = caps.with_evaluation(correct(follow)).with_followup("Qf");
                    }
                    let flow = controller(&caps);

                    let mut state = greeting_state();
                    for turn in &turns {
                        let utterance = match turn {
                            Turn::Text(text) => text.clone(),
                            Turn::Blank => "  ".to_string(),
                            Turn::Terminate => "/bye".to_string(),
                        };
                        let before = state.phase();
                        let (next, outcome) =
                            flow.step(state, &utterance, DisplayLanguage::English).await;

                        prop_assert!(next.phase() >= before);
                        prop_assert_eq!(outcome.input_enabled, !outcome.terminated);
                        prop_assert_eq!(outcome.terminated, next.is_terminated());
                        prop_assert!(next.check_invariants().is_ok());
                        if next.phase() == InterviewPhase::QuestionLoop && !outcome.terminated {
                            prop_assert_eq!(next.asked_questions().len(), next.answers().len() + 1);
                        }
                        state = next;
                    }
                    Ok(())
                })?;
            }
        }
    }
}
