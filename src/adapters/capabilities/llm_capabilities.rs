//! Screening capabilities backed by a language model.
//!
//! One adapter implements all four model-driven ports. Each call sends a
//! system prompt plus a single user prompt in JSON response mode, then runs
//! the reply through [`StructuredOutputParser`] into the contracted shape.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::screening::{
    templates, AnswerEvaluation, CandidateProfile, StructuredOutputParser,
};
use crate::ports::{
    AIProvider, AnswerEvaluator, CapabilityError, CompletionRequest, FollowupGenerator,
    MessageRole, ProfileExtractor, QuestionGenerator, RequestMetadata,
};

const MAX_COMPLETION_TOKENS: u32 = 1024;

#[derive(Debug, Deserialize)]
struct GeneratedQuestions {
    questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GeneratedFollowup {
    question: String,
}

/// Language-model implementation of the screening capability ports.
pub struct LlmScreeningCapabilities {
    ai_provider: Arc<dyn AIProvider>,
    parser: StructuredOutputParser,
}

impl LlmScreeningCapabilities {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            parser: StructuredOutputParser::new(),
        }
    }

    /// Sends one structured request and parses the reply into `T`.
    async fn ask<T: DeserializeOwned>(
        &self,
        operation: &str,
        system_prompt: impl Into<String>,
        prompt: String,
    ) -> Result<T, CapabilityError> {
        let request = CompletionRequest::new(RequestMetadata::new(operation))
            .with_system_prompt(system_prompt)
            .with_message(MessageRole::User, prompt)
            .with_max_tokens(MAX_COMPLETION_TOKENS)
            .with_json_response();

        let response = self.ai_provider.complete(request).await?;

        self.parser
            .parse(&response.content)
            .map_err(|e| CapabilityError::malformed(format!("{}: {}", operation, e)))
    }
}

#[async_trait]
impl ProfileExtractor for LlmScreeningCapabilities {
    async fn extract_profile(&self, text: &str) -> Result<CandidateProfile, CapabilityError> {
        self.ask(
            "profile_extraction",
            templates::profile_extraction_system_prompt(),
            templates::profile_extraction_prompt(text),
        )
        .await
    }
}

#[async_trait]
impl QuestionGenerator for LlmScreeningCapabilities {
    async fn generate_questions(
        &self,
        tech_stack_csv: &str,
    ) -> Result<Vec<String>, CapabilityError> {
        let generated: GeneratedQuestions = self
            .ask(
                "question_generation",
                templates::QUESTION_GENERATION_SYSTEM,
                templates::question_generation_prompt(tech_stack_csv),
            )
            .await?;

        let questions: Vec<String> = generated
            .questions
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();

        if questions.is_empty() {
            return Err(CapabilityError::malformed("question_generation: no questions"));
        }
        Ok(questions)
    }
}

#[async_trait]
impl FollowupGenerator for LlmScreeningCapabilities {
    async fn generate_followup(
        &self,
        question: &str,
        answer: &str,
        context: &str,
    ) -> Result<String, CapabilityError> {
        let generated: GeneratedFollowup = self
            .ask(
                "followup_generation",
                templates::FOLLOWUP_SYSTEM,
                templates::followup_prompt(context, question, answer),
            )
            .await?;

        let question = generated.question.trim();
        if question.is_empty() {
            return Err(CapabilityError::malformed("followup_generation: blank question"));
        }
        Ok(question.to_string())
    }
}

#[async_trait]
impl AnswerEvaluator for LlmScreeningCapabilities {
    async fn evaluate_answer(
        &self,
        context: &str,
        question: &str,
        answer: &str,
    ) -> Result<AnswerEvaluation, CapabilityError> {
        let mut evaluation: AnswerEvaluation = self
            .ask(
                "answer_evaluation",
                templates::EVALUATION_SYSTEM,
                templates::evaluation_prompt(context, question, answer),
            )
            .await?;

        evaluation.reasoning = evaluation.reasoning.trim().to_string();
        Ok(evaluation)
    }
}
