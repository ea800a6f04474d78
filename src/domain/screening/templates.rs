//! Fixed interviewer messages and model prompts.
//!
//! All text here is in the working language. Display-language copies are
//! produced by the translation capability at the flow boundary.

use super::profile::{join_fields, ProfileField};

// ============================================================================
// Interviewer Messages
// ============================================================================

/// Sent after contact details, asks for the experience block.
pub const EXPERIENCE_PROMPT: &str =
    "Great! How many years of experience do you have? and your desired roles? and your current location";

/// Sent after the experience block, asks for the tech stack.
pub const TECH_STACK_PROMPT: &str = "Great! Now, please describe your tech stack.";

/// Sent when the candidate ends the interview with the termination command.
pub const TERMINATION_MESSAGE: &str = "Interview is terminated";

/// Sent after the last question has been answered.
pub const CLOSING_MESSAGE: &str =
    "Thank you for your time. We will contact you through E-mail for further process.";

/// Asks the candidate to resupply the listed profile fields.
pub fn missing_fields_message(missing: &[ProfileField]) -> String {
    format!(
        "Seems like some content are missing, please enter these again: {}",
        join_fields(missing)
    )
}

// ============================================================================
// Fallbacks
// ============================================================================

/// Questions used when question generation fails.
pub const FALLBACK_QUESTIONS: [&str; 2] = [
    "Can you explain the four main principles of Object-Oriented Programming and how they are implemented in Python?",
    "Can you explain a technical project you have worked on and the challenges you faced while working on it?",
];

/// Follow-up used when follow-up generation fails.
pub const FALLBACK_FOLLOWUP: &str =
    "Can you tell me about a situation where you faced a challenge and how you handled it?";

pub fn fallback_questions() -> Vec<String> {
    FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

// ============================================================================
// Model Prompts
// ============================================================================

/// System prompt for profile extraction, listing every field with its instruction.
pub fn profile_extraction_system_prompt() -> String {
    let schema = ProfileField::ALL
        .iter()
        .map(|field| {
            let kind = if field.is_list() { "array of strings" } else { "string" };
            format!("- \"{}\" ({}): {}", field.key(), kind, field.extraction_instruction())
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You convert a job candidate's free-text self description into JSON.\n\
         Respond with a single JSON object containing exactly these keys:\n{}\n\n\
         Every key must be present. Use \"\" for a missing string and [] for a missing list. \
         Never use null.",
        schema
    )
}

/// User prompt for profile extraction.
pub fn profile_extraction_prompt(raw_text: &str) -> String {
    format!(
        "Convert this text into JSON, if any field is missing keep blank str or array []:\n{}",
        raw_text
    )
}

/// System prompt for question generation.
pub const QUESTION_GENERATION_SYSTEM: &str = "You are a question generator based on candidate tech stack, that generates 1-2 question. Only generate question based on tech stack. Respond with a JSON object of the form {\"questions\": [\"...\"]}.";

/// User prompt for question generation.
pub fn question_generation_prompt(tech_stack_csv: &str) -> String {
    format!("This is the candidate tech stack:{}", tech_stack_csv)
}

/// System prompt for follow-up generation.
pub const FOLLOWUP_SYSTEM: &str = "You are a technical interviewer. Generate exactly one follow up question. Respond with a JSON object of the form {\"question\": \"...\"}.";

/// User prompt for follow-up generation.
pub fn followup_prompt(context: &str, question: &str, answer: &str) -> String {
    format!(
        "This is the context so far:{}\n\nGenerate 1 follow up question on this data: Question: {} \n Answer: {}.\n\n Output should be in JSON format.",
        context, question, answer
    )
}

/// System prompt for answer evaluation.
pub const EVALUATION_SYSTEM: &str = r#"You evaluate a candidate's answer to a technical interview question.
Respond with a single JSON object with exactly these keys:
- "verdict": "Correct" if the answer is correct or even partially correct, "False" if it is entirely wrong or the candidate doesn't know the answer.
- "reasoning": short reasoning for the chosen verdict, 10-15 words maximum.
- "follow_up": "Yes" if a follow-up question can be asked, "No" if the candidate says they don't know the answer or similar."#;

/// User prompt for answer evaluation.
pub fn evaluation_prompt(context: &str, question: &str, answer: &str) -> String {
    format!(
        "This is the context so far:{}\n\nQuestion: {}\n\nAnswer: {}",
        context, question, answer
    )
}
