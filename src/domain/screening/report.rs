//! Final candidate report exported when an interview ends.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::evaluation::Verdict;
use super::profile::CandidateProfile;

/// Flat record of the profile and every question/answer pair.
///
/// `questions[i]`, `answers[i]`, `verdicts[i]` and `reasonings[i]` describe
/// the same exchange. When the candidate ends the interview mid-question the
/// last question has no answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub years_of_experience: String,
    pub desired_positions: Vec<String>,
    pub current_location: String,
    pub tech_stack: Vec<String>,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub verdicts: Vec<Verdict>,
    pub reasonings: Vec<String>,
    /// True when the candidate sent the termination command.
    pub ended_by_candidate: bool,
    pub generated_at: Timestamp,
}

impl CandidateReport {
    /// Number of answers judged correct.
    pub fn correct_count(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| **v == Verdict::Correct)
            .count()
    }

    pub(crate) fn from_parts(
        profile: &CandidateProfile,
        questions: &[String],
        answers: &[String],
        verdicts: &[Verdict],
        reasonings: &[String],
        ended_by_candidate: bool,
    ) -> Self {
        Self {
            name: profile.name.clone(),
            phone: profile.phone.clone(),
            email: profile.email.clone(),
            years_of_experience: profile.years_of_experience.clone(),
            desired_positions: profile.desired_positions.clone(),
            current_location: profile.current_location.clone(),
            tech_stack: profile.tech_stack.clone(),
            questions: questions.to_vec(),
            answers: answers.to_vec(),
            verdicts: verdicts.to_vec(),
            reasonings: reasonings.to_vec(),
            ended_by_candidate,
            generated_at: Timestamp::now(),
        }
    }
}
