//! Grading of free-text student answers against reference answers.
//!
//! The grading prompt is deliberately constrained: the model is asked for
//! one "Score:" line and one "Feedback:" line, and extraction is a simple
//! line scan. Robustness comes from the deterministic fallback, not from
//! stricter parsing — a malformed response degrades one answer to score
//! 0.0 instead of aborting the batch.

use crate::providers::{GenerateOptions, TextModel};
use crate::quiz::QuestionAnswer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{instrument, warn};

/// Feedback substituted when a grading response cannot be parsed.
pub const FALLBACK_FEEDBACK: &str = "Could not parse grading response.";

/// Feedback substituted when the student submitted no answer.
pub const NO_ANSWER_FEEDBACK: &str = "No answer submitted.";

/// A numeric score in `[0, 1]` with short feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Score in `[0, 1]`.
    pub score: f64,
    /// Short, clear feedback.
    pub feedback: String,
}

impl Grade {
    /// The deterministic zero-score substitution for unparsable responses.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            score: 0.0,
            feedback: FALLBACK_FEEDBACK.to_string(),
        }
    }
}

/// A quiz item with the student's answer and its grade. One row per graded
/// question; persisted append-only by [`crate::history::ResultStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedAnswer {
    /// The question text.
    pub question: String,
    /// The reference answer.
    pub answer: String,
    /// Topic label inherited from the generated pair.
    pub topic: String,
    /// The student's free-text answer.
    pub student: String,
    /// Score in `[0, 1]`.
    pub score: f64,
    /// Grader feedback.
    pub feedback: String,
}

impl GradedAnswer {
    /// Combine a generated pair with a student answer and its grade.
    #[must_use]
    pub fn from_pair(pair: &QuestionAnswer, student: impl Into<String>, grade: Grade) -> Self {
        Self {
            question: pair.question.clone(),
            answer: pair.answer.clone(),
            topic: pair.topic.clone(),
            student: student.into(),
            score: grade.score,
            feedback: grade.feedback,
        }
    }

    /// The default grade for a question with no submitted answer. No model
    /// call is made.
    #[must_use]
    pub fn unanswered(pair: &QuestionAnswer) -> Self {
        Self {
            question: pair.question.clone(),
            answer: pair.answer.clone(),
            topic: pair.topic.clone(),
            student: String::new(),
            score: 0.0,
            feedback: NO_ANSWER_FEEDBACK.to_string(),
        }
    }
}

/// Build the fixed grading prompt.
#[must_use]
pub fn build_grading_prompt(reference: &str, student: &str, question: Option<&str>) -> String {
    format!(
        "You are a strict teacher. Evaluate the student's answer to the following question:\n\
         \n\
         Q: {}\n\
         Correct Answer: {}\n\
         Student Answer: {}\n\
         \n\
         Score (0.0 to 1.0): _____\n\
         Feedback (short, clear): _____",
        question.unwrap_or("").trim(),
        reference.trim(),
        student.trim()
    )
}

/// Scan a grading response for score and feedback lines.
///
/// The score is the numeric value after the *last* colon on the first line
/// containing "Score"; the feedback is the text after the *first* colon on
/// the first line containing "Feedback". Returns `None` when either line is
/// absent, the number does not parse, or the score is outside `[0, 1]`.
#[must_use]
pub fn parse_grade(text: &str) -> Option<Grade> {
    let score_line = text.lines().find(|line| line.contains("Score"))?;
    let feedback_line = text.lines().find(|line| line.contains("Feedback"))?;

    let score: f64 = score_line.rsplit(':').next()?.trim().parse().ok()?;
    if !(0.0..=1.0).contains(&score) {
        return None;
    }

    let feedback = feedback_line.split_once(':')?.1.trim().to_string();
    Some(Grade { score, feedback })
}

/// Grades student answers through a [`TextModel`].
#[derive(Clone)]
pub struct Grader {
    model: Arc<dyn TextModel>,
}

impl std::fmt::Debug for Grader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grader")
            .field("model", &self.model.model_id())
            .finish_non_exhaustive()
    }
}

impl Grader {
    /// Create a grader over the given model.
    #[must_use]
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Grade a student answer against the reference answer.
    ///
    /// Never fails: transport errors and unparsable responses degrade to
    /// [`Grade::fallback`] with a warning, so one bad response cannot abort
    /// a batch.
    #[instrument(skip(self, reference, student, question))]
    pub async fn grade(&self, reference: &str, student: &str, question: Option<&str>) -> Grade {
        let prompt = build_grading_prompt(reference, student, question);

        match self.model.generate(&prompt, GenerateOptions::default()).await {
            Ok(text) => parse_grade(&text).unwrap_or_else(|| {
                warn!(response_len = text.len(), "unparsable grading response, applying fallback");
                Grade::fallback()
            }),
            Err(err) => {
                warn!(error = %err, "grading call failed, applying fallback");
                Grade::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grade_happy_path() {
        let response = "Score: 0.8\nFeedback: Mostly correct, missing one detail.";
        let grade = parse_grade(response).expect("grade");
        assert!((grade.score - 0.8).abs() < 1e-12);
        assert_eq!(grade.feedback, "Mostly correct, missing one detail.");
    }

    #[test]
    fn test_parse_grade_uses_last_colon_on_score_line() {
        let response = "Score (0.0 to 1.0): 0.65\nFeedback (short, clear): Good effort.";
        let grade = parse_grade(response).expect("grade");
        assert!((grade.score - 0.65).abs() < 1e-12);
        assert_eq!(grade.feedback, "Good effort.");
    }

    #[test]
    fn test_parse_grade_feedback_keeps_later_colons() {
        let response = "Score: 1.0\nFeedback: Perfect: exactly right.";
        let grade = parse_grade(response).expect("grade");
        assert_eq!(grade.feedback, "Perfect: exactly right.");
    }

    #[test]
    fn test_parse_grade_missing_score_line() {
        assert_eq!(parse_grade("Feedback: nice try"), None);
    }

    #[test]
    fn test_parse_grade_missing_feedback_line() {
        assert_eq!(parse_grade("Score: 0.4"), None);
    }

    #[test]
    fn test_parse_grade_non_numeric_score() {
        assert_eq!(parse_grade("Score: high\nFeedback: ok"), None);
    }

    #[test]
    fn test_parse_grade_out_of_range_score() {
        assert_eq!(parse_grade("Score: 7\nFeedback: ok"), None);
        assert_eq!(parse_grade("Score: -0.2\nFeedback: ok"), None);
    }

    #[test]
    fn test_fallback_grade_shape() {
        let grade = Grade::fallback();
        assert_eq!(grade.score, 0.0);
        assert_eq!(grade.feedback, FALLBACK_FEEDBACK);
    }

    #[test]
    fn test_unanswered_defaults() {
        let pair = QuestionAnswer::new("Q", "A", "T");
        let graded = GradedAnswer::unanswered(&pair);
        assert_eq!(graded.score, 0.0);
        assert_eq!(graded.feedback, NO_ANSWER_FEEDBACK);
        assert!(graded.student.is_empty());
        assert_eq!(graded.topic, "T");
    }

    #[test]
    fn test_grading_prompt_embeds_all_parts() {
        let prompt = build_grading_prompt(
            "Paris is the capital of France.",
            "Paris",
            Some("What is the capital of France?"),
        );
        assert!(prompt.contains("Q: What is the capital of France?"));
        assert!(prompt.contains("Correct Answer: Paris is the capital of France."));
        assert!(prompt.contains("Student Answer: Paris"));
        assert!(prompt.contains("Score (0.0 to 1.0):"));
    }
}
