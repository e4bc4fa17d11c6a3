//! Weak-topic recommendation from graded results.

use crate::grading::GradedAnswer;

/// Scores below this mark a topic occurrence as weak.
pub const WEAK_SCORE_THRESHOLD: f64 = 0.6;

/// Maximum number of topics recommended by [`recommend`].
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;

/// Return up to three topics where the student scored below the threshold,
/// most frequent first. Ties keep first-encountered order.
#[must_use]
pub fn recommend(graded: &[GradedAnswer]) -> Vec<String> {
    recommend_top(graded, DEFAULT_RECOMMENDATION_LIMIT)
}

/// Like [`recommend`] with a caller-chosen limit.
#[must_use]
pub fn recommend_top(graded: &[GradedAnswer], limit: usize) -> Vec<String> {
    // First-encounter order is preserved so a stable sort on count alone
    // gives deterministic tie-breaking.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in graded {
        if item.score >= WEAK_SCORE_THRESHOLD {
            continue;
        }
        match counts.iter_mut().find(|(topic, _)| *topic == item.topic) {
            Some((_, count)) => *count += 1,
            None => counts.push((&item.topic, 1)),
        }
    }

    counts.sort_by_key(|&(_, count)| std::cmp::Reverse(count));
    counts
        .into_iter()
        .take(limit)
        .map(|(topic, _)| topic.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graded(topic: &str, score: f64) -> GradedAnswer {
        GradedAnswer {
            question: "q".to_string(),
            answer: "a".to_string(),
            topic: topic.to_string(),
            student: "s".to_string(),
            score,
            feedback: String::new(),
        }
    }

    #[test]
    fn test_recommend_surfaces_weak_topic() {
        let results = vec![graded("A", 0.5), graded("A", 0.4), graded("B", 0.9)];
        assert_eq!(recommend(&results), vec!["A"]);
    }

    #[test]
    fn test_recommend_orders_by_frequency() {
        let results = vec![
            graded("A", 0.1),
            graded("B", 0.2),
            graded("B", 0.3),
            graded("C", 0.0),
            graded("B", 0.5),
            graded("C", 0.1),
        ];
        assert_eq!(recommend(&results), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_recommend_caps_at_three() {
        let results = vec![
            graded("A", 0.1),
            graded("B", 0.1),
            graded("C", 0.1),
            graded("D", 0.1),
        ];
        assert_eq!(recommend(&results).len(), 3);
    }

    #[test]
    fn test_recommend_tie_break_is_first_encountered() {
        let results = vec![graded("X", 0.1), graded("Y", 0.1), graded("Z", 0.1)];
        assert_eq!(recommend(&results), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_recommend_threshold_is_exclusive() {
        // Exactly 0.6 is not weak.
        let results = vec![graded("A", 0.6)];
        assert!(recommend(&results).is_empty());
    }

    #[test]
    fn test_recommend_empty_input() {
        assert!(recommend(&[]).is_empty());
    }
}
