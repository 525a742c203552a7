//! crates/study_core/src/extract.rs
//!
//! Parses the free-form completion text returned by the question-generation
//! service into structured question/answer pairs.
//!
//! The pattern is a contract with the generation prompt
//! (`Q<n>: <question>` then `A: <answer>`, one pair per block). If the
//! prompt's required output format ever changes, this pattern must change
//! with it, or extraction silently degrades to zero results.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::QuestionAnswer;

/// `Q` + ordinal + `:`, question to end of line, then `A:` + answer to end
/// of line or end of text. The ordinal's value is never used as an index;
/// only the marker's presence matters.
const QA_PATTERN: &str = r"Q\d+:\s(.+?)\nA:\s(.+?)(?:\n|$)";

fn qa_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(QA_PATTERN).expect("QA_PATTERN is a valid regex"))
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// Zero pairs found. A hard failure, not an empty success: the prompt
    /// always requests exactly 3 pairs, so zero means the upstream output
    /// drifted from the expected format (or was garbage), and callers must
    /// be able to tell that apart from "nothing to parse".
    #[error("No valid questions could be extracted from the completion text")]
    NoQuestionsExtracted,
}

/// Extracts all well-formed question/answer pairs from `raw`, in the order
/// they occur.
///
/// A question whose `A:` line is missing or malformed is dropped, not
/// emitted with a placeholder answer. Prose before the first marker and
/// after the last answer is ignored. An answer is bounded at its first
/// line break.
pub fn extract_questions(raw: &str) -> Result<Vec<QuestionAnswer>, ExtractError> {
    let pairs: Vec<QuestionAnswer> = qa_regex()
        .captures_iter(raw)
        .map(|caps| QuestionAnswer {
            question: caps[1].trim().to_string(),
            answer: caps[2].trim().to_string(),
        })
        .collect();

    if pairs.is_empty() {
        return Err(ExtractError::NoQuestionsExtracted);
    }
    Ok(pairs)
}

/// Renders pairs back into the canonical prompt format. Feeding the output
/// to [`extract_questions`] yields the same pairs.
pub fn render_questions(pairs: &[QuestionAnswer]) -> String {
    let mut out = String::new();
    for (i, pair) in pairs.iter().enumerate() {
        out.push_str(&format!("Q{}: {}\nA: {}\n", i + 1, pair.question, pair.answer));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qa(question: &str, answer: &str) -> QuestionAnswer {
        QuestionAnswer {
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_extracts_two_pairs_in_order() {
        let raw = "Q1: What is X?\nA: X is Y.\nQ2: Why?\nA: Because.\n";
        let pairs = extract_questions(raw).unwrap();
        assert_eq!(
            pairs,
            vec![qa("What is X?", "X is Y."), qa("Why?", "Because.")]
        );
    }

    #[test]
    fn test_extracts_three_pairs() {
        let raw = "Q1: One?\nA: 1.\nQ2: Two?\nA: 2.\nQ3: Three?\nA: 3.\n";
        let pairs = extract_questions(raw).unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2], qa("Three?", "3."));
    }

    #[test]
    fn test_more_than_three_pairs_all_kept() {
        let raw = "Q1: a?\nA: a.\nQ2: b?\nA: b.\nQ3: c?\nA: c.\nQ4: d?\nA: d.\n";
        assert_eq!(extract_questions(raw).unwrap().len(), 4);
    }

    #[test]
    fn test_single_pair_without_trailing_newline() {
        let raw = "Q1: Only one?\nA: Yes";
        let pairs = extract_questions(raw).unwrap();
        assert_eq!(pairs, vec![qa("Only one?", "Yes")]);
    }

    #[test]
    fn test_no_markers_is_a_hard_failure() {
        let raw = "The model chatted about the weather instead.";
        assert_eq!(
            extract_questions(raw),
            Err(ExtractError::NoQuestionsExtracted)
        );
    }

    #[test]
    fn test_empty_input_is_a_hard_failure() {
        assert_eq!(extract_questions(""), Err(ExtractError::NoQuestionsExtracted));
    }

    #[test]
    fn test_question_without_answer_is_dropped() {
        // Q1 has no A: line before the next question marker; it must be
        // dropped without a placeholder while Q2 survives.
        let raw = "Q1: Orphaned?\nQ2: Paired?\nA: Yes.\n";
        let pairs = extract_questions(raw).unwrap();
        assert_eq!(pairs, vec![qa("Paired?", "Yes.")]);
    }

    #[test]
    fn test_answer_bounded_at_first_line_break() {
        let raw = "Q1: Multi?\nA: First line.\nSecond line that is not an answer.\n";
        let pairs = extract_questions(raw).unwrap();
        assert_eq!(pairs, vec![qa("Multi?", "First line.")]);
    }

    #[test]
    fn test_surrounding_prose_ignored() {
        let raw = "Sure! Here are your practice questions:\n\n\
                   Q1: What?\nA: That.\n\nHope these help you study!";
        let pairs = extract_questions(raw).unwrap();
        assert_eq!(pairs, vec![qa("What?", "That.")]);
    }

    #[test]
    fn test_blank_lines_between_pairs() {
        let raw = "Q1: First?\nA: One.\n\nQ2: Second?\nA: Two.\n";
        let pairs = extract_questions(raw).unwrap();
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_ordinals_not_used_as_indices() {
        // Repeated and out-of-order ordinals still parse, in source order.
        let raw = "Q7: First in text?\nA: Yes.\nQ7: Second in text?\nA: Also yes.\n";
        let pairs = extract_questions(raw).unwrap();
        assert_eq!(pairs[0].question, "First in text?");
        assert_eq!(pairs[1].question, "Second in text?");
    }

    #[test]
    fn test_unicode_bodies() {
        let raw = "Q1: Qu'est-ce que la photosynthèse ?\nA: C'est la conversion de la lumière en énergie — 光合作用.\n";
        let pairs = extract_questions(raw).unwrap();
        assert_eq!(pairs[0].question, "Qu'est-ce que la photosynthèse ?");
        assert_eq!(
            pairs[0].answer,
            "C'est la conversion de la lumière en énergie — 光合作用."
        );
    }

    #[test]
    fn test_extraction_idempotent_on_rendered_output() {
        let raw = "Intro prose.\nQ3: Alpha?\nA: Beta.\nQ1: Gamma?\nA: Delta.\n";
        let first = extract_questions(raw).unwrap();
        let second = extract_questions(&render_questions(&first)).unwrap();
        assert_eq!(first, second);
    }
}
