//! Pure quiz scoring: selected answers in, score and pass/fail out.

use thiserror::Error;

use crate::model::Quiz;

/// Inclusive pass threshold for quiz scores.
pub const PASS_MARK: u8 = 70;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvaluationError {
    #[error("answer sheet covers {got} questions, quiz has {expected}")]
    QuestionCountMismatch { expected: usize, got: usize },

    #[error("question {index} has no selected answer")]
    Unanswered { index: usize },

    #[error("question {index} selection {selected} is out of range for {options} options")]
    SelectionOutOfRange {
        index: usize,
        selected: usize,
        options: usize,
    },
}

//
// ─── ANSWER SHEET ──────────────────────────────────────────────────────────────
//

/// Selections for one quiz attempt: one slot per question.
///
/// Submission is only enabled once every slot is filled; the UI disables the
/// submit affordance until `is_complete` holds. A failed attempt starts over
/// from an empty sheet via `clear`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    selected: Vec<Option<usize>>,
}

impl AnswerSheet {
    /// Creates an empty sheet for a quiz with `question_count` questions.
    #[must_use]
    pub fn new(question_count: usize) -> Self {
        Self {
            selected: vec![None; question_count],
        }
    }

    /// Empty sheet sized for the given quiz.
    #[must_use]
    pub fn for_quiz(quiz: &Quiz) -> Self {
        Self::new(quiz.question_count())
    }

    /// Records the selected option for a question, replacing any earlier pick.
    ///
    /// Out-of-range question indices are ignored; the slot simply does not
    /// exist, and evaluation reports the real coverage.
    pub fn select(&mut self, question: usize, option: usize) {
        if let Some(slot) = self.selected.get_mut(question) {
            *slot = Some(option);
        }
    }

    /// Discards every selection, e.g. for a retake after a fail.
    pub fn clear(&mut self) {
        self.selected.fill(None);
    }

    #[must_use]
    pub fn selected(&self, question: usize) -> Option<usize> {
        self.selected.get(question).copied().flatten()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.selected.len()
    }

    /// True once every question has a selection.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.selected.iter().all(Option::is_some)
    }
}

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Outcome of evaluating one complete answer sheet against a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    pub score: u8,
    pub passed: bool,
}

/// Scores a complete answer sheet against a quiz.
///
/// Deterministic and side-effect free: `score = round(100 * correct / total)`
/// and the attempt passes iff `score >= PASS_MARK`. Identical inputs always
/// produce identical results.
///
/// # Errors
///
/// Returns `EvaluationError` when the sheet does not match the quiz shape or
/// leaves a question unanswered. A complete submission is the caller's
/// precondition; this is a caller error, not a scoring failure.
pub fn evaluate(quiz: &Quiz, answers: &AnswerSheet) -> Result<QuizScore, EvaluationError> {
    let total = quiz.question_count();
    if answers.question_count() != total {
        return Err(EvaluationError::QuestionCountMismatch {
            expected: total,
            got: answers.question_count(),
        });
    }

    let mut correct = 0;
    for (index, question) in quiz.questions().iter().enumerate() {
        let selected = answers
            .selected(index)
            .ok_or(EvaluationError::Unanswered { index })?;
        if selected >= question.options().len() {
            return Err(EvaluationError::SelectionOutOfRange {
                index,
                selected,
                options: question.options().len(),
            });
        }
        if selected == question.correct_answer() {
            correct += 1;
        }
    }

    let score = crate::model::percent_at(correct, total);
    Ok(QuizScore {
        correct,
        total,
        score,
        passed: score >= PASS_MARK,
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;

    fn quiz_of(n: usize) -> Quiz {
        // Correct answer is always option 0.
        let questions = (0..n)
            .map(|i| Question::new(format!("Q{i}"), vec!["yes".into(), "no".into()], 0).unwrap())
            .collect();
        Quiz::new(questions).unwrap()
    }

    fn sheet(quiz: &Quiz, picks: &[usize]) -> AnswerSheet {
        let mut answers = AnswerSheet::for_quiz(quiz);
        for (question, option) in picks.iter().enumerate() {
            answers.select(question, *option);
        }
        answers
    }

    #[test]
    fn all_correct_scores_100() {
        let quiz = quiz_of(4);
        let score = evaluate(&quiz, &sheet(&quiz, &[0, 0, 0, 0])).unwrap();
        assert_eq!(score.correct, 4);
        assert_eq!(score.score, 100);
        assert!(score.passed);
    }

    #[test]
    fn score_rounds_from_correct_ratio() {
        let quiz = quiz_of(3);
        let score = evaluate(&quiz, &sheet(&quiz, &[0, 0, 1])).unwrap();
        assert_eq!(score.correct, 2);
        assert_eq!(score.score, 67);
        assert!(!score.passed);
    }

    #[test]
    fn pass_boundary_is_inclusive_at_70() {
        // 7 of 10 rounds to exactly 70 and passes.
        let quiz = quiz_of(10);
        let picks = [0, 0, 0, 0, 0, 0, 0, 1, 1, 1];
        let score = evaluate(&quiz, &sheet(&quiz, &picks)).unwrap();
        assert_eq!(score.score, 70);
        assert!(score.passed);

        // 2 of 3 rounds to 67 and fails.
        let quiz = quiz_of(3);
        let score = evaluate(&quiz, &sheet(&quiz, &[0, 0, 1])).unwrap();
        assert_eq!(score.score, 67);
        assert!(!score.passed);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let quiz = quiz_of(2);
        let answers = sheet(&quiz, &[0, 1]);
        let first = evaluate(&quiz, &answers).unwrap();
        let second = evaluate(&quiz, &answers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_unanswered_question() {
        let quiz = quiz_of(2);
        let mut answers = AnswerSheet::for_quiz(&quiz);
        answers.select(0, 0);
        let err = evaluate(&quiz, &answers).unwrap_err();
        assert_eq!(err, EvaluationError::Unanswered { index: 1 });
    }

    #[test]
    fn rejects_sheet_of_wrong_size() {
        let quiz = quiz_of(2);
        let answers = AnswerSheet::new(3);
        let err = evaluate(&quiz, &answers).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::QuestionCountMismatch {
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn rejects_selection_out_of_range() {
        let quiz = quiz_of(1);
        let mut answers = AnswerSheet::for_quiz(&quiz);
        answers.select(0, 5);
        let err = evaluate(&quiz, &answers).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::SelectionOutOfRange {
                index: 0,
                selected: 5,
                options: 2
            }
        );
    }

    #[test]
    fn clear_resets_sheet_for_retake() {
        let quiz = quiz_of(2);
        let mut answers = sheet(&quiz, &[1, 1]);
        assert!(answers.is_complete());

        answers.clear();
        assert!(!answers.is_complete());
        assert_eq!(answers.selected(0), None);
        assert_eq!(answers.selected(1), None);
    }

    #[test]
    fn select_ignores_out_of_range_question() {
        let mut answers = AnswerSheet::new(1);
        answers.select(5, 0);
        assert!(!answers.is_complete());
    }
}
