// Copyright 2026 the gentsuki-dojo authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

use crate::types::question::Question;
use crate::types::record::AnswerRecord;
use crate::types::result::QuizResult;

/// Shown on the start screen when question loading fails.
pub const LOAD_FAILED_NOTICE: &str = "問題の読み込みに失敗しました。もう一度お試しください。";

/// Correlation token for in-flight fetches. Bumped whenever a new exam
/// begins or the current one is discarded, so that a late response can be
/// told apart from one belonging to the active exam.
pub type Generation = u64;

/// The session is always in exactly one phase. The only legal transitions
/// are start → loading → quiz → result, plus loading → start (failure) and
/// result → start (retry).
#[derive(Debug)]
pub enum Phase {
    Start { notice: Option<&'static str> },
    Loading { requested: usize },
    Quiz(QuizPhase),
    Result(ResultPhase),
}

#[derive(Debug)]
pub struct QuizPhase {
    questions: Vec<Question>,
    history: Vec<AnswerRecord>,
    current: usize,
}

impl QuizPhase {
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// Zero-based position of the current question.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the current question has been answered. The history grows
    /// by exactly one record per question, so this is purely positional.
    pub fn answered(&self) -> bool {
        self.history.len() > self.current
    }

    /// The record for the current question, once answered.
    pub fn current_record(&self) -> Option<&AnswerRecord> {
        self.history.get(self.current)
    }

    pub fn is_last(&self) -> bool {
        self.current == self.questions.len() - 1
    }
}

#[derive(Debug)]
pub struct ResultPhase {
    result: QuizResult,
    message: Option<String>,
}

impl ResultPhase {
    pub fn result(&self) -> &QuizResult {
        &self.result
    }

    /// The instructor's feedback message, once it has arrived.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// An out-of-order transition. These are contract violations by the
/// caller, not user-facing conditions: callers log them and no-op.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("an exam can only be started from the start screen")]
    NotAtStart,
    #[error("an exam must have at least one question")]
    ZeroCount,
    #[error("no question is being presented")]
    NotInQuiz,
    #[error("the current question has already been answered")]
    AlreadyAnswered,
    #[error("the current question has not been answered yet")]
    NotAnswered,
}

/// Outcome of applying a fetched question set.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The quiz phase was entered.
    Entered,
    /// The set was empty; back to the start screen with a notice.
    Failed,
    /// The response belonged to an earlier exam and was discarded.
    Stale,
}

/// Outcome of a successful `advance`.
#[derive(Debug, PartialEq, Eq)]
pub enum Advanced {
    Next,
    Finished { score: usize, total: usize },
}

/// The whole application state: one exclusively-owned instance, mutated
/// only through the transition methods below.
#[derive(Debug)]
pub struct Session {
    phase: Phase,
    generation: Generation,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Start { notice: None },
            generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Move to the loading phase and hand out the generation the question
    /// fetch must report back with.
    pub fn begin(&mut self, count: usize) -> Result<Generation, TransitionError> {
        if !matches!(self.phase, Phase::Start { .. }) {
            return Err(TransitionError::NotAtStart);
        }
        if count == 0 {
            return Err(TransitionError::ZeroCount);
        }
        self.generation += 1;
        self.phase = Phase::Loading { requested: count };
        log::debug!("loading {count} questions (generation {})", self.generation);
        Ok(self.generation)
    }

    /// Apply the outcome of a question fetch. An empty set takes the
    /// failure edge back to the start screen; anything else enters the
    /// quiz with at most `requested` questions (truncation only, a short
    /// set just makes a shorter exam).
    pub fn resolve_questions(
        &mut self,
        generation: Generation,
        mut questions: Vec<Question>,
    ) -> Resolution {
        if generation != self.generation {
            return Resolution::Stale;
        }
        let requested = match self.phase {
            Phase::Loading { requested } => requested,
            _ => return Resolution::Stale,
        };
        if questions.is_empty() {
            log::debug!("question fetch produced nothing; back to the start screen");
            self.phase = Phase::Start {
                notice: Some(LOAD_FAILED_NOTICE),
            };
            return Resolution::Failed;
        }
        questions.truncate(requested);
        log::debug!("exam started with {} questions", questions.len());
        self.phase = Phase::Quiz(QuizPhase {
            questions,
            history: Vec::new(),
            current: 0,
        });
        Resolution::Entered
    }

    /// Commit an answer for the current question. Repeated answers for the
    /// same question are rejected.
    pub fn answer(&mut self, user_answer: bool) -> Result<(), TransitionError> {
        let quiz = match &mut self.phase {
            Phase::Quiz(quiz) => quiz,
            _ => return Err(TransitionError::NotInQuiz),
        };
        if quiz.answered() {
            return Err(TransitionError::AlreadyAnswered);
        }
        let question = quiz.questions[quiz.current].clone();
        quiz.history.push(AnswerRecord::new(question, user_answer));
        Ok(())
    }

    /// Move past an answered question. On the last question this folds the
    /// history into the result and enters the result phase.
    pub fn advance(&mut self) -> Result<Advanced, TransitionError> {
        let quiz = match &mut self.phase {
            Phase::Quiz(quiz) => quiz,
            _ => return Err(TransitionError::NotInQuiz),
        };
        if !quiz.answered() {
            return Err(TransitionError::NotAnswered);
        }
        if !quiz.is_last() {
            quiz.current += 1;
            return Ok(Advanced::Next);
        }
        let history = std::mem::take(&mut quiz.history);
        let result = QuizResult::from_history(history);
        let (score, total) = (result.score(), result.total());
        log::debug!("exam finished: {score}/{total}");
        self.phase = Phase::Result(ResultPhase {
            result,
            message: None,
        });
        Ok(Advanced::Finished { score, total })
    }

    /// Install the instructor's feedback message, unless the exam it was
    /// requested for is no longer on screen.
    pub fn attach_message(&mut self, generation: Generation, message: String) -> bool {
        if generation != self.generation {
            return false;
        }
        match &mut self.phase {
            Phase::Result(result) if result.message.is_none() => {
                result.message = Some(message);
                true
            }
            _ => false,
        }
    }

    /// Discard everything and return to a clean start screen.
    pub fn reset(&mut self) -> Generation {
        self.generation += 1;
        self.phase = Phase::Start { notice: None };
        self.generation
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(format!("q-{i}"), format!("question {i}"), i % 2 == 0, "解説"))
            .collect()
    }

    /// Run a quiz to completion, answering every question with `answers`.
    fn run_quiz(session: &mut Session, answers: &[bool]) {
        for &user_answer in answers {
            session.answer(user_answer).unwrap();
            session.advance().unwrap();
        }
    }

    #[test]
    fn test_initial_phase_is_start() {
        let session = Session::new();
        assert!(matches!(session.phase(), Phase::Start { notice: None }));
    }

    #[test]
    fn test_begin_enters_loading() {
        let mut session = Session::new();
        let generation = session.begin(10).unwrap();
        assert_eq!(generation, 1);
        assert!(matches!(session.phase(), Phase::Loading { requested: 10 }));
    }

    #[test]
    fn test_begin_requires_start_phase() {
        let mut session = Session::new();
        session.begin(5).unwrap();
        assert_eq!(session.begin(5), Err(TransitionError::NotAtStart));
    }

    #[test]
    fn test_begin_rejects_zero_count() {
        let mut session = Session::new();
        assert_eq!(session.begin(0), Err(TransitionError::ZeroCount));
        assert!(matches!(session.phase(), Phase::Start { .. }));
    }

    #[test]
    fn test_quiz_length_is_min_of_count_and_returned() {
        for count in [1, 5, 10, 15] {
            let mut session = Session::new();
            let generation = session.begin(count).unwrap();
            let resolution = session.resolve_questions(generation, questions(10));
            assert_eq!(resolution, Resolution::Entered);
            match session.phase() {
                Phase::Quiz(quiz) => {
                    assert_eq!(quiz.len(), count.min(10));
                    assert!(quiz.len() >= 1);
                }
                phase => panic!("expected quiz phase, got {phase:?}"),
            }
        }
    }

    #[test]
    fn test_short_fetch_runs_a_shorter_exam() {
        // Ten questions requested, three returned: the exam has three.
        let mut session = Session::new();
        let generation = session.begin(10).unwrap();
        session.resolve_questions(generation, questions(3));
        match session.phase() {
            Phase::Quiz(quiz) => assert_eq!(quiz.len(), 3),
            phase => panic!("expected quiz phase, got {phase:?}"),
        }
    }

    #[test]
    fn test_empty_fetch_returns_to_start_with_notice() {
        let mut session = Session::new();
        let generation = session.begin(10).unwrap();
        let resolution = session.resolve_questions(generation, Vec::new());
        assert_eq!(resolution, Resolution::Failed);
        match session.phase() {
            Phase::Start { notice } => assert_eq!(*notice, Some(LOAD_FAILED_NOTICE)),
            phase => panic!("expected start phase, got {phase:?}"),
        }
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut session = Session::new();
        let stale = session.begin(5).unwrap();
        session.reset();
        let resolution = session.resolve_questions(stale, questions(5));
        assert_eq!(resolution, Resolution::Stale);
        assert!(matches!(session.phase(), Phase::Start { notice: None }));
    }

    #[test]
    fn test_fetch_after_phase_moved_on_is_discarded() {
        let mut session = Session::new();
        let generation = session.begin(3).unwrap();
        session.resolve_questions(generation, questions(3));
        // A duplicate completion under the same generation must not clobber
        // the quiz in progress.
        let resolution = session.resolve_questions(generation, questions(3));
        assert_eq!(resolution, Resolution::Stale);
    }

    #[test]
    fn test_answer_outside_quiz_is_rejected() {
        let mut session = Session::new();
        assert_eq!(session.answer(true), Err(TransitionError::NotInQuiz));
    }

    #[test]
    fn test_reanswering_is_rejected() {
        let mut session = Session::new();
        let generation = session.begin(3).unwrap();
        session.resolve_questions(generation, questions(3));
        session.answer(true).unwrap();
        assert_eq!(session.answer(false), Err(TransitionError::AlreadyAnswered));
        match session.phase() {
            Phase::Quiz(quiz) => {
                // The rejected answer must not have been recorded.
                assert!(quiz.answered());
                assert!(quiz.current_record().unwrap().user_answer());
            }
            phase => panic!("expected quiz phase, got {phase:?}"),
        }
    }

    #[test]
    fn test_advance_requires_an_answer() {
        let mut session = Session::new();
        let generation = session.begin(3).unwrap();
        session.resolve_questions(generation, questions(3));
        assert_eq!(session.advance(), Err(TransitionError::NotAnswered));
        match session.phase() {
            Phase::Quiz(quiz) => assert_eq!(quiz.position(), 0),
            phase => panic!("expected quiz phase, got {phase:?}"),
        }
    }

    #[test]
    fn test_advance_moves_to_the_next_question() {
        let mut session = Session::new();
        let generation = session.begin(3).unwrap();
        session.resolve_questions(generation, questions(3));
        session.answer(true).unwrap();
        assert_eq!(session.advance(), Ok(Advanced::Next));
        match session.phase() {
            Phase::Quiz(quiz) => {
                assert_eq!(quiz.position(), 1);
                assert!(!quiz.answered());
                assert!(quiz.current_record().is_none());
            }
            phase => panic!("expected quiz phase, got {phase:?}"),
        }
    }

    #[test]
    fn test_last_advance_folds_the_result() {
        let mut session = Session::new();
        let generation = session.begin(2).unwrap();
        // q-0 is true, q-1 is false.
        session.resolve_questions(generation, questions(2));
        session.answer(true).unwrap();
        session.advance().unwrap();
        session.answer(true).unwrap();
        let advanced = session.advance().unwrap();
        assert_eq!(advanced, Advanced::Finished { score: 1, total: 2 });
        match session.phase() {
            Phase::Result(result) => {
                assert_eq!(result.result().score(), 1);
                assert_eq!(result.result().total(), 2);
                assert!(result.message().is_none());
            }
            phase => panic!("expected result phase, got {phase:?}"),
        }
    }

    #[test]
    fn test_all_correct_passes() {
        let mut session = Session::new();
        let generation = session.begin(4).unwrap();
        session.resolve_questions(generation, questions(4));
        // Even positions are true, odd are false.
        run_quiz(&mut session, &[true, false, true, false]);
        match session.phase() {
            Phase::Result(result) => {
                assert_eq!(result.result().percentage(), 100);
                assert!(result.result().passed());
            }
            phase => panic!("expected result phase, got {phase:?}"),
        }
    }

    #[test]
    fn test_attach_message() {
        let mut session = Session::new();
        let generation = session.begin(1).unwrap();
        session.resolve_questions(generation, questions(1));
        run_quiz(&mut session, &[true]);
        assert!(session.attach_message(generation, "よく頑張りました！".to_string()));
        match session.phase() {
            Phase::Result(result) => assert_eq!(result.message(), Some("よく頑張りました！")),
            phase => panic!("expected result phase, got {phase:?}"),
        }
    }

    #[test]
    fn test_stale_message_is_discarded() {
        let mut session = Session::new();
        let generation = session.begin(1).unwrap();
        session.resolve_questions(generation, questions(1));
        run_quiz(&mut session, &[true]);
        session.reset();
        assert!(!session.attach_message(generation, "遅すぎたメッセージ".to_string()));
        assert!(matches!(session.phase(), Phase::Start { notice: None }));
    }

    #[test]
    fn test_reset_discards_everything_and_bumps_the_generation() {
        let mut session = Session::new();
        let generation = session.begin(2).unwrap();
        session.resolve_questions(generation, questions(2));
        run_quiz(&mut session, &[false, false]);
        let next = session.reset();
        assert!(next > generation);
        assert!(matches!(session.phase(), Phase::Start { notice: None }));
    }
}
