use crate::engine::word_stats::WordStatsStore;
use crate::error::{Error, Result};
use crate::lesson::VocabularyEntry;
use crate::session::grader::{self, GradeMode};
use crate::session::result::SessionResult;

/// Observer fired after every grading event, e.g. to trigger pronunciation
/// playback. The session never depends on what it does.
pub type GradedHook = Box<dyn FnMut(&VocabularyEntry, bool)>;

/// Outcome of grading one answer. `expected` carries the accepted answers
/// so a renderer can show the correction.
#[derive(Clone, Debug)]
pub struct Graded {
    pub correct: bool,
    pub expected: Vec<String>,
}

/// What a renderer needs to pose the current question: the prompt text and
/// the number of input fields to draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionView {
    pub prompt: String,
    pub field_count: usize,
}

/// State machine for one quiz run. Grading and advancing are deliberately
/// separate calls: presentation layers pause on feedback before moving on,
/// and the session must survive that gap without double counting.
///
/// Built from an empty word list the session is complete from the start.
pub struct QuizSession {
    words: Vec<VocabularyEntry>,
    position: usize,
    correct_count: usize,
    wrong_count: usize,
    mode: GradeMode,
    on_graded: Option<GradedHook>,
}

impl QuizSession {
    pub fn new(words: Vec<VocabularyEntry>, mode: GradeMode) -> Self {
        Self {
            words,
            position: 0,
            correct_count: 0,
            wrong_count: 0,
            mode,
            on_graded: None,
        }
    }

    pub fn set_graded_hook(&mut self, hook: GradedHook) {
        self.on_graded = Some(hook);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn wrong_count(&self) -> usize {
        self.wrong_count
    }

    pub fn mode(&self) -> GradeMode {
        self.mode
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.words.len()
    }

    pub fn current(&self) -> Result<&VocabularyEntry> {
        self.words
            .get(self.position)
            .ok_or(Error::InvalidState("current() on a completed session"))
    }

    pub fn current_question_view(&self) -> Result<QuestionView> {
        let word = self.current()?;
        Ok(QuestionView {
            prompt: word.prompt.clone(),
            field_count: grader::field_count(self.mode, &word.accepted),
        })
    }

    /// Grade the answer for the current word. Records the result into
    /// `stats` and the running score exactly once, and does NOT advance —
    /// callers must not grade the same position twice. Mismatched input
    /// never errors; it just grades incorrect.
    pub fn grade(&mut self, stats: &mut WordStatsStore, fields: &[String]) -> Result<Graded> {
        if self.position >= self.words.len() {
            return Err(Error::InvalidState("grade() on a completed session"));
        }
        let word = &self.words[self.position];
        let correct = grader::check(self.mode, &word.accepted, fields);

        if correct {
            self.correct_count += 1;
        } else {
            self.wrong_count += 1;
        }
        stats.record(&word.id, correct);
        if let Some(hook) = self.on_graded.as_mut() {
            hook(word, correct);
        }

        Ok(Graded {
            correct,
            expected: word.accepted.clone(),
        })
    }

    /// Move to the next word. Past completion this is a clamped no-op so
    /// duplicate UI triggers are harmless.
    pub fn advance(&mut self) {
        if self.position < self.words.len() {
            self.position += 1;
        }
    }

    /// Valid only once complete. The caller is responsible for appending
    /// the result to the history log; the session itself has no storage
    /// side effects beyond per-answer stat recording.
    pub fn finish(&self) -> Result<SessionResult> {
        if !self.is_complete() {
            return Err(Error::InvalidState("finish() before the session is complete"));
        }
        Ok(SessionResult {
            correct_count: self.correct_count,
            total_count: self.words.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn verb(id: &str, forms: &[&str]) -> VocabularyEntry {
        VocabularyEntry {
            id: id.to_string(),
            prompt: format!("meaning of {id}"),
            accepted: forms.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_session_is_immediately_complete() {
        let session = QuizSession::new(Vec::new(), GradeMode::Membership);
        assert!(session.is_complete());
        assert!(session.current().is_err());
        let result = session.finish().unwrap();
        assert_eq!(result.total_count, 0);
        assert_eq!(result.correct_count, 0);
    }

    #[test]
    fn test_correct_exact_sequence_answer() {
        let words = vec![verb("go", &["go", "went", "gone"])];
        let mut session = QuizSession::new(words, GradeMode::ExactSequence);
        let mut stats = WordStatsStore::default();

        let graded = session
            .grade(&mut stats, &strings(&["go", "went", "gone"]))
            .unwrap();
        assert!(graded.correct);
        assert_eq!(graded.expected, vec!["go", "went", "gone"]);

        let stat = stats.get("go").unwrap();
        assert_eq!(stat.shown, 1);
        assert_eq!(stat.wrong, 0);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.wrong_count(), 0);
    }

    #[test]
    fn test_wrong_forms_record_a_miss_and_raise_weight() {
        use crate::engine::selector::weight;

        let words = vec![verb("go", &["go", "went", "gone"])];
        let mut session = QuizSession::new(words, GradeMode::ExactSequence);
        let mut stats = WordStatsStore::default();

        let graded = session
            .grade(&mut stats, &strings(&["go", "go", "go"]))
            .unwrap();
        assert!(!graded.correct);

        let stat = stats.get("go").unwrap();
        assert_eq!(stat.shown, 1);
        assert_eq!(stat.wrong, 1);
        // accuracy 0 < 0.5 -> heaviest tier
        assert_eq!(weight(stats.get("go")), 5);
    }

    #[test]
    fn test_grade_does_not_advance() {
        let words = vec![verb("go", &["go", "went", "gone"])];
        let mut session = QuizSession::new(words, GradeMode::ExactSequence);
        let mut stats = WordStatsStore::default();

        session.grade(&mut stats, &strings(&["x"])).unwrap();
        assert_eq!(session.position(), 0);
        assert!(!session.is_complete());
        session.advance();
        assert!(session.is_complete());
    }

    #[test]
    fn test_advance_past_completion_is_clamped() {
        let words = vec![verb("go", &["go", "went", "gone"])];
        let mut session = QuizSession::new(words, GradeMode::ExactSequence);
        session.advance();
        session.advance();
        session.advance();
        assert_eq!(session.position(), 1);
        assert!(session.is_complete());
    }

    #[test]
    fn test_finish_before_complete_is_invalid_state() {
        let words = vec![verb("go", &["go", "went", "gone"])];
        let session = QuizSession::new(words, GradeMode::ExactSequence);
        assert!(matches!(session.finish(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_grade_after_completion_is_invalid_state() {
        let mut session = QuizSession::new(Vec::new(), GradeMode::Membership);
        let mut stats = WordStatsStore::default();
        assert!(matches!(
            session.grade(&mut stats, &strings(&["x"])),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_question_view_field_counts() {
        let words = vec![verb("go", &["go", "went", "gone"])];
        let session = QuizSession::new(words.clone(), GradeMode::ExactSequence);
        let view = session.current_question_view().unwrap();
        assert_eq!(view.prompt, "meaning of go");
        assert_eq!(view.field_count, 3);

        let session = QuizSession::new(words, GradeMode::Membership);
        assert_eq!(session.current_question_view().unwrap().field_count, 1);
    }

    #[test]
    fn test_graded_hook_fires_per_grade() {
        let words = vec![verb("go", &["go", "went", "gone"])];
        let mut session = QuizSession::new(words, GradeMode::ExactSequence);
        let mut stats = WordStatsStore::default();

        let seen: Rc<RefCell<Vec<(String, bool)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.set_graded_hook(Box::new(move |word, correct| {
            sink.borrow_mut().push((word.id.clone(), correct));
        }));

        session
            .grade(&mut stats, &strings(&["go", "went", "gone"]))
            .unwrap();
        assert_eq!(seen.borrow().as_slice(), &[("go".to_string(), true)]);
    }

    #[test]
    fn test_score_accumulates_across_words() {
        let words = vec![
            verb("go", &["go", "went", "gone"]),
            verb("see", &["see", "saw", "seen"]),
        ];
        let mut session = QuizSession::new(words, GradeMode::ExactSequence);
        let mut stats = WordStatsStore::default();

        session
            .grade(&mut stats, &strings(&["go", "went", "gone"]))
            .unwrap();
        session.advance();
        session.grade(&mut stats, &strings(&["bad"])).unwrap();
        session.advance();

        let result = session.finish().unwrap();
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.total_count, 2);
    }
}
