use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::warn;

use crate::config::Config;
use crate::engine::selector::{self, SelectionFilter};
use crate::engine::word_stats::StatsRow;
use crate::error::{Error, Result};
use crate::history::HistoryLog;
use crate::lesson::{LessonInfo, LessonSource};
use crate::session::grader::GradeMode;
use crate::session::quiz::{Graded, QuestionView, QuizSession};
use crate::session::result::{HistoryEntry, SessionResult};
use crate::store::json_store::JsonStore;
use crate::store::schema::{HistoryData, WordStatsData};

struct ActiveQuiz {
    lesson_id: String,
    session: QuizSession,
}

/// Owns the persistent state and the currently running session, and wires
/// the selection/grading/history pieces together for a front end. One
/// value per process; nothing here is shared or locked.
pub struct QuizApp {
    pub config: Config,
    store: JsonStore,
    stats: WordStatsData,
    history: HistoryData,
    lessons: LessonSource,
    active: Option<ActiveQuiz>,
    rng: SmallRng,
}

impl QuizApp {
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        let store = JsonStore::new()?;
        let lessons = LessonSource::new(PathBuf::from(&config.lessons_dir));
        Ok(Self::assemble(config, store, lessons))
    }

    /// Everything rooted under explicit directories. Used by integration
    /// tests and by the CLI's `--data-dir` override.
    pub fn with_dirs(data_dir: PathBuf, lessons_dir: PathBuf) -> Result<Self> {
        let store = JsonStore::with_base_dir(data_dir)?;
        let lessons = LessonSource::new(lessons_dir);
        Ok(Self::assemble(Config::default(), store, lessons))
    }

    fn assemble(config: Config, store: JsonStore, lessons: LessonSource) -> Self {
        // Corrupt or missing files already degraded to empty inside the
        // store loaders; weighting just treats every word as new.
        let stats = store.load_word_stats();
        let history = store.load_history();
        Self {
            config,
            store,
            stats,
            history,
            lessons,
            active: None,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn lessons(&self) -> Result<Vec<LessonInfo>> {
        self.lessons.index()
    }

    /// Build a weighted question set for `lesson_id` and start a session.
    /// A lesson that loads but yields no candidates (e.g. `wrong_only` with
    /// a clean record) produces an immediately complete session, not an
    /// error.
    pub fn start_quiz(
        &mut self,
        lesson_id: &str,
        count: Option<usize>,
        mode: Option<GradeMode>,
        wrong_only: bool,
    ) -> Result<()> {
        let all_words = self.lessons.word_list(lesson_id)?;
        let count = count.unwrap_or(self.config.question_count);
        let filter = if wrong_only {
            SelectionFilter::WrongOnly
        } else {
            SelectionFilter::All
        };
        let words = selector::build_set(&all_words, count, filter, &self.stats.stats, &mut self.rng);
        let mode = mode.unwrap_or_else(|| self.config.grade_mode());
        self.active = Some(ActiveQuiz {
            lesson_id: lesson_id.to_string(),
            session: QuizSession::new(words, mode),
        });
        Ok(())
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.active.as_ref().map(|a| &a.session)
    }

    pub fn is_quiz_complete(&self) -> bool {
        self.active.as_ref().is_none_or(|a| a.session.is_complete())
    }

    pub fn current_view(&self) -> Result<QuestionView> {
        let active = self
            .active
            .as_ref()
            .ok_or(Error::InvalidState("no active quiz"))?;
        active.session.current_question_view()
    }

    /// Grade the current word and persist the updated stats. A store write
    /// failure is reported but does not lose the grading: the next grade
    /// retries the save with the accumulated in-memory stats.
    pub fn submit_answer(&mut self, fields: &[String]) -> Result<Graded> {
        let active = self
            .active
            .as_mut()
            .ok_or(Error::InvalidState("no active quiz"))?;
        let graded = active.session.grade(&mut self.stats.stats, fields)?;
        if let Err(e) = self.store.save_word_stats(&self.stats) {
            warn!(error = %e, "word stats not persisted");
        }
        Ok(graded)
    }

    pub fn next(&mut self) -> Result<()> {
        let active = self
            .active
            .as_mut()
            .ok_or(Error::InvalidState("no active quiz"))?;
        active.session.advance();
        Ok(())
    }

    /// Close out a completed session: append it to the history log,
    /// persist, and drop the session.
    pub fn finish_quiz(&mut self) -> Result<SessionResult> {
        let active = self
            .active
            .as_ref()
            .ok_or(Error::InvalidState("no active quiz"))?;
        let result = active.session.finish()?;
        self.history
            .history
            .append(HistoryEntry::from_result(&active.lesson_id, result));
        if let Err(e) = self.store.save_history(&self.history) {
            warn!(error = %e, "history not persisted");
        }
        self.active = None;
        Ok(result)
    }

    /// Abandon the running session. Grades already recorded stand; nothing
    /// is rolled back and no history entry is written.
    pub fn abandon_quiz(&mut self) {
        self.active = None;
    }

    pub fn stats_summary(&self) -> Vec<StatsRow> {
        self.stats.stats.summary()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history.history
    }

    pub fn clear_all_progress(&mut self) -> Result<()> {
        self.stats = WordStatsData::default();
        self.history = HistoryData::default();
        self.store.clear_word_stats()?;
        self.store.clear_history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_app() -> (TempDir, QuizApp) {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        let lessons_dir = dir.path().join("lessons");
        fs::create_dir_all(&lessons_dir).unwrap();
        fs::write(
            lessons_dir.join("index.json"),
            r#"[{"id":"verbs","name":"Verbs"}]"#,
        )
        .unwrap();
        fs::write(
            lessons_dir.join("verbs.json"),
            r#"[{"base":"go","past":"went","pp":"gone","pl":"iść"}]"#,
        )
        .unwrap();
        let app = QuizApp::with_dirs(data_dir, lessons_dir).unwrap();
        (dir, app)
    }

    fn answer(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_quiz_run_records_stats_and_history() {
        let (_dir, mut app) = make_app();
        app.start_quiz("verbs", Some(1), None, false).unwrap();
        assert!(!app.is_quiz_complete());

        let view = app.current_view().unwrap();
        assert_eq!(view.field_count, 3);

        let graded = app.submit_answer(&answer(&["go", "went", "gone"])).unwrap();
        assert!(graded.correct);
        app.next().unwrap();
        assert!(app.is_quiz_complete());

        let result = app.finish_quiz().unwrap();
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.total_count, 1);

        assert_eq!(app.history().len(), 1);
        assert_eq!(app.history().all()[0].lesson_id, "verbs");
        let rows = app.stats_summary();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].correct, 1);
    }

    #[test]
    fn test_unknown_lesson_cannot_start_a_session() {
        let (_dir, mut app) = make_app();
        assert!(matches!(
            app.start_quiz("nope", None, None, false),
            Err(Error::Load(_))
        ));
        assert!(app.session().is_none());
    }

    #[test]
    fn test_wrong_only_with_clean_record_is_complete_immediately() {
        let (_dir, mut app) = make_app();
        app.start_quiz("verbs", Some(5), None, true).unwrap();
        assert!(app.is_quiz_complete());
        let result = app.finish_quiz().unwrap();
        assert_eq!(result.total_count, 0);
    }

    #[test]
    fn test_abandon_keeps_recorded_grades_but_no_history() {
        let (_dir, mut app) = make_app();
        app.start_quiz("verbs", Some(1), None, false).unwrap();
        app.submit_answer(&answer(&["wrong"])).unwrap();
        app.abandon_quiz();

        assert!(app.history().is_empty());
        let rows = app.stats_summary();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].wrong, 1);
    }

    #[test]
    fn test_clear_all_progress_resets_everything() {
        let (_dir, mut app) = make_app();
        app.start_quiz("verbs", Some(1), None, false).unwrap();
        app.submit_answer(&answer(&["wrong"])).unwrap();
        app.next().unwrap();
        app.finish_quiz().unwrap();

        app.clear_all_progress().unwrap();
        assert!(app.stats_summary().is_empty());
        assert!(app.history().is_empty());
    }

    #[test]
    fn test_membership_mode_override() {
        let (_dir, mut app) = make_app();
        app.start_quiz("verbs", Some(1), Some(GradeMode::Membership), false)
            .unwrap();
        assert_eq!(app.current_view().unwrap().field_count, 1);
        // Any single accepted form counts in membership mode.
        let graded = app.submit_answer(&answer(&["Went "])).unwrap();
        assert!(graded.correct);
    }
}
