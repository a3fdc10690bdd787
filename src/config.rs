use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::session::grader::GradeMode;

const MIN_QUESTION_COUNT: usize = 1;
const MAX_QUESTION_COUNT: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// "forms" asks every inflected form in order; "meaning" accepts any
    /// single accepted answer.
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_lessons_dir")]
    pub lessons_dir: String,
}

fn default_question_count() -> usize {
    10
}
fn default_mode() -> String {
    "forms".to_string()
}
fn default_lessons_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocadr")
        .join("lessons")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            mode: default_mode(),
            lessons_dir: default_lessons_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Persistence(format!("cannot read {path:?}: {e}")))?;
            let mut config: Config = toml::from_str(&content)
                .map_err(|e| Error::Persistence(format!("unparsable config {path:?}: {e}")))?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Persistence(format!("cannot create {parent:?}: {e}")))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Persistence(format!("cannot serialize config: {e}")))?;
        fs::write(&path, content)
            .map_err(|e| Error::Persistence(format!("cannot write {path:?}: {e}")))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocadr")
            .join("config.toml")
    }

    /// Clamp out-of-range values from stale or hand-edited config files.
    pub fn validate(&mut self) {
        self.question_count = self
            .question_count
            .clamp(MIN_QUESTION_COUNT, MAX_QUESTION_COUNT);
        if self.mode != "forms" && self.mode != "meaning" {
            self.mode = default_mode();
        }
    }

    pub fn grade_mode(&self) -> GradeMode {
        if self.mode == "meaning" {
            GradeMode::Membership
        } else {
            GradeMode::ExactSequence
        }
    }
}
