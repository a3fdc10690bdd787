use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const SAMPLE_LESSON_ID: &str = "irregular-verbs";

const SAMPLE_LESSON: &str = include_str!("../assets/irregular-verbs.json");

/// One quiz item. `id` is the stable join key into the word stats, so it
/// must never change across sessions for the same word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct VocabularyEntry {
    pub id: String,
    pub prompt: String,
    /// Ordered and non-empty. For inflection lessons this is the ordered
    /// tuple of forms (base, past, participle); for meaning lessons it is
    /// the set of accepted translations.
    pub accepted: Vec<String>,
}

/// Lesson files come in two shapes: the current `{id, prompt, accepted}`
/// form and the legacy verb form `{base, past, pp, pl}` where the prompt is
/// the meaning (`pl`) and the accepted answers are the three inflections.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Modern {
        id: String,
        prompt: String,
        accepted: Vec<String>,
    },
    LegacyVerb {
        base: String,
        past: String,
        pp: String,
        pl: String,
    },
}

impl From<RawEntry> for VocabularyEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Modern {
                id,
                prompt,
                accepted,
            } => Self {
                id,
                prompt,
                accepted,
            },
            RawEntry::LegacyVerb { base, past, pp, pl } => Self {
                id: base.clone(),
                prompt: pl,
                accepted: vec![base, past, pp],
            },
        }
    }
}

/// One row of the lesson index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonInfo {
    pub id: String,
    pub name: String,
}

/// Reads lessons from a directory laid out as `index.json` plus one
/// `<lesson-id>.json` word list per lesson. A bundled sample lesson is
/// served when the directory has no lessons of its own.
pub struct LessonSource {
    lessons_dir: PathBuf,
}

impl LessonSource {
    pub fn new(lessons_dir: PathBuf) -> Self {
        Self { lessons_dir }
    }

    pub fn index(&self) -> Result<Vec<LessonInfo>> {
        let path = self.lessons_dir.join("index.json");
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| Error::Load(format!("unparsable lesson index {path:?}: {e}"))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(vec![LessonInfo {
                id: SAMPLE_LESSON_ID.to_string(),
                name: "Irregular verbs (sample)".to_string(),
            }]),
            Err(e) => Err(Error::Load(format!("cannot read lesson index {path:?}: {e}"))),
        }
    }

    pub fn word_list(&self, lesson_id: &str) -> Result<Vec<VocabularyEntry>> {
        let path = self.lessons_dir.join(format!("{lesson_id}.json"));
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound && lesson_id == SAMPLE_LESSON_ID => {
                SAMPLE_LESSON.to_string()
            }
            Err(e) => {
                return Err(Error::Load(format!("cannot read lesson {lesson_id:?}: {e}")));
            }
        };
        let words: Vec<VocabularyEntry> = serde_json::from_str(&content)
            .map_err(|e| Error::Load(format!("unparsable lesson {lesson_id:?}: {e}")))?;
        validate_entries(lesson_id, &words)?;
        Ok(words)
    }
}

fn validate_entries(lesson_id: &str, words: &[VocabularyEntry]) -> Result<()> {
    for word in words {
        if word.id.is_empty() {
            return Err(Error::Load(format!(
                "lesson {lesson_id:?} contains an entry with an empty id"
            )));
        }
        if word.accepted.is_empty() || word.accepted.iter().any(|a| a.is_empty()) {
            return Err(Error::Load(format!(
                "entry {:?} in lesson {lesson_id:?} has no usable accepted answers",
                word.id
            )));
        }
    }
    Ok(())
}
