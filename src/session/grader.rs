use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradeMode {
    /// The answer is a tuple of sub-answers; every position must match the
    /// corresponding accepted form (verb inflection lessons).
    ExactSequence,
    /// The answer is a single string; any accepted string matches
    /// (meaning/synonym lessons).
    Membership,
}

/// Answers compare after trimming and Unicode lowercasing. Grading never
/// errors: any input normalizes, the worst outcome is "incorrect".
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn check(mode: GradeMode, accepted: &[String], fields: &[String]) -> bool {
    match mode {
        GradeMode::ExactSequence => {
            fields.len() == accepted.len()
                && accepted
                    .iter()
                    .zip(fields)
                    .all(|(want, got)| normalize(want) == normalize(got))
        }
        GradeMode::Membership => fields.first().is_some_and(|field| {
            let given = normalize(field);
            accepted.iter().any(|want| normalize(want) == given)
        }),
    }
}

/// How many input fields a renderer should show for one entry.
pub fn field_count(mode: GradeMode, accepted: &[String]) -> usize {
    match mode {
        GradeMode::ExactSequence => accepted.len(),
        GradeMode::Membership => 1,
    }
}
