//! Course curriculum detail, hydrated on first slug lookup.

use serde::{Deserialize, Serialize};

/// Detail payload attached to a [`super::Course`] exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CourseDetail {
    pub sections: Vec<Section>,
    pub what_you_will_learn: Vec<String>,
}

/// Ordered group of lessons within the curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub title: String,
    pub lessons: Vec<Lesson>,
}

/// Single curriculum entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Lesson {
    pub id: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: LessonKind,
    /// Display label, for example `"8:45"`.
    pub duration: String,
    pub completed: bool,
}

/// Lesson media kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonKind {
    Video,
    Article,
    Quiz,
}
