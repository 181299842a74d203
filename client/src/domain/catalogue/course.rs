//! Course catalogue entity.

use serde::{Deserialize, Serialize};

use super::CatalogueValidationError;
use super::detail::CourseDetail;
use super::validation::{
    ensure_non_negative, ensure_valid_rating, validate_non_empty_field, validate_slug,
};
use crate::domain::user::Author;

/// Input payload for [`Course::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CourseDraft {
    pub id: u32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub author: Author,
    pub rating: f32,
    pub students: u32,
    pub price: f64,
    pub category: String,
    pub level: String,
    pub duration: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<CourseDetail>,
}

/// Catalogue course record.
///
/// ## Invariants
/// - `slug` is a lowercase hyphenated identifier, unique within the
///   catalogue and used for routing lookup.
/// - `rating` lies within `0.0..=5.0`; `price` is non-negative (zero means
///   free).
/// - `detail` is absent on summaries and attached at most once; a present
///   detail is never recomputed or overwritten.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Course {
    id: u32,
    slug: String,
    title: String,
    description: String,
    thumbnail: String,
    author: Author,
    rating: f32,
    students: u32,
    price: f64,
    category: String,
    level: String,
    duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<CourseDetail>,
}

impl Course {
    /// Validate and construct a course record.
    pub fn new(draft: CourseDraft) -> Result<Self, CatalogueValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> u32 {
        self.id
    }
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
    pub fn thumbnail(&self) -> &str {
        self.thumbnail.as_str()
    }
    pub fn author(&self) -> &Author {
        &self.author
    }
    pub fn rating(&self) -> f32 {
        self.rating
    }
    pub fn students(&self) -> u32 {
        self.students
    }
    pub fn price(&self) -> f64 {
        self.price
    }
    /// Zero price marks a free course.
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
    pub fn category(&self) -> &str {
        self.category.as_str()
    }
    pub fn level(&self) -> &str {
        self.level.as_str()
    }
    pub fn duration(&self) -> &str {
        self.duration.as_str()
    }
    pub fn detail(&self) -> Option<&CourseDetail> {
        self.detail.as_ref()
    }

    /// Whether the curriculum detail has been hydrated.
    pub fn has_detail(&self) -> bool {
        self.detail.is_some()
    }

    /// Attach the detail payload if none is present yet.
    ///
    /// Returns `true` when the payload was attached; a second call is a
    /// no-op returning `false`, which keeps hydration idempotent.
    pub fn attach_detail(&mut self, detail: CourseDetail) -> bool {
        if self.detail.is_some() {
            return false;
        }
        self.detail = Some(detail);
        true
    }
}

impl TryFrom<CourseDraft> for Course {
    type Error = CatalogueValidationError;

    fn try_from(draft: CourseDraft) -> Result<Self, Self::Error> {
        let slug = validate_slug(draft.slug, "course.slug")?;
        let title = validate_non_empty_field(draft.title, "course.title")?;
        ensure_valid_rating(draft.rating, "course.rating")?;
        ensure_non_negative(draft.price, "course.price")?;
        let category = validate_non_empty_field(draft.category, "course.category")?;
        let level = validate_non_empty_field(draft.level, "course.level")?;

        Ok(Self {
            id: draft.id,
            slug,
            title,
            description: draft.description,
            thumbnail: draft.thumbnail,
            author: draft.author,
            rating: draft.rating,
            students: draft.students,
            price: draft.price,
            category,
            level,
            duration: draft.duration,
            detail: draft.detail,
        })
    }
}

impl<'de> Deserialize<'de> for Course {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        CourseDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}
