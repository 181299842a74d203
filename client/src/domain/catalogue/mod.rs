//! Course catalogue domain types.
//!
//! Courses are validated domain entities; summaries arrive without detail
//! fields, and the detail payload (curriculum plus learning outcomes) is
//! attached exactly once on first slug lookup.

use std::fmt;

mod course;
mod detail;
mod filter;
mod validation;


pub use course::{Course, CourseDraft};
pub use detail::{CourseDetail, Lesson, LessonKind, Section};
pub use filter::{CourseFilter, PriceFilter};

/// Validation errors returned by catalogue entity constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogueValidationError {
    InvalidSlug { field: &'static str },
    EmptyField { field: &'static str },
    NegativeValue { field: &'static str, value: f64 },
    InvalidRating { field: &'static str, rating: f32 },
}

impl fmt::Display for CatalogueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSlug { field } => {
                write!(f, "{field} must be a lowercase hyphenated slug")
            }
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::NegativeValue { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            Self::InvalidRating { field, rating } => {
                write!(f, "{field} must lie within 0.0..=5.0 (got {rating})")
            }
        }
    }
}

impl std::error::Error for CatalogueValidationError {}
