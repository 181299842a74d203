//! Domain entities, validation, and ports.
//!
//! Purpose: define the strongly typed records the stores own and the traits
//! the outbound adapters implement. Types are immutable where the model
//! allows it; each type's Rustdoc documents its invariants and serde
//! contract.

pub mod catalogue;
pub mod category;
pub mod comment;
pub mod error;
pub mod ports;
mod slug;
pub mod user;

pub use self::catalogue::{
    CatalogueValidationError, Course, CourseDetail, CourseDraft, CourseFilter, Lesson, LessonKind,
    PriceFilter, Section,
};
pub use self::category::{
    Category, CategoryDraft, CategoryValidationError, Subcategory, SubcategoryDraft,
};
pub use self::comment::{Comment, CommentDraft, CommentValidationError, NewComment};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{Author, User};

/// Convenient store-operation result alias.
pub type ClientResult<T> = Result<T, Error>;
