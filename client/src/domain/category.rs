//! Category taxonomy entities.
//!
//! The taxonomy is immutable once fetched: the category store caches the
//! first non-empty list and never refetches (see
//! [`crate::stores::CategoryStore`]).

use serde::{Deserialize, Serialize};

use crate::domain::slug::is_valid_slug;

/// Validation errors returned by taxonomy entity constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    /// A slug field was not a lowercase hyphenated identifier.
    #[error("{field} must be a lowercase hyphenated slug")]
    InvalidSlug { field: &'static str },
    /// A required text field was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Input payload for [`Category::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CategoryDraft {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub subcategories: Vec<Subcategory>,
}

/// Top-level category with its ordered subcategories.
///
/// ## Invariants
/// - `slug` is a lowercase hyphenated identifier used for routing lookup.
/// - `name` is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Category {
    id: String,
    name: String,
    slug: String,
    /// Icon glyph rendered next to the category name.
    icon: String,
    subcategories: Vec<Subcategory>,
}

impl Category {
    /// Validate and construct a category record.
    pub fn new(draft: CategoryDraft) -> Result<Self, CategoryValidationError> {
        draft.try_into()
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }
    pub fn icon(&self) -> &str {
        self.icon.as_str()
    }
    pub fn subcategories(&self) -> &[Subcategory] {
        self.subcategories.as_slice()
    }
}

impl TryFrom<CategoryDraft> for Category {
    type Error = CategoryValidationError;

    fn try_from(draft: CategoryDraft) -> Result<Self, Self::Error> {
        let slug = validate_slug(draft.slug, "category.slug")?;
        let name = validate_non_empty(draft.name, "category.name")?;
        Ok(Self {
            id: draft.id,
            name,
            slug,
            icon: draft.icon,
            subcategories: draft.subcategories,
        })
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        CategoryDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

/// Input payload for [`Subcategory::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct SubcategoryDraft {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Second-level taxonomy entry, validated like its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Subcategory {
    id: String,
    name: String,
    slug: String,
}

impl Subcategory {
    /// Validate and construct a subcategory record.
    pub fn new(draft: SubcategoryDraft) -> Result<Self, CategoryValidationError> {
        draft.try_into()
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }
}

impl TryFrom<SubcategoryDraft> for Subcategory {
    type Error = CategoryValidationError;

    fn try_from(draft: SubcategoryDraft) -> Result<Self, Self::Error> {
        let slug = validate_slug(draft.slug, "subcategory.slug")?;
        let name = validate_non_empty(draft.name, "subcategory.name")?;
        Ok(Self {
            id: draft.id,
            name,
            slug,
        })
    }
}

impl<'de> Deserialize<'de> for Subcategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        SubcategoryDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

fn validate_slug(value: String, field: &'static str) -> Result<String, CategoryValidationError> {
    if !is_valid_slug(&value) {
        return Err(CategoryValidationError::InvalidSlug { field });
    }
    Ok(value)
}

fn validate_non_empty(
    value: String,
    field: &'static str,
) -> Result<String, CategoryValidationError> {
    if value.trim().is_empty() {
        return Err(CategoryValidationError::EmptyField { field });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::json;

    use super::{Category, CategoryDraft, CategoryValidationError};

    fn draft(slug: &str, name: &str) -> CategoryDraft {
        CategoryDraft {
            id: "1".to_owned(),
            name: name.to_owned(),
            slug: slug.to_owned(),
            icon: "💻".to_owned(),
            subcategories: Vec::new(),
        }
    }

    #[test]
    fn valid_draft_builds_a_category() {
        let category = Category::new(draft("developpement", "Développement"))
            .expect("valid category draft");
        assert_eq!(category.slug(), "developpement");
        assert_eq!(category.name(), "Développement");
    }

    #[rstest]
    #[case("Developpement")]
    #[case("under_score")]
    #[case("")]
    fn invalid_slug_is_rejected(#[case] slug: &str) {
        let error = Category::new(draft(slug, "Développement"))
            .expect_err("slug should be rejected");
        assert_eq!(
            error,
            CategoryValidationError::InvalidSlug {
                field: "category.slug"
            }
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        let error = Category::new(draft("developpement", "  "))
            .expect_err("name should be rejected");
        assert_eq!(
            error,
            CategoryValidationError::EmptyField {
                field: "category.name"
            }
        );
    }

    #[test]
    fn deserialization_validates_nested_subcategories() {
        let result: Result<Category, _> = serde_json::from_value(json!({
            "id": "1",
            "name": "Développement",
            "slug": "developpement",
            "icon": "💻",
            "subcategories": [
                { "id": "1-1", "name": "Développement Web", "slug": "Not A Slug" }
            ]
        }));
        let message = result.expect_err("invalid nested slug rejected").to_string();
        assert!(message.contains("subcategory.slug"));
    }
}
