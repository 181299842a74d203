//! Client-side course filter composition.
//!
//! Filtering always runs over a fresh copy of the base catalogue; the store
//! never mutates the collection it filters. All provided predicates compose
//! with logical AND.

use serde::{Deserialize, Serialize};

use super::course::Course;

/// Price constraint for catalogue filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceFilter {
    /// No price constraint.
    #[default]
    Any,
    /// Only courses with a zero price.
    Free,
    /// Only courses with a strictly positive price.
    Paid,
}

impl PriceFilter {
    fn admits(self, course: &Course) -> bool {
        match self {
            Self::Any => true,
            Self::Free => course.is_free(),
            Self::Paid => !course.is_free(),
        }
    }

    /// Whether this constraint admits every course.
    pub fn is_any(&self) -> bool {
        *self == Self::Any
    }
}

/// Composable catalogue filter.
///
/// An empty or absent option places no constraint; a blank `search` string
/// behaves like no search at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CourseFilter {
    /// Case-insensitive substring match against title or description.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Category labels; a course passes when its category is a member.
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Level labels, same membership semantics as `categories`.
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<String>,
    /// Free/paid constraint.
    #[serde(default)]
    #[serde(skip_serializing_if = "PriceFilter::is_any")]
    pub price: PriceFilter,
}

impl CourseFilter {
    /// Whether the filter places no constraint at all.
    pub fn is_unconstrained(&self) -> bool {
        self.effective_search().is_none()
            && self.categories.is_empty()
            && self.levels.is_empty()
            && self.price.is_any()
    }

    /// Whether `course` satisfies every provided predicate.
    pub fn matches(&self, course: &Course) -> bool {
        self.search_admits(course)
            && Self::membership_admits(&self.categories, course.category())
            && Self::membership_admits(&self.levels, course.level())
            && self.price.admits(course)
    }

    fn effective_search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }

    fn search_admits(&self, course: &Course) -> bool {
        let Some(query) = self.effective_search() else {
            return true;
        };
        let query = query.to_lowercase();
        course.title().to_lowercase().contains(&query)
            || course.description().to_lowercase().contains(&query)
    }

    fn membership_admits(members: &[String], label: &str) -> bool {
        members.is_empty() || members.iter().any(|member| member == label)
    }
}
