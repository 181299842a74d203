//! Course store: catalogue, filter engine, and detail hydration.

use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{FetchSlot, displayable, read_lock, write_lock};
use crate::domain::catalogue::{Course, CourseFilter};
use crate::domain::ports::{CatalogueSource, CatalogueSourceError};
use crate::domain::{ClientResult, Error};

const LIST_ERROR: &str = "Erreur lors du chargement des cours";
const DETAIL_ERROR: &str = "Erreur lors du chargement du cours";

/// Read-only view of the catalogue state.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueSnapshot {
    /// Filtered view produced by the latest [`CourseStore::fetch_courses`].
    pub courses: Vec<Course>,
    /// The course detail page currently shown, if any.
    pub current: Option<Course>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct CatalogueState {
    base: Vec<Course>,
    visible: Vec<Course>,
    current: Option<Course>,
    loading: bool,
    error: Option<String>,
}

/// Single-writer service owning the course catalogue.
///
/// Filtering composes over a fresh copy of the base collection on every
/// call; the base is never mutated by a filter and filter results are never
/// cached. Slug lookup hydrates a course's curriculum detail at most once.
pub struct CourseStore<S> {
    source: Arc<S>,
    state: RwLock<CatalogueState>,
    list_slot: FetchSlot,
    current_slot: FetchSlot,
}

impl<S> CourseStore<S>
where
    S: CatalogueSource,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: RwLock::new(CatalogueState::default()),
            list_slot: FetchSlot::default(),
            current_slot: FetchSlot::default(),
        }
    }

    /// Current catalogue snapshot.
    pub fn snapshot(&self) -> CatalogueSnapshot {
        let state = read_lock(&self.state);
        CatalogueSnapshot {
            courses: state.visible.clone(),
            current: state.current.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// The unfiltered base collection, cloned.
    pub fn base(&self) -> Vec<Course> {
        read_lock(&self.state).base.clone()
    }

    /// Fetch the catalogue and store the filtered view.
    ///
    /// Every call re-executes, an empty filter yields the full collection,
    /// and zero matches yield an empty result without error. On failure a
    /// localized message is stored and the previous list is untouched. The
    /// loading flag clears on every exit path.
    pub async fn fetch_courses(&self, filter: &CourseFilter) -> ClientResult<()> {
        let ticket = self.list_slot.ticket();
        {
            let mut state = write_lock(&self.state);
            state.loading = true;
            state.error = None;
        }

        let result = self.source.list_courses().await;

        let mut state = write_lock(&self.state);
        state.loading = false;
        match result {
            Ok(courses) => {
                if !self.list_slot.is_current(ticket) {
                    debug!("stale catalogue fetch discarded");
                    return Ok(());
                }
                let base = merge_existing_detail(courses, &state.base);
                state.visible = base
                    .iter()
                    .filter(|course| filter.matches(course))
                    .cloned()
                    .collect();
                debug!(
                    total = base.len(),
                    visible = state.visible.len(),
                    "catalogue filtered"
                );
                state.base = base;
                Ok(())
            }
            Err(error) => {
                if !self.list_slot.is_current(ticket) {
                    debug!(%error, "stale catalogue failure discarded");
                    return Ok(());
                }
                debug!(%error, "catalogue fetch failed");
                state.error = Some(LIST_ERROR.to_owned());
                Err(map_catalogue_error(error, LIST_ERROR))
            }
        }
    }

    /// Look one course up by exact slug and hydrate its detail once.
    ///
    /// Sets the current course to the match, or to `None` without error
    /// when the slug is unknown. The detail payload is fetched only for a
    /// course that lacks it; an already-present detail is never recomputed
    /// or overwritten.
    pub async fn fetch_course_by_slug(&self, slug: &str) -> ClientResult<()> {
        let ticket = self.current_slot.ticket();
        {
            let mut state = write_lock(&self.state);
            state.loading = true;
            state.error = None;
        }

        let result = self.lookup_and_hydrate(slug, ticket).await;

        let mut state = write_lock(&self.state);
        state.loading = false;
        match result {
            Ok(current) => {
                if !self.current_slot.is_current(ticket) {
                    debug!(slug, "stale course lookup discarded");
                    return Ok(());
                }
                state.current = current;
                Ok(())
            }
            Err(error) => {
                if !self.current_slot.is_current(ticket) {
                    debug!(%error, slug, "stale course lookup failure discarded");
                    return Ok(());
                }
                debug!(%error, slug, "course lookup failed");
                state.error = Some(DETAIL_ERROR.to_owned());
                Err(map_catalogue_error(error, DETAIL_ERROR))
            }
        }
    }

    async fn lookup_and_hydrate(
        &self,
        slug: &str,
        ticket: u64,
    ) -> Result<Option<Course>, CatalogueSourceError> {
        if read_lock(&self.state).base.is_empty() {
            let courses = self.source.list_courses().await?;
            let mut state = write_lock(&self.state);
            // Another path may have populated the base while we awaited.
            if state.base.is_empty() {
                state.base = courses;
            }
        }

        let found = read_lock(&self.state)
            .base
            .iter()
            .find(|course| course.slug() == slug)
            .cloned();
        let Some(course) = found else {
            return Ok(None);
        };
        if course.has_detail() {
            return Ok(Some(course));
        }

        let Some(detail) = self.source.course_detail(slug).await? else {
            return Ok(Some(course));
        };

        let mut state = write_lock(&self.state);
        if !self.current_slot.is_current(ticket) {
            // A newer lookup owns the slot; leave the base untouched too.
            return Ok(Some(course));
        }
        let mut course = course;
        course.attach_detail(detail.clone());
        if let Some(entry) = state
            .base
            .iter_mut()
            .find(|candidate| candidate.slug() == slug)
        {
            entry.attach_detail(detail);
        }
        Ok(Some(course))
    }
}

/// Carry already-hydrated details over to a freshly fetched base list.
fn merge_existing_detail(fresh: Vec<Course>, previous: &[Course]) -> Vec<Course> {
    fresh
        .into_iter()
        .map(|mut course| {
            if !course.has_detail()
                && let Some(detail) = previous
                    .iter()
                    .find(|candidate| candidate.slug() == course.slug())
                    .and_then(|candidate| candidate.detail().cloned())
            {
                course.attach_detail(detail);
            }
            course
        })
        .collect()
}

fn map_catalogue_error(error: CatalogueSourceError, fallback: &str) -> Error {
    match error {
        CatalogueSourceError::Connection { message }
        | CatalogueSourceError::Rejected { message, .. } => {
            Error::unavailable(displayable(message, fallback))
        }
        CatalogueSourceError::Decode { message } => {
            Error::internal(displayable(message, fallback))
        }
    }
}
