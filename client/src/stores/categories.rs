//! Category store: fetch-once taxonomy cache.

use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{displayable, read_lock, write_lock};
use crate::domain::category::Category;
use crate::domain::ports::{CategorySource, CategorySourceError};
use crate::domain::{ClientResult, Error};

const LOAD_ERROR: &str = "Erreur lors du chargement des catégories";

/// Read-only view of the taxonomy state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySnapshot {
    pub categories: Vec<Category>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct CategoryState {
    categories: Vec<Category>,
    loading: bool,
    error: Option<String>,
}

/// Single-writer service owning the category taxonomy.
///
/// The taxonomy is immutable once fetched: the first non-empty fetch fills
/// the cache and every later call is a no-op with no loading transition and
/// no port call.
pub struct CategoryStore<S> {
    source: Arc<S>,
    state: RwLock<CategoryState>,
}

impl<S> CategoryStore<S>
where
    S: CategorySource,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: RwLock::new(CategoryState::default()),
        }
    }

    /// Current taxonomy snapshot.
    pub fn snapshot(&self) -> CategorySnapshot {
        let state = read_lock(&self.state);
        CategorySnapshot {
            categories: state.categories.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Fetch the taxonomy unless it is already cached.
    ///
    /// On failure a localized message is stored for views, the (empty) list
    /// is left untouched so the next call retries, and the mapped error is
    /// returned to the caller. The loading flag clears on every exit path.
    pub async fn fetch_categories(&self) -> ClientResult<()> {
        {
            let mut state = write_lock(&self.state);
            if !state.categories.is_empty() {
                debug!("category taxonomy already cached");
                return Ok(());
            }
            state.loading = true;
            state.error = None;
        }

        let result = self.source.list_categories().await;

        let mut state = write_lock(&self.state);
        state.loading = false;
        match result {
            Ok(categories) => {
                state.categories = categories;
                Ok(())
            }
            Err(error) => {
                debug!(%error, "category fetch failed");
                state.error = Some(LOAD_ERROR.to_owned());
                Err(map_category_error(error))
            }
        }
    }
}

fn map_category_error(error: CategorySourceError) -> Error {
    match error {
        CategorySourceError::Connection { message }
        | CategorySourceError::Rejected { message, .. } => {
            Error::unavailable(displayable(message, LOAD_ERROR))
        }
        CategorySourceError::Decode { message } => {
            Error::internal(displayable(message, LOAD_ERROR))
        }
    }
}
