//! Store services owning the client-side state slices.
//!
//! Each store is an explicit stateful service with constructor-injected
//! ports: session identity, category taxonomy, course catalogue, and the
//! per-course comment thread. Stores are the sole writers of their slice;
//! views read cloneable snapshots. Asynchronous fetches suspend only at the
//! gateway call and commit through a [`FetchSlot`] ticket so a stale
//! completion never clobbers a newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod categories;
mod comments;
mod courses;
mod session;

pub use categories::{CategorySnapshot, CategoryStore};
pub use comments::{CommentSnapshot, CommentStore};
pub use courses::{CatalogueSnapshot, CourseStore};
pub use session::{SessionSnapshot, SessionStore};

/// Monotonic ticket dispenser guarding one asynchronously written state
/// slot.
///
/// A fetch takes a ticket before suspending; on completion it commits only
/// while its ticket is still the newest. Issuing a new ticket (a newer
/// fetch, or an explicit invalidation such as clearing the comment thread)
/// makes every earlier in-flight completion stale.
#[derive(Debug, Default)]
pub(crate) struct FetchSlot {
    seq: AtomicU64,
}

impl FetchSlot {
    /// Claim the next ticket for this slot.
    pub(crate) fn ticket(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` is still the newest issued for this slot.
    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == ticket
    }

    /// Invalidate all in-flight completions without starting a fetch.
    pub(crate) fn invalidate(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
    }
}

/// Read a state lock, recovering from a poisoned guard.
///
/// Stores never hold a guard across an await point, so a poisoned lock can
/// only come from a panic in a reader; the protected state is still
/// coherent.
pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Write counterpart of [`read_lock`].
pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// A gateway message fit for display, or `fallback` when it is blank.
///
/// Domain errors require a non-empty message; gateways relay backend text
/// verbatim and a faulty backend may answer with an empty body.
pub(crate) fn displayable(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_owned()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the store helpers.

    use super::FetchSlot;

    #[test]
    fn later_ticket_supersedes_earlier_one() {
        let slot = FetchSlot::default();
        let first = slot.ticket();
        let second = slot.ticket();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
    }

    #[test]
    fn invalidate_makes_in_flight_tickets_stale() {
        let slot = FetchSlot::default();
        let ticket = slot.ticket();
        slot.invalidate();
        assert!(!slot.is_current(ticket));
    }

    #[test]
    fn blank_gateway_messages_fall_back() {
        assert_eq!(super::displayable(String::new(), "repli"), "repli");
        assert_eq!(super::displayable("  ".to_owned(), "repli"), "repli");
        assert_eq!(super::displayable("détail".to_owned(), "repli"), "détail");
    }
}
