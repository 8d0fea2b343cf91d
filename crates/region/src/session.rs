//! Cache session and ambient-transaction introspection
//!
//! A region is owned by a cache session. When the session runs an
//! ambient transaction, every mutation issued inside a scoped region
//! callback is attributed to that transaction by the store itself; the
//! adapter never begins, commits or rolls back anything. It only
//! observes whether a transaction is bound to the calling context.

/// Transaction manager of a cache session
pub trait TransactionManager: Send + Sync {
    /// True when a transaction is bound to the calling context
    fn is_active(&self) -> bool;
}

/// The cache session owning one or more regions
///
/// `acquire_context` / `release_context` bracket a scoped region
/// callback. Sessions with no ambient context keep the default no-ops.
pub trait CacheSession: Send + Sync {
    /// Transaction manager, when the session is transaction-capable
    fn transaction_manager(&self) -> Option<&dyn TransactionManager>;

    /// Called when a scoped region callback begins
    fn acquire_context(&self) {}

    /// Called when a scoped region callback ends, on every exit path
    fn release_context(&self) {}
}

/// RAII guard for a session's callback context
///
/// Acquired on entry to `RegionTemplate::with_region`; `Drop` releases
/// the context whether the callback returns, errors or panics.
pub struct SessionScope<'a> {
    session: Option<&'a dyn CacheSession>,
}

impl<'a> SessionScope<'a> {
    /// Acquire the context of `session`, if there is one
    pub fn acquire(session: Option<&'a dyn CacheSession>) -> Self {
        if let Some(session) = session {
            session.acquire_context();
        }
        SessionScope { session }
    }
}

impl Drop for SessionScope<'_> {
    fn drop(&mut self) {
        if let Some(session) = self.session {
            session.release_context();
        }
    }
}
