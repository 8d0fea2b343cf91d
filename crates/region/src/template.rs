//! Scoped facade over a shared region handle
//!
//! `RegionTemplate` is a stateless facade: it holds an `Arc<R>` and
//! nothing else. Keyed operations delegate directly; `with_region` runs a
//! closure under the owning session's callback context so that any
//! ambient transaction visible to the caller is also visible inside the
//! closure.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use gridstore_core::GridResult;

use crate::region::{QueryResponse, Region};
use crate::session::SessionScope;

/// Stateless facade over a shared region handle
pub struct RegionTemplate<R: Region> {
    region: Arc<R>,
}

impl<R: Region> Clone for RegionTemplate<R> {
    fn clone(&self) -> Self {
        RegionTemplate {
            region: Arc::clone(&self.region),
        }
    }
}

impl<R: Region> RegionTemplate<R> {
    /// Create a template over `region`
    pub fn new(region: Arc<R>) -> Self {
        RegionTemplate { region }
    }

    /// The underlying region handle
    pub fn region(&self) -> &R {
        &self.region
    }

    /// Single keyed read
    pub fn get(&self, key: &R::Key) -> GridResult<Option<R::Value>> {
        self.region.get(key)
    }

    /// Bulk read; absent keys are omitted from the result
    pub fn get_all(&self, keys: &[R::Key]) -> GridResult<HashMap<R::Key, R::Value>> {
        self.region.get_all(keys)
    }

    /// Single keyed upsert
    pub fn put(&self, key: R::Key, value: R::Value) -> GridResult<()> {
        self.region.put(key, value)
    }

    /// Bulk upsert
    pub fn put_all(&self, entries: HashMap<R::Key, R::Value>) -> GridResult<()> {
        self.region.put_all(entries)
    }

    /// Single keyed removal; absent keys are a no-op
    pub fn remove(&self, key: &R::Key) -> GridResult<()> {
        self.region.remove(key)
    }

    /// Bulk removal
    pub fn remove_all(&self, keys: &HashSet<R::Key>) -> GridResult<()> {
        self.region.remove_all(keys)
    }

    /// Execute query text against the region's query facility
    pub fn find(&self, oql: &str) -> GridResult<QueryResponse<R::Value>> {
        self.region.query(oql)
    }

    /// Run `f` with the region, inside the owning session's callback
    /// context
    ///
    /// The context is acquired before `f` runs and released when `f`
    /// returns or errors, so interactions with an ambient transaction are
    /// attributed to that transaction by the store.
    pub fn with_region<T>(&self, f: impl FnOnce(&R) -> GridResult<T>) -> GridResult<T> {
        let _scope = SessionScope::acquire(self.region.owning_session());
        f(&self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryRegion, StubSession};
    use gridstore_core::GridError;

    fn region_with_session() -> Arc<MemoryRegion<u64, u64>> {
        Arc::new(MemoryRegion::new("Scoped").with_session(StubSession::plain()))
    }

    #[test]
    fn with_region_scopes_the_callback() {
        let region = region_with_session();
        let template = RegionTemplate::new(Arc::clone(&region));

        let result = template.with_region(|r| {
            // The scope is already held while the callback runs.
            assert_eq!(r.session().unwrap().scopes_entered(), 1);
            assert_eq!(r.session().unwrap().scopes_released(), 0);
            Ok(())
        });

        assert!(result.is_ok());
        let session = region.session().unwrap();
        assert_eq!(session.scopes_entered(), 1);
        assert_eq!(session.scopes_released(), 1);
    }

    #[test]
    fn with_region_releases_scope_on_error() {
        let region = region_with_session();
        let template = RegionTemplate::new(Arc::clone(&region));

        let result: GridResult<()> =
            template.with_region(|_| Err(GridError::storage("injected")));

        assert!(result.is_err());
        let session = region.session().unwrap();
        assert_eq!(session.scopes_entered(), 1);
        assert_eq!(session.scopes_released(), 1);
    }

    #[test]
    fn template_delegates_keyed_operations() {
        let region = Arc::new(MemoryRegion::<u64, u64>::new("Delegate"));
        let template = RegionTemplate::new(Arc::clone(&region));

        template.put(1, 10).unwrap();
        assert_eq!(template.get(&1).unwrap(), Some(10));
        template.remove(&1).unwrap();
        assert_eq!(template.get(&1).unwrap(), None);
    }

    #[test]
    fn clones_share_the_same_region() {
        let region = Arc::new(MemoryRegion::<u64, u64>::new("Shared"));
        let template = RegionTemplate::new(Arc::clone(&region));
        let other = template.clone();

        template.put(7, 70).unwrap();
        assert_eq!(other.get(&7).unwrap(), Some(70));
    }
}
