//! The Region trait: a named key-value collection
//!
//! This trait is the seam between the repository adapter and the backing
//! store. Implementations own the cluster protocol, query execution and
//! session lifecycle; the adapter only calls through this surface.
//!
//! Thread safety: all methods must be safe to call concurrently from
//! multiple threads (requires Send + Sync). The adapter adds no locking
//! of its own.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use gridstore_core::GridResult;

use crate::policy::StoragePolicy;
use crate::session::CacheSession;

/// Path separator prefixing a region's full path, e.g. `/Orders`
pub const SEPARATOR: &str = "/";

/// Result of executing a query against a region
///
/// The store's query facility returns either entity rows (`SELECT *`) or
/// a single scalar (`SELECT count(*)`). Callers match on the variant they
/// expect; a mismatch is a query error, not a panic.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse<V> {
    /// Materialized entity rows
    Rows(Vec<V>),
    /// Single scalar result of an aggregate query
    Count(u64),
}

/// A named, possibly-partitioned, possibly-transactional key-value
/// collection.
///
/// Keyed removal of an absent key is a no-op. `get_all` never fabricates
/// entries for missing keys. `clear` may fail with
/// `GridError::UnsupportedOperation` on topologies that cannot clear the
/// whole collection atomically.
pub trait Region: Send + Sync {
    /// Key type; serializable as a store key
    type Key: Eq + Hash + Clone;
    /// Entity value type
    type Value: Clone;

    /// Bare region name, e.g. `Orders`
    fn name(&self) -> &str;

    /// Separator-qualified full path, e.g. `/Orders`
    fn full_path(&self) -> &str;

    /// Declared storage policy; `None` when metadata is unavailable
    fn storage_policy(&self) -> Option<StoragePolicy>;

    /// Owning cache session; `None` when the region's host is not
    /// cache-capable
    fn owning_session(&self) -> Option<&dyn CacheSession>;

    /// Single keyed read; absence is `Ok(None)`
    fn get(&self, key: &Self::Key) -> GridResult<Option<Self::Value>>;

    /// Bulk read; keys with no stored value are omitted from the result
    fn get_all(&self, keys: &[Self::Key]) -> GridResult<HashMap<Self::Key, Self::Value>>;

    /// Single keyed upsert
    fn put(&self, key: Self::Key, value: Self::Value) -> GridResult<()>;

    /// Bulk upsert of the given entries
    fn put_all(&self, entries: HashMap<Self::Key, Self::Value>) -> GridResult<()>;

    /// Single keyed removal; removing an absent key is a no-op
    fn remove(&self, key: &Self::Key) -> GridResult<()>;

    /// Bulk removal of the given keys
    fn remove_all(&self, keys: &HashSet<Self::Key>) -> GridResult<()>;

    /// Clear the whole collection
    ///
    /// # Errors
    ///
    /// `GridError::UnsupportedOperation` when the topology cannot clear
    /// atomically; any other error signals a store failure.
    fn clear(&self) -> GridResult<()>;

    /// Snapshot of all currently known keys
    fn key_set(&self) -> GridResult<HashSet<Self::Key>>;

    /// Execute a query in the store's query language
    fn query(&self, oql: &str) -> GridResult<QueryResponse<Self::Value>>;
}
