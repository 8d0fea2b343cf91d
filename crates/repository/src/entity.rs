//! Entity identity abstraction
//!
//! Identity resolution is owned by the host application: the adapter
//! consumes whatever `EntityInformation` returns and never generates ids
//! itself. An implementation may allocate fresh ids for entities that
//! lack one, as long as the accessor stays deterministic for stored
//! entities (the returned id is the key the entity was stored under).

use std::hash::Hash;

/// Externally supplied identity accessor for an entity type
pub trait EntityInformation<V>: Send + Sync {
    /// Identity type; comparable and usable as a store key
    type Id: Eq + Hash + Clone;

    /// The entity's identity, or `None` when none can be determined
    fn id_of(&self, entity: &V) -> Option<Self::Id>;

    /// Human-readable entity type name, used in diagnostics
    fn entity_name(&self) -> &str;
}

/// Explicit (entity, key) pair
///
/// Saving a wrapper bypasses identity inference and stores the entity
/// under the wrapper's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapper<V, K> {
    entity: V,
    key: K,
}

impl<V, K> Wrapper<V, K> {
    /// Pair `entity` with an explicit `key`
    pub fn new(entity: V, key: K) -> Self {
        Wrapper { entity, key }
    }

    /// The wrapped entity
    pub fn entity(&self) -> &V {
        &self.entity
    }

    /// The explicit key
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Decompose into `(entity, key)`
    pub fn into_parts(self) -> (V, K) {
        (self.entity, self.key)
    }
}
