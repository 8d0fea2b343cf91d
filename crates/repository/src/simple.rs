//! Basic repository implementation over a region
//!
//! `SimpleRegionRepository` is a stateless, synchronous facade: it holds
//! the region template and the identity accessor it was constructed with
//! and nothing else. Every operation blocks until the underlying store
//! call completes or fails; store failures propagate unchanged.

use std::collections::HashMap;

use tracing::{debug, trace};

use gridstore_core::{GridError, GridResult, Sort};
use gridstore_region::{
    is_partitioned, is_transaction_present, QueryResponse, Region, RegionTemplate,
};

use crate::entity::{EntityInformation, Wrapper};
use crate::query::QueryString;

/// Basic repository implementation for a region
pub struct SimpleRegionRepository<R, I>
where
    R: Region,
    I: EntityInformation<R::Value, Id = R::Key>,
{
    template: RegionTemplate<R>,
    entity_info: I,
}

impl<R, I> SimpleRegionRepository<R, I>
where
    R: Region,
    I: EntityInformation<R::Value, Id = R::Key>,
{
    /// Create a repository over `template` using `entity_info` for
    /// identity resolution
    pub fn new(template: RegionTemplate<R>, entity_info: I) -> Self {
        SimpleRegionRepository {
            template,
            entity_info,
        }
    }

    fn required_id(&self, entity: &R::Value) -> GridResult<R::Key> {
        self.entity_info
            .id_of(entity)
            .ok_or_else(|| GridError::missing_identity(self.entity_info.entity_name()))
    }

    /// Save one entity under its resolved identity
    ///
    /// Returns the entity unchanged; the store does not mutate or
    /// version the value.
    pub fn save(&self, entity: R::Value) -> GridResult<R::Value> {
        let id = self.required_id(&entity)?;
        self.template.put(id, entity.clone())?;
        Ok(entity)
    }

    /// Save an entity under the wrapper's explicit key, bypassing
    /// identity resolution
    pub fn save_wrapped(&self, wrapper: Wrapper<R::Value, R::Key>) -> GridResult<R::Value> {
        let (entity, key) = wrapper.into_parts();
        self.template.put(key, entity.clone())?;
        Ok(entity)
    }

    /// Save a batch of entities with one bulk write
    ///
    /// The complete key→entity map is collected first (last write wins
    /// for a duplicate key); an entity without a resolvable identity
    /// aborts before any store mutation. Returns the distinct saved
    /// values.
    pub fn save_all(
        &self,
        entities: impl IntoIterator<Item = R::Value>,
    ) -> GridResult<Vec<R::Value>> {
        let mut to_save: HashMap<R::Key, R::Value> = HashMap::new();
        for entity in entities {
            let id = self.required_id(&entity)?;
            to_save.insert(id, entity);
        }

        trace!(
            region = self.template.region().name(),
            entries = to_save.len(),
            "bulk save"
        );

        let saved: Vec<R::Value> = to_save.values().cloned().collect();
        self.template.put_all(to_save)?;
        Ok(saved)
    }

    /// Find one entity by id; absence is `Ok(None)`
    pub fn find_one(&self, id: &R::Key) -> GridResult<Option<R::Value>> {
        self.template.get(id)
    }

    /// True iff an entity is stored under `id`
    pub fn exists(&self, id: &R::Key) -> GridResult<bool> {
        Ok(self.find_one(id)?.is_some())
    }

    /// Find the entities stored under the given ids with one bulk read
    ///
    /// Ids with no stored value are omitted; result order is not
    /// guaranteed to match input order.
    pub fn find_all_by_id(
        &self,
        ids: impl IntoIterator<Item = R::Key>,
    ) -> GridResult<Vec<R::Value>> {
        let keys: Vec<R::Key> = ids.into_iter().collect();
        let found = self.template.get_all(&keys)?;
        Ok(found.into_values().collect())
    }

    /// Number of entities in the region
    pub fn count(&self) -> GridResult<u64> {
        let query = QueryString::count(self.template.region().full_path());
        match self.template.find(query.as_str())? {
            QueryResponse::Count(count) => Ok(count),
            QueryResponse::Rows(_) => Err(GridError::query(format!(
                "expected a scalar result for [{query}]"
            ))),
        }
    }

    /// All entities in the region, materialized as a list
    pub fn find_all(&self) -> GridResult<Vec<R::Value>> {
        let query = QueryString::select_all(self.template.region().full_path());
        self.rows_for(query)
    }

    /// All entities, ordered by `sort` (fields applied left to right)
    pub fn find_all_sorted(&self, sort: &Sort) -> GridResult<Vec<R::Value>> {
        let query = QueryString::select_template()
            .for_region(self.template.region().full_path())
            .order_by(sort);
        self.rows_for(query)
    }

    fn rows_for(&self, query: QueryString) -> GridResult<Vec<R::Value>> {
        match self.template.find(query.as_str())? {
            QueryResponse::Rows(rows) => Ok(rows),
            QueryResponse::Count(_) => Err(GridError::query(format!(
                "expected entity rows for [{query}]"
            ))),
        }
    }

    /// Remove the entity stored under `id`; an absent id is a no-op
    pub fn delete_by_id(&self, id: &R::Key) -> GridResult<()> {
        self.template.remove(id)
    }

    /// Resolve the entity's identity, then delete by id
    pub fn delete(&self, entity: &R::Value) -> GridResult<()> {
        let id = self.required_id(entity)?;
        self.delete_by_id(&id)
    }

    /// Delete entities one by one, failing fast
    ///
    /// Not atomic: a failure partway leaves prior deletions applied and
    /// attempts no rollback.
    pub fn delete_entities<'a>(
        &self,
        entities: impl IntoIterator<Item = &'a R::Value>,
    ) -> GridResult<()>
    where
        R::Value: 'a,
    {
        for entity in entities {
            self.delete(entity)?;
        }
        Ok(())
    }

    /// Remove every currently known key in one bulk call
    ///
    /// Snapshot first: removing while enumerating the live key set is
    /// undefined. A key inserted between snapshot and removal survives;
    /// that race is accepted.
    fn remove_known_keys(&self, region: &R) -> GridResult<()> {
        let keys = region.key_set()?;
        region.remove_all(&keys)
    }

    /// Delete every entity in the region
    ///
    /// A partitioned topology may not clear consistently across members
    /// and an ambient transaction needs each removal individually visible
    /// for rollback, so both take the selective path. Otherwise the
    /// cheaper whole-region clear runs first, falling back to selective
    /// removal only when the store reports it unsupported; every other
    /// clear failure propagates.
    pub fn delete_all(&self) -> GridResult<()> {
        self.template.with_region(|region| {
            if is_partitioned(region) || is_transaction_present(region) {
                debug!(
                    region = region.name(),
                    "delete_all: selective removal (partitioned or transactional)"
                );
                return self.remove_known_keys(region);
            }

            match region.clear() {
                Err(err) if err.is_unsupported_operation() => {
                    debug!(
                        region = region.name(),
                        "delete_all: clear unsupported, falling back to selective removal"
                    );
                    self.remove_known_keys(region)
                }
                other => other,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstore_region::testing::MemoryRegion;
    use gridstore_region::{CacheSession, StoragePolicy};
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct SelfIdInfo;

    impl EntityInformation<u64> for SelfIdInfo {
        type Id = u64;

        fn id_of(&self, entity: &u64) -> Option<u64> {
            Some(*entity)
        }

        fn entity_name(&self) -> &str {
            "U64"
        }
    }

    struct NoIdInfo;

    impl EntityInformation<u64> for NoIdInfo {
        type Id = u64;

        fn id_of(&self, _entity: &u64) -> Option<u64> {
            None
        }

        fn entity_name(&self) -> &str {
            "U64"
        }
    }

    /// Region whose query facility always answers with a fixed shape and
    /// whose clear fails with a non-unsupported storage error.
    struct RiggedRegion {
        count_response: bool,
        key_sets: AtomicUsize,
        remove_alls: AtomicUsize,
    }

    impl RiggedRegion {
        fn answering_counts() -> Self {
            RiggedRegion {
                count_response: true,
                key_sets: AtomicUsize::new(0),
                remove_alls: AtomicUsize::new(0),
            }
        }

        fn answering_rows() -> Self {
            RiggedRegion {
                count_response: false,
                ..RiggedRegion::answering_counts()
            }
        }
    }

    impl Region for RiggedRegion {
        type Key = u64;
        type Value = u64;

        fn name(&self) -> &str {
            "Rigged"
        }

        fn full_path(&self) -> &str {
            "/Rigged"
        }

        fn storage_policy(&self) -> Option<StoragePolicy> {
            Some(StoragePolicy::Replicated)
        }

        fn owning_session(&self) -> Option<&dyn CacheSession> {
            None
        }

        fn get(&self, _key: &u64) -> GridResult<Option<u64>> {
            Ok(None)
        }

        fn get_all(&self, _keys: &[u64]) -> GridResult<HashMap<u64, u64>> {
            Ok(HashMap::new())
        }

        fn put(&self, _key: u64, _value: u64) -> GridResult<()> {
            Ok(())
        }

        fn put_all(&self, _entries: HashMap<u64, u64>) -> GridResult<()> {
            Ok(())
        }

        fn remove(&self, _key: &u64) -> GridResult<()> {
            Ok(())
        }

        fn remove_all(&self, _keys: &HashSet<u64>) -> GridResult<()> {
            self.remove_alls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn clear(&self) -> GridResult<()> {
            Err(GridError::storage("clear failed mid-flight"))
        }

        fn key_set(&self) -> GridResult<HashSet<u64>> {
            self.key_sets.fetch_add(1, Ordering::SeqCst);
            Ok(HashSet::new())
        }

        fn query(&self, _oql: &str) -> GridResult<QueryResponse<u64>> {
            if self.count_response {
                Ok(QueryResponse::Count(0))
            } else {
                Ok(QueryResponse::Rows(Vec::new()))
            }
        }
    }

    fn rigged_repository(
        region: RiggedRegion,
    ) -> (
        Arc<RiggedRegion>,
        SimpleRegionRepository<RiggedRegion, SelfIdInfo>,
    ) {
        let region = Arc::new(region);
        let repository =
            SimpleRegionRepository::new(RegionTemplate::new(Arc::clone(&region)), SelfIdInfo);
        (region, repository)
    }

    #[test]
    fn count_rejects_row_shaped_results() {
        let (_region, repository) = rigged_repository(RiggedRegion::answering_rows());
        let err = repository.count().unwrap_err();
        assert!(matches!(err, GridError::Query(_)));
    }

    #[test]
    fn find_all_rejects_scalar_results() {
        let (_region, repository) = rigged_repository(RiggedRegion::answering_counts());
        assert!(matches!(
            repository.find_all().unwrap_err(),
            GridError::Query(_)
        ));
        assert!(matches!(
            repository.find_all_sorted(&Sort::asc("x")).unwrap_err(),
            GridError::Query(_)
        ));
    }

    #[test]
    fn delete_all_propagates_clear_failures_other_than_unsupported() {
        let (region, repository) = rigged_repository(RiggedRegion::answering_counts());

        let err = repository.delete_all().unwrap_err();
        assert!(matches!(err, GridError::Storage(_)));

        // A storage failure is never downgraded to selective removal.
        assert_eq!(region.key_sets.load(Ordering::SeqCst), 0);
        assert_eq!(region.remove_alls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn save_without_identity_issues_no_writes() {
        let region = Arc::new(MemoryRegion::<u64, u64>::new("NoWrites"));
        let repository =
            SimpleRegionRepository::new(RegionTemplate::new(Arc::clone(&region)), NoIdInfo);

        let err = repository.save(7).unwrap_err();
        assert!(matches!(err, GridError::MissingIdentity { .. }));
        assert_eq!(region.counters().puts(), 0);
        assert!(region.is_empty());
    }

    #[test]
    fn delete_without_identity_issues_no_removals() {
        let region = Arc::new(MemoryRegion::<u64, u64>::new("NoRemovals"));
        region.seed([(7, 7)]);
        let repository =
            SimpleRegionRepository::new(RegionTemplate::new(Arc::clone(&region)), NoIdInfo);

        let err = repository.delete(&7).unwrap_err();
        assert!(matches!(err, GridError::MissingIdentity { .. }));
        assert_eq!(region.counters().removes(), 0);
        assert_eq!(region.len(), 1);
    }
}
