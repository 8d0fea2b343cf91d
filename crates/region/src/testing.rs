//! Testing utilities for the region layer
//!
//! This module provides an in-memory [`MemoryRegion`] for exercising the
//! repository adapter without a live grid:
//!
//! - configurable storage policy and owning session
//! - a switch that makes `clear()` report unsupported
//! - per-operation call counters for interaction tests
//! - a minimal evaluator for the three query forms the adapter emits
//!   (`SELECT count(*) FROM <path>`, `SELECT * FROM <path>`, and the
//!   latter with an `ORDER BY` clause)
//!
//! Ordering compares `serde_json` projections of the stored values, field
//! by field, which keeps the evaluator independent of the entity type.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value as JsonValue;

use gridstore_core::{GridError, GridResult};

use crate::policy::StoragePolicy;
use crate::region::{QueryResponse, Region, SEPARATOR};
use crate::session::{CacheSession, TransactionManager};

/// Per-operation call counters for interaction tests
#[derive(Debug, Default)]
pub struct OpCounters {
    puts: AtomicUsize,
    put_alls: AtomicUsize,
    gets: AtomicUsize,
    get_alls: AtomicUsize,
    removes: AtomicUsize,
    remove_alls: AtomicUsize,
    clears: AtomicUsize,
    key_sets: AtomicUsize,
    queries: AtomicUsize,
}

impl OpCounters {
    /// Number of `put` calls
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of `put_all` calls
    pub fn put_alls(&self) -> usize {
        self.put_alls.load(Ordering::SeqCst)
    }

    /// Number of `get` calls
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `get_all` calls
    pub fn get_alls(&self) -> usize {
        self.get_alls.load(Ordering::SeqCst)
    }

    /// Number of `remove` calls
    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// Number of `remove_all` calls
    pub fn remove_alls(&self) -> usize {
        self.remove_alls.load(Ordering::SeqCst)
    }

    /// Number of `clear` attempts, supported or not
    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    /// Number of `key_set` snapshots taken
    pub fn key_sets(&self) -> usize {
        self.key_sets.load(Ordering::SeqCst)
    }

    /// Number of queries executed
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

/// Transaction manager stub with a settable active flag
#[derive(Debug)]
pub struct StubTransactionManager {
    active: AtomicBool,
}

impl StubTransactionManager {
    /// Create a manager reporting `active`
    pub fn new(active: bool) -> Self {
        StubTransactionManager {
            active: AtomicBool::new(active),
        }
    }

    /// Flip the active flag
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }
}

impl TransactionManager for StubTransactionManager {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Cache session stub with scope counters and an optional transaction
/// manager
#[derive(Debug)]
pub struct StubSession {
    transactions: Option<StubTransactionManager>,
    scopes_entered: AtomicUsize,
    scopes_released: AtomicUsize,
}

impl StubSession {
    /// Session without a transaction manager
    pub fn plain() -> Self {
        StubSession {
            transactions: None,
            scopes_entered: AtomicUsize::new(0),
            scopes_released: AtomicUsize::new(0),
        }
    }

    /// Session with a transaction manager reporting `active`
    pub fn transactional(active: bool) -> Self {
        StubSession {
            transactions: Some(StubTransactionManager::new(active)),
            ..StubSession::plain()
        }
    }

    /// The stub transaction manager, when present
    pub fn transactions(&self) -> Option<&StubTransactionManager> {
        self.transactions.as_ref()
    }

    /// Number of callback scopes entered
    pub fn scopes_entered(&self) -> usize {
        self.scopes_entered.load(Ordering::SeqCst)
    }

    /// Number of callback scopes released
    pub fn scopes_released(&self) -> usize {
        self.scopes_released.load(Ordering::SeqCst)
    }
}

impl CacheSession for StubSession {
    fn transaction_manager(&self) -> Option<&dyn TransactionManager> {
        self.transactions
            .as_ref()
            .map(|manager| manager as &dyn TransactionManager)
    }

    fn acquire_context(&self) {
        self.scopes_entered.fetch_add(1, Ordering::SeqCst);
    }

    fn release_context(&self) {
        self.scopes_released.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory region for tests
pub struct MemoryRegion<K, V> {
    name: String,
    full_path: String,
    policy: Option<StoragePolicy>,
    session: Option<StubSession>,
    clear_supported: bool,
    data: RwLock<HashMap<K, V>>,
    last_query: RwLock<Option<String>>,
    counters: OpCounters,
}

impl<K, V> MemoryRegion<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Serialize + Send + Sync,
{
    /// Create an empty region named `name`
    pub fn new(name: &str) -> Self {
        MemoryRegion {
            name: name.to_string(),
            full_path: format!("{SEPARATOR}{name}"),
            policy: None,
            session: None,
            clear_supported: true,
            data: RwLock::new(HashMap::new()),
            last_query: RwLock::new(None),
            counters: OpCounters::default(),
        }
    }

    /// Declare a storage policy
    pub fn with_policy(mut self, policy: StoragePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Attach an owning session
    pub fn with_session(mut self, session: StubSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Make `clear()` report `UnsupportedOperation`
    pub fn without_clear(mut self) -> Self {
        self.clear_supported = false;
        self
    }

    /// The attached session stub, when present
    pub fn session(&self) -> Option<&StubSession> {
        self.session.as_ref()
    }

    /// Call counters for interaction assertions
    pub fn counters(&self) -> &OpCounters {
        &self.counters
    }

    /// The most recent query text, if any query ran
    pub fn last_query(&self) -> Option<String> {
        self.last_query.read().clone()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// True when no entries are stored
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Seed entries without bumping any counter
    pub fn seed(&self, entries: impl IntoIterator<Item = (K, V)>) {
        self.data.write().extend(entries);
    }

    fn rows_ordered_by(&self, clause: &str) -> GridResult<Vec<V>> {
        let mut fields = Vec::new();
        for part in clause.split(", ") {
            let (property, keyword) = part
                .rsplit_once(' ')
                .ok_or_else(|| GridError::query(format!("malformed ORDER BY field: {part}")))?;
            let descending = match keyword {
                "ASC" => false,
                "DESC" => true,
                other => {
                    return Err(GridError::query(format!("unknown sort keyword: {other}")));
                }
            };
            fields.push((property.to_string(), descending));
        }

        let mut rows: Vec<(JsonValue, V)> = Vec::new();
        for value in self.data.read().values() {
            rows.push((serde_json::to_value(value)?, value.clone()));
        }
        rows.sort_by(|a, b| compare_projections(&a.0, &b.0, &fields));
        Ok(rows.into_iter().map(|(_, value)| value).collect())
    }
}

fn compare_projections(
    a: &JsonValue,
    b: &JsonValue,
    fields: &[(String, bool)],
) -> CmpOrdering {
    for (property, descending) in fields {
        let ordering = compare_fields(a.get(property), b.get(property));
        let ordering = if *descending {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != CmpOrdering::Equal {
            return ordering;
        }
    }
    CmpOrdering::Equal
}

fn compare_fields(a: Option<&JsonValue>, b: Option<&JsonValue>) -> CmpOrdering {
    match (a, b) {
        (None, None) => CmpOrdering::Equal,
        (None, Some(_)) => CmpOrdering::Less,
        (Some(_), None) => CmpOrdering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
            (JsonValue::Number(x), JsonValue::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(CmpOrdering::Equal),
            (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
            _ => CmpOrdering::Equal,
        },
    }
}

impl<K, V> Region for MemoryRegion<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Serialize + Send + Sync,
{
    type Key = K;
    type Value = V;

    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    fn storage_policy(&self) -> Option<StoragePolicy> {
        self.policy
    }

    fn owning_session(&self) -> Option<&dyn CacheSession> {
        self.session
            .as_ref()
            .map(|session| session as &dyn CacheSession)
    }

    fn get(&self, key: &K) -> GridResult<Option<V>> {
        self.counters.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.data.read().get(key).cloned())
    }

    fn get_all(&self, keys: &[K]) -> GridResult<HashMap<K, V>> {
        self.counters.get_alls.fetch_add(1, Ordering::SeqCst);
        let data = self.data.read();
        let mut found = HashMap::new();
        for key in keys {
            if let Some(value) = data.get(key) {
                found.insert(key.clone(), value.clone());
            }
        }
        Ok(found)
    }

    fn put(&self, key: K, value: V) -> GridResult<()> {
        self.counters.puts.fetch_add(1, Ordering::SeqCst);
        self.data.write().insert(key, value);
        Ok(())
    }

    fn put_all(&self, entries: HashMap<K, V>) -> GridResult<()> {
        self.counters.put_alls.fetch_add(1, Ordering::SeqCst);
        self.data.write().extend(entries);
        Ok(())
    }

    fn remove(&self, key: &K) -> GridResult<()> {
        self.counters.removes.fetch_add(1, Ordering::SeqCst);
        self.data.write().remove(key);
        Ok(())
    }

    fn remove_all(&self, keys: &HashSet<K>) -> GridResult<()> {
        self.counters.remove_alls.fetch_add(1, Ordering::SeqCst);
        let mut data = self.data.write();
        for key in keys {
            data.remove(key);
        }
        Ok(())
    }

    fn clear(&self) -> GridResult<()> {
        self.counters.clears.fetch_add(1, Ordering::SeqCst);
        if !self.clear_supported {
            return Err(GridError::unsupported_operation(format!(
                "clear is not supported on region {}",
                self.full_path
            )));
        }
        self.data.write().clear();
        Ok(())
    }

    fn key_set(&self) -> GridResult<HashSet<K>> {
        self.counters.key_sets.fetch_add(1, Ordering::SeqCst);
        Ok(self.data.read().keys().cloned().collect())
    }

    fn query(&self, oql: &str) -> GridResult<QueryResponse<V>> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        *self.last_query.write() = Some(oql.to_string());

        let count_form = format!("SELECT count(*) FROM {}", self.full_path);
        let select_form = format!("SELECT * FROM {}", self.full_path);

        if oql == count_form {
            return Ok(QueryResponse::Count(self.data.read().len() as u64));
        }
        if oql == select_form {
            return Ok(QueryResponse::Rows(
                self.data.read().values().cloned().collect(),
            ));
        }
        let ordered_prefix = format!("{select_form} ORDER BY ");
        if let Some(clause) = oql.strip_prefix(ordered_prefix.as_str()) {
            return Ok(QueryResponse::Rows(self.rows_ordered_by(clause)?));
        }

        Err(GridError::query(format!("unrecognized query: {oql}")))
    }
}
