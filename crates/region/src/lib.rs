//! Region abstraction for gridstore
//!
//! This crate defines the capability surface the repository adapter
//! consumes:
//! - Region: the named key-value collection (keyed ops, bulk ops, query)
//! - StoragePolicy: declared replication/partitioning mode of a region
//! - CacheSession / TransactionManager: ambient-transaction introspection
//! - RegionTemplate: stateless scoped facade over a shared region handle
//! - topology: side-effect-free partitioning/transaction predicates
//! - testing: in-memory region implementation for tests

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod policy;
pub mod region;
pub mod session;
pub mod template;
pub mod testing;
pub mod topology;

pub use policy::StoragePolicy;
pub use region::{QueryResponse, Region, SEPARATOR};
pub use session::{CacheSession, SessionScope, TransactionManager};
pub use template::RegionTemplate;
pub use topology::{is_partitioned, is_transaction_present};
