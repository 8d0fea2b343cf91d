//! Gridstore - repository adapter over partitioned, transactional regions
//!
//! Gridstore exposes a uniform CRUD repository over a named key-value
//! collection ("region") without the caller knowing the region's
//! partitioning or transactional topology. Full-collection deletion picks
//! its strategy at call time: partitioned or transactional regions are
//! cleared by bulk key removal, everything else tries the whole-region
//! clear first and falls back only when the store reports it unsupported.
//!
//! # Quick Start
//!
//! ```ignore
//! use gridstore::{RegionTemplate, SimpleRegionRepository};
//! use std::sync::Arc;
//!
//! let region = Arc::new(host.open_region("Orders")?);
//! let repository = SimpleRegionRepository::new(RegionTemplate::new(region), OrderInfo);
//!
//! let order = repository.save(order)?;
//! let found = repository.find_one(&order.id)?;
//! repository.delete_all()?;
//! ```
//!
//! # Architecture
//!
//! The store engine stays external: hosts implement the
//! [`Region`] trait (and optionally [`CacheSession`]) and hand the
//! adapter a shared handle. The adapter itself is a stateless,
//! synchronous facade with no cache and no locking of its own.

// Re-export the public API from the member crates
pub use gridstore_core::*;
pub use gridstore_region::*;
pub use gridstore_repository::*;
