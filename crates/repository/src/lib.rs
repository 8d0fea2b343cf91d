//! Repository adapter for gridstore regions
//!
//! This crate exposes a uniform CRUD interface over a region without the
//! caller knowing the region's partitioning or transactional topology:
//! - EntityInformation: externally supplied identity accessor
//! - Wrapper: explicit (entity, key) pair bypassing identity inference
//! - QueryString: generated query text (count, select-all, ordered)
//! - SimpleRegionRepository: the adapter itself

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod query;
pub mod simple;

pub use entity::{EntityInformation, Wrapper};
pub use query::{QueryString, REGION_PLACEHOLDER};
pub use simple::SimpleRegionRepository;
