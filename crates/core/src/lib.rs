//! Core types for gridstore
//!
//! This crate defines the foundational types shared by the region and
//! repository layers:
//! - GridError / GridResult: error taxonomy for every adapter operation
//! - Sort, Order, Direction: sort specification for ordered queries

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod sort;

pub use error::{GridError, GridResult};
pub use sort::{Direction, Order, Sort};
