//! Query text generation
//!
//! Query strings are plain text assembled fresh per call and never
//! cached. Nothing caller-controlled is interpolated: region paths come
//! from the region handle and sort properties from the schema-owned sort
//! specification.

use std::fmt;

use gridstore_core::Sort;

/// Placeholder substituted with a concrete region path by
/// [`QueryString::for_region`]
pub const REGION_PLACEHOLDER: &str = "/RegionPlaceholder";

/// Immutable, generated query text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryString {
    query: String,
}

impl QueryString {
    /// Wrap already-rendered query text
    pub fn new(query: impl Into<String>) -> Self {
        QueryString {
            query: query.into(),
        }
    }

    /// `SELECT count(*) FROM <full_path>`
    pub fn count(full_path: &str) -> Self {
        QueryString::new(format!("SELECT count(*) FROM {full_path}"))
    }

    /// `SELECT * FROM <full_path>`
    pub fn select_all(full_path: &str) -> Self {
        QueryString::new(format!("SELECT * FROM {full_path}"))
    }

    /// Parameterized select-all over the region placeholder
    pub fn select_template() -> Self {
        QueryString::new(format!("SELECT * FROM {REGION_PLACEHOLDER}"))
    }

    /// Substitute the region placeholder with a concrete full path
    pub fn for_region(self, full_path: &str) -> Self {
        QueryString {
            query: self.query.replace(REGION_PLACEHOLDER, full_path),
        }
    }

    /// Append an `ORDER BY` clause; an empty sort leaves the text
    /// unchanged
    pub fn order_by(self, sort: &Sort) -> Self {
        if sort.is_empty() {
            return self;
        }
        let clause = sort
            .orders()
            .iter()
            .map(|order| format!("{} {}", order.property(), order.direction().as_oql()))
            .collect::<Vec<_>>()
            .join(", ");
        QueryString {
            query: format!("{} ORDER BY {}", self.query, clause),
        }
    }

    /// The rendered query text
    pub fn as_str(&self) -> &str {
        &self.query
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}
