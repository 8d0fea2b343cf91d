//! Sort specification for ordered collection queries
//!
//! A `Sort` is an ordered list of `(property, direction)` pairs. Fields
//! apply left to right as tie-breakers when the query layer renders an
//! `ORDER BY` clause.

use std::fmt;

/// Sort direction for a single property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest value first
    Ascending,
    /// Largest value first
    Descending,
}

impl Direction {
    /// Query-language keyword for this direction
    pub fn as_oql(&self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_oql())
    }
}

/// A single property ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    property: String,
    direction: Direction,
}

impl Order {
    /// Create an ordering for `property` in the given direction
    pub fn new(property: impl Into<String>, direction: Direction) -> Self {
        Order {
            property: property.into(),
            direction,
        }
    }

    /// Ascending ordering for `property`
    pub fn asc(property: impl Into<String>) -> Self {
        Order::new(property, Direction::Ascending)
    }

    /// Descending ordering for `property`
    pub fn desc(property: impl Into<String>) -> Self {
        Order::new(property, Direction::Descending)
    }

    /// The property this ordering applies to
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The direction of this ordering
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Ordered list of property orderings, applied left to right
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    /// Create a sort over the given orderings
    pub fn by(orders: impl IntoIterator<Item = Order>) -> Self {
        Sort {
            orders: orders.into_iter().collect(),
        }
    }

    /// Single-property ascending sort
    pub fn asc(property: impl Into<String>) -> Self {
        Sort::by([Order::asc(property)])
    }

    /// Single-property descending sort
    pub fn desc(property: impl Into<String>) -> Self {
        Sort::by([Order::desc(property)])
    }

    /// Append a further tie-breaking ordering
    pub fn and(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    /// The orderings, in application order
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// True when no ordering was requested
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of orderings
    pub fn len(&self) -> usize {
        self.orders.len()
    }
}
