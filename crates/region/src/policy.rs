//! Declared storage policy of a region
//!
//! The policy describes how a region's entries are placed across the
//! grid. The repository layer only discriminates on partitioning; the
//! remaining predicates exist for hosts that wire regions up.

/// Placement/replication mode declared for a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoragePolicy {
    /// Entries live only on the local member
    Local,
    /// Entries are fully replicated to every member
    Replicated,
    /// Fully replicated and written through to disk
    PersistentReplicated,
    /// Entries are sharded across members
    Partitioned,
    /// Sharded across members and written through to disk
    PersistentPartitioned,
}

impl StoragePolicy {
    /// True when entries are distributed (sharded) across members
    pub fn with_partitioning(self) -> bool {
        matches!(
            self,
            StoragePolicy::Partitioned | StoragePolicy::PersistentPartitioned
        )
    }

    /// True when every member holds a full copy of the region
    pub fn with_replication(self) -> bool {
        matches!(
            self,
            StoragePolicy::Replicated | StoragePolicy::PersistentReplicated
        )
    }

    /// True when entries survive member restart
    pub fn with_persistence(self) -> bool {
        matches!(
            self,
            StoragePolicy::PersistentReplicated | StoragePolicy::PersistentPartitioned
        )
    }
}
