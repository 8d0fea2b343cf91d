//! Side-effect-free topology predicates
//!
//! Both predicates read region metadata only; neither touches entries.
//! Missing metadata defaults to the safe answer (not partitioned, no
//! transaction), so the caller's safety-favoring branch is never skipped
//! by accident.

use crate::region::Region;

/// True iff the region's declared storage policy indicates horizontal
/// partitioning across members. Unavailable metadata reads as not
/// partitioned.
pub fn is_partitioned<R: Region>(region: &R) -> bool {
    region
        .storage_policy()
        .map_or(false, |policy| policy.with_partitioning())
}

/// True iff the region's owning session reports a transaction bound to
/// the calling context. A session-less region, or a session without a
/// transaction manager, reads as no transaction.
pub fn is_transaction_present<R: Region>(region: &R) -> bool {
    region
        .owning_session()
        .and_then(|session| session.transaction_manager())
        .map_or(false, |manager| manager.is_active())
}
