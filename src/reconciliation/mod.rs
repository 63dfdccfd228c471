//! Stock/price reconciliation: the left join on (article, brand), the
//! matched/unmatched partition and the cross-warehouse unmatched set.

mod join;
mod key;
mod unmatched;

pub use join::{partition, reconcile, MergedRow, MergedTable, Partition};
pub use key::JoinKey;
pub use unmatched::UnmatchedAccumulator;
