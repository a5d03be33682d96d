//! Repository methods on [`SrpDb`](crate::SrpDb).

pub mod claim;
pub mod doctrine_fit;
pub mod name_cache;

pub use claim::NewClaim;
pub use doctrine_fit::{FitFilter, FitWrite};
