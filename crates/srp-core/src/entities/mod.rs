//! Entity structs for stored SRP objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `srp-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod claim;
mod doctrine_fit;

pub use claim::Claim;
pub use doctrine_fit::{ReferenceFit, ReferenceFitItem};
