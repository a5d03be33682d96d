//! # srp-fitcheck
//!
//! Doctrine fit compliance for ship-replacement claims.
//!
//! Reference fits are imported from EFT text with names resolved through a
//! persistent [`NameResolutionCache`]. A claim's killmail is reduced to its
//! fitted modules, scored against every active fit for the hull, and the
//! best match is classified and cached on the claim until a fit changes.
//!
//! The pure pieces ([`extract`], [`score`], [`diff`], [`compliance`],
//! [`flags`], [`preview`]) work without storage; [`FitCheckEngine`] ties them
//! to the database and the resolver.

mod claims;
pub mod compliance;
pub mod diff;
pub mod engine;
pub mod error;
pub mod extract;
pub mod flags;
pub mod importer;
pub mod name_cache;
pub mod preview;
pub mod score;

pub use compliance::{FitComparison, Thresholds};
pub use diff::{DiffLine, DiffSide};
pub use engine::FitCheckEngine;
pub use error::FitCheckError;
pub use extract::ExtractedFit;
pub use flags::{KillmailFlags, Standings, killmail_flags};
pub use importer::ImportReport;
pub use name_cache::NameResolutionCache;
pub use preview::PreviewGroup;
pub use score::FitScore;
