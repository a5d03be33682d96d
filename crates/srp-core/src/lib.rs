//! # srp-core
//!
//! Core types shared across the SRP fit-checker crates.
//!
//! - Entity structs for stored doctrine fits and claims
//! - Slot categories, compliance verdicts, and cache entity kinds
//! - The killmail inventory-flag classifier
//! - Module multisets and the four-slot `Fitting`
//! - A typed, partially-optional killmail record
//! - Cached compliance results and fit diffs
//! - ID prefix constants

pub mod compliance;
pub mod entities;
pub mod enums;
pub mod fitting;
pub mod ids;
pub mod killmail;
pub mod slots;
