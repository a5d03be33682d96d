//! # srp-parser
//!
//! Parses EFT fitting text (the format EVE's fitting window and most
//! third-party tools export) into a hull name, a fit title, and per-slot
//! item-name counts.
//!
//! ```
//! use srp_parser::parse_eft;
//!
//! let text = "[Rifter, Tackle]\nDamage Control II\n\nWarp Scrambler II\n\n\
//!             200mm AutoCannon II x3\n\nSmall Ancillary Current Router I\n";
//! let fit = parse_eft(text).unwrap();
//! assert_eq!(fit.hull, "Rifter");
//! assert_eq!(fit.high.get("200mm AutoCannon II"), Some(&3));
//! ```

pub mod eft;
pub mod error;

pub use eft::{NameCounts, ParsedFit, parse_eft};
pub use error::ParserError;
