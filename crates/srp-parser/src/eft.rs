//! EFT fitting-text parser.
//!
//! ```text
//! [Rifter, Tackle]          header: hull, fit title
//! Damage Control II         block 1: low slots
//!
//! Warp Scrambler II         block 2: mid slots
//!
//! 200mm AutoCannon II x3    block 3: high slots
//!
//! Small Core Defense ...    block 4: rigs
//!
//! Warrior II x5             later blocks (drones, cargo): ignored
//! ```
//!
//! Blocks are separated by blank lines. One blank line ends a block; each
//! further pair of consecutive blank lines stands for an empty block, and a
//! blank line directly under the header stands for an empty low-slot block.
//! Trailing blank lines never create blocks.
//!
//! Item lines are `<name>` (quantity 1) or `<name> x<qty>` with a
//! case-insensitive `x`. Placeholder lines such as `[Empty Low slot]` are
//! skipped. Names are trimmed and counted per block.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use srp_core::enums::SlotCategory;
use srp_core::fitting::Quantity;

use crate::error::ParserError;

/// Item name → summed quantity within one block.
pub type NameCounts = BTreeMap<String, Quantity>;

/// Block order of EFT text after the header.
const BLOCK_ORDER: [SlotCategory; 4] = [
    SlotCategory::Low,
    SlotCategory::Mid,
    SlotCategory::High,
    SlotCategory::Rig,
];

/// Result of parsing one EFT fit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFit {
    pub hull: String,
    pub title: String,
    pub low: NameCounts,
    pub mid: NameCounts,
    pub high: NameCounts,
    pub rig: NameCounts,
}

impl ParsedFit {
    /// Counts for a fitted category. `None` for non-fitted categories.
    #[must_use]
    pub const fn block(&self, slot: SlotCategory) -> Option<&NameCounts> {
        match slot {
            SlotCategory::Low => Some(&self.low),
            SlotCategory::Mid => Some(&self.mid),
            SlotCategory::High => Some(&self.high),
            SlotCategory::Rig => Some(&self.rig),
            SlotCategory::Cargo | SlotCategory::DroneBay | SlotCategory::Other => None,
        }
    }

    const fn block_mut(&mut self, slot: SlotCategory) -> Option<&mut NameCounts> {
        match slot {
            SlotCategory::Low => Some(&mut self.low),
            SlotCategory::Mid => Some(&mut self.mid),
            SlotCategory::High => Some(&mut self.high),
            SlotCategory::Rig => Some(&mut self.rig),
            SlotCategory::Cargo | SlotCategory::DroneBay | SlotCategory::Other => None,
        }
    }

    /// Iterate blocks in EFT order (low, mid, high, rig).
    pub fn blocks(&self) -> impl Iterator<Item = (SlotCategory, &NameCounts)> {
        [
            (SlotCategory::Low, &self.low),
            (SlotCategory::Mid, &self.mid),
            (SlotCategory::High, &self.high),
            (SlotCategory::Rig, &self.rig),
        ]
        .into_iter()
    }

    /// Distinct item names across all four blocks, sorted.
    #[must_use]
    pub fn item_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .blocks()
            .flat_map(|(_, counts)| counts.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Parse EFT text.
///
/// # Errors
///
/// - [`ParserError::HeaderNotFound`] when the first non-blank line is not a
///   `[<hull>, <title>]` header (or there is no non-blank line at all).
/// - [`ParserError::InsufficientBlocks`] when fewer than four blocks follow
///   the header.
pub fn parse_eft(text: &str) -> Result<ParsedFit, ParserError> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let header_idx = lines
        .iter()
        .position(|line| !line.is_empty())
        .ok_or(ParserError::HeaderNotFound)?;
    let (hull, title) = parse_header(lines[header_idx]).ok_or(ParserError::HeaderNotFound)?;

    let blocks = split_blocks(&lines[header_idx + 1..]);
    if blocks.len() < BLOCK_ORDER.len() {
        return Err(ParserError::InsufficientBlocks {
            found: blocks.len(),
        });
    }
    if blocks.len() > BLOCK_ORDER.len() {
        tracing::debug!(
            ignored = blocks.len() - BLOCK_ORDER.len(),
            "eft: ignoring blocks after rigs"
        );
    }

    let mut fit = ParsedFit {
        hull: hull.to_string(),
        title: title.to_string(),
        ..ParsedFit::default()
    };
    for (slot, block) in BLOCK_ORDER.into_iter().zip(blocks) {
        let Some(counts) = fit.block_mut(slot) else {
            continue;
        };
        for line in block {
            if is_placeholder(line) {
                continue;
            }
            let (name, qty) = parse_item_line(line);
            if name.is_empty() || qty == 0 {
                continue;
            }
            *counts.entry(name.to_string()).or_insert(0) += qty;
        }
    }
    Ok(fit)
}

/// Split `[<hull>, <title>]` at the first comma.
fn parse_header(line: &str) -> Option<(&str, &str)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let (hull, title) = inner.split_once(',')?;
    let (hull, title) = (hull.trim(), title.trim());
    if hull.is_empty() || title.is_empty() || hull.contains(']') || title.contains(']') {
        return None;
    }
    Some((hull, title))
}

/// Group trimmed body lines into blocks.
///
/// The body is read as if a blank line preceded it, then cut at every pair
/// of consecutive newlines, so `n` blank lines between items yield
/// `n / 2` block boundaries.
fn split_blocks<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let end = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(0, |idx| idx + 1);
    let body = &lines[..end];
    if body.is_empty() {
        return Vec::new();
    }

    let mut blocks = Vec::new();
    let mut current = Vec::new();
    let mut pending_newline = true;
    for &line in body {
        if line.is_empty() {
            if pending_newline {
                blocks.push(std::mem::take(&mut current));
                pending_newline = false;
            } else {
                pending_newline = true;
            }
        } else {
            current.push(line);
            pending_newline = true;
        }
    }
    blocks.push(current);
    blocks
}

/// `[Empty Low slot]`, `[Empty Rig slot]` and similar.
fn is_placeholder(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']')
}

/// `<name> x<qty>` or `<name>` (quantity 1).
fn parse_item_line(line: &str) -> (&str, Quantity) {
    let line = line.trim();
    if let Some(idx) = line.rfind(char::is_whitespace) {
        let (name, suffix) = line.split_at(idx);
        let suffix = suffix.trim_start();
        let digits = suffix
            .strip_prefix('x')
            .or_else(|| suffix.strip_prefix('X'));
        if let Some(digits) = digits {
            let name = name.trim_end();
            if !name.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
            {
                if let Ok(qty) = digits.parse::<Quantity>() {
                    return (name, qty);
                }
            }
        }
    }
    (line, 1)
}
