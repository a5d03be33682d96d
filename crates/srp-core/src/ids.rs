//! ID prefix constants.
//!
//! IDs are generated in SQL as `{prefix}-{8 hex chars}` (see `srp_db::SrpDb::generate_id`).

/// Doctrine (reference) fit.
pub const PREFIX_DOCTRINE_FIT: &str = "dft";

/// SRP claim.
pub const PREFIX_CLAIM: &str = "clm";

/// All prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_DOCTRINE_FIT, PREFIX_CLAIM];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_unique_and_three_chars() {
        for (i, a) in ALL_PREFIXES.iter().enumerate() {
            assert_eq!(a.len(), 3);
            for b in &ALL_PREFIXES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
