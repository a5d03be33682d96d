//! Parser error types for srp-parser.

/// Errors that can occur while parsing fitting text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    #[error("EFT header not found, expected a first line like: [Ship, Fit Name]")]
    HeaderNotFound,

    #[error("EFT text has {found} item blocks, need 4 for Low/Mid/High/Rigs")]
    InsufficientBlocks { found: usize },
}
