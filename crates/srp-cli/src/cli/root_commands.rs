use clap::Subcommand;

use crate::cli::subcommands::{ClaimCommands, FitCommands, ResolveCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Doctrine fits.
    Fit {
        #[command(subcommand)]
        action: FitCommands,
    },
    /// SRP claims and their fit compliance.
    Claim {
        #[command(subcommand)]
        action: ClaimCommands,
    },
    /// Name and ID lookups through the local cache.
    Resolve {
        #[command(subcommand)]
        action: ResolveCommands,
    },
}
