use clap::{ArgGroup, Subcommand};

/// Claim commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ClaimCommands {
    /// Register a claim from a killmail link or a killmail JSON file.
    #[command(group(ArgGroup::new("source").required(true).args(["link", "file"])))]
    Add {
        /// Killmail link containing `/killmails/<id>/<hash>`.
        #[arg(long)]
        link: Option<String>,
        /// Killmail JSON in ESI shape (`-` reads stdin).
        #[arg(long)]
        file: Option<String>,
    },
    /// Show a claim with attacker flags.
    Get { id: String },
    /// Fit compliance, recomputed only when stale.
    Check { id: String },
    /// Recompute fit compliance.
    Rerun { id: String },
    /// Score a claim against one fit (default: the selected fit).
    Compare {
        id: String,
        #[arg(long)]
        fit: Option<String>,
    },
    /// Record the reviewer's chosen fit.
    Select {
        id: String,
        #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
        fit: Option<String>,
        /// Clear the selection.
        #[arg(long)]
        clear: bool,
    },
    /// Victim items grouped by slot.
    Preview { id: String },
}
