use clap::Subcommand;

/// Doctrine fit commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FitCommands {
    /// Import a fit from EFT text (`-` reads stdin).
    Import {
        file: String,
        /// Replace this fit instead of creating a new one.
        #[arg(long)]
        overwrite: Option<String>,
        /// Recorded as the fit's last editor.
        #[arg(long)]
        actor: Option<String>,
    },
    /// List fits.
    List {
        /// Only fits for this hull type ID.
        #[arg(long)]
        ship: Option<i64>,
        /// Include inactive fits.
        #[arg(long)]
        all: bool,
    },
    /// Show a fit with its items.
    Get { id: String },
    /// Make a fit a scoring candidate again.
    Activate {
        id: String,
        #[arg(long)]
        actor: Option<String>,
    },
    /// Stop scoring claims against a fit.
    Deactivate {
        id: String,
        #[arg(long)]
        actor: Option<String>,
    },
    /// Delete a fit.
    Delete { id: String },
}
