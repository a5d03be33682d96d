use clap::{Subcommand, ValueEnum};
use srp_core::enums::EntityKind;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum EntityKindArg {
    Corp,
    Alliance,
}

impl From<EntityKindArg> for EntityKind {
    fn from(arg: EntityKindArg) -> Self {
        match arg {
            EntityKindArg::Corp => Self::Corporation,
            EntityKindArg::Alliance => Self::Alliance,
        }
    }
}

/// Lookup commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ResolveCommands {
    /// Item names to type IDs.
    Names {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Type IDs to item names.
    Ids {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Corporation or alliance IDs to names.
    Entities {
        #[arg(long, value_enum)]
        kind: EntityKindArg,
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}
