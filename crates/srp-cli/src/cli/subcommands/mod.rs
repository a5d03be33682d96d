mod claim;
mod fit;
mod resolve;

pub use claim::ClaimCommands;
pub use fit::FitCommands;
pub use resolve::{EntityKindArg, ResolveCommands};
