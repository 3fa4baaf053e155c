//! utcachex - Unreal Tournament 2004 cache extraction utility
//!
//! Relocates downloaded cache files from the game's Cache directory into
//! the category subdirectories (Animations, Maps, Music, Sounds,
//! StaticMeshes, System, Textures), renaming them to their real names as
//! recorded in the cache index file, then rewrites the index and rotates
//! dated backups of it.

pub mod category;
pub mod cli;
pub mod config;
pub mod executor;
pub mod output;
pub mod plan;
pub mod prompt;
pub mod record;
pub mod rewrite;

pub use category::Category;
pub use cli::{Cli, RunError, run};
pub use config::{Config, ConfigError, FileConfig, Overrides};
pub use executor::MoveOutcome;
pub use output::OutputFormatter;
pub use plan::{MovePlan, PlanItem};
pub use record::{IndexEntry, ParsedLine};
pub use rewrite::{IndexRewriter, RewriteError};
