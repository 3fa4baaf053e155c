//! Command-line surface and run orchestration.
//!
//! Ties the pipeline together: validate the cache and target directories,
//! read the index file, build the move plan, ask for confirmation, open the
//! temporary replacement index, execute the moves, write the retained
//! lines, and finalize with backup rotation and the index swap.

use crate::config::{Config, Overrides};
use crate::executor::execute_moves;
use crate::output::{OutputFormatter, plural_s};
use crate::plan::{MovePlan, build_plan};
use crate::prompt::{Decision, confirm};
use crate::rewrite::{INDEX_FILE_NAME, IndexRewriter, RewriteError};
use clap::Parser;
use colored::*;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Unreal Tournament 2004 cache extraction utility.
#[derive(Debug, Parser)]
#[command(
    name = "utcachex",
    version,
    about = "Moves downloaded UT2004 cache files into the matching game \
             subdirectories, renamed to their real names"
)]
pub struct Cli {
    /// Answer every prompt automatically with yes; beware, this gives no
    /// chance to cancel any operation
    #[arg(long)]
    pub auto: bool,

    /// Keep only the latest N cache.ini backups; 0 deletes all backups and
    /// creates none, -1 keeps every backup (default: 5)
    #[arg(short, long, value_name = "N")]
    pub backups: Option<i32>,

    /// Cache folder holding the downloaded files and cache.ini
    /// (default: ~/.ut2004/Cache)
    #[arg(short, long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Configuration file to read instead of the default lookup
    #[arg(short = 'o', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Target folder containing the Maps, System, Textures... directories
    /// (default: ~/.ut2004)
    #[arg(short, long, value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// Print debug traces
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// The command-line values that layer over the configuration file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            cache_dir: self.cache.clone(),
            target_dir: self.target.clone(),
            backups: self.backups,
            auto_confirm: self.auto,
        }
    }
}

/// Fatal conditions that end the run with a nonzero exit.
#[derive(Debug)]
pub enum RunError {
    /// The cache directory cannot be entered.
    CacheDir { path: PathBuf, source: io::Error },
    /// The target directory does not exist.
    TargetDirMissing { path: PathBuf },
    /// The index file cannot be read.
    IndexOpen { path: PathBuf, source: io::Error },
    /// The confirmation prompt could not be read.
    Prompt(io::Error),
    /// A fatal rewrite/backup failure; artifacts are left for manual
    /// recovery.
    Rewrite(RewriteError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CacheDir { path, source } => {
                write!(f, "Cannot enter {} ({})", path.display(), source)
            }
            Self::TargetDirMissing { path } => {
                write!(
                    f,
                    "Cannot find {} (check the target directory setting)",
                    path.display()
                )
            }
            Self::IndexOpen { path, source } => {
                write!(f, "Cannot open {} ({})", path.display(), source)
            }
            Self::Prompt(source) => {
                write!(f, "Cannot read the answer from standard input ({})", source)
            }
            Self::Rewrite(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CacheDir { source, .. } | Self::IndexOpen { source, .. } | Self::Prompt(source) => {
                Some(source)
            }
            Self::Rewrite(e) => Some(e),
            Self::TargetDirMissing { .. } => None,
        }
    }
}

impl From<RewriteError> for RunError {
    fn from(e: RewriteError) -> Self {
        Self::Rewrite(e)
    }
}

/// Runs the whole parse-validate-move-rewrite pipeline once.
///
/// Returns `Ok(())` both after a completed run and on the two benign early
/// exits (nothing to move, operator declined). Every `Err` maps to a
/// nonzero process exit.
pub fn run(config: &Config, out: &OutputFormatter) -> Result<(), RunError> {
    fs::read_dir(&config.cache_dir).map_err(|e| RunError::CacheDir {
        path: config.cache_dir.clone(),
        source: e,
    })?;

    if !config.target_dir.is_dir() {
        return Err(RunError::TargetDirMissing {
            path: config.target_dir.clone(),
        });
    }

    let index_path = config.cache_dir.join(INDEX_FILE_NAME);
    let index_text = fs::read_to_string(&index_path).map_err(|e| RunError::IndexOpen {
        path: index_path.clone(),
        source: e,
    })?;

    out.header("=== PREVIEW ===");
    let MovePlan {
        items,
        mut retained,
    } = build_plan(&index_text, &config.cache_dir, &config.target_dir, out);

    if items.is_empty() {
        out.info("There are no files to move");
        return Ok(());
    }

    let question = format!(
        "Do you want to move the file{}? [y|n]",
        plural_s(items.len())
    );
    match confirm(&question, config.auto_confirm, out).map_err(RunError::Prompt)? {
        Decision::No => {
            out.info("No changes were made");
            return Ok(());
        }
        Decision::Yes => {}
    }

    // The temp file is opened before any move so that an unwritable temp
    // aborts with the cache still intact.
    let rewriter = IndexRewriter::new(&config.cache_dir);
    let mut temp = rewriter.begin(out)?;

    let outcome = execute_moves(&items, &mut retained, out);

    rewriter.write_retained(&mut temp, &retained)?;
    drop(temp);

    let mut summary = format!("{} file{} moved", outcome.moved, plural_s(outcome.moved));
    if outcome.errors > 0 {
        summary.push_str(&format!(
            " ({} {}{} reported)",
            outcome.errors,
            "ERROR".red().bold(),
            plural_s(outcome.errors)
        ));
    }
    out.info(&summary);

    rewriter.finalize(outcome.moved, config.backups, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = Cli::parse_from([
            "utcachex",
            "--auto",
            "-b",
            "2",
            "-c",
            "/srv/cache",
            "-t",
            "/srv/ut2004",
        ]);
        let overrides = cli.overrides();
        assert!(overrides.auto_confirm);
        assert_eq!(overrides.backups, Some(2));
        assert_eq!(overrides.cache_dir, Some(PathBuf::from("/srv/cache")));
        assert_eq!(overrides.target_dir, Some(PathBuf::from("/srv/ut2004")));
    }

    #[test]
    fn test_overrides_default_to_none() {
        let cli = Cli::parse_from(["utcachex"]);
        let overrides = cli.overrides();
        assert!(!overrides.auto_confirm);
        assert_eq!(overrides.backups, None);
        assert_eq!(overrides.cache_dir, None);
        assert_eq!(overrides.target_dir, None);
        assert!(!cli.verbose);
    }
}
