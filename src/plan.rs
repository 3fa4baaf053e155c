//! Move plan construction.
//!
//! Walks every line of the index file in original order and partitions the
//! non-blank, non-header lines into two sets: entries that can safely be
//! moved this run, and raw lines that must survive verbatim into the
//! rewritten index (failed parse, unrecognized extension, missing source,
//! or destination conflict). No line is duplicated or dropped between the
//! two sets. A `source --> destination` preview line is printed for every
//! planned move.

use crate::category::Category;
use crate::output::OutputFormatter;
use crate::record::{ParsedLine, parse_line};
use crate::rewrite::INDEX_FILE_NAME;
use std::path::{Path, PathBuf};

/// One confirmed candidate move.
#[derive(Debug, Clone)]
pub struct PlanItem {
    /// Cache-side file name, for display.
    pub cache_name: String,
    /// Full path of the source file in the cache directory.
    pub cache_path: PathBuf,
    /// Destination category directory (target root + subdirectory).
    pub dest_dir: PathBuf,
    /// Full destination path (directory + real name + extension).
    pub dest_path: PathBuf,
    /// The original raw line, kept so a failed move can fall back into the
    /// retained set.
    pub raw_line: String,
}

/// The computed set of moves for one run, plus the lines to write back.
#[derive(Debug, Default)]
pub struct MovePlan {
    pub items: Vec<PlanItem>,
    pub retained: Vec<String>,
}

/// Builds the move plan from the full index text.
///
/// `index_text` is split into lines with their terminators included, so
/// retained lines stay byte-identical to the input.
pub fn build_plan(
    index_text: &str,
    cache_dir: &Path,
    target_dir: &Path,
    out: &OutputFormatter,
) -> MovePlan {
    let mut plan = MovePlan::default();

    for line in index_text.split_inclusive('\n') {
        let entry = match parse_line(line) {
            ParsedLine::Entry(entry) => entry,
            ParsedLine::Skipped => continue,
            ParsedLine::Unrecognized => {
                out.warning(&format!(
                    "\"{}\" cannot be recognized, it will be left in {}",
                    line.trim_end(),
                    INDEX_FILE_NAME
                ));
                plan.retained.push(line.to_string());
                continue;
            }
        };

        let category = match Category::from_extension(entry.real_ext()) {
            Some(category) => category,
            None => {
                out.warning(&format!(
                    "{} extension has not been recognized, {} will be left in the cache",
                    entry.real_ext(),
                    entry.cache_name()
                ));
                plan.retained.push(line.to_string());
                continue;
            }
        };

        let cache_path = cache_dir.join(entry.cache_name());
        if !cache_path.is_file() {
            out.warning(&format!(
                "{} does not exist in the cache, its line will be left in {}, \
                 but you should probably delete it manually",
                entry.cache_name(),
                INDEX_FILE_NAME
            ));
            plan.retained.push(line.to_string());
            continue;
        }

        let dest_dir = target_dir.join(category.dir_name());
        let dest_path = dest_dir.join(entry.real_file_name());
        if dest_path.is_file() {
            out.warning(&format!(
                "{} already exists, {} will be left in the cache",
                dest_path.display(),
                entry.cache_name()
            ));
            plan.retained.push(line.to_string());
            continue;
        }

        out.preview(entry.cache_name(), &dest_path);
        plan.items.push(PlanItem {
            cache_name: entry.cache_name().to_string(),
            cache_path,
            dest_dir,
            dest_path,
            raw_line: line.to_string(),
        });
    }

    plan
}
