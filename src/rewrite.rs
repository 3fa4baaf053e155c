//! Index rewriting and backup rotation.
//!
//! After the operator confirms, a temporary replacement index is opened
//! immediately (overwriting any stale leftover from a crashed run). Once
//! the moves are done and the retained lines written, the original index is
//! copied to a dated backup, stale backups beyond the retention count are
//! pruned, and the temporary file is renamed over the index. Backup
//! creation and the final swap are the two fatal paths: they abort the run
//! and leave the temp file (and any partial rotation) on disk for manual
//! recovery.

use crate::output::OutputFormatter;
use chrono::Local;
use regex::Regex;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File name of the cache index inside the cache directory.
pub const INDEX_FILE_NAME: &str = "cache.ini";

/// File name of the temporary replacement index.
pub const TEMP_FILE_NAME: &str = "cache.ini.tmp";

/// Prefix of dated backup files; the 14-digit timestamp suffix follows.
const BACKUP_PREFIX: &str = "cache.ini.bak.";

/// Errors raised while rewriting the index file.
#[derive(Debug)]
pub enum RewriteError {
    /// The temporary replacement file could not be opened.
    TempCreate { path: PathBuf, source: io::Error },
    /// A retained line could not be written to the temporary file.
    TempWrite { path: PathBuf, source: io::Error },
    /// The dated backup copy of the index could not be created.
    BackupCreate { path: PathBuf, source: io::Error },
    /// The temporary file could not be renamed over the index.
    IndexSwap { source: io::Error },
}

impl std::fmt::Display for RewriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TempCreate { path, source } => {
                write!(f, "Cannot open {} ({})", path.display(), source)
            }
            Self::TempWrite { path, source } => {
                write!(f, "Cannot write to {} ({})", path.display(), source)
            }
            Self::BackupCreate { path, source } => {
                write!(
                    f,
                    "Couldn't create {} as a backup for {} ({}), to complete the \
                     operations you have to overwrite {} manually with {} (which \
                     is the updated version)",
                    path.display(),
                    INDEX_FILE_NAME,
                    source,
                    INDEX_FILE_NAME,
                    TEMP_FILE_NAME
                )
            }
            Self::IndexSwap { source } => {
                write!(
                    f,
                    "Couldn't overwrite {} (the old version) with {} (the updated \
                     version) ({}), please do it manually",
                    INDEX_FILE_NAME, TEMP_FILE_NAME, source
                )
            }
        }
    }
}

impl std::error::Error for RewriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TempCreate { source, .. }
            | Self::TempWrite { source, .. }
            | Self::BackupCreate { source, .. }
            | Self::IndexSwap { source } => Some(source),
        }
    }
}

/// Rewrites the index file and rotates its dated backups.
pub struct IndexRewriter {
    cache_dir: PathBuf,
    index_path: PathBuf,
    temp_path: PathBuf,
}

impl IndexRewriter {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
            index_path: cache_dir.join(INDEX_FILE_NAME),
            temp_path: cache_dir.join(TEMP_FILE_NAME),
        }
    }

    /// Opens the temporary replacement file, truncating any stale leftover.
    ///
    /// Called right after confirmation, before any move happens, so an
    /// unwritable temp file aborts the run with nothing mutated yet.
    pub fn begin(&self, out: &OutputFormatter) -> Result<File, RewriteError> {
        if self.temp_path.exists() {
            out.warning(&format!("Overwriting existing {TEMP_FILE_NAME}"));
        }
        File::create(&self.temp_path).map_err(|e| RewriteError::TempCreate {
            path: self.temp_path.clone(),
            source: e,
        })
    }

    /// Writes every retained line, in order, to the temporary file.
    pub fn write_retained(&self, temp: &mut File, retained: &[String]) -> Result<(), RewriteError> {
        let write_err = |e| RewriteError::TempWrite {
            path: self.temp_path.clone(),
            source: e,
        };
        for line in retained {
            temp.write_all(line.as_bytes()).map_err(write_err)?;
        }
        temp.flush().map_err(write_err)
    }

    /// Completes the rewrite.
    ///
    /// With at least one successful move: back up the original index, prune
    /// stale backups, swap the temporary file in. With zero moves the
    /// temporary file is simply deleted (a failed delete is a non-fatal,
    /// logged error).
    pub fn finalize(
        &self,
        moved: usize,
        backups_n: i32,
        out: &OutputFormatter,
    ) -> Result<(), RewriteError> {
        if moved == 0 {
            if let Err(e) = fs::remove_file(&self.temp_path) {
                out.error(&format!(
                    "Couldn't delete {} ({})",
                    self.temp_path.display(),
                    e
                ));
            }
            return Ok(());
        }

        let backup_path = self.cache_dir.join(self.backup_name());
        fs::copy(&self.index_path, &backup_path).map_err(|e| RewriteError::BackupCreate {
            path: backup_path.clone(),
            source: e,
        })?;
        out.info(&format!("{INDEX_FILE_NAME} backup successfully created"));

        self.prune_backups(backups_n, out);

        fs::rename(&self.temp_path, &self.index_path)
            .map_err(|e| RewriteError::IndexSwap { source: e })?;
        out.info(&format!("{INDEX_FILE_NAME} correctly updated"));
        Ok(())
    }

    /// Picks the backup file name: the current local time as
    /// `YYYYMMDDHHMMSS`, bumped as a plain integer until the name is free.
    /// Bumped suffixes are not re-padded.
    fn backup_name(&self) -> String {
        let mut suffix = Local::now().format("%Y%m%d%H%M%S").to_string();
        while self.cache_dir.join(format!("{BACKUP_PREFIX}{suffix}")).exists() {
            let value: u64 = suffix.parse().expect("backup suffix is numeric");
            suffix = (value + 1).to_string();
        }
        format!("{BACKUP_PREFIX}{suffix}")
    }

    /// Deletes every backup beyond the `backups_n` most recent, newest
    /// first by 14-digit suffix (lexicographic order on the fixed-width
    /// digits equals numeric order). The freshly created backup is part of
    /// the list, so `backups_n` backups survive in total; zero removes them
    /// all, negative keeps everything. Delete failures are logged and
    /// skipped.
    fn prune_backups(&self, backups_n: i32, out: &OutputFormatter) {
        if backups_n < 0 {
            return;
        }

        let suffix_re =
            Regex::new(r"^cache\.ini\.bak\.([0-9]{14})$").expect("backup pattern is a valid regex");
        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) => {
                out.error(&format!(
                    "Couldn't list {} for backup rotation ({})",
                    self.cache_dir.display(),
                    e
                ));
                return;
            }
        };

        let mut suffixes: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                Some(suffix_re.captures(name)?[1].to_string())
            })
            .collect();
        suffixes.sort_unstable_by(|a, b| b.cmp(a));

        for stale in suffixes.iter().skip(backups_n as usize) {
            let path = self.cache_dir.join(format!("{BACKUP_PREFIX}{stale}"));
            if let Err(e) = fs::remove_file(&path) {
                out.error(&format!(
                    "Couldn't delete obsolete backup: {} ({})",
                    path.display(),
                    e
                ));
            }
        }
    }
}
