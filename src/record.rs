//! Index record parsing.
//!
//! The cache index file (`cache.ini`) maps opaque download names to real
//! file names. Each record line has the form
//! `HEX32-DIGITS=realname.ext` followed by a newline, where the hex part is
//! exactly 32 uppercase hex characters and the extension is 1-3 word
//! characters after a dot. Lines are parsed with their line terminator
//! included, so a final record missing its newline fails the grammar and is
//! treated as unrecognized.

use regex::Regex;
use std::sync::OnceLock;

/// Extension carried by every downloaded cache file on disk.
pub const CACHE_EXTENSION: &str = ".uxx";

/// Section header line at the top of the index file.
const SECTION_HEADER: &str = "[Cache]";

/// One parsed record from the index file.
///
/// # Examples
///
/// ```
/// use utcachex::record::{ParsedLine, parse_line};
///
/// let line = "AABBCCDDEEFF00112233445566778899-7=Foo.utx\n";
/// match parse_line(line) {
///     ParsedLine::Entry(entry) => {
///         assert_eq!(entry.cache_name(), "AABBCCDDEEFF00112233445566778899-7.uxx");
///         assert_eq!(entry.real_ext(), ".utx");
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    cache_name: String,
    real_name: String,
    real_ext: String,
}

impl IndexEntry {
    /// The on-disk name of the downloaded file, e.g. `<32 hex>-<n>.uxx`.
    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    /// The real name of the file, without its extension.
    pub fn real_name(&self) -> &str {
        &self.real_name
    }

    /// The real extension, including the leading dot.
    pub fn real_ext(&self) -> &str {
        &self.real_ext
    }

    /// The full real file name (`real_name` + `real_ext`).
    pub fn real_file_name(&self) -> String {
        format!("{}{}", self.real_name, self.real_ext)
    }
}

/// Outcome of parsing one raw index line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// A valid record.
    Entry(IndexEntry),
    /// A blank line or the `[Cache]` section header; dropped from the
    /// rewritten index without a warning.
    Skipped,
    /// Any other line; must be retained verbatim with a warning.
    Unrecognized,
}

/// Record grammar. The real-name group is greedy, so a name containing
/// dot-delimited segments binds the last 1-3-word-character suffix as the
/// extension (`Foo.Bar.utx` -> name `Foo.Bar`, ext `.utx`). That split
/// decides both the destination subdirectory and the final file name, so it
/// must stay exactly as-is.
fn record_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9A-Z]{32}-[0-9]+)=(.+)(\.\w{1,3})\n$")
            .expect("record grammar is a valid regex")
    })
}

/// Parses one raw line of the index file, line terminator included.
pub fn parse_line(line: &str) -> ParsedLine {
    if let Some(caps) = record_regex().captures(line) {
        return ParsedLine::Entry(IndexEntry {
            cache_name: format!("{}{}", &caps[1], CACHE_EXTENSION),
            real_name: caps[2].to_string(),
            real_ext: caps[3].to_string(),
        });
    }

    if line.starts_with('\n') || line.starts_with(SECTION_HEADER) {
        ParsedLine::Skipped
    } else {
        ParsedLine::Unrecognized
    }
}
