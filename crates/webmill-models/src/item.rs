//! Work items derived from the input link list.

use serde::{Deserialize, Serialize};
use url::Url;

/// Accepted source container extension/subtype.
pub const SOURCE_EXT: &str = "mp4";

/// Output container extension produced by the transcode.
pub const OUTPUT_EXT: &str = "webm";

/// One input URL plus its derived file name and list position.
///
/// The index is the 0-based *line* position in the input list. Blank lines
/// are skipped but still consume an index, so remote keys stay stable when a
/// list with blanks is re-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Source URL as it appeared in the input list.
    pub source_url: String,
    /// 0-based line position in the input list.
    pub index: usize,
    /// File name derived from the URL's final path segment.
    pub file_name: String,
}

impl WorkItem {
    /// Create a work item from a URL and its line position.
    pub fn new(source_url: impl Into<String>, index: usize) -> Self {
        let source_url = source_url.into();
        let file_name = basename(&source_url);
        Self {
            source_url,
            index,
            file_name,
        }
    }

    /// Local file name for the downloaded source, with the source extension
    /// appended when the URL did not carry it.
    pub fn local_file_name(&self) -> String {
        let suffix = format!(".{SOURCE_EXT}");
        if self.file_name.ends_with(&suffix) {
            self.file_name.clone()
        } else {
            format!("{}{}", self.file_name, suffix)
        }
    }

    /// Remote object key for the transcoded artifact: `"{index}.webm"`.
    ///
    /// Deterministic in the list position only, so reordering the input list
    /// changes the keys of every item after the reorder point.
    pub fn remote_key(&self) -> String {
        format!("{}.{}", self.index, OUTPUT_EXT)
    }
}

/// Extract the final path segment of a URL.
///
/// Falls back to splitting the raw string on `/` when the input does not
/// parse as an absolute URL.
fn basename(source_url: &str) -> String {
    if let Ok(url) = Url::parse(source_url) {
        if let Some(segments) = url.path_segments() {
            if let Some(last) = segments.filter(|s| !s.is_empty()).last() {
                return last.to_string();
            }
        }
    }
    source_url
        .rsplit('/')
        .next()
        .unwrap_or(source_url)
        .to_string()
}

/// Parse a newline-separated link list into work items.
///
/// Lines that trim to empty are ignored but keep their line position, so the
/// index of every following item is unaffected by blank lines.
pub fn parse_link_list(text: &str) -> Vec<WorkItem> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| WorkItem::new(line.trim(), index))
        .collect()
}
