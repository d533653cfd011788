//! Defines [`FilenameMeta`], the routing metadata carried by a note's file
//! name. Notes are named `YYYY-MM-DD<title>.md`: the leading date is required
//! and the title may be empty.

use thiserror::Error;

/// The extension of note source files.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// The extension of rendered pages.
pub const HTML_EXTENSION: &str = ".html";

/// Length of the `YYYY-MM-DD` prefix.
const DATE_LEN: usize = 10;

/// The date and title encoded in a note's file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilenameMeta {
    /// The raw `YYYY-MM-DD` prefix. Only the shape is checked, so
    /// `2024-13-40` is accepted as-is.
    pub date: String,

    /// Everything between the date and the extension, with surrounding
    /// whitespace and leading `-`/`_` separators removed. May be empty.
    pub title: String,
}

impl FilenameMeta {
    /// Parses a file name of the form `YYYY-MM-DD<title>.md`.
    pub fn parse(file_name: &str) -> Result<FilenameMeta, FilenameFormatError> {
        let invalid = || FilenameFormatError(file_name.to_owned());
        let stem = file_name
            .strip_suffix(MARKDOWN_EXTENSION)
            .ok_or_else(invalid)?;
        let date = stem
            .get(..DATE_LEN)
            .filter(|date| is_date(date))
            .ok_or_else(invalid)?;
        Ok(FilenameMeta::from_parts(date, &stem[DATE_LEN..]))
    }

    /// Builds the metadata from an already-matched date and the text that
    /// follows it.
    pub(crate) fn from_parts(date: &str, rest: &str) -> FilenameMeta {
        FilenameMeta {
            date: date.trim().to_owned(),
            title: rest
                .trim()
                .trim_start_matches(|c| c == '-' || c == '_')
                .trim()
                .to_owned(),
        }
    }

    /// The title shown for the note: the title if there is one, otherwise
    /// the date.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.date
        } else {
            &self.title
        }
    }
}

/// Returns the output file name for a source file name: spaces become
/// underscores and the `.md` extension becomes `.html`.
pub fn page_link(file_name: &str) -> String {
    let underscored = file_name.replace(' ', "_");
    match underscored.strip_suffix(MARKDOWN_EXTENSION) {
        Some(stem) => format!("{}{}", stem, HTML_EXTENSION),
        None => format!("{}{}", underscored, HTML_EXTENSION),
    }
}

fn is_date(s: &str) -> bool {
    s.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 => b == b'-',
        _ => b.is_ascii_digit(),
    }) && s.len() == DATE_LEN
}

/// Returned when a note that should be published is not named
/// `YYYY-MM-DD<title>.md`. This aborts the build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("file name `{0}` does not match `YYYY-MM-DD<title>.md`")]
pub struct FilenameFormatError(pub String);
