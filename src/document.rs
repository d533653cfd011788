//! Defines [`Document`], a published note ready to be templated, and
//! [`IndexEntry`], its projection onto the index page.

/// A published note. Unpublished notes never become a [`Document`]; see
/// [`crate::parser::Parser::parse_document`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// The rendered HTML fragment for the note body.
    pub html: String,

    /// The output file name, relative to the output directory (e.g.,
    /// `2021-04-20_Rust_lifetimes.html`).
    pub link: String,

    /// The title from the file name, or the date if the file name has no
    /// title.
    pub title: String,

    /// The raw `YYYY-MM-DD` prefix of the file name.
    pub date: String,

    /// Whether the note appears on the index page. Unlisted notes are still
    /// rendered and reachable by direct link.
    pub list: bool,

    /// Whether the page footer carries the badge widget.
    pub show_badge: bool,
}

impl Document {
    /// Returns the index entry for this document, or `None` if it is
    /// unlisted.
    pub fn index_entry(&self) -> Option<IndexEntry> {
        match self.list {
            true => Some(IndexEntry {
                link: self.link.clone(),
                title: self.title.clone(),
                date: self.date.clone(),
            }),
            false => None,
        }
    }
}

/// One line on the index page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub link: String,
    pub title: String,
    pub date: String,
}
