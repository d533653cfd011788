use crate::document::{Document, IndexEntry};
use crate::template::{Error as TemplateError, Templates};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

/// The index page's path relative to the output directory.
pub const INDEX_FILE: &str = "index.html";

/// Responsible for templating and writing HTML pages to disk. Existing files
/// are overwritten.
pub struct Writer<'a> {
    /// The compiled page and index templates.
    pub templates: &'a Templates,

    /// The directory in which all pages are written. A document's page lands
    /// at `{output_directory}/{document.link}`.
    pub output_directory: &'a Path,
}

impl Writer<'_> {
    /// Templates a published [`Document`] and writes it to its link path.
    pub fn write_document(&self, document: &Document) -> Result<()> {
        self.write_file(&document.link, &self.templates.page(document)?)
    }

    /// Templates the index page from `entries`, in the order given, and
    /// writes it to [`INDEX_FILE`].
    pub fn write_index(&self, entries: &[IndexEntry]) -> Result<()> {
        self.write_file(INDEX_FILE, &self.templates.index(entries)?)
    }

    fn write_file(&self, relative_path: &str, contents: &str) -> Result<()> {
        let path = self.output_directory.join(relative_path);
        trace!("Writing `{}`", path.display());
        std::fs::write(&path, contents).map_err(|err| Error::Io { path, err })
    }
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug, Error)]
pub enum Error {
    /// An error during templating.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// An error writing the output files.
    #[error("writing `{}`: {}", .path.display(), .err)]
    Io {
        path: PathBuf,
        #[source]
        err: io::Error,
    },
}
