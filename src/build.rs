//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: clearing the output directory,
//! copying the static assets, parsing each note ([`crate::parser`]), writing
//! note pages and finally the index page ([`crate::write`]).
//!
//! Notes are processed one at a time in file name order. The first error
//! aborts the build and leaves whatever was already written on disk.

use crate::config::Config;
use crate::parser::{Error as ParseError, Parser};
use crate::template::{Error as TemplateError, Templates};
use crate::write::{Error as WriteError, Writer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// The directory, relative to the output root, that static assets are
/// copied into. Page templates reference the stylesheet beneath it.
pub const STATIC_OUTPUT_DIRECTORY: &str = "static";

/// Counts reported at the end of a successful build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// The number of note pages written (not counting the index page).
    pub written: usize,

    /// The number of notes listed on the index page.
    pub indexed: usize,
}

/// Builds the site from a [`Config`] object.
pub fn build_site(config: &Config) -> Result<BuildSummary> {
    // Compile the templates before touching the output directory.
    let templates = Templates::new(&config.site)?;

    clean_dir(&config.output_directory)?;
    copy_dir(
        &config.static_directory,
        &config.output_directory.join(STATIC_OUTPUT_DIRECTORY),
    )?;

    let parser = Parser::new(&config.notes_directory);
    let writer = Writer {
        templates: &templates,
        output_directory: &config.output_directory,
    };

    let names = parser.document_names()?;
    let width = names.len().to_string().len();
    let mut index = Vec::new();
    let mut summary = BuildSummary::default();
    for (i, name) in names.iter().enumerate() {
        let progress = format!("{:0width$}/{}", i + 1, names.len(), width = width);
        debug!("[{}] {}", progress, name);
        let document = match parser.parse_document(name)? {
            Some(document) => document,
            None => continue,
        };

        writer.write_document(&document)?;
        summary.written += 1;
        if let Some(entry) = document.index_entry() {
            index.push(entry);
        }
    }

    index.reverse();
    writer.write_index(&index)?;
    summary.indexed = index.len();

    info!(
        "{} files generated, {} in index",
        summary.written, summary.indexed
    );
    Ok(summary)
}

/// Removes everything inside `dir`, keeping `dir` itself. Creates `dir` if it
/// doesn't exist.
fn clean_dir(dir: &Path) -> Result<()> {
    let clean_err = |err| Error::Clean {
        path: dir.to_owned(),
        err,
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return fs::create_dir_all(dir).map_err(clean_err);
        }
        Err(e) => return Err(clean_err(e)),
    };

    for result in entries {
        let entry = result.map_err(clean_err)?;
        let path = entry.path();
        let removed = match entry.file_type().map_err(clean_err)?.is_dir() {
            true => fs::remove_dir_all(&path),
            false => fs::remove_file(&path),
        };
        removed.map_err(|err| Error::Clean { path, err })?;
    }
    Ok(())
}

/// Recursively copies the contents of `src` into `dst`.
fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    for result in WalkDir::new(src) {
        let entry = result?;
        let target = match entry.path().strip_prefix(src) {
            Ok(relative) => dst.join(relative),
            Err(_) => continue,
        };
        let copied = match entry.file_type().is_dir() {
            true => fs::create_dir_all(&target),
            false => fs::copy(entry.path(), &target).map(|_| ()),
        };
        copied.map_err(|err| Error::CopyStatic { path: target, err })?;
    }
    Ok(())
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during parsing, writing,
/// cleaning the output directory, compiling templates, and copying static
/// assets.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned for errors while parsing notes, including file names that
    /// don't start with a date.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Returned for errors writing pages to disk.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Returned for errors compiling the templates.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Returned for I/O problems while cleaning the output directory.
    #[error("cleaning `{}`: {}", .path.display(), .err)]
    Clean {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    /// Returned for I/O problems while copying static assets.
    #[error("copying static asset to `{}`: {}", .path.display(), .err)]
    CopyStatic {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    /// Returned when the static directory can't be walked.
    #[error("reading static directory: {0}")]
    WalkDir(#[from] walkdir::Error),
}
