//! Defines the [`Parser`] and [`Error`] types along with the logic for
//! turning note source files into [`Document`]s. A note is parsed in four
//! steps:
//!
//! 1. Split the YAML frontmatter from the body.
//! 2. Stop if the frontmatter doesn't set `publish: true`. This is the
//!    ordinary draft path, not an error.
//! 3. Read the date and title from the file name ([`FilenameMeta`]).
//! 4. Rewrite the body ([`crate::rewrite`]) and render it to HTML
//!    ([`crate::markdown`]).

use std::{
    fs::{read, read_dir},
    io,
    path::{Path, PathBuf},
};

use serde_yaml::Value;
use thiserror::Error;
use tracing::warn;

use crate::{
    document::Document,
    filename::{page_link, FilenameFormatError, FilenameMeta},
    markdown,
    rewrite::rewrite,
};

/// Parses [`Document`]s from the files in a notes directory.
pub struct Parser<'a> {
    /// The directory holding the note source files.
    source_directory: &'a Path,
}

impl<'a> Parser<'a> {
    pub fn new(source_directory: &'a Path) -> Parser<'a> {
        Parser { source_directory }
    }

    /// Lists the file names of the notes directory in lexicographic order.
    /// Subdirectories and dot-files are skipped, as are names that aren't
    /// valid UTF-8.
    pub fn document_names(&self) -> Result<Vec<String>> {
        let io_err = |err| Error::Io {
            path: self.source_directory.to_owned(),
            err,
        };

        let mut names = Vec::new();
        for result in read_dir(self.source_directory).map_err(io_err)? {
            let entry = result.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if name.starts_with('.') => {}
                Ok(name) => names.push(name),
                Err(name) => warn!("Skipping non UTF-8 file name {:?}", name),
            }
        }

        names.sort();
        Ok(names)
    }

    /// Reads and parses the note `file_name` from the source directory.
    /// Returns `Ok(None)` for notes that aren't published. Invalid UTF-8 is
    /// decoded lossily, so stray binary files are skipped like any other
    /// file without frontmatter.
    pub fn parse_document(&self, file_name: &str) -> Result<Option<Document>> {
        let path = self.source_directory.join(file_name);
        let bytes = read(&path).map_err(|err| Error::Io { path, err })?;
        parse_source(file_name, &String::from_utf8_lossy(&bytes))
    }
}

/// Parses a note from its file name and contents. See the module
/// documentation for the steps involved.
pub fn parse_source(file_name: &str, contents: &str) -> Result<Option<Document>> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let (yaml, body) = match frontmatter_indices(contents) {
        None => ("", contents),
        Some(Ok((yaml_start, yaml_stop, body_start))) => {
            (&contents[yaml_start..yaml_stop], &contents[body_start..])
        }
        Some(Err(())) => {
            return Err(Error::FrontmatterMissingEndFence {
                file_name: file_name.to_owned(),
            })
        }
    };

    let frontmatter = Frontmatter::from_yaml(yaml).map_err(|err| Error::DeserializeYaml {
        file_name: file_name.to_owned(),
        err,
    })?;
    if !frontmatter.publish {
        return Ok(None);
    }

    let meta = FilenameMeta::parse(file_name)?;
    Ok(Some(Document {
        html: markdown::to_html(&rewrite(body)),
        link: page_link(file_name),
        title: meta.display_title().to_owned(),
        date: meta.date,
        list: !frontmatter.unlisted,
        show_badge: frontmatter.rc,
    }))
}

const FENCE: &str = "---";

/// Finds the `(yaml_start, yaml_stop, body_start)` offsets of the
/// frontmatter block. The block opens with a `---` first line and closes at
/// the next line that is exactly `---`. Returns `None` if the input doesn't
/// open with a fence and `Some(Err(()))` if the closing fence is missing.
fn frontmatter_indices(input: &str) -> Option<std::result::Result<(usize, usize, usize), ()>> {
    let first_line_end = input.find('\n').unwrap_or(input.len());
    if input[..first_line_end].trim_end() != FENCE {
        return None;
    }

    let yaml_start = (first_line_end + 1).min(input.len());
    let mut line_start = yaml_start;
    while line_start < input.len() {
        let line_end = input[line_start..]
            .find('\n')
            .map_or(input.len(), |i| line_start + i);
        if input[line_start..line_end].trim_end() == FENCE {
            return Some(Ok((
                yaml_start,
                line_start,
                (line_end + 1).min(input.len()),
            )));
        }
        line_start = line_end + 1;
    }
    Some(Err(()))
}

/// The frontmatter flags that drive publishing. A flag is set only by the
/// YAML boolean `true`; strings like `"yes"` or numbers leave it unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Frontmatter {
    /// Whether the note is rendered at all.
    publish: bool,

    /// Whether the note is left off the index page.
    unlisted: bool,

    /// Whether the page shows the badge widget.
    rc: bool,
}

impl Frontmatter {
    fn from_yaml(yaml: &str) -> serde_yaml::Result<Frontmatter> {
        if yaml.trim().is_empty() {
            return Ok(Frontmatter::default());
        }

        let value: Value = serde_yaml::from_str(yaml)?;
        let flag = |key: &str| value.get(key).and_then(Value::as_bool).unwrap_or(false);
        Ok(Frontmatter {
            publish: flag("publish"),
            unlisted: flag("unlisted"),
            rc: flag("rc"),
        })
    }
}

/// Represents the result of a [`Parser`] operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a note.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when a note opens a frontmatter block with `---` but never
    /// closes it.
    #[error("`{file_name}`: frontmatter is missing its closing `---`")]
    FrontmatterMissingEndFence { file_name: String },

    /// Returned when the frontmatter isn't valid YAML.
    #[error("`{file_name}`: parsing frontmatter: {err}")]
    DeserializeYaml {
        file_name: String,
        #[source]
        err: serde_yaml::Error,
    },

    /// Returned when a published note's file name doesn't start with a
    /// `YYYY-MM-DD` date.
    #[error(transparent)]
    FilenameFormat(#[from] FilenameFormatError),

    /// Returned for I/O errors listing the notes directory or reading a note.
    #[error("reading `{}`: {}", .path.display(), .err)]
    Io {
        path: PathBuf,
        #[source]
        err: io::Error,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    fn published(file_name: &str, contents: &str) -> Document {
        match parse_source(file_name, contents) {
            Ok(Some(document)) => document,
            other => panic!("wanted a published document, got {:?}", other),
        }
    }

    #[test]
    fn test_unpublished_is_skipped() -> Result<()> {
        for contents in [
            "---\npublish: false\n---\nbody",
            "---\ntitle: draft\n---\nbody",
            "---\n---\nbody",
            "no frontmatter at all",
            "",
            "---\npublish: \"true\"\n---\nbody",
            "---\npublish: 1\n---\nbody",
        ] {
            assert_eq!(None, parse_source("2024-01-01 x.md", contents)?, "{:?}", contents);
        }
        Ok(())
    }

    #[test]
    fn test_unpublished_skips_filename_check() -> Result<()> {
        assert_eq!(None, parse_source("README.md", "# readme")?);
        assert_eq!(None, parse_source("notes.txt", "---\npublish: false\n---\n")?);
        Ok(())
    }

    #[test]
    fn test_published_document() {
        let document = published(
            "2021-04-20 Rust lifetimes.md",
            "---\npublish: true\n---\n# Heading\n\nBody text.\n",
        );
        assert_eq!("2021-04-20_Rust_lifetimes.html", document.link);
        assert_eq!("2021-04-20", document.date);
        assert_eq!("Rust lifetimes", document.title);
        assert!(document.list);
        assert!(!document.show_badge);
        assert_eq!("<h1>Heading</h1>\n<p>Body text.</p>\n", document.html);
    }

    #[test]
    fn test_untitled_document_uses_date() {
        let document = published("2024-01-01.md", "---\npublish: true\n---\nhi\n");
        assert_eq!("2024-01-01", document.title);
        assert_eq!("2024-01-01.html", document.link);
    }

    #[test]
    fn test_flags() {
        let document = published(
            "2024-01-01 x.md",
            "---\npublish: true\nunlisted: true\nrc: true\n---\n",
        );
        assert!(!document.list);
        assert!(document.show_badge);
    }

    #[test]
    fn test_body_is_rewritten() {
        let document = published(
            "2024-01-02 x.md",
            "---\npublish: true\n---\nsee [[./2024-01-01-hello.md]]\n\n2024-01-01 10:00 UTC\n",
        );
        assert!(
            document.html.contains(r#"<a href="/2024-01-01-hello.md">hello</a>"#),
            "{}",
            document.html
        );
        assert!(
            document.html.contains(r#"<h2 class="timestamp">2024-01-01 10:00 UTC</h2>"#),
            "{}",
            document.html
        );
    }

    #[test]
    fn test_published_bad_filename() {
        match parse_source("hello.md", "---\npublish: true\n---\nhi") {
            Err(Error::FilenameFormat(FilenameFormatError(name))) => assert_eq!("hello.md", name),
            other => panic!("wanted FilenameFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_end_fence() {
        match parse_source("2024-01-01.md", "---\npublish: true\nbody") {
            Err(Error::FrontmatterMissingEndFence { file_name }) => {
                assert_eq!("2024-01-01.md", file_name)
            }
            other => panic!("wanted FrontmatterMissingEndFence, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            parse_source("2024-01-01.md", "---\npublish: [true\n---\n"),
            Err(Error::DeserializeYaml { .. })
        ));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let document = published("2024-01-01 x.md", "\u{feff}---\npublish: true\n---\nhi\n");
        assert_eq!("<p>hi</p>\n", document.html);
    }

    #[test]
    fn test_binary_file_is_skipped() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("diagram.png"),
            [0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe, 0x00],
        )
        .unwrap();
        assert_eq!(None, Parser::new(dir.path()).parse_document("diagram.png")?);
        Ok(())
    }

    #[test]
    fn test_frontmatter_indices() {
        let input = "---\npublish: true\n---\nbody\n---\n";
        let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input).unwrap().unwrap();
        assert_eq!("publish: true\n", &input[yaml_start..yaml_stop]);
        assert_eq!("body\n---\n", &input[body_start..]);
    }

    #[test]
    fn test_frontmatter_indices_crlf() {
        let input = "---\r\npublish: true\r\n---\r\nbody";
        let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input).unwrap().unwrap();
        assert_eq!("publish: true\r\n", &input[yaml_start..yaml_stop]);
        assert_eq!("body", &input[body_start..]);
    }

    #[test]
    fn test_document_names() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2024-01-02 b.md", "2024-01-01 a.md", ".DS_Store"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("attachments")).unwrap();

        assert_eq!(
            vec![String::from("2024-01-01 a.md"), String::from("2024-01-02 b.md")],
            Parser::new(dir.path()).document_names()?
        );
        Ok(())
    }
}
