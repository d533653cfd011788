//! The library code for the `scribble` static site generator. It turns a
//! directory of dated markdown notes into one HTML page per published note
//! plus an index page listing them newest first.
//!
//! A build ([`crate::build`]) is a single linear pass:
//!
//! 1. Clear the output directory and copy the static assets into it.
//! 2. For each note, in file name order, parse it ([`crate::parser`]). Notes
//!    whose frontmatter doesn't set `publish: true` are skipped. The rest
//!    have their body rewritten ([`crate::rewrite`]), rendered
//!    ([`crate::markdown`]), templated ([`crate::template`]), and written to
//!    disk ([`crate::write`]).
//! 3. Write the index page from the listed notes in reverse order.
//!
//! Notes must be named `YYYY-MM-DD<title>.md` ([`crate::filename`]); a
//! published note with any other name aborts the build.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod deploy;
pub mod document;
pub mod filename;
pub mod markdown;
pub mod parser;
pub mod rewrite;
pub mod template;
pub mod value;
pub mod write;
