//! Text rewrites applied to a note body before it is rendered as markdown:
//!
//! 1. Internal links written as `[[./YYYY-MM-DD<title>.md]]` become anchors
//!    pointing at `/YYYY-MM-DD<title>.md`.
//! 2. Lines consisting solely of a timestamp such as `2024-01-01 10:00 UTC`
//!    become `<h2 class="timestamp">` headings.
//!
//! Anything that doesn't match exactly is left alone.

use crate::filename::FilenameMeta;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static INTERNAL_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\[\[\./(?P<file_name>(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2})(?P<title>[^\]\n]*?)\.md)\]\]",
    )
    .expect("internal link pattern")
});

static TIMESTAMP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?P<stamp>[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2} [0-9A-Za-z_]+)(?P<cr>\r?)$")
        .expect("timestamp pattern")
});

/// Applies the internal link rewrite and then the timestamp rewrite to
/// `body`.
pub fn rewrite(body: &str) -> String {
    let linked = rewrite_internal_links(body);
    TIMESTAMP_LINE
        .replace_all(&linked, r#"<h2 class="timestamp">${stamp}</h2>${cr}"#)
        .into_owned()
}

fn rewrite_internal_links(body: &str) -> Cow<'_, str> {
    INTERNAL_LINK.replace_all(body, |caps: &Captures| {
        let meta = FilenameMeta::from_parts(&caps["date"], &caps["title"]);
        format!(
            r#"<a href="/{}">{}</a>"#,
            &caps["file_name"],
            meta.display_title()
        )
    })
}
