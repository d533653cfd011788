use pulldown_cmark::{html, Options, Parser};

/// Converts markdown to an HTML fragment. Raw HTML in the input (including
/// the anchors and headings produced by [`crate::rewrite`]) is passed
/// through, and fenced code blocks keep their language hint as a
/// `language-*` class so a client-side highlighter can pick it up.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_common_constructs() {
        let html = to_html("# Title\n\nSome *emphasis* and a [link](https://example.org).\n\n- one\n- two\n");
        assert!(html.contains("<h1>Title</h1>"), "{}", html);
        assert!(html.contains("<em>emphasis</em>"), "{}", html);
        assert!(html.contains(r#"<a href="https://example.org">link</a>"#), "{}", html);
        assert!(html.contains("<li>one</li>"), "{}", html);
    }

    #[test]
    fn test_code_fence_keeps_language() {
        let html = to_html("```rust\nfn main() {}\n```\n");
        assert!(
            html.contains(r#"<pre><code class="language-rust">fn main() {}"#),
            "{}",
            html
        );
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = to_html("<h2 class=\"timestamp\">2024-01-01 10:00 UTC</h2>\n\ntext with <a href=\"/x.md\">x</a>\n");
        assert!(html.contains(r#"<h2 class="timestamp">2024-01-01 10:00 UTC</h2>"#), "{}", html);
        assert!(html.contains(r#"<p>text with <a href="/x.md">x</a></p>"#), "{}", html);
    }
}
