//! Anchor-based insertion into raw HTML text.
//!
//! Transforms never mutate a DOM; they splice fragments at fixed anchor
//! points. Style blocks land before `</head>` (falling back to the body
//! close), content blocks before the last `</body>` (falling back to the
//! end of the document). Fragments therefore end up where a browser and
//! the PDF renderer both expect them, even on partial documents.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEAD_CLOSE_RE: Regex = Regex::new(r"(?i)</head\s*>").unwrap();
    static ref BODY_CLOSE_RE: Regex = Regex::new(r"(?i)</body\s*>").unwrap();
}

/// Insert a `<style id="...">` block into the document head.
pub fn insert_style_block(html: &str, id: &str, css: &str) -> String {
    let block = format!("<style id=\"{id}\">\n{css}\n</style>\n");
    if let Some(m) = HEAD_CLOSE_RE.find(html) {
        splice(html, m.start(), &block)
    } else if let Some(m) = BODY_CLOSE_RE.find_iter(html).last() {
        splice(html, m.start(), &block)
    } else {
        format!("{html}{block}")
    }
}

/// Insert a content fragment at the end of the document body.
pub fn insert_content_block(html: &str, fragment: &str) -> String {
    match BODY_CLOSE_RE.find_iter(html).last() {
        Some(m) => splice(html, m.start(), fragment),
        None => format!("{html}{fragment}"),
    }
}

fn splice(html: &str, at: usize, insert: &str) -> String {
    let mut out = String::with_capacity(html.len() + insert.len());
    out.push_str(&html[..at]);
    out.push_str(insert);
    out.push_str(&html[at..]);
    out
}

/// Minimal text escaping for fragments built from prompt-derived strings.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_style_block_lands_before_head_close() {
        let out = insert_style_block("<html><head></head><body></body></html>", "x", "p {}");
        assert_eq!(
            out,
            "<html><head><style id=\"x\">\np {}\n</style>\n</head><body></body></html>"
        );
    }

    #[test]
    fn test_style_block_falls_back_to_body_close() {
        let out = insert_style_block("<body><p>hi</p></body>", "x", "p {}");
        assert!(out.ends_with("</style>\n</body>"));
    }

    #[test]
    fn test_style_block_appends_without_any_anchor() {
        let out = insert_style_block("<p>fragment</p>", "x", "p {}");
        assert!(out.starts_with("<p>fragment</p><style id=\"x\">"));
    }

    #[test]
    fn test_content_block_lands_before_last_body_close() {
        let html = "<body>a</body><body>b</body>";
        let out = insert_content_block(html, "<div>z</div>");
        assert_eq!(out, "<body>a</body><body>b<div>z</div></body>");
    }

    #[test]
    fn test_content_block_appends_without_body() {
        let out = insert_content_block("<p>a</p>", "<div>z</div>");
        assert_eq!(out, "<p>a</p><div>z</div>");
    }

    #[test]
    fn test_case_insensitive_anchors() {
        let out = insert_content_block("<BODY>a</BODY>", "<div>z</div>");
        assert_eq!(out, "<BODY>a<div>z</div></BODY>");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
