//! Non-validating HTML tag scanner.
//!
//! Yields every element tag in source order with its attributes parsed
//! quote-aware, so downstream checks are robust to attribute ordering,
//! quoting style, and whitespace that plain substring search would miss.
//! This is deliberately not a DOM: no nesting resolution, no entity
//! decoding, no error recovery beyond skipping malformed stretches.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One attribute: name, optional (possibly quoted) value.
    static ref ATTR_RE: Regex =
        Regex::new(r#"([A-Za-z_][A-Za-z0-9_:.-]*)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s"'>]+))?"#)
            .unwrap();
}

/// A single parsed attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    /// Attribute name, lowercased.
    pub name: String,
    /// Unquoted value; `None` for bare boolean attributes.
    pub value: Option<String>,
    /// Exact source text of the attribute, quotes included.
    pub raw: String,
}

/// One tag occurrence in the source text.
#[derive(Debug, Clone)]
pub struct Tag<'a> {
    /// Element name, lowercased.
    pub name: String,
    pub attrs: Vec<Attr>,
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset one past the closing `>`.
    pub end: usize,
    /// Full tag source, angle brackets included.
    pub raw: &'a str,
    /// True for `</name>` tags.
    pub closing: bool,
    /// True for `<name ... />` tags.
    pub self_closing: bool,
}

impl Tag<'_> {
    /// Value of the named attribute, if present with a value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.value.as_deref())
    }
}

/// Scan every tag in the document. Comments and doctype declarations are
/// skipped; stray `<` characters that do not open a tag are passed over.
pub fn scan_tags(html: &str) -> Vec<Tag<'_>> {
    let bytes = html.as_bytes();
    let mut tags = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let Some(offset) = html[i..].find('<') else {
            break;
        };
        let start = i + offset;
        let rest = &html[start..];

        if rest.starts_with("<!--") {
            match rest.find("-->") {
                Some(end) => {
                    i = start + end + 3;
                    continue;
                }
                None => break, // unterminated comment swallows the tail
            }
        }

        if rest.starts_with("<!") {
            match rest.find('>') {
                Some(end) => {
                    i = start + end + 1;
                    continue;
                }
                None => break,
            }
        }

        match parse_tag(html, start) {
            Some(tag) => {
                i = tag.end;
                tags.push(tag);
            }
            None => i = start + 1,
        }
    }

    tags
}

/// Parse one tag starting at the `<` at `start`. Returns `None` when the
/// text at `start` is not actually a tag.
fn parse_tag(html: &str, start: usize) -> Option<Tag<'_>> {
    let rest = &html[start..];
    let closing = rest.starts_with("</");
    let name_start = if closing { 2 } else { 1 };

    let name_len = rest[name_start..]
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
        .unwrap_or(rest.len() - name_start);
    if name_len == 0 || !rest[name_start..].starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let name = rest[name_start..name_start + name_len].to_lowercase();

    let body_start = name_start + name_len;
    let body_len = find_tag_end(&rest[body_start..])?;
    let end = start + body_start + body_len + 1;

    let body = &rest[body_start..body_start + body_len];
    let self_closing = body.trim_end().ends_with('/');
    let attr_src = body.trim_end().trim_end_matches('/');

    let attrs = if closing {
        Vec::new()
    } else {
        parse_attrs(attr_src)
    };

    Some(Tag {
        name,
        attrs,
        start,
        end,
        raw: &html[start..end],
        closing,
        self_closing,
    })
}

/// Length of the tag body up to (not including) the closing `>`, honoring
/// quoted attribute values that may contain `>`.
fn find_tag_end(body: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (idx, c) in body.char_indices() {
        match (quote, c) {
            (None, '"') | (None, '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return Some(idx),
            _ => {}
        }
    }
    None
}

fn parse_attrs(src: &str) -> Vec<Attr> {
    ATTR_RE
        .captures_iter(src)
        .map(|caps| {
            let raw = caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default();
            let name = caps
                .get(1)
                .map(|m| m.as_str().to_lowercase())
                .unwrap_or_default();
            let value = caps.get(2).map(|m| unquote(m.as_str()));
            Attr { name, value, raw }
        })
        .collect()
}

fn unquote(value: &str) -> String {
    let v = value.trim();
    if (v.starts_with('"') && v.ends_with('"') && v.len() >= 2)
        || (v.starts_with('\'') && v.ends_with('\'') && v.len() >= 2)
    {
        v[1..v.len() - 1].to_string()
    } else {
        v.to_string()
    }
}
