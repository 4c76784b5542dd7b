//! Forward-only markup tag scanner.
//!
//! Locates `<...>` boundaries in a single pass and reports tags with their
//! byte spans. Text between tags is not reported; callers slice it out of
//! the source using the spans. Malformed input never fails: a `<` that
//! cannot start a tag is text, and an unterminated tag ends the scan.

use super::tags::{TagKind, tag_kind};

/// An opening (or self-closing) tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag<'a> {
    /// Lowercase local name.
    pub name: String,
    /// Raw attribute text between the name and the closing `>`.
    pub attrs: &'a str,
    /// Written with a trailing `/` before `>`.
    pub self_closing: bool,
    pub start: usize,
    pub end: usize,
}

impl<'a> OpenTag<'a> {
    /// Value of the first attribute named `name` (ASCII case-insensitive).
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        Attributes::new(self.attrs)
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> Vec<String> {
        self.attr("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// A closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseTag {
    /// Lowercase local name.
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// One tag found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag<'a> {
    Open(OpenTag<'a>),
    Close(CloseTag),
    /// Comment, doctype or processing instruction.
    Other { start: usize, end: usize },
}

impl Tag<'_> {
    pub fn end(&self) -> usize {
        match self {
            Tag::Open(t) => t.end,
            Tag::Close(t) => t.end,
            Tag::Other { end, .. } => *end,
        }
    }
}

/// Scanner over one markup string.
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Byte offset the next scan starts from.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Skip past the closing tag matching `name`.
    ///
    /// An element that is never closed ends at the next block boundary
    /// (see [`element_extent`]) and scanning resumes at that boundary tag.
    /// Returns the start offset of the closing tag, if one was found.
    pub fn skip_element(&mut self, name: &str) -> Option<usize> {
        let closed = find_close_tag(self.src, self.pos, name);
        self.pos = closed.map_or_else(|| next_block_boundary(self.src, self.pos), |(_, end)| end);
        closed.map(|(start, _)| start)
    }

    fn parse_at(&self, lt: usize) -> Option<Result<Tag<'a>, usize>> {
        let bytes = self.src.as_bytes();
        match *bytes.get(lt + 1)? {
            b'/' => {
                let end = lt + memchr::memchr(b'>', &bytes[lt..])? + 1;
                let name = read_name(&self.src[lt + 2..end - 1]);
                Some(Ok(Tag::Close(CloseTag {
                    name: name.to_ascii_lowercase(),
                    start: lt,
                    end,
                })))
            }
            b'!' if self.src[lt..].starts_with("<!--") => {
                let end = self.src[lt + 4..]
                    .find("-->")
                    .map_or(self.src.len(), |i| lt + 4 + i + 3);
                Some(Ok(Tag::Other { start: lt, end }))
            }
            b'!' | b'?' => {
                let end = lt + memchr::memchr(b'>', &bytes[lt..])? + 1;
                Some(Ok(Tag::Other { start: lt, end }))
            }
            b if b.is_ascii_alphabetic() => {
                let gt = find_tag_end(bytes, lt + 1)?;
                let inner = &self.src[lt + 1..gt];
                let name = read_name(inner);
                let attrs = inner[name.len()..].trim();
                let self_closing = attrs.ends_with('/');
                let attrs = attrs.trim_end_matches('/').trim_end();
                Some(Ok(Tag::Open(OpenTag {
                    name: name.to_ascii_lowercase(),
                    attrs,
                    self_closing,
                    start: lt,
                    end: gt + 1,
                })))
            }
            // Literal '<' in text
            _ => Some(Err(lt + 1)),
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        loop {
            let offset = memchr::memchr(b'<', &self.src.as_bytes()[self.pos..])?;
            let lt = self.pos + offset;
            match self.parse_at(lt) {
                Some(Ok(tag)) => {
                    self.pos = tag.end();
                    return Some(tag);
                }
                Some(Err(resume)) => self.pos = resume,
                None => {
                    // Unterminated tag: nothing after it can be structured
                    self.pos = self.src.len();
                    return None;
                }
            }
        }
    }
}

/// Read a tag name: everything up to whitespace, `/` or `>`.
fn read_name(s: &str) -> &str {
    let end = s
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(s.len());
    &s[..end]
}

/// Find the `>` ending a tag that starts at `from`, skipping quoted values.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote = None;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match (quote, b) {
            (None, b'"' | b'\'') => quote = Some(b),
            (Some(q), _) if q == b => quote = None,
            (None, b'>') => return Some(i),
            _ => {}
        }
    }
    None
}

/// Find `</name>` at or after `from`, ASCII case-insensitive.
///
/// Returns the `(start, end)` span of the closing tag.
pub fn find_close_tag(src: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let bytes = src.as_bytes();
    let mut pos = from;
    while let Some(offset) = memchr::memchr(b'<', bytes.get(pos..)?) {
        let lt = pos + offset;
        let name_start = lt + 2;
        let name_end = name_start + name.len();
        let matches = bytes.get(lt + 1) == Some(&b'/')
            && bytes
                .get(name_start..name_end)
                .is_some_and(|n| n.eq_ignore_ascii_case(name.as_bytes()))
            && bytes
                .get(name_end)
                .is_none_or(|&b| b == b'>' || b.is_ascii_whitespace());
        if matches {
            let end = memchr::memchr(b'>', &bytes[name_end..]).map_or(src.len(), |i| name_end + i + 1);
            return Some((lt, end));
        }
        pos = lt + 1;
    }
    None
}

/// Content span end of the element whose open tag ends at `from`.
///
/// Returns `(content_end, resume)`: the closing tag's span, or for an
/// element that is never closed, the next block boundary twice.
pub fn element_extent(src: &str, from: usize, name: &str) -> (usize, usize) {
    find_close_tag(src, from, name).unwrap_or_else(|| {
        let boundary = next_block_boundary(src, from);
        (boundary, boundary)
    })
}

/// Start of the first tag at or after `from` that opens or closes a
/// block, skipped or structural. End of input when there is none.
fn next_block_boundary(src: &str, from: usize) -> usize {
    let rest = &src[from..];
    Scanner::new(rest)
        .find_map(|tag| match tag {
            Tag::Open(open) if !open.self_closing && is_boundary(&open.name) => Some(open.start),
            Tag::Close(close) if is_boundary(&close.name) => Some(close.start),
            _ => None,
        })
        .map_or(src.len(), |start| from + start)
}

fn is_boundary(name: &str) -> bool {
    matches!(
        tag_kind(name),
        TagKind::Container | TagKind::TextBearing | TagKind::Skip
    )
}

/// Iterator over `name=value` pairs in raw attribute text.
struct Attributes<'a> {
    rest: &'a str,
}

impl<'a> Attributes<'a> {
    fn new(attrs: &'a str) -> Self {
        Self { rest: attrs }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.rest = self.rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
            if self.rest.is_empty() {
                return None;
            }

            let name_end = self
                .rest
                .find(|c: char| c.is_whitespace() || c == '=')
                .unwrap_or(self.rest.len());
            let name = &self.rest[..name_end];
            let after = self.rest[name_end..].trim_start();

            let Some(value_part) = after.strip_prefix('=') else {
                // Boolean attribute
                self.rest = after;
                if name.is_empty() {
                    continue;
                }
                return Some((name, ""));
            };
            let value_part = value_part.trim_start();

            let (value, rest) = match value_part.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &value_part[1..];
                    match body.find(q) {
                        Some(close) => (&body[..close], &body[close + 1..]),
                        None => (body, ""),
                    }
                }
                _ => {
                    let end = value_part
                        .find(char::is_whitespace)
                        .unwrap_or(value_part.len());
                    (&value_part[..end], &value_part[end..])
                }
            };
            self.rest = rest;
            if !name.is_empty() {
                return Some((name, value));
            }
        }
    }
}
