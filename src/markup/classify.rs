//! Chapter role classification and title/author extraction.
//!
//! Computed from the whole fragment, independently of tree building.

use std::fmt;

use super::scanner::{Scanner, Tag, element_extent};
use super::text::clean_text;

/// Layout role of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    Titlepage,
    Frontmatter,
    Chapter,
    Backmatter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Titlepage => "titlepage",
            Role::Frontmatter => "frontmatter",
            Role::Chapter => "chapter",
            Role::Backmatter => "backmatter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const TITLEPAGE_MARKER: &str = "titlepage";

const FRONT_MARKERS: &[&str] = &[
    "copyright-page",
    "toc",
    "dedication",
    "preface",
    "foreword",
    "prologue",
];

const BACK_MARKERS: &[&str] = &["afterword", "colophon", "acknowledgments", "epilogue"];

const FRONT_TITLES: &[&str] = &[
    "copyright",
    "table of contents",
    "contents",
    "dedication",
    "preface",
    "foreword",
    "introduction",
    "prologue",
];

const BACK_TITLES: &[&str] = &[
    "about the author",
    "acknowledgments",
    "acknowledgements",
    "afterword",
    "epilogue",
    "appendix",
    "notes",
    "bibliography",
    "index",
];

/// Structural facts gathered in one pass over a fragment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Scan {
    /// `epub:type` / `role` tokens, lowercased, `doc-` prefix removed.
    markers: Vec<String>,
    h1: Option<String>,
    h2: Option<String>,
    /// Text of the `<title>` element.
    title: Option<String>,
}

impl Scan {
    fn run(src: &str) -> Self {
        let mut scan = Scan::default();
        let mut scanner = Scanner::new(src);
        while let Some(tag) = scanner.next() {
            let Tag::Open(open) = tag else {
                continue;
            };

            for attr in ["epub:type", "role"] {
                if let Some(value) = open.attr(attr) {
                    scan.markers.extend(value.split_whitespace().map(|token| {
                        let token = token.to_ascii_lowercase();
                        match token.strip_prefix("doc-") {
                            Some(rest) => rest.to_string(),
                            None => token,
                        }
                    }));
                }
            }

            let slot = match open.name.as_str() {
                "script" | "style" => {
                    scanner.skip_element(&open.name);
                    continue;
                }
                "title" => &mut scan.title,
                "h1" => &mut scan.h1,
                "h2" => &mut scan.h2,
                _ => continue,
            };
            if slot.is_none() {
                let (close, _) = element_extent(src, open.end, &open.name);
                let text = clean_text(&src[open.end..close]);
                if !text.is_empty() {
                    *slot = Some(text);
                }
            }
        }
        scan
    }

    fn has_marker(&self, names: &[&str]) -> bool {
        self.markers.iter().any(|m| names.contains(&m.as_str()))
    }
}

/// Role, title and author of a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub role: Role,
    /// Derived title; empty when the fragment names none.
    pub title: String,
    /// Title pages only: the first level-2 heading.
    pub author: Option<String>,
}

/// Classify a fragment from its markers and headings.
///
/// The title is the first `h1`; failing that, outside title pages, the
/// first `h2` and then the `<title>` element. On title pages the first
/// `h2` is the author instead.
pub fn classify(src: &str) -> Classification {
    let scan = Scan::run(src);
    let titlepage = scan.has_marker(&[TITLEPAGE_MARKER]);

    let (title, author) = if titlepage {
        (scan.h1.clone(), scan.h2.clone())
    } else {
        let title = scan
            .h1
            .clone()
            .or_else(|| scan.h2.clone())
            .or_else(|| scan.title.clone());
        (title, None)
    };
    let title = title.unwrap_or_default();

    let role = if titlepage {
        Role::Titlepage
    } else if scan.has_marker(FRONT_MARKERS) || title_matches(&title, FRONT_TITLES) {
        Role::Frontmatter
    } else if scan.has_marker(BACK_MARKERS) || title_matches(&title, BACK_TITLES) {
        Role::Backmatter
    } else {
        Role::Chapter
    };
    log::debug!("classified {title:?} as {role} (markers: {:?})", scan.markers);

    Classification {
        role,
        title,
        author,
    }
}

fn title_matches(title: &str, patterns: &[&str]) -> bool {
    let title = title.trim();
    patterns.iter().any(|p| title.eq_ignore_ascii_case(p))
}
