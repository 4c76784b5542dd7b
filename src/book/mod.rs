//! Document assembly.
//!
//! A [`Document`] is the output handed to a renderer: archive metadata, the
//! chapters in spine order, and the finished style index that answers
//! per-element style lookups.

use crate::error::{Error, Result};
use crate::markup::{ContentNode, Fragment, Role, parse_fragment};
use crate::options::ConvertOptions;
use crate::style::{Style, StyleIndex};

/// Archive metadata. Missing values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Metadata {
    pub title: String,
    pub author: String,
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }
}

/// One chapter, built from one spine entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Chapter {
    pub title: String,
    pub role: Role,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub author: Option<String>,
    pub content: ContentNode,
}

impl Chapter {
    /// Build a chapter from a parsed fragment at 1-based spine `position`,
    /// filling in a missing title (and title-page author) from `metadata`.
    pub fn from_fragment(fragment: Fragment, position: usize, metadata: &Metadata) -> Self {
        let Fragment {
            title,
            role,
            author,
            content,
        } = fragment;

        let title = match (title.is_empty(), role) {
            (false, _) => title,
            (true, Role::Titlepage) => metadata.title.clone(),
            (true, _) => format!("Chapter {position}"),
        };
        let author = match role {
            Role::Titlepage => author
                .or_else(|| Some(metadata.author.clone()))
                .filter(|a| !a.is_empty()),
            _ => None,
        };

        Self {
            title,
            role,
            author,
            content,
        }
    }
}

/// A converted document.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    pub metadata: Metadata,
    pub chapters: Vec<Chapter>,
    #[cfg_attr(feature = "serde", serde(skip))]
    styles: StyleIndex,
}

impl Document {
    /// Assemble a document from its stylesheet text and spine fragments.
    ///
    /// The style index is built once, from the whole stylesheet, before any
    /// chapter is parsed. Chapters without text are discarded unless they
    /// are title pages or `options.keep_empty_chapters` is set. Fails only
    /// when there are no fragments at all.
    pub fn assemble<I, S>(
        metadata: Metadata,
        stylesheet: &str,
        fragments: I,
        options: &ConvertOptions,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fragments = fragments.into_iter().peekable();
        if fragments.peek().is_none() {
            return Err(Error::EmptySpine);
        }

        let styles = StyleIndex::build_with_limits(stylesheet, &options.styles);

        let mut chapters = Vec::new();
        for (index, markup) in fragments.enumerate() {
            let fragment = parse_fragment(markup.as_ref(), &options.markup);
            let keep = fragment.role == Role::Titlepage
                || options.keep_empty_chapters
                || fragment.content.has_text_content();
            if !keep {
                log::debug!("discarding spine entry {} without text", index + 1);
                continue;
            }
            chapters.push(Chapter::from_fragment(fragment, index + 1, &metadata));
        }
        log::debug!("assembled {:?} with {} chapters", metadata.title, chapters.len());

        Ok(Self {
            metadata,
            chapters,
            styles,
        })
    }

    /// Effective style for an element with `tag` and `classes`.
    pub fn style_for<S: AsRef<str>>(&self, tag: &str, classes: &[S]) -> Style {
        self.styles.lookup(tag, classes)
    }

    /// Effective style for a content node.
    pub fn style_for_node(&self, node: &ContentNode) -> Style {
        self.styles.lookup(node.tag(), node.classes())
    }

    pub fn styles(&self) -> &StyleIndex {
        &self.styles
    }
}

/// Join stylesheet texts, in manifest order, into the single text
/// [`Document::assemble`] expects.
pub fn join_stylesheets<I, S>(sheets: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for (i, sheet) in sheets.into_iter().enumerate() {
        if i > 0 {
            joined.push('\n');
        }
        joined.push_str(sheet.as_ref());
    }
    joined
}
