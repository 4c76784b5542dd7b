//! Chapter markup parsing.
//!
//! Turns one spine entry's markup into a [`Fragment`]: its role, title,
//! optional author and content tree. Parsing never fails; malformed markup
//! yields less structure, not an error.
//!
//! # Example
//!
//! ```
//! use quire::markup::{Role, parse_fragment};
//! use quire::MarkupLimits;
//!
//! let fragment = parse_fragment(
//!     "<h1>Acknowledgments</h1><p>Thanks to <em>everyone</em>.</p>",
//!     &MarkupLimits::default(),
//! );
//! assert_eq!(fragment.role, Role::Backmatter);
//! assert_eq!(fragment.title, "Acknowledgments");
//! assert_eq!(fragment.content.plain_text(), "Thanks to everyone.");
//! ```

mod classify;
mod scanner;
mod tags;
mod text;
mod tree;

pub use classify::{Classification, Role, classify};
pub use scanner::{CloseTag, OpenTag, Scanner, Tag, element_extent, find_close_tag};
pub use tags::{TagKind, is_heading, tag_kind};
pub use text::{clean_text, collapse_whitespace, decode_entities, strip_tags};
pub use tree::{ContentNode, ROOT_TAG, TEXT_RUN_TAG, TreeBuilder};

use crate::options::MarkupLimits;

/// One parsed markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Derived title, empty when the fragment names none.
    pub title: String,
    pub role: Role,
    /// Author named on a title page.
    pub author: Option<String>,
    /// Root of the content tree (always a `body` container).
    pub content: ContentNode,
}

/// Classify a fragment and build its content tree.
///
/// Title pages keep empty blocks, since their layout often relies on them.
pub fn parse_fragment(markup: &str, limits: &MarkupLimits) -> Fragment {
    let Classification {
        role,
        title,
        author,
    } = classify(markup);
    let content = TreeBuilder::new(markup, limits)
        .keep_empty(role == Role::Titlepage)
        .build();

    Fragment {
        title,
        role,
        author,
        content,
    }
}
