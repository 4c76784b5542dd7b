//! # quire
//!
//! Turns the markup and stylesheets of an ebook's spine into a tree of
//! styled content nodes ready for layout.
//!
//! ## Features
//!
//! - Stylesheet indexing with a fixed tag < class < tag.class precedence
//! - Typed style values: lengths normalized to points, validated keywords,
//!   parsed transforms, `@media` variants
//! - Tolerant markup tree building that never fails on malformed input
//! - Chapter role classification (title page, front matter, chapter, back
//!   matter) with title and author extraction
//!
//! ## Quick Start
//!
//! ```
//! use quire::{ConvertOptions, Document, Metadata, StyleKey, join_stylesheets};
//!
//! let css = join_stylesheets([
//!     "p { text-indent: 1em; margin: 0 }",
//!     "p.first { text-indent: 0 }",
//! ]);
//! let doc = Document::assemble(
//!     Metadata::new("A Book").with_author("Someone"),
//!     &css,
//!     ["<h1>One</h1><p class=\"first\">It begins.</p><p>It goes on.</p>"],
//!     &ConvertOptions::default(),
//! )
//! .unwrap();
//!
//! let chapter = &doc.chapters[0];
//! assert_eq!(chapter.title, "One");
//!
//! let first = &chapter.content.children()[0];
//! let style = doc.style_for_node(first);
//! assert_eq!(style.get(StyleKey::TextIndent).and_then(|v| v.as_number()), Some(0.0));
//! ```

pub mod book;
pub mod error;
pub mod markup;
pub mod options;
pub mod style;

pub use book::{Chapter, Document, Metadata, join_stylesheets};
pub use error::{Error, Result};
pub use markup::{ContentNode, Fragment, Role, parse_fragment};
pub use options::{ConvertOptions, MarkupLimits, StyleLimits};
pub use style::{Style, StyleIndex, StyleKey, StyleValue};
