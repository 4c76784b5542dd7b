//! Stylesheet engine.
//!
//! This module contains:
//! - Unit conversion and transform parsing (`parse`)
//! - The target style vocabulary (`StyleKey`, `StyleValue`)
//! - Declaration mapping onto that vocabulary
//! - The style index and its three-tier lookup

mod cascade;
mod declaration;
pub(crate) mod parse;
mod properties;
mod types;

// Re-export property types
pub use properties::{
    Display, ObjectFit, Position, StyleKey, StyleValue, TextAlign, TextDecoration, TextTransform,
};

// Re-export core style types
pub use types::{Style, StyleMap};

pub use declaration::{Mapped, map_declaration, target_key};

pub use parse::media::{MediaFeature, MediaQuery};
pub use parse::stylesheet::{RawRule, parse_rules, split_declarations};
pub use parse::transform::{TransformOp, parse_transform};
pub use parse::values::{BASE_FONT_SIZE, Value, convert};

pub use cascade::{StyleIndex, StyleIndexBuilder};
