//! Keyword value validation.
//!
//! Enumerated properties accept only the keywords their enum defines.
//! Matching is case-insensitive and whitespace-tolerant; the stored value is
//! the canonical keyword.

use crate::style::properties::{
    Display, ObjectFit, Position, StyleValue, TextAlign, TextDecoration, TextTransform,
};

/// Macro for generating keyword parser functions.
///
/// For types defined with enum_property!, this generates a parser that
/// normalizes the raw value and calls the type's from_css method.
macro_rules! keyword_parser {
    ($fn_name:ident, $type:ty) => {
        pub(crate) fn $fn_name(raw: &str) -> Option<StyleValue> {
            let normalized = normalize_keyword(raw);
            <$type>::from_css(&normalized).map(|kw| StyleValue::text(kw.as_str()))
        }
    };
}

keyword_parser!(parse_text_align, TextAlign);
keyword_parser!(parse_text_decoration, TextDecoration);
keyword_parser!(parse_text_transform, TextTransform);
keyword_parser!(parse_object_fit, ObjectFit);
keyword_parser!(parse_display, Display);
keyword_parser!(parse_position, Position);

/// Parse `font-weight`: `bold`/`normal` literally, then an integer weight,
/// then the raw text.
pub(crate) fn parse_font_weight(raw: &str) -> StyleValue {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    match lower.as_str() {
        "bold" | "normal" => StyleValue::text(lower),
        _ => match trimmed.parse::<i64>() {
            Ok(weight) => StyleValue::Number(weight as f64),
            Err(_) => StyleValue::text(trimmed),
        },
    }
}

fn normalize_keyword(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
