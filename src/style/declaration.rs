//! Declaration mapping.
//!
//! Maps one CSS `property: value` pair onto the target style vocabulary.
//! Unsupported properties and invalid values produce nothing; shorthands
//! expand to several keys. Nothing here can fail.

use super::parse::keywords::{
    parse_display, parse_font_weight, parse_object_fit, parse_position, parse_text_align,
    parse_text_decoration, parse_text_transform,
};
use super::parse::transform::parse_transform;
use super::parse::values::convert;
use super::properties::{StyleKey, StyleValue, kebab_to_camel};

/// The result of mapping one declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped {
    Single(StyleKey, StyleValue),
    /// Shorthand expansion, in declaration order.
    Expanded(Vec<(StyleKey, StyleValue)>),
}

impl IntoIterator for Mapped {
    type Item = (StyleKey, StyleValue);
    type IntoIter = std::vec::IntoIter<(StyleKey, StyleValue)>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Mapped::Single(key, value) => vec![(key, value)].into_iter(),
            Mapped::Expanded(pairs) => pairs.into_iter(),
        }
    }
}

/// Cascade keywords the target format has no notion of.
const CASCADE_KEYWORDS: [&str; 4] = ["inherit", "initial", "unset", "revert"];

/// Directional keys for a box shorthand.
struct BoxKeys {
    all: StyleKey,
    top: StyleKey,
    right: StyleKey,
    bottom: StyleKey,
    left: StyleKey,
    horizontal: StyleKey,
    vertical: StyleKey,
}

const MARGIN: BoxKeys = BoxKeys {
    all: StyleKey::Margin,
    top: StyleKey::MarginTop,
    right: StyleKey::MarginRight,
    bottom: StyleKey::MarginBottom,
    left: StyleKey::MarginLeft,
    horizontal: StyleKey::MarginHorizontal,
    vertical: StyleKey::MarginVertical,
};

const PADDING: BoxKeys = BoxKeys {
    all: StyleKey::Padding,
    top: StyleKey::PaddingTop,
    right: StyleKey::PaddingRight,
    bottom: StyleKey::PaddingBottom,
    left: StyleKey::PaddingLeft,
    horizontal: StyleKey::PaddingHorizontal,
    vertical: StyleKey::PaddingVertical,
};

/// Resolve a CSS property name to its target key.
///
/// Explicit aliases first, then generic kebab-to-camel conversion. Vendor
/// prefixes only resolve through the aliases and custom properties (`--*`)
/// never resolve. Returns `None` when the result is outside the supported
/// key set.
pub fn target_key(property: &str) -> Option<StyleKey> {
    let property = property.trim().to_ascii_lowercase();
    let explicit = match property.as_str() {
        "text-decoration-line" => Some(StyleKey::TextDecoration),
        "-webkit-transform" | "-moz-transform" | "-ms-transform" => Some(StyleKey::Transform),
        "-webkit-transform-origin" | "-moz-transform-origin" | "-ms-transform-origin" => {
            Some(StyleKey::TransformOrigin)
        }
        _ => None,
    };
    if explicit.is_some() || property.starts_with('-') {
        return explicit;
    }
    StyleKey::from_css(&kebab_to_camel(&property))
}

/// Map a single declaration.
///
/// Returns `None` when the property is unsupported, the value is a cascade
/// keyword (`inherit`, `initial`, `unset`, `revert`), or the value is not
/// valid for an enumerated property.
pub fn map_declaration(property: &str, raw_value: &str) -> Option<Mapped> {
    let key = target_key(property)?;

    let value = strip_important(raw_value.trim());
    if value.is_empty() {
        return None;
    }
    let lower = value.to_ascii_lowercase();
    if CASCADE_KEYWORDS.contains(&lower.as_str()) {
        return None;
    }

    let single = |v: StyleValue| Some(Mapped::Single(key, v));
    match key {
        StyleKey::TextAlign => single(parse_text_align(value)?),
        StyleKey::TextDecoration => single(parse_text_decoration(value)?),
        StyleKey::TextTransform => single(parse_text_transform(value)?),
        StyleKey::ObjectFit => single(parse_object_fit(value)?),
        StyleKey::Display => single(parse_display(value)?),
        StyleKey::Position => single(parse_position(value)?),
        StyleKey::FontWeight => single(parse_font_weight(value)),
        StyleKey::Margin => expand_box(&MARGIN, value),
        StyleKey::Padding => expand_box(&PADDING, value),
        StyleKey::Transform => single(StyleValue::Transform(parse_transform(value)?)),
        StyleKey::TransformOrigin | StyleKey::ObjectPosition => single(StyleValue::text(value)),
        _ => single(convert(value).into()),
    }
}

/// Expand a 1-4 value box shorthand.
///
/// 1 value sets the shorthand key itself, 2 values set vertical and
/// horizontal, 3 values set top, horizontal and bottom, 4 values set each
/// side. Any other count keeps only the first value.
fn expand_box(keys: &BoxKeys, value: &str) -> Option<Mapped> {
    let tokens: Vec<StyleValue> = value.split_whitespace().map(|t| convert(t).into()).collect();

    let pairs = match <[StyleValue; 4]>::try_from(tokens) {
        Ok([top, right, bottom, left]) => vec![
            (keys.top, top),
            (keys.right, right),
            (keys.bottom, bottom),
            (keys.left, left),
        ],
        Err(tokens) => {
            let mut tokens = tokens.into_iter();
            match (tokens.next(), tokens.next(), tokens.next(), tokens.len()) {
                (Some(all), None, None, _) => return Some(Mapped::Single(keys.all, all)),
                (Some(vertical), Some(horizontal), None, _) => vec![
                    (keys.vertical, vertical),
                    (keys.horizontal, horizontal),
                ],
                (Some(top), Some(horizontal), Some(bottom), 0) => vec![
                    (keys.top, top),
                    (keys.horizontal, horizontal),
                    (keys.bottom, bottom),
                ],
                (Some(first), ..) => return Some(Mapped::Single(keys.all, first)),
                (None, ..) => return None,
            }
        }
    };
    Some(Mapped::Expanded(pairs))
}

fn strip_important(value: &str) -> &str {
    match value.rfind('!') {
        Some(bang) if value[bang + 1..].trim().eq_ignore_ascii_case("important") => {
            value[..bang].trim_end()
        }
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(property: &str, value: &str) -> Vec<(StyleKey, StyleValue)> {
        map_declaration(property, value)
            .map(|m| m.into_iter().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_display_keeps_only_flow_value() {
        assert_eq!(map_declaration("display", "none"), None);
        assert_eq!(map_declaration("display", "block"), None);
        assert_eq!(
            map_declaration("display", "flex"),
            Some(Mapped::Single(StyleKey::Display, StyleValue::text("flex")))
        );
    }

    #[test]
    fn test_unsupported_property() {
        assert_eq!(map_declaration("float", "left"), None);
        assert_eq!(map_declaration("page-break-before", "always"), None);
        assert_eq!(map_declaration("", "1em"), None);
    }

    #[test]
    fn test_cascade_keywords_are_dropped() {
        for kw in ["inherit", "INITIAL", " unset ", "revert"] {
            assert_eq!(map_declaration("color", kw), None, "{kw}");
        }
    }

    #[test]
    fn test_generic_conversion() {
        assert_eq!(
            pairs("font-size", "2em"),
            vec![(StyleKey::FontSize, StyleValue::Number(22.0))]
        );
        assert_eq!(
            pairs("Color", "#333"),
            vec![(StyleKey::Color, StyleValue::text("#333"))]
        );
        assert_eq!(
            pairs("width", "50%"),
            vec![(StyleKey::Width, StyleValue::text("50%"))]
        );
    }

    #[test]
    fn test_margin_four_values() {
        assert_eq!(
            pairs("margin", "1 2 3 4"),
            vec![
                (StyleKey::MarginTop, StyleValue::Number(1.0)),
                (StyleKey::MarginRight, StyleValue::Number(2.0)),
                (StyleKey::MarginBottom, StyleValue::Number(3.0)),
                (StyleKey::MarginLeft, StyleValue::Number(4.0)),
            ]
        );
    }

    #[test]
    fn test_margin_each_value_converted_independently() {
        assert_eq!(
            pairs("margin", "1em 96px 10% auto"),
            vec![
                (StyleKey::MarginTop, StyleValue::Number(11.0)),
                (StyleKey::MarginRight, StyleValue::Number(72.0)),
                (StyleKey::MarginBottom, StyleValue::text("10%")),
                (StyleKey::MarginLeft, StyleValue::text("auto")),
            ]
        );
    }

    #[test]
    fn test_box_shorthand_arities() {
        assert_eq!(
            pairs("padding", "2pt"),
            vec![(StyleKey::Padding, StyleValue::Number(2.0))]
        );
        assert_eq!(
            pairs("padding", "1pt 2pt"),
            vec![
                (StyleKey::PaddingVertical, StyleValue::Number(1.0)),
                (StyleKey::PaddingHorizontal, StyleValue::Number(2.0)),
            ]
        );
        assert_eq!(
            pairs("margin", "1pt 2pt 3pt"),
            vec![
                (StyleKey::MarginTop, StyleValue::Number(1.0)),
                (StyleKey::MarginHorizontal, StyleValue::Number(2.0)),
                (StyleKey::MarginBottom, StyleValue::Number(3.0)),
            ]
        );
        assert_eq!(
            pairs("margin", "1pt 2pt 3pt 4pt 5pt"),
            vec![(StyleKey::Margin, StyleValue::Number(1.0))]
        );
    }

    #[test]
    fn test_font_weight() {
        assert_eq!(
            pairs("font-weight", "700"),
            vec![(StyleKey::FontWeight, StyleValue::Number(700.0))]
        );
        assert_eq!(
            pairs("font-weight", "BOLD"),
            vec![(StyleKey::FontWeight, StyleValue::text("bold"))]
        );
    }

    #[test]
    fn test_transform() {
        assert!(matches!(
            map_declaration("transform", "rotate(90deg)"),
            Some(Mapped::Single(StyleKey::Transform, StyleValue::Transform(ops))) if ops.len() == 1
        ));
        assert!(matches!(
            map_declaration("-webkit-transform", "scale(2)"),
            Some(Mapped::Single(StyleKey::Transform, _))
        ));
        assert_eq!(map_declaration("transform", "none"), None);
    }

    #[test]
    fn test_raw_pass_through_properties() {
        assert_eq!(
            pairs("transform-origin", " top left "),
            vec![(StyleKey::TransformOrigin, StyleValue::text("top left"))]
        );
        assert_eq!(
            pairs("object-position", "50% 10px"),
            vec![(StyleKey::ObjectPosition, StyleValue::text("50% 10px"))]
        );
    }

    #[test]
    fn test_aliases() {
        assert_eq!(target_key("text-decoration-line"), Some(StyleKey::TextDecoration));
        assert_eq!(target_key("-ms-transform-origin"), Some(StyleKey::TransformOrigin));
        assert_eq!(target_key("border-top"), Some(StyleKey::BorderTop));
    }

    #[test]
    fn test_custom_and_prefixed_names_never_reach_real_keys() {
        assert_eq!(map_declaration("--color", "blue"), None);
        assert_eq!(map_declaration("--margin", "5px"), None);
        assert_eq!(map_declaration("--", "1"), None);
        assert_eq!(target_key("-webkit-color"), None);
        assert_eq!(target_key("-moz-font-size"), None);
        assert_eq!(target_key("-webkit-transform"), Some(StyleKey::Transform));
    }

    #[test]
    fn test_important_is_ignored() {
        assert_eq!(
            pairs("text-align", "center !important"),
            vec![(StyleKey::TextAlign, StyleValue::text("center"))]
        );
    }
}
