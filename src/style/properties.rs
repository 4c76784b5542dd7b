//! Target style vocabulary: the closed key set, keyword enums, and values.

use super::parse::transform::TransformOp;
use super::parse::values::Value;

/// Macro for defining keyword enums that map one-to-one onto CSS keywords.
///
/// Inspired by lightningcss's `enum_property!` macro.
///
/// # Example
///
/// ```ignore
/// enum_property! {
///     /// Text transform.
///     pub enum TextTransform {
///         None => "none",
///         Uppercase => "uppercase",
///     }
/// }
/// ```
macro_rules! enum_property {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $css:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Returns the CSS keyword for this value.
            #[inline]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $css,)*
                }
            }

            /// Parse a CSS keyword into this enum.
            #[inline]
            pub fn from_css(s: &str) -> Option<Self> {
                match s {
                    $($css => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use enum_property;

enum_property! {
    /// Every style key the renderer understands, by its camelCase name.
    ///
    /// Declarations that don't resolve to one of these are dropped.
    #[derive(PartialOrd, Ord)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    pub enum StyleKey {
        Color => "color",
        BackgroundColor => "backgroundColor",
        Opacity => "opacity",

        FontFamily => "fontFamily",
        FontSize => "fontSize",
        FontStyle => "fontStyle",
        FontWeight => "fontWeight",

        LetterSpacing => "letterSpacing",
        LineHeight => "lineHeight",
        TextAlign => "textAlign",
        TextDecoration => "textDecoration",
        TextIndent => "textIndent",
        TextTransform => "textTransform",
        VerticalAlign => "verticalAlign",

        Margin => "margin",
        MarginTop => "marginTop",
        MarginRight => "marginRight",
        MarginBottom => "marginBottom",
        MarginLeft => "marginLeft",
        MarginHorizontal => "marginHorizontal",
        MarginVertical => "marginVertical",

        Padding => "padding",
        PaddingTop => "paddingTop",
        PaddingRight => "paddingRight",
        PaddingBottom => "paddingBottom",
        PaddingLeft => "paddingLeft",
        PaddingHorizontal => "paddingHorizontal",
        PaddingVertical => "paddingVertical",

        Width => "width",
        Height => "height",
        MinWidth => "minWidth",
        MinHeight => "minHeight",
        MaxWidth => "maxWidth",
        MaxHeight => "maxHeight",

        Display => "display",
        Position => "position",
        Top => "top",
        Right => "right",
        Bottom => "bottom",
        Left => "left",

        Border => "border",
        BorderWidth => "borderWidth",
        BorderColor => "borderColor",
        BorderStyle => "borderStyle",
        BorderTop => "borderTop",
        BorderRight => "borderRight",
        BorderBottom => "borderBottom",
        BorderLeft => "borderLeft",
        BorderRadius => "borderRadius",

        ObjectFit => "objectFit",
        ObjectPosition => "objectPosition",
        Transform => "transform",
        TransformOrigin => "transformOrigin",
    }
}

enum_property! {
    /// Text alignment.
    pub enum TextAlign {
        Left => "left",
        Right => "right",
        Center => "center",
        Justify => "justify",
    }
}

enum_property! {
    /// Text decoration lines.
    pub enum TextDecoration {
        None => "none",
        Underline => "underline",
        LineThrough => "line-through",
        UnderlineLineThrough => "underline line-through",
        LineThroughUnderline => "line-through underline",
    }
}

enum_property! {
    /// Text transform.
    pub enum TextTransform {
        None => "none",
        Uppercase => "uppercase",
        Lowercase => "lowercase",
        Capitalize => "capitalize",
    }
}

enum_property! {
    /// Replaced-element fitting.
    pub enum ObjectFit {
        Contain => "contain",
        Cover => "cover",
        Fill => "fill",
        None => "none",
        ScaleDown => "scale-down",
    }
}

enum_property! {
    /// Display mode.
    ///
    /// Only the flow-preserving value is representable; hiding values are
    /// never honored, so text cannot vanish through a stylesheet.
    pub enum Display {
        Flex => "flex",
    }
}

enum_property! {
    /// Positioning scheme.
    pub enum Position {
        Absolute => "absolute",
        Relative => "relative",
    }
}

/// A resolved style value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StyleValue {
    Number(f64),
    /// Keyword, percentage or pass-through text.
    Text(String),
    Transform(Vec<TransformOp>),
}

impl StyleValue {
    pub fn text(s: impl Into<String>) -> Self {
        StyleValue::Text(s.into())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Value> for StyleValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => StyleValue::Number(n),
            Value::Text(s) => StyleValue::Text(s),
        }
    }
}

/// Convert a kebab-case property name to camelCase.
///
/// `margin-top` becomes `marginTop`. A leading dash capitalizes like any
/// other, so prefixed names never collide with plain ones.
pub(crate) fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
