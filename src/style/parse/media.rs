//! `@media` condition extraction.
//!
//! Only a handful of viewport features are understood. The first one found
//! in the media text becomes the condition; anything else yields `None`,
//! and the rules inside that block are dropped.

use std::fmt;

use crate::style::properties::enum_property;

enum_property! {
    /// A media feature that can condition a style.
    #[derive(PartialOrd, Ord)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    #[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
    pub enum MediaFeature {
        MaxWidth => "max-width",
        MinWidth => "min-width",
        MaxHeight => "max-height",
        MinHeight => "min-height",
        Orientation => "orientation",
    }
}

const FEATURES: [MediaFeature; 5] = [
    MediaFeature::MaxWidth,
    MediaFeature::MinWidth,
    MediaFeature::MaxHeight,
    MediaFeature::MinHeight,
    MediaFeature::Orientation,
];

/// A media condition, rendered as `@media <feature>: <value>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MediaQuery {
    pub feature: MediaFeature,
    pub value: String,
}

impl MediaQuery {
    pub fn new(feature: MediaFeature, value: impl Into<String>) -> Self {
        Self {
            feature,
            value: value.into(),
        }
    }

    /// Extract the condition from `@media` prelude text.
    ///
    /// Features are tried in a fixed order (`max-width`, `min-width`,
    /// `max-height`, `min-height`, `orientation`) and the first one present
    /// with a value wins: `screen and (max-width: 600px)` gives
    /// `@media max-width: 600px`.
    pub fn from_media_text(text: &str) -> Option<Self> {
        let lower = text.to_ascii_lowercase();
        FEATURES.iter().find_map(|&feature| {
            let at = lower.find(feature.as_str())?;
            let rest = lower[at + feature.as_str().len()..].trim_start();
            let rest = rest.strip_prefix(':')?.trim_start();
            let end = rest
                .find(|c: char| c == ')' || c == ',' || c.is_whitespace())
                .unwrap_or(rest.len());
            let value = &rest[..end];
            (!value.is_empty()).then(|| MediaQuery::new(feature, value))
        })
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@media {}: {}", self.feature, self.value)
    }
}
