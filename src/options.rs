//! Conversion options and hard resource limits.

/// Limits for stylesheet parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleLimits {
    /// Maximum bytes of concatenated stylesheet text.
    pub max_css_bytes: usize,
    /// Maximum number of style rules (after `@media` flattening).
    pub max_rules: usize,
}

impl Default for StyleLimits {
    fn default() -> Self {
        Self {
            max_css_bytes: 512 * 1024,
            max_rules: 4096,
        }
    }
}

/// Limits for markup tree building.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkupLimits {
    /// Maximum depth of the open-element stack.
    ///
    /// Recognized tags opened past this depth are treated like unknown
    /// inline tags: their text stays, their structure is flattened.
    pub max_depth: usize,
}

impl Default for MarkupLimits {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Document conversion options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Stylesheet parsing limits.
    pub styles: StyleLimits,
    /// Markup parsing limits.
    pub markup: MarkupLimits,
    /// Keep chapters that contain no text at all.
    pub keep_empty_chapters: bool,
}
