//! Maps element names to how the tree builder treats them.

/// How the tree builder treats an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Block that holds further nodes.
    Container,
    /// Block whose content becomes a single text node when it has no
    /// nested blocks.
    TextBearing,
    /// Never has content (`br`, `img`, ...).
    Void,
    /// Dropped together with everything inside it.
    Skip,
    /// Inline noise: neither a node nor a text boundary.
    Ignored,
}

/// Classify an element by its lowercase local name.
pub fn tag_kind(name: &str) -> TagKind {
    match name {
        // Block containers
        "div" | "section" | "article" | "aside" | "nav" | "header" | "footer" | "main"
        | "blockquote" | "figure" | "ul" | "ol" | "dl" | "table" | "thead" | "tbody" | "tfoot"
        | "tr" | "hgroup" | "details" | "address" => TagKind::Container,

        // Blocks of running text
        "p" | "li" | "dt" | "dd" | "td" | "th" | "pre" | "figcaption" | "caption" | "summary" => {
            TagKind::TextBearing
        }

        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
        | "param" | "source" | "track" | "wbr" => TagKind::Void,

        // Headings are extracted as title/author, never as body content
        "script" | "style" | "head" | "title" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            TagKind::Skip
        }

        _ => TagKind::Ignored,
    }
}

/// Whether `name` is a heading element (`h1`..`h6`).
pub fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}
