//! Content tree building.
//!
//! A single forward scan over the fragment with an explicit stack of open
//! block frames. Recognized block tags (see [`tag_kind`]) open and close
//! frames; everything else is either cut out of the text (comments,
//! skipped elements) or left for [`clean_text`] to strip. Malformed markup
//! is the normal case: unmatched close tags are ignored and frames still
//! open at end of input are dropped, keeping whatever children they had
//! already completed.

use super::scanner::{OpenTag, Scanner, Tag, find_close_tag};
use super::tags::{TagKind, is_heading, tag_kind};
use super::text::clean_text;
use crate::options::MarkupLimits;

/// Tag given to anonymous text runs that sit between block elements.
pub const TEXT_RUN_TAG: &str = "#text";

/// Tag of the root node returned by [`TreeBuilder::build`].
pub const ROOT_TAG: &str = "body";

/// One node of a chapter's content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum ContentNode {
    /// Cleaned, non-empty text. The tag is kept for style lookup only.
    Text {
        tag: String,
        classes: Vec<String>,
        text: String,
    },
    /// Block holding further nodes in document order.
    Container {
        tag: String,
        classes: Vec<String>,
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    pub fn tag(&self) -> &str {
        match self {
            ContentNode::Text { tag, .. } | ContentNode::Container { tag, .. } => tag,
        }
    }

    pub fn classes(&self) -> &[String] {
        match self {
            ContentNode::Text { classes, .. } | ContentNode::Container { classes, .. } => classes,
        }
    }

    /// Text of a text node.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentNode::Text { text, .. } => Some(text),
            ContentNode::Container { .. } => None,
        }
    }

    /// Children of a container; text nodes have none.
    pub fn children(&self) -> &[ContentNode] {
        match self {
            ContentNode::Text { .. } => &[],
            ContentNode::Container { children, .. } => children,
        }
    }

    /// Whether any text node in this subtree carries text.
    pub fn has_text_content(&self) -> bool {
        match self {
            ContentNode::Text { text, .. } => !text.is_empty(),
            ContentNode::Container { children, .. } => {
                children.iter().any(ContentNode::has_text_content)
            }
        }
    }

    /// All text of the subtree in document order, space separated.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        match self {
            ContentNode::Text { text, .. } => parts.push(text),
            ContentNode::Container { children, .. } => {
                for child in children {
                    child.collect_text(parts);
                }
            }
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            ContentNode::Text { text, .. } => Some(text),
            ContentNode::Container { .. } => None,
        }
    }
}

/// An open block element.
#[derive(Debug)]
struct Frame {
    tag: String,
    classes: Vec<String>,
    kind: TagKind,
    children: Vec<ContentNode>,
    /// A block element was opened inside this one.
    has_block_child: bool,
}

impl Frame {
    fn new(open: &OpenTag<'_>, kind: TagKind) -> Self {
        Self {
            tag: open.name.clone(),
            classes: open.classes(),
            kind,
            children: Vec::new(),
            has_block_child: false,
        }
    }

    /// Resolve a properly closed frame into a node.
    ///
    /// A frame that only ever held text becomes a text node under its own
    /// tag. Frames with no content at all are dropped unless `keep_empty`.
    fn into_node(self, keep_empty: bool) -> Option<ContentNode> {
        if !self.has_block_child {
            let text = self
                .children
                .into_iter()
                .filter_map(ContentNode::into_text)
                .collect::<Vec<_>>()
                .join(" ");
            if !text.is_empty() {
                return Some(ContentNode::Text {
                    tag: self.tag,
                    classes: self.classes,
                    text,
                });
            }
            return keep_empty.then(|| ContentNode::Container {
                tag: self.tag,
                classes: self.classes,
                children: Vec::new(),
            });
        }

        if self.children.is_empty() && !keep_empty {
            return None;
        }
        Some(ContentNode::Container {
            tag: self.tag,
            classes: self.classes,
            children: self.children,
        })
    }

    /// Completed children of a frame that was never closed.
    fn salvage(self) -> Vec<ContentNode> {
        if self.has_block_child {
            self.children
        } else {
            // Only the frame's own, unclosed text
            Vec::new()
        }
    }
}

/// Mutable state of one build.
#[derive(Debug, Default)]
struct State {
    stack: Vec<Frame>,
    root: Vec<ContentNode>,
    /// Text collected since the last block boundary, still raw.
    pending: String,
    /// Recognized tags opened where they could not become frames, with the
    /// stack depth they were opened at.
    flattened: Vec<(String, usize)>,
    keep_empty: bool,
}

impl State {
    fn attach(&mut self, node: ContentNode) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.root.push(node),
        }
    }

    /// Turn pending text into an anonymous text run of the current level.
    fn flush(&mut self) {
        let text = clean_text(&self.pending);
        self.pending.clear();
        if !text.is_empty() {
            self.attach(ContentNode::Text {
                tag: TEXT_RUN_TAG.to_string(),
                classes: Vec::new(),
                text,
            });
        }
    }

    fn open(&mut self, open: &OpenTag<'_>, kind: TagKind) {
        if let Some(parent) = self.stack.last_mut() {
            parent.has_block_child = true;
        }
        self.stack.push(Frame::new(open, kind));
    }

    /// Close every frame above and including `depth`.
    fn close_to(&mut self, depth: usize) {
        while self.stack.len() > depth {
            let Some(frame) = self.stack.pop() else {
                break;
            };
            if self.stack.len() > depth {
                log::trace!("implicitly closing <{}>", frame.tag);
            }
            if let Some(node) = frame.into_node(self.keep_empty) {
                self.attach(node);
            }
        }
        self.flattened.retain(|(_, d)| *d <= depth);
    }

    fn finish(mut self, tail: &str) -> Vec<ContentNode> {
        if self.stack.is_empty() {
            self.pending.push_str(tail);
            self.flush();
            return self.root;
        }

        log::debug!(
            "dropping {} unclosed element(s) at end of input",
            self.stack.len()
        );
        while let Some(frame) = self.stack.pop() {
            let salvaged = frame.salvage();
            match self.stack.last_mut() {
                Some(parent) => parent.children.extend(salvaged),
                None => self.root.extend(salvaged),
            }
        }
        self.root
    }
}

/// Builds the content tree of one markup fragment.
#[derive(Debug, Clone)]
pub struct TreeBuilder<'a> {
    src: &'a str,
    limits: MarkupLimits,
    keep_empty: bool,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(src: &'a str, limits: &MarkupLimits) -> Self {
        Self {
            src,
            limits: *limits,
            keep_empty: false,
        }
    }

    /// Keep block elements that end up with no content (title pages).
    pub fn keep_empty(mut self, keep: bool) -> Self {
        self.keep_empty = keep;
        self
    }

    /// Build the tree.
    ///
    /// The root is always a container tagged `body`, carrying the body
    /// element's classes when the fragment has one.
    pub fn build(&self) -> ContentNode {
        let (body, classes) = body_slice(self.src);
        let mut state = State {
            keep_empty: self.keep_empty,
            ..State::default()
        };

        let mut scanner = Scanner::new(body);
        let mut text_start = 0;
        while let Some(tag) = scanner.next() {
            match tag {
                Tag::Other { start, end } => {
                    state.pending.push_str(&body[text_start..start]);
                    text_start = end;
                }
                Tag::Open(open) => {
                    let kind = if open.self_closing {
                        TagKind::Void
                    } else {
                        tag_kind(&open.name)
                    };
                    match kind {
                        TagKind::Skip => {
                            state.pending.push_str(&body[text_start..open.start]);
                            state.pending.push(' ');
                            if is_heading(&open.name) {
                                log::trace!("leaving <{}> to title extraction", open.name);
                            }
                            scanner.skip_element(&open.name);
                            text_start = scanner.position();
                        }
                        TagKind::Void if matches!(open.name.as_str(), "br" | "hr") => {
                            state.pending.push_str(&body[text_start..open.start]);
                            state.pending.push(' ');
                            text_start = open.end;
                        }
                        TagKind::Void | TagKind::Ignored => {}
                        TagKind::Container | TagKind::TextBearing => {
                            state.pending.push_str(&body[text_start..open.start]);
                            text_start = open.end;

                            let depth = state.stack.len();
                            let inside_text = state
                                .stack
                                .last()
                                .is_some_and(|f| f.kind == TagKind::TextBearing);
                            if depth >= self.limits.max_depth
                                || (inside_text && kind == TagKind::TextBearing)
                            {
                                state.pending.push(' ');
                                state.flattened.push((open.name, depth));
                                continue;
                            }

                            state.flush();
                            state.open(&open, kind);
                        }
                    }
                }
                Tag::Close(close) => {
                    if state
                        .flattened
                        .last()
                        .is_some_and(|(name, _)| *name == close.name)
                    {
                        state.flattened.pop();
                        state.pending.push_str(&body[text_start..close.start]);
                        state.pending.push(' ');
                        text_start = close.end;
                        continue;
                    }
                    let Some(depth) = state.stack.iter().rposition(|f| f.tag == close.name)
                    else {
                        // Unmatched: left in the text for clean_text to strip
                        continue;
                    };
                    state.pending.push_str(&body[text_start..close.start]);
                    text_start = close.end;
                    state.flush();
                    state.close_to(depth);
                }
            }
        }

        ContentNode::Container {
            tag: ROOT_TAG.to_string(),
            classes,
            children: state.finish(&body[text_start..]),
        }
    }
}

/// Inner content of the `<body>` element and its classes, or the whole
/// fragment when it has no body.
fn body_slice(src: &str) -> (&str, Vec<String>) {
    for tag in Scanner::new(src) {
        if let Tag::Open(open) = tag
            && open.name == "body"
        {
            let end = find_close_tag(src, open.end, "body").map_or(src.len(), |(start, _)| start);
            return (&src[open.end..end], open.classes());
        }
    }
    (src, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(src: &str) -> ContentNode {
        TreeBuilder::new(src, &MarkupLimits::default()).build()
    }

    fn text(tag: &str, text: &str) -> ContentNode {
        ContentNode::Text {
            tag: tag.to_string(),
            classes: Vec::new(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_inline_markup_collapses_into_text() {
        let root = build("<div><p>Hello <b>world</b></p></div>");
        assert_eq!(root.children().len(), 1);
        let div = &root.children()[0];
        assert_eq!(div.tag(), "div");
        assert_eq!(div.children(), &[text("p", "Hello world")]);
    }

    #[test]
    fn test_headings_are_not_body_content() {
        let root = build("<h1>Title</h1><p>Body</p>");
        assert_eq!(root.children(), &[text("p", "Body")]);
    }

    #[test]
    fn test_classes_are_kept() {
        let root = build("<p class=\"lead first\">x</p>");
        assert_eq!(root.children()[0].classes(), &["lead", "first"]);
    }

    #[test]
    fn test_text_runs_between_blocks() {
        let root = build("<div>Intro<p>Para</p>Outro</div>");
        assert_eq!(
            root.children()[0].children(),
            &[text(TEXT_RUN_TAG, "Intro"), text("p", "Para"), text(TEXT_RUN_TAG, "Outro")]
        );
    }

    #[test]
    fn test_container_with_only_text_becomes_text() {
        let root = build("<blockquote class=\"q\">Quoted <i>line</i></blockquote>");
        assert_eq!(root.children()[0].text(), Some("Quoted line"));
        assert_eq!(root.children()[0].tag(), "blockquote");
    }

    #[test]
    fn test_top_level_text() {
        let root = build("Loose &amp; free<p>p</p>tail");
        assert_eq!(
            root.children(),
            &[text(TEXT_RUN_TAG, "Loose & free"), text("p", "p"), text(TEXT_RUN_TAG, "tail")]
        );
    }

    #[test]
    fn test_unclosed_paragraph_does_not_panic() {
        let root = build("<p>Unclosed paragraph");
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_unclosed_frames_salvage_completed_children() {
        let root = build("<div><p>Kept</p><p>Unclosed paragraph");
        assert_eq!(root.children(), &[text("p", "Kept")]);
    }

    #[test]
    fn test_unterminated_tag() {
        let root = build("<p>ok</p><p>cut <b class=\"x");
        assert_eq!(root.children(), &[text("p", "ok")]);
    }

    #[test]
    fn test_unmatched_close_tags_are_ignored() {
        let root = build("</div><p>a</span>b</p></p>");
        assert_eq!(root.children(), &[text("p", "ab")]);
    }

    #[test]
    fn test_close_unwinds_to_matching_frame() {
        let root = build("<section><div><p>x</p></section><p>y</p>");
        assert_eq!(root.children().len(), 2);
        let section = &root.children()[0];
        assert_eq!(section.tag(), "section");
        assert_eq!(section.children()[0].tag(), "div");
        assert_eq!(section.children()[0].children(), &[text("p", "x")]);
        assert_eq!(root.children()[1], text("p", "y"));
    }

    #[test]
    fn test_nested_text_blocks_flatten() {
        let root = build("<li>one<p>two</p>three</li>");
        assert_eq!(root.children(), &[text("li", "one two three")]);
    }

    #[test]
    fn test_line_breaks_become_spaces() {
        let root = build("<p>line<br/>break<br>again</p>");
        assert_eq!(root.children(), &[text("p", "line break again")]);
    }

    #[test]
    fn test_comments_and_scripts_are_cut() {
        let root = build("<p>a<!-- x > y -->b</p><script>var s = \"<p>no</p>\";</script>");
        assert_eq!(root.children(), &[text("p", "ab")]);
    }

    #[test]
    fn test_body_extraction() {
        let root = build(
            "<html><head><title>T</title><style>p { color: red }</style></head>\
             <body class=\"x\"><p>a</p></body></html>",
        );
        assert_eq!(root.tag(), ROOT_TAG);
        assert_eq!(root.classes(), &["x"]);
        assert_eq!(root.children(), &[text("p", "a")]);
    }

    #[test]
    fn test_empty_blocks() {
        let src = "<div><h2>Author</h2></div><p> </p><p>x</p>";
        let root = build(src);
        assert_eq!(root.children(), &[text("p", "x")]);

        let root = TreeBuilder::new(src, &MarkupLimits::default())
            .keep_empty(true)
            .build();
        assert_eq!(root.children().len(), 3);
        assert!(root.children()[0].children().is_empty());
    }

    #[test]
    fn test_depth_limit_flattens() {
        let limits = MarkupLimits { max_depth: 2 };
        let root = TreeBuilder::new("<div><div><div><p>deep</p></div></div></div>after", &limits)
            .build();
        let outer = &root.children()[0];
        assert_eq!(outer.children(), &[text("div", "deep")]);
        assert_eq!(root.children()[1], text(TEXT_RUN_TAG, "after"));
    }

    #[test]
    fn test_has_text_content() {
        assert!(build("<div><p>x</p></div>").has_text_content());
        assert!(!build("<div><img src=\"a.png\"/></div>").has_text_content());
        assert!(!build("").has_text_content());
    }

    #[test]
    fn test_plain_text() {
        let root = build("<div>a<p>b</p></div><p>c</p>");
        assert_eq!(root.plain_text(), "a b c");
    }

    #[test]
    fn test_unclosed_skipped_elements_end_at_next_block() {
        let root = build("<h1>Chapter One<p>First paragraph.</p><p>Second paragraph.</p>");
        assert_eq!(
            root.children(),
            &[text("p", "First paragraph."), text("p", "Second paragraph.")]
        );

        let root = build("<div><h2>Part Two</div><p>After</p>");
        assert_eq!(root.children(), &[text("p", "After")]);

        let root = build("<script>var a = 1;<p>Text</p><title>Doc<p>More</p>");
        assert_eq!(root.children(), &[text("p", "Text"), text("p", "More")]);
    }

    #[test]
    fn test_line_breaks_and_rules_separate_words() {
        let root = build("<p>a<br>b<hr/>c<HR>d</p>");
        assert_eq!(root.children(), &[text("p", "a b c d")]);
    }
}
