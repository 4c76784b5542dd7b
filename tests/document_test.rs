//! Document assembly tests.
//!
//! End-to-end conversion of a small book: stylesheets, spine fragments and
//! metadata in, chapters with styled nodes out.

use quire::{
    ContentNode, ConvertOptions, Document, Error, Metadata, Role, StyleKey, StyleLimits,
    StyleValue, join_stylesheets,
};

const CORE_CSS: &str = "
    body { font-family: Georgia, serif }
    p { text-indent: 1em; margin: 0 }
    p.first, .noindent { text-indent: 0 }
    .center { text-align: center }
    blockquote { margin: 1em 2em; font-style: italic }
    .hidden { display: none }
";

const LOCAL_CSS: &str = "
    @font-face { font-family: X; src: url(x.ttf) }
    .center { text-align: right }
    @media (orientation: landscape) { p { margin: 0 1em } }
";

fn spine() -> Vec<String> {
    vec![
        "<html><head><title>Title Page</title></head><body>\
         <section epub:type=\"titlepage\"><h1>The Voyage</h1><div class=\"ornament\"></div></section>\
         </body></html>"
            .to_string(),
        "<html><body><section epub:type=\"dedication\"><p class=\"center\">For J.</p></section></body></html>"
            .to_string(),
        "<html><body><div><img src=\"map.png\" alt=\"Map\"/></div></body></html>".to_string(),
        "<html><body><h1>Departure</h1><p class=\"first\">We left at dawn.</p>\
         <p>The sea was calm.</p><blockquote><p>Fair winds.</p></blockquote></body></html>"
            .to_string(),
        "<html><body><p>No heading here.</p></body></html>".to_string(),
        "<html><body><h1>About the Author</h1><p>Lives by the sea.</p></body></html>".to_string(),
    ]
}

fn assemble(options: &ConvertOptions) -> Document {
    let css = join_stylesheets([CORE_CSS, LOCAL_CSS]);
    Document::assemble(
        Metadata::new("The Voyage").with_author("R. Sailor"),
        &css,
        spine(),
        options,
    )
    .unwrap()
}

fn first_text(node: &ContentNode) -> Option<&ContentNode> {
    match node {
        ContentNode::Text { .. } => Some(node),
        ContentNode::Container { children, .. } => children.iter().find_map(first_text),
    }
}

// ============================================================================
// Assembly Tests
// ============================================================================

#[test]
fn test_chapters_in_spine_order() {
    let doc = assemble(&ConvertOptions::default());

    let summary: Vec<_> = doc
        .chapters
        .iter()
        .map(|c| (c.title.as_str(), c.role))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("The Voyage", Role::Titlepage),
            ("Chapter 2", Role::Frontmatter),
            ("Departure", Role::Chapter),
            ("Chapter 5", Role::Chapter),
            ("About the Author", Role::Backmatter),
        ]
    );
    assert_eq!(doc.chapters[0].author.as_deref(), Some("R. Sailor"));
    assert!(doc.chapters[1..].iter().all(|c| c.author.is_none()));
}

#[test]
fn test_keep_empty_chapters() {
    let options = ConvertOptions {
        keep_empty_chapters: true,
        ..Default::default()
    };
    let doc = assemble(&options);
    assert_eq!(doc.chapters.len(), 6);
    assert_eq!(doc.chapters[2].title, "Chapter 3");
    assert!(!doc.chapters[2].content.has_text_content());
}

#[test]
fn test_empty_spine_is_an_error() {
    let result = Document::assemble(
        Metadata::default(),
        CORE_CSS,
        Vec::<String>::new(),
        &ConvertOptions::default(),
    );
    assert_eq!(result.unwrap_err(), Error::EmptySpine);
}

#[test]
fn test_unclosed_heading_chapter_is_kept() {
    let doc = Document::assemble(
        Metadata::default(),
        "",
        ["<h1>Chapter One<p>First paragraph.</p><p>Second paragraph.</p>"],
        &ConvertOptions::default(),
    )
    .unwrap();
    assert_eq!(doc.chapters.len(), 1);
    assert_eq!(doc.chapters[0].title, "Chapter One");
    assert_eq!(doc.chapters[0].content.children().len(), 2);
}

#[test]
fn test_titlepage_keeps_empty_blocks() {
    let doc = assemble(&ConvertOptions::default());
    let section = &doc.chapters[0].content.children()[0];
    assert_eq!(section.children().len(), 1);
    assert_eq!(section.children()[0].classes(), &["ornament"]);
}

// ============================================================================
// Style Lookup Tests
// ============================================================================

#[test]
fn test_node_styles() {
    let doc = assemble(&ConvertOptions::default());
    let chapter = &doc.chapters[2];
    let nodes = chapter.content.children();

    let first = doc.style_for_node(&nodes[0]);
    assert_eq!(first.get(StyleKey::TextIndent), Some(&StyleValue::Number(0.0)));
    assert_eq!(first.get(StyleKey::Margin), Some(&StyleValue::Number(0.0)));

    let second = doc.style_for_node(&nodes[1]);
    assert_eq!(second.get(StyleKey::TextIndent), Some(&StyleValue::Number(11.0)));
    assert_eq!(second.media.len(), 1);

    let quote = doc.style_for_node(&nodes[2]);
    assert_eq!(quote.get(StyleKey::MarginVertical), Some(&StyleValue::Number(11.0)));
    assert_eq!(quote.get(StyleKey::MarginHorizontal), Some(&StyleValue::Number(22.0)));
}

#[test]
fn test_later_stylesheets_override_earlier_ones() {
    let doc = assemble(&ConvertOptions::default());
    let dedication = first_text(&doc.chapters[1].content).unwrap();
    assert_eq!(
        doc.style_for_node(dedication).get(StyleKey::TextAlign),
        Some(&StyleValue::text("right"))
    );
}

#[test]
fn test_hiding_rules_never_hide_text() {
    let doc = Document::assemble(
        Metadata::default(),
        ".hidden { display: none; color: gray }",
        ["<p class=\"hidden\">Still here</p>"],
        &ConvertOptions::default(),
    )
    .unwrap();
    let node = &doc.chapters[0].content.children()[0];
    assert_eq!(node.text(), Some("Still here"));
    let style = doc.style_for_node(node);
    assert_eq!(style.get(StyleKey::Display), None);
    assert_eq!(style.get(StyleKey::Color), Some(&StyleValue::text("gray")));
}

#[test]
fn test_oversized_stylesheet_falls_back_to_unstyled() {
    let options = ConvertOptions {
        styles: StyleLimits {
            max_css_bytes: 10,
            ..Default::default()
        },
        ..Default::default()
    };
    let doc = assemble(&options);
    assert!(doc.styles().is_empty());
    assert_eq!(doc.chapters.len(), 5);
    assert!(doc.style_for("p", &["first"]).is_empty());
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[cfg(feature = "serde")]
#[test]
fn test_serialize_chapter() {
    let doc = Document::assemble(
        Metadata::new("Book"),
        "p { margin: 1em 0; transform: rotate(2deg) }",
        ["<h1>One</h1><p class=\"a\">Text</p>"],
        &ConvertOptions::default(),
    )
    .unwrap();

    let chapter = serde_json::to_value(&doc.chapters[0]).unwrap();
    assert_eq!(chapter["title"], "One");
    assert_eq!(chapter["role"], "chapter");
    assert!(chapter.get("author").is_none());
    assert_eq!(chapter["content"]["type"], "container");
    assert_eq!(chapter["content"]["children"][0]["type"], "text");
    assert_eq!(chapter["content"]["children"][0]["text"], "Text");

    let node = &doc.chapters[0].content.children()[0];
    let style = serde_json::to_value(doc.style_for_node(node)).unwrap();
    assert_eq!(style["marginVertical"], 11.0);
    assert_eq!(style["marginHorizontal"], 0.0);
    assert_eq!(style["transform"][0]["operation"], "rotate");
    assert_eq!(style["transform"][0]["value"], "2deg");
}
