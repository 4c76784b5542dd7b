//! Benchmarks for stylesheet indexing and chapter tree building.
//!
//! Run with: cargo bench

use std::fmt::Write;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use quire::markup::TreeBuilder;
use quire::{ConvertOptions, Document, MarkupLimits, Metadata, StyleIndex, parse_fragment};

/// A stylesheet shaped like a typical ebook's: tag rules, class rules,
/// descendant selectors and a few media blocks.
fn sample_css() -> String {
    let mut css = String::from(
        "body { margin: 0; font-family: Georgia, serif }\n\
         p { text-indent: 1.2em; margin: 0 0 0.5em; line-height: 1.4 }\n\
         h1, h2 { text-align: center; font-weight: bold }\n\
         blockquote p { font-style: italic; margin: 1em 2em }\n\
         img.cover { width: 100%; object-fit: contain }\n",
    );
    for i in 0..200 {
        let _ = writeln!(
            css,
            ".c{i} {{ color: #{:06x}; padding: {}px {}px; transform: rotate({i}deg) scale(1.1) }}",
            i * 4099,
            i % 13,
            i % 7
        );
        let _ = writeln!(css, "p.c{i} {{ text-align: justify; font-size: {}pt }}", 9 + i % 5);
    }
    css.push_str("@media (max-width: 600px) { p { margin: 0 } .c1 { display: none } }\n");
    css
}

/// A chapter with nested sections, inline markup and entities.
fn sample_chapter() -> String {
    let mut html = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE html>\n\
         <html xmlns:epub=\"http://www.idpf.org/2007/ops\"><head><title>Sample</title>\
         <link rel=\"stylesheet\" href=\"core.css\"/></head>\
         <body epub:type=\"bodymatter\"><section><h1>Chapter One</h1>",
    );
    for i in 0..400 {
        let _ = write!(
            html,
            "<p class=\"c{}\">Paragraph {i} with <em>emphasis</em>, a <a href=\"#n{i}\">link</a> \
             and &ldquo;quoted&rdquo; text&mdash;then more.<br/>Second line.</p>",
            i % 200
        );
        if i % 25 == 0 {
            html.push_str("<blockquote><p>A quotation.</p><p>&#8212; Someone</p></blockquote>");
        }
    }
    html.push_str("</section></body></html>");
    html
}

// ============================================================================
// Stylesheet Benchmarks
// ============================================================================

fn bench_build_style_index(c: &mut Criterion) {
    let css = sample_css();

    c.bench_function("build_style_index", |b| {
        b.iter(|| StyleIndex::build(black_box(&css)));
    });
}

fn bench_style_lookup(c: &mut Criterion) {
    let index = StyleIndex::build(&sample_css());
    let classes = ["c42", "c7"];

    c.bench_function("style_lookup", |b| {
        b.iter(|| index.lookup(black_box("p"), black_box(&classes[..])));
    });
}

// ============================================================================
// Markup Benchmarks
// ============================================================================

fn bench_build_tree(c: &mut Criterion) {
    let html = sample_chapter();
    let limits = MarkupLimits::default();

    c.bench_function("build_tree", |b| {
        b.iter(|| TreeBuilder::new(black_box(&html), &limits).build());
    });
}

fn bench_parse_fragment(c: &mut Criterion) {
    let html = sample_chapter();
    let limits = MarkupLimits::default();

    c.bench_function("parse_fragment", |b| {
        b.iter(|| parse_fragment(black_box(&html), &limits));
    });
}

// ============================================================================
// Document Benchmarks
// ============================================================================

fn bench_assemble(c: &mut Criterion) {
    let css = sample_css();
    let chapters: Vec<String> = (0..10).map(|_| sample_chapter()).collect();
    let options = ConvertOptions::default();

    c.bench_function("assemble_document", |b| {
        b.iter(|| {
            Document::assemble(Metadata::new("Bench"), &css, &chapters, &options)
                .expect("non-empty spine")
        });
    });
}

criterion_group!(
    benches,
    // Stylesheets
    bench_build_style_index,
    bench_style_lookup,
    // Markup
    bench_build_tree,
    bench_parse_fragment,
    // Documents
    bench_assemble,
);
criterion_main!(benches);
