//! Style index construction and lookup.
//!
//! Rules are registered into four buckets keyed by full selector, single
//! class, tag, and `tag.class`. Only the rightmost compound selector of a
//! rule is considered; ancestor context is ignored. Lookup layers the
//! buckets in a fixed order (tag, then each class, then each `tag.class`),
//! which is the entire specificity model.

use std::collections::HashMap;

use super::declaration::map_declaration;
use super::parse::media::MediaQuery;
use super::parse::stylesheet::{RawRule, parse_rules, split_declarations};
use super::types::Style;
use crate::error::{Error, Result};
use crate::options::StyleLimits;

/// Immutable, fully built style index.
#[derive(Debug, Clone, Default)]
pub struct StyleIndex {
    by_selector: HashMap<String, Style>,
    by_class: HashMap<String, Style>,
    by_tag: HashMap<String, Style>,
    by_tag_class: HashMap<String, Style>,
}

/// The rightmost compound selector of a selector, reduced to what the
/// buckets understand.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target<'a> {
    tag: Option<String>,
    classes: Vec<&'a str>,
    /// Carries an id, attribute or pseudo-class part.
    qualified: bool,
}

impl<'a> Target<'a> {
    fn parse(selector: &'a str) -> Self {
        let compound = selector
            .rsplit(|c: char| c.is_whitespace() || matches!(c, '>' | '+' | '~'))
            .next()
            .unwrap_or("");

        let tag_end = compound
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(compound.len());
        let tag = (tag_end > 0).then(|| compound[..tag_end].to_ascii_lowercase());
        let rest = &compound[tag_end..];
        let rest = rest.strip_prefix('*').unwrap_or(rest);

        let mut classes = Vec::new();
        let mut rest = rest;
        while let Some(after_dot) = rest.strip_prefix('.') {
            let end = after_dot
                .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
                .unwrap_or(after_dot.len());
            if end == 0 {
                break;
            }
            classes.push(&after_dot[..end]);
            rest = &after_dot[end..];
        }

        Target {
            tag,
            classes,
            qualified: !rest.is_empty(),
        }
    }
}

/// Builder that owns the buckets while rules are registered.
///
/// Lookups are only possible on the [`StyleIndex`] returned by
/// [`finish`](Self::finish), so a partially built index is never observed.
#[derive(Debug, Default)]
pub struct StyleIndexBuilder {
    index: StyleIndex,
}

impl StyleIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every rule of a parsed stylesheet, in source order.
    pub fn add_rules(&mut self, rules: &[RawRule]) {
        for rule in rules {
            let Some(style) = style_for_rule(rule) else {
                continue;
            };
            self.add_rule(&rule.selectors, &style);
        }
    }

    /// Register one style object against a comma-separated selector list.
    pub fn add_rule(&mut self, selectors: &str, style: &Style) {
        for selector in selectors.split(',') {
            self.register(selector, style);
        }
    }

    /// Register one style object against a single selector.
    pub fn register(&mut self, selector: &str, style: &Style) {
        let selector = selector.split_whitespace().collect::<Vec<_>>().join(" ");
        if selector.is_empty() {
            return;
        }
        let target = Target::parse(&selector);
        log::trace!("registering {selector:?} as {target:?}: {style:?}");

        let index = &mut self.index;
        if !target.qualified {
            match (&target.tag, target.classes.as_slice()) {
                (Some(tag), []) => merge_into(&mut index.by_tag, tag.clone(), style),
                (Some(tag), [class]) => {
                    merge_into(&mut index.by_class, (*class).to_string(), style);
                    merge_into(&mut index.by_tag_class, format!("{tag}.{class}"), style);
                }
                (None, [class]) => merge_into(&mut index.by_class, (*class).to_string(), style),
                // Compound classes never reach the per-class buckets
                _ => {}
            }
        }
        merge_into(&mut index.by_selector, selector, style);
    }

    pub fn finish(self) -> StyleIndex {
        let index = self.index;
        log::debug!(
            "style index: {} selectors, {} classes, {} tags, {} tag.class",
            index.by_selector.len(),
            index.by_class.len(),
            index.by_tag.len(),
            index.by_tag_class.len()
        );
        index
    }
}

fn merge_into(bucket: &mut HashMap<String, Style>, key: String, style: &Style) {
    bucket.entry(key).or_default().merge(style);
}

/// Map a rule's declarations into a style object.
///
/// Returns `None` when no declaration survives, or when the rule sits in an
/// `@media` block whose condition is not understood.
fn style_for_rule(rule: &RawRule) -> Option<Style> {
    let mut style = Style::new();
    for (property, value) in split_declarations(&rule.block) {
        match map_declaration(property, value) {
            Some(mapped) => style.props.extend(mapped),
            None => log::trace!("dropping declaration {property}: {value}"),
        }
    }
    if style.is_empty() {
        return None;
    }

    match &rule.media {
        None => Some(style),
        Some(text) => match MediaQuery::from_media_text(text) {
            Some(query) => Some(style.conditioned(query)),
            None => {
                log::debug!("dropping rule {:?} under @media {text}", rule.selectors);
                None
            }
        },
    }
}

impl StyleIndex {
    /// Build an index from stylesheet text with default limits.
    ///
    /// Never fails: a stylesheet that cannot be indexed yields an empty
    /// index, so the document still renders, unstyled.
    pub fn build(css: &str) -> Self {
        Self::build_with_limits(css, &StyleLimits::default())
    }

    /// Like [`build`](Self::build), with explicit limits.
    pub fn build_with_limits(css: &str, limits: &StyleLimits) -> Self {
        Self::try_build(css, limits).unwrap_or_else(|e| {
            log::warn!("ignoring stylesheet: {e}");
            Self::default()
        })
    }

    /// Build an index, reporting limit violations.
    pub fn try_build(css: &str, limits: &StyleLimits) -> Result<Self> {
        if css.len() > limits.max_css_bytes {
            return Err(Error::StylesheetTooLarge {
                len: css.len(),
                limit: limits.max_css_bytes,
            });
        }
        let rules = parse_rules(css);
        if rules.len() > limits.max_rules {
            return Err(Error::TooManyRules {
                count: rules.len(),
                limit: limits.max_rules,
            });
        }

        let mut builder = StyleIndexBuilder::new();
        builder.add_rules(&rules);
        Ok(builder.finish())
    }

    /// Effective style for an element.
    ///
    /// Overlays, in order: the tag entry, each class entry in list order,
    /// then each `tag.class` entry in list order. Later entries win.
    pub fn lookup<S: AsRef<str>>(&self, tag: &str, classes: &[S]) -> Style {
        let tag = tag.to_ascii_lowercase();
        let mut style = Style::new();

        if let Some(s) = self.by_tag.get(&tag) {
            style.overlay(s);
        }
        for class in classes {
            if let Some(s) = self.by_class.get(class.as_ref()) {
                style.overlay(s);
            }
        }
        for class in classes {
            if let Some(s) = self.by_tag_class.get(&format!("{tag}.{}", class.as_ref())) {
                style.overlay(s);
            }
        }
        style
    }

    /// Style registered for an exact (whitespace-normalized) selector.
    pub fn selector(&self, selector: &str) -> Option<&Style> {
        let selector = selector.split_whitespace().collect::<Vec<_>>().join(" ");
        self.by_selector.get(&selector)
    }

    pub fn class(&self, class: &str) -> Option<&Style> {
        self.by_class.get(class)
    }

    pub fn tag(&self, tag: &str) -> Option<&Style> {
        self.by_tag.get(&tag.to_ascii_lowercase())
    }

    pub fn tag_class(&self, tag: &str, class: &str) -> Option<&Style> {
        self.by_tag_class
            .get(&format!("{}.{class}", tag.to_ascii_lowercase()))
    }

    pub fn is_empty(&self) -> bool {
        self.by_selector.is_empty()
    }
}
