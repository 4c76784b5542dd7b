//! Stylesheet rule extraction.
//!
//! cssparser does the tokenization; this module only records, for every
//! style rule, its raw selector text, its raw declaration block, and the
//! `@media` text it is nested in. Interpretation happens in the cascade.

use cssparser::{
    AtRuleParser, CowRcStr, ParseError, Parser, ParserInput, ParserState, QualifiedRuleParser,
    StyleSheetParser,
};

/// A style rule as it appears in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    /// Selector list text, e.g. `"h1, p.lead"`.
    pub selectors: String,
    /// Declaration block text without the braces.
    pub block: String,
    /// Prelude text of the enclosing `@media` rule(s), if any.
    pub media: Option<String>,
}

/// Parse stylesheet text into raw rules in source order.
///
/// Grammar errors are ignored rule by rule (lenient parsing).
pub fn parse_rules(css: &str) -> Vec<RawRule> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rules = Vec::new();

    let mut rule_parser = TopLevelRuleParser {
        rules: &mut rules,
        media: None,
    };
    for result in StyleSheetParser::new(&mut parser, &mut rule_parser) {
        if let Err((error, slice)) = result {
            log::trace!("skipping unparseable rule {slice:?}: {:?}", error.kind);
        }
    }

    rules
}

/// Parser for style rules, at top level or inside `@media`.
struct TopLevelRuleParser<'a> {
    rules: &'a mut Vec<RawRule>,
    media: Option<String>,
}

/// Prelude for the at-rules that are kept.
enum AtRulePrelude {
    Media(String),
}

/// Consume the rest of `input`, returning the text it covered.
fn consume_raw<'i>(input: &mut Parser<'i, '_>) -> &'i str {
    let start = input.position();
    while input.next().is_ok() {}
    input.slice_from(start)
}

impl<'i> AtRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = AtRulePrelude;
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        if name.eq_ignore_ascii_case("media") {
            Ok(AtRulePrelude::Media(consume_raw(input).trim().to_string()))
        } else {
            // @font-face, @page, @import and friends carry nothing we map
            Err(input.new_custom_error(()))
        }
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let AtRulePrelude::Media(text) = prelude;
        let media = match &self.media {
            Some(outer) => format!("{outer} and {text}"),
            None => text,
        };

        let mut nested = TopLevelRuleParser {
            rules: &mut *self.rules,
            media: Some(media),
        };
        for result in StyleSheetParser::new(input, &mut nested) {
            if let Err((error, slice)) = result {
                log::trace!("skipping unparseable @media rule {slice:?}: {:?}", error.kind);
            }
        }
        Ok(())
    }
}

impl<'i> QualifiedRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = String;
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let selectors = consume_raw(input).trim();
        if selectors.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok(selectors.to_string())
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        self.rules.push(RawRule {
            selectors: prelude,
            block: consume_raw(input).to_string(),
            media: self.media.clone(),
        });
        Ok(())
    }
}

/// Split a declaration block into `(property, value)` pairs.
///
/// Entries are separated by `;` and split on their first `:`. Entries
/// without a colon or with an empty property are skipped.
pub fn split_declarations(block: &str) -> impl Iterator<Item = (&str, &str)> {
    block.split(';').filter_map(|entry| {
        let (property, value) = entry.split_once(':')?;
        let property = property.trim();
        (!property.is_empty()).then_some((property, value.trim()))
    })
}
