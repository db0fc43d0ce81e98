//! CSS3 parser and object model
//!
//! The parser is a hand written recursive descent parser that turns a token stream into an AST
//! ([`node::Node`]). Every completed top level rule is converted into its CSSOM form right away
//! and handed to a [`builder::CssBuilder`]. Invalid constructs are dropped following the css error
//! recovery rules: an invalid selector drops its rule, an invalid declaration only drops itself
//! and unknown at-rules are skipped as a whole.
use weft_shared::byte_stream::Stream;
use crate::builder::{CssBuilder, StylesheetBuilder};
use crate::convert::Converter;
use crate::cssom::media::MediaQueryList;
use crate::cssom::rule::Keyframe;
use crate::cssom::selector::SelectorList;
use crate::cssom::stylesheet::CssStylesheet;
use crate::cssom::value::{CssDeclarationBlock, ValueList};
use crate::node::{Node, NodeType};
use crate::tokenizer::{TokenType, Tokenizer};
use weft_shared::byte_stream::{ByteStream, Encoding};
use weft_shared::config::{Context, ParserConfig};
use weft_shared::errors::{CssError, CssResult};

pub mod builder;
mod convert;
pub mod cssom;
pub mod node;
pub mod parser;
pub mod properties;
pub mod tokenizer;
pub mod walker;

pub struct Css3<'stream> {
    /// The tokenizer is responsible for reading the input stream and producing tokens
    pub tokenizer: Tokenizer<'stream>,
    /// The parser configuration as given
    config: ParserConfig,
    /// Source ranges that have not been handed to the builder yet
    source_ranges: Vec<builder::SourceRange>,
    /// Current nesting level of the productions that recurse
    depth: usize,
}

fn stream_from_str(data: &str) -> ByteStream {
    let mut stream = ByteStream::new(Encoding::UTF8, None);
    stream.read_from_str(data);
    stream.close();
    stream
}

fn strict_config(context: Context) -> ParserConfig {
    ParserConfig {
        context,
        ignore_errors: false,
        ..Default::default()
    }
}

impl<'stream> Css3<'stream> {
    /// Creates a new parser on the given stream. The tokenizer starts at the configured location.
    pub(crate) fn new(stream: &'stream mut ByteStream, config: ParserConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(stream, config.location),
            config,
            source_ranges: Vec::new(),
            depth: 0,
        }
    }

    /// Parses a string into a stylesheet with the default builder
    pub fn parse_str(data: &str, config: ParserConfig) -> CssResult<CssStylesheet> {
        let mut stream = stream_from_str(data);

        let mut builder = StylesheetBuilder::new(config.source.clone());
        Css3::parse_stream(&mut stream, config, &mut builder)?;

        Ok(builder.finish())
    }

    /// Parses the stream and hands every rule to the builder as soon as it is complete. Only
    /// the stylesheet, rule and at-rule contexts produce rules.
    pub fn parse_stream(
        stream: &mut ByteStream,
        config: ParserConfig,
        builder: &mut dyn CssBuilder,
    ) -> CssResult<()> {
        let context = config.context;
        let ignore_errors = config.ignore_errors;

        log::trace!("parse_stream in context {:?}", context);

        let mut parser = Css3::new(stream, config);
        let mut converter = Converter::new(builder, ignore_errors);

        match context {
            Context::Stylesheet => {
                while parser.skip_to_next_stylesheet_rule() {
                    let node = parser.parse_stylesheet_rule()?;
                    parser.flush_source_ranges(&mut converter);

                    if let Some(node) = node {
                        converter.convert_top_level(&node)?;
                    }
                }
            }
            Context::Rule | Context::AtRule => {
                let node = parser.parse_single_rule(context)?;
                parser.expect_eof()?;
                parser.flush_source_ranges(&mut converter);

                if let Some(node) = node {
                    converter.convert_top_level(&node)?;
                }
            }
            _ => {
                return Err(CssError::new(&format!(
                    "Context {context:?} does not produce rules"
                )))
            }
        }

        Ok(())
    }

    /// Parses the stream into an AST without converting it. Used by tooling to dump the tree.
    pub fn parse_ast(stream: &mut ByteStream, config: ParserConfig) -> CssResult<Node> {
        let context = config.context;
        let mut parser = Css3::new(stream, config);

        let node = match context {
            Context::Stylesheet => parser.parse_stylesheet()?,
            Context::Rule | Context::AtRule => parser
                .parse_single_rule(context)?
                .ok_or_else(|| CssError::new("No valid rule found"))?,
            Context::Declaration => {
                parser.consume_whitespace_comments();
                let node = parser
                    .parse_declaration()?
                    .ok_or_else(|| CssError::new("No valid declaration found"))?;
                if parser.tokenizer.lookahead(0).token_type == TokenType::Semicolon {
                    parser.tokenizer.consume();
                }
                node
            }
            Context::DeclarationList => parser.parse_declaration_list()?,
            Context::Selector => parser.parse_selector_list()?,
            Context::MediaQueryList => parser.parse_media_query_list()?,
            Context::Value => {
                let loc = parser.tokenizer.next_location();
                let children = parser.parse_value_sequence()?;
                Node::new(NodeType::Block { children }, loc)
            }
        };

        parser.expect_eof()?;

        Ok(node)
    }

    /// Parses a single rule. Fails on anything that is not exactly one valid rule.
    pub fn parse_rule_str(data: &str) -> CssResult<CssStylesheet> {
        let mut stream = stream_from_str(data);

        let mut builder = StylesheetBuilder::new(None);
        Css3::parse_stream(&mut stream, strict_config(Context::Rule), &mut builder)?;

        Ok(builder.finish())
    }

    /// Parses the contents of a `style` attribute. Invalid declarations are dropped.
    pub fn parse_declaration_list_str(data: &str) -> CssResult<CssDeclarationBlock> {
        let mut stream = stream_from_str(data);

        let config = ParserConfig {
            context: Context::DeclarationList,
            ..Default::default()
        };
        let mut parser = Css3::new(&mut stream, config);
        let block = parser.parse_declaration_list()?;

        convert::declaration_block(&block)
    }

    /// Parses a selector list, as used by `querySelector()` like apis
    pub fn parse_selector_str(data: &str) -> CssResult<SelectorList> {
        let mut stream = stream_from_str(data);

        let mut parser = Css3::new(&mut stream, strict_config(Context::Selector));
        let node = parser.parse_selector_list()?;
        parser.expect_eof()?;

        let mut builder = StylesheetBuilder::new(None);
        Converter::new(&mut builder, false).selector_list(&node)
    }

    /// Parses a media query list, as found in `media` attributes. Invalid queries become
    /// `not all`.
    pub fn parse_media_query_list_str(data: &str) -> CssResult<MediaQueryList> {
        let mut stream = stream_from_str(data);

        let config = ParserConfig {
            context: Context::MediaQueryList,
            ..Default::default()
        };
        let mut parser = Css3::new(&mut stream, config);
        let node = parser.parse_media_query_list()?;
        parser.expect_eof()?;

        convert::media_query_list(&node)
    }

    /// Parses the value of the given property
    pub fn parse_value_str(property: &str, data: &str) -> CssResult<ValueList> {
        if !properties::is_valid_property(property) {
            return Err(CssError::new(&format!("Unknown property {property}")));
        }

        let mut stream = stream_from_str(data);

        let mut parser = Css3::new(&mut stream, strict_config(Context::Value));
        parser.consume_whitespace_comments();
        let values = parser.parse_value_sequence()?;
        parser.expect_eof()?;

        if values.is_empty() {
            return Err(CssError::new(&format!("Expected value for {property}")));
        }

        convert::value_list(&values)
    }

    /// Parses a single keyframe like `50% { opacity: 0.5 }`
    pub fn parse_keyframe_rule_str(data: &str) -> CssResult<Keyframe> {
        let mut stream = stream_from_str(data);

        let mut parser = Css3::new(&mut stream, strict_config(Context::Rule));
        parser.consume_whitespace_comments();
        let node = parser.parse_keyframe_internal()?;
        parser.expect_eof()?;

        convert::keyframe(&node)
    }

    fn parse_single_rule(&mut self, context: Context) -> CssResult<Option<Node>> {
        self.consume_whitespace_comments();

        let t = self.tokenizer.lookahead(0);
        let is_at_rule = matches!(t.token_type, TokenType::AtKeyword(_));

        match context {
            Context::AtRule if !is_at_rule => Err(self.unexpected("at-rule", &t)),
            _ if is_at_rule => self.parse_at_rule(false),
            _ => self.parse_rule(false),
        }
    }

    fn flush_source_ranges(&mut self, converter: &mut Converter<'_>) {
        for range in self.source_ranges.drain(..) {
            converter.source_range(range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SourceRangeKind;
    use crate::cssom::rule::CssRule;
    use crate::cssom::value::CssValue;
    use crate::walker::Walker;
    use simple_logger::SimpleLogger;
    use weft_shared::byte_stream::Location;

    #[test]
    fn parse_stylesheet() {
        let _ = SimpleLogger::new().init();

        let sheet = Css3::parse_str(
            "@charset \"utf-8\";\n@media screen { a { color: red } }\nb { margin: 0 }",
            ParserConfig::default(),
        )
        .unwrap();

        assert_eq!(sheet.rules.len(), 3);
        assert_eq!(sheet.arena.len(), 4);
        assert_eq!(
            sheet.css_text(),
            "@charset \"utf-8\";\n@media screen { a { color: red; } }\nb { margin: 0; }"
        );
    }

    #[test]
    fn strict_mode_reports_first_error() {
        let config = ParserConfig {
            ignore_errors: false,
            ..Default::default()
        };

        let err = Css3::parse_str("a { color: red }\nb { bogus: 1 }", config).unwrap_err();
        assert_eq!(err.location.map(|l| l.line()), Some(2));
    }

    #[test]
    fn source_ranges_are_reported() {
        let config = ParserConfig {
            track_source_ranges: true,
            location: Location::new(10, 5, 0),
            ..Default::default()
        };

        let mut stream = stream_from_str("a { color: red }");
        let mut builder = StylesheetBuilder::new(None);
        Css3::parse_stream(&mut stream, config, &mut builder).unwrap();

        let ranges = builder.source_ranges();
        let kinds: Vec<SourceRangeKind> = ranges.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SourceRangeKind::Declaration,
                SourceRangeKind::RuleHeader,
                SourceRangeKind::RuleBody
            ]
        );
        assert_eq!(ranges[0].start.line(), 10);
        assert_eq!(ranges[0].start.column(), 9);
        assert_eq!(ranges[1].start.column(), 5);
    }

    #[test]
    fn string_entry_points() {
        let block = Css3::parse_declaration_list_str("color: red; bogus: 1; width: 10px").unwrap();
        assert_eq!(block.css_text(), "color: red; width: 10px;");

        let selectors = Css3::parse_selector_str("ul li:nth-child(odd), a[href^='http']").unwrap();
        assert_eq!(selectors.len(), 2);
        assert_eq!(
            selectors.selector_text(),
            "ul li:nth-child(2n+1), a[href^=\"http\"]"
        );
        assert!(Css3::parse_selector_str("a {").is_err());

        let media = Css3::parse_media_query_list_str("screen, only and").unwrap();
        assert_eq!(media.css_text(), "screen, not all");

        let value = Css3::parse_value_str("margin", "0 auto").unwrap();
        assert_eq!(value.0, vec![CssValue::number(0.0), CssValue::Ident("auto".into())]);
        assert!(Css3::parse_value_str("bogus", "1").is_err());
        assert!(Css3::parse_value_str("margin", "").is_err());

        let keyframe = Css3::parse_keyframe_rule_str("from, 50% { opacity: 0 }").unwrap();
        assert_eq!(keyframe.keys, vec![0.0, 0.5]);

        let sheet = Css3::parse_rule_str("@media print { p { } }").unwrap();
        assert!(matches!(sheet.rules().next(), Some(CssRule::Media(_))));
        assert!(Css3::parse_rule_str("p { } q { }").is_err());
    }

    #[test]
    fn ast_contexts() {
        let mut stream = stream_from_str("color: red !important;");
        let config = ParserConfig {
            context: Context::Declaration,
            ..Default::default()
        };
        let node = Css3::parse_ast(&mut stream, config).unwrap();
        assert_eq!(
            Walker::new(&node).walk_to_string(),
            "[Declaration] property: color important: true\n  [Ident] red\n"
        );

        let mut stream = stream_from_str("1px solid");
        let config = ParserConfig {
            context: Context::Value,
            ..Default::default()
        };
        let node = Css3::parse_ast(&mut stream, config).unwrap();
        assert_eq!(
            Walker::new(&node).walk_to_string(),
            "[Block]\n  [Dimension] 1px\n  [Ident] solid\n"
        );
    }

    #[test]
    fn builder_needs_rule_context() {
        let mut stream = stream_from_str("color: red");
        let config = ParserConfig {
            context: Context::Declaration,
            ..Default::default()
        };
        let mut builder = StylesheetBuilder::new(None);
        assert!(Css3::parse_stream(&mut stream, config, &mut builder).is_err());
    }
}
