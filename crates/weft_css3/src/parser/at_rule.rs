mod charset;
mod import;
mod keyframes;
mod media;
mod namespace;
mod page;
mod region;
mod supports;

use crate::builder::SourceRangeKind;
use crate::cssom::rule::CssRuleKind;
use crate::node::{Node, NodeType};
use crate::parser::block::BlockParseMode;
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

/// At-rules that end with a semicolon instead of a block
fn is_statement_at_rule(kind: CssRuleKind) -> bool {
    matches!(
        kind,
        CssRuleKind::Namespace | CssRuleKind::Import | CssRuleKind::Charset
    )
}

fn block_parse_mode(kind: CssRuleKind) -> BlockParseMode {
    match kind {
        CssRuleKind::Keyframes => BlockParseMode::KeyframesBlock,
        CssRuleKind::Page => BlockParseMode::PageBlock,
        CssRuleKind::Region => BlockParseMode::RegionBlock,
        CssRuleKind::FontFace | CssRuleKind::Style => BlockParseMode::StyleBlock,
        _ => BlockParseMode::RegularBlock,
    }
}

impl Css3<'_> {
    fn parse_at_rule_prelude(&mut self, kind: CssRuleKind) -> CssResult<Option<Node>> {
        log::trace!("parse_at_rule_prelude");

        self.consume_whitespace_comments();
        let node = match kind {
            CssRuleKind::Media => Some(self.parse_at_rule_media_prelude()?),
            CssRuleKind::Supports => Some(self.parse_at_rule_supports_prelude()?),
            CssRuleKind::Keyframes => Some(self.parse_at_rule_keyframes_prelude()?),
            CssRuleKind::Page => Some(self.parse_at_rule_page_prelude()?),
            CssRuleKind::FontFace => None,
            CssRuleKind::Region => Some(self.parse_at_rule_region_prelude()?),
            CssRuleKind::Namespace => Some(self.parse_at_rule_namespace_prelude()?),
            CssRuleKind::Import => Some(self.parse_at_rule_import_prelude()?),
            CssRuleKind::Charset => Some(self.parse_at_rule_charset_prelude()?),
            CssRuleKind::Style => {
                return Err(CssError::with_location(
                    "A style rule has no at-rule prelude",
                    self.tokenizer.next_location(),
                ))
            }
        };
        self.consume_whitespace_comments();

        Ok(node)
    }

    // Either the at_rule parsing succeeds as a whole, or not. Unknown at-rules are always skipped,
    // known at-rules that fail to parse are skipped when config.ignore_errors is set, otherwise
    // the error is returned to the caller.
    pub fn parse_at_rule(&mut self, nested: bool) -> CssResult<Option<Node>> {
        log::trace!("parse_at_rule");

        let t = self.tokenizer.lookahead(0);
        let TokenType::AtKeyword(name) = &t.token_type else {
            return Err(self.unexpected("at-rule", &t));
        };

        if CssRuleKind::from_at_keyword(name).is_none() {
            log::warn!("Ignoring unknown at-rule @{} at {}", name, t.location);
            self.tokenizer.consume();
            self.skip_at_rule(nested);
            return Ok(None);
        }

        let start = self.tokenizer.position();
        match self.parse_at_rule_internal() {
            Ok(node) => Ok(Some(node)),
            Err(err) if self.config.ignore_errors => {
                log::warn!("Ignoring error in parse_at_rule: {}", err);
                self.tokenizer.rewind(start);
                self.skip_at_rule(nested);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn parse_at_rule_internal(&mut self) -> CssResult<Node> {
        let loc = self.tokenizer.next_location();

        let t = self.consume_any()?;
        let TokenType::AtKeyword(name) = t.token_type else {
            return Err(self.unexpected("at-rule", &t));
        };
        let name = name.to_ascii_lowercase();
        let kind = CssRuleKind::from_at_keyword(&name).ok_or_else(|| {
            CssError::with_location(&format!("Unknown at-rule @{name}"), loc)
        })?;

        let prelude = self.parse_at_rule_prelude(kind)?;
        let header_end = self.tokenizer.last_end_location();

        if is_statement_at_rule(kind) {
            let t = self.tokenizer.lookahead(0);
            match t.token_type {
                TokenType::Semicolon => {
                    self.tokenizer.consume();
                }
                TokenType::Eof => {}
                _ => return Err(self.unexpected(";", &t)),
            }

            self.record_source_range(SourceRangeKind::RuleHeader, loc, header_end);

            return Ok(Node::new(
                NodeType::AtRule {
                    name,
                    prelude,
                    block: None,
                },
                loc,
            ));
        }

        self.consume(TokenType::LCurly)?;
        let body_start = self.tokenizer.last_end_location();

        let block = self.parse_block(block_parse_mode(kind))?;

        let body_end = self.tokenizer.next_location();
        self.consume_block_end()?;

        self.record_source_range(SourceRangeKind::RuleHeader, loc, header_end);
        self.record_source_range(SourceRangeKind::RuleBody, body_start, body_end);

        Ok(Node::new(
            NodeType::AtRule {
                name,
                prelude,
                block: Some(block),
            },
            loc,
        ))
    }
}

#[cfg(test)]
mod tests {
    use weft_shared::byte_stream::Stream;
    use crate::walker::Walker;
    use crate::Css3;
    use weft_shared::byte_stream::{ByteStream, Encoding};
    use weft_shared::config::ParserConfig;

    fn parse(input: &str) -> Option<String> {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str(input);
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        parser
            .parse_at_rule(false)
            .ok()
            .flatten()
            .map(|node| Walker::new(&node).walk_to_string())
    }

    #[test]
    fn media_rule() {
        assert_eq!(
            parse("@media screen and (min-width: 100px) { a { color: red } }").as_deref(),
            Some("[AtRule] name: media\n  [MediaQueryList (1)]\n    [MediaQuery] modifier:  media_type: screen\n      [Feature] min-width\n        [Dimension] 100px\n  [Block]\n    [Rule]\n      [SelectorList (1)]\n        [Selector]\n          [TypeSelector] a\n      [Block]\n        [Declaration] property: color important: false\n          [Ident] red\n")
        );
    }

    #[test]
    fn supports_rule() {
        assert_eq!(
            parse("@supports (display: flex) { }").as_deref(),
            Some("[AtRule] name: supports\n  [SupportsDeclaration]\n    [Declaration] property: display important: false\n      [Ident] flex\n  [Block]\n")
        );
    }

    #[test]
    fn font_face_rule() {
        assert_eq!(
            parse("@FONT-FACE { font-family: x; src: url(x.woff) }").as_deref(),
            Some("[AtRule] name: font-face\n  [Block]\n    [Declaration] property: font-family important: false\n      [Ident] x\n    [Declaration] property: src important: false\n      [Url] x.woff\n")
        );
    }

    #[test]
    fn statement_rules() {
        assert_eq!(
            parse("@charset \"utf-8\";").as_deref(),
            Some("[AtRule] name: charset\n  [String] utf-8\n")
        );
        assert_eq!(
            parse("@namespace svg url(http://www.w3.org/2000/svg);").as_deref(),
            Some("[AtRule] name: namespace\n  [Namespace] prefix: svg uri: http://www.w3.org/2000/svg\n")
        );
        assert_eq!(
            parse("@import \"print.css\" print").as_deref(),
            Some("[AtRule] name: import\n  [Import] print.css\n    [MediaQueryList (1)]\n      [MediaQuery] modifier:  media_type: print\n")
        );
    }

    #[test]
    fn unknown_and_invalid_at_rules_are_skipped() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("@unknown foo { bar } @font-face foo { } @charset \"x\" y; @charset \"ok\";");
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        assert_eq!(parser.parse_at_rule(false), Ok(None));
        parser.consume_whitespace_comments();
        assert_eq!(parser.parse_at_rule(false), Ok(None));
        parser.consume_whitespace_comments();
        assert_eq!(parser.parse_at_rule(false), Ok(None));
        parser.consume_whitespace_comments();
        assert!(parser.parse_at_rule(false).is_ok_and(|n| n.is_some()));
    }

    #[test]
    fn strict_mode_returns_errors() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("@namespace 12;");
        stream.close();

        let config = ParserConfig {
            ignore_errors: false,
            ..Default::default()
        };
        let mut parser = Css3::new(&mut stream, config);
        assert!(parser.parse_at_rule(false).is_err());
    }
}
