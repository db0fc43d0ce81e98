use crate::node::{Node, NodeType};
use crate::parser::block::BlockParseMode;
use crate::tokenizer::{Number, TokenType};
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

impl Css3<'_> {
    /// The name of a keyframes rule is an identifier or a string
    pub(crate) fn parse_at_rule_keyframes_prelude(&mut self) -> CssResult<Node> {
        log::trace!("parse_at_rule_keyframes_prelude");

        let t = self.consume_any()?;
        match t.token_type {
            TokenType::Ident(value) => Ok(Node::new(NodeType::Ident { value }, t.location)),
            TokenType::QuotedString(value) => {
                Ok(Node::new(NodeType::String { value }, t.location))
            }
            _ => Err(self.unexpected("keyframes name", &t)),
        }
    }

    /// Parses the comma separated keys of a keyframe. `from` is 0.0, `to` is 1.0 and percentages
    /// are converted to fractions.
    pub(crate) fn parse_keyframe_keys(&mut self) -> CssResult<Vec<Number>> {
        log::trace!("parse_keyframe_keys");

        let mut keys = vec![];

        loop {
            self.consume_whitespace_comments();

            let t = self.consume_any()?;
            let key = match &t.token_type {
                TokenType::Ident(v) if v.eq_ignore_ascii_case("from") => 0.0,
                TokenType::Ident(v) if v.eq_ignore_ascii_case("to") => 1.0,
                TokenType::Percentage(v) if (0.0..=100.0).contains(v) => v / 100.0,
                TokenType::Percentage(v) => {
                    return Err(CssError::with_location(
                        &format!("Keyframe key {v}% is out of range"),
                        t.location,
                    ))
                }
                _ => return Err(self.unexpected("keyframe key", &t)),
            };
            keys.push(key);

            self.consume_whitespace_comments();
            if !self.tokenizer.lookahead(0).is_comma() {
                break;
            }
            self.tokenizer.consume();
        }

        Ok(keys)
    }

    /// Parses a single keyframe. An invalid keyframe is dropped without affecting the other
    /// keyframes of the rule.
    pub fn parse_keyframe(&mut self) -> CssResult<Option<Node>> {
        log::trace!("parse_keyframe");

        let start = self.tokenizer.position();
        match self.parse_keyframe_internal() {
            Ok(node) => Ok(Some(node)),
            Err(err) if self.config.ignore_errors => {
                log::warn!("Ignoring error in parse_keyframe: {}", err);
                self.tokenizer.rewind(start);
                self.skip_qualified_rule(true);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub(crate) fn parse_keyframe_internal(&mut self) -> CssResult<Node> {
        let loc = self.tokenizer.next_location();

        let keys = self.parse_keyframe_keys()?;
        self.consume_whitespace_comments();

        self.consume(TokenType::LCurly)?;
        let block = self.parse_block(BlockParseMode::StyleBlock)?;
        self.consume_block_end()?;

        Ok(Node::new(NodeType::Keyframe { keys, block }, loc))
    }
}

#[cfg(test)]
mod tests {
    use weft_shared::byte_stream::Stream;
    use crate::walker::Walker;
    use crate::Css3;
    use test_case::test_case;
    use weft_shared::byte_stream::{ByteStream, Encoding};
    use weft_shared::config::ParserConfig;

    #[test_case("from", Some(vec![0.0]))]
    #[test_case("0%", Some(vec![0.0]))]
    #[test_case("TO", Some(vec![1.0]))]
    #[test_case("25%, 75%", Some(vec![0.25, 0.75]))]
    #[test_case("100%", Some(vec![1.0]))]
    #[test_case("101%", None)]
    #[test_case("-1%", None)]
    #[test_case("50", None)]
    #[test_case("middle", None)]
    fn keyframe_keys(input: &str, expected: Option<Vec<f32>>) {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str(input);
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        assert_eq!(parser.parse_keyframe_keys().ok(), expected);
    }

    #[test]
    fn invalid_keyframe_is_dropped() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("@keyframes fade { from { opacity: 0 } 150% { opacity: 5 } to { opacity: 1 } }");
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        let result = parser.parse_at_rule(false).unwrap().unwrap();

        assert_eq!(
            Walker::new(&result).walk_to_string(),
            "[AtRule] name: keyframes\n  [Ident] fade\n  [Block]\n    [Keyframe] 0\n      [Block]\n        [Declaration] property: opacity important: false\n          [Number] 0\n    [Keyframe] 1\n      [Block]\n        [Declaration] property: opacity important: false\n          [Number] 1\n"
        );
    }

    #[test]
    fn vendor_prefixed_keyframes() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("@-webkit-keyframes \"spin\" { 0%, 50% { } }");
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        let result = parser.parse_at_rule(false).unwrap().unwrap();

        assert_eq!(
            Walker::new(&result).walk_to_string(),
            "[AtRule] name: -webkit-keyframes\n  [String] spin\n  [Block]\n    [Keyframe] 0, 0.5\n      [Block]\n"
        );
    }
}
