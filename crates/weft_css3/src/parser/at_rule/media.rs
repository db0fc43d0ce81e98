use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

impl Css3<'_> {
    pub(crate) fn parse_at_rule_media_prelude(&mut self) -> CssResult<Node> {
        log::trace!("parse_at_rule_media_prelude");
        self.parse_media_query_list()
    }

    fn at_media_query_list_end(&mut self) -> bool {
        matches!(
            self.tokenizer.lookahead(0).token_type,
            TokenType::LCurly | TokenType::Semicolon | TokenType::Eof
        )
    }

    /// Parses a comma separated list of media queries. An invalid query does not invalidate the
    /// list, but is replaced by `not all`.
    pub fn parse_media_query_list(&mut self) -> CssResult<Node> {
        log::trace!("parse_media_query_list");

        self.consume_whitespace_comments();
        let loc = self.tokenizer.next_location();

        let mut media_queries = vec![];
        if self.at_media_query_list_end() {
            return Ok(Node::new(NodeType::MediaQueryList { media_queries }, loc));
        }

        loop {
            self.consume_whitespace_comments();

            let start = self.tokenizer.position();
            let query_loc = self.tokenizer.next_location();

            match self.parse_media_query() {
                Ok(query) => media_queries.push(query),
                Err(err) if self.config.ignore_errors => {
                    log::warn!("Replacing invalid media query with 'not all': {}", err);
                    self.tokenizer.rewind(start);
                    self.skip_media_query();
                    media_queries.push(Node::new(
                        NodeType::MediaQuery {
                            modifier: "not".to_string(),
                            media_type: "all".to_string(),
                            features: vec![],
                        },
                        query_loc,
                    ));
                }
                Err(err) => return Err(err),
            }

            self.consume_whitespace_comments();
            if !self.tokenizer.lookahead(0).is_comma() {
                break;
            }
            self.tokenizer.consume();
        }

        Ok(Node::new(NodeType::MediaQueryList { media_queries }, loc))
    }

    /// Skips to the comma that starts the next media query, or the end of the list
    fn skip_media_query(&mut self) {
        loop {
            let t = self.tokenizer.lookahead(0);
            match t.token_type {
                TokenType::Comma
                | TokenType::LCurly
                | TokenType::RCurly
                | TokenType::Semicolon
                | TokenType::Eof => return,
                TokenType::LParen | TokenType::Function(_) => {
                    self.tokenizer.consume();
                    self.skip_balanced(TokenType::RParen);
                }
                TokenType::LBracket => {
                    self.tokenizer.consume();
                    self.skip_balanced(TokenType::RBracket);
                }
                _ => {
                    self.tokenizer.consume();
                }
            }
        }
    }

    pub fn parse_media_query(&mut self) -> CssResult<Node> {
        log::trace!("parse_media_query");

        let loc = self.tokenizer.next_location();

        let mut modifier = String::new();
        let mut media_type = String::new();
        let mut features = vec![];

        if self.tokenizer.lookahead(0).token_type == TokenType::LParen {
            features.push(self.parse_media_feature()?);
        } else {
            let mut ident = self.consume_any_ident()?.to_ascii_lowercase();
            if ident == "only" || ident == "not" {
                modifier = ident;
                self.consume_whitespace_comments();
                ident = self.consume_any_ident()?.to_ascii_lowercase();
            }

            if matches!(ident.as_str(), "and" | "or" | "only" | "not") {
                return Err(CssError::with_location(
                    &format!("Invalid media type '{ident}'"),
                    loc,
                ));
            }
            media_type = ident;
        }

        loop {
            self.consume_whitespace_comments();
            if !self.tokenizer.lookahead(0).is_ident_ci("and") {
                break;
            }
            self.tokenizer.consume();
            self.consume_whitespace_comments();

            features.push(self.parse_media_feature()?);
        }

        let t = self.tokenizer.lookahead(0);
        match t.token_type {
            TokenType::Comma | TokenType::LCurly | TokenType::Semicolon | TokenType::Eof => {}
            _ => return Err(self.unexpected("end of media query", &t)),
        }

        Ok(Node::new(
            NodeType::MediaQuery {
                modifier,
                media_type,
                features,
            },
            loc,
        ))
    }

    /// Parses `(name)` or `(name: value)`
    fn parse_media_feature(&mut self) -> CssResult<Node> {
        log::trace!("parse_media_feature");

        let loc = self.tokenizer.next_location();

        self.consume(TokenType::LParen)?;
        self.consume_whitespace_comments();

        let name = self.consume_any_ident()?.to_ascii_lowercase();
        self.consume_whitespace_comments();

        let mut value = None;
        if self.tokenizer.lookahead(0).is_colon() {
            self.tokenizer.consume();

            let values = self.parse_value_sequence()?;
            if values.is_empty() {
                return Err(CssError::with_location(
                    &format!("Expected value for media feature {name}"),
                    loc,
                ));
            }
            value = Some(values);
        }

        self.consume_whitespace_comments();
        self.consume(TokenType::RParen)?;

        Ok(Node::new(NodeType::Feature { name, value }, loc))
    }
}

#[cfg(test)]
mod tests {
    use weft_shared::byte_stream::Stream;
    use crate::walker::Walker;
    use crate::Css3;
    use weft_shared::byte_stream::{ByteStream, Encoding};
    use weft_shared::config::ParserConfig;

    macro_rules! test {
        ($input:expr, $expected:expr) => {
            let mut stream = ByteStream::new(Encoding::UTF8, None);
            stream.read_from_str($input);
            stream.close();

            let mut parser = Css3::new(&mut stream, ParserConfig::default());
            let result = parser.parse_media_query_list().unwrap();

            let w = Walker::new(&result);
            assert_eq!(w.walk_to_string(), $expected);
        };
    }

    #[test]
    fn test_parse_media_query_list() {
        test!(
            "screen, PRINT",
            "[MediaQueryList (2)]\n  [MediaQuery] modifier:  media_type: screen\n  [MediaQuery] modifier:  media_type: print\n"
        );
        test!(
            "only screen and (color) and (max-width: 600px)",
            "[MediaQueryList (1)]\n  [MediaQuery] modifier: only media_type: screen\n    [Feature] color\n    [Feature] max-width\n      [Dimension] 600px\n"
        );
        test!(
            "(orientation: landscape)",
            "[MediaQueryList (1)]\n  [MediaQuery] modifier:  media_type: \n    [Feature] orientation\n      [Ident] landscape\n"
        );
        test!("", "[MediaQueryList (0)]\n");
    }

    #[test]
    fn invalid_query_becomes_not_all() {
        test!(
            "screen and, print, (max-width:) { }",
            "[MediaQueryList (3)]\n  [MediaQuery] modifier: not media_type: all\n  [MediaQuery] modifier:  media_type: print\n  [MediaQuery] modifier: not media_type: all\n"
        );
        test!(
            "not and (color)",
            "[MediaQueryList (1)]\n  [MediaQuery] modifier: not media_type: all\n"
        );
    }

    #[test]
    fn strict_mode_rejects_invalid_query() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("screen 12px");
        stream.close();

        let config = ParserConfig {
            ignore_errors: false,
            ..Default::default()
        };
        let mut parser = Css3::new(&mut stream, config);
        assert!(parser.parse_media_query_list().is_err());
    }
}
