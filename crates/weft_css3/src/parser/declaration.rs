use crate::builder::SourceRangeKind;
use crate::node::{Node, NodeType};
use crate::properties;
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

impl Css3<'_> {
    pub fn parse_property_name(&mut self) -> CssResult<String> {
        log::trace!("parse_property_name");

        let t = self.consume_any()?;
        match t.token_type {
            TokenType::Ident(name) if name.starts_with("--") => Ok(name),
            TokenType::Ident(name) => Ok(name.to_ascii_lowercase()),
            _ => Err(self.unexpected("property name", &t)),
        }
    }

    /// Parses a single declaration. A declaration that can not be parsed is skipped up to the
    /// next `;` or the end of the block, without affecting the declarations around it.
    pub fn parse_declaration(&mut self) -> CssResult<Option<Node>> {
        log::trace!("parse_declaration");

        let start = self.tokenizer.position();
        match self.parse_declaration_internal(true) {
            Ok(declaration) => Ok(Some(declaration)),
            Err(err) if self.config.ignore_errors => {
                log::warn!("Ignoring error in parse_declaration: {}", err);
                self.tokenizer.rewind(start);
                self.skip_declaration();
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Parses a declaration inside a declaration list. The declaration must be followed by `;`,
    /// `}` or the end of the stream.
    pub(crate) fn parse_declaration_in_block(&mut self) -> CssResult<Option<Node>> {
        let start = self.tokenizer.position();
        let result = self.parse_declaration_internal(true).and_then(|node| {
            let t = self.tokenizer.lookahead(0);
            match t.token_type {
                TokenType::Semicolon | TokenType::RCurly | TokenType::Eof => Ok(node),
                _ => Err(self.unexpected("; or }", &t)),
            }
        });

        match result {
            Ok(declaration) => Ok(Some(declaration)),
            Err(err) if self.config.ignore_errors => {
                log::warn!("Ignoring error in parse_declaration: {}", err);
                self.tokenizer.rewind(start);
                self.skip_declaration();
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Parses `property: value [!important]`. When `validate` is false, unknown properties are
    /// accepted (as needed inside `@supports` conditions).
    pub(crate) fn parse_declaration_internal(&mut self, validate: bool) -> CssResult<Node> {
        let loc = self.tokenizer.next_location();

        let property = self.parse_property_name()?;
        if validate && !properties::is_valid_property(&property) {
            return Err(CssError::with_location(
                &format!("Unknown property {property}"),
                loc,
            ));
        }

        self.consume_whitespace_comments();
        self.consume(TokenType::Colon)?;
        self.consume_whitespace_comments();

        let value = self.parse_value_sequence()?;
        if value.is_empty() {
            return Err(CssError::with_location(
                &format!("Expected value for property {property}"),
                self.tokenizer.next_location(),
            ));
        }

        let mut important = false;
        if self.tokenizer.lookahead(0).is_delim('!') {
            self.consume_delim('!')?;
            self.consume_whitespace_comments();
            self.consume_ident_ci("important")?;
            self.consume_whitespace_comments();
            important = true;
        }

        let end = self.tokenizer.last_end_location();
        self.record_source_range(SourceRangeKind::Declaration, loc, end);

        Ok(Node::new(
            NodeType::Declaration {
                property,
                value,
                important,
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

    macro_rules! test {
        ($input:expr, $expected:expr) => {
            let mut stream = ByteStream::new(Encoding::UTF8, None);
            stream.read_from_str($input);
            stream.close();

            let mut parser = Css3::new(&mut stream, ParserConfig::default());
            let result = parser.parse_declaration().unwrap().unwrap();

            let w = Walker::new(&result);
            assert_eq!(w.walk_to_string(), $expected);
        };
    }

    macro_rules! test_invalid {
        ($input:expr) => {
            let mut stream = ByteStream::new(Encoding::UTF8, None);
            stream.read_from_str($input);
            stream.close();

            let mut parser = Css3::new(&mut stream, ParserConfig::default());
            assert_eq!(parser.parse_declaration(), Ok(None));
        };
    }

    #[test]
    fn test_parse_declaration() {
        test!(
            "Color : red",
            "[Declaration] property: color important: false\n  [Ident] red\n"
        );
        test!(
            "font: 12px/1.5 Arial, sans-serif ! IMPORTANT",
            "[Declaration] property: font important: true\n  [Dimension] 12px\n  [Operator] /\n  [Number] 1.5\n  [Ident] Arial\n  [Operator] ,\n  [Ident] sans-serif\n"
        );
        test!(
            "--Main-Color: #06c",
            "[Declaration] property: --Main-Color important: false\n  [Hash] 06c\n"
        );
        test!(
            "-webkit-flex-pack: justify",
            "[Declaration] property: -webkit-flex-pack important: false\n  [Ident] justify\n"
        );
    }

    #[test]
    fn invalid_declarations() {
        test_invalid!("bogus-prop: 1 2 3");
        test_invalid!("color:");
        test_invalid!("color red");
        test_invalid!("color: red !imported");
        test_invalid!("-webkit-bogus: 1");
    }
}
