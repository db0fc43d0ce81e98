use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

/// Returns true when the value is a valid hex colour (without the leading `#`)
fn is_hex_color(value: &str) -> bool {
    matches!(value.len(), 3 | 4 | 6 | 8) && value.chars().all(|c| c.is_ascii_hexdigit())
}

impl Css3<'_> {
    /// Parses values until a token is found that can not start a value
    pub fn parse_value_sequence(&mut self) -> CssResult<Vec<Node>> {
        log::trace!("parse_value_sequence");

        let mut children = Vec::new();

        loop {
            self.consume_whitespace_comments();

            match self.parse_value()? {
                Some(child) => children.push(child),
                None => break,
            }
        }

        Ok(children)
    }

    // ok:
    //    some: some value is found
    //    none: no value is found (but this is not an error)
    // err:
    //    parsing went wrong
    fn parse_value(&mut self) -> CssResult<Option<Node>> {
        log::trace!("parse_value");

        let t = self.tokenizer.lookahead(0);
        let loc = t.location;

        let node = match t.token_type {
            TokenType::Ident(value) => {
                self.tokenizer.consume();
                Node::new(NodeType::Ident { value }, loc)
            }
            TokenType::Number(value) => {
                self.tokenizer.consume();
                Node::new(NodeType::Number { value }, loc)
            }
            TokenType::Percentage(value) => {
                self.tokenizer.consume();
                Node::new(NodeType::Percentage { value }, loc)
            }
            TokenType::Dimension { value, unit } => {
                self.tokenizer.consume();
                Node::new(NodeType::Dimension { value, unit }, loc)
            }
            TokenType::QuotedString(value) => {
                self.tokenizer.consume();
                Node::new(NodeType::String { value }, loc)
            }
            TokenType::Url(url) => {
                self.tokenizer.consume();
                Node::new(NodeType::Url { url }, loc)
            }
            TokenType::Hash(value) | TokenType::IDHash(value) => {
                if !is_hex_color(&value) {
                    return Err(CssError::with_location(
                        &format!("Invalid hex color #{value}"),
                        loc,
                    ));
                }
                self.tokenizer.consume();
                Node::new(NodeType::Hash { value }, loc)
            }
            TokenType::Function(name) => match name.to_ascii_lowercase().as_str() {
                "calc" | "-webkit-calc" | "min" | "max" => self.parse_calc()?,
                "var" => self.parse_variable()?,
                "url" => self.parse_url()?,
                _ => self.parse_function()?,
            },
            TokenType::Comma => {
                self.tokenizer.consume();
                Node::new(NodeType::Operator(",".into()), loc)
            }
            TokenType::Delim('/') => {
                self.tokenizer.consume();
                Node::new(NodeType::Operator("/".into()), loc)
            }
            TokenType::Delim(sign @ ('+' | '-')) => self.parse_signed_number(sign)?,
            TokenType::Semicolon
            | TokenType::RCurly
            | TokenType::RParen
            | TokenType::Delim('!')
            | TokenType::Eof => return Ok(None),
            _ => return Err(self.unexpected("value", &t)),
        };

        Ok(Some(node))
    }

    /// Folds a sign delimiter into the number that follows it (`- 5px` becomes `-5px`)
    fn parse_signed_number(&mut self, sign: char) -> CssResult<Node> {
        log::trace!("parse_signed_number");

        let loc = self.tokenizer.next_location();
        self.consume_delim(sign)?;
        self.consume_whitespace_comments();

        let factor = if sign == '-' { -1.0 } else { 1.0 };

        let t = self.consume_any()?;
        let node_type = match t.token_type {
            TokenType::Number(value) => NodeType::Number {
                value: value * factor,
            },
            TokenType::Percentage(value) => NodeType::Percentage {
                value: value * factor,
            },
            TokenType::Dimension { value, unit } => NodeType::Dimension {
                value: value * factor,
                unit,
            },
            _ => return Err(self.unexpected("number after sign", &t)),
        };

        Ok(Node::new(node_type, loc))
    }
}

#[cfg(test)]
mod tests {
    use weft_shared::byte_stream::Stream;
    use crate::node::{Node, NodeType};
    use crate::walker::Walker;
    use crate::Css3;
    use weft_shared::byte_stream::{ByteStream, Encoding, Location};
    use weft_shared::config::ParserConfig;

    macro_rules! test {
        ($input:expr, $expected:expr) => {
            let mut stream = ByteStream::new(Encoding::UTF8, None);
            stream.read_from_str($input);
            stream.close();

            let mut parser = Css3::new(&mut stream, ParserConfig::default());
            let children = parser.parse_value_sequence().unwrap();
            let result = Node::new(NodeType::Block { children }, Location::default());

            let w = Walker::new(&result);
            assert_eq!(w.walk_to_string(), $expected);
        };
    }

    #[test]
    fn test_parse_values() {
        test!(
            "1px solid #ff0000",
            "[Block]\n  [Dimension] 1px\n  [Ident] solid\n  [Hash] ff0000\n"
        );
        test!(
            "- 5px + 3 -2% 'x'",
            "[Block]\n  [Dimension] -5px\n  [Number] 3\n  [Percentage] -2\n  [String] x\n"
        );
        test!(
            "rgba(0, 0, 0, .5) url(a.png) url(\"b.png\")",
            "[Block]\n  [Function] rgba\n    [Number] 0\n    [Operator] ,\n    [Number] 0\n    [Operator] ,\n    [Number] 0\n    [Operator] ,\n    [Number] 0.5\n  [Url] a.png\n  [Url] b.png\n"
        );
        test!("red; blue", "[Block]\n  [Ident] red\n");
    }

    #[test]
    fn invalid_values() {
        for input in ["#12345", "#ggg", "[a]", "1px * 2", "{ }", "- red"] {
            let mut stream = ByteStream::new(Encoding::UTF8, None);
            stream.read_from_str(input);
            stream.close();

            let mut parser = Css3::new(&mut stream, ParserConfig::default());
            assert!(parser.parse_value_sequence().is_err(), "{input}");
        }
    }
}
