use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

impl Css3<'_> {
    fn parse_function_arguments(&mut self) -> CssResult<Vec<Node>> {
        log::trace!("parse_function_arguments");
        self.parse_value_sequence()
    }

    pub fn parse_function(&mut self) -> CssResult<Node> {
        log::trace!("parse_function");

        let loc = self.tokenizer.next_location();

        let name = self.consume_function()?;
        let arguments = self.nested(|parser| parser.parse_function_arguments())?;

        self.consume(TokenType::RParen)?;

        Ok(Node::new(NodeType::Function { name, arguments }, loc))
    }

    /// Parses `var(--name)` and `var(--name, fallback)`
    pub fn parse_variable(&mut self) -> CssResult<Node> {
        log::trace!("parse_variable");

        let loc = self.tokenizer.next_location();

        let name = self.consume_function()?;
        if !name.eq_ignore_ascii_case("var") {
            return Err(CssError::with_location(
                &format!("Expected var(), got {name}()"),
                loc,
            ));
        }

        self.consume_whitespace_comments();
        let name = self.consume_any_ident()?;
        if !name.starts_with("--") || name.len() < 3 {
            return Err(CssError::with_location(
                &format!("Expected custom property name, got {name}"),
                loc,
            ));
        }
        self.consume_whitespace_comments();

        let mut fallback = None;
        if self.tokenizer.lookahead(0).is_comma() {
            self.consume(TokenType::Comma)?;
            fallback = Some(self.nested(|parser| parser.parse_function_arguments())?);
        }

        self.consume(TokenType::RParen)?;

        Ok(Node::new(NodeType::Variable { name, fallback }, loc))
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
        ($func:ident, $input:expr, $expected:expr) => {
            let mut stream = ByteStream::new(Encoding::UTF8, None);
            stream.read_from_str($input);
            stream.close();

            let mut parser = Css3::new(&mut stream, ParserConfig::default());
            let result = parser.$func().unwrap();

            let w = Walker::new(&result);
            assert_eq!(w.walk_to_string(), $expected);
        };
    }

    #[test]
    fn test_parse_function() {
        test!(
            parse_function,
            "translate(10px, -50%)",
            "[Function] translate\n  [Dimension] 10px\n  [Operator] ,\n  [Percentage] -50\n"
        );
        test!(
            parse_function,
            "linear-gradient(to right, rgb(1, 2, 3) 0%)",
            "[Function] linear-gradient\n  [Ident] to\n  [Ident] right\n  [Operator] ,\n  [Function] rgb\n    [Number] 1\n    [Operator] ,\n    [Number] 2\n    [Operator] ,\n    [Number] 3\n  [Percentage] 0\n"
        );
    }

    #[test]
    fn test_parse_variable() {
        test!(parse_variable, "var(--gap)", "[Variable] --gap\n");
        test!(
            parse_variable,
            "var( --gap , 4px 2px )",
            "[Variable] --gap\n  [Dimension] 4px\n  [Dimension] 2px\n"
        );

        for input in ["var(gap)", "var(--gap 4px)", "var(--)"] {
            let mut stream = ByteStream::new(Encoding::UTF8, None);
            stream.read_from_str(input);
            stream.close();

            let mut parser = Css3::new(&mut stream, ParserConfig::default());
            assert!(parser.parse_variable().is_err(), "{input}");
        }
    }
}
