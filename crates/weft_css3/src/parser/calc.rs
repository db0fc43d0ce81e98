use crate::cssom::value::Unit;
use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

impl Css3<'_> {
    /// Parses `calc()`, `-webkit-calc()`, `min()` and `max()` into an expression tree. The
    /// expression is not evaluated, only its structure is validated.
    pub fn parse_calc(&mut self) -> CssResult<Node> {
        log::trace!("parse_calc");

        let loc = self.tokenizer.next_location();

        let name = self.consume_function()?.to_ascii_lowercase();
        let allow_comma = match name.as_str() {
            "calc" | "-webkit-calc" => false,
            "min" | "max" => true,
            _ => {
                return Err(CssError::with_location(
                    &format!("Unknown calculation function {name}()"),
                    loc,
                ))
            }
        };

        let expr = self.nested(|parser| parser.parse_calc_expr(allow_comma))?;
        self.consume(TokenType::RParen)?;

        Ok(Node::new(NodeType::Calc { name, expr }, loc))
    }

    /// Parses operands separated by operators up to the closing parenthesis
    fn parse_calc_expr(&mut self, allow_comma: bool) -> CssResult<Vec<Node>> {
        log::trace!("parse_calc_expr");

        let mut expr = Vec::new();
        let mut expect_operand = true;

        loop {
            let whitespace_before = self.tokenizer.lookahead(0).is_whitespace();
            self.consume_whitespace_comments();

            let t = self.tokenizer.lookahead(0);
            if matches!(t.token_type, TokenType::RParen | TokenType::Eof) {
                break;
            }

            if expect_operand {
                expr.push(self.parse_calc_operand()?);
                expect_operand = false;
                continue;
            }

            let operator = match t.token_type {
                TokenType::Delim(c @ ('*' | '/')) => c,
                TokenType::Delim(c @ ('+' | '-')) => {
                    if !whitespace_before || !self.tokenizer.lookahead(1).is_whitespace() {
                        return Err(CssError::with_location(
                            &format!("Operator {c} must be surrounded by whitespace"),
                            t.location,
                        ));
                    }
                    c
                }
                TokenType::Comma if allow_comma => ',',
                _ => return Err(self.unexpected("operator", &t)),
            };

            self.tokenizer.consume();
            expr.push(Node::new(NodeType::Operator(operator.to_string()), t.location));
            expect_operand = true;
        }

        if expect_operand {
            let loc = self.tokenizer.next_location();
            return Err(CssError::with_location(
                "Expected operand in calculation",
                loc,
            ));
        }

        Ok(expr)
    }

    fn parse_calc_operand(&mut self) -> CssResult<Node> {
        log::trace!("parse_calc_operand");

        let t = self.tokenizer.lookahead(0);
        let loc = t.location;

        match t.token_type {
            TokenType::Number(value) => {
                self.tokenizer.consume();
                Ok(Node::new(NodeType::Number { value }, loc))
            }
            TokenType::Percentage(value) => {
                self.tokenizer.consume();
                Ok(Node::new(NodeType::Percentage { value }, loc))
            }
            TokenType::Dimension { value, unit } => {
                if !Unit::from_name(&unit).is_known() {
                    return Err(CssError::with_location(
                        &format!("Unknown unit {unit} in calculation"),
                        loc,
                    ));
                }
                self.tokenizer.consume();
                Ok(Node::new(NodeType::Dimension { value, unit }, loc))
            }
            TokenType::LParen => {
                self.tokenizer.consume();
                let expr = self.nested(|parser| parser.parse_calc_expr(false))?;
                self.consume(TokenType::RParen)?;
                Ok(Node::new(
                    NodeType::Calc {
                        name: String::new(),
                        expr,
                    },
                    loc,
                ))
            }
            TokenType::Function(ref name) => match name.to_ascii_lowercase().as_str() {
                "calc" | "-webkit-calc" | "min" | "max" => self.parse_calc(),
                "var" => self.parse_variable(),
                _ => Err(self.unexpected("calculation operand", &t)),
            },
            _ => Err(self.unexpected("calculation operand", &t)),
        }
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
            let result = parser.parse_calc().unwrap();

            let w = Walker::new(&result);
            assert_eq!(w.walk_to_string(), $expected);
        };
    }

    #[test]
    fn test_parse_calc() {
        test!(
            "calc(100% - 2em)",
            "[Calc] calc\n  [Percentage] 100\n  [Operator] -\n  [Dimension] 2em\n"
        );
        test!(
            "calc((100% - var(--w)) / 2)",
            "[Calc] calc\n  [Calc] \n    [Percentage] 100\n    [Operator] -\n    [Variable] --w\n  [Operator] /\n  [Number] 2\n"
        );
        test!(
            "max(10px, min(5vw, 3rem))",
            "[Calc] max\n  [Dimension] 10px\n  [Operator] ,\n  [Calc] min\n    [Dimension] 5vw\n    [Operator] ,\n    [Dimension] 3rem\n"
        );
        test!(
            "-webkit-calc(2*3px)",
            "[Calc] -webkit-calc\n  [Number] 2\n  [Operator] *\n  [Dimension] 3px\n"
        );
    }

    #[test]
    fn invalid_calc() {
        for input in [
            "calc()",
            "calc(1px 2px)",
            "calc(1px -2px)",
            "calc(1px+2px)",
            "calc(1px +)",
            "calc(1px, 2px)",
            "calc(1furlong + 2px)",
            "calc((1px + 2px)",
            "calc(red)",
        ] {
            let mut stream = ByteStream::new(Encoding::UTF8, None);
            stream.read_from_str(input);
            stream.close();

            let mut parser = Css3::new(&mut stream, ParserConfig::default());
            assert!(parser.parse_calc().is_err(), "{input}");
        }
    }
}
