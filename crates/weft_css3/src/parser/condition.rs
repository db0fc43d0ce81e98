use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

impl Css3<'_> {
    /// Parses the condition of an `@supports` rule. `and` and `or` can not be mixed on the same
    /// level without parentheses.
    pub fn parse_supports_condition(&mut self) -> CssResult<Node> {
        log::trace!("parse_supports_condition");

        self.consume_whitespace_comments();
        let loc = self.tokenizer.next_location();

        if self.tokenizer.lookahead(0).is_ident_ci("not") {
            self.tokenizer.consume();
            self.consume_whitespace_comments();
            let condition = self.parse_supports_in_parens()?;
            return Ok(Node::new(NodeType::SupportsNot { condition }, loc));
        }

        let first = self.parse_supports_in_parens()?;
        let mut operator: Option<String> = None;
        let mut conditions = vec![];

        loop {
            self.consume_whitespace_comments();

            let t = self.tokenizer.lookahead(0);
            let op = match &t.token_type {
                TokenType::Ident(v) if v.eq_ignore_ascii_case("and") => "and",
                TokenType::Ident(v) if v.eq_ignore_ascii_case("or") => "or",
                _ => break,
            };

            if operator.as_deref().is_some_and(|prev| prev != op) {
                return Err(CssError::with_location(
                    "Can not mix 'and' and 'or' without parentheses",
                    t.location,
                ));
            }
            operator = Some(op.to_string());

            self.tokenizer.consume();
            self.consume_whitespace_comments();
            conditions.push(self.parse_supports_in_parens()?);
        }

        match operator {
            None => Ok(first),
            Some(operator) => {
                conditions.insert(0, first);
                Ok(Node::new(
                    NodeType::SupportsJunction {
                        operator,
                        conditions,
                    },
                    loc,
                ))
            }
        }
    }

    /// Parses a parenthesized condition, declaration or general enclosed term. A term that is
    /// neither a condition nor a declaration is kept as raw text and never matches.
    fn parse_supports_in_parens(&mut self) -> CssResult<Node> {
        log::trace!("parse_supports_in_parens");

        let loc = self.tokenizer.next_location();
        self.consume(TokenType::LParen)?;
        self.consume_whitespace_comments();

        let t = self.tokenizer.lookahead(0);
        if t.token_type == TokenType::LParen || t.is_ident_ci("not") {
            let condition = self.nested(|parser| parser.parse_supports_condition())?;
            self.consume_whitespace_comments();
            self.consume(TokenType::RParen)?;
            return Ok(condition);
        }

        let start = self.tokenizer.position();
        let range_count = self.source_ranges.len();

        let declaration = self.parse_declaration_internal(false).and_then(|node| {
            self.consume_whitespace_comments();
            self.consume(TokenType::RParen)?;
            Ok(node)
        });
        self.source_ranges.truncate(range_count);

        let term = match declaration {
            Ok(node) => node,
            Err(err) => {
                log::debug!("Keeping unparsable supports term as raw text: {}", err);

                self.tokenizer.rewind(start);
                let start_offset = self.tokenizer.tell();
                self.skip_balanced(TokenType::RParen);
                let end_offset = self.tokenizer.last_end_location().offset();

                let raw = self.tokenizer.slice(start_offset, end_offset);
                let value = raw.strip_suffix(')').unwrap_or(&raw).trim().to_string();
                Node::new(NodeType::Raw { value }, loc)
            }
        };

        Ok(Node::new(NodeType::SupportsDeclaration { term }, loc))
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
            .parse_supports_condition()
            .ok()
            .map(|node| Walker::new(&node).walk_to_string())
    }

    #[test]
    fn supports_conditions() {
        assert_eq!(
            parse("(display: flex)").as_deref(),
            Some("[SupportsDeclaration]\n  [Declaration] property: display important: false\n    [Ident] flex\n")
        );
        assert_eq!(
            parse("not (display: flex)").as_deref(),
            Some("[SupportsNot]\n  [SupportsDeclaration]\n    [Declaration] property: display important: false\n      [Ident] flex\n")
        );
        assert_eq!(
            parse("(a: 1) or ((b: 2) and (c: 3))").as_deref(),
            Some("[SupportsJunction] or\n  [SupportsDeclaration]\n    [Declaration] property: a important: false\n      [Number] 1\n  [SupportsJunction] and\n    [SupportsDeclaration]\n      [Declaration] property: b important: false\n        [Number] 2\n    [SupportsDeclaration]\n      [Declaration] property: c important: false\n        [Number] 3\n")
        );
    }

    #[test]
    fn general_enclosed_is_kept_raw() {
        assert_eq!(
            parse("(foo bar(1)) and (x: y)").as_deref(),
            Some("[SupportsJunction] and\n  [SupportsDeclaration]\n    [Raw] foo bar(1)\n  [SupportsDeclaration]\n    [Declaration] property: x important: false\n      [Ident] y\n")
        );
    }

    #[test]
    fn invalid_conditions() {
        assert_eq!(parse("(a: 1) and (b: 2) or (c: 3)"), None);
        assert_eq!(parse("not(a: 1)"), None);
        assert_eq!(parse("display: flex"), None);
        assert_eq!(parse(""), None);
    }
}
