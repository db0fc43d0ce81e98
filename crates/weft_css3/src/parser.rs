use crate::builder::{SourceRange, SourceRangeKind};
use crate::tokenizer::{Token, TokenType};
use crate::Css3;
use weft_shared::byte_stream::Location;
use weft_shared::errors::{CssError, CssResult};

mod anplusb;
mod at_rule;
mod block;
mod calc;
mod condition;
mod declaration;
mod function;
mod pseudo;
mod rule;
mod selector;
mod selector_list;
mod stylesheet;
mod url;
mod value;

pub use block::BlockParseMode;

impl Css3<'_> {
    /// Returns an error for the given token
    pub(crate) fn unexpected(&self, expected: &str, t: &Token) -> CssError {
        CssError::with_location(&format!("Expected {expected}, got {t}"), t.location)
    }

    /// Consumes a specific token
    pub fn consume(&mut self, token_type: TokenType) -> CssResult<Token> {
        let t = self.tokenizer.consume();
        if t.token_type != token_type {
            return Err(CssError::with_location(
                &format!("Expected {:?}, got {:?}", token_type, t.token_type),
                t.location,
            ));
        }

        Ok(t)
    }

    /// Consumes any token
    pub fn consume_any(&mut self) -> CssResult<Token> {
        Ok(self.tokenizer.consume())
    }

    pub fn consume_function(&mut self) -> CssResult<String> {
        let t = self.tokenizer.consume();
        match t.token_type {
            TokenType::Function(name) => Ok(name),
            _ => Err(self.unexpected("function", &t)),
        }
    }

    pub fn consume_any_string(&mut self) -> CssResult<String> {
        let t = self.tokenizer.consume();
        match t.token_type {
            TokenType::QuotedString(s) => Ok(s),
            _ => Err(self.unexpected("string", &t)),
        }
    }

    pub fn consume_delim(&mut self, delimiter: char) -> CssResult<char> {
        let t = self.tokenizer.consume();
        match t.token_type {
            TokenType::Delim(c) if c == delimiter => Ok(c),
            _ => Err(self.unexpected(&format!("delimiter '{delimiter}'"), &t)),
        }
    }

    pub fn consume_whitespace_comments(&mut self) {
        while self.tokenizer.lookahead(0).is_whitespace() {
            self.tokenizer.consume();
        }
    }

    pub fn consume_ident_ci(&mut self, ident: &str) -> CssResult<String> {
        let t = self.tokenizer.consume();
        match t.token_type {
            TokenType::Ident(s) if s.eq_ignore_ascii_case(ident) => Ok(s),
            _ => Err(self.unexpected(&format!("ident '{ident}'"), &t)),
        }
    }

    pub fn consume_any_ident(&mut self) -> CssResult<String> {
        let t = self.tokenizer.consume();
        match t.token_type {
            TokenType::Ident(s) => Ok(s),
            _ => Err(self.unexpected("ident", &t)),
        }
    }

    /// Consumes the closing curly brace of a block. A block that is still open at the end of the
    /// stream is closed implicitly.
    pub(crate) fn consume_block_end(&mut self) -> CssResult<()> {
        let t = self.tokenizer.lookahead(0);
        match t.token_type {
            TokenType::RCurly => {
                self.tokenizer.consume();
                Ok(())
            }
            TokenType::Eof => Ok(()),
            _ => Err(self.unexpected("}", &t)),
        }
    }

    /// Returns the raw source text until (but not including) the next `{` or `;` at nesting
    /// level zero
    pub fn consume_raw_condition(&mut self) -> CssResult<String> {
        let start = self.tokenizer.tell();

        loop {
            let t = self.tokenizer.lookahead(0);
            match t.token_type {
                TokenType::LCurly | TokenType::Semicolon | TokenType::Eof => break,
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

        let end = self.tokenizer.tell();
        Ok(self.tokenizer.slice(start, end).trim().to_string())
    }

    /// Consumes tokens up to and including the token that closes a block that has just been
    /// opened. Nested blocks are skipped as a whole.
    pub(crate) fn skip_balanced(&mut self, closer: TokenType) {
        let mut stack = vec![closer];

        while let Some(expected) = stack.last().cloned() {
            let t = self.tokenizer.consume();
            match t.token_type {
                TokenType::Eof => return,
                tt if tt == expected => {
                    stack.pop();
                }
                TokenType::LCurly => stack.push(TokenType::RCurly),
                TokenType::LParen | TokenType::Function(_) => stack.push(TokenType::RParen),
                TokenType::LBracket => stack.push(TokenType::RBracket),
                _ => {}
            }
        }
    }

    /// Skips an invalid qualified rule: everything up to the block, and the block itself. Inside
    /// a block, a `}` closes the surrounding block and is left for the caller.
    pub(crate) fn skip_qualified_rule(&mut self, nested: bool) {
        log::trace!("skip_qualified_rule");

        loop {
            let t = self.tokenizer.consume();
            match t.token_type {
                TokenType::Eof => return,
                TokenType::LCurly => {
                    self.skip_balanced(TokenType::RCurly);
                    return;
                }
                TokenType::RCurly if nested => {
                    self.tokenizer.reconsume();
                    return;
                }
                TokenType::LParen | TokenType::Function(_) => self.skip_balanced(TokenType::RParen),
                TokenType::LBracket => self.skip_balanced(TokenType::RBracket),
                _ => {}
            }
        }
    }

    /// Skips an invalid or unknown at-rule: up to and including a `;`, or up to and including its
    /// block
    pub(crate) fn skip_at_rule(&mut self, nested: bool) {
        log::trace!("skip_at_rule");

        loop {
            let t = self.tokenizer.consume();
            match t.token_type {
                TokenType::Eof | TokenType::Semicolon => return,
                TokenType::LCurly => {
                    self.skip_balanced(TokenType::RCurly);
                    return;
                }
                TokenType::RCurly if nested => {
                    self.tokenizer.reconsume();
                    return;
                }
                TokenType::LParen | TokenType::Function(_) => self.skip_balanced(TokenType::RParen),
                TokenType::LBracket => self.skip_balanced(TokenType::RBracket),
                _ => {}
            }
        }
    }

    /// Skips an invalid declaration up to the next `;` or the `}` that closes the declaration
    /// block. Both are left for the caller.
    pub(crate) fn skip_declaration(&mut self) {
        log::trace!("skip_declaration");

        loop {
            let t = self.tokenizer.consume();
            match t.token_type {
                TokenType::Eof => return,
                TokenType::Semicolon | TokenType::RCurly => {
                    self.tokenizer.reconsume();
                    return;
                }
                TokenType::LCurly => self.skip_balanced(TokenType::RCurly),
                TokenType::LParen | TokenType::Function(_) => self.skip_balanced(TokenType::RParen),
                TokenType::LBracket => self.skip_balanced(TokenType::RBracket),
                _ => {}
            }
        }
    }

    /// Runs a production that can contain itself. Fails without running it when the input is
    /// already nested `config.max_depth` levels deep.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> CssResult<T>) -> CssResult<T> {
        if self.depth >= self.config.max_depth {
            return Err(CssError::with_location(
                &format!("Nesting exceeds the maximum depth of {}", self.config.max_depth),
                self.tokenizer.next_location(),
            ));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;

        result
    }

    pub(crate) fn record_source_range(
        &mut self,
        kind: SourceRangeKind,
        start: Location,
        end: Location,
    ) {
        if self.config.track_source_ranges {
            self.source_ranges.push(SourceRange { kind, start, end });
        }
    }

    /// Fails when there is anything but whitespace left in the stream
    pub(crate) fn expect_eof(&mut self) -> CssResult<()> {
        self.consume_whitespace_comments();
        let t = self.tokenizer.lookahead(0);
        if !t.is_eof() {
            return Err(self.unexpected("end of input", &t));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use weft_shared::byte_stream::Stream;
    use crate::tokenizer::TokenType;
    use crate::Css3;
    use weft_shared::byte_stream::{ByteStream, Encoding};
    use weft_shared::config::ParserConfig;

    fn next_ident(parser: &mut Css3) -> String {
        parser.consume_whitespace_comments();
        parser.consume_any_ident().unwrap_or_default()
    }

    #[test]
    fn skip_rule_and_continue() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("a, b[x { y: ( } ) ] } after");
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        parser.skip_qualified_rule(false);
        assert_eq!(next_ident(&mut parser), "after");
    }

    #[test]
    fn skip_nested_rule_stops_at_parent_close() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("a b } after");
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        parser.skip_qualified_rule(true);
        assert!(parser.consume(TokenType::RCurly).is_ok());
        assert_eq!(next_ident(&mut parser), "after");
    }

    #[test]
    fn skip_at_rules() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("@foo bar; one @baz { x { } } two");
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        parser.skip_at_rule(false);
        assert_eq!(next_ident(&mut parser), "one");
        parser.skip_at_rule(false);
        assert_eq!(next_ident(&mut parser), "two");
    }

    #[test]
    fn skip_declaration_keeps_terminator() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("bogus: 1 (;) {;} 3; next");
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        parser.skip_declaration();
        assert!(parser.consume(TokenType::Semicolon).is_ok());
        assert_eq!(next_ident(&mut parser), "next");
    }

    #[test]
    fn nesting_is_limited() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("a");
        stream.close();

        let config = ParserConfig {
            max_depth: 2,
            ..Default::default()
        };
        let mut parser = Css3::new(&mut stream, config);

        let inner = parser.nested(|p| p.nested(|p| p.consume_any_ident()));
        assert_eq!(inner.as_deref(), Ok("a"));
        assert_eq!(parser.depth, 0);

        let err = parser.nested(|p| p.nested(|p| p.nested(|_| Ok(())))).unwrap_err();
        assert!(err.message.contains("maximum depth of 2"));
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn raw_condition() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("screen and (min-width: 100px) { }");
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        assert_eq!(
            parser.consume_raw_condition().unwrap(),
            "screen and (min-width: 100px)"
        );
        assert!(parser.consume(TokenType::LCurly).is_ok());
    }
}
