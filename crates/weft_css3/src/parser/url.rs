use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

impl Css3<'_> {
    /// Parses `url("...")`. Unquoted urls are produced by the tokenizer as a single url token.
    pub fn parse_url(&mut self) -> CssResult<Node> {
        log::trace!("parse_url");

        let loc = self.tokenizer.next_location();

        let name = self.consume_function()?;
        if !name.eq_ignore_ascii_case("url") {
            return Err(CssError::with_location(
                &format!("Expected url, got {name:?}"),
                loc,
            ));
        }

        self.consume_whitespace_comments();
        let url = self.consume_any_string()?;
        self.consume_whitespace_comments();

        self.consume(TokenType::RParen)?;

        Ok(Node::new(NodeType::Url { url }, loc))
    }

    /// Parses an url written as url token, `url("...")` or plain string, as allowed in
    /// `@import` and `@namespace`
    pub(crate) fn parse_url_or_string(&mut self) -> CssResult<String> {
        let t = self.tokenizer.lookahead(0);
        match t.token_type {
            TokenType::Url(url) | TokenType::QuotedString(url) => {
                self.tokenizer.consume();
                Ok(url)
            }
            TokenType::Function(_) => match *self.parse_url()?.node_type {
                NodeType::Url { url } => Ok(url),
                _ => Err(self.unexpected("url", &t)),
            },
            _ => Err(self.unexpected("url or string", &t)),
        }
    }
}
