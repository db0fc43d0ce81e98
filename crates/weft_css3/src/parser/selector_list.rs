use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::CssResult;

impl Css3<'_> {
    /// Parses a comma separated list of complex selectors. A single invalid selector makes the
    /// whole list invalid.
    pub fn parse_selector_list(&mut self) -> CssResult<Node> {
        log::trace!("parse_selector_list");

        self.consume_whitespace_comments();
        let loc = self.tokenizer.next_location();

        let mut selectors = vec![];

        loop {
            self.consume_whitespace_comments();
            selectors.push(self.parse_selector()?);

            self.consume_whitespace_comments();
            if self.tokenizer.lookahead(0).token_type != TokenType::Comma {
                break;
            }
            self.tokenizer.consume();
        }

        Ok(Node::new(NodeType::SelectorList { selectors }, loc))
    }
}
