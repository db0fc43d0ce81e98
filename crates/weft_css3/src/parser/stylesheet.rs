use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::CssResult;

impl Css3<'_> {
    pub fn parse_stylesheet(&mut self) -> CssResult<Node> {
        log::trace!("parse_stylesheet");

        let loc = self.tokenizer.current_location();
        let mut children = Vec::new();

        while self.skip_to_next_stylesheet_rule() {
            if let Some(node) = self.parse_stylesheet_rule()? {
                children.push(node);
            }
        }

        Ok(Node::new(NodeType::StyleSheet { children }, loc))
    }

    /// Skips everything that may appear between top level rules. Returns false when the end of
    /// the stream has been reached.
    pub(crate) fn skip_to_next_stylesheet_rule(&mut self) -> bool {
        loop {
            let t = self.tokenizer.lookahead(0);
            match t.token_type {
                TokenType::Whitespace | TokenType::Cdo | TokenType::Cdc => {
                    self.tokenizer.consume();
                }
                TokenType::RCurly => {
                    log::warn!("Ignoring unexpected }} at {}", t.location);
                    self.tokenizer.consume();
                }
                TokenType::Eof => return false,
                _ => return true,
            }
        }
    }

    /// Parses a single top level rule. Returns `None` when the rule was dropped.
    pub(crate) fn parse_stylesheet_rule(&mut self) -> CssResult<Option<Node>> {
        match self.tokenizer.lookahead(0).token_type {
            TokenType::AtKeyword(_) => self.parse_at_rule(false),
            _ => self.parse_rule(false),
        }
    }
}
