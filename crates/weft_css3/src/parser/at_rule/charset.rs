use crate::node::{Node, NodeType};
use crate::Css3;
use weft_shared::errors::CssResult;

impl Css3<'_> {
    pub(crate) fn parse_at_rule_charset_prelude(&mut self) -> CssResult<Node> {
        log::trace!("parse_at_rule_charset_prelude");

        let loc = self.tokenizer.next_location();
        let value = self.consume_any_string()?;

        Ok(Node::new(NodeType::String { value }, loc))
    }
}
