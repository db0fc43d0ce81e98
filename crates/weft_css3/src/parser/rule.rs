use crate::builder::SourceRangeKind;
use crate::node::{Node, NodeType};
use crate::parser::block::BlockParseMode;
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::CssResult;

impl Css3<'_> {
    // Either the rule parsing succeeds as a whole, or not. When no valid rule is found, we
    // return None if config.ignore_errors is set to true, otherwise the error is returned and
    // handled by the caller. An invalid selector anywhere in the list drops the complete rule.
    pub fn parse_rule(&mut self, nested: bool) -> CssResult<Option<Node>> {
        log::trace!("parse_rule");

        let start = self.tokenizer.position();
        match self.parse_rule_internal() {
            Ok(node) => Ok(Some(node)),
            Err(err) if self.config.ignore_errors => {
                log::warn!("Ignoring error in parse_rule: {}", err);
                self.tokenizer.rewind(start);
                self.skip_qualified_rule(nested);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn parse_rule_internal(&mut self) -> CssResult<Node> {
        let loc = self.tokenizer.next_location();

        let prelude = self.parse_selector_list()?;
        self.consume_whitespace_comments();
        let header_end = self.tokenizer.last_end_location();

        self.consume(TokenType::LCurly)?;
        let body_start = self.tokenizer.last_end_location();

        let block = self.parse_block(BlockParseMode::StyleBlock)?;

        let body_end = self.tokenizer.next_location();
        self.consume_block_end()?;

        self.record_source_range(SourceRangeKind::RuleHeader, loc, header_end);
        self.record_source_range(SourceRangeKind::RuleBody, body_start, body_end);

        Ok(Node::new(NodeType::Rule { prelude, block }, loc))
    }
}
