use crate::cssom::rule::MarginBox;
use crate::node::{Node, NodeType};
use crate::parser::block::BlockParseMode;
use crate::properties::PAGE_PSEUDO_CLASSES;
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

impl Css3<'_> {
    /// Parses `[name]? [:first | :left | :right | :blank]?`
    pub(crate) fn parse_at_rule_page_prelude(&mut self) -> CssResult<Node> {
        log::trace!("parse_at_rule_page_prelude");

        let loc = self.tokenizer.next_location();

        let mut name = None;
        if let TokenType::Ident(value) = self.tokenizer.lookahead(0).token_type {
            self.tokenizer.consume();
            name = Some(value);
        }

        let mut pseudo = None;
        if self.tokenizer.lookahead(0).is_colon() {
            self.tokenizer.consume();

            let value = self.consume_any_ident()?.to_ascii_lowercase();
            if !PAGE_PSEUDO_CLASSES.contains(&value.as_str()) {
                return Err(CssError::with_location(
                    &format!("Unknown page pseudo-class :{value}"),
                    loc,
                ));
            }
            pseudo = Some(value);
        }

        Ok(Node::new(NodeType::PageSelector { name, pseudo }, loc))
    }

    /// Parses a margin box like `@top-center { ... }` inside a page rule. An invalid margin box
    /// is dropped.
    pub fn parse_margin_box(&mut self) -> CssResult<Option<Node>> {
        log::trace!("parse_margin_box");

        let start = self.tokenizer.position();
        match self.parse_margin_box_internal() {
            Ok(node) => Ok(Some(node)),
            Err(err) if self.config.ignore_errors => {
                log::warn!("Ignoring error in parse_margin_box: {}", err);
                self.tokenizer.rewind(start);
                self.skip_at_rule(true);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn parse_margin_box_internal(&mut self) -> CssResult<Node> {
        let loc = self.tokenizer.next_location();

        let t = self.consume_any()?;
        let margin_box = match &t.token_type {
            TokenType::AtKeyword(name) => MarginBox::from_name(name),
            _ => None,
        };
        let Some(margin_box) = margin_box else {
            return Err(self.unexpected("margin box", &t));
        };

        self.consume_whitespace_comments();
        self.consume(TokenType::LCurly)?;
        let block = self.parse_block(BlockParseMode::StyleBlock)?;
        self.consume_block_end()?;

        Ok(Node::new(
            NodeType::MarginBox {
                name: margin_box.name().to_string(),
                block,
            },
            loc,
        ))
    }
}
