use crate::node::Node;
use crate::Css3;
use weft_shared::errors::CssResult;

impl Css3<'_> {
    pub(crate) fn parse_at_rule_supports_prelude(&mut self) -> CssResult<Node> {
        log::trace!("parse_at_rule_supports_prelude");
        self.parse_supports_condition()
    }
}
