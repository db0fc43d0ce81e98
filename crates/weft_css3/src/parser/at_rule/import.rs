use crate::node::{Node, NodeType};
use crate::Css3;
use weft_shared::errors::CssResult;

impl Css3<'_> {
    /// Parses `(url | string) media-query-list`
    pub(crate) fn parse_at_rule_import_prelude(&mut self) -> CssResult<Node> {
        log::trace!("parse_at_rule_import_prelude");

        let loc = self.tokenizer.next_location();

        let url = self.parse_url_or_string()?;
        self.consume_whitespace_comments();
        let media = self.parse_media_query_list()?;

        Ok(Node::new(NodeType::Import { url, media }, loc))
    }
}
