use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::CssResult;

impl Css3<'_> {
    /// Parses `[prefix]? (url | string)`
    pub(crate) fn parse_at_rule_namespace_prelude(&mut self) -> CssResult<Node> {
        log::trace!("parse_at_rule_namespace_prelude");

        let loc = self.tokenizer.next_location();

        let mut prefix = None;
        if let TokenType::Ident(ident) = self.tokenizer.lookahead(0).token_type {
            self.tokenizer.consume();
            self.consume_whitespace_comments();
            prefix = Some(ident);
        }

        let uri = self.parse_url_or_string()?;

        Ok(Node::new(NodeType::Namespace { prefix, uri }, loc))
    }
}

#[cfg(test)]
mod tests {
    use weft_shared::byte_stream::Stream;
    use crate::walker::Walker;
    use crate::Css3;
    use weft_shared::byte_stream::{ByteStream, Encoding};
    use weft_shared::config::ParserConfig;

    #[test]
    fn default_namespace() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("\"http://www.w3.org/1999/xhtml\"");
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        let result = parser.parse_at_rule_namespace_prelude().unwrap();

        assert_eq!(
            Walker::new(&result).walk_to_string(),
            "[Namespace] prefix:  uri: http://www.w3.org/1999/xhtml\n"
        );
    }
}
