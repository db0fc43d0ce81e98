use crate::node::Node;
use crate::Css3;
use weft_shared::errors::CssResult;

impl Css3<'_> {
    /// The prelude of `@-webkit-region` is the selector list of the region elements
    pub(crate) fn parse_at_rule_region_prelude(&mut self) -> CssResult<Node> {
        log::trace!("parse_at_rule_region_prelude");
        self.parse_selector_list()
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
    fn region_rule_holds_style_rules_only() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("@-webkit-region #r1 { p { color: red } @media print { } }");
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        let result = parser.parse_at_rule(false).unwrap().unwrap();

        assert_eq!(
            Walker::new(&result).walk_to_string(),
            "[AtRule] name: -webkit-region\n  [SelectorList (1)]\n    [Selector]\n      [IdSelector] r1\n  [Block]\n    [Rule]\n      [SelectorList (1)]\n        [Selector]\n          [TypeSelector] p\n      [Block]\n        [Declaration] property: color important: false\n          [Ident] red\n"
        );
    }
}
