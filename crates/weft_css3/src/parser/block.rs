use crate::cssom::rule::MarginBox;
use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::CssResult;

/// Defines what a block may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockParseMode {
    /// Declarations only (style rules, `@font-face`, keyframes, margin boxes)
    StyleBlock,
    /// Nested rules (`@media`, `@supports`)
    RegularBlock,
    /// Keyframes of a `@keyframes` rule
    KeyframesBlock,
    /// Declarations and margin boxes
    PageBlock,
    /// Style rules only
    RegionBlock,
}

impl Css3<'_> {
    /// Parses the contents of a block. The opening curly brace has already been consumed, the
    /// closing one is left for the caller.
    pub fn parse_block(&mut self, mode: BlockParseMode) -> CssResult<Node> {
        log::trace!("parse_block with parse mode: {:?}", mode);

        self.nested(|parser| parser.parse_block_internal(mode))
    }

    fn parse_block_internal(&mut self, mode: BlockParseMode) -> CssResult<Node> {
        let loc = self.tokenizer.current_location();
        let mut children: Vec<Node> = Vec::new();

        loop {
            let t = self.tokenizer.lookahead(0);
            match t.token_type {
                TokenType::RCurly | TokenType::Eof => break,
                TokenType::Whitespace => {
                    self.tokenizer.consume();
                }
                TokenType::Semicolon => {
                    self.tokenizer.consume();
                }
                TokenType::AtKeyword(name) => match mode {
                    BlockParseMode::RegularBlock => {
                        if let Some(at_rule) = self.parse_at_rule(true)? {
                            children.push(at_rule);
                        }
                    }
                    BlockParseMode::PageBlock if MarginBox::from_name(&name).is_some() => {
                        if let Some(margin_box) = self.parse_margin_box()? {
                            children.push(margin_box);
                        }
                    }
                    _ => {
                        log::warn!("Ignoring @{} in {:?} at {}", name, mode, t.location);
                        self.tokenizer.consume();
                        self.skip_at_rule(true);
                    }
                },
                _ => {
                    let child = match mode {
                        BlockParseMode::StyleBlock | BlockParseMode::PageBlock => {
                            self.parse_declaration_in_block()?
                        }
                        BlockParseMode::RegularBlock | BlockParseMode::RegionBlock => {
                            self.parse_rule(true)?
                        }
                        BlockParseMode::KeyframesBlock => self.parse_keyframe()?,
                    };

                    if let Some(child) = child {
                        children.push(child);
                    }
                }
            }
        }

        Ok(Node::new(NodeType::Block { children }, loc))
    }

    /// Parses a declaration list that is not surrounded by curly braces, like the contents of a
    /// `style` attribute
    pub fn parse_declaration_list(&mut self) -> CssResult<Node> {
        log::trace!("parse_declaration_list");

        let loc = self.tokenizer.current_location();
        let mut children = Vec::new();

        loop {
            let block = self.parse_block(BlockParseMode::StyleBlock)?;
            if let NodeType::Block { children: declarations } = *block.node_type {
                children.extend(declarations);
            }

            let t = self.tokenizer.consume();
            match t.token_type {
                TokenType::RCurly if self.config.ignore_errors => {
                    log::warn!("Ignoring unexpected }} at {}", t.location);
                }
                TokenType::RCurly => return Err(self.unexpected("declaration", &t)),
                _ => break,
            }
        }

        Ok(Node::new(NodeType::Block { children }, loc))
    }
}

#[cfg(test)]
mod tests {
    use weft_shared::byte_stream::Stream;
    use super::*;
    use crate::walker::Walker;
    use weft_shared::byte_stream::{ByteStream, Encoding};
    use weft_shared::config::ParserConfig;

    macro_rules! test {
        ($mode:expr, $input:expr, $expected:expr) => {
            let mut stream = ByteStream::new(Encoding::UTF8, None);
            stream.read_from_str($input);
            stream.close();

            let mut parser = Css3::new(&mut stream, ParserConfig::default());
            let result = parser.parse_block($mode).unwrap();

            let w = Walker::new(&result);
            assert_eq!(w.walk_to_string(), $expected);
        };
    }

    #[test]
    fn declarations_recover_locally() {
        test!(
            BlockParseMode::StyleBlock,
            "color: red; bogus-prop: 1 2 3; font-size: 12px }",
            "[Block]\n  [Declaration] property: color important: false\n    [Ident] red\n  [Declaration] property: font-size important: false\n    [Dimension] 12px\n"
        );
        test!(
            BlockParseMode::StyleBlock,
            ";; color: [red]; width: 1px; @foo { x } height: 2px",
            "[Block]\n  [Declaration] property: width important: false\n    [Dimension] 1px\n  [Declaration] property: height important: false\n    [Dimension] 2px\n"
        );
    }

    #[test]
    fn nested_rules() {
        test!(
            BlockParseMode::RegularBlock,
            "a { } @font-face { src: url(x.woff) } } ignored",
            "[Block]\n  [Rule]\n    [SelectorList (1)]\n      [Selector]\n        [TypeSelector] a\n    [Block]\n  [AtRule] name: font-face\n    [Block]\n      [Declaration] property: src important: false\n        [Url] x.woff\n"
        );
    }

    #[test]
    fn page_block() {
        test!(
            BlockParseMode::PageBlock,
            "margin: 1in; @top-center { content: \"title\" } @bogus { }",
            "[Block]\n  [Declaration] property: margin important: false\n    [Dimension] 1in\n  [MarginBox] top-center\n    [Block]\n      [Declaration] property: content important: false\n        [String] title\n"
        );
    }
}
