use crate::node::{Node, NodeType};
use crate::properties;
use crate::tokenizer::TokenType;
use crate::Css3;
use std::ops::Deref;
use weft_shared::byte_stream::Location;
use weft_shared::errors::{CssError, CssResult};

impl Css3<'_> {
    /// Parses `:name`, `::name` and functional pseudo-classes like `:not(...)`
    pub fn parse_pseudo_selector(&mut self) -> CssResult<Node> {
        log::trace!("parse_pseudo_selector");

        let loc = self.tokenizer.next_location();
        self.consume(TokenType::Colon)?;

        if self.tokenizer.lookahead(0).is_colon() {
            self.tokenizer.consume();
            return self.parse_pseudo_element(loc);
        }

        let t = self.consume_any()?;
        match t.token_type {
            TokenType::Ident(name) => {
                let name = name.to_ascii_lowercase();
                if properties::is_legacy_pseudo_element(&name) {
                    Ok(Node::new(NodeType::PseudoElementSelector { name }, loc))
                } else if properties::is_pseudo_class(&name) {
                    Ok(Node::new(
                        NodeType::PseudoClassSelector {
                            name,
                            argument: None,
                        },
                        loc,
                    ))
                } else {
                    Err(CssError::with_location(
                        &format!("Unknown pseudo-class :{name}"),
                        loc,
                    ))
                }
            }
            TokenType::Function(name) => self.parse_pseudo_function(name.to_ascii_lowercase(), loc),
            _ => Err(self.unexpected("pseudo-class name", &t)),
        }
    }

    fn parse_pseudo_element(&mut self, loc: Location) -> CssResult<Node> {
        log::trace!("parse_pseudo_element");

        let t = self.consume_any()?;
        match t.token_type {
            TokenType::Ident(name) => {
                let name = name.to_ascii_lowercase();
                if !properties::is_pseudo_element(&name) && !name.starts_with("-webkit-") {
                    return Err(CssError::with_location(
                        &format!("Unknown pseudo-element ::{name}"),
                        loc,
                    ));
                }
                Ok(Node::new(NodeType::PseudoElementSelector { name }, loc))
            }
            TokenType::Function(name) => Err(CssError::with_location(
                &format!("Functional pseudo-element ::{name}() is not supported"),
                loc,
            )),
            _ => Err(self.unexpected("pseudo-element name", &t)),
        }
    }

    fn parse_pseudo_function(&mut self, name: String, loc: Location) -> CssResult<Node> {
        log::trace!("parse_pseudo_function");

        self.consume_whitespace_comments();

        let argument = match name.as_str() {
            "not" | "-webkit-any" => {
                let list = self.nested(|parser| parser.parse_selector_list())?;
                if let NodeType::SelectorList { selectors } = list.node_type.deref() {
                    let has_combinator = selectors.iter().any(|s| match s.node_type.deref() {
                        NodeType::Selector { children } => children.iter().any(|c| c.is_combinator()),
                        _ => false,
                    });
                    if has_combinator {
                        return Err(CssError::with_location(
                            &format!(":{name}() accepts compound selectors only"),
                            loc,
                        ));
                    }
                }
                if list.contains_pseudo_element() {
                    return Err(CssError::with_location(
                        &format!(":{name}() can not contain a pseudo-element"),
                        loc,
                    ));
                }
                list
            }
            "nth-child" | "nth-last-child" | "nth-of-type" | "nth-last-of-type" => {
                self.parse_nth()?
            }
            "lang" => {
                let t = self.consume_any()?;
                match t.token_type {
                    TokenType::Ident(value) | TokenType::QuotedString(value) => {
                        Node::new(NodeType::Ident { value }, t.location)
                    }
                    _ => return Err(self.unexpected("language", &t)),
                }
            }
            "dir" => {
                let t = self.consume_any()?;
                match t.token_type {
                    TokenType::Ident(value)
                        if value.eq_ignore_ascii_case("ltr") || value.eq_ignore_ascii_case("rtl") =>
                    {
                        Node::new(
                            NodeType::Ident {
                                value: value.to_ascii_lowercase(),
                            },
                            t.location,
                        )
                    }
                    _ => return Err(self.unexpected("ltr or rtl", &t)),
                }
            }
            _ => {
                return Err(CssError::with_location(
                    &format!("Unknown functional pseudo-class :{name}()"),
                    loc,
                ))
            }
        };

        self.consume_whitespace_comments();
        self.consume(TokenType::RParen)?;

        Ok(Node::new(
            NodeType::PseudoClassSelector {
                name,
                argument: Some(argument),
            },
            loc,
        ))
    }
}

#[cfg(test)]
mod tests {
    use weft_shared::byte_stream::Stream;
    use crate::walker::Walker;
    use crate::Css3;
    use test_case::test_case;
    use weft_shared::byte_stream::{ByteStream, Encoding};
    use weft_shared::config::ParserConfig;

    fn parse(input: &str) -> Option<String> {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str(input);
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        parser
            .parse_pseudo_selector()
            .ok()
            .map(|node| Walker::new(&node).walk_to_string())
    }

    #[test_case(":hover", "[PseudoClassSelector] hover\n"; "pseudo class")]
    #[test_case(":FIRST-CHILD", "[PseudoClassSelector] first-child\n"; "lowercased")]
    #[test_case(":before", "[PseudoElementSelector] before\n"; "legacy pseudo element")]
    #[test_case("::selection", "[PseudoElementSelector] selection\n"; "pseudo element")]
    #[test_case("::-webkit-scrollbar-thumb", "[PseudoElementSelector] -webkit-scrollbar-thumb\n"; "vendor pseudo element")]
    #[test_case(":lang(en)", "[PseudoClassSelector] lang\n  [Ident] en\n"; "lang")]
    #[test_case(":dir( RTL )", "[PseudoClassSelector] dir\n  [Ident] rtl\n"; "dir")]
    #[test_case(
        ":nth-child(2n+1)",
        "[PseudoClassSelector] nth-child\n  [Nth]\n    [AnPlusB] a: 2 b: 1\n";
        "nth child"
    )]
    #[test_case(
        ":not(.a, p#b)",
        "[PseudoClassSelector] not\n  [SelectorList (2)]\n    [Selector]\n      [ClassSelector] a\n    [Selector]\n      [TypeSelector] p\n      [IdSelector] b\n";
        "not"
    )]
    fn valid_pseudo(input: &str, expected: &str) {
        assert_eq!(parse(input).as_deref(), Some(expected));
    }

    #[test_case(":bogus"; "unknown pseudo class")]
    #[test_case("::bogus"; "unknown pseudo element")]
    #[test_case(":not(a b)"; "complex selector in not")]
    #[test_case(":not(::before)"; "pseudo element in not")]
    #[test_case(":dir(up)"; "invalid direction")]
    #[test_case(":nth-child(2n+)"; "invalid nth")]
    #[test_case(":contains(x)"; "unknown function")]
    #[test_case("::slotted(x)"; "functional pseudo element")]
    fn invalid_pseudo(input: &str) {
        assert_eq!(parse(input), None);
    }
}
