use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

impl Css3<'_> {
    fn parse_attribute_operator(&mut self) -> CssResult<String> {
        log::trace!("parse_attribute_operator");

        let t = self.consume_any()?;
        match t.token_type {
            TokenType::Delim('=') => Ok("=".to_string()),
            TokenType::Delim(c @ ('~' | '|' | '^' | '$' | '*')) => {
                self.consume_delim('=')?;
                Ok(format!("{c}="))
            }
            _ => Err(self.unexpected("attribute operator", &t)),
        }
    }

    /// Parses `name`, `ns|name`, `*|name` or `|name`. Returns `None` when the next tokens do not
    /// form a qualified name.
    fn parse_qualified_name(
        &mut self,
        allow_universal: bool,
    ) -> CssResult<Option<(Option<String>, String)>> {
        let t0 = self.tokenizer.lookahead(0);
        let t1 = self.tokenizer.lookahead(1);
        let t2 = self.tokenizer.lookahead(2);

        let local_name = |t: &TokenType| match t {
            TokenType::Ident(name) => Some(name.clone()),
            TokenType::Delim('*') if allow_universal => Some("*".to_string()),
            _ => None,
        };

        let prefix = match &t0.token_type {
            TokenType::Ident(prefix) => Some(prefix.clone()),
            TokenType::Delim('*') => Some("*".to_string()),
            _ => None,
        };

        if let (Some(prefix), true, Some(name)) = (
            prefix,
            t1.is_delim('|'),
            local_name(&t2.token_type),
        ) {
            self.tokenizer.consume();
            self.tokenizer.consume();
            self.tokenizer.consume();
            return Ok(Some((Some(prefix), name)));
        }

        if let (true, Some(name)) = (t0.is_delim('|'), local_name(&t1.token_type)) {
            self.tokenizer.consume();
            self.tokenizer.consume();
            return Ok(Some((Some(String::new()), name)));
        }

        match local_name(&t0.token_type) {
            Some(name) => {
                self.tokenizer.consume();
                Ok(Some((None, name)))
            }
            None => Ok(None),
        }
    }

    fn parse_type_selector(&mut self) -> CssResult<Option<Node>> {
        log::trace!("parse_type_selector");

        let loc = self.tokenizer.next_location();

        Ok(self
            .parse_qualified_name(true)?
            .map(|(namespace, value)| Node::new(NodeType::TypeSelector { namespace, value }, loc)))
    }

    fn parse_class_selector(&mut self) -> CssResult<Node> {
        log::trace!("parse_class_selector");

        let loc = self.tokenizer.next_location();

        self.consume_delim('.')?;
        let value = self.consume_any_ident()?;

        Ok(Node::new(NodeType::ClassSelector { value }, loc))
    }

    fn parse_attribute_selector(&mut self) -> CssResult<Node> {
        log::trace!("parse_attribute_selector");

        let loc = self.tokenizer.next_location();

        let mut flags = String::new();
        let mut matcher = None;
        let mut value = String::new();

        self.consume(TokenType::LBracket)?;
        self.consume_whitespace_comments();

        let Some((namespace, name)) = self.parse_qualified_name(false)? else {
            let t = self.tokenizer.lookahead(0);
            return Err(self.unexpected("attribute name", &t));
        };
        self.consume_whitespace_comments();

        if self.tokenizer.lookahead(0).token_type != TokenType::RBracket {
            matcher = Some(self.parse_attribute_operator()?);
            self.consume_whitespace_comments();

            let t = self.consume_any()?;
            value = match t.token_type {
                TokenType::Ident(v) | TokenType::QuotedString(v) => v,
                _ => return Err(self.unexpected("attribute value", &t)),
            };
            self.consume_whitespace_comments();

            let t = self.tokenizer.lookahead(0);
            if t.is_ident() {
                if !t.is_ident_ci("i") {
                    return Err(self.unexpected("attribute flag 'i'", &t));
                }
                self.tokenizer.consume();
                flags = "i".to_string();
                self.consume_whitespace_comments();
            }
        }

        self.consume(TokenType::RBracket)?;

        Ok(Node::new(
            NodeType::AttributeSelector {
                namespace,
                name,
                matcher,
                value,
                flags,
            },
            loc,
        ))
    }

    /// Parses a sequence of simple selectors without combinators between them
    fn parse_compound_selector(&mut self) -> CssResult<Vec<Node>> {
        log::trace!("parse_compound_selector");

        let mut children = Vec::new();
        if let Some(type_selector) = self.parse_type_selector()? {
            children.push(type_selector);
        }

        let mut after_pseudo_element = false;

        loop {
            let t = self.tokenizer.lookahead(0);
            let child = match t.token_type {
                TokenType::IDHash(value) => {
                    self.tokenizer.consume();
                    Node::new(NodeType::IdSelector { value }, t.location)
                }
                TokenType::Hash(value) => {
                    return Err(CssError::with_location(
                        &format!("Invalid id selector #{value}"),
                        t.location,
                    ))
                }
                TokenType::Delim('.') => self.parse_class_selector()?,
                TokenType::LBracket => self.parse_attribute_selector()?,
                TokenType::Colon => self.parse_pseudo_selector()?,
                _ => break,
            };

            if after_pseudo_element
                && !matches!(*child.node_type, NodeType::PseudoClassSelector { .. })
            {
                return Err(CssError::with_location(
                    "Only pseudo-classes may follow a pseudo-element",
                    child.location,
                ));
            }
            after_pseudo_element |= child.is_pseudo_element_selector();

            children.push(child);
        }

        if children.is_empty() {
            let t = self.tokenizer.lookahead(0);
            return Err(self.unexpected("selector", &t));
        }

        Ok(children)
    }

    /// Parses a complex selector: compound selectors joined by combinators
    pub fn parse_selector(&mut self) -> CssResult<Node> {
        log::trace!("parse_selector");

        let loc = self.tokenizer.next_location();

        let mut children = vec![];
        let mut seen_pseudo_element = false;

        loop {
            let compound = self.parse_compound_selector()?;
            if seen_pseudo_element {
                return Err(CssError::with_location(
                    "A pseudo-element must be in the last compound selector",
                    loc,
                ));
            }
            seen_pseudo_element = compound.iter().any(|n| n.is_pseudo_element_selector());
            children.extend(compound);

            let whitespace = self.tokenizer.lookahead(0).is_whitespace();
            self.consume_whitespace_comments();

            let t = self.tokenizer.lookahead(0);
            let value = match t.token_type {
                TokenType::Delim(c @ ('>' | '+' | '~')) => {
                    self.tokenizer.consume();
                    self.consume_whitespace_comments();
                    c.to_string()
                }
                TokenType::Comma | TokenType::LCurly | TokenType::RParen | TokenType::Eof => break,
                _ if whitespace => " ".to_string(),
                _ => return Err(self.unexpected("combinator", &t)),
            };

            children.push(Node::new(NodeType::Combinator { value }, t.location));
        }

        Ok(Node::new(NodeType::Selector { children }, loc))
    }
}
