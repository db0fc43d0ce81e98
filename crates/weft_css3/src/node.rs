use crate::tokenizer::Number;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use weft_shared::byte_stream::Location;

#[derive(Debug, PartialEq, Clone)]
pub enum NodeType {
    StyleSheet {
        children: Vec<Node>,
    },
    Rule {
        prelude: Node,
        block: Node,
    },
    AtRule {
        name: String,
        prelude: Option<Node>,
        block: Option<Node>,
    },
    Declaration {
        property: String,
        value: Vec<Node>,
        important: bool,
    },
    Block {
        children: Vec<Node>,
    },
    SelectorList {
        selectors: Vec<Node>,
    },
    Selector {
        children: Vec<Node>,
    },
    TypeSelector {
        namespace: Option<String>,
        value: String,
    },
    IdSelector {
        value: String,
    },
    ClassSelector {
        value: String,
    },
    AttributeSelector {
        namespace: Option<String>,
        name: String,
        matcher: Option<String>,
        value: String,
        flags: String,
    },
    PseudoClassSelector {
        name: String,
        argument: Option<Node>,
    },
    PseudoElementSelector {
        name: String,
    },
    Combinator {
        value: String,
    },
    Nth {
        nth: Node,
    },
    AnPlusB {
        a: i32,
        b: i32,
    },
    Ident {
        value: String,
    },
    Number {
        value: Number,
    },
    Percentage {
        value: Number,
    },
    Dimension {
        value: Number,
        unit: String,
    },
    String {
        value: String,
    },
    Url {
        url: String,
    },
    Hash {
        value: String,
    },
    Function {
        name: String,
        arguments: Vec<Node>,
    },
    Variable {
        name: String,
        fallback: Option<Vec<Node>>,
    },
    /// A calc-like function. An empty name is a parenthesized group inside a calculation.
    Calc {
        name: String,
        expr: Vec<Node>,
    },
    Operator(String),
    MediaQueryList {
        media_queries: Vec<Node>,
    },
    MediaQuery {
        modifier: String,
        media_type: String,
        features: Vec<Node>,
    },
    Feature {
        name: String,
        value: Option<Vec<Node>>,
    },
    SupportsNot {
        condition: Node,
    },
    SupportsJunction {
        operator: String,
        conditions: Vec<Node>,
    },
    SupportsDeclaration {
        term: Node,
    },
    Keyframe {
        keys: Vec<Number>,
        block: Node,
    },
    PageSelector {
        name: Option<String>,
        pseudo: Option<String>,
    },
    MarginBox {
        name: String,
        block: Node,
    },
    Namespace {
        prefix: Option<String>,
        uri: String,
    },
    Import {
        url: String,
        media: Node,
    },
    /// Source text that is kept unparsed
    Raw {
        value: String,
    },
}

/// A node is a single element in the AST
#[derive(Debug, PartialEq, Clone)]
pub struct Node {
    pub node_type: Box<NodeType>,
    pub location: Location,
}

impl Node {
    pub(crate) fn new(node_type: NodeType, location: Location) -> Self {
        Self {
            node_type: Box::new(node_type),
            location,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.node_type.deref(), NodeType::Block { .. })
    }

    pub fn is_rule(&self) -> bool {
        matches!(self.node_type.deref(), NodeType::Rule { .. })
    }

    pub fn is_at_rule(&self) -> bool {
        matches!(self.node_type.deref(), NodeType::AtRule { .. })
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self.node_type.deref(), NodeType::Declaration { .. })
    }

    pub fn is_pseudo_element_selector(&self) -> bool {
        matches!(self.node_type.deref(), NodeType::PseudoElementSelector { .. })
    }

    pub fn is_combinator(&self) -> bool {
        matches!(self.node_type.deref(), NodeType::Combinator { .. })
    }

    /// Returns true when the node is a selector list that contains a pseudo-element anywhere
    pub fn contains_pseudo_element(&self) -> bool {
        match self.node_type.deref() {
            NodeType::SelectorList { selectors } => {
                selectors.iter().any(|s| s.contains_pseudo_element())
            }
            NodeType::Selector { children } => {
                children.iter().any(|c| c.contains_pseudo_element())
            }
            NodeType::PseudoElementSelector { .. } => true,
            NodeType::PseudoClassSelector {
                argument: Some(arg),
                ..
            } => arg.contains_pseudo_element(),
            _ => false,
        }
    }

    /// Returns the at-rule name if this node is an at-rule
    pub fn at_rule_name(&self) -> Option<&str> {
        match self.node_type.deref() {
            NodeType::AtRule { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self.node_type.deref() {
            NodeType::SelectorList { selectors } => selectors
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<String>>()
                .join(", "),
            NodeType::Selector { children } => children
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<String>>()
                .join(""),
            NodeType::IdSelector { value } => format!("#{value}"),
            NodeType::ClassSelector { value } => format!(".{value}"),
            NodeType::TypeSelector { namespace, value } => match namespace {
                Some(ns) => format!("{ns}|{value}"),
                None => value.clone(),
            },
            NodeType::AttributeSelector {
                namespace,
                name,
                matcher,
                value,
                flags,
            } => {
                let ns = namespace
                    .as_ref()
                    .map(|ns| format!("{ns}|"))
                    .unwrap_or_default();
                match matcher {
                    Some(m) => format!("[{ns}{name}{m}\"{value}\"{flags}]"),
                    None => format!("[{ns}{name}]"),
                }
            }
            NodeType::PseudoClassSelector { name, argument } => match argument {
                Some(arg) => format!(":{name}({arg})"),
                None => format!(":{name}"),
            },
            NodeType::PseudoElementSelector { name } => format!("::{name}"),
            NodeType::Combinator { value } => match value.as_str() {
                " " => " ".to_string(),
                v => format!(" {v} "),
            },
            NodeType::Nth { nth } => nth.to_string(),
            NodeType::AnPlusB { a, b } => format!("{a}n{b:+}"),
            NodeType::Ident { value } => value.clone(),
            NodeType::Number { value } => value.to_string(),
            NodeType::Percentage { value } => format!("{value}%"),
            NodeType::Dimension { value, unit } => format!("{value}{unit}"),
            NodeType::Hash { value } => format!("#{value}"),
            NodeType::String { value } => format!("\"{value}\""),
            NodeType::Url { url } => format!("url({url})"),
            NodeType::Function { name, arguments } => {
                let args = arguments
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<String>>()
                    .join(" ");
                format!("{name}({args})")
            }
            NodeType::Variable { name, .. } => format!("var({name})"),
            NodeType::Calc { name, expr } => {
                let expr = expr
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<String>>()
                    .join(" ");
                format!("{name}({expr})")
            }
            NodeType::Operator(value) => value.clone(),
            NodeType::Raw { value } => value.clone(),
            _ => String::new(),
        };

        write!(f, "{s}")
    }
}
