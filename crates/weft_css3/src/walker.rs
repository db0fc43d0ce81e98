use crate::node::{Node, NodeType};
use std::io::Write;
use std::ops::Deref;

/// The walker is used to walk the AST and dump it to stdout or a string.
pub struct Walker<'a> {
    root: &'a Node,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self { root }
    }

    pub fn walk_stdout(&self) {
        let _ = inner_walk(self.root, 0, &mut std::io::stdout());
    }

    pub fn walk_to_string(&self) -> String {
        let mut output: Vec<u8> = Vec::new();

        let _ = inner_walk(self.root, 0, &mut output);

        String::from_utf8_lossy(&output).into_owned()
    }
}

fn walk_all(nodes: &[Node], depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    for child in nodes {
        inner_walk(child, depth, f)?;
    }
    Ok(())
}

fn inner_walk(node: &Node, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);

    match node.node_type.deref() {
        NodeType::StyleSheet { children } => {
            writeln!(f, "{prefix}[Stylesheet ({})]", children.len())?;
            walk_all(children, depth + 1, f)?;
        }
        NodeType::Rule { prelude, block } => {
            writeln!(f, "{prefix}[Rule]")?;
            inner_walk(prelude, depth + 1, f)?;
            inner_walk(block, depth + 1, f)?;
        }
        NodeType::AtRule {
            name,
            prelude,
            block,
        } => {
            writeln!(f, "{prefix}[AtRule] name: {name}")?;
            if let Some(prelude) = prelude {
                inner_walk(prelude, depth + 1, f)?;
            }
            if let Some(block) = block {
                inner_walk(block, depth + 1, f)?;
            }
        }
        NodeType::Declaration {
            property,
            value,
            important,
        } => {
            writeln!(
                f,
                "{prefix}[Declaration] property: {property} important: {important}"
            )?;
            walk_all(value, depth + 1, f)?;
        }
        NodeType::Block { children } => {
            writeln!(f, "{prefix}[Block]")?;
            walk_all(children, depth + 1, f)?;
        }
        NodeType::SelectorList { selectors } => {
            writeln!(f, "{prefix}[SelectorList ({})]", selectors.len())?;
            walk_all(selectors, depth + 1, f)?;
        }
        NodeType::Selector { children } => {
            writeln!(f, "{prefix}[Selector]")?;
            walk_all(children, depth + 1, f)?;
        }
        NodeType::TypeSelector { namespace, value } => match namespace {
            Some(ns) => writeln!(f, "{prefix}[TypeSelector] {ns}|{value}")?,
            None => writeln!(f, "{prefix}[TypeSelector] {value}")?,
        },
        NodeType::IdSelector { value } => {
            writeln!(f, "{prefix}[IdSelector] {value}")?;
        }
        NodeType::ClassSelector { value } => {
            writeln!(f, "{prefix}[ClassSelector] {value}")?;
        }
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
            writeln!(
                f,
                "{prefix}[AttributeSelector] name: {ns}{name} matcher: {} value: {value} flags: {flags}",
                matcher.as_deref().unwrap_or("")
            )?;
        }
        NodeType::PseudoClassSelector { name, argument } => {
            writeln!(f, "{prefix}[PseudoClassSelector] {name}")?;
            if let Some(argument) = argument {
                inner_walk(argument, depth + 1, f)?;
            }
        }
        NodeType::PseudoElementSelector { name } => {
            writeln!(f, "{prefix}[PseudoElementSelector] {name}")?;
        }
        NodeType::Combinator { value } => {
            writeln!(f, "{prefix}[Combinator] {value}")?;
        }
        NodeType::Nth { nth } => {
            writeln!(f, "{prefix}[Nth]")?;
            inner_walk(nth, depth + 1, f)?;
        }
        NodeType::AnPlusB { a, b } => {
            writeln!(f, "{prefix}[AnPlusB] a: {a} b: {b}")?;
        }
        NodeType::Ident { value } => {
            writeln!(f, "{prefix}[Ident] {value}")?;
        }
        NodeType::Number { value } => {
            writeln!(f, "{prefix}[Number] {value}")?;
        }
        NodeType::Percentage { value } => {
            writeln!(f, "{prefix}[Percentage] {value}")?;
        }
        NodeType::Dimension { value, unit } => {
            writeln!(f, "{prefix}[Dimension] {value}{unit}")?;
        }
        NodeType::String { value } => {
            writeln!(f, "{prefix}[String] {value}")?;
        }
        NodeType::Url { url } => {
            writeln!(f, "{prefix}[Url] {url}")?;
        }
        NodeType::Hash { value } => {
            writeln!(f, "{prefix}[Hash] {value}")?;
        }
        NodeType::Function { name, arguments } => {
            writeln!(f, "{prefix}[Function] {name}")?;
            walk_all(arguments, depth + 1, f)?;
        }
        NodeType::Variable { name, fallback } => {
            writeln!(f, "{prefix}[Variable] {name}")?;
            if let Some(fallback) = fallback {
                walk_all(fallback, depth + 1, f)?;
            }
        }
        NodeType::Calc { name, expr } => {
            writeln!(f, "{prefix}[Calc] {name}")?;
            walk_all(expr, depth + 1, f)?;
        }
        NodeType::Operator(value) => {
            writeln!(f, "{prefix}[Operator] {value}")?;
        }
        NodeType::MediaQueryList { media_queries } => {
            writeln!(f, "{prefix}[MediaQueryList ({})]", media_queries.len())?;
            walk_all(media_queries, depth + 1, f)?;
        }
        NodeType::MediaQuery {
            modifier,
            media_type,
            features,
        } => {
            writeln!(
                f,
                "{prefix}[MediaQuery] modifier: {modifier} media_type: {media_type}"
            )?;
            walk_all(features, depth + 1, f)?;
        }
        NodeType::Feature { name, value } => {
            writeln!(f, "{prefix}[Feature] {name}")?;
            if let Some(value) = value {
                walk_all(value, depth + 1, f)?;
            }
        }
        NodeType::SupportsNot { condition } => {
            writeln!(f, "{prefix}[SupportsNot]")?;
            inner_walk(condition, depth + 1, f)?;
        }
        NodeType::SupportsJunction {
            operator,
            conditions,
        } => {
            writeln!(f, "{prefix}[SupportsJunction] {operator}")?;
            walk_all(conditions, depth + 1, f)?;
        }
        NodeType::SupportsDeclaration { term } => {
            writeln!(f, "{prefix}[SupportsDeclaration]")?;
            inner_walk(term, depth + 1, f)?;
        }
        NodeType::Keyframe { keys, block } => {
            let keys = keys
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<String>>()
                .join(", ");
            writeln!(f, "{prefix}[Keyframe] {keys}")?;
            inner_walk(block, depth + 1, f)?;
        }
        NodeType::PageSelector { name, pseudo } => {
            writeln!(
                f,
                "{prefix}[PageSelector] name: {} pseudo: {}",
                name.as_deref().unwrap_or(""),
                pseudo.as_deref().unwrap_or("")
            )?;
        }
        NodeType::MarginBox { name, block } => {
            writeln!(f, "{prefix}[MarginBox] {name}")?;
            inner_walk(block, depth + 1, f)?;
        }
        NodeType::Namespace { prefix: ns, uri } => {
            writeln!(
                f,
                "{prefix}[Namespace] prefix: {} uri: {uri}",
                ns.as_deref().unwrap_or("")
            )?;
        }
        NodeType::Import { url, media } => {
            writeln!(f, "{prefix}[Import] {url}")?;
            inner_walk(media, depth + 1, f)?;
        }
        NodeType::Raw { value } => {
            writeln!(f, "{prefix}[Raw] {value}")?;
        }
    }
    Ok(())
}
