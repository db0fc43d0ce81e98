//! Turns the AST of a single rule into its CSSOM form and hands it to the builder
//!
//! Given the following css:
//!
//! ```css
//!     @namespace svg url(http://www.w3.org/2000/svg);
//!     @media print { ul > li.item { color: green } }
//! ```
//!
//! the parser produces an `AtRule` node for the namespace, which is registered with the builder,
//! and an `AtRule` node for the media rule. The media rule is appended first and opened with
//! `push_nesting()`, so the style rule inside ends up as its child:
//!
//! ```text
//!     Namespace svg -> http://www.w3.org/2000/svg
//!     Media print
//!         Style
//!             li (SubSelector) .item (Child) ul
//!             color: green
//! ```
//!
//! Selector chains are stored subject first, so `ul > li.item` is converted right to left.
use crate::builder::{CssBuilder, SourceRange};
use crate::cssom::media::{MediaExpression, MediaQuery, MediaQueryList, MediaRestrictor};
use crate::cssom::rule::{
    CharsetRule, CssRule, CssRuleKind, FontFaceRule, ImportRule, Keyframe, KeyframesRule,
    MarginBox, MarginBoxRule, MediaRule, NamespaceRule, PageRule, RegionRule, StyleRule,
    SupportsCondition, SupportsRule,
};
use crate::cssom::selector::{
    CssSelector, MatchType, NamespaceConstraint, RareData, Relation, SelectorList,
};
use crate::cssom::value::{CssDeclaration, CssDeclarationBlock, CssValue, ValueList};
use crate::node::{Node, NodeType};
use std::ops::Deref;
use weft_shared::errors::{CssError, CssResult};

/// Where we are in the stylesheet with respect to the rules that must come first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SheetState {
    Start,
    Imports,
    Namespaces,
    Body,
}

fn error(message: &str, node: &Node) -> CssError {
    CssError::with_location(message, node.location)
}

pub(crate) struct Converter<'b> {
    builder: &'b mut dyn CssBuilder,
    ignore_errors: bool,
    state: SheetState,
}

impl<'b> Converter<'b> {
    pub(crate) fn new(builder: &'b mut dyn CssBuilder, ignore_errors: bool) -> Self {
        Self {
            builder,
            ignore_errors,
            state: SheetState::Start,
        }
    }

    pub(crate) fn source_range(&mut self, range: SourceRange) {
        self.builder.source_range(range);
    }

    /// Drops the construct with a warning, or fails when errors are not ignored
    fn drop_construct(&self, err: CssError) -> CssResult<()> {
        if self.ignore_errors {
            log::warn!("Dropping rule: {}", err);
            return Ok(());
        }

        Err(err)
    }

    /// Converts a rule on the top level of a stylesheet. `@charset`, `@import` and `@namespace`
    /// are dropped when they appear after the rules they must precede.
    pub(crate) fn convert_top_level(&mut self, node: &Node) -> CssResult<()> {
        let kind = match node.node_type.deref() {
            NodeType::AtRule { name, .. } => CssRuleKind::from_at_keyword(name),
            _ => Some(CssRuleKind::Style),
        };

        let (allowed, next_state) = match kind {
            Some(CssRuleKind::Charset) => (self.state == SheetState::Start, SheetState::Imports),
            Some(CssRuleKind::Import) => (self.state <= SheetState::Imports, SheetState::Imports),
            Some(CssRuleKind::Namespace) => (
                self.state <= SheetState::Namespaces,
                SheetState::Namespaces,
            ),
            _ => (true, SheetState::Body),
        };

        if !allowed {
            let name = node.at_rule_name().unwrap_or_default();
            return self.drop_construct(error(&format!("@{name} is not allowed here"), node));
        }
        self.state = next_state;

        match self.convert_rule(node, false) {
            Ok(()) => Ok(()),
            Err(err) => self.drop_construct(err),
        }
    }

    fn convert_nested(&mut self, node: &Node) -> CssResult<()> {
        match self.convert_rule(node, true) {
            Ok(()) => Ok(()),
            Err(err) => self.drop_construct(err),
        }
    }

    /// Appends the grouping rule and converts the rules of its block as its children. A child
    /// that can not be converted only drops that child.
    fn convert_group(&mut self, rule: CssRule, block: Option<&Node>) -> CssResult<()> {
        let id = self.builder.append_rule(rule);

        let Some(block) = block else {
            return Ok(());
        };
        let NodeType::Block { children } = block.node_type.deref() else {
            return Err(error("Expected block", block));
        };

        self.builder.push_nesting(id);
        let result = children.iter().try_for_each(|child| self.convert_nested(child));
        self.builder.pop_nesting();

        result
    }

    pub(crate) fn convert_rule(&mut self, node: &Node, nested: bool) -> CssResult<()> {
        match node.node_type.deref() {
            NodeType::Rule { prelude, block } => {
                let selectors = self.selector_list(prelude)?;
                let declarations = declaration_block(block)?;
                self.builder.append_rule(CssRule::Style(StyleRule {
                    selectors,
                    declarations,
                }));
                Ok(())
            }
            NodeType::AtRule {
                name,
                prelude,
                block,
            } => {
                let kind = CssRuleKind::from_at_keyword(name)
                    .ok_or_else(|| error(&format!("Unknown at-rule @{name}"), node))?;
                self.convert_at_rule(kind, name, prelude.as_ref(), block.as_ref(), nested, node)
            }
            _ => Err(error("Expected rule", node)),
        }
    }

    fn convert_at_rule(
        &mut self,
        kind: CssRuleKind,
        name: &str,
        prelude: Option<&Node>,
        block: Option<&Node>,
        nested: bool,
        node: &Node,
    ) -> CssResult<()> {
        let require_prelude =
            || prelude.ok_or_else(|| error(&format!("@{name} needs a prelude"), node));

        if nested
            && matches!(
                kind,
                CssRuleKind::Charset | CssRuleKind::Import | CssRuleKind::Namespace
            )
        {
            return Err(error(&format!("@{name} is not allowed inside a block"), node));
        }

        match kind {
            CssRuleKind::Media => {
                let media = media_query_list(require_prelude()?)?;
                self.convert_group(
                    CssRule::Media(MediaRule {
                        media,
                        rules: vec![],
                    }),
                    block,
                )
            }
            CssRuleKind::Supports => {
                let condition = supports_condition(require_prelude()?)?;
                let builder = &self.builder;
                let supported = condition.evaluate(&|d| builder.supports_declaration(d));
                log::trace!("@supports {} evaluates to {}", condition.css_text(), supported);

                self.convert_group(
                    CssRule::Supports(SupportsRule {
                        condition,
                        supported,
                        rules: vec![],
                    }),
                    block,
                )
            }
            CssRuleKind::Region => {
                let selectors = self.selector_list(require_prelude()?)?;
                self.convert_group(
                    CssRule::Region(RegionRule {
                        selectors,
                        rules: vec![],
                    }),
                    block,
                )
            }
            CssRuleKind::Keyframes => {
                let rule_name = match require_prelude()?.node_type.deref() {
                    NodeType::Ident { value } | NodeType::String { value } => value.clone(),
                    _ => return Err(error("Expected keyframes name", node)),
                };
                let vendor_prefix = name
                    .strip_suffix("keyframes")
                    .filter(|prefix| !prefix.is_empty())
                    .map(str::to_string);

                let mut keyframes = vec![];
                for child in block_children(block) {
                    keyframes.push(keyframe(child)?);
                }

                self.builder.append_rule(CssRule::Keyframes(KeyframesRule {
                    name: rule_name,
                    vendor_prefix,
                    keyframes,
                }));
                Ok(())
            }
            CssRuleKind::Page => {
                let selector = page_selector(require_prelude()?)?;

                let mut declarations = vec![];
                let mut margin_boxes = vec![];
                for child in block_children(block) {
                    match child.node_type.deref() {
                        NodeType::Declaration { .. } => declarations.push(declaration(child)?),
                        NodeType::MarginBox { name, block } => {
                            let margin_box = MarginBox::from_name(name)
                                .ok_or_else(|| error("Unknown margin box", child))?;

                            self.builder.start_margin_box(margin_box);
                            let declarations = declaration_block(block);
                            self.builder.end_margin_box();

                            margin_boxes.push(MarginBoxRule {
                                margin_box,
                                declarations: declarations?,
                            });
                        }
                        _ => return Err(error("Unexpected node in @page", child)),
                    }
                }

                self.builder.append_rule(CssRule::Page(PageRule {
                    selector,
                    declarations: CssDeclarationBlock::new(declarations),
                    margin_boxes,
                }));
                Ok(())
            }
            CssRuleKind::FontFace => {
                let declarations = match block {
                    Some(block) => declaration_block(block)?,
                    None => CssDeclarationBlock::default(),
                };
                self.builder
                    .append_rule(CssRule::FontFace(FontFaceRule { declarations }));
                Ok(())
            }
            CssRuleKind::Namespace => {
                let NodeType::Namespace { prefix, uri } = require_prelude()?.node_type.deref() else {
                    return Err(error("Expected namespace", node));
                };

                self.builder.add_namespace(prefix.as_deref(), uri);
                self.builder.append_rule(CssRule::Namespace(NamespaceRule {
                    prefix: prefix.clone(),
                    uri: uri.clone(),
                }));
                Ok(())
            }
            CssRuleKind::Import => {
                let NodeType::Import { url, media } = require_prelude()?.node_type.deref() else {
                    return Err(error("Expected import", node));
                };

                self.builder.append_rule(CssRule::Import(ImportRule {
                    href: url.clone(),
                    media: media_query_list(media)?,
                }));
                Ok(())
            }
            CssRuleKind::Charset => {
                let NodeType::String { value } = require_prelude()?.node_type.deref() else {
                    return Err(error("Expected charset", node));
                };

                self.builder.append_rule(CssRule::Charset(CharsetRule {
                    encoding: value.clone(),
                }));
                Ok(())
            }
            CssRuleKind::Style => Err(error("Expected at-rule", node)),
        }
    }

    fn namespace_constraint(
        &self,
        prefix: Option<&str>,
        element: bool,
        node: &Node,
    ) -> CssResult<NamespaceConstraint> {
        match prefix {
            None if element => Ok(self
                .builder
                .default_namespace()
                .map_or(NamespaceConstraint::Unspecified, NamespaceConstraint::Default)),
            None => Ok(NamespaceConstraint::Unspecified),
            Some("*") => Ok(NamespaceConstraint::Any),
            Some("") => Ok(NamespaceConstraint::NoNamespace),
            Some(prefix) => match self.builder.resolve_namespace(prefix) {
                Some(uri) => Ok(NamespaceConstraint::Prefixed {
                    prefix: prefix.to_string(),
                    uri,
                }),
                None => Err(error(
                    &format!("Undeclared namespace prefix '{prefix}'"),
                    node,
                )),
            },
        }
    }

    fn simple_selector(&self, node: &Node) -> CssResult<CssSelector> {
        let selector = match node.node_type.deref() {
            NodeType::TypeSelector { namespace, value } => {
                let mut selector = CssSelector::new(MatchType::Tag, value);
                selector.namespace = self.namespace_constraint(namespace.as_deref(), true, node)?;
                selector
            }
            NodeType::IdSelector { value } => CssSelector::new(MatchType::Id, value),
            NodeType::ClassSelector { value } => CssSelector::new(MatchType::Class, value),
            NodeType::AttributeSelector {
                namespace,
                name,
                matcher,
                value,
                flags,
            } => {
                let match_type = MatchType::from_attribute_operator(matcher.as_deref())
                    .ok_or_else(|| error("Unknown attribute operator", node))?;
                let case_insensitive =
                    flags == "i" || self.builder.attribute_case_insensitive_default(name);

                CssSelector::new(match_type, value).with_rare(RareData::Attribute {
                    name: name.clone(),
                    namespace: self.namespace_constraint(namespace.as_deref(), false, node)?,
                    case_insensitive,
                })
            }
            NodeType::PseudoClassSelector { name, argument } => {
                let selector = CssSelector::new(MatchType::PseudoClass, name);
                let Some(argument) = argument else {
                    return Ok(selector);
                };

                let rare = match argument.node_type.deref() {
                    NodeType::Nth { nth } => match nth.node_type.deref() {
                        NodeType::AnPlusB { a, b } => RareData::Nth { a: *a, b: *b },
                        _ => return Err(error("Expected nth formula", nth)),
                    },
                    NodeType::SelectorList { .. } => {
                        RareData::SelectorList(self.selector_list(argument)?)
                    }
                    NodeType::Ident { value } => RareData::Argument(value.clone()),
                    _ => return Err(error("Unexpected pseudo-class argument", argument)),
                };
                selector.with_rare(rare)
            }
            NodeType::PseudoElementSelector { name } => {
                CssSelector::new(MatchType::PseudoElement, name)
            }
            _ => return Err(error("Expected simple selector", node)),
        };

        Ok(selector)
    }

    /// Converts a complex selector into a chain that starts with the subject. The last
    /// component of each compound carries the relation to the compound on its left.
    fn selector_chain(&self, node: &Node) -> CssResult<Vec<CssSelector>> {
        let NodeType::Selector { children } = node.node_type.deref() else {
            return Err(error("Expected selector", node));
        };

        let mut compounds: Vec<Vec<CssSelector>> = vec![vec![]];
        let mut relations: Vec<Relation> = vec![];

        for child in children {
            if let NodeType::Combinator { value } = child.node_type.deref() {
                let relation = Relation::from_combinator(value)
                    .ok_or_else(|| error(&format!("Unknown combinator '{value}'"), child))?;
                relations.push(relation);
                compounds.push(vec![]);
                continue;
            }

            let selector = self.simple_selector(child)?;
            if let Some(compound) = compounds.last_mut() {
                compound.push(selector);
            }
        }

        let mut chain = Vec::new();
        for (idx, mut compound) in compounds.into_iter().enumerate().rev() {
            if compound.is_empty() {
                return Err(error("Empty compound selector", node));
            }

            let relation = idx
                .checked_sub(1)
                .and_then(|i| relations.get(i))
                .copied();
            if let (Some(relation), Some(last)) = (relation, compound.last_mut()) {
                last.relation = relation;
            }

            chain.extend(compound);
        }

        Ok(chain)
    }

    pub(crate) fn selector_list(&self, node: &Node) -> CssResult<SelectorList> {
        let NodeType::SelectorList { selectors } = node.node_type.deref() else {
            return Err(error("Expected selector list", node));
        };

        let chains = selectors
            .iter()
            .map(|s| self.selector_chain(s))
            .collect::<CssResult<Vec<_>>>()?;

        Ok(SelectorList::from_chains(chains))
    }
}

fn block_children(block: Option<&Node>) -> &[Node] {
    match block.map(|b| b.node_type.deref()) {
        Some(NodeType::Block { children }) => children,
        _ => &[],
    }
}

fn page_selector(node: &Node) -> CssResult<SelectorList> {
    let NodeType::PageSelector { name, pseudo } = node.node_type.deref() else {
        return Err(error("Expected page selector", node));
    };

    let mut compound = vec![];
    if let Some(name) = name {
        compound.push(CssSelector::new(MatchType::Tag, name));
    }
    if let Some(pseudo) = pseudo {
        compound.push(CssSelector::new(MatchType::PagePseudoClass, pseudo));
    }

    if compound.is_empty() {
        return Ok(SelectorList::default());
    }

    Ok(SelectorList::from_chains(vec![compound]))
}

pub(crate) fn value(node: &Node) -> CssResult<CssValue> {
    let value = match node.node_type.deref() {
        NodeType::Ident { value } => CssValue::Ident(value.clone()),
        NodeType::Number { value } => CssValue::number(*value),
        NodeType::Percentage { value } => CssValue::percentage(*value),
        NodeType::Dimension { value, unit } => CssValue::dimension(*value, unit),
        NodeType::String { value } => CssValue::String(value.clone()),
        NodeType::Url { url } => CssValue::Uri(url.clone()),
        NodeType::Hash { value } => CssValue::HexColor(value.clone()),
        NodeType::Function { name, arguments } => CssValue::Function {
            name: name.clone(),
            args: value_list(arguments)?,
        },
        NodeType::Variable { name, fallback } => CssValue::Variable {
            name: name.clone(),
            fallback: fallback.as_deref().map(value_list).transpose()?,
        },
        NodeType::Calc { name, expr } => CssValue::Calc {
            name: name.clone(),
            expr: value_list(expr)?,
        },
        NodeType::Operator(op) => match op.chars().next() {
            Some(c) => CssValue::Operator(c),
            None => return Err(error("Empty operator", node)),
        },
        _ => return Err(error("Expected value", node)),
    };

    Ok(value)
}

pub(crate) fn value_list(nodes: &[Node]) -> CssResult<ValueList> {
    Ok(ValueList::new(
        nodes.iter().map(value).collect::<CssResult<Vec<_>>>()?,
    ))
}

pub(crate) fn declaration(node: &Node) -> CssResult<CssDeclaration> {
    let NodeType::Declaration {
        property,
        value,
        important,
    } = node.node_type.deref()
    else {
        return Err(error("Expected declaration", node));
    };

    Ok(CssDeclaration {
        property: property.clone(),
        value: value_list(value)?,
        important: *important,
    })
}

pub(crate) fn declaration_block(block: &Node) -> CssResult<CssDeclarationBlock> {
    let NodeType::Block { children } = block.node_type.deref() else {
        return Err(error("Expected declaration block", block));
    };

    let declarations = children
        .iter()
        .filter(|child| child.is_declaration())
        .map(declaration)
        .collect::<CssResult<Vec<_>>>()?;

    Ok(CssDeclarationBlock::new(declarations))
}

pub(crate) fn media_query_list(node: &Node) -> CssResult<MediaQueryList> {
    let NodeType::MediaQueryList { media_queries } = node.node_type.deref() else {
        return Err(error("Expected media query list", node));
    };

    let mut queries = vec![];
    for query in media_queries {
        let NodeType::MediaQuery {
            modifier,
            media_type,
            features,
        } = query.node_type.deref()
        else {
            return Err(error("Expected media query", query));
        };

        let restrictor = match modifier.as_str() {
            "only" => MediaRestrictor::Only,
            "not" => MediaRestrictor::Not,
            _ => MediaRestrictor::None,
        };

        let mut expressions = vec![];
        for feature in features {
            let NodeType::Feature { name, value } = feature.node_type.deref() else {
                return Err(error("Expected media feature", feature));
            };
            expressions.push(MediaExpression {
                feature: name.clone(),
                value: value.as_deref().map(value_list).transpose()?,
            });
        }

        queries.push(MediaQuery {
            restrictor,
            media_type: media_type.clone(),
            expressions,
        });
    }

    Ok(MediaQueryList { queries })
}

pub(crate) fn supports_condition(node: &Node) -> CssResult<SupportsCondition> {
    let condition = match node.node_type.deref() {
        NodeType::SupportsNot { condition } => {
            SupportsCondition::Not(Box::new(supports_condition(condition)?))
        }
        NodeType::SupportsJunction {
            operator,
            conditions,
        } => {
            let conditions = conditions
                .iter()
                .map(supports_condition)
                .collect::<CssResult<Vec<_>>>()?;
            match operator.as_str() {
                "and" => SupportsCondition::And(conditions),
                _ => SupportsCondition::Or(conditions),
            }
        }
        NodeType::SupportsDeclaration { term } => match term.node_type.deref() {
            NodeType::Raw { value } => SupportsCondition::GeneralEnclosed(value.clone()),
            _ => SupportsCondition::Declaration(declaration(term)?),
        },
        _ => return Err(error("Expected supports condition", node)),
    };

    Ok(condition)
}

pub(crate) fn keyframe(node: &Node) -> CssResult<Keyframe> {
    let NodeType::Keyframe { keys, block } = node.node_type.deref() else {
        return Err(error("Expected keyframe", node));
    };

    Ok(Keyframe {
        keys: keys.clone(),
        declarations: declaration_block(block)?,
    })
}

#[cfg(test)]
mod tests {
    use weft_shared::byte_stream::Stream;
    use super::*;
    use crate::builder::StylesheetBuilder;
    use crate::Css3;
    use weft_shared::byte_stream::{ByteStream, Encoding};
    use weft_shared::config::ParserConfig;

    fn convert(input: &str, builder: &mut StylesheetBuilder) -> CssResult<()> {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str(input);
        stream.close();

        let mut parser = Css3::new(&mut stream, ParserConfig::default());
        let sheet = parser.parse_stylesheet()?;
        let NodeType::StyleSheet { children } = *sheet.node_type else {
            return Err(CssError::new("Expected stylesheet"));
        };

        let mut converter = Converter::new(builder, true);
        for child in &children {
            converter.convert_top_level(child)?;
        }

        Ok(())
    }

    #[test]
    fn selector_chain_is_subject_first() {
        let mut builder = StylesheetBuilder::new(None);
        convert("div.a > p:hover, #x { }", &mut builder).unwrap();
        let sheet = builder.finish();

        let Some(CssRule::Style(rule)) = sheet.rules().next() else {
            panic!("expected style rule");
        };

        let components: Vec<(MatchType, &str, Relation)> = rule
            .selectors
            .components()
            .iter()
            .map(|c| (c.match_type, c.value.as_str(), c.relation))
            .collect();
        assert_eq!(
            components,
            vec![
                (MatchType::Tag, "p", Relation::SubSelector),
                (MatchType::PseudoClass, "hover", Relation::Child),
                (MatchType::Tag, "div", Relation::SubSelector),
                (MatchType::Class, "a", Relation::SubSelector),
                (MatchType::Id, "x", Relation::SubSelector),
            ]
        );
        assert_eq!(rule.selectors.selector_text(), "div.a > p:hover, #x");
    }

    #[test]
    fn namespaces_resolve_through_builder() {
        let mut builder = StylesheetBuilder::new(None);
        convert(
            "@namespace url(http://www.w3.org/1999/xhtml); @namespace svg url(http://www.w3.org/2000/svg); svg|rect, a, *|b, |c { } bogus|d { }",
            &mut builder,
        )
        .unwrap();
        let sheet = builder.finish();

        let styles: Vec<&StyleRule> = sheet
            .rules()
            .filter_map(|r| match r {
                CssRule::Style(s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(styles.len(), 1);

        let namespaces: Vec<&NamespaceConstraint> = styles[0]
            .selectors
            .components()
            .iter()
            .map(|c| &c.namespace)
            .collect();
        assert_eq!(
            namespaces,
            vec![
                &NamespaceConstraint::Prefixed {
                    prefix: "svg".into(),
                    uri: "http://www.w3.org/2000/svg".into()
                },
                &NamespaceConstraint::Default("http://www.w3.org/1999/xhtml".into()),
                &NamespaceConstraint::Any,
                &NamespaceConstraint::NoNamespace,
            ]
        );
    }

    #[test]
    fn ordering_rules() {
        let mut builder = StylesheetBuilder::new(None);
        convert(
            "@import \"a.css\"; @charset \"utf-8\"; a { } @import \"b.css\"; @namespace x \"y\";",
            &mut builder,
        )
        .unwrap();
        let sheet = builder.finish();

        let kinds: Vec<CssRuleKind> = sheet.rules().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec![CssRuleKind::Import, CssRuleKind::Style]);
    }

    #[test]
    fn nested_statement_rules_are_dropped() {
        let mut builder = StylesheetBuilder::new(None);
        convert(
            "@media print { @import \"x.css\"; a { } @namespace \"y\"; }",
            &mut builder,
        )
        .unwrap();
        let sheet = builder.finish();

        assert_eq!(sheet.arena.len(), 2);
        let Some(CssRule::Media(media)) = sheet.rules().next() else {
            panic!("expected media rule");
        };
        assert_eq!(media.rules.len(), 1);
        assert_eq!(sheet.default_namespace, None);

        let child = *sheet.all_rule_ids().last().unwrap();
        assert!(matches!(sheet.parent_rule(child), Some(CssRule::Media(_))));
    }

    #[test]
    fn supports_is_evaluated() {
        let mut builder = StylesheetBuilder::new(None);
        convert(
            "@supports (display: flex) and (not (bogus: 1)) { } @supports (bogus: 1) or (foo) { }",
            &mut builder,
        )
        .unwrap();
        let sheet = builder.finish();

        let supported: Vec<bool> = sheet
            .rules()
            .filter_map(|r| match r {
                CssRule::Supports(s) => Some(s.supported),
                _ => None,
            })
            .collect();
        assert_eq!(supported, vec![true, false]);
    }

    #[test]
    fn attribute_case_sensitivity() {
        let mut builder = StylesheetBuilder::for_html(None);
        convert("[type=a], [data-x=b], [data-y=c i] { }", &mut builder).unwrap();
        let sheet = builder.finish();

        let Some(CssRule::Style(rule)) = sheet.rules().next() else {
            panic!("expected style rule");
        };
        let flags: Vec<Option<(&str, bool)>> = rule
            .selectors
            .components()
            .iter()
            .map(|c| c.attribute())
            .collect();
        assert_eq!(
            flags,
            vec![
                Some(("type", true)),
                Some(("data-x", false)),
                Some(("data-y", true))
            ]
        );
    }
}
