use crate::cssom::media::MediaQueryList;
use crate::cssom::selector::SelectorList;
use crate::cssom::stylesheet::{RuleArena, RuleId};
use crate::cssom::value::{CssDeclaration, CssDeclarationBlock};
use crate::cssom::{serialize_identifier, serialize_number, serialize_string};
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssRuleKind {
    Style,
    Media,
    Supports,
    Keyframes,
    Page,
    FontFace,
    Region,
    Namespace,
    Import,
    Charset,
}

impl CssRuleKind {
    /// Returns the rule kind of the given at-rule name
    pub fn from_at_keyword(name: &str) -> Option<CssRuleKind> {
        match name.to_ascii_lowercase().as_str() {
            "media" => Some(CssRuleKind::Media),
            "supports" => Some(CssRuleKind::Supports),
            "keyframes" | "-webkit-keyframes" => Some(CssRuleKind::Keyframes),
            "page" => Some(CssRuleKind::Page),
            "font-face" => Some(CssRuleKind::FontFace),
            "-webkit-region" => Some(CssRuleKind::Region),
            "namespace" => Some(CssRuleKind::Namespace),
            "import" => Some(CssRuleKind::Import),
            "charset" => Some(CssRuleKind::Charset),
            _ => None,
        }
    }
}

/// The sixteen page margin boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginBox {
    TopLeftCorner,
    TopLeft,
    TopCenter,
    TopRight,
    TopRightCorner,
    BottomLeftCorner,
    BottomLeft,
    BottomCenter,
    BottomRight,
    BottomRightCorner,
    LeftTop,
    LeftMiddle,
    LeftBottom,
    RightTop,
    RightMiddle,
    RightBottom,
}

impl MarginBox {
    pub fn from_name(name: &str) -> Option<MarginBox> {
        let margin_box = match name.to_ascii_lowercase().as_str() {
            "top-left-corner" => MarginBox::TopLeftCorner,
            "top-left" => MarginBox::TopLeft,
            "top-center" => MarginBox::TopCenter,
            "top-right" => MarginBox::TopRight,
            "top-right-corner" => MarginBox::TopRightCorner,
            "bottom-left-corner" => MarginBox::BottomLeftCorner,
            "bottom-left" => MarginBox::BottomLeft,
            "bottom-center" => MarginBox::BottomCenter,
            "bottom-right" => MarginBox::BottomRight,
            "bottom-right-corner" => MarginBox::BottomRightCorner,
            "left-top" => MarginBox::LeftTop,
            "left-middle" => MarginBox::LeftMiddle,
            "left-bottom" => MarginBox::LeftBottom,
            "right-top" => MarginBox::RightTop,
            "right-middle" => MarginBox::RightMiddle,
            "right-bottom" => MarginBox::RightBottom,
            _ => return None,
        };

        Some(margin_box)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarginBox::TopLeftCorner => "top-left-corner",
            MarginBox::TopLeft => "top-left",
            MarginBox::TopCenter => "top-center",
            MarginBox::TopRight => "top-right",
            MarginBox::TopRightCorner => "top-right-corner",
            MarginBox::BottomLeftCorner => "bottom-left-corner",
            MarginBox::BottomLeft => "bottom-left",
            MarginBox::BottomCenter => "bottom-center",
            MarginBox::BottomRight => "bottom-right",
            MarginBox::BottomRightCorner => "bottom-right-corner",
            MarginBox::LeftTop => "left-top",
            MarginBox::LeftMiddle => "left-middle",
            MarginBox::LeftBottom => "left-bottom",
            MarginBox::RightTop => "right-top",
            MarginBox::RightMiddle => "right-middle",
            MarginBox::RightBottom => "right-bottom",
        }
    }
}

/// Boolean condition of a `@supports` rule
#[derive(Debug, Clone, PartialEq)]
pub enum SupportsCondition {
    Not(Box<SupportsCondition>),
    And(Vec<SupportsCondition>),
    Or(Vec<SupportsCondition>),
    Declaration(CssDeclaration),
    /// Anything in parentheses that is not understood. Always false.
    GeneralEnclosed(String),
}

impl SupportsCondition {
    /// Evaluates the condition. Declarations are checked with the given callback.
    pub fn evaluate(&self, supported: &dyn Fn(&CssDeclaration) -> bool) -> bool {
        match self {
            SupportsCondition::Not(c) => !c.evaluate(supported),
            SupportsCondition::And(list) => list.iter().all(|c| c.evaluate(supported)),
            SupportsCondition::Or(list) => list.iter().any(|c| c.evaluate(supported)),
            SupportsCondition::Declaration(d) => supported(d),
            SupportsCondition::GeneralEnclosed(_) => false,
        }
    }

    pub fn css_text(&self) -> String {
        match self {
            SupportsCondition::Not(c) => format!("not {}", c.in_parens()),
            SupportsCondition::And(list) => list.iter().map(|c| c.in_parens()).join(" and "),
            SupportsCondition::Or(list) => list.iter().map(|c| c.in_parens()).join(" or "),
            SupportsCondition::Declaration(d) => format!("({})", d.css_text()),
            SupportsCondition::GeneralEnclosed(raw) => raw.clone(),
        }
    }

    fn in_parens(&self) -> String {
        match self {
            SupportsCondition::Declaration(_) | SupportsCondition::GeneralEnclosed(_) => {
                self.css_text()
            }
            _ => format!("({})", self.css_text()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub selectors: SelectorList,
    pub declarations: CssDeclarationBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaRule {
    pub media: MediaQueryList,
    pub rules: Vec<RuleId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupportsRule {
    pub condition: SupportsCondition,
    /// Result of the condition at parse time
    pub supported: bool,
    pub rules: Vec<RuleId>,
}

/// A single keyframe. Keys are fractions: `from` is 0.0, `to` is 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub keys: Vec<f32>,
    pub declarations: CssDeclarationBlock,
}

impl Keyframe {
    pub fn key_text(&self) -> String {
        self.keys
            .iter()
            .map(|k| format!("{}%", serialize_number(k * 100.0)))
            .join(", ")
    }

    pub fn css_text(&self) -> String {
        format!(
            "{} {}",
            self.key_text(),
            block_text(&self.declarations.css_text())
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframesRule {
    pub name: String,
    /// Set for `@-webkit-keyframes`
    pub vendor_prefix: Option<String>,
    pub keyframes: Vec<Keyframe>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarginBoxRule {
    pub margin_box: MarginBox,
    pub declarations: CssDeclarationBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageRule {
    /// Page name and page pseudo-class as a single compound selector. Empty for `@page { }`.
    pub selector: SelectorList,
    pub declarations: CssDeclarationBlock,
    pub margin_boxes: Vec<MarginBoxRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontFaceRule {
    pub declarations: CssDeclarationBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionRule {
    pub selectors: SelectorList,
    pub rules: Vec<RuleId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceRule {
    pub prefix: Option<String>,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportRule {
    pub href: String,
    pub media: MediaQueryList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharsetRule {
    pub encoding: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CssRule {
    Style(StyleRule),
    Media(MediaRule),
    Supports(SupportsRule),
    Keyframes(KeyframesRule),
    Page(PageRule),
    FontFace(FontFaceRule),
    Region(RegionRule),
    Namespace(NamespaceRule),
    Import(ImportRule),
    Charset(CharsetRule),
}

impl CssRule {
    pub fn kind(&self) -> CssRuleKind {
        match self {
            CssRule::Style(_) => CssRuleKind::Style,
            CssRule::Media(_) => CssRuleKind::Media,
            CssRule::Supports(_) => CssRuleKind::Supports,
            CssRule::Keyframes(_) => CssRuleKind::Keyframes,
            CssRule::Page(_) => CssRuleKind::Page,
            CssRule::FontFace(_) => CssRuleKind::FontFace,
            CssRule::Region(_) => CssRuleKind::Region,
            CssRule::Namespace(_) => CssRuleKind::Namespace,
            CssRule::Import(_) => CssRuleKind::Import,
            CssRule::Charset(_) => CssRuleKind::Charset,
        }
    }

    /// Nested rules of a grouping rule
    pub fn child_rules(&self) -> Option<&[RuleId]> {
        match self {
            CssRule::Media(r) => Some(&r.rules),
            CssRule::Supports(r) => Some(&r.rules),
            CssRule::Region(r) => Some(&r.rules),
            _ => None,
        }
    }

    pub(crate) fn child_rules_mut(&mut self) -> Option<&mut Vec<RuleId>> {
        match self {
            CssRule::Media(r) => Some(&mut r.rules),
            CssRule::Supports(r) => Some(&mut r.rules),
            CssRule::Region(r) => Some(&mut r.rules),
            _ => None,
        }
    }

    /// All declaration blocks that belong directly to this rule
    pub(crate) fn declaration_blocks_mut(&mut self) -> Vec<&mut CssDeclarationBlock> {
        match self {
            CssRule::Style(r) => vec![&mut r.declarations],
            CssRule::FontFace(r) => vec![&mut r.declarations],
            CssRule::Page(r) => {
                let mut blocks = vec![&mut r.declarations];
                blocks.extend(r.margin_boxes.iter_mut().map(|m| &mut m.declarations));
                blocks
            }
            CssRule::Keyframes(r) => r.keyframes.iter_mut().map(|k| &mut k.declarations).collect(),
            _ => Vec::new(),
        }
    }

    /// Serializes the rule. Nested rules are looked up in the given arena.
    pub fn css_text(&self, arena: &RuleArena) -> String {
        match self {
            CssRule::Style(r) => format!(
                "{} {}",
                r.selectors.selector_text(),
                block_text(&r.declarations.css_text())
            ),
            CssRule::Media(r) => {
                let media = r.media.css_text();
                let head = if media.is_empty() {
                    "@media".to_string()
                } else {
                    format!("@media {media}")
                };
                format!("{head} {}", block_text(&children_text(&r.rules, arena)))
            }
            CssRule::Supports(r) => format!(
                "@supports {} {}",
                r.condition.css_text(),
                block_text(&children_text(&r.rules, arena))
            ),
            CssRule::Keyframes(r) => {
                let frames = r.keyframes.iter().map(|k| k.css_text()).join(" ");
                format!(
                    "@{}keyframes {} {}",
                    r.vendor_prefix.as_deref().unwrap_or(""),
                    serialize_identifier(&r.name),
                    block_text(&frames)
                )
            }
            CssRule::Page(r) => {
                let mut body = r.declarations.css_text();
                for margin in &r.margin_boxes {
                    if !body.is_empty() {
                        body.push(' ');
                    }
                    body.push_str(&format!(
                        "@{} {}",
                        margin.margin_box.name(),
                        block_text(&margin.declarations.css_text())
                    ));
                }

                let selector = r.selector.selector_text();
                if selector.is_empty() {
                    format!("@page {}", block_text(&body))
                } else {
                    format!("@page {selector} {}", block_text(&body))
                }
            }
            CssRule::FontFace(r) => {
                format!("@font-face {}", block_text(&r.declarations.css_text()))
            }
            CssRule::Region(r) => format!(
                "@-webkit-region {} {}",
                r.selectors.selector_text(),
                block_text(&children_text(&r.rules, arena))
            ),
            CssRule::Namespace(r) => match &r.prefix {
                Some(prefix) => format!(
                    "@namespace {} url({});",
                    serialize_identifier(prefix),
                    serialize_string(&r.uri)
                ),
                None => format!("@namespace url({});", serialize_string(&r.uri)),
            },
            CssRule::Import(r) => {
                if r.media.is_empty() {
                    format!("@import url({});", serialize_string(&r.href))
                } else {
                    format!(
                        "@import url({}) {};",
                        serialize_string(&r.href),
                        r.media.css_text()
                    )
                }
            }
            CssRule::Charset(r) => format!("@charset {};", serialize_string(&r.encoding)),
        }
    }
}

fn block_text(body: &str) -> String {
    if body.is_empty() {
        "{ }".to_string()
    } else {
        format!("{{ {body} }}")
    }
}

fn children_text(rules: &[RuleId], arena: &RuleArena) -> String {
    rules
        .iter()
        .filter_map(|id| arena.get(*id))
        .map(|rule| rule.css_text(arena))
        .join(" ")
}
