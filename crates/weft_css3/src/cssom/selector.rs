use crate::cssom::{serialize_identifier, serialize_string};
use itertools::Itertools;

/// What a single selector component matches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Element name, or `*`
    Tag,
    Id,
    Class,
    /// `[attr=value]`
    Exact,
    /// `[attr]`
    Set,
    /// `[attr~=value]`
    List,
    /// `[attr|=value]`
    Hyphen,
    /// `[attr^=value]`
    Begin,
    /// `[attr$=value]`
    End,
    /// `[attr*=value]`
    Contain,
    PseudoClass,
    PseudoElement,
    /// `:first`, `:left`, `:right` and `:blank` inside `@page`
    PagePseudoClass,
}

impl MatchType {
    /// Returns the match type for the given attribute operator
    pub fn from_attribute_operator(op: Option<&str>) -> Option<MatchType> {
        match op {
            None => Some(MatchType::Set),
            Some("=") => Some(MatchType::Exact),
            Some("~=") => Some(MatchType::List),
            Some("|=") => Some(MatchType::Hyphen),
            Some("^=") => Some(MatchType::Begin),
            Some("$=") => Some(MatchType::End),
            Some("*=") => Some(MatchType::Contain),
            _ => None,
        }
    }

    fn attribute_operator(&self) -> Option<&'static str> {
        match self {
            MatchType::Exact => Some("="),
            MatchType::List => Some("~="),
            MatchType::Hyphen => Some("|="),
            MatchType::Begin => Some("^="),
            MatchType::End => Some("$="),
            MatchType::Contain => Some("*="),
            _ => None,
        }
    }

    pub fn is_attribute(&self) -> bool {
        matches!(
            self,
            MatchType::Exact
                | MatchType::Set
                | MatchType::List
                | MatchType::Hyphen
                | MatchType::Begin
                | MatchType::End
                | MatchType::Contain
        )
    }
}

/// Relation of a selector component to the NEXT component in its chain. Chains are stored
/// subject first, so the next component is the one to the left in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    DirectAdjacent,
    /// `a ~ b`
    IndirectAdjacent,
    /// Next component belongs to the same compound selector
    SubSelector,
}

impl Relation {
    pub fn from_combinator(combinator: &str) -> Option<Relation> {
        match combinator {
            " " => Some(Relation::Descendant),
            ">" => Some(Relation::Child),
            "+" => Some(Relation::DirectAdjacent),
            "~" => Some(Relation::IndirectAdjacent),
            _ => None,
        }
    }

    fn combinator_text(&self) -> &'static str {
        match self {
            Relation::Descendant => " ",
            Relation::Child => " > ",
            Relation::DirectAdjacent => " + ",
            Relation::IndirectAdjacent => " ~ ",
            Relation::SubSelector => "",
        }
    }
}

/// Namespace part of a type or attribute selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceConstraint {
    /// No prefix was given and no default namespace applies
    Unspecified,
    /// No prefix was given, the default namespace of the stylesheet applies
    Default(String),
    /// `*|name`
    Any,
    /// `|name`
    NoNamespace,
    /// `prefix|name`, resolved to its uri
    Prefixed { prefix: String, uri: String },
}

impl NamespaceConstraint {
    fn prefix_text(&self) -> String {
        match self {
            NamespaceConstraint::Unspecified | NamespaceConstraint::Default(_) => String::new(),
            NamespaceConstraint::Any => "*|".to_string(),
            NamespaceConstraint::NoNamespace => "|".to_string(),
            NamespaceConstraint::Prefixed { prefix, .. } => {
                format!("{}|", serialize_identifier(prefix))
            }
        }
    }

    /// Returns the namespace uri the selector is restricted to, if any
    pub fn uri(&self) -> Option<&str> {
        match self {
            NamespaceConstraint::Default(uri) | NamespaceConstraint::Prefixed { uri, .. } => {
                Some(uri.as_str())
            }
            NamespaceConstraint::NoNamespace => Some(""),
            _ => None,
        }
    }
}

/// Fields that only a minority of selector components need
#[derive(Debug, Clone, PartialEq)]
pub enum RareData {
    Attribute {
        name: String,
        namespace: NamespaceConstraint,
        case_insensitive: bool,
    },
    /// Normalized `an+b` formula of the `:nth-*` pseudo-classes
    Nth { a: i32, b: i32 },
    /// Argument of `:lang()` and `:dir()`
    Argument(String),
    /// Argument of `:not()` and `:-webkit-any()`
    SelectorList(SelectorList),
}

/// A single simple selector component
#[derive(Debug, Clone, PartialEq)]
pub struct CssSelector {
    pub match_type: MatchType,
    pub relation: Relation,
    /// Tag name, id, class name, attribute value or pseudo name
    pub value: String,
    /// Namespace of a tag selector
    pub namespace: NamespaceConstraint,
    pub rare: Option<Box<RareData>>,
    /// Last component of a complex selector (but not of the whole list)
    pub last_in_chain: bool,
    /// Very last component of the selector list
    pub last_in_list: bool,
}

impl CssSelector {
    pub fn new(match_type: MatchType, value: &str) -> Self {
        Self {
            match_type,
            relation: Relation::SubSelector,
            value: value.to_string(),
            namespace: NamespaceConstraint::Unspecified,
            rare: None,
            last_in_chain: false,
            last_in_list: false,
        }
    }

    pub fn with_rare(mut self, rare: RareData) -> Self {
        self.rare = Some(Box::new(rare));
        self
    }

    /// Returns true when this component is the last one of its complex selector
    pub fn ends_chain(&self) -> bool {
        self.last_in_chain || self.last_in_list
    }

    pub fn is_universal(&self) -> bool {
        self.match_type == MatchType::Tag && self.value == "*"
    }

    pub fn nth(&self) -> Option<(i32, i32)> {
        match self.rare.as_deref() {
            Some(RareData::Nth { a, b }) => Some((*a, *b)),
            _ => None,
        }
    }

    pub fn argument(&self) -> Option<&str> {
        match self.rare.as_deref() {
            Some(RareData::Argument(arg)) => Some(arg.as_str()),
            _ => None,
        }
    }

    pub fn selector_list(&self) -> Option<&SelectorList> {
        match self.rare.as_deref() {
            Some(RareData::SelectorList(list)) => Some(list),
            _ => None,
        }
    }

    /// Returns the attribute name and case-insensitivity flag for attribute selectors
    pub fn attribute(&self) -> Option<(&str, bool)> {
        match self.rare.as_deref() {
            Some(RareData::Attribute {
                name,
                case_insensitive,
                ..
            }) => Some((name.as_str(), *case_insensitive)),
            _ => None,
        }
    }

    fn specificity(&self) -> u32 {
        match self.match_type {
            MatchType::Id => 0x10000,
            MatchType::Tag if self.is_universal() => 0,
            MatchType::Tag | MatchType::PseudoElement => 1,
            MatchType::PseudoClass => match self.selector_list() {
                Some(list) => list.max_specificity(),
                None => 0x100,
            },
            _ => 0x100,
        }
    }

    fn css_text(&self) -> String {
        match self.match_type {
            MatchType::Tag => {
                let name = if self.value == "*" {
                    "*".to_string()
                } else {
                    serialize_identifier(&self.value)
                };
                format!("{}{}", self.namespace.prefix_text(), name)
            }
            MatchType::Id => format!("#{}", serialize_identifier(&self.value)),
            MatchType::Class => format!(".{}", serialize_identifier(&self.value)),
            MatchType::PseudoElement => format!("::{}", self.value),
            MatchType::PagePseudoClass => format!(":{}", self.value),
            MatchType::PseudoClass => match self.rare.as_deref() {
                Some(RareData::Nth { a, b }) => format!(":{}({})", self.value, nth_text(*a, *b)),
                Some(RareData::Argument(arg)) => {
                    format!(":{}({})", self.value, serialize_identifier(arg))
                }
                Some(RareData::SelectorList(list)) => {
                    format!(":{}({})", self.value, list.selector_text())
                }
                _ => format!(":{}", self.value),
            },
            _ => {
                let (name, ns, flag) = match self.rare.as_deref() {
                    Some(RareData::Attribute {
                        name,
                        namespace,
                        case_insensitive,
                    }) => (
                        serialize_identifier(name),
                        namespace.prefix_text(),
                        if *case_insensitive { " i" } else { "" },
                    ),
                    _ => (String::new(), String::new(), ""),
                };

                match self.match_type.attribute_operator() {
                    Some(op) => format!(
                        "[{ns}{name}{op}{}{flag}]",
                        serialize_string(&self.value)
                    ),
                    None => format!("[{ns}{name}]"),
                }
            }
        }
    }
}

/// Formats the normalized nth formula so it parses back into the same pair
fn nth_text(a: i32, b: i32) -> String {
    if a == 0 {
        return b.to_string();
    }

    let a_text = match a {
        1 => "n".to_string(),
        -1 => "-n".to_string(),
        a => format!("{a}n"),
    };

    match b {
        0 => a_text,
        b if b > 0 => format!("{a_text}+{b}"),
        b => format!("{a_text}{b}"),
    }
}

/// Comma separated list of complex selectors, stored as one flat array of components. Each
/// complex selector is stored subject first and ends with a component that has `last_in_chain`
/// (or, for the final one, `last_in_list`) set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectorList {
    components: Vec<CssSelector>,
}

impl SelectorList {
    /// Creates a list from complex selectors that are each stored subject first
    pub fn from_chains(chains: Vec<Vec<CssSelector>>) -> Self {
        let chain_count = chains.len();
        let mut components = Vec::new();

        for (idx, chain) in chains.into_iter().enumerate() {
            let len = chain.len();
            for (pos, mut component) in chain.into_iter().enumerate() {
                component.last_in_chain = false;
                component.last_in_list = false;
                if pos + 1 == len {
                    if idx + 1 == chain_count {
                        component.last_in_list = true;
                    } else {
                        component.last_in_chain = true;
                    }
                }
                components.push(component);
            }
        }

        Self { components }
    }

    /// Returns all components of all complex selectors
    pub fn components(&self) -> &[CssSelector] {
        &self.components
    }

    /// Returns the complex selectors, each subject first
    pub fn chains(&self) -> Vec<&[CssSelector]> {
        let mut chains = Vec::new();
        let mut start = 0;

        for (idx, component) in self.components.iter().enumerate() {
            if component.ends_chain() {
                chains.push(&self.components[start..=idx]);
                start = idx + 1;
            }
        }

        chains
    }

    /// Number of complex selectors in the list
    pub fn len(&self) -> usize {
        self.chains().len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Specificity of each complex selector, encoded as `a << 16 | b << 8 | c`
    pub fn specificities(&self) -> Vec<u32> {
        self.chains()
            .iter()
            .map(|chain| chain.iter().map(|c| c.specificity()).sum())
            .collect()
    }

    fn max_specificity(&self) -> u32 {
        self.specificities().into_iter().max().unwrap_or(0)
    }

    pub fn selector_text(&self) -> String {
        self.chains().into_iter().map(chain_text).join(", ")
    }
}

/// Turns a subject first chain back into source order
fn chain_text(chain: &[CssSelector]) -> String {
    // compounds from right to left, each in source order
    let mut compounds: Vec<Vec<&CssSelector>> = vec![Vec::new()];
    for component in chain {
        if let Some(current) = compounds.last_mut() {
            current.push(component);
        }
        if component.relation != Relation::SubSelector && !component.ends_chain() {
            compounds.push(Vec::new());
        }
    }

    let mut out = String::new();
    for idx in (0..compounds.len()).rev() {
        for component in &compounds[idx] {
            out.push_str(&component.css_text());
        }

        if idx > 0 {
            let relation = compounds[idx - 1]
                .last()
                .map(|c| c.relation)
                .unwrap_or(Relation::Descendant);
            out.push_str(relation.combinator_text());
        }
    }

    out
}
