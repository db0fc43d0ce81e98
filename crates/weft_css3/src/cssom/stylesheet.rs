use crate::cssom::rule::CssRule;
use itertools::Itertools;

/// Index of a rule inside a [`RuleArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub usize);

#[derive(Debug, Clone, PartialEq)]
struct RuleEntry {
    rule: CssRule,
    parent: Option<RuleId>,
}

/// Owns all rules of a stylesheet. Grouping rules refer to their children by id, and every
/// rule knows the id of its parent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleArena {
    entries: Vec<RuleEntry>,
}

impl RuleArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the rule. When a parent is given, the rule is appended to the child rules of the
    /// parent as well.
    pub fn insert(&mut self, mut rule: CssRule, parent: Option<RuleId>) -> RuleId {
        let id = RuleId(self.entries.len());

        for block in rule.declaration_blocks_mut() {
            block.owner = Some(id);
        }

        self.entries.push(RuleEntry { rule, parent });

        if let Some(parent_id) = parent {
            self.add_child(parent_id, id);
        }

        id
    }

    /// Appends the child id to the rule list of a grouping rule. Returns false when the parent
    /// is not a grouping rule.
    pub fn add_child(&mut self, parent: RuleId, child: RuleId) -> bool {
        let Some(rules) = self
            .entries
            .get_mut(parent.0)
            .and_then(|e| e.rule.child_rules_mut())
        else {
            log::warn!("rule {:?} can not hold nested rules", parent);
            return false;
        };

        if !rules.contains(&child) {
            rules.push(child);
        }

        if let Some(entry) = self.entries.get_mut(child.0) {
            entry.parent = Some(parent);
        }

        true
    }

    pub fn get(&self, id: RuleId) -> Option<&CssRule> {
        self.entries.get(id.0).map(|e| &e.rule)
    }

    pub fn get_mut(&mut self, id: RuleId) -> Option<&mut CssRule> {
        self.entries.get_mut(id.0).map(|e| &mut e.rule)
    }

    /// Returns the id of the grouping rule the given rule is nested in
    pub fn parent_rule(&self, id: RuleId) -> Option<RuleId> {
        self.entries.get(id.0).and_then(|e| e.parent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn css_text(&self, id: RuleId) -> String {
        self.get(id).map(|r| r.css_text(self)).unwrap_or_default()
    }
}

/// A parsed stylesheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CssStylesheet {
    pub arena: RuleArena,
    /// Top level rules in source order
    pub rules: Vec<RuleId>,
    /// Namespace prefixes declared with `@namespace`, in declaration order
    pub namespaces: Vec<(String, String)>,
    pub default_namespace: Option<String>,
    /// Filename or url of the stylesheet
    pub source: Option<String>,
}

impl CssStylesheet {
    pub fn new(source: Option<String>) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    /// Top level rules in source order
    pub fn rules(&self) -> impl Iterator<Item = &CssRule> {
        self.rules.iter().filter_map(|id| self.arena.get(*id))
    }

    pub fn rule(&self, id: RuleId) -> Option<&CssRule> {
        self.arena.get(id)
    }

    /// Returns the rule the given rule is nested in, if any
    pub fn parent_rule(&self, id: RuleId) -> Option<&CssRule> {
        self.arena.parent_rule(id).and_then(|p| self.arena.get(p))
    }

    /// All rule ids, depth first in source order
    pub fn all_rule_ids(&self) -> Vec<RuleId> {
        let mut ids = Vec::new();
        let mut stack: Vec<RuleId> = self.rules.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            ids.push(id);
            if let Some(children) = self.arena.get(id).and_then(|r| r.child_rules()) {
                stack.extend(children.iter().rev());
            }
        }

        ids
    }

    /// Returns the uri registered for the given namespace prefix
    pub fn resolve_namespace(&self, prefix: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .rev()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    pub fn css_text(&self) -> String {
        self.rules.iter().map(|id| self.arena.css_text(*id)).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cssom::media::MediaQueryList;
    use crate::cssom::rule::{FontFaceRule, MediaRule};
    use crate::cssom::value::CssDeclarationBlock;

    #[test]
    fn arena_keeps_parents() {
        let mut arena = RuleArena::new();

        let media = arena.insert(
            CssRule::Media(MediaRule {
                media: MediaQueryList::default(),
                rules: Vec::new(),
            }),
            None,
        );
        let font = arena.insert(
            CssRule::FontFace(FontFaceRule {
                declarations: CssDeclarationBlock::default(),
            }),
            Some(media),
        );

        assert_eq!(arena.parent_rule(font), Some(media));
        assert_eq!(arena.parent_rule(media), None);
        assert_eq!(
            arena.get(media).and_then(|r| r.child_rules()),
            Some(&[font][..])
        );

        match arena.get(font) {
            Some(CssRule::FontFace(rule)) => assert_eq!(rule.declarations.owner, Some(font)),
            other => panic!("unexpected rule {other:?}"),
        }

        assert!(!arena.add_child(font, media));
        assert_eq!(arena.css_text(media), "@media { @font-face { } }");
    }
}
