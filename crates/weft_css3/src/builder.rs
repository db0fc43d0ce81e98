//! The receiving end of the parser
//!
//! Every rule is handed to a [`CssBuilder`] as soon as it has been parsed and converted. The
//! builder also answers the questions the parser can not answer by itself: which namespaces are
//! declared, whether a declaration is supported, and how attribute values compare.
use crate::cssom::rule::{CssRule, MarginBox};
use crate::cssom::stylesheet::{CssStylesheet, RuleId};
use crate::cssom::value::CssDeclaration;
use crate::properties;
use weft_shared::byte_stream::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRangeKind {
    /// Selector or at-rule prelude
    RuleHeader,
    /// Everything between the curly braces of a rule
    RuleBody,
    Declaration,
}

/// Start and end location of a construct in the source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRange {
    pub kind: SourceRangeKind,
    pub start: Location,
    pub end: Location,
}

pub trait CssBuilder {
    /// Appends a rule to the currently open rule list and returns its id
    fn append_rule(&mut self, rule: CssRule) -> RuleId;

    /// Subsequent rules are nested inside the given grouping rule until `pop_nesting()`
    fn push_nesting(&mut self, parent: RuleId);
    fn pop_nesting(&mut self);

    /// Registers a namespace. Without a prefix, the uri becomes the default namespace.
    fn add_namespace(&mut self, prefix: Option<&str>, uri: &str);
    fn default_namespace(&self) -> Option<String>;
    fn resolve_namespace(&self, prefix: &str) -> Option<String>;

    /// Called around the declarations of each `@page` margin box. The declarations themselves
    /// end up in the page rule.
    fn start_margin_box(&mut self, _margin_box: MarginBox) {}
    fn end_margin_box(&mut self) {}

    /// Used to evaluate `@supports` conditions
    fn supports_declaration(&self, declaration: &CssDeclaration) -> bool {
        properties::is_valid_property(&declaration.property) && !declaration.value.is_empty()
    }

    /// Only called when source range tracking is enabled in the parser config
    fn source_range(&mut self, _range: SourceRange) {}

    /// Returns true when values of the given attribute compare case-insensitively when no
    /// explicit `i` flag is present
    fn attribute_case_insensitive_default(&self, _attribute: &str) -> bool {
        false
    }
}

/// Default builder that collects everything into a [`CssStylesheet`]
#[derive(Debug, Default)]
pub struct StylesheetBuilder {
    sheet: CssStylesheet,
    nesting: Vec<RuleId>,
    /// Attribute case sensitivity follows the HTML rules
    html_document: bool,
    source_ranges: Vec<SourceRange>,
}

impl StylesheetBuilder {
    pub fn new(source: Option<String>) -> Self {
        Self {
            sheet: CssStylesheet::new(source),
            ..Default::default()
        }
    }

    /// Builder for stylesheets that apply to HTML documents
    pub fn for_html(source: Option<String>) -> Self {
        Self {
            html_document: true,
            ..Self::new(source)
        }
    }

    pub fn source_ranges(&self) -> &[SourceRange] {
        &self.source_ranges
    }

    pub fn finish(self) -> CssStylesheet {
        if !self.nesting.is_empty() {
            log::warn!("finishing stylesheet with {} open rule(s)", self.nesting.len());
        }

        self.sheet
    }
}

impl CssBuilder for StylesheetBuilder {
    fn append_rule(&mut self, rule: CssRule) -> RuleId {
        let parent = self.nesting.last().copied();
        let id = self.sheet.arena.insert(rule, parent);
        if parent.is_none() {
            self.sheet.rules.push(id);
        }

        id
    }

    fn push_nesting(&mut self, parent: RuleId) {
        self.nesting.push(parent);
    }

    fn pop_nesting(&mut self) {
        self.nesting.pop();
    }

    fn add_namespace(&mut self, prefix: Option<&str>, uri: &str) {
        match prefix {
            Some(prefix) => self
                .sheet
                .namespaces
                .push((prefix.to_string(), uri.to_string())),
            None => self.sheet.default_namespace = Some(uri.to_string()),
        }
    }

    fn default_namespace(&self) -> Option<String> {
        self.sheet.default_namespace.clone()
    }

    fn resolve_namespace(&self, prefix: &str) -> Option<String> {
        self.sheet.resolve_namespace(prefix).map(str::to_string)
    }

    fn source_range(&mut self, range: SourceRange) {
        self.source_ranges.push(range);
    }

    fn attribute_case_insensitive_default(&self, attribute: &str) -> bool {
        self.html_document && properties::is_html_case_insensitive_attribute(attribute)
    }
}

#[cfg(test)]
mod tests {
    use weft_shared::byte_stream::Stream;
    use super::*;
    use crate::Css3;
    use weft_shared::byte_stream::{ByteStream, Encoding};
    use weft_shared::config::ParserConfig;

    /// Records the margin box callbacks and stores everything else in a stylesheet
    #[derive(Default)]
    struct RecordingBuilder {
        inner: StylesheetBuilder,
        events: Vec<String>,
    }

    impl CssBuilder for RecordingBuilder {
        fn append_rule(&mut self, rule: CssRule) -> RuleId {
            self.inner.append_rule(rule)
        }

        fn push_nesting(&mut self, parent: RuleId) {
            self.inner.push_nesting(parent)
        }

        fn pop_nesting(&mut self) {
            self.inner.pop_nesting()
        }

        fn add_namespace(&mut self, prefix: Option<&str>, uri: &str) {
            self.inner.add_namespace(prefix, uri)
        }

        fn default_namespace(&self) -> Option<String> {
            self.inner.default_namespace()
        }

        fn resolve_namespace(&self, prefix: &str) -> Option<String> {
            self.inner.resolve_namespace(prefix)
        }

        fn start_margin_box(&mut self, margin_box: MarginBox) {
            self.events.push(format!("start {}", margin_box.name()));
        }

        fn end_margin_box(&mut self) {
            self.events.push("end".into());
        }
    }

    #[test]
    fn margin_boxes_are_reported_and_stored_in_the_page() {
        let mut stream = ByteStream::new(Encoding::UTF8, None);
        stream.read_from_str("@page { margin: 1in; @top-left { content: \"a\" } @bottom-center { }}");
        stream.close();

        let mut builder = RecordingBuilder::default();
        Css3::parse_stream(&mut stream, ParserConfig::default(), &mut builder).unwrap();
        assert_eq!(
            builder.events,
            vec!["start top-left", "end", "start bottom-center", "end"]
        );

        let sheet = builder.inner.finish();
        let Some(CssRule::Page(page)) = sheet.rules().next() else {
            unreachable!()
        };
        let boxes: Vec<(MarginBox, String)> = page
            .margin_boxes
            .iter()
            .map(|m| (m.margin_box, m.declarations.css_text()))
            .collect();
        assert_eq!(
            boxes,
            vec![
                (MarginBox::TopLeft, "content: \"a\";".to_string()),
                (MarginBox::BottomCenter, String::new()),
            ]
        );
    }
}
