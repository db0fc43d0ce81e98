//! Configuration for the css parser and the flexbox layouter
use crate::byte_stream::Location;

/// Context defines which production the parser starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// A complete stylesheet
    Stylesheet,
    /// A single style rule or at-rule
    Rule,
    /// A single at-rule
    AtRule,
    /// A single `property: value` declaration
    Declaration,
    /// A list of declarations without braces (as found in a `style` attribute)
    DeclarationList,
    /// A selector list
    Selector,
    /// A media query list (as found in a `media` attribute)
    MediaQueryList,
    /// A single property value
    Value,
}

/// ParserConfig holds the configuration for the CSS3 parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Context defines what kind of data we are providing
    pub context: Context,
    /// Location holds the start position of the given element in the data source. Inline
    /// stylesheets do not start at 1:1.
    pub location: Location,
    /// Optional source filename or url
    pub source: Option<String>,
    /// Ignore errors and continue parsing. Invalid constructs are dropped following the css
    /// error recovery rules. When false, the first error is returned instead.
    pub ignore_errors: bool,
    /// When true, the builder receives the source ranges of rules and declarations
    pub track_source_ranges: bool,
    /// Maximum nesting of blocks, calculations, functions and functional pseudo-classes. A
    /// construct that nests deeper is an error and is dropped like any other invalid construct.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            context: Context::Stylesheet,
            location: Location::default(),
            source: None,
            ignore_errors: true,
            track_source_ranges: false,
            max_depth: 64,
        }
    }
}

/// LayoutConfig holds the tunables of the flexbox layouter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Two sizes closer than this are considered equal when checking min/max constraints
    pub epsilon: f32,
    /// Upper bound of free space distribution passes. `None` means one pass per flex item
    /// plus one, which is always enough for the pinning to converge.
    pub max_passes: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            max_passes: None,
        }
    }
}
