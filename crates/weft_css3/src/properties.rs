//! Static tables of the names the parser knows about
use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref CSS_PROPERTIES: HashSet<&'static str> = [
        "align-content", "align-items", "align-self", "animation", "animation-delay",
        "animation-direction", "animation-duration", "animation-fill-mode",
        "animation-iteration-count", "animation-name", "animation-play-state",
        "animation-timing-function", "appearance", "backface-visibility", "background",
        "background-attachment", "background-clip", "background-color", "background-image",
        "background-origin", "background-position", "background-position-x",
        "background-position-y", "background-repeat", "background-size", "border",
        "border-bottom", "border-bottom-color", "border-bottom-left-radius",
        "border-bottom-right-radius", "border-bottom-style", "border-bottom-width",
        "border-collapse", "border-color", "border-image", "border-image-outset",
        "border-image-repeat", "border-image-slice", "border-image-source", "border-image-width",
        "border-left", "border-left-color", "border-left-style", "border-left-width",
        "border-radius", "border-right", "border-right-color", "border-right-style",
        "border-right-width", "border-spacing", "border-style", "border-top", "border-top-color",
        "border-top-left-radius", "border-top-right-radius", "border-top-style",
        "border-top-width", "border-width", "bottom", "box-shadow", "box-sizing", "caption-side",
        "clear", "clip", "color", "column-count", "column-gap", "column-rule", "column-width",
        "columns", "content", "counter-increment", "counter-reset", "cursor", "direction",
        "display", "empty-cells", "filter", "flex", "flex-align", "flex-basis", "flex-direction",
        "flex-flow", "flex-grow", "flex-item-align", "flex-line-pack", "flex-order", "flex-pack",
        "flex-shrink", "flex-wrap", "float", "font", "font-family", "font-feature-settings",
        "font-size", "font-stretch", "font-style", "font-variant", "font-weight", "gap",
        "height", "justify-content", "left", "letter-spacing", "line-height", "list-style",
        "list-style-image", "list-style-position", "list-style-type", "margin", "margin-bottom",
        "margin-left", "margin-right", "margin-top", "marks", "max-height", "max-width",
        "min-height", "min-width", "opacity", "order", "orphans", "outline", "outline-color",
        "outline-offset", "outline-style", "outline-width", "overflow", "overflow-wrap",
        "overflow-x", "overflow-y", "padding", "padding-bottom", "padding-left",
        "padding-right", "padding-top", "page", "page-break-after", "page-break-before",
        "page-break-inside", "perspective", "perspective-origin", "pointer-events", "position",
        "quotes", "resize", "right", "size", "src", "tab-size", "table-layout", "text-align",
        "text-decoration", "text-indent", "text-overflow", "text-shadow", "text-transform",
        "top", "transform", "transform-origin", "transform-style", "transition",
        "transition-delay", "transition-duration", "transition-property",
        "transition-timing-function", "unicode-bidi", "unicode-range", "user-select",
        "vertical-align", "visibility", "white-space", "widows", "width", "will-change",
        "word-break", "word-spacing", "word-wrap", "writing-mode", "z-index", "zoom",
        // later additions, grouped by module
        "aspect-ratio", "background-blend-mode", "clip-path", "column-rule-color",
        "column-rule-style", "column-rule-width", "column-span", "contain", "font-kerning",
        "font-variant-caps", "font-variant-ligatures", "font-variant-numeric", "hyphens",
        "inset", "isolation", "justify-items", "justify-self", "mask", "mask-image",
        "mix-blend-mode", "object-fit", "object-position", "place-content",
        "place-items", "place-self", "row-gap", "scroll-behavior", "text-align-last",
        "text-decoration-color", "text-decoration-line", "text-decoration-style",
        "text-rendering", "touch-action",
        // grid layout
        "grid", "grid-area", "grid-auto-columns", "grid-auto-flow", "grid-auto-rows",
        "grid-column", "grid-column-end", "grid-column-gap", "grid-column-start", "grid-gap",
        "grid-row", "grid-row-end", "grid-row-gap", "grid-row-start", "grid-template",
        "grid-template-areas", "grid-template-columns", "grid-template-rows",
        // font-face descriptors
        "font-display",
        // region properties
        "flow-into", "flow-from", "region-overflow",
    ]
    .into_iter()
    .collect();

    static ref PSEUDO_CLASSES: HashSet<&'static str> = [
        "active", "checked", "default", "disabled", "empty", "enabled", "first-child",
        "first-of-type", "focus", "focus-visible", "focus-within", "fullscreen", "hover",
        "in-range", "indeterminate", "invalid", "last-child", "last-of-type", "link",
        "only-child", "only-of-type", "optional", "out-of-range", "read-only", "read-write",
        "required", "root", "scope", "target", "valid", "visited", "window-inactive",
        "-webkit-any-link", "-webkit-autofill", "-webkit-drag", "-webkit-full-screen",
        "horizontal", "vertical", "decrement", "increment", "start", "end", "double-button",
        "single-button", "no-button", "corner-present",
    ]
    .into_iter()
    .collect();

    static ref PSEUDO_ELEMENTS: HashSet<&'static str> = [
        "after", "before", "first-letter", "first-line", "selection", "placeholder", "marker",
        "backdrop", "-webkit-scrollbar", "-webkit-scrollbar-button", "-webkit-scrollbar-corner",
        "-webkit-scrollbar-thumb", "-webkit-scrollbar-track", "-webkit-scrollbar-track-piece",
        "-webkit-resizer", "-webkit-input-placeholder", "-webkit-file-upload-button",
        "-webkit-slider-thumb", "-webkit-slider-runnable-track", "-webkit-search-cancel-button",
        "-webkit-inner-spin-button", "-webkit-outer-spin-button", "-webkit-media-controls",
    ]
    .into_iter()
    .collect();

    /// Attributes whose values compare case-insensitively in HTML documents
    static ref HTML_CASE_INSENSITIVE_ATTRIBUTES: HashSet<&'static str> = [
        "accept", "accept-charset", "align", "alink", "axis", "bgcolor", "charset", "checked",
        "clear", "codetype", "color", "compact", "declare", "defer", "dir", "direction",
        "disabled", "enctype", "face", "frame", "hreflang", "http-equiv", "lang", "language",
        "link", "media", "method", "multiple", "nohref", "noresize", "noshade", "nowrap",
        "readonly", "rel", "rev", "rules", "scope", "scrolling", "selected", "shape", "target",
        "text", "type", "valign", "valuetype", "vlink",
    ]
    .into_iter()
    .collect();
}

/// Vendor prefixes that may precede a known property name
const VENDOR_PREFIXES: [&str; 4] = ["-webkit-", "-moz-", "-ms-", "-o-"];

/// Page pseudo classes allowed in `@page` selectors
pub const PAGE_PSEUDO_CLASSES: [&str; 4] = ["first", "left", "right", "blank"];

/// Pseudo elements that may be written with a single colon
pub const LEGACY_PSEUDO_ELEMENTS: [&str; 4] = ["before", "after", "first-line", "first-letter"];

/// Returns true when the property is a known property, a custom property or a vendor prefixed
/// known property
pub fn is_valid_property(name: &str) -> bool {
    if name.starts_with("--") && name.len() > 2 {
        return true;
    }

    let name = name.to_ascii_lowercase();
    if CSS_PROPERTIES.contains(name.as_str()) {
        return true;
    }

    VENDOR_PREFIXES
        .iter()
        .filter_map(|prefix| name.strip_prefix(prefix))
        .any(|unprefixed| CSS_PROPERTIES.contains(unprefixed))
}

pub fn is_known_property(name: &str) -> bool {
    CSS_PROPERTIES.contains(name.to_ascii_lowercase().as_str())
}

pub fn is_pseudo_class(name: &str) -> bool {
    PSEUDO_CLASSES.contains(name.to_ascii_lowercase().as_str())
}

pub fn is_pseudo_element(name: &str) -> bool {
    PSEUDO_ELEMENTS.contains(name.to_ascii_lowercase().as_str())
}

pub fn is_legacy_pseudo_element(name: &str) -> bool {
    LEGACY_PSEUDO_ELEMENTS.contains(&name.to_ascii_lowercase().as_str())
}

pub fn is_html_case_insensitive_attribute(name: &str) -> bool {
    HTML_CASE_INSENSITIVE_ATTRIBUTES.contains(name.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("color", true)]
    #[test_case("COLOR", true)]
    #[test_case("--main-color", true)]
    #[test_case("--", false)]
    #[test_case("-webkit-flex-pack", true)]
    #[test_case("-moz-transform", true)]
    #[test_case("grid-area", true)]
    #[test_case("-ms-grid-row", true)]
    #[test_case("place-items", true)]
    #[test_case("-webkit-bogus", false)]
    #[test_case("bogus-prop", false)]
    fn property_names(name: &str, valid: bool) {
        assert_eq!(is_valid_property(name), valid);
    }

    #[test]
    fn pseudo_tables() {
        assert!(is_pseudo_class("hover"));
        assert!(!is_pseudo_class("invalid-pseudo"));
        assert!(is_pseudo_element("selection"));
        assert!(is_legacy_pseudo_element("Before"));
        assert!(!is_legacy_pseudo_element("selection"));
        assert!(is_html_case_insensitive_attribute("type"));
    }
}
