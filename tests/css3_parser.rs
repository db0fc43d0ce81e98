use std::fs;
use std::fs::File;
use test_case::test_case;
use weft_bin::css3::builder::StylesheetBuilder;
use weft_bin::css3::cssom::rule::CssRule;
use weft_bin::css3::cssom::stylesheet::CssStylesheet;
use weft_bin::css3::Css3;
use weft_bin::shared::byte_stream::{ByteStream, Encoding};
use weft_bin::shared::config::ParserConfig;

fn parse(css: &str) -> CssStylesheet {
    Css3::parse_str(css, ParserConfig::default()).unwrap()
}

fn style_rules(sheet: &CssStylesheet) -> Vec<&CssRule> {
    sheet
        .rules()
        .filter(|r| matches!(r, CssRule::Style(_)))
        .collect()
}

#[test_case("a { color: red }"; "simple rule")]
#[test_case("ul > li + li ~ p, #main .item[title] { margin: 0 auto }"; "combinators")]
#[test_case("li:nth-child( 2n + 1 ):not(.hidden)::before { content: \"x\" }"; "pseudos")]
#[test_case("a[href^='http' i], b[lang|=en], *|* { font: 12px / 1.5 Arial, sans-serif }"; "attributes")]
#[test_case("div { width: calc(100% - 2 * 10px); color: var(--main, #fff) !important }"; "functions")]
#[test_case("@media screen and (min-width: 100px), print { a { color: red } }"; "media")]
#[test_case("@keyframes fade { from { opacity: 0 } 50% { opacity: .5 } to { opacity: 1 } }"; "keyframes")]
#[test_case("@page :first { margin: 1in; @top-left { content: \"t\" } }"; "page")]
#[test_case("@supports (display: flex) or (display: box) { a { display: flex } }"; "supports")]
fn reserialize_is_stable(css: &str) {
    let first = parse(css);
    let text = first.css_text();
    assert!(!text.is_empty());

    let second = parse(&text);
    assert_eq!(second.css_text(), text);
    assert_eq!(
        first.rules().collect::<Vec<_>>(),
        second.rules().collect::<Vec<_>>()
    );
}

#[test]
fn invalid_selector_drops_the_whole_rule() {
    let sheet = parse("a, :invalid-pseudo { color: red }\nb { color: blue }");

    let rules = style_rules(&sheet);
    assert_eq!(rules.len(), 1);
    let CssRule::Style(rule) = rules[0] else {
        unreachable!()
    };
    assert_eq!(rule.selectors.selector_text(), "b");
}

#[test]
fn invalid_declaration_only_drops_itself() {
    let sheet = parse("a { color: red; bogus-prop: 1 2 3; font-size: 12px }");

    let rules = style_rules(&sheet);
    assert_eq!(rules.len(), 1);
    let CssRule::Style(rule) = rules[0] else {
        unreachable!()
    };

    let properties: Vec<&str> = rule
        .declarations
        .declarations
        .iter()
        .map(|d| d.property.as_str())
        .collect();
    assert_eq!(properties, vec!["color", "font-size"]);
    assert_eq!(rule.declarations.css_text(), "color: red; font-size: 12px;");
}

#[test_case(":nth-child(odd)")]
#[test_case(":nth-child(2n+1)")]
#[test_case(":nth-child( 2n + 1 )")]
#[test_case(":nth-child(2n + 1)")]
fn nth_child_is_normalized(selector: &str) {
    let list = Css3::parse_selector_str(selector).unwrap();
    let nth: Vec<(i32, i32)> = list.components().iter().filter_map(|c| c.nth()).collect();
    assert_eq!(nth, vec![(2, 1)]);
}

#[test_case("from { opacity: 0 }", 0.0)]
#[test_case("0% { opacity: 0 }", 0.0)]
#[test_case("to { opacity: 1 }", 1.0)]
#[test_case("100% { opacity: 1 }", 1.0)]
#[test_case("25% { opacity: 1 }", 0.25)]
fn keyframe_keys(css: &str, key: f32) {
    let keyframe = Css3::parse_keyframe_rule_str(css).unwrap();
    assert_eq!(keyframe.keys, vec![key]);
}

#[test]
fn recovery_keeps_surrounding_rules() {
    let css = fs::read_to_string("tests/data/css/recovery.css").unwrap();
    let sheet = parse(&css);

    let selectors: Vec<String> = sheet
        .all_rule_ids()
        .into_iter()
        .filter_map(|id| match sheet.rule(id) {
            Some(CssRule::Style(rule)) => Some(rule.selectors.selector_text()),
            _ => None,
        })
        .collect();
    assert_eq!(selectors, vec!["html", "body", "p.note", "footer"]);

    // the charset after the first rule and the unknown at-rule are dropped, the invalid media
    // query does not drop its rule
    assert!(sheet.rules().all(|r| !matches!(r, CssRule::Charset(_))));
    assert_eq!(sheet.rules().count(), 4);
    let Some(CssRule::Media(media)) = sheet.rules().last() else {
        unreachable!()
    };
    assert_eq!(media.media.css_text(), "screen, not all");
}

#[test]
fn strict_mode_stops_at_first_error() {
    let config = ParserConfig {
        ignore_errors: false,
        ..Default::default()
    };

    let err = Css3::parse_str("a { color: red }\nb, :bogus { color: red }", config).unwrap_err();
    let location = err.location.unwrap();
    assert_eq!(location.line(), 2);
}

#[test_case("@media print"; "media")]
#[test_case("@supports (display: flex)"; "supports")]
fn unknown_at_rules_inside_groups_are_skipped(group: &str) {
    let css = format!("{group} {{ @foo bar; a{{color:red}} @baz {{ x {{ }} }} b{{color:blue}} }}");
    let sheet = parse(&css);

    assert_eq!(
        sheet.css_text(),
        format!("{group} {{ a {{ color: red; }} b {{ color: blue; }} }}")
    );
}

fn style_selectors(sheet: &CssStylesheet) -> Vec<String> {
    sheet
        .all_rule_ids()
        .into_iter()
        .filter_map(|id| match sheet.rule(id) {
            Some(CssRule::Style(rule)) => Some(rule.selectors.selector_text()),
            _ => None,
        })
        .collect()
}

#[test]
fn moderate_nesting_is_kept() {
    let css = format!(
        "{}a {{ color: red }}{}",
        "@media print { ".repeat(10),
        "}".repeat(10)
    );
    let sheet = parse(&css);
    assert_eq!(style_selectors(&sheet), vec!["a"]);
}

#[test]
fn deeply_nested_blocks_are_dropped() {
    let css = format!(
        "{}a {{ color: red }}{}\nb {{ color: blue }}",
        "@media print { ".repeat(200),
        "}".repeat(200)
    );
    let sheet = parse(&css);

    assert_eq!(sheet.rules().count(), 2);
    assert!(matches!(sheet.rules().next(), Some(CssRule::Media(_))));
    assert_eq!(style_selectors(&sheet), vec!["b"]);
}

#[test]
fn deeply_nested_calc_drops_the_declaration() {
    let css = format!(
        "a {{ width: {}1px{}; color: red }}\nb {{ color: blue }}",
        "calc(".repeat(20000),
        ")".repeat(20000)
    );
    let sheet = parse(&css);

    let rules = style_rules(&sheet);
    assert_eq!(rules.len(), 2);
    let CssRule::Style(rule) = rules[0] else {
        unreachable!()
    };
    assert_eq!(rule.declarations.css_text(), "color: red;");
}

#[test]
fn deeply_nested_not_drops_the_rule() {
    let css = format!(
        "a{}.x{} {{ color: red }}\nb {{ color: blue }}",
        ":not(".repeat(20000),
        ")".repeat(20000)
    );
    let sheet = parse(&css);
    assert_eq!(style_selectors(&sheet), vec!["b"]);
}

#[test]
fn nesting_limit_is_configurable() {
    let config = ParserConfig {
        max_depth: 2,
        ..Default::default()
    };
    let sheet = Css3::parse_str("@media print { a { color: red } }\nb { color: blue }", config)
        .unwrap();
    assert_eq!(style_selectors(&sheet), vec!["a", "b"]);

    let config = ParserConfig {
        max_depth: 1,
        ..Default::default()
    };
    let sheet = Css3::parse_str("@media print { a { color: red } }\nb { color: blue }", config)
        .unwrap();
    assert_eq!(style_selectors(&sheet), vec!["b"]);
}

#[test]
fn latin1_stylesheet_is_decoded() {
    let mut stream = ByteStream::new(Encoding::UNKNOWN, None);
    stream
        .read_from_file(File::open("tests/data/css/latin1.css").unwrap())
        .unwrap();
    assert_eq!(stream.encoding(), Encoding::ASCII);

    let mut builder = StylesheetBuilder::new(None);
    Css3::parse_stream(&mut stream, ParserConfig::default(), &mut builder).unwrap();
    let sheet = builder.finish();

    let rules = style_rules(&sheet);
    assert_eq!(rules.len(), 2);
    let CssRule::Style(rule) = rules[0] else {
        unreachable!()
    };
    assert_eq!(rule.declarations.css_text(), "content: \"café crème\";");
    let CssRule::Style(rule) = rules[1] else {
        unreachable!()
    };
    assert_eq!(
        rule.declarations.css_text(),
        "font-family: \"Bibliothèque\", serif;"
    );
}

#[test]
fn grid_shorthands_are_known() {
    let sheet = parse("a { grid-area: 1 / 2 / 3; grid-template-columns: 1fr 2fr; place-items: center }");

    let rules = style_rules(&sheet);
    let CssRule::Style(rule) = rules[0] else {
        unreachable!()
    };
    assert_eq!(
        rule.declarations.css_text(),
        "grid-area: 1 / 2 / 3; grid-template-columns: 1fr 2fr; place-items: center;"
    );
}
