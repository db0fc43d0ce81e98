use std::fs;
use weft_bin::css3::Css3;
use weft_bin::flexbox::{
    layout_flex_container, ContainerStyle, FixedSizeBox, FlexItemStyle, FlexLayoutResult,
};
use weft_bin::input::FlexInput;
use weft_bin::shared::config::LayoutConfig;
use weft_bin::shared::types::Size;

fn container(css: &str) -> ContainerStyle {
    ContainerStyle::from_declarations(&Css3::parse_declaration_list_str(css).unwrap())
}

fn item(css: &str, width: f32, height: f32) -> FixedSizeBox {
    let style = FlexItemStyle::from_declarations(&Css3::parse_declaration_list_str(css).unwrap());
    FixedSizeBox::new(style, Size::new(width, height))
}

fn layout(style: &ContainerStyle, children: &mut [FixedSizeBox]) -> FlexLayoutResult {
    layout_flex_container(
        style,
        Size::new(1000.0, 1000.0),
        children,
        &LayoutConfig::default(),
    )
}

fn widths(result: &FlexLayoutResult) -> Vec<f32> {
    result.items.iter().map(|i| i.size.width).collect()
}

#[test]
fn free_space_is_shared_by_flex_factor() {
    let mut children = vec![
        item("flex: 1 0 auto", 100.0, 10.0),
        item("flex: 0 0 auto", 100.0, 10.0),
        item("flex: 2 0 auto", 100.0, 10.0),
    ];

    let result = layout(&container("width: 300px"), &mut children);
    assert_eq!(widths(&result), vec![100.0, 100.0, 100.0]);

    let result = layout(&container("width: 330px"), &mut children);
    assert_eq!(widths(&result), vec![110.0, 100.0, 120.0]);
}

#[test]
fn pinned_items_give_space_to_the_others() {
    let mut children = vec![
        item("flex: 1 0 auto; max-width: 120px", 100.0, 10.0),
        item("flex: 1 0 auto", 100.0, 10.0),
        item("flex: 1 0 auto", 100.0, 10.0),
    ];

    let result = layout(&container("width: 400px"), &mut children);
    assert_eq!(widths(&result), vec![120.0, 140.0, 140.0]);
    assert_eq!(widths(&result).iter().sum::<f32>(), 400.0);
}

#[test]
fn shrinking_respects_min_width() {
    let mut children = vec![
        item("min-width: 90px", 100.0, 10.0),
        item("", 100.0, 10.0),
        item("", 100.0, 10.0),
    ];

    let result = layout(&container("width: 240px"), &mut children);
    assert_eq!(widths(&result), vec![90.0, 75.0, 75.0]);
    assert_eq!(widths(&result).iter().sum::<f32>(), 240.0);
}

#[test]
fn adversarial_constraints_still_fit() {
    let mut children: Vec<FixedSizeBox> = (0..40)
        .map(|idx| {
            let css = format!("flex: 1 1 auto; max-width: {}px", 10.0 + idx as f32 * 0.001);
            item(&css, 9.999, 10.0)
        })
        .collect();
    children.push(item("flex: 1 1 auto", 10.0, 10.0));

    let result = layout(&container("width: 1000px"), &mut children);
    let total: f32 = widths(&result).iter().sum();
    assert!((total - 1000.0).abs() < 0.1, "total {total}");
}

#[test]
fn justify_spreads_the_items() {
    let mut children = vec![
        item("", 50.0, 10.0),
        item("", 50.0, 10.0),
        item("", 50.0, 10.0),
    ];

    let result = layout(&container("width: 300px; flex-pack: justify"), &mut children);
    let starts: Vec<f32> = result.items.iter().map(|i| i.location.x).collect();
    assert_eq!(starts, vec![0.0, 125.0, 250.0]);

    let last = result.items[2];
    assert_eq!(last.location.x + last.size.width, 300.0);
}

#[test]
fn layout_from_description() {
    let data = fs::read_to_string("tests/data/flex/column_reverse.json").unwrap();
    let input = FlexInput::from_json(&data).unwrap();

    let style = input.container_style().unwrap();
    let mut children = input.children().unwrap();
    let result = layout_flex_container(
        &style,
        input.available,
        &mut children,
        &LayoutConfig::default(),
    );

    // 10px padding around a column of 30 + 20 + 50
    assert_eq!(result.size, Size::new(220.0, 120.0));

    let locations: Vec<(f32, f32)> = result
        .items
        .iter()
        .map(|i| (i.location.x, i.location.y))
        .collect();
    assert_eq!(locations, vec![(10.0, 80.0), (10.0, 60.0), (120.0, 10.0)]);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["items"][2]["size"]["height"], 50.0);
}
