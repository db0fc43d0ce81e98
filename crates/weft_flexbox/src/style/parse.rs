use crate::style::{
    BoxSizing, ContainerStyle, Direction, FlexAlign, FlexDirection, FlexItemStyle, FlexPack,
    Length, Position, WritingMode,
};
use weft_css3::cssom::value::{CssDeclaration, CssDeclarationBlock, CssValue, Unit};
use weft_shared::types::{Edges, Size};

/// Width reserved for a scrollbar when overflow is set to scroll
const SCROLLBAR_WIDTH: f32 = 16.0;
/// Font size used for font relative units
const FONT_SIZE: f32 = 16.0;

impl ContainerStyle {
    /// Reads the container properties from a declaration block. Unknown properties and values
    /// that can not be used are ignored, later declarations win.
    pub fn from_declarations(block: &CssDeclarationBlock) -> Self {
        let mut style = ContainerStyle::default();

        for declaration in &block.declarations {
            let values = declaration.value.0.as_slice();
            let applied = match unprefixed(&declaration.property) {
                "writing-mode" => keyword(values)
                    .and_then(writing_mode)
                    .map(|v| style.writing_mode = v),
                "direction" => keyword(values).and_then(direction).map(|v| style.direction = v),
                "flex-direction" => keyword(values)
                    .as_deref()
                    .and_then(flex_direction)
                    .map(|v| style.flex_direction = v),
                "flex-flow" => values
                    .iter()
                    .filter_map(ident)
                    .find_map(|k| flex_direction(&k))
                    .map(|v| style.flex_direction = v),
                "flex-pack" | "justify-content" => {
                    keyword(values).and_then(flex_pack).map(|v| style.flex_pack = v)
                }
                "flex-align" | "align-items" => keyword(values)
                    .and_then(flex_align)
                    .filter(|a| *a != FlexAlign::Auto)
                    .map(|v| style.align_items = v),
                "overflow" => keyword(values).filter(|k| k == "scroll").map(|_| {
                    style.scrollbar = Size::uniform(SCROLLBAR_WIDTH);
                }),
                "overflow-x" => keyword(values)
                    .filter(|k| k == "scroll")
                    .map(|_| style.scrollbar.height = SCROLLBAR_WIDTH),
                "overflow-y" => keyword(values)
                    .filter(|k| k == "scroll")
                    .map(|_| style.scrollbar.width = SCROLLBAR_WIDTH),
                _ => apply_sizing(&mut style.sizing, declaration),
            };

            if applied.is_none() {
                log::debug!("ignoring container declaration {}", declaration.css_text());
            }
        }

        style
    }
}

impl FlexItemStyle {
    /// Reads the flex item properties from a declaration block. Unknown properties and values
    /// that can not be used are ignored, later declarations win.
    pub fn from_declarations(block: &CssDeclarationBlock) -> Self {
        let mut style = FlexItemStyle::default();

        for declaration in &block.declarations {
            let values = declaration.value.0.as_slice();
            let applied = match unprefixed(&declaration.property) {
                "order" | "flex-order" => integer(values).map(|v| style.order = v),
                "flex" => flex_shorthand(values).map(|(positive, negative, basis)| {
                    style.flex_positive = positive;
                    style.flex_negative = negative;
                    style.flex_basis = basis;
                }),
                "flex-grow" => factor(values).map(|v| style.flex_positive = v),
                "flex-shrink" => factor(values).map(|v| style.flex_negative = v),
                "flex-basis" => single_length(values).map(|v| style.flex_basis = v),
                "flex-item-align" | "align-self" => {
                    keyword(values).and_then(flex_align).map(|v| style.align_self = v)
                }
                "position" => keyword(values).and_then(position).map(|v| style.position = v),
                "margin" => edges(values).map(|v| style.margin = v),
                "margin-top" => single_length(values).map(|v| style.margin.top = v),
                "margin-right" => single_length(values).map(|v| style.margin.right = v),
                "margin-bottom" => single_length(values).map(|v| style.margin.bottom = v),
                "margin-left" => single_length(values).map(|v| style.margin.left = v),
                _ => apply_sizing(&mut style.sizing, declaration),
            };

            if applied.is_none() {
                log::debug!("ignoring flex item declaration {}", declaration.css_text());
            }
        }

        style
    }
}

fn apply_sizing(sizing: &mut BoxSizing, declaration: &CssDeclaration) -> Option<()> {
    let values = declaration.value.0.as_slice();

    match unprefixed(&declaration.property) {
        "width" => single_length(values).map(|v| sizing.width = v),
        "height" => single_length(values).map(|v| sizing.height = v),
        "min-width" => single_length(values).map(|v| sizing.min_width = v),
        "min-height" => single_length(values).map(|v| sizing.min_height = v),
        "max-width" => max_length(values).map(|v| sizing.max_width = v),
        "max-height" => max_length(values).map(|v| sizing.max_height = v),
        "padding" => edges(values).and_then(px_edges).map(|v| sizing.padding = v),
        "padding-top" => px(values).map(|v| sizing.padding.top = v),
        "padding-right" => px(values).map(|v| sizing.padding.right = v),
        "padding-bottom" => px(values).map(|v| sizing.padding.bottom = v),
        "padding-left" => px(values).map(|v| sizing.padding.left = v),
        "border-width" => edges(values).and_then(px_edges).map(|v| sizing.border = v),
        "border" => values
            .iter()
            .find_map(|v| length(v).and_then(|l| l.resolve(None)))
            .map(|v| sizing.border = Edges::uniform(v)),
        "border-top-width" => px(values).map(|v| sizing.border.top = v),
        "border-right-width" => px(values).map(|v| sizing.border.right = v),
        "border-bottom-width" => px(values).map(|v| sizing.border.bottom = v),
        "border-left-width" => px(values).map(|v| sizing.border.left = v),
        _ => None,
    }
}

/// Flex properties are matched without their vendor prefix
fn unprefixed(property: &str) -> &str {
    property.strip_prefix("-webkit-").unwrap_or(property)
}

fn ident(value: &CssValue) -> Option<String> {
    match value {
        CssValue::Ident(name) => Some(name.to_ascii_lowercase()),
        _ => None,
    }
}

fn keyword(values: &[CssValue]) -> Option<String> {
    match values {
        [value] => ident(value),
        _ => None,
    }
}

fn number(value: &CssValue) -> Option<f32> {
    match value {
        CssValue::Numeric {
            value,
            unit: Unit::Number,
        } => Some(*value),
        _ => None,
    }
}

fn integer(values: &[CssValue]) -> Option<i32> {
    match values {
        [value] => number(value).filter(|v| v.fract() == 0.0).map(|v| v as i32),
        _ => None,
    }
}

fn factor(values: &[CssValue]) -> Option<f32> {
    match values {
        [value] => number(value).filter(|v| *v >= 0.0),
        _ => None,
    }
}

/// Converts a single component value into a length. Font relative units are resolved against a
/// fixed font size, as there is no cascade to take it from.
fn length(value: &CssValue) -> Option<Length> {
    match value {
        CssValue::Ident(name) => match name.to_ascii_lowercase().as_str() {
            "auto" => Some(Length::Auto),
            "min-content" => Some(Length::MinContent),
            "max-content" => Some(Length::MaxContent),
            _ => None,
        },
        CssValue::Numeric { value, unit } => {
            let px = match unit {
                Unit::Percentage => return Some(Length::Percent(value / 100.0)),
                Unit::Number if *value == 0.0 => 0.0,
                Unit::Px => *value,
                Unit::Cm => value * 96.0 / 2.54,
                Unit::Mm => value * 96.0 / 25.4,
                Unit::Q => value * 96.0 / 101.6,
                Unit::In => value * 96.0,
                Unit::Pt => value * 96.0 / 72.0,
                Unit::Pc => value * 16.0,
                Unit::Em | Unit::Rem => value * FONT_SIZE,
                Unit::Ex | Unit::Ch => value * FONT_SIZE / 2.0,
                _ => return None,
            };
            Some(Length::Px(px))
        }
        _ => None,
    }
}

fn single_length(values: &[CssValue]) -> Option<Length> {
    match values {
        [value] => length(value),
        _ => None,
    }
}

/// `none` is the initial value of the max sizes
fn max_length(values: &[CssValue]) -> Option<Length> {
    match values {
        [CssValue::Ident(name)] if name.eq_ignore_ascii_case("none") => Some(Length::Auto),
        [value] => length(value).filter(|l| !l.is_auto()),
        _ => None,
    }
}

fn px(values: &[CssValue]) -> Option<f32> {
    single_length(values)?.resolve(None)
}

/// One to four values in top, right, bottom, left order
fn edges(values: &[CssValue]) -> Option<Edges<Length>> {
    let lengths = values.iter().map(length).collect::<Option<Vec<_>>>()?;

    match lengths.as_slice() {
        [all] => Some(Edges::uniform(*all)),
        [vertical, horizontal] => Some(Edges::new(*vertical, *horizontal, *vertical, *horizontal)),
        [top, horizontal, bottom] => Some(Edges::new(*top, *horizontal, *bottom, *horizontal)),
        [top, right, bottom, left] => Some(Edges::new(*top, *right, *bottom, *left)),
        _ => None,
    }
}

fn px_edges(edges: Edges<Length>) -> Option<Edges<f32>> {
    Some(Edges::new(
        edges.top.resolve(None)?,
        edges.right.resolve(None)?,
        edges.bottom.resolve(None)?,
        edges.left.resolve(None)?,
    ))
}

/// `flex: none | auto | <positive> <negative>? <basis>?`. A single number sets the basis to 0.
fn flex_shorthand(values: &[CssValue]) -> Option<(f32, f32, Length)> {
    if let Some(keyword) = keyword(values) {
        return match keyword.as_str() {
            "none" => Some((0.0, 0.0, Length::Auto)),
            "auto" => Some((1.0, 1.0, Length::Auto)),
            "initial" => Some((0.0, 1.0, Length::Auto)),
            _ => None,
        };
    }

    let mut factors = Vec::new();
    let mut basis = None;
    for value in values {
        match number(value) {
            Some(n) if basis.is_none() && factors.len() < 2 && n >= 0.0 => factors.push(n),
            _ if basis.is_none() => basis = Some(length(value)?),
            _ => return None,
        }
    }

    match factors.as_slice() {
        [] => Some((1.0, 1.0, basis?)),
        [positive] => Some((*positive, 1.0, basis.unwrap_or(Length::Px(0.0)))),
        [positive, negative] => Some((*positive, *negative, basis.unwrap_or(Length::Px(0.0)))),
        _ => None,
    }
}

fn writing_mode(keyword: String) -> Option<WritingMode> {
    match keyword.as_str() {
        "horizontal-tb" | "lr" | "lr-tb" | "rl" | "rl-tb" => Some(WritingMode::HorizontalTb),
        "vertical-lr" | "tb-lr" => Some(WritingMode::VerticalLr),
        "vertical-rl" | "tb" | "tb-rl" => Some(WritingMode::VerticalRl),
        _ => None,
    }
}

fn direction(keyword: String) -> Option<Direction> {
    match keyword.as_str() {
        "ltr" => Some(Direction::Ltr),
        "rtl" => Some(Direction::Rtl),
        _ => None,
    }
}

fn flex_direction(keyword: &str) -> Option<FlexDirection> {
    match keyword {
        "row" => Some(FlexDirection::Row),
        "row-reverse" => Some(FlexDirection::RowReverse),
        "column" => Some(FlexDirection::Column),
        "column-reverse" => Some(FlexDirection::ColumnReverse),
        _ => None,
    }
}

fn flex_pack(keyword: String) -> Option<FlexPack> {
    match keyword.as_str() {
        "start" | "flex-start" => Some(FlexPack::Start),
        "end" | "flex-end" => Some(FlexPack::End),
        "center" => Some(FlexPack::Center),
        "justify" | "space-between" => Some(FlexPack::Justify),
        "distribute" | "space-around" => Some(FlexPack::Distribute),
        _ => None,
    }
}

fn flex_align(keyword: String) -> Option<FlexAlign> {
    match keyword.as_str() {
        "auto" => Some(FlexAlign::Auto),
        "start" | "flex-start" => Some(FlexAlign::Start),
        "end" | "flex-end" => Some(FlexAlign::End),
        "center" => Some(FlexAlign::Center),
        "baseline" => Some(FlexAlign::Baseline),
        "stretch" => Some(FlexAlign::Stretch),
        _ => None,
    }
}

fn position(keyword: String) -> Option<Position> {
    match keyword.as_str() {
        "static" => Some(Position::Static),
        "relative" => Some(Position::Relative),
        "absolute" => Some(Position::Absolute),
        "fixed" => Some(Position::Fixed),
        _ => None,
    }
}
