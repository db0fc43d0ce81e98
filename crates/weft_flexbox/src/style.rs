//! Computed styles of flex containers and flex items
//!
//! These are the resolved values the layouter works with. They can be built by hand or read from
//! a css declaration block with [`ContainerStyle::from_declarations`] and
//! [`FlexItemStyle::from_declarations`].
use weft_shared::types::Edges;

mod parse;

/// A length as specified in a style. Percentages are stored as fractions (50% is 0.5).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Length {
    #[default]
    Auto,
    Px(f32),
    Percent(f32),
    MinContent,
    MaxContent,
}

impl Length {
    /// Resolves the length against the given reference size. Returns `None` for lengths that
    /// can not be resolved without measuring content, or for percentages of an indefinite size.
    pub fn resolve(&self, reference: Option<f32>) -> Option<f32> {
        match *self {
            Length::Px(px) => Some(px),
            Length::Percent(fraction) => reference.map(|r| r * fraction),
            _ => None,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Length::Auto)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    pub fn is_column(&self) -> bool {
        matches!(self, FlexDirection::Column | FlexDirection::ColumnReverse)
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

/// Distribution of the free space on the main axis
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FlexPack {
    #[default]
    Start,
    End,
    Center,
    /// Free space goes between the items, none before the first or after the last
    Justify,
    /// Free space goes around every item, half a gap before the first and after the last
    Distribute,
}

/// Cross axis alignment of an item. `Auto` takes the alignment of the container.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FlexAlign {
    #[default]
    Auto,
    Start,
    End,
    Center,
    Baseline,
    Stretch,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WritingMode {
    #[default]
    HorizontalTb,
    VerticalLr,
    VerticalRl,
}

impl WritingMode {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, WritingMode::HorizontalTb)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
}

impl Position {
    /// Absolutely positioned boxes do not take part in flex layout
    pub fn is_out_of_flow(&self) -> bool {
        matches!(self, Position::Absolute | Position::Fixed)
    }
}

/// Sizing properties of a single box. All sizes are content box sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSizing {
    pub width: Length,
    pub height: Length,
    pub min_width: Length,
    pub min_height: Length,
    /// `Auto` means no maximum
    pub max_width: Length,
    pub max_height: Length,
    pub padding: Edges<f32>,
    pub border: Edges<f32>,
}

impl Default for BoxSizing {
    fn default() -> Self {
        Self {
            width: Length::Auto,
            height: Length::Auto,
            min_width: Length::Px(0.0),
            min_height: Length::Px(0.0),
            max_width: Length::Auto,
            max_height: Length::Auto,
            padding: Edges::default(),
            border: Edges::default(),
        }
    }
}

impl BoxSizing {
    /// Border and padding widths together
    pub fn frame(&self) -> Edges<f32> {
        Edges::new(
            self.border.top + self.padding.top,
            self.border.right + self.padding.right,
            self.border.bottom + self.padding.bottom,
            self.border.left + self.padding.left,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerStyle {
    pub writing_mode: WritingMode,
    pub direction: Direction,
    pub flex_direction: FlexDirection,
    pub flex_pack: FlexPack,
    /// Default alignment for items with `align-self: auto`. `Auto` behaves as `Stretch`.
    pub align_items: FlexAlign,
    pub sizing: BoxSizing,
    /// Space taken by scrollbars: `width` is the vertical scrollbar, `height` the horizontal one
    pub scrollbar: weft_shared::types::Size<f32>,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        Self {
            writing_mode: WritingMode::default(),
            direction: Direction::default(),
            flex_direction: FlexDirection::default(),
            flex_pack: FlexPack::default(),
            align_items: FlexAlign::Stretch,
            sizing: BoxSizing::default(),
            scrollbar: weft_shared::types::Size::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexItemStyle {
    pub order: i32,
    /// Flex factor used when there is positive free space
    pub flex_positive: f32,
    /// Flex factor used when there is negative free space
    pub flex_negative: f32,
    /// Preferred main size. `Auto` falls back to the main size property of the item.
    pub flex_basis: Length,
    pub align_self: FlexAlign,
    pub position: Position,
    pub sizing: BoxSizing,
    /// `Length::Auto` marks an auto margin
    pub margin: Edges<Length>,
}

impl Default for FlexItemStyle {
    fn default() -> Self {
        Self {
            order: 0,
            flex_positive: 0.0,
            flex_negative: 1.0,
            flex_basis: Length::Auto,
            align_self: FlexAlign::Auto,
            position: Position::Static,
            sizing: BoxSizing::default(),
            margin: Edges::uniform(Length::Px(0.0)),
        }
    }
}

impl FlexItemStyle {
    /// Flex factors are never negative
    pub fn flex_factors(&self) -> (f32, f32) {
        (self.flex_positive.max(0.0), self.flex_negative.max(0.0))
    }
}
