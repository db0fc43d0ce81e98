//! The contract between the flex layouter and the boxes it lays out
use crate::style::FlexItemStyle;
use weft_shared::types::Size;

/// Intrinsic widths of a box, border box included
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct IntrinsicSizes {
    pub min_content: f32,
    pub max_content: f32,
}

/// Request to lay out a child. Fixed sizes are border box sizes; `None` lets the child size
/// itself along that dimension.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LayoutRequest {
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Content box of the flex container, for anything the child resolves against it
    pub available: Size<f32>,
}

/// A box that can be laid out by the flex layouter
pub trait FlexChild {
    fn style(&self) -> &FlexItemStyle;

    /// Narrowest and widest border box width the content fits in
    fn intrinsic_widths(&self) -> IntrinsicSizes;

    /// Lays out the child with the given fixed sizes and returns its border box size
    fn layout(&mut self, request: &LayoutRequest) -> Size<f32>;

    /// Distance from the top of the border box to the baseline of the first line, if the child
    /// has any line boxes
    fn first_line_baseline(&self) -> Option<f32>;
}

/// A box with a fixed content size. Any fixed size in a request overrides the content size.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSizeBox {
    pub style: FlexItemStyle,
    /// Content box size when not overridden
    pub content: Size<f32>,
    /// Smallest content width the box can be squeezed to
    pub min_content_width: f32,
    pub baseline: Option<f32>,
    /// Size of the last layout
    pub laid_out: Option<Size<f32>>,
}

impl FixedSizeBox {
    pub fn new(style: FlexItemStyle, content: Size<f32>) -> Self {
        Self {
            style,
            content,
            min_content_width: content.width,
            baseline: None,
            laid_out: None,
        }
    }

    pub fn with_baseline(mut self, baseline: f32) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn with_min_content_width(mut self, width: f32) -> Self {
        self.min_content_width = width.min(self.content.width);
        self
    }

    fn frame(&self) -> Size<f32> {
        let frame = self.style.sizing.frame();
        Size::new(frame.horizontal(), frame.vertical())
    }
}

impl FlexChild for FixedSizeBox {
    fn style(&self) -> &FlexItemStyle {
        &self.style
    }

    fn intrinsic_widths(&self) -> IntrinsicSizes {
        let frame = self.frame().width;
        IntrinsicSizes {
            min_content: self.min_content_width + frame,
            max_content: self.content.width + frame,
        }
    }

    fn layout(&mut self, request: &LayoutRequest) -> Size<f32> {
        let frame = self.frame();
        let size = Size::new(
            request.width.unwrap_or(self.content.width + frame.width),
            request.height.unwrap_or(self.content.height + frame.height),
        );

        self.laid_out = Some(size);
        size
    }

    fn first_line_baseline(&self) -> Option<f32> {
        self.baseline
            .map(|b| b + self.style.sizing.border.top + self.style.sizing.padding.top)
    }
}
