//! Single line flex layout
//!
//! The layout runs in a few passes over the items in `order` order:
//!
//! 1. measure the preferred main size, the margins and the constraints of every item
//! 2. distribute the free main space ([`crate::distribution`])
//! 3. lay out every item with its final main size and measure its cross size
//! 4. size the line on the cross axis and stretch items where needed
//! 5. place the items on the main axis (auto margins, packing) and the cross axis (alignment)
//!
//! Positions are computed in flow order and only mirrored into physical coordinates at the
//! very end, when the main extent of the container is known. This is what makes reversed flows
//! work, including `column-reverse` with an auto height.
use crate::axis::FlowAxes;
use crate::child::{FlexChild, IntrinsicSizes, LayoutRequest};
use crate::distribution::{resolve_flexible_lengths, FlexibleItem};
use crate::order::OrderIterator;
use crate::placement::{
    align_offset, auto_margin_share, cross_auto_margin_offset, pack_offsets, BaselineGroup,
};
use crate::style::{ContainerStyle, FlexAlign, FlexItemStyle, Length};
use serde::Serialize;
use weft_shared::config::LayoutConfig;
use weft_shared::types::{Edges, Point, Size};

/// Final position and size of a single child
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct ItemLayout {
    /// Border box position, relative to the border box of the container
    pub location: Point<f32>,
    /// Border box size
    pub size: Size<f32>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct FlexLayoutResult {
    /// Border box size of the container
    pub size: Size<f32>,
    /// One entry per child, in the order the children were given
    pub items: Vec<ItemLayout>,
}

/// Lays out the children of a flex container. `available` is the size of the containing block,
/// which percentages of the container resolve against.
pub fn layout_flex_container<C: FlexChild>(
    style: &ContainerStyle,
    available: Size<f32>,
    children: &mut [C],
    config: &LayoutConfig,
) -> FlexLayoutResult {
    FlexLayouter::new(style, config).layout(available, children)
}

/// Flow relative state of an in-flow item
#[derive(Debug, Clone)]
struct FlexItem {
    index: usize,
    flexible: FlexibleItem,
    /// Margins in flow order, `None` for auto margins
    margin_start: Option<f32>,
    margin_end: Option<f32>,
    margin_before: Option<f32>,
    margin_after: Option<f32>,
    align: FlexAlign,
    fixed_cross: Option<f32>,
    cross_min: f32,
    cross_max: Option<f32>,
    main_size: f32,
    cross_size: f32,
    /// Margin box distance from the cross start to the baseline
    ascent: f32,
}

impl FlexItem {
    fn main_margins(&self) -> f32 {
        self.margin_start.unwrap_or(0.0) + self.margin_end.unwrap_or(0.0)
    }

    fn cross_margins(&self) -> f32 {
        self.margin_before.unwrap_or(0.0) + self.margin_after.unwrap_or(0.0)
    }

    fn has_cross_auto_margin(&self) -> bool {
        self.margin_before.is_none() || self.margin_after.is_none()
    }

    fn clamp_cross(&self, size: f32) -> f32 {
        let size = match self.cross_max {
            Some(max) => size.min(max),
            None => size,
        };
        size.max(self.cross_min)
    }
}

pub struct FlexLayouter<'a> {
    style: &'a ContainerStyle,
    config: LayoutConfig,
    axes: FlowAxes,
}

impl<'a> FlexLayouter<'a> {
    pub fn new(style: &'a ContainerStyle, config: &LayoutConfig) -> Self {
        Self {
            style,
            config: *config,
            axes: FlowAxes::new(style),
        }
    }

    pub fn layout<C: FlexChild>(
        &self,
        available: Size<f32>,
        children: &mut [C],
    ) -> FlexLayoutResult {
        let frame = self.style.sizing.frame();
        let scrollbar = self.style.scrollbar;
        let content = self.content_size(available);
        let content_available = Size::new(
            content.width.unwrap_or(0.0),
            content.height.unwrap_or(0.0),
        );

        let order = OrderIterator::new(
            children
                .iter()
                .enumerate()
                .filter(|(_, c)| !c.style().position.is_out_of_flow())
                .map(|(idx, c)| (idx, c.style().order)),
        );

        let mut items: Vec<FlexItem> = order
            .iter()
            .filter_map(|idx| {
                let child = children.get_mut(idx)?;
                Some(self.measure_item(idx, child, content, content_available))
            })
            .collect();

        // main axis sizes
        let used_preferred: f32 = items
            .iter()
            .map(|i| i.flexible.preferred + i.main_margins())
            .sum();
        let container_main = match self.axes.main(content) {
            Some(main) => main,
            None => {
                let used: f32 = items
                    .iter()
                    .map(|i| i.flexible.clamp(i.flexible.preferred) + i.main_margins())
                    .sum();
                self.clamp_container(self.axes.main_horizontal, used, available)
            }
        };

        let flexibles: Vec<FlexibleItem> = items.iter().map(|i| i.flexible).collect();
        let sizes = resolve_flexible_lengths(
            &flexibles,
            container_main - used_preferred,
            &self.config,
        );

        // cross axis sizes
        let mut baseline = BaselineGroup::default();
        for (item, main_size) in items.iter_mut().zip(sizes) {
            item.main_size = main_size;
            let cross = item.fixed_cross;
            if let Some(child) = children.get_mut(item.index) {
                self.layout_item(item, child, cross, content_available);
                if item.align == FlexAlign::Baseline {
                    baseline.add(item.ascent, item.cross_size + item.cross_margins());
                }
            }
        }

        let line_cross = match self.axes.cross(content) {
            Some(cross) => cross,
            None => {
                let largest = items
                    .iter()
                    .map(|i| i.cross_size + i.cross_margins())
                    .fold(baseline.extent(), f32::max);
                self.clamp_container(!self.axes.main_horizontal, largest, available)
            }
        };

        for item in items.iter_mut() {
            if item.align != FlexAlign::Stretch
                || item.fixed_cross.is_some()
                || item.has_cross_auto_margin()
            {
                continue;
            }

            let stretched = item.clamp_cross(line_cross - item.cross_margins());
            if (stretched - item.cross_size).abs() > self.config.epsilon {
                if let Some(child) = children.get_mut(item.index) {
                    self.layout_item(item, child, Some(stretched), content_available);
                }
            }
        }

        // placement
        let area = self.axes.size(container_main, line_cross);
        let origin = Point::new(frame.left, frame.top);
        let mut result = vec![ItemLayout::default(); children.len()];

        let used: f32 = items.iter().map(|i| i.main_size + i.main_margins()).sum();
        let mut free_space = container_main - used;

        let auto_margins = items
            .iter()
            .map(|i| usize::from(i.margin_start.is_none()) + usize::from(i.margin_end.is_none()))
            .sum();
        let auto_margin = auto_margin_share(free_space, auto_margins).unwrap_or(0.0);
        if auto_margins > 0 && free_space > 0.0 {
            free_space = 0.0;
        }

        let (initial, gap) = pack_offsets(self.style.flex_pack, free_space, items.len());
        log::debug!(
            "placing {} items: main {:.3}, cross {:.3}, free {:.3}",
            items.len(),
            container_main,
            line_cross,
            free_space
        );

        let mut offset = initial;
        for item in &items {
            offset += item.margin_start.unwrap_or(auto_margin);
            let main_position = offset;
            offset += item.main_size + item.margin_end.unwrap_or(auto_margin) + gap;

            let before = item.margin_before.unwrap_or(0.0);
            let leftover = line_cross - item.cross_size - item.cross_margins();
            let cross_position = match cross_auto_margin_offset(
                item.margin_before.is_none(),
                item.margin_after.is_none(),
                leftover,
            ) {
                Some(auto) => before + auto,
                None if item.align == FlexAlign::Baseline => {
                    baseline.offset(item.ascent) + before
                }
                None => before + align_offset(item.align, leftover),
            };

            let size = self.axes.size(item.main_size, item.cross_size);
            let location = self.axes.point(main_position, cross_position, size, area);
            if let Some(slot) = result.get_mut(item.index) {
                *slot = ItemLayout {
                    location: origin + location,
                    size,
                };
            }
        }

        // out of flow children sit at the start of the content box
        for (idx, child) in children.iter_mut().enumerate() {
            if !child.style().position.is_out_of_flow() {
                continue;
            }

            let layout = self.layout_out_of_flow(child, content, content_available);
            if let Some(slot) = result.get_mut(idx) {
                *slot = ItemLayout {
                    location: origin + layout.location,
                    size: layout.size,
                };
            }
        }

        FlexLayoutResult {
            size: Size::new(
                area.width + frame.horizontal() + scrollbar.width,
                area.height + frame.vertical() + scrollbar.height,
            ),
            items: result,
        }
    }

    /// Content box size of the container, `None` where it depends on the items
    fn content_size(&self, available: Size<f32>) -> Size<Option<f32>> {
        let sizing = &self.style.sizing;
        let frame = sizing.frame();
        let horizontal = self.style.writing_mode.is_horizontal();

        // an auto inline size fills the containing block
        let width = match sizing.width.resolve(Some(available.width)) {
            Some(width) => Some(width),
            None if sizing.width.is_auto() && horizontal => {
                Some(available.width - frame.horizontal())
            }
            None => None,
        };
        let height = match sizing.height.resolve(Some(available.height)) {
            Some(height) => Some(height),
            None if sizing.height.is_auto() && !horizontal => {
                Some(available.height - frame.vertical())
            }
            None => None,
        };

        Size::new(
            width.map(|w| {
                (self.clamp_container(true, w, available) - self.style.scrollbar.width).max(0.0)
            }),
            height.map(|h| {
                (self.clamp_container(false, h, available) - self.style.scrollbar.height).max(0.0)
            }),
        )
    }

    /// Applies the min/max constraints of the container along one physical axis
    fn clamp_container(&self, horizontal: bool, size: f32, available: Size<f32>) -> f32 {
        let sizing = &self.style.sizing;
        let (min, max, reference) = if horizontal {
            (sizing.min_width, sizing.max_width, available.width)
        } else {
            (sizing.min_height, sizing.max_height, available.height)
        };

        let size = match max.resolve(Some(reference)) {
            Some(max) => size.min(max),
            None => size,
        };
        size.max(min.resolve(Some(reference)).unwrap_or(0.0)).max(0.0)
    }

    fn request(&self, main: Option<f32>, cross: Option<f32>, available: Size<f32>) -> LayoutRequest {
        let size = self.axes.size(main, cross);
        LayoutRequest {
            width: size.width,
            height: size.height,
            available,
        }
    }

    /// Border box size for a size property of a child. `None` when the size depends on layout.
    /// Content based sizes are only known up front for widths.
    fn resolve_child_length(
        length: Length,
        reference: Option<f32>,
        frame: f32,
        horizontal: bool,
        intrinsic: &IntrinsicSizes,
    ) -> Option<f32> {
        match length {
            Length::MinContent if horizontal => Some(intrinsic.min_content),
            Length::MaxContent if horizontal => Some(intrinsic.max_content),
            _ => length.resolve(reference).map(|v| v + frame),
        }
    }

    fn measure_item<C: FlexChild>(
        &self,
        index: usize,
        child: &mut C,
        content: Size<Option<f32>>,
        content_available: Size<f32>,
    ) -> FlexItem {
        let style: FlexItemStyle = *child.style();
        let sizing = &style.sizing;
        let intrinsic = child.intrinsic_widths();
        let main_horizontal = self.axes.main_horizontal;

        let frame = sizing.frame();
        let frame_size = Size::new(frame.horizontal(), frame.vertical());
        let frame_main = self.axes.main(frame_size);
        let frame_cross = self.axes.cross(frame_size);

        // percentage margins resolve against the inline size of the container
        let margin_reference = if self.style.writing_mode.is_horizontal() {
            content.width
        } else {
            content.height
        };
        let margin = Edges::new(
            resolve_margin(style.margin.top, margin_reference),
            resolve_margin(style.margin.right, margin_reference),
            resolve_margin(style.margin.bottom, margin_reference),
            resolve_margin(style.margin.left, margin_reference),
        );
        let (margin_start, margin_end) = self.axes.main_edges(&margin);
        let (margin_before, margin_after) = self.axes.cross_edges(&margin);

        let main_reference = self.axes.main(content);
        let cross_reference = self.axes.cross(content);
        let lengths = |width: Length, height: Length| Size::new(width, height);

        // cross axis constraints
        let cross_min = Self::resolve_child_length(
            self.axes.cross(lengths(sizing.min_width, sizing.min_height)),
            cross_reference,
            frame_cross,
            !main_horizontal,
            &intrinsic,
        )
        .unwrap_or(frame_cross)
        .max(frame_cross);
        let cross_max = Self::resolve_child_length(
            self.axes.cross(lengths(sizing.max_width, sizing.max_height)),
            cross_reference,
            frame_cross,
            !main_horizontal,
            &intrinsic,
        );
        let clamp_cross = |size: f32| {
            let size = cross_max.map_or(size, |max| size.min(max));
            size.max(cross_min)
        };
        let fixed_cross = Self::resolve_child_length(
            self.axes.cross(lengths(sizing.width, sizing.height)),
            cross_reference,
            frame_cross,
            !main_horizontal,
            &intrinsic,
        )
        .map(clamp_cross);

        let mut align = match style.align_self {
            FlexAlign::Auto => self.style.align_items,
            align => align,
        };
        if align == FlexAlign::Auto {
            align = FlexAlign::Stretch;
        }
        // first line baselines are measured from the top edge
        if align == FlexAlign::Baseline && !main_horizontal {
            align = FlexAlign::Start;
        }

        // main axis
        let main_size_property = self.axes.main(lengths(sizing.width, sizing.height));
        let basis = if style.flex_basis.is_auto() {
            main_size_property
        } else {
            style.flex_basis
        };

        let mut measured: Option<f32> = None;
        let mut measure = |child: &mut C| -> f32 {
            if let Some(size) = measured {
                return size;
            }

            let size = if main_horizontal {
                intrinsic.max_content
            } else {
                let stretched = match (align, cross_reference) {
                    (FlexAlign::Stretch, Some(cross))
                        if margin_before.is_some() && margin_after.is_some() =>
                    {
                        let margins = margin_before.unwrap_or(0.0) + margin_after.unwrap_or(0.0);
                        Some(clamp_cross(cross - margins))
                    }
                    _ => None,
                };
                let request = self.request(None, fixed_cross.or(stretched), content_available);
                self.axes.main(child.layout(&request))
            };

            measured = Some(size);
            size
        };

        let preferred = match Self::resolve_child_length(
            basis,
            main_reference,
            frame_main,
            main_horizontal,
            &intrinsic,
        ) {
            Some(size) => size,
            None => measure(child),
        };

        let min_length = self.axes.main(lengths(sizing.min_width, sizing.min_height));
        let min = match Self::resolve_child_length(
            min_length,
            main_reference,
            frame_main,
            main_horizontal,
            &intrinsic,
        ) {
            Some(size) => size,
            None if matches!(min_length, Length::MinContent | Length::MaxContent) => measure(child),
            None => frame_main,
        }
        .max(frame_main);

        let max = Self::resolve_child_length(
            self.axes.main(lengths(sizing.max_width, sizing.max_height)),
            main_reference,
            frame_main,
            main_horizontal,
            &intrinsic,
        );

        let (flex_positive, flex_negative) = style.flex_factors();

        FlexItem {
            index,
            flexible: FlexibleItem {
                preferred,
                min,
                max,
                flex_positive,
                flex_negative,
            },
            margin_start,
            margin_end,
            margin_before,
            margin_after,
            align,
            fixed_cross,
            cross_min,
            cross_max,
            main_size: preferred,
            cross_size: 0.0,
            ascent: 0.0,
        }
    }

    /// Lays out the item with its final main size and records its cross size and ascent
    fn layout_item<C: FlexChild>(
        &self,
        item: &mut FlexItem,
        child: &mut C,
        cross: Option<f32>,
        content_available: Size<f32>,
    ) {
        let request = self.request(Some(item.main_size), cross, content_available);
        let size = child.layout(&request);
        let mut cross_size = self.axes.cross(size);

        let clamped = item.clamp_cross(cross_size);
        if cross.is_none() && (clamped - cross_size).abs() > self.config.epsilon {
            let request = self.request(Some(item.main_size), Some(clamped), content_available);
            cross_size = self.axes.cross(child.layout(&request));
        }

        item.cross_size = cross_size;

        let before = item.margin_before.unwrap_or(0.0);
        item.ascent = match child.first_line_baseline() {
            Some(baseline) => before + baseline,
            None => before + cross_size + item.margin_after.unwrap_or(0.0),
        };
    }

    fn layout_out_of_flow<C: FlexChild>(
        &self,
        child: &mut C,
        content: Size<Option<f32>>,
        content_available: Size<f32>,
    ) -> ItemLayout {
        let style: FlexItemStyle = *child.style();
        let frame = style.sizing.frame();
        let intrinsic = child.intrinsic_widths();
        let horizontal = self.style.writing_mode.is_horizontal();

        let request = LayoutRequest {
            width: Self::resolve_child_length(
                style.sizing.width,
                content.width,
                frame.horizontal(),
                true,
                &intrinsic,
            ),
            height: Self::resolve_child_length(
                style.sizing.height,
                content.height,
                frame.vertical(),
                false,
                &intrinsic,
            ),
            available: content_available,
        };
        let size = child.layout(&request);

        let margin_reference = if horizontal {
            content.width
        } else {
            content.height
        };
        ItemLayout {
            location: Point::new(
                resolve_margin(style.margin.left, margin_reference).unwrap_or(0.0),
                resolve_margin(style.margin.top, margin_reference).unwrap_or(0.0),
            ),
            size,
        }
    }
}

/// Resolves a margin. Auto margins are `None`, content based lengths count as zero.
fn resolve_margin(margin: Length, reference: Option<f32>) -> Option<f32> {
    match margin {
        Length::Auto => None,
        margin => Some(margin.resolve(reference).unwrap_or(0.0)),
    }
}
