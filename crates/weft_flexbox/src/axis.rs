//! Mapping between the flow relative main/cross axes and physical coordinates
use crate::style::{ContainerStyle, Direction, WritingMode};
use weft_shared::types::{Edges, Point, Size};

/// Physical orientation of the main and cross axis of a flex container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowAxes {
    /// The main axis runs horizontally
    pub main_horizontal: bool,
    /// Items flow from the right (or bottom) edge towards the left (or top)
    pub main_reverse: bool,
    /// Cross start is the right (or bottom) edge
    pub cross_reverse: bool,
}

impl FlowAxes {
    pub fn new(style: &ContainerStyle) -> Self {
        let horizontal = style.writing_mode.is_horizontal();
        let rtl = style.direction == Direction::Rtl;
        let block_reverse = style.writing_mode == WritingMode::VerticalRl;

        // rows follow the inline axis, columns the block axis
        if style.flex_direction.is_column() {
            Self {
                main_horizontal: !horizontal,
                main_reverse: block_reverse ^ style.flex_direction.is_reverse(),
                cross_reverse: rtl,
            }
        } else {
            Self {
                main_horizontal: horizontal,
                main_reverse: rtl ^ style.flex_direction.is_reverse(),
                cross_reverse: block_reverse,
            }
        }
    }

    pub fn main<T: Copy>(&self, size: Size<T>) -> T {
        if self.main_horizontal {
            size.width
        } else {
            size.height
        }
    }

    pub fn cross<T: Copy>(&self, size: Size<T>) -> T {
        if self.main_horizontal {
            size.height
        } else {
            size.width
        }
    }

    /// Builds a physical size from main and cross extents
    pub fn size<T: Copy>(&self, main: T, cross: T) -> Size<T> {
        if self.main_horizontal {
            Size::new(main, cross)
        } else {
            Size::new(cross, main)
        }
    }

    /// Start and end edge on the main axis, in flow order
    pub fn main_edges<T: Copy + Default>(&self, edges: &Edges<T>) -> (T, T) {
        flow_edges(edges, self.main_horizontal, self.main_reverse)
    }

    /// Before and after edge on the cross axis, in flow order
    pub fn cross_edges<T: Copy + Default>(&self, edges: &Edges<T>) -> (T, T) {
        flow_edges(edges, !self.main_horizontal, self.cross_reverse)
    }

    /// Converts flow relative offsets of a box inside an area of the given extents into a
    /// physical point relative to the start of that area
    pub fn point(&self, main: f32, cross: f32, size: Size<f32>, area: Size<f32>) -> Point<f32> {
        let main = if self.main_reverse {
            self.main(area) - main - self.main(size)
        } else {
            main
        };
        let cross = if self.cross_reverse {
            self.cross(area) - cross - self.cross(size)
        } else {
            cross
        };

        if self.main_horizontal {
            Point::new(main, cross)
        } else {
            Point::new(cross, main)
        }
    }
}

fn flow_edges<T: Copy + Default>(edges: &Edges<T>, horizontal: bool, reverse: bool) -> (T, T) {
    let (start, end) = if horizontal {
        (edges.left, edges.right)
    } else {
        (edges.top, edges.bottom)
    };

    if reverse {
        (end, start)
    } else {
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FlexDirection;
    use test_case::test_case;

    fn axes(writing_mode: WritingMode, direction: Direction, flex: FlexDirection) -> FlowAxes {
        FlowAxes::new(&ContainerStyle {
            writing_mode,
            direction,
            flex_direction: flex,
            ..Default::default()
        })
    }

    #[test_case(WritingMode::HorizontalTb, Direction::Ltr, FlexDirection::Row, true, false, false)]
    #[test_case(WritingMode::HorizontalTb, Direction::Rtl, FlexDirection::Row, true, true, false)]
    #[test_case(WritingMode::HorizontalTb, Direction::Rtl, FlexDirection::RowReverse, true, false, false)]
    #[test_case(WritingMode::HorizontalTb, Direction::Rtl, FlexDirection::Column, false, false, true)]
    #[test_case(WritingMode::HorizontalTb, Direction::Ltr, FlexDirection::ColumnReverse, false, true, false)]
    #[test_case(WritingMode::VerticalLr, Direction::Ltr, FlexDirection::Row, false, false, false)]
    #[test_case(WritingMode::VerticalRl, Direction::Ltr, FlexDirection::Row, false, false, true)]
    #[test_case(WritingMode::VerticalRl, Direction::Ltr, FlexDirection::Column, true, true, false)]
    #[test_case(WritingMode::VerticalLr, Direction::Rtl, FlexDirection::ColumnReverse, true, true, true)]
    fn resolve_axes(
        writing_mode: WritingMode,
        direction: Direction,
        flex: FlexDirection,
        horizontal: bool,
        main_reverse: bool,
        cross_reverse: bool,
    ) {
        let axes = axes(writing_mode, direction, flex);
        assert_eq!(axes.main_horizontal, horizontal);
        assert_eq!(axes.main_reverse, main_reverse);
        assert_eq!(axes.cross_reverse, cross_reverse);
    }

    #[test]
    fn physical_mapping() {
        let edges = Edges::new(1.0, 2.0, 3.0, 4.0);

        let row = axes(WritingMode::HorizontalTb, Direction::Rtl, FlexDirection::Row);
        assert_eq!(row.main_edges(&edges), (2.0, 4.0));
        assert_eq!(row.cross_edges(&edges), (1.0, 3.0));
        assert_eq!(row.main(Size::new(10.0, 20.0)), 10.0);
        assert_eq!(
            row.point(10.0, 5.0, Size::new(30.0, 10.0), Size::new(100.0, 50.0)),
            Point::new(60.0, 5.0)
        );

        let column = axes(WritingMode::HorizontalTb, Direction::Ltr, FlexDirection::Column);
        assert_eq!(column.size(10.0, 20.0), Size::new(20.0, 10.0));
        assert_eq!(
            column.point(10.0, 5.0, Size::new(30.0, 10.0), Size::new(100.0, 50.0)),
            Point::new(5.0, 10.0)
        );
    }
}
