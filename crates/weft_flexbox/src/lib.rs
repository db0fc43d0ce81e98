//! Single line flexbox layout
//!
//! The layouter takes the computed style of a flex container, the available size and a set of
//! children implementing [`child::FlexChild`], and returns the border box size of the container
//! together with the position and size of every child.
//!
//! Styles can be built by hand or read from css declaration blocks produced by `weft_css3`, see
//! [`style::ContainerStyle::from_declarations`] and [`style::FlexItemStyle::from_declarations`].

pub mod axis;
pub mod child;
pub mod distribution;
pub mod layout;
pub mod order;
pub mod placement;
pub mod style;

pub use child::{FixedSizeBox, FlexChild, IntrinsicSizes, LayoutRequest};
pub use layout::{layout_flex_container, FlexLayoutResult, ItemLayout};
pub use style::{ContainerStyle, FlexItemStyle};
