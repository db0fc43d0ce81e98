//! Main axis packing and cross axis alignment of placed items
use crate::style::{FlexAlign, FlexPack};

/// Returns the offset before the first item and the extra space between two items
pub fn pack_offsets(pack: FlexPack, free_space: f32, count: usize) -> (f32, f32) {
    if count == 0 {
        return (0.0, 0.0);
    }

    let n = count as f32;
    match pack {
        FlexPack::Start => (0.0, 0.0),
        FlexPack::End => (free_space, 0.0),
        FlexPack::Center => (free_space / 2.0, 0.0),
        FlexPack::Justify if free_space > 0.0 && count > 1 => (0.0, free_space / (n - 1.0)),
        FlexPack::Justify => (0.0, 0.0),
        FlexPack::Distribute if free_space > 0.0 => (free_space / (2.0 * n), free_space / n),
        // overflowing items are centered
        FlexPack::Distribute => (free_space / 2.0, 0.0),
    }
}

/// Size of each main axis auto margin. Auto margins only take positive free space.
pub fn auto_margin_share(free_space: f32, auto_margins: usize) -> Option<f32> {
    (auto_margins > 0 && free_space > 0.0).then(|| free_space / auto_margins as f32)
}

/// Offset of an item inside the leftover cross space of the line. Baseline alignment is handled
/// separately and starts at the cross start, as does stretch.
pub fn align_offset(align: FlexAlign, available: f32) -> f32 {
    match align {
        FlexAlign::End => available,
        FlexAlign::Center => available / 2.0,
        FlexAlign::Auto | FlexAlign::Start | FlexAlign::Baseline | FlexAlign::Stretch => 0.0,
    }
}

/// Offset from auto margins on the cross axis, or `None` when neither cross margin is auto
pub fn cross_auto_margin_offset(before_auto: bool, after_auto: bool, available: f32) -> Option<f32> {
    let available = available.max(0.0);

    match (before_auto, after_auto) {
        (true, true) => Some(available / 2.0),
        (true, false) => Some(available),
        (false, true) => Some(0.0),
        (false, false) => None,
    }
}

/// Tracks the largest ascent and descent of the baseline aligned items of a line
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BaselineGroup {
    pub ascent: f32,
    pub descent: f32,
}

impl BaselineGroup {
    /// Adds an item with the given margin box ascent and margin box cross extent
    pub fn add(&mut self, ascent: f32, extent: f32) {
        self.ascent = self.ascent.max(ascent);
        self.descent = self.descent.max(extent - ascent);
    }

    /// Cross extent needed to fit all baseline aligned items
    pub fn extent(&self) -> f32 {
        self.ascent + self.descent
    }

    /// Offset of an item with the given ascent so its baseline lines up with the group
    pub fn offset(&self, ascent: f32) -> f32 {
        self.ascent - ascent
    }
}
