//! Distribution of the free main axis space over the flexible items
//!
//! Every pass hands out the free space in proportion to the flex factors of the items that are
//! still flexible. When an item ends up outside its min/max constraints it is pinned to the
//! constrained size, its flex factor and the space it took or gave back are removed from the
//! pool, and the distribution starts over. Each restart pins one more item, so the loop ends
//! after at most one pass per item plus one.
use weft_shared::config::LayoutConfig;

/// Main axis sizing input of a single item. All sizes are border box sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexibleItem {
    pub preferred: f32,
    pub min: f32,
    pub max: Option<f32>,
    pub flex_positive: f32,
    pub flex_negative: f32,
}

impl FlexibleItem {
    /// Applies the max constraint first and then the min constraint, so min wins
    pub fn clamp(&self, size: f32) -> f32 {
        let size = match self.max {
            Some(max) => size.min(max),
            None => size,
        };
        size.max(self.min)
    }
}

#[derive(Debug, Clone, Copy)]
struct FlexPool {
    free_space: f32,
    total_positive: f32,
    total_negative: f32,
}

impl FlexPool {
    fn flexed_size(&self, item: &FlexibleItem) -> f32 {
        let mut size = item.preferred;

        if self.free_space > 0.0 && self.total_positive > 0.0 && self.total_positive.is_finite() {
            size += self.free_space * item.flex_positive / self.total_positive;
        } else if self.free_space < 0.0
            && self.total_negative > 0.0
            && self.total_negative.is_finite()
        {
            size += self.free_space * item.flex_negative / self.total_negative;
        }

        size
    }
}

/// Resolves the main size of every item. `free_space` is the main size of the container minus
/// the preferred sizes and margins of all items.
pub fn resolve_flexible_lengths(
    items: &[FlexibleItem],
    free_space: f32,
    config: &LayoutConfig,
) -> Vec<f32> {
    let mut pool = FlexPool {
        free_space,
        total_positive: items.iter().map(|i| i.flex_positive.max(0.0)).sum(),
        total_negative: items.iter().map(|i| i.flex_negative.max(0.0)).sum(),
    };
    let mut pinned: Vec<Option<f32>> = vec![None; items.len()];

    let max_passes = config.max_passes.unwrap_or(items.len() + 1).max(1);

    for pass in 0..max_passes {
        log::debug!(
            "flex pass {}: free space {:.3}, flex {:.3}/{:.3}",
            pass,
            pool.free_space,
            pool.total_positive,
            pool.total_negative
        );

        let violation = items.iter().enumerate().find_map(|(idx, item)| {
            if pinned[idx].is_some() {
                return None;
            }

            let size = pool.flexed_size(item);
            let clamped = item.clamp(size);
            ((clamped - size).abs() > config.epsilon).then_some((idx, clamped))
        });

        let Some((idx, clamped)) = violation else {
            return final_sizes(items, &pinned, &pool);
        };

        log::debug!("pinning item {} at {:.3}", idx, clamped);

        let item = &items[idx];
        pinned[idx] = Some(clamped);
        pool.free_space -= clamped - item.preferred;
        pool.total_positive = (pool.total_positive - item.flex_positive.max(0.0)).max(0.0);
        pool.total_negative = (pool.total_negative - item.flex_negative.max(0.0)).max(0.0);
    }

    log::debug!("flex distribution did not settle after {} passes", max_passes);

    final_sizes(items, &pinned, &pool)
}

fn final_sizes(items: &[FlexibleItem], pinned: &[Option<f32>], pool: &FlexPool) -> Vec<f32> {
    items
        .iter()
        .zip(pinned)
        .map(|(item, pinned)| pinned.unwrap_or_else(|| item.clamp(pool.flexed_size(item))))
        .collect()
}
