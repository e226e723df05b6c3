use super::{partition_by, BuildItem};
use crate::{Axis, BoundingBox};

/// Number of bins each axis is divided into when looking for a split.
pub const SAH_BINS: usize = 32;

/// Cost of visiting an internal node, relative to the area-weighted cost of
/// its children.
pub const SAH_TRAVERSAL_COST: f32 = 0.3;

/// Axes whose extent falls below this are not considered for splitting.
const MIN_AXIS_EXTENT: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SahSplit {
    pub axis: Axis,
    pub position: f32,
    pub cost: f32,
}

/// Splits `items` along the cheapest plane found by [`find_split()`].
///
/// Returns `None` when there's no plane that leaves both sides non-empty.
pub fn partition(items: &mut [BuildItem], bounds: BoundingBox) -> Option<usize> {
    let split = find_split(items, bounds)?;

    log::trace!(
        "SAH split; axis = {:?}, position = {}, cost = {}",
        split.axis,
        split.position,
        split.cost
    );

    let pivot = partition_by(items, |item| {
        item.center[split.axis] < split.position
    });

    if pivot == 0 || pivot == items.len() {
        None
    } else {
        Some(pivot)
    }
}

/// Evaluates every bin boundary along every axis and returns the cheapest
/// one.
///
/// Special thanks to:
/// - https://jacco.ompf2.com/2022/04/18/how-to-build-a-bvh-part-2-faster-rays/
pub fn find_split(items: &[BuildItem], bounds: BoundingBox) -> Option<SahSplit> {
    let extent = bounds.extent();
    let total_area = bounds.area().max(f32::EPSILON);
    let mut best: Option<SahSplit> = None;

    for axis in Axis::all() {
        if extent[axis] < MIN_AXIS_EXTENT {
            continue;
        }

        let min = bounds.min()[axis];
        let scale = (SAH_BINS as f32) / extent[axis];
        let mut bins = [Bin::default(); SAH_BINS];

        for item in items {
            let bin_idx = ((item.center[axis] - min) * scale) as usize;
            let bin = &mut bins[bin_idx.min(SAH_BINS - 1)];

            bin.count += 1;
            bin.bounds += item.bounds;
        }

        // ---

        let mut left_counts = [0; SAH_BINS - 1];
        let mut left_areas = [0.0; SAH_BINS - 1];
        let mut right_counts = [0; SAH_BINS - 1];
        let mut right_areas = [0.0; SAH_BINS - 1];

        let mut left = Bin::default();
        let mut right = Bin::default();

        for i in 0..(SAH_BINS - 1) {
            left.count += bins[i].count;
            left.bounds += bins[i].bounds;
            left_counts[i] = left.count;
            left_areas[i] = left.bounds.area();

            let j = SAH_BINS - 1 - i;

            right.count += bins[j].count;
            right.bounds += bins[j].bounds;
            right_counts[j - 1] = right.count;
            right_areas[j - 1] = right.bounds.area();
        }

        // ---

        for i in 0..(SAH_BINS - 1) {
            if left_counts[i] == 0 || right_counts[i] == 0 {
                continue;
            }

            let cost = SAH_TRAVERSAL_COST
                + ((left_counts[i] as f32) * left_areas[i]
                    + (right_counts[i] as f32) * right_areas[i])
                    / total_area;

            if best.map_or(true, |best| cost < best.cost) {
                best = Some(SahSplit {
                    axis,
                    position: min + ((i + 1) as f32) / scale,
                    cost,
                });
            }
        }
    }

    best
}

#[derive(Clone, Copy, Debug, Default)]
struct Bin {
    bounds: BoundingBox,
    count: u32,
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};

    use super::*;
    use crate::bvh::builder::middle;
    use crate::bvh::builder::tests::item;

    /// Cost of splitting `items` at `position` along `axis`, using the same
    /// formula as [`find_split()`] but without binning.
    fn split_cost(
        items: &[BuildItem],
        bounds: BoundingBox,
        axis: Axis,
        position: f32,
    ) -> f32 {
        let mut left = Bin::default();
        let mut right = Bin::default();

        for item in items {
            let side = if item.center[axis] < position {
                &mut left
            } else {
                &mut right
            };

            side.count += 1;
            side.bounds += item.bounds;
        }

        SAH_TRAVERSAL_COST
            + ((left.count as f32) * left.bounds.area()
                + (right.count as f32) * right.bounds.area())
                / bounds.area()
    }

    fn bounds(items: &[BuildItem]) -> BoundingBox {
        items.iter().map(|item| item.bounds).collect()
    }

    /// Ten primitives around the origin and two far away.
    fn two_clumps() -> Vec<BuildItem> {
        let near = (0..10).map(|idx| vec3(idx as f32 * 0.3, 0.0, 0.0));
        let far = (0..2).map(|idx| vec3(100.0 + idx as f32 * 0.3, 0.0, 0.0));

        near.chain(far)
            .enumerate()
            .map(|(id, center)| item(id as u32, center))
            .collect()
    }

    #[test]
    fn separates_clumps() {
        let mut items = two_clumps();
        let bounds = bounds(&items);
        let split = find_split(&items, bounds).unwrap();

        assert_eq!(Axis::X, split.axis);
        assert!(split.position > 3.0 && split.position < 100.0);

        let pivot = partition(&mut items, bounds).unwrap();

        assert_eq!(10, pivot);
    }

    #[test]
    fn beats_median_split() {
        let mut items = two_clumps();
        let bounds = bounds(&items);
        let split = find_split(&items, bounds).unwrap();

        let sah_cost = split_cost(&items, bounds, split.axis, split.position);

        let pivot = middle::partition(&mut items, bounds);
        let median = items[pivot..]
            .iter()
            .map(|item| item.center[split.axis])
            .fold(f32::INFINITY, f32::min);

        let median_cost = split_cost(&items, bounds, split.axis, median);

        assert!(sah_cost <= median_cost);
        assert!(split.cost <= median_cost);
    }

    #[test]
    fn binned_cost_matches_exact_cost() {
        let items = two_clumps();
        let bounds = bounds(&items);
        let split = find_split(&items, bounds).unwrap();

        approx::assert_relative_eq!(
            split.cost,
            split_cost(&items, bounds, split.axis, split.position),
            epsilon = 1e-4
        );
    }

    #[test]
    fn coincident_centers_have_no_split() {
        let mut items: Vec<_> = (0..8).map(|idx| item(idx, Vec3::ONE)).collect();
        let bounds = bounds(&items);

        assert_eq!(None, find_split(&items, bounds));
        assert_eq!(None, partition(&mut items, bounds));
    }

    #[test]
    fn flat_input_is_split_along_remaining_axes() {
        // Points on the XZ plane; Y is degenerate and must be skipped
        let mut items: Vec<_> = (0..16)
            .map(|idx| {
                let center = vec3((idx % 4) as f32, 0.0, (idx / 4) as f32);

                BuildItem {
                    bounds: BoundingBox::new(center, center),
                    ..item(idx, center)
                }
            })
            .collect();

        let bounds = bounds(&items);
        let split = find_split(&items, bounds).unwrap();

        assert_ne!(Axis::Y, split.axis);
        assert!(partition(&mut items, bounds).is_some());
    }
}
