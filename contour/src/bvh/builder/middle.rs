use super::{partition_by, BuildItem};
use crate::{Axis, BoundingBox};

/// Splits `items` at the median center along the longest axis of `bounds`.
///
/// Never returns an empty side: when all centers land on one side of the
/// median, one item is moved over to the other one.
pub fn partition(items: &mut [BuildItem], bounds: BoundingBox) -> usize {
    let axis = Axis::longest(bounds.extent());
    let mid = items.len() / 2;

    let (_, median, _) = items.select_nth_unstable_by(mid, |a, b| {
        a.center[axis].total_cmp(&b.center[axis])
    });

    let median = median.center[axis];
    let pivot = partition_by(items, |item| item.center[axis] < median);

    if pivot == 0 {
        1
    } else if pivot == items.len() {
        items.len() - 1
    } else {
        pivot
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};

    use super::*;
    use crate::bvh::builder::tests::item;

    fn bounds(items: &[BuildItem]) -> BoundingBox {
        items.iter().map(|item| item.bounds).collect()
    }

    #[test]
    fn splits_along_longest_axis() {
        let mut items: Vec<_> = (0..6)
            .map(|idx| item(idx, vec3(0.0, idx as f32 * 10.0, idx as f32)))
            .collect();

        let bounds = bounds(&items);
        let pivot = partition(&mut items, bounds);

        assert_eq!(3, pivot);

        for item in &items[..pivot] {
            assert!(item.center.y < 30.0);
        }

        for item in &items[pivot..] {
            assert!(item.center.y >= 30.0);
        }
    }

    #[test]
    fn coincident_centers_still_get_separated() {
        let mut items: Vec<_> = (0..5).map(|idx| item(idx, Vec3::ONE)).collect();

        let bounds = bounds(&items);
        let pivot = partition(&mut items, bounds);

        assert!(pivot > 0 && pivot < items.len());
    }

    #[test]
    fn two_items() {
        let mut items = vec![
            item(0, vec3(5.0, 0.0, 0.0)),
            item(1, vec3(-5.0, 0.0, 0.0)),
        ];

        let bounds = bounds(&items);
        let pivot = partition(&mut items, bounds);

        assert_eq!(1, pivot);
        assert_eq!(1, items[0].id.get());
    }
}
