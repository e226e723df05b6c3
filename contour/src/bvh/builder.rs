mod middle;
mod sah;

use glam::Vec3;

pub use self::sah::{SAH_BINS, SAH_TRAVERSAL_COST};
use super::{BvhNode, BvhNodeId, BvhNodes, BvhObject, BvhObjectId};
use crate::{gpu, BoundingBox, BvhBuildConfig, BvhBuildStrategy};

/// Object as seen by the builder - the object itself stays put, the builder
/// only shuffles these around.
#[derive(Clone, Copy, Debug)]
pub struct BuildItem {
    pub id: BvhObjectId,
    pub bounds: BoundingBox,
    pub center: Vec3,
}

impl BuildItem {
    pub fn new(id: BvhObjectId, object: &impl BvhObject) -> Self {
        Self {
            id,
            bounds: object.bounding_box(),
            center: object.center(),
        }
    }
}

pub fn run<T>(objects: &[T], config: &BvhBuildConfig) -> BvhNodes
where
    T: BvhObject,
{
    let mut items: Vec<_> = objects
        .iter()
        .enumerate()
        .map(|(id, object)| BuildItem::new(BvhObjectId::new(id as u32), object))
        .collect();

    if items.is_empty() {
        return Default::default();
    }

    let mut builder = Builder {
        nodes: BvhNodes::with_capacity(2 * items.len() - 1),
        depth_ceiling: depth_ceiling(config.max_depth, items.len()),
        strategy: config.strategy,
        depth_ceiling_hit: false,
    };

    builder.build(&mut items, 0);
    builder.nodes
}

/// Returns the depth at which spatial splits give way to positional ones.
///
/// Positional splits add at most `ceil(log2(len))` more levels, so the
/// ceiling is lowered (if needed) to keep the deepest leaf within reach of
/// the GPU traversal stack.
fn depth_ceiling(max_depth: u32, len: usize) -> u32 {
    let positional_levels = usize::BITS - (len.max(1) - 1).leading_zeros();
    let stack_limit = (gpu::BVH_STACK_SIZE as u32 - 1).saturating_sub(positional_levels);

    max_depth.min(stack_limit)
}

struct Builder {
    nodes: BvhNodes,
    depth_ceiling: u32,
    strategy: BvhBuildStrategy,
    depth_ceiling_hit: bool,
}

impl Builder {
    fn build(&mut self, items: &mut [BuildItem], depth: u32) -> BvhNodeId {
        let bounds: BoundingBox = items.iter().map(|item| item.bounds).collect();

        if let [item] = items {
            return self.nodes.add(BvhNode::Leaf {
                bounds,
                object_id: item.id,
            });
        }

        // Parent goes first, so that the arena ends up in pre-order
        let id = self.nodes.add(BvhNode::default());
        let pivot = self.partition(items, bounds, depth);

        debug_assert!(pivot > 0 && pivot < items.len());

        let (left, right) = items.split_at_mut(pivot);
        let left_id = self.build(left, depth + 1);
        let right_id = self.build(right, depth + 1);

        self.nodes[id] = BvhNode::Internal {
            bounds,
            left_id,
            right_id,
        };

        id
    }

    /// Reorders `items` so that the left child's items come first; returns
    /// how many of them there are.
    fn partition(
        &mut self,
        items: &mut [BuildItem],
        bounds: BoundingBox,
        depth: u32,
    ) -> usize {
        if depth >= self.depth_ceiling {
            if !self.depth_ceiling_hit {
                log::warn!(
                    "BVH reached its depth ceiling ({}); splitting remaining \
                     primitives by position",
                    self.depth_ceiling
                );

                self.depth_ceiling_hit = true;
            }

            return items.len() / 2;
        }

        match self.strategy {
            BvhBuildStrategy::Sah => {
                sah::partition(items, bounds).unwrap_or_else(|| {
                    log::debug!(
                        "SAH found no separating plane for {} primitives; \
                         falling back to median split",
                        items.len()
                    );

                    middle::partition(items, bounds)
                })
            }

            BvhBuildStrategy::Middle => middle::partition(items, bounds),
        }
    }
}

/// Moves items matching `is_left` to the front; returns how many there are.
fn partition_by(
    items: &mut [BuildItem],
    is_left: impl Fn(&BuildItem) -> bool,
) -> usize {
    let mut pivot = 0;

    for idx in 0..items.len() {
        if is_left(&items[idx]) {
            items.swap(pivot, idx);
            pivot += 1;
        }
    }

    pivot
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;
    use crate::Axis;

    pub(super) fn item(id: u32, center: Vec3) -> BuildItem {
        BuildItem {
            id: BvhObjectId::new(id),
            bounds: BoundingBox::new(center - 0.1, center + 0.1),
            center,
        }
    }

    #[test]
    fn partition_by() {
        let mut items: Vec<_> = [3.0, 1.0, 4.0, 1.0, 5.0]
            .into_iter()
            .enumerate()
            .map(|(id, x)| item(id as u32, vec3(x, 0.0, 0.0)))
            .collect();

        let pivot = super::partition_by(&mut items, |item| {
            item.center[Axis::X] < 3.0
        });

        assert_eq!(2, pivot);
        assert!(items[..2].iter().all(|item| item.center.x < 3.0));
        assert!(items[2..].iter().all(|item| item.center.x >= 3.0));
    }

    #[test]
    fn depth_ceiling_splits_by_position() {
        // All centers coincide, so spatial splits never separate anything
        let objects: Vec<_> = (0..100)
            .map(|_| BoundingBox::new(Vec3::ZERO, Vec3::ONE))
            .collect();

        let config = BvhBuildConfig::default().with_max_depth(4);
        let nodes = run(&objects, &config);

        assert_eq!(199, nodes.len());

        let leaves = nodes.iter().filter(|(_, node)| node.is_leaf()).count();

        assert_eq!(100, leaves);
    }

    fn max_leaf_depth(nodes: &BvhNodes) -> usize {
        let mut stack = vec![(BvhNodeId::root(), 0)];
        let mut max_depth = 0;

        while let Some((node_id, depth)) = stack.pop() {
            match nodes[node_id] {
                BvhNode::Internal {
                    left_id, right_id, ..
                } => {
                    stack.push((left_id, depth + 1));
                    stack.push((right_id, depth + 1));
                }

                BvhNode::Leaf { .. } => {
                    max_depth = max_depth.max(depth);
                }
            }
        }

        max_depth
    }

    #[test]
    fn depth_ceiling_respects_gpu_stack() {
        let objects: Vec<_> = (0..5000)
            .map(|_| BoundingBox::new(Vec3::ZERO, Vec3::ONE))
            .collect();

        for strategy in [BvhBuildStrategy::Sah, BvhBuildStrategy::Middle] {
            let config = BvhBuildConfig::default()
                .with_strategy(strategy)
                .with_max_depth(u32::MAX);

            let nodes = run(&objects, &config);

            assert_eq!(9999, nodes.len());
            assert!(max_leaf_depth(&nodes) <= gpu::BVH_STACK_SIZE - 1);
        }
    }

    #[test]
    fn depth_ceiling() {
        assert_eq!(4, super::depth_ceiling(4, 100));
        assert_eq!(63, super::depth_ceiling(u32::MAX, 1));
        assert_eq!(62, super::depth_ceiling(u32::MAX, 2));
        assert_eq!(56, super::depth_ceiling(u32::MAX, 100));
        assert_eq!(56, super::depth_ceiling(u32::MAX, 128));
        assert_eq!(55, super::depth_ceiling(u32::MAX, 129));
    }
}
