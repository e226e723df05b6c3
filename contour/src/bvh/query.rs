use glam::Vec3;

use super::{Bvh, BvhNode, BvhNodeId};
use crate::{BoundingBox, Segment, SegmentCluster, Triangle};

/// Exact point-to-object distance, used at the leaves of a query.
pub trait DistanceToPoint {
    fn distance_to_point(&self, point: Vec3) -> f32;
}

impl<T> DistanceToPoint for &T
where
    T: DistanceToPoint,
{
    fn distance_to_point(&self, point: Vec3) -> f32 {
        T::distance_to_point(self, point)
    }
}

impl DistanceToPoint for Segment {
    fn distance_to_point(&self, point: Vec3) -> f32 {
        Segment::distance_to_point(self, point)
    }
}

impl DistanceToPoint for SegmentCluster {
    fn distance_to_point(&self, point: Vec3) -> f32 {
        SegmentCluster::distance_to_point(self, point)
    }
}

impl DistanceToPoint for Triangle {
    fn distance_to_point(&self, point: Vec3) -> f32 {
        Triangle::distance_to_point(self, point)
    }
}

impl DistanceToPoint for BoundingBox {
    fn distance_to_point(&self, point: Vec3) -> f32 {
        BoundingBox::distance_to_point(self, point)
    }
}

impl<T> Bvh<T>
where
    T: DistanceToPoint,
{
    /// Returns the distance between `point` and the closest object, or
    /// infinity if the tree is empty.
    pub fn nearest_distance(&self, point: Vec3) -> f32 {
        self.nearest_distance_within(point, f32::INFINITY)
    }

    /// Same as [`Self::nearest_distance()`], but doesn't look further than
    /// `bound` (and returns `bound` if nothing is closer than that).
    ///
    /// Non-positive bounds are treated as infinity.
    pub fn nearest_distance_within(&self, point: Vec3, bound: f32) -> f32 {
        let mut best = if bound > 0.0 { bound } else { f32::INFINITY };

        let Some(root) = self.root() else {
            log::warn!("Queried an unbuilt BVH");
            return best;
        };

        self.visit(root, point, &mut best);

        best
    }

    fn visit(&self, id: BvhNodeId, point: Vec3, best: &mut f32) {
        let node = &self.nodes()[id];

        if node.bounds().distance_to_point(point) >= *best {
            return;
        }

        match *node {
            BvhNode::Internal {
                left_id, right_id, ..
            } => {
                let left_dist =
                    self.nodes()[left_id].bounds().distance_to_point(point);

                let right_dist =
                    self.nodes()[right_id].bounds().distance_to_point(point);

                if left_dist <= right_dist {
                    self.visit(left_id, point, best);
                    self.visit(right_id, point, best);
                } else {
                    self.visit(right_id, point, best);
                    self.visit(left_id, point, best);
                }
            }

            BvhNode::Leaf { object_id, .. } => {
                *best = best.min(self.object(object_id).distance_to_point(point));
            }
        }
    }
}
