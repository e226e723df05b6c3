use glam::Vec3;

use crate::{nearest_distance, BvhNode, Triangle};

/// Read-only view over a flattened triangle BVH.
#[derive(Clone, Copy, Debug)]
pub struct TriangleBvhView<'a> {
    nodes: &'a [BvhNode],
    triangles: &'a [Triangle],
}

impl<'a> TriangleBvhView<'a> {
    pub fn new(nodes: &'a [BvhNode], triangles: &'a [Triangle]) -> Self {
        Self { nodes, triangles }
    }

    pub fn nodes(&self) -> &'a [BvhNode] {
        self.nodes
    }

    pub fn triangles(&self) -> &'a [Triangle] {
        self.triangles
    }

    /// Returns the distance between `point` and the closest triangle, or
    /// `max_distance` if nothing is closer than that.
    pub fn nearest_distance(&self, point: Vec3, max_distance: f32) -> f32 {
        nearest_distance(self.nodes, point, max_distance, |payload_idx, best| {
            best.min(self.triangles[payload_idx as usize].distance_to_point(point))
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;

    #[test]
    fn nearest_distance() {
        let triangles = vec![
            Triangle::new(
                vec3(0.0, 0.0, 0.0),
                vec3(1.0, 0.0, 0.0),
                vec3(0.0, 1.0, 0.0),
                0,
            ),
            Triangle::new(
                vec3(10.0, 0.0, 0.0),
                vec3(11.0, 0.0, 0.0),
                vec3(10.0, 1.0, 0.0),
                1,
            ),
        ];

        let nodes = vec![
            BvhNode::internal(vec3(0.0, 0.0, 0.0), vec3(11.0, 1.0, 0.0), 1, 2),
            BvhNode::leaf(vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 0.0), 0),
            BvhNode::leaf(vec3(10.0, 0.0, 0.0), vec3(11.0, 1.0, 0.0), 1),
        ];

        let target = TriangleBvhView::new(&nodes, &triangles);

        assert_relative_eq!(
            3.0,
            target.nearest_distance(vec3(0.2, 0.2, 3.0), f32::INFINITY)
        );

        assert_relative_eq!(
            1.0,
            target.nearest_distance(vec3(12.0, 0.0, 0.0), f32::INFINITY)
        );

        assert_eq!(0.5, target.nearest_distance(vec3(0.2, 0.2, 3.0), 0.5));
    }

    #[test]
    fn nearest_distance_on_empty_view() {
        let target = TriangleBvhView::new(&[], &[]);

        assert_eq!(
            f32::INFINITY,
            target.nearest_distance(Vec3::ZERO, f32::INFINITY)
        );
    }
}
