use glam::Vec3;

use crate::{nearest_distance, BvhNode, Cluster, Segment};

/// Read-only view over a flattened line BVH, traversed without pointers -
/// the same way a shader walks the structured buffers.
#[derive(Clone, Copy, Debug)]
pub struct LineBvhView<'a> {
    nodes: &'a [BvhNode],
    clusters: &'a [Cluster],
    segments: &'a [Segment],
}

impl<'a> LineBvhView<'a> {
    pub fn new(
        nodes: &'a [BvhNode],
        clusters: &'a [Cluster],
        segments: &'a [Segment],
    ) -> Self {
        Self {
            nodes,
            clusters,
            segments,
        }
    }

    pub fn nodes(&self) -> &'a [BvhNode] {
        self.nodes
    }

    pub fn clusters(&self) -> &'a [Cluster] {
        self.clusters
    }

    pub fn segments(&self) -> &'a [Segment] {
        self.segments
    }

    /// Returns the distance between `point` and the closest full-detail
    /// segment, or `max_distance` if nothing is closer than that.
    pub fn nearest_distance(&self, point: Vec3, max_distance: f32) -> f32 {
        self.nearest_distance_lod(point, max_distance, 0)
    }

    /// Same as [`Self::nearest_distance()`], but measures against given
    /// level of detail of each cluster.
    pub fn nearest_distance_lod(
        &self,
        point: Vec3,
        max_distance: f32,
        lod: usize,
    ) -> f32 {
        nearest_distance(self.nodes, point, max_distance, |payload_idx, best| {
            let cluster = self.clusters[payload_idx as usize];

            self.segments[cluster.lod_range(lod)]
                .iter()
                .fold(best, |best, segment| {
                    best.min(segment.distance_to_point(point))
                })
        })
    }
}
