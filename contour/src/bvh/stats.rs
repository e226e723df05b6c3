use std::mem;

use super::{Bvh, BvhNode, BvhNodeId};
use crate::{gpu, SegmentCluster, Triangle};

/// Number of bytes an object occupies once flattened into GPU buffers,
/// including the primitives it carries.
pub trait GpuFootprint {
    fn gpu_footprint(&self) -> usize;

    /// Number of primitives (segments or triangles) the object carries.
    fn primitive_count(&self) -> usize;
}

impl GpuFootprint for SegmentCluster {
    fn gpu_footprint(&self) -> usize {
        mem::size_of::<gpu::Cluster>()
            + self.total_segment_count() * mem::size_of::<gpu::Segment>()
    }

    fn primitive_count(&self) -> usize {
        self.total_segment_count()
    }
}

impl GpuFootprint for Triangle {
    fn gpu_footprint(&self) -> usize {
        mem::size_of::<gpu::Triangle>()
    }

    fn primitive_count(&self) -> usize {
        1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BvhStats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub primitive_count: usize,

    /// Number of edges between the root and the deepest leaf.
    pub max_depth: u32,

    pub build_time_ms: f32,
    pub memory_usage_mb: f32,
}

impl BvhStats {
    pub fn aggregate<'a>(
        stats: impl IntoIterator<Item = &'a BvhStats>,
    ) -> BvhSystemStats {
        stats
            .into_iter()
            .fold(BvhSystemStats::default(), |mut acc, stats| {
                acc.active_bvh_count += 1;
                acc.total_nodes += stats.node_count;
                acc.total_segments += stats.primitive_count;
                acc.total_memory_usage_mb += stats.memory_usage_mb;
                acc
            })
    }
}

/// Stats summed over many trees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BvhSystemStats {
    pub active_bvh_count: usize,
    pub total_nodes: usize,
    pub total_segments: usize,
    pub total_memory_usage_mb: f32,
}

impl<T> Bvh<T>
where
    T: GpuFootprint,
{
    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats {
            build_time_ms: self.build_time().as_secs_f32() * 1000.0,
            ..Default::default()
        };

        if let Some(root) = self.root() {
            self.collect_stats(root, 0, &mut stats);
        }

        let memory_usage = stats.node_count * mem::size_of::<gpu::BvhNode>()
            + self
                .objects()
                .iter()
                .map(|object| object.gpu_footprint())
                .sum::<usize>();

        stats.memory_usage_mb = (memory_usage as f32) / (1024.0 * 1024.0);
        stats
    }

    fn collect_stats(&self, id: BvhNodeId, depth: u32, stats: &mut BvhStats) {
        stats.node_count += 1;
        stats.max_depth = stats.max_depth.max(depth);

        match self.nodes()[id] {
            BvhNode::Internal {
                left_id, right_id, ..
            } => {
                self.collect_stats(left_id, depth + 1, stats);
                self.collect_stats(right_id, depth + 1, stats);
            }

            BvhNode::Leaf { object_id, .. } => {
                stats.leaf_count += 1;
                stats.primitive_count += self.object(object_id).primitive_count();
            }
        }
    }
}
