use crate::bvh::serialize;
use crate::{gpu, Bvh, SegmentCluster, Triangle};

/// Flattened line BVH, ready to be uploaded as structured buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct LineBvhData {
    pub nodes: Vec<gpu::BvhNode>,
    pub clusters: Vec<gpu::Cluster>,
    pub segments: Vec<gpu::Segment>,
    pub root_node_idx: i32,
}

impl LineBvhData {
    /// Flattens given tree; returns `None` if the tree hasn't been built.
    ///
    /// Each cluster carries all of its levels of detail, so its
    /// `segment_start_idx` points at a run of `total_segment_count`
    /// segments.
    pub fn from_bvh(bvh: &Bvh<SegmentCluster>) -> Option<Self> {
        let mut this = Self::default();

        let Some(root_idx) = serialize(bvh, &mut this.nodes, |cluster| {
            this.clusters.push(cluster.serialize(this.segments.len()));

            this.segments.extend(
                cluster.segments().iter().map(|segment| segment.serialize()),
            );

            this.clusters.len() - 1
        }) else {
            log::warn!("Tried to flatten an unbuilt line BVH");
            return None;
        };

        this.root_node_idx = root_idx as i32;

        Some(this)
    }

    pub fn is_valid(&self) -> bool {
        self.root_node_idx >= 0 && !self.nodes.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Default::default();
    }

    pub fn view(&self) -> gpu::LineBvhView<'_> {
        gpu::LineBvhView::new(&self.nodes, &self.clusters, &self.segments)
    }

    pub fn nodes_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    pub fn clusters_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.clusters)
    }

    pub fn segments_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.segments)
    }
}

impl Default for LineBvhData {
    fn default() -> Self {
        Self {
            nodes: Default::default(),
            clusters: Default::default(),
            segments: Default::default(),
            root_node_idx: gpu::INVALID_IDX,
        }
    }
}

/// Flattened triangle BVH, ready to be uploaded as structured buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleBvhData {
    pub nodes: Vec<gpu::BvhNode>,
    pub triangles: Vec<gpu::Triangle>,
    pub root_node_idx: i32,
}

impl TriangleBvhData {
    /// Flattens given tree; returns `None` if the tree hasn't been built.
    pub fn from_bvh(bvh: &Bvh<Triangle>) -> Option<Self> {
        let mut this = Self::default();

        let Some(root_idx) = serialize(bvh, &mut this.nodes, |triangle| {
            this.triangles.push(triangle.serialize());
            this.triangles.len() - 1
        }) else {
            log::warn!("Tried to flatten an unbuilt triangle BVH");
            return None;
        };

        this.root_node_idx = root_idx as i32;

        Some(this)
    }

    pub fn is_valid(&self) -> bool {
        self.root_node_idx >= 0 && !self.nodes.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Default::default();
    }

    pub fn nodes_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    pub fn view(&self) -> gpu::TriangleBvhView<'_> {
        gpu::TriangleBvhView::new(&self.nodes, &self.triangles)
    }

    pub fn triangles_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}

impl Default for TriangleBvhData {
    fn default() -> Self {
        Self {
            nodes: Default::default(),
            triangles: Default::default(),
            root_node_idx: gpu::INVALID_IDX,
        }
    }
}
