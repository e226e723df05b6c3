mod lod;

use glam::Vec3;

pub use self::lod::*;
use crate::gpu::{self, LOD_LEVELS};
use crate::{BoundingBox, Polygon, PolygonId, Segment};

/// A run of consecutive edges of one polygon - the payload of a line-BVH
/// leaf.
///
/// `segments` holds the full-detail edges first, followed by every
/// generated level of detail; `segment_count_per_lod` says how long each of
/// those runs is (zero for levels that weren't generated).
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentCluster {
    segments: Vec<Segment>,
    bounding_box: BoundingBox,
    owner: PolygonId,
    segment_count_per_lod: [u32; LOD_LEVELS],
}

impl SegmentCluster {
    pub fn new(owner: PolygonId, segments: Vec<Segment>) -> Self {
        let bounding_box = segments
            .iter()
            .map(|segment| segment.bounding_box())
            .collect();

        let mut segment_count_per_lod = [0; LOD_LEVELS];

        segment_count_per_lod[0] = segments.len() as u32;

        Self {
            segments,
            bounding_box,
            owner,
            segment_count_per_lod,
        }
    }

    /// Splits polygon's edges into clusters of at most `max_segments` each.
    pub fn from_polygon(
        owner: PolygonId,
        polygon: &Polygon,
        max_segments: usize,
    ) -> Vec<Self> {
        let segments: Vec<_> = polygon.segments(owner).collect();

        segments
            .chunks(max_segments.max(1))
            .map(|chunk| Self::new(owner, chunk.to_vec()))
            .collect()
    }

    /// Clusters every polygon of the batch, skipping (and logging) polygons
    /// with fewer than two vertices.
    pub fn from_polygons(polygons: &[Polygon], max_segments: usize) -> Vec<Self> {
        let mut clusters = Vec::new();

        for (polygon_idx, polygon) in polygons.iter().enumerate() {
            if polygon.len() < 2 {
                log::warn!(
                    "Polygon {} has fewer than 2 vertices; skipping it",
                    polygon_idx
                );

                continue;
            }

            clusters.extend(Self::from_polygon(
                PolygonId::new(polygon_idx as u32),
                polygon,
                max_segments,
            ));
        }

        clusters
    }

    pub fn owner(&self) -> PolygonId {
        self.owner
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Returns all segments - every level of detail, one after another.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count_per_lod(&self) -> [u32; LOD_LEVELS] {
        self.segment_count_per_lod
    }

    pub fn total_segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns segments making up given level of detail; levels that weren't
    /// generated resolve to the highest generated level below them.
    pub fn lod(&self, level: usize) -> &[Segment] {
        let mut start = 0;
        let mut end = self.segment_count_per_lod[0] as usize;

        for level in 1..=level.min(LOD_LEVELS - 1) {
            let count = self.segment_count_per_lod[level] as usize;

            if count == 0 {
                break;
            }

            start = end;
            end += count;
        }

        &self.segments[start..end]
    }

    /// Returns the distance between `point` and the nearest full-detail
    /// segment.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.lod(0)
            .iter()
            .map(|segment| segment.distance_to_point(point))
            .fold(f32::INFINITY, f32::min)
    }

    /// Serializes this cluster, assuming its segments start at
    /// `segment_start_idx` in the global segment buffer.
    pub fn serialize(&self, segment_start_idx: usize) -> gpu::Cluster {
        gpu::Cluster {
            min_extent: self.bounding_box.min(),
            segment_start_idx: segment_start_idx as i32,
            max_extent: self.bounding_box.max(),
            owner_idx: self.owner.get() as i32,
            total_segment_count: self.segments.len() as i32,
            _pad: Default::default(),
            segment_count_per_lod: self.segment_count_per_lod.map(|n| n as i32),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    fn ring(len: usize) -> Polygon {
        Polygon::ring((0..len).map(|idx| {
            let angle = (idx as f32) / (len as f32) * std::f32::consts::TAU;

            vec3(angle.cos(), angle.sin(), 0.0)
        }))
    }

    #[test]
    fn from_polygon_respects_cluster_capacity() {
        let target = SegmentCluster::from_polygon(PolygonId::new(0), &ring(300), 128);

        assert_eq!(3, target.len());
        assert_eq!(128, target[0].total_segment_count());
        assert_eq!(128, target[1].total_segment_count());
        assert_eq!(44, target[2].total_segment_count());
    }

    #[test]
    fn from_polygon_keeps_edges_contiguous() {
        let target = SegmentCluster::from_polygon(PolygonId::new(0), &ring(10), 4);

        let segments: Vec<_> = target
            .iter()
            .flat_map(|cluster| cluster.segments())
            .collect();

        assert_eq!(10, segments.len());

        for pair in segments.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    #[test]
    fn from_polygons_skips_degenerate_polygons() {
        let polygons = vec![
            Polygon::ring([Vec3::ZERO]),
            ring(5),
            Polygon::ring([]),
            ring(3),
        ];

        let target = SegmentCluster::from_polygons(&polygons, 128);

        assert_eq!(2, target.len());
        assert_eq!(PolygonId::new(1), target[0].owner());
        assert_eq!(PolygonId::new(3), target[1].owner());
    }

    #[test]
    fn bounding_box_covers_all_segments() {
        let target = &SegmentCluster::from_polygon(PolygonId::new(0), &ring(16), 128)[0];

        for segment in target.segments() {
            assert!(target.bounding_box().contains(&segment.bounding_box()));
        }
    }

    #[test]
    fn lod_without_generated_levels() {
        let target = &SegmentCluster::from_polygon(PolygonId::new(0), &ring(6), 128)[0];

        assert_eq!([6, 0, 0, 0, 0, 0, 0, 0], target.segment_count_per_lod());
        assert_eq!(6, target.lod(0).len());
        assert_eq!(6, target.lod(5).len());
    }

    #[test]
    fn serialize() {
        let target = &SegmentCluster::from_polygon(PolygonId::new(7), &ring(6), 128)[0];
        let cluster = target.serialize(42);

        assert_eq!(42, cluster.segment_start_idx);
        assert_eq!(7, cluster.owner_idx);
        assert_eq!(6, cluster.total_segment_count);
        assert_eq!(target.bounding_box().min(), cluster.min_extent);
        assert_eq!(target.bounding_box().max(), cluster.max_extent);
    }
}
