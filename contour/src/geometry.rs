use glam::Vec3;

use crate::utils::{measure, report};
use crate::{
    triangulate, Bvh, BvhBuildConfig, BvhStats, LineBvhData, Polygon,
    SegmentCluster, Triangle, TriangleBvhData,
};

/// Everything built out of a batch of polygons' outlines: the tree, its
/// flattened form and stats.
#[derive(Clone, Debug, Default)]
pub struct LineGeometry {
    bvh: Bvh<SegmentCluster>,
    gpu: LineBvhData,
    stats: BvhStats,
}

impl LineGeometry {
    pub fn build(polygons: &[Polygon], config: &BvhBuildConfig) -> Self {
        let (mut clusters, tt) = measure(|| {
            SegmentCluster::from_polygons(
                polygons,
                config.max_segments_per_cluster,
            )
        });

        report("extract", tt);

        if config.generate_lods {
            let ((), tt) = measure(|| {
                for cluster in &mut clusters {
                    cluster.generate_lods();
                }
            });

            report("lod", tt);
        }

        let bvh = Bvh::build(clusters, config);

        report("build", bvh.build_time());

        let gpu = if bvh.is_built() {
            let (gpu, tt) = measure(|| LineBvhData::from_bvh(&bvh));

            report("flatten", tt);
            gpu.unwrap_or_default()
        } else {
            Default::default()
        };

        let stats = bvh.stats();

        Self { bvh, gpu, stats }
    }

    pub fn is_built(&self) -> bool {
        self.bvh.is_built()
    }

    pub fn bvh(&self) -> &Bvh<SegmentCluster> {
        &self.bvh
    }

    pub fn gpu(&self) -> &LineBvhData {
        &self.gpu
    }

    pub fn stats(&self) -> BvhStats {
        self.stats
    }

    pub fn nearest_distance(&self, point: Vec3) -> f32 {
        self.bvh.nearest_distance(point)
    }
}

/// Everything built out of a batch of triangles.
#[derive(Clone, Debug, Default)]
pub struct TriangleGeometry {
    bvh: Bvh<Triangle>,
    gpu: TriangleBvhData,
    stats: BvhStats,
}

impl TriangleGeometry {
    pub fn build(triangles: Vec<Triangle>, config: &BvhBuildConfig) -> Self {
        let bvh = Bvh::build(triangles, config);

        report("build", bvh.build_time());

        let gpu = if bvh.is_built() {
            let (gpu, tt) = measure(|| TriangleBvhData::from_bvh(&bvh));

            report("flatten", tt);
            gpu.unwrap_or_default()
        } else {
            Default::default()
        };

        let stats = bvh.stats();

        Self { bvh, gpu, stats }
    }

    /// Fans each polygon into triangles and builds them.
    pub fn from_polygons(polygons: &[Polygon], config: &BvhBuildConfig) -> Self {
        let (triangles, tt) = measure(|| triangulate(polygons));

        report("extract", tt);

        Self::build(triangles, config)
    }

    pub fn is_built(&self) -> bool {
        self.bvh.is_built()
    }

    pub fn bvh(&self) -> &Bvh<Triangle> {
        &self.bvh
    }

    pub fn gpu(&self) -> &TriangleBvhData {
        &self.gpu
    }

    pub fn stats(&self) -> BvhStats {
        self.stats
    }

    pub fn nearest_distance(&self, point: Vec3) -> f32 {
        self.bvh.nearest_distance(point)
    }
}
