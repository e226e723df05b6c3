use glam::Vec3;

use crate::{BoundingBox, Segment, Triangle};

/// Index of a polygon within the batch it was submitted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolygonId(u32);

impl PolygonId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// A ring (closed) or a chain (open) of vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vec3>,
    pub closed: bool,
}

impl Polygon {
    pub fn ring(vertices: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
            closed: true,
        }
    }

    pub fn chain(vertices: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
            closed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.vertices.iter().copied().collect()
    }

    /// Returns this polygon's edges.
    ///
    /// Rings include the wrap-around edge from the last vertex back to the
    /// first one, except for two-vertex rings, where it would just retrace
    /// the only edge backwards.
    pub fn segments(
        &self,
        owner: PolygonId,
    ) -> impl Iterator<Item = Segment> + '_ {
        let len = self.vertices.len();

        let edges = if len < 2 {
            0
        } else if self.closed && len > 2 {
            len
        } else {
            len - 1
        };

        (0..edges).map(move |idx| {
            Segment::new(
                self.vertices[idx],
                self.vertices[(idx + 1) % len],
                owner,
            )
        })
    }

    /// Triangulates this polygon as a fan around its bounding box's center.
    ///
    /// Each edge of the ring becomes one triangle, which covers convex and
    /// star-shaped polygons exactly.
    pub fn fan_triangles(
        &self,
        owner: PolygonId,
    ) -> impl Iterator<Item = Triangle> + '_ {
        let len = self.vertices.len();
        let center = self.bounding_box().center();
        let edges = if len < 3 { 0 } else { len };

        (0..edges).map(move |idx| {
            Triangle::new(
                self.vertices[idx],
                self.vertices[(idx + 1) % len],
                center,
                owner,
            )
        })
    }
}

/// Fans every polygon of the batch into triangles, skipping (and logging)
/// the ones that don't span an area.
pub fn triangulate(polygons: &[Polygon]) -> Vec<Triangle> {
    let mut triangles = Vec::new();

    for (polygon_idx, polygon) in polygons.iter().enumerate() {
        if polygon.len() < 3 {
            log::warn!(
                "Polygon {} has fewer than 3 vertices; skipping it",
                polygon_idx
            );

            continue;
        }

        triangles.extend(polygon.fan_triangles(PolygonId::new(polygon_idx as u32)));
    }

    triangles
}
