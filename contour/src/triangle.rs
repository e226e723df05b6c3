use glam::Vec3;

use crate::{gpu, BoundingBox, PolygonId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    vertices: [Vec3; 3],
    owner: PolygonId,
}

impl Triangle {
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3, owner: PolygonId) -> Self {
        Self {
            vertices: [v1, v2, v3],
            owner,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        self.vertices
    }

    pub fn owner(&self) -> PolygonId {
        self.owner
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_iter(self.vertices)
    }

    /// Returns the point of this triangle closest to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let [a, b, c] = self.vertices;

        gpu::triangle_closest_point(a, b, c, point)
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        point.distance(self.closest_point(point))
    }

    pub fn serialize(&self) -> gpu::Triangle {
        let [v1, v2, v3] = self.vertices;

        gpu::Triangle::new(v1, v2, v3, self.owner.get() as i32)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;

    fn target() -> Triangle {
        Triangle::new(
            vec3(0.0, 0.0, 0.0),
            vec3(4.0, 0.0, 0.0),
            vec3(0.0, 4.0, 0.0),
            PolygonId::new(3),
        )
    }

    #[test]
    fn distance_above_face() {
        assert_relative_eq!(
            2.5,
            target().distance_to_point(vec3(1.0, 1.0, 2.5))
        );
    }

    #[test]
    fn distance_to_vertex_region() {
        assert_relative_eq!(
            5.0,
            target().distance_to_point(vec3(-3.0, -4.0, 0.0))
        );

        assert_relative_eq!(
            1.0,
            target().distance_to_point(vec3(5.0, 0.0, 0.0))
        );
    }

    #[test]
    fn distance_to_edge_region() {
        assert_relative_eq!(
            1.0,
            target().distance_to_point(vec3(2.0, -1.0, 0.0))
        );

        // Hypotenuse: x + y = 4
        assert_relative_eq!(
            2.0f32.sqrt(),
            target().distance_to_point(vec3(3.0, 3.0, 0.0)),
            epsilon = 1e-5
        );
    }

    #[test]
    fn distance_to_degenerate_triangle() {
        let target = Triangle::new(
            vec3(0.0, 0.0, 0.0),
            vec3(2.0, 0.0, 0.0),
            vec3(4.0, 0.0, 0.0),
            PolygonId::new(0),
        );

        assert_relative_eq!(
            3.0,
            target.distance_to_point(vec3(1.0, 3.0, 0.0)),
            epsilon = 1e-5
        );
    }
}
