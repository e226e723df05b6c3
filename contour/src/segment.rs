use glam::Vec3;

use crate::{gpu, BoundingBox, PolygonId};

/// An edge of a polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    start: Vec3,
    end: Vec3,
    owner: PolygonId,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3, owner: PolygonId) -> Self {
        Self { start, end, owner }
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    pub fn owner(&self) -> PolygonId {
        self.owner
    }

    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).normalize_or_zero()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_iter([self.start, self.end])
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        gpu::segment_distance(self.start, self.end, point)
    }

    pub fn serialize(&self) -> gpu::Segment {
        gpu::Segment::new(self.start, self.end, self.owner.get() as i32)
    }
}
