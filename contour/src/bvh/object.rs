use glam::Vec3;

use crate::{BoundingBox, SegmentCluster, Triangle};

/// Something that can be stored in a leaf of [`crate::Bvh`].
pub trait BvhObject {
    fn bounding_box(&self) -> BoundingBox;

    /// Point used to decide on which side of a splitting plane the object
    /// lands.
    fn center(&self) -> Vec3 {
        self.bounding_box().center()
    }
}

impl<T> BvhObject for &T
where
    T: BvhObject,
{
    fn bounding_box(&self) -> BoundingBox {
        T::bounding_box(self)
    }

    fn center(&self) -> Vec3 {
        T::center(self)
    }
}

impl BvhObject for SegmentCluster {
    fn bounding_box(&self) -> BoundingBox {
        SegmentCluster::bounding_box(self)
    }
}

impl BvhObject for Triangle {
    fn bounding_box(&self) -> BoundingBox {
        Triangle::bounding_box(self)
    }

    fn center(&self) -> Vec3 {
        let [v1, v2, v3] = self.vertices();

        (v1 + v2 + v3) / 3.0
    }
}

impl BvhObject for BoundingBox {
    fn bounding_box(&self) -> BoundingBox {
        *self
    }
}
