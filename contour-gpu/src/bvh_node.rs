use bytemuck::{Pod, Zeroable};
use glam::{vec4, Vec3, Vec4, Vec4Swizzles};

use crate::{box_distance, INVALID_IDX};

/// A flattened BVH node.
///
/// Internal nodes point at their children through `left_child` and
/// `right_child`; leaves set both to [`INVALID_IDX`] and point at their
/// payload (a cluster or a triangle) through `payload_idx`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BvhNode {
    pub min_extent: Vec3,
    pub left_child: i32,
    pub max_extent: Vec3,
    pub right_child: i32,
    pub payload_idx: i32,
    pub is_leaf: u32,
    pub _pad: [u32; 2],
}

impl BvhNode {
    pub fn internal(
        min_extent: Vec3,
        max_extent: Vec3,
        left_child: i32,
        right_child: i32,
    ) -> Self {
        Self {
            min_extent,
            left_child,
            max_extent,
            right_child,
            payload_idx: INVALID_IDX,
            is_leaf: 0,
            _pad: Default::default(),
        }
    }

    pub fn leaf(min_extent: Vec3, max_extent: Vec3, payload_idx: i32) -> Self {
        Self {
            min_extent,
            left_child: INVALID_IDX,
            max_extent,
            right_child: INVALID_IDX,
            payload_idx,
            is_leaf: 1,
            _pad: Default::default(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf != 0
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        box_distance(self.min_extent, self.max_extent, point)
    }

    pub fn serialize(&self) -> [Vec4; 3] {
        [
            self.min_extent
                .extend(f32::from_bits(self.left_child as u32)),
            self.max_extent
                .extend(f32::from_bits(self.right_child as u32)),
            vec4(
                f32::from_bits(self.payload_idx as u32),
                f32::from_bits(self.is_leaf),
                f32::from_bits(self._pad[0]),
                f32::from_bits(self._pad[1]),
            ),
        ]
    }

    pub fn deserialize([d0, d1, d2]: [Vec4; 3]) -> Self {
        Self {
            min_extent: d0.xyz(),
            left_child: d0.w.to_bits() as i32,
            max_extent: d1.xyz(),
            right_child: d1.w.to_bits() as i32,
            payload_idx: d2.x.to_bits() as i32,
            is_leaf: d2.y.to_bits(),
            _pad: [d2.z.to_bits(), d2.w.to_bits()],
        }
    }
}

impl Default for BvhNode {
    fn default() -> Self {
        Self::leaf(Vec3::ZERO, Vec3::ZERO, INVALID_IDX)
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(48, std::mem::size_of::<BvhNode>());
    }

    #[test]
    fn serialization() {
        let target = BvhNode::internal(
            vec3(-1.0, -2.0, -3.0),
            vec3(4.0, 5.0, 6.0),
            1,
            INVALID_IDX,
        );

        let bytes: [u32; 12] = bytemuck::cast(target);
        let serialized: [u32; 12] = bytemuck::cast(target.serialize());

        assert_eq!(bytes, serialized);
        assert_eq!(target, BvhNode::deserialize(target.serialize()));
    }

    #[test]
    fn leaf() {
        let target = BvhNode::leaf(Vec3::ZERO, Vec3::ONE, 7);

        assert!(target.is_leaf());
        assert_eq!(INVALID_IDX, target.left_child);
        assert_eq!(INVALID_IDX, target.right_child);
        assert_eq!(7, target.payload_idx);
    }
}
