use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4, Vec4Swizzles};

use crate::triangle_closest_point;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub v1: Vec3,
    pub _pad1: u32,
    pub v2: Vec3,
    pub _pad2: u32,
    pub v3: Vec3,
    pub owner_idx: i32,
}

impl Triangle {
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3, owner_idx: i32) -> Self {
        Self {
            v1,
            _pad1: 0,
            v2,
            _pad2: 0,
            v3,
            owner_idx,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v1, self.v2, self.v3]
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        point.distance(triangle_closest_point(self.v1, self.v2, self.v3, point))
    }

    pub fn serialize(&self) -> [Vec4; 3] {
        [
            self.v1.extend(f32::from_bits(self._pad1)),
            self.v2.extend(f32::from_bits(self._pad2)),
            self.v3.extend(f32::from_bits(self.owner_idx as u32)),
        ]
    }

    pub fn deserialize([d0, d1, d2]: [Vec4; 3]) -> Self {
        Self {
            v1: d0.xyz(),
            _pad1: d0.w.to_bits(),
            v2: d1.xyz(),
            _pad2: d1.w.to_bits(),
            v3: d2.xyz(),
            owner_idx: d2.w.to_bits() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(48, std::mem::size_of::<Triangle>());
    }

    #[test]
    fn serialization() {
        let target = Triangle::new(
            vec3(1.0, 2.0, 3.0),
            vec3(4.0, 5.0, 6.0),
            vec3(7.0, 8.0, 9.0),
            12,
        );

        let bytes: [u32; 12] = bytemuck::cast(target);
        let serialized: [u32; 12] = bytemuck::cast(target.serialize());

        assert_eq!(bytes, serialized);
        assert_eq!(target, Triangle::deserialize(target.serialize()));
    }
}
