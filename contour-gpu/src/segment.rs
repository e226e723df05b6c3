use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4, Vec4Swizzles};

use crate::segment_distance;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Segment {
    pub start: Vec3,
    pub owner_idx: i32,
    pub end: Vec3,
    pub _pad: u32,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3, owner_idx: i32) -> Self {
        Self {
            start,
            owner_idx,
            end,
            _pad: 0,
        }
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        segment_distance(self.start, self.end, point)
    }

    pub fn serialize(&self) -> [Vec4; 2] {
        [
            self.start.extend(f32::from_bits(self.owner_idx as u32)),
            self.end.extend(f32::from_bits(self._pad)),
        ]
    }

    pub fn deserialize([d0, d1]: [Vec4; 2]) -> Self {
        Self {
            start: d0.xyz(),
            owner_idx: d0.w.to_bits() as i32,
            end: d1.xyz(),
            _pad: d1.w.to_bits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(32, std::mem::size_of::<Segment>());
    }

    #[test]
    fn serialization() {
        let target =
            Segment::new(vec3(1.0, 2.0, 3.0), vec3(4.0, 5.0, 6.0), 0xcafe);

        let bytes: [u32; 8] = bytemuck::cast(target);
        let serialized: [u32; 8] = bytemuck::cast(target.serialize());

        assert_eq!(bytes, serialized);
        assert_eq!(target, Segment::deserialize(target.serialize()));
    }
}
