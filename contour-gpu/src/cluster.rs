use core::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::{vec4, Vec3, Vec4, Vec4Swizzles};

use crate::{INVALID_IDX, LOD_LEVELS};

/// A flattened segment cluster - the payload of a line-BVH leaf.
///
/// The cluster's segments live at
/// `segment_start_idx .. segment_start_idx + total_segment_count`, one level
/// of detail after another; `segment_count_per_lod[n]` says how many of them
/// belong to level `n`, with zero marking a level that wasn't generated.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Cluster {
    pub min_extent: Vec3,
    pub segment_start_idx: i32,
    pub max_extent: Vec3,
    pub owner_idx: i32,
    pub total_segment_count: i32,
    pub _pad: [u32; 3],
    pub segment_count_per_lod: [i32; LOD_LEVELS],
}

impl Cluster {
    /// Returns range of segments (within the global segment buffer) that
    /// make up given level of detail.
    ///
    /// Levels that weren't generated resolve to the highest generated level
    /// below them.
    pub fn lod_range(&self, lod: usize) -> Range<usize> {
        let start = self.segment_start_idx.max(0) as usize;
        let mut range = start..(start + self.segment_count_per_lod[0] as usize);

        for level in 1..=lod.min(LOD_LEVELS - 1) {
            let count = self.segment_count_per_lod[level];

            if count <= 0 {
                break;
            }

            range = range.end..(range.end + count as usize);
        }

        range
    }

    pub fn serialize(&self) -> [Vec4; 5] {
        let lods = self.segment_count_per_lod.map(|n| f32::from_bits(n as u32));

        [
            self.min_extent
                .extend(f32::from_bits(self.segment_start_idx as u32)),
            self.max_extent.extend(f32::from_bits(self.owner_idx as u32)),
            vec4(
                f32::from_bits(self.total_segment_count as u32),
                f32::from_bits(self._pad[0]),
                f32::from_bits(self._pad[1]),
                f32::from_bits(self._pad[2]),
            ),
            vec4(lods[0], lods[1], lods[2], lods[3]),
            vec4(lods[4], lods[5], lods[6], lods[7]),
        ]
    }

    pub fn deserialize([d0, d1, d2, d3, d4]: [Vec4; 5]) -> Self {
        let lods = [d3.x, d3.y, d3.z, d3.w, d4.x, d4.y, d4.z, d4.w];

        Self {
            min_extent: d0.xyz(),
            segment_start_idx: d0.w.to_bits() as i32,
            max_extent: d1.xyz(),
            owner_idx: d1.w.to_bits() as i32,
            total_segment_count: d2.x.to_bits() as i32,
            _pad: [d2.y.to_bits(), d2.z.to_bits(), d2.w.to_bits()],
            segment_count_per_lod: lods.map(|n| n.to_bits() as i32),
        }
    }
}

impl Default for Cluster {
    fn default() -> Self {
        Self {
            min_extent: Vec3::ZERO,
            segment_start_idx: INVALID_IDX,
            max_extent: Vec3::ZERO,
            owner_idx: INVALID_IDX,
            total_segment_count: 0,
            _pad: Default::default(),
            segment_count_per_lod: Default::default(),
        }
    }
}
