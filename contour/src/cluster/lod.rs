use crate::gpu::LOD_LEVELS;
use crate::{Segment, SegmentCluster};

/// Maximum gap between one segment's end and the next one's start for the
/// two to still count as connected.
pub const LOD_CONTINUITY_EPSILON: f32 = 0.1;

/// Angle (in radians) between two connected segments below which they get
/// merged on the first level of detail; each further level adds another
/// step.
pub const LOD_ANGLE_STEP: f32 = 15.0 * std::f32::consts::PI / 180.0;

impl SegmentCluster {
    /// Generates levels of detail `1..LOD_LEVELS`, each one merging nearly
    /// collinear runs of the previous one.
    ///
    /// Calling this again regenerates the levels from scratch.
    pub fn generate_lods(&mut self) {
        let base_len = self.segment_count_per_lod[0] as usize;

        self.segments.truncate(base_len);

        let mut prev = self.segments.clone();

        for level in 1..LOD_LEVELS {
            let curr = if prev.len() <= 1 {
                prev.clone()
            } else {
                simplify(&prev, LOD_ANGLE_STEP * (level as f32))
            };

            self.segment_count_per_lod[level] = curr.len() as u32;
            self.segments.extend_from_slice(&curr);

            prev = curr;
        }
    }
}

/// Greedily merges each segment with the ones following it, for as long as
/// they stay connected and turn by less than `max_angle`.
fn simplify(segments: &[Segment], max_angle: f32) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    let mut segments = segments.iter().copied().peekable();

    while let Some(mut curr) = segments.next() {
        while let Some(next) = segments.peek() {
            if !can_merge(&curr, next, max_angle) {
                break;
            }

            curr = Segment::new(curr.start(), next.end(), curr.owner());
            segments.next();
        }

        out.push(curr);
    }

    out
}

fn can_merge(curr: &Segment, next: &Segment, max_angle: f32) -> bool {
    if curr.end().distance(next.start()) >= LOD_CONTINUITY_EPSILON {
        return false;
    }

    let cos = curr.direction().dot(next.direction()).clamp(-1.0, 1.0);

    cos.acos() < max_angle
}
