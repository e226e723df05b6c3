use glam::Vec3;

use crate::{BvhNode, BVH_STACK_SIZE};

/// Walks flattened `nodes` from the root (index 0) looking for the closest
/// payload, skipping subtrees whose boxes lie further than the best distance
/// found so far.
///
/// `leaf_distance` receives a leaf's payload index together with the current
/// best distance and returns the updated best distance.
///
/// Trees too deep for the stack are still answered exactly, by falling back
/// to a linear scan over all leaves.
pub fn nearest_distance(
    nodes: &[BvhNode],
    point: Vec3,
    max_distance: f32,
    mut leaf_distance: impl FnMut(i32, f32) -> f32,
) -> f32 {
    let mut best = max_distance;

    if nodes.is_empty() {
        return best;
    }

    let mut stack = [0u32; BVH_STACK_SIZE];
    let mut stack_len = 1;

    while stack_len > 0 {
        stack_len -= 1;

        let node = nodes[stack[stack_len] as usize];

        if node.distance_to_point(point) >= best {
            continue;
        }

        if node.is_leaf() {
            best = leaf_distance(node.payload_idx, best);
            continue;
        }

        if stack_len + 2 > BVH_STACK_SIZE {
            return scan_leaves(nodes, point, best, leaf_distance);
        }

        let left = node.left_child as u32;
        let right = node.right_child as u32;
        let left_dist = nodes[left as usize].distance_to_point(point);
        let right_dist = nodes[right as usize].distance_to_point(point);

        // Closer child goes on top, so that it gets visited first
        let (near, far) = if left_dist < right_dist {
            (left, right)
        } else {
            (right, left)
        };

        stack[stack_len] = far;
        stack[stack_len + 1] = near;
        stack_len += 2;
    }

    best
}

fn scan_leaves(
    nodes: &[BvhNode],
    point: Vec3,
    mut best: f32,
    mut leaf_distance: impl FnMut(i32, f32) -> f32,
) -> f32 {
    for node in nodes {
        if node.is_leaf() && node.distance_to_point(point) < best {
            best = leaf_distance(node.payload_idx, best);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;
    use crate::segment_distance;

    /// Caterpillar tree over unit segments laid along X: every internal node
    /// has leaf `k` on the left and the rest of the chain on the right.
    fn caterpillar(depth: usize) -> Vec<BvhNode> {
        let mut nodes = Vec::new();

        for k in 0..depth {
            let min = vec3(k as f32 * 2.0, 0.0, 0.0);
            let max = vec3(depth as f32 * 2.0 + 1.0, 0.0, 0.0);
            let idx = nodes.len() as i32;

            nodes.push(BvhNode::internal(min, max, idx + 1, idx + 2));
            nodes.push(BvhNode::leaf(min, min + vec3(1.0, 0.0, 0.0), k as i32));
        }

        let last = vec3(depth as f32 * 2.0, 0.0, 0.0);

        nodes.push(BvhNode::leaf(last, last + vec3(1.0, 0.0, 0.0), depth as i32));
        nodes
    }

    fn segment(payload_idx: i32) -> (Vec3, Vec3) {
        let start = vec3(payload_idx as f32 * 2.0, 0.0, 0.0);

        (start, start + vec3(1.0, 0.0, 0.0))
    }

    fn nearest(nodes: &[BvhNode], point: Vec3) -> f32 {
        nearest_distance(nodes, point, f32::INFINITY, |payload_idx, best| {
            let (start, end) = segment(payload_idx);

            best.min(segment_distance(start, end, point))
        })
    }

    #[test]
    fn shallow_tree() {
        let nodes = caterpillar(10);

        assert_relative_eq!(1.0, nearest(&nodes, vec3(22.0, 0.0, 0.0)));
        assert_relative_eq!(2.0, nearest(&nodes, vec3(0.5, 2.0, 0.0)));
    }

    #[test]
    fn tree_deeper_than_stack() {
        // Query point sits past the chain's far end, so every level pushes
        // its leaf as the far child and the stack keeps growing
        let depth = 2 * BVH_STACK_SIZE;
        let nodes = caterpillar(depth);
        let point = vec3(depth as f32 * 2.0 + 3.0, 0.0, 0.0);

        assert_relative_eq!(2.0, nearest(&nodes, point));
        assert_relative_eq!(2.0, nearest(&nodes, vec3(0.5, 2.0, 0.0)));
    }
}
