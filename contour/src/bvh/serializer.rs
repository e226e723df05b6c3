use super::{Bvh, BvhNode, BvhNodeId};
use crate::gpu;

/// Flattens the tree into `nodes`, in pre-order.
///
/// Leaves are handed over to `serialize_leaf` in the very order they get
/// emitted; it's expected to append the leaf's payload (and primitives)
/// wherever it belongs and return the payload's index.
///
/// Returns the root's index, or `None` for an unbuilt tree.
pub fn serialize<T>(
    bvh: &Bvh<T>,
    nodes: &mut Vec<gpu::BvhNode>,
    mut serialize_leaf: impl FnMut(&T) -> usize,
) -> Option<usize> {
    let root = bvh.root()?;

    nodes.reserve(bvh.nodes().len());

    Some(process(bvh, nodes, &mut serialize_leaf, root))
}

fn process<T>(
    bvh: &Bvh<T>,
    nodes: &mut Vec<gpu::BvhNode>,
    serialize_leaf: &mut impl FnMut(&T) -> usize,
    id: BvhNodeId,
) -> usize {
    let ptr = nodes.len();

    match bvh.nodes()[id] {
        BvhNode::Internal {
            bounds,
            left_id,
            right_id,
        } => {
            nodes.push(Default::default());

            let left_ptr = process(bvh, nodes, serialize_leaf, left_id);
            let right_ptr = process(bvh, nodes, serialize_leaf, right_id);

            nodes[ptr] = gpu::BvhNode::internal(
                bounds.min(),
                bounds.max(),
                left_ptr as i32,
                right_ptr as i32,
            );
        }

        BvhNode::Leaf { bounds, object_id } => {
            let payload_idx = serialize_leaf(bvh.object(object_id));

            nodes.push(gpu::BvhNode::leaf(
                bounds.min(),
                bounds.max(),
                payload_idx as i32,
            ));
        }
    }

    ptr
}
