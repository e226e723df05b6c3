mod builder;
mod node;
mod nodes;
mod object;
mod printer;
mod query;
mod serializer;
mod stats;

use std::time::Duration;

pub use self::builder::{SAH_BINS, SAH_TRAVERSAL_COST};
pub use self::node::*;
pub use self::nodes::*;
pub use self::object::*;
pub use self::printer::*;
pub use self::query::*;
pub(crate) use self::serializer::*;
pub use self::stats::*;
use crate::utils::measure;
use crate::BvhBuildConfig;

/// Bounding volume hierarchy over a batch of objects, one object per leaf.
///
/// Immutable once built - a new batch means a new tree.
#[derive(Clone, Debug)]
pub struct Bvh<T> {
    nodes: BvhNodes,
    objects: Vec<T>,
    build_time: Duration,
}

impl<T> Bvh<T>
where
    T: BvhObject,
{
    pub fn build(objects: Vec<T>, config: &BvhBuildConfig) -> Self {
        if objects.is_empty() {
            log::warn!("Nothing to build the BVH from; leaving it empty");

            return Self {
                nodes: Default::default(),
                objects,
                build_time: Default::default(),
            };
        }

        let config = config.sanitized();

        log::trace!(
            "Building BVH; strategy = {:?}, objects = {}, \
             leaf-primitive-limit = {}, max-depth = {}",
            config.strategy,
            objects.len(),
            config.leaf_primitive_limit,
            config.max_depth,
        );

        let (nodes, build_time) = measure(|| builder::run(&objects, &config));

        log::info!(
            "BVH built; strategy = {:?}, objects = {}, nodes = {}, tt = {:?}",
            config.strategy,
            objects.len(),
            nodes.len(),
            build_time,
        );

        let this = Self {
            nodes,
            objects,
            build_time,
        };

        if cfg!(debug_assertions) {
            this.validate();
        }

        this
    }

    /// Asserts the structural invariants of this tree: every internal node
    /// has two children whose boxes lie within its own, every object sits in
    /// exactly one leaf and every leaf's box is its object's box.
    pub fn validate(&self) {
        let Some(root) = self.root() else {
            assert!(self.nodes.is_empty());
            return;
        };

        assert_eq!(2 * self.objects.len() - 1, self.nodes.len());

        let mut seen = vec![false; self.objects.len()];

        self.validate_node(root, &mut seen);

        assert!(seen.into_iter().all(|seen| seen));
    }

    fn validate_node(&self, id: BvhNodeId, seen: &mut [bool]) {
        match self.nodes[id] {
            BvhNode::Internal {
                bounds,
                left_id,
                right_id,
            } => {
                assert_ne!(left_id, right_id);

                for child_id in [left_id, right_id] {
                    assert!(bounds.contains(&self.nodes[child_id].bounds()));

                    self.validate_node(child_id, seen);
                }
            }

            BvhNode::Leaf { bounds, object_id } => {
                let object_idx = object_id.get() as usize;

                assert!(!seen[object_idx], "object referenced twice");
                assert_eq!(bounds, self.objects[object_idx].bounding_box());

                seen[object_idx] = true;
            }
        }
    }
}

impl<T> Bvh<T> {
    pub fn is_built(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<BvhNodeId> {
        self.is_built().then(BvhNodeId::root)
    }

    pub fn nodes(&self) -> &BvhNodes {
        &self.nodes
    }

    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    pub fn object(&self, id: BvhObjectId) -> &T {
        &self.objects[id.get() as usize]
    }

    pub fn build_time(&self) -> Duration {
        self.build_time
    }
}

impl<T> Default for Bvh<T> {
    fn default() -> Self {
        Self {
            nodes: Default::default(),
            objects: Default::default(),
            build_time: Default::default(),
        }
    }
}
