/// Strategy used to split a set of primitives into two halves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BvhBuildStrategy {
    /// Binned surface-area heuristic; falls back to [`Self::Middle`]
    /// whenever it can't find a plane that separates the primitives.
    #[default]
    Sah,

    /// Median split along the longest axis.
    Middle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BvhBuildConfig {
    pub strategy: BvhBuildStrategy,

    /// Advisory; each leaf owns exactly one payload item (a cluster or a
    /// triangle) regardless of this value.
    pub leaf_primitive_limit: u32,

    /// Recursion depth past which primitives stop being split spatially
    /// and get halved by position instead.
    ///
    /// The builder lowers it further when needed, so that no leaf ends up
    /// deeper than [`crate::gpu::BVH_STACK_SIZE`] - 1.
    pub max_depth: u32,

    /// Not supported yet - construction always runs on a single thread.
    pub enable_parallel_build: bool,

    /// Upper bound on the number of segments grouped into one cluster.
    pub max_segments_per_cluster: usize,

    /// Whether clusters get their coarser levels of detail generated.
    pub generate_lods: bool,
}

impl BvhBuildConfig {
    pub const DEFAULT_MAX_SEGMENTS_PER_CLUSTER: usize = 128;

    pub fn with_strategy(mut self, strategy: BvhBuildStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_lods(mut self, generate_lods: bool) -> Self {
        self.generate_lods = generate_lods;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_segments_per_cluster(mut self, max: usize) -> Self {
        self.max_segments_per_cluster = max;
        self
    }

    pub(crate) fn sanitized(&self) -> Self {
        if self.enable_parallel_build {
            log::warn!(
                "Parallel BVH construction is not supported; building on a \
                 single thread"
            );
        }

        Self {
            strategy: self.strategy,
            leaf_primitive_limit: self.leaf_primitive_limit.max(1),
            max_depth: self.max_depth,
            enable_parallel_build: false,
            max_segments_per_cluster: self.max_segments_per_cluster.max(1),
            generate_lods: self.generate_lods,
        }
    }
}

impl Default for BvhBuildConfig {
    fn default() -> Self {
        Self {
            strategy: Default::default(),
            leaf_primitive_limit: 8,
            max_depth: 64,
            enable_parallel_build: false,
            max_segments_per_cluster: Self::DEFAULT_MAX_SEGMENTS_PER_CLUSTER,
            generate_lods: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized() {
        let target = BvhBuildConfig {
            leaf_primitive_limit: 0,
            enable_parallel_build: true,
            max_segments_per_cluster: 0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(1, target.leaf_primitive_limit);
        assert!(!target.enable_parallel_build);
        assert_eq!(1, target.max_segments_per_cluster);
    }
}
