use std::fmt::Write;

use super::{Bvh, BvhNode, BvhNodeId};

/// Renders trees as Graphviz `digraph`s - handy for eyeballing how a
/// strategy splits given geometry.
pub struct BvhPrinter;

impl BvhPrinter {
    pub fn print<T>(bvh: &Bvh<T>) -> String {
        let mut out = String::new();

        _ = writeln!(&mut out, "digraph {{");

        if let Some(root) = bvh.root() {
            Self::process(&mut out, bvh, root);
        }

        _ = writeln!(&mut out, "}}");

        out
    }

    fn process<T>(out: &mut String, bvh: &Bvh<T>, id: BvhNodeId) {
        match bvh.nodes()[id] {
            BvhNode::Internal {
                bounds,
                left_id,
                right_id,
            } => {
                _ = writeln!(
                    out,
                    "  n{} [label=\"node({} : {})\"]",
                    id.get(),
                    bounds.min(),
                    bounds.max()
                );

                for child_id in [left_id, right_id] {
                    Self::process(out, bvh, child_id);

                    _ = writeln!(out, "  n{} -> n{}", id.get(), child_id.get());
                }
            }

            BvhNode::Leaf { object_id, .. } => {
                _ = writeln!(
                    out,
                    "  n{} [label=\"leaf({})\"]",
                    id.get(),
                    object_id.get()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::BoundingBox;

    #[test]
    fn print() {
        let objects = vec![
            BoundingBox::new(Vec3::ZERO, Vec3::ONE),
            BoundingBox::new(Vec3::splat(5.0), Vec3::splat(6.0)),
        ];

        let target = BvhPrinter::print(&Bvh::build(objects, &Default::default()));

        assert!(target.starts_with("digraph {\n"));
        assert!(target.ends_with("}\n"));
        assert!(target.contains("n0 -> n1"));
        assert!(target.contains("n0 -> n2"));
        assert!(target.contains("leaf(0)"));
        assert!(target.contains("leaf(1)"));
    }

    #[test]
    fn print_empty() {
        let target = BvhPrinter::print(&Bvh::<BoundingBox>::default());

        assert_eq!("digraph {\n}\n", target);
    }
}
