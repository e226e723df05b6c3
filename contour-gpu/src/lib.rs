//! Structured-buffer records shared by contour's CPU side and its shaders.
//!
//! Every record here is `#[repr(C)]` and uploaded verbatim, so field order
//! and size are part of the contract; each one also knows how to pack
//! itself into (and out of) `Vec4`s for texture- or `vec4`-based buffers.

#![allow(clippy::len_without_is_empty)]

mod bvh_node;
mod bvh_traversal;
mod cluster;
mod line_bvh_view;
mod segment;
mod triangle;
mod triangle_bvh_view;
mod utils;

pub use self::bvh_node::*;
pub use self::bvh_traversal::*;
pub use self::cluster::*;
pub use self::line_bvh_view::*;
pub use self::segment::*;
pub use self::triangle::*;
pub use self::triangle_bvh_view::*;
pub use self::utils::*;

/// Number of level-of-detail slots carried by each cluster.
pub const LOD_LEVELS: usize = 8;

/// Maximum stack size when traversing the BVH.
///
/// Affects the maximum depth of a traversable tree (it must not grow deeper
/// than `BVH_STACK_SIZE - 1` levels).
pub const BVH_STACK_SIZE: usize = 64;

/// Index used in place of a child or payload pointer that doesn't exist.
pub const INVALID_IDX: i32 = -1;
