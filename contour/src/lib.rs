//! Bounding volume hierarchies over polygon outlines and triangle fans,
//! flattened into GPU-friendly buffers and queryable for point distances.

mod bvh;
mod cluster;
mod config;
mod error;
mod geometry;
mod gpu_data;
mod polygon;
mod segment;
mod surface;
mod triangle;
mod utils;

pub use contour_gpu as gpu;

pub use self::bvh::*;
pub use self::cluster::*;
pub use self::config::*;
pub use self::error::*;
pub use self::geometry::*;
pub use self::gpu_data::*;
pub use self::polygon::*;
pub use self::segment::*;
pub use self::surface::*;
pub use self::triangle::*;
pub use self::utils::*;
