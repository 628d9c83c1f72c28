//! Mesh geometry contract.
//!
//! The mesh is an external asset: an interleaved vertex table (position + UV per
//! vertex), an optional 32-bit index table, and the layout constants describing
//! them. This module validates that contract and derives the draw call from it;
//! it never generates geometry at runtime.

mod cube;
mod descriptor;

pub use cube::{CUBE, CUBE_INDICES, CUBE_LAYOUT, CUBE_VERTEX_COUNT, CUBE_VERTICES};
pub use descriptor::{Geometry, GeometryError, VertexLayout};
