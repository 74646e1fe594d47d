//! Geometry primitives: points, vectors, footprints, prisms.
pub mod footprint;
pub mod hull;
pub mod mesh;
pub mod point;
pub mod prism;
pub mod triangles;
pub mod vector;

/// Geometric precision
pub const EPS: f64 = 1e-10;
