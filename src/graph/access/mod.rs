//! Low-level per-vertex building blocks shared by the graph store and the cycle engine.

pub mod mask;

pub use mask::VertexMask;
