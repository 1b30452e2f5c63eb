//! Simplicial mesh datastructure for working with topology and geometry.
//!
//! - Container for mesh entities (simplices) with global numbering.
//! - Incidence information (subsimplices, parent cells, boundary).
//! - Geometric information (coordinates, volumes, barycentric differentials).

pub mod cartesian;
pub mod complex;
pub mod coords;
pub mod simplex;
pub mod skeleton;

pub type VertexIdx = usize;
pub type KSimplexIdx = usize;
pub type CellIdx = usize;
