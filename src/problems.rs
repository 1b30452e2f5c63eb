//! Solvers for the prototypical scalar PDE problems.

pub mod heat;
pub mod poisson;
