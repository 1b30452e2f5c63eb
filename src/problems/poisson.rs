//! Module for the Poisson Equation, the prototypical elliptic PDE.

use crate::{
  assemble,
  fe::{DofIdx, Element, FeFunction},
  linalg::{CsrMatrix, FaerCholesky},
  mesh::{complex::Complex, coords::CoordRef, coords::MeshCoords},
};

pub fn solve_poisson<B, S>(
  topology: &Complex,
  coords: &MeshCoords,
  element: Element,
  source_data: S,
  boundary_data: B,
) -> FeFunction
where
  B: Fn(DofIdx) -> f64,
  S: Fn(CoordRef) -> f64 + Sync,
{
  let dim = topology.dim();

  let mut galmat =
    assemble::assemble_galmat(topology, coords, element.laplace_elmat(dim).as_ref());
  let mut galvec =
    assemble::assemble_galvec(topology, coords, element.source_elvec(dim, source_data).as_ref());

  assemble::enforce_dirichlet_bc(topology, element, boundary_data, &mut galmat, &mut galvec);

  FaerCholesky::new(CsrMatrix::from(&galmat)).solve(&galvec)
}
