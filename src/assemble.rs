//! Assembly of Galerkin matrices and vectors and the enforcement of
//! Dirichlet boundary conditions.

use crate::{
  fe::{DofCoeff, DofIdx, ElMatProvider, ElVecProvider, Element},
  linalg::{CooMatrixExt, CsrMatrix, Vector},
  mesh::{complex::Complex, coords::MeshCoords, coords::SimplexCoords},
  util,
};

use itertools::Itertools;
use rayon::prelude::*;

pub type GalMat = nas::CooMatrix<f64>;
pub type GalVec = Vector;

/// Assembly algorithm for the Galerkin Matrix.
pub fn assemble_galmat(
  topology: &Complex,
  coords: &MeshCoords,
  elmat: &dyn ElMatProvider,
) -> GalMat {
  let row_grade = elmat.row_grade();
  let col_grade = elmat.col_grade();

  let nsimps_row = topology.nsimplices(row_grade);
  let nsimps_col = topology.nsimplices(col_grade);

  let triplets: Vec<(usize, usize, f64)> = topology
    .cells()
    .keys()
    .par_bridge()
    .flat_map(|cell| {
      let geo = SimplexCoords::from_simplex_and_coords(cell, coords);
      let elmat = elmat.eval(&geo);

      let row_dofs = topology.subsimp_idxs(cell, row_grade);
      let col_dofs = topology.subsimp_idxs(cell, col_grade);

      let mut local_triplets = Vec::new();
      for (ilocal, &iglobal) in row_dofs.iter().enumerate() {
        for (jlocal, &jglobal) in col_dofs.iter().enumerate() {
          let val = elmat[(ilocal, jlocal)];
          if val != 0.0 {
            local_triplets.push((iglobal, jglobal, val));
          }
        }
      }

      local_triplets
    })
    .collect();

  let (rows, cols, values) = triplets.into_iter().multiunzip();
  GalMat::try_from_triplets(nsimps_row, nsimps_col, rows, cols, values).unwrap()
}

/// Assembly algorithm for the Galerkin Vector.
pub fn assemble_galvec(
  topology: &Complex,
  coords: &MeshCoords,
  elvec: &dyn ElVecProvider,
) -> GalVec {
  let grade = elvec.grade();
  let nsimps = topology.nsimplices(grade);

  let entries: Vec<(usize, f64)> = topology
    .cells()
    .keys()
    .par_bridge()
    .flat_map(|cell| {
      let geo = SimplexCoords::from_simplex_and_coords(cell, coords);
      let elvec = elvec.eval(&geo);

      let dofs = topology.subsimp_idxs(cell, grade);

      let mut local_entries = Vec::new();
      for (ilocal, &iglobal) in dofs.iter().enumerate() {
        if elvec[ilocal] != 0.0 {
          local_entries.push((iglobal, elvec[ilocal]));
        }
      }

      local_entries
    })
    .collect();

  let mut galvec = Vector::zeros(nsimps);
  for (irow, val) in entries {
    galvec[irow] += val;
  }

  galvec
}

/// The DOFs of the given element that lie on the mesh boundary.
pub fn boundary_dofs(topology: &Complex, element: Element) -> Vec<DofIdx> {
  topology.boundary_simplices(element.grade(topology.dim()))
}

pub fn enforce_homogeneous_dirichlet_bc(
  topology: &Complex,
  element: Element,
  galmat: &mut GalMat,
  galvec: &mut GalVec,
) {
  let dofs = boundary_dofs(topology, element);
  fix_dofs_zero(&dofs, galmat, galvec);
}

pub fn enforce_dirichlet_bc<F>(
  topology: &Complex,
  element: Element,
  boundary_coeff_map: F,
  galmat: &mut GalMat,
  galvec: &mut GalVec,
) where
  F: Fn(DofIdx) -> DofCoeff,
{
  let dof_coeffs: Vec<_> = boundary_dofs(topology, element)
    .into_iter()
    .map(|idof| (idof, boundary_coeff_map(idof)))
    .collect();

  fix_dofs_coeff(&dof_coeffs, galmat, galvec);
}

pub fn fix_dofs_zero(dofs: &[DofIdx], galmat: &mut GalMat, galvec: &mut GalVec) {
  let ndofs = galmat.nrows();
  let dof_flags = util::indicies_to_flags(dofs, ndofs);
  galmat.set_zero(|i, j| dof_flags[i] || dof_flags[j]);
  for &idof in dofs {
    galmat.push(idof, idof, 1.0);
    galvec[idof] = 0.0;
  }
}

/// Fix DOFs of the FE solution to the given coefficients.
///
/// Modifies the supplied Galerkin matrix and vector,
/// such that the FE solution attains the given coefficients on the DOFs.
/// $mat(A_0, 0; 0, I) vec(mu_0, mu_diff) = vec(phi - A_(0 diff) gamma, gamma)$
pub fn fix_dofs_coeff(
  dof_coeffs: &[(DofIdx, DofCoeff)],
  galmat: &mut GalMat,
  galvec: &mut GalVec,
) {
  fix_rhs_coeff(dof_coeffs, &CsrMatrix::from(&*galmat), galvec);
  fix_galmat_coeff(dof_coeffs, galmat);
}

/// The matrix half of [`fix_dofs_coeff`].
///
/// Zeroes out the rows and columns of the fixed DOFs and puts a one on
/// their diagonal. Separately available since in time stepping the
/// system matrix is fixed once, while the right hand side must be fixed
/// against the unmodified matrix in every step.
pub fn fix_galmat_coeff(dof_coeffs: &[(DofIdx, DofCoeff)], galmat: &mut GalMat) {
  let ndofs = galmat.nrows();
  let dofs: Vec<_> = dof_coeffs.iter().map(|&(i, _)| i).collect();
  let dof_flags = util::indicies_to_flags(&dofs, ndofs);

  galmat.set_zero(|r, c| dof_flags[r] || dof_flags[c]);
  for &(i, _) in dof_coeffs {
    galmat.push(i, i, 1.0);
  }
}

/// The right hand side half of [`fix_dofs_coeff`].
///
/// Expects the unmodified system matrix, since the elimination of the
/// fixed DOFs moves their coupling terms onto the right hand side.
pub fn fix_rhs_coeff(
  dof_coeffs: &[(DofIdx, DofCoeff)],
  galmat: &CsrMatrix,
  galvec: &mut GalVec,
) {
  let ndofs = galvec.len();

  let dof_coeffs_opt = util::sparse_to_dense_data(dof_coeffs.to_vec(), ndofs);
  let dof_coeffs_zeroed =
    Vector::from_iterator(ndofs, dof_coeffs_opt.iter().map(|v| v.unwrap_or(0.0)));

  *galvec -= galmat * dof_coeffs_zeroed;

  // Set galvec to the prescribed coefficients.
  dof_coeffs.iter().for_each(|&(i, v)| galvec[i] = v);
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{
    fe::{interpolate, Element, LaplaceElmat, ScalarMassElmat, SourceElvec},
    linalg::CsrMatrix,
    mesh::cartesian::CartesianMesh,
  };

  #[test]
  fn galmat_is_symmetric() {
    let (topology, coords) = CartesianMesh::new_unit(2, 4).compute_coord_complex();
    for elmat in [
      Element::Lagrange.laplace_elmat(2),
      Element::Lagrange.mass_elmat(2),
      Element::CrouzeixRaviart.laplace_elmat(2),
      Element::CrouzeixRaviart.mass_elmat(2),
    ] {
      let galmat = CsrMatrix::from(&assemble_galmat(&topology, &coords, elmat.as_ref()));
      let diff = &galmat - &galmat.transpose();
      assert!(diff.values().iter().all(|&v| v.abs() <= 1e-12));
    }
  }

  #[test]
  fn galmat_laplace_annihilates_constants() {
    let (topology, coords) = CartesianMesh::new_unit(2, 4).compute_coord_complex();
    for element in [Element::Lagrange, Element::CrouzeixRaviart] {
      let elmat = element.laplace_elmat(2);
      let galmat = CsrMatrix::from(&assemble_galmat(&topology, &coords, elmat.as_ref()));
      let constant = Vector::from_element(galmat.ncols(), 1.0);
      assert!((galmat * constant).norm() <= 1e-12);
    }
  }

  #[test]
  fn galvec_of_unit_source_integrates_to_one() {
    let (topology, coords) = CartesianMesh::new_unit(2, 4).compute_coord_complex();
    for element in [Element::Lagrange, Element::CrouzeixRaviart] {
      let elvec = element.source_elvec(2, |_| 1.0);
      let galvec = assemble_galvec(&topology, &coords, elvec.as_ref());
      // The basis functions form a partition of unity.
      assert!((galvec.sum() - 1.0).abs() <= 1e-12);
    }
  }

  #[test]
  fn fixed_dofs_attain_their_coefficients() {
    let (topology, coords) = CartesianMesh::new_unit(2, 2).compute_coord_complex();
    let mut galmat = assemble_galmat(&topology, &coords, &LaplaceElmat);
    let mut galvec = assemble_galvec(&topology, &coords, &SourceElvec::new(|_| 1.0));

    let boundary_values = interpolate(&topology, &coords, 0, |p| p[0]);
    enforce_dirichlet_bc(
      &topology,
      Element::Lagrange,
      |idof| boundary_values[idof],
      &mut galmat,
      &mut galvec,
    );

    let galmat = CsrMatrix::from(&galmat);
    let sol = crate::linalg::FaerLu::new(galmat).solve(&galvec);
    for idof in boundary_dofs(&topology, Element::Lagrange) {
      assert!((sol[idof] - boundary_values[idof]).abs() <= 1e-9);
    }
  }

  #[test]
  fn homogeneous_fix_matches_zero_coefficients() {
    let (topology, coords) = CartesianMesh::new_unit(2, 2).compute_coord_complex();
    let galmat = assemble_galmat(&topology, &coords, &LaplaceElmat);
    let galvec = assemble_galvec(&topology, &coords, &SourceElvec::new(|_| 1.0));

    let mut zeroed_mat = galmat.clone();
    let mut zeroed_vec = galvec.clone();
    enforce_homogeneous_dirichlet_bc(&topology, Element::Lagrange, &mut zeroed_mat, &mut zeroed_vec);

    let mut coeff_mat = galmat.clone();
    let mut coeff_vec = galvec.clone();
    enforce_dirichlet_bc(
      &topology,
      Element::Lagrange,
      |_| 0.0,
      &mut coeff_mat,
      &mut coeff_vec,
    );

    assert!((zeroed_vec - coeff_vec).norm() <= 1e-12);
    let diff = CsrMatrix::from(&zeroed_mat) - CsrMatrix::from(&coeff_mat);
    assert!(diff.values().iter().all(|&v| v.abs() <= 1e-12));
  }

  #[test]
  fn split_fix_matches_combined_fix() {
    let (topology, coords) = CartesianMesh::new_unit(2, 2).compute_coord_complex();
    let galmat = assemble_galmat(&topology, &coords, &ScalarMassElmat);
    let galvec = assemble_galvec(&topology, &coords, &SourceElvec::new(|p| p[0] + p[1]));

    let dof_coeffs: Vec<_> = boundary_dofs(&topology, Element::Lagrange)
      .into_iter()
      .map(|idof| (idof, 1.0))
      .collect();

    let mut combined_mat = galmat.clone();
    let mut combined_vec = galvec.clone();
    fix_dofs_coeff(&dof_coeffs, &mut combined_mat, &mut combined_vec);

    let mut split_mat = galmat.clone();
    let mut split_vec = galvec.clone();
    fix_rhs_coeff(&dof_coeffs, &CsrMatrix::from(&galmat), &mut split_vec);
    fix_galmat_coeff(&dof_coeffs, &mut split_mat);

    assert!((combined_vec - split_vec).norm() <= 1e-12);
    let diff = CsrMatrix::from(&combined_mat) - CsrMatrix::from(&split_mat);
    assert!(diff.values().iter().all(|&v| v.abs() <= 1e-12));
  }
}
