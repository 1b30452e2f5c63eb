//! Element matrix and element vector providers.
//!
//! A provider evaluates the local contribution of a bilinear or linear
//! form on a single cell. The grade of a provider determines on which
//! skeleton of the mesh complex its DOFs live.
//!
//! Two scalar finite element families are supported.
//! - Lagrange: grade 0, DOFs on the vertices.
//! - Crouzeix-Raviart: grade $d-1$, DOFs on the facet midpoints.

use crate::{
  linalg::{Matrix, Vector},
  mesh::{
    complex::Complex,
    coords::{CoordRef, MeshCoords, SimplexCoords},
  },
  Dim,
};

pub type DofIdx = usize;
pub type DofCoeff = f64;

/// Coefficient vector of a FE function w.r.t. the DOF basis.
pub type FeFunction = Vector;

pub type ElMat = Matrix;
pub trait ElMatProvider: Sync {
  fn row_grade(&self) -> Dim;
  fn col_grade(&self) -> Dim;
  fn eval(&self, cell: &SimplexCoords) -> ElMat;
}

pub type ElVec = Vector;
pub trait ElVecProvider: Sync {
  fn grade(&self) -> Dim;
  fn eval(&self, cell: &SimplexCoords) -> ElVec;
}

/// The scalar finite element families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
  Lagrange,
  CrouzeixRaviart,
}
impl Element {
  /// The skeleton dimension on which the DOFs of this element live.
  pub fn grade(self, dim: Dim) -> Dim {
    match self {
      Self::Lagrange => 0,
      Self::CrouzeixRaviart => dim - 1,
    }
  }

  pub fn laplace_elmat(self, dim: Dim) -> Box<dyn ElMatProvider> {
    match self {
      Self::Lagrange => Box::new(LaplaceElmat),
      Self::CrouzeixRaviart => Box::new(CrLaplaceElmat::new(dim)),
    }
  }
  pub fn mass_elmat(self, dim: Dim) -> Box<dyn ElMatProvider> {
    match self {
      Self::Lagrange => Box::new(ScalarMassElmat),
      Self::CrouzeixRaviart => Box::new(CrMassElmat::new(dim)),
    }
  }
  pub fn source_elvec<'a, F>(self, dim: Dim, source: F) -> Box<dyn ElVecProvider + 'a>
  where
    F: Fn(CoordRef) -> f64 + Sync + 'a,
  {
    match self {
      Self::Lagrange => Box::new(SourceElvec::new(source)),
      Self::CrouzeixRaviart => Box::new(CrSourceElvec::new(dim, source)),
    }
  }
}

/// Exact Element Matrix Provider for the Laplacian w.r.t. Lagrange elements.
///
/// $A = [integral_K dif lambda_j dot dif lambda_i dif x]_(i j)$
pub struct LaplaceElmat;
impl ElMatProvider for LaplaceElmat {
  fn row_grade(&self) -> Dim {
    0
  }
  fn col_grade(&self) -> Dim {
    0
  }
  fn eval(&self, cell: &SimplexCoords) -> ElMat {
    let difbarys = cell.difbarys();
    cell.vol() * &difbarys * difbarys.transpose()
  }
}

/// Exact Element Matrix Provider for the scalar mass bilinear form
/// w.r.t. Lagrange elements.
pub struct ScalarMassElmat;
impl ElMatProvider for ScalarMassElmat {
  fn row_grade(&self) -> Dim {
    0
  }
  fn col_grade(&self) -> Dim {
    0
  }
  fn eval(&self, cell: &SimplexCoords) -> ElMat {
    let ndofs = cell.nvertices();
    let dim = cell.dim_intrinsic();
    let v = cell.vol() / ((dim + 1) * (dim + 2)) as f64;
    let mut elmat = Matrix::from_element(ndofs, ndofs, v);
    elmat.fill_diagonal(2.0 * v);
    elmat
  }
}

/// Approximated Element Matrix Provider for the scalar mass bilinear form,
/// obtained through the trapezoidal quadrature rule.
pub struct ScalarLumpedMassElmat;
impl ElMatProvider for ScalarLumpedMassElmat {
  fn row_grade(&self) -> Dim {
    0
  }
  fn col_grade(&self) -> Dim {
    0
  }
  fn eval(&self, cell: &SimplexCoords) -> ElMat {
    let ndofs = cell.nvertices();
    let v = cell.vol() / ndofs as f64;
    Matrix::from_diagonal_element(ndofs, ndofs, v)
  }
}

/// Element Vector Provider for a scalar source function w.r.t. Lagrange
/// elements.
///
/// Computed using the trapezoidal quadrature rule.
/// Exact for constant sources.
pub struct SourceElvec<F> {
  source: F,
}
impl<F> SourceElvec<F>
where
  F: Fn(CoordRef) -> f64,
{
  pub fn new(source: F) -> Self {
    Self { source }
  }
}
impl<F> ElVecProvider for SourceElvec<F>
where
  F: Fn(CoordRef) -> f64 + Sync,
{
  fn grade(&self) -> Dim {
    0
  }
  fn eval(&self, cell: &SimplexCoords) -> ElVec {
    let nverts = cell.nvertices();
    cell.vol() / nverts as f64
      * Vector::from_iterator(
        nverts,
        cell.vertices.column_iter().map(|v| (self.source)(v)),
      )
  }
}

/// Exact Element Matrix Provider for the Laplacian w.r.t. the
/// nonconforming Crouzeix-Raviart element.
///
/// The CR basis function associated with the $i$-th facet is
/// $theta_i = 1 - n lambda_(o(i))$, where $o(i) = n - i$ is the local
/// vertex opposite the $i$-th facet in lexicographic order. Its gradient
/// is $-n dif lambda_(o(i))$, so the element matrix is the Lagrange one
/// under the opposite-vertex index map, scaled by $n^2$.
pub struct CrLaplaceElmat {
  dim: Dim,
}
impl CrLaplaceElmat {
  pub fn new(dim: Dim) -> Self {
    Self { dim }
  }
}
impl ElMatProvider for CrLaplaceElmat {
  fn row_grade(&self) -> Dim {
    self.dim - 1
  }
  fn col_grade(&self) -> Dim {
    self.dim - 1
  }
  fn eval(&self, cell: &SimplexCoords) -> ElMat {
    let dim = cell.dim_intrinsic();
    let lagrange = LaplaceElmat.eval(cell);
    let ndofs = dim + 1;
    let nsqr = (dim * dim) as f64;
    ElMat::from_fn(ndofs, ndofs, |i, j| {
      nsqr * lagrange[(dim - i, dim - j)]
    })
  }
}

/// Exact Element Matrix Provider for the scalar mass bilinear form
/// w.r.t. the Crouzeix-Raviart element.
///
/// In 2D this is the diagonal matrix $abs(K)/3 I$, so mass lumping
/// comes for free.
pub struct CrMassElmat {
  dim: Dim,
}
impl CrMassElmat {
  pub fn new(dim: Dim) -> Self {
    Self { dim }
  }
}
impl ElMatProvider for CrMassElmat {
  fn row_grade(&self) -> Dim {
    self.dim - 1
  }
  fn col_grade(&self) -> Dim {
    self.dim - 1
  }
  fn eval(&self, cell: &SimplexCoords) -> ElMat {
    let dim = cell.dim_intrinsic();
    let ndofs = dim + 1;
    let n = dim as f64;
    let scale = cell.vol() / ((dim + 1) * (dim + 2)) as f64;
    let offdiag = scale * (2.0 - n);
    let diag = scale * (n * n - n + 2.0);
    let mut elmat = Matrix::from_element(ndofs, ndofs, offdiag);
    elmat.fill_diagonal(diag);
    elmat
  }
}

/// Element Vector Provider for a scalar source function w.r.t. the
/// Crouzeix-Raviart element.
///
/// Computed using the facet midpoint quadrature rule, for which the CR
/// basis is nodal. Exact for linear sources.
pub struct CrSourceElvec<F> {
  dim: Dim,
  source: F,
}
impl<F> CrSourceElvec<F>
where
  F: Fn(CoordRef) -> f64,
{
  pub fn new(dim: Dim, source: F) -> Self {
    Self { dim, source }
  }
}
impl<F> ElVecProvider for CrSourceElvec<F>
where
  F: Fn(CoordRef) -> f64 + Sync,
{
  fn grade(&self) -> Dim {
    self.dim - 1
  }
  fn eval(&self, cell: &SimplexCoords) -> ElVec {
    let dim = cell.dim_intrinsic();
    let ndofs = dim + 1;
    let weight = cell.vol() / ndofs as f64;
    let mut vertex_sum = Vector::zeros(cell.dim_ambient());
    cell.vertices.column_iter().for_each(|v| vertex_sum += v);
    ElVec::from_fn(ndofs, |i, _| {
      let midpoint = (&vertex_sum - cell.coord(dim - i)) / dim as f64;
      weight * (self.source)(midpoint.as_view())
    })
  }
}

/// The coordinates of the DOF points of the given grade,
/// one column per DOF.
///
/// For grade 0 these are the mesh vertices themselves, for higher
/// grades the barycenters of the grade-simplices.
pub fn dof_coords(topology: &Complex, coords: &MeshCoords, grade: Dim) -> Matrix {
  let skeleton = topology.skeleton(grade);
  let mut dof_coords = Matrix::zeros(coords.dim(), skeleton.len());
  for (idof, simp) in skeleton.keys().enumerate() {
    let simp_coords = SimplexCoords::from_simplex_and_coords(simp, coords);
    dof_coords.set_column(idof, &simp_coords.barycenter());
  }
  dof_coords
}

/// Interpolate a coordinate function onto the DOFs of the given grade.
pub fn interpolate<F>(topology: &Complex, coords: &MeshCoords, grade: Dim, f: F) -> FeFunction
where
  F: Fn(CoordRef) -> f64,
{
  let dof_coords = dof_coords(topology, coords, grade);
  Vector::from_iterator(dof_coords.ncols(), dof_coords.column_iter().map(f))
}

/// Evaluate a FE function at the mesh vertices.
///
/// For Lagrange elements the coefficients already are vertex values.
/// For Crouzeix-Raviart the local basis expansion is evaluated at the
/// cell corners and averaged over all cells sharing a vertex, since the
/// nonconforming solution jumps across facets.
pub fn evaluate_at_vertices(topology: &Complex, element: Element, fe: &FeFunction) -> Vector {
  let dim = topology.dim();
  if element == Element::Lagrange {
    return fe.clone();
  }

  let mut values = Vector::zeros(topology.nvertices());
  let mut ncontributions = vec![0usize; topology.nvertices()];
  for cell in topology.cells().keys() {
    let dofs = topology.subsimp_idxs(cell, dim - 1);
    let dof_sum: f64 = dofs.iter().map(|&idof| fe[idof]).sum();
    for (lvertex, ivertex) in cell.iter().enumerate() {
      // theta_i(v_l) = 1 - n delta_(o(i) l)
      let value = dof_sum - dim as f64 * fe[dofs[dim - lvertex]];
      values[ivertex] += value;
      ncontributions[ivertex] += 1;
    }
  }
  for (value, n) in values.iter_mut().zip(ncontributions) {
    *value /= n as f64;
  }
  values
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::linalg::assert_mat_eq;

  use approx::assert_relative_eq;

  #[test]
  fn laplace_elmat_ref_triangle() {
    let cell = SimplexCoords::standard(2);
    let computed = LaplaceElmat.eval(&cell);
    let expected = na::dmatrix![
       1.0, -0.5, -0.5;
      -0.5,  0.5,  0.0;
      -0.5,  0.0,  0.5;
    ];
    assert_mat_eq(&computed, &expected, None);
  }

  #[test]
  fn laplace_elmat_rows_sum_to_zero() {
    for dim in 1..=3 {
      let cell = SimplexCoords::standard(dim);
      let elmat = LaplaceElmat.eval(&cell);
      for row in elmat.row_iter() {
        assert!(row.sum().abs() <= 1e-12);
      }
    }
  }

  #[test]
  fn mass_elmat_ref_triangle() {
    let cell = SimplexCoords::standard(2);
    let computed = ScalarMassElmat.eval(&cell);
    let v = cell.vol() / 12.0;
    let mut expected = Matrix::from_element(3, 3, v);
    expected.fill_diagonal(2.0 * v);
    assert_mat_eq(&computed, &expected, None);
  }

  #[test]
  fn mass_elmat_total_mass_is_volume() {
    for dim in 1..=3 {
      let cell = SimplexCoords::standard(dim);
      for elmat in [ScalarMassElmat.eval(&cell), ScalarLumpedMassElmat.eval(&cell)] {
        assert_relative_eq!(elmat.sum(), cell.vol(), epsilon = 1e-12);
      }
    }
  }

  #[test]
  fn cr_laplace_elmat_ref_triangle() {
    let cell = SimplexCoords::standard(2);
    let computed = CrLaplaceElmat::new(2).eval(&cell);
    let expected = na::dmatrix![
       2.0,  0.0, -2.0;
       0.0,  2.0, -2.0;
      -2.0, -2.0,  4.0;
    ];
    assert_mat_eq(&computed, &expected, None);
  }

  #[test]
  fn cr_mass_elmat_2d_is_lumped() {
    let cell = SimplexCoords::standard(2);
    let computed = CrMassElmat::new(2).eval(&cell);
    let expected = Matrix::from_diagonal_element(3, 3, cell.vol() / 3.0);
    assert_mat_eq(&computed, &expected, None);
  }

  #[test]
  fn cr_mass_elmat_total_mass_is_volume() {
    for dim in 2..=3 {
      let cell = SimplexCoords::standard(dim);
      let elmat = CrMassElmat::new(dim).eval(&cell);
      assert_relative_eq!(elmat.sum(), cell.vol(), epsilon = 1e-12);
    }
  }

  #[test]
  fn cr_source_elvec_constant_source() {
    let cell = SimplexCoords::standard(2);
    let computed = CrSourceElvec::new(2, |_| 1.0).eval(&cell);
    let expected = Vector::from_element(3, cell.vol() / 3.0);
    assert!((computed - expected).norm() <= 1e-12);
  }
}
