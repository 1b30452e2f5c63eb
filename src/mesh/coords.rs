use super::{
  simplex::{factorial, Simplex},
  VertexIdx,
};
use crate::{
  linalg::{Matrix, Vector},
  Dim,
};

pub type Coord = Vector;
pub type CoordRef<'a> = na::DVectorView<'a, f64>;

/// The coordinates of all mesh vertices, one column per vertex.
#[derive(Debug, Clone)]
pub struct MeshCoords {
  matrix: Matrix,
}

impl MeshCoords {
  pub fn new(matrix: Matrix) -> Self {
    Self { matrix }
  }

  pub fn dim(&self) -> Dim {
    self.matrix.nrows()
  }
  pub fn nvertices(&self) -> usize {
    self.matrix.ncols()
  }
  pub fn matrix(&self) -> &Matrix {
    &self.matrix
  }

  pub fn coord(&self, ivertex: VertexIdx) -> CoordRef {
    self.matrix.column(ivertex)
  }
  pub fn coord_iter(&self) -> impl Iterator<Item = CoordRef> {
    self.matrix.column_iter()
  }
}

/// A simplex given through the coordinates of its vertices.
#[derive(Debug, Clone)]
pub struct SimplexCoords {
  pub vertices: Matrix,
}

impl SimplexCoords {
  pub fn new(vertices: Matrix) -> Self {
    Self { vertices }
  }
  pub fn standard(dim: Dim) -> Self {
    let nvertices = dim + 1;
    let mut vertices = Matrix::zeros(dim, nvertices);
    for i in 0..dim {
      vertices[(i, i + 1)] = 1.0;
    }
    Self::new(vertices)
  }
  pub fn from_simplex_and_coords(simp: &Simplex, coords: &MeshCoords) -> Self {
    let mut vertices = Matrix::zeros(coords.dim(), simp.nvertices());
    for (i, v) in simp.iter().enumerate() {
      vertices.set_column(i, &coords.coord(v));
    }
    Self::new(vertices)
  }

  pub fn nvertices(&self) -> usize {
    self.vertices.ncols()
  }
  pub fn dim_intrinsic(&self) -> Dim {
    self.nvertices() - 1
  }
  pub fn dim_ambient(&self) -> Dim {
    self.vertices.nrows()
  }
  pub fn is_same_dim(&self) -> bool {
    self.dim_intrinsic() == self.dim_ambient()
  }

  pub fn coord(&self, ivertex: usize) -> CoordRef {
    self.vertices.column(ivertex)
  }
  pub fn base_vertex(&self) -> CoordRef {
    self.coord(0)
  }

  /// The edge vectors from the base vertex to all other vertices,
  /// one column per spanning direction.
  pub fn spanning_vectors(&self) -> Matrix {
    let mut mat = Matrix::zeros(self.dim_ambient(), self.dim_intrinsic());
    let v0 = self.base_vertex();
    for (i, vi) in self.vertices.column_iter().skip(1).enumerate() {
      let v0i = vi - v0;
      mat.set_column(i, &v0i);
    }
    mat
  }

  pub fn det(&self) -> f64 {
    let spanning = self.spanning_vectors();
    let det = if self.is_same_dim() {
      spanning.determinant()
    } else {
      (spanning.transpose() * &spanning).determinant().sqrt()
    };
    refsimp_vol(self.dim_intrinsic()) * det
  }
  pub fn vol(&self) -> f64 {
    self.det().abs()
  }

  /// Total differentials of the barycentric coordinate functions,
  /// one row(!) per vertex.
  pub fn difbarys(&self) -> Matrix {
    let difs = self
      .spanning_vectors()
      .pseudo_inverse(1e-12)
      .expect("Simplex is degenerate.");
    let mut difs = difs.insert_row(0, 0.0);
    difs.set_row(0, &-difs.row_sum());
    difs
  }

  pub fn barycenter(&self) -> Coord {
    let mut barycenter = Vector::zeros(self.dim_ambient());
    self.vertices.column_iter().for_each(|v| barycenter += v);
    barycenter /= self.nvertices() as f64;
    barycenter
  }
}

/// The volume of the reference simplex.
pub fn refsimp_vol(dim: Dim) -> f64 {
  (factorial(dim) as f64).recip()
}
