use super::{complex::Complex, coords::MeshCoords, simplex::factorial, simplex::Simplex,
  skeleton::Skeleton};
use crate::{
  linalg::{Matrix, Vector},
  Dim,
};

use itertools::Itertools;

/// converts linear index in 0..dim_len^d to cartesian index in (0)^d..(dim_len)^d
pub fn linear_index2cartesian_index(
  mut lin_idx: usize,
  dim_len: usize,
  dim: usize,
) -> na::DVector<usize> {
  let mut cart_idx = na::DVector::zeros(dim);
  for icomp in 0..dim {
    cart_idx[icomp] = lin_idx % dim_len;
    lin_idx /= dim_len;
  }
  cart_idx
}

/// converts cartesian index in (0)^d..(dim_len)^d to linear index in 0..dim_len^d
pub fn cartesian_index2linear_index(cart_idx: na::DVector<usize>, dim_len: usize) -> usize {
  let dim = cart_idx.len();
  let mut lin_idx = 0;
  for icomp in (0..dim).rev() {
    lin_idx *= dim_len;
    lin_idx += cart_idx[icomp];
  }
  lin_idx
}

pub struct Rect {
  min: Vector,
  max: Vector,
}

impl Rect {
  pub fn new_min_max(min: Vector, max: Vector) -> Self {
    assert!(min.len() == max.len());
    Self { min, max }
  }
  pub fn new_unit_cube(dim: Dim) -> Self {
    let min = Vector::zeros(dim);
    let max = Vector::from_element(dim, 1.0);
    Self { min, max }
  }

  pub fn dim(&self) -> usize {
    self.min.len()
  }
  pub fn min(&self) -> &Vector {
    &self.min
  }
  pub fn side_lengths(&self) -> Vector {
    &self.max - &self.min
  }
}

/// An axis-aligned box, triangulated into `d! n^d` simplices.
pub struct CartesianMesh {
  rect: Rect,
  ncells_axis: usize,
}
// constructors
impl CartesianMesh {
  pub fn new_min_max(min: Vector, max: Vector, ncells_axis: usize) -> Self {
    let rect = Rect::new_min_max(min, max);
    Self { rect, ncells_axis }
  }
  pub fn new_unit(dim: Dim, ncells_axis: usize) -> Self {
    let rect = Rect::new_unit_cube(dim);
    Self { rect, ncells_axis }
  }
}
// getters
impl CartesianMesh {
  pub fn dim(&self) -> usize {
    self.rect.dim()
  }
  pub fn ncells_axis(&self) -> usize {
    self.ncells_axis
  }
  pub fn nvertices_axis(&self) -> usize {
    self.ncells_axis + 1
  }
  pub fn nboxes(&self) -> usize {
    self.ncells_axis.pow(self.dim() as u32)
  }
  pub fn nvertices(&self) -> usize {
    self.nvertices_axis().pow(self.dim() as u32)
  }

  pub fn vertex_cart_idx(&self, ivertex: usize) -> na::DVector<usize> {
    linear_index2cartesian_index(ivertex, self.nvertices_axis(), self.dim())
  }
  pub fn vertex_pos(&self, ivertex: usize) -> Vector {
    (self.vertex_cart_idx(ivertex).cast::<f64>() / (self.nvertices_axis() - 1) as f64)
      .component_mul(&self.rect.side_lengths())
      + self.rect.min()
  }

  pub fn is_vertex_on_boundary(&self, ivertex: usize) -> bool {
    self
      .vertex_cart_idx(ivertex)
      .iter()
      .any(|&c| c == 0 || c == self.nvertices_axis() - 1)
  }
  pub fn boundary_vertices(&self) -> Vec<usize> {
    (0..self.nvertices())
      .filter(|&ivertex| self.is_vertex_on_boundary(ivertex))
      .collect()
  }
}

impl CartesianMesh {
  pub fn compute_coord_complex(&self) -> (Complex, MeshCoords) {
    let (skeleton, coords) = self.compute_coord_cells();
    let complex = Complex::from_cells(skeleton);
    (complex, coords)
  }
  pub fn compute_coord_cells(&self) -> (Skeleton, MeshCoords) {
    let skeleton = self.compute_cell_skeleton();
    let coords = self.compute_vertex_coords();
    (skeleton, coords)
  }
  pub fn compute_vertex_coords(&self) -> MeshCoords {
    let mut coords = Matrix::zeros(self.dim(), self.nvertices());
    for (ivertex, mut coord) in coords.column_iter_mut().enumerate() {
      coord.copy_from(&self.vertex_pos(ivertex));
    }
    MeshCoords::new(coords)
  }

  pub fn compute_cell_skeleton(&self) -> Skeleton {
    let nboxes = self.nboxes();
    let nboxes_axis = self.ncells_axis();

    let dim = self.dim();
    let nsimplices = factorial(dim) * nboxes;
    let mut simplices: Vec<Simplex> = Vec::with_capacity(nsimplices);

    // iterate through all boxes that make up the mesh
    for ibox in 0..nboxes {
      let cube_icart = linear_index2cartesian_index(ibox, nboxes_axis, self.dim());

      let vertex_icart_origin = cube_icart;
      let ivertex_origin =
        cartesian_index2linear_index(vertex_icart_origin.clone(), self.nvertices_axis());

      // Construct all $d!$ simplices that make up the current box.
      // Each permutation of the basis directions (dimensions) gives rise to one simplex.
      let cube_simplices = (0..dim).permutations(dim).map(|basisdirs| {
        // Construct simplex by adding all shifted vertices.
        let mut simplex = vec![ivertex_origin];

        // Add every shift (according to permutation) to vertex iteratively.
        // Every shift step gives us one vertex.
        let mut vertex_icart = vertex_icart_origin.clone();
        for &basisdir in basisdirs.iter() {
          vertex_icart[basisdir] += 1;

          let ivertex = cartesian_index2linear_index(vertex_icart.clone(), self.nvertices_axis());
          simplex.push(ivertex);
        }

        Simplex::new(simplex)
      });

      simplices.extend(cube_simplices);
    }

    Skeleton::new(simplices)
  }
}
