use super::VertexIdx;
use crate::Dim;

use itertools::Itertools;
use num_integer::binomial;

/// A simplex as a sorted set of global vertex indices.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Simplex {
  vertices: Vec<VertexIdx>,
}

impl Simplex {
  /// Vertices must be sorted and distinct.
  pub fn new(vertices: Vec<VertexIdx>) -> Self {
    assert!(
      vertices.windows(2).all(|w| w[0] < w[1]),
      "Simplex vertices must be sorted and distinct."
    );
    Self { vertices }
  }
  pub fn from_unsorted(mut vertices: Vec<VertexIdx>) -> Self {
    vertices.sort_unstable();
    Self::new(vertices)
  }
  pub fn standard(dim: Dim) -> Self {
    Self::new((0..=dim).collect())
  }

  pub fn vertices(&self) -> &[VertexIdx] {
    &self.vertices
  }
  pub fn iter(&self) -> impl Iterator<Item = VertexIdx> + '_ {
    self.vertices.iter().copied()
  }
  pub fn nvertices(&self) -> usize {
    self.vertices.len()
  }
  pub fn dim(&self) -> Dim {
    self.nvertices() - 1
  }

  /// The dim-subsimplices of this simplex in lexicographic order
  /// w.r.t. the local vertex indices.
  ///
  /// e.g. tet.subsimps(1) = [(0,1),(0,2),(0,3),(1,2),(1,3),(2,3)]
  pub fn subsimps(&self, sub_dim: Dim) -> impl Iterator<Item = Simplex> + '_ {
    self
      .vertices
      .iter()
      .copied()
      .combinations(sub_dim + 1)
      .map(Simplex::new)
  }
}

impl std::ops::Index<usize> for Simplex {
  type Output = VertexIdx;
  fn index(&self, i: usize) -> &Self::Output {
    &self.vertices[i]
  }
}

pub fn nsubsimplicies(dim_cell: Dim, dim_sub: Dim) -> usize {
  binomial(dim_cell + 1, dim_sub + 1)
}

pub fn factorial(num: usize) -> usize {
  (1..=num).product()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn subsimps_are_lexicographic() {
    let tet = Simplex::standard(3);
    let edges: Vec<_> = tet.subsimps(1).map(|s| s.vertices().to_vec()).collect();
    let expected = vec![
      vec![0, 1],
      vec![0, 2],
      vec![0, 3],
      vec![1, 2],
      vec![1, 3],
      vec![2, 3],
    ];
    assert_eq!(edges, expected);
    assert_eq!(edges.len(), nsubsimplicies(3, 1));
  }

  #[test]
  #[should_panic]
  fn unsorted_vertices_are_rejected() {
    Simplex::new(vec![1, 0]);
  }
}
