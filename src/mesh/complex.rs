use super::{simplex::Simplex, skeleton::Skeleton, CellIdx, KSimplexIdx, VertexIdx};
use crate::Dim;

use indexmap::IndexMap;
use itertools::Itertools;

/// A simplicial manifold complex.
///
/// Stores one indexed skeleton per dimension, together with the
/// parent-cell incidence of every simplex.
#[derive(Debug, Clone)]
pub struct Complex {
  skeletons: Vec<ComplexSkeleton>,
}
pub type ComplexSkeleton = IndexMap<Simplex, SimplexData>;

#[derive(Default, Debug, Clone)]
pub struct SimplexData {
  pub cocells: Vec<CellIdx>,
}

impl Complex {
  pub fn from_cells(cells: Skeleton) -> Self {
    let dim = cells.dim();
    assert!(dim >= 1, "Cells must be at least 1-dimensional.");

    let mut skeletons = vec![ComplexSkeleton::new(); dim + 1];
    for (icell, cell) in cells.iter().enumerate() {
      for (dim_sub, subs) in skeletons.iter_mut().enumerate() {
        for sub in cell.subsimps(dim_sub) {
          let sub = subs.entry(sub).or_insert(SimplexData::default());
          sub.cocells.push(icell);
        }
      }
    }

    // Global vertex numbering must agree with the coordinate numbering.
    skeletons[0].sort_by(|v0, _, v1, _| v0[0].cmp(&v1[0]));

    // Topology checks.
    let facets = &skeletons[dim - 1];
    for (_, SimplexData { cocells }) in facets {
      let nparents = cocells.len();
      let is_manifold = nparents == 2 || nparents == 1;
      assert!(is_manifold, "Topology must be manifold.");
    }

    Self { skeletons }
  }

  pub fn dim(&self) -> Dim {
    self.skeletons.len() - 1
  }
  pub fn skeleton(&self, dim: Dim) -> &ComplexSkeleton {
    &self.skeletons[dim]
  }
  pub fn nsimplices(&self, dim: Dim) -> usize {
    self.skeleton(dim).len()
  }

  pub fn cells(&self) -> &ComplexSkeleton {
    self.skeleton(self.dim())
  }
  pub fn ncells(&self) -> usize {
    self.cells().len()
  }
  pub fn nvertices(&self) -> usize {
    self.skeleton(0).len()
  }
  pub fn facets(&self) -> &ComplexSkeleton {
    self.skeleton(self.dim() - 1)
  }

  /// Global indices of the dim-subsimplices of the given cell,
  /// in lexicographic order w.r.t. the local vertex indices.
  pub fn subsimp_idxs(&self, cell: &Simplex, dim: Dim) -> Vec<KSimplexIdx> {
    let skeleton = self.skeleton(dim);
    cell
      .subsimps(dim)
      .map(|sub| skeleton.get_index_of(&sub).unwrap())
      .collect()
  }

  pub fn kidx_by_simplex(&self, simp: &Simplex) -> KSimplexIdx {
    self.skeleton(simp.dim()).get_index_of(simp).unwrap()
  }

  pub fn has_boundary(&self) -> bool {
    !self.boundary_facets().is_empty()
  }

  /// For a d-mesh computes the boundary, which consists of facets ((d-1)-subs).
  ///
  /// The boundary facets are characterized by the fact that they
  /// only have one cell as super entity.
  pub fn boundary_facets(&self) -> Vec<KSimplexIdx> {
    self
      .facets()
      .values()
      .enumerate()
      .filter(|(_, data)| data.cocells.len() == 1)
      .map(|(ifacet, _)| ifacet)
      .collect()
  }

  /// The vertices that lie on the boundary of the mesh.
  /// No particular order of vertices.
  pub fn boundary_vertices(&self) -> Vec<VertexIdx> {
    self
      .boundary_facets()
      .into_iter()
      .map(|ifacet| self.facets().get_index(ifacet).unwrap().0)
      .flat_map(|facet| facet.iter())
      .unique()
      .collect()
  }

  /// The dim-simplices contained in the boundary of the mesh.
  pub fn boundary_simplices(&self, dim: Dim) -> Vec<KSimplexIdx> {
    assert!(dim < self.dim(), "Cells never lie on the boundary.");
    if dim == self.dim() - 1 {
      return self.boundary_facets();
    }
    let skeleton = self.skeleton(dim);
    self
      .boundary_facets()
      .into_iter()
      .map(|ifacet| self.facets().get_index(ifacet).unwrap().0)
      .flat_map(|facet| facet.subsimps(dim))
      .map(|sub| skeleton.get_index_of(&sub).unwrap())
      .unique()
      .collect()
  }
}
