//! Import of Gmsh `.msh` meshes (format version 4.1).

use crate::{
  linalg::Matrix,
  mesh::{complex::Complex, coords::MeshCoords, simplex::Simplex, skeleton::Skeleton},
};

pub fn gmsh2coord_complex(bytes: &[u8]) -> (Complex, MeshCoords) {
  let (cells, coords) = gmsh2coord_cells(bytes);
  let complex = Complex::from_cells(cells);
  (complex, coords)
}

/// Load the cells of a Gmsh `.msh` file.
///
/// Only the highest-dimensional simplex elements are kept. Meshes whose
/// vertices all lie in the $z = 0$ plane are flattened to 2D.
pub fn gmsh2coord_cells(bytes: &[u8]) -> (Skeleton, MeshCoords) {
  let msh = mshio::parse_msh_bytes(bytes).unwrap();

  let node_blocks = msh.data.nodes.unwrap().node_blocks;
  let mut vertices: Vec<_> = node_blocks
    .iter()
    .flat_map(|block| block.nodes.iter())
    .map(|node| na::dvector![node.x, node.y, node.z])
    .collect();

  if vertices.iter().all(|coord| coord[2] == 0.0) {
    vertices
      .iter_mut()
      .for_each(|coord| *coord = na::dvector![coord[0], coord[1]])
  }

  let coords = MeshCoords::new(Matrix::from_columns(&vertices));

  // Bucket the simplex elements by their dimension.
  let mut simplices: [Vec<Simplex>; 4] = Default::default();
  for block in msh.data.elements.unwrap().element_blocks {
    type ElType = mshio::ElementType;
    let simplex_dim = match block.element_type {
      ElType::Pnt => 0,
      ElType::Lin2 => 1,
      ElType::Tri3 => 2,
      ElType::Tet4 => 3,
      _ => {
        tracing::warn!("unsupported gmsh ElementType: {:?}", block.element_type);
        continue;
      }
    };
    for element in block.elements {
      // Gmsh node tags are one-based.
      let simplex = element.nodes.iter().map(|tag| *tag as usize - 1).collect();
      simplices[simplex_dim].push(Simplex::from_unsorted(simplex));
    }
  }

  // The highest dimension present determines the cells. Lower
  // dimensional elements only tag boundary entities.
  let [_, edges, trias, tets] = simplices;
  let cells = [tets, trias, edges]
    .into_iter()
    .find(|simps| !simps.is_empty())
    .expect("Failed to construct triangulation from gmsh.");

  (Skeleton::new(cells), coords)
}

#[cfg(test)]
mod test {
  use super::*;

  const SQUARE_MSH: &[u8] = b"$MeshFormat
4.1 0 8
$EndMeshFormat
$Nodes
1 4 1 4
2 1 0 4
1
2
3
4
0.0 0.0 0.0
1.0 0.0 0.0
1.0 1.0 0.0
0.0 1.0 0.0
$EndNodes
$Elements
1 2 1 2
2 1 2 2
1 1 2 3
2 1 3 4
$EndElements
";

  #[test]
  fn two_triangle_square() {
    let (topology, coords) = gmsh2coord_complex(SQUARE_MSH);

    // All z coordinates vanish, so the mesh is flattened to 2d.
    assert_eq!(coords.dim(), 2);
    assert_eq!(topology.dim(), 2);
    assert_eq!(topology.ncells(), 2);
    assert_eq!(topology.nvertices(), 4);
    assert_eq!(topology.nsimplices(1), 5);

    // Only the diagonal edge is interior.
    assert_eq!(topology.boundary_facets().len(), 4);
    assert_eq!(topology.boundary_vertices().len(), 4);
  }
}
