extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

use thermiq::{
  assemble,
  fe::LaplaceElmat,
  linalg::assert_mat_eq,
  mesh::cartesian::CartesianMesh,
};

/// Compare the assembled Laplacian Galerkin matrix against an
/// independent textbook 2D FEM implementation on the same grid.
#[test]
fn galmat_vs_fem2d() {
  for nboxes_per_dim in 1..=10 {
    let assembled = assembled_galmat(nboxes_per_dim);
    let fem = fem2d_galmat(nboxes_per_dim);
    assert_mat_eq(&assembled, &fem, None);
  }
}

fn assembled_galmat(nboxes_per_dim: usize) -> na::DMatrix<f64> {
  let (topology, coords) = CartesianMesh::new_unit(2, nboxes_per_dim).compute_coord_complex();
  let galmat = assemble::assemble_galmat(&topology, &coords, &LaplaceElmat);
  na::DMatrix::from(&galmat)
}

fn fem2d_galmat(nboxes_per_dim: usize) -> na::DMatrix<f64> {
  let nvertices_per_dim = nboxes_per_dim + 1;
  let nvertices = nvertices_per_dim.pow(2);

  let h = (nboxes_per_dim as f64).recip();

  let mut vertex_coords = na::DMatrix::zeros(2, nvertices);
  for yvertex in 0..nvertices_per_dim {
    for xvertex in 0..nvertices_per_dim {
      let ivertex = xvertex + nvertices_per_dim * yvertex;
      vertex_coords[(0, ivertex)] = h * xvertex as f64;
      vertex_coords[(1, ivertex)] = h * yvertex as f64;
    }
  }

  // The two triangles of the Kuhn triangulation of each box,
  // as local indices into the box corners [o, o+x, o+y, o+x+y].
  let trias_ivertices = [[0, 1, 3], [0, 2, 3]];

  let mut galmat = na::DMatrix::<f64>::zeros(nvertices, nvertices);
  for ybox in 0..nboxes_per_dim {
    for xbox in 0..nboxes_per_dim {
      let mut box_ivertices = [0; 4];
      for j in 0..2 {
        for i in 0..2 {
          let ivertex_local = i + 2 * j;
          let ivertex_global = (xbox + i) + nvertices_per_dim * (ybox + j);
          box_ivertices[ivertex_local] = ivertex_global;
        }
      }

      for tria_ivertices in &trias_ivertices {
        let tria_ivertices = tria_ivertices.map(|i| box_ivertices[i]);
        let tria_vertices = tria_ivertices.map(|i| vertex_coords.column(i));

        // Rotated opposite edges give the barycentric gradients,
        // elmat = n_i . n_j / (4 |K|).
        let ns: Vec<na::Vector2<f64>> = (0..3)
          .map(|i| {
            let e = tria_vertices[(i + 2) % 3] - tria_vertices[(i + 1) % 3];
            na::Vector2::new(-e[1], e[0])
          })
          .collect();

        let b0 = tria_vertices[1] - tria_vertices[0];
        let b1 = tria_vertices[2] - tria_vertices[0];
        let area = 0.5 * (b0[0] * b1[1] - b0[1] * b1[0]).abs();

        let mut elmat = na::DMatrix::zeros(3, 3);
        for i in 0..3 {
          for j in 0..3 {
            elmat[(i, j)] = ns[i].dot(&ns[j]);
          }
        }
        elmat /= 4.0 * area;

        for (ilocal, iglobal) in tria_ivertices.iter().copied().enumerate() {
          for (jlocal, jglobal) in tria_ivertices.iter().copied().enumerate() {
            galmat[(iglobal, jglobal)] += elmat[(ilocal, jlocal)];
          }
        }
      }
    }
  }

  galmat
}
