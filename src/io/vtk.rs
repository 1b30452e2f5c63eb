//! VTK export of meshes and solution animations.
//!
//! Solution time series are written as a numbered sequence of legacy
//! VTK files together with a ParaView `.pvd` collection file carrying
//! the frame times.

use super::ExportError;
use crate::{
  linalg::Vector,
  mesh::{complex::Complex, coords::MeshCoords},
};

use vtkio::{
  model::{
    Attribute, Attributes, ByteOrder, CellType, Cells, UnstructuredGridPiece, Version,
    VertexNumbers, Vtk,
  },
  IOBuffer,
};

use std::{fs::File, io::BufWriter, io::Write, path::Path};

/// Build a VTK unstructured grid from a mesh and scalar vertex data.
pub fn mesh_to_vtk(topology: &Complex, coords: &MeshCoords, vertex_data: &Vector) -> Vtk {
  assert!(vertex_data.len() == topology.nvertices());
  let cell_type = match topology.dim() {
    1 => CellType::Line,
    2 => CellType::Triangle,
    3 => CellType::Tetra,
    _ => panic!("Bad mesh for VTK export."),
  };

  // VTK points are always 3D.
  let mut points = Vec::with_capacity(3 * coords.nvertices());
  for coord in coords.coord_iter() {
    points.extend(coord.iter().copied());
    points.extend(std::iter::repeat(0.0).take(3 - coord.len()));
  }
  let points = IOBuffer::new(points);

  let connectivity = topology
    .cells()
    .keys()
    .flat_map(|cell| cell.iter())
    .map(|i| i as u64)
    .collect();
  let offsets = topology
    .cells()
    .keys()
    .map(|cell| cell.nvertices() as u64)
    .scan(0, |offset, nverts| {
      *offset += nverts;
      Some(*offset)
    })
    .collect();

  let cell_verts = VertexNumbers::XML {
    connectivity,
    offsets,
  };
  let types = vec![cell_type; topology.ncells()];
  let cells = Cells { cell_verts, types };

  let mut data = Attributes::new();
  data.point.push(
    Attribute::scalars("solution", 1).with_data(vertex_data.iter().copied().collect::<Vec<_>>()),
  );

  let grid = UnstructuredGridPiece {
    points,
    cells,
    data,
  };

  Vtk {
    version: Version::new((4, 2)),
    title: String::from("Thermiq VTK Export"),
    byte_order: ByteOrder::native(),
    data: grid.into(),
    file_path: None,
  }
}

pub fn write_frame(
  topology: &Complex,
  coords: &MeshCoords,
  vertex_data: &Vector,
  path: impl AsRef<Path>,
) -> Result<(), ExportError> {
  mesh_to_vtk(topology, coords, vertex_data).export_ascii(path)?;
  Ok(())
}

/// Write a solution time series as VTK frames plus a `.pvd` collection.
///
/// Opening `<dir>/<name>.pvd` in ParaView plays the animation with the
/// given frame times.
pub fn write_animation<'a>(
  topology: &Complex,
  coords: &MeshCoords,
  frames: impl IntoIterator<Item = &'a Vector>,
  times: impl IntoIterator<Item = f64>,
  dir: impl AsRef<Path>,
  name: &str,
) -> Result<(), ExportError> {
  let dir = dir.as_ref();
  std::fs::create_dir_all(dir)?;

  let mut collection = Vec::new();
  for (iframe, (frame, time)) in frames.into_iter().zip(times).enumerate() {
    let file_name = format!("{name}_{iframe:04}.vtk");
    write_frame(topology, coords, frame, dir.join(&file_name))?;
    collection.push((time, file_name));
  }

  let file = File::create(dir.join(format!("{name}.pvd")))?;
  let mut writer = BufWriter::new(file);
  write_pvd_collection(&mut writer, &collection)?;
  Ok(())
}

fn write_pvd_collection<W: Write>(
  writer: &mut W,
  entries: &[(f64, String)],
) -> std::io::Result<()> {
  writeln!(writer, r#"<?xml version="1.0"?>"#)?;
  writeln!(
    writer,
    r#"<VTKFile type="Collection" version="0.1" byte_order="LittleEndian">"#
  )?;
  writeln!(writer, "  <Collection>")?;
  for (time, file_name) in entries {
    writeln!(
      writer,
      r#"    <DataSet timestep="{time}" part="0" file="{file_name}"/>"#
    )?;
  }
  writeln!(writer, "  </Collection>")?;
  writeln!(writer, "</VTKFile>")?;
  Ok(())
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::mesh::cartesian::CartesianMesh;

  #[test]
  fn vtk_offsets_are_cumulative() {
    let (topology, coords) = CartesianMesh::new_unit(2, 2).compute_coord_complex();
    let data = Vector::zeros(topology.nvertices());
    let vtk = mesh_to_vtk(&topology, &coords, &data);

    let vtkio::model::DataSet::UnstructuredGrid { pieces, .. } = vtk.data else {
      panic!("expected unstructured grid");
    };
    let vtkio::model::Piece::Inline(piece) = &pieces[0] else {
      panic!("expected inline piece");
    };
    let VertexNumbers::XML { offsets, .. } = &piece.cells.cell_verts else {
      panic!("expected xml vertex numbers");
    };
    let expected: Vec<u64> = (1..=topology.ncells() as u64).map(|i| 3 * i).collect();
    assert_eq!(offsets, &expected);
  }

  #[test]
  fn pvd_collection_lists_frame_times() {
    let entries = vec![
      (0.0, String::from("heat_0000.vtk")),
      (0.5, String::from("heat_0001.vtk")),
      (1.0, String::from("heat_0002.vtk")),
    ];
    let mut buf = Vec::new();
    write_pvd_collection(&mut buf, &entries).unwrap();
    let xml = String::from_utf8(buf).unwrap();

    assert!(xml.starts_with(r#"<?xml version="1.0"?>"#));
    assert!(xml.contains(r#"<DataSet timestep="0" part="0" file="heat_0000.vtk"/>"#));
    assert!(xml.contains(r#"<DataSet timestep="0.5" part="0" file="heat_0001.vtk"/>"#));
    assert!(xml.contains(r#"<DataSet timestep="1" part="0" file="heat_0002.vtk"/>"#));
    assert!(xml.trim_end().ends_with("</VTKFile>"));
  }
}
