pub mod gmsh;
pub mod vtk;

use crate::{linalg::Vector, Dim};

use std::{fs::File, io::BufWriter, path::Path};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
  #[error("io error during export")]
  Io(#[from] std::io::Error),
  #[error("vtk error during export")]
  Vtk(#[from] vtkio::Error),
}

/// Save a solution time series as plain text.
///
/// The first line holds the mesh dimension and the number of DOFs,
/// followed by the frames, one coefficient per line.
pub fn save_evolution_to_file<'a>(
  dim: Dim,
  frames: impl IntoIterator<Item = &'a Vector>,
  path: impl AsRef<Path>,
) -> std::io::Result<()> {
  let file = File::create(path)?;
  let writer = BufWriter::new(file);
  write_evolution(writer, dim, frames)
}

pub fn write_evolution<'a, W: std::io::Write>(
  mut writer: W,
  dim: Dim,
  frames: impl IntoIterator<Item = &'a Vector>,
) -> std::io::Result<()> {
  let mut frames = frames.into_iter().peekable();
  let ndofs = frames.peek().map(|frame| frame.len()).unwrap_or(0);
  writeln!(writer, "{dim} {ndofs}")?;
  for frame in frames {
    for value in frame {
      writeln!(writer, "{value}")?;
    }
  }
  Ok(())
}
