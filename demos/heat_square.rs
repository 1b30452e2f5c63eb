//! Heat flow on the unit square with Crouzeix-Raviart elements.
//!
//! A Gaussian initial bump diffuses away while an orbiting Gaussian
//! source keeps injecting heat. The solution is exported as a VTK
//! animation for ParaView.

extern crate nalgebra as na;

use thermiq::{
  fe::{self, Element},
  io::{vtk, ExportError},
  mesh::{cartesian::CartesianMesh, coords::CoordRef},
  problems::heat,
};

use std::f64::consts::TAU;

fn main() -> Result<(), ExportError> {
  tracing_subscriber::fmt::init();

  let nsubdivisions = 32;
  let (topology, coords) = CartesianMesh::new_unit(2, nsubdivisions).compute_coord_complex();
  println!(
    "Meshed unit square with {} triangles.",
    topology.ncells()
  );

  let element = Element::CrouzeixRaviart;
  let diffusivity = 0.1;

  let final_time = 1.0;
  let nsteps = 200;
  let dt = final_time / nsteps as f64;

  let grade = element.grade(topology.dim());
  let initial_data = fe::interpolate(&topology, &coords, grade, |p| {
    let dx = p[0] - 0.5;
    let dy = p[1] - 0.5;
    (-50.0 * (dx * dx + dy * dy)).exp()
  });

  // A Gaussian heat source orbiting the center of the square once.
  let source_data = |p: CoordRef, t: f64| {
    let cx = 0.5 + 0.25 * (TAU * t).cos();
    let cy = 0.5 + 0.25 * (TAU * t).sin();
    let dx = p[0] - cx;
    let dy = p[1] - cy;
    50.0 * (-100.0 * (dx * dx + dy * dy)).exp()
  };

  let solution = heat::solve_heat(
    &topology,
    &coords,
    element,
    nsteps,
    dt,
    diffusivity,
    |_| 0.0,
    initial_data,
    source_data,
  );

  let frames: Vec<_> = solution
    .iter()
    .map(|mu| fe::evaluate_at_vertices(&topology, element, mu))
    .collect();
  let times = (0..=nsteps).map(|istep| istep as f64 * dt);
  vtk::write_animation(&topology, &coords, frames.iter(), times, "out", "heat_square")?;
  println!("Wrote animation to `out/heat_square.pvd`.");
  Ok(())
}
