//! Heat flow on the unit interval with Lagrange elements.
//!
//! The initial mode $sin(pi x)$ decays exponentially. The solution
//! frames are written to a plain text file for external plotting.

extern crate nalgebra as na;

use thermiq::{
  fe::{self, Element},
  io,
  mesh::cartesian::CartesianMesh,
  problems::heat,
};

use std::f64::consts::PI;

fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt::init();

  let dim = 1;
  let nsubdivisions = 100;
  let (topology, coords) = CartesianMesh::new_unit(dim, nsubdivisions).compute_coord_complex();

  let diffusivity = 1.0;
  let final_time = 1.0;
  let nsteps = 200;
  let dt = final_time / nsteps as f64;

  let initial_data = fe::interpolate(&topology, &coords, 0, |p| (PI * p[0]).sin());

  let solution = heat::solve_heat(
    &topology,
    &coords,
    Element::Lagrange,
    nsteps,
    dt,
    diffusivity,
    |_| 0.0,
    initial_data,
    |_, _| 0.0,
  );

  std::fs::create_dir_all("out")?;
  io::save_evolution_to_file(dim, &solution, "out/heat_interval.txt")?;
  println!("Wrote {} frames to `out/heat_interval.txt`.", solution.len());
  Ok(())
}
