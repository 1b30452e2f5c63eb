//! Module for the Heat Equation, the prototypical parabolic PDE.
//!
//! $diff_t u - alpha Delta u = f$ is discretized in space with the
//! chosen scalar element and in time with the implicit Euler scheme.
//! Each step solves
//! $(M + alpha Delta t A) mu^(k+1) = M mu^k + Delta t phi^(k+1)$.

use crate::{
  assemble,
  fe::{DofCoeff, DofIdx, Element, FeFunction},
  linalg::{CsrMatrix, FaerCholesky, Vector},
  mesh::{complex::Complex, coords::CoordRef, coords::MeshCoords},
};

/// Solve the heat equation with implicit Euler time stepping.
///
/// The source is re-evaluated in every step at time $t^(k+1)$, the
/// Dirichlet data is constant in time. Returns the solution coefficient
/// vectors at times `[0, dt, ..., nsteps*dt]`.
pub fn solve_heat<B, S>(
  topology: &Complex,
  coords: &MeshCoords,
  element: Element,
  nsteps: usize,
  dt: f64,
  diffusivity: f64,
  boundary_data: B,
  initial_data: FeFunction,
  source_data: S,
) -> Vec<FeFunction>
where
  B: Fn(DofIdx) -> f64,
  S: Fn(CoordRef, f64) -> f64 + Sync,
{
  let dim = topology.dim();

  let laplace = assemble::assemble_galmat(topology, coords, element.laplace_elmat(dim).as_ref());
  let mass = assemble::assemble_galmat(topology, coords, element.mass_elmat(dim).as_ref());
  let laplace = CsrMatrix::from(&laplace);
  let mass = CsrMatrix::from(&mass);

  let dof_coeffs: Vec<_> = assemble::boundary_dofs(topology, element)
    .into_iter()
    .map(|idof| (idof, boundary_data(idof)))
    .collect();

  // The raw system matrix is kept around, since the rhs elimination of
  // the fixed DOFs must happen against it in every step.
  let lse_raw = &mass + diffusivity * dt * &laplace;
  let mut lse_fixed = nas::CooMatrix::from(&lse_raw);
  assemble::fix_galmat_coeff(&dof_coeffs, &mut lse_fixed);
  let lse_cholesky = FaerCholesky::new(CsrMatrix::from(&lse_fixed));

  let mut solution = Vec::with_capacity(nsteps + 1);
  solution.push(initial_data);

  for istep in 0..nsteps {
    let t = (istep + 1) as f64 * dt;
    tracing::debug!("Solving heat equation at step={istep}/{nsteps}, t={t:.4}.");

    let source_elvec = element.source_elvec(dim, |x| source_data(x, t));
    let source = assemble::assemble_galvec(topology, coords, source_elvec.as_ref());

    let prev = solution.last().unwrap();
    let next = solve_heat_step(
      prev,
      dt,
      &source,
      &dof_coeffs,
      &mass,
      &lse_raw,
      &lse_cholesky,
    );

    solution.push(next);
  }

  tracing::info!(
    "Solved heat equation with {} DOFs over {nsteps} steps up to t={:.4}.",
    mass.nrows(),
    nsteps as f64 * dt
  );

  solution
}

/// A single implicit Euler step of the heat equation.
///
/// Expects the raw (unfixed) system matrix next to its fixed and
/// factored counterpart, since the rhs elimination of the Dirichlet
/// DOFs needs the original coupling terms.
#[allow(clippy::too_many_arguments)]
pub fn solve_heat_step(
  prev: &FeFunction,
  dt: f64,
  source: &Vector,
  dof_coeffs: &[(DofIdx, DofCoeff)],
  mass: &CsrMatrix,
  lse_raw: &CsrMatrix,
  lse_cholesky: &FaerCholesky,
) -> FeFunction {
  let mut rhs = mass * prev + dt * source;
  assemble::fix_rhs_coeff(dof_coeffs, lse_raw, &mut rhs);
  lse_cholesky.solve(&rhs)
}
