extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod assemble;
pub mod fe;
pub mod io;
pub mod linalg;
pub mod mesh;
pub mod problems;
pub mod util;

pub type Dim = usize;
