use super::simplex::Simplex;
use crate::Dim;

use indexmap::IndexSet;

/// A container for distinct simplices of the same dimension,
/// the cells of a mesh before complex construction.
#[derive(Default, Debug, Clone)]
pub struct Skeleton {
  simplices: IndexSet<Simplex>,
}
impl Skeleton {
  pub fn new(simplices: Vec<Simplex>) -> Self {
    assert!(!simplices.is_empty(), "Skeleton must not be empty.");
    let dim = simplices[0].dim();
    assert!(
      simplices.iter().all(|simp| simp.dim() == dim),
      "Skeleton simplices must have the same dimension."
    );
    let simplices = IndexSet::from_iter(simplices);
    Self { simplices }
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.simplices.len()
  }
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
  #[must_use]
  pub fn dim(&self) -> Dim {
    self.simplices[0].dim()
  }

  pub fn iter(&self) -> indexmap::set::Iter<'_, Simplex> {
    self.simplices.iter()
  }
}

impl IntoIterator for Skeleton {
  type Item = Simplex;
  type IntoIter = indexmap::set::IntoIter<Self::Item>;
  fn into_iter(self) -> Self::IntoIter {
    self.simplices.into_iter()
  }
}
