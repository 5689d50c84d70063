//! Persistence Diagrams
//!
//! A persistence diagram is an ordered collection of pairs
//! (creation, destruction) on the filtration axis. Each pair marks a
//! topological feature that appears at `creation` and disappears at
//! `destruction`.
//!
//! ## Interpretation
//!
//! - Long-lived features (large |d - c|) represent robust structure
//! - Short-lived features may be noise or transient phenomena
//!
//! The container does not enforce c ≤ d: superlevel filtrations produce
//! pairs with c ≥ d, and the engines rely on this being preserved.

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Ordered collection of (creation, destruction) pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistenceDiagram {
    pairs: Vec<(f64, f64)>,
    /// Homological dimension of the features, if known
    dimension: Option<usize>,
}

impl PersistenceDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty diagram tagged with a homological dimension
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            pairs: Vec::new(),
            dimension: Some(dimension),
        }
    }

    /// Diagram from existing pairs
    pub fn from_pairs(pairs: Vec<(f64, f64)>) -> Self {
        Self { pairs, dimension: None }
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn set_dimension(&mut self, dimension: Option<usize>) {
        self.dimension = dimension;
    }

    /// Append a pair; no validity checks are performed
    pub fn add(&mut self, creation: f64, destruction: f64) {
        self.pairs.push((creation, destruction));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(f64, f64)] {
        &self.pairs
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, (f64, f64)>> {
        self.pairs.iter().copied()
    }

    /// Does the diagram contain exactly this pair?
    pub fn contains(&self, pair: (f64, f64)) -> bool {
        self.pairs.contains(&pair)
    }

    /// Multiply both coordinates of every pair by `factor`
    pub fn scale(&mut self, factor: f64) {
        for (c, d) in &mut self.pairs {
            *c *= factor;
            *d *= factor;
        }
    }

    /// Append all pairs of `other` to this diagram
    pub fn union(&mut self, other: &PersistenceDiagram) -> &mut Self {
        self.pairs.extend_from_slice(&other.pairs);
        self
    }

    /// Persistence |c - d| of every pair, in diagram order
    pub fn persistence_values(&self) -> Vec<f64> {
        self.iter().map(|(c, d)| (c - d).abs()).collect()
    }

    /// Total persistence (Σ |c - d|^p)^(1/p)
    pub fn total_persistence(&self, p: f64) -> f64 {
        self.iter()
            .map(|(c, d)| (c - d).abs().powf(p))
            .sum::<f64>()
            .powf(1.0 / p)
    }

    /// Infinity norm max |c - d|^p, 0 for an empty diagram
    pub fn infinity_norm(&self, p: f64) -> f64 {
        self.iter()
            .map(|(c, d)| (c - d).abs().powf(p))
            .fold(0.0, f64::max)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Index<usize> for PersistenceDiagram {
    type Output = (f64, f64);

    fn index(&self, index: usize) -> &Self::Output {
        &self.pairs[index]
    }
}

impl FromIterator<(f64, f64)> for PersistenceDiagram {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self::from_pairs(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PersistenceDiagram {
    type Item = (f64, f64);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (f64, f64)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_iterate() {
        let mut pd = PersistenceDiagram::with_dimension(0);
        pd.add(0.0, 1.0);
        pd.add(2.0, 1.5);

        assert_eq!(pd.len(), 2);
        assert_eq!(pd.dimension(), Some(0));
        assert_eq!(pd[1], (2.0, 1.5));
        assert_eq!(pd.iter().collect::<Vec<_>>(), vec![(0.0, 1.0), (2.0, 1.5)]);
        assert!(pd.contains((0.0, 1.0)));
        assert!(!pd.contains((1.0, 0.0)));
    }

    #[test]
    fn test_scale() {
        let mut pd: PersistenceDiagram = vec![(1.0, 2.0), (-1.0, 3.0)].into_iter().collect();
        pd.scale(2.0);
        assert_eq!(pd.pairs(), &[(2.0, 4.0), (-2.0, 6.0)]);
    }

    #[test]
    fn test_norms() {
        let pd = PersistenceDiagram::from_pairs(vec![(0.0, 3.0), (4.0, 0.0)]);

        assert!((pd.total_persistence(1.0) - 7.0).abs() < 1e-10);
        assert!((pd.total_persistence(2.0) - 5.0).abs() < 1e-10);
        assert!((pd.infinity_norm(1.0) - 4.0).abs() < 1e-10);
        assert!((pd.infinity_norm(2.0) - 16.0).abs() < 1e-10);
        assert_eq!(PersistenceDiagram::new().infinity_norm(1.0), 0.0);
    }

    #[test]
    fn test_union_appends() {
        let mut a = PersistenceDiagram::from_pairs(vec![(0.0, 1.0)]);
        let b = PersistenceDiagram::from_pairs(vec![(1.0, 2.0), (0.0, 1.0)]);
        a.union(&b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.persistence_values(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_json_roundtrip_keeps_dimension() {
        let mut pd = PersistenceDiagram::with_dimension(1);
        pd.add(0.5, 2.0);
        let json = pd.to_json().unwrap();
        let back = PersistenceDiagram::from_json(&json).unwrap();
        assert_eq!(back, pd);
    }
}
