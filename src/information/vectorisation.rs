//! Feature Vectors from Persistence Diagrams
//!
//! Fixed-order vectors suitable for classical learning algorithms. Both
//! representations are sorted in descending order so the most persistent
//! features come first.

use crate::topology::PersistenceDiagram;

/// Distance of every pair to the diagonal (its persistence), descending.
///
/// Stable under perturbations of the diagram but not very discriminative.
pub fn featurise_distances(pd: &PersistenceDiagram) -> Vec<f64> {
    let mut distances = pd.persistence_values();
    distances.sort_by(|a, b| b.total_cmp(a));
    distances
}

/// Stable signature from pairwise point distances, descending.
///
/// For every unordered pair of distinct points (a, b), (x, y) the entry is
///
///   min(max(|a - x|, |b - y|), |a - b|, |x - y|)
///
/// i.e. the L∞ distance between the points, capped by their distances to
/// the diagonal (Carrière, Oudot, Ovsjanikov: "Stable Topological
/// Signatures for Points on 3D Shapes").
pub fn featurise_pairwise_distances(pd: &PersistenceDiagram) -> Vec<f64> {
    let pairs = pd.pairs();
    let mut distances = Vec::with_capacity(pairs.len() * pairs.len().saturating_sub(1) / 2);

    for (i, &(a, b)) in pairs.iter().enumerate() {
        for &(x, y) in &pairs[i + 1..] {
            let linf = (a - x).abs().max((b - y).abs());
            distances.push(linf.min((a - b).abs()).min((x - y).abs()));
        }
    }

    distances.sort_by(|a, b| b.total_cmp(a));
    distances
}
