//! Persistent Homology of 1D Functions (Merge and Split Trees)
//!
//! Treats a sequence of samples f(0), ..., f(n-1) as a piecewise-linear
//! function and computes the 0-dimensional persistence of its sublevel
//! sets (merge tree) or superlevel sets (split tree).
//!
//! ## Algorithm
//!
//! Samples are visited in filtration order. Each sample is classified
//! against its two neighbours; the comments below speak of a sublevel
//! sweep, a superlevel sweep flips every comparison:
//!
//! - **Minimum**: both neighbours enter later, a new component is born
//! - **Maximum**: both neighbours entered earlier, two components meet;
//!   the branch whose representative is lower is older and survives,
//!   the other one dies at this sample
//! - **Regular**: the sample joins the component(s) of neighbours that
//!   entered earlier. Neighbours with an *equal* value form a plateau and
//!   are merged in the opposite direction, so a flat run collapses into a
//!   single component instead of spawning spurious extrema
//!
//! Finally the pair (first sample, last sample) of the sweep is added if
//! not already present, so any function with at least two samples has a
//! pair spanning its global extrema.
//!
//! Pairs are stored as (creation, destruction) in sweep order, not in
//! sample order: sublevel pairs satisfy c ≤ d, superlevel pairs c ≥ d.

use tracing::{debug, trace};

use crate::error::{ensure_no_nan, Result};
use super::{DisjointSetForest, FiltrationOrder, PersistenceDiagram};

/// Direction of a merge between a sample and one of its neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// Neighbour entered earlier: the sample joins its component
    IntoNeighbour,
    /// Neighbour is equal (plateau): its component is hung below the sample
    FromNeighbour,
}

impl Link {
    fn apply(self, forest: &mut DisjointSetForest, sample: usize, neighbour: usize) {
        match self {
            Link::IntoNeighbour => forest.merge(sample, neighbour),
            Link::FromNeighbour => forest.merge(neighbour, sample),
        }
    }
}

/// Merges required by a regular sample, left neighbour first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergePlan {
    pub left: Option<Link>,
    pub right: Option<Link>,
}

impl MergePlan {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Role of a sample in the sweep, named for a sublevel filtration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Minimum,
    Maximum,
    Regular(MergePlan),
}

/// Classify a sample with value `x` against its neighbours.
///
/// A missing neighbour (at either end of the sequence) is passed as `x`
/// itself; it then reads as a plateau and the resulting link must be
/// skipped by the caller.
pub fn classify(x: f64, left: f64, right: f64, order: FiltrationOrder) -> PointKind {
    let before = |neighbour: f64| order.precedes(neighbour, x);
    let after = |neighbour: f64| order.precedes(x, neighbour);

    if after(left) && after(right) {
        return PointKind::Minimum;
    }
    if before(left) && before(right) {
        return PointKind::Maximum;
    }

    let link = |neighbour: f64| {
        if before(neighbour) {
            Some(Link::IntoNeighbour)
        } else if !after(neighbour) {
            Some(Link::FromNeighbour)
        } else {
            None
        }
    };

    PointKind::Regular(MergePlan {
        left: link(left),
        right: link(right),
    })
}

/// Persistence diagram of the merge tree (sublevel) or split tree
/// (superlevel) of a sampled function.
///
/// Empty and single-sample inputs yield an empty diagram. NaN samples
/// are rejected.
pub fn function_persistence(values: &[f64], order: FiltrationOrder) -> Result<PersistenceDiagram> {
    ensure_no_nan("sample", values)?;
    Ok(compute(values, order))
}

fn compute(values: &[f64], order: FiltrationOrder) -> PersistenceDiagram {
    let n = values.len();
    let indices = order.sort_indices(values);

    let mut forest = DisjointSetForest::new(n);

    // (creator, destroyer) sample indices
    let mut pairs: Vec<(usize, usize)> = Vec::new();

    for &index in &indices {
        let x = values[index];
        let left = if index > 0 { values[index - 1] } else { x };
        let right = if index + 1 < n { values[index + 1] } else { x };

        match classify(x, left, right, order) {
            PointKind::Minimum => {}

            // Both neighbours exist: a missing one would compare equal
            PointKind::Maximum => {
                let left_root = forest.find(index - 1);
                let right_root = forest.find(index + 1);

                if order.precedes(values[left_root], values[right_root]) {
                    // Left branch is older and absorbs the right one
                    pairs.push((right_root, index));
                    forest.merge(index, index + 1);
                    forest.merge(index + 1, index - 1);
                } else {
                    pairs.push((left_root, index));
                    forest.merge(index, index - 1);
                    forest.merge(index - 1, index + 1);
                }

                trace!(index, left_root, right_root, "branches merged");
            }

            PointKind::Regular(plan) => {
                if plan.is_empty() {
                    continue;
                }
                if let Some(link) = plan.left.filter(|_| index > 0) {
                    link.apply(&mut forest, index, index - 1);
                }
                if let Some(link) = plan.right.filter(|_| index + 1 < n) {
                    link.apply(&mut forest, index, index + 1);
                }
            }
        }
    }

    if n >= 2 {
        let extremal = (indices[0], indices[n - 1]);
        if !pairs.contains(&extremal) {
            pairs.push(extremal);
        }
    }

    debug!(n_samples = n, %order, n_pairs = pairs.len(), "function persistence computed");

    let mut diagram: PersistenceDiagram = pairs
        .into_iter()
        .map(|(creator, destroyer)| (values[creator], values[destroyer]))
        .collect();
    diagram.set_dimension(Some(0));
    diagram
}

#[cfg(test)]
mod tests {
    use super::*;

    use FiltrationOrder::{Sublevel, Superlevel};
    use Link::{FromNeighbour, IntoNeighbour};

    fn plan(left: Option<Link>, right: Option<Link>) -> PointKind {
        PointKind::Regular(MergePlan { left, right })
    }

    #[test]
    fn test_classify_all_neighbour_combinations() {
        // x = 1 with neighbours below (0), equal (1), above (2)
        let table = [
            ((0.0, 0.0), PointKind::Maximum),
            ((0.0, 1.0), plan(Some(IntoNeighbour), Some(FromNeighbour))),
            ((0.0, 2.0), plan(Some(IntoNeighbour), None)),
            ((1.0, 0.0), plan(Some(FromNeighbour), Some(IntoNeighbour))),
            ((1.0, 1.0), plan(Some(FromNeighbour), Some(FromNeighbour))),
            ((1.0, 2.0), plan(Some(FromNeighbour), None)),
            ((2.0, 0.0), plan(None, Some(IntoNeighbour))),
            ((2.0, 1.0), plan(None, Some(FromNeighbour))),
            ((2.0, 2.0), PointKind::Minimum),
        ];

        for ((left, right), expected) in table {
            assert_eq!(classify(1.0, left, right, Sublevel), expected, "sublevel {left} {right}");

            // Mirrored values give the same role under the superlevel sweep
            assert_eq!(
                classify(1.0, 2.0 - left, 2.0 - right, Superlevel),
                expected,
                "superlevel {left} {right}"
            );
        }
    }

    #[test]
    fn test_merge_tree_example() {
        let pd = function_persistence(&[3.0, 1.0, 6.0, 5.0, 8.0, 2.0, 7.0, 4.0], Sublevel).unwrap();
        assert_eq!(pd.pairs(), &[(5.0, 6.0), (4.0, 7.0), (2.0, 8.0), (1.0, 8.0)]);
        assert_eq!(pd.dimension(), Some(0));

        let pd = function_persistence(&[3.0, 1.0, 6.0, 5.0, 8.0, 2.0, 7.0, 4.0], Superlevel).unwrap();
        assert_eq!(pd.pairs(), &[(6.0, 5.0), (7.0, 2.0), (3.0, 1.0), (8.0, 1.0)]);
    }

    #[test]
    fn test_two_maxima() {
        let f = [0.0, 3.0, 1.0, 3.0, 0.0];
        assert_eq!(function_persistence(&f, Sublevel).unwrap().pairs(), &[(1.0, 3.0), (0.0, 3.0)]);
        assert_eq!(function_persistence(&f, Superlevel).unwrap().pairs(), &[(3.0, 1.0), (3.0, 0.0)]);
    }

    #[test]
    fn test_extremal_pair_not_duplicated() {
        // The maximum already destroys the first minimum of the sweep
        let pd = function_persistence(&[0.0, 1.0, 0.0], Sublevel).unwrap();
        assert_eq!(pd.pairs(), &[(0.0, 1.0)]);
    }

    #[test]
    fn test_plateau_collapses() {
        let pd = function_persistence(&[2.0, 2.0, 2.0], Sublevel).unwrap();
        assert_eq!(pd.pairs(), &[(2.0, 2.0)]);

        // Flat maximum is not a strict maximum and creates no extra pair
        let pd = function_persistence(&[0.0, 2.0, 2.0, 1.0, 3.0], Sublevel).unwrap();
        assert_eq!(pd.pairs(), &[(0.0, 3.0)]);
    }

    #[test]
    fn test_plateau_link_keeps_sample_as_root() {
        let mut forest = DisjointSetForest::new(3);
        FromNeighbour.apply(&mut forest, 1, 0);
        assert_eq!(forest.find(0), 1);

        let mut forest = DisjointSetForest::new(3);
        IntoNeighbour.apply(&mut forest, 1, 0);
        assert_eq!(forest.find(1), 0);
    }

    #[test]
    fn test_plateau_beside_maximum() {
        // The flat run [0, 0] must resolve to the root the maximum pairs
        // with, otherwise the extremal pair is emitted a second time
        let pd = function_persistence(&[0.0, 0.0, 1.0, 0.0], Sublevel).unwrap();
        assert_eq!(pd.pairs(), &[(0.0, 1.0)]);

        let pd = function_persistence(&[1.0, 1.0, 3.0, 1.0], Sublevel).unwrap();
        assert_eq!(pd.pairs(), &[(1.0, 3.0)]);

        let pd = function_persistence(&[2.0, 2.0, 0.0, 2.0], Superlevel).unwrap();
        assert_eq!(pd.pairs(), &[(2.0, 0.0)]);
    }

    #[test]
    fn test_pairs_are_oriented_by_sweep() {
        // Creation first, whatever the sample positions: (5, 6) has its
        // destroyer at index 2 and its creator at index 3
        let f = [3.0, 1.0, 6.0, 5.0, 8.0, 2.0, 7.0, 4.0];

        let sub = function_persistence(&f, Sublevel).unwrap();
        assert!(sub.contains((5.0, 6.0)));
        assert!(!sub.contains((6.0, 5.0)));
        assert!(sub.iter().all(|(c, d)| c <= d));

        let sup = function_persistence(&f, Superlevel).unwrap();
        assert!(sup.contains((7.0, 2.0)));
        assert!(sup.iter().all(|(c, d)| c >= d));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(function_persistence(&[], Sublevel).unwrap().is_empty());
        assert!(function_persistence(&[5.0], Superlevel).unwrap().is_empty());
        assert_eq!(function_persistence(&[1.0, 0.0], Sublevel).unwrap().pairs(), &[(0.0, 1.0)]);
    }

    #[test]
    fn test_nan_rejected() {
        assert!(function_persistence(&[0.0, f64::NAN], Sublevel).is_err());
    }
}
