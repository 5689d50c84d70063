//! Filtration Order: Sublevel and Superlevel Sweeps
//!
//! A filtration visits simplices (vertices, edges, samples) in order of
//! their scalar value:
//!
//! - **Sublevel**: ascending, the sets f⁻¹(-∞, t] grow with t
//! - **Superlevel**: descending, the sets f⁻¹[t, ∞) grow as t decreases
//!
//! The flag flips every comparison and sort direction in the engines and
//! nothing else. Superlevel sorting is realised by sorting negated keys,
//! so a single ascending comparator serves both directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Direction of a filtration sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FiltrationOrder {
    /// Ascending values (merge tree)
    #[default]
    Sublevel,
    /// Descending values (split tree)
    Superlevel,
}

impl FiltrationOrder {
    /// Sort key of a value; ascending order of keys is filtration order
    #[inline]
    pub fn key(self, value: f64) -> f64 {
        // `+ 0.0` folds -0.0 into 0.0 so `total_cmp` agrees with `<`
        match self {
            FiltrationOrder::Sublevel => value + 0.0,
            FiltrationOrder::Superlevel => -value + 0.0,
        }
    }

    /// Strict predicate: does `a` enter the filtration before `b`?
    ///
    /// This is `<` for sublevel and `>` for superlevel sets. Values for
    /// which neither `precedes(a, b)` nor `precedes(b, a)` holds are equal
    /// from the point of view of the filtration.
    #[inline]
    pub fn precedes(self, a: f64, b: f64) -> bool {
        self.key(a) < self.key(b)
    }

    /// Indices of `values` in filtration order.
    ///
    /// The sort is stable: among equal values the original index order
    /// is preserved, which makes tie-breaking deterministic.
    pub fn sort_indices(self, values: &[f64]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..values.len()).collect();
        indices.sort_by(|&a, &b| self.key(values[a]).total_cmp(&self.key(values[b])));
        indices
    }

    /// Position of every index in the filtration order (inverse permutation)
    pub fn ranks(self, values: &[f64]) -> Vec<usize> {
        let mut ranks = vec![0usize; values.len()];
        for (rank, index) in self.sort_indices(values).into_iter().enumerate() {
            ranks[index] = rank;
        }
        ranks
    }

    /// The opposite sweep direction
    pub fn reversed(self) -> Self {
        match self {
            FiltrationOrder::Sublevel => FiltrationOrder::Superlevel,
            FiltrationOrder::Superlevel => FiltrationOrder::Sublevel,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FiltrationOrder::Sublevel => "sublevel",
            FiltrationOrder::Superlevel => "superlevel",
        }
    }
}

impl fmt::Display for FiltrationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FiltrationOrder {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sublevel" => Ok(FiltrationOrder::Sublevel),
            "superlevel" => Ok(FiltrationOrder::Superlevel),
            other => Err(PersistenceError::UnknownOrder(other.to_string())),
        }
    }
}
