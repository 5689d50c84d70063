//! # TDA-Persistence
//!
//! Persistence diagrams and Betti curves for filtered graphs and
//! one-dimensional functions.
//!
//! ## Theoretical Framework
//!
//! A filtration sweeps a scalar function from low to high values
//! (sublevel sets) or from high to low (superlevel sets). Along the way
//! connected components appear and merge; persistent homology records
//! every component as a pair (birth, death). The resulting diagram is a
//! compact topological signature of the input.
//!
//! ### Inputs
//!
//! 1. **Filtered graphs**: vertex and edge values, e.g. from a distance or
//!    height filtration of vertex coordinates
//!
//! 2. **1D functions**: a sequence of samples treated as a piecewise-linear
//!    function; its diagram encodes the merge tree (sublevel) or split
//!    tree (superlevel)
//!
//! ### Outputs
//!
//! - `PersistenceDiagram`: (creation, destruction) pairs
//! - `BettiCurve`: number of alive features at every threshold
//! - Entropy, feature vectors and persistence images for downstream use
//!
//! ## Example
//!
//! ```
//! use tda_persistence::{function_persistence, make_betti_curve, FiltrationOrder};
//!
//! let pd = function_persistence(&[3.0, 1.0, 6.0, 5.0, 8.0], FiltrationOrder::Sublevel).unwrap();
//! let curve = make_betti_curve(&pd).unwrap();
//! assert_eq!(curve.evaluate(1.0), 1.0);
//! ```
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Beketayev et al., "Measuring the Distance between Merge Trees" (2014)
//! - Hofer et al., "Graph Filtration Learning" (2020)

pub mod error;
pub mod topology;
pub mod information;

pub use error::{PersistenceError, Result};

// Re-exports from topology
pub use topology::{
    // Filtration and connectivity
    FiltrationOrder,
    DisjointSetForest,
    // Diagrams
    PersistenceDiagram,
    FilteredGraph,
    graph_persistence,
    function_persistence,
    // Curves
    BettiCurve,
    make_betti_curve,
};

// Re-exports from information
pub use information::{
    persistent_entropy,
    TopologicalEntropy,
    featurise_distances,
    featurise_pairwise_distances,
    PersistenceImage,
    PersistenceImageConfig,
};
