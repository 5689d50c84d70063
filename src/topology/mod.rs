//! Topology Module: 0-Dimensional Persistence and Betti Curves
//!
//! Implements the persistence engines and their shared machinery:
//! - Filtration order (sublevel / superlevel)
//! - Disjoint-set forest with directional merge
//! - Persistence of filtered graphs
//! - Merge/split-tree persistence of 1D functions
//! - Betti curves of persistence diagrams
//!
//! ## Mathematical Background
//!
//! For a scalar function f on a graph or a sequence, the sublevel sets
//! f⁻¹(-∞, t] form a nested family as t grows. Connected components are
//! born at local minima and die when they merge into an older component
//! (elder rule). Each death produces a pair (birth, death) in the
//! persistence diagram; components alive at the end of the sweep are
//! paired with the *unpaired value*.
//!
//! ## Data Flow
//!
//! ```text
//! graph / function → engine → PersistenceDiagram → BettiCurve
//! ```
//!
//! Every engine call owns its own forest; calls are independent and can
//! run in parallel across inputs, never within a single sweep.

mod filtration;
mod union_find;
mod persistence;
mod graph;
mod graph_persistence;
mod function_persistence;
mod betti;

pub use filtration::FiltrationOrder;
pub use union_find::DisjointSetForest;
pub use persistence::PersistenceDiagram;
pub use graph::FilteredGraph;
pub use graph_persistence::graph_persistence;
pub use function_persistence::{
    classify,
    function_persistence,
    Link,
    MergePlan,
    PointKind,
};
pub use betti::{BettiCurve, make_betti_curve};
