//! Information Module: Summaries and Vectorisations of Diagrams
//!
//! Consumers of persistence diagrams that turn them into numbers,
//! vectors, or rasters for statistics and learning:
//!
//! - **Persistent entropy**: Shannon entropy of the normalised lifetimes
//!
//!     H = -Σᵢ pᵢ log₂(pᵢ),  pᵢ = lᵢ / Σⱼ lⱼ
//!
//! - **Feature vectors**: sorted distances to the diagonal, and stable
//!   pairwise signatures
//! - **Persistence images**: Gaussian kernel density on a fixed grid
//!
//! None of these validate that creation precedes destruction; all of
//! them work on |c - d|.

mod entropy;
mod image;
mod vectorisation;

pub use entropy::{persistent_entropy, TopologicalEntropy};
pub use image::{PersistenceImage, PersistenceImageConfig};
pub use vectorisation::{featurise_distances, featurise_pairwise_distances};
