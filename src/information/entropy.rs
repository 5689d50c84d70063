//! Persistent Entropy: Information Content of Persistence Diagrams
//!
//! Quantifies how evenly the total persistence of a diagram is spread
//! over its pairs (Rucco et al., "Characterisation of the Idiotypic
//! Immune Network Through Persistent Entropy").

use crate::topology::PersistenceDiagram;

/// Entropy summary of one diagram
#[derive(Debug, Clone, Copy)]
pub struct TopologicalEntropy {
    /// Persistent entropy in bits
    pub persistent_entropy: f64,
    /// Entropy divided by log₂(number of pairs), in [0, 1]
    pub normalized_entropy: f64,
    /// Sum of all persistence values (normalization constant)
    pub total_persistence: f64,
}

impl TopologicalEntropy {
    pub fn from_diagram(pd: &PersistenceDiagram) -> Self {
        let persistent_entropy = persistent_entropy(pd);
        let total_persistence = pd.persistence_values().iter().sum();

        let normalized_entropy = if pd.len() > 1 {
            persistent_entropy / (pd.len() as f64).log2()
        } else {
            0.0
        };

        Self {
            persistent_entropy,
            normalized_entropy,
            total_persistence,
        }
    }
}

/// Persistent (Shannon) entropy of a diagram, base 2
///
/// H = -Σᵢ pᵢ log₂(pᵢ)
///
/// where pᵢ = lᵢ / L, lᵢ = |cᵢ - dᵢ| and L = Σⱼ lⱼ. An empty diagram, or
/// one whose pairs all lie on the diagonal, has entropy 0.
pub fn persistent_entropy(pd: &PersistenceDiagram) -> f64 {
    let lifetimes = pd.persistence_values();

    let total: f64 = lifetimes.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let mut entropy = 0.0;
    for l in &lifetimes {
        let p = l / total;
        if p > 0.0 {
            entropy -= p * p.log2();
        }
    }

    entropy
}
