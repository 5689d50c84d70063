//! Filtered Graphs
//!
//! A graph whose vertices and edges carry scalar filtration values.
//! Vertex coordinates, when present, are stored as rows of an
//! `Array2<f64>` and turned into filtration values by one of two
//! transforms:
//!
//! - **Distance filtration**: vertices at 0, each edge at the Lᵖ distance
//!   between its endpoints
//! - **Height filtration**: vertices at ⟨x_v, d⟩ for a direction d, each
//!   edge at the maximum of its endpoints (Persistent Homology Transform)

use ndarray::{Array2, ArrayView1};

use crate::error::{ensure_len, ensure_no_nan, PersistenceError, Result};
use super::{graph_persistence, FiltrationOrder, PersistenceDiagram};

/// Graph with per-vertex and per-edge filtration values
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredGraph {
    n_vertices: usize,
    edges: Vec<(usize, usize)>,
    vertex_weights: Vec<f64>,
    edge_weights: Vec<f64>,
}

impl FilteredGraph {
    /// Create a graph with all filtration values set to zero
    pub fn new(n_vertices: usize, edges: Vec<(usize, usize)>) -> Result<Self> {
        for &(u, v) in &edges {
            for endpoint in [u, v] {
                if endpoint >= n_vertices {
                    return Err(PersistenceError::VertexOutOfRange {
                        index: i64::try_from(endpoint).unwrap_or(i64::MAX),
                        n_vertices,
                    });
                }
            }
        }

        let n_edges = edges.len();
        Ok(Self {
            n_vertices,
            edges,
            vertex_weights: vec![0.0; n_vertices],
            edge_weights: vec![0.0; n_edges],
        })
    }

    /// Builder-style assignment of both weight vectors
    pub fn with_weights(mut self, vertex_weights: Vec<f64>, edge_weights: Vec<f64>) -> Result<Self> {
        self.set_vertex_weights(vertex_weights)?;
        self.set_edge_weights(edge_weights)?;
        Ok(self)
    }

    pub fn set_vertex_weights(&mut self, weights: Vec<f64>) -> Result<()> {
        ensure_len("vertex weights", self.n_vertices, weights.len())?;
        ensure_no_nan("vertex weight", &weights)?;
        self.vertex_weights = weights;
        Ok(())
    }

    pub fn set_edge_weights(&mut self, weights: Vec<f64>) -> Result<()> {
        ensure_len("edge weights", self.edges.len(), weights.len())?;
        ensure_no_nan("edge weight", &weights)?;
        self.edge_weights = weights;
        Ok(())
    }

    pub fn n_vertices(&self) -> usize {
        self.n_vertices
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn vertex_weights(&self) -> &[f64] {
        &self.vertex_weights
    }

    pub fn edge_weights(&self) -> &[f64] {
        &self.edge_weights
    }

    /// Distance filtration from vertex coordinates.
    ///
    /// # Arguments
    /// * `positions` - One row of coordinates per vertex
    /// * `p` - Order of the distance (2 for Euclidean, `f64::INFINITY` for max)
    ///
    /// # Returns
    /// * A copy of the graph with vertex weights 0 and edge weights set
    ///   to the Lᵖ distance between endpoints
    pub fn distance_filtration(&self, positions: &Array2<f64>, p: f64) -> Result<Self> {
        ensure_len("position rows", self.n_vertices, positions.nrows())?;
        if p.is_nan() || p < 1.0 {
            return Err(PersistenceError::InvalidParameter(format!(
                "distance order must be at least 1, got {p}"
            )));
        }

        let edge_weights = self
            .edges
            .iter()
            .map(|&(u, v)| lp_distance(positions.row(u), positions.row(v), p))
            .collect();

        let mut graph = self.clone();
        graph.vertex_weights = vec![0.0; self.n_vertices];
        graph.set_edge_weights(edge_weights)?;
        Ok(graph)
    }

    /// Height filtration in a given direction.
    ///
    /// Vertex weights are the projections ⟨x_v, direction⟩; an edge enters
    /// the (sublevel) filtration together with its higher endpoint.
    pub fn height_filtration(&self, positions: &Array2<f64>, direction: ArrayView1<f64>) -> Result<Self> {
        ensure_len("position rows", self.n_vertices, positions.nrows())?;
        if positions.ncols() != direction.len() {
            return Err(PersistenceError::DimensionMismatch {
                expected: positions.ncols(),
                actual: direction.len(),
            });
        }

        let heights = positions.dot(&direction).to_vec();
        let edge_weights = self
            .edges
            .iter()
            .map(|&(u, v)| heights[u].max(heights[v]))
            .collect();

        let mut graph = self.clone();
        graph.set_vertex_weights(heights)?;
        graph.set_edge_weights(edge_weights)?;
        Ok(graph)
    }

    /// Dimension 0 and dimension 1 persistence diagrams of this graph
    pub fn persistence_diagrams(&self, order: FiltrationOrder) -> (PersistenceDiagram, PersistenceDiagram) {
        graph_persistence::compute(&self.vertex_weights, &self.edges, &self.edge_weights, order)
    }
}

fn lp_distance(a: ArrayView1<f64>, b: ArrayView1<f64>, p: f64) -> f64 {
    let diffs = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs());
    if p.is_infinite() {
        diffs.fold(0.0, f64::max)
    } else {
        diffs.map(|d| d.powf(p)).sum::<f64>().powf(1.0 / p)
    }
}
