//! Persistence Images: Rasterised Persistence Diagrams
//!
//! Each pair (c, d) of a diagram is replaced by an isotropic Gaussian
//! centred at (c, d), weighted by a ramp of its persistence, and the sum
//! is sampled at the cell centres of a regular grid (Adams et al.,
//! "Persistence Images: A Stable Vector Representation of Persistent
//! Homology").
//!
//! Rows of the resulting array run along the destruction axis, columns
//! along the creation axis. Fixing the bounds in the configuration puts
//! several diagrams on a common grid.

use std::f64::consts::PI;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PersistenceError, Result};
use crate::topology::PersistenceDiagram;

/// Configuration of the rasterisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceImageConfig {
    /// Number of cells along each axis
    pub resolution: usize,
    /// Standard deviation of the Gaussian kernel
    pub sigma: f64,
    /// Persistence at which a pair reaches full weight
    pub max_persistence: f64,
    /// Creation-axis range; taken from the diagram when unset
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    /// Destruction-axis range; taken from the diagram when unset
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

impl Default for PersistenceImageConfig {
    fn default() -> Self {
        Self {
            resolution: 20,
            sigma: 0.2,
            max_persistence: 1.0,
            x_min: None,
            x_max: None,
            y_min: None,
            y_max: None,
        }
    }
}

/// Persistence image transformer
#[derive(Debug, Clone)]
pub struct PersistenceImage {
    config: PersistenceImageConfig,
}

impl PersistenceImage {
    pub fn new(config: PersistenceImageConfig) -> Result<Self> {
        if config.resolution == 0 {
            return Err(PersistenceError::InvalidParameter(
                "persistence image resolution must be positive".to_string(),
            ));
        }
        if !(config.sigma.is_finite() && config.sigma > 0.0) {
            return Err(PersistenceError::InvalidParameter(format!(
                "kernel sigma must be positive and finite, got {}",
                config.sigma
            )));
        }
        if config.max_persistence.is_nan() || config.max_persistence <= 0.0 {
            return Err(PersistenceError::InvalidParameter(format!(
                "max persistence must be positive, got {}",
                config.max_persistence
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &PersistenceImageConfig {
        &self.config
    }

    /// Rasterise a diagram into a `resolution × resolution` array
    pub fn transform(&self, pd: &PersistenceDiagram) -> Array2<f64> {
        let n = self.config.resolution;
        let mut image = Array2::<f64>::zeros((n, n));
        if pd.is_empty() {
            return image;
        }

        let creations: Vec<f64> = pd.iter().map(|(c, _)| c).collect();
        let destructions: Vec<f64> = pd.iter().map(|(_, d)| d).collect();

        let xs = cell_centres(
            self.config.x_min.unwrap_or_else(|| min(&creations)),
            self.config.x_max.unwrap_or_else(|| max(&creations)),
            n,
        );
        let ys = cell_centres(
            self.config.y_min.unwrap_or_else(|| min(&destructions)),
            self.config.y_max.unwrap_or_else(|| max(&destructions)),
            n,
        );

        let sigma = self.config.sigma;
        for (c, d) in pd.iter() {
            let w = self.weight((d - c).abs());
            if w == 0.0 {
                continue;
            }
            for (i, &y) in ys.iter().enumerate() {
                for (j, &x) in xs.iter().enumerate() {
                    image[[i, j]] += w * gaussian(x, y, c, d, sigma);
                }
            }
        }

        debug!(n_pairs = pd.len(), resolution = n, "persistence image computed");
        image
    }

    /// Linear ramp from 0 (on the diagonal) to 1 (at `max_persistence`)
    fn weight(&self, persistence: f64) -> f64 {
        if persistence <= 0.0 {
            0.0
        } else if persistence < self.config.max_persistence {
            persistence / self.config.max_persistence
        } else {
            1.0
        }
    }
}

fn cell_centres(lo: f64, hi: f64, n: usize) -> Array1<f64> {
    let step = (hi - lo) / n as f64;
    Array1::from_iter((0..n).map(|i| lo + (i as f64 + 0.5) * step))
}

fn gaussian(x: f64, y: f64, ux: f64, uy: f64, sigma: f64) -> f64 {
    let s2 = sigma * sigma;
    (-((x - ux).powi(2) + (y - uy).powi(2)) / (2.0 * s2)).exp() / (2.0 * PI * s2)
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded(resolution: usize) -> PersistenceImageConfig {
        PersistenceImageConfig {
            resolution,
            x_min: Some(-1.0),
            x_max: Some(1.0),
            y_min: Some(0.0),
            y_max: Some(2.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_point_is_symmetric() {
        let image = PersistenceImage::new(bounded(2)).unwrap();
        let pd = PersistenceDiagram::from_pairs(vec![(0.0, 1.0)]);
        let raster = image.transform(&pd);

        assert_eq!(raster.dim(), (2, 2));
        let expected = gaussian(0.5, 0.5, 0.0, 0.0, 0.2);
        for v in raster.iter() {
            assert!((v - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_weight_ramp() {
        let image = PersistenceImage::new(PersistenceImageConfig {
            max_persistence: 2.0,
            ..bounded(4)
        })
        .unwrap();

        let full = image.transform(&PersistenceDiagram::from_pairs(vec![(0.0, 2.0)]));
        let half = image.transform(&PersistenceDiagram::from_pairs(vec![(0.0, 1.0)]));
        assert!(full.sum() > half.sum());

        let diagonal = image.transform(&PersistenceDiagram::from_pairs(vec![(1.0, 1.0)]));
        assert_eq!(diagonal.sum(), 0.0);
    }

    #[test]
    fn test_weight_follows_persistence_not_position() {
        let image = PersistenceImage::new(PersistenceImageConfig {
            resolution: 3,
            max_persistence: 2.0,
            ..Default::default()
        })
        .unwrap();

        // Same lifetime, shifted along the diagonal: same mass
        let low = image.transform(&PersistenceDiagram::from_pairs(vec![(0.0, 1.0)]));
        let high = image.transform(&PersistenceDiagram::from_pairs(vec![(3.0, 4.0)]));
        assert!((low.sum() - high.sum()).abs() < 1e-10);

        let far_diagonal = image.transform(&PersistenceDiagram::from_pairs(vec![(5.0, 5.0)]));
        assert_eq!(far_diagonal.sum(), 0.0);
    }

    #[test]
    fn test_empty_diagram() {
        let image = PersistenceImage::new(PersistenceImageConfig::default()).unwrap();
        let raster = image.transform(&PersistenceDiagram::new());
        assert_eq!(raster.dim(), (20, 20));
        assert_eq!(raster.sum(), 0.0);
    }

    #[test]
    fn test_invalid_config() {
        let zero = PersistenceImageConfig { resolution: 0, ..Default::default() };
        assert!(PersistenceImage::new(zero).is_err());

        let flat = PersistenceImageConfig { sigma: 0.0, ..Default::default() };
        assert!(PersistenceImage::new(flat).is_err());

        let weightless = PersistenceImageConfig { max_persistence: -1.0, ..Default::default() };
        assert!(PersistenceImage::new(weightless).is_err());
    }
}
