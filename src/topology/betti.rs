//! Betti Curves: Active Features Across the Filtration
//!
//! The Betti curve of a persistence diagram counts, for every threshold
//! t, the pairs (c, d) that are alive at t. It is a step function with
//! compact support, constant on half-open intervals [tᵢ, tᵢ₊₁).
//!
//! ## Representation
//!
//! A curve is an ordered list of (threshold, value) samples. Between two
//! consecutive change points the builder stores an extra sample at the
//! floating-point predecessor of the later threshold, carrying the
//! earlier value:
//!
//! ```text
//!   value
//!     3 |            ●━━━━━●
//!     2 |  ●━━━━━━━━━●     |
//!     1 |                  ●━━━━━●
//!     0 +--+---------+-----+-----+---> t
//!          t₀      t₁⁻ t₁   t₂⁻ t₂ ...
//! ```
//!
//! Evaluating exactly at t₁ therefore yields the new value while any
//! point strictly between t₀ and t₁ yields the old one.

use std::iter::Sum;
use std::ops::{Add, Div, Neg, Sub};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Step function over the filtration axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BettiCurve {
    samples: Vec<(f64, f64)>,
}

/// Build the Betti curve of any iterable of (creation, destruction) pairs.
///
/// Returns `None` for an empty diagram.
pub fn make_betti_curve<I>(diagram: I) -> Option<BettiCurve>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    BettiCurve::from_diagram(diagram)
}

/// A creation (+1) or destruction (-1) at some threshold
#[derive(Debug, Clone, Copy)]
struct Event {
    threshold: f64,
    delta: i64,
}

/// Sweep state: collapses all events at one threshold into a single
/// level and inserts the half-open transition samples.
#[derive(Debug)]
struct StepAccumulator {
    samples: Vec<(f64, f64)>,
    threshold: f64,
    level: i64,
}

impl StepAccumulator {
    fn new(first_threshold: f64) -> Self {
        Self {
            samples: Vec::new(),
            threshold: first_threshold,
            level: 0,
        }
    }

    /// Record the number of active pairs after an event at `threshold`
    fn observe(&mut self, threshold: f64, level: i64) {
        if threshold != self.threshold {
            self.flush();
            self.threshold = threshold;
        }
        self.level = level;
    }

    /// Emit the pending level, preceded by the closing sample of the
    /// previous interval
    fn flush(&mut self) {
        if let Some(&(_, previous)) = self.samples.last() {
            self.samples.push((next_below(self.threshold), previous));
        }
        self.samples.push((self.threshold, self.level as f64));
    }

    fn finish(mut self) -> BettiCurve {
        let recorded = matches!(self.samples.last(), Some(&(t, _)) if t == self.threshold);
        if !recorded {
            self.flush();
        }
        BettiCurve { samples: self.samples }
    }
}

/// Largest `f64` strictly below `x`
fn next_below(x: f64) -> f64 {
    if x.is_nan() || x == f64::NEG_INFINITY {
        return x;
    }
    if x == 0.0 {
        return -f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits - 1)
    } else {
        f64::from_bits(bits + 1)
    }
}

impl BettiCurve {
    /// Build the Betti curve of a diagram, `None` if it has no pairs.
    ///
    /// Pairs with a NaN coordinate have no place on the filtration axis
    /// and are skipped.
    pub fn from_diagram<I>(diagram: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut events: Vec<Event> = Vec::new();
        let mut skipped = 0usize;
        for (creation, destruction) in diagram {
            if creation.is_nan() || destruction.is_nan() {
                skipped += 1;
                continue;
            }
            events.push(Event { threshold: creation, delta: 1 });
            events.push(Event { threshold: destruction, delta: -1 });
        }

        if events.is_empty() {
            return None;
        }

        // Stable: simultaneous events keep their diagram order
        events.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));

        let mut accumulator = StepAccumulator::new(events[0].threshold);

        let mut active = 0i64;
        for event in &events {
            active += event.delta;
            accumulator.observe(event.threshold, active);
        }

        let curve = accumulator.finish();
        debug!(n_events = events.len(), n_samples = curve.len(), skipped, "betti curve built");
        Some(curve)
    }

    /// Curve from raw (threshold, value) samples, sorted by threshold
    pub fn from_samples(mut samples: Vec<(f64, f64)>) -> Self {
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { samples }
    }

    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.samples.iter().map(|&(t, _)| t).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|&(_, v)| v).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Value of the curve at `threshold`.
    ///
    /// - A stored threshold returns its value (the last one if stored twice)
    /// - A threshold between two samples returns their mean, which equals
    ///   the step value for curves produced by the builder
    /// - Anything outside the stored range returns 0
    pub fn evaluate(&self, threshold: f64) -> f64 {
        let (Some(&(lo, _)), Some(&(hi, _))) = (self.samples.first(), self.samples.last()) else {
            return 0.0;
        };
        if threshold.is_nan() || threshold < lo || threshold > hi {
            return 0.0;
        }

        let upper = self.samples.partition_point(|&(t, _)| t <= threshold);
        let (t, v) = self.samples[upper - 1];
        if t == threshold {
            return v;
        }

        // lo < threshold < hi, so both neighbours exist
        (v + self.samples[upper].1) / 2.0
    }

    /// Step value (last sample at or below `threshold`), 0 before the
    /// first sample
    fn step_value(&self, threshold: f64) -> f64 {
        let upper = self.samples.partition_point(|&(t, _)| t <= threshold);
        if upper == 0 {
            0.0
        } else {
            self.samples[upper - 1].1
        }
    }

    fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            samples: self.samples.iter().map(|&(t, v)| (t, f(v))).collect(),
        }
    }

    /// Elementwise absolute value
    pub fn abs(&self) -> Self {
        self.map_values(f64::abs)
    }

    /// Lᵖ norm of the piecewise-linear interpolation of the samples
    pub fn norm(&self, p: f64) -> f64 {
        let integral: f64 = self
            .samples
            .windows(2)
            .map(|w| segment_integral(w[0], w[1], p))
            .sum();
        integral.powf(1.0 / p)
    }

    /// Lᵖ distance between two curves
    pub fn distance(&self, other: &BettiCurve, p: f64) -> f64 {
        (self - other).abs().norm(p)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// ∫ |y|ᵖ over one linear segment, split at a sign change
fn segment_integral((x1, y1): (f64, f64), (x2, y2): (f64, f64), p: f64) -> f64 {
    let dx = x2 - x1;
    if dx <= 0.0 {
        return 0.0;
    }

    if y1 * y2 < 0.0 {
        let root = x1 - y1 * dx / (y2 - y1);
        return segment_integral((x1, y1), (root, 0.0), p) + segment_integral((root, 0.0), (x2, y2), p);
    }

    let (a, b) = (y1.abs(), y2.abs());
    if a == b {
        a.powf(p) * dx
    } else {
        dx * (b.powf(p + 1.0) - a.powf(p + 1.0)) / ((p + 1.0) * (b - a))
    }
}

/// Sorted union of the thresholds of two curves
fn merged_thresholds(a: &BettiCurve, b: &BettiCurve) -> Vec<f64> {
    let mut thresholds: Vec<f64> = a.samples.iter().chain(&b.samples).map(|&(t, _)| t).collect();
    thresholds.sort_by(f64::total_cmp);
    thresholds.dedup();
    thresholds
}

impl Add for &BettiCurve {
    type Output = BettiCurve;

    /// Re-index both curves on the union of their thresholds (forward
    /// fill, 0 before a curve starts) and add pointwise
    fn add(self, other: &BettiCurve) -> BettiCurve {
        let samples = merged_thresholds(self, other)
            .into_iter()
            .map(|t| (t, self.step_value(t) + other.step_value(t)))
            .collect();
        BettiCurve { samples }
    }
}

impl Add for BettiCurve {
    type Output = BettiCurve;

    fn add(self, other: BettiCurve) -> BettiCurve {
        &self + &other
    }
}

impl Add<f64> for &BettiCurve {
    type Output = BettiCurve;

    fn add(self, x: f64) -> BettiCurve {
        self.map_values(|v| v + x)
    }
}

impl Neg for &BettiCurve {
    type Output = BettiCurve;

    fn neg(self) -> BettiCurve {
        self.map_values(|v| -v)
    }
}

impl Sub for &BettiCurve {
    type Output = BettiCurve;

    fn sub(self, other: &BettiCurve) -> BettiCurve {
        self + &(-other)
    }
}

impl Div<f64> for &BettiCurve {
    type Output = BettiCurve;

    fn div(self, x: f64) -> BettiCurve {
        self.map_values(|v| v / x)
    }
}

impl Sum for BettiCurve {
    fn sum<I: Iterator<Item = BettiCurve>>(iter: I) -> Self {
        iter.fold(BettiCurve::default(), |acc, curve| &acc + &curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::PersistenceDiagram;

    fn simple_diagram() -> PersistenceDiagram {
        PersistenceDiagram::from_pairs(vec![
            (0.0, 1.0),
            (0.0, 6.0),
            (1.0, 2.0),
            (2.0, 3.0),
            (3.0, 6.0),
            (5.0, 8.0),
        ])
    }

    #[test]
    fn test_step_values() {
        let curve = make_betti_curve(&simple_diagram()).unwrap();

        for t in [0.0, 0.5, 1.0, 1.5, 2.0, 3.0, 4.0] {
            assert_eq!(curve.evaluate(t), 2.0, "threshold {t}");
        }
        assert_eq!(curve.evaluate(5.0), 3.0);
        assert_eq!(curve.evaluate(5.5), 3.0);
        assert_eq!(curve.evaluate(6.0), 1.0);
        assert_eq!(curve.evaluate(7.0), 1.0);
        assert_eq!(curve.evaluate(8.0), 0.0);
        assert_eq!(curve.evaluate(9.0), 0.0);
        assert_eq!(curve.evaluate(-1.0), 0.0);
    }

    #[test]
    fn test_half_open_samples() {
        let curve = make_betti_curve(vec![(0.0, 1.0)]).unwrap();
        assert_eq!(curve.samples(), &[(0.0, 1.0), (next_below(1.0), 1.0), (1.0, 0.0)]);

        // Just below the destruction the feature is still alive
        assert_eq!(curve.evaluate(next_below(1.0)), 1.0);
        assert_eq!(curve.evaluate(1.0), 0.0);
    }

    #[test]
    fn test_simultaneous_events_emit_one_sample() {
        let curve = make_betti_curve(vec![(0.0, 1.0), (0.0, 1.0), (1.0, 2.0)]).unwrap();
        let at_zero = curve.samples().iter().filter(|&&(t, _)| t == 0.0).count();
        let at_one = curve.samples().iter().filter(|&&(t, _)| t == 1.0).count();
        assert_eq!(at_zero, 1);
        assert_eq!(at_one, 1);
        assert_eq!(curve.evaluate(0.0), 2.0);
        assert_eq!(curve.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_single_threshold_diagram() {
        let curve = make_betti_curve(vec![(1.0, 1.0)]).unwrap();
        assert_eq!(curve.samples(), &[(1.0, 0.0)]);
        assert_eq!(curve.evaluate(1.0), 0.0);
    }

    #[test]
    fn test_nan_pairs_are_skipped() {
        let clean = make_betti_curve(vec![(0.0, 1.0)]).unwrap();
        let noisy = make_betti_curve(vec![(0.0, 1.0), (f64::NAN, 2.0), (0.5, f64::NAN)]).unwrap();
        assert_eq!(noisy, clean);
        assert!(noisy.thresholds().iter().all(|t| !t.is_nan()));

        assert!(make_betti_curve(vec![(f64::NAN, f64::NAN)]).is_none());
    }

    #[test]
    fn test_empty_diagram_has_no_curve() {
        assert!(make_betti_curve(&PersistenceDiagram::new()).is_none());
    }

    #[test]
    fn test_next_below() {
        assert!(next_below(1.0) < 1.0);
        assert!(next_below(-1.0) < -1.0);
        assert!(next_below(0.0) < 0.0);
        assert_eq!(next_below(f64::INFINITY), f64::MAX);
    }

    #[test]
    fn test_addition_reindexes() {
        let a = make_betti_curve(vec![(0.0, 2.0)]).unwrap();
        let b = make_betti_curve(vec![(1.0, 3.0)]).unwrap();
        let sum = &a + &b;

        assert_eq!(sum.evaluate(0.0), 1.0);
        assert_eq!(sum.evaluate(1.0), 2.0);
        assert_eq!(sum.evaluate(2.0), 1.0);
        assert_eq!(sum.evaluate(3.0), 0.0);

        let total: BettiCurve = vec![a.clone(), b.clone()].into_iter().sum();
        assert_eq!(total, sum);

        let shifted = &a + 1.0;
        assert_eq!(shifted.evaluate(0.0), 2.0);
    }

    #[test]
    fn test_difference_and_distance() {
        let a = make_betti_curve(vec![(0.0, 2.0)]).unwrap();
        let zero = &a - &a;
        assert!(zero.values().iter().all(|&v| v == 0.0));
        assert_eq!(a.distance(&a, 1.0), 0.0);

        let b = make_betti_curve(vec![(0.0, 1.0)]).unwrap();
        assert!((a.distance(&b, 1.0) - 1.0).abs() < 1e-9);

        let halved = &a / 2.0;
        assert_eq!(halved.evaluate(1.0), 0.5);
    }

    #[test]
    fn test_norm() {
        let curve = make_betti_curve(vec![(0.0, 1.0)]).unwrap();
        assert!((curve.norm(1.0) - 1.0).abs() < 1e-9);

        let two = make_betti_curve(vec![(0.0, 4.0), (0.0, 4.0)]).unwrap();
        assert!((two.norm(2.0) - 4.0).abs() < 1e-9);

        // A sign change inside a segment is integrated on both sides
        let ramp = BettiCurve::from_samples(vec![(0.0, -1.0), (2.0, 1.0)]);
        assert!((ramp.norm(1.0) - 1.0).abs() < 1e-12);
    }
}
