//! Piecewise-linear interpolation with linear extrapolation.
//!
//! Inside the grid the value is the usual two-point blend of the bracketing
//! nodes. Outside it, the first (or last) segment is extended, so queries far
//! from the grid follow the line through the two boundary nodes instead of
//! failing.

use log::trace;

use crate::error::{Error, Result};

/// Linear interpolant over a strictly increasing grid.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolant {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl LinearInterpolant {
    /// Build from paired nodes.
    ///
    /// Nodes are sorted by `x` first; at least two distinct, finite nodes are
    /// required.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::InvalidGrid(format!(
                "x and y must have the same length (got {} and {})",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(Error::InvalidGrid(format!(
                "need at least 2 nodes, got {}",
                x.len()
            )));
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(Error::InvalidGrid("nodes must be finite".into()));
        }

        let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        if pairs.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(Error::InvalidGrid("x values must be distinct".into()));
        }

        let (x, y) = pairs.into_iter().unzip();
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Evaluate at a single point.
    pub fn value(&self, xq: f64) -> f64 {
        let n = self.x.len();
        let lo = if xq < self.x[0] {
            trace!("extrapolating below grid: x={xq} < {}", self.x[0]);
            0
        } else if xq > self.x[n - 1] {
            trace!("extrapolating above grid: x={xq} > {}", self.x[n - 1]);
            n - 2
        } else {
            let idx = self.x.partition_point(|v| *v <= xq);
            idx.saturating_sub(1).min(n - 2)
        };

        let (x0, x1) = (self.x[lo], self.x[lo + 1]);
        let (y0, y1) = (self.y[lo], self.y[lo + 1]);
        let w = (xq - x0) / (x1 - x0);
        (1.0 - w) * y0 + w * y1
    }

    /// Evaluate at each point of `xs`.
    pub fn values(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&xq| self.value(xq)).collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn reproduces_nodes() {
        let xp = [0.0, 0.5, 1.0, 2.0];
        let fp = [3.0, -1.0, 4.0, 1.5];
        let interp = LinearInterpolant::new(&xp, &fp).unwrap();
        for (x, y) in xp.iter().zip(fp) {
            assert_eq!(interp.value(*x), y);
        }
    }

    #[test]
    fn blends_between_nodes() {
        let interp = LinearInterpolant::new(&[0.0, 1.0, 2.0], &[0.0, 10.0, 20.0]).unwrap();
        let v = interp.values(&[0.5, 1.5]);
        assert_relative_eq!(v[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(v[1], 15.0, epsilon = 1e-12);
    }

    #[test]
    fn extrapolates_from_boundary_segments() {
        let interp = LinearInterpolant::new(&[1.0, 2.0, 3.0, 5.0], &[10.0, 20.0, 25.0, 45.0]).unwrap();
        // Left segment slope 10, right segment slope 10.
        assert_relative_eq!(interp.value(-1.0), -10.0, epsilon = 1e-12);
        assert_relative_eq!(interp.value(10.0), 95.0, epsilon = 1e-12);
    }

    #[test]
    fn unsorted_input_is_sorted() {
        let interp = LinearInterpolant::new(&[2.0, 0.0, 1.0], &[4.0, 0.0, 1.0]).unwrap();
        assert_eq!(interp.x(), &[0.0, 1.0, 2.0]);
        assert_relative_eq!(interp.value(1.5), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_grids() {
        assert!(LinearInterpolant::new(&[1.0], &[1.0]).is_err());
        assert!(LinearInterpolant::new(&[0.0, 1.0], &[1.0]).is_err());
        assert!(LinearInterpolant::new(&[0.0, 0.0], &[1.0, 2.0]).is_err());
        assert!(LinearInterpolant::new(&[0.0, f64::NAN], &[1.0, 2.0]).is_err());
    }
}
