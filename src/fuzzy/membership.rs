//! Membership Functions
//!
//! Pure shape evaluators mapping a crisp value to a degree of membership.
//! Shapes are validated once at construction; evaluation never fails and
//! accepts any real input.

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::domain::Domain;
use super::error::{FuzzyError, Result};

/// Denominator substituted for a zero-width rising or falling edge.
///
/// Coincident breakpoints (`a == b`, `b == c`, ...) are accepted and turned
/// into a near-vertical edge instead of an error. At a tolerance of `1e-6`
/// the edge is indistinguishable from a step for any domain sampled coarser
/// than a micro-unit.
pub const DEGENERATE_SPAN: f64 = 1e-6;

/// Shape parameters as written in a knowledge base file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// Zero outside `(a, c)`, peak of 1 at `b`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Zero outside `(a, d)`, plateau of 1 on `(b, c]`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// `amplitude * exp(-(x - center)^2 / (2 * width^2))`, not clamped.
    Gaussian { amplitude: f64, center: f64, width: f64 },
}

/// A validated membership function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Shape", into = "Shape")]
pub struct MembershipFunction(Shape);

impl MembershipFunction {
    /// Requires finite breakpoints with `a <= b <= c`.
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        ensure_ordered("triangular", &[a, b, c])?;
        Ok(Self(Shape::Triangular { a, b, c }))
    }

    /// Requires finite breakpoints with `a <= b <= c <= d`.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        ensure_ordered("trapezoidal", &[a, b, c, d])?;
        Ok(Self(Shape::Trapezoidal { a, b, c, d }))
    }

    /// Requires `amplitude` in `[0, 1]` and a strictly positive `width`.
    pub fn gaussian(amplitude: f64, center: f64, width: f64) -> Result<Self> {
        let invalid = |reason: String| FuzzyError::InvalidShape { shape: "gaussian", reason };

        if !(amplitude.is_finite() && center.is_finite() && width.is_finite()) {
            return Err(invalid("parameters must be finite".to_string()));
        }
        if !(0.0..=1.0).contains(&amplitude) {
            return Err(invalid(format!("amplitude {} outside [0, 1]", amplitude)));
        }
        if width <= 0.0 {
            return Err(invalid(format!("width {} must be positive", width)));
        }
        Ok(Self(Shape::Gaussian { amplitude, center, width }))
    }

    pub fn shape(&self) -> &Shape {
        &self.0
    }

    /// Degree of membership of a single crisp value.
    pub fn degree(&self, x: f64) -> f64 {
        match self.0 {
            Shape::Triangular { a, b, c } => {
                if a < x && x <= b {
                    (x - a) / span(a, b)
                } else if b < x && x < c {
                    (c - x) / span(b, c)
                } else {
                    0.0
                }
            }
            Shape::Trapezoidal { a, b, c, d } => {
                if a < x && x <= b {
                    (x - a) / span(a, b)
                } else if b < x && x <= c {
                    1.0
                } else if c < x && x < d {
                    (d - x) / span(c, d)
                } else {
                    0.0
                }
            }
            Shape::Gaussian { amplitude, center, width } => {
                amplitude * (-(x - center).powi(2) / (2.0 * width.powi(2))).exp()
            }
        }
    }

    /// Elementwise degrees over a sample sequence; output has the input's shape.
    pub fn evaluate(&self, xs: ArrayView1<'_, f64>) -> Array1<f64> {
        xs.mapv(|x| self.degree(x))
    }

    pub fn evaluate_domain(&self, domain: &Domain) -> Array1<f64> {
        self.evaluate(domain.samples())
    }
}

impl TryFrom<Shape> for MembershipFunction {
    type Error = FuzzyError;

    fn try_from(shape: Shape) -> Result<Self> {
        match shape {
            Shape::Triangular { a, b, c } => Self::triangular(a, b, c),
            Shape::Trapezoidal { a, b, c, d } => Self::trapezoidal(a, b, c, d),
            Shape::Gaussian { amplitude, center, width } => Self::gaussian(amplitude, center, width),
        }
    }
}

impl From<MembershipFunction> for Shape {
    fn from(mf: MembershipFunction) -> Self {
        mf.0
    }
}

fn span(lo: f64, hi: f64) -> f64 {
    if hi == lo {
        DEGENERATE_SPAN
    } else {
        hi - lo
    }
}

fn ensure_ordered(shape: &'static str, breakpoints: &[f64]) -> Result<()> {
    if breakpoints.iter().any(|p| !p.is_finite()) {
        return Err(FuzzyError::InvalidShape {
            shape,
            reason: "breakpoints must be finite".to_string(),
        });
    }
    if breakpoints.windows(2).any(|w| w[0] > w[1]) {
        return Err(FuzzyError::InvalidShape {
            shape,
            reason: format!("breakpoints {:?} are not non-decreasing", breakpoints),
        });
    }
    Ok(())
}
