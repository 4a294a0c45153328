//! Linear classification of the equilibrium at the origin.
//!
//! Only the degree-1 coefficients of P and Q are read. Higher-order terms are
//! ignored entirely, so the result describes the linearization at the origin
//! and says nothing about non-hyperbolic cases where nonlinear terms decide
//! stability (a linear center may be a weak focus of the full system).

use crate::field::VectorField;
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::fmt;

const FUZZY_ABS: f64 = 1e-12;
const FUZZY_REL: f64 = 1e-12;

fn fuzzy_zero(value: f64) -> bool {
    value.abs() <= FUZZY_ABS
}

fn fuzzy_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= FUZZY_ABS.max(FUZZY_REL * a.abs().max(b.abs()))
}

/// Eigenvalues of the linear part `[[a, b], [c, d]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EigenPair {
    /// `((a + d) + sqrt(disc)) / 2`
    pub first: Complex<f64>,
    /// `((a + d) - sqrt(disc)) / 2`
    pub second: Complex<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquilibriumType {
    Center,
    FocusStable,
    FocusUnstable,
    KnotStable,
    KnotUnstable,
    KnotSingularStable,
    KnotSingularUnstable,
    Saddle,
}

impl EquilibriumType {
    pub fn label(self) -> &'static str {
        match self {
            EquilibriumType::Center => "Center",
            EquilibriumType::FocusStable => "Stable focus",
            EquilibriumType::FocusUnstable => "Unstable focus",
            EquilibriumType::KnotStable => "Stable knot",
            EquilibriumType::KnotUnstable => "Unstable knot",
            EquilibriumType::KnotSingularStable => "Stable singular knot",
            EquilibriumType::KnotSingularUnstable => "Unstable singular knot",
            EquilibriumType::Saddle => "Saddle",
        }
    }
}

impl fmt::Display for EquilibriumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed-form eigenvalues of the linear part at the origin.
/// A negative discriminant yields a complex-conjugate pair.
pub fn eigenvalues(field: &VectorField) -> EigenPair {
    let m = field.linear_part();
    let (a, b, c, d) = (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);

    let disc = (a - d) * (a - d) + 4.0 * b * c;
    let root = Complex::new(disc, 0.0).sqrt();
    let trace = Complex::new(a + d, 0.0);

    EigenPair {
        first: (trace + root) / 2.0,
        second: (trace - root) / 2.0,
    }
}

pub fn classify_eigenvalues(pair: &EigenPair) -> EquilibriumType {
    let (l1, l2) = (pair.first, pair.second);

    if fuzzy_zero(l1.re) && fuzzy_zero(l2.re) {
        return EquilibriumType::Center;
    }

    if fuzzy_zero(l1.im) && fuzzy_zero(l2.im) {
        if fuzzy_equal(l1.re, l2.re) {
            return if l1.re > 0.0 {
                EquilibriumType::KnotSingularUnstable
            } else {
                EquilibriumType::KnotSingularStable
            };
        }
        return match (l1.re > 0.0, l2.re > 0.0) {
            (true, true) => EquilibriumType::KnotUnstable,
            (false, false) if l1.re < 0.0 && l2.re < 0.0 => EquilibriumType::KnotStable,
            _ => EquilibriumType::Saddle,
        };
    }

    if l1.re > 0.0 {
        EquilibriumType::FocusUnstable
    } else {
        EquilibriumType::FocusStable
    }
}

/// Qualitative type of the equilibrium at the origin.
pub fn classify_origin(field: &VectorField) -> EquilibriumType {
    classify_eigenvalues(&eigenvalues(field))
}
