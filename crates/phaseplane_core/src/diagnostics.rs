//! Step-size tuning helpers: integrator local error and the self-consistency
//! of the return map at a given step size.

use crate::field::{Point, VectorField};
use crate::fixed_point::{find_fixed_point, FixedPointOutcome, SecantSettings};
use crate::poincare::{poincare_map, validate_eps};
use crate::solvers::IntegrationMode;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticSettings {
    pub start: Point,
    /// Iterations compared by [`local_error`].
    pub error_steps: usize,
    /// Bracket handed to the fixed-point search.
    pub bracket: (f64, f64),
    /// Start of the return-map probe when no fixed point is found.
    pub probe_x: f64,
    pub secant: SecantSettings,
}

impl Default for DiagnosticSettings {
    fn default() -> Self {
        Self {
            start: Point::new(1.0, 0.0),
            error_steps: 1000,
            bracket: (0.5, 5.0),
            probe_x: 1.0,
            secant: SecantSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepSizeReport {
    pub tau: f64,
    pub local_error: f64,
    /// `None` when the return map diverged at this step size.
    pub discrepancy: Option<f64>,
}

/// Largest distance, over `steps` iterations, between a trajectory stepped
/// with `tau` and one stepped twice with `tau / 2` (Runge-Kutta mode).
pub fn local_error(field: &VectorField, start: Point, tau: f64, steps: usize) -> Result<f64> {
    validate_eps(tau)?;
    if !start.is_finite() {
        bail!("Start point must be finite.");
    }

    let mut coarse = IntegrationMode::RungeKutta.build();
    let mut fine = IntegrationMode::RungeKutta.build();
    let (mut a, mut b) = (start, start);
    let mut max = 0.0f64;
    for _ in 0..steps {
        a = coarse.advance(field, a, tau);
        b = fine.advance(field, b, tau / 2.0);
        b = fine.advance(field, b, tau / 2.0);
        max = max.max(a.distance_squared(&b).sqrt());
    }
    Ok(max)
}

/// `|x - P(x)|` at the fixed point found in `settings.bracket`, or, when the
/// search fails, at `x = P(probe_x)`.
pub fn return_map_discrepancy(
    field: &VectorField,
    tau: f64,
    settings: &DiagnosticSettings,
) -> Result<Option<f64>> {
    let poincare = &settings.secant.poincare;
    let (lo, hi) = settings.bracket;

    let a = match find_fixed_point(field, lo, hi, tau, &settings.secant)? {
        FixedPointOutcome::Found { x, .. } => x,
        other => {
            debug!(tau, ?other, "no fixed point, probing the return map instead");
            match poincare_map(field, settings.probe_x, tau, poincare)?.crossing() {
                Some(x) => x,
                None => return Ok(None),
            }
        }
    };
    let b = poincare_map(field, a, tau, poincare)?.crossing();
    Ok(b.map(|b| (a - b).abs()))
}

pub fn step_size_report(
    field: &VectorField,
    taus: &[f64],
    settings: &DiagnosticSettings,
) -> Result<Vec<StepSizeReport>> {
    taus.iter()
        .map(|&tau| {
            Ok(StepSizeReport {
                tau,
                local_error: local_error(field, settings.start, tau, settings.error_steps)?,
                discrepancy: return_map_discrepancy(field, tau, settings)?,
            })
        })
        .collect()
}
