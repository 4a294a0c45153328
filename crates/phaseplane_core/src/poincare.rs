//! First-return map on the positive x-axis.

use crate::field::{Point, VectorField};
use crate::solvers::IntegrationMode;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Caps controlling when a trajectory counts as returned or lost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoincareSettings {
    /// Steps taken unconditionally before a return may be recognised, so the
    /// trajectory leaves the starting ray first.
    pub min_steps: usize,
    /// The step budget is `divergence_factor / |eps|`.
    pub divergence_factor: f64,
}

impl Default for PoincareSettings {
    fn default() -> Self {
        Self {
            min_steps: 10,
            divergence_factor: 50.0,
        }
    }
}

impl PoincareSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.divergence_factor.is_finite() && self.divergence_factor > 0.0) {
            bail!("divergence_factor must be positive and finite.");
        }
        Ok(())
    }

    /// Maximum number of steps for a given step size.
    pub fn step_cap(&self, eps: f64) -> usize {
        (self.divergence_factor / eps.abs()).ceil() as usize
    }
}

/// Result of following one trajectory back to the section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReturnOutcome {
    Returned { x: f64, steps: usize },
    Diverged { steps: usize },
}

impl ReturnOutcome {
    pub fn crossing(&self) -> Option<f64> {
        match self {
            ReturnOutcome::Returned { x, .. } => Some(*x),
            ReturnOutcome::Diverged { .. } => None,
        }
    }
}

pub(crate) fn validate_eps(eps: f64) -> Result<()> {
    if eps == 0.0 {
        bail!("Step size eps must be non-zero.");
    }
    if !eps.is_finite() {
        bail!("Step size eps must be finite.");
    }
    Ok(())
}

/// Integrates forward (Euler mode, step `|eps|`) from `(start_x, 0)` until the
/// trajectory is back within `|eps|` of the x-axis with `x >= 0`.
///
/// The exit test is only armed after `settings.min_steps` steps. When the
/// budget from [`PoincareSettings::step_cap`] runs out first, the outcome is
/// `Diverged`.
pub fn poincare_map(
    field: &VectorField,
    start_x: f64,
    eps: f64,
    settings: &PoincareSettings,
) -> Result<ReturnOutcome> {
    validate_eps(eps)?;
    settings.validate()?;
    if !start_x.is_finite() {
        bail!("Start point must be finite.");
    }

    let eps = eps.abs();
    let cap = settings.step_cap(eps);
    let mut stepper = IntegrationMode::Euler.build();
    let mut point = Point::on_x_axis(start_x);
    let mut steps = 0usize;

    while steps < settings.min_steps
        || !point.is_finite()
        || point.x < 0.0
        || point.y.abs() > eps
    {
        if steps >= cap || !point.is_finite() {
            debug!(start_x, eps, steps, "trajectory did not return to the section");
            return Ok(ReturnOutcome::Diverged { steps });
        }
        point = stepper.advance(field, point, eps);
        steps += 1;
    }

    Ok(ReturnOutcome::Returned { x: point.x, steps })
}
