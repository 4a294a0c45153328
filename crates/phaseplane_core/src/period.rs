use crate::field::{Point, VectorField};
use crate::poincare::validate_eps;
use crate::solvers::IntegrationMode;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodSettings {
    /// Steps taken before closure is checked.
    pub min_steps: usize,
    /// The step budget is `divergence_factor / |eps|`.
    pub divergence_factor: f64,
}

impl Default for PeriodSettings {
    fn default() -> Self {
        Self {
            min_steps: 5,
            divergence_factor: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PeriodOutcome {
    Closed { period: f64, steps: usize },
    /// The orbit never came back within `|eps|/2` of its start.
    Unclosed { steps: usize },
}

impl PeriodOutcome {
    pub fn period(&self) -> Option<f64> {
        match self {
            PeriodOutcome::Closed { period, .. } => Some(*period),
            PeriodOutcome::Unclosed { .. } => None,
        }
    }
}

/// Integrates (Runge-Kutta mode) from `(static_point, 0)` until the orbit is
/// back within `|eps|/2` of where it started and reports the elapsed time
/// `steps * |eps|`.
pub fn estimate_period(
    field: &VectorField,
    static_point: f64,
    eps: f64,
    settings: &PeriodSettings,
) -> Result<PeriodOutcome> {
    validate_eps(eps)?;
    if !static_point.is_finite() {
        bail!("Start point must be finite.");
    }
    if !(settings.divergence_factor.is_finite() && settings.divergence_factor > 0.0) {
        bail!("divergence_factor must be positive and finite.");
    }

    let eps = eps.abs();
    let cap = (settings.divergence_factor / eps).ceil() as usize;
    let threshold = (eps / 2.0) * (eps / 2.0);
    let start = Point::on_x_axis(static_point);
    let mut stepper = IntegrationMode::RungeKutta.build();
    let mut point = start;
    let mut steps = 0usize;

    while steps < cap {
        point = stepper.advance(field, point, eps);
        steps += 1;
        if !point.is_finite() {
            break;
        }
        if steps >= settings.min_steps && point.distance_squared(&start) < threshold {
            return Ok(PeriodOutcome::Closed {
                period: steps as f64 * eps,
                steps,
            });
        }
    }

    debug!(static_point, eps, steps, "orbit did not close");
    Ok(PeriodOutcome::Unclosed { steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{drift, harmonic, unit_limit_cycle};
    use std::f64::consts::PI;

    #[test]
    fn harmonic_oscillator_period_is_two_pi() {
        for eps in [0.1, 0.01, 0.001] {
            let outcome = estimate_period(&harmonic(), 1.0, eps, &PeriodSettings::default())
                .expect("period should run");
            let period = outcome.period().expect("orbit should close");
            assert!((period - 2.0 * PI).abs() < 2.0 * eps, "eps {eps}: {period}");
        }
    }

    #[test]
    fn limit_cycle_period_is_two_pi() {
        let outcome = estimate_period(&unit_limit_cycle(), 1.0, 0.05, &PeriodSettings::default())
            .expect("period should run");
        let period = outcome.period().expect("orbit should close");
        assert!((period - 2.0 * PI).abs() < 0.1, "{period}");
    }

    #[test]
    fn min_steps_can_skip_a_whole_revolution() {
        let settings = PeriodSettings {
            min_steps: 700,
            ..PeriodSettings::default()
        };
        let outcome = estimate_period(&harmonic(), 1.0, 0.01, &settings).expect("period");
        let period = outcome.period().expect("orbit should close");
        assert!((period - 4.0 * PI).abs() < 0.02, "{period}");
    }

    #[test]
    fn open_orbit_hits_the_cap() {
        let settings = PeriodSettings {
            min_steps: 5,
            divergence_factor: 2.0,
        };
        let outcome = estimate_period(&drift(), 1.0, 0.25, &settings).expect("period");
        assert_eq!(outcome, PeriodOutcome::Unclosed { steps: 8 });
        assert_eq!(outcome.period(), None);
    }

    #[test]
    fn rejects_zero_step() {
        let err = estimate_period(&harmonic(), 1.0, 0.0, &PeriodSettings::default())
            .expect_err("zero eps must fail");
        assert!(err.to_string().contains("non-zero"));
    }
}
