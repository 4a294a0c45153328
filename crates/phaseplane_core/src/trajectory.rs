use crate::field::{Point, VectorField};
use crate::poincare::validate_eps;
use crate::solvers::IntegrationMode;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    pub max_steps: usize,
    /// Steps before the closure test against the static point is armed.
    pub min_steps: usize,
    /// A crossing of the positive x-axis this close to the static point ends
    /// the trace.
    pub closure_tolerance: f64,
    pub mode: IntegrationMode,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            min_steps: 10,
            closure_tolerance: 1e-3,
            mode: IntegrationMode::Euler,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn signed(self, eps: f64) -> f64 {
        match self {
            Direction::Forward => eps.abs(),
            Direction::Backward => -eps.abs(),
        }
    }
}

/// Polyline of the trajectory through `start`, including `start` itself.
///
/// Stops after `max_steps` steps, on a non-finite point, or, when a positive
/// `static_point` is given, once the orbit crosses the positive x-axis within
/// `closure_tolerance` of it. A start at the origin yields only the start.
pub fn trace_trajectory(
    field: &VectorField,
    start: Point,
    eps: f64,
    direction: Direction,
    static_point: Option<f64>,
    settings: &TraceSettings,
) -> Result<Vec<Point>> {
    validate_eps(eps)?;
    if !start.is_finite() {
        bail!("Start point must be finite.");
    }

    let mut points = vec![start];
    if start == Point::default() {
        return Ok(points);
    }

    let eps = direction.signed(eps);
    let target = static_point.filter(|x| *x > 0.0);
    let mut stepper = settings.mode.build();
    let mut point = start;

    for step in 1..=settings.max_steps {
        point = stepper.advance(field, point, eps);
        if !point.is_finite() {
            break;
        }
        points.push(point);

        if let Some(target) = target {
            let on_section = point.y.abs() < eps.abs() && point.x > 0.0;
            if step >= settings.min_steps
                && on_section
                && (point.x - target).abs() <= settings.closure_tolerance
            {
                break;
            }
        }
    }

    Ok(points)
}
