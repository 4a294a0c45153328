//! Secant search for fixed points of the first-return map, i.e. the crossings
//! of periodic orbits with the positive x-axis.

use crate::field::VectorField;
use crate::poincare::{poincare_map, validate_eps, PoincareSettings};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecantSettings {
    /// Upper bound on secant rounds (two updates per round).
    pub max_iterations: usize,
    pub poincare: PoincareSettings,
}

impl Default for SecantSettings {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            poincare: PoincareSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FixedPointOutcome {
    /// `x` is mapped to within `|eps|` of itself.
    Found {
        x: f64,
        displacement: f64,
        iterations: usize,
    },
    /// The displacement has the same sign at both ends of the bracket.
    NotBracketed {
        left_displacement: f64,
        right_displacement: f64,
    },
    /// The secant update stalled (equal displacements), ran out of rounds, or
    /// closed the bracket without reaching a small displacement.
    DidNotConverge { a: f64, b: f64, iterations: usize },
    /// The return map found no crossing when started from `start_x`.
    Diverged { start_x: f64 },
}

impl FixedPointOutcome {
    pub fn fixed_point(&self) -> Option<f64> {
        match self {
            FixedPointOutcome::Found { x, .. } => Some(*x),
            _ => None,
        }
    }
}

/// Root of the line through `(p, dp)` and `(q, dq)`, anchored at `q`.
/// `None` when the line is horizontal or the result is not finite.
fn secant_step(p: f64, dp: f64, q: f64, dq: f64) -> Option<f64> {
    let denom = dq - dp;
    if denom == 0.0 {
        return None;
    }
    let next = q - (q - p) * dq / denom;
    next.is_finite().then_some(next)
}

fn displacement(
    field: &VectorField,
    t: f64,
    eps: f64,
    settings: &PoincareSettings,
) -> Result<Option<f64>> {
    Ok(poincare_map(field, t, eps, settings)?
        .crossing()
        .map(|x| x - t))
}

/// Finds `x*` in `[a, b]` with `P(x*) = x*` for the return map `P`.
///
/// The displacement `d(t) = P(t) - t` must change sign over the bracket.
/// Each round applies two secant updates, first replacing `a` and then `b`,
/// until `|b - a| < |eps|`. A point is only reported as found when its own
/// displacement is within `|eps|`.
pub fn find_fixed_point(
    field: &VectorField,
    a: f64,
    b: f64,
    eps: f64,
    settings: &SecantSettings,
) -> Result<FixedPointOutcome> {
    validate_eps(eps)?;
    settings.poincare.validate()?;
    if !(a.is_finite() && b.is_finite()) {
        bail!("Bracket endpoints must be finite.");
    }

    let tol = eps.abs();
    let poincare = &settings.poincare;
    let (mut a, mut b) = (a, b);

    let Some(mut da) = displacement(field, a, eps, poincare)? else {
        return Ok(FixedPointOutcome::Diverged { start_x: a });
    };
    let Some(mut db) = displacement(field, b, eps, poincare)? else {
        return Ok(FixedPointOutcome::Diverged { start_x: b });
    };

    if da * db > 0.0 {
        debug!(a, b, da, db, "no sign change of the return displacement");
        return Ok(FixedPointOutcome::NotBracketed {
            left_displacement: da,
            right_displacement: db,
        });
    }

    let mut iterations = 0usize;
    while (b - a).abs() >= tol {
        if iterations >= settings.max_iterations {
            debug!(a, b, iterations, "secant iteration budget exhausted");
            return Ok(FixedPointOutcome::DidNotConverge { a, b, iterations });
        }
        iterations += 1;

        let Some(next_a) = secant_step(a, da, b, db) else {
            debug!(a, b, da, db, "secant update stalled");
            return Ok(FixedPointOutcome::DidNotConverge { a, b, iterations });
        };
        a = next_a;
        da = match displacement(field, a, eps, poincare)? {
            Some(d) => d,
            None => return Ok(FixedPointOutcome::Diverged { start_x: a }),
        };

        let Some(next_b) = secant_step(b, db, a, da) else {
            debug!(a, b, da, db, "secant update stalled");
            return Ok(FixedPointOutcome::DidNotConverge { a, b, iterations });
        };
        b = next_b;
        db = match displacement(field, b, eps, poincare)? {
            Some(d) => d,
            None => return Ok(FixedPointOutcome::Diverged { start_x: b }),
        };

        trace!(iterations, a, b, da, db, "secant round");
    }

    let (x, d) = if da.abs() < db.abs() { (a, da) } else { (b, db) };
    if d.abs() > tol {
        debug!(x, d, "bracket closed without a fixed point");
        return Ok(FixedPointOutcome::DidNotConverge { a, b, iterations });
    }

    debug!(x, iterations, "fixed point of the return map located");
    Ok(FixedPointOutcome::Found {
        x,
        displacement: d,
        iterations,
    })
}
