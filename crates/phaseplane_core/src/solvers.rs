use crate::field::{Point, VectorField};
use crate::traits::{DynamicalSystem, Scalar, Steppable};
use serde::{Deserialize, Serialize};

/// Rescales `v` to unit length when its norm exceeds one. Slower vectors are
/// left untouched, so the step never travels farther than `|eps|`.
fn clamp_to_unit<T: Scalar>(v: &mut [T]) {
    let norm = v.iter().fold(T::zero(), |acc, &c| acc + c * c).sqrt();
    if norm > T::one() {
        for c in v.iter_mut() {
            *c = *c / norm;
        }
    }
}

/// Explicit Euler with the field vector clamped to unit magnitude.
pub struct ClampedEuler<T: Scalar> {
    k: Vec<T>,
}

impl<T: Scalar> ClampedEuler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            k: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for ClampedEuler<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, state: &mut [T], eps: T) {
        system.apply(state, &mut self.k);
        clamp_to_unit(&mut self.k);
        for i in 0..state.len() {
            state[i] = state[i] + eps * self.k[i];
        }
    }
}

/// Classic Runge-Kutta 4th order whose blended direction is clamped to unit
/// magnitude before being scaled by the step.
pub struct ClampedRK4<T: Scalar> {
    k1: Vec<T>,
    k2: Vec<T>,
    k3: Vec<T>,
    k4: Vec<T>,
    tmp: Vec<T>,
}

impl<T: Scalar> ClampedRK4<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            k1: vec![T::zero(); dim],
            k2: vec![T::zero(); dim],
            k3: vec![T::zero(); dim],
            k4: vec![T::zero(); dim],
            tmp: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for ClampedRK4<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, state: &mut [T], eps: T) {
        let two = T::one() + T::one();
        let half = T::one() / two;
        let sixth = T::one() / (two + two + two);

        // k1 = f(y)
        system.apply(state, &mut self.k1);

        // k2 = f(y + eps*k1/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + eps * self.k1[i] * half;
        }
        system.apply(&self.tmp, &mut self.k2);

        // k3 = f(y + eps*k2/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + eps * self.k2[i] * half;
        }
        system.apply(&self.tmp, &mut self.k3);

        // k4 = f(y + eps*k3)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + eps * self.k3[i];
        }
        system.apply(&self.tmp, &mut self.k4);

        // direction = (k1 + 2k2 + 2k3 + k4) / 6, clamped
        for i in 0..state.len() {
            self.tmp[i] = sixth * (self.k1[i] + two * self.k2[i] + two * self.k3[i] + self.k4[i]);
        }
        clamp_to_unit(&mut self.tmp);

        for i in 0..state.len() {
            state[i] = state[i] + eps * self.tmp[i];
        }
    }
}

/// Which single-step scheme advances a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMode {
    Euler,
    RungeKutta,
}

impl IntegrationMode {
    pub fn build(self) -> PlanarStepper {
        match self {
            IntegrationMode::Euler => PlanarStepper::Euler(ClampedEuler::new(2)),
            IntegrationMode::RungeKutta => PlanarStepper::RungeKutta(ClampedRK4::new(2)),
        }
    }
}

/// A stepper bound to the plane, reusable across many steps of one trajectory.
pub enum PlanarStepper {
    Euler(ClampedEuler<f64>),
    RungeKutta(ClampedRK4<f64>),
}

impl PlanarStepper {
    /// Returns the point one step of size `eps` further along the flow.
    /// A point where the field vanishes does not move.
    pub fn advance(&mut self, field: &VectorField, point: Point, eps: f64) -> Point {
        let mut state = [point.x, point.y];
        match self {
            PlanarStepper::Euler(s) => s.step(field, &mut state, eps),
            PlanarStepper::RungeKutta(s) => s.step(field, &mut state, eps),
        }
        Point::new(state[0], state[1])
    }
}

/// Advances `point` by one step; the sign of `eps` selects the direction.
pub fn integrate_step(field: &VectorField, point: Point, eps: f64, mode: IntegrationMode) -> Point {
    mode.build().advance(field, point, eps)
}
