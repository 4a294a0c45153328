use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars when evaluating polynomials.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// An autonomous flow in the plane (or any finite dimension).
pub trait DynamicalSystem<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the vector field at `x`, writing dx/dt into `out`.
    fn apply(&self, x: &[T], out: &mut [T]);
}

/// A single-step integration scheme.
pub trait Steppable<T: Scalar> {
    /// Advances `state` in place by one step of signed size `eps`.
    /// A negative `eps` integrates backwards along the flow.
    fn step(&mut self, system: &impl DynamicalSystem<T>, state: &mut [T], eps: T);
}
