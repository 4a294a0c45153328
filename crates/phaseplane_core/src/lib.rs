pub mod analysis;
pub mod diagnostics;
pub mod equilibrium;
pub mod field;
pub mod fixed_point;
pub mod parser;
pub mod period;
pub mod poincare;
pub mod polynomial;
pub mod solvers;
pub mod trajectory;
/// The `phaseplane_core` crate is the numerical engine behind the phase
/// portrait viewer for planar polynomial systems `dx/dt = P(x, y)`,
/// `dy/dt = Q(x, y)`.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `DynamicalSystem` (flows), `Steppable` (solvers).
/// - **Polynomial / Field**: monomial-list polynomials and the (P, Q) vector field.
/// - **Solvers**: magnitude-clamped Euler and Runge-Kutta steppers.
/// - **Poincare / Fixed point / Period**: first-return map on the positive x-axis,
///   secant search for its fixed points (periodic orbits) and period estimation.
/// - **Equilibrium**: eigenvalue-based classification of the origin.
pub mod traits;

#[cfg(test)]
pub(crate) mod fixtures;
