//! Vector fields shared by the unit tests.

use crate::field::VectorField;
use crate::polynomial::{Monomial, Polynomial};

/// dx/dt = y, dy/dt = -x.
pub fn harmonic() -> VectorField {
    VectorField::new(
        Polynomial::new(vec![Monomial::new(1.0, 0, 1)]),
        Polynomial::new(vec![Monomial::new(-1.0, 1, 0)]),
    )
}

/// dx/dt = x - y - x^3 - xy^2, dy/dt = x + y - x^2y - y^3.
/// Unstable focus at the origin, stable limit cycle on the unit circle.
pub fn unit_limit_cycle() -> VectorField {
    VectorField::new(
        Polynomial::new(vec![
            Monomial::new(1.0, 1, 0),
            Monomial::new(-1.0, 0, 1),
            Monomial::new(-1.0, 3, 0),
            Monomial::new(-1.0, 1, 2),
        ]),
        Polynomial::new(vec![
            Monomial::new(1.0, 1, 0),
            Monomial::new(1.0, 0, 1),
            Monomial::new(-1.0, 2, 1),
            Monomial::new(-1.0, 0, 3),
        ]),
    )
}

/// Constant drift (1, 1); no orbit ever returns.
pub fn drift() -> VectorField {
    VectorField::new(
        Polynomial::new(vec![Monomial::new(1.0, 0, 0)]),
        Polynomial::new(vec![Monomial::new(1.0, 0, 0)]),
    )
}

pub fn linear(a: f64, b: f64, c: f64, d: f64) -> VectorField {
    VectorField::new(
        Polynomial::new(vec![Monomial::new(a, 1, 0), Monomial::new(b, 0, 1)]),
        Polynomial::new(vec![Monomial::new(c, 1, 0), Monomial::new(d, 0, 1)]),
    )
}
