//! Planar polynomial vector fields `dx/dt = P(x, y)`, `dy/dt = Q(x, y)`.

use crate::polynomial::Polynomial;
use crate::traits::{DynamicalSystem, Scalar};
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn on_x_axis(x: f64) -> Self {
        Self { x, y: 0.0 }
    }

    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The pair (P, Q) defining the right-hand side of the ODE.
///
/// A field is never mutated once built; reloading a system means building a
/// new `VectorField` and replacing the old one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorField {
    p: Polynomial,
    q: Polynomial,
}

impl VectorField {
    pub fn new(p: Polynomial, q: Polynomial) -> Self {
        Self { p, q }
    }

    pub fn p(&self) -> &Polynomial {
        &self.p
    }

    pub fn q(&self) -> &Polynomial {
        &self.q
    }

    /// Raw field vector (P, Q) at `point`.
    pub fn velocity(&self, point: Point) -> Point {
        Point::new(
            self.p.evaluate(point.x, point.y),
            self.q.evaluate(point.x, point.y),
        )
    }

    /// Linear part at the origin, `[[a, b], [c, d]]`, read from the degree-1
    /// coefficients of P and Q. Missing terms count as 0.
    pub fn linear_part(&self) -> Matrix2<f64> {
        Matrix2::new(
            self.p.coefficient(1, 0),
            self.p.coefficient(0, 1),
            self.q.coefficient(1, 0),
            self.q.coefficient(0, 1),
        )
    }

    /// Jacobian of (P, Q) at an arbitrary point, built from the partial
    /// derivative polynomials.
    pub fn jacobian_at(&self, point: Point) -> Matrix2<f64> {
        let (x, y) = (point.x, point.y);
        Matrix2::new(
            self.p.differentiate_x().evaluate(x, y),
            self.p.differentiate_y().evaluate(x, y),
            self.q.differentiate_x().evaluate(x, y),
            self.q.differentiate_y().evaluate(x, y),
        )
    }
}

impl<T: Scalar> DynamicalSystem<T> for VectorField {
    fn dimension(&self) -> usize {
        2
    }

    fn apply(&self, x: &[T], out: &mut [T]) {
        out[0] = self.p.evaluate(x[0], x[1]);
        out[1] = self.q.evaluate(x[0], x[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::Monomial;

    fn rotation_with_cubic() -> VectorField {
        // dx/dt = y + x^3, dy/dt = -x + 2y + x*y
        VectorField::new(
            Polynomial::new(vec![Monomial::new(1.0, 0, 1), Monomial::new(1.0, 3, 0)]),
            Polynomial::new(vec![
                Monomial::new(-1.0, 1, 0),
                Monomial::new(2.0, 0, 1),
                Monomial::new(1.0, 1, 1),
            ]),
        )
    }

    #[test]
    fn velocity_evaluates_both_components() {
        let field = rotation_with_cubic();
        let v = field.velocity(Point::new(1.0, 2.0));
        assert_eq!(v, Point::new(3.0, 5.0));
    }

    #[test]
    fn apply_matches_velocity() {
        let field = rotation_with_cubic();
        let mut out = [0.0; 2];
        field.apply(&[0.5, -0.25], &mut out);
        let v = field.velocity(Point::new(0.5, -0.25));
        assert_eq!(out, [v.x, v.y]);
        assert_eq!(DynamicalSystem::<f64>::dimension(&field), 2);
    }

    #[test]
    fn linear_part_ignores_nonlinear_terms() {
        let field = rotation_with_cubic();
        assert_eq!(field.linear_part(), Matrix2::new(0.0, 1.0, -1.0, 2.0));
    }

    #[test]
    fn jacobian_at_origin_equals_linear_part() {
        let field = rotation_with_cubic();
        assert_eq!(field.jacobian_at(Point::default()), field.linear_part());
    }

    #[test]
    fn jacobian_away_from_origin_includes_nonlinear_terms() {
        let field = rotation_with_cubic();
        let jac = field.jacobian_at(Point::new(1.0, 3.0));
        assert_eq!(jac, Matrix2::new(3.0, 1.0, 2.0, 3.0));
    }
}
