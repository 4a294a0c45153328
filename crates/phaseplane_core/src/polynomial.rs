//! Bivariate polynomials stored as unmerged monomial lists.

use crate::traits::Scalar;
use serde::{Deserialize, Serialize};

/// A single term `coeff * x^x_pow * y^y_pow`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Monomial {
    pub x_pow: u32,
    pub y_pow: u32,
    pub coeff: f64,
}

impl Monomial {
    pub fn new(coeff: f64, x_pow: u32, y_pow: u32) -> Self {
        Self {
            x_pow,
            y_pow,
            coeff,
        }
    }

    pub fn evaluate<T: Scalar>(&self, x: T, y: T) -> T {
        let coeff = T::from_f64(self.coeff).unwrap_or_else(T::nan);
        coeff * x.powi(self.x_pow as i32) * y.powi(self.y_pow as i32)
    }
}

/// Ordered sequence of monomials.
///
/// Terms sharing an exponent pair are kept as separate entries; evaluation
/// sums every entry, so duplicates behave as additive contributions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    terms: Vec<Monomial>,
}

impl Polynomial {
    pub fn new(terms: Vec<Monomial>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[Monomial] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sums `coeff * x^x_pow * y^y_pow` over all terms. `0^0` evaluates to 1.
    pub fn evaluate<T: Scalar>(&self, x: T, y: T) -> T {
        self.terms
            .iter()
            .fold(T::zero(), |acc, term| acc + term.evaluate(x, y))
    }

    /// Total coefficient of `x^x_pow * y^y_pow`, summing duplicate entries.
    /// Returns 0 when no term matches.
    pub fn coefficient(&self, x_pow: u32, y_pow: u32) -> f64 {
        self.terms
            .iter()
            .filter(|term| term.x_pow == x_pow && term.y_pow == y_pow)
            .map(|term| term.coeff)
            .sum()
    }

    /// Partial derivative with respect to x. Terms without x vanish.
    pub fn differentiate_x(&self) -> Polynomial {
        self.terms
            .iter()
            .filter(|term| term.x_pow > 0)
            .map(|term| Monomial::new(term.coeff * term.x_pow as f64, term.x_pow - 1, term.y_pow))
            .collect()
    }

    /// Partial derivative with respect to y. Terms without y vanish.
    pub fn differentiate_y(&self) -> Polynomial {
        self.terms
            .iter()
            .filter(|term| term.y_pow > 0)
            .map(|term| Monomial::new(term.coeff * term.y_pow as f64, term.x_pow, term.y_pow - 1))
            .collect()
    }
}

impl FromIterator<Monomial> for Polynomial {
    fn from_iter<I: IntoIterator<Item = Monomial>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cubic() -> Polynomial {
        // 2x^2y - 3y^3 + 5
        Polynomial::new(vec![
            Monomial::new(2.0, 2, 1),
            Monomial::new(-3.0, 0, 3),
            Monomial::new(5.0, 0, 0),
        ])
    }

    #[test]
    fn evaluate_sums_all_terms() {
        let poly = cubic();
        let value: f64 = poly.evaluate(2.0, -1.0);
        assert!((value - (2.0 * 4.0 * -1.0 + 3.0 + 5.0)).abs() < 1e-12);
    }

    #[test]
    fn zero_exponents_evaluate_to_coefficient_even_at_origin() {
        let poly = Polynomial::new(vec![Monomial::new(4.5, 0, 0)]);
        assert_eq!(poly.evaluate(0.0, 0.0), 4.5);
    }

    #[test]
    fn empty_polynomial_evaluates_to_zero() {
        let poly = Polynomial::default();
        assert!(poly.is_empty());
        assert_eq!(poly.evaluate(3.0, 7.0), 0.0);
    }

    #[test]
    fn zero_coefficient_terms_are_kept() {
        let poly = Polynomial::new(vec![Monomial::new(0.0, 1, 0), Monomial::new(1.0, 0, 1)]);
        assert_eq!(poly.len(), 2);
        assert_eq!(poly.evaluate(10.0, 2.0), 2.0);
    }

    #[test]
    fn duplicate_exponents_are_not_merged() {
        let poly = Polynomial::new(vec![Monomial::new(1.0, 1, 0), Monomial::new(2.0, 1, 0)]);
        assert_eq!(poly.len(), 2);
        assert_eq!(poly.coefficient(1, 0), 3.0);
        assert_eq!(poly.evaluate(2.0, 0.0), 6.0);
    }

    #[test]
    fn coefficient_defaults_to_zero() {
        assert_eq!(cubic().coefficient(1, 0), 0.0);
    }

    #[test]
    fn differentiate_x_drops_constant_terms() {
        let dx = cubic().differentiate_x();
        assert_eq!(dx.terms(), &[Monomial::new(4.0, 1, 1)]);
    }

    #[test]
    fn differentiate_y_scales_by_exponent() {
        let dy = cubic().differentiate_y();
        assert_eq!(
            dy.terms(),
            &[Monomial::new(2.0, 2, 0), Monomial::new(-9.0, 0, 2)]
        );
    }

    proptest! {
        #[test]
        fn evaluation_is_additive_over_term_concatenation(
            c1 in -10.0f64..10.0,
            c2 in -10.0f64..10.0,
            px in 0u32..4,
            py in 0u32..4,
            x in -2.0f64..2.0,
            y in -2.0f64..2.0,
        ) {
            let first = Polynomial::new(vec![Monomial::new(c1, px, py)]);
            let second = Polynomial::new(vec![Monomial::new(c2, py, px)]);
            let joined: Polynomial = first
                .terms()
                .iter()
                .chain(second.terms())
                .copied()
                .collect();
            let expected = first.evaluate(x, y) + second.evaluate(x, y);
            prop_assert!((joined.evaluate(x, y) - expected).abs() < 1e-9);
        }

        #[test]
        fn derivative_matches_finite_difference(
            c in -5.0f64..5.0,
            px in 0u32..4,
            py in 0u32..4,
            x in -1.5f64..1.5,
            y in -1.5f64..1.5,
        ) {
            let poly = Polynomial::new(vec![Monomial::new(c, px, py), Monomial::new(1.0, 1, 1)]);
            let h = 1e-6;
            let numeric = (poly.evaluate(x + h, y) - poly.evaluate(x - h, y)) / (2.0 * h);
            let exact = poly.differentiate_x().evaluate(x, y);
            prop_assert!((numeric - exact).abs() < 1e-4);
        }
    }
}
