//! Reader for the two-line monomial system format.
//!
//! Each line describes one polynomial (P, then Q) as monomial descriptors
//! separated by two spaces. A descriptor is `<coeff> <x_pow> <y_pow>`; a
//! coefficient of `c` is replaced by the family parameter, so one file
//! describes a one-parameter family of systems:
//!
//! ```text
//! 1 1 0  c 0 1
//! -1 0 1  -1 0 3
//! ```

use crate::field::VectorField;
use crate::polynomial::{Monomial, Polynomial};
use thiserror::Error;

const DESCRIPTOR_SEPARATOR: &str = "  ";
const PARAMETER_TOKEN: &str = "c";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line is empty")]
    EmptyLine,
    #[error("monomial \"{descriptor}\" has {found} tokens, expected 3")]
    TokenCount { descriptor: String, found: usize },
    #[error("invalid coefficient \"{token}\" in monomial \"{descriptor}\"")]
    Coefficient { descriptor: String, token: String },
    #[error("invalid exponent \"{token}\" in monomial \"{descriptor}\"")]
    Exponent { descriptor: String, token: String },
    #[error("system must have exactly 2 lines, found {0}")]
    LineCount(usize),
}

fn parse_descriptor(descriptor: &str, param: f64) -> Result<Monomial, ParseError> {
    let tokens: Vec<&str> = descriptor.split(' ').collect();
    if tokens.len() != 3 {
        return Err(ParseError::TokenCount {
            descriptor: descriptor.to_string(),
            found: tokens.len(),
        });
    }

    let coeff = if tokens[0] == PARAMETER_TOKEN {
        param
    } else {
        tokens[0]
            .replace('\u{2212}', "-")
            .parse::<f64>()
            .map_err(|_| ParseError::Coefficient {
                descriptor: descriptor.to_string(),
                token: tokens[0].to_string(),
            })?
    };

    let exponent = |token: &str| {
        token.parse::<u32>().map_err(|_| ParseError::Exponent {
            descriptor: descriptor.to_string(),
            token: token.to_string(),
        })
    };

    Ok(Monomial::new(coeff, exponent(tokens[1])?, exponent(tokens[2])?))
}

/// Parses one polynomial line, substituting `param` for every `c` coefficient.
pub fn parse_line(text: &str, param: f64) -> Result<Polynomial, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyLine);
    }
    text.split(DESCRIPTOR_SEPARATOR)
        .map(|descriptor| parse_descriptor(descriptor.trim(), param))
        .collect()
}

pub fn build_field(p_line: &str, q_line: &str, param: f64) -> Result<VectorField, ParseError> {
    Ok(VectorField::new(
        parse_line(p_line, param)?,
        parse_line(q_line, param)?,
    ))
}

/// Parses a whole system file body. Blank lines are skipped.
pub fn parse_system(text: &str, param: f64) -> Result<VectorField, ParseError> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    match lines.as_slice() {
        [p_line, q_line] => build_field(p_line, q_line, param),
        other => Err(ParseError::LineCount(other.len())),
    }
}
