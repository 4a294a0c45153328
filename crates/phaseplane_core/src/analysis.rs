use crate::equilibrium::{classify_eigenvalues, eigenvalues, EigenPair, EquilibriumType};
use crate::field::VectorField;
use crate::fixed_point::{find_fixed_point, FixedPointOutcome, SecantSettings};
use crate::period::{estimate_period, PeriodOutcome, PeriodSettings};
use crate::poincare::validate_eps;
use crate::trajectory::TraceSettings;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Every tolerance and iteration cap used by a full portrait analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub eps: f64,
    /// Search interval on the positive x-axis for a periodic orbit.
    pub bracket: (f64, f64),
    pub secant: SecantSettings,
    pub period: PeriodSettings,
    pub trace: TraceSettings,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            eps: 0.1,
            bracket: (0.1, 5.0),
            secant: SecantSettings::default(),
            period: PeriodSettings::default(),
            trace: TraceSettings::default(),
        }
    }
}

impl AnalysisSettings {
    pub fn validate(&self) -> Result<()> {
        validate_eps(self.eps)?;
        let (lo, hi) = self.bracket;
        if !(lo.is_finite() && hi.is_finite()) {
            bail!("Bracket endpoints must be finite.");
        }
        self.secant.poincare.validate()?;
        if self.trace.max_steps == 0 {
            bail!("trace max_steps must be greater than zero.");
        }
        if !(self.trace.closure_tolerance >= 0.0) {
            bail!("closure_tolerance must be non-negative.");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortraitSummary {
    pub point_type: EquilibriumType,
    pub eigenvalues: EigenPair,
    pub fixed_point: FixedPointOutcome,
    /// Present only when a fixed point was found.
    pub period: Option<PeriodOutcome>,
}

impl PortraitSummary {
    /// One-line description for a status bar.
    pub fn status_line(&self, param: f64) -> String {
        let mut line = format!(
            "Parameter: {param:.2};  Point type: {}",
            self.point_type.label()
        );
        if let Some(x) = self.fixed_point.fixed_point() {
            line.push_str(&format!(";  Cycle at x = {x:.4}"));
        }
        if let Some(period) = self.period.and_then(|p| p.period()) {
            line.push_str(&format!(";  Period: {period:.3}"));
        }
        line
    }
}

/// Classifies the origin, searches the bracket for a periodic orbit and, if
/// one is found, estimates its period.
pub fn analyze(field: &VectorField, settings: &AnalysisSettings) -> Result<PortraitSummary> {
    settings.validate()?;

    let pair = eigenvalues(field);
    let point_type = classify_eigenvalues(&pair);
    let (lo, hi) = settings.bracket;
    let fixed_point = find_fixed_point(field, lo, hi, settings.eps, &settings.secant)?;
    let period = match fixed_point.fixed_point() {
        Some(x) => Some(estimate_period(field, x, settings.eps, &settings.period)?),
        None => None,
    };
    debug!(?point_type, ?fixed_point, ?period, "portrait analysed");

    Ok(PortraitSummary {
        point_type,
        eigenvalues: pair,
        fixed_point,
        period,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{harmonic, unit_limit_cycle};
    use std::f64::consts::PI;

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn analyze_rejects_invalid_settings() {
        let field = harmonic();
        let zero_eps = AnalysisSettings {
            eps: 0.0,
            ..AnalysisSettings::default()
        };
        assert_err_contains(analyze(&field, &zero_eps), "non-zero");

        let mut no_trace = AnalysisSettings::default();
        no_trace.trace.max_steps = 0;
        assert_err_contains(analyze(&field, &no_trace), "max_steps");
    }

    #[test]
    fn limit_cycle_summary_reports_cycle_and_period() {
        let settings = AnalysisSettings {
            eps: 0.05,
            bracket: (0.5, 2.0),
            ..AnalysisSettings::default()
        };
        let summary = analyze(&unit_limit_cycle(), &settings).expect("analysis");
        assert_eq!(summary.point_type, EquilibriumType::FocusUnstable);
        let x = summary.fixed_point.fixed_point().expect("cycle");
        assert!((x - 1.0).abs() < 0.05);
        let period = summary.period.and_then(|p| p.period()).expect("period");
        assert!((period - 2.0 * PI).abs() < 0.1);

        let line = summary.status_line(1.0);
        assert!(line.starts_with("Parameter: 1.00;  Point type: Unstable focus"));
        assert!(line.contains(";  Period: "));
    }

    #[test]
    fn center_summary_has_no_period() {
        let settings = AnalysisSettings {
            eps: 0.05,
            bracket: (0.5, 2.0),
            ..AnalysisSettings::default()
        };
        let summary = analyze(&harmonic(), &settings).expect("analysis");
        assert_eq!(summary.point_type, EquilibriumType::Center);
        assert!(matches!(summary.fixed_point, FixedPointOutcome::NotBracketed { .. }));
        assert_eq!(summary.period, None);
        assert_eq!(summary.status_line(-0.5), "Parameter: -0.50;  Point type: Center");
    }
}
