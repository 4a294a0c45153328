//! Return-map, period and trajectory runners exposed to the renderer.

use crate::portrait::{to_js_error, PhasePortrait};
use anyhow::Result;
use js_sys::Float64Array;
use phaseplane_core::analysis::{analyze, AnalysisSettings, PortraitSummary};
use phaseplane_core::field::Point;
use phaseplane_core::fixed_point::{find_fixed_point, FixedPointOutcome};
use phaseplane_core::period::{estimate_period, PeriodOutcome};
use phaseplane_core::trajectory::{trace_trajectory, Direction};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Status-line payload for the renderer.
#[derive(Serialize)]
struct SummaryPayload {
    summary: PortraitSummary,
    status_line: String,
}

impl PhasePortrait {
    /// Flattened `[x0, y0, x1, y1, ...]` polyline.
    pub(crate) fn trace_points(
        &self,
        x: f64,
        y: f64,
        backwards: bool,
        static_point: Option<f64>,
    ) -> Result<Vec<f64>> {
        let direction = if backwards {
            Direction::Backward
        } else {
            Direction::Forward
        };
        let points = trace_trajectory(
            &self.field,
            Point::new(x, y),
            self.settings.eps,
            direction,
            static_point,
            &self.settings.trace,
        )?;
        Ok(points.iter().flat_map(|p| [p.x, p.y]).collect())
    }

    pub(crate) fn locate_cycle(&self) -> Result<FixedPointOutcome> {
        let (lo, hi) = self.settings.bracket;
        find_fixed_point(&self.field, lo, hi, self.settings.eps, &self.settings.secant)
    }

    pub(crate) fn cycle_period(&self, static_point: f64) -> Result<PeriodOutcome> {
        estimate_period(
            &self.field,
            static_point,
            self.settings.eps,
            &self.settings.period,
        )
    }

    pub(crate) fn summarize(&self) -> Result<PortraitSummary> {
        analyze(&self.field, &self.settings)
    }

    pub(crate) fn apply_settings(&mut self, settings: AnalysisSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }
}

#[wasm_bindgen]
impl PhasePortrait {
    /// Accepts a partial `AnalysisSettings` object; missing fields take their
    /// defaults.
    pub fn configure(&mut self, settings: JsValue) -> Result<(), JsValue> {
        let settings: AnalysisSettings = from_value(settings)
            .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?;
        self.apply_settings(settings).map_err(to_js_error)
    }

    pub fn trace(
        &self,
        x: f64,
        y: f64,
        backwards: bool,
        static_point: Option<f64>,
    ) -> Result<Float64Array, JsValue> {
        let points = self
            .trace_points(x, y, backwards, static_point)
            .map_err(to_js_error)?;
        Ok(Float64Array::from(points.as_slice()))
    }

    pub fn find_fixed_point(&self) -> Result<JsValue, JsValue> {
        let outcome = self
            .locate_cycle()
            .map_err(|e| JsValue::from_str(&format!("Fixed point search failed: {}", e)))?;
        to_value(&outcome).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn period(&self, static_point: f64) -> Result<JsValue, JsValue> {
        let outcome = self
            .cycle_period(static_point)
            .map_err(|e| JsValue::from_str(&format!("Period estimate failed: {}", e)))?;
        to_value(&outcome).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn summary(&self) -> Result<JsValue, JsValue> {
        let summary = self.summarize().map_err(to_js_error)?;
        let payload = SummaryPayload {
            status_line: summary.status_line(self.param()),
            summary,
        };
        to_value(&payload).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
