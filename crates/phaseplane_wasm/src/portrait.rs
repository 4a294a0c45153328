//! Core WASM portrait handle and low-level utilities.

use anyhow::{Context, Result};
use phaseplane_core::analysis::AnalysisSettings;
use phaseplane_core::equilibrium::classify_origin;
use phaseplane_core::field::{Point, VectorField};
use phaseplane_core::parser::parse_system;
use phaseplane_core::solvers::{integrate_step, IntegrationMode};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Vector field currently shown by the renderer, plus the analysis settings.
///
/// The field is shared behind an `Rc` and never mutated: reloading the source
/// or changing the parameter builds a fresh field and swaps the reference, so
/// a handle obtained earlier keeps describing the old system.
#[wasm_bindgen]
pub struct PhasePortrait {
    pub(crate) field: Rc<VectorField>,
    source: String,
    param: f64,
    pub(crate) settings: AnalysisSettings,
}

pub(crate) fn build_field(source: &str, param: f64) -> Result<VectorField> {
    parse_system(source, param).context("Failed to parse system")
}

pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

impl PhasePortrait {
    pub(crate) fn from_source(source: String, param: f64) -> Result<Self> {
        let field = build_field(&source, param)?;
        Ok(Self {
            field: Rc::new(field),
            source,
            param,
            settings: AnalysisSettings::default(),
        })
    }

    /// Replaces the field with one built from `source` at `param`. On a parse
    /// error the current field is left in place.
    pub(crate) fn reload(&mut self, source: String, param: f64) -> Result<()> {
        let field = build_field(&source, param)?;
        self.field = Rc::new(field);
        self.source = source;
        self.param = param;
        Ok(())
    }

    pub fn field_handle(&self) -> Rc<VectorField> {
        Rc::clone(&self.field)
    }
}

#[wasm_bindgen]
impl PhasePortrait {
    #[wasm_bindgen(constructor)]
    pub fn new(source: String, param: f64) -> Result<PhasePortrait, JsValue> {
        console_error_panic_hook::set_once();
        Self::from_source(source, param).map_err(to_js_error)
    }

    pub fn load(&mut self, source: String) -> Result<(), JsValue> {
        self.reload(source, self.param).map_err(to_js_error)
    }

    pub fn set_param(&mut self, param: f64) -> Result<(), JsValue> {
        let source = self.source.clone();
        self.reload(source, param).map_err(to_js_error)
    }

    pub fn param(&self) -> f64 {
        self.param
    }

    pub fn eps(&self) -> f64 {
        self.settings.eps
    }

    pub fn set_eps(&mut self, eps: f64) -> Result<(), JsValue> {
        let settings = AnalysisSettings {
            eps,
            ..self.settings
        };
        settings.validate().map_err(to_js_error)?;
        self.settings = settings;
        Ok(())
    }

    /// One integration step; returns `[x, y]`.
    pub fn step(&self, x: f64, y: f64, eps: f64, runge_kutta: bool) -> Vec<f64> {
        let mode = if runge_kutta {
            IntegrationMode::RungeKutta
        } else {
            IntegrationMode::Euler
        };
        let next = integrate_step(&self.field, Point::new(x, y), eps, mode);
        vec![next.x, next.y]
    }

    pub fn point_type(&self) -> String {
        classify_origin(&self.field).label().to_string()
    }

    /// Eigenvalues at the origin as `[re1, im1, re2, im2]`.
    pub fn eigenvalues(&self) -> Vec<f64> {
        let pair = phaseplane_core::equilibrium::eigenvalues(&self.field);
        vec![pair.first.re, pair.first.im, pair.second.re, pair.second.im]
    }
}
