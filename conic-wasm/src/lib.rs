//! WASM bindings for conic-section parametrization.
//!
//! This crate provides JavaScript/WASM bindings for the conic-core library, so a browser can
//! sample and inspect conics built from JSON-shaped definitions.

use conic_core::{Conic, ConicSpec, Family, R2};
use log::{error, info, warn};
use serde::Serialize;
use tsify::Tsify;
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;

/// Points sampled along one conic.
#[derive(Debug, Clone, Serialize, Tsify)]
pub struct Sampled {
    pub family: Family,
    pub midpoint: R2<f64>,
    /// Undefined samples (asymptotes, unhandled eigenvalue signs) serialize as `{ x: NaN, y: NaN }`
    pub points: Vec<R2<f64>>,
}

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null; throws on anything else.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) -> Result<(), JsValue> {
    let level: Option<String> = serde_wasm_bindgen::from_value(level)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse log level: {}", e)))?;
    let level = conic_core::parse_log_level(level.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}

fn build(spec: JsValue) -> Result<Conic, JsValue> {
    let spec: ConicSpec = serde_wasm_bindgen::from_value(spec)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse conic: {}", e)))?;
    spec.build().map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

/// Samples `n` points along a conic.
///
/// # Arguments
/// * `spec` - A conic definition: `{ kind, parents, range? }`.
/// * `n` - Number of samples (at least 2), evenly spaced over the range, endpoints included.
///
/// # Returns
/// A [`Sampled`] with the conic's family, midpoint, and points; throws on unrecognized parents.
#[wasm_bindgen]
pub fn sample(spec: JsValue, n: usize) -> Result<JsValue, JsValue> {
    let mut conic = build(spec)?;
    let points = conic.sample(n).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let undefined = points.iter().filter(|p| !p.is_finite()).count();
    if undefined > 0 {
        warn!("{:?} conic: {} of {} samples undefined", conic.family(), undefined, n);
    }
    to_js(&Sampled { family: conic.family(), midpoint: conic.midpoint(), points })
}

/// Evaluates a conic at a single parameter.
#[wasm_bindgen]
pub fn evaluate(spec: JsValue, t: f64) -> Result<JsValue, JsValue> {
    let conic = build(spec)?;
    to_js(&conic.evaluate(t))
}

/// Returns the conic's 3x3 symmetric matrix (rows, homogeneous `(w, x, y)` order).
#[wasm_bindgen]
pub fn quadratic_form(spec: JsValue) -> Result<JsValue, JsValue> {
    let conic = build(spec)?;
    let m = conic.quadratic_form();
    let rows: Vec<[f64; 3]> = (0..3).map(|i| [m.0[(i, 0)], m.0[(i, 1)], m.0[(i, 2)]]).collect();
    to_js(&rows)
}
