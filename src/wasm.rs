use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::{clear_cache, default_engine, evaluate_simple};

/// Evaluate a calculator entry and return what the display should show.
/// Failures come back as `Error: ...`.
#[wasm_bindgen]
pub fn evaluate(input: &str) -> String {
  evaluate_simple(input).to_string()
}

/// The free variables of an expression as a JSON array of names.
#[wasm_bindgen]
pub fn variables(input: &str) -> String {
  match default_engine().parse(input) {
    Ok(compiled) => json!(compiled.variables()).to_string(),
    Err(e) => format!("Error: {e}"),
  }
}

/// Sample an expression for graph mode. Returns a JSON array of
/// `{"x": .., "y": ..}` objects, or `Error: ...`.
#[wasm_bindgen]
pub fn sample(input: &str, x_min: f64, x_max: f64, step: f64) -> String {
  match default_engine().sample_points(input, x_min, x_max, step) {
    Ok(points) => points
      .iter()
      .map(|p| json!({ "x": p.x, "y": p.y }))
      .collect::<serde_json::Value>()
      .to_string(),
    Err(e) => format!("Error: {e}"),
  }
}

/// Drop every cached expression.
#[wasm_bindgen]
pub fn clear() {
  clear_cache();
}
