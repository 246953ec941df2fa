//! Turns an expression into plottable points over an x range.
//!
//! A point whose evaluation fails (domain error, singularity, complex
//! result) is left out and the scan continues; that gap is how a graph
//! shows where the function is undefined.

use crate::engine::MathEngine;
use crate::{Bindings, CalcError};

/// Variable bound when an expression has more than one candidate.
const PREFERRED_VARIABLE: &str = "x";

/// Allowance for rounding in `(x_max - x_min) / step`, so the inclusive end
/// of the range is not dropped.
const STEP_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
  pub x: f64,
  pub y: f64,
}

/// Sample `expression` at `x_min, x_min + step, ...` up to and including
/// `x_max`. `step` defaults to the engine's configured step.
///
/// Fails only when the expression cannot be parsed, has more than one free
/// variable, or the domain is invalid.
pub fn sample_points(
  engine: &MathEngine,
  expression: &str,
  x_min: f64,
  x_max: f64,
  step: impl Into<Option<f64>>,
) -> Result<Vec<Point2D>, CalcError> {
  let samples = sample(engine, expression, x_min, x_max, step)?;
  Ok(samples.into_iter().flatten().collect())
}

/// Like [`sample_points`], but split into runs of consecutive successful
/// samples.
pub fn sample_segments(
  engine: &MathEngine,
  expression: &str,
  x_min: f64,
  x_max: f64,
  step: impl Into<Option<f64>>,
) -> Result<Vec<Vec<Point2D>>, CalcError> {
  let samples = sample(engine, expression, x_min, x_max, step)?;
  Ok(split_into_segments(&samples))
}

/// Split samples into contiguous runs, breaking at every gap.
pub fn split_into_segments(samples: &[Option<Point2D>]) -> Vec<Vec<Point2D>> {
  let mut segments: Vec<Vec<Point2D>> = Vec::new();
  let mut current: Vec<Point2D> = Vec::new();

  for sample in samples {
    match sample {
      Some(point) => current.push(*point),
      None if !current.is_empty() => {
        segments.push(std::mem::take(&mut current));
      }
      None => {}
    }
  }
  if !current.is_empty() {
    segments.push(current);
  }
  segments
}

/// One entry per x in the domain, `None` where evaluation failed.
fn sample(
  engine: &MathEngine,
  expression: &str,
  x_min: f64,
  x_max: f64,
  step: impl Into<Option<f64>>,
) -> Result<Vec<Option<Point2D>>, CalcError> {
  let step = step.into().unwrap_or(engine.config().default_step);
  let wrap = |source: CalcError| CalcError::Sampling {
    expression: expression.to_string(),
    x_min,
    x_max,
    source: Box::new(source),
  };

  let compiled = engine.parse(expression).map_err(wrap)?;
  let count = sample_count(x_min, x_max, step, engine.config().max_samples)
    .map_err(wrap)?;

  let variables = compiled.variables();
  let variable = variables
    .iter()
    .find(|name| *name == PREFERRED_VARIABLE)
    .or_else(|| variables.first());
  let others: Vec<String> = variables
    .iter()
    .filter(|name| Some(*name) != variable)
    .cloned()
    .collect();
  if !others.is_empty() {
    return Err(wrap(CalcError::MissingVariables(others)));
  }

  let mut bindings = Bindings::new();
  let mut samples = Vec::with_capacity(count.min(1 << 16));
  for k in 0..count {
    let x = x_min + k as f64 * step;
    if let Some(name) = variable {
      bindings.insert(name.clone(), x);
    }
    match engine.evaluate(&compiled, &bindings) {
      Ok(y) => samples.push(Some(Point2D { x, y })),
      Err(err) => {
        log::trace!("no point at x = {x} for {expression:?}: {err}");
        samples.push(None);
      }
    }
  }

  log::debug!(
    "sampled {expression:?} on [{x_min}, {x_max}] step {step}: {} of {} points",
    samples.iter().filter(|s| s.is_some()).count(),
    samples.len()
  );
  Ok(samples)
}

fn sample_count(
  x_min: f64,
  x_max: f64,
  step: f64,
  max_samples: Option<usize>,
) -> Result<usize, CalcError> {
  if !x_min.is_finite() || !x_max.is_finite() {
    return Err(CalcError::InvalidDomain(
      "range bounds must be finite".into(),
    ));
  }
  if !step.is_finite() || step <= 0.0 {
    return Err(CalcError::InvalidDomain(format!(
      "step must be a positive number, got {step}"
    )));
  }
  if x_min > x_max {
    return Ok(0);
  }
  let span = ((x_max - x_min) / step + STEP_EPSILON).floor();
  if !span.is_finite() || span >= usize::MAX as f64 {
    return Err(CalcError::InvalidDomain(format!(
      "[{x_min}, {x_max}] with step {step} has too many samples"
    )));
  }
  let count = span as usize + 1;
  match max_samples {
    Some(limit) if count > limit => Err(CalcError::InvalidDomain(format!(
      "{count} samples exceed the limit of {limit}"
    ))),
    _ => Ok(count),
  }
}
