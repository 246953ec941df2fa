//! The expression compiler: parse once, cache, evaluate many times.

use std::fmt;
use std::sync::Arc;

use crate::cache::ExpressionCache;
use crate::evaluator::evaluate_expr;
use crate::format::number_to_string;
use crate::sampler::{self, Point2D};
use crate::syntax::{self, Expr};
use crate::validation::{self, COMPLEX_TOLERANCE};
use crate::value::Value;
use crate::{Bindings, CalcError};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
  /// Complex results with a smaller imaginary part count as real.
  pub complex_tolerance: f64,
  /// Step used when a sampling call does not give one.
  pub default_step: f64,
  /// Reject sampling domains with more x values than this.
  pub max_samples: Option<usize>,
  /// Stop caching new expressions once this many are stored.
  pub cache_capacity: Option<usize>,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      complex_tolerance: COMPLEX_TOLERANCE,
      default_step: 0.1,
      max_samples: None,
      cache_capacity: None,
    }
  }
}

/// A parsed expression together with the names it needs bound.
#[derive(Debug)]
pub struct CompiledExpression {
  source: String,
  variables: Vec<String>,
  ast: Expr,
}

impl CompiledExpression {
  /// Parse already-trimmed text. Does not touch any cache.
  pub fn compile(source: &str) -> Result<Self, CalcError> {
    let ast = syntax::string_to_expr(source)?;
    let variables = syntax::free_variables(&ast);
    Ok(CompiledExpression {
      source: source.to_string(),
      variables,
      ast,
    })
  }

  /// The trimmed source text, which is also the cache key.
  pub fn source(&self) -> &str {
    &self.source
  }

  /// Free variables, sorted alphabetically.
  pub fn variables(&self) -> &[String] {
    &self.variables
  }

  /// Variables not present in `bindings`, in `variables()` order.
  pub fn missing_variables(&self, bindings: &Bindings) -> Vec<String> {
    self
      .variables
      .iter()
      .filter(|name| !bindings.contains_key(*name))
      .cloned()
      .collect()
  }

  /// Evaluate without validation; the raw value may be complex, boolean or
  /// non-finite.
  pub fn call(&self, bindings: &Bindings) -> Result<Value, CalcError> {
    evaluate_expr(&self.ast, bindings)
  }
}

/// Outcome of one-shot calculator evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleResult {
  Number(f64),
  /// Rendering of a non-numeric result such as `true` or `2i`.
  Text(String),
  /// Always starts with `Error: `.
  Error(String),
}

impl SimpleResult {
  pub fn is_error(&self) -> bool {
    matches!(self, SimpleResult::Error(_))
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      SimpleResult::Number(n) => Some(*n),
      _ => None,
    }
  }
}

impl fmt::Display for SimpleResult {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SimpleResult::Number(n) => f.write_str(&number_to_string(*n)),
      SimpleResult::Text(text) | SimpleResult::Error(text) => f.write_str(text),
    }
  }
}

#[derive(Debug)]
pub struct MathEngine {
  cache: Arc<ExpressionCache>,
  config: EngineConfig,
}

impl Default for MathEngine {
  fn default() -> Self {
    MathEngine::new(EngineConfig::default())
  }
}

impl MathEngine {
  pub fn new(config: EngineConfig) -> Self {
    let cache = match config.cache_capacity {
      Some(limit) => ExpressionCache::with_capacity_limit(limit),
      None => ExpressionCache::new(),
    };
    MathEngine::with_cache(config, Arc::new(cache))
  }

  /// Build an engine around an existing cache, e.g. one shared with
  /// another engine.
  pub fn with_cache(config: EngineConfig, cache: Arc<ExpressionCache>) -> Self {
    MathEngine { cache, config }
  }

  pub fn config(&self) -> &EngineConfig {
    &self.config
  }

  pub fn cache(&self) -> &Arc<ExpressionCache> {
    &self.cache
  }

  /// Parse `input` into a compiled expression, reusing the cached instance
  /// for text seen before.
  pub fn parse<'a>(
    &self,
    input: impl Into<Option<&'a str>>,
  ) -> Result<Arc<CompiledExpression>, CalcError> {
    let raw = match input.into() {
      Some(raw) if !raw.is_empty() => raw,
      _ => {
        return Err(CalcError::InvalidInput(
          "input must be a non-empty string".into(),
        ));
      }
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(CalcError::InvalidInput("input cannot be empty".into()));
    }

    if let Some(hit) = self.cache.get(trimmed) {
      log::debug!("expression cache hit for {trimmed:?}");
      return Ok(hit);
    }

    let compiled = CompiledExpression::compile(trimmed)?;
    log::debug!(
      "compiled {trimmed:?} with variables {:?}",
      compiled.variables()
    );
    Ok(self.cache.insert(Arc::new(compiled)))
  }

  /// Evaluate a compiled expression and validate the result.
  pub fn evaluate(
    &self,
    compiled: &CompiledExpression,
    bindings: &Bindings,
  ) -> Result<f64, CalcError> {
    let no_bindings = Bindings::new();
    let bindings = if compiled.variables().is_empty() {
      &no_bindings
    } else {
      let missing = compiled.missing_variables(bindings);
      if !missing.is_empty() {
        return Err(CalcError::MissingVariables(missing));
      }
      bindings
    };

    let raw = compiled.call(bindings).map_err(|err| match err {
      CalcError::Evaluation(_) | CalcError::MissingVariables(_) => err,
      other => CalcError::Evaluation(other.to_string()),
    })?;
    validation::validate(&raw, self.config.complex_tolerance)
  }

  /// Calculator-display evaluation: never fails, does not use the cache.
  pub fn evaluate_simple<'a>(
    &self,
    expression: impl Into<Option<&'a str>>,
  ) -> SimpleResult {
    let text = match expression.into().map(str::trim) {
      Some(text) if !text.is_empty() => text,
      _ => return SimpleResult::Error("Error: Empty expression".to_string()),
    };

    let value = syntax::string_to_expr(text)
      .and_then(|expr| evaluate_expr(&expr, &Bindings::new()));
    match value {
      Ok(Value::Number(n)) if n.is_nan() => {
        SimpleResult::Error("Error: Invalid operation".to_string())
      }
      Ok(Value::Number(n)) if n.is_infinite() => {
        SimpleResult::Error("Error: Infinity".to_string())
      }
      Ok(Value::Number(n)) => SimpleResult::Number(n),
      Ok(other) => SimpleResult::Text(other.to_string()),
      Err(CalcError::Evaluation(message) | CalcError::Syntax(message)) => {
        SimpleResult::Error(format!("Error: {message}"))
      }
      Err(err) => SimpleResult::Error(format!("Error: {err}")),
    }
  }

  /// Sample a single-variable expression; see [`sampler::sample_points`].
  pub fn sample_points(
    &self,
    expression: &str,
    x_min: f64,
    x_max: f64,
    step: impl Into<Option<f64>>,
  ) -> Result<Vec<Point2D>, CalcError> {
    sampler::sample_points(self, expression, x_min, x_max, step)
  }

  pub fn sample_segments(
    &self,
    expression: &str,
    x_min: f64,
    x_max: f64,
    step: impl Into<Option<f64>>,
  ) -> Result<Vec<Vec<Point2D>>, CalcError> {
    sampler::sample_segments(self, expression, x_min, x_max, step)
  }

  pub fn clear_cache(&self) {
    self.cache.clear();
    log::debug!("expression cache cleared");
  }

  /// Number of cached expressions.
  pub fn cache_size(&self) -> usize {
    self.cache.len()
  }
}
