use pest::Parser;
use pest_derive::Parser;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

pub mod cache;
pub mod engine;
pub mod evaluator;
pub mod format;
pub mod functions;
pub mod sampler;
pub mod syntax;
pub mod validation;
pub mod value;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use cache::ExpressionCache;
pub use engine::{CompiledExpression, EngineConfig, MathEngine, SimpleResult};
pub use format::{format_number, number_to_string};
pub use functions::random::{seed_rng, unseed_rng};
pub use sampler::{Point2D, split_into_segments};
pub use value::{Complex, Value};

#[derive(Parser)]
#[grammar = "calc.pest"]
pub struct CalcParser;

/// Variable name to value, supplied by the caller at evaluation time.
pub type Bindings = HashMap<String, f64>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
  #[error("Invalid expression: {0}")]
  InvalidInput(String),
  #[error("Invalid expression syntax: {0}")]
  Syntax(String),
  #[error("Missing variables: {}", .0.join(", "))]
  MissingVariables(Vec<String>),
  #[error("Result is not a number (NaN)")]
  NotANumber,
  #[error("Result is infinite")]
  Infinite,
  #[error("Complex numbers not supported in this context")]
  UnsupportedComplex,
  #[error("Invalid result type: {0}")]
  InvalidResultType(&'static str),
  #[error("Evaluation error: {0}")]
  Evaluation(String),
  #[error("Invalid sampling domain: {0}")]
  InvalidDomain(String),
  #[error(
    "Cannot generate points for expression \"{expression}\" on [{x_min}, {x_max}]: {source}"
  )]
  Sampling {
    expression: String,
    x_min: f64,
    x_max: f64,
    source: Box<CalcError>,
  },
}

impl From<pest::error::Error<Rule>> for CalcError {
  fn from(err: pest::error::Error<Rule>) -> Self {
    let column = match err.line_col {
      pest::error::LineColLocation::Pos((_, col)) => col,
      pest::error::LineColLocation::Span((_, col), _) => col,
    };
    CalcError::Syntax(format!("{} (char {column})", err.variant.message()))
  }
}

pub fn parse(
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  CalcParser::parse(Rule::Program, input).map_err(Box::new)
}

/// True when the text has something other than whitespace in it.
pub fn is_valid_expression(expression: &str) -> bool {
  !expression.trim().is_empty()
}

static DEFAULT_ENGINE: OnceLock<MathEngine> = OnceLock::new();

/// The process-wide engine behind the free functions below.
pub fn default_engine() -> &'static MathEngine {
  DEFAULT_ENGINE.get_or_init(MathEngine::default)
}

/// Parse and cache an expression using the process-wide engine.
pub fn parse_expression<'a>(
  input: impl Into<Option<&'a str>>,
) -> Result<Arc<CompiledExpression>, CalcError> {
  default_engine().parse(input)
}

pub fn evaluate_function(
  compiled: &CompiledExpression,
  bindings: &Bindings,
) -> Result<f64, CalcError> {
  default_engine().evaluate(compiled, bindings)
}

/// One-shot calculator evaluation. Never fails: errors come back as
/// `SimpleResult::Error("Error: ...")`.
pub fn evaluate_simple<'a>(
  expression: impl Into<Option<&'a str>>,
) -> SimpleResult {
  default_engine().evaluate_simple(expression)
}

/// Sample a single-variable expression over `[x_min, x_max]` using the
/// process-wide engine. `None` as the step means the configured default.
pub fn sample_points(
  expression: &str,
  x_min: f64,
  x_max: f64,
  step: impl Into<Option<f64>>,
) -> Result<Vec<Point2D>, CalcError> {
  sampler::sample_points(default_engine(), expression, x_min, x_max, step)
}

/// Same as [`sample_points`]. Kept for callers using the older name.
pub fn generate_points(
  expression: &str,
  x_min: f64,
  x_max: f64,
  step: impl Into<Option<f64>>,
) -> Result<Vec<Point2D>, CalcError> {
  sample_points(expression, x_min, x_max, step)
}

pub fn sample_segments(
  expression: &str,
  x_min: f64,
  x_max: f64,
  step: impl Into<Option<f64>>,
) -> Result<Vec<Vec<Point2D>>, CalcError> {
  sampler::sample_segments(default_engine(), expression, x_min, x_max, step)
}

pub fn clear_cache() {
  default_engine().clear_cache();
}

pub fn cache_size() -> usize {
  default_engine().cache_size()
}
