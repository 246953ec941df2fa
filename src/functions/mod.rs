//! Built-in constants and functions.
//!
//! The two name tables below decide what counts as a free variable: any
//! identifier not listed here must be bound by the caller.

pub mod elementary;
pub mod number_theory;
pub mod random;
pub mod statistics;

use std::f64::consts::{E, LN_10, LN_2, PI};

use crate::CalcError;
use crate::value::{Complex, Value};

pub const CONSTANTS: &[&str] = &[
  "pi",
  "e",
  "i",
  "PI",
  "E",
  "true",
  "false",
  "null",
  "undefined",
];

pub const FUNCTIONS: &[&str] = &[
  "sin",
  "cos",
  "tan",
  "asin",
  "acos",
  "atan",
  "atan2",
  "sinh",
  "cosh",
  "tanh",
  "asinh",
  "acosh",
  "atanh",
  "log",
  "log10",
  "log2",
  "ln",
  "exp",
  "sqrt",
  "cbrt",
  "abs",
  "sign",
  "ceil",
  "floor",
  "round",
  "fix",
  "min",
  "max",
  "sum",
  "mean",
  "median",
  "mode",
  "std",
  "var",
  "factorial",
  "gamma",
  "combinations",
  "permutations",
  "gcd",
  "lcm",
  "mod",
  "pow",
  "random",
  "randomInt",
];

pub fn is_constant(name: &str) -> bool {
  CONSTANTS.contains(&name)
}

pub fn is_function(name: &str) -> bool {
  FUNCTIONS.contains(&name)
}

/// Constants and function names are structural, never bindable.
pub fn is_reserved(name: &str) -> bool {
  is_constant(name) || is_function(name)
}

pub fn constant_value(name: &str) -> Option<Value> {
  match name {
    "pi" | "PI" => Some(Value::Number(PI)),
    "e" | "E" => Some(Value::Number(E)),
    "i" => Some(Value::Complex(Complex::I)),
    "true" => Some(Value::Boolean(true)),
    "false" => Some(Value::Boolean(false)),
    "null" => Some(Value::Null),
    "undefined" => Some(Value::Undefined),
    _ => None,
  }
}

/// Call a built-in function by name.
pub fn call(name: &str, args: &[Value]) -> Result<Value, CalcError> {
  match name {
    "sin" | "cos" | "tan" | "sinh" | "cosh" | "tanh" => {
      elementary::circular(name, args)
    }
    "asin" => elementary::asin(args),
    "acos" => elementary::acos(args),
    "atan" => elementary::real_unary(name, args, f64::atan),
    "atan2" => elementary::atan2(args),
    "asinh" => elementary::real_unary(name, args, f64::asinh),
    "acosh" => elementary::acosh(args),
    "atanh" => elementary::atanh(args),
    "log" => elementary::log(args),
    "ln" => elementary::logarithm(name, args, f64::ln, 1.0),
    "log10" => elementary::logarithm(name, args, f64::log10, LN_10),
    "log2" => elementary::logarithm(name, args, f64::log2, LN_2),
    "exp" => elementary::exp(args),
    "sqrt" => elementary::sqrt(args),
    "cbrt" => elementary::real_unary(name, args, f64::cbrt),
    "abs" => elementary::abs(args),
    "sign" => elementary::real_unary(name, args, elementary::sign),
    "ceil" => elementary::real_unary(name, args, f64::ceil),
    "floor" => elementary::real_unary(name, args, f64::floor),
    "fix" => elementary::real_unary(name, args, f64::trunc),
    "round" => elementary::round(args),
    "min" => statistics::min(args),
    "max" => statistics::max(args),
    "sum" => statistics::sum(args),
    "mean" => statistics::mean(args),
    "median" => statistics::median(args),
    "mode" => statistics::mode(args),
    "std" => statistics::std(args),
    "var" => statistics::variance(args),
    "factorial" => {
      expect_arity(name, args, 1, 1)?;
      number_theory::factorial(&args[0])
    }
    "gamma" => number_theory::gamma(args),
    "combinations" => number_theory::combinations(args),
    "permutations" => number_theory::permutations(args),
    "gcd" => number_theory::gcd(args),
    "lcm" => number_theory::lcm(args),
    "mod" => number_theory::modulo(args),
    "pow" => {
      expect_arity(name, args, 2, 2)?;
      number_theory::power(&args[0], &args[1])
    }
    "random" => random::random(args),
    "randomInt" => random::random_int(args),
    _ => Err(CalcError::Evaluation(format!("Undefined function {name}"))),
  }
}

pub(crate) fn expect_arity(
  name: &str,
  args: &[Value],
  min: usize,
  max: usize,
) -> Result<(), CalcError> {
  if args.len() < min {
    return Err(CalcError::Evaluation(format!(
      "Too few arguments in function {name} (expected: {min}, actual: {})",
      args.len()
    )));
  }
  if args.len() > max {
    return Err(CalcError::Evaluation(format!(
      "Too many arguments in function {name} (expected: {max}, actual: {})",
      args.len()
    )));
  }
  Ok(())
}

pub(crate) fn reals(name: &str, args: &[Value]) -> Result<Vec<f64>, CalcError> {
  args.iter().map(|a| a.to_real(name)).collect()
}
