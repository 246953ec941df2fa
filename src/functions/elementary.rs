//! Trigonometric, hyperbolic, logarithmic, root and rounding functions.
//!
//! Functions whose real result would leave the reals (`sqrt(-1)`,
//! `log(-2)`, `asin(2)`) return `Value::Complex` so validation can reject
//! them explicitly instead of seeing a NaN.

use crate::CalcError;
use crate::value::{Complex, Value};

use super::{expect_arity, reals};

fn single<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, CalcError> {
  expect_arity(name, args, 1, 1)?;
  Ok(&args[0])
}

/// Apply a real function to a single real argument.
pub fn real_unary(
  name: &str,
  args: &[Value],
  f: fn(f64) -> f64,
) -> Result<Value, CalcError> {
  let x = single(name, args)?.to_real(name)?;
  Ok(Value::Number(f(x)))
}

/// sin, cos, tan and their hyperbolic variants, with complex arguments.
pub fn circular(name: &str, args: &[Value]) -> Result<Value, CalcError> {
  let arg = single(name, args)?;
  if arg.is_complex() {
    let z = arg.to_complex(name)?;
    let result = match name {
      "sin" => z.sin(),
      "cos" => z.cos(),
      "tan" => z.tan(),
      "sinh" => z.sinh(),
      "cosh" => z.cosh(),
      _ => z.tanh(),
    };
    return Ok(Value::from_complex(result));
  }
  let x = arg.to_real(name)?;
  let result = match name {
    "sin" => x.sin(),
    "cos" => x.cos(),
    "tan" => x.tan(),
    "sinh" => x.sinh(),
    "cosh" => x.cosh(),
    _ => x.tanh(),
  };
  Ok(Value::Number(result))
}

pub fn asin(args: &[Value]) -> Result<Value, CalcError> {
  let arg = single("asin", args)?;
  match arg.to_real("asin") {
    Ok(x) if (-1.0..=1.0).contains(&x) => Ok(Value::Number(x.asin())),
    _ => Ok(Value::from_complex(arg.to_complex("asin")?.asin())),
  }
}

pub fn acos(args: &[Value]) -> Result<Value, CalcError> {
  let arg = single("acos", args)?;
  match arg.to_real("acos") {
    Ok(x) if (-1.0..=1.0).contains(&x) => Ok(Value::Number(x.acos())),
    _ => Ok(Value::from_complex(arg.to_complex("acos")?.acos())),
  }
}

pub fn acosh(args: &[Value]) -> Result<Value, CalcError> {
  let arg = single("acosh", args)?;
  match arg.to_real("acosh") {
    Ok(x) if x >= 1.0 => Ok(Value::Number(x.acosh())),
    _ => Ok(Value::from_complex(arg.to_complex("acosh")?.acosh())),
  }
}

pub fn atanh(args: &[Value]) -> Result<Value, CalcError> {
  let arg = single("atanh", args)?;
  match arg.to_real("atanh") {
    // atanh(±1) is ±Infinity on the reals
    Ok(x) if (-1.0..=1.0).contains(&x) => Ok(Value::Number(x.atanh())),
    _ => Ok(Value::from_complex(arg.to_complex("atanh")?.atanh())),
  }
}

pub fn atan2(args: &[Value]) -> Result<Value, CalcError> {
  expect_arity("atan2", args, 2, 2)?;
  let values = reals("atan2", args)?;
  Ok(Value::Number(values[0].atan2(values[1])))
}

fn ln_value(arg: &Value, name: &str) -> Result<Value, CalcError> {
  match arg.to_real(name) {
    Ok(x) if x >= 0.0 || x.is_nan() => Ok(Value::Number(x.ln())),
    _ => Ok(Value::from_complex(arg.to_complex(name)?.ln())),
  }
}

/// ln, log10 and log2. Negative arguments take the complex branch, scaled
/// by `1 / ln_base`.
pub fn logarithm(
  name: &str,
  args: &[Value],
  real: fn(f64) -> f64,
  ln_base: f64,
) -> Result<Value, CalcError> {
  let arg = single(name, args)?;
  if !arg.is_complex() {
    let x = arg.to_real(name)?;
    if x >= 0.0 || x.is_nan() {
      return Ok(Value::Number(real(x)));
    }
  }
  let z = arg.to_complex(name)?.ln();
  Ok(Value::from_complex(Complex::new(z.re / ln_base, z.im / ln_base)))
}

/// `log(x)` is the natural logarithm, `log(x, base)` any base.
pub fn log(args: &[Value]) -> Result<Value, CalcError> {
  expect_arity("log", args, 1, 2)?;
  let value = ln_value(&args[0], "log")?;
  if args.len() == 1 {
    return Ok(value);
  }
  let base = ln_value(&args[1], "log")?;
  match (&value, &base) {
    (Value::Number(x), Value::Number(b)) => Ok(Value::Number(x / b)),
    _ => Ok(Value::from_complex(
      value.to_complex("log")? / base.to_complex("log")?,
    )),
  }
}

pub fn exp(args: &[Value]) -> Result<Value, CalcError> {
  let arg = single("exp", args)?;
  if arg.is_complex() {
    return Ok(Value::from_complex(arg.to_complex("exp")?.exp()));
  }
  Ok(Value::Number(arg.to_real("exp")?.exp()))
}

pub fn sqrt(args: &[Value]) -> Result<Value, CalcError> {
  let arg = single("sqrt", args)?;
  if !arg.is_complex() {
    let x = arg.to_real("sqrt")?;
    if x >= 0.0 || x.is_nan() {
      return Ok(Value::Number(x.sqrt()));
    }
  }
  Ok(Value::Complex(arg.to_complex("sqrt")?.sqrt()))
}

pub fn abs(args: &[Value]) -> Result<Value, CalcError> {
  let arg = single("abs", args)?;
  if arg.is_complex() {
    return Ok(Value::Number(arg.to_complex("abs")?.norm()));
  }
  Ok(Value::Number(arg.to_real("abs")?.abs()))
}

pub fn sign(x: f64) -> f64 {
  if x == 0.0 || x.is_nan() { x } else { x.signum() }
}

/// `round(x)` to an integer, `round(x, n)` to `n` decimals. Halves round
/// away from zero.
pub fn round(args: &[Value]) -> Result<Value, CalcError> {
  expect_arity("round", args, 1, 2)?;
  let values = reals("round", args)?;
  let x = values[0];
  let Some(&decimals) = values.get(1) else {
    return Ok(Value::Number(x.round()));
  };
  if decimals.fract() != 0.0 || !(0.0..=15.0).contains(&decimals) {
    return Err(CalcError::Evaluation(
      "Number of decimals in function round must be an integer from 0 to 15"
        .into(),
    ));
  }
  let factor = 10f64.powi(decimals as i32);
  Ok(Value::Number((x * factor).round() / factor))
}
