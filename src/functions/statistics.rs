//! Variadic statistics over the call's arguments, e.g. `mean(1, 2, 3)`.

use crate::CalcError;
use crate::value::Value;

use super::reals;

fn non_empty(name: &str, args: &[Value]) -> Result<Vec<f64>, CalcError> {
  if args.is_empty() {
    return Err(CalcError::Evaluation(format!(
      "Cannot calculate {name}, empty input"
    )));
  }
  reals(name, args)
}

pub fn min(args: &[Value]) -> Result<Value, CalcError> {
  let values = non_empty("min", args)?;
  Ok(Value::Number(values.into_iter().fold(f64::INFINITY, f64::min)))
}

pub fn max(args: &[Value]) -> Result<Value, CalcError> {
  let values = non_empty("max", args)?;
  Ok(Value::Number(values.into_iter().fold(f64::NEG_INFINITY, f64::max)))
}

pub fn sum(args: &[Value]) -> Result<Value, CalcError> {
  Ok(Value::Number(reals("sum", args)?.into_iter().sum()))
}

pub fn mean(args: &[Value]) -> Result<Value, CalcError> {
  let values = non_empty("mean", args)?;
  let n = values.len() as f64;
  Ok(Value::Number(values.into_iter().sum::<f64>() / n))
}

pub fn median(args: &[Value]) -> Result<Value, CalcError> {
  let mut values = non_empty("median", args)?;
  values.sort_by(f64::total_cmp);
  let mid = values.len() / 2;
  let result = if values.len() % 2 == 0 {
    (values[mid - 1] + values[mid]) / 2.0
  } else {
    values[mid]
  };
  Ok(Value::Number(result))
}

/// Most frequent value. Ties go to the value seen first.
pub fn mode(args: &[Value]) -> Result<Value, CalcError> {
  let values = non_empty("mode", args)?;
  let mut counts: Vec<(f64, usize)> = Vec::new();
  for v in values {
    match counts.iter_mut().find(|(seen, _)| *seen == v) {
      Some((_, count)) => *count += 1,
      None => counts.push((v, 1)),
    }
  }
  let best = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
  let value = counts
    .into_iter()
    .find(|(_, c)| *c == best)
    .map(|(v, _)| v)
    .unwrap_or(f64::NAN);
  Ok(Value::Number(value))
}

/// Sample variance (normalized by n - 1). A single value gives NaN.
pub fn variance(args: &[Value]) -> Result<Value, CalcError> {
  let values = non_empty("var", args)?;
  Ok(Value::Number(sample_variance(&values)))
}

pub fn std(args: &[Value]) -> Result<Value, CalcError> {
  let values = non_empty("std", args)?;
  Ok(Value::Number(sample_variance(&values).sqrt()))
}

fn sample_variance(values: &[f64]) -> f64 {
  let n = values.len() as f64;
  let mean = values.iter().sum::<f64>() / n;
  let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
  squares / (n - 1.0)
}
