use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;

use crate::CalcError;
use crate::value::Value;

use super::{expect_arity, reals};

// None = use thread_rng(), Some = seeded
thread_local! {
    static SEEDED_RNG: RefCell<Option<StdRng>> = const { RefCell::new(None) };
}

/// Seed this thread's RNG so `random`/`randomInt` become reproducible.
pub fn seed_rng(seed: u64) {
  SEEDED_RNG.with(|rng| {
    *rng.borrow_mut() = Some(StdRng::seed_from_u64(seed));
  });
}

/// Go back to the non-deterministic thread RNG.
pub fn unseed_rng() {
  SEEDED_RNG.with(|rng| {
    *rng.borrow_mut() = None;
  });
}

fn with_rng<F, R>(f: F) -> R
where
  F: FnOnce(&mut dyn rand::RngCore) -> R,
{
  SEEDED_RNG.with(|cell| {
    let mut borrow = cell.borrow_mut();
    if let Some(ref mut seeded) = *borrow {
      f(seeded)
    } else {
      f(&mut rand::thread_rng())
    }
  })
}

fn bounds(name: &str, args: &[Value]) -> Result<(f64, f64), CalcError> {
  expect_arity(name, args, 0, 2)?;
  let values = reals(name, args)?;
  let (min, max) = match values.as_slice() {
    [] => (0.0, 1.0),
    [max] => (0.0, *max),
    [min, max, ..] => (*min, *max),
  };
  if !min.is_finite() || !max.is_finite() {
    return Err(CalcError::Evaluation(format!(
      "Bounds of function {name} must be finite"
    )));
  }
  Ok((min, max))
}

/// random() in [0, 1), random(max) in [0, max), random(min, max) in
/// [min, max).
pub fn random(args: &[Value]) -> Result<Value, CalcError> {
  let (min, max) = bounds("random", args)?;
  let unit: f64 = with_rng(|rng| rng.gen::<f64>());
  Ok(Value::Number(min + unit * (max - min)))
}

/// randomInt(max) in [0, max), randomInt(min, max) in [min, max).
pub fn random_int(args: &[Value]) -> Result<Value, CalcError> {
  expect_arity("randomInt", args, 1, 2)?;
  let (min, max) = bounds("randomInt", args)?;
  let (low, high) = (min.ceil() as i64, max.ceil() as i64);
  if low >= high {
    return Err(CalcError::Evaluation(format!(
      "Empty range in function randomInt: [{min}, {max})"
    )));
  }
  let n = with_rng(|rng| rng.gen_range(low..high));
  Ok(Value::Number(n as f64))
}
