use crate::CalcError;
use crate::value::{Complex, Value};

use super::{expect_arity, reals};

/// Largest n with a finite n! in f64.
const MAX_FACTORIAL: f64 = 170.0;

fn is_integer(x: f64) -> bool {
  x.is_finite() && x.fract() == 0.0
}

fn integer_args(name: &str, args: &[Value]) -> Result<Vec<f64>, CalcError> {
  let values = reals(name, args)?;
  if values.iter().all(|v| is_integer(*v)) {
    Ok(values)
  } else {
    Err(CalcError::Evaluation(format!(
      "Parameters in function {name} must be integer numbers"
    )))
  }
}

/// n! for non-negative integers, Gamma(n + 1) otherwise.
pub fn factorial(arg: &Value) -> Result<Value, CalcError> {
  let n = arg.to_real("factorial")?;
  if n < 0.0 {
    return Err(CalcError::Evaluation(
      "Value must be non-negative in function factorial".into(),
    ));
  }
  if !is_integer(n) {
    return Ok(Value::Number(gamma_fn(n + 1.0)));
  }
  if n > MAX_FACTORIAL {
    return Ok(Value::Number(f64::INFINITY));
  }
  Ok(Value::Number((2..=n as u32).fold(1.0, |acc, k| acc * k as f64)))
}

pub fn gamma(args: &[Value]) -> Result<Value, CalcError> {
  expect_arity("gamma", args, 1, 1)?;
  let x = args[0].to_real("gamma")?;
  if is_integer(x) {
    if x <= 0.0 {
      // poles at the non-positive integers
      return Ok(Value::Number(f64::INFINITY));
    }
    return factorial(&Value::Number(x - 1.0));
  }
  Ok(Value::Number(gamma_fn(x)))
}

/// Lanczos approximation for the Gamma function
pub fn gamma_fn(x: f64) -> f64 {
  if x < 0.5 {
    // Reflection formula: Gamma(1-z) * Gamma(z) = pi / sin(pi*z)
    std::f64::consts::PI
      / ((std::f64::consts::PI * x).sin() * gamma_fn(1.0 - x))
  } else {
    let x = x - 1.0;
    let g = 7.0;
    let c = [
      0.999_999_999_999_809_9,
      676.5203681218851,
      -1259.1392167224028,
      771.323_428_777_653_1,
      -176.615_029_162_140_6,
      12.507343278686905,
      -0.13857109526572012,
      9.984_369_578_019_572e-6,
      1.5056327351493116e-7,
    ];
    let mut sum = c[0];
    for (i, &ci) in c.iter().enumerate().skip(1) {
      sum += ci / (x + i as f64);
    }
    let t = x + g + 0.5;
    (2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * sum
  }
}

/// combinations(n, k): ways to choose k of n, order ignored.
pub fn combinations(args: &[Value]) -> Result<Value, CalcError> {
  expect_arity("combinations", args, 2, 2)?;
  let values = integer_args("combinations", args)?;
  let (n, k) = (values[0], values[1]);
  if n < 0.0 || k < 0.0 {
    return Err(CalcError::Evaluation(
      "Positive integer value expected in function combinations".into(),
    ));
  }
  if k > n {
    return Err(CalcError::Evaluation(
      "k must be less than or equal to n in function combinations".into(),
    ));
  }
  let k = k.min(n - k);
  let mut result: f64 = 1.0;
  // each partial product is C(n - k + i, i) >= 2^i
  for i in 1..=k as u64 {
    result = result * (n - k + i as f64) / i as f64;
    if result.is_infinite() {
      break;
    }
  }
  Ok(Value::Number(result.round()))
}

/// permutations(n) = n!, permutations(n, k) = n! / (n - k)!
pub fn permutations(args: &[Value]) -> Result<Value, CalcError> {
  expect_arity("permutations", args, 1, 2)?;
  let values = integer_args("permutations", args)?;
  let n = values[0];
  if n < 0.0 {
    return Err(CalcError::Evaluation(
      "Positive integer value expected in function permutations".into(),
    ));
  }
  let Some(&k) = values.get(1) else {
    return factorial(&Value::Number(n));
  };
  if k < 0.0 || k > n {
    return Err(CalcError::Evaluation(
      "second argument k must be a non-negative integer less than or equal to the first argument n in function permutations".into(),
    ));
  }
  let mut result: f64 = 1.0;
  for i in 0..k as u64 {
    result *= n - i as f64;
    if result.is_infinite() {
      break;
    }
  }
  Ok(Value::Number(result))
}

fn gcd_pair(a: f64, b: f64) -> f64 {
  let (mut a, mut b) = (a.abs(), b.abs());
  while b != 0.0 {
    let r = a % b;
    a = b;
    b = r;
  }
  a
}

pub fn gcd(args: &[Value]) -> Result<Value, CalcError> {
  expect_arity("gcd", args, 1, usize::MAX)?;
  let values = integer_args("gcd", args)?;
  Ok(Value::Number(values.into_iter().fold(0.0, gcd_pair)))
}

pub fn lcm(args: &[Value]) -> Result<Value, CalcError> {
  expect_arity("lcm", args, 1, usize::MAX)?;
  let values = integer_args("lcm", args)?;
  let result = values.into_iter().fold(1.0, |acc: f64, v| {
    if acc == 0.0 || v == 0.0 {
      0.0
    } else {
      (acc * v / gcd_pair(acc, v)).abs()
    }
  });
  Ok(Value::Number(result))
}

/// mod(x, y) = x - y * floor(x / y), with mod(x, 0) = x. The result takes
/// the sign of y.
pub fn modulo(args: &[Value]) -> Result<Value, CalcError> {
  expect_arity("mod", args, 2, 2)?;
  let values = reals("mod", args)?;
  let (x, y) = (values[0], values[1]);
  if y == 0.0 {
    return Ok(Value::Number(x));
  }
  Ok(Value::Number(x - y * (x / y).floor()))
}

fn complex_powi(base: Complex, exponent: i32) -> Complex {
  let mut result = Complex::from_real(1.0);
  let mut factor = base;
  let mut n = exponent.unsigned_abs();
  while n > 0 {
    if n & 1 == 1 {
      result = result * factor;
    }
    factor = factor * factor;
    n >>= 1;
  }
  if exponent < 0 {
    Complex::from_real(1.0) / result
  } else {
    result
  }
}

/// `base ^ exponent`. A negative base with a fractional exponent leaves
/// the reals.
pub fn power(base: &Value, exponent: &Value) -> Result<Value, CalcError> {
  if base.is_complex() || exponent.is_complex() {
    let z = base.to_complex("pow")?;
    let w = exponent.to_complex("pow")?;
    let result = if w.im == 0.0 && is_integer(w.re) && w.re.abs() <= 1024.0 {
      complex_powi(z, w.re as i32)
    } else {
      z.powc(w)
    };
    return Ok(Value::from_complex(result));
  }
  let b = base.to_real("pow")?;
  let e = exponent.to_real("pow")?;
  if b < 0.0 && e.is_finite() && e.fract() != 0.0 {
    return Ok(Value::from_complex(
      Complex::from_real(b).powc(Complex::from_real(e)),
    ));
  }
  Ok(Value::Number(b.powf(e)))
}
