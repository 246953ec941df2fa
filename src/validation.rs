//! The single result policy shared by calculator and graph mode.

use crate::CalcError;
use crate::value::Value;

/// Imaginary parts smaller than this are treated as rounding noise.
pub const COMPLEX_TOLERANCE: f64 = 1e-10;

/// Accept a finite real, or a complex value whose imaginary part is within
/// `tolerance` of zero. Everything else is rejected with its reason.
pub fn validate(raw: &Value, tolerance: f64) -> Result<f64, CalcError> {
  match raw {
    Value::Number(n) if n.is_nan() => Err(CalcError::NotANumber),
    Value::Number(n) if n.is_infinite() => Err(CalcError::Infinite),
    Value::Number(n) => Ok(*n),
    Value::Complex(z) if z.im.abs() < tolerance => {
      validate(&Value::Number(z.re), tolerance)
    }
    Value::Complex(_) => Err(CalcError::UnsupportedComplex),
    other => Err(CalcError::InvalidResultType(other.type_name())),
  }
}
