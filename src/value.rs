use std::f64::consts::FRAC_PI_2;
use std::fmt;

use crate::CalcError;
use crate::format::number_to_string;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
  pub re: f64,
  pub im: f64,
}

impl Complex {
  pub const I: Complex = Complex { re: 0.0, im: 1.0 };

  pub fn new(re: f64, im: f64) -> Self {
    Complex { re, im }
  }

  pub fn from_real(re: f64) -> Self {
    Complex { re, im: 0.0 }
  }

  pub fn is_zero(self) -> bool {
    self.re == 0.0 && self.im == 0.0
  }

  pub fn norm(self) -> f64 {
    self.re.hypot(self.im)
  }

  pub fn arg(self) -> f64 {
    self.im.atan2(self.re)
  }

  pub fn exp(self) -> Self {
    let scale = self.re.exp();
    Complex::new(scale * self.im.cos(), scale * self.im.sin())
  }

  /// Principal branch of the natural logarithm.
  pub fn ln(self) -> Self {
    Complex::new(self.norm().ln(), self.arg())
  }

  /// Principal square root.
  pub fn sqrt(self) -> Self {
    if self.im == 0.0 {
      return if self.re >= 0.0 {
        Complex::from_real(self.re.sqrt())
      } else {
        Complex::new(0.0, (-self.re).sqrt())
      };
    }
    let norm = self.norm();
    Complex::new(
      ((norm + self.re) / 2.0).sqrt(),
      ((norm - self.re) / 2.0).sqrt().copysign(self.im),
    )
  }

  pub fn powc(self, exponent: Complex) -> Self {
    if self.is_zero() {
      return if exponent.is_zero() {
        Complex::from_real(1.0)
      } else {
        Complex::from_real(0.0)
      };
    }
    (exponent * self.ln()).exp()
  }

  pub fn sin(self) -> Self {
    Complex::new(
      self.re.sin() * self.im.cosh(),
      self.re.cos() * self.im.sinh(),
    )
  }

  pub fn cos(self) -> Self {
    Complex::new(
      self.re.cos() * self.im.cosh(),
      -self.re.sin() * self.im.sinh(),
    )
  }

  pub fn tan(self) -> Self {
    self.sin() / self.cos()
  }

  pub fn sinh(self) -> Self {
    Complex::new(
      self.re.sinh() * self.im.cos(),
      self.re.cosh() * self.im.sin(),
    )
  }

  pub fn cosh(self) -> Self {
    Complex::new(
      self.re.cosh() * self.im.cos(),
      self.re.sinh() * self.im.sin(),
    )
  }

  pub fn tanh(self) -> Self {
    self.sinh() / self.cosh()
  }

  // asin(z) = -i ln(iz + sqrt(1 - z^2))
  pub fn asin(self) -> Self {
    let one = Complex::from_real(1.0);
    -Complex::I * (Complex::I * self + (one - self * self).sqrt()).ln()
  }

  pub fn acos(self) -> Self {
    Complex::from_real(FRAC_PI_2) - self.asin()
  }

  pub fn acosh(self) -> Self {
    let one = Complex::from_real(1.0);
    (self + (self + one).sqrt() * (self - one).sqrt()).ln()
  }

  pub fn atanh(self) -> Self {
    let one = Complex::from_real(1.0);
    ((one + self).ln() - (one - self).ln()) * Complex::from_real(0.5)
  }
}

impl std::ops::Add for Complex {
  type Output = Self;

  fn add(self, rhs: Self) -> Self {
    Complex::new(self.re + rhs.re, self.im + rhs.im)
  }
}

impl std::ops::Sub for Complex {
  type Output = Self;

  fn sub(self, rhs: Self) -> Self {
    Complex::new(self.re - rhs.re, self.im - rhs.im)
  }
}

impl std::ops::Mul for Complex {
  type Output = Self;

  fn mul(self, rhs: Self) -> Self {
    Complex::new(
      self.re * rhs.re - self.im * rhs.im,
      self.re * rhs.im + self.im * rhs.re,
    )
  }
}

impl std::ops::Div for Complex {
  type Output = Self;

  fn div(self, rhs: Self) -> Self {
    let denom = rhs.re * rhs.re + rhs.im * rhs.im;
    Complex::new(
      (self.re * rhs.re + self.im * rhs.im) / denom,
      (self.im * rhs.re - self.re * rhs.im) / denom,
    )
  }
}

impl std::ops::Neg for Complex {
  type Output = Self;

  fn neg(self) -> Self {
    Complex::new(-self.re, -self.im)
  }
}

/// `2 + 3i`, `-i`, `0.5i`
impl fmt::Display for Complex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let imaginary = |im: f64| match im {
      x if x == 1.0 => "i".to_string(),
      x if x == -1.0 => "-i".to_string(),
      x => format!("{}i", number_to_string(x)),
    };
    if self.im == 0.0 {
      return f.write_str(&number_to_string(self.re));
    }
    if self.re == 0.0 {
      return f.write_str(&imaginary(self.im));
    }
    let sign = if self.im < 0.0 { '-' } else { '+' };
    write!(
      f,
      "{} {sign} {}",
      number_to_string(self.re),
      imaginary(self.im.abs())
    )
  }
}

/// Raw evaluation result, before validation decides whether it is an
/// acceptable real number.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Number(f64),
  Complex(Complex),
  Boolean(bool),
  Str(String),
  Null,
  Undefined,
}

impl Value {
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Number(_) => "number",
      Value::Complex(_) => "Complex",
      Value::Boolean(_) => "boolean",
      Value::Str(_) => "string",
      Value::Null => "object",
      Value::Undefined => "undefined",
    }
  }

  /// Collapse a complex value with an exactly zero imaginary part.
  pub fn from_complex(z: Complex) -> Value {
    if z.im == 0.0 {
      Value::Number(z.re)
    } else {
      Value::Complex(z)
    }
  }

  /// Real-number view used by functions that are only defined on reals.
  pub fn to_real(&self, context: &str) -> Result<f64, CalcError> {
    match self {
      Value::Number(n) => Ok(*n),
      Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
      Value::Null => Ok(0.0),
      Value::Complex(z) if z.im == 0.0 => Ok(z.re),
      Value::Str(s) => s.trim().parse::<f64>().map_err(|_| {
        CalcError::Evaluation(format!("Cannot convert \"{s}\" to a number"))
      }),
      other => Err(CalcError::Evaluation(format!(
        "Unexpected type of argument in function {context} (expected: number, actual: {})",
        other.type_name()
      ))),
    }
  }

  pub fn to_complex(&self, context: &str) -> Result<Complex, CalcError> {
    match self {
      Value::Complex(z) => Ok(*z),
      other => other.to_real(context).map(Complex::from_real),
    }
  }

  pub fn is_complex(&self) -> bool {
    matches!(self, Value::Complex(z) if z.im != 0.0)
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Number(n) => f.write_str(&number_to_string(*n)),
      Value::Complex(z) => write!(f, "{z}"),
      Value::Boolean(b) => write!(f, "{b}"),
      Value::Str(s) => f.write_str(s),
      Value::Null => f.write_str("null"),
      Value::Undefined => f.write_str("undefined"),
    }
  }
}
