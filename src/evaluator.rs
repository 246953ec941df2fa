//! Tree-walking evaluation of a parsed `Expr` against variable bindings.

use crate::functions;
use crate::functions::number_theory;
use crate::syntax::{BinaryOperator, Expr, UnaryOperator};
use crate::value::Value;
use crate::{Bindings, CalcError};

/// Evaluate `expr`. Constants take precedence over bindings of the same
/// name; an identifier that is neither is reported as undefined.
pub fn evaluate_expr(
  expr: &Expr,
  bindings: &Bindings,
) -> Result<Value, CalcError> {
  match expr {
    Expr::Number(n) => Ok(Value::Number(*n)),
    Expr::String(s) => Ok(Value::Str(s.clone())),
    Expr::Identifier(name) => lookup(name, bindings),
    Expr::FunctionCall { name, args } => {
      if !functions::is_function(name) {
        return Err(CalcError::Evaluation(
          if bindings.contains_key(name) || functions::is_constant(name) {
            format!("{name} is not a function")
          } else {
            format!("Undefined function {name}")
          },
        ));
      }
      let values = args
        .iter()
        .map(|arg| evaluate_expr(arg, bindings))
        .collect::<Result<Vec<_>, _>>()?;
      functions::call(name, &values)
    }
    Expr::UnaryOp { op, operand } => {
      let value = evaluate_expr(operand, bindings)?;
      unary(*op, &value)
    }
    Expr::BinaryOp { op, left, right } => {
      let left = evaluate_expr(left, bindings)?;
      let right = evaluate_expr(right, bindings)?;
      binary(*op, &left, &right)
    }
  }
}

fn lookup(name: &str, bindings: &Bindings) -> Result<Value, CalcError> {
  if let Some(value) = functions::constant_value(name) {
    return Ok(value);
  }
  if let Some(value) = bindings.get(name) {
    return Ok(Value::Number(*value));
  }
  if functions::is_function(name) {
    return Err(CalcError::Evaluation(format!(
      "Function {name} must be called with arguments"
    )));
  }
  Err(CalcError::Evaluation(format!("Undefined symbol {name}")))
}

fn unary(op: UnaryOperator, value: &Value) -> Result<Value, CalcError> {
  match op {
    UnaryOperator::Minus => {
      if value.is_complex() {
        Ok(Value::from_complex(-value.to_complex("unaryMinus")?))
      } else {
        Ok(Value::Number(-value.to_real("unaryMinus")?))
      }
    }
    UnaryOperator::Plus => {
      if value.is_complex() {
        Ok(value.clone())
      } else {
        Ok(Value::Number(value.to_real("unaryPlus")?))
      }
    }
    UnaryOperator::Factorial => number_theory::factorial(value),
  }
}

fn binary(
  op: BinaryOperator,
  left: &Value,
  right: &Value,
) -> Result<Value, CalcError> {
  match op {
    BinaryOperator::Power => number_theory::power(left, right),
    BinaryOperator::Plus
    | BinaryOperator::Minus
    | BinaryOperator::Times
    | BinaryOperator::Divide => arithmetic(op, left, right),
    _ => compare(op, left, right),
  }
}

fn arithmetic(
  op: BinaryOperator,
  left: &Value,
  right: &Value,
) -> Result<Value, CalcError> {
  let name = match op {
    BinaryOperator::Plus => "add",
    BinaryOperator::Minus => "subtract",
    BinaryOperator::Times => "multiply",
    _ => "divide",
  };
  if left.is_complex() || right.is_complex() {
    let (a, b) = (left.to_complex(name)?, right.to_complex(name)?);
    let result = match op {
      BinaryOperator::Plus => a + b,
      BinaryOperator::Minus => a - b,
      BinaryOperator::Times => a * b,
      _ => a / b,
    };
    return Ok(Value::from_complex(result));
  }
  let (a, b) = (left.to_real(name)?, right.to_real(name)?);
  let result = match op {
    BinaryOperator::Plus => a + b,
    BinaryOperator::Minus => a - b,
    BinaryOperator::Times => a * b,
    _ => a / b,
  };
  Ok(Value::Number(result))
}

fn compare(
  op: BinaryOperator,
  left: &Value,
  right: &Value,
) -> Result<Value, CalcError> {
  if let (Value::Str(a), Value::Str(b)) = (left, right) {
    let ordering = a.cmp(b);
    return Ok(Value::Boolean(match op {
      BinaryOperator::Equal => ordering.is_eq(),
      BinaryOperator::NotEqual => ordering.is_ne(),
      BinaryOperator::Less => ordering.is_lt(),
      BinaryOperator::LessEqual => ordering.is_le(),
      BinaryOperator::Greater => ordering.is_gt(),
      _ => ordering.is_ge(),
    }));
  }
  if left.is_complex() || right.is_complex() {
    let (a, b) = (left.to_complex("equal")?, right.to_complex("equal")?);
    return match op {
      BinaryOperator::Equal => Ok(Value::Boolean(a == b)),
      BinaryOperator::NotEqual => Ok(Value::Boolean(a != b)),
      _ => Err(CalcError::Evaluation(
        "No ordering relation is defined for complex numbers".into(),
      )),
    };
  }
  let (a, b) = (left.to_real("compare")?, right.to_real("compare")?);
  Ok(Value::Boolean(match op {
    BinaryOperator::Equal => a == b,
    BinaryOperator::NotEqual => a != b,
    BinaryOperator::Less => a < b,
    BinaryOperator::LessEqual => a <= b,
    BinaryOperator::Greater => a > b,
    _ => a >= b,
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::syntax::string_to_expr;
  use crate::value::Complex;

  fn eval(input: &str) -> Result<Value, CalcError> {
    evaluate_expr(&string_to_expr(input).unwrap(), &Bindings::new())
  }

  #[test]
  fn arithmetic_on_reals() {
    assert_eq!(eval("2 + 3 * 4").unwrap(), Value::Number(14.0));
    assert_eq!(eval("-5 + 3").unwrap(), Value::Number(-2.0));
    assert_eq!(eval("1 / 0").unwrap(), Value::Number(f64::INFINITY));
    assert!(matches!(eval("0 / 0").unwrap(), Value::Number(n) if n.is_nan()));
  }

  #[test]
  fn complex_flows_through_arithmetic() {
    assert_eq!(eval("i * i").unwrap(), Value::Number(-1.0));
    assert_eq!(
      eval("1 + sqrt(-4)").unwrap(),
      Value::Complex(Complex::new(1.0, 2.0))
    );
  }

  #[test]
  fn comparisons() {
    assert_eq!(eval("2 > 1").unwrap(), Value::Boolean(true));
    assert_eq!(eval("1 + 1 == 2").unwrap(), Value::Boolean(true));
    assert_eq!(eval("\"a\" != \"b\"").unwrap(), Value::Boolean(true));
    assert!(eval("i < 1").is_err());
  }

  #[test]
  fn literals_coerce() {
    assert_eq!(eval("true + 1").unwrap(), Value::Number(2.0));
    assert_eq!(eval("\"abc\"").unwrap(), Value::Str("abc".into()));
    assert_eq!(eval("null").unwrap(), Value::Null);
  }

  #[test]
  fn unknown_names() {
    assert_eq!(
      eval("invalid").unwrap_err(),
      CalcError::Evaluation("Undefined symbol invalid".into())
    );
    assert_eq!(
      eval("foo(2)").unwrap_err(),
      CalcError::Evaluation("Undefined function foo".into())
    );
    assert_eq!(
      eval("pi(2)").unwrap_err(),
      CalcError::Evaluation("pi is not a function".into())
    );
  }

  #[test]
  fn bound_variables() {
    let mut bindings = Bindings::new();
    bindings.insert("x".to_string(), 3.0);
    let expr = string_to_expr("x^2 + 2x + 1").unwrap();
    assert_eq!(evaluate_expr(&expr, &bindings).unwrap(), Value::Number(16.0));
  }
}
