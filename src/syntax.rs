use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use crate::functions;
use crate::{CalcError, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
  Plus,
  Minus,
  Times,
  Divide,
  Power,
  Equal,
  NotEqual,
  Less,
  LessEqual,
  Greater,
  GreaterEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
  Minus,
  Plus,
  Factorial,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Number(f64),
  String(String),
  Identifier(String),
  FunctionCall {
    name: String,
    args: Vec<Expr>,
  },
  BinaryOp {
    op: BinaryOperator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  UnaryOp {
    op: UnaryOperator,
    operand: Box<Expr>,
  },
}

fn pratt() -> &'static PrattParser<Rule> {
  static PRATT: OnceLock<PrattParser<Rule>> = OnceLock::new();
  PRATT.get_or_init(|| {
    PrattParser::new()
      .op(Op::infix(Rule::Equal, Assoc::Left)
        | Op::infix(Rule::NotEqual, Assoc::Left)
        | Op::infix(Rule::Less, Assoc::Left)
        | Op::infix(Rule::LessEqual, Assoc::Left)
        | Op::infix(Rule::Greater, Assoc::Left)
        | Op::infix(Rule::GreaterEqual, Assoc::Left))
      .op(
        Op::infix(Rule::Plus, Assoc::Left)
          | Op::infix(Rule::Minus, Assoc::Left),
      )
      .op(
        Op::infix(Rule::Times, Assoc::Left)
          | Op::infix(Rule::Divide, Assoc::Left),
      )
      .op(Op::infix(Rule::ImplicitTimes, Assoc::Left))
      .op(Op::prefix(Rule::Negate) | Op::prefix(Rule::Positive))
      .op(Op::infix(Rule::Power, Assoc::Right))
      .op(Op::postfix(Rule::Factorial))
  })
}

/// Parse source text into an AST.
pub fn string_to_expr(input: &str) -> Result<Expr, CalcError> {
  let mut pairs = crate::parse(input).map_err(|e| CalcError::from(*e))?;
  let program = pairs.next().ok_or_else(|| {
    CalcError::Syntax("Unexpected end of expression".to_string())
  })?;
  let expression = program
    .into_inner()
    .find(|p| p.as_rule() == Rule::Expression)
    .ok_or_else(|| {
      CalcError::Syntax("Unexpected end of expression".to_string())
    })?;
  pair_to_expr(expression)
}

/// Convert an `Expression` pair into an AST, applying operator precedence.
pub fn pair_to_expr(pair: Pair<Rule>) -> Result<Expr, CalcError> {
  fold_expression(pair.into_inner()).map(|folded| folded.expr)
}

/// A partially folded operand. `implicit` marks a product written without
/// `*` so that division can regroup `1/2x` as `(1/2) x`.
struct Folded {
  expr: Expr,
  implicit: bool,
}

impl From<Expr> for Folded {
  fn from(expr: Expr) -> Self {
    Folded {
      expr,
      implicit: false,
    }
  }
}

fn fold_expression(pairs: Pairs<Rule>) -> Result<Folded, CalcError> {
  pratt()
    .map_primary(|pair| primary_to_expr(pair).map(Folded::from))
    .map_prefix(|op, operand| {
      let op = match op.as_rule() {
        Rule::Negate => UnaryOperator::Minus,
        _ => UnaryOperator::Plus,
      };
      Ok(unary(op, operand?.expr).into())
    })
    .map_postfix(|operand, _factorial| {
      Ok(unary(UnaryOperator::Factorial, operand?.expr).into())
    })
    .map_infix(|left, op, right| {
      let (left, right) = (left?, right?);
      let op = match op.as_rule() {
        Rule::ImplicitTimes => {
          return Ok(Folded {
            expr: binary(BinaryOperator::Times, left.expr, right.expr),
            implicit: true,
          });
        }
        Rule::Divide => return Ok(divide(left, right).into()),
        Rule::Plus => BinaryOperator::Plus,
        Rule::Minus => BinaryOperator::Minus,
        Rule::Times => BinaryOperator::Times,
        Rule::Power => BinaryOperator::Power,
        Rule::Equal => BinaryOperator::Equal,
        Rule::NotEqual => BinaryOperator::NotEqual,
        Rule::Less => BinaryOperator::Less,
        Rule::LessEqual => BinaryOperator::LessEqual,
        Rule::Greater => BinaryOperator::Greater,
        Rule::GreaterEqual => BinaryOperator::GreaterEqual,
        rule => {
          return Err(CalcError::Syntax(format!(
            "Unexpected operator {rule:?}"
          )));
        }
      };
      Ok(binary(op, left.expr, right.expr).into())
    })
    .parse(pairs)
}

fn unary(op: UnaryOperator, operand: Expr) -> Expr {
  Expr::UnaryOp {
    op,
    operand: Box::new(operand),
  }
}

fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
  Expr::BinaryOp {
    op,
    left: Box::new(left),
    right: Box::new(right),
  }
}

/// `a / b c` is `a / (b c)`, except that a number over a number-led
/// implicit product keeps the fraction as a coefficient: `1/2x` is
/// `(1/2) x`.
fn divide(left: Folded, right: Folded) -> Expr {
  if !right.implicit || !matches!(left.expr, Expr::Number(_)) {
    return binary(BinaryOperator::Divide, left.expr, right.expr);
  }
  match right.expr {
    Expr::BinaryOp {
      op: BinaryOperator::Times,
      left: coefficient,
      right: rest,
    } if matches!(*coefficient, Expr::Number(_)) => binary(
      BinaryOperator::Times,
      binary(BinaryOperator::Divide, left.expr, *coefficient),
      *rest,
    ),
    other => binary(BinaryOperator::Divide, left.expr, other),
  }
}

fn primary_to_expr(pair: Pair<Rule>) -> Result<Expr, CalcError> {
  match pair.as_rule() {
    Rule::Number => pair
      .as_str()
      .parse::<f64>()
      .map(Expr::Number)
      .map_err(|e| CalcError::Syntax(format!("{e}: {}", pair.as_str()))),
    Rule::String => Ok(Expr::String(
      pair
        .into_inner()
        .next()
        .map(|content| content.as_str().to_string())
        .unwrap_or_default(),
    )),
    Rule::Identifier => Ok(Expr::Identifier(pair.as_str().to_string())),
    Rule::FunctionCall => {
      let mut inner = pair.into_inner();
      let name = inner
        .next()
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| CalcError::Syntax("Function name expected".into()))?;
      let args = inner.map(pair_to_expr).collect::<Result<Vec<_>, _>>()?;
      Ok(Expr::FunctionCall { name, args })
    }
    Rule::Expression => pair_to_expr(pair),
    rule => Err(CalcError::Syntax(format!("Unexpected token {rule:?}"))),
  }
}

/// Names in `expr` that must be bound by the caller: every identifier,
/// including the callee of a call, that is neither a recognized constant nor
/// a recognized function. Sorted and deduplicated.
pub fn free_variables(expr: &Expr) -> Vec<String> {
  let mut names = BTreeSet::new();
  collect_identifiers(expr, &mut names);
  names
    .into_iter()
    .filter(|name| !functions::is_reserved(name))
    .collect()
}

fn collect_identifiers(expr: &Expr, names: &mut BTreeSet<String>) {
  match expr {
    Expr::Identifier(name) => {
      names.insert(name.clone());
    }
    Expr::FunctionCall { name, args } => {
      names.insert(name.clone());
      for arg in args {
        collect_identifiers(arg, names);
      }
    }
    Expr::BinaryOp { left, right, .. } => {
      collect_identifiers(left, names);
      collect_identifiers(right, names);
    }
    Expr::UnaryOp { operand, .. } => collect_identifiers(operand, names),
    Expr::Number(_) | Expr::String(_) => {}
  }
}

impl fmt::Display for BinaryOperator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let symbol = match self {
      BinaryOperator::Plus => "+",
      BinaryOperator::Minus => "-",
      BinaryOperator::Times => "*",
      BinaryOperator::Divide => "/",
      BinaryOperator::Power => "^",
      BinaryOperator::Equal => "==",
      BinaryOperator::NotEqual => "!=",
      BinaryOperator::Less => "<",
      BinaryOperator::LessEqual => "<=",
      BinaryOperator::Greater => ">",
      BinaryOperator::GreaterEqual => ">=",
    };
    f.write_str(symbol)
  }
}

/// Fully parenthesized rendering, handy for checking how a parse grouped.
impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Number(n) => f.write_str(&crate::number_to_string(*n)),
      Expr::String(s) => write!(f, "\"{s}\""),
      Expr::Identifier(name) => f.write_str(name),
      Expr::FunctionCall { name, args } => {
        write!(f, "{name}(")?;
        for (i, arg) in args.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{arg}")?;
        }
        f.write_str(")")
      }
      Expr::BinaryOp { op, left, right } => {
        write!(f, "({left} {op} {right})")
      }
      Expr::UnaryOp { op, operand } => match op {
        UnaryOperator::Minus => write!(f, "(-{operand})"),
        UnaryOperator::Plus => write!(f, "(+{operand})"),
        UnaryOperator::Factorial => write!(f, "({operand}!)"),
      },
    }
  }
}
