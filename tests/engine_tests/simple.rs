use super::*;

fn simple(input: &str) -> SimpleResult {
  MathEngine::default().evaluate_simple(input)
}

#[test]
fn numbers() {
  assert_eq!(simple("2 + 3"), SimpleResult::Number(5.0));
  assert_eq!(simple("  10 / 4 "), SimpleResult::Number(2.5));
  assert_eq!(simple("5!").to_string(), "120");
  assert_eq!(simple("8 pi / 2 pi"), SimpleResult::Number(4.0));
}

#[test]
fn empty_input() {
  let engine = MathEngine::default();
  let empty = SimpleResult::Error("Error: Empty expression".into());
  assert_eq!(engine.evaluate_simple(""), empty);
  assert_eq!(engine.evaluate_simple("   "), empty);
  assert_eq!(engine.evaluate_simple(None::<&str>), empty);
}

#[test]
fn non_finite_results() {
  assert_eq!(simple("1/0").to_string(), "Error: Infinity");
  assert_eq!(simple("-1/0").to_string(), "Error: Infinity");
  assert_eq!(simple("0/0").to_string(), "Error: Invalid operation");
}

#[test]
fn non_numeric_results_are_rendered() {
  assert_eq!(simple("2 > 1"), SimpleResult::Text("true".into()));
  assert_eq!(simple("sqrt(-4)"), SimpleResult::Text("2i".into()));
}

#[test]
fn errors_are_prefixed() {
  let result = simple("2 +");
  assert!(result.is_error());
  assert!(result.to_string().starts_with("Error: "));

  assert_eq!(simple("x + 1").to_string(), "Error: Undefined symbol x");
}

#[test]
fn does_not_fill_the_cache() {
  let engine = MathEngine::default();
  engine.evaluate_simple("1 + 1");
  assert_eq!(engine.cache_size(), 0);
}

#[test]
fn as_number() {
  assert_eq!(simple("6 * 7").as_number(), Some(42.0));
  assert_eq!(simple("1/0").as_number(), None);
}
