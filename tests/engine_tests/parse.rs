use super::*;

mod input_checks {
  use super::*;

  #[test]
  fn missing_input() {
    let engine = MathEngine::default();
    assert_eq!(
      engine.parse(None::<&str>).unwrap_err(),
      CalcError::InvalidInput("input must be a non-empty string".into())
    );
    assert_eq!(
      engine.parse("").unwrap_err().to_string(),
      "Invalid expression: input must be a non-empty string"
    );
  }

  #[test]
  fn whitespace_only() {
    let engine = MathEngine::default();
    assert_eq!(
      engine.parse("   \t ").unwrap_err().to_string(),
      "Invalid expression: input cannot be empty"
    );
  }

  #[test]
  fn bad_syntax() {
    let engine = MathEngine::default();
    for input in ["2 +", "(1 + 2", "3 * * 4", "sin(", "1 2 )"] {
      let err = engine.parse(input).unwrap_err();
      assert!(matches!(err, CalcError::Syntax(_)), "{input}: {err:?}");
      assert!(err.to_string().starts_with("Invalid expression syntax: "));
    }
  }

  #[test]
  fn failed_parse_is_not_cached() {
    let engine = MathEngine::default();
    assert!(engine.parse("2 +").is_err());
    assert_eq!(engine.cache_size(), 0);
  }

  #[test]
  fn validity_check_matches_parse_input_rules() {
    assert!(graphcalc::is_valid_expression("x + 1"));
    assert!(graphcalc::is_valid_expression("  2 "));
    assert!(!graphcalc::is_valid_expression(""));
    assert!(!graphcalc::is_valid_expression(" \t\n"));
  }

  #[test]
  fn source_is_trimmed() {
    let engine = MathEngine::default();
    let compiled = engine.parse("  x + 1 \n").unwrap();
    assert_eq!(compiled.source(), "x + 1");
  }
}

mod variables {
  use super::*;

  fn vars(input: &str) -> Vec<String> {
    MathEngine::default().parse(input).unwrap().variables().to_vec()
  }

  #[test]
  fn sorted_and_unique() {
    assert_eq!(vars("x*y + z"), ["x", "y", "z"]);
    assert_eq!(vars("z + y + x"), ["x", "y", "z"]);
    assert_eq!(vars("x * x + x"), ["x"]);
  }

  #[test]
  fn constants_are_excluded() {
    assert_eq!(vars("pi*e + x"), ["x"]);
    assert!(vars("PI * E + i").is_empty());
    assert!(vars("true").is_empty());
  }

  #[test]
  fn function_names_are_excluded() {
    assert_eq!(vars("sin(x) + cos(theta)"), ["theta", "x"]);
    assert!(vars("sqrt(16) + max(1, 2)").is_empty());
  }

  #[test]
  fn unknown_callee_is_a_variable() {
    assert_eq!(vars("f(x)"), ["f", "x"]);
  }

  #[test]
  fn constant_expression_has_none() {
    assert!(vars("2 + 3 * 4").is_empty());
  }
}
