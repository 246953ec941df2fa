use super::*;

mod arithmetic {
  use super::*;

  #[test]
  fn precedence() {
    assert_eq!(eval("2 + 3*4").unwrap(), 14.0);
    assert_eq!(eval("(2+3)*4").unwrap(), 20.0);
    assert_eq!(eval("2^3^2").unwrap(), 512.0);
    assert_eq!(eval("-2^2").unwrap(), -4.0);
    assert_eq!(eval("10 - 4 - 3").unwrap(), 3.0);
  }

  #[test]
  fn implicit_multiplication() {
    assert_eq!(eval_with("x^2+2x+1", &[("x", 3.0)]).unwrap(), 16.0);
    assert_eq!(eval_with("3(x + 1)", &[("x", 1.0)]).unwrap(), 6.0);
    assert!((eval("2pi").unwrap() - std::f64::consts::TAU).abs() < 1e-12);
  }

  #[test]
  fn implicit_products_group_before_division() {
    assert_eq!(eval("8 pi / 2 pi").unwrap(), 4.0);
    assert_eq!(eval_with("x / 2x", &[("x", 3.0)]).unwrap(), 0.5);
    assert_eq!(eval_with("1/2x", &[("x", 4.0)]).unwrap(), 2.0);
  }

  #[test]
  fn several_variables() {
    let result = eval_with("x*y+z", &[("x", 2.0), ("y", 3.0), ("z", 4.0)]);
    assert_eq!(result.unwrap(), 10.0);
  }

  #[test]
  fn extra_bindings_are_ignored() {
    assert_eq!(eval_with("x + 1", &[("x", 1.0), ("y", 9.0)]).unwrap(), 2.0);
    assert_eq!(eval_with("2 * 3", &[("x", 1.0)]).unwrap(), 6.0);
  }

  #[test]
  fn factorial() {
    assert_eq!(eval("5!").unwrap(), 120.0);
    assert_eq!(eval("0!").unwrap(), 1.0);
    assert_eq!(eval("3! + 1").unwrap(), 7.0);
  }

  #[test]
  fn complex_intermediates_with_real_result() {
    assert_eq!(eval("i * i").unwrap(), -1.0);
    assert_eq!(eval("sqrt(-4) * sqrt(-4)").unwrap(), -4.0);
  }
}

mod failures {
  use super::*;

  #[test]
  fn missing_variable_is_named() {
    let err = eval_with("x+y", &[("x", 1.0)]).unwrap_err();
    assert_eq!(err, CalcError::MissingVariables(vec!["y".into()]));
    assert_eq!(err.to_string(), "Missing variables: y");
  }

  #[test]
  fn all_missing_variables_are_listed() {
    let err = eval("a + b * c").unwrap_err();
    assert_eq!(err.to_string(), "Missing variables: a, b, c");
  }

  #[test]
  fn division_by_zero() {
    assert_eq!(eval("1/0").unwrap_err(), CalcError::Infinite);
    assert_eq!(eval("1/0").unwrap_err().to_string(), "Result is infinite");
    assert_eq!(eval("0/0").unwrap_err(), CalcError::NotANumber);
  }

  #[test]
  fn complex_results_are_rejected() {
    assert_eq!(eval("sqrt(-1)").unwrap_err(), CalcError::UnsupportedComplex);
    assert_eq!(
      eval_with("sqrt(x)", &[("x", -1.0)]).unwrap_err(),
      CalcError::UnsupportedComplex
    );
    assert_eq!(
      eval("i").unwrap_err().to_string(),
      "Complex numbers not supported in this context"
    );
  }

  #[test]
  fn non_numeric_results() {
    assert_eq!(
      eval("2 > 1").unwrap_err().to_string(),
      "Invalid result type: boolean"
    );
    assert_eq!(
      eval("\"abc\"").unwrap_err(),
      CalcError::InvalidResultType("string")
    );
  }

  #[test]
  fn evaluation_errors_are_wrapped() {
    let err = eval_with("f(2)", &[("f", 1.0)]).unwrap_err();
    assert_eq!(err.to_string(), "Evaluation error: f is not a function");

    let err = eval("sqrt(1, 2)").unwrap_err();
    assert!(matches!(err, CalcError::Evaluation(_)));
    assert!(err.to_string().contains("Too many arguments"));
  }

  #[test]
  fn negative_factorial() {
    let err = eval("(-1)!").unwrap_err();
    assert!(matches!(err, CalcError::Evaluation(_)));
  }
}

mod config {
  use super::*;

  #[test]
  fn complex_tolerance_is_configurable() {
    let strict = MathEngine::new(EngineConfig {
      complex_tolerance: 0.0,
      ..EngineConfig::default()
    });
    let compiled = strict.parse("i * i").unwrap();
    assert_eq!(strict.evaluate(&compiled, &Bindings::new()).unwrap(), -1.0);

    let loose = MathEngine::new(EngineConfig {
      complex_tolerance: 2.0,
      ..EngineConfig::default()
    });
    let compiled = loose.parse("1 + i").unwrap();
    assert_eq!(loose.evaluate(&compiled, &Bindings::new()).unwrap(), 1.0);
  }

  #[test]
  fn default_values() {
    let config = EngineConfig::default();
    assert_eq!(config.complex_tolerance, 1e-10);
    assert_eq!(config.default_step, 0.1);
    assert_eq!(config.max_samples, None);
    assert_eq!(config.cache_capacity, None);
  }
}
