use super::*;

fn close(input: &str, expected: f64) {
  let result = eval(input).unwrap();
  assert!(
    (result - expected).abs() < 1e-9,
    "{input} = {result}, expected {expected}"
  );
}

mod elementary {
  use super::*;

  #[test]
  fn trigonometry() {
    close("sin(pi/2)", 1.0);
    close("cos(0)", 1.0);
    close("atan2(1, 1)", std::f64::consts::FRAC_PI_4);
    close("tanh(0)", 0.0);
  }

  #[test]
  fn logarithms() {
    close("log(e)", 1.0);
    close("log(8, 2)", 3.0);
    close("log10(1000)", 3.0);
    close("log2(1024)", 10.0);
    close("ln(1)", 0.0);
    close("exp(1)", std::f64::consts::E);
  }

  #[test]
  fn log_of_negative_is_complex() {
    assert_eq!(eval("log(-1)").unwrap_err(), CalcError::UnsupportedComplex);
  }

  #[test]
  fn roots_and_rounding() {
    close("sqrt(16)", 4.0);
    close("cbrt(-27)", -3.0);
    close("abs(-3.5)", 3.5);
    close("round(2.567, 2)", 2.57);
    close("floor(-1.5)", -2.0);
    close("ceil(1.2)", 2.0);
    close("fix(-1.7)", -1.0);
    close("sign(-4)", -1.0);
  }

  #[test]
  fn bare_function_name() {
    let err = eval_with("sin + 1", &[]).unwrap_err();
    assert_eq!(
      err.to_string(),
      "Evaluation error: Function sin must be called with arguments"
    );
  }
}

mod number_theory {
  use super::*;

  #[test]
  fn combinatorics() {
    close("factorial(6)", 720.0);
    close("combinations(5, 2)", 10.0);
    close("permutations(5, 2)", 20.0);
    close("gamma(5)", 24.0);
  }

  #[test]
  fn huge_arguments_finish() {
    let engine = MathEngine::default();
    assert_eq!(
      engine.evaluate_simple("permutations(1e17, 1)"),
      SimpleResult::Number(1e17)
    );
    assert_eq!(
      engine.evaluate_simple("combinations(1e17, 5e16)").to_string(),
      "Error: Infinity"
    );
    assert_eq!(
      engine.evaluate_simple("permutations(1e17, 5e16)").to_string(),
      "Error: Infinity"
    );
  }

  #[test]
  fn integers() {
    close("gcd(12, 18)", 6.0);
    close("lcm(4, 6)", 12.0);
    close("mod(7, 3)", 1.0);
    close("mod(-1, 3)", 2.0);
    close("pow(2, 10)", 1024.0);
  }
}

mod statistics {
  use super::*;

  #[test]
  fn aggregates() {
    close("min(3, 1, 2)", 1.0);
    close("max(3, 1, 2)", 3.0);
    close("sum(1, 2, 3, 4)", 10.0);
    close("mean(1, 2, 3)", 2.0);
    close("median(5, 1, 3, 2)", 2.5);
    close("mode(1, 2, 2, 3)", 2.0);
  }

  #[test]
  fn spread() {
    close("var(2, 4, 4, 4, 5, 5, 7, 9)", 32.0 / 7.0);
    close("std(1, 3)", std::f64::consts::SQRT_2);
  }
}

mod random {
  use super::*;

  use graphcalc::{seed_rng, unseed_rng};

  #[test]
  fn seeded_sequence_repeats() {
    let engine = MathEngine::default();
    seed_rng(42);
    let first = engine.evaluate_simple("random()");
    let first_int = engine.evaluate_simple("randomInt(1, 100)");
    seed_rng(42);
    let second = engine.evaluate_simple("random()");
    let second_int = engine.evaluate_simple("randomInt(1, 100)");
    unseed_rng();

    assert_eq!(first, second);
    assert_eq!(first_int, second_int);
  }

  #[test]
  fn ranges() {
    for _ in 0..50 {
      let r = eval("random(2, 3)").unwrap();
      assert!((2.0..3.0).contains(&r));
      let n = eval("randomInt(1, 4)").unwrap();
      assert!(n == n.floor() && (1.0..4.0).contains(&n));
    }
  }
}
