use super::*;

use std::sync::Arc;

use graphcalc::ExpressionCache;

#[test]
fn repeated_parse_returns_same_object() {
  let engine = MathEngine::default();
  let first = engine.parse("x^2 + 1").unwrap();
  let second = engine.parse("x^2 + 1").unwrap();
  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(engine.cache_size(), 1);
}

#[test]
fn key_is_trimmed_text() {
  let engine = MathEngine::default();
  let first = engine.parse("x + 1").unwrap();
  let second = engine.parse("   x + 1\t").unwrap();
  assert!(Arc::ptr_eq(&first, &second));

  engine.parse("x+1").unwrap();
  assert_eq!(engine.cache_size(), 2);
}

#[test]
fn size_counts_distinct_texts() {
  let engine = MathEngine::default();
  for input in ["1", "2", "x", "1", " 2 ", "x"] {
    engine.parse(input).unwrap();
  }
  assert_eq!(engine.cache_size(), 3);
}

#[test]
fn clear_forces_recompilation() {
  let engine = MathEngine::default();
  let before = engine.parse("sin(x)").unwrap();
  engine.clear_cache();
  assert_eq!(engine.cache_size(), 0);

  let after = engine.parse("sin(x)").unwrap();
  assert!(!Arc::ptr_eq(&before, &after));
  assert_eq!(engine.cache_size(), 1);
}

#[test]
fn engines_can_share_a_cache() {
  let cache = Arc::new(ExpressionCache::new());
  let a = MathEngine::with_cache(EngineConfig::default(), Arc::clone(&cache));
  let b = MathEngine::with_cache(EngineConfig::default(), Arc::clone(&cache));

  let first = a.parse("x * 2").unwrap();
  let second = b.parse("x * 2").unwrap();
  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(cache.len(), 1);
}

#[test]
fn full_cache_stops_storing() {
  let engine = MathEngine::new(EngineConfig {
    cache_capacity: Some(1),
    ..EngineConfig::default()
  });
  let x = engine.parse("x").unwrap();
  let y1 = engine.parse("y").unwrap();
  let y2 = engine.parse("y").unwrap();

  assert_eq!(engine.cache_size(), 1);
  assert!(Arc::ptr_eq(&x, &engine.parse("x").unwrap()));
  assert!(!Arc::ptr_eq(&y1, &y2));
  assert_eq!(y1.variables(), ["y"]);
}

#[test]
fn concurrent_parses_agree() {
  let engine = MathEngine::default();
  let results: Vec<_> = std::thread::scope(|s| {
    let handles: Vec<_> = (0..8)
      .map(|_| s.spawn(|| engine.parse("x^3 - 2x").unwrap()))
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  assert_eq!(engine.cache_size(), 1);
  let cached = engine.parse("x^3 - 2x").unwrap();
  for compiled in &results {
    assert!(Arc::ptr_eq(compiled, &cached));
  }
}

#[test]
fn default_engine_free_functions() {
  let compiled = graphcalc::parse_expression("  7 * 6 ").unwrap();
  assert_eq!(compiled.source(), "7 * 6");
  let again = graphcalc::parse_expression("7 * 6").unwrap();
  assert!(Arc::ptr_eq(&compiled, &again));
  assert!(graphcalc::cache_size() >= 1);
  assert_eq!(
    graphcalc::evaluate_function(&compiled, &Bindings::new()).unwrap(),
    42.0
  );
}
