//! Compiled-expression cache keyed by trimmed source text.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::engine::CompiledExpression;

/// Maps trimmed source text to its compiled form. Entries are only removed
/// by [`ExpressionCache::clear`]; there is no expiry.
///
/// Unbounded unless built with [`ExpressionCache::with_capacity_limit`].
/// A full cache keeps its existing entries and stops storing new ones.
#[derive(Debug, Default)]
pub struct ExpressionCache {
  entries: Mutex<HashMap<String, Arc<CompiledExpression>>>,
  capacity_limit: Option<usize>,
}

impl ExpressionCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity_limit(limit: usize) -> Self {
    ExpressionCache {
      entries: Mutex::new(HashMap::new()),
      capacity_limit: Some(limit),
    }
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<CompiledExpression>>> {
    // No operation leaves the map half-updated, so poisoning is ignored.
    self.entries.lock().unwrap_or_else(|e| e.into_inner())
  }

  pub fn get(&self, source: &str) -> Option<Arc<CompiledExpression>> {
    self.lock().get(source).cloned()
  }

  /// Store `compiled` and return the entry that is now cached for its
  /// source. If another caller stored the same text first, that entry wins
  /// so every caller sees one instance.
  pub fn insert(
    &self,
    compiled: Arc<CompiledExpression>,
  ) -> Arc<CompiledExpression> {
    let mut entries = self.lock();
    if let Some(existing) = entries.get(compiled.source()) {
      return Arc::clone(existing);
    }
    if self.capacity_limit.is_some_and(|limit| entries.len() >= limit) {
      log::debug!(
        "expression cache full ({} entries), not storing {:?}",
        entries.len(),
        compiled.source()
      );
      return compiled;
    }
    entries.insert(compiled.source().to_string(), Arc::clone(&compiled));
    compiled
  }

  pub fn clear(&self) {
    self.lock().clear();
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
