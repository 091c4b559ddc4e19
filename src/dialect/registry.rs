//! Name → dialect lookup.
//!
//! Descriptors are immutable once registered and handed out as
//! `Arc<Dialect>`, so readers never see a half-built entry. Registration
//! takes the write lock; lookups take the read lock only long enough to
//! clone the `Arc`.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use super::{Dialect, builtins};
use crate::error::{TranspileError, TranspileResult};

/// Maximum edit distance for a "did you mean" suggestion.
const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Default)]
pub struct Registry {
    dialects: RwLock<HashMap<String, Arc<Dialect>>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in dialect.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for dialect in builtins() {
            let name = dialect.name.clone();
            registry.register(&name, dialect);
        }
        registry
    }

    /// Add `dialect` under `name`, replacing any dialect whose name
    /// normalises to the same key.
    pub fn register(&self, name: &str, mut dialect: Dialect) {
        let key = normalize(name);
        dialect.name = key.clone();
        let mut dialects = self.dialects.write().unwrap_or_else(PoisonError::into_inner);
        if dialects.insert(key.clone(), Arc::new(dialect)).is_some() {
            debug!(dialect = %key, "replaced registered dialect");
        } else {
            debug!(dialect = %key, "registered dialect");
        }
    }

    /// Look up a dialect by name, case-insensitively.
    pub fn resolve(&self, name: &str) -> TranspileResult<Arc<Dialect>> {
        let key = normalize(name);
        let dialects = self.dialects.read().unwrap_or_else(PoisonError::into_inner);
        match dialects.get(&key) {
            Some(dialect) => Ok(Arc::clone(dialect)),
            None => Err(TranspileError::UnknownDialect {
                name: name.to_string(),
                suggestion: closest(&key, dialects.keys()),
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dialects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&normalize(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let dialects = self.dialects.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = dialects.keys().cloned().collect();
        names.sort();
        names
    }
}

/// The process-wide registry, populated with the built-ins on first use.
pub fn global() -> &'static Registry {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(Registry::with_builtins)
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn closest<'a>(name: &str, candidates: impl Iterator<Item = &'a String>) -> Option<String> {
    candidates
        .map(|candidate| (strsim::levenshtein(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
        .min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)))
        .map(|(_, candidate)| candidate.clone())
}
