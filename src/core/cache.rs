//! Compiled template cache
//!
//! Entries are immutable once inserted, so lookups only take the shared
//! lock. A miss compiles outside any lock and the first insert wins.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::template::ReplacementTemplate;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: RwLock<HashMap<String, Arc<ReplacementTemplate>>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled form of `spec`, compiling it on first use.
    pub fn get_or_compile(&self, spec: &str) -> Result<Arc<ReplacementTemplate>> {
        if let Some(template) = self.entries.read().get(spec) {
            return Ok(Arc::clone(template));
        }

        let compiled = Arc::new(ReplacementTemplate::compile(spec)?);
        tracing::event!(
            tracing::Level::TRACE,
            operation = "template_cache_insert",
            spec = %spec,
            tokens = compiled.tokens().len() as u64
        );

        let mut entries = self.entries.write();
        Ok(Arc::clone(
            entries.entry(spec.to_string()).or_insert(compiled),
        ))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
