//! Per-document emulator cache.
//!
//! Metrics/renderer instances are cached per font identity for one
//! pagination or render pass and discarded with the cache. Each in-flight
//! document owns its own cache instance, so concurrent documents never
//! share mutable font state.

use crate::{FontKey, FontMetricsEmulator, FontRequest};
use std::collections::HashMap;

/// Cache of [`FontMetricsEmulator`] instances keyed by font identity
#[derive(Debug, Default)]
pub struct MetricsCache {
    entries: HashMap<FontKey, FontMetricsEmulator>,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The emulator for this font configuration, created on first use
    pub fn emulator(&mut self, request: &FontRequest, wrap: bool) -> &mut FontMetricsEmulator {
        let key = FontKey::new(request, wrap);
        self.entries
            .entry(key)
            .or_insert_with(|| FontMetricsEmulator::new(request.clone()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached instances (end of a page/document render)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
