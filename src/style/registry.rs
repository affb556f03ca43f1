//! Style registry
//!
//! Maps a canonical key and stream tag to a shared [`StyleHandle`]. Handles
//! are created on first use and live as long as the registry; equal states
//! from any number of decoders resolve to the same handle.
//!
//! The registry is shared between reader threads. Lookups take a read lock;
//! a miss retries under the write lock through the map's entry API, so
//! concurrent first resolutions of one key publish a single handle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use super::attributes::TextAttributes;
use super::key::CanonicalKey;
use crate::app::ColorPalette;
use crate::core::TerminalState;
use crate::parser::StreamTag;

/// A reusable style: one per distinct (key, stream) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleHandle {
    /// Creation order, unique within a registry
    pub id: u64,
    pub key: CanonicalKey,
    pub stream: StreamTag,
    pub attributes: TextAttributes,
}

impl StyleHandle {
    /// Human-readable name, e.g. `stdout:0;1;38;5;1`
    pub fn name(&self) -> String {
        format!("{}:{}", self.stream, self.key)
    }
}

type HandleMap = HashMap<StreamTag, HashMap<CanonicalKey, Arc<StyleHandle>>>;

/// Registry of style handles
#[derive(Debug, Default)]
pub struct StyleRegistry {
    palette: ColorPalette,
    handles: RwLock<HandleMap>,
    next_id: AtomicU64,
}

impl StyleRegistry {
    /// Create an empty registry with the default palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry resolving colors against `palette`
    pub fn with_palette(palette: ColorPalette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Get the handle for `key` on `stream`, creating it on first use
    pub fn resolve(&self, key: &CanonicalKey, stream: StreamTag) -> Arc<StyleHandle> {
        if let Some(handle) = self.get(key, stream) {
            return handle;
        }

        let mut handles = self.handles.write().unwrap_or_else(PoisonError::into_inner);
        let handle = handles
            .entry(stream)
            .or_default()
            .entry(key.clone())
            .or_insert_with(|| {
                let handle = StyleHandle {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    key: key.clone(),
                    stream,
                    attributes: TextAttributes::resolve(&key.to_state(), &self.palette),
                };
                tracing::debug!(id = handle.id, name = %handle.name(), "registered style");
                Arc::new(handle)
            });
        Arc::clone(handle)
    }

    /// Get the handle for the canonical key of `state`
    pub fn resolve_state(&self, state: &TerminalState, stream: StreamTag) -> Arc<StyleHandle> {
        self.resolve(&CanonicalKey::of(state), stream)
    }

    /// Look up an existing handle without creating one
    pub fn get(&self, key: &CanonicalKey, stream: StreamTag) -> Option<Arc<StyleHandle>> {
        let handles = self.handles.read().unwrap_or_else(PoisonError::into_inner);
        handles
            .get(&stream)
            .and_then(|by_key| by_key.get(key))
            .map(Arc::clone)
    }

    /// Number of handles created so far
    pub fn len(&self) -> usize {
        let handles = self.handles.read().unwrap_or_else(PoisonError::into_inner);
        handles.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All handles, in creation order
    pub fn handles(&self) -> Vec<Arc<StyleHandle>> {
        let handles = self.handles.read().unwrap_or_else(PoisonError::into_inner);
        let mut all: Vec<_> = handles
            .values()
            .flat_map(|by_key| by_key.values().map(Arc::clone))
            .collect();
        all.sort_by_key(|handle| handle.id);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Rgb};

    #[test]
    fn test_resolve_creates_once() {
        let registry = StyleRegistry::new();
        let key = CanonicalKey::normalize("1;31");

        let first = registry.resolve(&key, StreamTag::Stdout);
        let second = registry.resolve(&key, StreamTag::Stdout);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_deserialized_key_finds_existing_handle() {
        let registry = StyleRegistry::new();
        let state = TerminalState::new()
            .with_fg(Color::RED)
            .with_weight(crate::core::Weight::Bold);
        let existing = registry.resolve_state(&state, StreamTag::Stdout);

        let key: CanonicalKey = serde_json::from_str("\"1;31\"").unwrap();
        let found = registry.resolve(&key, StreamTag::Stdout);
        assert!(Arc::ptr_eq(&existing, &found));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_streams_get_distinct_handles() {
        let registry = StyleRegistry::new();
        let key = CanonicalKey::normalize("31");

        let stdout = registry.resolve(&key, StreamTag::Stdout);
        let stderr = registry.resolve(&key, StreamTag::Stderr);
        assert!(!Arc::ptr_eq(&stdout, &stderr));
        assert_ne!(stdout.id, stderr.id);
        assert_eq!(stderr.name(), "stderr:0;38;5;1");
    }

    #[test]
    fn test_get_does_not_create() {
        let registry = StyleRegistry::new();
        let key = CanonicalKey::normalize("4");
        assert!(registry.get(&key, StreamTag::Stdout).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_equal_states_share_handle() {
        let registry = StyleRegistry::new();
        let a = registry.resolve(&CanonicalKey::normalize("31;1"), StreamTag::Stdout);
        let b = registry.resolve_state(
            &TerminalState::new()
                .with_fg(Color::RED)
                .with_weight(crate::core::Weight::Bold),
            StreamTag::Stdout,
        );
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_handles_in_creation_order() {
        let registry = StyleRegistry::new();
        registry.resolve(&CanonicalKey::normalize("1"), StreamTag::Stdout);
        registry.resolve(&CanonicalKey::normalize("2"), StreamTag::Stderr);
        registry.resolve(&CanonicalKey::normalize("3"), StreamTag::Stdout);

        let ids: Vec<u64> = registry.handles().iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_attributes_use_registry_palette() {
        let mut palette = ColorPalette::default();
        palette.ansi[2] = Rgb::new(1, 2, 3);
        let registry = StyleRegistry::with_palette(palette);

        let handle = registry.resolve(&CanonicalKey::normalize("32"), StreamTag::Stdout);
        assert_eq!(handle.attributes.foreground, Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_concurrent_first_resolution() {
        let registry = Arc::new(StyleRegistry::new());
        let key = CanonicalKey::normalize("38;5;202");

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let key = key.clone();
                std::thread::spawn(move || registry.resolve(&key, StreamTag::Stdout))
            })
            .collect();

        let handles: Vec<_> = threads.into_iter().map(|t| t.join().unwrap()).collect();
        for handle in &handles[1..] {
            assert!(Arc::ptr_eq(&handles[0], handle));
        }
        assert_eq!(registry.len(), 1);
    }
}
