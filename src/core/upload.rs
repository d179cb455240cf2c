// src/core/upload.rs — Object-URL registry for attachments
//
// Attachments carry a dereferenceable URL that exists only for the lifetime
// of whatever still references it. `ObjectUrl` is the RAII guard: created
// when the composer attaches a file, shared by `Arc` into the sent message,
// and released from the registry when the last reference drops. The registry
// exposes `live_count()` so leaks are observable.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, Weak};
use uuid::Uuid;

#[derive(Default)]
pub struct ObjectUrlRegistry {
    live: Arc<Mutex<HashSet<String>>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh `mem://` URL and register it as live.
    pub fn create(&self) -> ObjectUrl {
        let url = format!("mem://{}", Uuid::new_v4());
        if let Ok(mut live) = self.live.lock() {
            live.insert(url.clone());
        }
        ObjectUrl {
            url,
            registry: Arc::downgrade(&self.live),
        }
    }

    /// Number of URLs that have been created but not yet released.
    pub fn live_count(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }

    /// Whether a specific URL is still dereferenceable.
    pub fn is_live(&self, url: &str) -> bool {
        self.live.lock().map(|live| live.contains(url)).unwrap_or(false)
    }
}

/// A live entry in the registry. Revoked on drop.
#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
    registry: Weak<Mutex<HashSet<String>>>,
}

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Some(live) = self.registry.upgrade() {
            if let Ok(mut live) = live.lock() {
                live.remove(&self.url);
            }
        }
    }
}

impl std::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_registers() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create();
        assert_eq!(registry.live_count(), 1);
        assert!(registry.is_live(url.as_str()));
        assert!(url.as_str().starts_with("mem://"));
    }

    #[test]
    fn test_drop_releases() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create();
        let raw = url.as_str().to_string();
        drop(url);
        assert_eq!(registry.live_count(), 0);
        assert!(!registry.is_live(&raw));
    }

    #[test]
    fn test_shared_url_released_on_last_drop() {
        let registry = ObjectUrlRegistry::new();
        let url = Arc::new(registry.create());
        let clone = url.clone();
        drop(url);
        assert_eq!(registry.live_count(), 1);
        drop(clone);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_urls_unique() {
        let registry = ObjectUrlRegistry::new();
        let a = registry.create();
        let b = registry.create();
        assert_ne!(a.as_str(), b.as_str());
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn test_drop_after_registry_gone() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create();
        drop(registry);
        // Must not panic even though the registry no longer exists
        drop(url);
    }
}
