//! Process-lifetime bundle cache

use crate::bundle::{BundleKey, MessageBundle, ResourceScope};
use crate::loader::BundleLoader;
use crate::Locale;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Memoizes loaded bundles keyed by (resource path, locale, scope).
///
/// Entries are append-only for the process lifetime: once a bundle has
/// been loaded, or has been found absent, repeated lookups for the same
/// key never touch the loader again. "Absent" covers both a missing
/// resource and a failed load; failures are logged and swallowed, not
/// retried.
///
/// Loads are idempotent, so two threads racing on the same cold key may
/// both invoke the loader; the last writer wins with no observable
/// difference. Reads take no lock beyond the map shard, and the loader is
/// never called while a shard lock is held.
#[derive(Debug, Default)]
pub struct BundleCache {
    entries: DashMap<BundleKey, Option<Arc<MessageBundle>>>,
}

impl BundleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a bundle for `locale`, trying the locale's candidate forms
    /// in order (e.g. `fr_FR`, then `fr`, then root) and returning the
    /// first one that exists. Each candidate is cached individually,
    /// absent outcomes included.
    ///
    /// With `fallback_on_root` false the root locale is only consulted
    /// when it is the locale explicitly asked for.
    pub fn get_or_load(
        &self,
        loader: &dyn BundleLoader,
        path: &str,
        locale: &Locale,
        scope: &ResourceScope,
        fallback_on_root: bool,
    ) -> Option<Arc<MessageBundle>> {
        locale
            .candidates(fallback_on_root)
            .iter()
            .find_map(|candidate| self.load_single(loader, path, candidate, scope))
    }

    /// Cache-or-load one exact (path, locale, scope) key, no fallback.
    fn load_single(
        &self,
        loader: &dyn BundleLoader,
        path: &str,
        locale: &Locale,
        scope: &ResourceScope,
    ) -> Option<Arc<MessageBundle>> {
        let key = BundleKey::new(path, locale.clone(), scope.clone());
        if let Some(entry) = self.entries.get(&key) {
            return entry.value().clone();
        }

        let loaded = match loader.load(path, locale, scope) {
            Ok(Some(bundle)) => Some(Arc::new(bundle)),
            Ok(None) => {
                debug!("no bundle for {key}");
                None
            }
            Err(e) => {
                warn!("failed to load bundle {key}: {e}");
                None
            }
        };
        self.entries.insert(key, loaded.clone());
        loaded
    }

    /// Number of cached entries, absent markers included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
