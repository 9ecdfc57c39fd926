//! Bundle loading strategies

use crate::bundle::{build_hash_key, MessageBundle, ResourceScope};
use crate::error::{I18nError, I18nResult};
use crate::Locale;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::{fs, io};
use tracing::debug;

/// Strategy for loading the raw key → template mapping of one bundle.
///
/// A loader is asked for exactly one `(path, locale)` pair at a time and
/// must not apply any locale fallback of its own; fallback is owned
/// entirely by the candidate-locale machinery in the cache and resolver.
/// Resources are UTF-8 text. `Ok(None)` means the bundle does not exist
/// for that pair.
pub trait BundleLoader: Send + Sync {
    fn load(
        &self,
        path: &str,
        locale: &Locale,
        scope: &ResourceScope,
    ) -> I18nResult<Option<MessageBundle>>;
}

/// Loads `.properties`-style bundles from a directory tree.
///
/// A resource path such as `org.acme.messages` resolved for `fr_FR` maps
/// to `<base>/org/acme/messages_fr_FR.properties`; the root locale
/// carries no suffix (`messages.properties`). Files are UTF-8. Lines are
/// `key=value` pairs; blank lines and lines starting with `#` or `!` are
/// comments. The scope does not affect where files are found, it only
/// partitions cache entries.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    base_dir: PathBuf,
}

impl DirectoryLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resource_file(&self, path: &str, locale: &Locale) -> PathBuf {
        let stem = path.replace('.', "/");
        let file = if locale.is_root() {
            format!("{stem}.properties")
        } else {
            format!("{stem}_{locale}.properties")
        };
        self.base_dir.join(file)
    }
}

impl BundleLoader for DirectoryLoader {
    fn load(
        &self,
        path: &str,
        locale: &Locale,
        _scope: &ResourceScope,
    ) -> I18nResult<Option<MessageBundle>> {
        let file = self.resource_file(path, locale);
        match fs::read_to_string(&file) {
            Ok(content) => {
                debug!("loaded bundle {} from {}", build_hash_key(Some(locale), Some(path)), file.display());
                Ok(Some(parse_properties(&content)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(I18nError::ResourceLoad {
                path: file.display().to_string(),
                source,
            }),
        }
    }
}

/// Parse `key=value` lines into a bundle.
///
/// Keys are trimmed; values keep trailing whitespace but lose leading
/// whitespace after the separator. Lines without a separator are skipped.
fn parse_properties(content: &str) -> MessageBundle {
    let mut entries = HashMap::new();
    for line in content.lines() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => {
                entries.insert(key.trim().to_string(), value.trim_start().to_string());
            }
            None => debug!("skipping property line without separator: {line:?}"),
        }
    }
    MessageBundle::new(entries)
}

/// In-memory loader, used by tests and embedded callers that assemble
/// bundles programmatically.
///
/// Counts every `load` invocation so cache idempotence can be asserted.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    bundles: HashMap<(String, Locale), Arc<MessageBundle>>,
    loads: AtomicUsize,
    fail_always: bool,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bundle for a `(path, locale)` pair.
    pub fn insert(&mut self, path: impl Into<String>, locale: Locale, bundle: MessageBundle) {
        self.bundles.insert((path.into(), locale), Arc::new(bundle));
    }

    /// Make every subsequent load fail with an I/O error, for exercising
    /// the absent-caching of load failures.
    pub fn fail_always(&mut self) {
        self.fail_always = true;
    }

    /// Number of times `load` has been invoked, cache-visible misses
    /// included.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl BundleLoader for MemoryLoader {
    fn load(
        &self,
        path: &str,
        locale: &Locale,
        _scope: &ResourceScope,
    ) -> I18nResult<Option<MessageBundle>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_always {
            return Err(I18nError::ResourceLoad {
                path: path.to_string(),
                source: io::Error::new(ErrorKind::Other, "simulated load failure"),
            });
        }
        Ok(self
            .bundles
            .get(&(path.to_string(), locale.clone()))
            .map(|bundle| bundle.as_ref().clone()))
    }
}
