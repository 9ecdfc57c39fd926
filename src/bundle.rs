//! Message bundles, resource scopes and cache-key composition

use crate::Locale;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A flat key → template mapping for one (resource path, locale) pair.
///
/// Bundles are immutable once built and shared behind `Arc` by the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBundle {
    entries: HashMap<String, String>,
}

impl MessageBundle {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Look up the raw template for a message key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Opaque identity distinguishing otherwise-identical resource paths
/// loaded on behalf of different callers.
///
/// Two callers resolving the same path under different scopes get
/// independent cache entries. The default scope is the empty identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceScope(Arc<str>);

impl ResourceScope {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ResourceScope {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceScope {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serialize for ResourceScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScopeVisitor;

        impl Visitor<'_> for ScopeVisitor {
            type Value = ResourceScope;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a resource scope identifier")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ResourceScope, E> {
                Ok(ResourceScope::new(value))
            }
        }

        deserializer.deserialize_str(ScopeVisitor)
    }
}

/// Composite cache key for one loaded bundle: resource path, locale and
/// resource scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundleKey {
    path: String,
    locale: Locale,
    scope: ResourceScope,
}

impl BundleKey {
    pub fn new(path: impl Into<String>, locale: Locale, scope: ResourceScope) -> Self {
        Self {
            path: path.into(),
            locale,
            scope,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn scope(&self) -> &ResourceScope {
        &self.scope
    }

    /// The composite path/locale string used in diagnostics, e.g.
    /// `"org.acme.messages_fr_FR"`.
    pub fn hash_key(&self) -> String {
        build_hash_key(Some(&self.locale), Some(&self.path))
    }
}

impl fmt::Display for BundleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.as_str().is_empty() {
            f.write_str(&self.hash_key())
        } else {
            write!(f, "{}@{}", self.hash_key(), self.scope)
        }
    }
}

/// Compose the path/locale diagnostic key.
///
/// A blank locale contributes nothing, a blank path contributes nothing,
/// and when both are present they are joined as `path_locale`.
pub fn build_hash_key(locale: Option<&Locale>, path: Option<&str>) -> String {
    let locale_string = locale.map(Locale::to_string).unwrap_or_default();
    let path = path.unwrap_or("");
    if locale_string.trim().is_empty() {
        path.to_string()
    } else if path.trim().is_empty() {
        locale_string
    } else {
        format!("{path}_{locale_string}")
    }
}
