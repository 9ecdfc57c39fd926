//! Locale identification and candidate expansion

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A language/region pair identifying a translation variant.
///
/// Locales are normalized on construction: the language tag is lower-cased
/// and the region tag upper-cased, regardless of input case. A blank
/// language yields the *root* locale, whose canonical string form is empty.
///
/// The canonical string form is `language` or `language_REGION`, e.g. `"fr"`
/// or `"fr_FR"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Create a locale from a language tag alone.
    pub fn new(language: impl AsRef<str>) -> Self {
        Self::from_parts(language.as_ref(), None)
    }

    /// Create a locale from a language and region tag.
    pub fn with_region(language: impl AsRef<str>, region: impl AsRef<str>) -> Self {
        Self::from_parts(language.as_ref(), Some(region.as_ref()))
    }

    fn from_parts(language: &str, region: Option<&str>) -> Self {
        let language = language.trim().to_lowercase();
        if language.is_empty() {
            // a region without a language is meaningless
            return Self::root();
        }
        let region = region
            .map(|r| r.trim().to_uppercase())
            .filter(|r| !r.is_empty());
        Self { language, region }
    }

    /// The root locale: no language, no region. Resource bundles for the
    /// root locale carry no locale suffix (e.g. `messages.properties`).
    pub fn root() -> Self {
        Self {
            language: String::new(),
            region: None,
        }
    }

    /// The fixed fail-over locale, used when the preferred locale has no
    /// translation available.
    pub fn failover() -> Self {
        Self::with_region("en", "US")
    }

    /// Parse a locale from a tag such as `"fr"`, `"fr_FR"` or `"fr-FR"`.
    /// A blank tag yields the root locale.
    pub fn parse(tag: &str) -> Self {
        let mut parts = tag.trim().splitn(3, ['_', '-']);
        let language = parts.next().unwrap_or("");
        let region = parts.next();
        Self::from_parts(language, region)
    }

    /// The lower-cased language tag; empty for the root locale.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The upper-cased region tag, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// True for the root locale.
    pub fn is_root(&self) -> bool {
        self.language.is_empty()
    }

    /// The ordered locales to try when loading a bundle for `self`: the
    /// locale itself, then its language-only form (when a region is
    /// present), then the root locale.
    ///
    /// When `fallback_on_root` is false the root locale is omitted unless
    /// `self` *is* the root locale, which lets callers distinguish an
    /// explicit root request from falling through to root.
    pub fn candidates(&self, fallback_on_root: bool) -> Vec<Locale> {
        let mut candidates = Vec::with_capacity(3);
        candidates.push(self.clone());
        if self.region.is_some() {
            candidates.push(Locale::new(&self.language));
        }
        if fallback_on_root && !self.is_root() {
            candidates.push(Locale::root());
        }
        candidates
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::failover()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) if !self.language.is_empty() => {
                write!(f, "{}_{}", self.language, region)
            }
            _ => f.write_str(&self.language),
        }
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

// Serialized as the canonical string form so that normalization survives a
// round trip through host configuration files.
impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LocaleVisitor;

        impl Visitor<'_> for LocaleVisitor {
            type Value = Locale;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a locale tag such as \"fr\" or \"fr_FR\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Locale, E> {
                Ok(Locale::parse(value))
            }
        }

        deserializer.deserialize_str(LocaleVisitor)
    }
}
