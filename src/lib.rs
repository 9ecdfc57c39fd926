//! Locale-aware message resolution with cached resource bundles
//!
//! This crate finds the best-matching localized text for a message key
//! across a set of candidate packages, substitutes positional parameters
//! into the template, and memoizes every loaded bundle so a resource is
//! read at most once per process. It provides:
//!
//! - Locale identification with canonical normalization
//! - Ordered candidate-locale chains (preferred, fail-over, root)
//! - A process-lifetime bundle cache that also caches "not found"
//! - Pluggable bundle loading (directory-backed or in-memory)
//! - Best-match selection across packages with last-package-wins merging
//! - Missing-key sentinels (`!key!`) instead of errors
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use i18n_resolver::{
//!     Locale, LocaleSettings, MemoryLoader, MessageBundle, MessageResolver,
//!     ResolutionContext, ResourceScope, DEFAULT_BUNDLE_NAME,
//! };
//!
//! let mut loader = MemoryLoader::new();
//! loader.insert(
//!     "app.messages",
//!     Locale::with_region("en", "US"),
//!     MessageBundle::from_iter([("greeting", "Hello, {0}!")]),
//! );
//!
//! let resolver = MessageResolver::new(Arc::new(loader));
//! let settings = Arc::new(LocaleSettings::new(Locale::with_region("fr", "FR")));
//! let ctx = ResolutionContext::new(settings);
//!
//! // no French translation exists, so the fail-over locale is used
//! let text = resolver.calculate_string(
//!     &ctx,
//!     &["app"],
//!     "greeting",
//!     &["world"],
//!     &ResourceScope::default(),
//!     DEFAULT_BUNDLE_NAME,
//! );
//! assert_eq!(text, "Hello, world!");
//! ```

pub mod bundle;
pub mod cache;
pub mod chain;
pub mod context;
pub mod error;
pub mod format;
pub mod loader;
pub mod locale;
pub mod resolver;

pub use bundle::{build_hash_key, BundleKey, MessageBundle, ResourceScope};
pub use cache::BundleCache;
pub use chain::LocaleChain;
pub use context::{LocaleSettings, ResolutionContext};
pub use error::{I18nError, I18nResult};
pub use format::{decorate_missing_key, format_positional, is_missing_key};
pub use loader::{BundleLoader, DirectoryLoader, MemoryLoader};
pub use locale::Locale;
pub use resolver::{
    MessageResolver, MissingKeyLog, TracingLog, DEFAULT_BUNDLE_NAME, ERROR_FORMAT_MASK_KEY,
};
