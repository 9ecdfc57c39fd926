//! Message resolution across packages and locales

use crate::bundle::{MessageBundle, ResourceScope};
use crate::cache::BundleCache;
use crate::chain::LocaleChain;
use crate::context::ResolutionContext;
use crate::format::{decorate_missing_key, format_positional, is_missing_key};
use crate::loader::BundleLoader;
use crate::Locale;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Default bundle file stem within a package.
pub const DEFAULT_BUNDLE_NAME: &str = "messages";

/// Key of the template used to decorate error messages, expected in the
/// resolver's system package.
pub const ERROR_FORMAT_MASK_KEY: &str = "MESSUTIL.ERROR_FORMAT_MASK";

/// Width of the fixed error-code segment in error message keys, e.g. the
/// `ERROR_0001` in `StepName.ERROR_0001.Description`.
const ERROR_CODE_WIDTH: usize = "ERROR_0000".len();

/// Sink receiving the single diagnostic line emitted when a key resolves
/// nowhere. Invoked at most once per [`MessageResolver::calculate_string`]
/// call.
pub trait MissingKeyLog: Send + Sync {
    fn error(&self, message: &str);
}

/// Default [`MissingKeyLog`] that forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl MissingKeyLog for TracingLog {
    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Resolves localized message text across candidate packages and locales.
///
/// The resolver owns no locale state of its own: the preferred locale
/// comes from the [`ResolutionContext`] passed into each call, the bundle
/// store is the injected [`BundleLoader`], and loaded bundles are
/// memoized in a shared [`BundleCache`].
///
/// No operation here returns an error. Every failure mode degrades to a
/// well-formed string, at worst the decorated missing-key sentinel
/// `!key!`, so UI callers never need a failure branch.
pub struct MessageResolver {
    loader: Arc<dyn BundleLoader>,
    cache: Arc<BundleCache>,
    missing_log: Arc<dyn MissingKeyLog>,
    system_package: String,
    bundle_name: String,
}

impl MessageResolver {
    pub fn new(loader: Arc<dyn BundleLoader>) -> Self {
        Self {
            loader,
            cache: Arc::new(BundleCache::new()),
            missing_log: Arc::new(TracingLog),
            system_package: "i18n".to_string(),
            bundle_name: DEFAULT_BUNDLE_NAME.to_string(),
        }
    }

    /// Share an existing cache instead of the resolver's own.
    pub fn with_cache(mut self, cache: Arc<BundleCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the total-miss diagnostic sink.
    pub fn with_missing_log(mut self, log: Arc<dyn MissingKeyLog>) -> Self {
        self.missing_log = log;
        self
    }

    /// Package holding system messages such as the error format mask.
    pub fn with_system_package(mut self, package: impl Into<String>) -> Self {
        self.system_package = package.into();
        self
    }

    /// Bundle file stem used by the convenience operations.
    pub fn with_bundle_name(mut self, bundle_name: impl Into<String>) -> Self {
        self.bundle_name = bundle_name.into();
        self
    }

    pub fn cache(&self) -> &Arc<BundleCache> {
        &self.cache
    }

    /// Resolve a key against an already-bound bundle, substituting up to
    /// six positional parameters. Any failure, a missing key, a malformed
    /// template or a parameter-count mismatch alike, yields the decorated
    /// sentinel `!key!`.
    pub fn get_string(bundle: &MessageBundle, key: &str, params: &[&str]) -> String {
        match bundle.get(key) {
            Some(template) => {
                format_positional(template, params).unwrap_or_else(|_| decorate_missing_key(key))
            }
            None => decorate_missing_key(key),
        }
    }

    /// [`Self::get_string`] wrapped in the error format mask; see
    /// [`Self::format_error_message`].
    pub fn get_error_string(
        &self,
        ctx: &ResolutionContext,
        bundle: &MessageBundle,
        key: &str,
        params: &[&str],
    ) -> String {
        let message = Self::get_string(bundle, key, params);
        self.format_error_message(ctx, key, &message)
    }

    /// Decorate an error message with its error-code prefix.
    ///
    /// The prefix is the key up to and including the fixed-width error
    /// code that follows the first `.` (so `Step.ERROR_0001.Description`
    /// yields `Step.ERROR_0001`). The locale-resolved
    /// [`ERROR_FORMAT_MASK_KEY`] template from the system package is then
    /// applied to (prefix, message).
    pub fn format_error_message(
        &self,
        ctx: &ResolutionContext,
        key: &str,
        message: &str,
    ) -> String {
        let prefix = error_code_prefix(key);
        self.calculate_string(
            ctx,
            &[self.system_package.as_str()],
            ERROR_FORMAT_MASK_KEY,
            &[prefix, message],
            &ResourceScope::default(),
            &self.bundle_name,
        )
    }

    /// [`Self::calculate_string_with_logging`] with the total-miss
    /// diagnostic enabled.
    pub fn calculate_string(
        &self,
        ctx: &ResolutionContext,
        packages: &[&str],
        key: &str,
        params: &[&str],
        scope: &ResourceScope,
        bundle_name: &str,
    ) -> String {
        self.calculate_string_with_logging(ctx, packages, key, params, scope, bundle_name, true)
    }

    /// Resolve `key` across every `(package, locale)` combination and
    /// return the best match.
    ///
    /// The candidate locale chain is computed once from the context's
    /// ambient locale. Packages are scanned in caller order and, for a
    /// given locale slot, a later package's hit overwrites an earlier
    /// one's. The final output is the accumulated value of the first
    /// chain locale that got any hit.
    ///
    /// Individual misses are silently skipped; only total absence across
    /// every combination is reported, as a single diagnostic line when
    /// `log_on_total_miss` is set, and the result is then the decorated
    /// sentinel `!key!` regardless of the flag.
    #[allow(clippy::too_many_arguments)]
    pub fn calculate_string_with_logging(
        &self,
        ctx: &ResolutionContext,
        packages: &[&str],
        key: &str,
        params: &[&str],
        scope: &ResourceScope,
        bundle_name: &str,
        log_on_total_miss: bool,
    ) -> String {
        let chain = LocaleChain::active(&ctx.ambient_locale());

        let mut matches: HashMap<Locale, String> = HashMap::new();
        for package in packages {
            for locale in &chain {
                let text = self.calculate_single(package, locale, key, params, scope, bundle_name);
                if !is_missing_key(&text) {
                    // last package wins for a shared locale slot
                    matches.insert(locale.clone(), text);
                }
            }
        }

        if matches.is_empty() && log_on_total_miss {
            self.missing_log.error(&format!(
                "message not found in the preferred and failover locales: key=[{key}], packages={packages:?}"
            ));
        }

        for locale in &chain {
            if let Some(text) = matches.get(locale) {
                return text.clone();
            }
        }
        decorate_missing_key(key)
    }

    /// One `(package, locale)` attempt. Returns the formatted text, or an
    /// empty string whenever the bundle, the key or the substitution
    /// fails; the empty string is what the aggregation loop discards.
    fn calculate_single(
        &self,
        package: &str,
        locale: &Locale,
        key: &str,
        params: &[&str],
        scope: &ResourceScope,
        bundle_name: &str,
    ) -> String {
        let path = format!("{package}.{bundle_name}");
        let Some(bundle) = self
            .cache
            .get_or_load(self.loader.as_ref(), &path, locale, scope, true)
        else {
            return String::new();
        };
        let Some(template) = bundle.get(key) else {
            return String::new();
        };
        format_positional(template, params).unwrap_or_else(|e| {
            debug!("failed to format key [{key}] from {path} for locale [{locale}]: {e}");
            String::new()
        })
    }

    /// Resolve a bundle for the active chain, excluding the root locale
    /// except as an explicit last-resort chain member. The first locale
    /// that yields a bundle wins.
    pub fn get_bundle(
        &self,
        ctx: &ResolutionContext,
        path: &str,
        scope: &ResourceScope,
    ) -> Option<Arc<MessageBundle>> {
        let chain = LocaleChain::active(&ctx.ambient_locale());
        chain.iter().find_map(|locale| {
            self.cache
                .get_or_load(self.loader.as_ref(), path, locale, scope, false)
        })
    }
}

/// The key prefix covering the fixed-width error code after the first
/// `.`, clamped to the key itself when the key is shorter or has no dot.
fn error_code_prefix(key: &str) -> &str {
    let Some(dot) = key.find('.') else {
        return key;
    };
    let mut end = (dot + 1 + ERROR_CODE_WIDTH).min(key.len());
    while !key.is_char_boundary(end) {
        end -= 1;
    }
    &key[..end]
}
