//! Process-wide locale settings and the per-task resolution context

use crate::Locale;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Process-wide locale settings, shared by every [`ResolutionContext`]
/// via `Arc`.
///
/// The default locale can change at runtime (e.g. on an application
/// locale switch); reads and writes are guarded by a mutex to avoid
/// torn values.
#[derive(Debug)]
pub struct LocaleSettings {
    default_locale: Mutex<Locale>,
}

impl LocaleSettings {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale: Mutex::new(default_locale),
        }
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale.lock().clone()
    }

    pub fn set_default_locale(&self, locale: Locale) {
        debug!("default locale set to {locale}");
        *self.default_locale.lock() = locale;
    }
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self::new(Locale::failover())
    }
}

/// Per-task resolution context carrying the ambient locale override.
///
/// One context belongs to one logical task; tasks share the process-wide
/// [`LocaleSettings`] through an `Arc`. The first read of the ambient
/// locale pins the current default as the task's ambient value, so a
/// later change of the default does not affect a task that has already
/// resolved something.
///
/// Known non-atomicity: reading the ambient locale and later using it are
/// two separate operations. A design that shares one context across
/// concurrent operations can observe the ambient value changing between
/// the two; callers that need a stable locale should capture the returned
/// value rather than re-reading.
#[derive(Debug)]
pub struct ResolutionContext {
    settings: Arc<LocaleSettings>,
    ambient: Mutex<Option<Locale>>,
}

impl ResolutionContext {
    pub fn new(settings: Arc<LocaleSettings>) -> Self {
        Self {
            settings,
            ambient: Mutex::new(None),
        }
    }

    /// The ambient locale for this task. When unset, falls back to the
    /// process-wide default and pins it as the ambient value.
    pub fn ambient_locale(&self) -> Locale {
        let mut ambient = self.ambient.lock();
        match &*ambient {
            Some(locale) => locale.clone(),
            None => {
                let locale = self.settings.default_locale();
                *ambient = Some(locale.clone());
                locale
            }
        }
    }

    /// Override the ambient locale for this task.
    pub fn set_ambient_locale(&self, locale: Locale) {
        *self.ambient.lock() = Some(locale);
    }

    pub fn settings(&self) -> &Arc<LocaleSettings> {
        &self.settings
    }
}
