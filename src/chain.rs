//! Ordered locale preference for a single resolution

use crate::Locale;

/// The ordered, deduplicated sequence of locales considered for one
/// resolution: the preferred locale, the fixed fail-over locale
/// (`en_US`) and the root locale, in that order, with duplicates
/// collapsed by first occurrence.
///
/// The chain is never empty and defines preference order for best-match
/// selection: earlier entries beat later ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleChain {
    locales: Vec<Locale>,
}

impl LocaleChain {
    /// Build the active chain for the given preferred locale.
    pub fn active(preferred: &Locale) -> Self {
        let mut locales = Vec::with_capacity(3);
        for locale in [preferred.clone(), Locale::failover(), Locale::root()] {
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
        Self { locales }
    }

    /// The most preferred locale.
    pub fn preferred(&self) -> &Locale {
        &self.locales[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Locale> {
        self.locales.iter()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Always false: the chain contains at least the fail-over and root
    /// locales.
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl<'a> IntoIterator for &'a LocaleChain {
    type Item = &'a Locale;
    type IntoIter = std::slice::Iter<'a, Locale>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
