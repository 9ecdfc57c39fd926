//! Positional template substitution and missing-key decoration

use crate::error::{I18nError, I18nResult};

/// Substitute positional parameters into a template in a single pass.
///
/// Placeholders are written `{0}`, `{1}`, ... and replaced by the
/// parameter at that index. A `{` that does not open a well-formed
/// numeric placeholder is a [`I18nError::MalformedTemplate`]; a
/// placeholder index with no supplied parameter is a
/// [`I18nError::MissingParameter`]. A lone `}` is literal text. No
/// locale-sensitive number or date formatting is performed.
pub fn format_positional(template: &str, params: &[&str]) -> I18nResult<String> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            out.push(ch);
            continue;
        }

        let mut index = String::new();
        let closed = loop {
            match chars.next() {
                Some('}') => break true,
                Some(digit @ '0'..='9') => index.push(digit),
                _ => break false,
            }
        };
        if !closed || index.is_empty() {
            return Err(I18nError::MalformedTemplate {
                template: template.to_string(),
            });
        }

        // a placeholder wider than a few digits is a typo, not an index
        let index: usize = index.parse().map_err(|_| I18nError::MalformedTemplate {
            template: template.to_string(),
        })?;
        let param = params.get(index).ok_or(I18nError::MissingParameter {
            index,
            supplied: params.len(),
        })?;
        out.push_str(param);
    }

    Ok(out)
}

/// Wrap a key in the missing-key sentinel form: `!key!`.
pub fn decorate_missing_key(key: &str) -> String {
    format!("!{key}!")
}

/// True if `s` is blank or is a decorated missing-key sentinel.
///
/// The check is trim-insensitive, and the single character `!` is not
/// itself a sentinel.
pub fn is_missing_key(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty()
        || (trimmed.starts_with('!') && trimmed.ends_with('!') && trimmed != "!")
}
