use std::fmt::Display;
use std::str::FromStr;

use anyhow::Result;

/// Trait for building configuration structs
///
/// Implementors describe how to assemble themselves from a key/value
/// lookup. [`ConfigBuilder::build`] wires that lookup to the process
/// environment; tests can call [`ConfigBuilder::build_from`] with a map.
pub trait ConfigBuilder: Clone + Send + Sync + 'static {
    /// Build the configuration from an arbitrary variable source.
    fn build_from<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>;

    /// Build the configuration from the process environment.
    fn build() -> Result<Self> {
        Self::build_from(|key| std::env::var(key).ok())
    }
}

/// Reads `key` and parses it, falling back to `default` when the variable
/// is missing, blank or unparsable. Surrounding whitespace is ignored.
///
/// An unset variable is an ordinary default and only logged at debug; a
/// value that is set but unusable is logged as a warning.
pub fn var_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        tracing::debug!("`{key}` is not set. defaulting to `{default}`");
        return default;
    };

    let raw = raw.trim();
    if raw.is_empty() {
        tracing::warn!("`{key}` is empty. defaulting to `{default}`");
        return default;
    }

    raw.parse().unwrap_or_else(|err| {
        tracing::warn!("cannot parse `{key}`. defaulting to `{default}`: {err}");
        default
    })
}

/// Reads `key` as a non-blank string.
pub fn var_opt<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
