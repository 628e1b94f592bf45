//! Cache configuration with environment overrides.

use maze_rank_core::MAX_SPAN;

/// Environment variable overriding [`CacheConfig::max_entries`].
pub const ENV_CACHE_ENTRIES: &str = "MAZE_RANK_CACHE_ENTRIES";
/// Environment variable overriding [`CacheConfig::max_span`].
pub const ENV_MAX_SPAN: &str = "MAZE_RANK_MAX_SPAN";

/// Limits for the shared count table cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Tables kept alive at once; the oldest is evicted beyond this.
    /// Zero disables caching.
    pub max_entries: usize,

    /// Widest grid side the transfer table is built for. The environment
    /// can only lower it below [`MAX_SPAN`].
    pub max_span: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 16,
            max_span: MAX_SPAN,
        }
    }
}

impl CacheConfig {
    /// Defaults, overridden by `MAZE_RANK_CACHE_ENTRIES` and
    /// `MAZE_RANK_MAX_SPAN` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`CacheConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_entries: parse_var(&lookup, ENV_CACHE_ENTRIES).unwrap_or(defaults.max_entries),
            max_span: parse_var(&lookup, ENV_MAX_SPAN)
                .map(clamp_span)
                .unwrap_or(defaults.max_span),
        }
    }
}

fn clamp_span(span: usize) -> usize {
    if span > MAX_SPAN {
        tracing::warn!(
            "Clamping {}={} to the supported maximum of {}",
            ENV_MAX_SPAN,
            span,
            MAX_SPAN
        );
    }
    span.min(MAX_SPAN)
}

fn parse_var<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
