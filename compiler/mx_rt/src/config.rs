//! Process-wide runtime configuration.
//!
//! Generated programs never configure the runtime; a Rust host embedding it
//! may call [`configure`] once before the first read from standard input.

use std::sync::OnceLock;

use crate::RtError;

/// Historical size of the token staging buffer (1 MiB).
pub const DEFAULT_MAX_TOKEN_LEN: usize = 1024 * 1024;

/// Tunable bounds of the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Longest token `__getString` accepts, in bytes.
    pub max_token_len: usize,
}

impl RuntimeConfig {
    #[must_use]
    pub const fn new() -> Self {
        RuntimeConfig {
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
        }
    }

    #[must_use]
    pub const fn with_max_token_len(mut self, max_token_len: usize) -> Self {
        self.max_token_len = max_token_len;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT: RuntimeConfig = RuntimeConfig::new();
static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// Fix the configuration for the rest of the process.
///
/// Fails with [`RtError::AlreadyConfigured`] if a configuration was already
/// installed.
pub fn configure(config: RuntimeConfig) -> Result<(), RtError> {
    CONFIG
        .set(config)
        .map_err(|_| RtError::AlreadyConfigured)?;
    tracing::debug!(max_token_len = config.max_token_len, "runtime configured");
    Ok(())
}

/// The active configuration, or the default if none was installed.
pub fn get() -> &'static RuntimeConfig {
    CONFIG.get().unwrap_or(&DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_is_one_mebibyte() {
        assert_eq!(RuntimeConfig::default().max_token_len, 1_048_576);
    }

    #[test]
    fn builder_overrides_limit() {
        let config = RuntimeConfig::new().with_max_token_len(16);
        assert_eq!(config.max_token_len, 16);
    }
}
