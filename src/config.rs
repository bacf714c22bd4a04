use thiserror::Error;

/// Bounds on the memory used by a [`TokenMemoryCache`](crate::TokenMemoryCache)
///
/// The cache holds at most `max_origins * tokens_per_origin` tokens. Origins are evicted in
/// least-recently-used order once `max_origins` distinct origins are tracked, and each origin
/// keeps only its `tokens_per_origin` most recently received tokens.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TokenCacheConfig {
    pub(crate) max_origins: u32,
    pub(crate) tokens_per_origin: usize,
}

impl TokenCacheConfig {
    /// Maximum number of distinct origins to remember tokens for
    ///
    /// Must be nonzero.
    pub fn max_origins(&mut self, value: u32) -> Result<&mut Self, ConfigError> {
        if value == 0 {
            return Err(ConfigError::OutOfBounds);
        }
        self.max_origins = value;
        Ok(self)
    }

    /// Maximum number of tokens to remember for any one origin
    ///
    /// Servers usually issue a single token per connection, so small values suffice. Must be
    /// nonzero.
    pub fn tokens_per_origin(&mut self, value: usize) -> Result<&mut Self, ConfigError> {
        if value == 0 {
            return Err(ConfigError::OutOfBounds);
        }
        self.tokens_per_origin = value;
        Ok(self)
    }
}

/// Defaults to a maximum of 256 origins and 2 tokens per origin
impl Default for TokenCacheConfig {
    fn default() -> Self {
        Self {
            max_origins: 256,
            tokens_per_origin: 2,
        }
    }
}

/// Errors in the configuration of a token cache
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Value exceeds supported bounds
    #[error("value exceeds supported bounds")]
    OutOfBounds,
}
