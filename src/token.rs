use std::{fmt, ops::Deref};

use bytes::Bytes;

use crate::RESET_TOKEN_SIZE;

/// Responsible for storing address validation tokens received from servers and retrieving them
/// for use in subsequent connections
///
/// Tokens are keyed by origin, a stable identity for the remote endpoint such as its server name.
/// Implementations must be shareable across every connection an endpoint makes.
pub trait TokenStore: Send + Sync {
    /// Potentially store a token for later one-time use
    ///
    /// Called when a NEW_TOKEN frame is received from `origin`. Storing is best-effort: an
    /// implementation may discard the token or evict others to make room.
    fn insert(&self, origin: &str, token: ClientToken);

    /// Try to find and take a token that was stored with the given origin
    ///
    /// Returns the most recently stored surviving token for `origin`, if any. A returned token is
    /// removed from the store, since tokens should not be reused across connection attempts.
    fn take(&self, origin: &str) -> Option<ClientToken>;
}

/// An address validation token issued to this client by a server
///
/// The payload is opaque to the client and is echoed back verbatim in the Initial packets of a
/// later connection attempt.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct ClientToken(Bytes);

impl ClientToken {
    /// Consume the token, yielding its payload
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl From<Bytes> for ClientToken {
    fn from(data: Bytes) -> Self {
        Self(data)
    }
}

impl From<Vec<u8>> for ClientToken {
    fn from(data: Vec<u8>) -> Self {
        Self(data.into())
    }
}

impl From<&'static [u8]> for ClientToken {
    fn from(data: &'static [u8]) -> Self {
        Self(Bytes::from_static(data))
    }
}

impl Deref for ClientToken {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClientToken").field(&self.0).finish()
    }
}

/// Stateless reset token
///
/// Used for an endpoint to securely communicate that it has lost state for a connection.
#[allow(clippy::derived_hash_with_manual_eq)] // Custom PartialEq impl matches derived semantics
#[derive(Copy, Clone, Hash)]
pub struct ResetToken([u8; RESET_TOKEN_SIZE]);

impl PartialEq for ResetToken {
    fn eq(&self, other: &Self) -> bool {
        crate::constant_time::eq(&self.0, &other.0)
    }
}

impl Eq for ResetToken {}

impl From<[u8; RESET_TOKEN_SIZE]> for ResetToken {
    fn from(x: [u8; RESET_TOKEN_SIZE]) -> Self {
        Self(x)
    }
}

impl Deref for ResetToken {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

// Keep secrets out of logs
impl fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResetToken(..)")
    }
}

impl fmt::Display for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
