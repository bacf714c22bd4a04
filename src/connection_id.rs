use std::fmt;

use thiserror::Error;

use crate::MAX_CID_SIZE;

/// Protocol-level identifier for a connection.
///
/// Connection IDs are opaque byte strings of up to [`MAX_CID_SIZE`] bytes. They are stored inline,
/// so copying one never allocates.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ConnectionId {
    /// length of CID
    len: u8,
    /// CID in byte array
    bytes: [u8; MAX_CID_SIZE],
}

impl ConnectionId {
    /// Construct a connection ID from a byte slice
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is longer than [`MAX_CID_SIZE`]. Use `ConnectionId::try_from` for
    /// untrusted input.
    pub fn new(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= MAX_CID_SIZE);
        let mut res = Self {
            len: bytes.len() as u8,
            bytes: [0; MAX_CID_SIZE],
        };
        res.bytes[..bytes.len()].copy_from_slice(bytes);
        res
    }
}

impl TryFrom<&[u8]> for ConnectionId {
    type Error = InvalidConnectionId;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() > MAX_CID_SIZE {
            return Err(InvalidConnectionId(bytes.len()));
        }
        Ok(Self::new(bytes))
    }
}

impl ::std::ops::Deref for ConnectionId {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.bytes[0..self.len as usize]
    }
}

impl fmt::Debug for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.bytes[0..self.len as usize].fmt(f)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// A byte string too long to be a connection ID
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("connection ID of {0} bytes exceeds the maximum of {MAX_CID_SIZE}")]
pub struct InvalidConnectionId(pub usize);
