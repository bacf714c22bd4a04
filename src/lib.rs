//! Connection identity bookkeeping for QUIC
//!
//! quinn-identity contains two small, deterministic pieces of QUIC state that sit next to the
//! connection state machine rather than inside it. Neither performs any I/O, parses any frames or
//! touches the clock; the frame layer hands them already-decoded fields.
//!
//! - [`ConnectionIdManager`] tracks the connection IDs and stateless reset tokens a peer has issued
//!   through NEW_CONNECTION_ID frames, keeping them ordered by sequence number and honoring the
//!   peer's retirement requests. One instance is owned by each connection.
//! - [`TokenMemoryCache`] is a client-side [`TokenStore`] remembering address validation tokens
//!   received in NEW_TOKEN frames, so that a later connection attempt to the same origin can skip
//!   a round trip of address validation. One instance is typically shared by every connection an
//!   endpoint makes.

#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![warn(clippy::use_self)]

mod cid_manager;
pub use crate::cid_manager::{ConnectionIdEntry, ConnectionIdManager};

mod config;
pub use crate::config::{ConfigError, TokenCacheConfig};

mod connection_id;
pub use crate::connection_id::{ConnectionId, InvalidConnectionId};

mod constant_time;

mod frame;
pub use crate::frame::NewConnectionId;

mod mutex;

mod token;
pub use crate::token::{ClientToken, ResetToken, TokenStore};

mod token_memory_cache;
pub use crate::token_memory_cache::TokenMemoryCache;

mod token_ring;

//
// Useful internal constants
//

/// Size of a stateless reset token in bytes
pub const RESET_TOKEN_SIZE: usize = 16;
/// Maximum length of a connection ID in bytes
pub const MAX_CID_SIZE: usize = 20;
