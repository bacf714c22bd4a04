//! Property test generators for quinn-identity types

use proptest::prelude::*;
use quinn_identity::{ConnectionId, MAX_CID_SIZE, RESET_TOKEN_SIZE, ResetToken};

/// Operations the frame layer may apply to a `ConnectionIdManager`
#[derive(Debug, Clone)]
pub enum CidOp {
    Add(u64, ConnectionId, ResetToken),
    DeletePriorTo(u64),
}

/// Operations a session layer may apply to a `TokenStore`
#[derive(Debug, Clone)]
pub enum TokenOp {
    Insert(u8, u8),
    Take(u8),
}

/// Generate arbitrary connection IDs of any valid length
pub fn arb_connection_id() -> impl Strategy<Value = ConnectionId> {
    prop::collection::vec(any::<u8>(), 0..=MAX_CID_SIZE).prop_map(|bytes| ConnectionId::new(&bytes))
}

/// Generate arbitrary stateless reset tokens
pub fn arb_reset_token() -> impl Strategy<Value = ResetToken> {
    any::<[u8; RESET_TOKEN_SIZE]>().prop_map(ResetToken::from)
}

/// Generate connection ID operations over a small sequence number space, so that duplicates and
/// retirements actually collide with announcements
pub fn arb_cid_op() -> impl Strategy<Value = CidOp> {
    prop_oneof![
        3 => (0u64..32, arb_connection_id(), arb_reset_token())
            .prop_map(|(seq, id, token)| CidOp::Add(seq, id, token)),
        1 => (0u64..32).prop_map(CidOp::DeletePriorTo),
    ]
}

/// Generate token store operations over a handful of origins
pub fn arb_token_op(origins: u8) -> impl Strategy<Value = TokenOp> {
    prop_oneof![
        2 => (0..origins, any::<u8>()).prop_map(|(origin, token)| TokenOp::Insert(origin, token)),
        1 => (0..origins).prop_map(TokenOp::Take),
    ]
}
