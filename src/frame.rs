use crate::{ConnectionId, ResetToken};

/// Fields of a decoded NEW_CONNECTION_ID frame
///
/// Produced by the frame layer and consumed by
/// [`ConnectionIdManager::on_new_connection_id`](crate::ConnectionIdManager::on_new_connection_id).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewConnectionId {
    /// Sequence number the peer assigned to `id`
    pub sequence: u64,
    /// Every connection ID with a lower sequence number must be retired
    pub retire_prior_to: u64,
    /// The connection ID being issued
    pub id: ConnectionId,
    /// Stateless reset token associated with `id`
    pub reset_token: ResetToken,
}
