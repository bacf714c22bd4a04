//! Bookkeeping for connection IDs issued to us by the peer

use tracing::trace;

use crate::{ConnectionId, NewConnectionId, ResetToken};

/// A connection ID issued by the peer, with the sequence number and reset token it came with
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ConnectionIdEntry {
    sequence: u64,
    id: ConnectionId,
    reset_token: ResetToken,
}

impl ConnectionIdEntry {
    /// Sequence number the peer assigned to this connection ID
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The connection ID itself
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Stateless reset token the peer associated with this connection ID
    pub fn reset_token(&self) -> ResetToken {
        self.reset_token
    }
}

/// Remote connection IDs that are available for use, ordered by sequence number
///
/// NEW_CONNECTION_ID frames may be lost, reordered or retransmitted, and retirement requests may
/// overtake the IDs they retire. Rather than remembering every sequence number ever seen, the
/// manager keeps only the live entries and a watermark below which everything counts as retired,
/// which makes both operations idempotent and insensitive to arrival order.
///
/// Owned by a single connection; callers must serialize access.
///
/// ```
/// # use quinn_identity::{ConnectionId, ConnectionIdManager, ResetToken};
/// let mut cids = ConnectionIdManager::new();
/// let token = ResetToken::from([0; 16]);
/// cids.add(2, ConnectionId::new(&[2; 8]), token);
/// cids.add(1, ConnectionId::new(&[1; 8]), token);
/// cids.add(1, ConnectionId::new(&[9; 8]), token); // retransmission, ignored
/// assert_eq!(cids.first().unwrap().sequence(), 1);
///
/// cids.delete_prior_to(2);
/// cids.add(1, ConnectionId::new(&[1; 8]), token); // already retired, ignored
/// assert_eq!(cids.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ConnectionIdManager {
    /// Live entries, strictly ascending by sequence number
    entries: Vec<ConnectionIdEntry>,
    /// Every sequence number below this has been retired
    ///
    /// Invariant: no entry in `entries` has a lower sequence number.
    retired_prior_to: u64,
}

impl ConnectionIdManager {
    /// Construct an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a connection ID announced by the peer
    ///
    /// Sequence numbers that were already retired and duplicates of live entries are ignored, so
    /// retransmitted frames are harmless.
    pub fn add(&mut self, sequence: u64, id: ConnectionId, reset_token: ResetToken) {
        if sequence < self.retired_prior_to {
            trace!(sequence, "ignoring retired connection ID");
            return;
        }
        match self
            .entries
            .binary_search_by_key(&sequence, |entry| entry.sequence)
        {
            Ok(_) => trace!(sequence, "ignoring duplicate connection ID"),
            // Also covers appending past the current highest sequence number
            Err(index) => {
                trace!(sequence, %id, "adding connection ID");
                self.entries.insert(
                    index,
                    ConnectionIdEntry {
                        sequence,
                        id,
                        reset_token,
                    },
                );
            }
        }
    }

    /// Retire every connection ID with a sequence number below `sequence`
    ///
    /// The retirement watermark never moves backwards; a threshold at or below the current one is
    /// ignored.
    pub fn delete_prior_to(&mut self, sequence: u64) {
        if sequence <= self.retired_prior_to {
            return;
        }
        self.retired_prior_to = sequence;
        let retired = self.entries.partition_point(|entry| entry.sequence < sequence);
        self.entries.drain(..retired);
        trace!(prior_to = sequence, retired, "retired connection IDs");
    }

    /// Handle a NEW_CONNECTION_ID frame
    ///
    /// Applies the frame's retirement request before recording its connection ID, so a frame that
    /// retires everything before itself is still accepted.
    pub fn on_new_connection_id(&mut self, frame: NewConnectionId) {
        self.delete_prior_to(frame.retire_prior_to);
        self.add(frame.sequence, frame.id, frame.reset_token);
    }

    /// The live entry with the lowest sequence number
    pub fn first(&self) -> Option<&ConnectionIdEntry> {
        self.entries.first()
    }

    /// Look up the live entry with the given sequence number
    pub fn get(&self, sequence: u64) -> Option<&ConnectionIdEntry> {
        let index = self
            .entries
            .binary_search_by_key(&sequence, |entry| entry.sequence)
            .ok()?;
        Some(&self.entries[index])
    }

    /// Iterate over live entries in ascending sequence number order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ConnectionIdEntry> + '_ {
        self.entries.iter()
    }

    /// Whether `token` belongs to any live connection ID
    ///
    /// Used to recognize a stateless reset from the peer.
    pub fn contains_reset_token(&self, token: &ResetToken) -> bool {
        self.entries.iter().any(|entry| entry.reset_token == *token)
    }

    /// Number of live connection IDs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no connection IDs are live
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current retirement watermark
    pub fn retired_prior_to(&self) -> u64 {
        self.retired_prior_to
    }
}
