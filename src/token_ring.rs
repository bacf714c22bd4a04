use crate::ClientToken;

/// Fixed-capacity stack of tokens received from a single origin
///
/// Backed by a ring buffer: once full, pushing overwrites the oldest surviving token. Popping
/// returns the most recently pushed surviving token, since fresher tokens are less likely to have
/// expired.
#[derive(Debug)]
pub(crate) struct TokenRing {
    /// Invariant: exactly the `len` slots preceding `cursor` (circularly) are occupied
    slots: Box<[Option<ClientToken>]>,
    /// Index of the slot the next token is written to
    cursor: usize,
    len: usize,
}

impl TokenRing {
    /// Construct empty
    ///
    /// `capacity` must be nonzero.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            cursor: 0,
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, token: ClientToken) {
        self.slots[self.cursor] = Some(token);
        self.cursor = self.wrap(self.cursor + 1);
        self.len = (self.len + 1).min(self.slots.len());
    }

    pub(crate) fn pop(&mut self) -> Option<ClientToken> {
        if self.len == 0 {
            return None;
        }
        self.cursor = self.wrap(self.cursor + self.slots.len() - 1);
        self.len -= 1;
        self.slots[self.cursor].take()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn wrap(&self, index: usize) -> usize {
        index % self.slots.len()
    }
}
