//! Storing tokens sent from servers in NEW_TOKEN frames and using them in subsequent connections

use std::sync::Arc;

use lru_slab::LruSlab;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{mutex::Mutex, token_ring::TokenRing, ClientToken, TokenCacheConfig, TokenStore};

/// `TokenStore` implementation that stores up to `N` tokens per origin for up to a limited number
/// of origins, in-memory
///
/// Origins are evicted in least-recently-used order; both storing and taking a token count as a
/// use. Within an origin, the most recently stored token is handed out first. An origin whose
/// tokens have all been taken stops occupying space immediately.
#[derive(Debug)]
pub struct TokenMemoryCache(Mutex<State>);

impl TokenMemoryCache {
    /// Construct empty
    ///
    /// A cache constructed with a zero bound never stores anything.
    pub fn new(max_origins: u32, tokens_per_origin: usize) -> Self {
        Self(Mutex::new(State::new(max_origins, tokens_per_origin)))
    }

    /// Construct empty, with bounds taken from `config`
    pub fn with_config(config: &TokenCacheConfig) -> Self {
        Self::new(config.max_origins, config.tokens_per_origin)
    }

    /// Number of origins tokens are currently held for
    pub fn len(&self) -> usize {
        self.0.lock("len").lru.len() as usize
    }

    /// Whether no tokens are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStore for TokenMemoryCache {
    fn insert(&self, origin: &str, token: ClientToken) {
        trace!(%origin, "storing token");
        self.0.lock("insert").store(origin, token)
    }

    fn take(&self, origin: &str) -> Option<ClientToken> {
        let token = self.0.lock("take").take(origin);
        trace!(%origin, found = %token.is_some(), "taking token");
        token
    }
}

/// Defaults to a maximum of 256 origins and 2 tokens per origin
impl Default for TokenMemoryCache {
    fn default() -> Self {
        Self::with_config(&TokenCacheConfig::default())
    }
}

/// Lockable inner state of `TokenMemoryCache`
///
/// `lookup` and `lru` always hold the same set of origins.
#[derive(Debug)]
struct State {
    max_origins: u32,
    tokens_per_origin: usize,
    // map from origin to index in lru
    lookup: FxHashMap<Arc<str>, u32>,
    lru: LruSlab<CacheEntry>,
}

impl State {
    fn new(max_origins: u32, tokens_per_origin: usize) -> Self {
        Self {
            max_origins,
            tokens_per_origin,
            lookup: FxHashMap::default(),
            lru: LruSlab::default(),
        }
    }

    fn store(&mut self, origin: &str, token: ClientToken) {
        if self.max_origins == 0 || self.tokens_per_origin == 0 {
            // nowhere to put it
            return;
        }

        if let Some(&slot) = self.lookup.get(origin) {
            // get_mut also marks the entry as most recently used
            self.lru.get_mut(slot).tokens.push(token);
            return;
        }

        if self.lru.len() >= self.max_origins {
            if let Some(slot) = self.lru.lru() {
                let evicted = self.lru.remove(slot);
                debug!(origin = %evicted.origin, tokens = evicted.tokens.len(), "evicting origin");
                let removed = self.lookup.remove(&evicted.origin);
                debug_assert!(removed.is_some());
            }
        }

        let origin = Arc::<str>::from(origin);
        let mut tokens = TokenRing::new(self.tokens_per_origin);
        tokens.push(token);
        let slot = self.lru.insert(CacheEntry {
            origin: origin.clone(),
            tokens,
        });
        self.lookup.insert(origin, slot);
    }

    fn take(&mut self, origin: &str) -> Option<ClientToken> {
        let slot = *self.lookup.get(origin)?;

        let entry = self.lru.get_mut(slot);
        let token = entry.tokens.pop();
        debug_assert!(token.is_some(), "empty entries are removed eagerly");

        if entry.tokens.is_empty() {
            // token stack emptied, remove entry
            self.lru.remove(slot);
            self.lookup.remove(origin);
        }

        token
    }
}

/// Cache entry within `TokenMemoryCache`'s LRU slab
#[derive(Debug)]
struct CacheEntry {
    origin: Arc<str>,
    // invariant: tokens is never empty
    tokens: TokenRing,
}
