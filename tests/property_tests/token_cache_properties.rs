//! Property tests for the in-memory token cache

use super::config::*;
use super::generators::*;
use proptest::prelude::*;
use quinn_identity::{ClientToken, TokenMemoryCache, TokenStore};

fn token(n: u8) -> ClientToken {
    ClientToken::from(vec![n])
}

fn drain(cache: &TokenMemoryCache, origin: &str) -> Vec<u8> {
    std::iter::from_fn(|| cache.take(origin))
        .map(|t| t[0])
        .collect()
}

proptest! {
    #![proptest_config(default_config())]

    /// Property: tokens for one origin come back newest first, and only the newest
    /// `tokens_per_origin` of them survive
    #[test]
    fn single_origin_is_bounded_lifo(
        capacity in 1usize..8,
        tokens in prop::collection::vec(any::<u8>(), 0..20),
    ) {
        let cache = TokenMemoryCache::new(4, capacity);
        for &t in &tokens {
            cache.insert("origin", token(t));
        }
        let expected = tokens.iter().rev().take(capacity).copied().collect::<Vec<_>>();
        prop_assert_eq!(drain(&cache, "origin"), expected);
        prop_assert!(cache.is_empty());
    }

    /// Property: with M origins allowed, inserting M + 1 distinct origins loses only the first
    #[test]
    fn evicts_least_recently_used(max_origins in 1u32..16) {
        let cache = TokenMemoryCache::new(max_origins, 2);
        for i in 0..=max_origins {
            cache.insert(&i.to_string(), token(i as u8));
        }
        prop_assert_eq!(cache.len(), max_origins as usize);
        prop_assert!(cache.take("0").is_none());
        for i in 1..=max_origins {
            prop_assert_eq!(cache.take(&i.to_string()), Some(token(i as u8)));
        }
    }

    /// Property: the number of tracked origins never exceeds the bound, and an origin is tracked
    /// exactly while it still holds tokens
    #[test]
    fn origin_count_is_bounded(
        max_origins in 1u32..6,
        capacity in 1usize..4,
        ops in prop::collection::vec(arb_token_op(8), 0..100),
    ) {
        let cache = TokenMemoryCache::new(max_origins, capacity);
        for op in ops {
            match op {
                TokenOp::Insert(origin, t) => cache.insert(&origin.to_string(), token(t)),
                TokenOp::Take(origin) => {
                    cache.take(&origin.to_string());
                }
            }
            prop_assert!(cache.len() <= max_origins as usize);
        }
        let mut remaining = 0;
        for origin in 0..8u8 {
            if !drain(&cache, &origin.to_string()).is_empty() {
                remaining += 1;
            }
        }
        prop_assert!(remaining <= max_origins as usize);
        prop_assert!(cache.is_empty());
    }
}
