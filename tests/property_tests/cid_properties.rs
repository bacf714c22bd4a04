//! Property tests for connection ID bookkeeping

use std::collections::BTreeMap;

use super::config::*;
use super::generators::*;
use proptest::prelude::*;
use quinn_identity::{ConnectionId, ConnectionIdManager, ResetToken};

proptest! {
    #![proptest_config(default_config())]

    /// Property: entries stay sorted, unique, above the watermark, and match a simple model
    #[test]
    fn matches_model(ops in prop::collection::vec(arb_cid_op(), 0..64)) {
        let mut manager = ConnectionIdManager::new();
        let mut model = BTreeMap::<u64, (ConnectionId, ResetToken)>::new();
        let mut watermark = 0;

        for op in ops {
            match op {
                CidOp::Add(seq, id, token) => {
                    manager.add(seq, id, token);
                    if seq >= watermark {
                        model.entry(seq).or_insert((id, token));
                    }
                }
                CidOp::DeletePriorTo(seq) => {
                    manager.delete_prior_to(seq);
                    watermark = watermark.max(seq);
                    model = model.split_off(&watermark);
                }
            }

            let seqs = manager.iter().map(|e| e.sequence()).collect::<Vec<_>>();
            prop_assert!(seqs.windows(2).all(|w| w[0] < w[1]), "unsorted: {:?}", seqs);
            prop_assert!(seqs.iter().all(|&s| s >= manager.retired_prior_to()));
            prop_assert_eq!(manager.retired_prior_to(), watermark);
            prop_assert_eq!(seqs, model.keys().copied().collect::<Vec<_>>());
            for entry in manager.iter() {
                let (id, token) = model[&entry.sequence()];
                prop_assert_eq!(entry.id(), id);
                prop_assert_eq!(entry.reset_token(), token);
            }
        }
    }

    /// Property: announcing the same sequence number again changes nothing
    #[test]
    fn add_is_idempotent(
        seqs in prop::collection::vec(0u64..1000, 1..20),
        id in arb_connection_id(),
        token in arb_reset_token(),
    ) {
        let mut manager = ConnectionIdManager::new();
        for &seq in &seqs {
            manager.add(seq, id, token);
        }
        let before = manager.iter().copied().collect::<Vec<_>>();
        for &seq in &seqs {
            manager.add(seq, ConnectionId::new(&[0xEE]), token);
        }
        prop_assert_eq!(manager.iter().copied().collect::<Vec<_>>(), before);
    }

    /// Property: a lower retirement threshold after a higher one is a no-op, and nothing below
    /// the higher one can come back
    #[test]
    fn watermark_is_monotonic(
        high in 1u64..100,
        low_offset in 0u64..100,
        seqs in prop::collection::vec(0u64..200, 0..30),
        id in arb_connection_id(),
        token in arb_reset_token(),
    ) {
        let low = high.saturating_sub(low_offset);
        let mut manager = ConnectionIdManager::new();
        for &seq in &seqs {
            manager.add(seq, id, token);
        }
        manager.delete_prior_to(high);
        let after_high = manager.iter().copied().collect::<Vec<_>>();
        manager.delete_prior_to(low);
        prop_assert_eq!(manager.iter().copied().collect::<Vec<_>>(), after_high);
        prop_assert_eq!(manager.retired_prior_to(), high);

        for seq in 0..high {
            manager.add(seq, id, token);
        }
        prop_assert!(manager.iter().all(|e| e.sequence() >= high));
    }
}
