//! Property tests for the cart store, including overlapping writes.

use std::sync::Arc;
use std::time::Duration;

use marketplace_cart::core::decode;
use marketplace_cart::store::KeyValueStore;
use marketplace_cart::{CartConfig, CartStore, DEFAULT_STORAGE_KEY};
use marketplace_cart_testkit::{cart_ops, item, replay, CartOp, RecordingStore};
use proptest::prelude::*;

async fn run(cart: &CartStore<Arc<RecordingStore>>, op: &CartOp) {
    match op {
        CartOp::Add(new_item) => {
            cart.add_to_cart(new_item.clone()).await.unwrap();
        }
        CartOp::Increment(id) => {
            cart.increment(id).await;
        }
        CartOp::Decrement(id) => {
            cart.decrement(id).await;
        }
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sequential_ops_match_pure_replay(ops in cart_ops(48)) {
        let rt = runtime();
        let storage = Arc::new(RecordingStore::new());

        let (snapshot, stored) = rt.block_on(async {
            let cart = CartStore::open(Arc::clone(&storage), CartConfig::default()).await;
            for op in &ops {
                run(&cart, op).await;
                assert!(cart.snapshot().iter().all(|line| line.quantity >= 1));
            }
            let stored = storage.get(DEFAULT_STORAGE_KEY).await.unwrap();
            (cart.snapshot(), stored)
        });

        prop_assert_eq!(&*snapshot, &replay(&ops));
        prop_assert_eq!(storage.writes().len(), ops.len());
        if let Some(stored) = stored {
            prop_assert_eq!(decode(&stored).unwrap(), (*snapshot).clone());
        }
    }

    #[test]
    fn overlapping_writes_leave_latest_cart_in_storage(
        ops in cart_ops(24),
        delays in prop::collection::vec(0u64..5, 24),
    ) {
        prop_assume!(!ops.is_empty());

        let rt = runtime();
        let storage = Arc::new(RecordingStore::with_write_delays(
            delays.iter().map(|ms| Duration::from_millis(*ms)),
        ));

        let (snapshot, stored) = rt.block_on(async {
            let cart = Arc::new(
                CartStore::open(Arc::clone(&storage), CartConfig::default()).await,
            );

            let tasks: Vec<_> = ops
                .iter()
                .cloned()
                .map(|op| {
                    let cart = Arc::clone(&cart);
                    tokio::spawn(async move { run(&cart, &op).await })
                })
                .collect();

            for task in tasks {
                task.await.unwrap();
            }

            let stored = storage.get(DEFAULT_STORAGE_KEY).await.unwrap();
            (cart.snapshot(), stored)
        });

        // Every line still has a positive quantity regardless of interleaving.
        prop_assert!(snapshot.iter().all(|line| line.quantity >= 1));

        // No lost update: the last write to land carries the final cart.
        let stored = stored.expect("at least one write");
        prop_assert_eq!(decode(&stored).unwrap(), (*snapshot).clone());
    }

    #[test]
    fn add_semantics_through_the_store(ops in cart_ops(32), id in 0u8..8) {
        let rt = runtime();
        let id = format!("p{id}");

        rt.block_on(async {
            let cart = CartStore::open(Arc::new(RecordingStore::new()), CartConfig::default()).await;
            for op in &ops {
                run(&cart, op).await;
            }

            let before = cart.snapshot();
            let after = cart.add_to_cart(item(&id)).await.unwrap().snapshot;

            match before.quantity_of(&id) {
                Some(q) => {
                    assert_eq!(after.len(), before.len());
                    assert_eq!(after.quantity_of(&id), Some(q + 1));
                }
                None => {
                    assert_eq!(after.len(), before.len() + 1);
                    assert_eq!(after.items().last().map(|line| line.id.as_str()), Some(id.as_str()));
                    assert_eq!(after.quantity_of(&id), Some(1));
                }
            }
        });
    }

    #[test]
    fn increment_then_decrement_is_identity(ops in cart_ops(32)) {
        let rt = runtime();

        rt.block_on(async {
            let cart = CartStore::open(Arc::new(RecordingStore::new()), CartConfig::default()).await;
            for op in &ops {
                run(&cart, op).await;
            }

            let before = cart.snapshot();
            for line in before.iter() {
                cart.increment(&line.id).await;
                cart.decrement(&line.id).await;
            }

            assert_eq!(*cart.snapshot(), *before);
        });
    }
}
