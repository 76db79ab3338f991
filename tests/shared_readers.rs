//! One producer, many readers.
//!
//! A buffer is built once, published behind an `Arc`, and read from several
//! threads at the same time. Updating means building a new buffer and
//! swapping the published one.
//!
//! Run with: cargo test --test shared_readers -- --nocapture

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;

use spark_nodebuf::{NodeBuffer, NodeBufferBuilder, NodeSpec};

const READERS: usize = 8;
const NODES: u32 = 1_000;

// =============================================================================
// PRODUCER
// =============================================================================

/// A root with `NODES` leaves, every leaf labelled with `generation`.
fn produce(generation: u32) -> NodeBuffer {
    let mut builder = NodeBufferBuilder::new();
    builder.push(&NodeSpec::new(0).element(generation).children(1..=NODES)).unwrap();
    for id in 1..=NODES {
        builder.push(&NodeSpec::new(id).element(generation)).unwrap();
    }
    builder.finish().unwrap()
}

/// Everything a reader derives from one buffer, which must be consistent.
fn read_all(buffer: &NodeBuffer) -> (u32, u64) {
    let view = buffer.view();
    let index = view.build_id_to_handle();
    assert_eq!(index.len(), NODES as usize + 1);

    let root = index[&0];
    let generation = root.element_id();
    let mut sum = 0u64;
    for child in root.children_ids() {
        let node = index[&child];
        assert_eq!(node.element_id(), generation, "mixed generations in one buffer");
        sum += u64::from(node.node_id());
    }
    (generation, sum)
}

// =============================================================================
// TESTS
// =============================================================================

#[test]
fn test_concurrent_readers() {
    let buffer = Arc::new(produce(1));
    let expected = u64::from(NODES) * u64::from(NODES + 1) / 2;

    let handles: Vec<_> = (0..READERS)
        .map(|i| {
            let buffer = Arc::clone(&buffer);
            thread::Builder::new()
                .name(format!("reader-{i}"))
                .spawn(move || {
                    for _ in 0..50 {
                        assert_eq!(read_all(&buffer), (1, expected));
                    }
                })
                .expect("spawn reader")
        })
        .collect();

    for handle in handles {
        handle.join().expect("reader panicked");
    }
}

#[test]
fn test_swap_published_buffer() {
    let published = Arc::new(RwLock::new(Arc::new(produce(0))));
    let reads = Arc::new(AtomicU64::new(0));

    let readers: Vec<_> = (0..READERS)
        .map(|i| {
            let published = Arc::clone(&published);
            let reads = Arc::clone(&reads);
            thread::Builder::new()
                .name(format!("reader-{i}"))
                .spawn(move || {
                    let mut last = 0;
                    for _ in 0..100 {
                        // hold the snapshot, not the lock
                        let snapshot = Arc::clone(&published.read().expect("lock poisoned"));
                        let (generation, _) = read_all(&snapshot);
                        assert!(generation >= last, "generations went backwards");
                        last = generation;
                        reads.fetch_add(1, Ordering::Relaxed);
                    }
                })
                .expect("spawn reader")
        })
        .collect();

    for generation in 1..=20 {
        let next = Arc::new(produce(generation));
        *published.write().expect("lock poisoned") = next;
    }

    for handle in readers {
        handle.join().expect("reader panicked");
    }
    assert_eq!(reads.load(Ordering::Relaxed), READERS as u64 * 100);
    assert_eq!(read_all(&published.read().expect("lock poisoned")).0, 20);
}
