//! The cache has no internal locking; callers share it behind a mutex.

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use recency::{Error, RecencyCache};

#[test]
fn test_shared_cache_across_threads() {
    let cache = Arc::new(Mutex::new(RecencyCache::new(64).unwrap()));

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..1_000u64 {
                    let key = t * 10_000 + i;
                    let mut guard = cache.lock();
                    guard.put(key, i);
                    assert_eq!(guard.get(&key), Some(&i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let cache = cache.lock();
    assert_eq!(cache.len(), 64);
    assert_eq!(cache.stats().inserts(), 4_000);
    assert_eq!(cache.stats().hits(), 4_000);
    assert_eq!(cache.stats().evictions(), 4_000 - 64);
}

#[test]
fn test_public_api_roundtrip() {
    let mut cache = RecencyCache::new(3).unwrap();

    for (k, v) in [(1, 10), (2, 20), (3, 30)] {
        cache.put(k, v);
    }
    assert_eq!(cache.get(&1), Some(&10));

    cache.put(4, 40);
    assert_eq!(cache.get(&2), None);
    let order: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
    assert_eq!(order, vec![4, 1, 3]);
}

#[test]
fn test_invalid_capacity_is_an_error() {
    let err = RecencyCache::<String, String>::new(0).unwrap_err();

    assert_eq!(err, Error::InvalidCapacity(0));
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.to_string().contains("capacity"));
}
