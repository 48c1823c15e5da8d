//! Integration Tests for ExpiringMap
//!
//! Exercises the public API against the real clock and real threads.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use expiring_map::{ExpiringMap, MapConfig, MapError};
use tokio::time::sleep;
use tokio_test::{assert_err, assert_ok};

// == Helper Functions ==

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

// == Lifecycle Scenario ==

#[tokio::test]
async fn test_unread_entry_is_evicted_by_sweep() {
    let map = ExpiringMap::new(ms(100), ms(50)).unwrap();
    map.insert("a", 1);

    sleep(ms(50)).await;
    assert!(map.has("a"));

    sleep(ms(110)).await;
    assert!(!map.has("a"));
    assert_eq!(assert_err!(map.lookup("a")), MapError::NotFound);
}

#[tokio::test]
async fn test_set_get_remove_clear() {
    let map = ExpiringMap::new(Duration::from_secs(2), Duration::from_secs(1)).unwrap();

    map.insert("key1".to_string(), "value1".to_string());
    map.insert("key2".to_string(), "value2".to_string());

    assert_eq!(assert_ok!(map.lookup("key1")), "value1");
    assert_eq!(map.len(), 2);

    assert_eq!(assert_ok!(map.remove("key1")), "value1");
    assert!(!map.has("key1"));
    assert_err!(map.remove("key1"));

    map.clear();
    assert_eq!(map.len(), 0);
    assert!(!map.has("key2"));
}

#[tokio::test]
async fn test_all_entries_expire() {
    let map = ExpiringMap::new(ms(100), ms(50)).unwrap();
    map.insert("key1", "value1");
    map.insert("key2", "value2");

    sleep(ms(150)).await;

    assert!(!map.has("key1") && !map.has("key2"));
    assert!(map.is_empty());
    assert_eq!(map.stats().expired, 2);
}

#[tokio::test]
async fn test_map_from_config() {
    let config = MapConfig::default()
        .with_ttl(ms(100))
        .with_sweep_interval(ms(20));
    let map = ExpiringMap::with_config(config).unwrap();
    map.insert(1u32, vec![1u8, 2, 3]);

    assert_eq!(map.lookup_with(&1u32, |v| v.len()), Ok(3));
}

#[tokio::test]
async fn test_close_then_drop() {
    let map: ExpiringMap<u8, u8> = ExpiringMap::new(ms(100), ms(10)).unwrap();
    assert!(map.is_sweeping());

    map.close();
    sleep(ms(20)).await;
    assert!(!map.is_sweeping());

    map.insert(1, 1);
    assert_eq!(map.lookup(&1u8), Ok(1));
    drop(map);
}

// == Concurrency ==

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_inserters_with_sweep() {
    const WRITERS: usize = 8;
    const KEYS_PER_WRITER: usize = 500;

    // Sweep runs far more often than it finds anything to remove
    let map = ExpiringMap::new(Duration::from_secs(60), ms(1)).unwrap();

    thread::scope(|scope| {
        for writer in 0..WRITERS {
            let map = &map;
            scope.spawn(move || {
                for i in 0..KEYS_PER_WRITER {
                    map.insert((writer, i), i);
                    assert!(map.has(&(writer, i)));
                }
            });
        }
    });

    assert_eq!(map.len(), WRITERS * KEYS_PER_WRITER);
    assert_eq!(map.lookup(&(3usize, 42usize)), Ok(42));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_mixed_operations_expire_cleanly() {
    let map = Arc::new(ExpiringMap::new(ms(50), ms(5)).unwrap());

    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..1_000u64 {
                    let key = worker * 10_000 + i;
                    map.insert(key, i);
                    if i % 3 == 0 {
                        let _ = map.remove(&key);
                    }
                    if i % 100 == 0 {
                        map.clear();
                    }
                    let _ = map.lookup(&key);
                    let _ = map.len();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    sleep(ms(120)).await;
    assert_eq!(map.len(), 0);
}
