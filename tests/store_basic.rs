use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use LinearDB::hash::bucket_of_key_default;
use LinearDB::{PutOutcome, StatsReport, Store, StoreConfig, StoreError};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("ldb-{prefix}-{pid}-{t}-{id}"))
}

fn fresh_store(prefix: &str, capacity: usize) -> Result<(PathBuf, Store)> {
    let root = unique_root(prefix);
    fs::create_dir_all(&root)?;
    let cfg = StoreConfig::in_dir(&root).with_initial_capacity(capacity);
    let store = Store::open(cfg)?;
    Ok((root, store))
}

#[test]
fn put_get_delete_list() -> Result<()> {
    let (_root, mut store) = fresh_store("basic", 5)?;

    assert_eq!(store.put("alpha", "1")?, PutOutcome::Inserted);
    assert_eq!(store.put("beta", "2")?, PutOutcome::Inserted);
    assert_eq!(store.get("alpha"), Some("1"));
    assert_eq!(store.get("ALPHA"), None, "keys are case-sensitive");

    store.delete("alpha")?;
    assert_eq!(store.get("alpha"), None);

    let listing = store.list();
    assert_eq!(listing.count, 1);
    assert_eq!(listing.entries.len(), 1);
    assert_eq!(listing.entries[0].key, "beta");
    assert_eq!(listing.entries[0].value, "2");

    // put после delete снова делает ключ видимым
    store.put("alpha", "3")?;
    assert_eq!(store.get("alpha"), Some("3"));
    assert_eq!(store.len(), 2);
    Ok(())
}

#[test]
fn four_puts_into_capacity_five_resize_to_ten() -> Result<()> {
    let (_root, mut store) = fresh_store("resize", 5)?;
    for k in ["k1", "k2", "k3", "k4"] {
        store.put(k, "v")?;
    }
    assert_eq!(store.capacity(), 10);

    match store.stats() {
        StatsReport::Collected(s) => {
            assert_eq!(s.usage_percent, 40.0);
            assert_eq!(s.count, 4);
            assert_eq!(s.capacity, 10);
            assert_eq!(s.total_operations, 4);
        }
        StatsReport::NoOperationsYet => panic!("operations were issued"),
    }
    for k in ["k1", "k2", "k3", "k4"] {
        assert_eq!(store.get(k), Some("v"));
    }
    Ok(())
}

#[test]
fn stats_before_any_operation() -> Result<()> {
    let (_root, store) = fresh_store("nostats", 5)?;
    assert_eq!(store.stats(), StatsReport::NoOperationsYet);
    Ok(())
}

#[test]
fn deleted_home_slot_does_not_hide_colliding_key() -> Result<()> {
    let cap = 10;
    let (_root, mut store) = fresh_store("collide", cap)?;

    let home_a = bucket_of_key_default(b"a", cap);
    let b = (0..10_000)
        .map(|n| format!("b{n}"))
        .find(|k| bucket_of_key_default(k.as_bytes(), cap) == home_a)
        .unwrap();

    store.put("a", "1")?;
    store.delete("a")?;
    store.put(&b, "2")?;

    assert_eq!(store.get("a"), None);
    assert_eq!(store.get(&b), Some("2"));
    Ok(())
}

#[test]
fn delete_absent_key_reports_not_found() -> Result<()> {
    let (_root, mut store) = fresh_store("delmiss", 5)?;
    store.put("present", "1")?;

    let err = store.delete("absent").unwrap_err();
    assert!(matches!(err, StoreError::KeyNotFound { ref key } if key == "absent"));
    assert_eq!(store.len(), 1);

    store.delete("present")?;
    assert!(matches!(
        store.delete("present"),
        Err(StoreError::KeyNotFound { .. })
    ));
    assert_eq!(store.len(), 0);
    Ok(())
}

#[test]
fn validation_errors_do_not_mutate_or_log() -> Result<()> {
    let (root, mut store) = fresh_store("validate", 5)?;

    let long_key = "k".repeat(128);
    let long_val = "v".repeat(256);
    assert!(matches!(
        store.put(&long_key, "v"),
        Err(StoreError::KeyTooLong { .. })
    ));
    assert!(matches!(
        store.put("k", &long_val),
        Err(StoreError::ValueTooLong { .. })
    ));
    assert!(matches!(
        store.put("a:b", "v"),
        Err(StoreError::InvalidKey { .. })
    ));

    assert!(store.is_empty());
    assert!(!root.join("events.log").exists(), "rejected puts must not log");
    Ok(())
}

#[test]
fn many_inserts_keep_usage_under_threshold() -> Result<()> {
    let (_root, mut store) = fresh_store("grow", 5)?;
    for i in 0..500 {
        store.put(&format!("key-{i}"), &format!("val-{i}"))?;
        let usage = store.len() * 100 / store.capacity();
        assert!(usage <= 70, "usage {usage}% at i={i}");
    }
    assert_eq!(store.len(), 500);
    assert_eq!(store.capacity(), 5 * 256);
    for i in (0..500).step_by(37) {
        assert_eq!(store.get(&format!("key-{i}")), Some(format!("val-{i}").as_str()));
    }
    Ok(())
}
