//! Integration tests for the SQLite snapshot store.
//!
//! Exercises the append-only contract end to end: duplicate-key rejection in
//! both orders and under concurrency, closed-interval range queries, company
//! lookups, and the capture-batch transaction.

mod support;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;

use bvlstore::adapter::outbound::sqlite::store::SqliteSnapshotStore;
use bvlstore::domain::{CompanyCode, NewSnapshot};
use bvlstore::port::outbound::store::SnapshotStore;
use support::temp_db::TempDb;

fn ts(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 20, hour, min, 0).unwrap()
}

fn snapshot(name: &str, code: i32, at: DateTime<Utc>) -> NewSnapshot {
    NewSnapshot::new(CompanyCode::new(code), name, at)
}

#[tokio::test]
async fn duplicate_key_fails_exactly_once_regardless_of_order() {
    for flipped in [false, true] {
        let db = TempDb::create("dup-order");
        let store = SqliteSnapshotStore::new(db.pool().clone());

        let mut first = snapshot("BVL Corp", 10, ts(9, 0));
        first.last_price = Some(dec!(12.3400));
        let mut second = snapshot("BVL Corp", 10, ts(9, 0));
        second.last_price = Some(dec!(99.0000));

        let (a, b) = if flipped {
            (&second, &first)
        } else {
            (&first, &second)
        };

        let results = [store.insert(a).await, store.insert(b).await];
        let ok = results.iter().filter(|r| r.is_ok()).count();
        let dup = results
            .iter()
            .filter(|r| matches!(r, Err(e) if e.is_duplicate()))
            .count();

        assert_eq!(ok, 1, "exactly one insert succeeds (flipped={flipped})");
        assert_eq!(dup, 1, "exactly one duplicate error (flipped={flipped})");
        assert_eq!(store.count().await.unwrap(), 1);
    }
}

#[tokio::test]
async fn resubmitting_identical_payload_is_rejected() {
    let db = TempDb::create("idempotence");
    let store = SqliteSnapshotStore::new(db.pool().clone());

    let payload = snapshot("BVL Corp", 10, ts(9, 0));
    store.insert(&payload).await.unwrap();

    let err = store.insert(&payload).await.unwrap_err();
    assert!(err.is_duplicate());
    assert_eq!(store.count().await.unwrap(), 1, "no second row created");
}

#[tokio::test]
async fn point_range_returns_exactly_the_snapshots_at_that_timestamp() {
    let db = TempDb::create("point-range");
    let store = SqliteSnapshotStore::new(db.pool().clone());

    store.insert(&snapshot("BVL Corp", 10, ts(9, 0))).await.unwrap();
    store.insert(&snapshot("Other Corp", 11, ts(9, 0))).await.unwrap();
    store.insert(&snapshot("BVL Corp", 10, ts(10, 0))).await.unwrap();

    let rows = store.list_by_time_range(ts(9, 0), ts(9, 0)).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|s| s.scrape_timestamp() == ts(9, 0)));
}

#[tokio::test]
async fn company_lookup_returns_all_and_only_that_company() {
    let db = TempDb::create("company-lookup");
    let store = SqliteSnapshotStore::new(db.pool().clone());

    store.insert(&snapshot("BVL Corp", 10, ts(9, 0))).await.unwrap();
    store.insert(&snapshot("BVL Corp", 10, ts(11, 0))).await.unwrap();
    store.insert(&snapshot("Other Corp", 11, ts(9, 0))).await.unwrap();

    let rows = store.list_by_company(CompanyCode::new(10)).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .all(|s| s.company_code() == CompanyCode::new(10)));
}

#[tokio::test]
async fn two_captures_of_one_company_scenario() {
    let db = TempDb::create("scenario");
    let store = SqliteSnapshotStore::new(db.pool().clone());

    let t1 = ts(9, 0);
    let t2 = ts(11, 0);

    let mut a = snapshot("BVL Corp", 10, t1);
    a.last_price = Some(dec!(12.3400));
    let b = snapshot("BVL Corp", 10, t2);

    let id_a = store.insert(&a).await.unwrap();
    store.insert(&b).await.unwrap();

    let by_company = store.list_by_company(CompanyCode::new(10)).await.unwrap();
    assert_eq!(by_company.len(), 2);

    let at_t1 = store.list_by_time_range(t1, t1).await.unwrap();
    assert_eq!(at_t1.len(), 1);
    assert_eq!(at_t1[0].id, id_a);
    assert_eq!(at_t1[0].record.last_price, Some(dec!(12.3400)));
}

#[tokio::test]
async fn minimal_snapshot_with_only_required_fields_inserts() {
    let db = TempDb::create("minimal");
    let store = SqliteSnapshotStore::new(db.pool().clone());

    let minimal = snapshot("BVL Corp", 10, ts(9, 0));
    store.insert(&minimal).await.unwrap();

    let rows = store.list_by_company(CompanyCode::new(10)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].record, minimal);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_inserts_have_exactly_one_winner() {
    let db = TempDb::create("race");
    let store = Arc::new(SqliteSnapshotStore::new(db.pool().clone()));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let racing = snapshot("BVL Corp", 10, ts(9, 0));
            store.insert(&racing).await
        }));
    }

    let mut ok = 0;
    let mut dup = 0;
    for handle in handles {
        match handle.await.expect("task completes") {
            Ok(_) => ok += 1,
            Err(e) if e.is_duplicate() => dup += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(ok, 1, "the engine admits exactly one row");
    assert_eq!(dup, 3);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn capture_batch_rolls_back_whole_frame_on_duplicate() {
    let db = TempDb::create("capture");
    let store = SqliteSnapshotStore::new(db.pool().clone());

    store.insert(&snapshot("BVL Corp", 10, ts(9, 0))).await.unwrap();

    let frame = vec![
        snapshot("Other Corp", 11, ts(9, 0)),
        snapshot("Third Corp", 12, ts(9, 0)),
        snapshot("BVL Corp", 10, ts(9, 0)),
    ];
    let err = store.insert_capture(&frame).await.unwrap_err();
    assert!(err.is_duplicate());
    assert_eq!(store.count().await.unwrap(), 1, "frame fully rolled back");

    // A clean frame lands whole.
    let clean = vec![
        snapshot("Other Corp", 11, ts(10, 0)),
        snapshot("Third Corp", 12, ts(10, 0)),
    ];
    let ids = store.insert_capture(&clean).await.unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(store.count().await.unwrap(), 3);
}
