mod common;

use std::sync::Arc;

use common::*;
use settlement_server::cache::{CourierLocation, LocationCache};
use settlement_server::db::MemoryStore;
use settlement_server::work_schedule::{self, CloseReport};
use shared::models::WorkStatus;

fn location() -> CourierLocation {
    CourierLocation {
        lat: 41.3,
        lon: 69.2,
        updated_at: 0,
    }
}

#[tokio::test]
async fn test_closes_only_previous_business_days() {
    let store = Arc::new(seeded_store());
    store.insert_courier(courier(10, 1));
    store.insert_courier(courier(11, 1));
    store.insert_work_entry(work_entry(1, 10, at(date(2024, 3, 9), 9, 0), false));
    store.insert_work_entry(work_entry(2, 11, at(date(2024, 3, 10), 8, 0), false));

    let (ctx, cache) = context(store.clone(), config());
    cache.set(10, location());
    cache.set(11, location());

    let now = at(date(2024, 3, 10), 12, 0);
    let report = work_schedule::close_stale_entries_at(&ctx, now).await.unwrap();
    assert_eq!(
        report,
        CloseReport {
            closed: 1,
            already_closed: 0,
            failed: 0
        }
    );

    let closed = store.work_entry(1).unwrap();
    assert_eq!(closed.current_status, WorkStatus::Closed);
    assert_eq!(closed.date_finish, Some(now));
    assert_eq!(closed.duration, Some(27 * 3600));
    assert!(!store.courier(10).unwrap().is_online);
    assert!(cache.get(10).is_none());

    let open = store.work_entry(2).unwrap();
    assert_eq!(open.current_status, WorkStatus::Open);
    assert!(store.courier(11).unwrap().is_online);
    assert!(cache.get(11).is_some());
}

#[tokio::test]
async fn test_second_run_is_a_no_op() {
    let store = Arc::new(MemoryStore::new());
    store.insert_courier(courier(10, 1));
    store.insert_work_entry(work_entry(1, 10, at(date(2024, 3, 9), 9, 0), false));
    let (ctx, _) = context(store.clone(), config());

    let first_now = at(date(2024, 3, 10), 0, 5);
    work_schedule::close_stale_entries_at(&ctx, first_now).await.unwrap();
    let report = work_schedule::close_stale_entries_at(&ctx, first_now + 60_000)
        .await
        .unwrap();

    assert_eq!(report, CloseReport::default());
    assert_eq!(store.work_entry(1).unwrap().date_finish, Some(first_now));
}

#[tokio::test]
async fn test_cutoff_moves_business_day_start() {
    let store = Arc::new(MemoryStore::new());
    store.insert_courier(courier(10, 1));
    // 02:00 on the 10th is still business day 9 with a 04:00 cutoff
    store.insert_work_entry(work_entry(1, 10, at(date(2024, 3, 10), 2, 0), false));

    let mut config = config();
    config.business_day_cutoff = "04:00".into();
    let (ctx, _) = context(store.clone(), config);

    let before_cutoff = at(date(2024, 3, 10), 3, 0);
    let report = work_schedule::close_stale_entries_at(&ctx, before_cutoff).await.unwrap();
    assert_eq!(report.closed, 0);

    let after_cutoff = at(date(2024, 3, 10), 4, 30);
    let report = work_schedule::close_stale_entries_at(&ctx, after_cutoff).await.unwrap();
    assert_eq!(report.closed, 1);
}
