use chrono::{Duration, NaiveDate, TimeZone, Utc};
use focusmate_core::{rank, score, FocusSession, Task, TaskId, TaskStatus};
use focusmate_store::{open_store, Backend, JsonStore, MemoryStore, Store};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn log_minutes(store: &mut dyn Store, task_id: TaskId, minutes: i32) {
    let start = Utc.with_ymd_and_hms(2026, 8, 24, 9, 0, 0).unwrap();
    let session = FocusSession::from_interval(
        Some(task_id),
        start,
        start + Duration::minutes(minutes as i64),
        minutes,
        false,
    );
    store.add_session(session).unwrap();
}

/// A small but realistic week of state: an urgent review, a long-running
/// report with most hours already in, and a backlog chore with no deadline.
fn seed(store: &mut dyn Store) {
    let review = store
        .add_task(
            Task::new("Review security patch")
                .with_priority(4)
                .with_due(d(2026, 8, 26))
                .with_target(60),
        )
        .unwrap();
    let report = store
        .add_task(
            Task::new("Quarterly report")
                .with_priority(3)
                .with_due(d(2026, 9, 4))
                .with_target(300),
        )
        .unwrap();
    let chore = store
        .add_task(Task::new("Clean up downloads folder").with_priority(1).with_target(30))
        .unwrap();

    log_minutes(store, report.id, 240);
    log_minutes(store, chore.id, 10);
    let _ = review;
}

fn ranked_ids(store: &dyn Store, today: NaiveDate) -> Vec<TaskId> {
    let tasks = store.tasks().unwrap();
    let ranked = rank(tasks, store, today).unwrap();
    ranked.into_iter().map(|t| t.id).collect()
}

/// The same seed data must rank identically whichever backend holds it.
#[test]
fn test_backends_are_interchangeable_for_planning() {
    let mut mem = MemoryStore::new();
    seed(&mut mem);

    let tmp = tempfile::tempdir().unwrap();
    let mut json = JsonStore::open(tmp.path()).unwrap();
    seed(&mut json);

    assert_eq!(mem.tasks().unwrap(), json.tasks().unwrap());
    assert_eq!(mem.sessions().unwrap().len(), json.sessions().unwrap().len());

    let today = d(2026, 8, 25);
    assert_eq!(ranked_ids(&mem, today), ranked_ids(&json, today));
}

/// A task created after a delete starts from zero logged minutes on either
/// backend; it never takes over the dead task's id and effort history.
#[test]
fn test_task_added_after_delete_starts_from_zero() {
    let tmp = tempfile::tempdir().unwrap();
    let mut json = JsonStore::open(tmp.path()).unwrap();
    let mut mem = MemoryStore::new();
    let stores: [&mut dyn Store; 2] = [&mut json, &mut mem];

    for store in stores {
        let doomed = store
            .add_task(Task::new("doomed").with_priority(3).with_target(60))
            .unwrap();
        log_minutes(store, doomed.id, 45);
        store.delete_task(doomed.id).unwrap();

        let fresh = store
            .add_task(Task::new("fresh").with_priority(3).with_target(60))
            .unwrap();
        assert_ne!(fresh.id, doomed.id, "id {} was recycled", doomed.id);

        let logged = store.minutes_logged(fresh.id).unwrap();
        assert_eq!(logged, 0);

        // Nothing inherited, so the fresh task scores with its full gap.
        let today = d(2026, 8, 25);
        assert_eq!(score(&fresh, logged, today), 2.0 * 3.0 + 1.5);
    }
}

/// Walk the seeded week and check the order against hand-computed scores.
#[test]
fn test_plan_orders_by_computed_score() {
    let mut store = MemoryStore::new();
    seed(&mut store);
    let today = d(2026, 8, 25);

    // review: 2*4 + 1/1 + 1.5*(60/60)  = 10.5 (due tomorrow, nothing logged)
    // report: 2*3 + 1/10 + 1.5*(60/60) = 7.6  (240 of 300 logged)
    // chore:  2*1 + 0    + 1.5*(20/60) = 2.5
    assert_eq!(ranked_ids(&store, today), vec![1, 2, 3]);

    let tasks = store.tasks().unwrap();
    let by_id = |id: TaskId| tasks.iter().find(|t| t.id == id).unwrap();
    assert_eq!(score(by_id(1), 0, today), 2.0 * 4.0 + 1.0 + 1.5);
    assert_eq!(score(by_id(2), 240, today), 2.0 * 3.0 + 1.0 / 10.0 + 1.5);
    assert_eq!(score(by_id(3), 10, today), 2.0 + 1.5 * (20.0 / 60.0));
}

/// Logging enough time against the leader closes its gap and hands the top
/// spot to the next task.
#[test]
fn test_logged_time_shrinks_the_gap_and_reorders() {
    let mut store = MemoryStore::new();
    let a = store
        .add_task(Task::new("a").with_priority(3).with_target(120))
        .unwrap();
    let b = store
        .add_task(Task::new("b").with_priority(3).with_target(60))
        .unwrap();

    let today = d(2026, 8, 25);

    // Identical priorities, no deadlines: the bigger gap leads.
    assert_eq!(ranked_ids(&store, today), vec![a.id, b.id]);

    // Two hours against `a` zeroes its gap; `b` takes over.
    log_minutes(&mut store, a.id, 120);
    assert_eq!(ranked_ids(&store, today), vec![b.id, a.id]);
}

/// Marking a task Done does not change its score, so callers filter instead;
/// the store keeps returning it for history views.
#[test]
fn test_done_tasks_still_rank_until_filtered() {
    let mut store = MemoryStore::new();
    let done = store
        .add_task(Task::new("shipped").with_priority(5).with_target(0))
        .unwrap();
    store.add_task(Task::new("open").with_priority(2).with_target(0)).unwrap();
    store.set_status(done.id, TaskStatus::Done).unwrap();

    let today = d(2026, 8, 25);
    assert_eq!(ranked_ids(&store, today), vec![1, 2]);

    let open_only: Vec<TaskId> = {
        let mut tasks = store.tasks().unwrap();
        tasks.retain(|t| !t.is_done());
        rank(tasks, &store, today).unwrap().into_iter().map(|t| t.id).collect()
    };
    assert_eq!(open_only, vec![2]);
}

/// `open_store` hands back a boxed backend that still feeds the ranker.
#[test]
fn test_open_store_selects_backend() {
    let tmp = tempfile::tempdir().unwrap();

    let mut store = open_store(Backend::Json, tmp.path()).unwrap();
    seed(&mut *store);
    assert_eq!(ranked_ids(&*store, d(2026, 8, 25)), vec![1, 2, 3]);
    assert!(tmp.path().join("tasks.json").exists());

    let mem = open_store(Backend::Memory, tmp.path()).unwrap();
    assert!(mem.tasks().unwrap().is_empty());
}
