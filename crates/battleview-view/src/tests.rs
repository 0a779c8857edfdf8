//! Tests for the store, reconciliation, windowing and viewport.

use battleview_core::enums::TaskStatus;
use battleview_core::events::RenderOp;
use battleview_core::model::{FirepowerUnit, Snapshot, Target, Task};
use battleview_core::types::GeoPoint;

use crate::paging::{task_order, Pager};
use crate::reconcile::reconcile;
use crate::store::{Collections, ViewStore};
use crate::viewport::ViewportController;

fn target(id: &str, health: u32) -> Target {
    Target {
        target_id: id.into(),
        name: format!("Target {id}"),
        position: GeoPoint::new(40.0, 116.6),
        health,
        max_health: 100,
        ..Default::default()
    }
}

fn firepower(id: &str) -> FirepowerUnit {
    FirepowerUnit {
        firepower_id: id.into(),
        name: format!("Unit {id}"),
        position: GeoPoint::new(39.88, 116.375),
        ..Default::default()
    }
}

fn task(id: &str, start_time: Option<&str>) -> Task {
    Task {
        task_id: id.into(),
        status: TaskStatus::Pending,
        firepower_id: "FP001".into(),
        weapon_id: "W001".into(),
        target_id: "T1".into(),
        ammo_count: 1,
        start_time: start_time.map(str::to_owned),
        ..Default::default()
    }
}

fn snapshot(targets: Vec<Target>, firepowers: Vec<FirepowerUnit>, tasks: Vec<Task>) -> Snapshot {
    Snapshot {
        targets,
        firepowers,
        tasks,
    }
}

// ---- Store ----

#[test]
fn test_replace_all_swaps_all_collections_together() {
    let mut store = ViewStore::new();
    store.replace_all(Collections::from(snapshot(
        vec![target("T1", 100)],
        vec![firepower("FP001")],
        vec![task("TASK001", None)],
    )));

    // The swap is a single assignment; afterwards every collection
    // reflects the new snapshot.
    store.replace_all(Collections::from(snapshot(
        vec![target("T2", 80)],
        vec![firepower("FP002")],
        vec![task("TASK002", None)],
    )));

    assert!(store.target("T1").is_none());
    assert_eq!(store.targets().len(), 1);
    assert_eq!(store.firepowers()[0].firepower_id, "FP002");
    assert_eq!(store.tasks()[0].task_id, "TASK002");
}

#[test]
fn test_lookups_against_missing_ids_return_none() {
    let store = ViewStore::new();
    assert!(store.target("nope").is_none());
    assert!(store.firepower("nope").is_none());
    assert!(store.weapon("nope", "nope").is_none());
    assert!(store.task("nope").is_none());
}

#[test]
fn test_apply_damage_floors_at_zero() {
    let mut store = ViewStore::new();
    store.replace_all(Collections::from(snapshot(
        vec![target("T1", 30)],
        vec![],
        vec![],
    )));

    // Health never goes negative.
    assert_eq!(store.apply_damage("T1", 70), Some(0));
    assert_eq!(store.target_health("T1"), Some(0));
    assert!(store.target("T1").unwrap().is_destroyed());
    assert_eq!(store.apply_damage("missing", 10), None);
}

#[test]
fn test_store_does_not_auto_clear_dangling_selection() {
    let mut store = ViewStore::new();
    store.replace_all(Collections::from(snapshot(
        vec![target("T1", 100)],
        vec![],
        vec![],
    )));
    store.select_target(Some("T1".into()));

    // Bare replace_all (not reconcile) leaves the selection dangling;
    // lookups simply return None.
    store.replace_all(Collections::default());
    assert_eq!(store.selection().target_id.as_deref(), Some("T1"));
    assert!(store.target("T1").is_none());
}

// ---- Reconciliation ----

#[test]
fn test_selection_kept_when_id_survives() {
    let mut store = ViewStore::new();
    reconcile(
        &mut store,
        snapshot(
            vec![target("T1", 100)],
            vec![firepower("FP001")],
            vec![task("TASK001", None), task("TASK002", None)],
        ),
        &[],
    );
    store.select_task(Some("TASK002".into()));
    store.select_target(Some("T1".into()));

    // An id still present in the next snapshot keeps the selection.
    reconcile(
        &mut store,
        snapshot(
            vec![target("T1", 90)],
            vec![firepower("FP001")],
            vec![task("TASK002", None), task("TASK003", None)],
        ),
        &[],
    );
    assert_eq!(store.selection().task_id.as_deref(), Some("TASK002"));
    assert_eq!(store.selection().target_id.as_deref(), Some("T1"));
}

#[test]
fn test_selection_falls_back_to_first_when_id_vanishes() {
    let mut store = ViewStore::new();
    reconcile(
        &mut store,
        snapshot(vec![], vec![], vec![task("TASK001", None)]),
        &[],
    );
    store.select_task(Some("TASK001".into()));

    reconcile(
        &mut store,
        snapshot(
            vec![],
            vec![],
            vec![task("TASK005", None), task("TASK006", None)],
        ),
        &[],
    );
    assert_eq!(store.selection().task_id.as_deref(), Some("TASK005"));
}

#[test]
fn test_selection_cleared_when_collection_empties() {
    let mut store = ViewStore::new();
    reconcile(
        &mut store,
        snapshot(vec![target("T1", 100)], vec![], vec![task("TASK001", None)]),
        &[],
    );
    store.select_task(Some("TASK001".into()));
    store.select_target(Some("T1".into()));

    reconcile(&mut store, snapshot(vec![], vec![], vec![]), &[]);
    assert!(store.selection().task_id.is_none());
    assert!(store.selection().target_id.is_none());
}

#[test]
fn test_empty_selection_stays_empty_after_reconcile() {
    let mut store = ViewStore::new();
    reconcile(
        &mut store,
        snapshot(vec![], vec![], vec![task("TASK001", None)]),
        &[],
    );
    assert!(store.selection().task_id.is_none());
}

#[test]
fn test_reconcile_holds_health_of_animating_target() {
    let mut store = ViewStore::new();
    reconcile(&mut store, snapshot(vec![target("T1", 60)], vec![], vec![]), &[]);

    // The backend still reports full health; the animation owns the
    // displayed value until it settles, so a refresh must not heal T1.
    reconcile(
        &mut store,
        snapshot(
            vec![target("T1", 100), target("T2", 100)],
            vec![],
            vec![],
        ),
        &["T1".to_owned()],
    );
    assert_eq!(store.target_health("T1"), Some(60));
    assert_eq!(store.target_health("T2"), Some(100));

    // Once the animation settles, a plain reconcile adopts the backend
    // value wholesale.
    reconcile(&mut store, snapshot(vec![target("T1", 100)], vec![], vec![]), &[]);
    assert_eq!(store.target_health("T1"), Some(100));
}

// ---- Pagination ----

#[test]
fn test_pager_clamps_in_all_directions() {
    let mut pager = Pager::new(3);
    pager.sync_len(7);
    assert_eq!(pager.total_pages(), 3);

    // The page always stays within [1, total_pages].
    pager.set_page(0);
    assert_eq!(pager.page(), 1);
    pager.set_page(99);
    assert_eq!(pager.page(), 3);

    // Collection shrinks under the current page.
    pager.sync_len(2);
    assert_eq!(pager.total_pages(), 1);
    assert_eq!(pager.page(), 1);

    // Empty collection still has one (empty) page.
    pager.sync_len(0);
    assert_eq!(pager.total_pages(), 1);
    assert_eq!(pager.page(), 1);
    assert_eq!(pager.window(), 0..0);
}

#[test]
fn test_pager_window_bounds() {
    let mut pager = Pager::new(3);
    pager.sync_len(7);

    pager.set_page(1);
    assert_eq!(pager.window(), 0..3);
    pager.set_page(2);
    assert_eq!(pager.window(), 3..6);
    pager.set_page(3);
    assert_eq!(pager.window(), 6..7);
}

#[test]
fn test_jump_to_containing_selects_page_two_for_fifth_task() {
    // With page_size 3 and 7 tasks, the 5th task (index 4) is page 2.
    let mut pager = Pager::new(3);
    pager.sync_len(7);
    pager.jump_to_containing(4);
    assert_eq!(pager.page(), 2);

    // Out-of-range index leaves the page unchanged.
    pager.jump_to_containing(42);
    assert_eq!(pager.page(), 2);
}

#[test]
fn test_task_order_descending_with_null_oldest() {
    let tasks = vec![
        task("A", Some("2024-01-15T08:30:00")),
        task("B", None),
        task("C", Some("2024-01-15T09:00:00")),
        task("D", Some("not-a-date")),
    ];
    let order = task_order(&tasks);
    let ids: Vec<&str> = order.iter().map(|&i| tasks[i].task_id.as_str()).collect();
    // Newest first; absent/unparseable timestamps sort last, keeping
    // their original relative order (stable sort).
    assert_eq!(ids, vec!["C", "A", "B", "D"]);
}

#[test]
fn test_task_order_deterministic_across_repeated_sorts() {
    // Repeated sorts of the same input give the same order.
    let tasks = vec![
        task("A", None),
        task("B", Some("2024-01-15T08:30:00")),
        task("C", None),
        task("D", Some("2024-01-15T08:30:00")),
    ];
    let first = task_order(&tasks);
    for _ in 0..10 {
        assert_eq!(task_order(&tasks), first);
    }
    // Equal timestamps keep collection order: B before D, A before C.
    let ids: Vec<&str> = first.iter().map(|&i| tasks[i].task_id.as_str()).collect();
    assert_eq!(ids, vec!["B", "D", "A", "C"]);
}

// ---- Viewport ----

#[test]
fn test_auto_fit_latches_after_first_data() {
    let mut vp = ViewportController::new();

    // No coordinates yet: nothing to fit, not latched.
    assert!(vp.maybe_fit(std::iter::empty()).is_none());

    let points = vec![GeoPoint::new(39.88, 116.375), GeoPoint::new(40.05, 116.61)];
    match vp.maybe_fit(points.clone()) {
        Some(RenderOp::FitBounds {
            points: fitted,
            padding_px,
            max_zoom,
        }) => {
            assert_eq!(fitted.len(), 2);
            assert_eq!(padding_px, 100);
            assert_eq!(max_zoom, 5);
        }
        other => panic!("expected FitBounds, got {other:?}"),
    }

    // Subsequent refreshes must not re-fit.
    assert!(vp.maybe_fit(points).is_none());
}

#[test]
fn test_auto_fit_skips_invalid_coordinates() {
    let mut vp = ViewportController::new();
    // Only junk coordinates: stays unlatched until real data arrives.
    assert!(vp
        .maybe_fit(vec![GeoPoint::new(999.0, 0.0)])
        .is_none());
    assert!(vp.maybe_fit(vec![GeoPoint::new(39.9, 116.4)]).is_some());
}

#[test]
fn test_zoom_factor_clamped_and_default_is_silent() {
    let mut vp = ViewportController::new();

    assert!(vp.set_zoom_factor(1.0).is_none());

    match vp.set_zoom_factor(1.5) {
        Some(RenderOp::SetZoom { level }) => assert!((level - 14.0).abs() < 1e-9),
        other => panic!("expected SetZoom, got {other:?}"),
    }

    vp.set_zoom_factor(10.0);
    assert_eq!(vp.zoom_factor(), 2.0);
    vp.set_zoom_factor(0.0);
    assert_eq!(vp.zoom_factor(), 0.5);
    assert!(vp.set_zoom_factor(f64::NAN).is_none());
}
