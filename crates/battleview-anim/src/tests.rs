//! Tests for the engagement animation state machine.

use battleview_core::constants::{FLIGHT_DURATION_MS, IMPACT_SETTLE_MS};
use battleview_core::enums::AnimationPhase;
use battleview_core::events::RenderOp;
use battleview_core::types::GeoPoint;

use crate::sequencer::{DamageEvent, Sequencer};

const FROM: GeoPoint = GeoPoint {
    lat: 39.88,
    lng: 116.375,
    alt: None,
};
const TO: GeoPoint = GeoPoint {
    lat: 40.05,
    lng: 116.61,
    alt: None,
};

fn fire(seq: &mut Sequencer, target: &str, damage: u32, now_ms: f64) {
    seq.fire("FP001", target, FROM, TO, damage, now_ms);
}

#[test]
fn test_idle_sequencer_emits_nothing() {
    let mut seq = Sequencer::new();
    let out = seq.tick(1000.0);
    assert!(out.render_ops.is_empty());
    assert!(out.damage.is_none());
    assert_eq!(seq.phase(), AnimationPhase::Idle);
    assert!(seq.animating_target().is_none());
}

#[test]
fn test_flying_emits_line_and_interpolated_projectile() {
    let mut seq = Sequencer::new();
    fire(&mut seq, "T1", 40, 0.0);

    let out = seq.tick(FLIGHT_DURATION_MS / 2.0);
    assert_eq!(seq.phase(), AnimationPhase::Flying);
    assert_eq!(seq.animating_target(), Some("T1"));

    assert!(matches!(out.render_ops[0], RenderOp::DrawAttackLine { .. }));
    match &out.render_ops[1] {
        RenderOp::PlaceProjectile { position } => {
            let mid = FROM.lerp(&TO, 0.5);
            assert!((position.lat - mid.lat).abs() < 1e-9);
            assert!((position.lng - mid.lng).abs() < 1e-9);
        }
        other => panic!("expected PlaceProjectile, got {other:?}"),
    }
    assert!(out.damage.is_none());
}

#[test]
fn test_progress_clamped_before_start() {
    let mut seq = Sequencer::new();
    fire(&mut seq, "T1", 40, 1000.0);

    // A tick timestamped before the fire instant holds at the launcher.
    let out = seq.tick(500.0);
    match &out.render_ops[1] {
        RenderOp::PlaceProjectile { position } => {
            assert!((position.lat - FROM.lat).abs() < 1e-9);
        }
        other => panic!("expected PlaceProjectile, got {other:?}"),
    }
}

#[test]
fn test_full_sequence_applies_damage_exactly_once() {
    let mut seq = Sequencer::new();
    fire(&mut seq, "T1", 40, 0.0);

    // End of flight: transitions to impacting, impact visual appears.
    let out = seq.tick(FLIGHT_DURATION_MS);
    assert_eq!(seq.phase(), AnimationPhase::Impacting);
    assert!(out
        .render_ops
        .iter()
        .any(|op| matches!(op, RenderOp::ImpactAt { .. })));
    assert!(out.damage.is_none());

    // Settle delay elapses: exactly one damage event, visuals cleared,
    // instance discarded.
    let out = seq.tick(FLIGHT_DURATION_MS + IMPACT_SETTLE_MS);
    assert_eq!(
        out.damage,
        Some(DamageEvent {
            target_id: "T1".into(),
            damage: 40,
        })
    );
    assert!(out.render_ops.contains(&RenderOp::ClearImpact));
    assert!(out.render_ops.contains(&RenderOp::ClearAttackLine));
    assert_eq!(seq.phase(), AnimationPhase::Idle);

    // A settled instance cannot re-fire its damage.
    for i in 1..10 {
        let out = seq.tick(FLIGHT_DURATION_MS + IMPACT_SETTLE_MS + i as f64 * 100.0);
        assert!(out.damage.is_none());
        assert!(out.render_ops.is_empty());
    }
}

#[test]
fn test_superseded_instance_contributes_no_damage() {
    let mut seq = Sequencer::new();
    fire(&mut seq, "T1", 40, 0.0);
    seq.tick(500.0);

    // A second fire supersedes the first before it settles;
    // only the second instance's damage ever applies.
    fire(&mut seq, "T1", 70, 600.0);
    assert_eq!(seq.phase(), AnimationPhase::Flying);

    let mut damage_events = Vec::new();
    let mut now = 600.0;
    while seq.phase() != AnimationPhase::Idle {
        now += 100.0;
        if let Some(d) = seq.tick(now).damage {
            damage_events.push(d);
        }
        assert!(now < 10_000.0, "animation failed to settle");
    }

    assert_eq!(
        damage_events,
        vec![DamageEvent {
            target_id: "T1".into(),
            damage: 70,
        }]
    );
}

#[test]
fn test_supersede_during_impacting_still_cancels() {
    let mut seq = Sequencer::new();
    fire(&mut seq, "T1", 40, 0.0);
    seq.tick(FLIGHT_DURATION_MS);
    assert_eq!(seq.phase(), AnimationPhase::Impacting);

    // New fire arrives while the first impact visual is holding.
    fire(&mut seq, "T2", 25, FLIGHT_DURATION_MS + 100.0);
    assert_eq!(seq.animating_target(), Some("T2"));

    // The first instance's damage is gone; only T2's applies.
    let out = seq.tick(FLIGHT_DURATION_MS + 100.0 + FLIGHT_DURATION_MS + IMPACT_SETTLE_MS);
    assert_eq!(
        out.damage,
        Some(DamageEvent {
            target_id: "T2".into(),
            damage: 25,
        })
    );
}

#[test]
fn test_wall_clock_bounded_settle() {
    // A coarse tick cadence cannot strand the instance in flying: the
    // budgets are wall-clock bounds, not tick counts.
    let mut seq = Sequencer::new();
    fire(&mut seq, "T1", 10, 0.0);

    let out = seq.tick(FLIGHT_DURATION_MS * 10.0);
    assert_eq!(seq.phase(), AnimationPhase::Impacting);
    assert!(out.damage.is_none());

    let out = seq.tick(FLIGHT_DURATION_MS * 10.0 + IMPACT_SETTLE_MS);
    assert!(out.damage.is_some());
    assert_eq!(seq.phase(), AnimationPhase::Idle);
}
