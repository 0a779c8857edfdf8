//! Engagement animation state machine.
//!
//! One fire event becomes one `EngagementAnimation` instance driving
//! `Idle -> Flying -> Impacting -> Settled`. Each instance carries its
//! own immutable start parameters; superseding a live instance drops it
//! before it can settle, which is the cancellation mechanism — a
//! dropped instance has no path left to the settled transition, so its
//! damage can never apply.

use battleview_core::constants::{FLIGHT_DURATION_MS, IMPACT_SETTLE_MS};
use battleview_core::enums::AnimationPhase;
use battleview_core::events::RenderOp;
use battleview_core::types::GeoPoint;

/// One in-flight engagement visual. Ephemeral: exists only between
/// "fire accepted" and "damage applied".
#[derive(Debug, Clone)]
pub struct EngagementAnimation {
    pub from_firepower_id: String,
    pub to_target_id: String,
    pub damage: u32,
    /// Launcher coordinate, captured at fire time.
    pub from: GeoPoint,
    /// Target coordinate, captured at fire time.
    pub to: GeoPoint,
    /// Monotonic milliseconds at fire time.
    pub start_time_ms: f64,
    pub phase: AnimationPhase,
    /// When the impacting phase began.
    impact_start_ms: f64,
}

/// Damage emitted exactly once, at settle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageEvent {
    pub target_id: String,
    pub damage: u32,
}

/// Result of advancing the sequencer by one frame.
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    pub render_ops: Vec<RenderOp>,
    pub damage: Option<DamageEvent>,
}

/// Drives at most one engagement animation at a time.
///
/// The animation is purely visual and locally timed once started: its
/// duration budgets are wall-clock bounds independent of any backend
/// response timing.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    active: Option<EngagementAnimation>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new engagement animation.
    ///
    /// Any live instance is superseded: replacing the option drops the
    /// prior instance without applying its damage.
    pub fn fire(
        &mut self,
        from_firepower_id: impl Into<String>,
        to_target_id: impl Into<String>,
        from: GeoPoint,
        to: GeoPoint,
        damage: u32,
        now_ms: f64,
    ) {
        if let Some(prior) = self.active.take() {
            log::debug!(
                "superseding engagement animation against {} in phase {:?}",
                prior.to_target_id,
                prior.phase
            );
        }
        self.active = Some(EngagementAnimation {
            from_firepower_id: from_firepower_id.into(),
            to_target_id: to_target_id.into(),
            damage,
            from,
            to,
            start_time_ms: now_ms,
            phase: AnimationPhase::Flying,
            impact_start_ms: 0.0,
        });
    }

    /// The target whose displayed health is currently owned by an
    /// in-flight animation, if any.
    pub fn animating_target(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.to_target_id.as_str())
    }

    pub fn phase(&self) -> AnimationPhase {
        self.active
            .as_ref()
            .map(|a| a.phase)
            .unwrap_or(AnimationPhase::Idle)
    }

    /// Advance the animation to `now_ms` and emit the desired visual
    /// state plus, at settle, the one damage event.
    pub fn tick(&mut self, now_ms: f64) -> TickOutput {
        let mut out = TickOutput::default();
        let Some(anim) = self.active.as_mut() else {
            return out;
        };

        if anim.phase == AnimationPhase::Flying {
            let progress = ((now_ms - anim.start_time_ms) / FLIGHT_DURATION_MS).clamp(0.0, 1.0);
            out.render_ops.push(RenderOp::DrawAttackLine {
                from: anim.from,
                to: anim.to,
            });
            out.render_ops.push(RenderOp::PlaceProjectile {
                position: anim.from.lerp(&anim.to, progress),
            });
            if progress >= 1.0 {
                anim.phase = AnimationPhase::Impacting;
                anim.impact_start_ms = now_ms;
            }
        }

        if anim.phase == AnimationPhase::Impacting {
            out.render_ops.push(RenderOp::ImpactAt { position: anim.to });
            if now_ms - anim.impact_start_ms >= IMPACT_SETTLE_MS {
                anim.phase = AnimationPhase::Settled;
            }
        }

        if anim.phase == AnimationPhase::Settled {
            out.render_ops.push(RenderOp::ClearImpact);
            out.render_ops.push(RenderOp::ClearAttackLine);
            out.damage = Some(DamageEvent {
                target_id: anim.to_target_id.clone(),
                damage: anim.damage,
            });
            // Discarding the instance is what makes damage exactly-once:
            // no stale reference can re-enter the settled transition.
            self.active = None;
        }

        out
    }
}
