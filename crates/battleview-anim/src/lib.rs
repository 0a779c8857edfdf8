//! Engagement animation sequencing.
//!
//! Pure state machine over wall-clock time — no ECS dependency, no
//! timers of its own. The embedding engine calls `tick` at its frame
//! rate and forwards the emitted render requests and damage event.

pub mod sequencer;

pub use sequencer::{DamageEvent, EngagementAnimation, Sequencer, TickOutput};

#[cfg(test)]
mod tests;
