//! View model layer: the authoritative store, snapshot reconciliation,
//! list windowing, and viewport control.
//!
//! Ownership contract: `reconcile` is the only bulk writer of the
//! store's collections; the animation sequencer is the only writer of a
//! target's displayed health while an engagement animation is live; the
//! pager owns its own page state. Everything else reads.

pub mod paging;
pub mod reconcile;
pub mod store;
pub mod viewport;

#[cfg(test)]
mod tests;
