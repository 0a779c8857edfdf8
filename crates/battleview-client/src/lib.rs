//! Client engine — ties the view model, reconciliation and engagement
//! animation to the backend collaborator.
//!
//! `ClientEngine` owns all mutable client state, processes user
//! commands at tick boundaries, and produces a `FrameSnapshot` per tick
//! for the embedding rendering surface. Completely headless (no map or
//! UI dependency), enabling deterministic testing against a fake
//! backend.

pub mod api;
pub mod engine;
pub mod error;
pub mod validate;

pub use api::Backend;
pub use engine::{ClientEngine, EngineConfig, FrameSnapshot};
pub use error::BackendError;
pub use validate::FireRejection;
