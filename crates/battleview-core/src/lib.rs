//! Core types and definitions for the BATTLEVIEW command-and-control client.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the battlefield data model, status normalization, user commands,
//! render/alert events, and tuning constants. It has no dependency on
//! any rendering surface or transport.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod model;
pub mod normalize;
pub mod types;
