//! Shared type definitions for the Tribewatch observer.
//!
//! This crate mirrors the `state.json` document the tribe simulation
//! writes once per publishing tick. The observer never creates or mutates
//! these values; every snapshot is decoded fresh, rendered, and dropped.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier types that tolerate the producer's encodings
//! - [`structs`] -- Snapshot entity structs (weather, tribes, agents, timeline)

pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::TribeId;
pub use structs::{Agent, Resources, Snapshot, TimelineEvent, Tribe, Weather};
