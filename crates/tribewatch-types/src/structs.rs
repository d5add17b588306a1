//! Snapshot entity structs.
//!
//! Covers [`Snapshot`] and its parts: [`Weather`], [`Tribe`],
//! [`Resources`], [`Agent`], and [`TimelineEvent`]. Field names match the
//! producer's JSON keys. Unknown keys are ignored so the producer can grow
//! its document without breaking older observers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::TribeId;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A complete, self-contained description of the simulation at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Simulation step counter, starting at zero.
    pub tick: u64,
    /// Global weather for this tick.
    pub weather: Weather,
    /// Tribes in producer order.
    pub tribes: Vec<Tribe>,
    /// Agents in producer order.
    pub agents: Vec<Agent>,
    /// Chronological event log, oldest first.
    pub timeline: Vec<TimelineEvent>,
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Global weather and its multiplier on food gathering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Display name (e.g. `Clear`, `Rain`, `Drought`).
    pub name: String,
    /// Multiplier applied to foraged food. Displayed, never interpreted.
    pub food_modifier: f64,
}

// ---------------------------------------------------------------------------
// Tribes
// ---------------------------------------------------------------------------

/// Stockpiled resources of a tribe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    /// Food units.
    pub food: f64,
    /// Wood units.
    pub wood: f64,
}

/// A tribe and its shared holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tribe {
    /// Tribe identifier referenced by [`Agent::tribe_id`].
    pub id: TribeId,
    /// Display name.
    pub name: String,
    /// Stockpiled resources.
    pub resources: Resources,
    /// Accumulated research points not yet spent on technology.
    pub knowledge_pool: f64,
    /// Discovered technology identifiers, in discovery order.
    pub discovered_tech: Vec<String>,
    /// Attitude toward other tribes, keyed by the other tribe's id, in
    /// the range -1.0 (hostile) to 1.0 (allied).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attitude: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// A single simulated person.
///
/// Needs (`hunger`, `fatigue`, `happiness`) are expected in `[0, 1]` but the
/// observer does not enforce the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Producer-assigned agent number, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Display name.
    pub name: String,
    /// Owning tribe. Not validated against [`Snapshot::tribes`].
    pub tribe_id: TribeId,
    /// Whether the agent is still alive.
    pub alive: bool,
    /// Hunger level.
    pub hunger: f64,
    /// Fatigue level.
    pub fatigue: f64,
    /// Happiness level.
    pub happiness: f64,
    /// Personality: tendency toward conflict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggression: Option<f64>,
    /// Personality: tendency to explore.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curiosity: Option<f64>,
    /// Personality: tendency to work for the tribe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooperativeness: Option<f64>,
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// One entry of the world timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Tick at which the event was recorded.
    pub tick: u64,
    /// Human-readable description.
    pub description: String,
}
