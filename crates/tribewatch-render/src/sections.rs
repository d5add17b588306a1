//! The four sub-renderers.
//!
//! Each section decodes its own slice of the snapshot document and builds
//! its complete output without touching any target. The typed helpers
//! ([`status_text`], [`tribe_block`], [`agent_block`], [`timeline_blocks`])
//! are usable on their own when a caller already holds decoded values.

use std::cmp::Ordering;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tribewatch_types::{Agent, TimelineEvent, Tribe, Weather};

use crate::error::{RenderError, Section};
use crate::format::{one_dp, signed_two_dp, two_dp};
use crate::target::Block;

/// Token shown in place of an empty technology list.
pub const NO_TECH: &str = "None";

/// Output of the status section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusText {
    /// Text for the tick slot.
    pub tick: String,
    /// Text for the weather slot, `"<name> (x<modifier>)"`.
    pub weather: String,
}

// ---------------------------------------------------------------------------
// Document access
// ---------------------------------------------------------------------------

/// Decode the top-level `key` of `doc` on behalf of `section`.
fn field<T: DeserializeOwned>(doc: &Value, section: Section, key: &str) -> Result<T, RenderError> {
    let value = doc.get(key).ok_or_else(|| RenderError::MissingField {
        section,
        field: key.to_owned(),
    })?;
    T::deserialize(value).map_err(|source| RenderError::InvalidField {
        section,
        field: key.to_owned(),
        source,
    })
}

/// Reject NaN and infinities before they reach the view.
fn finite(section: Section, field: &str, value: f64) -> Result<f64, RenderError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RenderError::NonFinite {
            section,
            field: field.to_owned(),
        })
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Stage the status section from a snapshot document.
pub fn status(doc: &Value) -> Result<StatusText, RenderError> {
    let tick: u64 = field(doc, Section::Status, "tick")?;
    let weather: Weather = field(doc, Section::Status, "weather")?;
    status_text(tick, &weather)
}

/// Format the tick counter and weather summary.
pub fn status_text(tick: u64, weather: &Weather) -> Result<StatusText, RenderError> {
    let modifier = finite(Section::Status, "weather.food_modifier", weather.food_modifier)?;
    Ok(StatusText {
        tick: tick.to_string(),
        weather: format!("{} (x{})", weather.name, one_dp(modifier)),
    })
}

// ---------------------------------------------------------------------------
// Tribes
// ---------------------------------------------------------------------------

/// Stage the tribes section: one block per tribe, in snapshot order.
pub fn tribes(doc: &Value) -> Result<Vec<Block>, RenderError> {
    let tribes: Vec<Tribe> = field(doc, Section::Tribes, "tribes")?;
    tribes.iter().map(tribe_block).collect()
}

/// Build the block for one tribe.
pub fn tribe_block(tribe: &Tribe) -> Result<Block, RenderError> {
    let food = finite(Section::Tribes, "resources.food", tribe.resources.food)?;
    let wood = finite(Section::Tribes, "resources.wood", tribe.resources.wood)?;
    let knowledge = finite(Section::Tribes, "knowledge_pool", tribe.knowledge_pool)?;

    let tech = if tribe.discovered_tech.is_empty() {
        NO_TECH.to_owned()
    } else {
        tribe.discovered_tech.join(", ")
    };

    let mut block = Block::new("tribe")
        .with_title(tribe.name.as_str())
        .line(format!("ID: {}", tribe.id))
        .line(format!(
            "Resources: food={}, wood={}",
            one_dp(food),
            one_dp(wood)
        ))
        .line(format!("Knowledge pool: {}", two_dp(knowledge)))
        .line(format!("Tech: {tech}"));

    if !tribe.attitude.is_empty() {
        let mut entries: Vec<(&String, &f64)> = tribe.attitude.iter().collect();
        entries.sort_by(|(a, _), (b, _)| attitude_key_order(a, b));

        let mut parts = Vec::with_capacity(entries.len());
        for (other, value) in entries {
            let value = finite(Section::Tribes, "attitude", *value)?;
            parts.push(format!("{other}={}", signed_two_dp(value)));
        }
        block = block.line(format!("Attitude: {}", parts.join(", ")));
    }

    Ok(block)
}

/// Numeric tribe ids in numeric order, then any other keys lexically.
fn attitude_key_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<i128>(), b.parse::<i128>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// Stage the agents section: one block per agent, in snapshot order.
pub fn agents(doc: &Value) -> Result<Vec<Block>, RenderError> {
    let agents: Vec<Agent> = field(doc, Section::Agents, "agents")?;
    agents.iter().map(agent_block).collect()
}

/// Build the block for one agent.
pub fn agent_block(agent: &Agent) -> Result<Block, RenderError> {
    let hunger = finite(Section::Agents, "hunger", agent.hunger)?;
    let fatigue = finite(Section::Agents, "fatigue", agent.fatigue)?;
    let happiness = finite(Section::Agents, "happiness", agent.happiness)?;

    Ok(Block::new("agent").with_title(agent.name.as_str()).line(format!(
        "[tribe {}] - alive: {} | hunger: {} | fatigue: {} | happiness: {}",
        agent.tribe_id,
        agent.alive,
        two_dp(hunger),
        two_dp(fatigue),
        two_dp(happiness)
    )))
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Stage the timeline section: most recent event first.
pub fn timeline(doc: &Value) -> Result<Vec<Block>, RenderError> {
    let events: Vec<TimelineEvent> = field(doc, Section::Timeline, "timeline")?;
    Ok(timeline_blocks(&events))
}

/// One `"[<tick>] <description>"` line per event, in reverse arrival order.
///
/// The input slice is only read.
pub fn timeline_blocks(events: &[TimelineEvent]) -> Vec<Block> {
    events
        .iter()
        .rev()
        .map(|e| Block::new("timeline-item").line(format!("[{}] {}", e.tick, e.description)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use tribewatch_types::{Resources, TribeId};

    use super::*;

    fn tribe(tech: &[&str]) -> Tribe {
        Tribe {
            id: TribeId::Number(1),
            name: String::from("Ashfolk"),
            resources: Resources {
                food: 12.34,
                wood: 5.0,
            },
            knowledge_pool: 1.005,
            discovered_tech: tech.iter().map(|t| (*t).to_owned()).collect(),
            attitude: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn status_formats_weather_with_one_digit() {
        let doc = json!({"tick": 7, "weather": {"name": "Storm", "food_modifier": 0.8}});
        let status = status(&doc).unwrap();
        assert_eq!(status.tick, "7");
        assert_eq!(status.weather, "Storm (x0.8)");
    }

    #[test]
    fn status_pads_integral_modifier() {
        let doc = json!({"tick": 0, "weather": {"name": "Clear", "food_modifier": 1}});
        assert_eq!(status(&doc).unwrap().weather, "Clear (x1.0)");
    }

    #[test]
    fn status_missing_weather_fails() {
        let doc = json!({"tick": 3});
        let err = status(&doc).unwrap_err();
        assert_eq!(err.section(), Section::Status);
        assert!(matches!(err, RenderError::MissingField { .. }));
    }

    #[test]
    fn tribe_block_lists_resources_and_tech() {
        let block = tribe_block(&tribe(&["fire", "farming"])).unwrap();
        assert_eq!(block.class, "tribe");
        assert_eq!(block.title.as_deref(), Some("Ashfolk"));
        assert_eq!(
            block.lines,
            vec![
                "ID: 1",
                "Resources: food=12.3, wood=5.0",
                "Knowledge pool: 1.00",
                "Tech: fire, farming",
            ]
        );
    }

    #[test]
    fn empty_tech_renders_none_token() {
        let block = tribe_block(&tribe(&[])).unwrap();
        assert!(block.lines.contains(&String::from("Tech: None")));
    }

    #[test]
    fn attitude_line_only_when_present() {
        let mut t = tribe(&[]);
        assert_eq!(tribe_block(&t).unwrap().lines.len(), 4);

        t.attitude.insert(String::from("2"), 0.05);
        t.attitude.insert(String::from("3"), -0.7);
        let block = tribe_block(&t).unwrap();
        assert_eq!(
            block.lines.last().map(String::as_str),
            Some("Attitude: 2=+0.05, 3=-0.70")
        );
    }

    #[test]
    fn attitude_follows_numeric_tribe_order() {
        let mut t = tribe(&[]);
        t.attitude.insert(String::from("2"), 0.1);
        t.attitude.insert(String::from("10"), 0.2);
        t.attitude.insert(String::from("3"), 0.3);
        t.attitude.insert(String::from("north"), -0.1);
        let block = tribe_block(&t).unwrap();
        assert_eq!(
            block.lines.last().map(String::as_str),
            Some("Attitude: 2=+0.10, 3=+0.30, 10=+0.20, north=-0.10")
        );
    }

    #[test]
    fn non_numeric_food_fails_tribes_section() {
        let doc = json!({"tribes": [{
            "id": 1, "name": "A", "resources": {"food": "lots", "wood": 1},
            "knowledge_pool": 0, "discovered_tech": []
        }]});
        let err = tribes(&doc).unwrap_err();
        assert_eq!(err.section(), Section::Tribes);
        assert!(matches!(err, RenderError::InvalidField { .. }));
    }

    #[test]
    fn non_finite_stat_is_rejected() {
        let mut t = tribe(&[]);
        t.knowledge_pool = f64::NAN;
        let err = tribe_block(&t).unwrap_err();
        assert!(matches!(err, RenderError::NonFinite { .. }));
    }

    #[test]
    fn agent_block_uses_two_digits() {
        let doc = json!({"agents": [{
            "name": "Agent_1", "tribe_id": 2, "alive": true,
            "hunger": 0.5, "fatigue": 0, "happiness": 0.456
        }]});
        let blocks = agents(&doc).unwrap();
        assert_eq!(blocks.len(), 1);
        let block = blocks.first().unwrap();
        assert_eq!(block.title.as_deref(), Some("Agent_1"));
        assert_eq!(
            block.lines,
            vec!["[tribe 2] - alive: true | hunger: 0.50 | fatigue: 0.00 | happiness: 0.46"]
        );
    }

    #[test]
    fn agents_with_unknown_tribe_still_render() {
        let doc = json!({"agents": [{
            "name": "Stray", "tribe_id": 99, "alive": false,
            "hunger": 1, "fatigue": 1, "happiness": 0
        }]});
        assert_eq!(agents(&doc).unwrap().len(), 1);
    }

    #[test]
    fn agents_with_out_of_range_tribe_id_still_render() {
        let doc = json!({"agents": [{
            "name": "Far", "tribe_id": 18_446_744_073_709_551_615_u64, "alive": true,
            "hunger": 0, "fatigue": 0, "happiness": 0
        }]});
        let blocks = agents(&doc).unwrap();
        let line = blocks.first().unwrap().lines.first().unwrap();
        assert!(line.starts_with("[tribe 18446744073709551615] - alive: true"));
    }

    #[test]
    fn timeline_is_most_recent_first() {
        let events = vec![
            TimelineEvent {
                tick: 5,
                description: String::from("founded"),
            },
            TimelineEvent {
                tick: 7,
                description: String::from("storm hit"),
            },
        ];
        let blocks = timeline_blocks(&events);
        let lines: Vec<String> = blocks.iter().map(Block::to_text).collect();
        assert_eq!(lines, vec!["[7] storm hit", "[5] founded"]);
        // Input order is preserved.
        assert_eq!(events.first().map(|e| e.tick), Some(5));
    }

    #[test]
    fn timeline_of_non_array_fails() {
        let doc = json!({"timeline": "none"});
        let err = timeline(&doc).unwrap_err();
        assert_eq!(err.section(), Section::Timeline);
    }

    #[test]
    fn non_object_document_reports_missing_fields() {
        let doc = json!([1, 2, 3]);
        assert!(matches!(
            tribes(&doc),
            Err(RenderError::MissingField { .. })
        ));
    }
}
