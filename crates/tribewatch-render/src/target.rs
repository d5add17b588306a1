//! The write-only surface the renderer draws into.
//!
//! A host exposes two single-text slots ([`Slot::Tick`], [`Slot::Weather`])
//! and three block containers ([`Region::Tribes`], [`Region::Agents`],
//! [`Region::Timeline`]). The renderer only ever creates, clears, and
//! appends; it never reads back from a target.

use serde::Serialize;

/// A fixed single-element text target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// The current tick counter.
    Tick,
    /// The formatted weather summary.
    Weather,
}

impl Slot {
    /// Stable identifier of the slot in a host page.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Tick => "tick",
            Self::Weather => "weather",
        }
    }
}

/// A container of rendered blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// One block per tribe.
    Tribes,
    /// One block per agent.
    Agents,
    /// One line per timeline event, most recent first.
    Timeline,
}

impl Region {
    /// All block regions in display order.
    pub const ALL: [Self; 3] = [Self::Tribes, Self::Agents, Self::Timeline];

    /// Stable identifier of the region in a host page.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Tribes => "tribes",
            Self::Agents => "agents",
            Self::Timeline => "timeline",
        }
    }
}

/// One visual block appended to a [`Region`].
///
/// `class` is the style hook (`tribe`, `agent`, `timeline-item`), `title`
/// an optional heading, and `lines` the body text in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Style class of the block.
    pub class: String,
    /// Optional heading line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body lines.
    pub lines: Vec<String>,
}

impl Block {
    /// Create an empty block with the given style class.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            title: None,
            lines: Vec::new(),
        }
    }

    /// Set the heading.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a body line.
    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Plain-text rendition: the title (if any) followed by each line.
    pub fn to_text(&self) -> String {
        self.title
            .iter()
            .chain(self.lines.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A host surface the [`Renderer`](crate::Renderer) writes into.
///
/// Implementations are owned by exactly one renderer. `commit` is called
/// once at the end of every render pass, after all sections have been
/// written, and is the hook for publishing a finished view.
pub trait RenderTarget: Send {
    /// Overwrite the text of a single-element slot.
    fn set_text(&mut self, slot: Slot, text: String);

    /// Remove every block from a region.
    fn clear(&mut self, region: Region);

    /// Append a block at the end of a region.
    fn append(&mut self, region: Region, block: Block);

    /// Called after every render pass.
    fn commit(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_text_joins_title_and_lines() {
        let block = Block::new("tribe")
            .with_title("Ashfolk")
            .line("ID: 1")
            .line("Tech: None");
        assert_eq!(block.to_text(), "Ashfolk\nID: 1\nTech: None");
    }

    #[test]
    fn untitled_block_text_is_lines_only() {
        let block = Block::new("timeline-item").line("[5] founded");
        assert_eq!(block.to_text(), "[5] founded");
    }

    #[test]
    fn host_ids_are_stable() {
        assert_eq!(Slot::Tick.id(), "tick");
        assert_eq!(Slot::Weather.id(), "weather");
        let ids: Vec<&str> = Region::ALL.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["tribes", "agents", "timeline"]);
    }
}
