//! In-memory render target.
//!
//! [`ViewDocument`] holds exactly what a host page would display: the text
//! of the two slots and the ordered blocks of the three regions. It is
//! serializable so a dashboard can ship it as JSON.

use serde::Serialize;

use crate::target::{Block, Region, RenderTarget, Slot};

/// The rendered view, kept in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewDocument {
    tick: String,
    weather: String,
    tribes: Vec<Block>,
    agents: Vec<Block>,
    timeline: Vec<Block>,
    /// Number of completed render passes.
    revision: u64,
}

impl ViewDocument {
    /// Create an empty document (nothing rendered yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a slot.
    pub fn text(&self, slot: Slot) -> &str {
        match slot {
            Slot::Tick => &self.tick,
            Slot::Weather => &self.weather,
        }
    }

    /// Current blocks of a region, in display order.
    pub fn blocks(&self, region: Region) -> &[Block] {
        match region {
            Region::Tribes => &self.tribes,
            Region::Agents => &self.agents,
            Region::Timeline => &self.timeline,
        }
    }

    /// Plain-text rendition of every block in a region.
    pub fn region_text(&self, region: Region) -> Vec<String> {
        self.blocks(region).iter().map(Block::to_text).collect()
    }

    /// Number of completed render passes.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether nothing has been rendered yet.
    pub const fn is_blank(&self) -> bool {
        self.revision == 0
    }

    fn region_mut(&mut self, region: Region) -> &mut Vec<Block> {
        match region {
            Region::Tribes => &mut self.tribes,
            Region::Agents => &mut self.agents,
            Region::Timeline => &mut self.timeline,
        }
    }
}

impl RenderTarget for ViewDocument {
    fn set_text(&mut self, slot: Slot, text: String) {
        match slot {
            Slot::Tick => self.tick = text,
            Slot::Weather => self.weather = text,
        }
    }

    fn clear(&mut self, region: Region) {
        self.region_mut(region).clear();
    }

    fn append(&mut self, region: Region, block: Block) {
        self.region_mut(region).push(block);
    }

    fn commit(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
