//! The renderer: snapshot document in, regions out.
//!
//! [`Renderer::render`] runs all four sections against the same document.
//! Sections are independent: each one is staged in full before its region
//! is cleared and repopulated, and a section that fails leaves its region
//! exactly as it was. The target's `commit` hook runs once per pass.

use serde_json::Value;
use tracing::{debug, warn};
use tribewatch_types::Snapshot;

use crate::error::RenderError;
use crate::sections;
use crate::target::{Block, Region, RenderTarget, Slot};

/// Owns a [`RenderTarget`] and regenerates it from snapshots.
#[derive(Debug)]
pub struct Renderer<T> {
    target: T,
}

impl<T: RenderTarget> Renderer<T> {
    /// Create a renderer that exclusively owns `target`.
    pub const fn new(target: T) -> Self {
        Self { target }
    }

    /// Read-only access to the target, for inspection.
    pub const fn target(&self) -> &T {
        &self.target
    }

    /// Give the target back.
    pub fn into_target(self) -> T {
        self.target
    }

    /// Render a snapshot document into the target.
    ///
    /// Every section is attempted. Sections that succeed replace their
    /// region; sections that fail keep the previous content.
    ///
    /// # Errors
    ///
    /// Returns the first [`RenderError`] encountered, in section order
    /// (status, tribes, agents, timeline), after all sections have run.
    pub fn render(&mut self, snapshot: &Value) -> Result<(), RenderError> {
        let mut first_error: Option<RenderError> = None;

        match sections::status(snapshot) {
            Ok(status) => {
                self.target.set_text(Slot::Tick, status.tick);
                self.target.set_text(Slot::Weather, status.weather);
            }
            Err(e) => record(&mut first_error, e),
        }

        let staged = [
            (Region::Tribes, sections::tribes(snapshot)),
            (Region::Agents, sections::agents(snapshot)),
            (Region::Timeline, sections::timeline(snapshot)),
        ];
        for (region, blocks) in staged {
            match blocks {
                Ok(blocks) => self.replace(region, blocks),
                Err(e) => record(&mut first_error, e),
            }
        }

        self.target.commit();

        first_error.map_or(Ok(()), Err)
    }

    /// Render an already-decoded snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if a numeric field is not finite, or if
    /// the snapshot cannot be re-encoded for rendering.
    pub fn render_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), RenderError> {
        let doc = serde_json::to_value(snapshot).map_err(|source| RenderError::InvalidField {
            section: crate::error::Section::Status,
            field: String::from("snapshot"),
            source,
        })?;
        self.render(&doc)
    }

    fn replace(&mut self, region: Region, blocks: Vec<Block>) {
        debug!(region = region.id(), count = blocks.len(), "region rendered");
        self.target.clear(region);
        for block in blocks {
            self.target.append(region, block);
        }
    }
}

/// Keep the first error, log the rest.
fn record(first: &mut Option<RenderError>, error: RenderError) {
    warn!(section = %error.section(), error = %error, "section kept previous content");
    if first.is_none() {
        *first = Some(error);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::document::ViewDocument;
    use crate::error::Section;

    #[derive(Default)]
    struct CallLog {
        calls: Vec<String>,
    }

    impl RenderTarget for CallLog {
        fn set_text(&mut self, slot: Slot, text: String) {
            self.calls.push(format!("set {} {text}", slot.id()));
        }
        fn clear(&mut self, region: Region) {
            self.calls.push(format!("clear {}", region.id()));
        }
        fn append(&mut self, region: Region, _block: Block) {
            self.calls.push(format!("append {}", region.id()));
        }
        fn commit(&mut self) {
            self.calls.push(String::from("commit"));
        }
    }

    fn sample() -> Value {
        json!({
            "tick": 2,
            "weather": {"name": "Clear", "food_modifier": 1.0},
            "tribes": [],
            "agents": [],
            "timeline": [{"tick": 1, "description": "a"}, {"tick": 2, "description": "b"}]
        })
    }

    #[test]
    fn each_region_is_cleared_before_appending() {
        let mut renderer = Renderer::new(CallLog::default());
        renderer.render(&sample()).unwrap();
        assert_eq!(
            renderer.target().calls,
            vec![
                "set tick 2",
                "set weather Clear (x1.0)",
                "clear tribes",
                "clear agents",
                "clear timeline",
                "append timeline",
                "append timeline",
                "commit",
            ]
        );
    }

    #[test]
    fn failing_section_does_not_clear_its_region() {
        let mut doc = sample();
        doc["agents"] = json!("broken");
        let mut renderer = Renderer::new(CallLog::default());
        let err = renderer.render(&doc).unwrap_err();
        assert_eq!(err.section(), Section::Agents);
        assert!(!renderer.target().calls.iter().any(|c| c == "clear agents"));
        assert!(renderer.target().calls.iter().any(|c| c == "clear timeline"));
    }

    #[test]
    fn first_error_wins_in_section_order() {
        let mut renderer = Renderer::new(ViewDocument::new());
        let err = renderer.render(&json!({})).unwrap_err();
        assert_eq!(err.section(), Section::Status);
        assert_eq!(renderer.target().revision(), 1);
    }

    #[test]
    fn typed_snapshot_renders_like_document() {
        let snapshot: Snapshot = serde_json::from_value(sample()).unwrap();
        let mut typed = Renderer::new(ViewDocument::new());
        typed.render_snapshot(&snapshot).unwrap();
        let mut raw = Renderer::new(ViewDocument::new());
        raw.render(&sample()).unwrap();
        assert_eq!(typed.into_target(), raw.into_target());
    }
}
