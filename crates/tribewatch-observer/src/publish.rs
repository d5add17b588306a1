//! Render target that publishes finished views.
//!
//! The renderer owns its target exclusively, so the dashboard cannot read
//! the document directly. [`PublishingDocument`] renders into a private
//! [`ViewDocument`] and, on every commit, publishes a copy through a
//! [`tokio::sync::watch`] channel. Readers always see a complete pass.

use tokio::sync::watch;
use tribewatch_render::{Block, Region, RenderTarget, Slot, ViewDocument};

/// A [`ViewDocument`] that broadcasts itself after each render pass.
#[derive(Debug)]
pub struct PublishingDocument {
    document: ViewDocument,
    tx: watch::Sender<ViewDocument>,
}

impl PublishingDocument {
    /// Create a blank document and a receiver for its published views.
    pub fn new() -> (Self, watch::Receiver<ViewDocument>) {
        let (tx, rx) = watch::channel(ViewDocument::new());
        (
            Self {
                document: ViewDocument::new(),
                tx,
            },
            rx,
        )
    }

    /// Subscribe another reader.
    pub fn subscribe(&self) -> watch::Receiver<ViewDocument> {
        self.tx.subscribe()
    }

    /// The working document (may be mid-pass while a render runs).
    pub const fn document(&self) -> &ViewDocument {
        &self.document
    }
}

impl RenderTarget for PublishingDocument {
    fn set_text(&mut self, slot: Slot, text: String) {
        self.document.set_text(slot, text);
    }

    fn clear(&mut self, region: Region) {
        self.document.clear(region);
    }

    fn append(&mut self, region: Region, block: Block) {
        self.document.append(region, block);
    }

    fn commit(&mut self) {
        self.document.commit();
        // Succeeds with or without receivers.
        self.tx.send_replace(self.document.clone());
    }
}
