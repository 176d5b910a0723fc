//=========================================================================
// Event Inbox
//=========================================================================
//
// Observer that buffers delivered events until its owner drains them.
//
// Decouples event arrival (during `publish`, whenever input is processed)
// from event application (once per frame, in the owner's `update`).
//
//   EventBus::publish → EventInbox::notify → channel → drain() in update
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::trace;

//=== Internal Dependencies ===============================================

use super::bus::Observer;
use super::event::Event;

//=== EventInbox ==========================================================

/// Unbounded FIFO of events received from the bus.
///
/// Both channel ends live in the inbox, so sending cannot fail while the
/// inbox exists, and nothing is ever dropped.
pub struct EventInbox {
    sender: Sender<Event>,
    receiver: Receiver<Event>,
}

impl EventInbox {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Yields all buffered events in arrival order, emptying the inbox.
    pub fn drain(&self) -> impl Iterator<Item = Event> + '_ {
        self.receiver.try_iter()
    }

    /// Number of events waiting to be drained.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for EventInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for EventInbox {
    fn notify(&self, event: Event) {
        let sent = self.sender.send(event).is_ok();
        assert!(sent, "Event inbox receiver dropped while the inbox is alive");
        trace!("Inbox queued {:?} ({} waiting)", event, self.receiver.len());
    }
}

//=========================================================================
// Tests
//=========================================================================
