//=========================================================================
// Event Bus
//=========================================================================
//
// Synchronous publish/subscribe router keyed by event kind.
//
// Architecture:
//   Producers → publish(event) → HashMap<EventKind, Vec<Rc<dyn Observer>>>
//                                        ↓ (snapshot)
//                    observer.notify(event), in subscription order
//
// Delivery happens on the calling thread, during the call. The subscriber
// list for a kind is snapshotted when `publish` starts: subscribe and
// unsubscribe calls made from inside `notify` take effect from the next
// publish, and never disturb the delivery in progress.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::event::{Event, EventKind};

//=== Observer ============================================================

/// Receives events from the bus.
///
/// Takes `&self`: observers are shared (`Rc`) between the bus and their
/// owner, so any state they keep lives behind interior mutability or a
/// channel (see [`EventInbox`](super::EventInbox)).
pub trait Observer {
    fn notify(&self, event: Event);
}

//=== EventBus ============================================================

/// Routes events to observers subscribed to the event's kind.
///
/// Observers are identified by their `Rc` allocation: subscribing the same
/// `Rc` (or a clone of it) twice to one kind is a no-op.
///
/// All methods take `&self` so the bus can be handed to processes and
/// observers alongside other services. The bus is `!Sync` and meant to
/// live on the single frame thread.
pub struct EventBus {
    observers: RefCell<HashMap<EventKind, Vec<Rc<dyn Observer>>>>,
}

impl EventBus {
    /// Creates a bus with no subscriptions.
    pub fn new() -> Self {
        Self {
            observers: RefCell::new(HashMap::new()),
        }
    }

    //--- Subscriptions ----------------------------------------------------

    /// Subscribes `observer` to events of `kind`.
    ///
    /// Idempotent: an observer already subscribed to `kind` keeps its
    /// original position in the delivery order.
    pub fn subscribe<O: Observer + 'static>(&self, kind: EventKind, observer: &Rc<O>) {
        let observer: Rc<dyn Observer> = observer.clone();
        let mut observers = self.observers.borrow_mut();
        let list = observers.entry(kind).or_default();

        if list.iter().any(|existing| same_observer(existing, &observer)) {
            trace!("Observer already subscribed to {:?}", kind);
            return;
        }

        list.push(observer);
        debug!("Observer subscribed to {:?} ({} total)", kind, list.len());
    }

    /// Removes `observer` from `kind`. No-op if it was not subscribed.
    pub fn unsubscribe<O: Observer + 'static>(&self, kind: EventKind, observer: &Rc<O>) {
        let observer: Rc<dyn Observer> = observer.clone();
        if let Some(list) = self.observers.borrow_mut().get_mut(&kind) {
            list.retain(|existing| !same_observer(existing, &observer));
        }
    }

    /// Removes `observer` from every kind it is subscribed to.
    pub fn unsubscribe_all<O: Observer + 'static>(&self, observer: &Rc<O>) {
        let observer: Rc<dyn Observer> = observer.clone();
        for list in self.observers.borrow_mut().values_mut() {
            list.retain(|existing| !same_observer(existing, &observer));
        }
    }

    //--- Delivery ---------------------------------------------------------

    /// Delivers `event` to every observer currently subscribed to its kind.
    ///
    /// Kinds nobody subscribed to are silently dropped.
    pub fn publish(&self, event: Event) {
        let kind = event.kind();

        // Release the borrow before notifying so observers may re-enter.
        let snapshot: Vec<Rc<dyn Observer>> = match self.observers.borrow().get(&kind) {
            Some(list) if !list.is_empty() => list.clone(),
            _ => return,
        };

        trace!("Publishing {:?} to {} observer(s)", event, snapshot.len());

        for observer in &snapshot {
            observer.notify(event);
        }
    }

    //--- Query API --------------------------------------------------------

    /// Returns the number of observers subscribed to `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.observers
            .borrow()
            .get(&kind)
            .map(|list| list.len())
            .unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

//--- Internal Helpers ----------------------------------------------------

/// Identity comparison on the shared allocation (ignores vtables).
fn same_observer(a: &Rc<dyn Observer>, b: &Rc<dyn Observer>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

//=========================================================================
// Tests
//=========================================================================
