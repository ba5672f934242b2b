use super::models::{Format, ImageData};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub type SubscriptionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    Changed,
    SelectionChanged,
}

/// The editing engine the slash menu drives. Offsets are character offsets
/// into the document text with lines joined by a single `'\n'`.
pub trait DocumentEngine {
    /// Up to `max_chars` characters of text ending at the caret.
    fn text_before_caret(&self, max_chars: usize) -> String;

    fn caret(&self) -> usize;
    fn set_caret(&mut self, offset: usize);

    /// Deletes `[start, end)`. Empty or inverted ranges are ignored.
    fn delete_range(&mut self, start: usize, end: usize);

    fn apply_format(&mut self, format: Format);
    fn insert_image(&mut self, image: &ImageData);

    fn subscribe(&self) -> Subscription;
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

#[derive(Default)]
struct ListenerTable {
    next_id: SubscriptionId,
    senders: Vec<(SubscriptionId, UnboundedSender<DocumentEvent>)>,
}

/// Listener registry owned by an engine. Events are queued per subscriber
/// and drained on the UI thread by whoever holds the [`Subscription`].
#[derive(Default)]
pub struct Listeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl Listeners {
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = unbounded_channel();
        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        table.senders.push((id, tx));
        Subscription {
            id,
            rx,
            table: Rc::downgrade(&self.table),
        }
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        remove_listener(&self.table, id)
    }

    pub fn notify(&self, event: DocumentEvent) {
        self.table
            .borrow_mut()
            .senders
            .retain(|(_, tx)| tx.send(event).is_ok());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.borrow().senders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn remove_listener(table: &RefCell<ListenerTable>, id: SubscriptionId) -> bool {
    let mut table = table.borrow_mut();
    let before = table.senders.len();
    table.senders.retain(|(sid, _)| *sid != id);
    table.senders.len() != before
}

/// Registration handle. Dropping it deregisters the listener.
pub struct Subscription {
    id: SubscriptionId,
    rx: UnboundedReceiver<DocumentEvent>,
    table: Weak<RefCell<ListenerTable>>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Drains every queued event without blocking.
    pub fn drain(&mut self) -> Vec<DocumentEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            remove_listener(&table, self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_reach_every_subscriber() {
        let listeners = Listeners::default();
        let mut a = listeners.subscribe();
        let mut b = listeners.subscribe();

        listeners.notify(DocumentEvent::Changed);
        listeners.notify(DocumentEvent::SelectionChanged);

        assert_eq!(
            a.drain(),
            vec![DocumentEvent::Changed, DocumentEvent::SelectionChanged]
        );
        assert_eq!(b.drain().len(), 2);
        assert!(a.drain().is_empty());
    }

    #[test]
    fn test_drop_deregisters() {
        let listeners = Listeners::default();
        let sub = listeners.subscribe();
        let _other = listeners.subscribe();
        assert_eq!(listeners.len(), 2);

        drop(sub);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let listeners = Listeners::default();
        let mut sub = listeners.subscribe();
        assert!(listeners.unsubscribe(sub.id()));
        assert!(!listeners.unsubscribe(sub.id()));

        listeners.notify(DocumentEvent::Changed);
        assert!(sub.drain().is_empty());
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let listeners = Listeners::default();
        let sub = listeners.subscribe();
        drop(listeners);
        // Dropping after the engine is gone must not panic.
        drop(sub);
    }
}
