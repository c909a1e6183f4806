//! Change notifications for the rendering layer.

use crate::pages::PageId;
use crate::store::InstanceId;
use kurbo::Point;
use std::sync::mpsc::{Receiver, Sender, channel};

/// A change to canvas state. Receivers re-query the projection.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    PageAdded(PageId),
    /// A page and every instance on it were removed.
    PageRemoved {
        page: PageId,
        removed_instances: Vec<InstanceId>,
    },
    ActivePageChanged(Option<PageId>),
    InstanceAdded(InstanceId),
    InstanceRemoved(InstanceId),
    InstanceMoved { id: InstanceId, position: Point },
    InstanceRotated { id: InstanceId, degrees: u16 },
    DragStarted(InstanceId),
    DragEnded(InstanceId),
}

impl CanvasEvent {
    /// Whether the event can change what the given page shows.
    ///
    /// Instance-level events carry no page, so they always count.
    pub fn affects_page(&self, page: Option<PageId>) -> bool {
        match self {
            CanvasEvent::PageAdded(_) => false,
            CanvasEvent::PageRemoved { page: removed, .. } => Some(*removed) == page,
            CanvasEvent::DragStarted(_) | CanvasEvent::DragEnded(_) => false,
            _ => true,
        }
    }
}

/// Fan-out of canvas events to channel subscribers.
#[derive(Debug, Default)]
pub struct EventSignal {
    subscribers: Vec<Sender<CanvasEvent>>,
}

impl EventSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> Receiver<CanvasEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver an event, dropping subscribers whose receiver is gone.
    pub fn emit(&mut self, event: CanvasEvent) {
        log::debug!("Canvas event: {:?}", event);
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
