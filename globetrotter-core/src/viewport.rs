//! Window width as an observable value.
//!
//! Observers get a [`ResizeSubscription`] handle. Dropping (or releasing) the handle
//! unregisters it, after which the viewport holds nothing for it and no further widths
//! can be read through it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

#[derive(Debug, Default)]
struct Observers {
    next_id: AtomicU64,
    senders: Mutex<HashMap<u64, UnboundedSender<u32>>>,
}

/// Current viewport width plus the set of live resize observers
#[derive(Debug, Clone)]
pub struct Viewport {
    width: Arc<AtomicU32>,
    observers: Arc<Observers>,
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self {
            width: Arc::new(AtomicU32::new(width)),
            observers: Arc::new(Observers::default()),
        }
    }

    pub fn width(&self) -> u32 {
        self.width.load(Ordering::Relaxed)
    }

    /// Record a new width and notify every live observer
    pub fn set_width(&self, width: u32) {
        let previous = self.width.swap(width, Ordering::Relaxed);
        if previous == width {
            return;
        }
        log::trace!("Viewport resized {} -> {}", previous, width);

        let Ok(mut senders) = self.observers.senders.lock() else {
            log::error!("Viewport observer registry poisoned, dropping resize to {}", width);
            return;
        };
        // Receivers that went away without unregistering are pruned here
        senders.retain(|_, sender| sender.send(width).is_ok());
    }

    /// Start observing width changes; the returned handle must be kept alive
    pub fn subscribe(&self) -> ResizeSubscription {
        let id = self.observers.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = unbounded_channel();
        if let Ok(mut senders) = self.observers.senders.lock() {
            senders.insert(id, tx);
        }
        log::debug!("Resize observer {} registered", id);

        ResizeSubscription {
            id,
            receiver: Some(rx),
            observers: Arc::clone(&self.observers),
        }
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers
            .senders
            .lock()
            .map(|senders| senders.len())
            .unwrap_or(0)
    }
}

/// Scoped registration on a [`Viewport`], released on drop
#[derive(Debug)]
pub struct ResizeSubscription {
    id: u64,
    receiver: Option<UnboundedReceiver<u32>>,
    observers: Arc<Observers>,
}

impl ResizeSubscription {
    /// Latest pending width, if any arrived since the last call (non-blocking)
    pub fn try_latest(&mut self) -> Option<u32> {
        let receiver = self.receiver.as_mut()?;
        let mut latest = None;
        while let Ok(width) = receiver.try_recv() {
            latest = Some(width);
        }
        latest
    }

    pub fn is_active(&self) -> bool {
        self.receiver.is_some()
    }

    /// Unregister now instead of waiting for drop; calling it again is a no-op
    pub fn release(&mut self) {
        if let Some(mut receiver) = self.receiver.take() {
            receiver.close();
            if let Ok(mut senders) = self.observers.senders.lock() {
                senders.remove(&self.id);
            }
            log::debug!("Resize observer {} released", self.id);
        }
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_width_wins() {
        let viewport = Viewport::new(800);
        let mut subscription = viewport.subscribe();
        assert_eq!(subscription.try_latest(), None);

        viewport.set_width(1000);
        viewport.set_width(1400);
        assert_eq!(subscription.try_latest(), Some(1400));
        assert_eq!(subscription.try_latest(), None);
        assert_eq!(viewport.width(), 1400);
    }

    #[test]
    fn test_unchanged_width_is_not_broadcast() {
        let viewport = Viewport::new(800);
        let mut subscription = viewport.subscribe();
        viewport.set_width(800);
        assert_eq!(subscription.try_latest(), None);
    }

    #[test]
    fn test_drop_unregisters() {
        let viewport = Viewport::new(800);
        {
            let _first = viewport.subscribe();
            let _second = viewport.subscribe();
            assert_eq!(viewport.observer_count(), 2);
        }
        assert_eq!(viewport.observer_count(), 0);
        // Nothing left to notify
        viewport.set_width(1200);
    }

    #[test]
    fn test_release_stops_delivery() {
        let viewport = Viewport::new(800);
        let mut subscription = viewport.subscribe();
        subscription.release();
        assert!(!subscription.is_active());
        assert_eq!(viewport.observer_count(), 0);

        viewport.set_width(1600);
        assert_eq!(subscription.try_latest(), None);

        subscription.release();
        assert_eq!(viewport.observer_count(), 0);
    }

    #[test]
    fn test_clones_share_observers() {
        let viewport = Viewport::new(800);
        let handle = viewport.clone();
        let mut subscription = viewport.subscribe();
        handle.set_width(720);
        assert_eq!(subscription.try_latest(), Some(720));
        assert_eq!(viewport.width(), 720);
    }
}
