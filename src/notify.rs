use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::model::{Event, ResourceId};

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub for per-resource change notifications.
///
/// Day views subscribe to a resource and re-render its occupancy whenever an
/// event arrives.
#[derive(Debug, Default)]
pub struct NotifyHub {
    channels: DashMap<ResourceId, broadcast::Sender<Event>>,
}

impl NotifyHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to notifications for a resource. Creates the channel if needed.
    pub fn subscribe(&self, resource_id: &str) -> broadcast::Receiver<Event> {
        self.channels
            .entry(resource_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Send a notification. No-op if nobody is listening.
    pub fn send(&self, resource_id: &str, event: &Event) {
        if let Some(sender) = self.channels.get(resource_id) {
            let _ = sender.send(event.clone());
        }
    }

    /// Drop a resource's channel; open receivers see it close.
    pub fn remove(&self, resource_id: &str) {
        self.channels.remove(resource_id);
    }
}
