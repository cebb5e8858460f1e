//! Notifications produced for the host UI layer.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::MediaItemId;

/// What kind of media a change event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaClassification {
    Web,
}

/// Lifecycle phase of a display session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaPhase {
    /// Navigation has been requested; content is not yet visible.
    Starting,
    /// Content finished loading and the reveal fade completed.
    Started,
    /// Hide was requested; the surface is fading out.
    Stopping,
    /// Fade-out completed and the surface is hidden.
    Stopped,
}

/// High-level media lifecycle notification. Produced transiently per
/// transition, consumed by the host UI, never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaChangeEvent {
    pub item_id: MediaItemId,
    pub classification: MediaClassification,
    pub phase: MediaPhase,
}

/// Transient status text for a loading indicator. An empty description
/// clears the indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DisplayEvent {
    Media(MediaChangeEvent),
    Progress(ProgressEvent),
}

/// Fire-and-forget broadcast bus for display notifications.
///
/// Zero-or-many subscribers; publishing never blocks and is not
/// acknowledged. Dropped receivers simply stop seeing events.
#[derive(Clone)]
pub struct DisplayEventBus {
    sender: broadcast::Sender<DisplayEvent>,
}

impl DisplayEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DisplayEvent> {
        self.sender.subscribe()
    }

    /// Publish an event, returning the number of subscribers that saw it.
    pub fn publish(&self, event: DisplayEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn publish_media(
        &self,
        item_id: MediaItemId,
        classification: MediaClassification,
        phase: MediaPhase,
    ) -> usize {
        self.publish(DisplayEvent::Media(MediaChangeEvent {
            item_id,
            classification,
            phase,
        }))
    }

    pub fn publish_progress(&self, description: impl Into<String>) -> usize {
        self.publish(DisplayEvent::Progress(ProgressEvent {
            description: description.into(),
        }))
    }
}

impl Default for DisplayEventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_media() {
        let bus = DisplayEventBus::new(16);
        let mut rx = bus.subscribe();
        let item = MediaItemId::new();

        bus.publish_media(item.clone(), MediaClassification::Web, MediaPhase::Starting);

        let event = rx.recv().await.unwrap();
        match event {
            DisplayEvent::Media(m) => {
                assert_eq!(m.item_id, item);
                assert_eq!(m.classification, MediaClassification::Web);
                assert_eq!(m.phase, MediaPhase::Starting);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn publish_and_receive_progress() {
        let bus = DisplayEventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish_progress("Loading...");

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event,
            DisplayEvent::Progress(ProgressEvent { ref description }) if description == "Loading..."
        ));
    }

    #[tokio::test]
    async fn multiple_subscribers_see_every_event() {
        let bus = DisplayEventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish_progress("");

        assert!(matches!(rx1.recv().await.unwrap(), DisplayEvent::Progress(_)));
        assert!(matches!(rx2.recv().await.unwrap(), DisplayEvent::Progress(_)));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = DisplayEventBus::new(16);
        assert_eq!(bus.publish_progress("nobody listening"), 0);
    }

    #[tokio::test]
    async fn publish_returns_subscriber_count() {
        let bus = DisplayEventBus::new(16);
        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();

        let count = bus.publish_progress("two listeners");
        assert_eq!(count, 2);
    }

    #[test]
    fn media_event_serializes() {
        let event = DisplayEvent::Media(MediaChangeEvent {
            item_id: MediaItemId::new(),
            classification: MediaClassification::Web,
            phase: MediaPhase::Started,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("Started"));

        let back: DisplayEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, DisplayEvent::Media(m) if m.phase == MediaPhase::Started));
    }
}
