// ABOUTME: Notification context for dependency injection of completion events
// ABOUTME: Optional broadcast channel; publishing without subscribers is not an error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

use crate::models::CompletionEvent;
use tokio::sync::broadcast;
use tracing::debug;

/// Notification context carrying the completion event channel
///
/// Completion events are fire-and-forget: the engine publishes after a
/// successful state change and continues regardless of delivery. A context
/// built with [`NotificationContext::disabled`] drops events silently.
///
/// # Lifecycle
/// Consumers call [`NotificationContext::subscribe`] when they are created
/// and unsubscribe by dropping the receiver; the channel itself lives as long
/// as the context that owns the sender.
#[derive(Clone)]
pub struct NotificationContext {
    completion_sender: Option<broadcast::Sender<CompletionEvent>>,
}

impl NotificationContext {
    /// Create new notification context
    #[must_use]
    pub const fn new(completion_sender: Option<broadcast::Sender<CompletionEvent>>) -> Self {
        Self { completion_sender }
    }

    /// Create a context with a fresh channel of the given capacity
    #[must_use]
    pub fn with_channel(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            completion_sender: Some(sender),
        }
    }

    /// Create a context that drops all events
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            completion_sender: None,
        }
    }

    /// Subscribe to completion events, if the channel is enabled
    #[must_use]
    pub fn subscribe(&self) -> Option<broadcast::Receiver<CompletionEvent>> {
        self.completion_sender
            .as_ref()
            .map(broadcast::Sender::subscribe)
    }

    /// Publish a completion event, fire-and-forget
    ///
    /// A missing channel or zero subscribers is expected operation, logged at
    /// debug level only.
    pub fn publish(&self, event: CompletionEvent) {
        match &self.completion_sender {
            Some(sender) => {
                if let Err(err) = sender.send(event) {
                    debug!("No completion event subscribers: {err}");
                }
            }
            None => debug!("Completion events disabled, dropping event"),
        }
    }
}

impl Default for NotificationContext {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityKind;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample_event() -> CompletionEvent {
        CompletionEvent {
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            kind: ActivityKind::Video,
            content_id: Some("vid-1".into()),
            task_id: "task-1".into(),
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let context = NotificationContext::with_channel(8);
        let mut receiver = context.subscribe().unwrap();

        let event = sample_event();
        context.publish(event.clone());

        let received = receiver.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let context = NotificationContext::with_channel(8);
        context.publish(sample_event());
    }

    #[test]
    fn test_disabled_context_has_no_receiver() {
        let context = NotificationContext::disabled();
        assert!(context.subscribe().is_none());
        context.publish(sample_event());
    }
}
