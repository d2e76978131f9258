use thiserror::Error;

use warden_core::{
    AdminCreatedEvent, DomainEvent, EventTransport, TransportError, UserCreatedEvent,
    UserRoleChangedEvent,
};

/// Topic names events are published to. Configuration-supplied; the defaults
/// match what downstream consumers subscribe to out of the box.
#[derive(Debug, Clone)]
pub struct EventTopics {
    pub user_events: String,
    pub admin_events: String,
}

impl Default for EventTopics {
    fn default() -> Self {
        Self {
            user_events: "user-events".to_owned(),
            admin_events: "admin-events".to_owned(),
        }
    }
}

/// A publish call failed before the transport accepted the record.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Topic cannot be empty")]
    EmptyTopic,
    #[error("Key cannot be empty")]
    EmptyKey,
    #[error("Failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Wrapping failure raised by the named publish operations so the triggering
/// business operation can react to a submission that never got off the
/// ground.
#[derive(Debug, Error)]
pub enum EventPublishError {
    #[error("Failed to publish user created event")]
    UserCreated(#[source] PublishError),
    #[error("Failed to publish admin created event")]
    AdminCreated(#[source] PublishError),
    #[error("Failed to publish user role changed event")]
    RoleChanged(#[source] PublishError),
}

/// Publishes domain events to the messaging transport.
///
/// Calls return as soon as the transport accepts the send request. The
/// delivery outcome is observed on a detached task and logged - never
/// retried, never surfaced to the original caller. Events are therefore
/// at-most-once: callers needing guaranteed delivery reconcile downstream.
#[derive(Clone)]
pub struct EventPublisher<T> {
    transport: T,
    topics: EventTopics,
}

impl<T> EventPublisher<T>
where
    T: EventTransport + 'static,
{
    pub fn new(transport: T, topics: EventTopics) -> Self {
        Self { transport, topics }
    }

    pub fn topics(&self) -> &EventTopics {
        &self.topics
    }

    pub fn publish_user_created(&self, event: &UserCreatedEvent) -> Result<(), EventPublishError> {
        tracing::info!(username = %event.username(), "publishing user created event");
        self.publish(
            &self.topics.user_events,
            &event.user_id().to_string(),
            event,
        )
        .map_err(|err| {
            tracing::error!(username = %event.username(), error = %err, "failed to publish user created event");
            EventPublishError::UserCreated(err)
        })
    }

    pub fn publish_admin_created(
        &self,
        event: &AdminCreatedEvent,
    ) -> Result<(), EventPublishError> {
        tracing::info!(
            username = %event.username(),
            created_by = %event.created_by(),
            "publishing admin created event"
        );
        self.publish(
            &self.topics.admin_events,
            &event.admin_id().to_string(),
            event,
        )
        .map_err(|err| {
            tracing::error!(username = %event.username(), error = %err, "failed to publish admin created event");
            EventPublishError::AdminCreated(err)
        })
    }

    pub fn publish_user_role_changed(
        &self,
        event: &UserRoleChangedEvent,
    ) -> Result<(), EventPublishError> {
        tracing::info!(
            username = %event.username(),
            previous_role = %event.previous_role(),
            new_role = %event.new_role(),
            changed_by = %event.changed_by(),
            "publishing user role changed event"
        );
        self.publish(
            &self.topics.user_events,
            &event.user_id().to_string(),
            event,
        )
        .map_err(|err| {
            tracing::error!(username = %event.username(), error = %err, "failed to publish user role changed event");
            EventPublishError::RoleChanged(err)
        })
    }

    /// Publish to an arbitrary topic/key, swallowing submission failures.
    ///
    /// Input validation still fails synchronously - an empty topic or key is
    /// a caller bug, not a transport hiccup. Everything past validation is
    /// logged and dropped: this entry point exists for call sites with no
    /// recovery action available anyway.
    pub fn publish_event_async<E>(
        &self,
        topic: &str,
        key: &str,
        event: &E,
    ) -> Result<(), PublishError>
    where
        E: DomainEvent,
    {
        validate_inputs(topic, key)?;

        if let Err(err) = self.submit(topic, key, event) {
            tracing::error!(topic, error = %err, "exception occurred while publishing async event");
        }
        Ok(())
    }

    /// Validate, serialize, and hand the event to the transport.
    fn publish<E>(&self, topic: &str, key: &str, event: &E) -> Result<(), PublishError>
    where
        E: DomainEvent,
    {
        validate_inputs(topic, key)?;
        self.submit(topic, key, event)
    }

    fn submit<E>(&self, topic: &str, key: &str, event: &E) -> Result<(), PublishError>
    where
        E: DomainEvent,
    {
        let payload = serde_json::to_string(event)?;
        let pending = self.transport.send(topic, key, payload)?;

        let event_type = event.event_type().to_owned();
        let topic = topic.to_owned();

        // Delivery completion is observed off the caller's task; failures
        // are logged and the record is gone.
        tokio::spawn(async move {
            match pending.await {
                Ok(delivery) => tracing::debug!(
                    %topic,
                    %event_type,
                    offset = delivery.offset,
                    "successfully published event"
                ),
                Err(err) => tracing::error!(
                    %topic,
                    %event_type,
                    error = %err,
                    "failed to publish event"
                ),
            }
        });

        Ok(())
    }
}

fn validate_inputs(topic: &str, key: &str) -> Result<(), PublishError> {
    if topic.trim().is_empty() {
        return Err(PublishError::EmptyTopic);
    }
    if key.trim().is_empty() {
        return Err(PublishError::EmptyKey);
    }
    Ok(())
}
