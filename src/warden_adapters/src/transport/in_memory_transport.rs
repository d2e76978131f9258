use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use warden_core::{Delivery, DeliveryFuture, EventTransport, TransportError};

/// A record the transport accepted, with its assigned per-topic offset.
#[derive(Debug, Clone)]
pub struct SentRecord {
    pub topic: String,
    pub key: String,
    pub payload: String,
    pub offset: i64,
}

#[derive(Debug, Default)]
struct TransportInner {
    records: Mutex<Vec<SentRecord>>,
    offsets: Mutex<HashMap<String, i64>>,
    reject_sends: AtomicBool,
    fail_deliveries: AtomicBool,
}

/// In-process event transport for development and tests.
///
/// Accepted records land in an inspectable log with monotonically increasing
/// per-topic offsets; accepting in call order trivially preserves per-key
/// order. The two failure toggles exercise both halves of the error model:
/// `reject_sends` makes `send` fail synchronously, `fail_deliveries` accepts
/// the record but resolves its delivery future with an error. A production
/// deployment plugs a broker-backed implementation into the same port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventTransport {
    inner: Arc<TransportInner>,
}

impl InMemoryEventTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_sends(&self, reject: bool) {
        self.inner.reject_sends.store(reject, Ordering::Relaxed);
    }

    pub fn fail_deliveries(&self, fail: bool) {
        self.inner.fail_deliveries.store(fail, Ordering::Relaxed);
    }

    /// Every record accepted so far, in acceptance order.
    pub fn sent(&self) -> Vec<SentRecord> {
        self.inner
            .records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Accepted records for one topic, in acceptance order.
    pub fn sent_to(&self, topic: &str) -> Vec<SentRecord> {
        self.sent()
            .into_iter()
            .filter(|record| record.topic == topic)
            .collect()
    }
}

impl EventTransport for InMemoryEventTransport {
    fn send(
        &self,
        topic: &str,
        key: &str,
        payload: String,
    ) -> Result<DeliveryFuture, TransportError> {
        if self.inner.reject_sends.load(Ordering::Relaxed) {
            return Err(TransportError::Rejected(
                "transport unavailable".to_owned(),
            ));
        }

        let offset = {
            let mut offsets = self
                .inner
                .offsets
                .lock()
                .map_err(|_| TransportError::Rejected("offset table poisoned".to_owned()))?;
            let next = offsets.entry(topic.to_owned()).or_insert(0);
            let assigned = *next;
            *next += 1;
            assigned
        };

        self.inner
            .records
            .lock()
            .map_err(|_| TransportError::Rejected("record log poisoned".to_owned()))?
            .push(SentRecord {
                topic: topic.to_owned(),
                key: key.to_owned(),
                payload,
                offset,
            });

        let fail = self.inner.fail_deliveries.load(Ordering::Relaxed);
        Ok(Box::pin(async move {
            if fail {
                Err(TransportError::DeliveryFailed(
                    "synthetic delivery failure".to_owned(),
                ))
            } else {
                Ok(Delivery {
                    partition: 0,
                    offset,
                })
            }
        }))
    }
}
