//! Fan-out registry for low-stock alert subscribers.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use stockroom_tonic_core::proto::StockAlert;
use tokio::sync::mpsc::{self, error::TrySendError};
use tonic::Status;

/// Item delivered over a subscriber's channel.
pub type AlertResult = Result<StockAlert, Status>;

/// Registry of live alert subscribers.
///
/// Each subscriber owns one bounded channel. [`publish`] copies the current
/// registry and attempts a non-blocking delivery to every entry, so a full
/// or closed channel affects only that subscriber and never the mutation
/// path. Entries leave the registry only through [`unsubscribe`] (or
/// [`close_all`] at shutdown) — delivery failure does not evict.
///
/// The registry lock is independent of the product store's lock; publishing
/// never holds both.
///
/// [`publish`]: AlertBroadcaster::publish
/// [`unsubscribe`]: AlertBroadcaster::unsubscribe
/// [`close_all`]: AlertBroadcaster::close_all
#[derive(Debug)]
pub struct AlertBroadcaster {
    subscribers: Mutex<HashMap<u64, mpsc::Sender<AlertResult>>>,
    next_token: AtomicU64,
    buffer_size: usize,
}

impl AlertBroadcaster {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            next_token: AtomicU64::new(0),
            buffer_size,
        }
    }

    /// Registers a new subscriber, returning its token and the receiving end
    /// of its alert channel.
    pub fn subscribe(&self) -> (u64, mpsc::Receiver<AlertResult>) {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.subscribers.lock().insert(token, tx);
        (token, rx)
    }

    /// Removes a subscriber. Idempotent: unknown tokens are ignored.
    pub fn unsubscribe(&self, token: u64) {
        self.subscribers.lock().remove(&token);
    }

    /// Delivers `alert` to every currently registered subscriber.
    ///
    /// Deliveries are attempted independently against a snapshot of the
    /// registry. A subscriber whose channel is full or closed is skipped
    /// with a log line; the rest still receive the alert and the caller
    /// never waits on delivery.
    pub fn publish(&self, alert: StockAlert) {
        let subscribers: Vec<(u64, mpsc::Sender<AlertResult>)> = {
            let guard = self.subscribers.lock();
            guard.iter().map(|(token, tx)| (*token, tx.clone())).collect()
        };

        for (token, tx) in subscribers {
            match tx.try_send(Ok(alert.clone())) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(token, "subscriber channel full, dropping alert");
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(token, "subscriber channel closed, skipping");
                }
            }
        }
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Drops every subscriber channel, ending all open alert streams.
    ///
    /// Called on graceful shutdown so parked streaming calls terminate
    /// instead of outliving the listener.
    pub fn close_all(&self) {
        self.subscribers.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom::Product;
    use stockroom_tonic_core::types::low_stock_alert;

    fn alert(quantity: i64) -> StockAlert {
        low_stock_alert(Product {
            id: 1,
            name: "Widget".into(),
            quantity,
        })
    }

    #[tokio::test]
    async fn publish_reaches_every_subscriber() {
        let broadcaster = AlertBroadcaster::new(8);
        let (_, mut rx_a) = broadcaster.subscribe();
        let (_, mut rx_b) = broadcaster.subscribe();

        broadcaster.publish(alert(3));

        assert_eq!(rx_a.recv().await.unwrap().unwrap().message, alert(3).message);
        assert_eq!(rx_b.recv().await.unwrap().unwrap().message, alert(3).message);
    }

    #[tokio::test]
    async fn unsubscribed_token_receives_nothing() {
        let broadcaster = AlertBroadcaster::new(8);
        let (token, mut rx) = broadcaster.subscribe();

        broadcaster.unsubscribe(token);
        broadcaster.publish(alert(3));

        // Sender side is gone, so the channel reports closed rather than
        // ever yielding the alert.
        assert!(rx.recv().await.is_none());
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let broadcaster = AlertBroadcaster::new(8);
        let (token, _rx) = broadcaster.subscribe();
        broadcaster.unsubscribe(token);
        broadcaster.unsubscribe(token);
        broadcaster.unsubscribe(9999);
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn full_channel_drops_for_that_subscriber_only() {
        let broadcaster = AlertBroadcaster::new(1);
        let (_, mut slow_rx) = broadcaster.subscribe();
        let (_, mut fast_rx) = broadcaster.subscribe();

        broadcaster.publish(alert(4));
        // The fast subscriber keeps up; the slow one never drains.
        assert_eq!(fast_rx.recv().await.unwrap().unwrap().message, alert(4).message);
        broadcaster.publish(alert(3)); // slow_rx's buffer of 1 is still full
        assert_eq!(fast_rx.recv().await.unwrap().unwrap().message, alert(3).message);

        // The slow subscriber kept only the first alert, and stays
        // registered despite the drop.
        assert_eq!(slow_rx.recv().await.unwrap().unwrap().message, alert(4).message);
        assert!(slow_rx.try_recv().is_err());
        assert_eq!(broadcaster.subscriber_count(), 2);
    }

    #[tokio::test]
    async fn closed_receiver_is_skipped_but_not_evicted() {
        let broadcaster = AlertBroadcaster::new(8);
        let (_, rx) = broadcaster.subscribe();
        drop(rx);

        broadcaster.publish(alert(3));
        assert_eq!(broadcaster.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn alerts_arrive_in_publish_order() {
        let broadcaster = AlertBroadcaster::new(8);
        let (_, mut rx) = broadcaster.subscribe();

        for quantity in [4, 3, 2] {
            broadcaster.publish(alert(quantity));
        }
        for quantity in [4, 3, 2] {
            let received = rx.recv().await.unwrap().unwrap();
            assert_eq!(received.product.unwrap().quantity, quantity);
        }
    }

    #[tokio::test]
    async fn close_all_ends_streams() {
        let broadcaster = AlertBroadcaster::new(8);
        let (_, mut rx) = broadcaster.subscribe();
        broadcaster.close_all();
        assert!(rx.recv().await.is_none());
        assert_eq!(broadcaster.subscriber_count(), 0);
    }
}
