//! Response stream for `StreamStockAlerts` with guaranteed unregistration.

use super::broadcaster::{AlertBroadcaster, AlertResult};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio_stream::Stream;
use tokio_stream::wrappers::ReceiverStream;

/// Unregisters its subscriber when dropped.
///
/// tonic drops the response stream when the client cancels or disconnects,
/// so tying unregistration to `Drop` covers every exit path, including
/// abnormal ones.
#[derive(Debug)]
struct SubscriptionGuard {
    broadcaster: Arc<AlertBroadcaster>,
    token: u64,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.broadcaster.unsubscribe(self.token);
        tracing::info!(token = self.token, "alert subscriber detached");
    }
}

/// One subscriber's view of the alert feed.
///
/// Yields alerts as the broadcaster publishes them; ends when the
/// broadcaster closes the channel at shutdown.
#[derive(Debug)]
pub struct AlertStream {
    inner: ReceiverStream<AlertResult>,
    _guard: SubscriptionGuard,
}

impl AlertStream {
    /// Registers a subscriber on `broadcaster` and returns its stream.
    pub fn register(broadcaster: Arc<AlertBroadcaster>) -> Self {
        let (token, rx) = broadcaster.subscribe();
        tracing::info!(token, "alert subscriber attached");
        Self {
            inner: ReceiverStream::new(rx),
            _guard: SubscriptionGuard { broadcaster, token },
        }
    }
}

impl Stream for AlertStream {
    type Item = AlertResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
