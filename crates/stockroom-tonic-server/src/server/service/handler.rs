//! gRPC service implementation for the inventory record store.
//!
//! This module defines [`InventoryService`], the concrete implementation of
//! the [`Inventory`] service from the protobuf specification. Each unary RPC
//! is a single-shot transition: validate, apply to the store, then — only on
//! success — rewrite the snapshot and conditionally publish a low-stock
//! alert. `StreamStockAlerts` is the one long-lived call: it registers a
//! subscriber and stays open until the client cancels.
//!
//! Persistence and alert delivery are best-effort observers of the store;
//! their failures are logged, never surfaced to the caller.

use crate::server::{
    alerts::{broadcaster::AlertBroadcaster, stream::AlertStream},
    config::ServerConfig,
};
use core::pin::Pin;
use std::sync::Arc;
use stockroom::{Product, ProductStore, SnapshotPersister};
use stockroom_tonic_core::{
    Error,
    proto::{
        AddProductRequest, GetProductRequest, ListProductsRequest, ListProductsResponse,
        RemoveProductRequest, RemoveProductResponse, StockAlert, StreamStockAlertsRequest,
        UpdateStockRequest, inventory_server::Inventory, Product as ProductMessage,
    },
    types::low_stock_alert,
};
use tokio_stream::Stream;
use tonic::{Request, Response, Status};
use tracing::{info, warn};

/// gRPC service over the shared product store.
///
/// Cloning is cheap: all state is behind `Arc`s, and tonic clones the
/// service per connection.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<ProductStore>,
    snapshots: Arc<SnapshotPersister>,
    alerts: Arc<AlertBroadcaster>,
    low_stock_threshold: i64,
}

impl InventoryService {
    /// Builds the service, restoring any prior snapshot from
    /// `config.snapshot_path`.
    pub fn new(config: &ServerConfig) -> Self {
        let snapshots = SnapshotPersister::new(&config.snapshot_path);
        let restored = snapshots.load();
        if !restored.is_empty() {
            info!(count = restored.len(), "restored products from snapshot");
        }

        Self {
            store: Arc::new(ProductStore::restore(restored)),
            snapshots: Arc::new(snapshots),
            alerts: Arc::new(AlertBroadcaster::new(config.alert_buffer_size)),
            low_stock_threshold: config.low_stock_threshold,
        }
    }

    /// Ends every open alert stream; called on graceful shutdown.
    pub fn shutdown(&self) {
        let subscribers = self.alerts.subscriber_count();
        if subscribers > 0 {
            info!(subscribers, "closing alert streams");
        }
        self.alerts.close_all();
    }

    /// Rewrites the snapshot after a successful mutation.
    ///
    /// Best-effort: a failure is logged and swallowed — the in-memory store
    /// stays authoritative, so the RPC that triggered the write still
    /// succeeds.
    fn persist(&self) {
        if let Err(e) = self.snapshots.save(&self.store.list()) {
            warn!(
                path = %self.snapshots.path().display(),
                error = %e,
                "failed to write snapshot"
            );
        }
    }

    /// Publishes a low-stock alert when `product` fell below the threshold.
    fn alert_if_low(&self, product: &Product) {
        if product.quantity < self.low_stock_threshold {
            self.alerts.publish(low_stock_alert(product.clone()));
        }
    }
}

#[tonic::async_trait]
impl Inventory for InventoryService {
    async fn add_product(
        &self,
        request: Request<AddProductRequest>,
    ) -> Result<Response<ProductMessage>, Status> {
        let req = request.into_inner();
        let product = self.store.add(&req.name, req.quantity).map_err(Error::from)?;
        self.persist();

        info!(product_id = product.id, delta = product.quantity, "stock change");
        Ok(Response::new(product.into()))
    }

    async fn get_product(
        &self,
        request: Request<GetProductRequest>,
    ) -> Result<Response<ProductMessage>, Status> {
        let req = request.into_inner();
        let product = self.store.get(req.id).map_err(Error::from)?;
        Ok(Response::new(product.into()))
    }

    async fn update_stock(
        &self,
        request: Request<UpdateStockRequest>,
    ) -> Result<Response<ProductMessage>, Status> {
        let req = request.into_inner();
        let product = self
            .store
            .update_quantity(req.product_id, req.delta)
            .map_err(Error::from)?;
        self.persist();

        info!(product_id = product.id, delta = req.delta, "stock change");
        self.alert_if_low(&product);
        Ok(Response::new(product.into()))
    }

    async fn remove_product(
        &self,
        request: Request<RemoveProductRequest>,
    ) -> Result<Response<RemoveProductResponse>, Status> {
        let req = request.into_inner();
        let removed = self.store.remove(req.id).map_err(Error::from)?;
        self.persist();

        info!(product_id = removed.id, delta = -removed.quantity, "stock change");
        Ok(Response::new(RemoveProductResponse {}))
    }

    async fn list_products(
        &self,
        _request: Request<ListProductsRequest>,
    ) -> Result<Response<ListProductsResponse>, Status> {
        let products = self.store.list().into_iter().map(Into::into).collect();
        Ok(Response::new(ListProductsResponse { products }))
    }

    type StreamStockAlertsStream = Pin<Box<dyn Stream<Item = Result<StockAlert, Status>> + Send>>;

    /// Registers a streaming subscriber for low-stock alerts.
    ///
    /// The returned stream yields alerts until the client cancels; dropping
    /// it (cancellation, disconnect, shutdown) unregisters the subscriber
    /// deterministically.
    async fn stream_stock_alerts(
        &self,
        _request: Request<StreamStockAlertsRequest>,
    ) -> Result<Response<Self::StreamStockAlertsStream>, Status> {
        let stream = AlertStream::register(Arc::clone(&self.alerts));
        Ok(Response::new(Box::pin(stream)))
    }
}
