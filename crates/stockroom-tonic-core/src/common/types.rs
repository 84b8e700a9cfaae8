//! Shared constants and domain↔proto conversions.

use crate::proto;
use stockroom::Product;

/// Quantity below which a successful stock update publishes a low-stock
/// alert, unless overridden by server configuration.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

impl From<Product> for proto::Product {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            quantity: product.quantity,
        }
    }
}

impl From<proto::Product> for Product {
    fn from(product: proto::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            quantity: product.quantity,
        }
    }
}

/// Builds the alert published when `product`'s quantity fell below the
/// low-stock threshold.
pub fn low_stock_alert(product: Product) -> proto::StockAlert {
    let message = format!(
        "Low stock alert for '{}', quantity = {}",
        product.name, product.quantity
    );
    proto::StockAlert {
        product: Some(product.into()),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: 1,
            name: "Widget".into(),
            quantity: 3,
        }
    }

    #[test]
    fn product_round_trips_through_proto() {
        let product = widget();
        let round_tripped = Product::from(proto::Product::from(product.clone()));
        assert_eq!(round_tripped, product);
    }

    #[test]
    fn low_stock_alert_carries_snapshot_and_message() {
        let alert = low_stock_alert(widget());
        assert_eq!(alert.message, "Low stock alert for 'Widget', quantity = 3");
        let product = alert.product.unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.quantity, 3);
    }
}
