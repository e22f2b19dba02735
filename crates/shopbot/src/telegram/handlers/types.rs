//! Handler types and dependencies

use std::sync::Arc;

use shopcore::pricing::PriceProvider;
use shopcore::shop::Shop;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub shop: Arc<Shop>,
    pub prices: Arc<dyn PriceProvider>,
}

impl HandlerDeps {
    pub fn new(shop: Arc<Shop>, prices: Arc<dyn PriceProvider>) -> Self {
        Self { shop, prices }
    }
}
