use tracing::{error, info};

use crate::actor_framework::{FrameworkError, ResourceActor};
use crate::clients::ProductClient;
use crate::domain::Product;
use crate::store::Store;

/// Owns the product actor task for the lifetime of the process (or of a test).
///
/// Each instance has its own store, so tests can run side by side.
pub struct ProductSystem {
    pub product_client: ProductClient,
    handle: tokio::task::JoinHandle<()>,
}

impl ProductSystem {
    /// Starts the product actor with `seed` as its initial contents.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(buffer_size: usize, seed: Vec<Product>) -> Result<Self, FrameworkError> {
        let store = Store::with_items(seed)?;
        let (actor, resource_client) = ResourceActor::new(buffer_size, store);
        let handle = tokio::spawn(actor.run());

        Ok(Self {
            product_client: ProductClient::new(resource_client),
            handle,
        })
    }

    /// Drops this system's client and waits for the actor to drain.
    ///
    /// The actor stops once every clone of the client is gone, so callers must
    /// release theirs (e.g. the HTTP router) first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down product system...");
        drop(self.product_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Product system shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_system_serves_seed_and_shuts_down() {
        let seed = vec![Product::new(1, "A", "Tools", 10.0, true)];
        let system = ProductSystem::new(8, seed.clone()).unwrap();

        let products = system.product_client.list_products().await.unwrap();
        assert_eq!(products, seed);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_seed_is_refused() {
        let seed = vec![
            Product::new(2, "A", "Tools", 1.0, true),
            Product::new(2, "B", "Tools", 1.0, true),
        ];
        assert!(matches!(ProductSystem::new(8, seed), Err(FrameworkError::DuplicateId(2))));
    }
}
