use tracing::{debug, instrument};

use crate::actor_framework::{EntityId, ResourceClient};
use crate::domain::{Product, ProductCreate, ProductPatch, ProductReplace};
use crate::product_actor::ProductError;

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, payload: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn replace_product(&self, id: EntityId, replace: ProductReplace) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.replace(id, replace).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn patch_product(&self, id: EntityId, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(ProductError::from)
    }

    /// Fetches a product, turning absence into [`ProductError::NotFound`].
    pub async fn require_product(&self, id: EntityId) -> Result<Product, ProductError> {
        self.get_product(id).await?.ok_or(ProductError::NotFound)
    }
}
