use serde::{Deserialize, Serialize};

use crate::actor_framework::EntityId;

/// Represents a product in the catalogue.
///
/// # Actor Framework
/// This struct implements the [`Entity`](crate::actor_framework::Entity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::actor_framework::ResourceActor).
///
/// See [`impl Entity for Product`](#impl-Entity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Full replacement ([`ProductReplace`])
/// - Partial updates ([`ProductPatch`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (normally assigned by the store)
    /// * `name` - Product name
    /// * `category` - Free-form category label
    /// * `price` - Unit price, never negative
    /// * `in_stock` - Availability flag
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        in_stock: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            in_stock,
        }
    }
}

/// Validated payload for creating a product. `in_stock` defaults to `true` when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub in_stock: Option<bool>,
}

/// Validated payload for a full update. An absent `in_stock` keeps the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductReplace {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub in_stock: Option<bool>,
}

/// Partial update; only the supplied fields change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub in_stock: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.price.is_none() && self.in_stock.is_none()
    }
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDeleted {
    pub message: String,
    pub product: Product,
}

impl ProductDeleted {
    pub fn new(product: Product) -> Self {
        Self { message: "Product deleted".to_string(), product }
    }
}
