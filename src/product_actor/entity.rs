use crate::actor_framework::{Entity, EntityId};
use crate::domain::{Product, ProductCreate, ProductPatch, ProductReplace};

impl Entity for Product {
    type CreatePayload = ProductCreate;
    type Replace = ProductReplace;
    type Patch = ProductPatch;

    fn id(&self) -> EntityId { self.id }

    /// Creates a new Product from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the store
    /// * `payload` - Validated name, category, price and optional stock flag
    fn from_create(id: EntityId, payload: ProductCreate) -> Result<Self, String> {
        let product = Self {
            id,
            name: payload.name,
            category: payload.category,
            price: payload.price,
            in_stock: payload.in_stock.unwrap_or(true),
        };
        product.validate()?;
        Ok(product)
    }

    /// Enforces the record invariants: non-empty labels and a finite, non-negative price.
    fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err(format!("Product {} has an empty name", self.id));
        }
        if self.category.is_empty() {
            return Err(format!("Product {} has an empty category", self.id));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("Product {} has an invalid price: {}", self.id, self.price));
        }
        Ok(())
    }

    /// Overwrites every descriptive field. The id never changes.
    fn on_replace(&mut self, replace: ProductReplace) -> Result<(), String> {
        self.name = replace.name;
        self.category = replace.category;
        self.price = replace.price;
        if let Some(in_stock) = replace.in_stock {
            self.in_stock = in_stock;
        }
        self.validate()
    }

    /// Applies whichever fields the patch carries.
    ///
    /// # Fields Updated
    /// - `name`, `category`: descriptive labels
    /// - `price`: unit price
    /// - `in_stock`: availability flag
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_out_of_stock_is_honoured() {
        let payload = ProductCreate {
            name: "Clamp".to_string(),
            category: "Tools".to_string(),
            price: 0.0,
            in_stock: Some(false),
        };
        let product = Product::from_create(4, payload).unwrap();
        assert_eq!(product, Product::new(4, "Clamp", "Tools", 0.0, false));
    }

    #[test]
    fn replace_without_stock_flag_keeps_it() {
        let mut product = Product::new(1, "A", "Tools", 10.0, false);
        product
            .on_replace(ProductReplace {
                name: "B".to_string(),
                category: "Garden".to_string(),
                price: 12.5,
                in_stock: None,
            })
            .unwrap();
        assert_eq!(product, Product::new(1, "B", "Garden", 12.5, false));
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut product = Product::new(1, "A", "Tools", 10.0, true);
        product.on_update(ProductPatch::default()).unwrap();
        assert_eq!(product, Product::new(1, "A", "Tools", 10.0, true));
    }

    #[test]
    fn negative_price_is_refused() {
        let mut product = Product::new(1, "A", "Tools", 10.0, true);
        let patch = ProductPatch { price: Some(-0.5), ..Default::default() };
        assert!(product.on_update(patch).is_err());
    }
}
