//! List query for `GET /products`: parameter validation, filtering, and sorting.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::actor_framework::EntityId;
use crate::domain::Product;
use super::ProductError;

/// Parses a product id from a path segment or query value.
pub fn parse_product_id(raw: &str) -> Result<EntityId, ProductError> {
    raw.trim().parse().map_err(|_| ProductError::InvalidId)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Category,
    Price,
    Id,
}

impl FromStr for SortField {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "category" => Ok(SortField::Category),
            "price" => Ok(SortField::Price),
            "id" => Ok(SortField::Id),
            _ => Err(ProductError::InvalidSortField),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ProductError::InvalidSortOrder),
        }
    }
}

/// Raw query string of `GET /products`. Empty values count as absent.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub id: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Validated listing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub id: Option<EntityId>,
    pub category: Option<String>,
    pub max_price: Option<f64>,
    pub sort: Option<(SortField, SortOrder)>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ListParams {
    /// Collects the recognised keys from decoded query pairs. When a key is
    /// repeated, its first value wins; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "id" => &mut params.id,
                "category" => &mut params.category,
                "price" => &mut params.price,
                "sortBy" => &mut params.sort_by,
                "sortOrder" => &mut params.sort_order,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    /// Validates the parameters in the order the filters run; the first bad one wins.
    ///
    /// A `price` that does not parse is ignored rather than rejected.
    pub fn parse(&self) -> Result<ProductQuery, ProductError> {
        let id = present(&self.id).map(parse_product_id).transpose()?;
        let category = present(&self.category).map(str::to_lowercase);
        let max_price = present(&self.price)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|price| !price.is_nan());

        let sort = match present(&self.sort_by) {
            None => None,
            Some(field) => {
                let field = field.parse::<SortField>()?;
                let order = present(&self.sort_order)
                    .map(str::parse::<SortOrder>)
                    .transpose()?
                    .unwrap_or_default();
                Some((field, order))
            }
        };

        Ok(ProductQuery { id, category, max_price, sort })
    }
}

impl ProductQuery {
    /// Filters by id, then category substring, then maximum price, then sorts.
    pub fn apply(&self, mut products: Vec<Product>) -> Vec<Product> {
        if let Some(id) = self.id {
            products.retain(|p| p.id == id);
        }
        if let Some(needle) = &self.category {
            products.retain(|p| p.category.to_lowercase().contains(needle.as_str()));
        }
        if let Some(max_price) = self.max_price {
            products.retain(|p| p.price <= max_price);
        }
        if let Some((field, order)) = self.sort {
            // sort_by is stable: equal keys keep their store order in both directions.
            products.sort_by(|a, b| {
                let ordering = compare(a, b, field);
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }
        products
    }
}

fn compare(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Category => a.category.cmp(&b.category),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Id => a.id.cmp(&b.id),
    }
}
