use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, instrument};

use crate::clients::ProductClient;
use crate::domain::{Product, ProductDeleted};
use crate::product_actor::{parse_product_id, ListParams, ProductDraft, ProductError};
use super::ErrorResponse;

// Raw bytes rather than `Json`: a missing body or content type reads as `{}`.
type Body = Bytes;

fn draft(body: Body) -> Result<ProductDraft, ProductError> {
    ProductDraft::from_body(&body)
}

#[instrument(skip(client))]
pub async fn list_products(
    State(client): State<ProductClient>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ProductError> {
    let Query(pairs) = pairs.map_err(|rejection| ProductError::MalformedRequest(rejection.body_text()))?;
    let query = ListParams::from_pairs(pairs).parse()?;
    let products = client.list_products().await?;
    Ok(Json(query.apply(products)))
}

#[instrument(skip(client))]
pub async fn get_product(
    State(client): State<ProductClient>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ProductError> {
    let id = parse_product_id(&raw_id)?;
    Ok(Json(client.require_product(id).await?))
}

#[instrument(skip(client, body))]
pub async fn create_product(
    State(client): State<ProductClient>,
    body: Body,
) -> Result<(StatusCode, Json<Product>), ProductError> {
    let payload = draft(body)?.into_create()?;
    let product = client.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(client, body))]
pub async fn update_product(
    State(client): State<ProductClient>,
    Path(raw_id): Path<String>,
    body: Body,
) -> Result<Json<Product>, ProductError> {
    let id = parse_product_id(&raw_id)?;
    match draft(body).and_then(ProductDraft::into_replace) {
        Ok(replace) => Ok(Json(client.replace_product(id, replace).await?)),
        Err(invalid) => {
            // A missing product outranks a bad body.
            client.require_product(id).await?;
            Err(invalid)
        }
    }
}

#[instrument(skip(client, body))]
pub async fn patch_product(
    State(client): State<ProductClient>,
    Path(raw_id): Path<String>,
    body: Body,
) -> Result<Json<Product>, ProductError> {
    let id = parse_product_id(&raw_id)?;
    match draft(body).and_then(ProductDraft::into_patch) {
        Ok(patch) => {
            if patch.is_empty() {
                debug!(id, "Empty patch");
            }
            Ok(Json(client.patch_product(id, patch).await?))
        }
        Err(invalid) => {
            client.require_product(id).await?;
            Err(invalid)
        }
    }
}

#[instrument(skip(client))]
pub async fn delete_product(
    State(client): State<ProductClient>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProductDeleted>, ProductError> {
    let id = parse_product_id(&raw_id)?;
    let product = client.delete_product(id).await?;
    Ok(Json(ProductDeleted::new(product)))
}

pub async fn endpoint_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Endpoint not found")))
}
