//! HTTP surface: routes `/products` onto the product handlers.

mod error;
mod handlers;

pub use error::ErrorResponse;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::clients::ProductClient;

pub fn router(client: ProductClient) -> Router {
    Router::new()
        .route("/products", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/products/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .patch(handlers::patch_product)
                .delete(handlers::delete_product),
        )
        .fallback(handlers::endpoint_not_found)
        .method_not_allowed_fallback(handlers::endpoint_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}
