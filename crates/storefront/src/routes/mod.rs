//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Health check
//!
//! # Catalog
//! GET  /api/products                   - Product listing (page, perPage, category, minPrice, maxPrice, sort)
//! GET  /api/products/{id}              - Product detail
//! GET  /api/products/{id}/recommended  - Same-category products (limit)
//! GET  /api/categories                 - Category names
//!
//! # Cart (every mutation returns the full cart)
//! GET  /api/cart                       - Cart contents and totals
//! GET  /api/cart/count                 - Cart count badge
//! POST /api/cart/add                   - Add to cart
//! POST /api/cart/update                - Update quantity
//! POST /api/cart/remove                - Remove item
//! POST /api/cart/clear                 - Empty the cart
//!
//! # Checkout
//! POST /api/checkout                   - Validate and confirm (mock, no payment)
//!
//! # Contact
//! POST /api/contact                    - Validate and acknowledge a message
//! ```

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/recommended", get(products::recommended))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .route("/categories", get(products::categories))
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::submit))
        .route("/contact", post(contact::submit))
}

/// Build the full application router with its middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", routes())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
