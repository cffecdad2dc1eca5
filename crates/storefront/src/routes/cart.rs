//! Cart route handlers.
//!
//! Every mutation responds with the full cart so the client can re-render
//! without a second request.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use urban_store_core::{LineItem, LineItemUid, OrderSummary, Price, ProductId};

use crate::cart_store::CartStore;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Cart row display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub uid: LineItemUid,
    pub product_id: ProductId,
    /// The size, omitted for products without one.
    pub size: Option<String>,
    pub name: String,
    pub category: String,
    pub image: String,
    pub price: Price,
    pub quantity: u32,
    pub line_total: Price,
    pub stock: Option<u32>,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            uid: item.uid.clone(),
            product_id: item.product_id,
            size: (!item.variant.is_default()).then(|| item.variant.to_string()),
            name: item.name.clone(),
            category: item.category.clone(),
            image: item.image.clone(),
            price: item.price,
            quantity: item.quantity,
            line_total: item.line_total(),
            stock: item.stock,
        }
    }
}

/// Pre-formatted totals for display.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryDisplay {
    pub subtotal: String,
    /// `"Free"` when no shipping is charged.
    pub shipping: String,
    pub total: String,
}

impl From<&OrderSummary> for SummaryDisplay {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            subtotal: summary.subtotal.display(),
            shipping: if summary.free_shipping() {
                "Free".to_string()
            } else {
                summary.shipping.display()
            },
            total: summary.total.display(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    #[serde(flatten)]
    pub summary: OrderSummary,
    pub display: SummaryDisplay,
}

impl From<&CartStore> for CartView {
    fn from(store: &CartStore) -> Self {
        let summary = store.summary();
        Self {
            items: store.items().iter().map(CartItemView::from).collect(),
            item_count: store.count(),
            display: SummaryDisplay::from(&summary),
            summary,
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub uid: LineItemUid,
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub uid: LineItemUid,
}

/// Show the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::from(&*state.cart()))
}

/// Cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    Json(CartCount {
        count: state.cart().count(),
    })
}

/// Add a product to the cart.
///
/// The product record is fetched from the catalog; the request only names it.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .fetch_product_by_id(request.product_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let product = match request.size.filter(|size| !size.trim().is_empty()) {
        Some(size) => product.with_selected_size(size.trim()),
        None => product,
    };

    let mut cart = state.cart();
    let uid = cart.add_item(&product, request.quantity.unwrap_or(1));
    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("uid", uid.to_string()), ("name", product.name.clone())],
    );

    Ok(Json(CartView::from(&*cart)))
}

/// Update a row's quantity.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateCartRequest>,
) -> Json<CartView> {
    let mut cart = state.cart();
    cart.update_quantity(&request.uid, request.quantity);
    Json(CartView::from(&*cart))
}

/// Remove a row.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveFromCartRequest>,
) -> Json<CartView> {
    let mut cart = state.cart();
    cart.remove_item(&request.uid);
    add_breadcrumb("cart", "Removed from cart", &[("uid", request.uid.to_string())]);
    Json(CartView::from(&*cart))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut cart = state.cart();
    cart.clear();
    add_breadcrumb("cart", "Cart cleared", &[]);
    Json(CartView::from(&*cart))
}
