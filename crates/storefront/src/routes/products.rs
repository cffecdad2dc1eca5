//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use urban_store_core::{Price, Product, ProductId};

use crate::catalog::{DEFAULT_PAGE_SIZE, DEFAULT_RECOMMENDATION_LIMIT, ProductFilter, SortOrder};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Largest page a client may ask for.
const MAX_PAGE_SIZE: usize = 48;

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub category: Option<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub sort: Option<String>,
}

impl ListingQuery {
    fn filter(&self) -> Result<ProductFilter> {
        let defaults = ProductFilter::default();
        let sort = match self.sort.as_deref() {
            Some(sort) => sort.parse::<SortOrder>().map_err(AppError::BadRequest)?,
            None => SortOrder::default(),
        };
        let filter = ProductFilter {
            category: self.category.clone(),
            min_price: self.min_price.unwrap_or(defaults.min_price),
            max_price: self.max_price.unwrap_or(defaults.max_price),
            sort,
        };
        if filter.min_price > filter.max_price {
            return Err(AppError::BadRequest(
                "minPrice must not exceed maxPrice".to_string(),
            ));
        }
        Ok(filter)
    }
}

/// Product listing response.
///
/// `items` holds the requested page after filtering; `nextPage` and `total`
/// describe the unfiltered catalog so clients can keep paging.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub items: Vec<Product>,
    pub page: usize,
    pub next_page: Option<usize>,
    pub total: usize,
}

/// Product detail response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub display_price: String,
}

/// Recommendation query parameters.
#[derive(Debug, Deserialize)]
pub struct RecommendedQuery {
    pub limit: Option<usize>,
}

/// List products.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ProductListing>> {
    let filter = query.filter()?;
    let page = query.page.unwrap_or(0);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let fetched = state.catalog().fetch_products(page, per_page).await;

    Ok(Json(ProductListing {
        items: filter.apply(fetched.items),
        page,
        next_page: fetched.next_page,
        total: fetched.total,
    }))
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetail>> {
    let product = state
        .catalog()
        .fetch_product_by_id(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ProductDetail {
        display_price: product.price.display(),
        product,
    }))
}

/// Products related to one product.
#[instrument(skip(state))]
pub async fn recommended(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Query(query): Query<RecommendedQuery>,
) -> Result<Json<Vec<Product>>> {
    let catalog = state.catalog();
    let product = catalog
        .catalog()
        .by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(catalog.recommended_products(
        &product.category,
        id,
        query.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT),
    )))
}

/// All category names.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog().categories())
}
