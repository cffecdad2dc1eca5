//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! us-cli products list --page 1 --per-page 4
//! us-cli products list --category Footwear --sort price-desc
//! us-cli products show 5
//! us-cli categories
//! ```

use rust_decimal::Decimal;
use urban_store_core::{Price, Product, ProductId};
use urban_store_storefront::catalog::{
    DEFAULT_RECOMMENDATION_LIMIT, ProductFilter, ProductPage, SortOrder,
};
use urban_store_storefront::state::AppState;

use super::{CommandError, emit};

/// Build a listing filter from command-line options.
///
/// # Errors
///
/// Returns `CommandError::InvalidListing` for an unknown sort order or an
/// inverted price range.
pub fn listing_filter(
    category: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    sort: &str,
) -> Result<ProductFilter, CommandError> {
    let defaults = ProductFilter::default();
    let filter = ProductFilter {
        category,
        min_price: min_price.map_or(defaults.min_price, Price::from),
        max_price: max_price.map_or(defaults.max_price, Price::from),
        sort: sort.parse::<SortOrder>().map_err(CommandError::InvalidListing)?,
    };
    if filter.min_price > filter.max_price {
        return Err(CommandError::InvalidListing(
            "min price exceeds max price".to_string(),
        ));
    }
    Ok(filter)
}

fn product_line(product: &Product) -> String {
    let stock = match product.stock {
        Some(stock) if stock > 0 => format!("{stock} in stock"),
        _ => "stock unknown".to_string(),
    };
    format!(
        "{:>4}  {:<28} {:<12} {:>9}  {stock}",
        product.id,
        product.name,
        product.category,
        product.price.display()
    )
}

fn format_page(page: usize, fetched: &ProductPage, items: &[Product]) -> String {
    let mut lines: Vec<String> = items.iter().map(product_line).collect();
    if items.is_empty() {
        lines.push("No products match.".to_string());
    }
    let next = fetched
        .next_page
        .map(|next| format!(" (next page: {next})"))
        .unwrap_or_default();
    lines.push(format!("Page {page} of {} products{next}", fetched.total));
    lines.join("\n")
}

fn format_product(product: &Product, related: &[Product]) -> String {
    let mut lines = vec![
        format!("{} ({})", product.name, product.category),
        product.price.display(),
    ];
    if let Some(size) = &product.size {
        lines.push(format!("Size: {size}"));
    }
    if !product.description.is_empty() {
        lines.push(product.description.clone());
    }
    if !related.is_empty() {
        lines.push(String::new());
        lines.push("You may also like:".to_string());
        lines.extend(related.iter().map(product_line));
    }
    lines.join("\n")
}

/// List a page of products after filtering it.
pub async fn list(state: &AppState, page: usize, per_page: usize, filter: &ProductFilter) {
    let fetched = state.catalog().fetch_products(page, per_page).await;
    let items = filter.apply(fetched.items.iter().cloned());
    emit(&format_page(page, &fetched, &items));
}

/// Show one product with its recommendations.
///
/// # Errors
///
/// Returns `CommandError::ProductNotFound` for an unknown ID.
pub async fn show(state: &AppState, id: ProductId) -> Result<(), CommandError> {
    let product = state
        .catalog()
        .fetch_product_by_id(id)
        .await
        .ok_or(CommandError::ProductNotFound(id))?;
    let related =
        state
            .catalog()
            .recommended_products(&product.category, id, DEFAULT_RECOMMENDATION_LIMIT);
    emit(&format_product(&product, &related));
    Ok(())
}

/// List category names.
pub fn categories(state: &AppState) {
    emit(&state.catalog().categories().join("\n"));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_state;

    #[test]
    fn test_listing_filter_rejects_bad_options() {
        assert!(matches!(
            listing_filter(None, None, None, "cheapest"),
            Err(CommandError::InvalidListing(_))
        ));
        assert!(matches!(
            listing_filter(None, Some(Decimal::from(50)), Some(Decimal::from(10)), "featured"),
            Err(CommandError::InvalidListing(_))
        ));
    }

    #[test]
    fn test_listing_filter_defaults() {
        let filter = listing_filter(Some("Tops".to_string()), None, None, "price-asc").unwrap();
        assert_eq!(filter.category.as_deref(), Some("Tops"));
        assert_eq!(filter.min_price, ProductFilter::default().min_price);
        assert_eq!(filter.sort, SortOrder::PriceAsc);
    }

    #[tokio::test]
    async fn test_format_page_reports_paging() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());
        let fetched = state.catalog().fetch_products(0, 6).await;

        let out = format_page(0, &fetched, &fetched.items);
        assert!(out.contains("Midnight Bomber Jacket"));
        assert!(out.ends_with("Page 0 of 14 products (next page: 1)"));

        let out = format_page(0, &fetched, &[]);
        assert!(out.starts_with("No products match."));
    }

    #[test]
    fn test_format_product_lists_related() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());
        let catalog = state.catalog().catalog();
        let beanie = catalog.by_id(ProductId::new(9)).unwrap();
        let related = catalog.recommended("Accessories", beanie.id, 4);

        let out = format_product(beanie, &related);
        assert!(out.starts_with("Ribbed Beanie (Accessories)\n$19.99\nSize: One Size"));
        assert!(out.contains("Canvas Field Tote"));
        assert!(product_line(beanie).ends_with("stock unknown"));
    }
}
