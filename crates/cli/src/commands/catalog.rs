//! Catalog commands.

use std::io::{self, Write};

use devo_store_core::ProductId;
use devo_store_storefront::catalog::{Catalog, Product, ProductQuery, ProductSort};
use devo_store_storefront::display::DisplaySettings;
use devo_store_storefront::error::CartError;

use super::Context;

/// List products matching the category filter, in `sort` order.
pub fn list(
    ctx: &Context,
    categories: Vec<String>,
    sort: ProductSort,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = ctx.catalog()?;
    let query = ProductQuery { categories, sort };
    let products = catalog.list(&query);
    tracing::debug!(shown = products.len(), total = catalog.len(), "Listing products");

    let mut out = io::stdout().lock();
    if products.is_empty() {
        writeln!(out, "No products found")?;
        return Ok(());
    }
    for line in format_rows(&products, &ctx.display) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Show one product's details.
pub fn show(ctx: &Context, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = ctx.catalog()?;
    let product = catalog
        .find_by_id(id)
        .ok_or(CartError::ProductNotFound(id))?;

    let mut out = io::stdout().lock();
    writeln!(out, "{} [{}]", product.name, product.id)?;
    writeln!(out, "  Category: {}", product.category)?;
    writeln!(out, "  Price:    {}", ctx.display.format(product.price))?;
    if let Some(rating) = product.metadata.rating {
        let reviews = product.metadata.reviews.unwrap_or(0);
        writeln!(out, "  Rating:   {rating:.1} ({reviews} reviews)")?;
    }
    if !product.metadata.description.is_empty() {
        writeln!(out, "  {}", product.metadata.description)?;
    }
    for feature in &product.metadata.features {
        writeln!(out, "  - {feature}")?;
    }
    Ok(())
}

fn format_rows(products: &[&Product], display: &DisplaySettings) -> Vec<String> {
    let name_width = products
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);

    products
        .iter()
        .map(|p| {
            let rating = p
                .metadata
                .rating
                .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
            format!(
                "[{id:>3}] {name:<name_width$}  {category:<10} {price:>12}  {rating:>4}",
                id = p.id.as_i32(),
                name = p.name,
                category = p.category,
                price = display.format(p.price),
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use devo_store_core::{CurrencyCode, ExchangeRates, Locale};
    use devo_store_storefront::catalog::StaticCatalog;

    use super::*;

    #[test]
    fn test_rows_use_display_currency() {
        let catalog = StaticCatalog::builtin();
        let query = ProductQuery {
            categories: vec!["games".to_string()],
            sort: ProductSort::PriceLowToHigh,
        };
        let products = catalog.list(&query);
        let display =
            DisplaySettings::new(CurrencyCode::IDR, &ExchangeRates::builtin(), Locale::Id).unwrap();

        let rows = format_rows(&products, &display);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("[  7] Virtual Reality Experience"));
        // 179.99 * 15500 = 2789845
        assert!(rows[0].contains("Rp2789845"));
        assert!(rows[1].contains("Game Engine Pro"));
    }
}
