//! Product catalog commands.

use glowcart_core::view::{CatalogQuery, CategoryFilter, PriceRange, SortKey, paginate};
use glowcart_core::{Price, Product, ProductId};
use glowcart_storefront::AppState;

use super::CommandError;

/// Print one page of products matching the filters, in the requested order.
///
/// # Errors
///
/// Returns error if the price bounds are inverted or the catalog cannot be
/// fetched.
pub async fn list(
    state: &AppState,
    category: CategoryFilter,
    min: Option<u32>,
    max: Option<u32>,
    sort: SortKey,
    page: usize,
) -> Result<(), CommandError> {
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(CommandError::InvalidArguments(format!(
            "--min {min} is above --max {max}"
        )));
    }

    let products = state.catalog().products().await?;
    let query = CatalogQuery {
        category,
        price: PriceRange::new(min.map(Price::from_dollars), max.map(Price::from_dollars)),
        sort,
    };
    let matching = query.apply(&products);
    let page = paginate(&matching, page, state.config().page_size);

    #[allow(clippy::print_stdout)]
    {
        for product in page.items {
            println!("{}", format_row(product));
        }
        println!(
            "Page {} of {} ({} matching products)",
            page.number, page.total_pages, page.total_items
        );
    }
    Ok(())
}

/// Print a single product.
///
/// # Errors
///
/// Returns error if the product does not exist or the catalog cannot be
/// fetched.
pub async fn show(state: &AppState, id: i64) -> Result<(), CommandError> {
    let product = state.catalog().product(ProductId::new(id)).await?;

    let mut badges = Vec::new();
    if product.is_bestseller {
        badges.push("bestseller");
    }
    if product.is_new_formula {
        badges.push("new formula");
    }

    #[allow(clippy::print_stdout)]
    {
        println!("{}", product.name);
        println!("  Price:    {}", product.price);
        println!("  Size:     {}", product.size);
        println!("  Category: {}", product.category);
        if !badges.is_empty() {
            println!("  Tags:     {}", badges.join(", "));
        }
        if !product.description.is_empty() {
            println!();
            println!("{}", product.description);
        }
    }
    Ok(())
}

/// Print every category in catalog order.
///
/// # Errors
///
/// Returns error if the catalog cannot be fetched.
pub async fn categories(state: &AppState) -> Result<(), CommandError> {
    let categories = state.catalog().categories().await?;

    #[allow(clippy::print_stdout)]
    {
        for category in categories {
            println!("{category}");
        }
    }
    Ok(())
}

fn format_row(product: &Product) -> String {
    format!(
        "{:>4}  {:<32} {:<14} {:>9}",
        product.id.as_i64(),
        product.name,
        product.category,
        product.price.to_string(),
    )
}
