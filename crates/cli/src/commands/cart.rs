//! Cart and favorites commands.
//!
//! Each command signs in as the user (hydrating their cart and favorites
//! from the record store), applies the change locally, then writes the
//! result back with a profile sync.

use glowcart_core::{CartLineItem, FavoriteItem, ProductId, UserId};
use glowcart_storefront::{AppState, Session};
use secrecy::SecretString;

use super::CommandError;

async fn sign_in(state: &AppState, token: String, user: &str) -> Result<Session, CommandError> {
    let mut session = Session::guest();
    session
        .restore(state.records(), SecretString::from(token), &UserId::new(user))
        .await?;
    Ok(session)
}

/// Print the user's cart, favorites and checkout totals.
///
/// # Errors
///
/// Returns error if the user record cannot be fetched.
pub async fn show(state: &AppState, token: String, user: &str) -> Result<(), CommandError> {
    let session = sign_in(state, token, user).await?;
    let summary = session.checkout_summary();

    #[allow(clippy::print_stdout)]
    {
        println!("Cart");
        for line in session.cart().items() {
            println!(
                "  {:>4}  {:<32} {:>3} x {:>8}  {:>9}",
                line.id.as_i64(),
                line.name,
                line.quantity,
                line.price.to_string(),
                line.line_total().to_string(),
            );
        }
        println!("  Items:    {}", summary.item_count);
        println!("  Subtotal: {}", summary.subtotal);
        println!("  Shipping: {}", summary.shipping);
        println!("  Total:    {}", summary.total);

        println!("Favorites");
        for favorite in session.favorites().items() {
            println!("  {:>4}  {}", favorite.id.as_i64(), favorite.name);
        }
    }
    Ok(())
}

/// Add a catalog product to the user's cart.
///
/// # Errors
///
/// Returns error if the user or product does not exist, or the sync fails.
pub async fn add(
    state: &AppState,
    token: String,
    user: &str,
    product: i64,
    quantity: u32,
) -> Result<(), CommandError> {
    let product = state.catalog().product(ProductId::new(product)).await?;
    let mut session = sign_in(state, token, user).await?;

    session
        .cart_mut()
        .add_item(CartLineItem::from(&product).with_quantity(quantity));
    session.sync_profile(state.records()).await?;

    tracing::info!(
        "Added {quantity} x {} to cart of user {user} (total {})",
        product.name,
        session.cart().total()
    );
    Ok(())
}

/// Remove a product from the user's cart.
///
/// # Errors
///
/// Returns error if the user does not exist or the sync fails.
pub async fn remove(
    state: &AppState,
    token: String,
    user: &str,
    product: i64,
) -> Result<(), CommandError> {
    let mut session = sign_in(state, token, user).await?;

    session.cart_mut().remove_item(ProductId::new(product));
    session.sync_profile(state.records()).await?;

    tracing::info!("Removed product {product} from cart of user {user}");
    Ok(())
}

/// Toggle a catalog product in the user's favorites.
///
/// # Errors
///
/// Returns error if the user or product does not exist, or the sync fails.
pub async fn favorite(
    state: &AppState,
    token: String,
    user: &str,
    product: i64,
) -> Result<(), CommandError> {
    let product = state.catalog().product(ProductId::new(product)).await?;
    let mut session = sign_in(state, token, user).await?;

    let now_favorite = session.favorites_mut().toggle(FavoriteItem::from(&product));
    session.sync_profile(state.records()).await?;

    if now_favorite {
        tracing::info!("Added {} to favorites of user {user}", product.name);
    } else {
        tracing::info!("Removed {} from favorites of user {user}", product.name);
    }
    Ok(())
}
