//! Order administration commands.
//!
//! # Usage
//!
//! ```bash
//! glowcart orders list --status pending --user sara
//! glowcart orders set-status 17 canceled
//! glowcart orders delete 17
//! ```

use glowcart_core::view::{OrderQuery, StatusFilter, paginate};
use glowcart_core::{Order, OrderId, OrderStatus};
use glowcart_storefront::{AppState, FetchOutcome};

use super::CommandError;

/// Print one page of orders matching the filters.
///
/// # Errors
///
/// Returns error if the orders cannot be fetched.
pub async fn list(
    state: &AppState,
    status: StatusFilter,
    user: String,
    order_id: String,
    page: usize,
) -> Result<(), CommandError> {
    let store = state.orders();
    if let FetchOutcome::Applied(count) = store.fetch_all().await? {
        tracing::debug!("Loaded {count} orders");
    }

    let orders = store.orders();
    let query = OrderQuery {
        status,
        user,
        order_id,
    };
    let matching = query.apply(&orders);
    let page = paginate(&matching, page, state.config().page_size);

    #[allow(clippy::print_stdout)]
    {
        for order in page.items {
            println!("{}", format_row(order));
        }
        println!(
            "Page {} of {} ({} matching orders)",
            page.number, page.total_pages, page.total_items
        );
    }
    Ok(())
}

/// Change an order's status and print the saved order.
///
/// # Errors
///
/// Returns error if the orders cannot be fetched, the order does not exist,
/// or the record store rejects the update.
pub async fn set_status(
    state: &AppState,
    id: &str,
    status: OrderStatus,
) -> Result<(), CommandError> {
    let store = state.orders();
    store.fetch_all().await?;

    let order = store.update_status(&OrderId::new(id), status).await?;
    tracing::info!("Order {} is now {}", order.id, order.status);

    #[allow(clippy::print_stdout)]
    {
        println!("{}", format_row(&order));
    }
    Ok(())
}

/// Delete an order.
///
/// # Errors
///
/// Returns error if the record store rejects the delete.
pub async fn delete(state: &AppState, id: &str) -> Result<(), CommandError> {
    state.orders().delete_order(&OrderId::new(id)).await?;
    tracing::info!("Deleted order {id}");
    Ok(())
}

fn format_row(order: &Order) -> String {
    format!(
        "{:<10} {:<24} {}  {:>3} units  {:>9}  {}",
        order.id.as_str(),
        order.user_name,
        order.date.format("%Y-%m-%d"),
        order.unit_count(),
        order.total.to_string(),
        order.status,
    )
}
