//! User record administration commands.

use glowcart_core::{ProfileEdit, UserId};
use glowcart_core::view::paginate;
use glowcart_storefront::AppState;

use super::CommandError;

/// Print one page of user records.
///
/// # Errors
///
/// Returns error if the users cannot be fetched.
pub async fn list(state: &AppState, page: usize) -> Result<(), CommandError> {
    let users = state.records().list_users().await?;
    let page = paginate(&users, page, state.config().page_size);

    #[allow(clippy::print_stdout)]
    {
        for user in page.items {
            println!(
                "{:<10} {:<24} {:<32} {:>3} in cart",
                user.id.as_str(),
                user.display_name(),
                user.email.as_deref().unwrap_or("-"),
                user.cart.len(),
            );
        }
        println!(
            "Page {} of {} ({} users)",
            page.number, page.total_pages, page.total_items
        );
    }
    Ok(())
}

/// Change a user's name, email or password.
///
/// # Errors
///
/// Returns error if no field is given, the user does not exist, or the
/// record store rejects the write.
pub async fn edit(state: &AppState, id: &str, edit: ProfileEdit) -> Result<(), CommandError> {
    if edit.is_empty() {
        return Err(CommandError::InvalidArguments(
            "nothing to change: pass --name, --email or --password".to_string(),
        ));
    }

    let user = state.records().edit_user(&UserId::new(id), edit).await?;
    tracing::info!("Updated user {id}");

    #[allow(clippy::print_stdout)]
    {
        println!(
            "{:<10} {:<24} {:<32}",
            user.id.as_str(),
            user.display_name(),
            user.email.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

/// Delete a user record.
///
/// # Errors
///
/// Returns error if the record store rejects the delete.
pub async fn delete(state: &AppState, id: &str) -> Result<(), CommandError> {
    state.records().delete_user(&UserId::new(id)).await?;
    tracing::info!("Deleted user {id}");
    Ok(())
}
