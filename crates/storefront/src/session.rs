//! Signed-in shopper context.
//!
//! A [`Session`] owns the cart and favorites of whoever is using the
//! storefront. Signing in hydrates both from the user's record; signing out
//! clears them. Nothing here is global: callers hold the session they work
//! with and pass it around explicitly.

use std::fmt;

use secrecy::SecretString;
use tracing::{debug, instrument};

use glowcart_core::{Cart, CheckoutSummary, Favorites, UserId, UserRecord};

use crate::error::{Result, StoreError};
use crate::records::RecordsClient;

/// Credentials of the signed-in user.
struct SignedIn {
    token: SecretString,
    user_id: UserId,
}

/// Cart, favorites and sign-in state for one shopper.
#[derive(Default)]
pub struct Session {
    signed_in: Option<SignedIn>,
    cart: Cart,
    favorites: Favorites,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id())
            .field("cart", &self.cart)
            .field("favorites", &self.favorites)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// A guest session with an empty cart.
    #[must_use]
    pub fn guest() -> Self {
        Self::default()
    }

    /// Sign in as `user`, replacing cart and favorites with the ones stored
    /// on the record.
    pub fn login(&mut self, token: SecretString, user: &UserRecord) {
        self.cart.replace_all(user.cart.iter().cloned());
        self.favorites.replace_all(user.favorites.iter().cloned());
        self.signed_in = Some(SignedIn {
            token,
            user_id: user.id.clone(),
        });
        debug!(
            user_id = %user.id,
            cart_items = self.cart.len(),
            favorites = self.favorites.len(),
            "Session hydrated"
        );
    }

    /// Fetch the user's record and sign in with it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user does not exist, or the
    /// request failure. The session is unchanged on error.
    #[instrument(skip(self, records, token))]
    pub async fn restore(
        &mut self,
        records: &RecordsClient,
        token: SecretString,
        user_id: &UserId,
    ) -> Result<()> {
        let user = records.get_user(user_id).await?;
        self.login(token, &user);
        Ok(())
    }

    /// Sign out, dropping the token, cart and favorites.
    pub fn logout(&mut self) {
        self.signed_in = None;
        self.cart.clear();
        self.favorites.clear();
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.signed_in.is_some()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.signed_in.as_ref().map(|s| &s.user_id)
    }

    /// Session token for authenticated requests.
    #[must_use]
    pub fn token(&self) -> Option<&SecretString> {
        self.signed_in.as_ref().map(|s| &s.token)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub const fn favorites_mut(&mut self) -> &mut Favorites {
        &mut self.favorites
    }

    /// Totals for the checkout page.
    #[must_use]
    pub fn checkout_summary(&self) -> CheckoutSummary {
        CheckoutSummary::for_cart(&self.cart)
    }

    /// Write the current cart and favorites back to the user's record.
    ///
    /// The record is re-read first so profile fields edited elsewhere are
    /// kept; only `cart` and `favorites` are overwritten.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotSignedIn` for a guest session, or the request
    /// failure.
    #[instrument(skip(self, records), fields(user_id = ?self.user_id()))]
    pub async fn sync_profile(&self, records: &RecordsClient) -> Result<UserRecord> {
        let user_id = self.user_id().ok_or(StoreError::NotSignedIn)?;

        let mut record = records.get_user(user_id).await?;
        record.cart = self.cart.items().to_vec();
        record.favorites = self.favorites.items().to_vec();

        records.put_user(&record).await
    }
}
