//! User records from the record store.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::UserId;
use crate::cart::CartLineItem;
use crate::favorites::FavoriteItem;

/// A user record as stored remotely.
///
/// Only the session-relevant fields are typed. Everything else on the record
/// (password, phone, avatar) is carried through `profile` untouched so a PUT
/// of this record never drops fields the client does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub cart: Vec<CartLineItem>,
    #[serde(default)]
    pub favorites: Vec<FavoriteItem>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl UserRecord {
    /// Name to show in listings, falling back to email then ID.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_else(|| self.id.as_str())
    }

    /// Overwrite the account fields set in `edit`, leaving everything else
    /// (cart, favorites, unknown profile fields) as it is.
    pub fn apply_edit(&mut self, edit: ProfileEdit) {
        if let Some(name) = edit.name {
            self.name = Some(name);
        }
        if let Some(email) = edit.email {
            self.email = Some(email);
        }
        if let Some(password) = edit.password {
            self.profile
                .insert(PASSWORD_FIELD.to_string(), Value::String(password));
        }
    }
}

/// Record field holding the account password.
const PASSWORD_FIELD: &str = "password";

/// Account fields an admin can change on a user record.
///
/// `None` keeps the current value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProfileEdit {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl ProfileEdit {
    /// Whether the edit changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

impl fmt::Debug for ProfileEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileEdit")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cart_and_favorites_default_empty() {
        let user: UserRecord =
            serde_json::from_str(r#"{"id": "12", "name": "Sara", "email": "sara@example.com"}"#)
                .unwrap();
        assert!(user.cart.is_empty());
        assert!(user.favorites.is_empty());
        assert_eq!(user.display_name(), "Sara");
    }

    #[test]
    fn test_unknown_fields_survive_roundtrip() {
        let json = r#"{"id": "3", "email": "a@b.c", "password": "Secret1", "phone": "0100"}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["password"], "Secret1");
        assert_eq!(value["phone"], "0100");
        assert_eq!(user.display_name(), "a@b.c");
    }

    #[test]
    fn test_apply_edit_keeps_untouched_fields() {
        let json = r#"{
            "id": "3",
            "name": "Sara",
            "email": "sara@example.com",
            "password": "Secret1",
            "phone": "0100",
            "cart": [{"id": 1, "name": "Toner", "price": 15, "quantity": 2}]
        }"#;
        let mut user: UserRecord = serde_json::from_str(json).unwrap();

        user.apply_edit(ProfileEdit {
            email: Some("sara.ali@example.com".to_string()),
            password: Some("Secret2".to_string()),
            ..ProfileEdit::default()
        });

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["name"], "Sara");
        assert_eq!(value["email"], "sara.ali@example.com");
        assert_eq!(value["password"], "Secret2");
        assert_eq!(value["phone"], "0100");
        assert_eq!(user.cart.len(), 1);
    }

    #[test]
    fn test_profile_edit_debug_redacts_password() {
        let edit = ProfileEdit {
            password: Some("Secret2".to_string()),
            ..ProfileEdit::default()
        };
        assert!(!edit.is_empty());
        assert!(!format!("{edit:?}").contains("Secret2"));
        assert!(ProfileEdit::default().is_empty());
    }
}
