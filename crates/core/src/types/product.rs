//! Products served by the public skincare catalog API.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size: String,
    pub price: Price,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_bestseller: bool,
    #[serde(default)]
    pub is_new_formula: bool,
}

/// Distinct categories in the order they first appear.
#[must_use]
pub fn distinct_categories(products: &[Product]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for product in products {
        let category = product.category.as_str();
        if !category.is_empty() && !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            size: String::new(),
            price: Price::from_dollars(10),
            category: category.to_string(),
            image_url: String::new(),
            is_bestseller: false,
            is_new_formula: false,
        }
    }

    #[test]
    fn test_parses_catalog_shape() {
        let json = r#"{
            "id": 4,
            "name": "Night Masque",
            "price": 32,
            "category": "Masks",
            "imageUrl": "https://cdn.example/masque.png",
            "isBestseller": true
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(4));
        assert_eq!(product.price, Price::from_dollars(32));
        assert!(product.is_bestseller);
        assert!(!product.is_new_formula);
        assert!(product.description.is_empty());
    }

    #[test]
    fn test_distinct_categories_first_seen_order() {
        let products = vec![
            product(1, "Serums"),
            product(2, "Cleansers"),
            product(3, "Serums"),
            product(4, ""),
            product(5, "Masks"),
        ];
        assert_eq!(
            distinct_categories(&products),
            vec!["Serums", "Cleansers", "Masks"]
        );
    }
}
