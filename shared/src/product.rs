//! Product item model

use serde::{Deserialize, Serialize};

/// One product as served by the catalog list endpoint.
///
/// Wire keys are remapped to readable names (`productId`, `productName`,
/// `productImage`). The identity key is `id`; the two description fields
/// are optional on the wire and read back as empty strings when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductItem {
    #[serde(rename = "productId")]
    pub id: String,

    #[serde(rename = "productName")]
    pub name: String,

    /// Display-formatted price string, e.g. "$24.99".
    pub price: String,

    #[serde(rename = "productImage")]
    pub image_url: String,

    /// Review average, 0.0..=5.0.
    #[serde(rename = "reviewRating")]
    pub review_rating: f32,

    #[serde(rename = "reviewCount")]
    pub review_count: u32,

    #[serde(rename = "inStock")]
    pub in_stock: bool,

    #[serde(
        rename = "shortDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub short_description: Option<String>,

    #[serde(
        rename = "longDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub long_description: Option<String>,
}

impl ProductItem {
    /// Short description, empty when the server omitted it.
    pub fn short_description(&self) -> &str {
        self.short_description.as_deref().unwrap_or("")
    }

    /// Long description, empty when the server omitted it.
    pub fn long_description(&self) -> &str {
        self.long_description.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_keys() {
        let json = r#"{
            "productId": "p-42",
            "productName": "Garden Hose",
            "price": "$24.99",
            "productImage": "https://img.example.com/p-42.jpg",
            "reviewRating": 4.5,
            "reviewCount": 128,
            "inStock": true,
            "shortDescription": "50ft hose"
        }"#;

        let item: ProductItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "p-42");
        assert_eq!(item.name, "Garden Hose");
        assert_eq!(item.image_url, "https://img.example.com/p-42.jpg");
        assert_eq!(item.review_count, 128);
        assert!(item.in_stock);
        assert_eq!(item.short_description(), "50ft hose");
        assert_eq!(item.long_description(), "");
    }

    #[test]
    fn missing_descriptions_read_as_empty() {
        let json = r#"{
            "productId": "p-1",
            "productName": "Widget",
            "price": "$1.00",
            "productImage": "https://img.example.com/p-1.png",
            "reviewRating": 0.0,
            "reviewCount": 0,
            "inStock": false
        }"#;

        let item: ProductItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.short_description(), "");
        assert_eq!(item.long_description(), "");
        assert!(item.short_description.is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let item = ProductItem {
            id: "p-7".into(),
            name: "Lamp".into(),
            price: "$10.00".into(),
            image_url: "https://img.example.com/p-7.jpg".into(),
            review_rating: 3.5,
            review_count: 12,
            in_stock: true,
            short_description: Some("desk lamp".into()),
            long_description: None,
        };

        let json = serde_json::to_string(&item).unwrap();
        let back: ProductItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
