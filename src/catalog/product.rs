//! The catalog data model.
//!
//! `Product` and `Page` are decoded straight from the catalog service's JSON
//! payloads and are immutable from then on.  Every other part of the
//! application (the store, the trigger policy, the UI) works against these
//! two types and never against raw payload bytes.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::fetch::DecodeError;

/// A single catalog entry, decoded from one page of the product listing.
///
/// List payloads omit `descriptions` (it only appears on the detail
/// endpoint), so that field is optional here.  Values are never mutated
/// after decoding; the store hands out shared slices of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Catalog-wide identifier.  Not assumed unique across pages: the
    /// upstream service may repeat an item, and repeats are kept as-is.
    pub id: u64,

    /// Display name.
    pub title: String,

    /// Original price, in minor units of `currency`.
    pub price: u64,

    /// Sale price, present only while the product is discounted.
    pub discounted_price: Option<u64>,

    /// ISO currency code (e.g. "KRW", "USD").
    pub currency: String,

    /// Units in stock; zero means sold out.
    pub stock: u64,

    /// Long-form description, only present on detail payloads.
    pub descriptions: Option<String>,

    /// Thumbnail URLs, most representative first.
    #[serde(default)]
    pub thumbnails: Vec<String>,

    /// Listing timestamp as epoch seconds, as the service reports it.
    pub registration_date: Option<f64>,
}

impl Product {
    /// The listing timestamp as a UTC datetime, if the payload carried one.
    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        self.registration_date
            .and_then(|secs| DateTime::from_timestamp(secs as i64, 0))
    }

    /// The URL the thumbnail collaborator should resolve for this product.
    pub fn primary_thumbnail(&self) -> Option<&str> {
        self.thumbnails.first().map(String::as_str)
    }
}

/// One batch of products returned by a single catalog query.
///
/// The service exposes no has-next flag: a page with an empty item list is
/// the end-of-catalog signal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    /// The page number this batch answers.
    pub page: u32,

    /// Products in listing order.  The wire field is named `items`.
    #[serde(rename = "items")]
    pub products: Vec<Product>,
}

impl Page {
    /// Decode a raw catalog payload.
    ///
    /// Pure (no I/O), so tests can exercise the decoding rules without a
    /// network in the loop.  The transport half lives in
    /// [`Transport`](super::Transport).
    pub fn from_json(bytes: &[u8]) -> Result<Page, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Whether this page marks the end of the catalog.
    pub fn is_last(&self) -> bool {
        self.products.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_decodes_a_full_page() {
        let body = br#"{
            "page": 1,
            "items": [
                {
                    "id": 42,
                    "title": "MacBook Pro",
                    "price": 1690000,
                    "discounted_price": 1490000,
                    "currency": "KRW",
                    "stock": 3,
                    "thumbnails": ["https://example.com/42-1.png", "https://example.com/42-2.png"],
                    "registration_date": 1611523563.719116
                },
                {
                    "id": 43,
                    "title": "Pencil",
                    "price": 1200,
                    "currency": "KRW",
                    "stock": 0,
                    "thumbnails": []
                }
            ]
        }"#;

        let page = Page::from_json(body).unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.products.len(), 2);
        assert!(!page.is_last());

        let first = &page.products[0];
        assert_eq!(first.id, 42);
        assert_eq!(first.title, "MacBook Pro");
        assert_eq!(first.price, 1690000);
        assert_eq!(first.discounted_price, Some(1490000));
        assert_eq!(first.currency, "KRW");
        assert_eq!(first.stock, 3);
        assert_eq!(first.primary_thumbnail(), Some("https://example.com/42-1.png"));

        let second = &page.products[1];
        assert_eq!(second.discounted_price, None);
        assert_eq!(second.descriptions, None);
        assert!(second.primary_thumbnail().is_none());
    }

    #[test]
    fn empty_item_list_is_the_last_page() {
        let page = Page::from_json(br#"{"page": 7, "items": []}"#).unwrap();
        assert_eq!(page.page, 7);
        assert!(page.is_last());
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        assert!(Page::from_json(b"<html>502 Bad Gateway</html>").is_err());
        assert!(Page::from_json(br#"{"page": 1}"#).is_err(), "items field is required");
    }

    #[test]
    fn registered_at_converts_epoch_seconds() {
        let page = Page::from_json(
            br#"{"page": 1, "items": [{
                "id": 1, "title": "t", "price": 1, "currency": "KRW",
                "stock": 1, "registration_date": 1611523563.719116
            }]}"#,
        )
        .unwrap();

        let when = page.products[0].registered_at().unwrap();
        assert_eq!(when.format("%Y-%m-%d").to_string(), "2021-01-24");
    }

    #[test]
    fn registered_at_is_none_when_absent() {
        let page = Page::from_json(
            br#"{"page": 1, "items": [{
                "id": 1, "title": "t", "price": 1, "currency": "KRW", "stock": 1
            }]}"#,
        )
        .unwrap();

        assert!(page.products[0].registered_at().is_none());
    }
}
