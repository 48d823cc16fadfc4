//! Catalog DTOs

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::{ListParams, Product, ProductPage, SortColumn, SortOrder};

// ============================================================================
// Listing
// ============================================================================

/// Raw query string for the listing endpoint.
///
/// Everything is an optional string: unknown or malformed values fall back
/// to the defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn into_params(self) -> ListParams {
        let defaults = ListParams::default();
        ListParams {
            sort_by: self
                .sort_by
                .as_deref()
                .map(SortColumn::parse)
                .unwrap_or_default(),
            order: self
                .order
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
            page: parse_clamped(self.page.as_deref(), defaults.page),
            per_page: parse_clamped(self.limit.as_deref(), defaults.per_page),
        }
    }
}

/// Parse a 1-based numeric parameter, clamping to at least 1
fn parse_clamped(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.parse::<u32>().ok())
        .map(|n| n.max(1))
        .unwrap_or(default)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub products: Vec<ProductDto>,
    pub total_products: i64,
    pub total_pages: i64,
    pub current_page: u32,
}

impl From<ProductPage> for ListResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            products: page.products.into_iter().map(ProductDto::from).collect(),
            total_products: page.total_products,
            total_pages: page.total_pages,
            current_page: page.current_page,
        }
    }
}

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            image_url: product.image_url,
            created_at: product.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial update. `imageUrl` distinguishes absent (keep) from explicit
/// null (clear) via the double option.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults_and_clamping() {
        let params = ListQuery::default().into_params();
        assert_eq!(params, ListParams::default());

        let params = ListQuery {
            sort_by: Some("price".into()),
            order: Some("desc".into()),
            page: Some("0".into()),
            limit: Some("abc".into()),
        }
        .into_params();

        assert_eq!(params.sort_by, SortColumn::Price);
        assert_eq!(params.order, SortOrder::Descending);
        assert_eq!(params.page, 1, "page clamps to 1");
        assert_eq!(params.per_page, 10, "unparseable limit falls back");
    }

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let absent: UpdateProductRequest = serde_json::from_str(r#"{"price": 2.5}"#).unwrap();
        assert_eq!(absent.image_url, None);

        let null: UpdateProductRequest =
            serde_json::from_str(r#"{"imageUrl": null}"#).unwrap();
        assert_eq!(null.image_url, Some(None));

        let set: UpdateProductRequest =
            serde_json::from_str(r#"{"imageUrl": "https://img/x.png"}"#).unwrap();
        assert_eq!(set.image_url, Some(Some("https://img/x.png".into())));
    }
}
