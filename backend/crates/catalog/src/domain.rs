//! Catalog Domain
//!
//! Product model, listing parameters, and the two storage seams
//! (relational store, image object storage).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::CatalogResult;

/// A catalog product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for a product being created
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub image_url: Option<String>,
}

/// Partial update; `None` fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub image_url: Option<Option<String>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.image_url.is_none()
    }

    /// Apply the patch to an existing product
    pub fn apply(self, mut product: Product) -> Product {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url;
        }
        product
    }
}

/// Sortable columns for the listing endpoint.
///
/// A closed set; anything else in the query string falls back to
/// [`SortColumn::Name`] instead of reaching the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Name,
    Price,
}

impl SortColumn {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Price => "price",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "price" => SortColumn::Price,
            _ => SortColumn::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "desc" => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

/// Normalized listing parameters. Page and page size are 1-based; a zero
/// in either field is treated as 1, so the derived offset/limit/page-count
/// arithmetic is total whatever the caller constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub sort_by: SortColumn,
    pub order: SortOrder,
    pub page: u32,
    pub per_page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            sort_by: SortColumn::Name,
            order: SortOrder::Ascending,
            page: 1,
            per_page: 10,
        }
    }
}

impl ListParams {
    pub fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page.max(1))
    }
}

/// One page of products plus the pagination envelope
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_products: i64,
    pub total_pages: i64,
    pub current_page: u32,
}

impl ProductPage {
    pub fn new(products: Vec<Product>, total_products: i64, params: &ListParams) -> Self {
        let per_page = params.limit();
        let total_pages = (total_products + per_page - 1) / per_page;
        Self {
            products,
            total_products,
            total_pages,
            current_page: params.page.max(1),
        }
    }
}

/// Relational product store
#[trait_variant::make(CatalogStore: Send)]
pub trait LocalCatalogStore {
    async fn list(&self, params: &ListParams) -> CatalogResult<ProductPage>;
    async fn find(&self, id: Uuid) -> CatalogResult<Option<Product>>;
    async fn insert(&self, product: &NewProduct) -> CatalogResult<Product>;
    async fn update(&self, id: Uuid, patch: ProductPatch) -> CatalogResult<Option<Product>>;
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Object storage for product images.
///
/// Deletion takes the stored public URL; the implementation derives the
/// storage object key from it.
#[trait_variant::make(ImageStore: Send)]
pub trait LocalImageStore {
    async fn delete_image(&self, image_url: &str) -> CatalogResult<()>;
}
