//! PostgreSQL Catalog Store

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    CatalogStore, ListParams, NewProduct, Product, ProductPage, ProductPatch,
};
use crate::error::CatalogResult;

/// Catalog store backed by the `products` table
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for PgCatalogStore {
    async fn list(&self, params: &ListParams) -> CatalogResult<ProductPage> {
        // Sort column and order come from closed enums, never raw input
        let query = format!(
            r#"
            SELECT id, name, description, price, stock, image_url, created_at
            FROM products
            ORDER BY {} {}
            LIMIT $1 OFFSET $2
            "#,
            params.sort_by.as_sql(),
            params.order.as_sql(),
        );

        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        let products = rows.into_iter().map(ProductRow::into_product).collect();
        Ok(ProductPage::new(products, total, params))
    }

    async fn find(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, stock, image_url, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn insert(&self, product: &NewProduct) -> CatalogResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (id, name, description, price, stock, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, price, stock, image_url, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.image_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_product())
    }

    async fn update(&self, id: Uuid, patch: ProductPatch) -> CatalogResult<Option<Product>> {
        let Some(current) = self.find(id).await? else {
            return Ok(None);
        };

        let updated = patch.apply(current);

        sqlx::query(
            r#"
            UPDATE products SET
                name = $2,
                description = $3,
                price = $4,
                stock = $5,
                image_url = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&updated.name)
        .bind(&updated.description)
        .bind(updated.price)
        .bind(updated.stock)
        .bind(&updated.image_url)
        .execute(&self.pool)
        .await?;

        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    price: f64,
    stock: i32,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            image_url: self.image_url,
            created_at: self.created_at,
        }
    }
}
