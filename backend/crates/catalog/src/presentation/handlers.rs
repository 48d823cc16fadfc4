//! Catalog HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CatalogStore, ImageStore, NewProduct, ProductPatch};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    CreateProductRequest, DeleteResponse, ListQuery, ListResponse, ProductDto,
    UpdateProductRequest,
};

/// Shared state for catalog handlers
pub struct CatalogAppState<S, I>
where
    S: CatalogStore + Send + Sync + 'static,
    I: ImageStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub images: Arc<I>,
}

impl<S, I> CatalogAppState<S, I>
where
    S: CatalogStore + Send + Sync + 'static,
    I: ImageStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, images: Arc<I>) -> Self {
        Self { store, images }
    }
}

impl<S, I> Clone for CatalogAppState<S, I>
where
    S: CatalogStore + Send + Sync + 'static,
    I: ImageStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            images: self.images.clone(),
        }
    }
}

// ============================================================================
// Public handlers
// ============================================================================

/// GET /api/products
pub async fn list_products<S, I>(
    State(state): State<CatalogAppState<S, I>>,
    Query(query): Query<ListQuery>,
) -> CatalogResult<Json<ListResponse>>
where
    S: CatalogStore + Send + Sync + 'static,
    I: ImageStore + Send + Sync + 'static,
{
    let page = state.store.list(&query.into_params()).await?;
    Ok(Json(ListResponse::from(page)))
}

/// GET /api/products/{id}
pub async fn get_product<S, I>(
    State(state): State<CatalogAppState<S, I>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<ProductDto>>
where
    S: CatalogStore + Send + Sync + 'static,
    I: ImageStore + Send + Sync + 'static,
{
    let product = state
        .store
        .find(id)
        .await?
        .ok_or(CatalogError::NotFound)?;

    Ok(Json(ProductDto::from(product)))
}

// ============================================================================
// Admin handlers (router composes the auth gates in front of these)
// ============================================================================

/// POST /api/products
pub async fn create_product<S, I>(
    State(state): State<CatalogAppState<S, I>>,
    Json(req): Json<CreateProductRequest>,
) -> CatalogResult<impl IntoResponse>
where
    S: CatalogStore + Send + Sync + 'static,
    I: ImageStore + Send + Sync + 'static,
{
    let new_product = validate_new_product(req)?;
    let product = state.store.insert(&new_product).await?;
    Ok((StatusCode::CREATED, Json(ProductDto::from(product))))
}

/// PUT /api/products/{id}
pub async fn update_product<S, I>(
    State(state): State<CatalogAppState<S, I>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> CatalogResult<Json<ProductDto>>
where
    S: CatalogStore + Send + Sync + 'static,
    I: ImageStore + Send + Sync + 'static,
{
    let patch = validate_patch(req)?;

    let product = state
        .store
        .update(id, patch)
        .await?
        .ok_or(CatalogError::NotFound)?;

    Ok(Json(ProductDto::from(product)))
}

/// DELETE /api/products/{id}
///
/// The stored image is deleted first, best-effort: a storage failure is
/// logged and the product row is removed regardless, so the catalog never
/// keeps a product alive because its image got stuck.
pub async fn delete_product<S, I>(
    State(state): State<CatalogAppState<S, I>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<DeleteResponse>>
where
    S: CatalogStore + Send + Sync + 'static,
    I: ImageStore + Send + Sync + 'static,
{
    let product = state
        .store
        .find(id)
        .await?
        .ok_or(CatalogError::NotFound)?;

    if let Some(image_url) = &product.image_url {
        if let Err(err) = state.images.delete_image(image_url).await {
            tracing::warn!(
                product_id = %id,
                image_url = %image_url,
                error = %err,
                "Failed to delete product image; removing product anyway"
            );
        }
    }

    if !state.store.delete(id).await? {
        // Lost a race with another delete
        return Err(CatalogError::NotFound);
    }

    Ok(Json(DeleteResponse {
        message: "Product deleted".to_string(),
    }))
}

// ============================================================================
// Validation
// ============================================================================

fn validate_new_product(req: CreateProductRequest) -> CatalogResult<NewProduct> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(CatalogError::Validation("Name must not be empty".into()));
    }
    validate_price(req.price)?;
    validate_stock(req.stock)?;

    Ok(NewProduct {
        name,
        description: req.description,
        price: req.price,
        stock: req.stock,
        image_url: req.image_url,
    })
}

fn validate_patch(req: UpdateProductRequest) -> CatalogResult<ProductPatch> {
    let name = match req.name {
        Some(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(CatalogError::Validation("Name must not be empty".into()));
            }
            Some(name)
        }
        None => None,
    };
    if let Some(price) = req.price {
        validate_price(price)?;
    }
    if let Some(stock) = req.stock {
        validate_stock(stock)?;
    }

    let patch = ProductPatch {
        name,
        description: req.description,
        price: req.price,
        stock: req.stock,
        image_url: req.image_url,
    };

    if patch.is_empty() {
        return Err(CatalogError::Validation("Empty update".into()));
    }

    Ok(patch)
}

fn validate_price(price: f64) -> CatalogResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::Validation(
            "Price must be a non-negative number".into(),
        ));
    }
    Ok(())
}

fn validate_stock(stock: i32) -> CatalogResult<()> {
    if stock < 0 {
        return Err(CatalogError::Validation(
            "Stock must be non-negative".into(),
        ));
    }
    Ok(())
}
