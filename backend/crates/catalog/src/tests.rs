//! Unit tests for the catalog crate
//!
//! Exercises the HTTP surface against in-memory store implementations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use crate::domain::{
    CatalogStore, ImageStore, ListParams, NewProduct, Product, ProductPage, ProductPatch,
    SortColumn, SortOrder,
};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::handlers::CatalogAppState;
use crate::presentation::router::{admin_routes, public_routes};

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
struct MemoryStoreInner {
    products: Mutex<HashMap<Uuid, Product>>,
}

#[derive(Clone, Default)]
struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

impl MemoryStore {
    fn with_product(self, name: &str, price: f64, image_url: Option<&str>) -> (Self, Uuid) {
        let id = Uuid::new_v4();
        self.inner.products.lock().unwrap().insert(
            id,
            Product {
                id,
                name: name.to_string(),
                description: String::new(),
                price,
                stock: 1,
                image_url: image_url.map(str::to_string),
                created_at: Utc::now(),
            },
        );
        (self, id)
    }

    fn contains(&self, id: Uuid) -> bool {
        self.inner.products.lock().unwrap().contains_key(&id)
    }
}

impl CatalogStore for MemoryStore {
    async fn list(&self, params: &ListParams) -> CatalogResult<ProductPage> {
        let mut products: Vec<Product> =
            self.inner.products.lock().unwrap().values().cloned().collect();

        products.sort_by(|a, b| {
            let ordering = match params.sort_by {
                SortColumn::Name => a.name.cmp(&b.name),
                SortColumn::Price => a.price.total_cmp(&b.price),
            };
            match params.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        let total = products.len() as i64;
        let page: Vec<Product> = products
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit() as usize)
            .collect();

        Ok(ProductPage::new(page, total, params))
    }

    async fn find(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        Ok(self.inner.products.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, product: &NewProduct) -> CatalogResult<Product> {
        let created = Product {
            id: Uuid::new_v4(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            image_url: product.image_url.clone(),
            created_at: Utc::now(),
        };
        self.inner
            .products
            .lock()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, patch: ProductPatch) -> CatalogResult<Option<Product>> {
        let mut products = self.inner.products.lock().unwrap();
        let Some(current) = products.get(&id).cloned() else {
            return Ok(None);
        };
        let updated = patch.apply(current);
        products.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.inner.products.lock().unwrap().remove(&id).is_some())
    }
}

// ============================================================================
// In-memory image store
// ============================================================================

#[derive(Default)]
struct MemoryImagesInner {
    fail: AtomicBool,
    deletes: AtomicUsize,
    last_url: Mutex<Option<String>>,
}

#[derive(Clone, Default)]
struct MemoryImages {
    inner: Arc<MemoryImagesInner>,
}

impl MemoryImages {
    fn failing(self) -> Self {
        self.inner.fail.store(true, Ordering::SeqCst);
        self
    }

    fn deletes(&self) -> usize {
        self.inner.deletes.load(Ordering::SeqCst)
    }
}

impl ImageStore for MemoryImages {
    async fn delete_image(&self, image_url: &str) -> CatalogResult<()> {
        self.inner.deletes.fetch_add(1, Ordering::SeqCst);
        *self.inner.last_url.lock().unwrap() = Some(image_url.to_string());
        if self.inner.fail.load(Ordering::SeqCst) {
            return Err(CatalogError::Storage("bucket unavailable".into()));
        }
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn app(store: MemoryStore, images: MemoryImages) -> Router {
    let state = CatalogAppState::new(Arc::new(store), Arc::new(images));
    public_routes(state.clone()).merge(admin_routes(state))
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn bare_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Listing
// ============================================================================

mod list_tests {
    use super::*;

    #[tokio::test]
    async fn pagination_envelope_and_sorting() {
        let store = MemoryStore::default();
        let (store, _) = store.with_product("banana", 3.0, None);
        let (store, _) = store.with_product("apple", 2.0, None);
        let (store, _) = store.with_product("cherry", 5.0, None);
        let app = app(store, MemoryImages::default());

        let response = app
            .clone()
            .oneshot(bare_request("GET", "/?sortBy=price&order=desc&limit=2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["totalProducts"], 3);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["currentPage"], 1);
        assert_eq!(body["products"][0]["name"], "cherry");
        assert_eq!(body["products"][1]["name"], "banana");

        let response = app
            .oneshot(bare_request("GET", "/?sortBy=price&order=desc&limit=2&page=2"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["currentPage"], 2);
        assert_eq!(body["products"][0]["name"], "apple");
    }

    #[tokio::test]
    async fn malformed_query_parameters_fall_back_to_defaults() {
        let (store, _) = MemoryStore::default().with_product("only", 1.0, None);
        let app = app(store, MemoryImages::default());

        let response = app
            .oneshot(bare_request(
                "GET",
                "/?sortBy=evil&order=sideways&page=-3&limit=zero",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["currentPage"], 1);
        assert_eq!(body["products"][0]["name"], "only");
    }
}

// ============================================================================
// Detail
// ============================================================================

mod detail_tests {
    use super::*;

    #[tokio::test]
    async fn unknown_product_is_404() {
        let app = app(MemoryStore::default(), MemoryImages::default());

        let response = app
            .oneshot(bare_request("GET", &format!("/{}", Uuid::new_v4())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn detail_returns_camel_case_product() {
        let (store, id) = MemoryStore::default().with_product("lamp", 25.0, Some("https://img/l.png"));
        let app = app(store, MemoryImages::default());

        let response = app
            .oneshot(bare_request("GET", &format!("/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["id"], id.to_string());
        assert_eq!(body["imageUrl"], "https://img/l.png");
        assert!(body.get("createdAt").is_some());
    }
}

// ============================================================================
// Create / update
// ============================================================================

mod mutation_tests {
    use super::*;

    #[tokio::test]
    async fn create_returns_201_with_generated_id() {
        let store = MemoryStore::default();
        let app = app(store.clone(), MemoryImages::default());

        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                serde_json::json!({"name": "Mug", "price": 9.99, "stock": 12}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
        assert!(store.contains(id));
        assert_eq!(body["stock"], 12);
    }

    #[tokio::test]
    async fn create_rejects_blank_name_and_negative_price() {
        let app = app(MemoryStore::default(), MemoryImages::default());

        for payload in [
            serde_json::json!({"name": "   ", "price": 1.0}),
            serde_json::json!({"name": "Mug", "price": -1.0}),
        ] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/", payload))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn update_patches_only_sent_fields() {
        let (store, id) = MemoryStore::default().with_product("lamp", 25.0, Some("https://img/l.png"));
        let app = app(store, MemoryImages::default());

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/{id}"),
                serde_json::json!({"price": 19.5}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["price"], 19.5);
        assert_eq!(body["name"], "lamp");
        assert_eq!(body["imageUrl"], "https://img/l.png");

        // Explicit null clears the image
        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/{id}"),
                serde_json::json!({"imageUrl": null}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["imageUrl"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn update_unknown_product_is_404_and_empty_patch_is_400() {
        let (store, id) = MemoryStore::default().with_product("lamp", 25.0, None);
        let app = app(store, MemoryImages::default());

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/{}", Uuid::new_v4()),
                serde_json::json!({"price": 1.0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(json_request("PUT", &format!("/{id}"), serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// ============================================================================
// Delete
// ============================================================================

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn delete_removes_product_and_image() {
        let (store, id) =
            MemoryStore::default().with_product("lamp", 25.0, Some("https://img/l.png"));
        let images = MemoryImages::default();
        let app = app(store.clone(), images.clone());

        let response = app
            .oneshot(bare_request("DELETE", &format!("/{id}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!store.contains(id));
        assert_eq!(images.deletes(), 1);
    }

    #[tokio::test]
    async fn image_storage_failure_does_not_block_deletion() {
        let (store, id) =
            MemoryStore::default().with_product("lamp", 25.0, Some("https://img/l.png"));
        let images = MemoryImages::default().failing();
        let app = app(store.clone(), images.clone());

        let response = app
            .oneshot(bare_request("DELETE", &format!("/{id}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!store.contains(id), "product goes even when the image is stuck");
        assert_eq!(images.deletes(), 1);
    }

    #[tokio::test]
    async fn delete_without_image_skips_storage() {
        let (store, id) = MemoryStore::default().with_product("lamp", 25.0, None);
        let images = MemoryImages::default();
        let app = app(store, images.clone());

        let response = app
            .oneshot(bare_request("DELETE", &format!("/{id}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(images.deletes(), 0);
    }

    #[tokio::test]
    async fn delete_unknown_product_is_404() {
        let app = app(MemoryStore::default(), MemoryImages::default());

        let response = app
            .oneshot(bare_request("DELETE", &format!("/{}", Uuid::new_v4())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
