//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Product, ProductCategory, ProductCreate, ProductUpdate, Review};
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find products in a category, newest first
    pub async fn find_by_category(&self, category: ProductCategory) -> RepoResult<Vec<Product>> {
        let category = serde_json::to_value(category)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE category = $category ORDER BY created_at DESC")
            .bind(("category", category))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let now = now_millis();
        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            stock: data.stock,
            category: data.category,
            image: data.image,
            reviews: Vec::new(),
            average_rating: 0.0,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Partially update a product
    pub async fn update(&self, id: &str, mut data: ProductUpdate) -> RepoResult<Product> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        data.updated_at = Some(now_millis());

        let updated: Option<Product> = self
            .base
            .db()
            .update((PRODUCT_TABLE, pure_id))
            .merge(data)
            .await?;

        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        let result: Option<Product> = self.base.db().delete((PRODUCT_TABLE, pure_id)).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }

    /// Decrement stock by `qty`, floored at zero
    ///
    /// Used by the order engine after an order commit; the order is already
    /// authoritative, so callers treat failures as best-effort.
    pub async fn decrement_stock(&self, id: &str, qty: i32) -> RepoResult<()> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        self.base
            .db()
            .query("UPDATE type::thing($table, $id) SET stock = math::max(stock - $qty, 0), updated_at = $now")
            .bind(("table", PRODUCT_TABLE))
            .bind(("id", pure_id))
            .bind(("qty", qty))
            .bind(("now", now_millis()))
            .await?;
        Ok(())
    }

    /// Append a review and recompute the average rating
    pub async fn add_review(&self, id: &str, review: Review) -> RepoResult<Product> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        let mut product = self
            .find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        product.reviews.push(review);
        let sum: i64 = product.reviews.iter().map(|r| i64::from(r.rating)).sum();
        product.average_rating = sum as f64 / product.reviews.len() as f64;
        product.updated_at = now_millis();
        // The record id is the update key, not part of the content
        product.id = None;

        let updated: Option<Product> = self
            .base
            .db()
            .update((PRODUCT_TABLE, pure_id))
            .content(product)
            .await?;

        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Total product count (admin stats)
    pub async fn count(&self) -> RepoResult<i64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM product GROUP ALL")
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(|r| r.count).unwrap_or(0))
    }
}

#[derive(serde::Deserialize)]
struct CountRow {
    count: i64,
}
