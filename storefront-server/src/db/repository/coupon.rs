//! Coupon Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Coupon, CouponCreate};
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const COUPON_TABLE: &str = "coupon";

#[derive(Clone)]
pub struct CouponRepository {
    base: BaseRepository,
}

impl CouponRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all coupons (admin view)
    pub async fn find_all(&self) -> RepoResult<Vec<Coupon>> {
        let coupons: Vec<Coupon> = self
            .base
            .db()
            .query("SELECT * FROM coupon ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(coupons)
    }

    /// Find active, unexpired coupons (public storefront listing)
    pub async fn find_active(&self, now: i64) -> RepoResult<Vec<Coupon>> {
        let coupons: Vec<Coupon> = self
            .base
            .db()
            .query("SELECT * FROM coupon WHERE is_active = true AND expiration > $now")
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(coupons)
    }

    /// Find a coupon by its code
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Coupon>> {
        let coupons: Vec<Coupon> = self
            .base
            .db()
            .query("SELECT * FROM coupon WHERE code = $code")
            .bind(("code", code.to_string()))
            .await?
            .take(0)?;
        Ok(coupons.into_iter().next())
    }

    /// Create a new coupon (codes are unique)
    pub async fn create(&self, data: CouponCreate) -> RepoResult<Coupon> {
        let coupon = Coupon {
            id: None,
            code: data.code,
            discount: data.discount,
            min_amount: data.min_amount.unwrap_or(0.0),
            expiration: data.expiration,
            is_active: data.is_active.unwrap_or(true),
            created_at: now_millis(),
        };

        let result: Result<Option<Coupon>, surrealdb::Error> = self
            .base
            .db()
            .create(COUPON_TABLE)
            .content(coupon)
            .await;

        match result {
            Ok(created) => {
                created.ok_or_else(|| RepoError::Database("Failed to create coupon".to_string()))
            }
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("coupon_code_unique") || msg.contains("already contains") {
                    Err(RepoError::Duplicate("Coupon code already exists".to_string()))
                } else {
                    Err(e.into())
                }
            }
        }
    }

    /// Hard delete a coupon
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(COUPON_TABLE, id).to_string();
        let result: Option<Coupon> = self.base.db().delete((COUPON_TABLE, pure_id)).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Coupon {} not found", id)));
        }
        Ok(())
    }
}
