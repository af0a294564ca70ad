//! # Catalog Repository
//!
//! Database operations for the service and product catalog.
//!
//! The engine reads the catalog to seed comanda items; everything billed
//! is snapshotted onto the item at add time, so edits here never rewrite
//! open comandas or settled history.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use navalha_core::{ProductOffering, ServiceOffering};

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// Gets a service by ID.
    pub async fn get_service(&self, id: &str) -> DbResult<Option<ServiceOffering>> {
        let service = sqlx::query_as::<_, ServiceOffering>(
            r#"
            SELECT id, tenant_id, name, price_cents, duration_minutes,
                   category, custom_rate_bps, is_active
            FROM services
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    /// Inserts a service.
    pub async fn insert_service(&self, service: &ServiceOffering) -> DbResult<()> {
        debug!(id = %service.id, name = %service.name, "Inserting service");

        sqlx::query(
            r#"
            INSERT INTO services (
                id, tenant_id, name, price_cents, duration_minutes,
                category, custom_rate_bps, is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&service.id)
        .bind(&service.tenant_id)
        .bind(&service.name)
        .bind(service.price_cents)
        .bind(service.duration_minutes)
        .bind(&service.category)
        .bind(service.custom_rate_bps)
        .bind(service.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists bookable services.
    pub async fn list_active_services(&self, tenant_id: &str) -> DbResult<Vec<ServiceOffering>> {
        let services = sqlx::query_as::<_, ServiceOffering>(
            r#"
            SELECT id, tenant_id, name, price_cents, duration_minutes,
                   category, custom_rate_bps, is_active
            FROM services
            WHERE tenant_id = ?1 AND is_active = 1
            ORDER BY name
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    /// Updates a service's price and commission override.
    pub async fn update_service_pricing(
        &self,
        id: &str,
        price_cents: i64,
        custom_rate_bps: Option<i64>,
    ) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE services SET price_cents = ?2, custom_rate_bps = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(price_cents)
        .bind(custom_rate_bps)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Service", id));
        }

        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Gets a product by ID.
    pub async fn get_product(&self, id: &str) -> DbResult<Option<ProductOffering>> {
        let product = sqlx::query_as::<_, ProductOffering>(
            r#"
            SELECT id, tenant_id, name, price_cents, cost_cents,
                   commission_rate_bps, is_active
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a product.
    pub async fn insert_product(&self, product: &ProductOffering) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, tenant_id, name, price_cents, cost_cents,
                commission_rate_bps, is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.tenant_id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.cost_cents)
        .bind(product.commission_rate_bps)
        .bind(product.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists sellable products.
    pub async fn list_active_products(&self, tenant_id: &str) -> DbResult<Vec<ProductOffering>> {
        let products = sqlx::query_as::<_, ProductOffering>(
            r#"
            SELECT id, tenant_id, name, price_cents, cost_cents,
                   commission_rate_bps, is_active
            FROM products
            WHERE tenant_id = ?1 AND is_active = 1
            ORDER BY name
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_service_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let service = ServiceOffering {
            id: "s1".to_string(),
            tenant_id: "t1".to_string(),
            name: "Corte".to_string(),
            price_cents: 5000,
            duration_minutes: 30,
            category: "corte".to_string(),
            custom_rate_bps: None,
            is_active: true,
        };
        db.catalog().insert_service(&service).await.unwrap();

        let fetched = db.catalog().get_service("s1").await.unwrap().unwrap();
        assert_eq!(fetched.price_cents, 5000);
        assert_eq!(fetched.category, "corte");
    }

    #[tokio::test]
    async fn test_inactive_products_hidden() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let active = ProductOffering {
            id: "pr1".to_string(),
            tenant_id: "t1".to_string(),
            name: "Pomada".to_string(),
            price_cents: 3000,
            cost_cents: 1200,
            commission_rate_bps: 1000,
            is_active: true,
        };
        let inactive = ProductOffering {
            id: "pr2".to_string(),
            name: "Shampoo".to_string(),
            is_active: false,
            ..active.clone()
        };
        db.catalog().insert_product(&active).await.unwrap();
        db.catalog().insert_product(&inactive).await.unwrap();

        let listed = db.catalog().list_active_products("t1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "pr1");
    }
}
