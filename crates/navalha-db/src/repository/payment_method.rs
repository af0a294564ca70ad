//! # Payment Method Repository
//!
//! Database operations for configured tenders.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use navalha_core::PaymentMethod;

/// Repository for payment method database operations.
#[derive(Debug, Clone)]
pub struct PaymentMethodRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, tenant_id, name, kind, fee_bps, days_to_receive, is_active
    FROM payment_methods
"#;

impl PaymentMethodRepository {
    /// Creates a new PaymentMethodRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentMethodRepository { pool }
    }

    /// Gets a payment method by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<PaymentMethod>> {
        let method =
            sqlx::query_as::<_, PaymentMethod>(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(method)
    }

    /// Inserts a payment method. Names are unique per tenant.
    pub async fn insert(&self, method: &PaymentMethod) -> DbResult<()> {
        debug!(id = %method.id, name = %method.name, "Inserting payment method");

        sqlx::query(
            r#"
            INSERT INTO payment_methods (
                id, tenant_id, name, kind, fee_bps, days_to_receive, is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&method.id)
        .bind(&method.tenant_id)
        .bind(&method.name)
        .bind(method.kind)
        .bind(method.fee_bps)
        .bind(method.days_to_receive)
        .bind(method.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists methods offered at checkout.
    pub async fn list_active(&self, tenant_id: &str) -> DbResult<Vec<PaymentMethod>> {
        let methods = sqlx::query_as::<_, PaymentMethod>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND is_active = 1 ORDER BY name"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(methods)
    }

    /// Updates the processor fee.
    ///
    /// Ledger entries snapshot their fee at settlement; this only changes
    /// what future settlements compute.
    pub async fn update_fee(&self, id: &str, fee_bps: i64) -> DbResult<()> {
        debug!(id = %id, fee_bps, "Updating payment method fee");

        let result = sqlx::query("UPDATE payment_methods SET fee_bps = ?2 WHERE id = ?1")
            .bind(id)
            .bind(fee_bps)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Payment method", id));
        }

        Ok(())
    }

    /// Activates or retires a method.
    pub async fn set_active(&self, id: &str, is_active: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE payment_methods SET is_active = ?2 WHERE id = ?1")
            .bind(id)
            .bind(is_active)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Payment method", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use navalha_core::TenderKind;

    fn method(id: &str, name: &str, kind: TenderKind, fee_bps: i64) -> PaymentMethod {
        PaymentMethod {
            id: id.to_string(),
            tenant_id: "t1".to_string(),
            name: name.to_string(),
            kind,
            fee_bps,
            days_to_receive: 0,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.payment_methods()
            .insert(&method("m1", "Pix", TenderKind::Pix, 199))
            .await
            .unwrap();
        let err = db
            .payment_methods()
            .insert(&method("m2", "Pix", TenderKind::Pix, 0))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_retired_methods_hidden() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.payment_methods()
            .insert(&method("m1", "Dinheiro", TenderKind::Cash, 0))
            .await
            .unwrap();
        db.payment_methods()
            .insert(&method("m2", "Crédito", TenderKind::Credit, 349))
            .await
            .unwrap();
        db.payment_methods().set_active("m2", false).await.unwrap();

        let active = db.payment_methods().list_active("t1").await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Dinheiro");
    }
}
