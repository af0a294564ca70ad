//! # Client Repository
//!
//! Database operations for clients and their lifetime-value aggregates.
//!
//! Checkout bumps `total_spent_cents`, `visit_count` and `last_visit_at`;
//! reopen reverts the money and the count (the timestamp stays, matching
//! the rest of the reversal which restores balances, not history).

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use navalha_core::Client;

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, tenant_id, name, phone, is_subscriber,
           total_spent_cents, visit_count, last_visit_at, created_at
    FROM clients
"#;

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Gets a client by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    /// Finds a client by exact phone match.
    ///
    /// This is the inline-materialization lookup used during booking: an
    /// unknown phone creates a new client, a known one reuses the record.
    pub async fn find_by_phone(&self, tenant_id: &str, phone: &str) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND phone = ?2"
        ))
        .bind(tenant_id)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Case-insensitive name search for the booking screen.
    pub async fn search_by_name(
        &self,
        tenant_id: &str,
        query: &str,
        limit: i64,
    ) -> DbResult<Vec<Client>> {
        let pattern = format!("%{}%", query);

        let clients = sqlx::query_as::<_, Client>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND name LIKE ?2 COLLATE NOCASE \
             ORDER BY name LIMIT ?3"
        ))
        .bind(tenant_id)
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Inserts a new client.
    pub async fn insert(&self, client: &Client) -> DbResult<()> {
        debug!(id = %client.id, name = %client.name, "Inserting client");

        sqlx::query(
            r#"
            INSERT INTO clients (
                id, tenant_id, name, phone, is_subscriber,
                total_spent_cents, visit_count, last_visit_at, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&client.id)
        .bind(&client.tenant_id)
        .bind(&client.name)
        .bind(&client.phone)
        .bind(client.is_subscriber)
        .bind(client.total_spent_cents)
        .bind(client.visit_count)
        .bind(client.last_visit_at)
        .bind(client.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Records a settled visit: bumps spend, count and last-visit stamp.
    pub async fn record_visit(
        &self,
        id: &str,
        amount_cents: i64,
        at: DateTime<Utc>,
    ) -> DbResult<()> {
        debug!(id = %id, amount_cents, "Recording client visit");

        let result = sqlx::query(
            r#"
            UPDATE clients
            SET total_spent_cents = total_spent_cents + ?2,
                visit_count = visit_count + 1,
                last_visit_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(amount_cents)
        .bind(at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
        }

        Ok(())
    }

    /// Reverts a settled visit's aggregates (reopen path).
    pub async fn revert_visit(&self, id: &str, amount_cents: i64) -> DbResult<()> {
        debug!(id = %id, amount_cents, "Reverting client visit");

        let result = sqlx::query(
            r#"
            UPDATE clients
            SET total_spent_cents = MAX(0, total_spent_cents - ?2),
                visit_count = MAX(0, visit_count - 1)
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(amount_cents)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
        }

        Ok(())
    }

    /// Flips the subscription flag.
    pub async fn set_subscriber(&self, id: &str, is_subscriber: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE clients SET is_subscriber = ?2 WHERE id = ?1")
            .bind(id)
            .bind(is_subscriber)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
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

    fn client(id: &str, phone: &str) -> Client {
        Client {
            id: id.to_string(),
            tenant_id: "t1".to_string(),
            name: "Maria Souza".to_string(),
            phone: phone.to_string(),
            is_subscriber: false,
            total_spent_cents: 0,
            visit_count: 0,
            last_visit_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_by_phone() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.clients()
            .insert(&client("c1", "11987654321"))
            .await
            .unwrap();

        let found = db
            .clients()
            .find_by_phone("t1", "11987654321")
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = db.clients().find_by_phone("t1", "000").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_visit_aggregates_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.clients()
            .insert(&client("c1", "11987654321"))
            .await
            .unwrap();

        db.clients()
            .record_visit("c1", 8000, Utc::now())
            .await
            .unwrap();
        let after = db.clients().get_by_id("c1").await.unwrap().unwrap();
        assert_eq!(after.total_spent_cents, 8000);
        assert_eq!(after.visit_count, 1);
        assert!(after.last_visit_at.is_some());

        db.clients().revert_visit("c1", 8000).await.unwrap();
        let reverted = db.clients().get_by_id("c1").await.unwrap().unwrap();
        assert_eq!(reverted.total_spent_cents, 0);
        assert_eq!(reverted.visit_count, 0);
    }
}
