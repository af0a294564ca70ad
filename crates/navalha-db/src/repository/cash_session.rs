//! # Cash Session Repository
//!
//! Database operations for cash drawer sessions.
//!
//! ## One Open Session
//! The `idx_cash_sessions_one_open` partial unique index admits at most one
//! row per tenant with `closed_at IS NULL`. Opening is therefore a plain
//! INSERT: when two opens race, one INSERT wins and the other surfaces a
//! `UniqueViolation` that the engine maps to "already open". There is no
//! check-then-act window.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use navalha_core::CashSession;

/// Repository for cash session database operations.
#[derive(Debug, Clone)]
pub struct CashSessionRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, tenant_id, opened_at, opening_balance_cents,
           closed_at, closing_balance_cents, responsible, observation
    FROM cash_sessions
"#;

impl CashSessionRepository {
    /// Creates a new CashSessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CashSessionRepository { pool }
    }

    /// Gets a session by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CashSession>> {
        let session = sqlx::query_as::<_, CashSession>(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    /// Inserts a new open session.
    ///
    /// A `UniqueViolation` here means another session is already open.
    pub async fn open(&self, session: &CashSession) -> DbResult<()> {
        debug!(
            id = %session.id,
            opening_balance_cents = session.opening_balance_cents,
            "Opening cash session"
        );

        sqlx::query(
            r#"
            INSERT INTO cash_sessions (
                id, tenant_id, opened_at, opening_balance_cents,
                closed_at, closing_balance_cents, responsible, observation
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&session.id)
        .bind(&session.tenant_id)
        .bind(session.opened_at)
        .bind(session.opening_balance_cents)
        .bind(session.closed_at)
        .bind(session.closing_balance_cents)
        .bind(&session.responsible)
        .bind(&session.observation)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The tenant's currently open session, if any.
    pub async fn current_open(&self, tenant_id: &str) -> DbResult<Option<CashSession>> {
        let session = sqlx::query_as::<_, CashSession>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND closed_at IS NULL"
        ))
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// The most recently closed session, used to default the next opening
    /// balance to the prior closing count.
    pub async fn last_closed(&self, tenant_id: &str) -> DbResult<Option<CashSession>> {
        let session = sqlx::query_as::<_, CashSession>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND closed_at IS NOT NULL \
             ORDER BY closed_at DESC LIMIT 1"
        ))
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Closes an open session, recording the physical count.
    ///
    /// Guarded on `closed_at IS NULL`: closing twice finds no row.
    pub async fn close(
        &self,
        id: &str,
        closed_at: DateTime<Utc>,
        closing_balance_cents: i64,
        observation: Option<&str>,
    ) -> DbResult<()> {
        debug!(id = %id, closing_balance_cents, "Closing cash session");

        let result = sqlx::query(
            r#"
            UPDATE cash_sessions
            SET closed_at = ?2, closing_balance_cents = ?3, observation = ?4
            WHERE id = ?1 AND closed_at IS NULL
            "#,
        )
        .bind(id)
        .bind(closed_at)
        .bind(closing_balance_cents)
        .bind(observation)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Cash session", id));
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

    fn session(id: &str) -> CashSession {
        CashSession {
            id: id.to_string(),
            tenant_id: "t1".to_string(),
            opened_at: Utc::now(),
            opening_balance_cents: 10000,
            closed_at: None,
            closing_balance_cents: None,
            responsible: "Ana".to_string(),
            observation: None,
        }
    }

    #[tokio::test]
    async fn test_second_open_rejected_by_index() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.cash_sessions().open(&session("cs1")).await.unwrap();
        let err = db.cash_sessions().open(&session("cs2")).await.unwrap_err();
        assert!(err.is_unique_violation());

        // Closing the first frees the slot
        db.cash_sessions()
            .close("cs1", Utc::now(), 12000, None)
            .await
            .unwrap();
        db.cash_sessions().open(&session("cs2")).await.unwrap();
    }

    #[tokio::test]
    async fn test_current_open_and_last_closed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.cash_sessions().current_open("t1").await.unwrap().is_none());

        db.cash_sessions().open(&session("cs1")).await.unwrap();
        let open = db.cash_sessions().current_open("t1").await.unwrap().unwrap();
        assert_eq!(open.id, "cs1");
        assert!(open.is_open());

        db.cash_sessions()
            .close("cs1", Utc::now(), 13000, Some("sem divergência"))
            .await
            .unwrap();
        assert!(db.cash_sessions().current_open("t1").await.unwrap().is_none());

        let last = db.cash_sessions().last_closed("t1").await.unwrap().unwrap();
        assert_eq!(last.closing_balance_cents, Some(13000));
    }

    #[tokio::test]
    async fn test_double_close_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.cash_sessions().open(&session("cs1")).await.unwrap();
        db.cash_sessions()
            .close("cs1", Utc::now(), 12000, None)
            .await
            .unwrap();

        let err = db
            .cash_sessions()
            .close("cs1", Utc::now(), 12000, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
