//! # Ledger Repository
//!
//! Database operations for cash register movements.
//!
//! Entries are append-only during normal operation. The only deletion path
//! is the reopen reversal, which removes the entries a settlement wrote so
//! the drawer balance returns to its pre-checkout state.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use navalha_core::LedgerEntry;

/// Repository for ledger database operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, tenant_id, session_id, direction, amount_cents,
           method_name, method_kind, description, fee_cents,
           appointment_id, occurred_at
    FROM ledger_entries
"#;

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Appends a ledger entry.
    pub async fn insert(&self, entry: &LedgerEntry) -> DbResult<()> {
        debug!(
            id = %entry.id,
            direction = ?entry.direction,
            amount_cents = entry.amount_cents,
            method = %entry.method_name,
            "Inserting ledger entry"
        );

        sqlx::query(
            r#"
            INSERT INTO ledger_entries (
                id, tenant_id, session_id, direction, amount_cents,
                method_name, method_kind, description, fee_cents,
                appointment_id, occurred_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.tenant_id)
        .bind(&entry.session_id)
        .bind(entry.direction)
        .bind(entry.amount_cents)
        .bind(&entry.method_name)
        .bind(entry.method_kind)
        .bind(&entry.description)
        .bind(entry.fee_cents)
        .bind(&entry.appointment_id)
        .bind(entry.occurred_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists a session's entries, oldest first.
    pub async fn list_for_session(&self, session_id: &str) -> DbResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(&format!(
            "{SELECT_COLUMNS} WHERE session_id = ?1 ORDER BY occurred_at"
        ))
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Entries a settlement wrote for an appointment.
    ///
    /// Primary reversal lookup. Settlements before the appointment link
    /// existed carry no appointment_id; the engine falls back to matching
    /// description and amount for those.
    pub async fn find_by_appointment(
        &self,
        tenant_id: &str,
        appointment_id: &str,
    ) -> DbResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND appointment_id = ?2"
        ))
        .bind(tenant_id)
        .bind(appointment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Fallback reversal lookup: description plus exact amount.
    pub async fn find_by_description_amount(
        &self,
        tenant_id: &str,
        description: &str,
        amount_cents: i64,
    ) -> DbResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND description = ?2 AND amount_cents = ?3"
        ))
        .bind(tenant_id)
        .bind(description)
        .bind(amount_cents)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Deletes the entries linked to an appointment (reopen reversal).
    ///
    /// Returns how many entries went away; zero is fine, the reversal is
    /// idempotent.
    pub async fn delete_for_appointment(
        &self,
        tenant_id: &str,
        appointment_id: &str,
    ) -> DbResult<u64> {
        debug!(appointment_id = %appointment_id, "Deleting ledger entries for reopen");

        let result =
            sqlx::query("DELETE FROM ledger_entries WHERE tenant_id = ?1 AND appointment_id = ?2")
                .bind(tenant_id)
                .bind(appointment_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Deletes a single entry by ID (fallback reversal path).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM ledger_entries WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Ledger entry", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
