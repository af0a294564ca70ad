//! # Commission Repository
//!
//! Database operations for frozen commission records.
//!
//! ## Snapshot Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Settlement writes rate_bps / amount_cents / cost_cents as they were    │
//! │  at checkout. Nothing in this repository rewrites them implicitly:     │
//! │                                                                         │
//! │  • rate changes        → affect FUTURE settlements only                │
//! │  • recalculate_pending → explicit admin call, unpaid rows only         │
//! │  • payouts             → flip `paid` and stamp a batch id              │
//! │  • undo_payout         → clear both, by batch id                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use navalha_core::CommissionTransaction;

/// Repository for commission database operations.
#[derive(Debug, Clone)]
pub struct CommissionRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, tenant_id, professional_id, appointment_id, kind,
           item_name, client_name, occurred_on, price_cents,
           rate_bps, amount_cents, cost_cents, paid, payout_batch_id,
           created_at
    FROM commission_transactions
"#;

impl CommissionRepository {
    /// Creates a new CommissionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CommissionRepository { pool }
    }

    /// Inserts a commission record.
    pub async fn insert(&self, tx: &CommissionTransaction) -> DbResult<()> {
        debug!(
            id = %tx.id,
            professional_id = %tx.professional_id,
            amount_cents = tx.amount_cents,
            "Inserting commission transaction"
        );

        sqlx::query(
            r#"
            INSERT INTO commission_transactions (
                id, tenant_id, professional_id, appointment_id, kind,
                item_name, client_name, occurred_on, price_cents,
                rate_bps, amount_cents, cost_cents, paid, payout_batch_id,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
        )
        .bind(&tx.id)
        .bind(&tx.tenant_id)
        .bind(&tx.professional_id)
        .bind(&tx.appointment_id)
        .bind(tx.kind)
        .bind(&tx.item_name)
        .bind(&tx.client_name)
        .bind(tx.occurred_on)
        .bind(tx.price_cents)
        .bind(tx.rate_bps)
        .bind(tx.amount_cents)
        .bind(tx.cost_cents)
        .bind(tx.paid)
        .bind(&tx.payout_batch_id)
        .bind(tx.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// One professional's records within `[from, to]` inclusive.
    pub async fn list_for_professional_period(
        &self,
        tenant_id: &str,
        professional_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<CommissionTransaction>> {
        let records = sqlx::query_as::<_, CommissionTransaction>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND professional_id = ?2 \
             AND occurred_on >= ?3 AND occurred_on <= ?4 ORDER BY occurred_on"
        ))
        .bind(tenant_id)
        .bind(professional_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// All records within `[from, to]` inclusive (shop-wide reports).
    pub async fn list_for_period(
        &self,
        tenant_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<CommissionTransaction>> {
        let records = sqlx::query_as::<_, CommissionTransaction>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND occurred_on >= ?2 AND occurred_on <= ?3 \
             ORDER BY occurred_on"
        ))
        .bind(tenant_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Unpaid records for one professional, any date.
    pub async fn list_unpaid(
        &self,
        tenant_id: &str,
        professional_id: &str,
    ) -> DbResult<Vec<CommissionTransaction>> {
        let records = sqlx::query_as::<_, CommissionTransaction>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND professional_id = ?2 AND paid = 0 \
             ORDER BY occurred_on"
        ))
        .bind(tenant_id)
        .bind(professional_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Marks a professional's unpaid records in a period as paid under one
    /// batch id. Returns how many records settled.
    pub async fn mark_paid(
        &self,
        tenant_id: &str,
        professional_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        batch_id: &str,
    ) -> DbResult<u64> {
        debug!(professional_id = %professional_id, batch_id = %batch_id, "Marking commissions paid");

        let result = sqlx::query(
            r#"
            UPDATE commission_transactions
            SET paid = 1, payout_batch_id = ?5
            WHERE tenant_id = ?1 AND professional_id = ?2
              AND occurred_on >= ?3 AND occurred_on <= ?4 AND paid = 0
            "#,
        )
        .bind(tenant_id)
        .bind(professional_id)
        .bind(from)
        .bind(to)
        .bind(batch_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Reverts a payout batch: clears paid and the batch id on every record
    /// the batch had settled. Returns how many records reverted.
    pub async fn undo_payout(&self, batch_id: &str) -> DbResult<u64> {
        debug!(batch_id = %batch_id, "Undoing payout batch");

        let result = sqlx::query(
            "UPDATE commission_transactions SET paid = 0, payout_batch_id = NULL \
             WHERE payout_batch_id = ?1",
        )
        .bind(batch_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Rewrites the rate and amount snapshot of one unpaid record
    /// (explicit recalculation only).
    pub async fn update_snapshot(
        &self,
        id: &str,
        rate_bps: i64,
        amount_cents: i64,
    ) -> DbResult<u64> {
        let result = sqlx::query(
            "UPDATE commission_transactions SET rate_bps = ?2, amount_cents = ?3 \
             WHERE id = ?1 AND paid = 0",
        )
        .bind(id)
        .bind(rate_bps)
        .bind(amount_cents)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Deletes the records a settlement wrote (reopen reversal). Returns
    /// how many went away; zero is fine.
    pub async fn delete_for_appointment(
        &self,
        tenant_id: &str,
        appointment_id: &str,
    ) -> DbResult<u64> {
        debug!(appointment_id = %appointment_id, "Deleting commissions for reopen");

        let result = sqlx::query(
            "DELETE FROM commission_transactions WHERE tenant_id = ?1 AND appointment_id = ?2",
        )
        .bind(tenant_id)
        .bind(appointment_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{NaiveTime, Utc};
    use navalha_core::{CommissionKind, Professional, ProfessionalStatus};

    async fn seed_professional(db: &Database, id: &str) {
        let pro = Professional {
            id: id.to_string(),
            tenant_id: "t1".to_string(),
            display_name: "Rafael".to_string(),
            role_label: "Barbeiro".to_string(),
            commission_rate_bps: 4000,
            specialties_json: None,
            work_starts_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            work_ends_at: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            lunch_starts_at: None,
            lunch_ends_at: None,
            status: ProfessionalStatus::Active,
            created_at: Utc::now(),
        };
        db.professionals().insert(&pro).await.unwrap();
    }

    fn tx(id: &str, day: u32) -> CommissionTransaction {
        CommissionTransaction {
            id: id.to_string(),
            tenant_id: "t1".to_string(),
            professional_id: "p1".to_string(),
            appointment_id: Some("a1".to_string()),
            kind: CommissionKind::Service,
            item_name: "Corte".to_string(),
            client_name: "Maria".to_string(),
            occurred_on: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
            price_cents: 5000,
            rate_bps: 4000,
            amount_cents: 2000,
            cost_cents: 0,
            paid: false,
            payout_batch_id: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_period_filtering_inclusive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_professional(&db, "p1").await;

        db.commissions().insert(&tx("c1", 1)).await.unwrap();
        db.commissions().insert(&tx("c2", 15)).await.unwrap();
        db.commissions().insert(&tx("c3", 31)).await.unwrap();

        let mid = db
            .commissions()
            .list_for_professional_period(
                "t1",
                "p1",
                NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(mid.len(), 2);
    }

    #[tokio::test]
    async fn test_payout_and_undo_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_professional(&db, "p1").await;

        db.commissions().insert(&tx("c1", 1)).await.unwrap();
        db.commissions().insert(&tx("c2", 15)).await.unwrap();

        let from = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();

        let settled = db
            .commissions()
            .mark_paid("t1", "p1", from, to, "batch-1")
            .await
            .unwrap();
        assert_eq!(settled, 2);
        assert!(db.commissions().list_unpaid("t1", "p1").await.unwrap().is_empty());

        // A second payout over the same period settles nothing
        let settled = db
            .commissions()
            .mark_paid("t1", "p1", from, to, "batch-2")
            .await
            .unwrap();
        assert_eq!(settled, 0);

        let reverted = db.commissions().undo_payout("batch-1").await.unwrap();
        assert_eq!(reverted, 2);
        assert_eq!(db.commissions().list_unpaid("t1", "p1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_update_skips_paid_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_professional(&db, "p1").await;

        db.commissions().insert(&tx("c1", 1)).await.unwrap();
        let from = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        db.commissions()
            .mark_paid("t1", "p1", from, to, "batch-1")
            .await
            .unwrap();

        let touched = db
            .commissions()
            .update_snapshot("c1", 5000, 2500)
            .await
            .unwrap();
        assert_eq!(touched, 0);
    }
}
