//! # Professional Repository
//!
//! Database operations for the professional roster.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use navalha_core::{Professional, ProfessionalStatus};

/// Repository for professional database operations.
#[derive(Debug, Clone)]
pub struct ProfessionalRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, tenant_id, display_name, role_label, commission_rate_bps,
           specialties_json, work_starts_at, work_ends_at,
           lunch_starts_at, lunch_ends_at, status, created_at
    FROM professionals
"#;

impl ProfessionalRepository {
    /// Creates a new ProfessionalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProfessionalRepository { pool }
    }

    /// Gets a professional by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Professional>> {
        let professional =
            sqlx::query_as::<_, Professional>(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(professional)
    }

    /// Inserts a new professional.
    pub async fn insert(&self, professional: &Professional) -> DbResult<()> {
        debug!(id = %professional.id, name = %professional.display_name, "Inserting professional");

        sqlx::query(
            r#"
            INSERT INTO professionals (
                id, tenant_id, display_name, role_label, commission_rate_bps,
                specialties_json, work_starts_at, work_ends_at,
                lunch_starts_at, lunch_ends_at, status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&professional.id)
        .bind(&professional.tenant_id)
        .bind(&professional.display_name)
        .bind(&professional.role_label)
        .bind(professional.commission_rate_bps)
        .bind(&professional.specialties_json)
        .bind(professional.work_starts_at)
        .bind(professional.work_ends_at)
        .bind(professional.lunch_starts_at)
        .bind(professional.lunch_ends_at)
        .bind(professional.status)
        .bind(professional.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists professionals currently taking bookings.
    pub async fn list_active(&self, tenant_id: &str) -> DbResult<Vec<Professional>> {
        let professionals = sqlx::query_as::<_, Professional>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND status = 'active' ORDER BY display_name"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(professionals)
    }

    /// Lists the whole roster, vacationing professionals included.
    pub async fn list_all(&self, tenant_id: &str) -> DbResult<Vec<Professional>> {
        let professionals = sqlx::query_as::<_, Professional>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 ORDER BY display_name"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(professionals)
    }

    /// Updates a professional's availability status.
    pub async fn set_status(&self, id: &str, status: ProfessionalStatus) -> DbResult<()> {
        let result = sqlx::query("UPDATE professionals SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Professional", id));
        }

        Ok(())
    }

    /// Updates the default commission rate.
    ///
    /// Settled commission records are snapshots and stay untouched; only
    /// future settlements see the new rate.
    pub async fn update_commission_rate(&self, id: &str, rate_bps: i64) -> DbResult<()> {
        debug!(id = %id, rate_bps, "Updating professional commission rate");

        let result = sqlx::query("UPDATE professionals SET commission_rate_bps = ?2 WHERE id = ?1")
            .bind(id)
            .bind(rate_bps)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Professional", id));
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
    use chrono::{NaiveTime, Utc};

    fn professional(id: &str, status: ProfessionalStatus) -> Professional {
        Professional {
            id: id.to_string(),
            tenant_id: "t1".to_string(),
            display_name: format!("Pro {}", id),
            role_label: "Barbeiro".to_string(),
            commission_rate_bps: 4000,
            specialties_json: Some(r#"["corte"]"#.to_string()),
            work_starts_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            work_ends_at: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            lunch_starts_at: Some(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
            lunch_ends_at: Some(NaiveTime::from_hms_opt(13, 0, 0).unwrap()),
            status,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_roundtrip_preserves_schedule() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.professionals()
            .insert(&professional("p1", ProfessionalStatus::Active))
            .await
            .unwrap();

        let fetched = db.professionals().get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(
            fetched.work_starts_at,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert!(fetched.work_schedule().lunch.is_some());
        assert!(fetched.specialties().handles("corte"));
    }

    #[tokio::test]
    async fn test_active_listing_excludes_vacation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.professionals()
            .insert(&professional("p1", ProfessionalStatus::Active))
            .await
            .unwrap();
        db.professionals()
            .insert(&professional("p2", ProfessionalStatus::Vacation))
            .await
            .unwrap();

        let active = db.professionals().list_active("t1").await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "p1");

        let all = db.professionals().list_all("t1").await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
