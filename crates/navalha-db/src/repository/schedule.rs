//! # Operating Hours Repository
//!
//! Database operations for the shop's weekly opening windows.
//!
//! Seven rows per tenant, weekday 0 (Sunday) through 6 (Saturday). A row
//! with NULL open/close times marks the day closed; missing rows read the
//! same way.

use chrono::NaiveTime;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use navalha_core::slots::{DaySchedule, OperatingHours};

/// Repository for operating hours database operations.
#[derive(Debug, Clone)]
pub struct OperatingHoursRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct HoursRow {
    weekday: i64,
    opens_at: Option<NaiveTime>,
    closes_at: Option<NaiveTime>,
}

impl OperatingHoursRepository {
    /// Creates a new OperatingHoursRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OperatingHoursRepository { pool }
    }

    /// Sets one weekday's window. `None` marks the day closed.
    pub async fn set_day(
        &self,
        tenant_id: &str,
        weekday: u8,
        window: Option<(NaiveTime, NaiveTime)>,
    ) -> DbResult<()> {
        debug!(weekday, open = window.is_some(), "Setting operating hours");

        let (opens_at, closes_at) = match window {
            Some((opens_at, closes_at)) => (Some(opens_at), Some(closes_at)),
            None => (None, None),
        };

        sqlx::query(
            r#"
            INSERT INTO operating_hours (tenant_id, weekday, opens_at, closes_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (tenant_id, weekday)
            DO UPDATE SET opens_at = excluded.opens_at, closes_at = excluded.closes_at
            "#,
        )
        .bind(tenant_id)
        .bind(weekday as i64)
        .bind(opens_at)
        .bind(closes_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Loads the full week. Days without a row (or without times) come
    /// back closed.
    pub async fn get_week(&self, tenant_id: &str) -> DbResult<OperatingHours> {
        let rows = sqlx::query_as::<_, HoursRow>(
            "SELECT weekday, opens_at, closes_at FROM operating_hours WHERE tenant_id = ?1",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        let mut days = [DaySchedule::closed(); 7];
        for row in rows {
            if let (Some(opens_at), Some(closes_at)) = (row.opens_at, row.closes_at) {
                if (0..7).contains(&row.weekday) {
                    days[row.weekday as usize] = DaySchedule {
                        open: true,
                        opens_at,
                        closes_at,
                    };
                }
            }
        }

        Ok(OperatingHours::new(days))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn test_week_round_trip_with_closed_days() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // Tuesday through Saturday open, Sunday/Monday closed
        for weekday in 2..=6 {
            db.operating_hours()
                .set_day("t1", weekday, Some((t(9, 0), t(20, 0))))
                .await
                .unwrap();
        }
        db.operating_hours().set_day("t1", 0, None).await.unwrap();

        let week = db.operating_hours().get_week("t1").await.unwrap();

        // 2026-08-28 is a Friday
        let friday = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        assert!(week.for_date(friday).open);
        assert_eq!(week.for_date(friday).opens_at, t(9, 0));

        let sunday = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert!(!week.for_date(sunday).open);
        // Monday has no row at all; also closed
        let monday = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert!(!week.for_date(monday).open);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_window() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.operating_hours()
            .set_day("t1", 5, Some((t(9, 0), t(20, 0))))
            .await
            .unwrap();
        db.operating_hours()
            .set_day("t1", 5, Some((t(10, 0), t(18, 0))))
            .await
            .unwrap();

        let week = db.operating_hours().get_week("t1").await.unwrap();
        let friday = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        assert_eq!(week.for_date(friday).opens_at, t(10, 0));
        assert_eq!(week.for_date(friday).closes_at, t(18, 0));
    }
}
