//! # Appointment Repository
//!
//! Database operations for appointments and their comanda items.
//!
//! ## Appointment Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Appointment Lifecycle                                │
//! │                                                                         │
//! │  1. BOOK                                                               │
//! │     └── insert() → Appointment { status: Scheduled }                   │
//! │                                                                         │
//! │  2. BUILD THE COMANDA                                                  │
//! │     └── add_item() → AppointmentItem (frozen name + price)             │
//! │     └── update_total() → Recalculate total_cents                       │
//! │                                                                         │
//! │  3. CONFIRM / RESCHEDULE                                               │
//! │     └── set_status(), reschedule() (status-guarded UPDATEs)            │
//! │                                                                         │
//! │  4. CHECKOUT                                                           │
//! │     └── complete() → status: Completed (immutable except reopen)       │
//! │                                                                         │
//! │  5. (OPTIONAL) CANCEL                                                  │
//! │     └── delete() → hard delete, items cascade                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use navalha_core::{Appointment, AppointmentItem, AppointmentStatus};

/// Repository for appointment database operations.
#[derive(Debug, Clone)]
pub struct AppointmentRepository {
    pool: SqlitePool,
}

impl AppointmentRepository {
    /// Creates a new AppointmentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AppointmentRepository { pool }
    }

    /// Gets an appointment by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, tenant_id, professional_id, client_id, status,
                   starts_at, duration_minutes, total_cents, notes,
                   created_at, updated_at
            FROM appointments
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    /// Inserts a new appointment (booking or time-off block).
    pub async fn insert(&self, appointment: &Appointment) -> DbResult<()> {
        debug!(
            id = %appointment.id,
            professional_id = %appointment.professional_id,
            starts_at = %appointment.starts_at,
            "Inserting appointment"
        );

        sqlx::query(
            r#"
            INSERT INTO appointments (
                id, tenant_id, professional_id, client_id, status,
                starts_at, duration_minutes, total_cents, notes,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&appointment.id)
        .bind(&appointment.tenant_id)
        .bind(&appointment.professional_id)
        .bind(&appointment.client_id)
        .bind(appointment.status)
        .bind(appointment.starts_at)
        .bind(appointment.duration_minutes)
        .bind(appointment.total_cents)
        .bind(&appointment.notes)
        .bind(appointment.created_at)
        .bind(appointment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists every appointment starting on the given date for a tenant.
    pub async fn list_for_day(
        &self,
        tenant_id: &str,
        date: NaiveDate,
    ) -> DbResult<Vec<Appointment>> {
        let (from, to) = day_bounds(date);

        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, tenant_id, professional_id, client_id, status,
                   starts_at, duration_minutes, total_cents, notes,
                   created_at, updated_at
            FROM appointments
            WHERE tenant_id = ?1 AND starts_at >= ?2 AND starts_at < ?3
            ORDER BY starts_at
            "#,
        )
        .bind(tenant_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    /// Lists one professional's appointments for a date.
    ///
    /// This is the conflict-detection read: every non-canceled row occupies
    /// its interval (canceled rows were deleted and never appear).
    pub async fn list_for_professional_day(
        &self,
        tenant_id: &str,
        professional_id: &str,
        date: NaiveDate,
    ) -> DbResult<Vec<Appointment>> {
        let (from, to) = day_bounds(date);

        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, tenant_id, professional_id, client_id, status,
                   starts_at, duration_minutes, total_cents, notes,
                   created_at, updated_at
            FROM appointments
            WHERE tenant_id = ?1 AND professional_id = ?2
              AND starts_at >= ?3 AND starts_at < ?4
            ORDER BY starts_at
            "#,
        )
        .bind(tenant_id)
        .bind(professional_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    /// Moves an appointment to a new start/duration.
    ///
    /// Status-guarded: only scheduled or confirmed rows may move. A zero
    /// row count means the appointment is missing or not editable.
    pub async fn reschedule(
        &self,
        id: &str,
        starts_at: NaiveDateTime,
        duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        debug!(id = %id, starts_at = %starts_at, "Rescheduling appointment");

        let result = sqlx::query(
            r#"
            UPDATE appointments
            SET starts_at = ?2, duration_minutes = ?3, updated_at = ?4
            WHERE id = ?1 AND status IN ('scheduled', 'confirmed')
            "#,
        )
        .bind(id)
        .bind(starts_at)
        .bind(duration_minutes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Appointment", id));
        }

        Ok(())
    }

    /// Transitions an appointment's status, guarded by the allowed set of
    /// source statuses.
    pub async fn set_status(
        &self,
        id: &str,
        from: &[AppointmentStatus],
        to: AppointmentStatus,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        debug!(id = %id, to = ?to, "Updating appointment status");

        // The guard set is small and fixed; build the IN list inline.
        let guards: Vec<&str> = from.iter().map(|s| s.as_str()).collect();
        let placeholders = vec!["?"; guards.len()].join(", ");
        let sql = format!(
            "UPDATE appointments SET status = ?, updated_at = ? \
             WHERE id = ? AND status IN ({placeholders})"
        );

        let mut query = sqlx::query(&sql).bind(to).bind(now).bind(id);
        for guard in guards {
            query = query.bind(guard);
        }

        let result = query.execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Appointment", id));
        }

        Ok(())
    }

    /// Rewrites the denormalized comanda total.
    pub async fn update_total(&self, id: &str, total_cents: i64, now: DateTime<Utc>) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE appointments SET total_cents = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(total_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Appointment", id));
        }

        Ok(())
    }

    /// Hard-deletes an appointment. Comanda items cascade.
    ///
    /// The status guard belongs to the engine (completed rows must not be
    /// deleted); this method only reports whether a row went away.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting appointment");

        let result = sqlx::query("DELETE FROM appointments WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Appointment", id));
        }

        Ok(())
    }

    // =========================================================================
    // Comanda items
    // =========================================================================

    /// Adds a line item to an appointment's comanda.
    ///
    /// ## Snapshot Pattern
    /// Name, price, rate override and cost are copied from the catalog at
    /// this moment. Later catalog edits never rewrite the comanda.
    pub async fn add_item(&self, item: &AppointmentItem) -> DbResult<()> {
        debug!(
            appointment_id = %item.appointment_id,
            name = %item.name,
            "Adding comanda item"
        );

        sqlx::query(
            r#"
            INSERT INTO appointment_items (
                id, appointment_id, kind, catalog_id, name,
                price_cents, duration_minutes, custom_rate_bps, cost_cents,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&item.id)
        .bind(&item.appointment_id)
        .bind(item.kind)
        .bind(&item.catalog_id)
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(item.duration_minutes)
        .bind(item.custom_rate_bps)
        .bind(item.cost_cents)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists the comanda for an appointment, oldest first.
    pub async fn items_for(&self, appointment_id: &str) -> DbResult<Vec<AppointmentItem>> {
        let items = sqlx::query_as::<_, AppointmentItem>(
            r#"
            SELECT id, appointment_id, kind, catalog_id, name,
                   price_cents, duration_minutes, custom_rate_bps, cost_cents,
                   created_at
            FROM appointment_items
            WHERE appointment_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(appointment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Removes a line item from an open comanda.
    pub async fn remove_item(&self, item_id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM appointment_items WHERE id = ?1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Comanda item", item_id));
        }

        Ok(())
    }
}

/// `[midnight, next midnight)` bounds for a date's appointments.
fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let from = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    (from, from + Duration::days(1))
}

// =============================================================================
// Unit Tests
// =============================================================================
