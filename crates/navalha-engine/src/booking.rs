//! # Booking Operations
//!
//! Booking, rescheduling, cancellation, time-off blocks and comanda edits.
//!
//! ## Booking Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         book()                                          │
//! │                                                                         │
//! │  validate name + phone                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve professional + services (duration = Σ service durations)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  conflict check against the professional's day ──► SlotConflict       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  client by phone: found? reuse : create   (inline materialization)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT appointment + snapshot items, publish Change::Appointments    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDateTime, Utc};
use tracing::info;
use uuid::Uuid;

use navalha_core::conflict::{has_conflict, Interval};
use navalha_core::validation::{
    validate_block_reason, validate_comanda_size, validate_duration_minutes,
    validate_person_name, validate_phone, validate_price_cents, validate_rate_bps,
    validate_uuid,
};
use navalha_core::{
    Appointment, AppointmentItem, AppointmentStatus, Client, CoreError, ItemKind, Money,
};

use crate::error::{EngineError, EngineResult};
use crate::notify::Change;
use crate::Engine;

/// What the booking screen submits.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub professional_id: String,
    pub client_name: String,
    pub client_phone: String,
    /// Catalog services to book; duration and price snapshot from these.
    pub service_ids: Vec<String>,
    pub starts_at: NaiveDateTime,
    pub notes: Option<String>,
}

impl Engine {
    /// Books an appointment.
    ///
    /// The client is materialized inline: an unknown phone creates a new
    /// client record, a known one reuses it. Service name, price, duration
    /// and commission override are frozen onto the comanda items.
    pub async fn book(&self, request: BookingRequest) -> EngineResult<Appointment> {
        validate_person_name(&request.client_name)?;
        validate_phone(&request.client_phone)?;
        validate_uuid(&request.professional_id)?;

        let professional = self
            .db
            .professionals()
            .get_by_id(&request.professional_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Professional", &request.professional_id))?;

        let mut services = Vec::with_capacity(request.service_ids.len());
        for service_id in &request.service_ids {
            let service = self
                .db
                .catalog()
                .get_service(service_id)
                .await?
                .ok_or_else(|| EngineError::not_found("Service", service_id))?;
            services.push(service);
        }

        let duration_minutes: i64 = services.iter().map(|s| s.duration_minutes).sum();
        validate_duration_minutes(duration_minutes)?;

        self.ensure_slot_free(
            &professional.id,
            Interval::new(request.starts_at, duration_minutes),
            None,
        )
        .await?;

        let client = self
            .materialize_client(&request.client_name, &request.client_phone)
            .await?;

        let now = Utc::now();
        let appointment_id = Uuid::new_v4().to_string();
        let total_cents: i64 = services.iter().map(|s| s.price_cents).sum();

        let appointment = Appointment {
            id: appointment_id.clone(),
            tenant_id: self.tenant_id.clone(),
            professional_id: professional.id.clone(),
            client_id: Some(client.id.clone()),
            status: AppointmentStatus::Scheduled,
            starts_at: request.starts_at,
            duration_minutes,
            total_cents,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };
        self.db.appointments().insert(&appointment).await?;

        for service in &services {
            let item = AppointmentItem {
                id: Uuid::new_v4().to_string(),
                appointment_id: appointment_id.clone(),
                kind: ItemKind::Service,
                catalog_id: Some(service.id.clone()),
                name: service.name.clone(),
                price_cents: service.price_cents,
                duration_minutes: Some(service.duration_minutes),
                custom_rate_bps: service.custom_rate_bps,
                cost_cents: 0,
                created_at: now,
            };
            self.db.appointments().add_item(&item).await?;
        }

        info!(
            appointment_id = %appointment_id,
            professional_id = %professional.id,
            starts_at = %request.starts_at,
            "Appointment booked"
        );
        self.changes.publish(Change::Appointments);

        Ok(appointment)
    }

    /// Reserves an interval for time off. No client, zero value; the
    /// interval conflicts with bookings like any appointment.
    pub async fn block_time_off(
        &self,
        professional_id: &str,
        starts_at: NaiveDateTime,
        duration_minutes: i64,
        reason: &str,
    ) -> EngineResult<Appointment> {
        validate_block_reason(reason)?;
        validate_duration_minutes(duration_minutes)?;
        validate_uuid(professional_id)?;

        self.db
            .professionals()
            .get_by_id(professional_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Professional", professional_id))?;

        self.ensure_slot_free(
            professional_id,
            Interval::new(starts_at, duration_minutes),
            None,
        )
        .await?;

        let now = Utc::now();
        let block = Appointment {
            id: Uuid::new_v4().to_string(),
            tenant_id: self.tenant_id.clone(),
            professional_id: professional_id.to_string(),
            client_id: None,
            status: AppointmentStatus::Blocked,
            starts_at,
            duration_minutes,
            total_cents: 0,
            notes: Some(reason.to_string()),
            created_at: now,
            updated_at: now,
        };
        self.db.appointments().insert(&block).await?;

        info!(professional_id = %professional_id, starts_at = %starts_at, "Time off blocked");
        self.changes.publish(Change::Appointments);

        Ok(block)
    }

    /// Confirms a scheduled appointment.
    pub async fn confirm(&self, appointment_id: &str) -> EngineResult<()> {
        self.db
            .appointments()
            .set_status(
                appointment_id,
                &[AppointmentStatus::Scheduled],
                AppointmentStatus::Confirmed,
                Utc::now(),
            )
            .await?;

        self.changes.publish(Change::Appointments);
        Ok(())
    }

    /// Moves an appointment to a new start time.
    ///
    /// The new interval is conflict-checked against the rest of the day
    /// and the write re-checks the status; the returned appointment is the
    /// canonical re-read, not the caller's view.
    pub async fn reschedule(
        &self,
        appointment_id: &str,
        new_starts_at: NaiveDateTime,
    ) -> EngineResult<Appointment> {
        let appointment = self
            .db
            .appointments()
            .get_by_id(appointment_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Appointment", appointment_id))?;

        if !appointment.status.allows_reschedule() {
            return Err(CoreError::InvalidAppointmentStatus {
                appointment_id: appointment_id.to_string(),
                current_status: appointment.status.as_str().to_string(),
            }
            .into());
        }

        self.ensure_slot_free(
            &appointment.professional_id,
            Interval::new(new_starts_at, appointment.duration_minutes),
            Some(appointment_id),
        )
        .await?;

        self.db
            .appointments()
            .reschedule(
                appointment_id,
                new_starts_at,
                appointment.duration_minutes,
                Utc::now(),
            )
            .await?;

        info!(appointment_id = %appointment_id, new_starts_at = %new_starts_at, "Appointment rescheduled");
        self.changes.publish(Change::Appointments);

        self.db
            .appointments()
            .get_by_id(appointment_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Appointment", appointment_id))
    }

    /// Cancels an appointment: a hard delete, items cascade. Completed
    /// appointments cannot be canceled; reopen them first.
    pub async fn cancel(&self, appointment_id: &str) -> EngineResult<()> {
        let appointment = self
            .db
            .appointments()
            .get_by_id(appointment_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Appointment", appointment_id))?;

        if !appointment.status.allows_cancel() {
            return Err(CoreError::InvalidAppointmentStatus {
                appointment_id: appointment_id.to_string(),
                current_status: appointment.status.as_str().to_string(),
            }
            .into());
        }

        self.db.appointments().delete(appointment_id).await?;

        info!(appointment_id = %appointment_id, "Appointment canceled");
        self.changes.publish(Change::Appointments);
        Ok(())
    }

    /// Adds a catalog service to an open comanda (frozen snapshot).
    pub async fn add_service_to_comanda(
        &self,
        appointment_id: &str,
        service_id: &str,
    ) -> EngineResult<AppointmentItem> {
        let appointment = self.editable_appointment(appointment_id).await?;
        let items = self.db.appointments().items_for(appointment_id).await?;
        validate_comanda_size(items.len())?;

        let service = self
            .db
            .catalog()
            .get_service(service_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Service", service_id))?;

        let item = AppointmentItem {
            id: Uuid::new_v4().to_string(),
            appointment_id: appointment.id.clone(),
            kind: ItemKind::Service,
            catalog_id: Some(service.id.clone()),
            name: service.name.clone(),
            price_cents: service.price_cents,
            duration_minutes: Some(service.duration_minutes),
            custom_rate_bps: service.custom_rate_bps,
            cost_cents: 0,
            created_at: Utc::now(),
        };
        self.db.appointments().add_item(&item).await?;
        self.recompute_total(&appointment.id).await?;

        self.changes.publish(Change::Appointments);
        Ok(item)
    }

    /// Adds a retail product to an open comanda. Products carry their
    /// catalog commission rate and cost as snapshots.
    pub async fn add_product_to_comanda(
        &self,
        appointment_id: &str,
        product_id: &str,
    ) -> EngineResult<AppointmentItem> {
        let appointment = self.editable_appointment(appointment_id).await?;
        let items = self.db.appointments().items_for(appointment_id).await?;
        validate_comanda_size(items.len())?;

        let product = self
            .db
            .catalog()
            .get_product(product_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Product", product_id))?;

        let item = AppointmentItem {
            id: Uuid::new_v4().to_string(),
            appointment_id: appointment.id.clone(),
            kind: ItemKind::Product,
            catalog_id: Some(product.id.clone()),
            name: product.name.clone(),
            price_cents: product.price_cents,
            duration_minutes: None,
            custom_rate_bps: Some(product.commission_rate_bps),
            cost_cents: product.cost_cents,
            created_at: Utc::now(),
        };
        self.db.appointments().add_item(&item).await?;
        self.recompute_total(&appointment.id).await?;

        self.changes.publish(Change::Appointments);
        Ok(item)
    }

    /// Updates a catalog service's price and commission override.
    ///
    /// Existing comanda items keep their frozen snapshot; only bookings
    /// made after the update pick up the new values.
    pub async fn update_service_pricing(
        &self,
        service_id: &str,
        price: Money,
        custom_rate_bps: Option<i64>,
    ) -> EngineResult<()> {
        validate_price_cents(price.cents())?;
        if let Some(bps) = custom_rate_bps {
            validate_rate_bps(bps)?;
        }

        self.db
            .catalog()
            .update_service_pricing(service_id, price.cents(), custom_rate_bps)
            .await?;

        info!(service_id = %service_id, price = %price, "Service pricing updated");
        Ok(())
    }

    /// Removes a line item from an open comanda.
    pub async fn remove_comanda_item(
        &self,
        appointment_id: &str,
        item_id: &str,
    ) -> EngineResult<()> {
        let appointment = self.editable_appointment(appointment_id).await?;

        self.db.appointments().remove_item(item_id).await?;
        self.recompute_total(&appointment.id).await?;

        self.changes.publish(Change::Appointments);
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Finds the client by phone or creates a fresh record on the spot.
    pub(crate) async fn materialize_client(&self, name: &str, phone: &str) -> EngineResult<Client> {
        if let Some(existing) = self.db.clients().find_by_phone(&self.tenant_id, phone).await? {
            return Ok(existing);
        }

        let client = Client {
            id: Uuid::new_v4().to_string(),
            tenant_id: self.tenant_id.clone(),
            name: name.to_string(),
            phone: phone.to_string(),
            is_subscriber: false,
            total_spent_cents: 0,
            visit_count: 0,
            last_visit_at: None,
            created_at: Utc::now(),
        };
        self.db.clients().insert(&client).await?;
        Ok(client)
    }

    /// Fetches an appointment whose comanda may still be edited.
    async fn editable_appointment(&self, appointment_id: &str) -> EngineResult<Appointment> {
        let appointment = self
            .db
            .appointments()
            .get_by_id(appointment_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Appointment", appointment_id))?;

        if !appointment.status.allows_reschedule() {
            return Err(CoreError::InvalidAppointmentStatus {
                appointment_id: appointment_id.to_string(),
                current_status: appointment.status.as_str().to_string(),
            }
            .into());
        }

        Ok(appointment)
    }

    /// Re-derives the denormalized comanda total from the items.
    pub(crate) async fn recompute_total(&self, appointment_id: &str) -> EngineResult<()> {
        let items = self.db.appointments().items_for(appointment_id).await?;
        let total_cents: i64 = items.iter().map(|i| i.price_cents).sum();
        self.db
            .appointments()
            .update_total(appointment_id, total_cents, Utc::now())
            .await?;
        Ok(())
    }

    /// Rejects the candidate interval when it overlaps any of the
    /// professional's existing rows (time-off blocks included).
    pub(crate) async fn ensure_slot_free(
        &self,
        professional_id: &str,
        candidate: Interval,
        exclude_appointment_id: Option<&str>,
    ) -> EngineResult<()> {
        let day = self
            .db
            .appointments()
            .list_for_professional_day(&self.tenant_id, professional_id, candidate.starts_at.date())
            .await?;

        let existing: Vec<Interval> = day
            .iter()
            .filter(|a| exclude_appointment_id != Some(a.id.as_str()))
            .map(|a| a.interval())
            .collect();

        if has_conflict(candidate, &existing) {
            return Err(CoreError::SlotConflict {
                professional_id: professional_id.to_string(),
                starts_at: candidate.starts_at.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
