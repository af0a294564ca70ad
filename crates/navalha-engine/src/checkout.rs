//! # Checkout & Reopen
//!
//! Turns a settled comanda into ledger entries, frozen commission records
//! and a COMPLETED appointment; reopen reverses all of it.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout_appointment(id, tenders)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  status guard (scheduled/confirmed only)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  open drawer required for any non-discount tender                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SettlementPlan::build  ──► EmptyComanda / InsufficientPayment        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write: ledger entry per tender (fee frozen)                          │
//! │         commission per line item (rate × price frozen)                │
//! │         status ──► COMPLETED, client visit aggregates updated         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reopen deletes the entries checkout wrote (by appointment link, with a
//! description+amount fallback for rows that predate the link), reverts the
//! client aggregates and puts the appointment back at CONFIRMED.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use navalha_core::settlement::{SettlementPlan, Tender};
use navalha_core::validation::{validate_person_name, validate_phone, validate_uuid};
use navalha_core::{
    Appointment, AppointmentStatus, CommissionTransaction, CoreError, LedgerEntry, Money,
};

use crate::error::{EngineError, EngineResult};
use crate::notify::Change;
use crate::Engine;

/// One tender as the checkout screen submits it.
#[derive(Debug, Clone)]
pub struct TenderInput {
    pub method_id: String,
    pub amount: Money,
}

/// A walk-in sale: appointment, comanda and settlement in one operation.
#[derive(Debug, Clone)]
pub struct QuickSaleRequest {
    pub professional_id: String,
    pub client_name: String,
    pub client_phone: String,
    pub service_ids: Vec<String>,
    pub product_ids: Vec<String>,
    pub tenders: Vec<TenderInput>,
}

impl Engine {
    /// Settles an appointment's comanda.
    pub async fn checkout_appointment(
        &self,
        appointment_id: &str,
        tenders: &[TenderInput],
    ) -> EngineResult<SettlementPlan> {
        let appointment = self
            .db
            .appointments()
            .get_by_id(appointment_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Appointment", appointment_id))?;

        if !matches!(
            appointment.status,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        ) {
            return Err(CoreError::InvalidAppointmentStatus {
                appointment_id: appointment_id.to_string(),
                current_status: appointment.status.as_str().to_string(),
            }
            .into());
        }

        let professional = self
            .db
            .professionals()
            .get_by_id(&appointment.professional_id)
            .await?
            .ok_or_else(|| {
                EngineError::not_found("Professional", &appointment.professional_id)
            })?;

        let client = match &appointment.client_id {
            Some(client_id) => Some(
                self.db
                    .clients()
                    .get_by_id(client_id)
                    .await?
                    .ok_or_else(|| EngineError::not_found("Client", client_id))?,
            ),
            None => None,
        };

        let mut resolved = Vec::with_capacity(tenders.len());
        for input in tenders {
            let method = self
                .db
                .payment_methods()
                .get_by_id(&input.method_id)
                .await?
                .ok_or_else(|| EngineError::not_found("Payment method", &input.method_id))?;
            resolved.push(Tender {
                method,
                amount: input.amount,
            });
        }

        // Money-moving tenders require an open drawer; a fully discounted
        // comanda may settle against a closed one.
        let session = self.db.cash_sessions().current_open(&self.tenant_id).await?;
        let moves_money = resolved.iter().any(|t| !t.method.kind.is_discount());
        if moves_money && session.is_none() {
            return Err(CoreError::CashSessionClosed.into());
        }

        let items = self.db.appointments().items_for(appointment_id).await?;
        let is_subscriber = client.as_ref().map(|c| c.is_subscriber).unwrap_or(false);
        let plan = SettlementPlan::build(
            &items,
            &resolved,
            is_subscriber,
            professional.commission_rate(),
        )?;

        let now = Utc::now();
        let session_id = session.map(|s| s.id);

        for draft in &plan.ledger_drafts {
            let entry = LedgerEntry {
                id: Uuid::new_v4().to_string(),
                tenant_id: self.tenant_id.clone(),
                session_id: session_id.clone(),
                direction: draft.direction,
                amount_cents: draft.amount.cents(),
                method_name: draft.method_name.clone(),
                method_kind: draft.method_kind,
                description: draft.description.clone(),
                fee_cents: (!draft.fee.is_zero()).then(|| draft.fee.cents()),
                appointment_id: Some(appointment.id.clone()),
                occurred_at: now,
            };
            self.db.ledger().insert(&entry).await?;
        }

        let client_name = client
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Cliente".to_string());
        for snapshot in &plan.commissions {
            let tx = CommissionTransaction {
                id: Uuid::new_v4().to_string(),
                tenant_id: self.tenant_id.clone(),
                professional_id: professional.id.clone(),
                appointment_id: Some(appointment.id.clone()),
                kind: snapshot.kind,
                item_name: snapshot.item_name.clone(),
                client_name: client_name.clone(),
                occurred_on: appointment.starts_at.date(),
                price_cents: snapshot.price.cents(),
                rate_bps: i64::from(snapshot.rate.bps()),
                amount_cents: snapshot.amount.cents(),
                cost_cents: snapshot.cost.cents(),
                paid: false,
                payout_batch_id: None,
                created_at: now,
            };
            self.db.commissions().insert(&tx).await?;
        }

        self.db
            .appointments()
            .set_status(
                &appointment.id,
                &[AppointmentStatus::Scheduled, AppointmentStatus::Confirmed],
                AppointmentStatus::Completed,
                now,
            )
            .await?;

        if let Some(client) = &client {
            self.db
                .clients()
                .record_visit(&client.id, plan.allocation.total.cents(), now)
                .await?;
        }

        info!(
            appointment_id = %appointment.id,
            total = %plan.allocation.total,
            tenders = plan.ledger_drafts.len(),
            "Appointment settled"
        );
        self.changes.publish(Change::Appointments);
        self.changes.publish(Change::CashDrawer);
        self.changes.publish(Change::Commissions);

        Ok(plan)
    }

    /// Books and settles a walk-in sale in one step. No conflict check:
    /// the client is already in the chair. A product-only sale occupies a
    /// minimal interval so the row still renders on the agenda.
    pub async fn quick_sale(&self, request: QuickSaleRequest) -> EngineResult<Appointment> {
        validate_person_name(&request.client_name)?;
        validate_phone(&request.client_phone)?;
        validate_uuid(&request.professional_id)?;

        self.db
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

        let client = self
            .materialize_client(&request.client_name, &request.client_phone)
            .await?;

        let now = Utc::now();
        let duration_minutes = services
            .iter()
            .map(|s| s.duration_minutes)
            .sum::<i64>()
            .max(5);

        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            tenant_id: self.tenant_id.clone(),
            professional_id: request.professional_id.clone(),
            client_id: Some(client.id.clone()),
            status: AppointmentStatus::Confirmed,
            starts_at: now.naive_utc(),
            duration_minutes,
            total_cents: 0,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        self.db.appointments().insert(&appointment).await?;

        for service in &services {
            self.add_service_to_comanda(&appointment.id, &service.id)
                .await?;
        }
        for product_id in &request.product_ids {
            self.add_product_to_comanda(&appointment.id, product_id)
                .await?;
        }

        self.checkout_appointment(&appointment.id, &request.tenders)
            .await?;

        self.db
            .appointments()
            .get_by_id(&appointment.id)
            .await?
            .ok_or_else(|| EngineError::not_found("Appointment", &appointment.id))
    }

    /// Reverses a settlement: the appointment returns to CONFIRMED with its
    /// comanda intact, ledger and commission rows are deleted and the
    /// client's visit aggregates are reverted.
    pub async fn reopen(&self, appointment_id: &str) -> EngineResult<()> {
        let appointment = self
            .db
            .appointments()
            .get_by_id(appointment_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Appointment", appointment_id))?;

        if appointment.status != AppointmentStatus::Completed {
            return Err(CoreError::InvalidAppointmentStatus {
                appointment_id: appointment_id.to_string(),
                current_status: appointment.status.as_str().to_string(),
            }
            .into());
        }

        let deleted = self
            .db
            .ledger()
            .delete_for_appointment(&self.tenant_id, appointment_id)
            .await?;
        if deleted == 0 {
            self.reverse_unlinked_entries(&appointment).await?;
        }

        self.db
            .commissions()
            .delete_for_appointment(&self.tenant_id, appointment_id)
            .await?;

        if let Some(client_id) = &appointment.client_id {
            self.db
                .clients()
                .revert_visit(client_id, appointment.total_cents)
                .await?;
        }

        self.db
            .appointments()
            .set_status(
                appointment_id,
                &[AppointmentStatus::Completed],
                AppointmentStatus::Confirmed,
                Utc::now(),
            )
            .await?;

        info!(appointment_id = %appointment_id, "Appointment reopened");
        self.changes.publish(Change::Appointments);
        self.changes.publish(Change::CashDrawer);
        self.changes.publish(Change::Commissions);

        Ok(())
    }

    /// Fallback for settlements recorded before ledger entries carried the
    /// appointment link: match by sale description and amount.
    async fn reverse_unlinked_entries(&self, appointment: &Appointment) -> EngineResult<()> {
        let methods = self.db.payment_methods().list_active(&self.tenant_id).await?;
        let mut removed = 0u64;

        for method in &methods {
            let description = format!("Venda ({})", method.name);
            let candidates = self
                .db
                .ledger()
                .find_by_description_amount(
                    &self.tenant_id,
                    &description,
                    appointment.total_cents,
                )
                .await?;
            if let Some(entry) = candidates.first() {
                self.db.ledger().delete(&entry.id).await?;
                removed += 1;
            }
        }

        if removed == 0 {
            warn!(
                appointment_id = %appointment.id,
                "Reopen found no ledger entries to reverse"
            );
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
