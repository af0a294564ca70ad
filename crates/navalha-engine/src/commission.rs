//! # Commission Operations & Reports
//!
//! Payout batches, manual bonus/purchase entries, pending recalculation
//! and the read-side period reports.
//!
//! ## Payout Batches
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pay_professional_period(pro, from, to)                                │
//! │       │  every unpaid record in [from, to] gets paid=1 and the same    │
//! │       │  batch id                                                       │
//! │       ▼                                                                 │
//! │  PayoutReceipt { batch_id, settled_count, total }                      │
//! │       │                                                                 │
//! │       ▼  mistake?                                                       │
//! │  undo_payout(batch_id) ──► exactly that batch back to unpaid          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use navalha_core::reports::{
    goal_progress, net_profit, product_attach_rate, shop_revenue, ticket_average, GoalProgress,
};
use navalha_core::validation::{validate_amount_cents, validate_rate_bps};
use navalha_core::{CommissionKind, CommissionTransaction, GoalKind, Money};

use crate::error::{EngineError, EngineResult};
use crate::notify::Change;
use crate::Engine;

/// Outcome of a bulk payout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutReceipt {
    pub batch_id: String,
    pub professional_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub settled_count: u64,
    pub total: Money,
}

/// Aggregates over a reporting period's frozen commission snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub revenue: Money,
    pub net_profit: Money,
    pub ticket_average: Money,
    pub product_attach_rate: f64,
    /// Σ commission amounts over all records in the period.
    pub commissions_accrued: Money,
}

impl Engine {
    /// Settles every unpaid commission record for a professional inside the
    /// inclusive date range, under a fresh batch id.
    pub async fn pay_professional_period(
        &self,
        professional_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<PayoutReceipt> {
        self.db
            .professionals()
            .get_by_id(professional_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Professional", professional_id))?;

        let pending: Vec<CommissionTransaction> = self
            .db
            .commissions()
            .list_for_professional_period(&self.tenant_id, professional_id, from, to)
            .await?
            .into_iter()
            .filter(|t| !t.paid)
            .collect();
        let total: Money = pending.iter().map(|t| t.amount()).sum();

        let batch_id = Uuid::new_v4().to_string();
        let settled_count = self
            .db
            .commissions()
            .mark_paid(&self.tenant_id, professional_id, from, to, &batch_id)
            .await?;

        info!(
            professional_id = %professional_id,
            batch_id = %batch_id,
            settled_count,
            total = %total,
            "Commission payout settled"
        );
        self.changes.publish(Change::Commissions);

        Ok(PayoutReceipt {
            batch_id,
            professional_id: professional_id.to_string(),
            from,
            to,
            settled_count,
            total,
        })
    }

    /// Reverts one payout batch back to unpaid. Returns how many records
    /// were restored; an unknown batch restores zero.
    pub async fn undo_payout(&self, batch_id: &str) -> EngineResult<u64> {
        let restored = self.db.commissions().undo_payout(batch_id).await?;
        info!(batch_id = %batch_id, restored, "Payout undone");
        self.changes.publish(Change::Commissions);
        Ok(restored)
    }

    /// Records a manual bonus for a professional. Bonuses compensate at
    /// 100% of their value and never count as shop revenue.
    pub async fn add_bonus(
        &self,
        professional_id: &str,
        label: &str,
        amount: Money,
        occurred_on: NaiveDate,
    ) -> EngineResult<CommissionTransaction> {
        validate_amount_cents(amount.cents())?;
        let professional = self
            .db
            .professionals()
            .get_by_id(professional_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Professional", professional_id))?;

        let tx = CommissionTransaction {
            id: Uuid::new_v4().to_string(),
            tenant_id: self.tenant_id.clone(),
            professional_id: professional.id.clone(),
            appointment_id: None,
            kind: CommissionKind::Bonus,
            item_name: label.to_string(),
            client_name: professional.display_name.clone(),
            occurred_on,
            price_cents: amount.cents(),
            rate_bps: 10_000,
            amount_cents: amount.cents(),
            cost_cents: 0,
            paid: false,
            payout_batch_id: None,
            created_at: Utc::now(),
        };
        self.db.commissions().insert(&tx).await?;

        self.changes.publish(Change::Commissions);
        Ok(tx)
    }

    /// Records a product bought by a professional at cost. The purchase
    /// carries no commission and no revenue; the cost flows into the
    /// professional's statement as a deduction line.
    pub async fn add_employee_purchase(
        &self,
        professional_id: &str,
        product_id: &str,
        occurred_on: NaiveDate,
    ) -> EngineResult<CommissionTransaction> {
        let professional = self
            .db
            .professionals()
            .get_by_id(professional_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Professional", professional_id))?;
        let product = self
            .db
            .catalog()
            .get_product(product_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Product", product_id))?;

        let tx = CommissionTransaction {
            id: Uuid::new_v4().to_string(),
            tenant_id: self.tenant_id.clone(),
            professional_id: professional.id.clone(),
            appointment_id: None,
            kind: CommissionKind::EmployeePurchase,
            item_name: product.name.clone(),
            client_name: professional.display_name.clone(),
            occurred_on,
            price_cents: product.cost_cents,
            rate_bps: 0,
            amount_cents: 0,
            cost_cents: product.cost_cents,
            paid: false,
            payout_batch_id: None,
            created_at: Utc::now(),
        };
        self.db.commissions().insert(&tx).await?;

        self.changes.publish(Change::Commissions);
        Ok(tx)
    }

    /// Changes a professional's default commission rate, bounds-checked
    /// to 0-100%.
    ///
    /// Frozen snapshots keep their rate; only `recalculate_pending`
    /// applies the new rate to unpaid service records.
    pub async fn set_professional_commission_rate(
        &self,
        professional_id: &str,
        rate_bps: i64,
    ) -> EngineResult<()> {
        validate_rate_bps(rate_bps)?;
        self.db
            .professionals()
            .get_by_id(professional_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Professional", professional_id))?;

        self.db
            .professionals()
            .update_commission_rate(professional_id, rate_bps)
            .await?;

        info!(professional_id = %professional_id, rate_bps, "Commission rate updated");
        self.changes.publish(Change::Commissions);
        Ok(())
    }

    /// Recomputes unpaid service commissions with the professional's
    /// current default rate. Paid history is never touched; product rows
    /// keep their catalog rate.
    pub async fn recalculate_pending(&self, professional_id: &str) -> EngineResult<u64> {
        let professional = self
            .db
            .professionals()
            .get_by_id(professional_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Professional", professional_id))?;
        let rate = professional.commission_rate();

        let pending = self
            .db
            .commissions()
            .list_unpaid(&self.tenant_id, professional_id)
            .await?;

        let mut updated = 0u64;
        for tx in pending {
            if tx.kind != CommissionKind::Service {
                continue;
            }
            let amount = tx.price().apply_rate(rate);
            updated += self
                .db
                .commissions()
                .update_snapshot(&tx.id, i64::from(rate.bps()), amount.cents())
                .await?;
        }

        info!(professional_id = %professional_id, updated, "Pending commissions recalculated");
        if updated > 0 {
            self.changes.publish(Change::Commissions);
        }
        Ok(updated)
    }

    /// Revenue, profit and ticket figures over an inclusive date range.
    pub async fn period_report(&self, from: NaiveDate, to: NaiveDate) -> EngineResult<PeriodReport> {
        let transactions = self
            .db
            .commissions()
            .list_for_period(&self.tenant_id, from, to)
            .await?;

        let commissions_accrued: Money = transactions.iter().map(|t| t.amount()).sum();

        Ok(PeriodReport {
            from,
            to,
            revenue: shop_revenue(&transactions),
            net_profit: net_profit(&transactions),
            ticket_average: ticket_average(&transactions),
            product_attach_rate: product_attach_rate(&transactions),
            commissions_accrued,
        })
    }

    /// Progress against a monthly goal, or None when no goal is set.
    ///
    /// `today` is explicit so dashboards and tests agree on the projection.
    pub async fn goal_report(
        &self,
        kind: GoalKind,
        professional_id: Option<&str>,
        period: &str,
        today: NaiveDate,
    ) -> EngineResult<Option<GoalProgress>> {
        let Some(goal) = self
            .db
            .goals()
            .get(&self.tenant_id, kind, professional_id, period)
            .await?
        else {
            return Ok(None);
        };

        let Some(start) = goal.period_start() else {
            return Ok(None);
        };
        let end = month_end(start);
        let transactions = self
            .db
            .commissions()
            .list_for_period(&self.tenant_id, start, end)
            .await?;

        let accumulated = match kind {
            GoalKind::ShopRevenue => shop_revenue(&transactions).cents(),
            GoalKind::ProfessionalRevenue => {
                let scoped: Vec<CommissionTransaction> = transactions
                    .into_iter()
                    .filter(|t| Some(t.professional_id.as_str()) == professional_id)
                    .collect();
                shop_revenue(&scoped).cents()
            }
            GoalKind::ProfessionalSecondaryUnits => transactions
                .iter()
                .filter(|t| {
                    t.kind == CommissionKind::ProductSale
                        && Some(t.professional_id.as_str()) == professional_id
                })
                .count() as i64,
        };

        Ok(Some(goal_progress(&goal, accumulated, today)))
    }
}

/// Last day of the month `first` starts.
fn month_end(first: NaiveDate) -> NaiveDate {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    match next {
        Some(n) => n - Duration::days(1),
        None => first,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
