//! # Cash Drawer Operations
//!
//! Session open/close and manual ledger entries.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open_session(responsible, opening?)                                   │
//! │       │  opening defaults to the previous session's closing count      │
//! │       │  second open ──► CashSessionAlreadyOpen (unique index, no      │
//! │       │                  check-then-act race)                          │
//! │       ▼                                                                 │
//! │  OPEN ──► add_entry / checkout append to the ledger                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  close_session(physical_count, observation?)                           │
//! │       └──► report: summary + physical − expected difference.          │
//! │            A discrepancy is recorded, never auto-corrected.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use navalha_core::cash::{close_difference, summarize, CashSummary};
use navalha_core::validation::{
    validate_amount_cents, validate_observation, validate_person_name, validate_rate_bps,
};
use navalha_core::{CashSession, CoreError, EntryDirection, LedgerEntry, Money};
use navalha_db::DbError;

use crate::error::{EngineError, EngineResult};
use crate::notify::Change;
use crate::Engine;

/// What close_session hands back for the printed closing slip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCloseReport {
    pub session_id: String,
    pub summary: CashSummary,
    pub physical_count: Money,
    /// physical − expected cash in hand. Informational only.
    pub difference: Money,
}

impl Engine {
    /// Opens the day's cash session.
    ///
    /// With no explicit opening balance, the previous session's closing
    /// count carries over (zero when there is no history). A concurrent
    /// second open loses at the storage layer and surfaces as
    /// `CashSessionAlreadyOpen`.
    pub async fn open_session(
        &self,
        responsible: &str,
        opening_balance: Option<Money>,
    ) -> EngineResult<CashSession> {
        validate_person_name(responsible)?;

        let opening_balance = match opening_balance {
            Some(balance) => balance,
            None => self
                .db
                .cash_sessions()
                .last_closed(&self.tenant_id)
                .await?
                .and_then(|s| s.closing_balance_cents)
                .map(Money::from_cents)
                .unwrap_or(Money::zero()),
        };

        let session = CashSession {
            id: Uuid::new_v4().to_string(),
            tenant_id: self.tenant_id.clone(),
            opened_at: Utc::now(),
            opening_balance_cents: opening_balance.cents(),
            closed_at: None,
            closing_balance_cents: None,
            responsible: responsible.to_string(),
            observation: None,
        };

        match self.db.cash_sessions().open(&session).await {
            Ok(()) => {}
            Err(DbError::UniqueViolation { .. }) => {
                return Err(CoreError::CashSessionAlreadyOpen.into());
            }
            Err(other) => return Err(other.into()),
        }

        info!(session_id = %session.id, opening = %opening_balance, "Cash session opened");
        self.changes.publish(Change::CashDrawer);

        Ok(session)
    }

    /// Closes the open session against a physical cash count.
    pub async fn close_session(
        &self,
        physical_count: Money,
        observation: Option<&str>,
    ) -> EngineResult<SessionCloseReport> {
        let session = self
            .db
            .cash_sessions()
            .current_open(&self.tenant_id)
            .await?
            .ok_or(EngineError::Core(CoreError::CashSessionClosed))?;

        let observation = match observation {
            Some(text) => Some(validate_observation(text)?),
            None => None,
        };

        let entries = self.db.ledger().list_for_session(&session.id).await?;
        let summary = summarize(session.opening_balance(), &entries);
        let difference = close_difference(physical_count, summary.cash_in_hand);

        self.db
            .cash_sessions()
            .close(
                &session.id,
                Utc::now(),
                physical_count.cents(),
                observation.as_deref(),
            )
            .await?;

        info!(
            session_id = %session.id,
            physical = %physical_count,
            difference = %difference,
            "Cash session closed"
        );
        self.changes.publish(Change::CashDrawer);

        Ok(SessionCloseReport {
            session_id: session.id,
            summary,
            physical_count,
            difference,
        })
    }

    /// Appends a manual ledger entry (supply run, change withdrawal...).
    ///
    /// Requires an open session except for discount pseudo-entries, which
    /// never represent money in the drawer.
    pub async fn add_entry(
        &self,
        direction: EntryDirection,
        amount: Money,
        method_id: &str,
        description: &str,
    ) -> EngineResult<LedgerEntry> {
        validate_amount_cents(amount.cents())?;

        let method = self
            .db
            .payment_methods()
            .get_by_id(method_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Payment method", method_id))?;

        let session = self.db.cash_sessions().current_open(&self.tenant_id).await?;
        if session.is_none() && !method.kind.is_discount() {
            return Err(CoreError::CashSessionClosed.into());
        }

        let entry = LedgerEntry {
            id: Uuid::new_v4().to_string(),
            tenant_id: self.tenant_id.clone(),
            session_id: session.map(|s| s.id),
            direction,
            amount_cents: amount.cents(),
            method_name: method.name.clone(),
            method_kind: method.kind,
            description: description.to_string(),
            fee_cents: None,
            appointment_id: None,
            occurred_at: Utc::now(),
        };
        self.db.ledger().insert(&entry).await?;

        self.changes.publish(Change::CashDrawer);
        Ok(entry)
    }

    /// Changes a payment method's processor fee, bounds-checked to 0-100%.
    ///
    /// Ledger entries written before the change keep the fee frozen at
    /// settlement time.
    pub async fn set_payment_method_fee(&self, method_id: &str, fee_bps: i64) -> EngineResult<()> {
        validate_rate_bps(fee_bps)?;
        self.db
            .payment_methods()
            .get_by_id(method_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Payment method", method_id))?;

        self.db.payment_methods().update_fee(method_id, fee_bps).await?;

        info!(method_id = %method_id, fee_bps, "Payment method fee updated");
        self.changes.publish(Change::CashDrawer);
        Ok(())
    }

    /// The open session's live summary for the drawer screen.
    pub async fn current_summary(&self) -> EngineResult<CashSummary> {
        let session = self
            .db
            .cash_sessions()
            .current_open(&self.tenant_id)
            .await?
            .ok_or(EngineError::Core(CoreError::CashSessionClosed))?;

        let entries = self.db.ledger().list_for_session(&session.id).await?;
        Ok(summarize(session.opening_balance(), &entries))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_engine;

    #[tokio::test]
    async fn test_open_defaults_to_last_closing_count() {
        let engine = test_engine().await;

        // No history: opens at zero
        let first = engine.open_session("Rafael", None).await.unwrap();
        assert_eq!(first.opening_balance_cents, 0);

        engine
            .close_session(Money::from_cents(12000), None)
            .await
            .unwrap();

        // Next open carries the counted amount over
        let second = engine.open_session("Rafael", None).await.unwrap();
        assert_eq!(second.opening_balance_cents, 12000);
    }

    #[tokio::test]
    async fn test_second_open_rejected() {
        let engine = test_engine().await;
        engine
            .open_session("Rafael", Some(Money::from_cents(10000)))
            .await
            .unwrap();

        let err = engine.open_session("Ana", None).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::CashSessionAlreadyOpen)
        ));
    }

    #[tokio::test]
    async fn test_manual_entry_requires_open_session() {
        let engine = test_engine().await;

        let err = engine
            .add_entry(
                EntryDirection::Out,
                Money::from_cents(2000),
                "pm-cash",
                "Compra de insumos",
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::CashSessionClosed)
        ));

        // Discount entries are exempt and carry no session
        let discount = engine
            .add_entry(
                EntryDirection::In,
                Money::from_cents(1000),
                "pm-discount",
                "Cortesia",
            )
            .await
            .unwrap();
        assert!(discount.session_id.is_none());
    }

    /// Scenario E: open R$100, cash sale R$50, cash out R$20, count R$135
    /// at close -> expected 130, difference +5.
    #[tokio::test]
    async fn test_close_report_difference() {
        let engine = test_engine().await;
        engine
            .open_session("Rafael", Some(Money::from_cents(10000)))
            .await
            .unwrap();

        engine
            .add_entry(
                EntryDirection::In,
                Money::from_cents(5000),
                "pm-cash",
                "Venda avulsa",
            )
            .await
            .unwrap();
        engine
            .add_entry(
                EntryDirection::Out,
                Money::from_cents(2000),
                "pm-cash",
                "Troco",
            )
            .await
            .unwrap();

        let summary = engine.current_summary().await.unwrap();
        assert_eq!(summary.cash_in_hand.cents(), 13000);

        let report = engine
            .close_session(Money::from_cents(13500), Some("Sobrou troco"))
            .await
            .unwrap();
        assert_eq!(report.summary.cash_in_hand.cents(), 13000);
        assert_eq!(report.difference.cents(), 500);

        // Drawer is closed now
        let err = engine.current_summary().await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::CashSessionClosed)
        ));
    }

    #[tokio::test]
    async fn test_method_fee_update_bounds_checked() {
        let engine = test_engine().await;

        let err = engine
            .set_payment_method_fee("pm-pix", 10_001)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        let err = engine.set_payment_method_fee("pm-pix", -1).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        engine.set_payment_method_fee("pm-pix", 250).await.unwrap();
        let method = engine
            .db()
            .payment_methods()
            .get_by_id("pm-pix")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(method.fee_bps, 250);
    }

    #[tokio::test]
    async fn test_zero_amount_entry_rejected() {
        let engine = test_engine().await;
        engine.open_session("Rafael", None).await.unwrap();

        let err = engine
            .add_entry(EntryDirection::In, Money::zero(), "pm-cash", "Nada")
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
