//! # Domain Types
//!
//! Core domain types for scheduling and settlement.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Appointment    │   │  CashSession    │   │  LedgerEntry    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  opened_at      │   │  direction      │       │
//! │  │  professional   │   │  opening bal.   │   │  amount (>0)    │       │
//! │  │  starts_at      │   │  closed_at?     │   │  method snapshot│       │
//! │  │  status         │   │  closing bal.?  │   │  fee?           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌──────────────┐     │
//! │  │  Professional   │   │ CommissionTransaction│   │    Goal      │     │
//! │  │  commission rate│   │ frozen rate/amount   │   │ target/period│     │
//! │  │  specialties    │   │ payout batch         │   │ per pro/shop │     │
//! │  └─────────────────┘   └──────────────────────┘   └──────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Settlement freezes everything it derives: item name and price on the
//! appointment item, method name/kind/fee on the ledger entry, rate and
//! amount (and product cost) on the commission transaction. Later catalog
//! or rate edits never rewrite settled history.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::conflict::Interval;
use crate::money::{Money, Rate};
use crate::slots::{LunchWindow, WorkSchedule};

// =============================================================================
// Appointment
// =============================================================================

/// The status of an appointment.
///
/// Canceled appointments have no variant: cancellation hard-deletes the row.
/// This is a deliberate simplification (no history retention), documented
/// rather than silently changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked, awaiting confirmation.
    Scheduled,
    /// Confirmed by the shop; still editable.
    Confirmed,
    /// Settled at checkout. Immutable except via reopen.
    Completed,
    /// Time-off block: no client, zero value, reserves the calendar.
    Blocked,
}

impl AppointmentStatus {
    /// The stored snake_case form, matching the serde and sqlx renames.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Blocked => "blocked",
        }
    }

    /// Whether reschedule is allowed from this status.
    pub fn allows_reschedule(&self) -> bool {
        matches!(self, AppointmentStatus::Scheduled | AppointmentStatus::Confirmed)
    }

    /// Whether cancellation (hard delete) is allowed from this status.
    pub fn allows_cancel(&self) -> bool {
        !matches!(self, AppointmentStatus::Completed)
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

/// An appointment or time-off block on a professional's calendar.
///
/// Invariant: `ends_at = starts_at + duration_minutes`. Blocked rows carry
/// no client and zero value. The assigned professional is a first-class
/// column, never encoded as a pseudo line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Appointment {
    pub id: String,
    pub tenant_id: String,
    pub professional_id: String,
    /// None for time-off blocks.
    pub client_id: Option<String>,
    pub status: AppointmentStatus,
    /// Salon-local start time.
    pub starts_at: NaiveDateTime,
    pub duration_minutes: i64,
    /// Sum of item prices; zero for time-off blocks.
    pub total_cents: i64,
    /// Free text: booking notes, or the time-off reason for Blocked rows.
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// End time derived from the duration invariant.
    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at + Duration::minutes(self.duration_minutes)
    }

    /// The occupied calendar interval, for conflict detection.
    pub fn interval(&self) -> Interval {
        Interval::new(self.starts_at, self.duration_minutes)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn is_time_off(&self) -> bool {
        self.status == AppointmentStatus::Blocked
    }
}

// =============================================================================
// Appointment Items (the comanda)
// =============================================================================

/// What kind of catalog entry a line item bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Service,
    Product,
}

/// A billable line item on an appointment's comanda.
///
/// Name and price are frozen at the moment the item is added; the catalog
/// may change afterwards without rewriting open comandas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AppointmentItem {
    pub id: String,
    pub appointment_id: String,
    pub kind: ItemKind,
    /// Catalog reference (service or product id), if the item came from one.
    pub catalog_id: Option<String>,
    /// Name at time of adding (frozen).
    pub name: String,
    /// Price in centavos at time of adding (frozen).
    pub price_cents: i64,
    /// Service duration contribution; None for products.
    pub duration_minutes: Option<i64>,
    /// Commission override in basis points. None means the professional's
    /// default rate applies; products always carry their catalog rate here.
    pub custom_rate_bps: Option<i64>,
    /// Product cost snapshot for profit reporting; zero for services.
    pub cost_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl AppointmentItem {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// How this item's commission rate resolves at settlement.
    pub fn commission_basis(&self) -> CommissionBasis {
        match self.custom_rate_bps {
            Some(bps) => CommissionBasis::Custom(Rate::from_stored(bps)),
            None => CommissionBasis::ProfessionalDefault,
        }
    }
}

/// Where a line item's commission rate comes from.
///
/// Explicit tagged variant rather than an implicit "zero means default":
/// services with a catalog override and products carry `Custom`, everything
/// else falls back to the professional's rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommissionBasis {
    ProfessionalDefault,
    Custom(Rate),
}

// =============================================================================
// Professional
// =============================================================================

/// Whether a professional is currently taking bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ProfessionalStatus {
    Active,
    Vacation,
}

/// A service professional (barber, stylist, manicurist...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Professional {
    pub id: String,
    pub tenant_id: String,
    pub display_name: String,
    pub role_label: String,
    /// Default commission rate in basis points (4000 = 40%).
    pub commission_rate_bps: i64,
    /// JSON array of category tags; NULL means unrestricted (fail-open).
    pub specialties_json: Option<String>,
    pub work_starts_at: chrono::NaiveTime,
    pub work_ends_at: chrono::NaiveTime,
    pub lunch_starts_at: Option<chrono::NaiveTime>,
    pub lunch_ends_at: Option<chrono::NaiveTime>,
    pub status: ProfessionalStatus,
    pub created_at: DateTime<Utc>,
}

impl Professional {
    #[inline]
    pub fn commission_rate(&self) -> Rate {
        Rate::from_stored(self.commission_rate_bps)
    }

    /// Parses the declared specialties into the explicit policy variant.
    ///
    /// A missing or unparseable list is treated as `Unrestricted`: a
    /// professional who declared nothing is eligible for every service
    /// (fail-open, per the documented policy choice).
    pub fn specialties(&self) -> Specialties {
        match &self.specialties_json {
            None => Specialties::Unrestricted,
            Some(raw) => match serde_json::from_str::<BTreeSet<String>>(raw) {
                Ok(set) if !set.is_empty() => Specialties::RestrictedTo(set),
                _ => Specialties::Unrestricted,
            },
        }
    }

    /// The personal working window used to filter generated slots.
    pub fn work_schedule(&self) -> WorkSchedule {
        let lunch = match (self.lunch_starts_at, self.lunch_ends_at) {
            (Some(starts_at), Some(ends_at)) => Some(LunchWindow { starts_at, ends_at }),
            _ => None,
        };
        WorkSchedule {
            starts_at: self.work_starts_at,
            ends_at: self.work_ends_at,
            lunch,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == ProfessionalStatus::Active
    }
}

/// Which service categories a professional covers.
///
/// `Unrestricted` is the explicit fail-open variant: no declared
/// specialties means eligible for everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specialties {
    Unrestricted,
    RestrictedTo(BTreeSet<String>),
}

impl Specialties {
    /// Whether this professional handles services of the given category.
    pub fn handles(&self, category: &str) -> bool {
        match self {
            Specialties::Unrestricted => true,
            Specialties::RestrictedTo(set) => set.contains(category),
        }
    }
}

// =============================================================================
// Cash Session
// =============================================================================

/// A daily cash-register session.
///
/// At most one open session (closed_at NULL) may exist per tenant; the
/// storage layer enforces this with a partial unique index rather than a
/// check-then-act read in application code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CashSession {
    pub id: String,
    pub tenant_id: String,
    pub opened_at: DateTime<Utc>,
    pub opening_balance_cents: i64,
    pub closed_at: Option<DateTime<Utc>>,
    /// The physical count recorded at close.
    pub closing_balance_cents: Option<i64>,
    pub responsible: String,
    pub observation: Option<String>,
}

impl CashSession {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    #[inline]
    pub fn opening_balance(&self) -> Money {
        Money::from_cents(self.opening_balance_cents)
    }
}

// =============================================================================
// Ledger Entries
// =============================================================================

/// Direction of a cash-register movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum EntryDirection {
    In,
    Out,
}

/// A single cash-register movement.
///
/// Amounts are always positive magnitudes; `direction` carries the sign.
/// The payment method is snapshotted by name and kind so renaming a method
/// later does not rewrite drawer history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LedgerEntry {
    pub id: String,
    pub tenant_id: String,
    /// Session the entry accrued under. None only for discount entries
    /// recorded while the drawer is closed.
    pub session_id: Option<String>,
    pub direction: EntryDirection,
    pub amount_cents: i64,
    pub method_name: String,
    pub method_kind: TenderKind,
    pub description: String,
    /// Processor fee computed at settlement, if any.
    pub fee_cents: Option<i64>,
    /// Link back to the settled appointment, used by reopen reversal.
    pub appointment_id: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl LedgerEntry {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Amount with direction applied: IN positive, OUT negative.
    pub fn signed(&self) -> Money {
        match self.direction {
            EntryDirection::In => self.amount(),
            EntryDirection::Out => Money::from_cents(-self.amount_cents),
        }
    }
}

// =============================================================================
// Payment Methods
// =============================================================================

/// The tender family a payment method belongs to.
///
/// `Discount` is a pseudo-tender representing a price reduction: it settles
/// a comanda line but never counts as cash in hand or revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum TenderKind {
    Cash,
    Pix,
    Credit,
    Debit,
    Discount,
    Other,
}

impl TenderKind {
    #[inline]
    pub fn is_cash(&self) -> bool {
        matches!(self, TenderKind::Cash)
    }

    #[inline]
    pub fn is_discount(&self) -> bool {
        matches!(self, TenderKind::Discount)
    }
}

/// A configured payment method (tender type).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PaymentMethod {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub kind: TenderKind,
    /// Processor fee in basis points (199 = 1.99%).
    pub fee_bps: i64,
    pub days_to_receive: i64,
    pub is_active: bool,
}

impl PaymentMethod {
    #[inline]
    pub fn fee_rate(&self) -> Rate {
        Rate::from_stored(self.fee_bps)
    }
}

// =============================================================================
// Commission Transactions
// =============================================================================

/// What a commission transaction compensates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum CommissionKind {
    Service,
    ProductSale,
    Bonus,
    EmployeePurchase,
}

/// A per-line-item commission record, frozen at settlement time.
///
/// Rate, amount and cost are snapshots: later changes to the professional's
/// default rate or the catalog must not retroactively alter these records
/// unless an explicit recalculation is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CommissionTransaction {
    pub id: String,
    pub tenant_id: String,
    pub professional_id: String,
    /// Settled appointment; None for manual bonus entries.
    pub appointment_id: Option<String>,
    pub kind: CommissionKind,
    pub item_name: String,
    pub client_name: String,
    pub occurred_on: NaiveDate,
    pub price_cents: i64,
    /// Commission rate snapshot in basis points.
    pub rate_bps: i64,
    /// rate × price, frozen.
    pub amount_cents: i64,
    /// Product cost snapshot for profit reports; zero for services.
    pub cost_cents: i64,
    pub paid: bool,
    /// Set when the record was settled in a bulk payout; cleared by undo.
    pub payout_batch_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CommissionTransaction {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    #[inline]
    pub fn rate(&self) -> Rate {
        Rate::from_stored(self.rate_bps)
    }

    /// Whether this record counts toward shop revenue.
    pub fn is_revenue(&self) -> bool {
        matches!(self.kind, CommissionKind::Service | CommissionKind::ProductSale)
    }
}

// =============================================================================
// Goals
// =============================================================================

/// What a monthly goal targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    ShopRevenue,
    ProfessionalRevenue,
    ProfessionalSecondaryUnits,
}

/// A monthly target. At most one active goal per (kind, professional);
/// setting a new one replaces the prior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Goal {
    pub id: String,
    pub tenant_id: String,
    pub kind: GoalKind,
    /// None means shop-wide.
    pub professional_id: Option<String>,
    /// Revenue target in centavos, or unit count for secondary-unit goals.
    pub target_value: i64,
    /// Period in `YYYY-MM` form.
    pub period: String,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// First day of the goal's month, if the period string is well formed.
    pub fn period_start(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&format!("{}-01", self.period), "%Y-%m-%d").ok()
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client record with lifetime-value aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub phone: String,
    /// Active subscription: service items settle at zero.
    pub is_subscriber: bool,
    pub total_spent_cents: i64,
    pub visit_count: i64,
    pub last_visit_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    #[inline]
    pub fn total_spent(&self) -> Money {
        Money::from_cents(self.total_spent_cents)
    }
}

// =============================================================================
// Catalog Read Models
// =============================================================================

/// A service in the catalog (read-only to this engine).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ServiceOffering {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub price_cents: i64,
    pub duration_minutes: i64,
    /// Category tag matched against professional specialties.
    pub category: String,
    /// Per-service commission override; None means professional default.
    pub custom_rate_bps: Option<i64>,
    pub is_active: bool,
}

impl ServiceOffering {
    pub fn commission_basis(&self) -> CommissionBasis {
        match self.custom_rate_bps {
            Some(bps) => CommissionBasis::Custom(Rate::from_stored(bps)),
            None => CommissionBasis::ProfessionalDefault,
        }
    }
}

/// A retail product in the catalog (read-only to this engine).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductOffering {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub commission_rate_bps: i64,
    pub is_active: bool,
}

impl ProductOffering {
    #[inline]
    pub fn commission_rate(&self) -> Rate {
        Rate::from_stored(self.commission_rate_bps)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_appointment_end_invariant() {
        let starts_at = NaiveDate::from_ymd_opt(2026, 8, 28)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let appt = Appointment {
            id: "a1".to_string(),
            tenant_id: "t1".to_string(),
            professional_id: "p1".to_string(),
            client_id: Some("c1".to_string()),
            status: AppointmentStatus::Scheduled,
            starts_at,
            duration_minutes: 45,
            total_cents: 5000,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(appt.ends_at(), starts_at + Duration::minutes(45));
    }

    #[test]
    fn test_status_transitions_allowed() {
        assert!(AppointmentStatus::Scheduled.allows_reschedule());
        assert!(AppointmentStatus::Confirmed.allows_reschedule());
        assert!(!AppointmentStatus::Completed.allows_reschedule());
        assert!(!AppointmentStatus::Blocked.allows_reschedule());

        assert!(AppointmentStatus::Scheduled.allows_cancel());
        assert!(AppointmentStatus::Blocked.allows_cancel());
        assert!(!AppointmentStatus::Completed.allows_cancel());
    }

    #[test]
    fn test_specialties_fail_open() {
        let mut pro = Professional {
            id: "p1".to_string(),
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

        // No declared specialties: eligible for everything
        assert!(pro.specialties().handles("corte"));
        assert!(pro.specialties().handles("manicure"));

        pro.specialties_json = Some(r#"["corte","barba"]"#.to_string());
        assert!(pro.specialties().handles("corte"));
        assert!(!pro.specialties().handles("manicure"));

        // Empty list degrades to unrestricted, not to "handles nothing"
        pro.specialties_json = Some("[]".to_string());
        assert!(pro.specialties().handles("manicure"));
    }

    #[test]
    fn test_ledger_entry_signed() {
        let entry = LedgerEntry {
            id: "l1".to_string(),
            tenant_id: "t1".to_string(),
            session_id: Some("s1".to_string()),
            direction: EntryDirection::Out,
            amount_cents: 2000,
            method_name: "Dinheiro".to_string(),
            method_kind: TenderKind::Cash,
            description: "Troco".to_string(),
            fee_cents: None,
            appointment_id: None,
            occurred_at: Utc::now(),
        };
        assert_eq!(entry.signed().cents(), -2000);
        assert_eq!(entry.amount().cents(), 2000);
    }

    #[test]
    fn test_commission_basis_resolution() {
        let svc = ServiceOffering {
            id: "s1".to_string(),
            tenant_id: "t1".to_string(),
            name: "Corte".to_string(),
            price_cents: 5000,
            duration_minutes: 30,
            category: "corte".to_string(),
            custom_rate_bps: None,
            is_active: true,
        };
        assert_eq!(svc.commission_basis(), CommissionBasis::ProfessionalDefault);

        let svc_custom = ServiceOffering {
            custom_rate_bps: Some(2500),
            ..svc
        };
        assert_eq!(
            svc_custom.commission_basis(),
            CommissionBasis::Custom(Rate::from_bps(2500))
        );
    }

    #[test]
    fn test_goal_period_start() {
        let goal = Goal {
            id: "g1".to_string(),
            tenant_id: "t1".to_string(),
            kind: GoalKind::ShopRevenue,
            professional_id: None,
            target_value: 5_000_000,
            period: "2026-08".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(
            goal.period_start(),
            NaiveDate::from_ymd_opt(2026, 8, 1)
        );
    }

    #[test]
    fn test_tender_kind_predicates() {
        assert!(TenderKind::Cash.is_cash());
        assert!(!TenderKind::Pix.is_cash());
        assert!(TenderKind::Discount.is_discount());
        assert!(!TenderKind::Debit.is_discount());
    }
}
