//! # Settlement Math
//!
//! Pure half of checkout: comanda totals, multi-tender allocation,
//! processor fees and commission snapshots.
//!
//! ## Settlement Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Settlement Plan                                  │
//! │                                                                         │
//! │  comanda items ──► comanda_total(items, subscriber)                    │
//! │       │              (subscriber: services bill zero, products bill)   │
//! │       ▼                                                                 │
//! │  tenders ──► Allocation { total, paid, remaining }                     │
//! │       │         paid < total ──► InsufficientPayment (BLOCKED)         │
//! │       ▼                                                                 │
//! │  per tender:  fee = amount × method.fee_bps                            │
//! │               one ledger draft (IN, sale or discount category)         │
//! │  per item:    rate = custom override | professional default            │
//! │               one frozen commission snapshot (rate × price)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SettlementPlan ──► engine writes ledger + commissions + COMPLETED     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a calculation; the engine owns the writes.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Rate};
use crate::types::{
    AppointmentItem, CommissionBasis, CommissionKind, EntryDirection, ItemKind, PaymentMethod,
    TenderKind,
};

// =============================================================================
// Comanda Total
// =============================================================================

/// Sums the comanda's line items.
///
/// Subscriber rule: a client with an active subscription pays zero for every
/// *service* item (covered by the plan); products are always billed.
pub fn comanda_total(items: &[AppointmentItem], client_is_subscriber: bool) -> Money {
    items
        .iter()
        .map(|item| match item.kind {
            ItemKind::Service if client_is_subscriber => Money::zero(),
            _ => item.price(),
        })
        .sum()
}

// =============================================================================
// Tender Allocation
// =============================================================================

/// One tender assigned by the operator: a payment-method snapshot plus the
/// amount put on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tender {
    pub method: PaymentMethod,
    pub amount: Money,
}

impl Tender {
    /// Processor fee for this tender.
    pub fn fee(&self) -> Money {
        self.amount.apply_rate(self.method.fee_rate())
    }
}

/// Running allocation state shown to the operator while tenders are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub total: Money,
    pub paid: Money,
    /// `max(0, total - paid)`; settlement is blocked while positive.
    pub remaining: Money,
}

impl Allocation {
    pub fn new(total: Money, tenders: &[Tender]) -> Self {
        let paid: Money = tenders.iter().map(|t| t.amount).sum();
        Allocation {
            total,
            paid,
            remaining: (total - paid).clamp_zero(),
        }
    }

    /// Settlement proceeds once the comanda is fully covered. Overpayment
    /// is allowed: it is recorded as tendered, never refunded here.
    pub fn is_settled(&self) -> bool {
        self.paid >= self.total
    }
}

// =============================================================================
// Commission Resolution
// =============================================================================

/// Resolves the commission rate for one line item.
///
/// Custom basis (per-service override, or the product's catalog rate) wins;
/// otherwise the professional's default rate applies.
pub fn resolve_commission_rate(basis: CommissionBasis, professional_default: Rate) -> Rate {
    match basis {
        CommissionBasis::Custom(rate) => rate,
        CommissionBasis::ProfessionalDefault => professional_default,
    }
}

/// A frozen per-item commission computed at settlement time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionSnapshot {
    pub kind: CommissionKind,
    pub item_name: String,
    pub price: Money,
    pub rate: Rate,
    /// rate × price, fixed forever unless explicitly recalculated.
    pub amount: Money,
    /// Product cost carried into profit reports; zero for services.
    pub cost: Money,
}

// =============================================================================
// Ledger Drafts
// =============================================================================

/// A ledger entry the settlement wants written, before ids and timestamps
/// are attached by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerDraft {
    pub direction: EntryDirection,
    pub amount: Money,
    pub method_name: String,
    pub method_kind: TenderKind,
    pub description: String,
    pub fee: Money,
}

// =============================================================================
// Settlement Plan
// =============================================================================

/// The complete, validated outcome of the allocation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementPlan {
    pub allocation: Allocation,
    pub ledger_drafts: Vec<LedgerDraft>,
    pub commissions: Vec<CommissionSnapshot>,
}

impl SettlementPlan {
    /// Builds the plan for a comanda.
    ///
    /// ## Errors
    /// - `EmptyComanda` when there is nothing to bill
    /// - `InsufficientPayment` while tendered amounts do not cover the
    ///   total; the remaining balance is included for the operator
    pub fn build(
        items: &[AppointmentItem],
        tenders: &[Tender],
        client_is_subscriber: bool,
        professional_default_rate: Rate,
    ) -> CoreResult<SettlementPlan> {
        if items.is_empty() {
            return Err(CoreError::EmptyComanda);
        }

        let total = comanda_total(items, client_is_subscriber);
        let allocation = Allocation::new(total, tenders);
        if !allocation.is_settled() {
            return Err(CoreError::InsufficientPayment {
                total: allocation.total,
                remaining: allocation.remaining,
            });
        }

        let ledger_drafts = tenders
            .iter()
            .map(|tender| {
                let description = if tender.method.kind.is_discount() {
                    format!("Desconto ({})", tender.method.name)
                } else {
                    format!("Venda ({})", tender.method.name)
                };
                LedgerDraft {
                    direction: EntryDirection::In,
                    amount: tender.amount,
                    method_name: tender.method.name.clone(),
                    method_kind: tender.method.kind,
                    description,
                    fee: tender.fee(),
                }
            })
            .collect();

        let commissions = items
            .iter()
            .map(|item| {
                let rate =
                    resolve_commission_rate(item.commission_basis(), professional_default_rate);
                let kind = match item.kind {
                    ItemKind::Service => CommissionKind::Service,
                    ItemKind::Product => CommissionKind::ProductSale,
                };
                CommissionSnapshot {
                    kind,
                    item_name: item.name.clone(),
                    price: item.price(),
                    rate,
                    amount: item.price().apply_rate(rate),
                    cost: Money::from_cents(item.cost_cents),
                }
            })
            .collect();

        Ok(SettlementPlan {
            allocation,
            ledger_drafts,
            commissions,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(kind: ItemKind, name: &str, price_cents: i64) -> AppointmentItem {
        AppointmentItem {
            id: format!("item-{}", name),
            appointment_id: "a1".to_string(),
            kind,
            catalog_id: None,
            name: name.to_string(),
            price_cents,
            duration_minutes: None,
            custom_rate_bps: None,
            cost_cents: 0,
            created_at: Utc::now(),
        }
    }

    fn method(name: &str, kind: TenderKind, fee_bps: i64) -> PaymentMethod {
        PaymentMethod {
            id: format!("m-{}", name),
            tenant_id: "t1".to_string(),
            name: name.to_string(),
            kind,
            fee_bps,
            days_to_receive: 0,
            is_active: true,
        }
    }

    fn tender(m: PaymentMethod, cents: i64) -> Tender {
        Tender {
            method: m,
            amount: Money::from_cents(cents),
        }
    }

    /// Scenario B: service R$50 + product R$30, subscriber -> total R$30.
    #[test]
    fn test_scenario_b_subscriber_total() {
        let items = vec![
            item(ItemKind::Service, "Corte", 5000),
            item(ItemKind::Product, "Pomada", 3000),
        ];
        assert_eq!(comanda_total(&items, true).cents(), 3000);
        assert_eq!(comanda_total(&items, false).cents(), 8000);
    }

    /// Scenario C: tenders [cash R$20, pix R$10] on a R$30 total.
    #[test]
    fn test_scenario_c_multi_tender_with_pix_fee() {
        let items = vec![item(ItemKind::Service, "Corte", 3000)];
        let tenders = vec![
            tender(method("Dinheiro", TenderKind::Cash, 0), 2000),
            tender(method("Pix", TenderKind::Pix, 199), 1000),
        ];

        let plan =
            SettlementPlan::build(&items, &tenders, false, Rate::from_bps(4000)).unwrap();

        assert_eq!(plan.allocation.remaining.cents(), 0);
        assert_eq!(plan.ledger_drafts.len(), 2);

        let pix = &plan.ledger_drafts[1];
        // fee = 1000 × 1.99% = 19.9 -> 20
        assert_eq!(pix.fee.cents(), 20);
        let cash = &plan.ledger_drafts[0];
        assert_eq!(cash.fee.cents(), 0);
    }

    #[test]
    fn test_settlement_blocked_while_underpaid() {
        let items = vec![item(ItemKind::Service, "Corte", 3000)];
        let tenders = vec![tender(method("Dinheiro", TenderKind::Cash, 0), 2000)];

        let err =
            SettlementPlan::build(&items, &tenders, false, Rate::from_bps(4000)).unwrap_err();
        match err {
            CoreError::InsufficientPayment { total, remaining } => {
                assert_eq!(total.cents(), 3000);
                assert_eq!(remaining.cents(), 1000);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overpayment_recorded_not_refunded() {
        let items = vec![item(ItemKind::Service, "Corte", 3000)];
        let tenders = vec![tender(method("Dinheiro", TenderKind::Cash, 0), 5000)];

        let plan =
            SettlementPlan::build(&items, &tenders, false, Rate::from_bps(4000)).unwrap();
        assert!(plan.allocation.is_settled());
        assert_eq!(plan.allocation.paid.cents(), 5000);
        assert_eq!(plan.allocation.remaining.cents(), 0);
        // The full tendered amount lands in the drawer
        assert_eq!(plan.ledger_drafts[0].amount.cents(), 5000);
    }

    #[test]
    fn test_commission_rate_resolution() {
        let default_rate = Rate::from_bps(4000);

        // Service with no override: professional default
        let mut service = item(ItemKind::Service, "Corte", 5000);
        let plan = SettlementPlan::build(
            &[service.clone()],
            &[tender(method("Dinheiro", TenderKind::Cash, 0), 5000)],
            false,
            default_rate,
        )
        .unwrap();
        assert_eq!(plan.commissions[0].rate, default_rate);
        assert_eq!(plan.commissions[0].amount.cents(), 2000);

        // Custom override wins
        service.custom_rate_bps = Some(2500);
        let plan = SettlementPlan::build(
            &[service],
            &[tender(method("Dinheiro", TenderKind::Cash, 0), 5000)],
            false,
            default_rate,
        )
        .unwrap();
        assert_eq!(plan.commissions[0].rate, Rate::from_bps(2500));
        assert_eq!(plan.commissions[0].amount.cents(), 1250);
    }

    #[test]
    fn test_product_commission_kind_and_cost() {
        let mut product = item(ItemKind::Product, "Pomada", 3000);
        product.custom_rate_bps = Some(1000);
        product.cost_cents = 1200;

        let plan = SettlementPlan::build(
            &[product],
            &[tender(method("Débito", TenderKind::Debit, 150), 3000)],
            false,
            Rate::from_bps(4000),
        )
        .unwrap();

        let c = &plan.commissions[0];
        assert_eq!(c.kind, CommissionKind::ProductSale);
        assert_eq!(c.rate, Rate::from_bps(1000));
        assert_eq!(c.amount.cents(), 300);
        assert_eq!(c.cost.cents(), 1200);
    }

    #[test]
    fn test_discount_tender_categorized() {
        let items = vec![item(ItemKind::Service, "Corte", 3000)];
        let tenders = vec![
            tender(method("Dinheiro", TenderKind::Cash, 0), 2000),
            tender(method("Cortesia", TenderKind::Discount, 0), 1000),
        ];

        let plan =
            SettlementPlan::build(&items, &tenders, false, Rate::from_bps(4000)).unwrap();
        assert!(plan.ledger_drafts[1].description.starts_with("Desconto"));
        assert!(plan.ledger_drafts[0].description.starts_with("Venda"));
    }

    #[test]
    fn test_empty_comanda_rejected() {
        let err = SettlementPlan::build(&[], &[], false, Rate::zero()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyComanda));
    }

    /// One commission snapshot per line item, one ledger draft per tender.
    #[test]
    fn test_plan_cardinality() {
        let items = vec![
            item(ItemKind::Service, "Corte", 5000),
            item(ItemKind::Service, "Barba", 2500),
            item(ItemKind::Product, "Pomada", 3000),
        ];
        let tenders = vec![
            tender(method("Pix", TenderKind::Pix, 199), 10000),
            tender(method("Dinheiro", TenderKind::Cash, 0), 500),
        ];
        let plan =
            SettlementPlan::build(&items, &tenders, false, Rate::from_bps(4000)).unwrap();
        assert_eq!(plan.commissions.len(), 3);
        assert_eq!(plan.ledger_drafts.len(), 2);
    }
}
