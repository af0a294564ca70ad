//! # Cash Drawer Summaries
//!
//! Derived aggregates over a session's ledger entries. Nothing here is
//! stored; the summary is recomputed from the opening balance plus the
//! entries accrued since opening.
//!
//! ## Two Balances
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cash in hand    = opening balance + net of CASH-kind entries only     │
//! │                    (what should physically be in the drawer)           │
//! │                                                                         │
//! │  current balance = opening balance + total IN − total OUT              │
//! │                    (across all methods)                                 │
//! │                                                                         │
//! │  Discount entries are price reductions, not received tenders:          │
//! │  they never count toward cash in hand.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{EntryDirection, LedgerEntry, TenderKind};

// =============================================================================
// Summary
// =============================================================================

/// Net movement for one payment method within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTotal {
    pub method_name: String,
    pub method_kind: TenderKind,
    pub total_in: Money,
    pub total_out: Money,
}

impl MethodTotal {
    pub fn net(&self) -> Money {
        self.total_in - self.total_out
    }
}

/// The derived state of an open (or just-closed) cash session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashSummary {
    pub opening_balance: Money,
    pub total_in: Money,
    pub total_out: Money,
    pub by_method: Vec<MethodTotal>,
    /// Opening balance plus net cash-kind movements.
    pub cash_in_hand: Money,
    /// Opening balance plus total in minus total out, all methods.
    pub current_balance: Money,
}

/// Aggregates a session's entries into a summary.
pub fn summarize(opening_balance: Money, entries: &[LedgerEntry]) -> CashSummary {
    let mut total_in = Money::zero();
    let mut total_out = Money::zero();
    let mut cash_net = Money::zero();
    let mut methods: BTreeMap<String, MethodTotal> = BTreeMap::new();

    for entry in entries {
        let amount = entry.amount();
        let bucket = methods
            .entry(entry.method_name.clone())
            .or_insert_with(|| MethodTotal {
                method_name: entry.method_name.clone(),
                method_kind: entry.method_kind,
                total_in: Money::zero(),
                total_out: Money::zero(),
            });

        match entry.direction {
            EntryDirection::In => {
                total_in += amount;
                bucket.total_in += amount;
            }
            EntryDirection::Out => {
                total_out += amount;
                bucket.total_out += amount;
            }
        }

        if entry.method_kind.is_cash() {
            cash_net += entry.signed();
        }
    }

    CashSummary {
        opening_balance,
        total_in,
        total_out,
        by_method: methods.into_values().collect(),
        cash_in_hand: opening_balance + cash_net,
        current_balance: opening_balance + total_in - total_out,
    }
}

/// The close-time reconciliation: physical count minus expected cash.
///
/// Informational only; a discrepancy never blocks closing and is never
/// auto-corrected into the ledger.
pub fn close_difference(physical_count: Money, expected_cash_in_hand: Money) -> Money {
    physical_count - expected_cash_in_hand
}

// =============================================================================
// Unit Tests
// =============================================================================
