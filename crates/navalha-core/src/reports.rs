//! # Commission & Goal Reports
//!
//! Read-side calculations over commission transactions. This module never
//! mutates anything: it turns a period's frozen snapshots into revenue,
//! profit, ticket and goal-progress figures.
//!
//! Every division guards its denominator: zero distinct attendances yields
//! a zero average, zero elapsed days substitutes one day.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CommissionKind, CommissionTransaction, Goal};

// =============================================================================
// Revenue & Profit
// =============================================================================

/// Gross revenue: Σ price over service and product-sale records.
///
/// Bonus and employee-purchase records compensate professionals without
/// representing client revenue, so they are excluded.
pub fn shop_revenue(transactions: &[CommissionTransaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_revenue())
        .map(|t| t.price())
        .sum()
}

/// Net profit: Σ (price − commission − cost) over revenue records.
///
/// Cost is the frozen product-cost snapshot; services carry zero cost.
pub fn net_profit(transactions: &[CommissionTransaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_revenue())
        .map(|t| t.price() - t.amount() - Money::from_cents(t.cost_cents))
        .sum()
}

// =============================================================================
// Attendance Metrics
// =============================================================================

/// Distinct attendances: transactions grouped by appointment id. Records
/// without an appointment link (manual bonuses) don't count as visits.
fn distinct_attendances(transactions: &[CommissionTransaction]) -> BTreeSet<&str> {
    transactions
        .iter()
        .filter_map(|t| t.appointment_id.as_deref())
        .collect()
}

/// Average revenue per attendance for the given (already filtered) set.
///
/// Zero attendances yields zero rather than dividing.
pub fn ticket_average(transactions: &[CommissionTransaction]) -> Money {
    let attendances = distinct_attendances(transactions).len() as i64;
    if attendances == 0 {
        return Money::zero();
    }
    Money::from_cents(shop_revenue(transactions).cents() / attendances)
}

/// Share of attendances that included at least one product sale, 0.0-1.0.
pub fn product_attach_rate(transactions: &[CommissionTransaction]) -> f64 {
    let total = distinct_attendances(transactions);
    if total.is_empty() {
        return 0.0;
    }
    let with_product: BTreeSet<&str> = transactions
        .iter()
        .filter(|t| t.kind == CommissionKind::ProductSale)
        .filter_map(|t| t.appointment_id.as_deref())
        .collect();
    with_product.len() as f64 / total.len() as f64
}

// =============================================================================
// Goal Progress
// =============================================================================

/// Progress against a monthly goal as of a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub target: i64,
    pub accumulated: i64,
    /// `max(0, target − accumulated) ÷ days remaining in the period`.
    pub daily_target_remaining: i64,
    /// `(accumulated × days in period) ÷ days elapsed`.
    pub projection: i64,
}

/// Computes progress for a goal given the accumulated value so far.
///
/// `today` is an explicit parameter; days elapsed includes today, days
/// remaining counts today onward. A `today` outside the goal's month is
/// clamped to the period edges.
pub fn goal_progress(goal: &Goal, accumulated: i64, today: NaiveDate) -> GoalProgress {
    let days_in_period = match goal.period_start() {
        Some(start) => days_in_month(start),
        None => 30,
    };

    let day = if goal
        .period_start()
        .map(|s| (s.year(), s.month()) == (today.year(), today.month()))
        .unwrap_or(false)
    {
        i64::from(today.day()).min(days_in_period)
    } else {
        // Outside the period: treat as day one so nothing divides by zero
        1
    };

    let days_elapsed = day.max(1);
    let days_remaining = (days_in_period - day + 1).max(1);

    let remaining = (goal.target_value - accumulated).max(0);
    GoalProgress {
        target: goal.target_value,
        accumulated,
        daily_target_remaining: remaining / days_remaining,
        // i128 product first, one truncating division last
        projection: (accumulated as i128 * days_in_period as i128 / days_elapsed as i128) as i64,
    }
}

fn days_in_month(first: NaiveDate) -> i64 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    match next {
        Some(n) => (n - first).num_days(),
        None => 30,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
