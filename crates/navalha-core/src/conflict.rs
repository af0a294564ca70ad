//! # Conflict Detection
//!
//! Decides whether a candidate booking interval is available.
//!
//! ## Decision Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Half-open overlap                                                      │
//! │                                                                         │
//! │  existing:   [10:00 ──────── 10:30)                                    │
//! │  candidate:        [10:15 ──────── 10:45)   ──► CONFLICT               │
//! │  candidate:              [10:30 ── 11:00)   ──► OK (touching is fine)  │
//! │                                                                         │
//! │  conflict ⇔ existing.start < candidate.end                             │
//! │           ∧ candidate.start < existing.end                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! For "any available professional" the pool is pre-filtered by specialty
//! eligibility (fail-open: no declared specialties matches everything) and
//! a slot is unavailable only when *every* eligible professional conflicts.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::Professional;

// =============================================================================
// Intervals
// =============================================================================

/// A half-open time interval `[starts_at, starts_at + duration)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub starts_at: NaiveDateTime,
    pub duration_minutes: i64,
}

impl Interval {
    pub fn new(starts_at: NaiveDateTime, duration_minutes: i64) -> Self {
        Interval {
            starts_at,
            duration_minutes,
        }
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at + Duration::minutes(self.duration_minutes)
    }

    /// Half-open overlap test.
    pub fn overlaps(&self, other: &Interval) -> bool {
        other.starts_at < self.ends_at() && self.starts_at < other.ends_at()
    }
}

/// Whether the candidate interval collides with any existing interval.
///
/// `existing` is the professional's non-canceled appointments for the day;
/// canceled appointments never reach this function because cancellation
/// deletes the row.
pub fn has_conflict(candidate: Interval, existing: &[Interval]) -> bool {
    existing.iter().any(|e| e.overlaps(&candidate))
}

// =============================================================================
// Eligibility
// =============================================================================

/// Professionals eligible to perform every one of the selected service
/// categories.
///
/// Fail-open policy: a professional whose specialties are `Unrestricted`
/// (nothing declared) is eligible for everything.
pub fn eligible_professionals<'a>(
    pool: &'a [Professional],
    categories: &[String],
) -> Vec<&'a Professional> {
    pool.iter()
        .filter(|p| {
            let specialties = p.specialties();
            categories.iter().all(|c| specialties.handles(c))
        })
        .collect()
}

/// Availability of a slot when the client picked "any professional".
///
/// `busy` pairs each eligible professional with their existing intervals.
/// The slot is unavailable only if every professional in the pool has a
/// conflicting appointment; an empty pool means no one can take it.
pub fn any_professional_available(candidate: Interval, busy: &[(&Professional, Vec<Interval>)]) -> bool {
    busy.iter()
        .any(|(_, intervals)| !has_conflict(candidate, intervals))
}

// =============================================================================
// Public Booking Rule
// =============================================================================

/// Whether a slot may still be offered to an unauthenticated booker.
///
/// When the booking date is today, the slot start must be strictly in the
/// future; past dates are never offered. `now` is an explicit parameter so
/// the rule stays pure.
pub fn publicly_bookable(slot_start: NaiveDateTime, now: NaiveDateTime) -> bool {
    if slot_start.date() < now.date() {
        return false;
    }
    if slot_start.date() == now.date() {
        return slot_start > now;
    }
    true
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProfessionalStatus;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 28)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn pro(id: &str, specialties: Option<&str>) -> Professional {
        Professional {
            id: id.to_string(),
            tenant_id: "t1".to_string(),
            display_name: format!("Pro {}", id),
            role_label: "Barbeiro".to_string(),
            commission_rate_bps: 4000,
            specialties_json: specialties.map(|s| s.to_string()),
            work_starts_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            work_ends_at: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            lunch_starts_at: None,
            lunch_ends_at: None,
            status: ProfessionalStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Scenario D: 10:00-10:30 booked, 10:15-10:45 attempted -> rejected.
    #[test]
    fn test_scenario_d_overlapping_rejected() {
        let existing = vec![Interval::new(at(10, 0), 30)];
        let candidate = Interval::new(at(10, 15), 30);
        assert!(has_conflict(candidate, &existing));
    }

    #[test]
    fn test_touching_intervals_do_not_conflict() {
        let existing = vec![Interval::new(at(10, 0), 30)];
        assert!(!has_conflict(Interval::new(at(10, 30), 30), &existing));
        assert!(!has_conflict(Interval::new(at(9, 30), 30), &existing));
    }

    #[test]
    fn test_containment_conflicts() {
        let existing = vec![Interval::new(at(10, 0), 60)];
        // Fully inside
        assert!(has_conflict(Interval::new(at(10, 15), 15), &existing));
        // Fully covering
        assert!(has_conflict(Interval::new(at(9, 30), 120), &existing));
    }

    #[test]
    fn test_eligibility_fail_open() {
        let pros = vec![
            pro("a", Some(r#"["corte"]"#)),
            pro("b", Some(r#"["manicure"]"#)),
            pro("c", None), // nothing declared: eligible for everything
        ];
        let eligible = eligible_professionals(&pros, &["corte".to_string()]);
        let ids: Vec<&str> = eligible.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        // Multiple categories: must handle all of them
        let eligible = eligible_professionals(
            &pros,
            &["corte".to_string(), "manicure".to_string()],
        );
        let ids: Vec<&str> = eligible.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn test_any_professional_unavailable_only_when_all_busy() {
        let a = pro("a", None);
        let b = pro("b", None);
        let candidate = Interval::new(at(10, 0), 30);

        // One of two free: available
        let busy = vec![
            (&a, vec![Interval::new(at(10, 0), 30)]),
            (&b, vec![]),
        ];
        assert!(any_professional_available(candidate, &busy));

        // Both busy: unavailable
        let busy = vec![
            (&a, vec![Interval::new(at(10, 0), 30)]),
            (&b, vec![Interval::new(at(9, 45), 30)]),
        ];
        assert!(!any_professional_available(candidate, &busy));

        // Empty pool: unavailable
        assert!(!any_professional_available(candidate, &[]));
    }

    #[test]
    fn test_publicly_bookable_today_requires_strict_future() {
        let now = at(10, 0);
        assert!(!publicly_bookable(at(10, 0), now));
        assert!(!publicly_bookable(at(9, 30), now));
        assert!(publicly_bookable(at(10, 30), now));

        // Other dates: tomorrow always offered, yesterday never
        let tomorrow = NaiveDate::from_ymd_opt(2026, 8, 29)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert!(publicly_bookable(tomorrow, now));
        let yesterday = NaiveDate::from_ymd_opt(2026, 8, 27)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        assert!(!publicly_bookable(yesterday, now));
    }
}
