//! # Slot Generation
//!
//! Computes bookable slot start-times for a date.
//!
//! ## How Slots Are Built
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Slot Generation                                  │
//! │                                                                         │
//! │  OperatingHours[weekday] ──► effective open/close window               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  slot_starts(date, day, cutoff, granularity)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  09:00  09:30  10:00  ...  19:30      (every `granularity` minutes,    │
//! │                                        last start ≤ cutoff)            │
//! │       │                                                                 │
//! │       ▼  per professional                                               │
//! │  WorkSchedule::covers(slot) ──► drop slots outside [start, end)        │
//! │                                 and inside the lunch window            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure functions: no clock reads, no I/O. Identical input yields identical
//! output.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

// =============================================================================
// Granularity
// =============================================================================

/// Spacing between consecutive slot starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotGranularity {
    Five,
    Ten,
    Thirty,
    Sixty,
}

impl SlotGranularity {
    #[inline]
    pub const fn minutes(&self) -> i64 {
        match self {
            SlotGranularity::Five => 5,
            SlotGranularity::Ten => 10,
            SlotGranularity::Thirty => 30,
            SlotGranularity::Sixty => 60,
        }
    }
}

impl Default for SlotGranularity {
    fn default() -> Self {
        SlotGranularity::Thirty
    }
}

// =============================================================================
// Operating Hours
// =============================================================================

/// Shop-wide opening window for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub open: bool,
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
}

impl DaySchedule {
    /// A closed day. The times carry the fallback window so multi-
    /// professional views can still render a grid (see `ClosedDayPolicy`).
    pub fn closed() -> Self {
        DaySchedule {
            open: false,
            opens_at: FALLBACK_OPENS_AT,
            closes_at: FALLBACK_CLOSES_AT,
        }
    }
}

/// Shop operating hours, one entry per weekday (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    days: [DaySchedule; 7],
}

impl OperatingHours {
    pub fn new(days: [DaySchedule; 7]) -> Self {
        OperatingHours { days }
    }

    /// The schedule governing a given date (by weekday number from Sunday).
    pub fn for_date(&self, date: NaiveDate) -> DaySchedule {
        use chrono::Datelike;
        self.days[date.weekday().num_days_from_sunday() as usize]
    }
}

/// Fallback open time used when rendering a closed weekday anyway.
pub const FALLBACK_OPENS_AT: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(t) => t,
    None => panic!("valid fallback open time"),
};

/// Fallback close time for closed weekdays.
pub const FALLBACK_CLOSES_AT: NaiveTime = match NaiveTime::from_hms_opt(20, 0, 0) {
    Some(t) => t,
    None => panic!("valid fallback close time"),
};

// =============================================================================
// Closed-Day Policy
// =============================================================================

/// What the generator yields for a weekday the shop is marked closed.
///
/// The multi-professional calendar historically rendered a default window on
/// closed days instead of an empty grid. That behavior is kept, but only as
/// an explicit opt-in; single-professional and public views get no slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosedDayPolicy {
    /// Closed day yields no slots.
    Empty,
    /// Closed day yields slots anchored to the 08:00-20:00 fallback window.
    FallbackWindow,
}

impl Default for ClosedDayPolicy {
    fn default() -> Self {
        ClosedDayPolicy::Empty
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Generates the ordered slot start-times for one date.
///
/// Starts at the day's effective open time and steps by `granularity`,
/// including every start up to and including `cutoff`. The window end
/// (`closes_at` or the fallback close) is exclusive: a slot starting at
/// closing time is never offered.
///
/// ```rust
/// use chrono::{NaiveDate, NaiveTime};
/// use navalha_core::slots::{slot_starts, ClosedDayPolicy, DaySchedule, SlotGranularity};
///
/// let day = DaySchedule {
///     open: true,
///     opens_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     closes_at: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
/// };
/// let date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
/// let slots = slot_starts(
///     date,
///     day,
///     NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
///     SlotGranularity::Thirty,
///     ClosedDayPolicy::Empty,
/// );
/// assert_eq!(slots.first().unwrap().time(), day.opens_at);
/// assert_eq!(slots.last().unwrap().time(), NaiveTime::from_hms_opt(19, 30, 0).unwrap());
/// ```
pub fn slot_starts(
    date: NaiveDate,
    day: DaySchedule,
    cutoff: NaiveTime,
    granularity: SlotGranularity,
    closed_day_policy: ClosedDayPolicy,
) -> Vec<NaiveDateTime> {
    let (opens_at, closes_at) = if day.open {
        (day.opens_at, day.closes_at)
    } else {
        match closed_day_policy {
            ClosedDayPolicy::Empty => return Vec::new(),
            ClosedDayPolicy::FallbackWindow => (FALLBACK_OPENS_AT, FALLBACK_CLOSES_AT),
        }
    };

    let step = Duration::minutes(granularity.minutes());
    let mut slots = Vec::new();
    let mut cursor = date.and_time(opens_at);
    let last = cutoff.min(closes_at);

    while cursor.time() <= last && cursor.time() < closes_at {
        slots.push(cursor);
        cursor += step;
        // A step that wraps past midnight would restart the loop at 00:00.
        if cursor.date() != date {
            break;
        }
    }

    slots
}

// =============================================================================
// Personal Work Schedule
// =============================================================================

/// A professional's lunch break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchWindow {
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
}

/// A professional's personal working window, tested slot-by-slot against
/// the shop-wide grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSchedule {
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub lunch: Option<LunchWindow>,
}

impl WorkSchedule {
    /// Whether a slot starting at `slot_start` is inside the personal
    /// window: within `[starts_at, ends_at)` and not inside
    /// `[lunch start, lunch end)`.
    pub fn covers(&self, slot_start: NaiveTime) -> bool {
        if slot_start < self.starts_at || slot_start >= self.ends_at {
            return false;
        }
        if let Some(lunch) = self.lunch {
            if slot_start >= lunch.starts_at && slot_start < lunch.ends_at {
                return false;
            }
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn open_day(opens: NaiveTime, closes: NaiveTime) -> DaySchedule {
        DaySchedule {
            open: true,
            opens_at: opens,
            closes_at: closes,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    #[test]
    fn test_first_slot_is_open_time_and_spacing_is_granularity() {
        let slots = slot_starts(
            date(),
            open_day(t(9, 0), t(20, 0)),
            t(19, 30),
            SlotGranularity::Thirty,
            ClosedDayPolicy::Empty,
        );

        assert_eq!(slots.first().unwrap().time(), t(9, 0));
        for pair in slots.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::minutes(30));
        }
    }

    #[test]
    fn test_last_slot_respects_cutoff_inclusive() {
        let slots = slot_starts(
            date(),
            open_day(t(9, 0), t(20, 0)),
            t(19, 30),
            SlotGranularity::Thirty,
            ClosedDayPolicy::Empty,
        );
        assert_eq!(slots.last().unwrap().time(), t(19, 30));

        // Cutoff between grid points: 19:45 still ends the list at 19:30
        let slots = slot_starts(
            date(),
            open_day(t(9, 0), t(20, 0)),
            t(19, 45),
            SlotGranularity::Thirty,
            ClosedDayPolicy::Empty,
        );
        assert_eq!(slots.last().unwrap().time(), t(19, 30));
    }

    #[test]
    fn test_closing_time_is_exclusive() {
        // Cutoff past closing: no slot may start at or after 20:00
        let slots = slot_starts(
            date(),
            open_day(t(9, 0), t(20, 0)),
            t(23, 0),
            SlotGranularity::Sixty,
            ClosedDayPolicy::Empty,
        );
        assert_eq!(slots.last().unwrap().time(), t(19, 0));
    }

    #[test]
    fn test_closed_day_policies() {
        let closed = DaySchedule::closed();

        let empty = slot_starts(
            date(),
            closed,
            t(19, 30),
            SlotGranularity::Thirty,
            ClosedDayPolicy::Empty,
        );
        assert!(empty.is_empty());

        let fallback = slot_starts(
            date(),
            closed,
            t(19, 30),
            SlotGranularity::Thirty,
            ClosedDayPolicy::FallbackWindow,
        );
        assert_eq!(fallback.first().unwrap().time(), FALLBACK_OPENS_AT);
    }

    #[test]
    fn test_fine_granularities() {
        let slots = slot_starts(
            date(),
            open_day(t(9, 0), t(10, 0)),
            t(9, 30),
            SlotGranularity::Five,
            ClosedDayPolicy::Empty,
        );
        assert_eq!(slots.len(), 7); // 9:00, 9:05 ... 9:30

        let slots = slot_starts(
            date(),
            open_day(t(9, 0), t(10, 0)),
            t(9, 30),
            SlotGranularity::Ten,
            ClosedDayPolicy::Empty,
        );
        assert_eq!(slots.len(), 4); // 9:00, 9:10, 9:20, 9:30
    }

    #[test]
    fn test_idempotent_generation() {
        let args = (
            date(),
            open_day(t(9, 0), t(20, 0)),
            t(19, 30),
            SlotGranularity::Thirty,
            ClosedDayPolicy::Empty,
        );
        let a = slot_starts(args.0, args.1, args.2, args.3, args.4);
        let b = slot_starts(args.0, args.1, args.2, args.3, args.4);
        assert_eq!(a, b);
    }

    /// Scenario A: personal schedule 09:00-20:00, lunch 12:00-13:00,
    /// 30 min grid, shop open 09:00-20:00. The rendered column excludes
    /// 12:00 and 12:30, has nothing before 09:00, and ends at 19:30.
    #[test]
    fn test_scenario_a_personal_schedule_filter() {
        let schedule = WorkSchedule {
            starts_at: t(9, 0),
            ends_at: t(20, 0),
            lunch: Some(LunchWindow {
                starts_at: t(12, 0),
                ends_at: t(13, 0),
            }),
        };

        let slots = slot_starts(
            date(),
            open_day(t(9, 0), t(20, 0)),
            t(19, 30),
            SlotGranularity::Thirty,
            ClosedDayPolicy::Empty,
        );
        let available: Vec<NaiveTime> = slots
            .iter()
            .filter(|s| schedule.covers(s.time()))
            .map(|s| s.time())
            .collect();

        assert!(!available.contains(&t(12, 0)));
        assert!(!available.contains(&t(12, 30)));
        assert!(available.contains(&t(11, 30)));
        assert!(available.contains(&t(13, 0)));
        assert_eq!(*available.first().unwrap(), t(9, 0));
        assert_eq!(*available.last().unwrap(), t(19, 30));
    }

    #[test]
    fn test_work_schedule_bounds_half_open() {
        let schedule = WorkSchedule {
            starts_at: t(10, 0),
            ends_at: t(18, 0),
            lunch: None,
        };
        assert!(schedule.covers(t(10, 0)));
        assert!(schedule.covers(t(17, 30)));
        assert!(!schedule.covers(t(18, 0)));
        assert!(!schedule.covers(t(9, 30)));
    }

    #[test]
    fn test_operating_hours_by_weekday() {
        let mut days = [DaySchedule::closed(); 7];
        // 2026-08-28 is a Friday (weekday 5 from Sunday)
        days[5] = open_day(t(9, 0), t(20, 0));
        let hours = OperatingHours::new(days);

        assert!(hours.for_date(date()).open);
        let sunday = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert!(!hours.for_date(sunday).open);
    }
}
