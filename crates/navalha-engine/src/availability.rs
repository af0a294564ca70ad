//! # Availability Grids
//!
//! The agenda's day view and the public booking slot list.
//!
//! ## Grid Assembly
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  operating hours ──► shop window for the date                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  slot_starts(date, window, cutoff, granularity)   (shared spine)       │
//! │       │                                                                 │
//! │       ▼  per active professional                                        │
//! │  WorkSchedule::covers  ──► drop slots outside the personal window      │
//! │  has_conflict          ──► drop slots overlapping existing rows        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DayGrid { slots, columns[professional → available starts] }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The public list additionally filters by service-category eligibility and
//! the strictly-future rule for same-day slots.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use navalha_core::conflict::{
    eligible_professionals, has_conflict, publicly_bookable, Interval,
};
use navalha_core::slots::{slot_starts, ClosedDayPolicy, SlotGranularity};

use crate::error::{EngineError, EngineResult};
use crate::Engine;

/// One professional's availability for a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalColumn {
    pub professional_id: String,
    pub display_name: String,
    /// Slot starts the professional can still take.
    pub available: Vec<NaiveDateTime>,
}

/// The agenda's day view: the shared slot spine plus one column per
/// active professional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayGrid {
    pub date: NaiveDate,
    pub granularity: SlotGranularity,
    pub slots: Vec<NaiveDateTime>,
    pub columns: Vec<ProfessionalColumn>,
}

impl Engine {
    /// Builds the day grid for every active professional.
    ///
    /// A slot appears in a column when it falls inside the professional's
    /// personal window and a `granularity`-long interval starting there
    /// overlaps none of their existing appointments or blocks.
    pub async fn day_grid(
        &self,
        date: NaiveDate,
        granularity: SlotGranularity,
        closed_day_policy: ClosedDayPolicy,
    ) -> EngineResult<DayGrid> {
        let hours = self.db.operating_hours().get_week(&self.tenant_id).await?;
        let day = hours.for_date(date);
        let slots = slot_starts(date, day, day.closes_at, granularity, closed_day_policy);

        let professionals = self.db.professionals().list_active(&self.tenant_id).await?;
        let mut columns = Vec::with_capacity(professionals.len());

        for professional in &professionals {
            let busy: Vec<Interval> = self
                .db
                .appointments()
                .list_for_professional_day(&self.tenant_id, &professional.id, date)
                .await?
                .iter()
                .map(|a| a.interval())
                .collect();

            let schedule = professional.work_schedule();
            let available = slots
                .iter()
                .copied()
                .filter(|slot| schedule.covers(slot.time()))
                .filter(|slot| {
                    !has_conflict(Interval::new(*slot, granularity.minutes()), &busy)
                })
                .collect();

            columns.push(ProfessionalColumn {
                professional_id: professional.id.clone(),
                display_name: professional.display_name.clone(),
                available,
            });
        }

        Ok(DayGrid {
            date,
            granularity,
            slots,
            columns,
        })
    }

    /// Slots offered to an unauthenticated booker for a set of services.
    ///
    /// A slot is offered when at least one active professional covering all
    /// requested service categories can fit the combined duration there.
    /// Same-day slots must start strictly after `now`; closed days yield
    /// nothing.
    pub async fn public_slots(
        &self,
        date: NaiveDate,
        service_ids: &[String],
        granularity: SlotGranularity,
        now: NaiveDateTime,
    ) -> EngineResult<Vec<NaiveDateTime>> {
        let mut categories = Vec::with_capacity(service_ids.len());
        let mut duration_minutes = 0i64;
        for service_id in service_ids {
            let service = self
                .db
                .catalog()
                .get_service(service_id)
                .await?
                .ok_or_else(|| EngineError::not_found("Service", service_id))?;
            categories.push(service.category.clone());
            duration_minutes += service.duration_minutes;
        }

        let hours = self.db.operating_hours().get_week(&self.tenant_id).await?;
        let day = hours.for_date(date);
        let slots = slot_starts(date, day, day.closes_at, granularity, ClosedDayPolicy::Empty);

        let pool = self.db.professionals().list_active(&self.tenant_id).await?;
        let eligible = eligible_professionals(&pool, &categories);

        let mut busy = Vec::with_capacity(eligible.len());
        for professional in &eligible {
            let intervals: Vec<Interval> = self
                .db
                .appointments()
                .list_for_professional_day(&self.tenant_id, &professional.id, date)
                .await?
                .iter()
                .map(|a| a.interval())
                .collect();
            busy.push((*professional, intervals));
        }

        let offered = slots
            .into_iter()
            .filter(|slot| publicly_bookable(*slot, now))
            .filter(|slot| {
                let candidate = Interval::new(*slot, duration_minutes);
                busy.iter().any(|(professional, intervals)| {
                    professional.work_schedule().covers(slot.time())
                        && !has_conflict(candidate, intervals)
                })
            })
            .collect();

        Ok(offered)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingRequest;
    use crate::testutil::{at, t, test_date, test_engine, ANA, RAFAEL};
    use chrono::Duration;

    fn column<'a>(grid: &'a DayGrid, id: &str) -> &'a ProfessionalColumn {
        grid.columns
            .iter()
            .find(|c| c.professional_id == id)
            .unwrap()
    }

    /// Scenario A: 30-minute grid, shop 09:00-20:00. Rafael's column skips
    /// his 12:00-13:00 lunch; Ana's is bounded by her 10:00-18:00 window.
    #[tokio::test]
    async fn test_day_grid_personal_windows() {
        let engine = test_engine().await;
        let grid = engine
            .day_grid(test_date(), SlotGranularity::Thirty, ClosedDayPolicy::Empty)
            .await
            .unwrap();

        assert_eq!(grid.slots.first().unwrap().time(), t(9, 0));
        assert_eq!(grid.slots.last().unwrap().time(), t(19, 30));

        let rafael = column(&grid, RAFAEL);
        assert!(!rafael.available.contains(&at(12, 0)));
        assert!(!rafael.available.contains(&at(12, 30)));
        assert!(rafael.available.contains(&at(11, 30)));
        assert!(rafael.available.contains(&at(13, 0)));
        assert_eq!(*rafael.available.first().unwrap(), at(9, 0));
        assert_eq!(*rafael.available.last().unwrap(), at(19, 30));

        let ana = column(&grid, ANA);
        assert_eq!(*ana.available.first().unwrap(), at(10, 0));
        assert_eq!(*ana.available.last().unwrap(), at(17, 30));
    }

    #[tokio::test]
    async fn test_day_grid_reflects_bookings() {
        let engine = test_engine().await;
        engine
            .book(BookingRequest {
                professional_id: RAFAEL.to_string(),
                client_name: "Maria Souza".to_string(),
                client_phone: "11987654321".to_string(),
                service_ids: vec!["svc-corte".to_string()],
                starts_at: at(10, 0),
                notes: None,
            })
            .await
            .unwrap();

        let grid = engine
            .day_grid(test_date(), SlotGranularity::Thirty, ClosedDayPolicy::Empty)
            .await
            .unwrap();

        let rafael = column(&grid, RAFAEL);
        assert!(!rafael.available.contains(&at(10, 0)));
        assert!(rafael.available.contains(&at(10, 30)));
        // The other column is unaffected
        assert!(column(&grid, ANA).available.contains(&at(10, 0)));
    }

    #[tokio::test]
    async fn test_closed_day_policies() {
        let engine = test_engine().await;
        let sunday = test_date() - Duration::days(1);

        let empty = engine
            .day_grid(sunday, SlotGranularity::Thirty, ClosedDayPolicy::Empty)
            .await
            .unwrap();
        assert!(empty.slots.is_empty());

        let fallback = engine
            .day_grid(sunday, SlotGranularity::Thirty, ClosedDayPolicy::FallbackWindow)
            .await
            .unwrap();
        assert_eq!(fallback.slots.first().unwrap().time(), t(8, 0));
    }

    #[tokio::test]
    async fn test_public_slots_eligibility_and_duration() {
        let engine = test_engine().await;
        // Barba: only Rafael (unrestricted) qualifies; Ana declares corte only
        engine
            .book(BookingRequest {
                professional_id: RAFAEL.to_string(),
                client_name: "Maria Souza".to_string(),
                client_phone: "11987654321".to_string(),
                service_ids: vec!["svc-corte".to_string()],
                starts_at: at(10, 0),
                notes: None,
            })
            .await
            .unwrap();

        let offered = engine
            .public_slots(
                test_date(),
                &["svc-barba".to_string()],
                SlotGranularity::Thirty,
                at(0, 1),
            )
            .await
            .unwrap();

        // Rafael busy 10:00-10:30, lunch 12:00-13:00
        assert!(!offered.contains(&at(10, 0)));
        assert!(offered.contains(&at(10, 30)));
        assert!(!offered.contains(&at(12, 0)));
        assert!(offered.contains(&at(9, 0)));
    }

    #[tokio::test]
    async fn test_public_slots_same_day_strictly_future() {
        let engine = test_engine().await;

        let offered = engine
            .public_slots(
                test_date(),
                &["svc-corte".to_string()],
                SlotGranularity::Thirty,
                at(15, 0),
            )
            .await
            .unwrap();

        assert!(!offered.contains(&at(15, 0)));
        assert!(!offered.contains(&at(14, 30)));
        assert!(offered.contains(&at(15, 30)));
    }

    #[tokio::test]
    async fn test_public_slots_closed_day_empty() {
        let engine = test_engine().await;
        let sunday = test_date() - Duration::days(1);

        let offered = engine
            .public_slots(
                sunday,
                &["svc-corte".to_string()],
                SlotGranularity::Thirty,
                at(0, 1),
            )
            .await
            .unwrap();
        assert!(offered.is_empty());
    }
}
