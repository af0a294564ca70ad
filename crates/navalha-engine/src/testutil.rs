//! Shared fixtures for engine tests: an in-memory engine seeded with one
//! shop's worth of professionals, catalog entries and payment methods.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

use navalha_core::{
    PaymentMethod, Professional, ProfessionalStatus, ProductOffering, ServiceOffering, TenderKind,
};
use navalha_db::{Database, DbConfig};

use crate::Engine;

/// Seed professional ids. The booking entrypoints validate professional
/// ids as UUIDs, so the fixtures carry real ones.
pub(crate) const RAFAEL: &str = "7f1c9a2e-4b3d-4e5f-8a61-0d2c4b6e8f10";
pub(crate) const ANA: &str = "2b8d6f40-9c1e-4a7b-b352-e94a0c7d5e21";

/// All tests book on the same Monday.
pub(crate) fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 7).unwrap()
}

/// A time on the test day.
pub(crate) fn at(hour: u32, min: u32) -> NaiveDateTime {
    test_date().and_time(NaiveTime::from_hms_opt(hour, min, 0).unwrap())
}

pub(crate) fn t(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

/// In-memory engine with the standard seed:
///
/// - professional `RAFAEL` (40%, works 09:00-20:00, lunch 12:00-13:00)
/// - professional `ANA` (50%, specialties ["corte"], works 10:00-18:00)
/// - service `svc-corte` (Corte, R$50, 30 min, category "corte")
/// - service `svc-barba` (Barba, R$25, 15 min, category "barba", 25% override)
/// - product `prod-pomada` (Pomada, R$30, cost R$12, 10% rate)
/// - methods `pm-cash`, `pm-pix` (1.99%), `pm-debit` (1.5%), `pm-discount`
/// - shop open 09:00-20:00 every day except Sunday
pub(crate) async fn test_engine() -> Engine {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let engine = Engine::with_tenant(db, "t1");
    seed(&engine).await;
    engine
}

async fn seed(engine: &Engine) {
    let db = engine.db();
    let now = Utc::now();

    db.professionals()
        .insert(&Professional {
            id: RAFAEL.to_string(),
            tenant_id: "t1".to_string(),
            display_name: "Rafael".to_string(),
            role_label: "Barbeiro".to_string(),
            commission_rate_bps: 4000,
            specialties_json: None,
            work_starts_at: t(9, 0),
            work_ends_at: t(20, 0),
            lunch_starts_at: Some(t(12, 0)),
            lunch_ends_at: Some(t(13, 0)),
            status: ProfessionalStatus::Active,
            created_at: now,
        })
        .await
        .unwrap();

    db.professionals()
        .insert(&Professional {
            id: ANA.to_string(),
            tenant_id: "t1".to_string(),
            display_name: "Ana".to_string(),
            role_label: "Cabeleireira".to_string(),
            commission_rate_bps: 5000,
            specialties_json: Some(r#"["corte"]"#.to_string()),
            work_starts_at: t(10, 0),
            work_ends_at: t(18, 0),
            lunch_starts_at: None,
            lunch_ends_at: None,
            status: ProfessionalStatus::Active,
            created_at: now,
        })
        .await
        .unwrap();

    db.catalog()
        .insert_service(&ServiceOffering {
            id: "svc-corte".to_string(),
            tenant_id: "t1".to_string(),
            name: "Corte".to_string(),
            price_cents: 5000,
            duration_minutes: 30,
            category: "corte".to_string(),
            custom_rate_bps: None,
            is_active: true,
        })
        .await
        .unwrap();

    db.catalog()
        .insert_service(&ServiceOffering {
            id: "svc-barba".to_string(),
            tenant_id: "t1".to_string(),
            name: "Barba".to_string(),
            price_cents: 2500,
            duration_minutes: 15,
            category: "barba".to_string(),
            custom_rate_bps: Some(2500),
            is_active: true,
        })
        .await
        .unwrap();

    db.catalog()
        .insert_product(&ProductOffering {
            id: "prod-pomada".to_string(),
            tenant_id: "t1".to_string(),
            name: "Pomada".to_string(),
            price_cents: 3000,
            cost_cents: 1200,
            commission_rate_bps: 1000,
            is_active: true,
        })
        .await
        .unwrap();

    for (id, name, kind, fee_bps) in [
        ("pm-cash", "Dinheiro", TenderKind::Cash, 0),
        ("pm-pix", "Pix", TenderKind::Pix, 199),
        ("pm-debit", "Débito", TenderKind::Debit, 150),
        ("pm-discount", "Cortesia", TenderKind::Discount, 0),
    ] {
        db.payment_methods()
            .insert(&PaymentMethod {
                id: id.to_string(),
                tenant_id: "t1".to_string(),
                name: name.to_string(),
                kind,
                fee_bps,
                days_to_receive: 0,
                is_active: true,
            })
            .await
            .unwrap();
    }

    // Open every day except Sunday
    for weekday in 1u8..=6 {
        db.operating_hours()
            .set_day("t1", weekday, Some((t(9, 0), t(20, 0))))
            .await
            .unwrap();
    }
    db.operating_hours().set_day("t1", 0, None).await.unwrap();
}
