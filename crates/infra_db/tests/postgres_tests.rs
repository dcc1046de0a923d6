//! PostgreSQL adapter tests
//!
//! Each test starts its own container, so these need a Docker daemon.

use std::sync::Arc;

use core_kernel::{Cents, HealthCheckable, Pound, ReimbursementId};
use domain_reimbursement::{ReimbursementPort, ReimbursementService, ReimbursementStatus};
use domain_tariff::{
    FullUnpackQuery, ItemRateQuery, LinehaulQuery, RateLookup, TariffPort,
};
use infra_db::repositories::{
    ItemRateRow, LinehaulRateRow, ServiceAreaRow, Zip3Row, FullUnpackRateRow,
};
use infra_db::{DatabaseError, PostgresReimbursementAdapter, PostgresTariffAdapter};
use test_utils::{
    create_isolated_test_database, IdFixtures, LinehaulRateBuilder, ReimbursementFixtures,
    ServiceAreaBuilder, TariffFixtures, TemporalFixtures,
};

mod reimbursement_adapter {
    use super::*;

    #[tokio::test]
    async fn test_save_and_reload() {
        let db = create_isolated_test_database().await.unwrap();
        let adapter = PostgresReimbursementAdapter::new(db.pool().clone());

        let requested = ReimbursementFixtures::requested();
        adapter.save_reimbursement(&requested).await.unwrap();

        let loaded = adapter.get_reimbursement(requested.id).await.unwrap();
        assert_eq!(loaded.status, ReimbursementStatus::Requested);
        assert_eq!(loaded.requested_amount, Cents(4500));
        assert_eq!(loaded.requested_date, requested.requested_date);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let db = create_isolated_test_database().await.unwrap();
        let adapter = PostgresReimbursementAdapter::new(db.pool().clone());

        let err = adapter
            .get_reimbursement(ReimbursementId::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_service_workflow_persists_each_step() {
        let db = create_isolated_test_database().await.unwrap();
        let adapter = PostgresReimbursementAdapter::new(db.pool().clone());
        let service = ReimbursementService::new(Arc::new(adapter.clone()))
            .with_clock(Arc::new(TemporalFixtures::fixed_clock()));

        let draft = ReimbursementFixtures::draft();
        adapter.save_reimbursement(&draft).await.unwrap();

        service.request(IdFixtures::reimbursement_id()).await.unwrap();
        service.approve(draft.id).await.unwrap();
        assert!(service.reject(draft.id).await.is_err());
        service.pay(draft.id).await.unwrap();

        let paid = adapter
            .repository()
            .find_by_status(infra_db::repositories::reimbursement::ReimbursementStatus::Paid)
            .await
            .unwrap();
        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].requested_date, Some(TemporalFixtures::request_instant()));
    }

    #[tokio::test]
    async fn test_health_check() {
        let db = create_isolated_test_database().await.unwrap();
        let adapter = PostgresReimbursementAdapter::new(db.pool().clone());
        assert!(adapter.health_check().await.is_healthy());
    }
}

mod tariff_adapter {
    use super::*;

    async fn seeded_adapter(db: &test_utils::TestDatabase) -> PostgresTariffAdapter {
        let adapter = PostgresTariffAdapter::new(db.pool().clone());
        let repo = adapter.repository();

        repo.insert_linehaul_rates(&[LinehaulRateRow::from(&TariffFixtures::linehaul_rate())])
            .await
            .unwrap();
        repo.insert_full_unpack_rates(&[FullUnpackRateRow::from(&TariffFixtures::full_unpack_rate())])
            .await
            .unwrap();
        repo.insert_service_areas(&[ServiceAreaRow::from(&TariffFixtures::service_area())])
            .await
            .unwrap();
        repo.insert_item_rates(&[ItemRateRow::from(&TariffFixtures::item_rate())])
            .await
            .unwrap();
        repo.insert_zip3s(&[Zip3Row::from(&TariffFixtures::zip3())])
            .await
            .unwrap();

        adapter
    }

    #[tokio::test]
    async fn test_linehaul_bands_are_half_open() {
        let db = create_isolated_test_database().await.unwrap();
        let adapter = seeded_adapter(&db).await;
        let mid_year = TemporalFixtures::mid_year();

        let rate = adapter
            .fetch_linehaul_rate(&LinehaulQuery::conus(core_kernel::Miles(500), Pound(2000), mid_year))
            .await
            .unwrap();
        assert_eq!(rate.rate_cents, Cents(20000));

        let err = adapter
            .fetch_linehaul_rate(&LinehaulQuery::conus(core_kernel::Miles(500), Pound(4000), mid_year))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = adapter
            .fetch_linehaul_rate(&LinehaulQuery::conus(
                core_kernel::Miles(500),
                Pound(2000),
                TemporalFixtures::year_end(),
            ))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unpack_rate_on_last_day() {
        let db = create_isolated_test_database().await.unwrap();
        let adapter = seeded_adapter(&db).await;

        let rate = adapter
            .fetch_full_unpack_rate(&FullUnpackQuery {
                schedule: 1,
                date: TemporalFixtures::year_end().pred_opt().unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(rate.rate_millicents.value(), 541_491);
    }

    #[tokio::test]
    async fn test_unscheduled_item_rate_matches_any_schedule() {
        let db = create_isolated_test_database().await.unwrap();
        let adapter = seeded_adapter(&db).await;

        for schedule in [None, Some(1), Some(3)] {
            let rate = adapter
                .fetch_item_rate(&ItemRateQuery {
                    code: "105B".to_string(),
                    schedule,
                    weight: Pound(1200),
                    date: TemporalFixtures::mid_year(),
                })
                .await
                .unwrap();
            assert_eq!(rate.rate_cents, Cents(4170));
        }
    }

    #[tokio::test]
    async fn test_overlap_resolves_like_the_memory_table() {
        let db = create_isolated_test_database().await.unwrap();
        let adapter = PostgresTariffAdapter::new(db.pool().clone());
        let start = TemporalFixtures::year_start();
        let end = TemporalFixtures::year_end();

        let rows = [
            ServiceAreaBuilder::new().with_id(IdFixtures::rate_id(2)).with_code(68).with_service_charge(500).build(),
            ServiceAreaBuilder::new().with_id(IdFixtures::rate_id(1)).with_code(68).with_service_charge(400).build(),
            ServiceAreaBuilder::new()
                .with_id(IdFixtures::rate_id(3))
                .with_code(68)
                .with_service_charge(300)
                .effective(start.pred_opt().unwrap(), end)
                .build(),
        ];
        let flat: Vec<ServiceAreaRow> = rows.iter().map(ServiceAreaRow::from).collect();
        assert_eq!(adapter.repository().insert_service_areas(&flat).await.unwrap(), 3);

        let lookup = RateLookup::new(Arc::new(adapter));
        let area = lookup
            .fetch_service_area(68, TemporalFixtures::mid_year())
            .await
            .unwrap();
        assert_eq!(area.service_charge_cents, Cents(400));
    }

    #[tokio::test]
    async fn test_service_area_through_zip3() {
        let db = create_isolated_test_database().await.unwrap();
        let lookup = RateLookup::new(Arc::new(seeded_adapter(&db).await));

        let area = lookup
            .fetch_service_area_for_zip3("503", TemporalFixtures::mid_year())
            .await
            .unwrap();
        assert_eq!(area.service_area, 296);
        assert!(lookup
            .fetch_service_area_for_zip3("956", TemporalFixtures::mid_year())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_bulk_insert_is_all_or_nothing() {
        let db = create_isolated_test_database().await.unwrap();
        let adapter = PostgresTariffAdapter::new(db.pool().clone());

        let good = LinehaulRateRow::from(&LinehaulRateBuilder::new().build());
        let mut inverted = LinehaulRateRow::from(&LinehaulRateBuilder::new().build());
        inverted.weight_lbs_upper = inverted.weight_lbs_lower;

        let err = adapter
            .repository()
            .insert_linehaul_rates(&[good, inverted])
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tariff400ng_linehaul_rates")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
