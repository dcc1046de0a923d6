//! Lifecycle tests for domain_reimbursement

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use core_kernel::{Cents, FixedClock, Validatable};
use domain_reimbursement::ports::mock::MockReimbursementPort;
use domain_reimbursement::{
    MethodOfReceipt, Reimbursement, ReimbursementAction, ReimbursementPort,
    ReimbursementService, ReimbursementStatus,
};
use test_utils::{
    assert_field_error, assert_transition_rejected, assert_valid, ReimbursementBuilder,
    TemporalFixtures,
};

// ============================================================================
// State machine
// ============================================================================

mod state_machine_tests {
    use super::*;

    fn draft() -> Reimbursement {
        Reimbursement::build_draft(Cents(1200), MethodOfReceipt::OtherDd)
    }

    fn in_status(status: ReimbursementStatus) -> Reimbursement {
        ReimbursementBuilder::new().in_status(status).build()
    }

    #[test]
    fn test_happy_path_ends_in_paid() {
        let mut r = draft();
        r.request().unwrap();
        r.approve().unwrap();
        r.pay().unwrap();
        assert_eq!(r.status, ReimbursementStatus::Paid);
        assert!(r.is_terminal());
        assert_valid(&r.validate());
    }

    #[test]
    fn test_non_positive_amount_fails_validation() {
        let r = ReimbursementBuilder::new().with_amount(Cents(0)).build();
        assert_field_error(&r.validate(), "RequestedAmount", "RequestedAmount must be greater than 0.");
    }

    #[test]
    fn test_pay_before_approve_fails_and_keeps_status() {
        let mut r = in_status(ReimbursementStatus::Requested);
        assert_transition_rejected(r.pay(), ReimbursementStatus::Requested);
        assert_eq!(r.status, ReimbursementStatus::Requested);
    }

    #[test]
    fn test_reject_only_from_requested() {
        for status in [
            ReimbursementStatus::Draft,
            ReimbursementStatus::Approved,
            ReimbursementStatus::Paid,
        ] {
            let mut r = in_status(status);
            assert_transition_rejected(r.reject(), status);
            assert_eq!(r.status, status);
        }

        let mut r = in_status(ReimbursementStatus::Requested);
        r.reject().unwrap();
        assert_eq!(r.status, ReimbursementStatus::Rejected);
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        for status in [ReimbursementStatus::Paid, ReimbursementStatus::Rejected] {
            let mut r = in_status(status);
            let before = r.clone();
            assert_transition_rejected(r.request(), status);
            assert_transition_rejected(r.approve(), status);
            assert_transition_rejected(r.reject(), status);
            assert_transition_rejected(r.pay(), status);
            assert_eq!(r, before);
            assert!(r.permitted_actions().is_empty());
        }
    }

    #[test]
    fn test_second_request_keeps_original_date() {
        let first = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut r = draft();
        r.request_with(&FixedClock(first)).unwrap();

        let later = FixedClock(first + Duration::days(2));
        assert_transition_rejected(r.request_with(&later), ReimbursementStatus::Requested);
        assert_eq!(r.requested_date, Some(first));
    }

    #[test]
    fn test_permitted_actions_from_requested() {
        let r = in_status(ReimbursementStatus::Requested);
        assert_eq!(
            r.permitted_actions(),
            vec![ReimbursementAction::Approve, ReimbursementAction::Reject]
        );
    }

    #[test]
    fn test_build_requested() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 4, 0, 0, 0).unwrap();
        let r = Reimbursement::build_requested(
            Cents(4500),
            MethodOfReceipt::MilPay,
            &FixedClock(instant),
        );

        assert_eq!(r.status, ReimbursementStatus::Requested);
        assert_eq!(r.requested_date, Some(instant));
        assert_valid(&r.validate());
    }

    #[test]
    fn test_concrete_scenario() {
        let method: MethodOfReceipt = "OTHER".parse().unwrap();
        let mut r = Reimbursement::build_draft(Cents(1200), method);

        r.request().unwrap();
        assert_eq!(r.status, ReimbursementStatus::Requested);
        let requested = r.requested_date.expect("requested date is stamped");
        assert!((Utc::now() - requested).num_milliseconds().abs() < 1000);

        r.approve().unwrap();
        assert_eq!(r.status, ReimbursementStatus::Approved);

        r.pay().unwrap();
        assert_eq!(r.status, ReimbursementStatus::Paid);

        assert!(r.reject().unwrap_err().is_invalid_transition());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let r = in_status(ReimbursementStatus::Requested);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "REQUESTED");
        assert_eq!(json["method_of_receipt"], "OTHER_DD");
        assert_eq!(json["requested_amount"], 1200);
    }
}

// ============================================================================
// Property tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{action_strategy, method_strategy, positive_cents_strategy, status_strategy};

    proptest! {
        #[test]
        fn status_only_changes_on_legal_actions(
            start in status_strategy(),
            actions in prop::collection::vec(action_strategy(), 0..12)
        ) {
            let mut r = ReimbursementBuilder::new().in_status(start).build();
            let clock = TemporalFixtures::fixed_clock();
            for action in actions {
                let before = r.clone();
                let expected = action.target(before.status);
                let result = r.perform(action, &clock);

                match expected {
                    Some(target) => {
                        prop_assert!(result.is_ok());
                        prop_assert_eq!(r.status, target);
                    }
                    None => {
                        prop_assert!(result.is_err());
                        prop_assert_eq!(&r, &before);
                    }
                }
            }
        }

        #[test]
        fn terminal_statuses_are_absorbing(
            terminal in prop::sample::select(vec![ReimbursementStatus::Paid, ReimbursementStatus::Rejected]),
            actions in prop::collection::vec(action_strategy(), 1..8)
        ) {
            let mut r = ReimbursementBuilder::new().in_status(terminal).build();
            for action in actions {
                prop_assert!(r.perform(action, &core_kernel::SystemClock).is_err());
            }
            prop_assert_eq!(r.status, terminal);
        }

        #[test]
        fn positive_amounts_validate(
            amount in positive_cents_strategy(),
            method in method_strategy(),
            status in status_strategy()
        ) {
            let r = ReimbursementBuilder::new()
                .with_amount(amount)
                .with_method(method)
                .in_status(status)
                .build();
            prop_assert!(r.validate().is_empty());
        }
    }
}

// ============================================================================
// Workflow service
// ============================================================================

mod service_tests {
    use super::*;

    fn service_with(port: &MockReimbursementPort) -> ReimbursementService {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 15, 14, 0, 0).unwrap());
        ReimbursementService::new(Arc::new(port.clone())).with_clock(Arc::new(clock))
    }

    #[tokio::test]
    async fn test_full_workflow() {
        let port = MockReimbursementPort::new();
        let service = service_with(&port);

        let draft = service
            .create_draft(Cents(1200), MethodOfReceipt::OtherDd)
            .await
            .unwrap();
        service.request(draft.id).await.unwrap();
        service.approve(draft.id).await.unwrap();
        let paid = service.pay(draft.id).await.unwrap();

        assert_eq!(paid.status, ReimbursementStatus::Paid);
        assert_eq!(
            paid.requested_date,
            Some(Utc.with_ymd_and_hms(2024, 5, 15, 14, 0, 0).unwrap())
        );

        let stored = port.get_reimbursement(draft.id).await.unwrap();
        assert_eq!(stored, paid);
    }

    #[tokio::test]
    async fn test_illegal_action_does_not_save() {
        let draft = Reimbursement::build_draft(Cents(800), MethodOfReceipt::Gtcc);
        let port = MockReimbursementPort::with_reimbursements(vec![draft.clone()]).await;
        let service = service_with(&port);

        assert_transition_rejected(service.pay(draft.id).await, ReimbursementStatus::Draft);

        let stored = port.get_reimbursement(draft.id).await.unwrap();
        assert_eq!(stored, draft);
    }

    #[tokio::test]
    async fn test_reject_after_request() {
        let requested = Reimbursement::build_requested(
            Cents(300),
            MethodOfReceipt::MilPay,
            &core_kernel::SystemClock,
        );
        let port = MockReimbursementPort::with_reimbursements(vec![requested.clone()]).await;
        let service = service_with(&port);

        let rejected = service.reject(requested.id).await.unwrap();
        assert_eq!(rejected.status, ReimbursementStatus::Rejected);
        assert!(service.approve(requested.id).await.is_err());
    }
}
