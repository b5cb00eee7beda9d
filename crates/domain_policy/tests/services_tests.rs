//! Policy Service Tests
//!
//! Exercises `PolicyService` against the in-memory `MockPolicyStore` and a
//! few purpose-built stores.
//!
//! # Test Organization
//!
//! - `create` - validation, duplicate detection, id and timestamp assignment
//! - `read` - lookups by id
//! - `update` - mutable fields, immutable fields, not-found handling
//! - `delete` - removal and not-found handling
//! - `list` - search, type filter and sort orders
//! - `store_failures` - unique-index backstop and storage errors

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PolicyId, PortError};
use domain_policy::{
    MockPolicyStore, NewPolicy, Policy, PolicyDraft, PolicyError, PolicyQuery, PolicyService,
    PolicyStore, PolicyType,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// The candidate record from the reference scenario
fn jane_doe() -> PolicyDraft {
    PolicyDraft {
        policy_number: "AB123456".to_string(),
        holder_name: "Jane Doe".to_string(),
        policy_type: PolicyType::Health,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        premium: dec!(500.00),
    }
}

fn draft(policy_number: &str, holder_name: &str, policy_type: PolicyType, premium: Decimal) -> PolicyDraft {
    PolicyDraft {
        policy_number: policy_number.to_string(),
        holder_name: holder_name.to_string(),
        policy_type,
        premium,
        ..jane_doe()
    }
}

/// A stored record with explicit start and creation times
fn stored(
    id: i64,
    policy_number: &str,
    holder_name: &str,
    policy_type: PolicyType,
    premium: Decimal,
    start: DateTime<Utc>,
    created: DateTime<Utc>,
) -> Policy {
    Policy {
        id: PolicyId::new(id),
        policy_number: policy_number.to_string(),
        holder_name: holder_name.to_string(),
        policy_type,
        start_date: start,
        end_date: date(2030, 1, 1),
        premium,
        created_at: created,
        updated_at: created,
    }
}

fn service() -> PolicyService {
    PolicyService::new(Arc::new(MockPolicyStore::new()))
}

fn validation_message(result: Result<Policy, PolicyError>) -> String {
    match result {
        Err(PolicyError::Validation(msg)) => msg,
        other => panic!("Expected validation error, got {:?}", other),
    }
}

// ============================================================================
// CREATE
// ============================================================================

mod create {
    use super::*;

    /// Reference scenario: create succeeds, second create with the same number fails
    #[tokio::test]
    async fn test_create_then_duplicate() {
        let service = service();

        let created = service.create_policy(jane_doe()).await.unwrap();
        assert_ne!(created.id.value(), 0);
        assert_eq!(created.created_at, created.updated_at);

        let mut again = jane_doe();
        again.holder_name = "Someone Else".to_string();
        let result = service.create_policy(again).await;

        match result {
            Err(PolicyError::Duplicate(msg)) => assert_eq!(msg, "Policy number already exists"),
            other => panic!("Expected duplicate error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bad_policy_number_rejected() {
        let service = service();
        let mut candidate = jane_doe();
        candidate.policy_number = "ab12".to_string();

        assert_eq!(
            validation_message(service.create_policy(candidate).await),
            "Policy number must be at least 8 characters and contain only uppercase letters and numbers"
        );
    }

    #[tokio::test]
    async fn test_end_before_start_rejected() {
        let service = service();
        let mut candidate = jane_doe();
        candidate.end_date = date(2023, 12, 31);

        assert_eq!(
            validation_message(service.create_policy(candidate).await),
            "End date must be after start date"
        );
    }

    #[tokio::test]
    async fn test_non_positive_premium_rejected() {
        let service = service();
        let mut candidate = jane_doe();
        candidate.premium = dec!(0);

        assert_eq!(
            validation_message(service.create_policy(candidate).await),
            "Premium must be greater than 0"
        );
    }

    /// Validation runs before the duplicate check
    #[tokio::test]
    async fn test_validation_precedes_duplicate_check() {
        let service = service();
        service.create_policy(jane_doe()).await.unwrap();

        let mut candidate = jane_doe();
        candidate.premium = dec!(-1);

        assert!(matches!(
            service.create_policy(candidate).await,
            Err(PolicyError::Validation(_))
        ));
    }

    /// Create then get returns the candidate plus id and timestamps
    #[tokio::test]
    async fn test_created_record_round_trips() {
        let service = service();

        let created = service.create_policy(jane_doe()).await.unwrap();
        let fetched = service.get_policy(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.to_draft(), jane_doe());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let service = service();

        let first = service.create_policy(jane_doe()).await.unwrap();
        assert!(service.delete_policy(first.id).await.unwrap());
        let second = service.create_policy(jane_doe()).await.unwrap();

        assert!(second.id > first.id);
    }
}

// ============================================================================
// READ
// ============================================================================

mod read {
    use super::*;

    #[tokio::test]
    async fn test_missing_id_is_none() {
        let service = service();
        assert!(service.get_policy(PolicyId::new(404)).await.unwrap().is_none());
    }
}

// ============================================================================
// UPDATE
// ============================================================================

mod update {
    use super::*;

    #[tokio::test]
    async fn test_update_missing_is_none() {
        let service = service();
        let result = service.update_policy(PolicyId::new(99), jane_doe()).await;
        assert!(matches!(result, Ok(None)));
    }

    /// Not-found wins over validation: an invalid candidate for a missing id is still None
    #[tokio::test]
    async fn test_update_missing_skips_validation() {
        let service = service();
        let mut candidate = jane_doe();
        candidate.premium = dec!(0);

        let result = service.update_policy(PolicyId::new(99), candidate).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_update_overwrites_mutable_fields_only() {
        let service = service();
        let created = service.create_policy(jane_doe()).await.unwrap();

        let candidate = PolicyDraft {
            policy_number: "ZZ999999".to_string(),
            holder_name: "Jane Smith".to_string(),
            policy_type: PolicyType::Life,
            start_date: date(2024, 2, 1),
            end_date: date(2025, 1, 31),
            premium: dec!(650.25),
        };
        let updated = service
            .update_policy(created.id, candidate)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.policy_number, "AB123456");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.holder_name, "Jane Smith");
        assert_eq!(updated.policy_type, PolicyType::Life);
        assert_eq!(updated.start_date, date(2024, 2, 1));
        assert_eq!(updated.end_date, date(2025, 1, 31));
        assert_eq!(updated.premium, dec!(650.25));

        let fetched = service.get_policy(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_validates_dates_and_premium() {
        let service = service();
        let created = service.create_policy(jane_doe()).await.unwrap();

        let mut bad_dates = jane_doe();
        bad_dates.end_date = bad_dates.start_date;
        assert_eq!(
            validation_message(service.update_policy(created.id, bad_dates).await.map(|p| p.unwrap())),
            "End date must be after start date"
        );

        let mut bad_premium = jane_doe();
        bad_premium.premium = dec!(-10);
        assert_eq!(
            validation_message(service.update_policy(created.id, bad_premium).await.map(|p| p.unwrap())),
            "Premium must be greater than 0"
        );

        let unchanged = service.get_policy(created.id).await.unwrap().unwrap();
        assert_eq!(unchanged, created);
    }

    /// The policy number format is not re-checked on update
    #[tokio::test]
    async fn test_update_ignores_candidate_policy_number() {
        let service = service();
        let created = service.create_policy(jane_doe()).await.unwrap();

        let mut candidate = jane_doe();
        candidate.policy_number = "not valid".to_string();

        let updated = service.update_policy(created.id, candidate).await.unwrap();
        assert_eq!(updated.unwrap().policy_number, "AB123456");
    }

    #[tokio::test]
    async fn test_repeated_updates_keep_advancing() {
        let service = service();
        let created = service.create_policy(jane_doe()).await.unwrap();

        let mut last = created.updated_at;
        for _ in 0..5 {
            let updated = service
                .update_policy(created.id, jane_doe())
                .await
                .unwrap()
                .unwrap();
            assert!(updated.updated_at > last);
            last = updated.updated_at;
        }
    }
}

// ============================================================================
// DELETE
// ============================================================================

mod delete {
    use super::*;

    #[tokio::test]
    async fn test_delete_existing_then_missing() {
        let service = service();
        let created = service.create_policy(jane_doe()).await.unwrap();

        assert!(service.delete_policy(created.id).await.unwrap());
        assert!(service.get_policy(created.id).await.unwrap().is_none());
        assert!(!service.delete_policy(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_is_false() {
        let service = service();
        assert!(!service.delete_policy(PolicyId::new(1)).await.unwrap());
    }

    /// A deleted policy number can be used again
    #[tokio::test]
    async fn test_number_reusable_after_delete() {
        let service = service();
        let created = service.create_policy(jane_doe()).await.unwrap();
        service.delete_policy(created.id).await.unwrap();

        assert!(service.create_policy(jane_doe()).await.is_ok());
    }
}

// ============================================================================
// LIST
// ============================================================================

mod list {
    use super::*;

    async fn seeded() -> PolicyService {
        let store = MockPolicyStore::with_policies(vec![
            stored(1, "ABC00001", "Mary Major", PolicyType::Life, dec!(100), date(2024, 3, 1), date(2024, 1, 1)),
            stored(2, "XYZ00002", "Zed Abcott", PolicyType::Health, dec!(900), date(2024, 1, 1), date(2024, 1, 3)),
            stored(3, "QRS00003", "Alice Brown", PolicyType::Vehicle, dec!(450), date(2024, 6, 1), date(2024, 1, 2)),
            stored(4, "LMN00004", "Bob Stone", PolicyType::Health, dec!(450), date(2023, 6, 1), date(2024, 1, 4)),
        ])
        .await;
        PolicyService::new(Arc::new(store))
    }

    fn ids(policies: &[Policy]) -> Vec<i64> {
        policies.iter().map(|p| p.id.value()).collect()
    }

    #[tokio::test]
    async fn test_default_order_is_newest_created_first() {
        let service = seeded().await;
        let result = service.list_policies(&PolicyQuery::default()).await.unwrap();
        assert_eq!(ids(&result), vec![4, 2, 3, 1]);
    }

    /// Search matches number or holder name, ignoring case
    #[tokio::test]
    async fn test_search_matches_number_or_holder() {
        let service = seeded().await;
        let query = PolicyQuery::from_params(Some("ABC"), None, None);

        let result = service.list_policies(&query).await.unwrap();

        assert_eq!(ids(&result), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_whitespace_search_returns_everything() {
        let service = seeded().await;
        let query = PolicyQuery::from_params(Some("  \t"), None, None);

        assert_eq!(service.list_policies(&query).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_type_filter_ignores_case() {
        let service = seeded().await;
        let query = PolicyQuery::from_params(None, Some("hEaLtH"), None);

        let result = service.list_policies(&query).await.unwrap();

        assert_eq!(ids(&result), vec![4, 2]);
    }

    #[tokio::test]
    async fn test_unknown_type_is_not_a_filter() {
        let service = seeded().await;
        let query = PolicyQuery::from_params(None, Some("Pet"), None);

        assert_eq!(service.list_policies(&query).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_sort_by_premium_descending() {
        let service = seeded().await;
        let query = PolicyQuery::from_params(None, None, Some("premium"));

        let result = service.list_policies(&query).await.unwrap();

        let premiums: Vec<Decimal> = result.iter().map(|p| p.premium).collect();
        assert_eq!(premiums, vec![dec!(900), dec!(450), dec!(450), dec!(100)]);
    }

    #[tokio::test]
    async fn test_sort_by_date_descending() {
        let service = seeded().await;
        let query = PolicyQuery::from_params(None, None, Some("date"));

        let result = service.list_policies(&query).await.unwrap();

        assert_eq!(ids(&result), vec![3, 1, 2, 4]);
    }

    #[tokio::test]
    async fn test_sort_by_name_ascending() {
        let service = seeded().await;
        let query = PolicyQuery::from_params(None, None, Some("NAME"));

        let result = service.list_policies(&query).await.unwrap();

        let names: Vec<&str> = result.iter().map(|p| p.holder_name.as_str()).collect();
        assert_eq!(names, vec!["Alice Brown", "Bob Stone", "Mary Major", "Zed Abcott"]);
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let service = seeded().await;
        let query = PolicyQuery::from_params(Some("o"), Some("Health"), Some("name"));

        let result = service.list_policies(&query).await.unwrap();

        assert_eq!(ids(&result), vec![4, 2]);
    }
}

// ============================================================================
// STORE FAILURES
// ============================================================================

mod store_failures {
    use super::*;

    /// Store whose policy number lookup always misses, as when a concurrent
    /// create commits between the lookup and the insert
    struct RacingStore(MockPolicyStore);

    impl DomainPort for RacingStore {}

    #[async_trait]
    impl HealthCheckable for RacingStore {
        async fn health_check(&self) -> HealthCheckResult {
            self.0.health_check().await
        }
    }

    #[async_trait]
    impl PolicyStore for RacingStore {
        async fn list(&self, query: &PolicyQuery) -> Result<Vec<Policy>, PortError> {
            self.0.list(query).await
        }
        async fn get(&self, id: PolicyId) -> Result<Option<Policy>, PortError> {
            self.0.get(id).await
        }
        async fn find_by_policy_number(&self, _policy_number: &str) -> Result<Option<Policy>, PortError> {
            Ok(None)
        }
        async fn insert(&self, policy: NewPolicy) -> Result<Policy, PortError> {
            self.0.insert(policy).await
        }
        async fn update(&self, policy: &Policy) -> Result<Option<Policy>, PortError> {
            self.0.update(policy).await
        }
        async fn delete(&self, id: PolicyId) -> Result<bool, PortError> {
            self.0.delete(id).await
        }
    }

    /// Store that cannot reach its backend
    struct UnreachableStore;

    impl DomainPort for UnreachableStore {}

    #[async_trait]
    impl HealthCheckable for UnreachableStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "unreachable".to_string(),
                status: core_kernel::AdapterHealth::Unhealthy,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl PolicyStore for UnreachableStore {
        async fn list(&self, _query: &PolicyQuery) -> Result<Vec<Policy>, PortError> {
            Err(PortError::connection("connection refused"))
        }
        async fn get(&self, _id: PolicyId) -> Result<Option<Policy>, PortError> {
            Err(PortError::connection("connection refused"))
        }
        async fn find_by_policy_number(&self, _policy_number: &str) -> Result<Option<Policy>, PortError> {
            Err(PortError::connection("connection refused"))
        }
        async fn insert(&self, _policy: NewPolicy) -> Result<Policy, PortError> {
            Err(PortError::connection("connection refused"))
        }
        async fn update(&self, _policy: &Policy) -> Result<Option<Policy>, PortError> {
            Err(PortError::connection("connection refused"))
        }
        async fn delete(&self, _id: PolicyId) -> Result<bool, PortError> {
            Err(PortError::connection("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_unique_index_violation_is_duplicate() {
        let service = PolicyService::new(Arc::new(RacingStore(MockPolicyStore::new())));
        service.create_policy(jane_doe()).await.unwrap();

        let result = service.create_policy(jane_doe()).await;

        match result {
            Err(PolicyError::Duplicate(msg)) => assert_eq!(msg, "Policy number already exists"),
            other => panic!("Expected duplicate error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_backend_failures_are_storage_errors() {
        let service = PolicyService::new(Arc::new(UnreachableStore));

        assert!(matches!(
            service.list_policies(&PolicyQuery::default()).await,
            Err(PolicyError::Storage(_))
        ));
        assert!(matches!(
            service.get_policy(PolicyId::new(1)).await,
            Err(PolicyError::Storage(_))
        ));
        assert!(matches!(
            service.create_policy(jane_doe()).await,
            Err(PolicyError::Storage(_))
        ));
        assert!(matches!(
            service.update_policy(PolicyId::new(1), jane_doe()).await,
            Err(PolicyError::Storage(_))
        ));
        assert!(matches!(
            service.delete_policy(PolicyId::new(1)).await,
            Err(PolicyError::Storage(_))
        ));
    }

    /// Storage errors are not caller faults
    #[tokio::test]
    async fn test_storage_error_is_not_client_error() {
        let service = PolicyService::new(Arc::new(UnreachableStore));
        let error = service.create_policy(draft("AB123456", "X", PolicyType::Life, dec!(1))).await.unwrap_err();
        assert!(!error.is_client_error());
    }
}
