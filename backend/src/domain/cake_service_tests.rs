//! Tests for the cake service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;
use rust_decimal::Decimal;

use super::*;
use crate::domain::ports::MockCakeRepository;
use crate::domain::{CakeRequest, ErrorCode, Price};

fn make_service(repo: MockCakeRepository) -> CakeService<MockCakeRepository> {
    CakeService::new(Arc::new(repo))
}

fn price(cents: i64) -> Price {
    Price::new(Decimal::new(cents, 2)).expect("positive price")
}

fn cake(id: i32, name: &str, cents: i64, description: Option<&str>) -> Cake {
    Cake::new(
        CakeId::new(id),
        name.to_owned(),
        price(cents),
        description.map(str::to_owned),
    )
}

fn request(name: &str, cents: i64, description: Option<&str>) -> CakeRequest {
    CakeRequest::from_raw(Some(name), Some(Decimal::new(cents, 2)), description)
}

fn query_error() -> CakeRepositoryError {
    CakeRepositoryError::query("connection reset")
}

#[tokio::test]
async fn add_saves_record_without_identifier() {
    let mut repo = MockCakeRepository::new();
    repo.expect_save()
        .withf(|record| {
            record.id().is_none()
                && record.name() == "Chocolate"
                && record.price().amount() == Decimal::new(999, 2)
                && record.description().is_none()
        })
        .times(1)
        .return_once(|record| Ok(record.clone().into_cake(CakeId::new(42))));

    let id = make_service(repo)
        .add_new_cake(request("Chocolate", 999, None))
        .await
        .expect("add succeeds");

    assert_eq!(id, CakeId::new(42));
}

#[tokio::test]
async fn add_stores_escaped_markup() {
    let mut repo = MockCakeRepository::new();
    repo.expect_save()
        .withf(|record| record.name() == "&lt;script&gt;alert(1)&lt;/script&gt;")
        .times(1)
        .return_once(|record| Ok(record.clone().into_cake(CakeId::new(1))));

    let result = make_service(repo)
        .add_new_cake(request("<script>alert(1)</script>", 100, None))
        .await;

    assert_eq!(result, Ok(CakeId::new(1)));
}

#[rstest]
#[case(CakeRequest::from_raw(Some(""), Some(Decimal::ONE), None))]
#[case(CakeRequest::from_raw(Some("Tart"), None, None))]
#[case(CakeRequest::from_raw(Some("Tart"), Some(Decimal::ZERO), None))]
#[tokio::test]
async fn add_rejects_invalid_request_before_storage(#[case] invalid: CakeRequest) {
    let mut repo = MockCakeRepository::new();
    repo.expect_save().never();

    let err = make_service(repo)
        .add_new_cake(invalid)
        .await
        .expect_err("validation fails");

    assert_eq!(err.kind(), CakeServiceErrorKind::Validation);
    assert_eq!(err.tag(), "CS:01");
    assert!(err.cause().is_none());
    assert_eq!(err.errors().len(), 1);
}

#[tokio::test]
async fn add_classifies_storage_failure_as_operational() {
    let mut repo = MockCakeRepository::new();
    repo.expect_save()
        .times(1)
        .return_once(|_| Err(query_error()));

    let err = make_service(repo)
        .add_new_cake(request("Chocolate", 999, None))
        .await
        .expect_err("save fails");

    assert_eq!(err.kind(), CakeServiceErrorKind::Operational);
    assert_eq!(err.tag(), "CS:01");
    assert_eq!(err.message(), "CS:01: Failed to Create new Cake");
    assert_eq!(err.cause(), Some(&query_error()));
    assert_eq!(err.errors(), ["CS:01: Failed to Create new Cake"]);
}

#[tokio::test]
async fn update_overwrites_and_returns_reread_state() {
    let mut repo = MockCakeRepository::new();
    let mut seq = mockall::Sequence::new();
    repo.expect_find_by_id()
        .with(eq(CakeId::new(5)))
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(Some(cake(5, "Old", 100, Some("stale")))));
    repo.expect_save()
        .withf(|record| {
            record.id() == Some(CakeId::new(5))
                && record.name() == "Carrot"
                && record.price().amount() == Decimal::new(450, 2)
                && record.description().is_none()
        })
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|record| Ok(record.clone().into_cake(CakeId::new(5))));
    repo.expect_find_by_id()
        .with(eq(CakeId::new(5)))
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(Some(cake(5, "Carrot", 450, Some("from storage")))));

    let updated = make_service(repo)
        .update_cake(CakeId::new(5), request("Carrot", 450, None))
        .await
        .expect("update succeeds");

    // The re-read wins over the save result.
    assert_eq!(updated.description(), Some("from storage"));
    assert_eq!(updated.name(), "Carrot");
}

#[tokio::test]
async fn update_unknown_identifier_is_not_found() {
    let mut repo = MockCakeRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_save().never();

    let err = make_service(repo)
        .update_cake(CakeId::new(9), request("Carrot", 450, None))
        .await
        .expect_err("cake missing");

    assert_eq!(err.kind(), CakeServiceErrorKind::NotFound);
    assert_eq!(err.tag(), "CS:02");
    assert_eq!(err.message(), "CS:02: Failed to Update Cake. ID = 9");
    assert_eq!(err.errors(), ["Cake does not exist for id : 9"]);
    assert!(err.cause().is_none());
}

#[tokio::test]
async fn update_validates_before_lookup() {
    let mut repo = MockCakeRepository::new();
    repo.expect_find_by_id().never();
    repo.expect_save().never();

    let err = make_service(repo)
        .update_cake(CakeId::new(9), CakeRequest::default())
        .await
        .expect_err("invalid request");

    assert_eq!(err.kind(), CakeServiceErrorKind::Validation);
    assert_eq!(
        err.errors(),
        [
            "name: Cake name must not be blank",
            "price: Cake price must not be null"
        ]
    );
}

#[tokio::test]
async fn update_missing_on_reread_is_not_found() {
    let mut repo = MockCakeRepository::new();
    let mut seq = mockall::Sequence::new();
    repo.expect_find_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(Some(cake(3, "Old", 100, None))));
    repo.expect_save()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|record| Ok(record.clone().into_cake(CakeId::new(3))));
    repo.expect_find_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(None));

    let err = make_service(repo)
        .update_cake(CakeId::new(3), request("New", 100, None))
        .await
        .expect_err("cake vanished");

    assert_eq!(err.kind(), CakeServiceErrorKind::NotFound);
    assert_eq!(err.tag(), "CS:02");
}

#[tokio::test]
async fn update_storage_failure_is_operational() {
    let mut repo = MockCakeRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(cake(3, "Old", 100, None))));
    repo.expect_save()
        .times(1)
        .return_once(|_| Err(query_error()));

    let err = make_service(repo)
        .update_cake(CakeId::new(3), request("New", 100, None))
        .await
        .expect_err("save fails");

    assert_eq!(err.kind(), CakeServiceErrorKind::Operational);
    assert_eq!(err.tag(), "CS:03");
    assert_eq!(err.message(), "CS:03: Failed to Update Cake. ID = 3");
    assert!(err.cause().is_some());
}

#[tokio::test]
async fn delete_removes_the_found_cake() {
    let existing = cake(4, "Eclair", 250, None);
    let expected = existing.clone();
    let mut repo = MockCakeRepository::new();
    repo.expect_find_by_id()
        .with(eq(CakeId::new(4)))
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_delete()
        .withf(move |cake| *cake == expected)
        .times(1)
        .return_once(|_| Ok(()));

    make_service(repo)
        .delete_cake(CakeId::new(4))
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn delete_unknown_identifier_is_not_found() {
    let mut repo = MockCakeRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_delete().never();

    let err = make_service(repo)
        .delete_cake(CakeId::new(8))
        .await
        .expect_err("cake missing");

    assert_eq!(err.kind(), CakeServiceErrorKind::NotFound);
    assert_eq!(err.tag(), "CS:04");
    assert_eq!(err.errors(), ["Cake does not exist for id : 8"]);
}

#[tokio::test]
async fn delete_storage_failure_is_operational() {
    let mut repo = MockCakeRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(cake(8, "Flan", 300, None))));
    repo.expect_delete()
        .times(1)
        .return_once(|_| Err(CakeRepositoryError::connection("pool closed")));

    let err = make_service(repo)
        .delete_cake(CakeId::new(8))
        .await
        .expect_err("delete fails");

    assert_eq!(err.kind(), CakeServiceErrorKind::Operational);
    assert_eq!(err.tag(), "CS:05");
}

#[rstest]
#[case(Ok(None), CakeServiceErrorKind::NotFound, "CS:06")]
#[case(Err(CakeRepositoryError::query("boom")), CakeServiceErrorKind::Operational, "CS:07")]
#[tokio::test]
async fn get_classifies_failures(
    #[case] lookup: Result<Option<Cake>, CakeRepositoryError>,
    #[case] kind: CakeServiceErrorKind,
    #[case] tag: &'static str,
) {
    let mut repo = MockCakeRepository::new();
    repo.expect_find_by_id().times(1).return_once(move |_| lookup);

    let err = make_service(repo)
        .get_cake(CakeId::new(12))
        .await
        .expect_err("lookup fails");

    assert_eq!(err.kind(), kind);
    assert_eq!(err.tag(), tag);
    assert_eq!(err.message(), format!("{tag}: Failed to find Cake. ID = 12"));
}

#[tokio::test]
async fn get_returns_stored_cake() {
    let mut repo = MockCakeRepository::new();
    repo.expect_find_by_id()
        .with(eq(CakeId::new(1)))
        .times(1)
        .return_once(|_| Ok(Some(cake(1, "Chocolate", 999, None))));

    let found = make_service(repo)
        .get_cake(CakeId::new(1))
        .await
        .expect("cake exists");

    assert_eq!(found, cake(1, "Chocolate", 999, None));
}

#[tokio::test]
async fn get_all_preserves_storage_order() {
    let stored = vec![cake(1, "A", 100, None), cake(2, "B", 200, None)];
    let expected = stored.clone();
    let mut repo = MockCakeRepository::new();
    repo.expect_find_all()
        .times(1)
        .return_once(move || Ok(stored));

    let cakes = make_service(repo).get_all_cakes().await.expect("list succeeds");

    assert_eq!(cakes, expected);
}

#[tokio::test]
async fn get_all_empty_is_not_an_error() {
    let mut repo = MockCakeRepository::new();
    repo.expect_find_all().times(1).return_once(|| Ok(Vec::new()));

    let cakes = make_service(repo).get_all_cakes().await.expect("list succeeds");

    assert!(cakes.is_empty());
}

#[tokio::test]
async fn get_all_storage_failure_is_operational() {
    let mut repo = MockCakeRepository::new();
    repo.expect_find_all()
        .times(1)
        .return_once(|| Err(query_error()));

    let err = make_service(repo).get_all_cakes().await.expect_err("list fails");

    assert_eq!(err.kind(), CakeServiceErrorKind::Operational);
    assert_eq!(err.tag(), "CS:08");
}

#[rstest]
#[case(
    CakeServiceError::validation("CS:01", "Failed to Create new Cake", vec!["name: blank".to_owned()]),
    ErrorCode::InvalidRequest
)]
#[case(
    CakeServiceError::not_found("CS:06", "Failed to find Cake", CakeId::new(2)),
    ErrorCode::NotFound
)]
#[case(
    CakeServiceError::operational("CS:08", "Failed to list Cakes".to_owned(), query_error()),
    ErrorCode::InternalError
)]
fn service_errors_map_to_domain_codes(#[case] err: CakeServiceError, #[case] code: ErrorCode) {
    let errors = err.errors().to_vec();
    let mapped = Error::from(err);
    assert_eq!(mapped.code(), code);
    assert_eq!(mapped.errors(), errors.as_slice());
}
