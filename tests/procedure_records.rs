//! Procedure record coverage: temporal validation, monetary tolerance
//! and the append-only, snapshot-keeping nature of the log.

mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use serde_json::json;

use common::*;
use petcare_api::model::BusinessUpdateRequest;
use petcare_api::{ApiError, RuleViolation};

#[test]
fn records_rendered_services_with_snapshots() {
    let state = test_state();
    let owner = register_owner(&state, "ana@x.com");
    let business = register_business(&state, "shop@x.com");
    let pet = add_pet(&state, &owner);
    let bath = add_service(&state, &business, "Banho", 50.0);
    let groom = add_service(&state, &business, "Tosa", 80.0);

    let req = procedure_request(
        &pet,
        &business,
        &[(&bath, 55.0), (&groom, 75.0)],
        130.0,
        Utc::now() - Duration::hours(2),
    );
    let created = state.procedures.create(&req).unwrap();

    assert_eq!(created.total, 130.0);
    assert_eq!(created.items.len(), 2);
    assert_eq!(created.business_name, "Bicho Feliz");
    assert_eq!(created.pet_name, "Rex");
    // Final prices are the caller's, not the catalog base prices.
    assert_eq!(created.items[0].final_price, 55.0);
}

#[test]
fn future_realization_dates_are_rejected() {
    let state = test_state();
    let owner = register_owner(&state, "ana@x.com");
    let business = register_business(&state, "shop@x.com");
    let pet = add_pet(&state, &owner);
    let bath = add_service(&state, &business, "Banho", 50.0);

    let req = procedure_request(
        &pet,
        &business,
        &[(&bath, 50.0)],
        50.0,
        Utc::now() + Duration::hours(1),
    );
    assert_matches!(
        state.procedures.create(&req),
        Err(ApiError::Rule(RuleViolation::FutureDate))
    );
}

#[test]
fn totals_tolerate_a_cent_of_rounding() {
    let state = test_state();
    let owner = register_owner(&state, "ana@x.com");
    let business = register_business(&state, "shop@x.com");
    let pet = add_pet(&state, &owner);
    let bath = add_service(&state, &business, "Banho", 50.0);
    let yesterday = Utc::now() - Duration::days(1);

    // Within the 0.01 tolerance: accepted.
    let req = procedure_request(&pet, &business, &[(&bath, 50.0)], 50.005, yesterday);
    assert!(state.procedures.create(&req).is_ok());

    // Beyond it: rejected.
    let req = procedure_request(&pet, &business, &[(&bath, 50.0)], 50.02, yesterday);
    assert_matches!(
        state.procedures.create(&req),
        Err(ApiError::Rule(RuleViolation::TotalMismatch { .. }))
    );
}

#[test]
fn deactivated_services_may_still_be_recorded() {
    let state = test_state();
    let owner = register_owner(&state, "ana@x.com");
    let business = register_business(&state, "shop@x.com");
    let pet = add_pet(&state, &owner);
    let bath = add_service(&state, &business, "Banho", 50.0);
    state.catalog.deactivate(bath.id).unwrap();

    // History may reference services no longer offered.
    let req = procedure_request(
        &pet,
        &business,
        &[(&bath, 50.0)],
        50.0,
        Utc::now() - Duration::hours(3),
    );
    assert!(state.procedures.create(&req).is_ok());
}

#[test]
fn services_must_belong_to_the_recording_business() {
    let state = test_state();
    let owner = register_owner(&state, "ana@x.com");
    let business = register_business(&state, "shop@x.com");
    let other_business = register_business(&state, "other@x.com");
    let pet = add_pet(&state, &owner);
    let foreign = add_service(&state, &other_business, "Tosa", 80.0);

    let req = procedure_request(
        &pet,
        &business,
        &[(&foreign, 80.0)],
        80.0,
        Utc::now() - Duration::hours(1),
    );
    assert_matches!(
        state.procedures.create(&req),
        Err(ApiError::Rule(RuleViolation::ServiceNotFromBusiness))
    );
}

#[test]
fn business_name_is_snapshotted_at_record_time() {
    let state = test_state();
    let owner = register_owner(&state, "ana@x.com");
    let business = register_business(&state, "shop@x.com");
    let pet = add_pet(&state, &owner);
    let bath = add_service(&state, &business, "Banho", 50.0);

    state
        .procedures
        .create(&procedure_request(
            &pet,
            &business,
            &[(&bath, 50.0)],
            50.0,
            Utc::now() - Duration::hours(1),
        ))
        .unwrap();

    // Renaming the business afterwards does not rewrite history.
    let rename: BusinessUpdateRequest = serde_json::from_value(json!({
        "nome": "Bicho Feliz Premium",
        "email": "shop@x.com",
        "telefone": "11 98888-0000",
        "descricao": "banho e tosa",
    }))
    .unwrap();
    state.businesses.update(business.id, &rename).unwrap();

    let history = state.procedures.list_by_pet(pet.id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].business_name, "Bicho Feliz");
}

#[test]
fn listing_requires_an_existing_pet() {
    let state = test_state();
    let missing = petcare_api::domain::EntityId::generate();
    assert_matches!(
        state.procedures.list_by_pet(missing),
        Err(ApiError::NotFound(_))
    );
}
