//! Registration, login and token lifecycle for both principal kinds.

mod common;

use assert_matches::assert_matches;

use common::*;
use petcare_api::ApiError;
use petcare_api::auth::Role;

#[test]
fn registration_then_login_round_trip() {
    let state = test_state();
    register_owner(&state, "ana@x.com");

    let principal = state
        .auth
        .authenticate_owner("ana@x.com", TEST_PASSWORD)
        .unwrap();
    assert_eq!(principal.role, Role::Owner);
    assert_eq!(principal.email, "ana@x.com");
}

#[test]
fn wrong_password_and_unknown_email_are_indistinguishable() {
    let state = test_state();
    register_owner(&state, "ana@x.com");

    let wrong_password = state
        .auth
        .authenticate_owner("ana@x.com", "senha-errada")
        .unwrap_err();
    let unknown_email = state
        .auth
        .authenticate_owner("nobody@x.com", TEST_PASSWORD)
        .unwrap_err();

    assert_matches!(&wrong_password, ApiError::Unauthorized(_));
    assert_matches!(&unknown_email, ApiError::Unauthorized(_));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[test]
fn duplicate_email_registration_conflicts() {
    let state = test_state();
    register_owner(&state, "ana@x.com");

    let err = state.owners.create(&owner_request("ana@x.com")).unwrap_err();
    assert_matches!(err, ApiError::AlreadyExists(_));
}

#[test]
fn owner_and_business_credentials_are_separate_pools() {
    let state = test_state();
    register_owner(&state, "same@x.com");
    register_business(&state, "same@x.com");

    // The same email resolves to different principals per login kind.
    let owner = state
        .auth
        .authenticate_owner("same@x.com", TEST_PASSWORD)
        .unwrap();
    let business = state
        .auth
        .authenticate_business("same@x.com", TEST_PASSWORD)
        .unwrap();
    assert_eq!(owner.role, Role::Owner);
    assert_eq!(business.role, Role::Business);
    assert_ne!(owner.id, business.id);
}

#[test]
fn business_tokens_carry_description_and_rating() {
    let state = test_state();
    register_business(&state, "shop@x.com");

    let principal = state
        .auth
        .authenticate_business("shop@x.com", TEST_PASSWORD)
        .unwrap();
    let issued = state.tokens.issue(&principal).unwrap();
    let claims = state.tokens.verify(&issued.token).unwrap();

    assert_eq!(claims.role, Role::Business);
    assert_eq!(claims.description.as_deref(), Some("banho e tosa"));
    assert_eq!(claims.rating, Some(0.0));
    assert!(!claims.is_admin);
}

#[test]
fn email_update_collision_is_rejected_but_self_update_is_not() {
    let state = test_state();
    let ana = register_owner(&state, "ana@x.com");
    register_owner(&state, "bia@x.com");

    // Changing to a taken email conflicts.
    let req = serde_json::from_value(serde_json::json!({
        "nome": "Ana Souza",
        "email": "bia@x.com",
        "telefone": "11 99999-0000",
    }))
    .unwrap();
    assert_matches!(
        state.owners.update(ana.id, &req),
        Err(ApiError::AlreadyExists(_))
    );

    // Keeping one's own email does not trip the collision check.
    let req = serde_json::from_value(serde_json::json!({
        "nome": "Ana S. Lima",
        "email": "ana@x.com",
        "telefone": "11 97777-0000",
    }))
    .unwrap();
    let updated = state.owners.update(ana.id, &req).unwrap();
    assert_eq!(updated.name, "Ana S. Lima");
}

#[test]
fn deleted_owner_cannot_log_in_and_frees_the_email() {
    let state = test_state();
    let ana = register_owner(&state, "ana@x.com");
    state.owners.delete(ana.id).unwrap();

    assert_matches!(
        state.auth.authenticate_owner("ana@x.com", TEST_PASSWORD),
        Err(ApiError::Unauthorized(_))
    );
    // The email can be registered again after the soft delete.
    assert!(state.owners.create(&owner_request("ana@x.com")).is_ok());
}
