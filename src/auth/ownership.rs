//! Ownership predicates.
//!
//! Each predicate ties the token-carried principal to a path-addressed
//! resource and runs before the guarded operation touches anything.
//! Outcomes follow one convention: malformed identifier → `InvalidInput`,
//! unresolvable resource → `NotFound`, authenticated-but-wrong principal →
//! `Forbidden`. The `NotFound`/`Forbidden` split does reveal whether a
//! resource exists to unauthorized callers; that disclosure is part of the
//! compatible surface and kept as-is.

use crate::auth::token::{Claims, Role};
use crate::domain::{Appointment, EntityId, Pet, Service};
use crate::error::ApiError;
use crate::store::{AppointmentStore, PetStore, ServiceStore};

/// Caller must be the owner addressed by the path (or an admin; no code
/// path in this service issues admin tokens, the branch exists for
/// compatibility).
pub fn require_owner_self(claims: &Claims, raw_id: &str) -> Result<EntityId, ApiError> {
    let resource_id: EntityId = raw_id
        .parse()
        .map_err(|_| ApiError::invalid_id("owner"))?;
    if claims.is_admin {
        return Ok(resource_id);
    }
    if claims.role != Role::Owner {
        return Err(ApiError::Forbidden(
            "only owners may access this resource".into(),
        ));
    }
    if claims.principal_id()? != resource_id {
        return Err(ApiError::Forbidden(
            "you do not have access to this resource".into(),
        ));
    }
    Ok(resource_id)
}

/// Caller must be the business addressed by the path (admin bypass as
/// above).
pub fn require_business_self(claims: &Claims, raw_id: &str) -> Result<EntityId, ApiError> {
    let resource_id: EntityId = raw_id
        .parse()
        .map_err(|_| ApiError::invalid_id("business"))?;
    if claims.is_admin {
        return Ok(resource_id);
    }
    if claims.role != Role::Business {
        return Err(ApiError::Forbidden(
            "only businesses may access this resource".into(),
        ));
    }
    if claims.principal_id()? != resource_id {
        return Err(ApiError::Forbidden(
            "you do not have access to this resource".into(),
        ));
    }
    Ok(resource_id)
}

/// Caller must be the owner of the addressed pet.
pub fn require_pet_owner(
    pets: &dyn PetStore,
    claims: &Claims,
    raw_id: &str,
) -> Result<Pet, ApiError> {
    if claims.role != Role::Owner {
        return Err(ApiError::Forbidden(
            "only owners may access this resource".into(),
        ));
    }
    let pet_id: EntityId = raw_id.parse().map_err(|_| ApiError::invalid_id("pet"))?;
    let pet = pets.get(pet_id).map_err(|err| match err {
        crate::store::StoreError::NotFound => ApiError::not_found("pet"),
        other => ApiError::Storage(other),
    })?;
    if claims.principal_id()? != pet.owner_id {
        return Err(ApiError::Forbidden("you are not this pet's owner".into()));
    }
    Ok(pet)
}

/// Caller must be a party to the addressed appointment: the requesting
/// owner, or the business it was booked at.
pub fn require_appointment_party(
    appointments: &dyn AppointmentStore,
    claims: &Claims,
    raw_id: &str,
) -> Result<Appointment, ApiError> {
    let id: EntityId = raw_id
        .parse()
        .map_err(|_| ApiError::invalid_id("appointment"))?;
    let appointment = appointments.get(id).map_err(|err| match err {
        crate::store::StoreError::NotFound => ApiError::not_found("appointment"),
        other => ApiError::Storage(other),
    })?;
    let caller = claims.principal_id()?;
    let allowed = match claims.role {
        Role::Owner => appointment.owner_id == caller,
        Role::Business => appointment.business_id == caller,
    };
    if !allowed {
        return Err(ApiError::Forbidden(
            "you do not have access to this appointment".into(),
        ));
    }
    Ok(appointment)
}

/// Caller must be the business that owns the addressed service.
pub fn require_service_owner(
    services: &dyn ServiceStore,
    claims: &Claims,
    raw_id: &str,
) -> Result<Service, ApiError> {
    if claims.role != Role::Business {
        return Err(ApiError::Forbidden(
            "only businesses may manage services".into(),
        ));
    }
    let id: EntityId = raw_id
        .parse()
        .map_err(|_| ApiError::invalid_id("service"))?;
    let service = services.get(id).map_err(|err| match err {
        crate::store::StoreError::NotFound => ApiError::not_found("service"),
        other => ApiError::Storage(other),
    })?;
    if claims.principal_id()? != service.business_id {
        return Err(ApiError::Forbidden(
            "you do not have access to this service".into(),
        ));
    }
    Ok(service)
}
