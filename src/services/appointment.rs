//! Appointment lifecycle: creation, full update, status transitions and
//! party-scoped listings.
//!
//! Creation and update validate everything before any write happens, in a
//! fixed order: identifiers, entity existence, cross-entity ownership,
//! temporal sanity, item resolution, total reconciliation. The declared
//! total must match the summed item prices *exactly* (no tolerance) —
//! procedures use a monetary tolerance instead, and the asymmetry is part
//! of the preserved behavior.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    Appointment, AppointmentItem, AppointmentStatus, Business, EntityId, Owner, Pet,
};
use crate::error::{ApiError, RuleViolation};
use crate::model::{
    AppointmentCreateRequest, AppointmentItemRequest, AppointmentResponse,
    AppointmentUpdateRequest,
};
use crate::services::parse_datetime;
use crate::store::{AppointmentStore, BusinessStore, OwnerStore, PetStore, ServiceStore, StoreError};

pub struct AppointmentService {
    appointments: Arc<dyn AppointmentStore>,
    owners: Arc<dyn OwnerStore>,
    pets: Arc<dyn PetStore>,
    businesses: Arc<dyn BusinessStore>,
    services: Arc<dyn ServiceStore>,
}

impl AppointmentService {
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        owners: Arc<dyn OwnerStore>,
        pets: Arc<dyn PetStore>,
        businesses: Arc<dyn BusinessStore>,
        services: Arc<dyn ServiceStore>,
    ) -> Self {
        AppointmentService {
            appointments,
            owners,
            pets,
            businesses,
            services,
        }
    }

    /// Books a new appointment. The status is always `pendente` on
    /// creation, whatever the caller may have tried to send.
    pub fn create(&self, req: &AppointmentCreateRequest) -> Result<AppointmentResponse, ApiError> {
        let owner_id: EntityId = req
            .owner_id
            .parse()
            .map_err(|_| ApiError::invalid_id("owner"))?;
        let pet_id: EntityId = req.pet_id.parse().map_err(|_| ApiError::invalid_id("pet"))?;
        let business_id: EntityId = req
            .business_id
            .parse()
            .map_err(|_| ApiError::invalid_id("business"))?;

        let owner = self.resolve_owner(owner_id)?;
        let pet = self.resolve_pet(pet_id)?;
        if pet.owner_id != owner_id {
            return Err(RuleViolation::PetNotOwned.into());
        }
        let business = self.resolve_business(business_id)?;

        let scheduled_for = parse_datetime(&req.scheduled_for)?;
        if scheduled_for < Utc::now() {
            return Err(RuleViolation::PastDate.into());
        }

        let (items, computed) = self.resolve_items(business_id, &req.items)?;
        // Exact float equality is the documented contract here.
        if computed != req.declared_total {
            return Err(RuleViolation::TotalMismatch {
                declared: req.declared_total,
                computed,
            }
            .into());
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: EntityId::generate(),
            owner_id,
            pet_id,
            business_id,
            scheduled_for,
            status: AppointmentStatus::Pending,
            notes: req.notes.clone(),
            declared_total: req.declared_total,
            items,
            created_at: now,
            updated_at: now,
        };
        self.appointments.create(&appointment)?;

        Ok(AppointmentResponse::project(
            &appointment,
            &owner.name,
            &pet.name,
            &business.name,
        ))
    }

    pub fn get(&self, id: EntityId) -> Result<AppointmentResponse, ApiError> {
        let appointment = self.resolve_appointment(id)?;
        self.project_with_relations(&appointment)
    }

    /// Replaces date, notes, total and the entire item collection. Items
    /// are validated against the business recorded on the appointment,
    /// never one supplied by the caller, and the stored item set is
    /// swapped atomically.
    pub fn update(
        &self,
        id: EntityId,
        req: &AppointmentUpdateRequest,
    ) -> Result<AppointmentResponse, ApiError> {
        let mut appointment = self.resolve_appointment(id)?;
        if appointment.status.is_terminal() {
            return Err(RuleViolation::UpdateForbidden {
                current: appointment.status,
            }
            .into());
        }

        let scheduled_for = parse_datetime(&req.scheduled_for)?;
        if scheduled_for < Utc::now() {
            return Err(RuleViolation::PastDate.into());
        }

        let (items, computed) = self.resolve_items(appointment.business_id, &req.items)?;
        if computed != req.declared_total {
            return Err(RuleViolation::TotalMismatch {
                declared: req.declared_total,
                computed,
            }
            .into());
        }

        appointment.scheduled_for = scheduled_for;
        appointment.notes = req.notes.clone();
        appointment.declared_total = req.declared_total;
        appointment.items = items;
        appointment.updated_at = Utc::now();
        self.appointments.update(&appointment)?;

        self.project_with_relations(&appointment)
    }

    /// Status-only update, gated exclusively by the transition rule.
    pub fn update_status(
        &self,
        id: EntityId,
        raw_status: &str,
    ) -> Result<AppointmentResponse, ApiError> {
        let next = AppointmentStatus::from_str(raw_status)
            .map_err(|_| ApiError::InvalidInput("invalid status value".into()))?;
        let appointment = self.resolve_appointment(id)?;
        if !appointment.status.can_transition_to(next) {
            return Err(RuleViolation::ForbiddenTransition {
                current: appointment.status,
            }
            .into());
        }

        self.appointments.update_status(id, next)?;
        let refreshed = self.resolve_appointment(id)?;
        self.project_with_relations(&refreshed)
    }

    /// All appointments requested by an owner, newest scheduled first.
    pub fn list_by_owner(&self, owner_id: EntityId) -> Result<Vec<AppointmentResponse>, ApiError> {
        self.resolve_owner(owner_id)?;
        let rows = self.appointments.get_by_owner(owner_id)?;
        Ok(self.project_list(rows))
    }

    /// All appointments booked at a business; `upcoming` narrows to
    /// future, non-cancelled ones, soonest first.
    pub fn list_by_business(
        &self,
        business_id: EntityId,
        upcoming: bool,
    ) -> Result<Vec<AppointmentResponse>, ApiError> {
        self.resolve_business(business_id)?;
        let rows = if upcoming {
            self.appointments
                .upcoming_by_business(business_id, Utc::now())?
        } else {
            self.appointments.get_by_business(business_id)?
        };
        Ok(self.project_list(rows))
    }

    /// Resolves and validates the requested items against the booking's
    /// business, snapshotting each service's current name next to the
    /// caller-agreed price. Returns the items plus the computed total.
    fn resolve_items(
        &self,
        business_id: EntityId,
        requested: &[AppointmentItemRequest],
    ) -> Result<(Vec<AppointmentItem>, f64), ApiError> {
        let mut items = Vec::with_capacity(requested.len());
        let mut computed = 0.0;
        for item in requested {
            let service_id: EntityId = item
                .service_id
                .parse()
                .map_err(|_| ApiError::invalid_id("service"))?;
            let service = self.services.get(service_id).map_err(|err| match err {
                StoreError::NotFound => ApiError::not_found("service"),
                other => ApiError::Storage(other),
            })?;
            if service.business_id != business_id {
                return Err(RuleViolation::ServiceNotFromBusiness.into());
            }
            if !service.active {
                return Err(RuleViolation::ServiceInactive { name: service.name }.into());
            }
            items.push(AppointmentItem {
                id: EntityId::generate(),
                service_id,
                service_name: service.name,
                agreed_price: item.agreed_price,
            });
            computed += item.agreed_price;
        }
        Ok((items, computed))
    }

    /// Projects a list, silently skipping records whose relations no
    /// longer resolve — a degraded entry is dropped rather than failing
    /// the whole listing.
    fn project_list(&self, rows: Vec<Appointment>) -> Vec<AppointmentResponse> {
        rows.iter()
            .filter_map(|appointment| match self.project_with_relations(appointment) {
                Ok(response) => Some(response),
                Err(err) => {
                    tracing::debug!(
                        appointment = %appointment.id,
                        error = %err,
                        "skipping appointment with unresolvable relations"
                    );
                    None
                }
            })
            .collect()
    }

    fn project_with_relations(
        &self,
        appointment: &Appointment,
    ) -> Result<AppointmentResponse, ApiError> {
        let relation_failed =
            |_| ApiError::Storage(StoreError::Backend("failed to load appointment relations".into()));
        let owner = self.owners.get(appointment.owner_id).map_err(relation_failed)?;
        let pet = self.pets.get(appointment.pet_id).map_err(relation_failed)?;
        let business = self
            .businesses
            .get(appointment.business_id)
            .map_err(relation_failed)?;
        Ok(AppointmentResponse::project(
            appointment,
            &owner.name,
            &pet.name,
            &business.name,
        ))
    }

    fn resolve_owner(&self, id: EntityId) -> Result<Owner, ApiError> {
        self.owners.get(id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("owner"),
            other => ApiError::Storage(other),
        })
    }

    fn resolve_pet(&self, id: EntityId) -> Result<Pet, ApiError> {
        self.pets.get(id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("pet"),
            other => ApiError::Storage(other),
        })
    }

    fn resolve_business(&self, id: EntityId) -> Result<Business, ApiError> {
        self.businesses.get(id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("business"),
            other => ApiError::Storage(other),
        })
    }

    fn resolve_appointment(&self, id: EntityId) -> Result<Appointment, ApiError> {
        self.appointments.get(id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("appointment"),
            other => ApiError::Storage(other),
        })
    }
}
