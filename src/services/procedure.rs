//! Procedure records: an append-only log of services already rendered.
//!
//! No status machine and no mutation surface — once written, a record
//! only ever comes back out. Unlike appointments, the declared total is
//! reconciled within a monetary tolerance of 0.01, and items may
//! reference services that have since been deactivated: the record
//! documents history, not the current catalog.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{EntityId, Procedure, ProcedureItem};
use crate::error::{ApiError, RuleViolation};
use crate::model::{ProcedureCreateRequest, ProcedureResponse};
use crate::services::parse_datetime;
use crate::store::{BusinessStore, PetStore, ProcedureStore, ServiceStore, StoreError};

/// Allowed absolute gap between the declared total and the summed item
/// prices, absorbing monetary rounding.
const TOTAL_TOLERANCE: f64 = 0.01;

pub struct ProcedureService {
    procedures: Arc<dyn ProcedureStore>,
    pets: Arc<dyn PetStore>,
    businesses: Arc<dyn BusinessStore>,
    services: Arc<dyn ServiceStore>,
}

impl ProcedureService {
    pub fn new(
        procedures: Arc<dyn ProcedureStore>,
        pets: Arc<dyn PetStore>,
        businesses: Arc<dyn BusinessStore>,
        services: Arc<dyn ServiceStore>,
    ) -> Self {
        ProcedureService {
            procedures,
            pets,
            businesses,
            services,
        }
    }

    pub fn create(&self, req: &ProcedureCreateRequest) -> Result<ProcedureResponse, ApiError> {
        let pet_id: EntityId = req.pet_id.parse().map_err(|_| ApiError::invalid_id("pet"))?;
        let business_id: EntityId = req
            .business_id
            .parse()
            .map_err(|_| ApiError::invalid_id("business"))?;

        let pet = self.pets.get(pet_id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("pet"),
            other => ApiError::Storage(other),
        })?;
        let business = self.businesses.get(business_id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("business"),
            other => ApiError::Storage(other),
        })?;

        let realized_at = parse_datetime(&req.realized_at)?;
        if realized_at > Utc::now() {
            return Err(RuleViolation::FutureDate.into());
        }

        if req.items.is_empty() {
            return Err(ApiError::InvalidInput(
                "a procedure requires at least one item".into(),
            ));
        }

        let mut items = Vec::with_capacity(req.items.len());
        let mut computed = 0.0;
        for item in &req.items {
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
            // No active-flag check: deactivated services may still be
            // recorded as historically rendered.
            items.push(ProcedureItem {
                id: EntityId::generate(),
                service_id,
                service_name: service.name,
                final_price: item.final_price,
            });
            computed += item.final_price;
        }

        if (req.total - computed).abs() > TOTAL_TOLERANCE {
            return Err(RuleViolation::TotalMismatch {
                declared: req.total,
                computed,
            }
            .into());
        }

        let now = Utc::now();
        let procedure = Procedure {
            id: EntityId::generate(),
            pet_id,
            business_id,
            business_name: business.name.clone(),
            realized_at,
            notes: req.notes.clone(),
            total: req.total,
            items,
            created_at: now,
            updated_at: now,
        };
        self.procedures.create(&procedure)?;

        Ok(ProcedureResponse::project(&procedure, &pet.name))
    }

    /// Every recorded procedure for a pet, most recent first.
    pub fn list_by_pet(&self, pet_id: EntityId) -> Result<Vec<ProcedureResponse>, ApiError> {
        let pet = self.pets.get(pet_id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("pet"),
            other => ApiError::Storage(other),
        })?;
        let rows = self.procedures.get_by_pet(pet_id)?;
        Ok(rows
            .iter()
            .map(|procedure| ProcedureResponse::project(procedure, &pet.name))
            .collect())
    }
}
