//! Service catalog management (the offerings a business sells).

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{EntityId, Service};
use crate::error::ApiError;
use crate::model::{ServiceCreateRequest, ServiceUpdateRequest};
use crate::store::{BusinessStore, ServiceStore, StoreError};

pub struct CatalogService {
    services: Arc<dyn ServiceStore>,
    businesses: Arc<dyn BusinessStore>,
}

impl CatalogService {
    pub fn new(services: Arc<dyn ServiceStore>, businesses: Arc<dyn BusinessStore>) -> Self {
        CatalogService {
            services,
            businesses,
        }
    }

    /// Adds a service to a business's catalog. Names are unique within
    /// that business only; two businesses may both offer "Banho".
    pub fn create(
        &self,
        business_id: EntityId,
        req: &ServiceCreateRequest,
    ) -> Result<Service, ApiError> {
        self.businesses.get(business_id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("business"),
            other => ApiError::Storage(other),
        })?;
        if self.services.get_by_name(business_id, &req.name)?.is_some() {
            return Err(ApiError::AlreadyExists(
                "this business already offers a service with this name".into(),
            ));
        }

        let now = Utc::now();
        let service = Service {
            id: EntityId::generate(),
            business_id,
            name: req.name.clone(),
            description: req.description.clone(),
            base_price: req.base_price,
            active: true,
            created_at: now,
            updated_at: now,
        };
        self.services.create(&service)?;
        Ok(service)
    }

    pub fn get(&self, id: EntityId) -> Result<Service, ApiError> {
        self.services.get(id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("service"),
            other => ApiError::Storage(other),
        })
    }

    /// Renames and reprices a service; the per-business uniqueness check
    /// only runs when the name changes and skips the service's own row.
    pub fn update(&self, id: EntityId, req: &ServiceUpdateRequest) -> Result<Service, ApiError> {
        let mut service = self.get(id)?;
        if service.name != req.name
            && let Some(existing) = self.services.get_by_name(service.business_id, &req.name)?
            && existing.id != service.id
        {
            return Err(ApiError::AlreadyExists(
                "this business already offers a service with this name".into(),
            ));
        }
        service.name = req.name.clone();
        service.description = req.description.clone();
        service.base_price = req.base_price;
        service.updated_at = Utc::now();
        self.services.update(&service)?;
        Ok(service)
    }

    /// Deactivates instead of deleting, so existing appointment and
    /// procedure items keep resolving.
    pub fn deactivate(&self, id: EntityId) -> Result<(), ApiError> {
        let mut service = self.get(id)?;
        service.active = false;
        service.updated_at = Utc::now();
        self.services.update(&service)?;
        Ok(())
    }

    /// Every service of the business, inactive ones included.
    pub fn list_by_business(&self, business_id: EntityId) -> Result<Vec<Service>, ApiError> {
        self.businesses.get(business_id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("business"),
            other => ApiError::Storage(other),
        })?;
        Ok(self.services.get_by_business(business_id)?)
    }
}
