//! Business account management and public listings.

use std::sync::Arc;

use chrono::Utc;

use crate::auth::password;
use crate::domain::{Address, Business, EntityId};
use crate::error::ApiError;
use crate::model::{AddressRequest, BusinessUpdateRequest, RegisterBusinessRequest};
use crate::store::{BusinessStore, Page};

pub struct BusinessService {
    businesses: Arc<dyn BusinessStore>,
}

impl BusinessService {
    pub fn new(businesses: Arc<dyn BusinessStore>) -> Self {
        BusinessService { businesses }
    }

    /// Registers a new business, active and unrated by default.
    pub fn create(&self, req: &RegisterBusinessRequest) -> Result<Business, ApiError> {
        if self.businesses.get_by_email(&req.email)?.is_some() {
            return Err(ApiError::AlreadyExists(
                "a business with this email already exists".into(),
            ));
        }
        let password_hash = password::hash_password(&req.password)?;
        let now = Utc::now();
        let business = Business {
            id: EntityId::generate(),
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            address: Address {
                postal_code: req.postal_code.clone(),
                street: req.street.clone(),
                district: req.district.clone(),
                city: req.city.clone(),
                state: req.state.clone(),
                number: req.number.clone(),
                complement: req.complement.clone(),
            },
            description: req.description.clone(),
            rating: 0.0,
            active: true,
            password_hash,
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.businesses.create(&business)?;
        Ok(business)
    }

    pub fn get(&self, id: EntityId) -> Result<Business, ApiError> {
        self.businesses.get(id).map_err(|err| match err {
            crate::store::StoreError::NotFound => ApiError::not_found("business"),
            other => ApiError::Storage(other),
        })
    }

    pub fn update(&self, id: EntityId, req: &BusinessUpdateRequest) -> Result<Business, ApiError> {
        let mut business = self.get(id)?;
        if business.email != req.email
            && let Some(existing) = self.businesses.get_by_email(&req.email)?
            && existing.id != business.id
        {
            return Err(ApiError::AlreadyExists(
                "a business with this email already exists".into(),
            ));
        }
        business.name = req.name.clone();
        business.email = req.email.clone();
        business.phone = req.phone.clone();
        business.description = req.description.clone();
        business.updated_at = Utc::now();
        self.businesses.update(&business)?;
        Ok(business)
    }

    pub fn update_address(&self, id: EntityId, req: &AddressRequest) -> Result<Business, ApiError> {
        let mut business = self.get(id)?;
        business.address = Address {
            postal_code: req.postal_code.clone(),
            street: req.street.clone(),
            district: req.district.clone(),
            city: req.city.clone(),
            state: req.state.clone(),
            number: req.number.clone(),
            complement: req.complement.clone(),
        };
        business.updated_at = Utc::now();
        self.businesses.update(&business)?;
        Ok(business)
    }

    pub fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        self.businesses.delete(id).map_err(|err| match err {
            crate::store::StoreError::NotFound => ApiError::not_found("business"),
            other => ApiError::Storage(other),
        })
    }

    /// City-scoped search, case-insensitive.
    pub fn find_by_city(&self, city: &str, page: Page) -> Result<Vec<Business>, ApiError> {
        let normalized = city.trim().to_lowercase();
        Ok(self.businesses.find_by_city(&normalized, page)?)
    }

    pub fn list(&self, page: Page) -> Result<Vec<Business>, ApiError> {
        Ok(self.businesses.list(page)?)
    }
}
