//! Owner account management.

use std::sync::Arc;

use chrono::Utc;

use crate::auth::password;
use crate::domain::{Address, EntityId, Owner};
use crate::error::ApiError;
use crate::model::{AddressRequest, OwnerUpdateRequest, RegisterOwnerRequest};
use crate::store::OwnerStore;

pub struct OwnerService {
    owners: Arc<dyn OwnerStore>,
}

impl OwnerService {
    pub fn new(owners: Arc<dyn OwnerStore>) -> Self {
        OwnerService { owners }
    }

    /// Registers a new owner. The email must be unused; the credential is
    /// hashed before the entity ever exists.
    pub fn create(&self, req: &RegisterOwnerRequest) -> Result<Owner, ApiError> {
        if self.owners.get_by_email(&req.email)?.is_some() {
            return Err(ApiError::AlreadyExists(
                "an owner with this email already exists".into(),
            ));
        }
        let password_hash = password::hash_password(&req.password)?;
        let now = Utc::now();
        let owner = Owner {
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
            password_hash,
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.owners.create(&owner)?;
        Ok(owner)
    }

    pub fn get(&self, id: EntityId) -> Result<Owner, ApiError> {
        self.owners.get(id).map_err(|err| match err {
            crate::store::StoreError::NotFound => ApiError::not_found("owner"),
            other => ApiError::Storage(other),
        })
    }

    /// Updates the basic profile. The email collision check only runs
    /// when the email actually changes, and ignores the owner's own row.
    pub fn update(&self, id: EntityId, req: &OwnerUpdateRequest) -> Result<Owner, ApiError> {
        let mut owner = self.get(id)?;
        if owner.email != req.email
            && let Some(existing) = self.owners.get_by_email(&req.email)?
            && existing.id != owner.id
        {
            return Err(ApiError::AlreadyExists(
                "an owner with this email already exists".into(),
            ));
        }
        owner.name = req.name.clone();
        owner.email = req.email.clone();
        owner.phone = req.phone.clone();
        owner.updated_at = Utc::now();
        self.owners.update(&owner)?;
        Ok(owner)
    }

    pub fn update_location(&self, id: EntityId, req: &AddressRequest) -> Result<Owner, ApiError> {
        let mut owner = self.get(id)?;
        owner.address = Address {
            postal_code: req.postal_code.clone(),
            street: req.street.clone(),
            district: req.district.clone(),
            city: req.city.clone(),
            state: req.state.clone(),
            number: req.number.clone(),
            complement: req.complement.clone(),
        };
        owner.updated_at = Utc::now();
        self.owners.update(&owner)?;
        Ok(owner)
    }

    /// Soft delete; the account disappears from every lookup but the row
    /// is retained.
    pub fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        self.owners.delete(id).map_err(|err| match err {
            crate::store::StoreError::NotFound => ApiError::not_found("owner"),
            other => ApiError::Storage(other),
        })
    }
}
