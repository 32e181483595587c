//! Credential authentication for both principal kinds.

use std::sync::Arc;

use crate::auth::{Principal, password};
use crate::error::ApiError;
use crate::store::{BusinessStore, OwnerStore};

pub struct AuthService {
    owners: Arc<dyn OwnerStore>,
    businesses: Arc<dyn BusinessStore>,
}

impl AuthService {
    pub fn new(owners: Arc<dyn OwnerStore>, businesses: Arc<dyn BusinessStore>) -> Self {
        AuthService { owners, businesses }
    }

    /// Authenticates an owner by email and password. Unknown email and
    /// wrong password are indistinguishable to the caller.
    pub fn authenticate_owner(&self, email: &str, password: &str) -> Result<Principal, ApiError> {
        let owner = self
            .owners
            .get_by_email(email)?
            .ok_or_else(|| ApiError::Unauthorized("invalid credentials".into()))?;
        if !password::verify_password(&owner.password_hash, password) {
            return Err(ApiError::Unauthorized("invalid credentials".into()));
        }
        Ok(Principal::from_owner(&owner))
    }

    /// Authenticates a business by email and password.
    pub fn authenticate_business(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Principal, ApiError> {
        let business = self
            .businesses
            .get_by_email(email)?
            .ok_or_else(|| ApiError::Unauthorized("invalid credentials".into()))?;
        if !password::verify_password(&business.password_hash, password) {
            return Err(ApiError::Unauthorized("invalid credentials".into()));
        }
        Ok(Principal::from_business(&business))
    }
}
