//! Pet management.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{EntityId, Pet};
use crate::error::ApiError;
use crate::model::{PetCreateRequest, PetUpdateRequest};
use crate::store::{OwnerStore, PetStore, StoreError};

pub struct PetService {
    pets: Arc<dyn PetStore>,
    owners: Arc<dyn OwnerStore>,
}

impl PetService {
    pub fn new(pets: Arc<dyn PetStore>, owners: Arc<dyn OwnerStore>) -> Self {
        PetService { pets, owners }
    }

    /// Creates a pet for an existing owner. The owner relationship is set
    /// once here and never changes afterwards.
    pub fn create(&self, req: &PetCreateRequest) -> Result<Pet, ApiError> {
        let owner_id: EntityId = req
            .owner_id
            .parse()
            .map_err(|_| ApiError::invalid_id("owner"))?;
        self.owners.get(owner_id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("owner"),
            other => ApiError::Storage(other),
        })?;

        let now = Utc::now();
        let pet = Pet {
            id: EntityId::generate(),
            name: req.name.clone(),
            species: req.species.clone(),
            breed: req.breed.clone(),
            birth: req.birth.clone(),
            owner_id,
            created_at: now,
            updated_at: now,
        };
        self.pets.create(&pet)?;
        Ok(pet)
    }

    pub fn get(&self, id: EntityId) -> Result<Pet, ApiError> {
        self.pets.get(id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("pet"),
            other => ApiError::Storage(other),
        })
    }

    pub fn update(&self, id: EntityId, req: &PetUpdateRequest) -> Result<Pet, ApiError> {
        let mut pet = self.get(id)?;
        pet.name = req.name.clone();
        pet.species = req.species.clone();
        pet.breed = req.breed.clone();
        pet.birth = req.birth.clone();
        pet.updated_at = Utc::now();
        self.pets.update(&pet)?;
        Ok(pet)
    }

    pub fn list_by_owner(&self, owner_id: EntityId) -> Result<Vec<Pet>, ApiError> {
        self.owners.get(owner_id).map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found("owner"),
            other => ApiError::Storage(other),
        })?;
        Ok(self.pets.get_by_owner(owner_id)?)
    }
}
