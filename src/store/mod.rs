//! Storage collaborator contracts.
//!
//! The service layer only ever sees these traits. The contract mirrors a
//! relational backend: `get` fails with [`StoreError::NotFound`], email
//! lookups distinguish "absent" (`Ok(None)`) from lookup failure, and
//! soft-deleted rows are invisible to every read. The default backend is
//! the in-memory [`MemoryStore`]; swapping in a database-backed
//! implementation only requires implementing these traits.

mod memory;

pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    Appointment, AppointmentStatus, Business, EntityId, Owner, Pet, Procedure, Service,
};

/// Opaque storage failure. Services translate `NotFound` into the API
/// taxonomy and pass everything else through as a 500.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 1-based pagination window with the normalization rules of the API:
/// a page at or below zero becomes 1, a limit outside (0, 100] becomes 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(number: i64, limit: i64) -> Self {
        let number = if number <= 0 { 1 } else { number as u32 };
        let limit = if limit <= 0 || limit > i64::from(Self::MAX_LIMIT) {
            Self::DEFAULT_LIMIT
        } else {
            limit as u32
        };
        Page { number, limit }
    }

    pub fn offset(&self) -> usize {
        (self.number as usize - 1) * self.limit as usize
    }
}

impl Default for Page {
    fn default() -> Self {
        Page {
            number: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

pub trait OwnerStore: Send + Sync {
    fn create(&self, owner: &Owner) -> StoreResult<()>;
    fn get(&self, id: EntityId) -> StoreResult<Owner>;
    /// `Ok(None)` means "no such email"; `Err` is a genuine lookup failure.
    fn get_by_email(&self, email: &str) -> StoreResult<Option<Owner>>;
    fn update(&self, owner: &Owner) -> StoreResult<()>;
    /// Marks the record deleted; subsequent reads no longer see it.
    fn delete(&self, id: EntityId) -> StoreResult<()>;
}

pub trait BusinessStore: Send + Sync {
    fn create(&self, business: &Business) -> StoreResult<()>;
    fn get(&self, id: EntityId) -> StoreResult<Business>;
    fn get_by_email(&self, email: &str) -> StoreResult<Option<Business>>;
    fn update(&self, business: &Business) -> StoreResult<()>;
    fn delete(&self, id: EntityId) -> StoreResult<()>;
    /// Case-insensitive substring match on the city column.
    fn find_by_city(&self, city: &str, page: Page) -> StoreResult<Vec<Business>>;
    fn list(&self, page: Page) -> StoreResult<Vec<Business>>;
}

pub trait PetStore: Send + Sync {
    fn create(&self, pet: &Pet) -> StoreResult<()>;
    fn get(&self, id: EntityId) -> StoreResult<Pet>;
    fn update(&self, pet: &Pet) -> StoreResult<()>;
    fn get_by_owner(&self, owner_id: EntityId) -> StoreResult<Vec<Pet>>;
}

pub trait ServiceStore: Send + Sync {
    fn create(&self, service: &Service) -> StoreResult<()>;
    /// Returns the record regardless of its active flag; activity checks
    /// belong to the callers that care.
    fn get(&self, id: EntityId) -> StoreResult<Service>;
    fn update(&self, service: &Service) -> StoreResult<()>;
    fn get_by_business(&self, business_id: EntityId) -> StoreResult<Vec<Service>>;
    /// Name uniqueness is scoped per business, so the lookup is too.
    fn get_by_name(&self, business_id: EntityId, name: &str) -> StoreResult<Option<Service>>;
}

pub trait AppointmentStore: Send + Sync {
    /// Persists the appointment together with its items as one unit.
    fn create(&self, appointment: &Appointment) -> StoreResult<()>;
    fn get(&self, id: EntityId) -> StoreResult<Appointment>;
    /// Replaces the stored record wholesale, items included. The swap is
    /// atomic: concurrent readers never observe a half-replaced item set.
    fn update(&self, appointment: &Appointment) -> StoreResult<()>;
    fn update_status(&self, id: EntityId, status: AppointmentStatus) -> StoreResult<()>;
    /// Sorted by scheduled date, newest first.
    fn get_by_owner(&self, owner_id: EntityId) -> StoreResult<Vec<Appointment>>;
    fn get_by_business(&self, business_id: EntityId) -> StoreResult<Vec<Appointment>>;
    /// Non-cancelled appointments scheduled strictly after `after`,
    /// soonest first.
    fn upcoming_by_business(
        &self,
        business_id: EntityId,
        after: DateTime<Utc>,
    ) -> StoreResult<Vec<Appointment>>;
}

pub trait ProcedureStore: Send + Sync {
    fn create(&self, procedure: &Procedure) -> StoreResult<()>;
    fn get_by_pet(&self, pet_id: EntityId) -> StoreResult<Vec<Procedure>>;
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn page_normalization() {
        assert_eq!(Page::new(0, 10), Page::new(1, 10));
        assert_eq!(Page::new(-3, 10).number, 1);
        assert_eq!(Page::new(2, 0).limit, Page::DEFAULT_LIMIT);
        assert_eq!(Page::new(2, -1).limit, Page::DEFAULT_LIMIT);
        assert_eq!(Page::new(2, 101).limit, Page::DEFAULT_LIMIT);
        assert_eq!(Page::new(2, 100).limit, 100);
        assert_eq!(Page::new(3, 25).offset(), 50);
    }
}
