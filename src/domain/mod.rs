//! Domain entities.
//!
//! Plain data carried between the service layer and the storage
//! collaborator. Entities never serialize directly onto the wire; the
//! response projections in [`crate::model`] decide what leaves the
//! process, which is how credential hashes stay internal.

mod id;
mod status;

pub use id::{EntityId, IdParseError};
pub use status::AppointmentStatus;

use chrono::{DateTime, Utc};

/// Postal address shared by owners and businesses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub postal_code: String,
    pub street: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub number: String,
    pub complement: String,
}

/// A pet-owning customer account.
#[derive(Debug, Clone)]
pub struct Owner {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    /// bcrypt digest; redacted by every projection.
    pub password_hash: String,
    /// Soft-delete marker checked by every store read.
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A service-providing merchant account.
#[derive(Debug, Clone)]
pub struct Business {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub description: String,
    pub rating: f32,
    pub active: bool,
    pub password_hash: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A pet registered by an owner. The owner relationship is immutable.
#[derive(Debug, Clone)]
pub struct Pet {
    pub id: EntityId,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub birth: String,
    pub owner_id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A priced offering owned by a business. Deletion deactivates instead of
/// removing, so historical records keep resolving.
#[derive(Debug, Clone)]
pub struct Service {
    pub id: EntityId,
    pub business_id: EntityId,
    pub name: String,
    pub description: String,
    pub base_price: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item inside an appointment, snapshotting the service name and
/// the agreed price at booking time.
#[derive(Debug, Clone)]
pub struct AppointmentItem {
    pub id: EntityId,
    pub service_id: EntityId,
    pub service_name: String,
    pub agreed_price: f64,
}

/// A future-dated booking of services for a pet at a business.
///
/// Invariants enforced by the appointment service: the declared total
/// equals the sum of item prices exactly, the pet belongs to the owner,
/// and every item's service belongs to the business and is active.
#[derive(Debug, Clone)]
pub struct Appointment {
    pub id: EntityId,
    pub owner_id: EntityId,
    pub pet_id: EntityId,
    pub business_id: EntityId,
    pub scheduled_for: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: String,
    pub declared_total: f64,
    pub items: Vec<AppointmentItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item inside a procedure record, with the final charged price.
#[derive(Debug, Clone)]
pub struct ProcedureItem {
    pub id: EntityId,
    pub service_id: EntityId,
    pub service_name: String,
    pub final_price: f64,
}

/// Immutable record of services already rendered to a pet.
#[derive(Debug, Clone)]
pub struct Procedure {
    pub id: EntityId,
    pub pet_id: EntityId,
    pub business_id: EntityId,
    /// Snapshot of the business name at record time.
    pub business_name: String,
    pub realized_at: DateTime<Utc>,
    pub notes: String,
    pub total: f64,
    pub items: Vec<ProcedureItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
