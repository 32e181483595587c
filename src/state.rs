//! Application state.
//!
//! Everything a handler needs is built once here and injected through
//! axum's state mechanism: the store handles, the services wired on top
//! of them and the token issuer. There is deliberately no process-global
//! registry; ownership predicates receive their store through this struct.

use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::config::ServerConfig;
use crate::services::{
    AppointmentService, AuthService, BusinessService, CatalogService, OwnerService, PetService,
    ProcedureService,
};
use crate::store::{AppointmentStore, MemoryStore, PetStore, ServiceStore};

pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub tokens: TokenIssuer,
    pub auth: AuthService,
    pub owners: OwnerService,
    pub businesses: BusinessService,
    pub pets: PetService,
    pub catalog: CatalogService,
    pub appointments: AppointmentService,
    pub procedures: ProcedureService,
    pet_store: Arc<dyn PetStore>,
    service_store: Arc<dyn ServiceStore>,
    appointment_store: Arc<dyn AppointmentStore>,
}

impl AppState {
    /// Wires the full service graph over a fresh in-memory store.
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let tokens = TokenIssuer::new(config.jwt_secret.as_bytes());

        AppState {
            tokens,
            auth: AuthService::new(store.clone(), store.clone()),
            owners: OwnerService::new(store.clone()),
            businesses: BusinessService::new(store.clone()),
            pets: PetService::new(store.clone(), store.clone()),
            catalog: CatalogService::new(store.clone(), store.clone()),
            appointments: AppointmentService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
            ),
            procedures: ProcedureService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
            ),
            pet_store: store.clone(),
            service_store: store.clone(),
            appointment_store: store,
            config,
        }
    }

    /// Store handle used by the pet ownership predicate.
    pub fn pet_store(&self) -> &dyn PetStore {
        self.pet_store.as_ref()
    }

    /// Store handle used by the service ownership predicate.
    pub fn service_store(&self) -> &dyn ServiceStore {
        self.service_store.as_ref()
    }

    /// Store handle used by the appointment ownership predicate.
    pub fn appointment_store(&self) -> &dyn AppointmentStore {
        self.appointment_store.as_ref()
    }
}
