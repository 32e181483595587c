//! In-memory storage backend.
//!
//! Each entity kind lives in its own `RwLock`-guarded map, giving the same
//! visibility guarantees the service layer would get from a relational
//! backend with row-level reads: writers take the lock for the whole
//! mutation, so an appointment's item collection is always observed either
//! fully old or fully new.

use parking_lot::RwLock;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{
    Appointment, AppointmentStatus, Business, EntityId, Owner, Pet, Procedure, Service,
};
use crate::store::{
    AppointmentStore, BusinessStore, OwnerStore, Page, PetStore, ProcedureStore, ServiceStore,
    StoreError, StoreResult,
};

/// Process-local store backing every repository trait.
#[derive(Default)]
pub struct MemoryStore {
    owners: RwLock<HashMap<EntityId, Owner>>,
    businesses: RwLock<HashMap<EntityId, Business>>,
    pets: RwLock<HashMap<EntityId, Pet>>,
    services: RwLock<HashMap<EntityId, Service>>,
    appointments: RwLock<HashMap<EntityId, Appointment>>,
    procedures: RwLock<HashMap<EntityId, Procedure>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paginate<T>(mut rows: Vec<T>, page: Page) -> Vec<T> {
    let offset = page.offset();
    if offset >= rows.len() {
        return Vec::new();
    }
    rows.drain(..offset);
    rows.truncate(page.limit as usize);
    rows
}

impl OwnerStore for MemoryStore {
    fn create(&self, owner: &Owner) -> StoreResult<()> {
        self.owners.write().insert(owner.id, owner.clone());
        Ok(())
    }

    fn get(&self, id: EntityId) -> StoreResult<Owner> {
        self.owners
            .read()
            .get(&id)
            .filter(|o| !o.deleted)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn get_by_email(&self, email: &str) -> StoreResult<Option<Owner>> {
        Ok(self
            .owners
            .read()
            .values()
            .find(|o| !o.deleted && o.email == email)
            .cloned())
    }

    fn update(&self, owner: &Owner) -> StoreResult<()> {
        let mut owners = self.owners.write();
        match owners.get(&owner.id) {
            Some(existing) if !existing.deleted => {
                owners.insert(owner.id, owner.clone());
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }

    fn delete(&self, id: EntityId) -> StoreResult<()> {
        let mut owners = self.owners.write();
        match owners.get_mut(&id) {
            Some(owner) if !owner.deleted => {
                owner.deleted = true;
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }
}

impl BusinessStore for MemoryStore {
    fn create(&self, business: &Business) -> StoreResult<()> {
        self.businesses.write().insert(business.id, business.clone());
        Ok(())
    }

    fn get(&self, id: EntityId) -> StoreResult<Business> {
        self.businesses
            .read()
            .get(&id)
            .filter(|b| !b.deleted)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn get_by_email(&self, email: &str) -> StoreResult<Option<Business>> {
        Ok(self
            .businesses
            .read()
            .values()
            .find(|b| !b.deleted && b.email == email)
            .cloned())
    }

    fn update(&self, business: &Business) -> StoreResult<()> {
        let mut businesses = self.businesses.write();
        match businesses.get(&business.id) {
            Some(existing) if !existing.deleted => {
                businesses.insert(business.id, business.clone());
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }

    fn delete(&self, id: EntityId) -> StoreResult<()> {
        let mut businesses = self.businesses.write();
        match businesses.get_mut(&id) {
            Some(business) if !business.deleted => {
                business.deleted = true;
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }

    fn find_by_city(&self, city: &str, page: Page) -> StoreResult<Vec<Business>> {
        let needle = city.trim().to_lowercase();
        let mut rows: Vec<Business> = self
            .businesses
            .read()
            .values()
            .filter(|b| !b.deleted && b.address.city.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(rows, page))
    }

    fn list(&self, page: Page) -> StoreResult<Vec<Business>> {
        let mut rows: Vec<Business> = self
            .businesses
            .read()
            .values()
            .filter(|b| !b.deleted)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(rows, page))
    }
}

impl PetStore for MemoryStore {
    fn create(&self, pet: &Pet) -> StoreResult<()> {
        self.pets.write().insert(pet.id, pet.clone());
        Ok(())
    }

    fn get(&self, id: EntityId) -> StoreResult<Pet> {
        self.pets
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn update(&self, pet: &Pet) -> StoreResult<()> {
        let mut pets = self.pets.write();
        if !pets.contains_key(&pet.id) {
            return Err(StoreError::NotFound);
        }
        pets.insert(pet.id, pet.clone());
        Ok(())
    }

    fn get_by_owner(&self, owner_id: EntityId) -> StoreResult<Vec<Pet>> {
        let mut rows: Vec<Pet> = self
            .pets
            .read()
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }
}

impl ServiceStore for MemoryStore {
    fn create(&self, service: &Service) -> StoreResult<()> {
        self.services.write().insert(service.id, service.clone());
        Ok(())
    }

    fn get(&self, id: EntityId) -> StoreResult<Service> {
        self.services
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn update(&self, service: &Service) -> StoreResult<()> {
        let mut services = self.services.write();
        if !services.contains_key(&service.id) {
            return Err(StoreError::NotFound);
        }
        services.insert(service.id, service.clone());
        Ok(())
    }

    fn get_by_business(&self, business_id: EntityId) -> StoreResult<Vec<Service>> {
        let mut rows: Vec<Service> = self
            .services
            .read()
            .values()
            .filter(|s| s.business_id == business_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    fn get_by_name(&self, business_id: EntityId, name: &str) -> StoreResult<Option<Service>> {
        Ok(self
            .services
            .read()
            .values()
            .find(|s| s.business_id == business_id && s.name == name)
            .cloned())
    }
}

impl AppointmentStore for MemoryStore {
    fn create(&self, appointment: &Appointment) -> StoreResult<()> {
        self.appointments
            .write()
            .insert(appointment.id, appointment.clone());
        Ok(())
    }

    fn get(&self, id: EntityId) -> StoreResult<Appointment> {
        self.appointments
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn update(&self, appointment: &Appointment) -> StoreResult<()> {
        let mut appointments = self.appointments.write();
        if !appointments.contains_key(&appointment.id) {
            return Err(StoreError::NotFound);
        }
        // Whole-record swap under one write lock: the item collection is
        // replaced together with its parent or not at all.
        appointments.insert(appointment.id, appointment.clone());
        Ok(())
    }

    fn update_status(&self, id: EntityId, status: AppointmentStatus) -> StoreResult<()> {
        let mut appointments = self.appointments.write();
        match appointments.get_mut(&id) {
            Some(appointment) => {
                appointment.status = status;
                appointment.updated_at = Utc::now();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn get_by_owner(&self, owner_id: EntityId) -> StoreResult<Vec<Appointment>> {
        let mut rows: Vec<Appointment> = self
            .appointments
            .read()
            .values()
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.scheduled_for.cmp(&a.scheduled_for));
        Ok(rows)
    }

    fn get_by_business(&self, business_id: EntityId) -> StoreResult<Vec<Appointment>> {
        let mut rows: Vec<Appointment> = self
            .appointments
            .read()
            .values()
            .filter(|a| a.business_id == business_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.scheduled_for.cmp(&a.scheduled_for));
        Ok(rows)
    }

    fn upcoming_by_business(
        &self,
        business_id: EntityId,
        after: DateTime<Utc>,
    ) -> StoreResult<Vec<Appointment>> {
        let mut rows: Vec<Appointment> = self
            .appointments
            .read()
            .values()
            .filter(|a| {
                a.business_id == business_id
                    && a.scheduled_for > after
                    && a.status != AppointmentStatus::Cancelled
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.scheduled_for.cmp(&b.scheduled_for));
        Ok(rows)
    }
}

impl ProcedureStore for MemoryStore {
    fn create(&self, procedure: &Procedure) -> StoreResult<()> {
        self.procedures
            .write()
            .insert(procedure.id, procedure.clone());
        Ok(())
    }

    fn get_by_pet(&self, pet_id: EntityId) -> StoreResult<Vec<Procedure>> {
        let mut rows: Vec<Procedure> = self
            .procedures
            .read()
            .values()
            .filter(|p| p.pet_id == pet_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.realized_at.cmp(&a.realized_at));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, AppointmentItem};
    use chrono::Duration;

    fn owner(email: &str) -> Owner {
        let now = Utc::now();
        Owner {
            id: EntityId::generate(),
            name: "Ana".into(),
            email: email.into(),
            phone: "11 99999-0000".into(),
            address: Address::default(),
            password_hash: "hash".into(),
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn business(city: &str) -> Business {
        let now = Utc::now();
        Business {
            id: EntityId::generate(),
            name: "Bicho Feliz".into(),
            email: format!("{city}@shop.com"),
            phone: "11 98888-0000".into(),
            address: Address {
                city: city.into(),
                ..Address::default()
            },
            description: String::new(),
            rating: 0.0,
            active: true,
            password_hash: "hash".into(),
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn appointment(business_id: EntityId, offset_hours: i64) -> Appointment {
        let now = Utc::now();
        Appointment {
            id: EntityId::generate(),
            owner_id: EntityId::generate(),
            pet_id: EntityId::generate(),
            business_id,
            scheduled_for: now + Duration::hours(offset_hours),
            status: AppointmentStatus::Pending,
            notes: String::new(),
            declared_total: 50.0,
            items: vec![AppointmentItem {
                id: EntityId::generate(),
                service_id: EntityId::generate(),
                service_name: "Banho".into(),
                agreed_price: 50.0,
            }],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn soft_deleted_owners_are_invisible() {
        let store = MemoryStore::new();
        let o = owner("ana@x.com");
        OwnerStore::create(&store, &o).unwrap();

        OwnerStore::delete(&store, o.id).unwrap();
        assert_eq!(
            OwnerStore::get(&store, o.id).unwrap_err(),
            StoreError::NotFound
        );
        assert!(OwnerStore::get_by_email(&store, "ana@x.com")
            .unwrap()
            .is_none());
        // A second delete no longer finds the row.
        assert_eq!(OwnerStore::delete(&store, o.id), Err(StoreError::NotFound));
    }

    #[test]
    fn email_lookup_distinguishes_absent_from_error() {
        let store = MemoryStore::new();
        assert!(OwnerStore::get_by_email(&store, "nobody@x.com")
            .unwrap()
            .is_none());
    }

    #[test]
    fn city_search_is_case_insensitive_and_paginated() {
        let store = MemoryStore::new();
        for _ in 0..3 {
            BusinessStore::create(&store, &business("Curitiba")).unwrap();
        }
        BusinessStore::create(&store, &business("Salvador")).unwrap();

        let hits = store.find_by_city("curitiba", Page::new(1, 2)).unwrap();
        assert_eq!(hits.len(), 2);
        let rest = store.find_by_city("CURITIBA", Page::new(2, 2)).unwrap();
        assert_eq!(rest.len(), 1);
        assert!(store.find_by_city("recife", Page::default()).unwrap().is_empty());
    }

    #[test]
    fn appointment_update_replaces_items_wholesale() {
        let store = MemoryStore::new();
        let business_id = EntityId::generate();
        let mut ap = appointment(business_id, 2);
        AppointmentStore::create(&store, &ap).unwrap();

        ap.items = vec![AppointmentItem {
            id: EntityId::generate(),
            service_id: EntityId::generate(),
            service_name: "Tosa".into(),
            agreed_price: 80.0,
        }];
        ap.declared_total = 80.0;
        AppointmentStore::update(&store, &ap).unwrap();

        let stored = AppointmentStore::get(&store, ap.id).unwrap();
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].service_name, "Tosa");
    }

    #[test]
    fn upcoming_filter_drops_cancelled_and_past() {
        let store = MemoryStore::new();
        let business_id = EntityId::generate();
        let past = appointment(business_id, -2);
        let future = appointment(business_id, 2);
        let mut cancelled = appointment(business_id, 4);
        cancelled.status = AppointmentStatus::Cancelled;
        for a in [&past, &future, &cancelled] {
            AppointmentStore::create(&store, a).unwrap();
        }

        let upcoming = store
            .upcoming_by_business(business_id, Utc::now())
            .unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, future.id);
    }
}
