//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use petcare_api::domain::{Business, Owner, Pet, Service};
use petcare_api::model::{
    AppointmentCreateRequest, PetCreateRequest, ProcedureCreateRequest, RegisterBusinessRequest,
    RegisterOwnerRequest, ServiceCreateRequest,
};
use petcare_api::{AppState, LogFormat, ServerConfig};

pub const TEST_PASSWORD: &str = "senha-segura";

pub fn test_state() -> Arc<AppState> {
    let config = ServerConfig {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        jwt_secret: "integration-test-secret".into(),
        log_format: LogFormat::Pretty,
    };
    Arc::new(AppState::new(Arc::new(config)))
}

/// Builds registration input through the wire shape, exercising the
/// Portuguese field names the API actually accepts.
pub fn owner_request(email: &str) -> RegisterOwnerRequest {
    serde_json::from_value(json!({
        "nome": "Ana Souza",
        "email": email,
        "password": TEST_PASSWORD,
        "telefone": "11 99999-0000",
        "cep": "80000-000",
        "rua": "Rua das Flores",
        "bairro": "Centro",
        "cidade": "Curitiba",
        "estado": "PR",
        "numero": "100",
    }))
    .unwrap()
}

pub fn business_request(email: &str) -> RegisterBusinessRequest {
    serde_json::from_value(json!({
        "nome": "Bicho Feliz",
        "email": email,
        "password": TEST_PASSWORD,
        "telefone": "11 98888-0000",
        "cep": "80000-001",
        "rua": "Av. Sete de Setembro",
        "bairro": "Batel",
        "cidade": "Curitiba",
        "estado": "PR",
        "numero": "2000",
        "descricao": "banho e tosa",
    }))
    .unwrap()
}

pub fn register_owner(state: &AppState, email: &str) -> Owner {
    state.owners.create(&owner_request(email)).unwrap()
}

pub fn register_business(state: &AppState, email: &str) -> Business {
    state.businesses.create(&business_request(email)).unwrap()
}

pub fn add_pet(state: &AppState, owner: &Owner) -> Pet {
    let req: PetCreateRequest = serde_json::from_value(json!({
        "nome": "Rex",
        "especie": "cachorro",
        "raca": "vira-lata",
        "nascimento": "2020-03-15",
        "dono_id": owner.id.to_string(),
    }))
    .unwrap();
    state.pets.create(&req).unwrap()
}

pub fn add_service(state: &AppState, business: &Business, name: &str, price: f64) -> Service {
    let req: ServiceCreateRequest = serde_json::from_value(json!({
        "nome": name,
        "descricao": "",
        "preco_base": price,
    }))
    .unwrap();
    state.catalog.create(business.id, &req).unwrap()
}

pub fn appointment_request(
    owner: &Owner,
    pet: &Pet,
    business: &Business,
    items: &[(&Service, f64)],
    total: f64,
    scheduled_for: DateTime<Utc>,
) -> AppointmentCreateRequest {
    let items: Vec<_> = items
        .iter()
        .map(|(service, price)| {
            json!({"servico_id": service.id.to_string(), "preco_previsto": price})
        })
        .collect();
    serde_json::from_value(json!({
        "dono_id": owner.id.to_string(),
        "pet_id": pet.id.to_string(),
        "petshop_id": business.id.to_string(),
        "data_agendada": scheduled_for.to_rfc3339(),
        "observacoes": "",
        "total_previsto": total,
        "itens": items,
    }))
    .unwrap()
}

pub fn procedure_request(
    pet: &Pet,
    business: &Business,
    items: &[(&Service, f64)],
    total: f64,
    realized_at: DateTime<Utc>,
) -> ProcedureCreateRequest {
    let items: Vec<_> = items
        .iter()
        .map(|(service, price)| {
            json!({"servico_id": service.id.to_string(), "preco_final": price})
        })
        .collect();
    serde_json::from_value(json!({
        "pet_id": pet.id.to_string(),
        "petshop_id": business.id.to_string(),
        "data_realizacao": realized_at.to_rfc3339(),
        "observacoes": "",
        "total": total,
        "itens": items,
    }))
    .unwrap()
}
