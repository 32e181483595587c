//! Wire-level request and response shapes.
//!
//! The public JSON vocabulary is Portuguese for compatibility with
//! existing clients; Rust-side names are English and mapped with serde
//! renames. Response types are built exclusively through the `project`
//! constructors, which is where redaction happens: no projection ever
//! reads a credential hash, so secrets cannot leak by construction.
//! Timestamps are formatted as RFC 3339 with an explicit UTC offset.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{Claims, Principal, Role};
use crate::domain::{Appointment, Business, Owner, Pet, Procedure, Service};

/// Canonical timestamp encoding used by every response.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// "dono" or "petshop".
    pub user_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expire: String,
}

/// Identity projection returned by login, `/auth/me` and `/profile`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthProfile {
    pub id: String,
    pub email: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub role: Role,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "nota", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl AuthProfile {
    pub fn project(principal: &Principal) -> Self {
        AuthProfile {
            id: principal.id.to_string(),
            email: principal.email.clone(),
            name: principal.name.clone(),
            role: principal.role,
            phone: principal.phone.clone(),
            description: principal.description.clone(),
            rating: principal.rating,
        }
    }

    pub fn from_claims(claims: &Claims) -> Self {
        AuthProfile {
            id: claims.sub.clone(),
            email: claims.email.clone(),
            name: claims.name.clone(),
            role: claims.role,
            phone: claims.phone.clone(),
            description: claims.description.clone(),
            rating: claims.rating,
        }
    }
}

// ---------------------------------------------------------------------------
// Owner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterOwnerRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento", default)]
    pub complement: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerUpdateRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressRequest {
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento", default)]
    pub complement: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerDetail {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento", skip_serializing_if = "String::is_empty")]
    pub complement: String,
    pub created_at: String,
    pub updated_at: String,
}

impl OwnerDetail {
    pub fn project(owner: &Owner) -> Self {
        OwnerDetail {
            id: owner.id.to_string(),
            name: owner.name.clone(),
            email: owner.email.clone(),
            phone: owner.phone.clone(),
            postal_code: owner.address.postal_code.clone(),
            street: owner.address.street.clone(),
            district: owner.address.district.clone(),
            city: owner.address.city.clone(),
            state: owner.address.state.clone(),
            number: owner.address.number.clone(),
            complement: owner.address.complement.clone(),
            created_at: format_timestamp(owner.created_at),
            updated_at: format_timestamp(owner.updated_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Business
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterBusinessRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento", default)]
    pub complement: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusinessUpdateRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BusinessDetail {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento", skip_serializing_if = "String::is_empty")]
    pub complement: String,
    #[serde(rename = "descricao", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "nota")]
    pub rating: f32,
    #[serde(rename = "ativo")]
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl BusinessDetail {
    pub fn project(business: &Business) -> Self {
        BusinessDetail {
            id: business.id.to_string(),
            name: business.name.clone(),
            email: business.email.clone(),
            phone: business.phone.clone(),
            postal_code: business.address.postal_code.clone(),
            street: business.address.street.clone(),
            district: business.address.district.clone(),
            city: business.address.city.clone(),
            state: business.address.state.clone(),
            number: business.address.number.clone(),
            complement: business.address.complement.clone(),
            description: business.description.clone(),
            rating: business.rating,
            active: business.active,
            created_at: format_timestamp(business.created_at),
            updated_at: format_timestamp(business.updated_at),
        }
    }
}

/// Compact shape used by paginated and city-scoped listings.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessSummary {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "nota")]
    pub rating: f32,
    #[serde(rename = "descricao", skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl BusinessSummary {
    pub fn project(business: &Business) -> Self {
        BusinessSummary {
            id: business.id.to_string(),
            name: business.name.clone(),
            city: business.address.city.clone(),
            state: business.address.state.clone(),
            rating: business.rating,
            description: business.description.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PetCreateRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "especie")]
    pub species: String,
    #[serde(rename = "raca")]
    pub breed: String,
    #[serde(rename = "nascimento")]
    pub birth: String,
    #[serde(rename = "dono_id")]
    pub owner_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PetUpdateRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "especie")]
    pub species: String,
    #[serde(rename = "raca")]
    pub breed: String,
    #[serde(rename = "nascimento")]
    pub birth: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PetResponse {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "especie")]
    pub species: String,
    #[serde(rename = "raca")]
    pub breed: String,
    #[serde(rename = "nascimento")]
    pub birth: String,
    #[serde(rename = "dono_id")]
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl PetResponse {
    pub fn project(pet: &Pet) -> Self {
        PetResponse {
            id: pet.id.to_string(),
            name: pet.name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone(),
            birth: pet.birth.clone(),
            owner_id: pet.owner_id.to_string(),
            created_at: format_timestamp(pet.created_at),
            updated_at: format_timestamp(pet.updated_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCreateRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "preco_base")]
    pub base_price: f64,
}

pub type ServiceUpdateRequest = ServiceCreateRequest;

#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse {
    pub id: String,
    #[serde(rename = "petshop_id")]
    pub business_id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "preco_base")]
    pub base_price: f64,
    #[serde(rename = "ativo")]
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl ServiceResponse {
    pub fn project(service: &Service) -> Self {
        ServiceResponse {
            id: service.id.to_string(),
            business_id: service.business_id.to_string(),
            name: service.name.clone(),
            description: service.description.clone(),
            base_price: service.base_price,
            active: service.active,
            created_at: format_timestamp(service.created_at),
            updated_at: format_timestamp(service.updated_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Appointment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentItemRequest {
    #[serde(rename = "servico_id")]
    pub service_id: String,
    #[serde(rename = "preco_previsto")]
    pub agreed_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentCreateRequest {
    #[serde(rename = "dono_id")]
    pub owner_id: String,
    #[serde(rename = "pet_id")]
    pub pet_id: String,
    #[serde(rename = "petshop_id")]
    pub business_id: String,
    /// RFC 3339 encoding of the scheduled instant.
    #[serde(rename = "data_agendada")]
    pub scheduled_for: String,
    #[serde(rename = "observacoes", default)]
    pub notes: String,
    #[serde(rename = "total_previsto")]
    pub declared_total: f64,
    #[serde(rename = "itens")]
    pub items: Vec<AppointmentItemRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentUpdateRequest {
    #[serde(rename = "data_agendada")]
    pub scheduled_for: String,
    #[serde(rename = "observacoes", default)]
    pub notes: String,
    #[serde(rename = "total_previsto")]
    pub declared_total: f64,
    #[serde(rename = "itens")]
    pub items: Vec<AppointmentItemRequest>,
}

/// Status is carried as text and parsed by the service so an unknown
/// value fails with the 400 the API promises, not a body-shape error.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentItemResponse {
    pub id: String,
    #[serde(rename = "servico_id")]
    pub service_id: String,
    #[serde(rename = "nome_servico")]
    pub service_name: String,
    #[serde(rename = "preco_previsto")]
    pub agreed_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentResponse {
    pub id: String,
    #[serde(rename = "dono_id")]
    pub owner_id: String,
    #[serde(rename = "nome_dono")]
    pub owner_name: String,
    #[serde(rename = "pet_id")]
    pub pet_id: String,
    #[serde(rename = "nome_pet")]
    pub pet_name: String,
    #[serde(rename = "petshop_id")]
    pub business_id: String,
    #[serde(rename = "nome_petshop")]
    pub business_name: String,
    #[serde(rename = "data_agendada")]
    pub scheduled_for: String,
    pub status: String,
    #[serde(rename = "observacoes")]
    pub notes: String,
    #[serde(rename = "total_previsto")]
    pub declared_total: f64,
    #[serde(rename = "itens")]
    pub items: Vec<AppointmentItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl AppointmentResponse {
    pub fn project(
        appointment: &Appointment,
        owner_name: &str,
        pet_name: &str,
        business_name: &str,
    ) -> Self {
        AppointmentResponse {
            id: appointment.id.to_string(),
            owner_id: appointment.owner_id.to_string(),
            owner_name: owner_name.to_string(),
            pet_id: appointment.pet_id.to_string(),
            pet_name: pet_name.to_string(),
            business_id: appointment.business_id.to_string(),
            business_name: business_name.to_string(),
            scheduled_for: format_timestamp(appointment.scheduled_for),
            status: appointment.status.to_string(),
            notes: appointment.notes.clone(),
            declared_total: appointment.declared_total,
            items: appointment
                .items
                .iter()
                .map(|item| AppointmentItemResponse {
                    id: item.id.to_string(),
                    service_id: item.service_id.to_string(),
                    service_name: item.service_name.clone(),
                    agreed_price: item.agreed_price,
                })
                .collect(),
            created_at: format_timestamp(appointment.created_at),
            updated_at: format_timestamp(appointment.updated_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Procedure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ProcedureItemRequest {
    #[serde(rename = "servico_id")]
    pub service_id: String,
    #[serde(rename = "preco_final")]
    pub final_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcedureCreateRequest {
    #[serde(rename = "pet_id")]
    pub pet_id: String,
    #[serde(rename = "petshop_id")]
    pub business_id: String,
    #[serde(rename = "data_realizacao")]
    pub realized_at: String,
    #[serde(rename = "observacoes", default)]
    pub notes: String,
    pub total: f64,
    #[serde(rename = "itens")]
    pub items: Vec<ProcedureItemRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcedureItemResponse {
    pub id: String,
    #[serde(rename = "servico_id")]
    pub service_id: String,
    #[serde(rename = "nome_servico")]
    pub service_name: String,
    #[serde(rename = "preco_final")]
    pub final_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcedureResponse {
    pub id: String,
    #[serde(rename = "pet_id")]
    pub pet_id: String,
    #[serde(rename = "nome_pet", skip_serializing_if = "String::is_empty")]
    pub pet_name: String,
    #[serde(rename = "petshop_id")]
    pub business_id: String,
    #[serde(rename = "nome_petshop")]
    pub business_name: String,
    #[serde(rename = "data_realizacao")]
    pub realized_at: String,
    #[serde(rename = "observacoes", skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub total: f64,
    #[serde(rename = "itens")]
    pub items: Vec<ProcedureItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl ProcedureResponse {
    pub fn project(procedure: &Procedure, pet_name: &str) -> Self {
        ProcedureResponse {
            id: procedure.id.to_string(),
            pet_id: procedure.pet_id.to_string(),
            pet_name: pet_name.to_string(),
            business_id: procedure.business_id.to_string(),
            business_name: procedure.business_name.clone(),
            realized_at: format_timestamp(procedure.realized_at),
            notes: procedure.notes.clone(),
            total: procedure.total,
            items: procedure
                .items
                .iter()
                .map(|item| ProcedureItemResponse {
                    id: item.id.to_string(),
                    service_id: item.service_id.to_string(),
                    service_name: item.service_name.clone(),
                    final_price: item.final_price,
                })
                .collect(),
            created_at: format_timestamp(procedure.created_at),
            updated_at: format_timestamp(procedure.updated_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing query parameters
// ---------------------------------------------------------------------------

/// Query parameters accepted by `GET /petshops`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessListQuery {
    #[serde(rename = "cidade")]
    pub city: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters accepted by `GET /petshops/{id}/agendamentos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentListQuery {
    /// When true, only upcoming non-cancelled appointments are returned.
    #[serde(rename = "futuros", default)]
    pub upcoming: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, EntityId};
    use chrono::TimeZone;

    #[test]
    fn timestamps_use_rfc3339_with_utc_offset() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 9, 14, 30, 5).unwrap();
        assert_eq!(format_timestamp(ts), "2025-03-09T14:30:05Z");
    }

    #[test]
    fn owner_projection_redacts_the_credential_hash() {
        let now = Utc::now();
        let owner = Owner {
            id: EntityId::generate(),
            name: "Ana".into(),
            email: "ana@x.com".into(),
            phone: "11 99999-0000".into(),
            address: Address::default(),
            password_hash: "$2b$12$secret-digest".into(),
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&OwnerDetail::project(&owner)).unwrap();
        assert!(!json.contains("secret-digest"));
        assert!(!json.to_lowercase().contains("password"));
        assert!(json.contains("\"nome\":\"Ana\""));
    }

    #[test]
    fn business_projection_uses_portuguese_field_names() {
        let now = Utc::now();
        let business = Business {
            id: EntityId::generate(),
            name: "Bicho Feliz".into(),
            email: "shop@x.com".into(),
            phone: "11 98888-0000".into(),
            address: Address {
                city: "Curitiba".into(),
                state: "PR".into(),
                ..Address::default()
            },
            description: "banho e tosa".into(),
            rating: 4.5,
            active: true,
            password_hash: "digest".into(),
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(BusinessDetail::project(&business)).unwrap();
        assert_eq!(json["nome"], "Bicho Feliz");
        assert_eq!(json["cidade"], "Curitiba");
        assert_eq!(json["ativo"], true);
        assert!(json.get("password_hash").is_none());
    }
}
