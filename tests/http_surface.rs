//! Router-level coverage: drives the axum router directly with
//! `tower::ServiceExt::oneshot`, exercising routes, status codes, the
//! Portuguese wire vocabulary and the booking scenario end to end.

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use common::test_state;
use petcare_api::build_router;

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn owner_body(email: &str) -> Value {
    json!({
        "nome": "Ana Souza",
        "email": email,
        "password": "senha-segura",
        "telefone": "11 99999-0000",
        "cep": "80000-000",
        "rua": "Rua das Flores",
        "bairro": "Centro",
        "cidade": "Curitiba",
        "estado": "PR",
        "numero": "100",
    })
}

fn business_body(email: &str) -> Value {
    json!({
        "nome": "Bicho Feliz",
        "email": email,
        "password": "senha-segura",
        "telefone": "11 98888-0000",
        "cep": "80000-001",
        "rua": "Av. Sete de Setembro",
        "bairro": "Batel",
        "cidade": "Curitiba",
        "estado": "PR",
        "numero": "2000",
        "descricao": "banho e tosa",
    })
}

async fn login(app: &Router, email: &str, user_type: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": "senha-segura", "user_type": user_type})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let app = build_router(test_state());
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn protected_routes_reject_missing_and_bad_tokens() {
    let app = build_router(test_state());

    let (status, _) = send(&app, "GET", "/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/profile", Some("garbage-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "POST", "/pets", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registration_returns_201_and_never_echoes_credentials() {
    let app = build_router(test_state());

    let (status, body) = send(&app, "POST", "/donos", None, Some(owner_body("ana@x.com"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["nome"], "Ana Souza");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // Duplicate email conflicts.
    let (status, _) = send(&app, "POST", "/donos", None, Some(owner_body("ana@x.com"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Malformed body is a 400, not a 422.
    let (status, _) = send(&app, "POST", "/donos", None, Some(json!({"nome": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_issues_a_usable_token() {
    let app = build_router(test_state());
    send(&app, "POST", "/donos", None, Some(owner_body("ana@x.com"))).await;

    let token = login(&app, "ana@x.com", "dono").await;
    let (status, body) = send(&app, "GET", "/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ana@x.com");
    assert_eq!(body["tipo"], "dono");

    // Wrong password never issues a token.
    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "ana@x.com", "password": "errada", "user_type": "dono"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn owners_cannot_touch_each_others_profiles() {
    let app = build_router(test_state());
    let (_, ana) = send(&app, "POST", "/donos", None, Some(owner_body("ana@x.com"))).await;
    send(&app, "POST", "/donos", None, Some(owner_body("bia@x.com"))).await;

    let bia_token = login(&app, "bia@x.com", "dono").await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/donos/{}", ana["id"].as_str().unwrap()),
        Some(&bia_token),
        Some(json!({"nome": "Hacked", "email": "ana@x.com", "telefone": "0"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn business_listing_is_public_and_city_scoped() {
    let app = build_router(test_state());
    send(
        &app,
        "POST",
        "/petshops",
        None,
        Some(business_body("shop@x.com")),
    )
    .await;

    let (status, body) = send(&app, "GET", "/petshops", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, hits) = send(&app, "GET", "/petshops?cidade=curitiba", None, None).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    let (_, misses) = send(&app, "GET", "/petshops?cidade=recife", None, None).await;
    assert_eq!(misses.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn full_booking_scenario_over_http() {
    let app = build_router(test_state());

    // Owner and business accounts.
    let (_, owner) = send(&app, "POST", "/donos", None, Some(owner_body("ana@x.com"))).await;
    let (_, business) = send(
        &app,
        "POST",
        "/petshops",
        None,
        Some(business_body("shop@x.com")),
    )
    .await;
    let owner_id = owner["id"].as_str().unwrap().to_string();
    let business_id = business["id"].as_str().unwrap().to_string();

    let owner_token = login(&app, "ana@x.com", "dono").await;
    let business_token = login(&app, "shop@x.com", "petshop").await;

    // The business publishes a service; only the business itself may.
    let service_body = json!({"nome": "Banho", "descricao": "", "preco_base": 50.0});
    let (status, _) = send(
        &app,
        "POST",
        &format!("/petshops/{business_id}/servicos"),
        Some(&owner_token),
        Some(service_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, service) = send(
        &app,
        "POST",
        &format!("/petshops/{business_id}/servicos"),
        Some(&business_token),
        Some(service_body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let service_id = service["id"].as_str().unwrap().to_string();

    // The owner registers a pet.
    let (status, pet) = send(
        &app,
        "POST",
        "/pets",
        Some(&owner_token),
        Some(json!({
            "nome": "Rex",
            "especie": "cachorro",
            "raca": "vira-lata",
            "nascimento": "2020-03-15",
            "dono_id": owner_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let pet_id = pet["id"].as_str().unwrap().to_string();

    // Booking with a mismatched total fails with a 400.
    let scheduled = (Utc::now() + Duration::hours(1)).to_rfc3339();
    let (status, _) = send(
        &app,
        "POST",
        "/agendamentos",
        Some(&owner_token),
        Some(json!({
            "dono_id": owner_id,
            "pet_id": pet_id,
            "petshop_id": business_id,
            "data_agendada": scheduled,
            "total_previsto": 100.0,
            "itens": [{"servico_id": service_id, "preco_previsto": 90.0}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A consistent booking succeeds and starts pending.
    let (status, appointment) = send(
        &app,
        "POST",
        "/agendamentos",
        Some(&owner_token),
        Some(json!({
            "dono_id": owner_id,
            "pet_id": pet_id,
            "petshop_id": business_id,
            "data_agendada": scheduled,
            "total_previsto": 50.0,
            "itens": [{"servico_id": service_id, "preco_previsto": 50.0}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(appointment["status"], "pendente");
    let appointment_id = appointment["id"].as_str().unwrap().to_string();

    // Both parties can read it; strangers cannot.
    let (status, _) = send(
        &app,
        "GET",
        &format!("/agendamentos/{appointment_id}"),
        Some(&business_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Cancel, then try to revive: the terminal state wins.
    let (status, cancelled) = send(
        &app,
        "PUT",
        &format!("/agendamentos/{appointment_id}/status"),
        Some(&owner_token),
        Some(json!({"status": "cancelado"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelado");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/agendamentos/{appointment_id}/status"),
        Some(&owner_token),
        Some(json!({"status": "confirmado"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("cancelado"));

    // The business records the rendered service as history.
    let realized = (Utc::now() - Duration::hours(1)).to_rfc3339();
    let (status, procedure) = send(
        &app,
        "POST",
        "/procedimentos",
        Some(&business_token),
        Some(json!({
            "pet_id": pet_id,
            "petshop_id": business_id,
            "data_realizacao": realized,
            "total": 50.0,
            "itens": [{"servico_id": service_id, "preco_final": 50.0}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(procedure["nome_petshop"], "Bicho Feliz");

    // The owner reads the pet's history.
    let (status, history) = send(
        &app,
        "GET",
        &format!("/pets/{pet_id}/procedimentos"),
        Some(&owner_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
}
