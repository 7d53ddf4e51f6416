//! Flujos completos contra PostgreSQL
//!
//! Cada test recibe una base nueva con las migraciones aplicadas. Requieren
//! `DATABASE_URL`; se ejecutan con: cargo test -- --ignored

mod common;

use axum::http::StatusCode;
use http::Method;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use common::{app_with, jwt_config, send};
use fleet_backoffice::{
    models::{User, UserRole},
    repositories::UserRepository,
    utils::jwt::generate_token,
};

const PASSWORD: &str = "secret123";

async fn create_account(pool: &PgPool, role: UserRole, is_active: bool) -> (User, String) {
    let hash = bcrypt::hash(PASSWORD, 4).unwrap();
    let email = format!("{}@fleet.ma", Uuid::new_v4().simple());
    let user = UserRepository::new(pool.clone())
        .create("Nadia Tazi", &email, &hash, role, "0611223344", is_active)
        .await
        .unwrap();
    let token = generate_token(user.id, user.role, &jwt_config()).unwrap();
    (user, token)
}

fn valid_truck(registration: &str, mileage: i64) -> Value {
    json!({
        "registration": registration,
        "brand": "Volvo",
        "model": "FH16",
        "year": 2019,
        "mileage": mileage
    })
}

async fn create_truck(pool: &PgPool, token: &str, registration: &str, mileage: i64) -> Value {
    let (status, body) = send(
        app_with(pool.clone()),
        Method::POST,
        "/api/trucks",
        Some(token),
        Some(valid_truck(registration, mileage)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"].clone()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_registration_requires_activation(pool: PgPool) {
    let (_, admin_token) = create_account(&pool, UserRole::Admin, true).await;
    let registration = json!({
        "full_name": "Said Ouali",
        "email": "said@fleet.ma",
        "password": PASSWORD,
        "phone": "0698765432"
    });

    let (status, body) = send(
        app_with(pool.clone()),
        Method::POST,
        "/api/users/register",
        None,
        Some(registration.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_active"], false);
    let driver_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app_with(pool.clone()),
        Method::POST,
        "/api/users/register",
        None,
        Some(registration),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE");

    let credentials = json!({ "email": "said@fleet.ma", "password": PASSWORD });
    let (status, body) = send(
        app_with(pool.clone()),
        Method::POST,
        "/api/users/login",
        None,
        Some(credentials.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let uri = format!("/api/users/drivers/{}/toggle", driver_id);
    let (status, body) = send(app_with(pool.clone()), Method::PATCH, &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], true);

    let (status, body) = send(app_with(pool.clone()), Method::POST, "/api/users/login", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].as_str().is_some());
    assert_eq!(body["data"]["user"]["role"], "chauffeur");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_deactivated_driver_loses_access_immediately(pool: PgPool) {
    let (_, admin_token) = create_account(&pool, UserRole::Admin, true).await;
    let (driver, driver_token) = create_account(&pool, UserRole::Chauffeur, true).await;

    let (status, _) = send(app_with(pool.clone()), Method::GET, "/api/trips/mine", Some(&driver_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/users/drivers/{}/toggle", driver.id);
    let (status, _) = send(app_with(pool.clone()), Method::PATCH, &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);

    // Mismo token, todavía sin expirar
    let (status, body) = send(app_with(pool.clone()), Method::GET, "/api/trips/mine", Some(&driver_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_token_of_unknown_user_is_unauthorized(pool: PgPool) {
    let token = generate_token(Uuid::new_v4(), UserRole::Admin, &jwt_config()).unwrap();

    let (status, body) = send(app_with(pool), Method::GET, "/api/trucks", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_role_is_read_from_account(pool: PgPool) {
    let (driver, _) = create_account(&pool, UserRole::Chauffeur, true).await;
    // Token que afirma un rol que la cuenta no tiene
    let forged_role = generate_token(driver.id, UserRole::Admin, &jwt_config()).unwrap();

    let (status, _) = send(
        app_with(pool),
        Method::POST,
        "/api/trucks",
        Some(&forged_role),
        Some(valid_truck("12345-A-6", 1000)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_chauffeur_is_rejected_from_admin_endpoints(pool: PgPool) {
    let (_, token) = create_account(&pool, UserRole::Chauffeur, true).await;

    let cases = vec![
        (Method::POST, "/api/trucks".to_string()),
        (Method::GET, "/api/trips".to_string()),
        (Method::GET, "/api/trucks/available".to_string()),
        (Method::GET, "/api/users/drivers".to_string()),
        (Method::POST, "/api/tires/check".to_string()),
        (Method::GET, "/api/maintenance".to_string()),
        (Method::GET, "/api/maintenance/stats".to_string()),
        (Method::GET, format!("/api/maintenance/truck/{}", Uuid::new_v4())),
        (Method::DELETE, format!("/api/trailers/{}", Uuid::new_v4())),
    ];

    for (method, uri) in cases {
        let body = (method == Method::POST).then(|| valid_truck("12345-A-6", 1000));
        let (status, response) = send(app_with(pool.clone()), method.clone(), &uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
        assert_eq!(response["code"], "FORBIDDEN");
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_duplicate_truck_registration(pool: PgPool) {
    let (_, token) = create_account(&pool, UserRole::Admin, true).await;
    create_truck(&pool, &token, "12345-A-6", 420_000).await;

    let (status, body) = send(
        app_with(pool.clone()),
        Method::POST,
        "/api/trucks",
        Some(&token),
        Some(valid_truck("12345-A-6", 10)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_invalid_bodies_are_bad_requests(pool: PgPool) {
    let (_, token) = create_account(&pool, UserRole::Admin, true).await;

    let (status, body) = send(
        app_with(pool.clone()),
        Method::POST,
        "/api/trucks",
        Some(&token),
        Some(json!({
            "registration": "   ",
            "brand": "",
            "model": "FH16",
            "year": 1985,
            "mileage": -5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Brand is required"));
    assert!(message.contains("Mileage cannot be negative"));
    assert!(message.contains("Registration is required"));
    assert!(message.contains("Year must be between 1990"));

    let (status, body) = send(
        app_with(pool.clone()),
        Method::POST,
        "/api/trucks",
        Some(&token),
        Some(json!({ "brand": "Volvo" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = send(app_with(pool.clone()), Method::GET, "/api/trucks/not-a-uuid", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let uri = format!("/api/tires/vehicle/bus/{}", Uuid::new_v4());
    let (status, _) = send(app_with(pool.clone()), Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        app_with(pool),
        Method::POST,
        "/api/trips",
        Some(&token),
        Some(json!({
            "driver_id": Uuid::new_v4(),
            "truck_id": Uuid::new_v4(),
            "origin": "Casablanca",
            "destination": "Oujda",
            "departure_at": "2025-04-01T05:00:00Z",
            "start_km": 300000,
            "end_km": 299000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("End km must be greater than or equal to start km"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_chauffeur_cannot_replan_trip(pool: PgPool) {
    let (_, token) = create_account(&pool, UserRole::Chauffeur, true).await;
    let uri = format!("/api/trips/{}", Uuid::new_v4());

    let (status, _) = send(
        app_with(pool),
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "truck_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_admin_detaches_trailer_from_trip(pool: PgPool) {
    let (_, admin) = create_account(&pool, UserRole::Admin, true).await;
    let (driver, _) = create_account(&pool, UserRole::Chauffeur, true).await;
    let truck = create_truck(&pool, &admin, "55555-B-1", 1_000).await;

    let (status, trailer) = send(
        app_with(pool.clone()),
        Method::POST,
        "/api/trailers",
        Some(&admin),
        Some(json!({ "registration": "R-2020", "kind": "Plateau", "capacity": 24.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", trailer);

    let (status, trip) = send(
        app_with(pool.clone()),
        Method::POST,
        "/api/trips",
        Some(&admin),
        Some(json!({
            "driver_id": driver.id,
            "truck_id": truck["id"],
            "trailer_id": trailer["data"]["id"],
            "origin": "Agadir",
            "destination": "Tanger",
            "departure_at": "2025-05-02T06:00:00Z",
            "start_km": 1000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", trip);
    assert_eq!(trip["data"]["trailer_id"], trailer["data"]["id"]);

    let uri = format!("/api/trips/{}", trip["data"]["id"].as_str().unwrap());
    let (status, body) = send(
        app_with(pool),
        Method::PUT,
        &uri,
        Some(&admin),
        Some(json!({ "trailer_id": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["trailer_id"], Value::Null);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_completed_trip_flags_worn_tires(pool: PgPool) {
    let (_, admin) = create_account(&pool, UserRole::Admin, true).await;
    let (driver, driver_token) = create_account(&pool, UserRole::Chauffeur, true).await;
    let truck = create_truck(&pool, &admin, "77777-C-3", 100_000).await;
    let truck_id = truck["id"].as_str().unwrap().to_string();

    let (status, tire) = send(
        app_with(pool.clone()),
        Method::POST,
        "/api/tires",
        Some(&admin),
        Some(json!({
            "vehicle_id": truck_id,
            "vehicle_kind": "truck",
            "position": "front-left",
            "brand": "Michelin",
            "install_mileage": 0,
            "limit_mileage": 500
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", tire);
    let tire_id = tire["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(tire["data"]["status"], "good");

    let (status, trip) = send(
        app_with(pool.clone()),
        Method::POST,
        "/api/trips",
        Some(&admin),
        Some(json!({
            "driver_id": driver.id,
            "truck_id": truck_id,
            "origin": "Casablanca",
            "destination": "Fès",
            "departure_at": "2025-06-10T04:30:00Z",
            "start_km": 100000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", trip);

    // El chauffeur cierra su propio trayecto
    let uri = format!("/api/trips/{}", trip["data"]["id"].as_str().unwrap());
    let (status, body) = send(
        app_with(pool.clone()),
        Method::PUT,
        &uri,
        Some(&driver_token),
        Some(json!({ "status": "completed", "end_km": 100600 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["distance"], 600);

    let critical_ids = |body: &Value| -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, body) = send(app_with(pool.clone()), Method::GET, "/api/tires/critical", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(critical_ids(&body).contains(&tire_id));

    let uri = format!("/api/trucks/{}", truck_id);
    let (_, body) = send(app_with(pool.clone()), Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(body["data"]["mileage"], 100600);

    // Una nueva verificación no lo devuelve a otro estado
    let (status, body) = send(app_with(pool.clone()), Method::POST, "/api/tires/check", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["already_critical"], 1);
    assert!(body["data"]["newly_critical"].as_array().unwrap().is_empty());

    let (_, body) = send(app_with(pool), Method::GET, "/api/tires/critical", Some(&admin), None).await;
    assert!(critical_ids(&body).contains(&tire_id));
}
