//! Helpers compartidos por los tests HTTP
//!
//! Cada `TestApp` levanta el router real sobre un `InMemoryStore` propio.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use rental_admin::config::EnvironmentConfig;
use rental_admin::models::{NewUser, NewVehicle, UserRole, Vehicle, VehicleStatus};
use rental_admin::repositories::{InMemoryStore, Repositories};
use rental_admin::services::password_service::hash_password_with_cost;
use rental_admin::{create_router, AppState};

pub const ADMIN_EMAIL: &str = "admin@agency.test";
pub const MANAGER_EMAIL: &str = "manager@agency.test";
pub const PASSWORD: &str = "correct-horse-battery";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Par `nombre=valor` de la cookie de sesión emitida
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

pub struct TestApp {
    pub router: Router,
    pub repos: Repositories,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(EnvironmentConfig::development()).await
    }

    pub async fn with_config(config: EnvironmentConfig) -> Self {
        let repos = Repositories::in_memory(Arc::new(InMemoryStore::new()));
        for (email, role) in [(ADMIN_EMAIL, UserRole::Admin), (MANAGER_EMAIL, UserRole::Manager)] {
            repos
                .users
                .create(NewUser {
                    email: email.to_string(),
                    name: "Staff".to_string(),
                    role,
                    password_hash: hash_password_with_cost(PASSWORD, 4).unwrap(),
                })
                .await
                .unwrap();
        }

        let router = create_router(AppState::new(config, repos.clone()));
        Self { router, repos }
    }

    pub async fn request(&self, method: Method, path: &str, body: Option<Value>, cookie: Option<&str>) -> TestResponse {
        let headers: Vec<(header::HeaderName, String)> = cookie
            .map(|c| vec![(header::COOKIE, c.to_string())])
            .unwrap_or_default();
        self.request_with_headers(method, path, body, headers).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        headers: Vec<(header::HeaderName, String)>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::GET, path, None, cookie).await
    }

    pub async fn post(&self, path: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        self.request(Method::POST, path, Some(body), cookie).await
    }

    pub async fn patch(&self, path: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        self.request(Method::PATCH, path, Some(body), cookie).await
    }

    /// Login y devuelve la cookie lista para reenviar
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .post(
                "/auth/login",
                serde_json::json!({ "email": email, "password": PASSWORD }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.session_cookie().unwrap()
    }

    pub async fn seed_vehicle(&self, plate: &str) -> Vehicle {
        self.repos
            .vehicles
            .create(NewVehicle {
                name: "Toyota Corolla".to_string(),
                category: "sedan".to_string(),
                plate_number: plate.to_string(),
                price: Decimal::new(55, 0),
                status: VehicleStatus::Available,
            })
            .await
            .unwrap()
    }
}

pub fn booking(vehicle_id: impl ToString, email: &str, start: &str, end: &str) -> Value {
    serde_json::json!({
        "vehicleId": vehicle_id.to_string(),
        "customerName": "Ana Pérez",
        "customerEmail": email,
        "customerPhone": "+34 600 000 000",
        "customerLocation": "Madrid",
        "startDate": start,
        "endDate": end,
    })
}
