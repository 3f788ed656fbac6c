//! Repositorios
//!
//! Cada entidad tiene un trait de acceso a datos con una implementación
//! PostgreSQL. `InMemoryStore` implementa todos los traits sobre memoria
//! y se usa en tests y cuando no hay base de datos configurada.

pub mod customer_repository;
pub mod memory;
pub mod notification_repository;
pub mod rental_repository;
pub mod user_repository;
pub mod vehicle_repository;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    Customer, CustomerChanges, CustomerFilters, NewCustomer, NewNotification, NewRental, NewUser,
    NewVehicle, Notification, PaymentStatus, Rental, RentalDetail, RentalFilters, RentalStatus,
    User, Vehicle, VehicleChanges, VehicleFilters,
};
use crate::utils::errors::AppResult;

pub use customer_repository::PgCustomerRepository;
pub use memory::InMemoryStore;
pub use notification_repository::PgNotificationRepository;
pub use rental_repository::PgRentalRepository;
pub use user_repository::PgUserRepository;
pub use vehicle_repository::PgVehicleRepository;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Búsqueda exacta (distingue mayúsculas)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>>;
    /// `Conflict` si el email ya existe
    async fn create(&self, customer: NewCustomer) -> AppResult<Customer>;
    async fn list(&self, filters: &CustomerFilters) -> AppResult<Vec<Customer>>;
    /// `NotFound` si no existe
    async fn update(&self, id: Uuid, changes: CustomerChanges) -> AppResult<Customer>;
    /// `Conflict` si algún rental lo referencia
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;
    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>>;
    /// `Conflict` si la matrícula ya existe
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;
    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Vehicle>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Mayor número entre los identificadores `RNT-` existentes, 0 si no hay
    async fn max_code_sequence(&self) -> AppResult<i64>;
    /// `Ok(None)` si el identificador legible ya existe. Cualquier otro
    /// fallo (cliente o vehículo inexistente) es un error.
    async fn create(&self, rental: NewRental) -> AppResult<Option<Rental>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rental>>;
    async fn find_detail(&self, id: Uuid) -> AppResult<Option<RentalDetail>>;
    async fn list(&self, filters: &RentalFilters) -> AppResult<Vec<RentalDetail>>;
    /// Rentals `pending` o `active` del vehículo
    async fn find_blocking_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<Rental>>;
    /// `NotFound` si no existe
    async fn update_status(&self, id: Uuid, status: RentalStatus) -> AppResult<()>;
    /// `NotFound` si no existe
    async fn update_payment_status(&self, id: Uuid, payment_status: PaymentStatus) -> AppResult<()>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    /// Borrado en una sola sentencia; devuelve cuántos existían
    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn create(&self, user: NewUser) -> AppResult<User>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: NewNotification) -> AppResult<Notification>;
    async fn list(&self, unread_only: bool, limit: i64) -> AppResult<Vec<Notification>>;
    async fn mark_read(&self, id: Uuid) -> AppResult<bool>;
    async fn mark_all_read(&self) -> AppResult<u64>;
}

/// Conjunto de repositorios que comparte el estado de la aplicación
#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub rentals: Arc<dyn RentalRepository>,
    pub users: Arc<dyn UserRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub backend: &'static str,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            customers: Arc::new(PgCustomerRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            rentals: Arc::new(PgRentalRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            notifications: Arc::new(PgNotificationRepository::new(pool)),
            backend: "postgres",
        }
    }

    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            customers: store.clone(),
            vehicles: store.clone(),
            rentals: store.clone(),
            users: store.clone(),
            notifications: store,
            backend: "memory",
        }
    }
}
