//! Almacenamiento en memoria
//!
//! Implementa todos los repositorios sobre tablas en memoria protegidas
//! por un único `RwLock`. Reproduce las restricciones del esquema SQL:
//! email de cliente único, matrícula única, identificador legible de
//! rental único y claves foráneas de rentals.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    CustomerRepository, NotificationRepository, RentalRepository, UserRepository,
    VehicleRepository,
};
use crate::models::{
    Customer, CustomerChanges, CustomerFilters, CustomerSummary, NewCustomer, NewNotification,
    NewRental, NewUser, NewVehicle, Notification, PaymentStatus, Rental, RentalDetail,
    RentalFilters, RentalStatus, User, Vehicle, VehicleChanges, VehicleFilters, VehicleSummary,
};
use crate::services::availability::rental_code_sequence;
use crate::utils::errors::{conflict_error, AppError, AppResult};

#[derive(Default)]
struct Tables {
    customers: Vec<Customer>,
    vehicles: Vec<Vehicle>,
    rentals: Vec<Rental>,
    users: Vec<User>,
    notifications: Vec<Notification>,
}

impl Tables {
    fn detail(&self, rental: &Rental) -> AppResult<RentalDetail> {
        let customer = self
            .customers
            .iter()
            .find(|c| c.id == rental.customer_id)
            .ok_or_else(|| AppError::Internal(format!("Rental {} has no customer", rental.id)))?;
        let vehicle = self
            .vehicles
            .iter()
            .find(|v| v.id == rental.vehicle_id)
            .ok_or_else(|| AppError::Internal(format!("Rental {} has no vehicle", rental.id)))?;

        Ok(RentalDetail {
            rental: rental.clone(),
            customer: CustomerSummary {
                id: customer.id,
                name: customer.name.clone(),
                email: customer.email.clone(),
                phone: customer.phone.clone(),
            },
            vehicle: VehicleSummary {
                id: vehicle.id,
                name: vehicle.name.clone(),
                category: vehicle.category.clone(),
                price: vehicle.price,
            },
        })
    }

    fn rental_mut(&mut self, id: Uuid) -> AppResult<&mut Rental> {
        self.rentals
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().find(|c| c.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, customer: NewCustomer) -> AppResult<Customer> {
        let mut tables = self.tables.write().await;
        if tables.customers.iter().any(|c| c.email == customer.email) {
            return Err(conflict_error("Customer", "email", &customer.email));
        }

        let created = Customer {
            id: Uuid::new_v4(),
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            location: customer.location,
            status: customer.status,
            created_at: Utc::now(),
        };
        tables.customers.push(created.clone());
        Ok(created)
    }

    async fn list(&self, filters: &CustomerFilters) -> AppResult<Vec<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .iter()
            .rev()
            .filter(|c| filters.matches(c))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, changes: CustomerChanges) -> AppResult<Customer> {
        let mut tables = self.tables.write().await;
        let customer = tables
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;
        changes.apply(customer);
        Ok(customer.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.rentals.iter().any(|r| r.customer_id == id) {
            return Err(AppError::Conflict(
                "Error deleting customer: record is still referenced".to_string(),
            ));
        }
        let before = tables.customers.len();
        tables.customers.retain(|c| c.id != id);
        Ok(tables.customers.len() < before)
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .rev()
            .filter(|v| filters.matches(v))
            .cloned()
            .collect())
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        if tables.vehicles.iter().any(|v| v.plate_number == vehicle.plate_number) {
            return Err(conflict_error("Vehicle", "plate number", &vehicle.plate_number));
        }

        let created = Vehicle {
            id: Uuid::new_v4(),
            name: vehicle.name,
            category: vehicle.category,
            plate_number: vehicle.plate_number,
            price: vehicle.price,
            status: vehicle.status,
            created_at: Utc::now(),
        };
        tables.vehicles.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        if let Some(plate) = &changes.plate_number {
            if tables.vehicles.iter().any(|v| v.id != id && &v.plate_number == plate) {
                return Err(conflict_error("Vehicle", "plate number", plate));
            }
        }
        let vehicle = tables
            .vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
        changes.apply(vehicle);
        Ok(vehicle.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.rentals.iter().any(|r| r.vehicle_id == id) {
            return Err(AppError::Conflict(
                "Error deleting vehicle: record is still referenced".to_string(),
            ));
        }
        let before = tables.vehicles.len();
        tables.vehicles.retain(|v| v.id != id);
        Ok(tables.vehicles.len() < before)
    }
}

#[async_trait]
impl RentalRepository for InMemoryStore {
    async fn max_code_sequence(&self) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .rentals
            .iter()
            .filter_map(|r| rental_code_sequence(&r.rental_code))
            .max()
            .unwrap_or(0))
    }

    async fn create(&self, rental: NewRental) -> AppResult<Option<Rental>> {
        let mut tables = self.tables.write().await;
        if !tables.customers.iter().any(|c| c.id == rental.customer_id)
            || !tables.vehicles.iter().any(|v| v.id == rental.vehicle_id)
        {
            return Err(AppError::Conflict(
                "Error creating rental: referenced record does not exist".to_string(),
            ));
        }
        if tables.rentals.iter().any(|r| r.rental_code == rental.rental_code) {
            return Ok(None);
        }

        let now = Utc::now();
        let created = Rental {
            id: Uuid::new_v4(),
            rental_code: rental.rental_code,
            customer_id: rental.customer_id,
            vehicle_id: rental.vehicle_id,
            start_date: rental.start_date,
            end_date: rental.end_date,
            status: RentalStatus::Pending,
            payment_status: PaymentStatus::Pending,
            with_driver: rental.with_driver,
            insurance: rental.insurance,
            total_amount: rental.total_amount,
            notes: rental.notes,
            created_at: now,
            updated_at: now,
        };
        tables.rentals.push(created.clone());
        Ok(Some(created))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rental>> {
        let tables = self.tables.read().await;
        Ok(tables.rentals.iter().find(|r| r.id == id).cloned())
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<RentalDetail>> {
        let tables = self.tables.read().await;
        tables
            .rentals
            .iter()
            .find(|r| r.id == id)
            .map(|r| tables.detail(r))
            .transpose()
    }

    async fn list(&self, filters: &RentalFilters) -> AppResult<Vec<RentalDetail>> {
        let tables = self.tables.read().await;
        tables
            .rentals
            .iter()
            .rev()
            .filter(|r| filters.matches(r))
            .map(|r| tables.detail(r))
            .collect()
    }

    async fn find_blocking_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<Rental>> {
        let tables = self.tables.read().await;
        let mut rentals: Vec<Rental> = tables
            .rentals
            .iter()
            .filter(|r| r.vehicle_id == vehicle_id && r.status.blocks_vehicle())
            .cloned()
            .collect();
        rentals.sort_by_key(|r| r.start_date);
        Ok(rentals)
    }

    async fn update_status(&self, id: Uuid, status: RentalStatus) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let rental = tables.rental_mut(id)?;
        rental.status = status;
        rental.updated_at = Utc::now();
        Ok(())
    }

    async fn update_payment_status(&self, id: Uuid, payment_status: PaymentStatus) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let rental = tables.rental_mut(id)?;
        rental.payment_status = payment_status;
        rental.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.rentals.len();
        tables.rentals.retain(|r| r.id != id);
        Ok(tables.rentals.len() < before)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.rentals.len();
        tables.rentals.retain(|r| !ids.contains(&r.id));
        Ok((before - tables.rentals.len()) as u64)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(conflict_error("User", "email", &user.email));
        }

        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            role: user.role,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        let mut tables = self.tables.write().await;
        let created = Notification {
            id: Uuid::new_v4(),
            notification_type: notification.notification_type,
            title: notification.title,
            message: notification.message,
            read: false,
            created_at: Utc::now(),
        };
        tables.notifications.push(created.clone());
        Ok(created)
    }

    async fn list(&self, unread_only: bool, limit: i64) -> AppResult<Vec<Notification>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notifications
            .iter()
            .rev()
            .filter(|n| !unread_only || !n.read)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let mut updated = 0;
        for notification in tables.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            name: "Ana".to_string(),
            email: email.to_string(),
            phone: "600000000".to_string(),
            location: "Madrid".to_string(),
            status: crate::models::CustomerStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_customer_email_is_unique_and_case_sensitive() {
        let store = InMemoryStore::new();
        CustomerRepository::create(&store, new_customer("ana@test.com")).await.unwrap();

        let dup = CustomerRepository::create(&store, new_customer("ana@test.com")).await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));

        assert!(CustomerRepository::find_by_email(&store, "ANA@test.com")
            .await
            .unwrap()
            .is_none());
    }

    async fn seed_vehicle(store: &InMemoryStore) -> Vehicle {
        VehicleRepository::create(
            store,
            NewVehicle {
                name: "Corolla".to_string(),
                category: "sedan".to_string(),
                plate_number: "1234-ABC".to_string(),
                price: Decimal::new(4500, 2),
                status: crate::models::VehicleStatus::Available,
            },
        )
        .await
        .unwrap()
    }

    fn new_rental(code: &str, customer_id: Uuid, vehicle_id: Uuid) -> NewRental {
        NewRental {
            rental_code: code.to_string(),
            customer_id,
            vehicle_id,
            start_date: Utc::now(),
            end_date: Utc::now(),
            with_driver: false,
            insurance: false,
            total_amount: Decimal::ZERO,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_delete_many_counts_only_existing() {
        let store = InMemoryStore::new();
        let customer = CustomerRepository::create(&store, new_customer("b@test.com")).await.unwrap();
        let vehicle = seed_vehicle(&store).await;

        let rental = RentalRepository::create(&store, new_rental("RNT-0001", customer.id, vehicle.id))
            .await
            .unwrap()
            .unwrap();

        let deleted = store.delete_many(&[rental.id, Uuid::new_v4()]).await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(store.max_code_sequence().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_code_clash_is_not_an_error() {
        let store = InMemoryStore::new();
        let customer = CustomerRepository::create(&store, new_customer("c@test.com")).await.unwrap();
        let vehicle = seed_vehicle(&store).await;

        RentalRepository::create(&store, new_rental("RNT-0007", customer.id, vehicle.id))
            .await
            .unwrap()
            .unwrap();
        let clash = RentalRepository::create(&store, new_rental("RNT-0007", customer.id, vehicle.id))
            .await
            .unwrap();
        assert!(clash.is_none());
        assert_eq!(store.max_code_sequence().await.unwrap(), 7);

        // Clave foránea rota: error, aunque el identificador también esté ocupado
        let missing = RentalRepository::create(&store, new_rental("RNT-0007", customer.id, Uuid::new_v4())).await;
        assert!(matches!(missing, Err(AppError::Conflict(_))));
    }
}
