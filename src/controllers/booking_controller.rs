//! Controlador de reservas
//!
//! Alta de reservas desde el formulario público y consulta de
//! disponibilidad de un vehículo para un rango de fechas.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::booking_dto::{AvailabilityQuery, AvailabilityResponse, ConflictingRental, CreateBookingRequest};
use crate::models::{Customer, CustomerStatus, NewCustomer, NewRental, Rental};
use crate::repositories::Repositories;
use crate::services::availability::{conflicting_rentals, next_rental_code};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{require_all, required, required_timestamp};

/// Intentos máximos para asignar un identificador legible libre
const MAX_CODE_ATTEMPTS: usize = 5;

/// Resultado de una reserva
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub rental: Rental,
    pub customer: Customer,
    /// El cliente no existía y se creó con esta reserva
    pub customer_created: bool,
}

pub struct BookingController {
    repos: Repositories,
    enforce_availability: bool,
}

impl BookingController {
    pub fn new(repos: Repositories, enforce_availability: bool) -> Self {
        Self {
            repos,
            enforce_availability,
        }
    }

    pub async fn create_booking(&self, request: CreateBookingRequest) -> AppResult<BookingOutcome> {
        require_all(&[
            ("vehicleId", &request.vehicle_id),
            ("customerName", &request.customer_name),
            ("customerEmail", &request.customer_email),
            ("customerPhone", &request.customer_phone),
            ("customerLocation", &request.customer_location),
            ("startDate", &request.start_date),
            ("endDate", &request.end_date),
        ])?;

        let vehicle_id = parse_id(required(&request.vehicle_id, "vehicleId")?, "vehicleId")?;
        let (start_date, end_date) = date_range(&request.start_date, &request.end_date)?;

        let total_amount = request.total_amount.unwrap_or(Decimal::ZERO);
        if total_amount.is_sign_negative() {
            return Err(AppError::Validation(
                "totalAmount must not be negative".to_string(),
            ));
        }

        if self.repos.vehicles.find_by_id(vehicle_id).await?.is_none() {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        if self.enforce_availability {
            let blocking = self.repos.rentals.find_blocking_for_vehicle(vehicle_id).await?;
            let conflicts = conflicting_rentals(&blocking, start_date, end_date);
            if let Some(first) = conflicts.first() {
                tracing::warn!(
                    "⚠️ Reserva rechazada: vehículo {} ocupado por {}",
                    vehicle_id,
                    first.rental_code
                );
                return Err(AppError::Conflict(format!(
                    "Vehicle is not available for the requested dates (conflicts with {})",
                    first.rental_code
                )));
            }
        }

        let (customer, customer_created) = self.resolve_customer(&request).await?;

        let new_rental = NewRental {
            rental_code: String::new(),
            customer_id: customer.id,
            vehicle_id,
            start_date,
            end_date,
            with_driver: request.with_driver.unwrap_or(false),
            insurance: request.insurance.unwrap_or(false),
            total_amount,
            notes: request.notes.clone().unwrap_or_default(),
        };

        match self.insert_rental(new_rental).await {
            Ok(rental) => {
                tracing::info!("✅ Reserva {} creada para {}", rental.rental_code, customer.email);
                Ok(BookingOutcome {
                    rental,
                    customer,
                    customer_created,
                })
            }
            Err(e) => {
                if customer_created {
                    self.discard_customer(&customer).await;
                }
                Err(e)
            }
        }
    }

    /// Inserta el rental con el siguiente identificador libre. Solo un
    /// choque de identificador provoca reintento.
    async fn insert_rental(&self, mut new_rental: NewRental) -> AppResult<Rental> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let highest = self.repos.rentals.max_code_sequence().await?;
            new_rental.rental_code = next_rental_code(highest);

            if let Some(rental) = self.repos.rentals.create(new_rental.clone()).await? {
                return Ok(rental);
            }
            tracing::warn!("⚠️ Identificador {} ya en uso, reintentando", new_rental.rental_code);
        }

        Err(AppError::Conflict(
            "Could not allocate a rental identifier, please retry".to_string(),
        ))
    }

    /// Borra el cliente creado por una reserva que no llegó a guardarse
    async fn discard_customer(&self, customer: &Customer) {
        match self.repos.customers.delete(customer.id).await {
            Ok(_) => tracing::info!("🧹 Cliente {} descartado tras reserva fallida", customer.email),
            Err(e) => tracing::warn!("⚠️ No se pudo descartar el cliente {}: {}", customer.email, e),
        }
    }

    /// Busca el cliente por email exacto o lo crea como activo
    async fn resolve_customer(&self, request: &CreateBookingRequest) -> AppResult<(Customer, bool)> {
        let email = required(&request.customer_email, "customerEmail")?;

        if let Some(customer) = self.repos.customers.find_by_email(email).await? {
            return Ok((customer, false));
        }

        let new_customer = NewCustomer {
            name: required(&request.customer_name, "customerName")?.to_string(),
            email: email.to_string(),
            phone: required(&request.customer_phone, "customerPhone")?.to_string(),
            location: required(&request.customer_location, "customerLocation")?.to_string(),
            status: CustomerStatus::Active,
        };

        match self.repos.customers.create(new_customer).await {
            Ok(customer) => {
                tracing::info!("👤 Cliente creado: {}", customer.email);
                Ok((customer, true))
            }
            // Otra reserva creó el mismo cliente entre la búsqueda y el insert
            Err(AppError::Conflict(_)) => self
                .repos
                .customers
                .find_by_email(email)
                .await?
                .map(|customer| (customer, false))
                .ok_or_else(|| AppError::Internal(format!("Customer {} vanished after conflict", email))),
            Err(e) => Err(e),
        }
    }

    pub async fn check_availability(&self, vehicle_id: Uuid, query: AvailabilityQuery) -> AppResult<AvailabilityResponse> {
        require_all(&[("startDate", &query.start_date), ("endDate", &query.end_date)])?;
        let (start_date, end_date) = date_range(&query.start_date, &query.end_date)?;

        if self.repos.vehicles.find_by_id(vehicle_id).await?.is_none() {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        let blocking = self.repos.rentals.find_blocking_for_vehicle(vehicle_id).await?;
        let conflicts: Vec<ConflictingRental> = conflicting_rentals(&blocking, start_date, end_date)
            .iter()
            .map(ConflictingRental::from)
            .collect();

        Ok(AvailabilityResponse {
            success: true,
            available: conflicts.is_empty(),
            conflicting_rentals: conflicts,
        })
    }
}

fn parse_id(value: &str, field: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|_| AppError::Validation(format!("{} must be a valid UUID", field)))
}

fn date_range(start: &Option<String>, end: &Option<String>) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start_date = required_timestamp(start, "startDate")?;
    let end_date = required_timestamp(end, "endDate")?;
    if end_date < start_date {
        return Err(AppError::Validation(
            "endDate must not be before startDate".to_string(),
        ));
    }
    Ok((start_date, end_date))
}
