use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Rental, RentalStatus};

// Request de reserva: todo opcional para poder reportar los campos que faltan
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub vehicle_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub with_driver: Option<bool>,
    pub insurance: Option<bool>,
    pub notes: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub success: bool,
    pub rental: Rental,
    pub rental_id: String,
}

// Query de disponibilidad
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictingRental {
    pub rental_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: RentalStatus,
}

impl From<&Rental> for ConflictingRental {
    fn from(rental: &Rental) -> Self {
        Self {
            rental_id: rental.rental_code.clone(),
            start_date: rental.start_date,
            end_date: rental.end_date,
            status: rental.status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub success: bool,
    pub available: bool,
    pub conflicting_rentals: Vec<ConflictingRental>,
}
