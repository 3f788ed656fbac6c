//! Modelo de Rental
//!
//! Entidad central del sistema: la reserva de un vehículo por un cliente
//! para un rango de fechas. `status` y `payment_status` son dos enums
//! independientes; no existe ninguna restricción cruzada entre ellos.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Etapa del ciclo de vida del alquiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl RentalStatus {
    pub const ALL: [RentalStatus; 4] = [
        RentalStatus::Pending,
        RentalStatus::Active,
        RentalStatus::Completed,
        RentalStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Active => "active",
            RentalStatus::Completed => "completed",
            RentalStatus::Cancelled => "cancelled",
        }
    }

    /// Estados que bloquean el vehículo para otras reservas
    pub fn blocks_vehicle(&self) -> bool {
        matches!(self, RentalStatus::Pending | RentalStatus::Active)
    }
}

impl FromStr for RentalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RentalStatus::Pending),
            "active" => Ok(RentalStatus::Active),
            "completed" => Ok(RentalStatus::Completed),
            "cancelled" => Ok(RentalStatus::Cancelled),
            other => Err(format!("Invalid rental status '{}'", other)),
        }
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estado de facturación del alquiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(format!("Invalid payment status '{}'", other)),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rental persistido
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: Uuid,
    /// Identificador legible `RNT-0001`
    #[serde(rename = "rentalId")]
    pub rental_code: String,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: RentalStatus,
    pub payment_status: PaymentStatus,
    pub with_driver: bool,
    pub insurance: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para insertar un rental nuevo
#[derive(Debug, Clone)]
pub struct NewRental {
    pub rental_code: String,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub with_driver: bool,
    pub insurance: bool,
    pub total_amount: Decimal,
    pub notes: String,
}

/// Resumen del cliente incluido en el detalle del rental
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Resumen del vehículo incluido en el detalle del rental
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSummary {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Rental con los resúmenes de cliente y vehículo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalDetail {
    #[serde(flatten)]
    pub rental: Rental,
    pub customer: CustomerSummary,
    pub vehicle: VehicleSummary,
}

/// Filtros para el listado de rentals
#[derive(Debug, Clone, Default)]
pub struct RentalFilters {
    pub status: Option<RentalStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub vehicle_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

impl RentalFilters {
    pub fn matches(&self, rental: &Rental) -> bool {
        self.status.map_or(true, |s| rental.status == s)
            && self.payment_status.map_or(true, |p| rental.payment_status == p)
            && self.vehicle_id.map_or(true, |v| rental.vehicle_id == v)
            && self.customer_id.map_or(true, |c| rental.customer_id == c)
    }
}
