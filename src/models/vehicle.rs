//! Modelo de Vehicle
//!
//! Desde el punto de vista de las reservas el vehículo es de solo lectura;
//! la gestión de flota lo crea y modifica.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado del vehículo dentro de la flota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Rented,
    Maintenance,
    Retired,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Retired => "retired",
        }
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(VehicleStatus::Available),
            "rented" => Ok(VehicleStatus::Rented),
            "maintenance" => Ok(VehicleStatus::Maintenance),
            "retired" => Ok(VehicleStatus::Retired),
            other => Err(format!("Invalid vehicle status '{}'", other)),
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub plate_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub category: String,
    pub plate_number: String,
    pub price: Decimal,
    pub status: VehicleStatus,
}

#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub plate_number: Option<String>,
    pub price: Option<Decimal>,
    pub status: Option<VehicleStatus>,
}

impl VehicleChanges {
    pub fn apply(self, vehicle: &mut Vehicle) {
        if let Some(name) = self.name {
            vehicle.name = name;
        }
        if let Some(category) = self.category {
            vehicle.category = category;
        }
        if let Some(plate_number) = self.plate_number {
            vehicle.plate_number = plate_number;
        }
        if let Some(price) = self.price {
            vehicle.price = price;
        }
        if let Some(status) = self.status {
            vehicle.status = status;
        }
    }
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Clone, Default)]
pub struct VehicleFilters {
    pub category: Option<String>,
    pub status: Option<VehicleStatus>,
}

impl VehicleFilters {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.category.as_ref().map_or(true, |c| &vehicle.category == c)
            && self.status.map_or(true, |s| vehicle.status == s)
    }
}
