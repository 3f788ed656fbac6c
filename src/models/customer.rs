//! Modelo de Customer
//!
//! Los clientes se crean implícitamente al llegar una reserva con un
//! email desconocido y se reutilizan por email (coincidencia exacta).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado del cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for CustomerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CustomerStatus::Active),
            "inactive" => Ok(CustomerStatus::Inactive),
            other => Err(format!("Invalid customer status '{}'", other)),
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub status: CustomerStatus,
}

/// Cambios parciales sobre un cliente existente
#[derive(Debug, Clone, Default)]
pub struct CustomerChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub status: Option<CustomerStatus>,
}

impl CustomerChanges {
    pub fn apply(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(phone) = self.phone {
            customer.phone = phone;
        }
        if let Some(location) = self.location {
            customer.location = location;
        }
        if let Some(status) = self.status {
            customer.status = status;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerFilters {
    pub status: Option<CustomerStatus>,
    /// Búsqueda por nombre o email, sin distinguir mayúsculas
    pub search: Option<String>,
}

impl CustomerFilters {
    pub fn matches(&self, customer: &Customer) -> bool {
        let status_ok = self.status.map_or(true, |s| customer.status == s);
        let search_ok = self.search.as_ref().map_or(true, |term| {
            let term = term.to_lowercase();
            customer.name.to_lowercase().contains(&term)
                || customer.email.to_lowercase().contains(&term)
        });
        status_ok && search_ok
    }
}
