//! Modelo de Notification
//!
//! Entradas del feed de actividad. No guardan referencia a la entidad que
//! las originó: el texto del mensaje es el único vínculo.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Rental,
    Payment,
    Customer,
    Maintenance,
    Vehicle,
    Damage,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Rental => "rental",
            NotificationType::Payment => "payment",
            NotificationType::Customer => "customer",
            NotificationType::Maintenance => "maintenance",
            NotificationType::Vehicle => "vehicle",
            NotificationType::Damage => "damage",
        }
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rental" => Ok(NotificationType::Rental),
            "payment" => Ok(NotificationType::Payment),
            "customer" => Ok(NotificationType::Customer),
            "maintenance" => Ok(NotificationType::Maintenance),
            "vehicle" => Ok(NotificationType::Vehicle),
            "damage" => Ok(NotificationType::Damage),
            other => Err(format!("Invalid notification type '{}'", other)),
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
}

impl NewNotification {
    pub fn new(notification_type: NotificationType, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            title: title.into(),
            message: message.into(),
        }
    }
}
