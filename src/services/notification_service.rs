//! Notificaciones best-effort
//!
//! Los eventos del ciclo de vida generan entradas en el feed de actividad.
//! El envío corre en una tarea aparte: un fallo se registra en el log y
//! nunca llega a quien disparó el evento.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::models::{NewNotification, Notification, NotificationType, Rental};
use crate::repositories::NotificationRepository;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    /// Crea la notificación y devuelve el resultado tal cual
    pub async fn notify(&self, notification: NewNotification) -> AppResult<Notification> {
        self.repository.create(notification).await
    }

    /// Dispara la notificación en segundo plano. El handle permite
    /// esperar la tarea; quien no lo necesite puede descartarlo.
    pub fn dispatch(&self, notification: NewNotification) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let title = notification.title.clone();
            if let Err(e) = service.notify(notification).await {
                tracing::warn!("⚠️ No se pudo crear la notificación '{}': {}", title, e);
            }
        })
    }

    pub fn booking_created(&self, rental: &Rental, customer_name: &str) -> JoinHandle<()> {
        self.dispatch(NewNotification::new(
            NotificationType::Rental,
            "New booking",
            format!("{} booked rental {}", customer_name, rental.rental_code),
        ))
    }

    pub fn customer_created(&self, name: &str, email: &str) -> JoinHandle<()> {
        self.dispatch(NewNotification::new(
            NotificationType::Customer,
            "New customer",
            format!("{} ({}) registered through a booking", name, email),
        ))
    }

    pub fn rental_status_changed(&self, rental: &Rental) -> JoinHandle<()> {
        self.dispatch(NewNotification::new(
            NotificationType::Rental,
            "Rental status updated",
            format!("Rental {} is now {}", rental.rental_code, rental.status),
        ))
    }

    pub fn payment_status_changed(&self, rental: &Rental) -> JoinHandle<()> {
        self.dispatch(NewNotification::new(
            NotificationType::Payment,
            "Payment status updated",
            format!(
                "Payment for rental {} is now {}",
                rental.rental_code, rental.payment_status
            ),
        ))
    }
}
