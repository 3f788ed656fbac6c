//! Services module
//!
//! Este módulo contiene la lógica pura de disponibilidad y los servicios
//! transversales: sesiones JWT, contraseñas y notificaciones.

pub mod availability;
pub mod jwt_service;
pub mod notification_service;
pub mod password_service;

pub use jwt_service::JwtService;
pub use notification_service::NotificationService;
