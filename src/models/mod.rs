//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio. Los repositorios de
//! PostgreSQL los construyen a partir de sus propias filas.

pub mod customer;
pub mod notification;
pub mod rental;
pub mod user;
pub mod vehicle;

pub use customer::*;
pub use notification::*;
pub use rental::*;
pub use user::*;
pub use vehicle::*;
