//! DTOs de la API
//!
//! Bodies de request y response. En el cable todos los campos van en
//! camelCase y las fechas en ISO-8601.

pub mod api_response;
pub mod auth_dto;
pub mod booking_dto;
pub mod customer_dto;
pub mod notification_dto;
pub mod rental_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
