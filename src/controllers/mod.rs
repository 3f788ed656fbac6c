pub mod auth_controller;
pub mod booking_controller;
pub mod customer_controller;
pub mod notification_controller;
pub mod rental_controller;
pub mod vehicle_controller;

pub use auth_controller::AuthController;
pub use booking_controller::BookingController;
pub use customer_controller::CustomerController;
pub use notification_controller::NotificationController;
pub use rental_controller::RentalController;
pub use vehicle_controller::VehicleController;
