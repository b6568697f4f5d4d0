pub mod dtos;
pub mod handlers;
pub mod models;
pub mod payloads;
pub mod routes;
pub mod services;

pub use services::NotificationService;
