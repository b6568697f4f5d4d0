pub mod services;

pub use services::ActivityService;
