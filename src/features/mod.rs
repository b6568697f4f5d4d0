pub mod activity;
pub mod auth;
pub mod notifications;
pub mod programs;
pub mod reports;
pub mod submissions;
