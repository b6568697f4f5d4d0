pub mod model;
pub mod token;

pub use token::TokenVerifier;
