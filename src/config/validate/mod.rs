//! Configuration validation
//!
//! Validates adversarial training specifications before any data is loaded.

mod error;
mod validator;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use error::ValidationError;
pub use validator::validate_config;
