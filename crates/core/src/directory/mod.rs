//! Directory use cases

pub mod ports;
pub mod register_user;

pub use register_user::{generate_test_email, RegisterUserUseCase, RegistrationOutcome};
