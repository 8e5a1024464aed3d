//! Domain layer: commands and the pure purchase validator.

pub mod commands;
pub mod validator;
