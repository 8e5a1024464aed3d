//! Boxoffice Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the ticketing
//! context and its infrastructure depend on. It contains no infrastructure
//! code.

pub mod clock;
pub mod command;
pub mod error;
pub mod repository;
