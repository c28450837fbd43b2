//! # IO Module
//!
//! Interface layer between HTTP clients and the domain logic. Handlers
//! translate `shared` DTOs into domain commands, call the services and map
//! the results (or domain errors) back into JSON responses.

pub mod rest;

pub use rest::*;
