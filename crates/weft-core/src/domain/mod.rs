//! Domain module - errors and validated newtypes

pub mod errors;
pub mod newtypes;
