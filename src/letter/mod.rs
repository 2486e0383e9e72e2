//! Stored offer letters and completion certificates, plus their generation
//! endpoints.

pub mod handlers;
pub mod models;
