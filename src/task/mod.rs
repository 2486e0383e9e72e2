//! Weekly task plans per department.

pub mod handlers;
pub mod models;
