//! Project overviews per department.

pub mod handlers;
pub mod models;
