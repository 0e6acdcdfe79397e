// ROME job-family reference data and lookup endpoints.

pub mod catalog;
pub mod handlers;
