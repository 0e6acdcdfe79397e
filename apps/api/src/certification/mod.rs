// Certification test: question bank, scoring engine, role matching,
// draft persistence and HTTP handlers.
// Scoring is pure; handlers own all I/O.

pub mod answers;
pub mod blend;
pub mod handlers;
pub mod questions;
pub mod roles;
pub mod scoring;
pub mod session;
pub mod store;
