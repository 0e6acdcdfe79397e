// RIASEC interest + cognitive style profiling quiz.
// Results are stored per user and blended into certification scoring.

pub mod handlers;
pub mod riasec;
pub mod store;
