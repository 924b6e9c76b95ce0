//! HTTP transport for the interview flows.

pub mod routes;

pub use routes::{AppState, interview_routes};
