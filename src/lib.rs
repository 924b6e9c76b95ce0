//! ESG Interview: scripted lead-qualification interviews, scoring and
//! sales notifications.

pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod notify;
pub mod scoring;
