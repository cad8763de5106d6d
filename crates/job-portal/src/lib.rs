//! Job board backend: accounts, postings, applications with resume uploads,
//! and an admin console, served over a JSON REST surface.

pub mod board;
pub mod config;
pub mod error;
pub mod http;
pub mod telemetry;
