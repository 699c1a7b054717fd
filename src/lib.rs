//! kyc-smoke - smoke tests for a KYC review backend
//!
//! This library provides the two tools behind the CLI: an end-to-end KYC
//! approval/rejection workflow tester and a route prober, both built on a
//! cookie-carrying HTTP session per actor.

pub mod cli;
pub mod client;
pub mod commands;
pub mod common;
pub mod kyc;
pub mod probe;

// Re-export commonly used types for tests
pub use client::{ApiResponse, ApiSession, Credentials};
pub use common::{Error, Result};
