//! unit-status — status transport for the Unit control API.
//!
//! Fetches one point-in-time [`StatusSnapshot`] per call by issuing
//! `GET /status` over the control Unix socket. The [`StatusSource`] trait
//! is the seam between the transport and the metrics core: production code
//! injects a [`StatusClient`], tests inject fakes.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_CONTROL_SOCKET, StatusClient, StatusSource};
pub use error::{StatusError, StatusResult};
pub use types::*;
