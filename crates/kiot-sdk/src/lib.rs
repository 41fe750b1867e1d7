//! KiotViet SDK - blocking client for the KiotViet public API.
//!
//! Exchanges client credentials for a bearer token and probes read
//! endpoints, trying `Retailer` header candidates in order.

pub mod auth;
pub mod config;
pub mod error;
pub mod probe;
pub mod transport;

pub use auth::{Authenticator, Session};
pub use config::Config;
pub use error::ApiError;
pub use probe::{Attempt, EndpointProber, ProbeReport, ProbeResult};
pub use transport::{HttpReply, HttpTransport, Transport};
