//! KiotViet CLI - command line tools for exploring the KiotViet public API.
//!
//! Binaries:
//! - kiot_probe: probes every endpoint, guessing the Retailer header
//! - kiot_explore: asks for the shop name, then explores endpoints with it

pub mod args;
pub mod logging;
pub mod report;

pub use args::{choose_retailer, ConnectionArgs};
