//! KiotViet core - pure logic for probing the KiotViet public API.
//!
//! Nothing in this crate performs I/O. The HTTP side lives in `kiot-sdk`.

pub mod analysis;
pub mod credentials;
pub mod dashboard;
pub mod endpoints;
pub mod retailer;
pub mod text;
pub mod token;

pub use analysis::{analyze, DataSummary, ResponseShape};
pub use credentials::Credentials;
pub use dashboard::{availability_summary, suggest_components};
pub use endpoints::{Endpoint, EXPLORE_ENDPOINTS, PROBE_ENDPOINTS};
pub use retailer::{RetailerCandidate, RetailerCandidates};
pub use token::{inspect_token, InspectError, TokenInsight};
