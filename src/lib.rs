//! Measurement Protocol client for Rust.
//!
//! Validates analytics hits, encodes each one as a form-urlencoded line and
//! posts them to a collector: a single hit to `/collect`, several to
//! `/batch`. Delivery is fire-and-forget on a detached thread.

mod client;
mod encode;
mod endpoint;
mod error;
pub mod middleware;
mod request;
mod transport;
mod types;

pub use client::MeasurementClient;
pub use encode::{encode_batch, encode_hit, validate};
pub use endpoint::Endpoint;
pub use error::{Error, RequiredField, Result, TransportError};
pub use request::{build_from_request, ClientIdGenerator, RandomClientId, RequestContext};
pub use transport::{Transport, UreqTransport};
pub use types::{Hit, Options, DEFAULT_ENDPOINT, FORM_CONTENT_TYPE};
