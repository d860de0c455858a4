//! Framework-specific middleware adapters.
//!
//! Each adapter sends one hit per inbound request, derived from the request
//! path, peer address and `User-Agent` header with a template [`Hit`](crate::Hit)
//! applied as overrides. Each is feature-gated and only compiled when the
//! corresponding feature flag is enabled in `Cargo.toml`.

#[cfg(feature = "actix")]
pub mod actix;

#[cfg(feature = "axum-middleware")]
pub mod axum;

#[cfg(feature = "rocket-fairing")]
pub mod rocket;
