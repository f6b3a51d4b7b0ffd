//! # kibana-api - Kibana management API client
//!
//! A small, typed Rust client for the Kibana REST API, covering spaces and
//! role management.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Basic auth or API key authentication
//! - Option structs whose unset fields never reach the wire
//! - Per-request customization through [`RequestOption`]
//! - One error type; API errors keep the status, raw body and a readable message
//!
//! ## Architecture
//!
//! Every operation goes through the same pipeline:
//!
//! 1. [`Client::new_request`] resolves the path against the base URL, sets
//!    headers and encodes the options (JSON body for writes, query string
//!    for reads), then applies the caller's [`RequestOption`]s
//! 2. [`Client::execute`] and friends add the `Authorization` header, send the
//!    request once and classify the status
//! 3. Non-success responses become [`ErrorResponse`] values whose message is
//!    extracted by [`response::parse_error`]
//!
//! Resource services ([`services::SpacesService`], [`services::RolesService`])
//! only pick the path, method, options and result type.
//!
//! ## Example
//! ```no_run
//! use kibana_api::{Client, ClientOptions};
//! use kibana_api::services::spaces::CreateSpaceOptions;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::with_api_key(
//!         "your-api-key",
//!         ClientOptions::new().with_base_url("https://kibana.example.com"),
//!     )?;
//!
//!     let opt = CreateSpaceOptions::new("marketing", "Marketing")
//!         .with_description("This is the Marketing Space");
//!     let (space, resp) = client.spaces().create_space(&opt, &[]).await?;
//!     println!("{} created ({})", space.id, resp.status());
//!
//!     match client.spaces().get_space("missing", &[]).await {
//!         Ok((space, _)) => println!("{:?}", space),
//!         Err(err) => println!("{} (status {:?})", err, err.response().map(|r| r.status())),
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod model;
pub mod options;
pub mod response;
pub mod services;

// Re-exports for convenience
pub use client::{Client, ClientError, Result};
pub use http::RequestOption;
pub use model::{Role, Space};
pub use options::{ClientOptions, Credential, TransportOptions};
pub use response::{ErrorResponse, Response};
