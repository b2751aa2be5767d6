//! Synchronous client core for an AppDynamics controller's application API.
//!
//! # Overview
//! Maps the controller's public REST and internal RESTUI application endpoints
//! onto typed records. Every call is a single stateless round trip: build an
//! `HttpRequest`, hand it to a `Transport`, decode the JSON body.
//!
//! # Design
//! - `ControllerClient` holds the base URL, the authorization header and the
//!   transport. It carries no mutable state between calls.
//! - `ApplicationService` is the accessor for applications. Each operation is
//!   available both as a `build_*` / `parse_*` pair (the caller does the I/O)
//!   and as a method that runs the round trip through the client's transport.
//! - The transport is a trait so tests can swap in canned responses; the
//!   default implementation is a blocking `ureq` agent.
//! - The public REST surface answers with a bare JSON array, the RESTUI
//!   surface wraps the array in an object. Each endpoint picks its decoder
//!   explicitly.

pub mod applications;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use applications::ApplicationService;
pub use client::ControllerClient;
pub use config::ControllerConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Application, ApplicationTypeInfo};
