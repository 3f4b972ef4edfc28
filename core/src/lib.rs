//! Synchronous client core for the person SOAP service.
//!
//! # Overview
//! Builds envelope `HttpRequest` values and parses XML `HttpResponse` values
//! without touching the network (host-does-IO pattern).
//!
//! # Design
//! - `PersonClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`.
//! - Faults are decoded into `ApiError` so callers can branch on not-found
//!   and email conflicts.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::PersonClient;
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse};
pub use types::{NewPerson, Person, PersonId};
