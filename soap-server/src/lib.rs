//! SOAP-style XML service for managing person records.
//!
//! # Overview
//! `POST /soap` accepts an envelope carrying one of six requests (add,
//! delete, update, get, get-all, search), runs it against a
//! [`PersonRepository`] and answers with the matching XML response or a
//! fault.
//!
//! # Design
//! - `AppState` holds the only shared state: the repository handle and the
//!   event sink handlers log through.
//! - Uniqueness and existence guarantees live in the repository.

use std::sync::Arc;

use axum::{routing::post, Router};
use tokio::net::TcpListener;

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod handlers;
pub mod model;
pub mod repo;
pub mod xml;

pub use config::{Config, ConfigError, StorageConfig};
pub use error::SoapError;
pub use events::{Event, EventSink, LogEventSink};
pub use model::{Fault, Person, PersonId};
pub use repo::{
    InMemoryPersonRepository, PersonRepository, RepoError, RepoResult, SqlitePersonRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn PersonRepository>,
    pub events: Arc<dyn EventSink>,
}

impl AppState {
    pub fn new(repo: Arc<dyn PersonRepository>) -> Self {
        Self {
            repo,
            events: Arc::new(LogEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryPersonRepository::new()))
    }
}

/// Router over a fresh in-memory repository.
pub fn app() -> Router {
    router(AppState::default())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/soap", post(handlers::soap_handler))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state)).await
}
