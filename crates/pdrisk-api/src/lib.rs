//! HTTP access layer for the PD Risk Console backends.
//!
//! Centralizes request handling against two services: the auth backend and
//! the prediction/feature-importance backend. One [`RequestGateway`] owns
//! the transport; [`AuthClient`] and [`PredictionClient`] are thin sets of
//! named operations over it.
//!
//! # Overview
//!
//! - Injects `Authorization: Bearer <token>` from an explicit [`Session`]
//!   handle on every request, JSON or multipart.
//! - Encodes file uploads as single-field multipart forms, leaving the
//!   content-type header to the transport so it can generate the boundary.
//! - Normalizes outcomes into one taxonomy: [`ApiError::Transport`],
//!   [`ApiError::ServerRejected`], [`ApiError::MalformedResponse`].
//! - Fails fast with [`ApiError::Busy`] instead of racing when a second
//!   request is issued while one is in flight.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pdrisk_api::{ApiConfig, FilePayload, PredictionClient, RequestGateway, Session};
//!
//! fn predict() -> pdrisk_api::Result<()> {
//!     let gateway = Arc::new(RequestGateway::new(ApiConfig::from_env(), Session::new())?);
//!     let client = PredictionClient::new(gateway);
//!     let response = client.predict_from_file(FilePayload::local("cohort.csv"))?;
//!     println!("{} patients analyzed", response.summary.total_patients);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod prediction;
pub mod session;
pub mod upload;

pub use auth::AuthClient;
pub use config::{ApiConfig, Backend};
pub use error::{ApiError, Result};
pub use gateway::{RequestDescriptor, RequestGateway};
pub use prediction::{DEFAULT_IMPORTANCE_TOP_N, PredictionClient};
pub use session::Session;
pub use upload::{FilePayload, FileSource};
