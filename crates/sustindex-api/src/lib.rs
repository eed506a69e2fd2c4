//! sustindex-api
//!
//! Async client for the Sustindex REST backend. Thin wrapper around
//! `reqwest`: one method per endpoint, JSON in and out, errors mapped to
//! [`error::ApiError`].

pub mod answers;
pub mod attempts;
pub mod auth;
pub mod backend;
pub mod client;
pub mod error;
pub mod surveys;

pub use backend::SurveyBackend;
pub use client::ApiClient;
