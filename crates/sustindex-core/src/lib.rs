//! sustindex-core
//!
//! Pure domain types shared by every Sustindex crate: the records exchanged
//! with the backend, grade display tones and the listing aggregations the
//! dashboard and history pages show. No I/O lives here.

pub mod error;
pub mod grade;
pub mod ids;
pub mod listing;
pub mod models;
pub mod stats;
