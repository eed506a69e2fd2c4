//! sustindex-auth
//!
//! The session holder every page consults: who is logged in, whether that
//! is still being worked out, and the stored credential behind it.

pub mod credentials;
pub mod error;
pub mod jwt;
pub mod session;

pub use session::{AuthGate, Session, SessionState};
