//! # pulse-auth
//!
//! Identity-provider authentication for Pulse.
//!
//! Provides credential validation, sign-up/sign-in/sign-out and password
//! reset over a pluggable backend (managed REST API or in-memory fake), the
//! session channel the presentation layer gates on, OS keychain session
//! storage (`keyring`), and best-effort JWT expiry checks.

pub mod backend;
pub mod client;
pub mod error;
pub mod expiry;
pub mod memory;
pub mod rest;
pub mod session;
pub mod token_store;

pub use backend::{IdentityBackend, ProviderSession};
pub use client::AuthClient;
pub use error::AuthError;
pub use memory::MemoryBackend;
pub use rest::RestBackend;
pub use session::SessionGate;
pub use token_store::StoredSession;
