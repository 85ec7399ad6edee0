// edgectl-api: Async Rust client for the edge controller, CUPS, and CNCA REST APIs

pub mod auth;
pub mod client;
pub mod cnca;
pub mod controller;
pub mod cups;
pub mod error;
pub mod models;
pub mod orchestration;
pub mod session;
pub mod transport;

pub use auth::{Auth, LOGIN_FAILED_MESSAGE, LoginOutcome};
pub use client::{ApiClient, LOGIN_ROUTE, UnauthorizedHook};
pub use controller::PolicyResource;
pub use error::Error;
pub use orchestration::OrchestrationMode;
pub use session::{FileSessionStore, MemorySessionStore, SESSION_KEY, SessionStore};
pub use transport::{DEFAULT_TIMEOUT, TlsMode, TransportConfig};
