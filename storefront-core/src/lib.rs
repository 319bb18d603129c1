//! storefront-core: session state and the authenticated HTTP pipeline shared by
//! storefront clients.
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod session;

pub use error::ClientError;
pub use http::{ApiClient, ApiRequest};
pub use session::{InMemorySessionStore, Session, SessionEvent, SessionStore, TokenPair};

pub use reqwest;
pub use tokio_util::sync::CancellationToken;
pub use tracing;
