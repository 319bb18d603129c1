pub mod client;
pub mod refresh;
pub mod request;

pub use client::ApiClient;
pub use refresh::TokenRefresher;
pub use request::{ApiRequest, Credentials};
