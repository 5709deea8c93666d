pub mod auth;

pub use auth::{basic_auth_middleware, extract_basic_credentials, AuthUser, BasicCredentials};
