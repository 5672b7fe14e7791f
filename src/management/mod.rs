mod auth;
mod credentials;

pub use auth::TokenManager;
pub use credentials::CredentialsError;
pub use credentials::CredentialsManager;
