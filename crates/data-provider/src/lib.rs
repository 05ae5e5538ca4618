pub mod auth;
pub mod config;
pub mod error;
pub mod guest;
pub mod payload;
pub mod provider;
pub mod query;
pub mod response;
pub mod rest;
pub mod services;
pub mod session;

pub use error::ProviderError;
pub use guest::GuestAwareProvider;
pub use provider::DataProvider;
pub use rest::RestDataProvider;
pub use session::SessionContext;
