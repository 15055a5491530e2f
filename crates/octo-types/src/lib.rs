pub mod message;
pub mod event;
pub mod config;
pub mod connection;
pub mod error;
pub mod session;


pub use error::UiError;
pub type Result<T> = std::result::Result<T, UiError>;
