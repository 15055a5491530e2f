//! Web-view adapters for the octo-core ports.

pub mod bridge;
pub mod environment;
pub mod storage;

pub use bridge::TauriBridge;
pub use environment::BrowserEnvironment;
