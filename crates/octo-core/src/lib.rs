pub mod ports;
pub mod observable;
pub mod store;
pub mod formatter;
pub mod naming;
pub mod readiness;
pub mod directory;
pub mod backend;
pub mod controller;
pub mod event_bus;
