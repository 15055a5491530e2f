//! egui panels for the octomind front-end.
//!
//! Panels read from the `UiStore` and report what the user asked for;
//! the app turns those requests into controller calls.

pub mod markup;
pub mod panels;
pub mod state;
pub mod theme;
