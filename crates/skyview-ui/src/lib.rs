//! Session layer for SkyView: the one live search, and the controller that
//! runs its debounced lookups and weather fetches.

pub mod controller;
pub mod error_mapping;
pub mod models;
pub mod services;

pub use controller::SearchController;
pub use models::SearchSession;
pub use services::{FetchError, SessionEvent};
