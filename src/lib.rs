//! # Paladium - market browser for the Paladium game API
//!
//! A terminal user interface for browsing the Paladium shop market and
//! looking up players, factions and server status. Built with ratatui and
//! reqwest.
//!
//! ## Architecture
//!
//! - **App**: Event loop, terminal lifecycle and background fetches
//! - **UI**: Layout and rendering logic
//! - **API**: HTTP client and listing normalization
//! - **Market**: Price filter, search, aggregates and CSV export
//! - **State**: Centralized state management
//! - **Events**: Input handling and event processing
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod market;
pub mod state;
pub mod ui;

pub use app::{App, Dispatcher};
pub use config::Config;
pub use error::{Error, Result};
