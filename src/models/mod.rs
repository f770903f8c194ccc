//! Database models and configuration shared across the order history service.

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod order;
pub mod reorder;
