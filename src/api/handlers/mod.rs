//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Chat pipeline handler.
pub mod chat;
/// Health check handler.
pub mod health;
/// Chat history handler.
pub mod history;
/// Memory read/clear handlers.
pub mod memory;
