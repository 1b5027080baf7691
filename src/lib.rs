//! taigalist - client core for the Taiga project management service
//!
//! This library holds everything a Taiga front-end needs below the UI: the
//! session, repositories over the Taiga REST API, observable result
//! containers, paged list loaders and per-screen view-models.
//!
//! # Modules
//!
//! * [`api`] - REST transport seam, wire formats and error taxonomy
//! * [`client`] - Assembly of session, transport and repositories from config
//! * [`config`] - Application configuration management
//! * [`entities`] - Domain entities
//! * [`observable`] - Framework-independent observable value
//! * [`paging`] - Cursor pagination
//! * [`repositories`] - Repository traits and their Taiga implementations
//! * [`result`] - Result container for asynchronous operations
//! * [`session`] - Shared session context
//! * [`viewmodels`] - Per-screen controllers

/// REST transport and wire formats
pub mod api;

/// Client assembly
pub mod client;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Domain entities
pub mod entities;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Observable values
pub mod observable;

/// Cursor pagination
pub mod paging;

/// Repository layer over the REST API
pub mod repositories;

/// Result container
pub mod result;

/// Session state
pub mod session;

/// Utility functions for date/time handling
pub mod utils;

/// Per-screen view-models
pub mod viewmodels;

pub use client::TaigaClient;
pub use result::{LoadResult, ResultFlow};
pub use session::Session;
