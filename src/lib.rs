//! Leadscout Client Engine Library
//!
//! This library provides the client-side engine for the lead-generation
//! dashboard: data models, the result filter, reactive stores, the favorites
//! synchronizer and the backend API client. All ranking, scoring and
//! geocoding happen server-side; this crate is state management and API
//! plumbing.
//!
//! # Modules
//!
//! - `api`: API-layer components (client, CSV export).
//! - `core`: Domain-layer components (filter, stores, models, errors).
//! - `api_client`: Backend HTTP client.
//! - `app`: Application context and orchestration.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `export`: CSV assembly and file output.
//! - `favorites`: Favorites synchronizer.
//! - `filter`: The result filter predicate.
//! - `models`: Core data models.
//! - `store`: Result store with derived qualified view.
//! - `theme`: Visual token tables.

pub mod api;
pub mod core;

// Re-export primary modules for shared use in tests and other binaries
pub mod api_client;
pub mod app;
pub mod config;
pub mod errors;
pub mod export;
pub mod favorites;
pub mod filter;
pub mod models;
pub mod store;
pub mod theme;
