//! Lead Capture & Confirmation API Library
//!
//! This library provides the core functionality for the lead capture service:
//! the capture form, lead persistence, and the confirmation pipeline that
//! personalizes and sends a confirmation email per submission.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `email`: Email Delivery Service client.
//! - `errors`: Error handling types.
//! - `generation`: Text Generation Service client.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.
//! - `pipeline`: Confirmation pipeline (generate, persist, send).
//! - `render`: Form and dashboard HTML rendering.
//! - `storage`: Database storage operations.
//! - `validation`: Input validation helpers.

pub mod config;
pub mod db;
pub mod email;
pub mod errors;
pub mod generation;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod storage;
pub mod validation;
