//! Stage vs. Production Data Quality API Library
//!
//! Compares company emissions and economy data published by the staging and
//! production Klimatkollen APIs, scores each company's staging record against
//! production, and aggregates the results into quality statistics.
//!
//! # Modules
//!
//! - `api`: HTTP routes and handlers.
//! - `core`: Normalization, comparison and aggregation logic.
//! - `integrations`: Upstream snapshot sources.
//! - `cache_validator`: Checksummed snapshot cache entries.
//! - `categories`: Error category catalog.
//! - `circuit_breaker`: Circuit breaker for upstream APIs.
//! - `comparison`: Per-company comparison and scoring.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Snapshot, comparison and report models.
//! - `normalizer`: Reporting period selection and fact extraction.
//! - `report`: Dataset matching and report queries.
//! - `services`: Snapshot clients and the quality service.
//! - `stats`: Aggregation into averages, distributions and histograms.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests and other binaries
pub mod cache_validator;
pub mod categories;
pub mod circuit_breaker;
pub mod comparison;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod report;
pub mod services;
pub mod stats;
