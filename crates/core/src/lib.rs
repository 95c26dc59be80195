//! Inkshelf Core - Shared types library.
//!
//! This crate provides common types used across all Inkshelf components:
//! - `storefront` - Public-facing digital books storefront
//! - `integration-tests` - Cross-module tests for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! remote backend access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
