//! Minicart Core - Shared types library.
//!
//! This crate provides common types used across all Minicart components:
//! - `storefront` - Server-rendered shop page with catalog, cart and mock login
//! - `cli` - Command-line tools operating on the same persisted store
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no network access, no
//! files. The [`StorageAdapter`] trait is the seam to persistence; concrete
//! adapters that touch the disk live in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities, and the
//!   product / line item records
//! - [`storage`] - Key-value storage adapter trait and an in-memory adapter

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod storage;
pub mod types;

pub use storage::{MemoryStorage, StorageAdapter, StorageError};
pub use types::*;
