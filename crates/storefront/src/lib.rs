//! Minicart storefront library.
//!
//! Server-rendered mini shop: a remote product catalog, a cart that
//! survives restarts, a mock sign-in gate and a light/dark theme. This crate
//! provides the storefront functionality as a library, allowing it to be
//! tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod shop;
pub mod state;
pub mod storage;
pub mod views;
